//! Error types for file operations.

use std::fmt;
use std::io;

/// Boxed error used for causes that come from outside this crate.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The abstract kinds of failure a caller can distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The file does not exist.
    NotFound,
    /// Access to the file is not allowed.
    PermissionDenied,
    /// Anything else: malformed paths, unexpected statuses, server errors.
    Invalid,
}

impl ErrorKind {
    /// The matching `std::io::ErrorKind`.
    pub fn to_io(self) -> io::ErrorKind {
        match self {
            ErrorKind::NotFound => io::ErrorKind::NotFound,
            ErrorKind::PermissionDenied => io::ErrorKind::PermissionDenied,
            ErrorKind::Invalid => io::ErrorKind::InvalidInput,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotFound => write!(f, "file does not exist"),
            ErrorKind::PermissionDenied => write!(f, "permission denied"),
            ErrorKind::Invalid => write!(f, "invalid argument"),
        }
    }
}

/// An error tied to an operation on a specific path.
///
/// Carries the failing operation name, the path exactly as the caller passed
/// it, the abstract kind, and the underlying cause when there is one.
#[derive(Debug)]
pub struct PathError {
    pub op: &'static str,
    pub path: String,
    pub kind: ErrorKind,
    pub source: Option<BoxError>,
}

impl PathError {
    pub fn new(op: &'static str, path: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            op,
            path: path.into(),
            kind,
            source: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Downcast the cause to a concrete error type.
    pub fn source_as<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref().and_then(|e| e.downcast_ref::<E>())
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{} {}: {}", self.op, self.path, source),
            None => write!(f, "{} {}: {}", self.op, self.path, self.kind),
        }
    }
}

impl std::error::Error for PathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Errors returned by file systems and files.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A path-operation failure: invalid path, missing file, denied access,
    /// or an unexpected remote status.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The transport failed before producing a response. The underlying error
    /// is kept unmapped.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Local storage failed (cache directories or files).
    #[error("storage error: {0}")]
    Storage(#[source] io::Error),

    /// Reading a file's byte stream failed.
    #[error("read error: {0}")]
    Read(#[source] io::Error),

    /// The file has been closed or never had a body attached.
    #[error("file already closed")]
    Closed,
}

impl Error {
    pub fn transport(error: impl Into<BoxError>) -> Self {
        Error::Transport(error.into())
    }

    /// The abstract kind, for path-operation errors.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Path(e) => Some(e.kind),
            _ => None,
        }
    }

    /// The path-operation error, if this is one.
    pub fn as_path_error(&self) -> Option<&PathError> {
        match self {
            Error::Path(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(ErrorKind::NotFound)
    }

    pub fn is_permission_denied(&self) -> bool {
        self.kind() == Some(ErrorKind::PermissionDenied)
    }

    pub fn is_invalid(&self) -> bool {
        self.kind() == Some(ErrorKind::Invalid)
    }
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        match error {
            Error::Storage(e) | Error::Read(e) => e,
            Error::Closed => io::Error::other(Error::Closed),
            other => {
                let kind = other.kind().map_or(io::ErrorKind::Other, ErrorKind::to_io);
                io::Error::new(kind, other)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn path_error_display_without_source() {
        let e = PathError::new("open", "/files/file1.txt", ErrorKind::Invalid);
        assert_eq!(e.to_string(), "open /files/file1.txt: invalid argument");
    }

    #[test]
    fn path_error_display_with_source() {
        let e = PathError::new("open", "x", ErrorKind::Invalid).with_source(Boom);
        assert_eq!(e.to_string(), "open x: boom");
        assert!(StdError::source(&e).is_some());
        assert!(e.source_as::<Boom>().is_some());
    }

    #[test]
    fn kind_display() {
        assert_eq!(ErrorKind::NotFound.to_string(), "file does not exist");
        assert_eq!(ErrorKind::PermissionDenied.to_string(), "permission denied");
        assert_eq!(ErrorKind::Invalid.to_string(), "invalid argument");
    }

    #[test]
    fn error_kind_accessors() {
        let e: Error = PathError::new("open", "a", ErrorKind::NotFound).into();
        assert!(e.is_not_found());
        assert!(!e.is_invalid());
        assert_eq!(e.as_path_error().map(|p| p.path.as_str()), Some("a"));

        assert_eq!(Error::Closed.kind(), None);
        assert_eq!(Error::transport(Boom).kind(), None);
    }

    #[test]
    fn transport_error_keeps_cause() {
        let e = Error::transport(Boom);
        assert_eq!(e.to_string(), "transport error: boom");
        let source = StdError::source(&e).unwrap();
        assert!(source.downcast_ref::<Boom>().is_some());
    }

    #[test]
    fn io_conversion_keeps_kind() {
        let e: Error = PathError::new("open", "a", ErrorKind::PermissionDenied).into();
        let io: io::Error = e.into();
        assert_eq!(io.kind(), io::ErrorKind::PermissionDenied);

        let e: Error = PathError::new("open", "a", ErrorKind::NotFound).into();
        assert_eq!(io::Error::from(e).kind(), io::ErrorKind::NotFound);

        let e = Error::Storage(io::Error::new(io::ErrorKind::WriteZero, "short write"));
        assert_eq!(io::Error::from(e).kind(), io::ErrorKind::WriteZero);
    }

    #[test]
    fn closed_converts_to_other() {
        let io: io::Error = Error::Closed.into();
        assert_eq!(io.kind(), io::ErrorKind::Other);
        assert!(io.to_string().contains("closed"));
    }
}
