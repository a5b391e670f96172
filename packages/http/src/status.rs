//! Mapping from HTTP status codes to file error kinds.

use std::fmt;

use remotefs_core::ErrorKind;

/// A non-success HTTP status, classified as a file error kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusError {
    pub status: u16,

    /// Status line text, e.g. "404 Not Found"
    pub status_text: String,

    pub kind: ErrorKind,
}

/// Classify an HTTP status. Returns `None` for 2xx.
///
/// 404 is `NotFound`, 401 and 403 are `PermissionDenied`, and every other
/// non-2xx status is `Invalid`.
pub fn status_error(status: u16, status_text: &str) -> Option<StatusError> {
    let kind = match status {
        200..=299 => return None,
        404 => ErrorKind::NotFound,
        401 | 403 => ErrorKind::PermissionDenied,
        _ => ErrorKind::Invalid,
    };

    Some(StatusError {
        status,
        status_text: status_text.to_string(),
        kind,
    })
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.status_text)
    }
}

impl std::error::Error for StatusError {}
