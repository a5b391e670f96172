use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use http::header::{HeaderMap, HeaderName, HeaderValue};

use crate::transport::Transport;

/// Construction-time configuration for [`crate::HttpFileSystem`].
///
/// Every field is read once when the file system is built; nothing here is
/// shared process-wide.
///
/// ```ignore
/// use remotefs_http::{HttpFileSystem, Options};
///
/// let options = Options::default()
///     .with_cache_dir("/var/cache/assets")
///     .with_header("Authorization", "Bearer token")?;
/// let fs = HttpFileSystem::with_options("https://assets.example.com/", options)?;
/// ```
#[derive(Clone, Default)]
pub struct Options {
    /// Outbound client. When unset, a fresh `ReqwestTransport` is built.
    pub transport: Option<Arc<dyn Transport>>,

    /// Root of the on-disk mirror. Caching is off when unset.
    pub cache_dir: Option<PathBuf>,

    /// Headers sent with every request.
    pub headers: HeaderMap,

    /// Request timeout for the default transport. Ignored when `transport`
    /// is set.
    pub timeout: Option<Duration>,

    /// Serialize concurrent cache population of the same path.
    pub single_flight: bool,
}

impl Options {
    /// Override the default client used for connections.
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use a local cache for all downloaded files.
    pub fn with_cache_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(path.into());
        self
    }

    /// Add a header that will be sent with every request
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, crate::Error> {
        let name = HeaderName::try_from(name)?;
        let value = HeaderValue::try_from(value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.single_flight = enabled;
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("custom_transport", &self.transport.is_some())
            .field("cache_dir", &self.cache_dir)
            .field("headers", &self.headers)
            .field("timeout", &self.timeout)
            .field("single_flight", &self.single_flight)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_empty() {
        let options = Options::default();
        assert!(options.transport.is_none());
        assert!(options.cache_dir.is_none());
        assert!(options.headers.is_empty());
        assert!(options.timeout.is_none());
        assert!(!options.single_flight);
    }

    #[test]
    fn builder_methods_set_fields() {
        let options = Options::default()
            .with_cache_dir("/tmp/cache")
            .with_timeout(Duration::from_secs(5))
            .with_single_flight(true)
            .with_header("Authorization", "Bearer token123")
            .unwrap()
            .with_header("X-Custom", "value")
            .unwrap();

        assert_eq!(options.cache_dir, Some(PathBuf::from("/tmp/cache")));
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
        assert!(options.single_flight);
        assert_eq!(options.headers.len(), 2);
        assert_eq!(
            options.headers.get("authorization").unwrap(),
            "Bearer token123"
        );
    }

    #[test]
    fn invalid_headers_rejected() {
        assert!(matches!(
            Options::default().with_header("bad header", "x"),
            Err(crate::Error::InvalidHeaderName(_))
        ));
        assert!(matches!(
            Options::default().with_header("X-Ok", "line\nbreak"),
            Err(crate::Error::InvalidHeaderValue(_))
        ));
    }

    #[test]
    fn debug_hides_transport() {
        let debug = format!("{:?}", Options::default());
        assert!(debug.contains("custom_transport: false"));
    }
}
