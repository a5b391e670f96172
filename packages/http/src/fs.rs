use std::fmt;
use std::sync::Arc;

use http::header::HeaderMap;
use url::Url;

use remotefs_core::{
    Error, ErrorKind, File, FileSystem, Path, PathError, StatFileSystem, OP_OPEN,
};

use crate::cache::CacheMirror;
use crate::file::{HttpFile, HttpFileInfo};
use crate::options::Options;
use crate::single_flight::SingleFlight;
use crate::status::status_error;
use crate::transport::{ReqwestTransport, Transport, DEFAULT_TIMEOUT};
use crate::types::{HttpRequest, Method};

/// A read-only file system backed by an HTTP origin.
///
/// Logical paths are resolved against the base URL as URI references and
/// fetched with the configured transport:
/// - `open(path)` performs a GET and returns the body as a stream
/// - `stat(path)` performs a HEAD and returns metadata only
///
/// Status codes map to error kinds: 404 is `NotFound`, 401 and 403 are
/// `PermissionDenied`, anything else outside 2xx is `Invalid`. HTTP has no
/// directories, so every entry reports `is_dir() == false`.
///
/// With a cache directory configured, `open` first looks for a mirrored copy
/// and never contacts the origin for a path that has one. Fetched files are
/// written through to the mirror before being returned. Mirrored copies are
/// never revalidated.
///
/// # Example
///
/// ```ignore
/// use remotefs_core::{read_to_string, StatFileSystem, FileInfo};
/// use remotefs_http::HttpFileSystem;
///
/// let fs = HttpFileSystem::new("https://static.example.com/")?;
///
/// let text = read_to_string(&fs, "docs/readme.txt")?;
/// let info = fs.stat("docs/readme.txt")?;
/// println!("{} is {:?} bytes", info.name(), info.size());
/// ```
#[derive(Clone)]
pub struct HttpFileSystem {
    base_url: Url,
    transport: Arc<dyn Transport>,
    headers: HeaderMap,
    cache: Option<CacheMirror>,
    single_flight: Option<Arc<SingleFlight>>,
}

impl HttpFileSystem {
    /// Create a file system rooted at `base_url` with default options.
    pub fn new(base_url: &str) -> Result<Self, crate::Error> {
        Self::with_options(base_url, Options::default())
    }

    pub fn with_options(base_url: &str, options: Options) -> Result<Self, crate::Error> {
        let base_url = Url::parse(base_url)?;
        Self::from_url(base_url, options)
    }

    pub fn from_url(base_url: Url, options: Options) -> Result<Self, crate::Error> {
        if base_url.cannot_be_a_base() {
            return Err(crate::Error::InvalidUrl {
                message: format!("{} cannot be used as a base URL", base_url),
            });
        }

        let transport: Arc<dyn Transport> = match options.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                options.timeout.unwrap_or(DEFAULT_TIMEOUT),
            )?),
        };

        let cache = options.cache_dir.map(CacheMirror::new);
        let single_flight = match (&cache, options.single_flight) {
            (Some(_), true) => Some(Arc::new(SingleFlight::default())),
            _ => None,
        };

        Ok(Self {
            base_url,
            transport,
            headers: options.headers,
            cache,
            single_flight,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Root of the on-disk mirror, if caching is enabled.
    pub fn cache_dir(&self) -> Option<&std::path::Path> {
        self.cache.as_ref().map(CacheMirror::root)
    }

    fn validate(name: &str) -> Result<Path, Error> {
        let path = Path::parse(name).map_err(|e| {
            log::debug!("Rejecting path {:?}: {}", name, e);
            Error::from(PathError::new(OP_OPEN, name, ErrorKind::Invalid))
        })?;

        // URL resolution decodes `%2e` before removing dot segments.
        if path.iter().any(|c| is_encoded_dot_segment(c)) {
            log::debug!("Rejecting path {:?}: encoded dot segment", name);
            return Err(PathError::new(OP_OPEN, name, ErrorKind::Invalid).into());
        }

        Ok(path)
    }

    /// Resolve a logical path against the base URL.
    ///
    /// This is URI reference resolution, not a filesystem join: with a base of
    /// `https://host/api` (no trailing slash) `a.txt` resolves to
    /// `https://host/a.txt`. The result must stay on the base's origin and
    /// under the base's directory.
    fn resolve(&self, name: &str) -> Result<Url, Error> {
        let url = self.base_url.join(name).map_err(|e| {
            Error::from(PathError::new(OP_OPEN, name, ErrorKind::Invalid).with_source(e))
        })?;

        let base_path = self.base_url.path();
        let dir = &base_path[..base_path.rfind('/').map_or(0, |i| i + 1)];
        if url.origin() != self.base_url.origin() || !url.path().starts_with(dir) {
            log::debug!("Rejecting path {:?}: resolves outside base to {}", name, url);
            return Err(PathError::new(OP_OPEN, name, ErrorKind::Invalid).into());
        }

        Ok(url)
    }

    /// Issue one request and turn a successful response into a file.
    fn request(&self, method: Method, name: &str, path: Path) -> Result<HttpFile, Error> {
        let url = self.resolve(name)?;
        log::trace!("{} {}", method, url);

        let request = match method {
            Method::GET => HttpRequest::get(url),
            Method::HEAD => HttpRequest::head(url),
        }
        .with_headers(self.headers.clone());
        let response = self.transport.send(&request).map_err(Error::Transport)?;

        if let Some(status) = status_error(response.status, &response.status_text) {
            log::debug!("{} {} failed: {}", method, request.url, status.status_text);
            return Err(PathError::new(OP_OPEN, name, status.kind)
                .with_source(status)
                .into());
        }

        Ok(HttpFile::from_response(path, response))
    }

    /// GET the file and, with caching on, write it through to the mirror.
    fn fetch(&self, name: &str, path: Path) -> Result<HttpFile, Error> {
        let file = self.request(Method::GET, name, path)?;
        match &self.cache {
            Some(cache) => cache.store(file),
            None => Ok(file),
        }
    }
}

/// `.` or `..` spelled with `%2e`, in any case, e.g. `%2E%2e` or `.%2e`.
fn is_encoded_dot_segment(component: &str) -> bool {
    if !component.contains('%') {
        return false;
    }
    let decoded = component.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

impl FileSystem for HttpFileSystem {
    type File = HttpFile;

    fn open(&self, name: &str) -> Result<HttpFile, Error> {
        let path = Self::validate(name)?;

        let Some(cache) = &self.cache else {
            return self.fetch(name, path);
        };

        if let Some(hit) = cache.lookup(&path) {
            return Ok(hit);
        }

        match &self.single_flight {
            Some(flights) => flights.run(&path, || match cache.lookup(&path) {
                Some(hit) => Ok(hit),
                None => self.fetch(name, path.clone()),
            }),
            None => self.fetch(name, path),
        }
    }
}

impl StatFileSystem for HttpFileSystem {
    fn stat(&self, name: &str) -> Result<HttpFileInfo, Error> {
        let path = Self::validate(name)?;

        let mut file = self.request(Method::HEAD, name, path)?;
        file.close()?;
        file.stat()
    }
}

impl fmt::Debug for HttpFileSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFileSystem")
            .field("base_url", &self.base_url.as_str())
            .field("cache_dir", &self.cache_dir())
            .field("single_flight", &self.single_flight.is_some())
            .finish_non_exhaustive()
    }
}
