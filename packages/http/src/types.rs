use std::fmt;
use std::io::Read;

use chrono::{DateTime, Utc};
use http::header::{HeaderMap, CONTENT_LENGTH, LAST_MODIFIED};
use url::Url;

/// HTTP methods the file system issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    GET,
    HEAD,
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => http::Method::GET,
            Method::HEAD => http::Method::HEAD,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::GET => write!(f, "GET"),
            Method::HEAD => write!(f, "HEAD"),
        }
    }
}

/// A fully resolved request handed to a [`crate::Transport`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,

    /// Absolute URL (base URL joined with the logical path)
    pub url: Url,

    pub headers: HeaderMap,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: HeaderMap::new(),
        }
    }

    pub fn head(url: Url) -> Self {
        Self {
            method: Method::HEAD,
            url,
            headers: HeaderMap::new(),
        }
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }
}

/// Streaming response body.
pub type Body = Box<dyn Read + Send>;

/// HTTP response from a transport, with the body left unread.
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Status line text including the code (e.g., "404 Not Found")
    pub status_text: String,

    pub headers: HeaderMap,

    pub body: Body,
}

impl HttpResponse {
    /// Declared `Content-Length`, if present and well formed.
    pub fn content_length(&self) -> Option<u64> {
        self.headers
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }

    /// `Last-Modified`, parsed as an HTTP date.
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        let raw = self.headers.get(LAST_MODIFIED)?;
        let parsed = raw.to_str().ok().and_then(parse_http_date);
        if parsed.is_none() {
            log::warn!("Ignoring unparseable Last-Modified header: {:?}", raw);
        }
        parsed
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("status_text", &self.status_text)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Parse an RFC 1123 HTTP date such as `Wed, 21 Oct 2015 07:28:00 GMT`.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format a timestamp as an RFC 1123 HTTP date.
pub fn format_http_date(value: &DateTime<Utc>) -> String {
    value.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
