//! HTTP transport abstraction.
//!
//! The file system issues requests through the [`Transport`] trait so the
//! outbound client can be swapped (custom TLS, proxies, tests) without
//! touching path resolution or caching.

use std::time::Duration;

use reqwest::blocking::Client;

use remotefs_core::BoxError;

use crate::types::{HttpRequest, HttpResponse};

/// Default request timeout for [`ReqwestTransport`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for executing HTTP requests.
///
/// Implementations must be synchronous: `send` returns once the status line
/// and headers are available, leaving the body as a stream.
pub trait Transport: Send + Sync {
    /// Execute a request.
    ///
    /// Returns `Err` only when no response was received (DNS, connect,
    /// timeout). Non-2xx statuses are successful sends.
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError>;
}

/// Production transport using reqwest's blocking client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new transport with the given timeout.
    pub fn new(timeout: Duration) -> Result<Self, crate::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Create with default timeout of 30 seconds.
    pub fn with_default_timeout() -> Result<Self, crate::Error> {
        Self::new(DEFAULT_TIMEOUT)
    }

    /// Wrap an already configured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        let method: http::Method = request.method.into();

        let response = self
            .client
            .request(method, request.url.clone())
            .headers(request.headers.clone())
            .send()?;

        let status = response.status();

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.to_string(),
            headers: response.headers().clone(),
            body: Box::new(response),
        })
    }
}

/// Mock transport for testing.
///
/// Returns predefined responses keyed by URL path and records every request.
#[cfg(test)]
pub mod mock {
    use super::*;
    use http::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH};
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    use crate::types::Method;

    /// A canned response.
    #[derive(Clone, Debug)]
    pub struct MockResponse {
        pub status: u16,
        pub status_text: String,
        pub headers: Vec<(String, String)>,
        pub body: Vec<u8>,
    }

    impl MockResponse {
        /// 200 with a body and matching Content-Length.
        pub fn ok(body: impl Into<Vec<u8>>) -> Self {
            let body = body.into();
            Self {
                status: 200,
                status_text: "200 OK".to_string(),
                headers: vec![(CONTENT_LENGTH.to_string(), body.len().to_string())],
                body,
            }
        }

        pub fn status(status: u16, status_text: &str) -> Self {
            Self {
                status,
                status_text: status_text.to_string(),
                headers: Vec::new(),
                body: Vec::new(),
            }
        }

        pub fn with_header(mut self, name: &str, value: &str) -> Self {
            self.headers.push((name.to_string(), value.to_string()));
            self
        }

        fn to_response(&self, method: Method) -> HttpResponse {
            let mut headers = HeaderMap::new();
            for (name, value) in &self.headers {
                headers.append(
                    HeaderName::try_from(name.as_str()).unwrap(),
                    HeaderValue::try_from(value.as_str()).unwrap(),
                );
            }
            let body = match method {
                Method::GET => self.body.clone(),
                Method::HEAD => Vec::new(),
            };
            HttpResponse {
                status: self.status,
                status_text: self.status_text.clone(),
                headers,
                body: Box::new(Cursor::new(body)),
            }
        }
    }

    /// A mock transport that returns predefined responses.
    #[derive(Clone, Default)]
    pub struct MockTransport {
        /// Responses keyed by URL path.
        responses: Arc<Mutex<HashMap<String, MockResponse>>>,
        /// Recorded requests for verification.
        recorded_requests: Arc<Mutex<Vec<HttpRequest>>>,
        /// Custom error message when failing all requests.
        fail_with: Arc<Mutex<Option<String>>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a response for a URL path such as `/files/file1.txt`.
        pub fn with_response(self, path: impl Into<String>, response: MockResponse) -> Self {
            self.responses.lock().unwrap().insert(path.into(), response);
            self
        }

        /// Configure to fail all requests with an error.
        pub fn fail_with(self, message: impl Into<String>) -> Self {
            *self.fail_with.lock().unwrap() = Some(message.into());
            self
        }

        /// Get all recorded requests.
        pub fn recorded_requests(&self) -> Vec<HttpRequest> {
            self.recorded_requests.lock().unwrap().clone()
        }
    }

    impl Transport for MockTransport {
        fn send(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
            self.recorded_requests.lock().unwrap().push(request.clone());

            if let Some(message) = self.fail_with.lock().unwrap().clone() {
                return Err(message.into());
            }

            let responses = self.responses.lock().unwrap();
            match responses.get(request.url.path()) {
                Some(response) => Ok(response.to_response(request.method)),
                None => Ok(MockResponse::status(404, "404 Not Found").to_response(request.method)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{MockResponse, MockTransport};
    use super::*;
    use crate::types::Method;
    use std::io::Read;
    use url::Url;

    fn url(path: &str) -> Url {
        Url::parse("http://origin.test/").unwrap().join(path).unwrap()
    }

    #[test]
    fn mock_transport_returns_configured_response() {
        let transport = MockTransport::new().with_response("/a.txt", MockResponse::ok("abc"));

        let mut response = transport.send(&HttpRequest::get(url("a.txt"))).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.content_length(), Some(3));

        let mut body = String::new();
        response.body.read_to_string(&mut body).unwrap();
        assert_eq!(body, "abc");
    }

    #[test]
    fn mock_transport_head_has_no_body() {
        let transport = MockTransport::new().with_response("/a.txt", MockResponse::ok("abc"));

        let mut response = transport.send(&HttpRequest::head(url("a.txt"))).unwrap();
        assert_eq!(response.content_length(), Some(3));

        let mut body = Vec::new();
        response.body.read_to_end(&mut body).unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn mock_transport_returns_404_when_no_match() {
        let transport = MockTransport::new();
        let response = transport.send(&HttpRequest::get(url("unknown"))).unwrap();
        assert_eq!(response.status, 404);
    }

    #[test]
    fn mock_transport_fails_when_configured() {
        let transport = MockTransport::new().fail_with("connection refused");
        let result = transport.send(&HttpRequest::get(url("any")));
        assert_eq!(result.unwrap_err().to_string(), "connection refused");
    }

    #[test]
    fn mock_transport_records_requests() {
        let transport = MockTransport::new();

        transport.send(&HttpRequest::get(url("first"))).unwrap();
        transport.send(&HttpRequest::head(url("second"))).unwrap();

        let recorded = transport.recorded_requests();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].url.path(), "/first");
        assert_eq!(recorded[0].method, Method::GET);
        assert_eq!(recorded[1].url.path(), "/second");
        assert_eq!(recorded[1].method, Method::HEAD);
    }

    #[test]
    fn reqwest_transport_creation() {
        let transport = ReqwestTransport::with_default_timeout();
        assert!(transport.is_ok());
    }

    #[test]
    fn reqwest_transport_custom_timeout() {
        let transport = ReqwestTransport::new(Duration::from_secs(10));
        assert!(transport.is_ok());
    }
}
