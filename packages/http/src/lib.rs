//! # remotefs-http
//!
//! A read-only file system over HTTP.
//!
//! [`HttpFileSystem`] implements the `remotefs-core` traits against a remote
//! origin: each logical path is resolved against a base URL and fetched with a
//! blocking GET (`open`) or HEAD (`stat`). Callers see files, not responses.
//!
//! ## Error mapping
//!
//! | Status | Error kind |
//! |---|---|
//! | 2xx | success |
//! | 404 | `NotFound` |
//! | 401, 403 | `PermissionDenied` |
//! | anything else | `Invalid` |
//!
//! Transport failures (DNS, connect, timeout) are returned unmapped as
//! `Error::Transport` and never retried.
//!
//! ## Caching
//!
//! With [`Options::cache_dir`] set, every fetched file is mirrored to
//! `<cache_dir>/<logical path>` and later opens are served from disk without
//! contacting the origin. Entries are never revalidated.
//!
//! ```ignore
//! use remotefs_core::read_to_string;
//! use remotefs_http::{HttpFileSystem, Options};
//!
//! let fs = HttpFileSystem::with_options(
//!     "https://static.example.com/",
//!     Options::default().with_cache_dir("/var/cache/static"),
//! )?;
//!
//! // First call hits the network, second is served from the mirror.
//! let a = read_to_string(&fs, "docs/readme.txt")?;
//! let b = read_to_string(&fs, "docs/readme.txt")?;
//! assert_eq!(a, b);
//! ```
//!
//! Concurrent opens of the same uncached path each fetch and overwrite the
//! mirror entry (last writer wins). Enable [`Options::single_flight`] to
//! serialize them per path.

pub mod cache;
pub mod error;
pub mod file;
pub mod status;
pub mod transport;
pub mod types;

mod fs;
mod options;
mod single_flight;

pub use cache::CacheMirror;
pub use error::Error;
pub use file::{HttpFile, HttpFileInfo};
pub use fs::HttpFileSystem;
pub use options::Options;
pub use status::{status_error, StatusError};
pub use transport::{ReqwestTransport, Transport, DEFAULT_TIMEOUT};
pub use types::{HttpRequest, HttpResponse, Method};
