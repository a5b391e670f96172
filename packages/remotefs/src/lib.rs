//! remotefs: read-only file access to remote origins.
//!
//! Code written against [`FileSystem`] and [`StatFileSystem`] reads files by
//! logical path without caring where the bytes live. [`HttpFileSystem`] serves
//! them from an HTTP origin and can mirror everything it fetches into a local
//! directory.
//!
//! ```ignore
//! use remotefs::{read_to_string, HttpFileSystem, Options};
//!
//! let fs = HttpFileSystem::with_options(
//!     "https://static.example.com/assets/",
//!     Options::default().with_cache_dir("/var/cache/assets"),
//! )?;
//! let css = read_to_string(&fs, "css/site.css")?;
//! ```

pub use remotefs_core::*;

pub use remotefs_http::{
    CacheMirror, HttpFile, HttpFileInfo, HttpFileSystem, Options, ReqwestTransport, StatusError,
    Transport,
};

/// Errors raised while building an [`HttpFileSystem`].
pub use remotefs_http::Error as BuildError;

pub mod http {
    //! Request and response types for custom [`Transport`](crate::Transport)s.
    pub use remotefs_http::types::*;
    pub use remotefs_http::{status_error, DEFAULT_TIMEOUT};
}
