//! remotefs core: the read-only file abstraction.
//!
//! This layer defines the contract that remote and local backends implement:
//! - `Path`: a validated logical path (relative, slash-separated, no dot segments)
//! - `FileSystem` / `StatFileSystem`: open and stat by logical path
//! - `File` / `FileInfo`: a readable, closeable stream plus its metadata
//! - `Error` / `PathError`: failures tagged with operation and path
//!
//! Code written against these traits works the same whether bytes come from
//! the network or from disk.
//!
//! # Example
//!
//! ```rust
//! use remotefs_core::{read_file, Error, FileSystem};
//!
//! fn load_config<F: FileSystem>(fs: &F) -> Result<Vec<u8>, Error> {
//!     read_file(fs, "config/app.toml")
//! }
//! ```

mod error;
mod fs;
mod path;
mod traits;

pub use error::{BoxError, Error, ErrorKind, PathError};
pub use fs::{read_file, read_to_string, stat};
pub use path::{InvalidPath, Path};
pub use traits::{File, FileInfo, FileSystem, StatFileSystem};

/// Operation name used in every path error raised by `open` and `stat`.
pub const OP_OPEN: &str = "open";
