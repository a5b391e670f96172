//! Core traits: FileSystem, StatFileSystem, File, FileInfo.

use std::io::Read;

use chrono::{DateTime, Utc};

use crate::Error;

/// Metadata describing one file.
pub trait FileInfo {
    /// Base name of the file (the last path component).
    fn name(&self) -> &str;

    /// Declared size in bytes, `None` when unknown.
    fn size(&self) -> Option<u64>;

    /// Last modification time, `None` when the source did not provide one.
    fn modified(&self) -> Option<DateTime<Utc>>;

    fn is_dir(&self) -> bool;

    /// Unix permission bits.
    fn mode(&self) -> u32;
}

/// An open file: a byte stream plus metadata.
///
/// Callers read through `std::io::Read` and must call `close` when done.
pub trait File: Read {
    type Info: FileInfo;

    /// Metadata for this file. Never touches the underlying stream.
    fn stat(&self) -> Result<Self::Info, Error>;

    /// Release the underlying stream.
    ///
    /// Closing twice is an error.
    fn close(&mut self) -> Result<(), Error>;
}

/// A read-only hierarchical file system addressed by logical paths.
///
/// # Object Safety
///
/// Because of the associated `File` type, use generics rather than
/// `dyn FileSystem`.
pub trait FileSystem: Send + Sync {
    type File: File;

    /// Open the file at `name` for reading.
    ///
    /// `name` must be a valid logical path (see [`crate::Path`]); anything
    /// else fails with an `open` path error of kind `Invalid`.
    fn open(&self, name: &str) -> Result<Self::File, Error>;
}

/// A file system that can report metadata without opening a stream.
pub trait StatFileSystem: FileSystem {
    fn stat(&self, name: &str) -> Result<<Self::File as File>::Info, Error>;
}

// Blanket implementations for references

impl<T: FileSystem + ?Sized> FileSystem for &T {
    type File = T::File;

    fn open(&self, name: &str) -> Result<Self::File, Error> {
        (**self).open(name)
    }
}

impl<T: StatFileSystem + ?Sized> StatFileSystem for &T {
    fn stat(&self, name: &str) -> Result<<Self::File as File>::Info, Error> {
        (**self).stat(name)
    }
}
