//! Convenience operations over any [`FileSystem`].

use std::io::Read;

use crate::{Error, File, FileInfo, FileSystem, StatFileSystem};

/// Upper bound on the buffer reserved from a file's declared size.
const PREALLOCATE_LIMIT: u64 = 64 * 1024;

/// Read the whole file at `name`.
///
/// The file is always closed, even when reading fails. A read error wins over
/// a close error.
pub fn read_file<F: FileSystem + ?Sized>(fs: &F, name: &str) -> Result<Vec<u8>, Error> {
    let mut file = fs.open(name)?;

    // The declared size comes from the remote side; only trust it up to a point.
    let capacity = file
        .stat()
        .ok()
        .and_then(|info| info.size())
        .map_or(0, |size| size.min(PREALLOCATE_LIMIT) as usize);
    let mut bytes = Vec::with_capacity(capacity);

    let read = file.read_to_end(&mut bytes);
    let closed = file.close();

    read.map_err(Error::Read)?;
    closed?;
    Ok(bytes)
}

/// Read the whole file at `name` as UTF-8.
pub fn read_to_string<F: FileSystem + ?Sized>(fs: &F, name: &str) -> Result<String, Error> {
    let bytes = read_file(fs, name)?;
    String::from_utf8(bytes)
        .map_err(|e| Error::Read(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Metadata for the file at `name`.
pub fn stat<F: StatFileSystem + ?Sized>(
    fs: &F,
    name: &str,
) -> Result<<F::File as File>::Info, Error> {
    fs.stat(name)
}
