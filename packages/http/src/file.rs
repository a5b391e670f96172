//! Files served by [`crate::HttpFileSystem`].

use std::fmt;
use std::fs;
use std::io::{self, Read};

use chrono::{DateTime, Utc};

use remotefs_core::{Error, File, FileInfo, Path};

use crate::types::{Body, HttpResponse};

/// Permission bits reported for every file: read-only for everyone.
pub const FILE_MODE: u32 = 0o444;

/// Metadata of an [`HttpFile`].
///
/// Size and modification time come from the response headers that produced
/// the file, not from any local copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpFileInfo {
    path: Path,
    size: Option<u64>,
    modified: Option<DateTime<Utc>>,
}

impl HttpFileInfo {
    pub(crate) fn new(path: Path, size: Option<u64>, modified: Option<DateTime<Utc>>) -> Self {
        Self {
            path,
            size,
            modified,
        }
    }

    /// Full logical path, relative to the origin.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FileInfo for HttpFileInfo {
    fn name(&self) -> &str {
        self.path.base_name()
    }

    fn size(&self) -> Option<u64> {
        self.size
    }

    fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }

    // HTTP has no directories.
    fn is_dir(&self) -> bool {
        false
    }

    fn mode(&self) -> u32 {
        FILE_MODE
    }
}

/// Where a file's bytes come from.
pub(crate) enum Source {
    Remote(Body),
    Cached(fs::File),
}

impl Read for Source {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Source::Remote(body) => body.read(buf),
            Source::Cached(file) => file.read(buf),
        }
    }
}

/// An open file backed by a response body or a cache file.
///
/// Read it with `std::io::Read`, then call [`File::close`], which drains any
/// unread bytes so the underlying connection can be reused.
pub struct HttpFile {
    info: HttpFileInfo,
    source: Option<Source>,
}

impl HttpFile {
    /// Wrap a successful response. Metadata comes from its headers.
    pub(crate) fn from_response(path: Path, response: HttpResponse) -> Self {
        let info = HttpFileInfo::new(path, response.content_length(), response.last_modified());
        Self {
            info,
            source: Some(Source::Remote(response.body)),
        }
    }

    /// Wrap a file found in the cache. With no response at hand, metadata
    /// comes from the file itself.
    pub(crate) fn from_cache_hit(path: Path, file: fs::File, metadata: &fs::Metadata) -> Self {
        let modified = metadata.modified().ok().map(DateTime::<Utc>::from);
        let info = HttpFileInfo::new(path, Some(metadata.len()), modified);
        Self {
            info,
            source: Some(Source::Cached(file)),
        }
    }

    pub(crate) fn from_parts(info: HttpFileInfo, source: Source) -> Self {
        Self {
            info,
            source: Some(source),
        }
    }

    /// Split into metadata and the still-open source.
    pub(crate) fn into_parts(mut self) -> Result<(HttpFileInfo, Source), Error> {
        let source = self.source.take().ok_or(Error::Closed)?;
        Ok((self.info, source))
    }

    pub fn info(&self) -> &HttpFileInfo {
        &self.info
    }

    /// Full logical path, relative to the origin.
    pub fn path(&self) -> &Path {
        self.info.path()
    }

    /// True when reads are served from the local cache.
    pub fn is_cached(&self) -> bool {
        matches!(self.source, Some(Source::Cached(_)))
    }

    /// True once the stream has been released.
    pub fn is_closed(&self) -> bool {
        self.source.is_none()
    }
}

impl Read for HttpFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.source.as_mut() {
            Some(source) => source.read(buf),
            None => Err(Error::Closed.into()),
        }
    }
}

impl File for HttpFile {
    type Info = HttpFileInfo;

    fn stat(&self) -> Result<HttpFileInfo, Error> {
        Ok(self.info.clone())
    }

    fn close(&mut self) -> Result<(), Error> {
        let mut source = self.source.take().ok_or(Error::Closed)?;
        // Drain errors are irrelevant once the caller is done with the file.
        let _ = io::copy(&mut source, &mut io::sink());
        Ok(())
    }
}

impl FileInfo for HttpFile {
    fn name(&self) -> &str {
        self.info.name()
    }

    fn size(&self) -> Option<u64> {
        self.info.size()
    }

    fn modified(&self) -> Option<DateTime<Utc>> {
        self.info.modified()
    }

    fn is_dir(&self) -> bool {
        self.info.is_dir()
    }

    fn mode(&self) -> u32 {
        self.info.mode()
    }
}

impl fmt::Debug for HttpFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match &self.source {
            Some(Source::Remote(_)) => "remote",
            Some(Source::Cached(_)) => "cached",
            None => "closed",
        };
        f.debug_struct("HttpFile")
            .field("info", &self.info)
            .field("source", &source)
            .finish()
    }
}
