//! On-disk mirror of fetched files.
//!
//! Each logical path `a/b/c.txt` is stored at `<root>/a/b/c.txt` with the raw
//! bytes last fetched for it. There is no index or metadata sidecar: a regular
//! file at the mirrored location is a cache hit, and entries never expire.

use std::fs;
use std::io::{self, Seek, SeekFrom, Write};
use std::path::PathBuf;

use remotefs_core::{Error, Path};

use crate::file::{HttpFile, Source};

#[derive(Debug, Clone)]
pub struct CacheMirror {
    root: PathBuf,
}

impl CacheMirror {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Host location of the mirror entry for `path`.
    pub fn entry_path(&self, path: &Path) -> PathBuf {
        path.to_host_path(&self.root)
    }

    /// Open the mirrored copy of `path`, if there is one.
    ///
    /// Anything other than a readable regular file counts as a miss.
    pub fn lookup(&self, path: &Path) -> Option<HttpFile> {
        let entry = self.entry_path(path);

        let file = match fs::File::open(&entry) {
            Ok(file) => file,
            Err(e) => {
                log::debug!("Cache miss for {} ({}): {}", path, entry.display(), e);
                return None;
            }
        };

        match file.metadata() {
            Ok(metadata) if metadata.is_file() => {
                log::debug!("Cache hit for {} ({})", path, entry.display());
                Some(HttpFile::from_cache_hit(path.clone(), file, &metadata))
            }
            Ok(_) => {
                log::debug!("Cache miss for {}: {} is not a file", path, entry.display());
                None
            }
            Err(e) => {
                log::debug!("Cache miss for {} ({}): {}", path, entry.display(), e);
                None
            }
        }
    }

    /// Copy a freshly fetched file into the mirror and return a file backed by
    /// the copy.
    ///
    /// The fetched stream is consumed and released. The returned file keeps
    /// the fetched size and modification time. On failure the partially
    /// written entry is left in place.
    pub fn store(&self, fetched: HttpFile) -> Result<HttpFile, Error> {
        let entry = self.entry_path(fetched.path());
        log::debug!("Writing {} to {}...", fetched.path(), entry.display());

        if let Some(parent) = entry.parent() {
            fs::create_dir_all(parent).map_err(Error::Storage)?;
        }

        let mut cached = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&entry)
            .map_err(Error::Storage)?;

        let (info, mut source) = fetched.into_parts()?;

        io::copy(&mut source, &mut cached).map_err(Error::Storage)?;
        cached.flush().map_err(Error::Storage)?;
        cached.seek(SeekFrom::Start(0)).map_err(Error::Storage)?;
        drop(source);

        Ok(HttpFile::from_parts(info, Source::Cached(cached)))
    }
}
