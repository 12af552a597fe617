use crate::error::DemoError;
use log::debug;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

/// A read-only file handle that remembers where it was opened from, so it
/// can either be shared with or reopened by a child process.
#[derive(Debug)]
pub struct SourceFile {
    path: PathBuf,
    file: File,
}

/// Bytes returned by one read, plus the cursor position seen right after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub bytes: Vec<u8>,
    pub cursor: u64,
}

impl SourceFile {
    /// Opens `path` read-only.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DemoError> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| DemoError::Open {
            path: path.clone(),
            source,
        })?;
        debug!("opened {}", path.display());
        Ok(SourceFile { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns a second handle onto the same open file. Both handles move
    /// one cursor.
    pub fn share(&self) -> Result<Self, DemoError> {
        Ok(SourceFile {
            path: self.path.clone(),
            file: self.file.try_clone()?,
        })
    }

    /// Opens the same path again. The new handle starts at offset 0 and
    /// owns its cursor.
    pub fn reopen(&self) -> Result<Self, DemoError> {
        SourceFile::open(&self.path)
    }

    /// Performs a single `read(2)` of at most `len` bytes.
    ///
    /// One read on a regular file moves the cursor atomically, so two
    /// processes reading through a shared handle get adjacent,
    /// non-overlapping chunks. The `cursor` reported afterwards is not
    /// atomic with the read: the other process may already have moved it.
    pub fn read_unit(&mut self, len: usize) -> Result<Chunk, DemoError> {
        let mut bytes = vec![0; len];
        let n = self.file.read(&mut bytes)?;
        bytes.truncate(n);
        let cursor = self.file.stream_position()?;
        Ok(Chunk { bytes, cursor })
    }
}

impl Chunk {
    /// Renders the bytes as an escaped, quoted string.
    pub fn escaped(&self) -> String {
        format!("{:?}", String::from_utf8_lossy(&self.bytes))
    }
}
