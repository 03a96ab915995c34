//! Seekable byte sources. Every worker opens its own reader.

use std::fs::File;
use std::io::{self, Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use memmap2::Mmap;

/// A byte-addressable input that can hand out independent readers.
pub trait Source: Sync {
    type Reader<'a>: Read + Seek
    where
        Self: 'a;

    /// Total length in bytes.
    fn len(&self) -> io::Result<u64>;

    fn open(&self) -> io::Result<Self::Reader<'_>>;

    fn is_empty(&self) -> io::Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// A file on disk, reopened by every worker.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Source for FileSource {
    type Reader<'a> = File;

    fn len(&self) -> io::Result<u64> {
        Ok(std::fs::metadata(&self.path)?.len())
    }

    fn open(&self) -> io::Result<File> {
        File::open(&self.path)
    }
}

/// Bytes already in memory; readers are cursors over a shared slice.
#[derive(Debug, Clone)]
pub struct MemorySource<T> {
    bytes: T,
}

impl<T: AsRef<[u8]>> MemorySource<T> {
    pub fn new(bytes: T) -> Self {
        Self { bytes }
    }
}

impl<T: AsRef<[u8]> + Sync> Source for MemorySource<T> {
    type Reader<'a>
        = Cursor<&'a [u8]>
    where
        Self: 'a;

    fn len(&self) -> io::Result<u64> {
        Ok(self.bytes.as_ref().len() as u64)
    }

    fn open(&self) -> io::Result<Cursor<&[u8]>> {
        Ok(Cursor::new(self.bytes.as_ref()))
    }
}

pub type MappedSource = MemorySource<Mmap>;

impl MappedSource {
    /// Maps `path` read-only.
    pub fn map(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::open(path)?;
        // SAFETY: the mapping is read-only and the file is not expected to
        // change while it is being aggregated.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self::new(mmap))
    }
}
