//! Where database bytes come from.
//!
//! A [`ByteSource`] opens a path and hands back an owned stream. The stream is
//! closed when it is dropped, so whoever holds it last releases it.

use std::cell::Cell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Opens named resources as readable byte streams.
pub trait ByteSource {
    type Stream: Read;

    fn open(&self, path: &Path) -> io::Result<Self::Stream>;
}

/// Reads files from the host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl ByteSource for FsSource {
    type Stream = File;

    fn open(&self, path: &Path) -> io::Result<File> {
        File::open(path)
    }
}

#[derive(Debug, Default)]
struct MemoryStats {
    opens: Cell<usize>,
    closes: Cell<usize>,
}

#[derive(Debug, Clone)]
struct MemoryFile {
    bytes: Rc<[u8]>,
    fail_after: Option<usize>,
}

/// In-memory files keyed by path.
///
/// Clones share their open/close counters, so a clone kept by a test observes
/// the streams opened through a store that owns the original.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, MemoryFile>,
    stats: Rc<MemoryStats>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given contents.
    pub fn with_file(mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        self.files.insert(
            path.into(),
            MemoryFile {
                bytes: Rc::from(bytes),
                fail_after: None,
            },
        );
        self
    }

    /// Add a file whose stream serves `fail_after` bytes and then fails every
    /// further read.
    pub fn with_failing_file(
        mut self,
        path: impl Into<PathBuf>,
        bytes: impl Into<Vec<u8>>,
        fail_after: usize,
    ) -> Self {
        let bytes: Vec<u8> = bytes.into();
        self.files.insert(
            path.into(),
            MemoryFile {
                bytes: Rc::from(bytes),
                fail_after: Some(fail_after),
            },
        );
        self
    }

    /// Number of streams successfully opened so far.
    pub fn opens(&self) -> usize {
        self.stats.opens.get()
    }

    /// Number of opened streams that have been dropped so far.
    pub fn closes(&self) -> usize {
        self.stats.closes.get()
    }

    /// Streams opened but not yet dropped.
    pub fn open_streams(&self) -> usize {
        self.opens() - self.closes()
    }
}

impl ByteSource for MemorySource {
    type Stream = MemoryStream;

    fn open(&self, path: &Path) -> io::Result<MemoryStream> {
        let file = self.files.get(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })?;
        self.stats.opens.set(self.stats.opens.get() + 1);

        Ok(MemoryStream {
            cursor: Cursor::new(file.bytes.clone()),
            fail_after: file.fail_after,
            stats: self.stats.clone(),
        })
    }
}

/// Stream handed out by [`MemorySource`]. Dropping it counts as a close.
#[derive(Debug)]
pub struct MemoryStream {
    cursor: Cursor<Rc<[u8]>>,
    fail_after: Option<usize>,
    stats: Rc<MemoryStats>,
}

impl Read for MemoryStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(limit) = self.fail_after else {
            return self.cursor.read(buf);
        };

        let pos = self.cursor.position() as usize;
        if pos >= limit {
            return Err(io::Error::new(io::ErrorKind::Other, "injected read failure"));
        }
        let max = buf.len().min(limit - pos);
        self.cursor.read(&mut buf[..max])
    }
}

impl Drop for MemoryStream {
    fn drop(&mut self) {
        self.stats.closes.set(self.stats.closes.get() + 1);
    }
}
