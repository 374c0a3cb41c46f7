//! Random-access byte sources
//!
//! Containers read through a [`ByteSource`]: a readable stream with a single
//! shared cursor, a known size and a validity flag. A source that could not
//! be opened is still a source; it reports `valid() == false`, a size of
//! zero, and reads nothing.

use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Readable, seekable stream of bytes
pub trait ByteSource {
    /// Read up to `dst.len()` bytes at the cursor, returning the count read
    fn read(&mut self, dst: &mut [u8]) -> usize;

    /// Move the cursor to `offset` from the start
    fn seek(&mut self, offset: u64) -> bool;

    /// Total size in bytes
    fn size(&self) -> u64;

    /// Whether the underlying stream is available
    fn valid(&self) -> bool;

    /// Read exactly `N` bytes, or nothing
    fn read_array<const N: usize>(&mut self) -> Option<[u8; N]>
    where
        Self: Sized,
    {
        let mut buf = [0u8; N];
        (self.read(&mut buf) == N).then_some(buf)
    }

    /// Read a little-endian `u32`
    fn read_u32_le(&mut self) -> Option<u32>
    where
        Self: Sized,
    {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Read a little-endian `i32`
    fn read_i32_le(&mut self) -> Option<i32>
    where
        Self: Sized,
    {
        self.read_array().map(i32::from_le_bytes)
    }
}

/// [`ByteSource`] over any `Read + Seek` stream
pub struct StreamSource<R> {
    reader: Option<R>,
    size: u64,
    path: Option<PathBuf>,
}

/// Byte source backed by a file on disk
pub type FileSource = StreamSource<File>;

/// Byte source backed by an in-memory buffer
pub type MemorySource = StreamSource<Cursor<Vec<u8>>>;

impl<R: Read + Seek> StreamSource<R> {
    /// Wrap a stream, measuring its size
    pub fn new(mut reader: R) -> Self {
        match reader.seek(SeekFrom::End(0)) {
            Ok(size) => Self {
                reader: Some(reader),
                size,
                path: None,
            },
            Err(e) => {
                warn!("Unable to determine stream size: {e}");
                Self::unavailable(None)
            }
        }
    }

    /// A source with no stream behind it
    pub const fn unavailable(path: Option<PathBuf>) -> Self {
        Self {
            reader: None,
            size: 0,
            path,
        }
    }

    /// Path the source was opened from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// File name component of the source path
    pub fn file_name(&self) -> Option<String> {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
    }
}

impl FileSource {
    /// Open a file; failures produce an invalid source
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => {
                let mut source = Self::new(file);
                source.path = Some(path.to_path_buf());
                debug!("Opened {} ({} bytes)", path.display(), source.size);
                source
            }
            Err(e) => {
                warn!("Unable to open {}: {e}", path.display());
                Self::unavailable(Some(path.to_path_buf()))
            }
        }
    }
}

impl MemorySource {
    /// Wrap an in-memory buffer
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::new(Cursor::new(data.into()))
    }
}

impl<R: Read + Seek> ByteSource for StreamSource<R> {
    fn read(&mut self, dst: &mut [u8]) -> usize {
        let Some(reader) = self.reader.as_mut() else {
            return 0;
        };

        let mut total = 0;
        while total < dst.len() {
            match reader.read(&mut dst[total..]) {
                Ok(0) => break,
                Ok(n) => total += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => {
                    warn!("Read failed after {total} bytes: {e}");
                    break;
                }
            }
        }
        total
    }

    fn seek(&mut self, offset: u64) -> bool {
        self.reader
            .as_mut()
            .is_some_and(|reader| reader.seek(SeekFrom::Start(offset)).is_ok())
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn valid(&self) -> bool {
        self.reader.is_some()
    }
}
