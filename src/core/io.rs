//! I/O abstraction layer for annotation files
//!
//! Opens plain, gzip, and bzip2 annotation files behind a single reader
//! type, with optional memory mapping for uncompressed files. Compressed
//! readers report seeking as unsupported, which the title scanner treats
//! as a degraded (forward-only) stream rather than an error.

use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Default buffer size for BufReader (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Compression format of an annotation file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Uncompressed text
    Plain,
    /// Gzip (.gz extension or 1f 8b magic bytes)
    Gzip,
    /// Bzip2 (.bz2 extension or 42 5a 68 magic bytes)
    Bzip2,
}

/// Detect compression format from file extension and/or magic bytes
pub fn detect_compression(path: &Path) -> io::Result<Compression> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    // First check by extension
    if extension == "gz" {
        return Ok(Compression::Gzip);
    }
    if extension == "bz2" {
        return Ok(Compression::Bzip2);
    }

    // Then check by magic bytes
    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;

    if bytes_read >= 2 && magic[0] == 0x1f && magic[1] == 0x8b {
        return Ok(Compression::Gzip);
    }
    if bytes_read >= 3 && magic[0] == 0x42 && magic[1] == 0x5a && magic[2] == 0x68 {
        return Ok(Compression::Bzip2);
    }

    Ok(Compression::Plain)
}

/// Memory-mapped file reader
pub struct MappedReader {
    mmap: Mmap,
    position: usize,
}

impl MappedReader {
    /// Create a new memory-mapped reader
    pub fn new(file: &File) -> io::Result<Self> {
        // SAFETY: We assume the file won't be modified while mapped
        let mmap = unsafe { Mmap::map(file)? };
        Ok(Self { mmap, position: 0 })
    }

    /// Get the entire file content as a byte slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.mmap
    }

    /// Get file size
    pub fn len(&self) -> usize {
        self.mmap.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.mmap.is_empty()
    }

    /// Remaining bytes from the current position; empty when the
    /// position has been seeked past the end
    fn remaining(&self) -> &[u8] {
        let start = self.position.min(self.mmap.len());
        &self.mmap[start..]
    }
}

impl Read for MappedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.remaining();
        let to_read = buf.len().min(remaining.len());
        buf[..to_read].copy_from_slice(&remaining[..to_read]);
        self.position += to_read;
        Ok(to_read)
    }
}

impl BufRead for MappedReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        let start = self.position.min(self.mmap.len());
        Ok(&self.mmap[start..])
    }

    fn consume(&mut self, amt: usize) {
        self.position = (self.position + amt).min(self.mmap.len());
    }
}

impl Seek for MappedReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target: i128 = match pos {
            SeekFrom::Start(n) => n as i128,
            SeekFrom::Current(off) => self.position as i128 + off as i128,
            SeekFrom::End(off) => self.mmap.len() as i128 + off as i128,
        };
        if target < 0 || target > u64::MAX as i128 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            ));
        }
        self.position = target.min(usize::MAX as i128) as usize;
        Ok(target as u64)
    }
}

/// A reader over an annotation file in any supported compression format
///
/// Implements [`Read`] and [`BufRead`] for all variants. [`Seek`] is
/// only honored by the plain and memory-mapped variants; compressed
/// variants fail with [`io::ErrorKind::Unsupported`], which callers
/// such as the title scanner treat as a forward-only stream.
pub enum AnnotationReader {
    /// Buffered reader over an uncompressed file
    Plain(BufReader<File>),
    /// Buffered reader over a gzip stream
    Gzip(BufReader<GzDecoder<File>>),
    /// Buffered reader over a bzip2 stream
    Bzip2(BufReader<BzDecoder<File>>),
    /// Memory-mapped reader over an uncompressed file
    Mapped(MappedReader),
}

impl AnnotationReader {
    /// Open an annotation file, sniffing its compression format
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let compression = detect_compression(path)?;
        let file = File::open(path)?;
        Ok(match compression {
            Compression::Plain => {
                AnnotationReader::Plain(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))
            }
            Compression::Gzip => AnnotationReader::Gzip(BufReader::with_capacity(
                DEFAULT_BUFFER_SIZE,
                GzDecoder::new(file),
            )),
            Compression::Bzip2 => AnnotationReader::Bzip2(BufReader::with_capacity(
                DEFAULT_BUFFER_SIZE,
                BzDecoder::new(file),
            )),
        })
    }

    /// Open an annotation file with memory mapping for uncompressed
    /// input; compressed files fall back to buffered decoding
    pub fn open_mapped<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        match detect_compression(path)? {
            Compression::Plain => {
                let file = File::open(path)?;
                Ok(AnnotationReader::Mapped(MappedReader::new(&file)?))
            }
            _ => Self::open(path),
        }
    }

    /// Whether this reader supports position query and absolute seek
    pub fn is_seekable(&self) -> bool {
        matches!(
            self,
            AnnotationReader::Plain(_) | AnnotationReader::Mapped(_)
        )
    }
}

impl Read for AnnotationReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            AnnotationReader::Plain(reader) => reader.read(buf),
            AnnotationReader::Gzip(reader) => reader.read(buf),
            AnnotationReader::Bzip2(reader) => reader.read(buf),
            AnnotationReader::Mapped(reader) => reader.read(buf),
        }
    }
}

impl BufRead for AnnotationReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            AnnotationReader::Plain(reader) => reader.fill_buf(),
            AnnotationReader::Gzip(reader) => reader.fill_buf(),
            AnnotationReader::Bzip2(reader) => reader.fill_buf(),
            AnnotationReader::Mapped(reader) => reader.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            AnnotationReader::Plain(reader) => reader.consume(amt),
            AnnotationReader::Gzip(reader) => reader.consume(amt),
            AnnotationReader::Bzip2(reader) => reader.consume(amt),
            AnnotationReader::Mapped(reader) => reader.consume(amt),
        }
    }
}

impl Seek for AnnotationReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            AnnotationReader::Plain(reader) => reader.seek(pos),
            AnnotationReader::Mapped(reader) => reader.seek(pos),
            AnnotationReader::Gzip(_) | AnnotationReader::Bzip2(_) => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "cannot seek in a compressed stream",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_detect_compression_plain() -> io::Result<()> {
        let mut temp = NamedTempFile::new()?;
        writeln!(temp, "chr1\t100\t200")?;
        temp.flush()?;
        assert_eq!(detect_compression(temp.path())?, Compression::Plain);
        Ok(())
    }

    #[test]
    fn test_detect_compression_gzip_magic() -> io::Result<()> {
        use flate2::write::GzEncoder;

        let temp = NamedTempFile::new()?;
        let mut encoder = GzEncoder::new(temp.reopen()?, flate2::Compression::default());
        encoder.write_all(b"chr1\t100\t200\n")?;
        encoder.finish()?;

        // No .gz extension, detected by magic bytes
        assert_eq!(detect_compression(temp.path())?, Compression::Gzip);
        Ok(())
    }

    #[test]
    fn test_detect_compression_bzip2_magic() -> io::Result<()> {
        use bzip2::write::BzEncoder;

        let temp = NamedTempFile::new()?;
        let mut encoder = BzEncoder::new(temp.reopen()?, bzip2::Compression::default());
        encoder.write_all(b"chr1\t100\t200\n")?;
        encoder.finish()?;

        assert_eq!(detect_compression(temp.path())?, Compression::Bzip2);
        Ok(())
    }

    #[test]
    fn test_plain_reader_is_seekable() -> io::Result<()> {
        let mut temp = NamedTempFile::new()?;
        writeln!(temp, "line1\nline2")?;
        temp.flush()?;

        let mut reader = AnnotationReader::open(temp.path())?;
        assert!(reader.is_seekable());

        let mut line = String::new();
        reader.read_line(&mut line)?;
        assert_eq!(line, "line1\n");

        reader.seek(SeekFrom::Start(0))?;
        line.clear();
        reader.read_line(&mut line)?;
        assert_eq!(line, "line1\n");
        Ok(())
    }

    #[test]
    fn test_gzip_reader_reads_but_cannot_seek() -> io::Result<()> {
        use flate2::write::GzEncoder;

        let temp = NamedTempFile::new()?;
        let mut encoder = GzEncoder::new(temp.reopen()?, flate2::Compression::default());
        encoder.write_all(b"line1\nline2\n")?;
        encoder.finish()?;

        let mut reader = AnnotationReader::open(temp.path())?;
        assert!(!reader.is_seekable());

        let mut line = String::new();
        reader.read_line(&mut line)?;
        assert_eq!(line, "line1\n");

        let err = reader.seek(SeekFrom::Start(0)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
        Ok(())
    }

    #[test]
    fn test_mapped_reader_read_and_seek() -> io::Result<()> {
        let mut temp = NamedTempFile::new()?;
        temp.write_all(b"alpha\nbeta\n")?;
        temp.flush()?;

        let file = File::open(temp.path())?;
        let mut reader = MappedReader::new(&file)?;
        assert_eq!(reader.len(), 11);
        assert!(!reader.is_empty());

        let mut line = String::new();
        reader.read_line(&mut line)?;
        assert_eq!(line, "alpha\n");
        assert_eq!(reader.stream_position()?, 6);

        reader.seek(SeekFrom::Start(6))?;
        line.clear();
        reader.read_line(&mut line)?;
        assert_eq!(line, "beta\n");
        Ok(())
    }

    #[test]
    fn test_mapped_reader_seek_past_end_reads_empty() -> io::Result<()> {
        let mut temp = NamedTempFile::new()?;
        temp.write_all(b"short")?;
        temp.flush()?;

        let file = File::open(temp.path())?;
        let mut reader = MappedReader::new(&file)?;
        reader.seek(SeekFrom::Start(1000))?;

        let mut buf = String::new();
        assert_eq!(reader.read_to_string(&mut buf)?, 0);
        Ok(())
    }

    #[test]
    fn test_mapped_reader_negative_seek_fails() -> io::Result<()> {
        let mut temp = NamedTempFile::new()?;
        temp.write_all(b"short")?;
        temp.flush()?;

        let file = File::open(temp.path())?;
        let mut reader = MappedReader::new(&file)?;
        assert!(reader.seek(SeekFrom::Current(-1)).is_err());
        Ok(())
    }

    #[test]
    fn test_open_mapped_plain_file() -> io::Result<()> {
        let mut temp = NamedTempFile::new()?;
        writeln!(temp, "chr1\t1\t2")?;
        temp.flush()?;

        let reader = AnnotationReader::open_mapped(temp.path())?;
        assert!(matches!(reader, AnnotationReader::Mapped(_)));
        Ok(())
    }
}
