//! Text file I/O with size and binary checks.

use std::fs;
use std::io::Read;
use std::path::Path;

use memchr::memchr;

use crate::error::ReadError;

/// Bytes inspected for NULs before a file is treated as binary.
const BINARY_SNIFF_LEN: usize = 8192;

/// Quick binary detection - checks first 8KB for NULL bytes.
#[must_use]
pub fn is_binary(buffer: &[u8]) -> bool {
    let check_len = buffer.len().min(BINARY_SNIFF_LEN);
    memchr(0, &buffer[..check_len]).is_some()
}

/// Read a whole file as UTF-8 text.
///
/// Unlike a lossy read, invalid UTF-8 is an error: the content may be
/// written back, and replacement characters would corrupt it.
///
/// # Errors
/// - `ReadError::TooLarge` when the file is bigger than `max_bytes`.
/// - `ReadError::BinaryFile` when NUL bytes appear in the first 8KB.
/// - `ReadError::Encoding` for invalid UTF-8.
/// - `ReadError::Io` for any underlying I/O failure (including a missing file).
pub fn read_text(path: &Path, max_bytes: u64) -> Result<String, ReadError> {
    let metadata = fs::metadata(path)?;
    if metadata.len() > max_bytes {
        return Err(ReadError::TooLarge(metadata.len(), max_bytes));
    }

    let mut file = fs::File::open(path)?;
    let mut buffer = Vec::with_capacity(usize::try_from(metadata.len()).unwrap_or(0));
    file.read_to_end(&mut buffer)?;

    if is_binary(&buffer) {
        return Err(ReadError::BinaryFile);
    }

    String::from_utf8(buffer).map_err(|e| ReadError::Encoding(e.utf8_error().valid_up_to()))
}

/// Overwrite `path` with `content` in full.
///
/// No temp file or backup: a failure partway through leaves whatever the
/// filesystem left behind.
///
/// # Errors
/// Any I/O error from opening, truncating or writing the file.
pub fn write_text(path: &Path, content: &str) -> std::io::Result<()> {
    fs::write(path, content)
}

/// Storage backend the normalizer reads from and writes back to.
pub trait TextStore: Send + Sync {
    /// Read a whole file as UTF-8 text, refusing files over `max_bytes`.
    ///
    /// # Errors
    /// See [`read_text`].
    fn read(&self, path: &Path, max_bytes: u64) -> Result<String, ReadError>;

    /// Replace the content of `path` with `content`.
    ///
    /// # Errors
    /// Any I/O error from the backend.
    fn write(&self, path: &Path, content: &str) -> std::io::Result<()>;
}

/// Local filesystem store.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalTextStore;

impl TextStore for LocalTextStore {
    fn read(&self, path: &Path, max_bytes: u64) -> Result<String, ReadError> {
        read_text(path, max_bytes)
    }

    fn write(&self, path: &Path, content: &str) -> std::io::Result<()> {
        write_text(path, content)
    }
}

impl<T: TextStore + ?Sized> TextStore for &T {
    fn read(&self, path: &Path, max_bytes: u64) -> Result<String, ReadError> {
        (**self).read(path, max_bytes)
    }

    fn write(&self, path: &Path, content: &str) -> std::io::Result<()> {
        (**self).write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_text() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("hexagram_01.yaml");
        fs::write(&p, "name: Qian\n").unwrap();
        assert_eq!(read_text(&p, 1024).unwrap(), "name: Qian\n");
    }

    #[test]
    fn test_read_binary() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("binary.yaml");
        fs::write(&p, b"\x00\x01\x02\x03").unwrap();
        assert!(matches!(read_text(&p, 1024), Err(ReadError::BinaryFile)));
    }

    #[test]
    fn test_read_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("latin1.yaml");
        fs::write(&p, b"name: caf\xe9\n").unwrap();
        assert!(matches!(read_text(&p, 1024), Err(ReadError::Encoding(9))));
    }

    #[test]
    fn test_file_too_large() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("large.yaml");
        fs::write(&p, "12345678901234567890").unwrap();
        assert!(matches!(read_text(&p, 10), Err(ReadError::TooLarge(20, 10))));
    }

    #[test]
    fn test_file_not_found() {
        let result = read_text(Path::new("/nonexistent/hexagram_99.yaml"), 1024);
        assert!(matches!(result, Err(ReadError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[test]
    fn test_is_binary_only_sniffs_prefix() {
        let mut buffer = vec![b'a'; BINARY_SNIFF_LEN];
        buffer.push(0);
        assert!(!is_binary(&buffer));
        assert!(is_binary(b"ab\x00cd"));
    }

    #[test]
    fn test_write_text_truncates() {
        let dir = TempDir::new().unwrap();
        let p = dir.path().join("hexagram_02.yaml");
        fs::write(&p, "a much longer original body\n").unwrap();
        write_text(&p, "short\n").unwrap();
        assert_eq!(fs::read_to_string(&p).unwrap(), "short\n");
    }
}
