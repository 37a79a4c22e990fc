//! Writing rendered output to disk.

use crate::error::Result;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Write `content` to `path`.
///
/// A file that cannot be opened is left untouched. Once opened, a failed
/// write removes the partial file; the handle is closed before removal.
pub(crate) fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    let file = File::create(path)?;
    fill(path, file, content)
}

fn fill<W: Write>(path: &Path, mut file: W, content: &[u8]) -> Result<()> {
    let written = file.write_all(content).and_then(|()| file.flush());
    drop(file);

    if let Err(e) = written {
        log::warn!("Removing partial output {}: {}", path.display(), e);
        let _ = fs::remove_file(path);
        return Err(e.into());
    }
    log::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io;

    /// Accepts a few bytes, then fails like a full disk.
    struct ShortWriter {
        room: usize,
    }

    impl Write for ShortWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.room == 0 {
                return Err(io::Error::new(io::ErrorKind::Other, "no space left"));
            }
            let n = buf.len().min(self.room);
            self.room -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_output(&path, b"A\nB\n").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"A\nB\n");
    }

    #[test]
    fn test_failed_write_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");
        fs::write(&path, b"PK").unwrap();

        let result = fill(&path, ShortWriter { room: 2 }, b"PK\x03\x04 more");
        assert!(matches!(result, Err(Error::Io(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_unopenable_file_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        fs::write(&path, b"keep me").unwrap();

        let mut permissions = fs::metadata(&path).unwrap().permissions();
        permissions.set_readonly(true);
        fs::set_permissions(&path, permissions).unwrap();
        if fs::OpenOptions::new().write(true).open(&path).is_ok() {
            // privileged user, read-only files stay writable
            return;
        }

        assert!(write_output(&path, b"{}").is_err());
        assert_eq!(fs::read(&path).unwrap(), b"keep me");
    }

    #[test]
    fn test_directory_target_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");
        fs::create_dir(&path).unwrap();

        assert!(write_output(&path, b"PK").is_err());
        assert!(path.is_dir());
    }
}
