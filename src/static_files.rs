//! Static file loading jailed to a base directory.
//!
//! Used by asset-serving handlers. Path mapping refuses any component that
//! could escape the base directory, so `..` traversal cannot reach files
//! outside it.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

pub struct StaticFiles {
    base_dir: PathBuf,
}

impl StaticFiles {
    pub fn new<P: Into<PathBuf>>(base: P) -> Self {
        Self {
            base_dir: base.into(),
        }
    }

    fn map_path(&self, url_path: &str) -> Option<PathBuf> {
        let mut pb = self.base_dir.clone();
        for comp in Path::new(url_path.trim_start_matches('/')).components() {
            match comp {
                Component::Normal(s) => pb.push(s),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(pb)
    }

    /// Load a file relative to the base directory.
    ///
    /// # Errors
    ///
    /// `NotFound` if the path escapes the base directory, does not exist, or
    /// is not a regular file; otherwise any underlying read error.
    pub fn load(&self, url_path: &str) -> io::Result<(Vec<u8>, &'static str)> {
        let path = self
            .map_path(url_path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "invalid path"))?;
        if !path.is_file() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        }
        let bytes = fs::read(&path)?;
        Ok((bytes, content_type(&path)))
    }
}

/// Content type from a file extension, with charsets for text types.
#[must_use]
pub fn content_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
        .as_str()
    {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "json" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture() -> (tempfile::TempDir, StaticFiles) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hello.txt"), "Hello\n").unwrap();
        fs::write(dir.path().join("styles.css"), "body{}").unwrap();
        let sf = StaticFiles::new(dir.path());
        (dir, sf)
    }

    #[test]
    fn test_map_path_prevents_traversal() {
        let (_dir, sf) = fixture();
        assert!(sf.load("../Cargo.toml").is_err());
        assert!(sf.load("../../etc/passwd").is_err());
    }

    #[test]
    fn test_load_plain_file() {
        let (_dir, sf) = fixture();
        let (bytes, ct) = sf.load("hello.txt").unwrap();
        assert_eq!(ct, "text/plain; charset=utf-8");
        assert_eq!(String::from_utf8(bytes).unwrap(), "Hello\n");
    }

    #[test]
    fn test_content_type_by_extension() {
        let (_dir, sf) = fixture();
        let (_, ct) = sf.load("styles.css").unwrap();
        assert_eq!(ct, "text/css; charset=utf-8");
    }

    #[test]
    fn test_missing_file() {
        let (_dir, sf) = fixture();
        let err = sf.load("nope.txt").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
