use std::fs;
use std::io;
use std::path::Path;

/// What a filesystem path denotes, as seen through `std::fs::metadata`.
///
/// Any probe failure (permission denied, dangling symlink, path vanished
/// between check and use) collapses into `Missing`; callers never see an
/// error from a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// A regular file (or anything else that is not a directory).
    File,
    /// A directory.
    Dir,
    /// Nothing resolvable at this path.
    Missing,
}

/// Probe what `path` denotes, following symlinks.
#[must_use]
pub fn path_kind(path: &Path) -> PathKind {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => PathKind::Dir,
        Ok(_) => PathKind::File,
        Err(_) => PathKind::Missing,
    }
}

/// Return true if the path points to an existing non-directory.
#[must_use]
pub fn is_file(path: &Path) -> bool {
    path_kind(path) == PathKind::File
}

/// Return true if the path points to an existing directory.
#[must_use]
pub fn is_dir(path: &Path) -> bool {
    path_kind(path) == PathKind::Dir
}

/// Read a file to string, replacing invalid UTF-8 sequences with the
/// replacement character.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_to_string_lossy(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_path_kind_file() {
        let file = NamedTempFile::new().unwrap();
        assert_eq!(path_kind(file.path()), PathKind::File);
        assert!(is_file(file.path()));
        assert!(!is_dir(file.path()));
    }

    #[test]
    fn test_path_kind_dir() {
        let dir = tempdir().unwrap();
        assert_eq!(path_kind(dir.path()), PathKind::Dir);
        assert!(is_dir(dir.path()));
        assert!(!is_file(dir.path()));
    }

    #[test]
    fn test_path_kind_missing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.js");
        assert_eq!(path_kind(&missing), PathKind::Missing);
        assert!(!is_file(&missing));
        assert!(!is_dir(&missing));
    }

    #[test]
    fn test_read_to_string_lossy_valid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"export {};\n").unwrap();
        file.flush().unwrap();

        let content = read_to_string_lossy(file.path()).unwrap();
        assert_eq!(content, "export {};\n");
    }

    #[test]
    fn test_read_to_string_lossy_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0x7b, 0x80, 0x7d]).unwrap();
        file.flush().unwrap();

        let content = read_to_string_lossy(file.path()).unwrap();
        assert!(content.starts_with('{'));
        assert!(content.contains('\u{FFFD}'));
    }
}
