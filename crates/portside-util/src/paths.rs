use std::path::{Component, Path, PathBuf};

/// Compute `target` expressed relative to the directory `base`.
///
/// Both paths are expected to be absolute. When no relative form exists
/// (mixed absolute/relative inputs, or `base` contains `..` components
/// that cannot be crossed), `target` is returned unchanged.
#[must_use]
pub fn relative_from(target: &Path, base: &Path) -> PathBuf {
    if target.is_absolute() != base.is_absolute() {
        return target.to_path_buf();
    }

    let mut target_parts = target.components();
    let mut base_parts = base.components();
    let mut out: Vec<Component<'_>> = Vec::new();

    loop {
        match (target_parts.next(), base_parts.next()) {
            (None, None) => break,
            (Some(t), None) => {
                out.push(t);
                out.extend(target_parts);
                break;
            }
            (None, Some(_)) => out.push(Component::ParentDir),
            (Some(t), Some(b)) if out.is_empty() && t == b => {}
            (Some(t), Some(Component::CurDir)) => out.push(t),
            (Some(_), Some(Component::ParentDir)) => return target.to_path_buf(),
            (Some(t), Some(_)) => {
                out.push(Component::ParentDir);
                out.extend(base_parts.map(|_| Component::ParentDir));
                out.push(t);
                out.extend(target_parts);
                break;
            }
        }
    }

    out.iter().map(|component| component.as_os_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_of_base() {
        let rel = relative_from(Path::new("/a/b/c.js"), Path::new("/a/b"));
        assert_eq!(rel, PathBuf::from("c.js"));
    }

    #[test]
    fn test_nested_child() {
        let rel = relative_from(Path::new("/a/b/node_modules/x/y.js"), Path::new("/a/b"));
        assert_eq!(rel, PathBuf::from("node_modules/x/y.js"));
    }

    #[test]
    fn test_sibling_directory() {
        let rel = relative_from(Path::new("/a/blah/file.js"), Path::new("/a/deeper"));
        assert_eq!(rel, PathBuf::from("../blah/file.js"));
    }

    #[test]
    fn test_base_below_target() {
        let rel = relative_from(Path::new("/a/x.js"), Path::new("/a/b/c"));
        assert_eq!(rel, PathBuf::from("../../x.js"));
    }

    #[test]
    fn test_identical_paths() {
        let rel = relative_from(Path::new("/a/b"), Path::new("/a/b"));
        assert_eq!(rel, PathBuf::new());
    }

    #[test]
    fn test_mixed_absoluteness_returns_target() {
        let rel = relative_from(Path::new("a/b.js"), Path::new("/a"));
        assert_eq!(rel, PathBuf::from("a/b.js"));
    }
}
