//! Filesystem confirmation of candidate paths.
//!
//! A candidate produced by specifier resolution may name a real file, an
//! extensionless module, a directory with an index file, or a
//! declaration-only module with no runtime file at all. Confirmation
//! turns the candidate into whichever of those the filesystem actually
//! holds.

use crate::options::ResolverOptions;
use portside_util::fs::{self, PathKind};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Returned in place of declaration-only modules: a URL that loads as an
/// empty module with no side effects.
pub const INERT_MODULE_URL: &str = "data:text/javascript;charset=utf-8,";

/// Primary script extension, always probed.
const SCRIPT_EXT: &str = ".js";

/// Secondary module extension, probed only under `match_naked_mjs`.
const MODULE_EXT: &str = ".mjs";

/// Declaration-only suffix recognized under `rewrite_peer_types`.
const DECL_SUFFIX: &str = ".d.ts";

/// A confirmed resolution target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmed {
    /// A real file on disk.
    Path(PathBuf),
    /// A declaration-only module; load the inert placeholder instead.
    Inert,
}

/// Confirm `path` against the filesystem.
#[must_use]
pub fn confirm(path: &Path, options: &ResolverOptions) -> Option<Confirmed> {
    match fs::path_kind(path) {
        PathKind::File => Some(Confirmed::Path(path.to_path_buf())),
        PathKind::Missing => confirm_missing(path, options),
        PathKind::Dir => confirm_directory(path, options),
    }
}

fn confirm_missing(path: &Path, options: &ResolverOptions) -> Option<Confirmed> {
    for suffix in probe_suffixes(options) {
        let candidate = with_suffix(path, suffix);
        if fs::is_file(&candidate) {
            trace!(path = %candidate.display(), "extension probe hit");
            return Some(Confirmed::Path(candidate));
        }
    }

    if options.rewrite_peer_types {
        // Only reached when no sibling script file exists.
        if fs::is_file(&with_suffix(path, DECL_SUFFIX)) {
            return Some(Confirmed::Inert);
        }
        if path.extension().is_some_and(|ext| ext == "js")
            && fs::is_file(&path.with_extension("d.ts"))
        {
            return Some(Confirmed::Inert);
        }
    }

    None
}

fn confirm_directory(dir: &Path, options: &ResolverOptions) -> Option<Confirmed> {
    for suffix in probe_suffixes(options) {
        let index = dir.join(format!("index{suffix}"));
        if fs::is_file(&index) {
            trace!(path = %index.display(), "directory index hit");
            return Some(Confirmed::Path(index));
        }
    }

    if options.rewrite_peer_types && fs::is_file(&dir.join(format!("index{DECL_SUFFIX}"))) {
        return Some(Confirmed::Inert);
    }

    None
}

fn probe_suffixes(options: &ResolverOptions) -> &'static [&'static str] {
    if options.match_naked_mjs {
        &[SCRIPT_EXT, MODULE_EXT]
    } else {
        &[SCRIPT_EXT]
    }
}

/// Append a literal suffix to a path without touching its extension.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut joined = OsString::from(path.as_os_str());
    joined.push(suffix);
    PathBuf::from(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str) {
        let path = root.join(rel);
        stdfs::create_dir_all(path.parent().unwrap()).unwrap();
        stdfs::write(path, "export {};\n").unwrap();
    }

    #[test]
    fn test_existing_file_passes_through() {
        let dir = tempdir().unwrap();
        write(dir.path(), "mod.js");

        let confirmed = confirm(&dir.path().join("mod.js"), &ResolverOptions::default());
        assert_eq!(confirmed, Some(Confirmed::Path(dir.path().join("mod.js"))));
    }

    #[test]
    fn test_extensionless_probe() {
        let dir = tempdir().unwrap();
        write(dir.path(), "mod.js");

        let confirmed = confirm(&dir.path().join("mod"), &ResolverOptions::default());
        assert_eq!(confirmed, Some(Confirmed::Path(dir.path().join("mod.js"))));
    }

    #[test]
    fn test_naked_mjs_gated() {
        let dir = tempdir().unwrap();
        write(dir.path(), "only.mjs");

        let target = dir.path().join("only");
        assert_eq!(confirm(&target, &ResolverOptions::default()), None);

        let naked = ResolverOptions::default().with_match_naked_mjs(true);
        assert_eq!(
            confirm(&target, &naked),
            Some(Confirmed::Path(dir.path().join("only.mjs")))
        );
    }

    #[test]
    fn test_directory_index() {
        let dir = tempdir().unwrap();
        write(dir.path(), "pkg/index.js");

        let confirmed = confirm(&dir.path().join("pkg"), &ResolverOptions::default());
        assert_eq!(
            confirmed,
            Some(Confirmed::Path(dir.path().join("pkg/index.js")))
        );
    }

    #[test]
    fn test_declaration_only_file_hidden() {
        let dir = tempdir().unwrap();
        write(dir.path(), "types-only.d.ts");

        let confirmed = confirm(&dir.path().join("types-only.js"), &ResolverOptions::default());
        assert_eq!(confirmed, Some(Confirmed::Inert));
    }

    #[test]
    fn test_declaration_appended_suffix() {
        let dir = tempdir().unwrap();
        write(dir.path(), "extless.d.ts");

        let confirmed = confirm(&dir.path().join("extless"), &ResolverOptions::default());
        assert_eq!(confirmed, Some(Confirmed::Inert));
    }

    #[test]
    fn test_sibling_script_beats_declaration() {
        let dir = tempdir().unwrap();
        write(dir.path(), "both.js");
        write(dir.path(), "both.d.ts");

        let confirmed = confirm(&dir.path().join("both"), &ResolverOptions::default());
        assert_eq!(confirmed, Some(Confirmed::Path(dir.path().join("both.js"))));
    }

    #[test]
    fn test_declaration_detection_can_be_disabled() {
        let dir = tempdir().unwrap();
        write(dir.path(), "types-only.d.ts");

        let options = ResolverOptions::default().with_rewrite_peer_types(false);
        assert_eq!(confirm(&dir.path().join("types-only.js"), &options), None);
    }

    #[test]
    fn test_solo_index_declaration() {
        let dir = tempdir().unwrap();
        write(dir.path(), "pkg/index.d.ts");

        let confirmed = confirm(&dir.path().join("pkg"), &ResolverOptions::default());
        assert_eq!(confirmed, Some(Confirmed::Inert));
    }

    #[test]
    fn test_unresolvable_path() {
        let dir = tempdir().unwrap();
        assert_eq!(
            confirm(&dir.path().join("ghost.js"), &ResolverOptions::default()),
            None
        );
    }
}
