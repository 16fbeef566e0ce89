//! Parsed package manifest model.
//!
//! Only the fields that participate in resolution are extracted, one by
//! one, so an unrelated malformed field never poisons a manifest. A
//! manifest that fails to read or parse as JSON yields `None`, which
//! callers treat as "no package here".

use serde_json::Value;
use std::path::{Path, PathBuf};

/// Manifest file name probed in every candidate directory.
pub const MANIFEST_FILE: &str = "package.json";

/// Structural depth bound when converting `exports`/`imports` JSON.
/// Manifests are tree-shaped, but hostile input should not recurse
/// without limit.
const MAX_NODE_DEPTH: usize = 16;

/// A node in a package's `exports` or `imports` map.
///
/// Key order is preserved from the manifest; matching scans mappings in
/// declaration order, and that order is semantically significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportsNode {
    /// A target path such as `"./dist/index.js"`.
    Terminal(String),
    /// An ordered list of subpath or condition keys.
    Mapping(Vec<(String, ExportsNode)>),
}

impl ExportsNode {
    /// Convert a raw JSON value into a node.
    ///
    /// Strings become terminals, objects become mappings; anything else
    /// (arrays, numbers, null) has no meaning here and is dropped.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::from_value_bounded(value, 0)
    }

    fn from_value_bounded(value: &Value, depth: usize) -> Option<Self> {
        if depth > MAX_NODE_DEPTH {
            return None;
        }
        match value {
            Value::String(target) => Some(Self::Terminal(target.clone())),
            Value::Object(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (key, child) in map {
                    if let Some(node) = Self::from_value_bounded(child, depth + 1) {
                        entries.push((key.clone(), node));
                    }
                }
                Some(Self::Mapping(entries))
            }
            _ => None,
        }
    }
}

/// Whether a key names a subpath (`.`/`#`-prefixed, literal or pattern)
/// rather than a condition.
pub(crate) fn is_subpath_key(key: &str) -> bool {
    key.starts_with('.') || key.starts_with('#')
}

/// Fields of `package.json` that participate in resolution.
#[derive(Debug, Clone, Default)]
pub struct PackageInfo {
    pub name: Option<String>,
    pub exports: Option<ExportsNode>,
    pub imports: Option<ExportsNode>,
    pub main: Option<String>,
    pub module: Option<String>,
    pub esnext_main: Option<String>,
    pub esnext: Option<String>,
    pub jsnext_main: Option<String>,
    pub jsnext: Option<String>,
    pub package_type: Option<String>,
}

impl PackageInfo {
    /// Extract resolution-relevant fields from a parsed manifest.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let text = |field: &str| {
            value
                .get(field)
                .and_then(Value::as_str)
                .map(ToString::to_string)
        };
        Self {
            name: text("name"),
            exports: value.get("exports").and_then(ExportsNode::from_value),
            imports: value.get("imports").and_then(ExportsNode::from_value),
            main: text("main"),
            module: text("module"),
            esnext_main: text("esnext:main"),
            esnext: text("esnext"),
            jsnext_main: text("jsnext:main"),
            jsnext: text("jsnext"),
            package_type: text("type"),
        }
    }

    /// Read and parse `dir/package.json`.
    ///
    /// Any read or parse failure means "no package here", not an error.
    #[must_use]
    pub fn read(dir: &Path) -> Option<Self> {
        let raw = portside_util::fs::read_to_string_lossy(&dir.join(MANIFEST_FILE)).ok()?;
        let value: Value = serde_json::from_str(&raw).ok()?;
        Some(Self::from_value(&value))
    }

    /// First declared legacy alternate entry point, in fixed priority
    /// order: `module`, `esnext:main`, `esnext`, `jsnext:main`, `jsnext`.
    #[must_use]
    pub fn alternate_entry(&self) -> Option<&str> {
        [
            &self.module,
            &self.esnext_main,
            &self.esnext,
            &self.jsnext_main,
            &self.jsnext,
        ]
        .into_iter()
        .find_map(|field| field.as_deref())
    }

    /// Whether the manifest declares `"type": "module"`.
    #[must_use]
    pub fn is_module_type(&self) -> bool {
        self.package_type.as_deref() == Some("module")
    }
}

/// A package directory paired with its parsed manifest.
#[derive(Debug, Clone)]
pub struct PackageLocation {
    pub dir: PathBuf,
    pub info: PackageInfo,
}

impl PackageLocation {
    /// Read the manifest in `dir`, if one exists and parses.
    #[must_use]
    pub fn read(dir: &Path) -> Option<Self> {
        PackageInfo::read(dir).map(|info| Self {
            dir: dir.to_path_buf(),
            info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exports_node_terminal() {
        let node = ExportsNode::from_value(&json!("./index.js")).unwrap();
        assert_eq!(node, ExportsNode::Terminal("./index.js".to_string()));
    }

    #[test]
    fn test_exports_node_preserves_key_order() {
        let node = ExportsNode::from_value(&json!({
            "zebra": "./z.js",
            "apple": "./a.js",
            "mango": "./m.js"
        }))
        .unwrap();
        let ExportsNode::Mapping(entries) = node else {
            panic!("expected mapping");
        };
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_exports_node_drops_non_string_non_object() {
        let node = ExportsNode::from_value(&json!({
            "import": ["./a.js", "./b.js"],
            "default": "./d.js"
        }))
        .unwrap();
        let ExportsNode::Mapping(entries) = node else {
            panic!("expected mapping");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "default");
    }

    #[test]
    fn test_exports_node_depth_bounded() {
        let mut value = json!("./leaf.js");
        for _ in 0..40 {
            value = json!({ "default": value });
        }
        // Deeper levels are pruned rather than recursing without limit.
        let node = ExportsNode::from_value(&value).unwrap();
        assert!(matches!(node, ExportsNode::Mapping(_)));
    }

    #[test]
    fn test_package_info_fields() {
        let info = PackageInfo::from_value(&json!({
            "name": "fake-package",
            "main": "main.js",
            "module": "esm.mjs",
            "type": "module"
        }));
        assert_eq!(info.name.as_deref(), Some("fake-package"));
        assert_eq!(info.main.as_deref(), Some("main.js"));
        assert_eq!(info.alternate_entry(), Some("esm.mjs"));
        assert!(info.is_module_type());
    }

    #[test]
    fn test_alternate_entry_priority() {
        let info = PackageInfo::from_value(&json!({
            "jsnext": "./jsnext.js",
            "esnext:main": "./esnext-main.js"
        }));
        assert_eq!(info.alternate_entry(), Some("./esnext-main.js"));
    }

    #[test]
    fn test_non_string_field_does_not_poison_manifest() {
        let info = PackageInfo::from_value(&json!({
            "name": "weird",
            "main": { "not": "a string" },
            "module": "esm.js"
        }));
        assert_eq!(info.main, None);
        assert_eq!(info.alternate_entry(), Some("esm.js"));
    }

    #[test]
    fn test_read_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "~not json~").unwrap();
        assert!(PackageInfo::read(dir.path()).is_none());
    }

    #[test]
    fn test_read_missing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PackageLocation::read(dir.path()).is_none());
    }
}
