use serde::{Deserialize, Serialize};

/// Configuration accepted by [`crate::Resolver::build`].
///
/// Field names serialize in camelCase so the options round-trip with
/// the JSON configuration shape tools typically carry them in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverOptions {
    /// Ordered condition names satisfied for this resolver, besides the
    /// always-on `import` and `module`.
    pub constraints: Vec<String>,

    /// Return candidate paths even when they cannot be confirmed on disk.
    pub allow_missing: bool,

    /// Hide declaration-only (`.d.ts`) modules behind the inert
    /// placeholder instead of failing.
    pub rewrite_peer_types: bool,

    /// Permit legacy/literal resolution when a package declares
    /// `exports` but no entry matches.
    pub allow_export_fallback: bool,

    /// Fall back to `main` even for packages that do not declare
    /// `type: module`.
    pub include_main_fallback: bool,

    /// Probe `.mjs` in addition to `.js` for extensionless candidates.
    pub match_naked_mjs: bool,

    /// Retry bare specifiers with progressively longer package-name
    /// prefixes when the short name does not resolve.
    pub check_nested_packages: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            constraints: vec!["browser".to_string()],
            allow_missing: false,
            rewrite_peer_types: true,
            allow_export_fallback: true,
            include_main_fallback: true,
            match_naked_mjs: false,
            check_nested_packages: true,
        }
    }
}

impl ResolverOptions {
    /// Replace the constraint list.
    #[must_use]
    pub fn with_constraints<I, S>(mut self, constraints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints = constraints.into_iter().map(Into::into).collect();
        self
    }

    /// Permit returning unconfirmed candidate paths.
    #[must_use]
    pub fn with_allow_missing(mut self, allow: bool) -> Self {
        self.allow_missing = allow;
        self
    }

    /// Toggle declaration-only-file detection.
    #[must_use]
    pub fn with_rewrite_peer_types(mut self, rewrite: bool) -> Self {
        self.rewrite_peer_types = rewrite;
        self
    }

    /// Toggle legacy/literal fallback for non-matching `exports`.
    #[must_use]
    pub fn with_allow_export_fallback(mut self, allow: bool) -> Self {
        self.allow_export_fallback = allow;
        self
    }

    /// Toggle the unconditional `main` fallback.
    #[must_use]
    pub fn with_include_main_fallback(mut self, include: bool) -> Self {
        self.include_main_fallback = include;
        self
    }

    /// Toggle `.mjs` probing for extensionless candidates.
    #[must_use]
    pub fn with_match_naked_mjs(mut self, naked: bool) -> Self {
        self.match_naked_mjs = naked;
        self
    }

    /// Toggle nested-package prefix retries.
    #[must_use]
    pub fn with_check_nested_packages(mut self, check: bool) -> Self {
        self.check_nested_packages = check;
        self
    }
}
