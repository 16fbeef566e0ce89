//! Bare, scoped, and internal (`#`) specifier resolution.
//!
//! Turns a package-flavored specifier into a `file://` locator by
//! combining package discovery ([`crate::locate`]) with exports/imports
//! matching ([`crate::matcher`]). Anything that is not resolvable here
//! yields `None`, and the caller falls back to treating the specifier as
//! a plain relative path.

use crate::locate::PackageLocator;
use crate::manifest::PackageLocation;
use crate::matcher::{match_subpath, select_condition};
use crate::options::ResolverOptions;
use std::borrow::Cow;
use std::path::Path;
use tracing::debug;
use url::Url;

/// Subpath sentinel used when a specifier names only the package.
const ROOT_SUBPATH: &str = ".";

/// One package attempt's contribution to resolution.
enum PackageOutcome {
    /// An exports-map match; wins immediately.
    Export(Url),
    /// A legacy or literal candidate; remembered, but a later
    /// exports-based match on a longer name prefix may still win.
    Fallback(Url),
    /// Nothing usable from this package.
    None,
}

/// Resolves specifiers through package manifests.
pub struct NodeResolve<'a> {
    locator: &'a PackageLocator,
    options: &'a ResolverOptions,
}

impl<'a> NodeResolve<'a> {
    pub fn new(locator: &'a PackageLocator, options: &'a ResolverOptions) -> Self {
        Self { locator, options }
    }

    /// Resolve a bare/scoped/internal specifier to a `file://` locator.
    #[must_use]
    pub fn resolve(&self, specifier: &str) -> Option<Url> {
        let mut specifier = Cow::Borrowed(specifier);

        if specifier.starts_with('#') {
            let own = self.locator.self_package()?;
            let imports = own.info.imports.as_ref()?;
            let matched = match_subpath(imports, &specifier)?;
            let target = select_condition(
                matched.node,
                &self.options.constraints,
                matched.capture.as_deref(),
            )?;
            if is_local_target(&target) {
                debug!(specifier = %specifier, entry = %target, "internal import resolved");
                return locator_url(&own.dir, &target);
            }
            // An internal import may alias out to another installed
            // package; restart with the aliased specifier.
            debug!(specifier = %specifier, alias = %target, "internal import aliased");
            specifier = Cow::Owned(target);
        }

        let (name, rest) = split_package_specifier(&specifier)?;

        // Progressively longer name prefixes: "a", then "a/b", then
        // "a/b/c". The first exports-based match wins outright; the
        // first fallback candidate is kept in reserve.
        let mut fallback: Option<Url> = None;
        let mut attempt_name = Cow::Borrowed(name);
        let mut attempt_rest = rest;
        loop {
            if let Some(pkg) = self.locator.named_package(&attempt_name) {
                match self.resolve_in_package(&pkg, attempt_rest) {
                    PackageOutcome::Export(url) => return Some(url),
                    PackageOutcome::Fallback(url) => {
                        if fallback.is_none() {
                            fallback = Some(url);
                        }
                    }
                    PackageOutcome::None => {}
                }
            }

            if !self.options.check_nested_packages || attempt_rest.is_empty() {
                break;
            }
            match attempt_rest.find('/') {
                Some(idx) => {
                    attempt_name =
                        Cow::Owned(format!("{attempt_name}/{}", &attempt_rest[..idx]));
                    attempt_rest = &attempt_rest[idx + 1..];
                }
                None => {
                    attempt_name = Cow::Owned(format!("{attempt_name}/{attempt_rest}"));
                    attempt_rest = "";
                }
            }
        }

        fallback
    }

    fn resolve_in_package(&self, pkg: &PackageLocation, rest: &str) -> PackageOutcome {
        if let Some(exports) = &pkg.info.exports {
            let requested = if rest.is_empty() {
                Cow::Borrowed(ROOT_SUBPATH)
            } else {
                Cow::Owned(format!("./{rest}"))
            };
            let target = match_subpath(exports, &requested)
                .and_then(|matched| {
                    select_condition(
                        matched.node,
                        &self.options.constraints,
                        matched.capture.as_deref(),
                    )
                })
                // A package may only export paths inside itself; a bare
                // name here is an illegal self-export.
                .filter(|target| is_local_target(target));
            if let Some(target) = target {
                debug!(dir = %pkg.dir.display(), entry = %target, "exports entry matched");
                return match locator_url(&pkg.dir, &target) {
                    Some(url) => PackageOutcome::Export(url),
                    None => PackageOutcome::None,
                };
            }
            if !self.options.allow_export_fallback {
                return PackageOutcome::None;
            }
        }

        let target: Cow<'_, str> = if rest.is_empty() {
            if let Some(entry) = pkg.info.alternate_entry() {
                debug!(dir = %pkg.dir.display(), entry, "legacy alternate entry");
                Cow::Borrowed(entry)
            } else if let Some(main) = pkg.info.main.as_deref().filter(|_| {
                self.options.include_main_fallback || pkg.info.is_module_type()
            }) {
                debug!(dir = %pkg.dir.display(), main, "main entry");
                Cow::Borrowed(main)
            } else {
                // No usable entry field; hand the package directory to
                // path confirmation, which owns index probing.
                Cow::Borrowed(ROOT_SUBPATH)
            }
        } else {
            // Undeclared subpaths are taken verbatim under the package
            // directory.
            Cow::Borrowed(rest)
        };

        match locator_url(&pkg.dir, &target) {
            Some(url) => PackageOutcome::Fallback(url),
            None => PackageOutcome::None,
        }
    }
}

/// Whether an exports/imports target stays inside its package.
fn is_local_target(target: &str) -> bool {
    target == ROOT_SUBPATH || target.starts_with("./")
}

/// Join a target onto a package directory as a `file://` locator,
/// preserving any query/hash the target carries.
fn locator_url(dir: &Path, target: &str) -> Option<Url> {
    let base = Url::from_directory_path(dir).ok()?;
    base.join(target).ok()
}

/// Split a specifier into `(packageName, remainderSubpath)`.
///
/// A name starting with `@` consumes two slash-delimited segments.
/// Relative, absolute, and empty specifiers derive no package name.
fn split_package_specifier(specifier: &str) -> Option<(&str, &str)> {
    if specifier.is_empty() || specifier.starts_with('.') || specifier.starts_with('/') {
        return None;
    }

    if let Some(stripped) = specifier.strip_prefix('@') {
        let scope_end = stripped.find('/')?;
        let after_scope = &stripped[scope_end + 1..];
        if after_scope.is_empty() {
            return None;
        }
        let name_end = match after_scope.find('/') {
            Some(idx) => 1 + scope_end + 1 + idx,
            None => specifier.len(),
        };
        let rest = specifier[name_end..].trim_start_matches('/');
        return Some((&specifier[..name_end], rest));
    }

    match specifier.find('/') {
        Some(idx) => Some((&specifier[..idx], &specifier[idx + 1..])),
        None => Some((specifier, "")),
    }
}
