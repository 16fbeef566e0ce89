//! Public resolver façade.
//!
//! Ties the pipeline together: absolute URLs are not this system's
//! concern, package-flavored specifiers go through
//! [`crate::node_resolve`], everything else is taken relative to the
//! importer's directory, and whatever survives is confirmed on disk and
//! formatted as a relative path string.

use crate::confirm::{confirm, Confirmed, INERT_MODULE_URL};
use crate::error::Error;
use crate::locate::PackageLocator;
use crate::node_resolve::NodeResolve;
use crate::options::ResolverOptions;
use portside_util::{fs, paths};
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

/// Resolves module specifiers written in one importing file.
///
/// The resolver is bound to the importer's directory and owns a private
/// package-location cache; it is deliberately single-threaded (share
/// nothing, or wrap it yourself).
#[derive(Debug)]
pub struct Resolver {
    base_dir: PathBuf,
    options: ResolverOptions,
    locator: PackageLocator,
}

impl Resolver {
    /// Build a resolver bound to the directory context of `importer`.
    ///
    /// A directory path is used as-is; a file path (existing or not)
    /// contributes its parent directory. Fails only when a relative
    /// importer cannot be absolutized against the working directory.
    pub fn build(importer: impl AsRef<Path>, options: ResolverOptions) -> Result<Self, Error> {
        let importer = importer.as_ref();
        let absolute = if importer.is_absolute() {
            importer.to_path_buf()
        } else {
            let cwd = std::env::current_dir().map_err(|source| Error::ImporterContext {
                path: importer.to_path_buf(),
                source,
            })?;
            cwd.join(importer)
        };
        let base_dir = if fs::is_dir(&absolute) {
            absolute
        } else {
            absolute.parent().map_or(absolute.clone(), Path::to_path_buf)
        };
        Ok(Self {
            locator: PackageLocator::new(base_dir.clone()),
            base_dir,
            options,
        })
    }

    /// Shorthand for [`Resolver::build`] with default options.
    pub fn with_defaults(importer: impl AsRef<Path>) -> Result<Self, Error> {
        Self::build(importer, ResolverOptions::default())
    }

    /// The importer directory this resolver is bound to.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve `specifier` to a relative path string.
    ///
    /// `Ok(None)` means the specifier maps to nothing this resolver can
    /// confirm (or is already an absolute URL). The only error is the
    /// internal locator-scheme invariant, which indicates a bug rather
    /// than a bad specifier.
    pub fn resolve(&self, specifier: &str) -> Result<Option<String>, Error> {
        if Url::parse(specifier).is_ok() {
            // Already fully qualified; nothing to compute.
            return Ok(None);
        }

        let node = NodeResolve::new(&self.locator, &self.options);
        let (candidate, suffix) = match node.resolve(specifier) {
            Some(url) => {
                if url.scheme() != "file" {
                    return Err(Error::NonFileLocator {
                        specifier: specifier.to_string(),
                        url,
                    });
                }
                let suffix = url_suffix(&url);
                let path = url.to_file_path().map_err(|()| Error::NonFileLocator {
                    specifier: specifier.to_string(),
                    url: url.clone(),
                })?;
                (path, suffix)
            }
            None => {
                // Not package-flavored; take it relative to the
                // importer's directory.
                let (bare, suffix) = split_suffix(specifier);
                (self.base_dir.join(bare), suffix.to_string())
            }
        };

        let confirmed_path = match confirm(&candidate, &self.options) {
            Some(Confirmed::Inert) => {
                debug!(specifier, "declaration-only module hidden");
                return Ok(Some(format!("{INERT_MODULE_URL}{suffix}")));
            }
            Some(Confirmed::Path(path)) => path,
            None if self.options.allow_missing => candidate,
            None => {
                debug!(specifier, "no resolvable file");
                return Ok(None);
            }
        };

        let relative = paths::relative_from(&confirmed_path, &self.base_dir);
        let mut formatted = relative.to_string_lossy().into_owned();
        if !(formatted.starts_with("./")
            || formatted.starts_with("../")
            || formatted.starts_with('/'))
        {
            // Never emit something that could be mistaken for a bare
            // specifier downstream.
            formatted.insert_str(0, "./");
        }
        formatted.push_str(&suffix);
        debug!(specifier, resolved = %formatted, "specifier resolved");
        Ok(Some(formatted))
    }
}

/// Collect a locator's query/hash suffix in source form.
fn url_suffix(url: &Url) -> String {
    let mut suffix = String::new();
    if let Some(query) = url.query() {
        suffix.push('?');
        suffix.push_str(query);
    }
    if let Some(fragment) = url.fragment() {
        suffix.push('#');
        suffix.push_str(fragment);
    }
    suffix
}

/// Split a raw specifier at the first `?` or `#`.
fn split_suffix(specifier: &str) -> (&str, &str) {
    match specifier.find(['?', '#']) {
        Some(idx) => (&specifier[..idx], &specifier[idx..]),
        None => (specifier, ""),
    }
}
