//! Package discovery: the self package and named dependencies.

use crate::manifest::PackageLocation;
use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::trace;

/// Directory searched for installed dependencies at each ancestor.
const DEPENDENCY_DIR: &str = "node_modules";

/// Locates packages relative to one importing directory.
///
/// Successful lookups are memoized for the lifetime of the locator;
/// misses are recomputed on every call. The caches are private to the
/// instance, so concurrent use requires one locator per thread.
#[derive(Debug)]
pub struct PackageLocator {
    base_dir: PathBuf,
    self_pkg: OnceCell<Option<Rc<PackageLocation>>>,
    named: RefCell<HashMap<String, Rc<PackageLocation>>>,
}

impl PackageLocator {
    /// Create a locator rooted at the importing file's directory.
    #[must_use]
    pub fn new(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            self_pkg: OnceCell::new(),
            named: RefCell::new(HashMap::new()),
        }
    }

    /// The directory this locator searches from.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The package containing the importing file: the first ancestor
    /// directory (including the base itself) holding a parseable
    /// manifest. A manifest that fails to parse counts as absent and
    /// the walk continues upward.
    #[must_use]
    pub fn self_package(&self) -> Option<Rc<PackageLocation>> {
        self.self_pkg
            .get_or_init(|| {
                let mut dir = self.base_dir.as_path();
                loop {
                    if let Some(location) = PackageLocation::read(dir) {
                        trace!(dir = %dir.display(), "self package found");
                        return Some(Rc::new(location));
                    }
                    match dir.parent() {
                        Some(parent) => dir = parent,
                        None => return None,
                    }
                }
            })
            .clone()
    }

    /// Locate a named dependency.
    ///
    /// A name equal to the self package's declared name resolves to the
    /// self package. Otherwise `node_modules/<name>` is probed at every
    /// ancestor of the base directory; the closest parseable manifest
    /// wins.
    #[must_use]
    pub fn named_package(&self, name: &str) -> Option<Rc<PackageLocation>> {
        if let Some(cached) = self.named.borrow().get(name) {
            trace!(name, "package location cache hit");
            return Some(cached.clone());
        }

        if let Some(own) = self.self_package() {
            if own.info.name.as_deref() == Some(name) {
                return Some(own);
            }
        }

        let mut dir = self.base_dir.as_path();
        loop {
            let candidate = dir.join(DEPENDENCY_DIR).join(name);
            if let Some(location) = PackageLocation::read(&candidate) {
                trace!(name, dir = %candidate.display(), "package located");
                let location = Rc::new(location);
                self.named
                    .borrow_mut()
                    .insert(name.to_string(), location.clone());
                return Some(location);
            }
            match dir.parent() {
                Some(parent) => dir = parent,
                None => return None,
            }
        }
    }
}
