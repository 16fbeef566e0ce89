use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Error type for resolver construction and the one fatal resolution
/// invariant.
///
/// Everything else that can go wrong during resolution (specifier maps
/// to nothing, a manifest fails to parse, a file vanishes mid-probe) is
/// an expected absence and surfaces as `None`, never as an error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("importer context {} could not be absolutized: {source}", path.display())]
    ImporterContext {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("specifier {specifier} resolved to non-file locator {url}")]
    NonFileLocator { specifier: String, url: Url },
}
