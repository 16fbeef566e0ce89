#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

//! Static ESM specifier resolution.
//!
//! Answers "what file does this import statement point to?" without
//! running a module loader: conditional `exports`/`imports` matching,
//! package discovery through `node_modules` chains, legacy entry-point
//! fallbacks, and confirmation of the result against the filesystem.
//!
//! The engine is fully synchronous and never loads or executes module
//! code; it only computes a path string. Build one [`Resolver`] per
//! importing file (or directory) and call [`Resolver::resolve`] with
//! each specifier found in it.

pub mod confirm;
pub mod error;
pub mod locate;
pub mod manifest;
pub mod matcher;
pub mod node_resolve;
pub mod options;
pub mod resolver;

pub use confirm::{Confirmed, INERT_MODULE_URL};
pub use error::Error;
pub use locate::PackageLocator;
pub use manifest::{ExportsNode, PackageInfo, PackageLocation};
pub use options::ResolverOptions;
pub use resolver::Resolver;
