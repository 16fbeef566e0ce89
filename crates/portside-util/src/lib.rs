#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Synchronous filesystem and path primitives for portside.
//!
//! Pure helper functions with no logging/tracing dependencies. The
//! resolver engine in `portside-core` consumes these as its collaborator
//! interfaces; nothing here knows about packages or specifiers.

pub mod fs;
pub mod paths;
