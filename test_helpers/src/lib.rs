//! Test helpers shared across crates in the workspace.
//!
//! - [`env`] mutates process environment variables behind a global lock.
//! - [`errors`] checks rendered messages along an error's source chain.

pub mod env;
pub mod errors;
