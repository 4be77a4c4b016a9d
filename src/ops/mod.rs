//! High-level operations.
//!
//! This module contains the implementation of the helper's commands.

pub mod errors;
pub mod resolve;

pub use errors::CredentialError;
pub use resolve::{resolve, resolve_credentials, resolve_with_opts, ResolveOptions};
