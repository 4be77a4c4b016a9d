//! QNX credential helper for Bazel.
//!
//! Bazel runs the helper with a `{"uri": ...}` request on stdin. For
//! qnx.com downloads the helper logs in to the QNX account page with
//! credentials from the environment or `~/.netrc` and answers with the
//! `myQNX` session cookie as a header for the download.

pub mod core;
pub mod net;
pub mod ops;
pub mod sources;
pub mod util;

/// Test doubles for the environment, credential store and login client.
#[cfg(test)]
pub mod test_support;

pub use self::core::{Credentials, OutputDescriptor, RequestDescriptor};
pub use net::{LoginClient, ReqwestLoginClient};
pub use ops::{resolve, CredentialError, ResolveOptions};
pub use sources::{CredentialStore, Environment, NetrcStore, ProcessEnv};
