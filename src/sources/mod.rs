//! Credential sources.
//!
//! Credentials come from the environment first and from a netrc file
//! otherwise. Both are reached through traits so the resolver can be
//! driven by test doubles.

pub mod env;
pub mod netrc;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::Credentials;

pub use env::{credentials_from_env, Environment, ProcessEnv};
pub use netrc::{Netrc, NetrcEntry, NetrcStore};

/// Host key the vendor credentials are stored under.
pub const CREDENTIAL_HOST: &str = "qnx.com";

/// A per-host credential store.
pub trait CredentialStore {
    /// Look up the credentials stored for `host`.
    fn lookup(&self, host: &str) -> Result<Credentials, LookupError>;
}

impl<S: CredentialStore + ?Sized> CredentialStore for &S {
    fn lookup(&self, host: &str) -> Result<Credentials, LookupError> {
        (**self).lookup(host)
    }
}

/// Why a credential store lookup failed.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("could not determine the home directory to locate .netrc")]
    NoHome,

    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("bad netrc file {} (line {line}): {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("{} is owned by uid {owner}, not the current user (uid {uid})", path.display())]
    NotOwned { path: PathBuf, owner: u32, uid: u32 },

    #[error("{} access too permissive", path.display())]
    InsecurePermissions { path: PathBuf },

    #[error("no credential found for `{host}`")]
    NoEntry { host: String },
}
