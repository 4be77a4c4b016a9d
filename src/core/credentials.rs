//! Login credentials for the vendor site.

use std::fmt;

/// Environment variable holding the QNX account login.
pub const USER_ENV: &str = "SCORE_QNX_USER";

/// Environment variable holding the QNX account password.
pub const PASSWORD_ENV: &str = "SCORE_QNX_PASSWORD";

/// Where a set of credentials came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// `SCORE_QNX_USER` / `SCORE_QNX_PASSWORD`
    Environment,
    /// The netrc credential store
    Netrc,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Environment => write!(f, "environment"),
            CredentialSource::Netrc => write!(f, "netrc"),
        }
    }
}

/// A login/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    /// Create a new credential pair.
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            login: login.into(),
            password: password.into(),
        }
    }
}

// The password never ends up in logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}
