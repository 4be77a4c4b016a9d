//! Credential resolution error types and diagnostics.

use std::error::Error as StdError;

use thiserror::Error;

use crate::net::NetworkError;
use crate::sources::LookupError;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error while resolving a credential request. Every variant is terminal.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Failed to read credential request from stdin")]
    InvalidRequest(#[source] serde_json::Error),

    #[error("Unsupported domain")]
    UnsupportedDomain { uri: Option<String> },

    #[error("Failed getting credentials from .netrc")]
    CredentialLookupFailed(#[source] LookupError),

    #[error("Failed to reach the QNX login page")]
    Network(#[source] NetworkError),

    #[error("Failed to login to QNX")]
    LoginFailed { status: u16 },

    #[error("Failed to get myQNX cookie from login page")]
    MissingSessionCookie { received: Vec<String> },
}

impl CredentialError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());

        match self {
            CredentialError::InvalidRequest(_) => with_causes(diag, self)
                .with_context("expected a JSON object such as {\"uri\": \"https://www.qnx.com/...\"}"),

            CredentialError::UnsupportedDomain { uri } => match uri {
                Some(uri) => diag.with_context(format!("`{}` is not a qnx.com URL", uri)),
                None => diag.with_context("the request has no `uri` field"),
            },

            CredentialError::CredentialLookupFailed(_) => with_causes(diag, self)
                .with_suggestion(suggestions::SET_CREDENTIALS)
                .with_suggestion(suggestions::ADD_NETRC_ENTRY),

            CredentialError::Network(_) => {
                with_causes(diag, self).with_suggestion(suggestions::CHECK_NETWORK)
            }

            CredentialError::LoginFailed { status } => diag
                .with_context(format!("login page answered HTTP {}", status))
                .with_suggestion(suggestions::CHECK_ACCOUNT),

            CredentialError::MissingSessionCookie { received } => {
                let diag = if received.is_empty() {
                    diag.with_context("the login page set no cookies")
                } else {
                    diag.with_context(format!("cookies received: {}", received.join(", ")))
                };
                diag.with_suggestion(suggestions::CHECK_ACCOUNT)
            }
        }
    }
}

/// Add one context line per error in the source chain.
fn with_causes(mut diag: Diagnostic, err: &dyn StdError) -> Diagnostic {
    let mut cause = err.source();
    while let Some(e) = cause {
        diag = diag.with_context(e.to_string());
        cause = e.source();
    }
    diag
}
