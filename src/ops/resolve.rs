//! Resolving a credential request into download headers.

use url::Url;

use super::errors::CredentialError;
use crate::core::output::SESSION_COOKIE;
use crate::core::{CredentialSource, Credentials, OutputDescriptor, RequestDescriptor};
use crate::net::{LoginClient, LoginForm, LOGIN_URL};
use crate::sources::{credentials_from_env, CredentialStore, Environment, CREDENTIAL_HOST};

/// Options for resolution.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Login endpoint to post the credentials to
    pub login_url: Url,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions {
            login_url: Url::parse(LOGIN_URL).expect("LOGIN_URL is a valid URL"),
        }
    }
}

/// Resolve a credential request with default options.
pub fn resolve(
    request: &RequestDescriptor,
    env: &dyn Environment,
    store: &dyn CredentialStore,
    client: &dyn LoginClient,
) -> Result<OutputDescriptor, CredentialError> {
    resolve_with_opts(request, env, store, client, &ResolveOptions::default())
}

/// Resolve a credential request.
///
/// Checks the request targets qnx.com, finds credentials, logs in once and
/// returns the headers carrying the session cookie. Nothing is retried.
pub fn resolve_with_opts(
    request: &RequestDescriptor,
    env: &dyn Environment,
    store: &dyn CredentialStore,
    client: &dyn LoginClient,
    opts: &ResolveOptions,
) -> Result<OutputDescriptor, CredentialError> {
    if !request.is_supported() {
        return Err(CredentialError::UnsupportedDomain {
            uri: request.uri.clone(),
        });
    }

    let (credentials, source) = resolve_credentials(env, store)?;
    tracing::debug!("Using {} credentials for `{}`", source, credentials.login);

    let body = LoginForm::new(&credentials).encode();
    let response = client
        .login(&opts.login_url, body)
        .map_err(CredentialError::Network)?;

    if response.status != 200 {
        return Err(CredentialError::LoginFailed {
            status: response.status,
        });
    }

    let Some(session) = response.cookies.get(SESSION_COOKIE) else {
        return Err(CredentialError::MissingSessionCookie {
            received: response.cookies.names().map(str::to_string).collect(),
        });
    };

    Ok(OutputDescriptor::with_session_cookie(session))
}

/// Find credentials: the environment first, then the credential store.
pub fn resolve_credentials(
    env: &dyn Environment,
    store: &dyn CredentialStore,
) -> Result<(Credentials, CredentialSource), CredentialError> {
    if let Some(credentials) = credentials_from_env(env) {
        return Ok((credentials, CredentialSource::Environment));
    }

    store
        .lookup(CREDENTIAL_HOST)
        .map(|credentials| (credentials, CredentialSource::Netrc))
        .map_err(CredentialError::CredentialLookupFailed)
}
