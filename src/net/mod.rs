//! Login transport.

pub mod client;
pub mod cookies;
pub mod form;

use std::error::Error as StdError;

use thiserror::Error;
use url::Url;

pub use client::ReqwestLoginClient;
pub use cookies::SessionCookies;
pub use form::LoginForm;

/// The QNX account login page.
pub const LOGIN_URL: &str = "https://www.qnx.com/account/login.html";

/// What the login exchange produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    /// Final HTTP status code, after redirects
    pub status: u16,
    /// Cookies captured during the exchange
    pub cookies: SessionCookies,
}

/// Sends the login form and captures the resulting cookies.
pub trait LoginClient {
    /// POST a form-encoded `body` to `url`. Called once per invocation.
    fn login(&self, url: &Url, body: Vec<u8>) -> Result<LoginResponse, NetworkError>;
}

impl<C: LoginClient + ?Sized> LoginClient for &C {
    fn login(&self, url: &Url, body: Vec<u8>) -> Result<LoginResponse, NetworkError> {
        (**self).login(url, body)
    }
}

/// The login request never produced an HTTP response.
#[derive(Debug, Error)]
#[error("login request to {url} failed")]
pub struct NetworkError {
    pub url: String,
    #[source]
    pub source: Box<dyn StdError + Send + Sync>,
}

impl NetworkError {
    pub fn new(url: &Url, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        NetworkError {
            url: url.to_string(),
            source: source.into(),
        }
    }
}
