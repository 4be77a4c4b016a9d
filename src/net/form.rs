//! The login form body.

use url::form_urlencoded;

use crate::core::Credentials;

/// Form fields posted to the login page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm<'a> {
    credentials: &'a Credentials,
}

impl<'a> LoginForm<'a> {
    pub fn new(credentials: &'a Credentials) -> Self {
        LoginForm { credentials }
    }

    /// Encode as `application/x-www-form-urlencoded`.
    ///
    /// `UseCookie=1` asks the site to issue the session as a cookie.
    pub fn encode(&self) -> Vec<u8> {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("userlogin", &self.credentials.login)
            .append_pair("password", &self.credentials.password)
            .append_pair("UseCookie", "1")
            .finish()
            .into_bytes()
    }
}
