//! HTTP client for the login request.

use std::sync::{Arc, Mutex, PoisonError};

use reqwest::blocking::Client;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use url::Url;

use super::{LoginClient, LoginResponse, NetworkError, SessionCookies};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Login client backed by `reqwest`.
///
/// Every call builds its own client and cookie jar, so nothing outlives the
/// request. Redirects are followed and every cookie set along the way is
/// kept, whatever its `Path` or `Domain`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestLoginClient;

impl ReqwestLoginClient {
    pub fn new() -> Self {
        ReqwestLoginClient
    }
}

impl LoginClient for ReqwestLoginClient {
    fn login(&self, url: &Url, body: Vec<u8>) -> Result<LoginResponse, NetworkError> {
        let jar = Arc::new(SessionJar::default());
        let client = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| NetworkError::new(url, e))?;

        tracing::debug!("POST {}", url);

        let response = client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .map_err(|e| NetworkError::new(url, e))?;

        let status = response.status().as_u16();
        let final_url = response.url().clone();
        drop(response);

        tracing::debug!("Login response: HTTP {} from {}", status, final_url);

        let cookies = jar.captured();
        tracing::debug!(
            "Captured cookies: {}",
            cookies.names().collect::<Vec<_>>().join(", ")
        );

        Ok(LoginResponse { status, cookies })
    }
}

/// Cookie provider that records every `Set-Cookie` it sees.
///
/// Cookies are still stored in a regular [`Jar`] so they are sent along on
/// redirects; the recorded copy ignores URL scoping.
#[derive(Default)]
struct SessionJar {
    jar: Jar,
    captured: Mutex<SessionCookies>,
}

impl SessionJar {
    fn captured(&self) -> SessionCookies {
        self.captured
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CookieStore for SessionJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let headers: Vec<HeaderValue> = cookie_headers.cloned().collect();

        {
            let mut captured = self
                .captured
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            for header in &headers {
                match header.to_str() {
                    Ok(value) => captured.apply_set_cookie(value),
                    Err(_) => tracing::debug!("Ignoring non-ASCII Set-Cookie from {}", url),
                }
            }
        }

        self.jar.set_cookies(&mut headers.iter(), url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.jar.cookies(url)
    }
}
