//! Test doubles for the resolver's capabilities.
//!
//! Provides stub implementations of the environment, the credential store
//! and the login client so resolution can be exercised without touching the
//! process environment, the filesystem or the network.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::{qnx_request, FailingStore, StubClient, StubEnv};
//!
//! #[test]
//! fn test_example() {
//!     let env = StubEnv::new().with("SCORE_QNX_USER", "alice").with("SCORE_QNX_PASSWORD", "pw");
//!     let client = StubClient::respond(200, ["myQNX=abc123"]);
//!     let out = resolve(&qnx_request(), &env, &FailingStore, &client).unwrap();
//! }
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;

use url::Url;

use crate::core::{Credentials, RequestDescriptor};
use crate::net::{LoginClient, LoginResponse, NetworkError, SessionCookies};
use crate::sources::{CredentialStore, Environment, LookupError};

/// A request for a typical QNX SDP download.
pub fn qnx_request() -> RequestDescriptor {
    RequestDescriptor::new("https://www.qnx.com/download/download/79858/installation.tgz")
}

/// In-memory environment.
#[derive(Debug, Clone, Default)]
pub struct StubEnv {
    vars: HashMap<String, String>,
}

impl StubEnv {
    /// Create an empty environment.
    pub fn new() -> Self {
        StubEnv::default()
    }

    /// Set a variable.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

impl Environment for StubEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// A credential store that fails the test if it is consulted.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStore;

impl CredentialStore for FailingStore {
    fn lookup(&self, host: &str) -> Result<Credentials, LookupError> {
        panic!("credential store was queried for `{}`", host);
    }
}

#[derive(Debug)]
enum StoreBehavior {
    Found(Credentials),
    Missing,
    Broken,
}

/// A credential store with a canned answer that records each query.
#[derive(Debug)]
pub struct StubStore {
    behavior: StoreBehavior,
    queries: RefCell<Vec<String>>,
}

impl StubStore {
    fn with_behavior(behavior: StoreBehavior) -> Self {
        StubStore {
            behavior,
            queries: RefCell::new(Vec::new()),
        }
    }

    /// Every lookup returns `credentials`.
    pub fn found(credentials: Credentials) -> Self {
        Self::with_behavior(StoreBehavior::Found(credentials))
    }

    /// Every lookup finds no entry.
    pub fn missing() -> Self {
        Self::with_behavior(StoreBehavior::Missing)
    }

    /// Every lookup fails with an I/O error.
    pub fn broken() -> Self {
        Self::with_behavior(StoreBehavior::Broken)
    }

    /// Hosts looked up so far.
    pub fn queried_hosts(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }
}

impl CredentialStore for StubStore {
    fn lookup(&self, host: &str) -> Result<Credentials, LookupError> {
        self.queries.borrow_mut().push(host.to_string());
        match &self.behavior {
            StoreBehavior::Found(credentials) => Ok(credentials.clone()),
            StoreBehavior::Missing => Err(LookupError::NoEntry {
                host: host.to_string(),
            }),
            StoreBehavior::Broken => Err(LookupError::Io {
                path: "/nonexistent/.netrc".into(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            }),
        }
    }
}

/// A login client with a canned response that records each request.
#[derive(Debug)]
pub struct StubClient {
    response: Option<LoginResponse>,
    requests: RefCell<Vec<(Url, Vec<u8>)>>,
}

impl StubClient {
    /// Answer with `status` and the given `Set-Cookie` header values.
    pub fn respond<const N: usize>(status: u16, set_cookies: [&str; N]) -> Self {
        Self::with_response(LoginResponse {
            status,
            cookies: SessionCookies::from_set_cookie_headers(set_cookies),
        })
    }

    /// Answer with an explicit response.
    pub fn with_response(response: LoginResponse) -> Self {
        StubClient {
            response: Some(response),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Fail every request with a connection error.
    pub fn unreachable() -> Self {
        StubClient {
            response: None,
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Number of login requests made.
    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    /// The most recent request's URL and body.
    pub fn last_request(&self) -> Option<(Url, Vec<u8>)> {
        self.requests.borrow().last().cloned()
    }
}

impl LoginClient for StubClient {
    fn login(&self, url: &Url, body: Vec<u8>) -> Result<LoginResponse, NetworkError> {
        self.requests.borrow_mut().push((url.clone(), body));
        self.response.clone().ok_or_else(|| {
            NetworkError::new(
                url,
                io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
            )
        })
    }
}
