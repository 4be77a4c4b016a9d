//! Environment variable access.

use crate::core::credentials::{PASSWORD_ENV, USER_ENV};
use crate::core::Credentials;

/// Read access to environment variables.
pub trait Environment {
    /// Look up a variable, returning `None` when it is unset.
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        // Non-UTF-8 values are treated as unset.
        std::env::var(key).ok()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}

/// Credentials from `SCORE_QNX_USER` and `SCORE_QNX_PASSWORD`.
///
/// Both variables must be set; one without the other yields `None`.
pub fn credentials_from_env(env: &dyn Environment) -> Option<Credentials> {
    let login = env.var(USER_ENV)?;
    let password = env.var(PASSWORD_ENV)?;
    Some(Credentials::new(login, password))
}
