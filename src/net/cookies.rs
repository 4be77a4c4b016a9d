//! Session cookies captured from the login exchange.

use std::collections::BTreeMap;

/// Cookie name/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCookies {
    cookies: BTreeMap<String, String>,
}

impl SessionCookies {
    /// Create an empty set.
    pub fn new() -> Self {
        SessionCookies::default()
    }

    /// Collect cookies from `Set-Cookie` response header values, in order.
    pub fn from_set_cookie_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cookies = SessionCookies::new();
        for header in headers {
            cookies.apply_set_cookie(header.as_ref());
        }
        cookies
    }

    /// Apply one `Set-Cookie` header value.
    ///
    /// `Path`, `Domain` and the other attributes do not restrict what is
    /// kept. A `Max-Age` of zero or less deletes the cookie.
    pub fn apply_set_cookie(&mut self, header: &str) {
        let mut parts = header.split(';');
        let Some((name, value)) = parts.next().and_then(|pair| pair.split_once('=')) else {
            return;
        };
        let name = name.trim();
        if name.is_empty() {
            return;
        }

        let expired = parts.any(|attr| {
            attr.split_once('=').is_some_and(|(key, value)| {
                key.trim().eq_ignore_ascii_case("max-age")
                    && value.trim().parse::<i64>().is_ok_and(|age| age <= 0)
            })
        });

        if expired {
            self.cookies.remove(name);
        } else {
            self.insert(name, value.trim());
        }
    }

    /// Add or replace a cookie.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    /// Look up a cookie value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Cookie names, for logging. Values stay out of the logs.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cookies.keys().map(String::as_str)
    }
}
