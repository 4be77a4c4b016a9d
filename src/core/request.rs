//! The request descriptor Bazel writes to the helper's stdin.

use std::io::Read;

use serde::Deserialize;

/// Domain the helper knows how to log in to.
pub const SUPPORTED_DOMAIN: &str = "qnx.com";

/// A credential request as sent by Bazel.
///
/// Only `uri` is read; any other fields in the request are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RequestDescriptor {
    /// The URI Bazel wants to download.
    #[serde(default)]
    pub uri: Option<String>,
}

impl RequestDescriptor {
    /// Create a descriptor for the given URI.
    pub fn new(uri: impl Into<String>) -> Self {
        RequestDescriptor {
            uri: Some(uri.into()),
        }
    }

    /// Parse a descriptor from JSON.
    pub fn from_reader(reader: impl Read) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }

    /// Whether the requested URI points at the supported vendor.
    ///
    /// A missing `uri` is never supported.
    pub fn is_supported(&self) -> bool {
        self.uri
            .as_deref()
            .is_some_and(|uri| uri.contains(SUPPORTED_DOMAIN))
    }
}
