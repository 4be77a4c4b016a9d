//! The response the helper writes back to Bazel.

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::Serialize;
use serde_json::ser::Formatter;

/// Name of the session cookie issued by the QNX login page.
pub const SESSION_COOKIE: &str = "myQNX";

/// Headers Bazel should attach to the download request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputDescriptor {
    pub headers: BTreeMap<String, Vec<String>>,
}

impl OutputDescriptor {
    /// Build the response carrying a single `myQNX` session cookie.
    pub fn with_session_cookie(value: &str) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(
            "Cookie".to_string(),
            vec![format!("{}={}", SESSION_COOKIE, value)],
        );
        OutputDescriptor { headers }
    }

    /// Serialize to JSON with `", "` and `": "` separators.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
        self.serialize(&mut ser)?;
        // serde_json only ever emits UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write the JSON response followed by a newline.
    pub fn write_to(&self, mut writer: impl Write) -> io::Result<()> {
        let json = self.to_json().map_err(io::Error::from)?;
        writeln!(writer, "{}", json)?;
        writer.flush()
    }
}

/// Single-line JSON with a space after every separator.
#[derive(Debug, Clone, Copy, Default)]
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }
}
