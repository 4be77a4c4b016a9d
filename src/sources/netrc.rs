//! Netrc credential store.
//!
//! Reads machine/login/password entries from a `.netrc` file. The file is
//! located through an explicit path (the `NETRC` environment variable or the
//! `--netrc` flag) or else `~/.netrc`.
//!
//! Supported syntax:
//! - `machine <host>` and `default` entries
//! - `login` (or `user`), `password` and `account` tokens
//! - `"quoted values"` with backslash escapes
//! - `#` comments and `macdef` blocks, which are skipped

use std::fs;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;

use directories::BaseDirs;

use super::{CredentialStore, LookupError};
use crate::core::Credentials;

/// A parsed netrc file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Netrc {
    /// `machine` entries in file order
    pub hosts: Vec<NetrcEntry>,
    /// The `default` entry, if any
    pub default: Option<NetrcEntry>,
}

/// One `machine` or `default` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetrcEntry {
    /// Host name; `None` for the `default` entry
    pub machine: Option<String>,
    pub login: Option<String>,
    pub password: Option<String>,
    pub account: Option<String>,
}

impl NetrcEntry {
    /// Credentials for this entry. Missing fields become empty strings.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.login.clone().unwrap_or_default(),
            self.password.clone().unwrap_or_default(),
        )
    }

    /// Whether the file holding this entry must be private to its owner.
    fn is_sensitive(&self) -> bool {
        let anonymous = self.login.as_deref() == Some("anonymous");
        !anonymous && self.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Syntax error in a netrc file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl Netrc {
    /// Parse netrc text.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(text);
        let mut netrc = Netrc::default();
        let mut current: Option<NetrcEntry> = None;

        while let Some(token) = lexer.next_token()? {
            match token.as_str() {
                "machine" => {
                    netrc.finish(current.take());
                    let host = lexer.value_for("machine")?;
                    current = Some(NetrcEntry {
                        machine: Some(host),
                        ..NetrcEntry::default()
                    });
                }
                "default" => {
                    netrc.finish(current.take());
                    current = Some(NetrcEntry::default());
                }
                "login" | "user" | "password" | "account" => {
                    let value = lexer.value_for(&token)?;
                    let entry = current.as_mut().ok_or_else(|| {
                        lexer.error(format!("`{}` outside of a machine entry", token))
                    })?;
                    let slot = match token.as_str() {
                        "password" => &mut entry.password,
                        "account" => &mut entry.account,
                        _ => &mut entry.login,
                    };
                    *slot = Some(value);
                }
                "macdef" => {
                    netrc.finish(current.take());
                    lexer.value_for("macdef")?;
                    lexer.skip_macro();
                }
                other => return Err(lexer.error(format!("unknown token `{}`", other))),
            }
        }

        netrc.finish(current);
        Ok(netrc)
    }

    /// Find the entry for `host`, falling back to the `default` entry.
    ///
    /// When a host appears more than once the last entry wins.
    pub fn authenticators(&self, host: &str) -> Option<&NetrcEntry> {
        self.hosts
            .iter()
            .rev()
            .find(|e| e.machine.as_deref() == Some(host))
            .or(self.default.as_ref())
    }

    fn finish(&mut self, entry: Option<NetrcEntry>) {
        match entry {
            Some(e) if e.machine.is_some() => self.hosts.push(e),
            Some(e) => self.default = Some(e),
            None => {}
        }
    }
}

struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Lexer {
            chars: text.chars().peekable(),
            line: 1,
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            line: self.line,
            message: message.into(),
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn next_token(&mut self) -> Result<Option<String>, ParseError> {
        loop {
            while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
                self.bump();
            }
            match self.chars.peek() {
                None => return Ok(None),
                Some('#') => self.skip_line(),
                Some('"') => {
                    self.bump();
                    return self.quoted().map(Some);
                }
                Some(_) => return Ok(Some(self.bare())),
            }
        }
    }

    fn value_for(&mut self, keyword: &str) -> Result<String, ParseError> {
        self.next_token()?
            .ok_or_else(|| self.error(format!("missing value after `{}`", keyword)))
    }

    fn bare(&mut self) -> String {
        let mut token = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() {
                break;
            }
            self.bump();
            if c == '\\' {
                if let Some(escaped) = self.bump() {
                    token.push(escaped);
                }
            } else {
                token.push(c);
            }
        }
        token
    }

    fn quoted(&mut self) -> Result<String, ParseError> {
        let mut token = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated quoted string")),
                Some('"') => return Ok(token),
                Some('\\') => match self.bump() {
                    Some(escaped) => token.push(escaped),
                    None => return Err(self.error("unterminated quoted string")),
                },
                Some(c) => token.push(c),
            }
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.bump() {
            if c == '\n' {
                break;
            }
        }
    }

    /// Skip a macro body: the rest of the current line, then every line up
    /// to and including the first blank one.
    fn skip_macro(&mut self) {
        self.skip_line();
        while self.chars.peek().is_some() {
            let mut blank = true;
            while let Some(c) = self.bump() {
                if c == '\n' {
                    break;
                }
                if !c.is_whitespace() {
                    blank = false;
                }
            }
            if blank {
                break;
            }
        }
    }
}

/// A credential store backed by a netrc file.
#[derive(Debug, Clone, Default)]
pub struct NetrcStore {
    path: Option<PathBuf>,
}

impl NetrcStore {
    /// Use `path`, or `~/.netrc` when `None`.
    pub fn new(path: Option<PathBuf>) -> Self {
        NetrcStore { path }
    }

    /// The per-user default location, `~/.netrc`.
    pub fn default_path() -> Result<PathBuf, LookupError> {
        BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".netrc"))
            .ok_or(LookupError::NoHome)
    }

    /// Load and parse the netrc file.
    pub fn load(path: &Path) -> Result<Netrc, LookupError> {
        let text = fs::read_to_string(path).map_err(|source| LookupError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Netrc::parse(&text).map_err(|e| LookupError::Parse {
            path: path.to_path_buf(),
            line: e.line,
            message: e.message,
        })
    }
}

impl CredentialStore for NetrcStore {
    fn lookup(&self, host: &str) -> Result<Credentials, LookupError> {
        let (path, is_default) = match &self.path {
            Some(path) => (path.clone(), false),
            None => (Self::default_path()?, true),
        };

        tracing::debug!("Reading credentials from {}", path.display());

        let netrc = Self::load(&path)?;
        let entry = netrc
            .authenticators(host)
            .ok_or_else(|| LookupError::NoEntry {
                host: host.to_string(),
            })?;

        if is_default && entry.is_sensitive() {
            check_private(&path)?;
        }

        Ok(entry.credentials())
    }
}

#[cfg(unix)]
fn check_private(path: &Path) -> Result<(), LookupError> {
    use std::os::unix::fs::MetadataExt;

    let metadata = fs::metadata(path).map_err(|source| LookupError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // SAFETY: getuid has no preconditions and cannot fail.
    let uid = unsafe { libc::getuid() };
    check_ownership(path, metadata.uid(), uid, metadata.mode())
}

/// The file must belong to `uid` and be closed to group and others.
#[cfg(unix)]
fn check_ownership(path: &Path, owner: u32, uid: u32, mode: u32) -> Result<(), LookupError> {
    if owner != uid {
        return Err(LookupError::NotOwned {
            path: path.to_path_buf(),
            owner,
            uid,
        });
    }
    if mode & 0o077 != 0 {
        return Err(LookupError::InsecurePermissions {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(not(unix))]
fn check_private(_path: &Path) -> Result<(), LookupError> {
    Ok(())
}
