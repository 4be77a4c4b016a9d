//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Bazel credential helper for qnx.com downloads
#[derive(Parser)]
#[command(name = "qnx-credential-helper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Netrc file to read credentials from (defaults to ~/.netrc)
    #[arg(long, global = true, env = "NETRC")]
    pub netrc: Option<PathBuf>,

    /// Login endpoint (defaults to the qnx.com login page)
    #[arg(long, global = true, env = "QNX_LOGIN_URL", hide = true)]
    pub login_url: Option<String>,

    /// Defaults to `get`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read a credential request from stdin and print the headers to use
    Get,
}
