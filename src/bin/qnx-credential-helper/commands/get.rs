//! `qnx-credential-helper get` command

use std::io;

use anyhow::{Context, Result};
use url::Url;

use crate::cli::Cli;
use qnx_credential_helper::ops::{resolve_with_opts, CredentialError, ResolveOptions};
use qnx_credential_helper::{NetrcStore, ProcessEnv, ReqwestLoginClient, RequestDescriptor};

pub fn execute(cli: &Cli) -> Result<()> {
    let request = RequestDescriptor::from_reader(io::stdin().lock())
        .map_err(CredentialError::InvalidRequest)?;

    let store = NetrcStore::new(cli.netrc.clone());
    let client = ReqwestLoginClient::new();
    let opts = match &cli.login_url {
        Some(raw) => ResolveOptions {
            login_url: Url::parse(raw).with_context(|| format!("invalid login URL `{}`", raw))?,
        },
        None => ResolveOptions::default(),
    };

    let output = resolve_with_opts(&request, &ProcessEnv, &store, &client, &opts)?;

    output
        .write_to(io::stdout().lock())
        .context("failed to write the credential response to stdout")?;

    Ok(())
}
