//! Command-line interface

use crate::core::{BasicAuth, FetchOptions, SshAuth, TOKEN_USERNAME};
use crate::git::shallow_fetch_sha;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

const LONG_ABOUT: &str = "\
For a given git repository and commit sha, fetch and checkout a specific commit
to save time and networking traffic. The resulting directory will not have any
ref/object history beyond the specified commit sha.

The repository can be specified as either SSH or HTTPS, but the commit must be
the 40 digit hexadecimal SHA1 representation. Both SSH and Basic authentication
are supported, granted the proper repository URLs are specified. This program
does not honor git-config files or options.

Note: this is only compatible with Git servers >= 2.5, they must support and
enable the 'uploadpack.allowReachableSHA1InWant' configuration option.";

/// Shallow fetch a specific git repository's commit to a directory
#[derive(Debug, Parser)]
#[command(name = "sfs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Shallow fetch a specific git repository's commit to a directory")]
#[command(long_about = LONG_ABOUT)]
pub struct Cli {
    /// Repository URL, SSH or HTTPS
    #[arg(value_name = "REPO")]
    pub repo: String,

    /// Full 40 hexadecimal character commit SHA1
    #[arg(value_name = "SHA")]
    pub sha: String,

    /// Working directory for the repository
    #[arg(short = 'd', long, default_value = ".")]
    pub directory: PathBuf,

    /// Username for basic authentication
    #[arg(short = 'u', long)]
    pub username: Option<String>,

    /// Password (or token) for basic authentication
    #[arg(short = 'p', long)]
    pub password: Option<String>,

    /// PEM encoded private key file for ssh authentication
    #[arg(short = 'i', long)]
    pub key_path: Option<PathBuf>,

    /// Private key passphrase for ssh authentication
    #[arg(short = 'P', long)]
    pub key_passphrase: Option<String>,

    /// Remove the '.git' directory after pulling files
    #[arg(short = 'D', long)]
    pub rm_dotgit: bool,

    /// Silent output (takes precedence over verbose)
    #[arg(short = 's', long)]
    pub silent: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Validate the bound options and run the fetch.
    pub fn run(self) -> Result<()> {
        let opts = self.into_options();
        opts.validate()?;
        shallow_fetch_sha(&opts)
    }

    /// Bind arguments and flags into fetch options.
    ///
    /// A password without a username gets the `token` placeholder username;
    /// all other presence rules are left to [`FetchOptions::validate`].
    pub fn into_options(self) -> FetchOptions {
        let basic_auth = match (self.username, self.password) {
            (None, None) => None,
            (username, password) => Some(BasicAuth {
                username: username.unwrap_or_else(|| TOKEN_USERNAME.to_string()),
                password: password.unwrap_or_default(),
            }),
        };

        let ssh_auth = match (self.key_path, self.key_passphrase) {
            (None, None) => None,
            (key_path, passphrase) => Some(SshAuth {
                key_path: key_path.unwrap_or_default(),
                passphrase,
            }),
        };

        FetchOptions {
            repo: self.repo,
            sha: self.sha,
            directory: self.directory,
            rm_dotgit: self.rm_dotgit,
            silent: self.silent,
            basic_auth,
            ssh_auth,
        }
    }
}
