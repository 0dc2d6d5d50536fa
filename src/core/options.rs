//! Fetch options and validation

use anyhow::{bail, Result};
use std::path::PathBuf;

/// Username substituted when only a password/token is supplied. Token auth
/// ignores the username, but the transport requires it to be non-empty.
pub const TOKEN_USERNAME: &str = "token";

/// Basic (username/password or token) authentication for HTTPS remotes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

/// Private-key authentication for SSH remotes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshAuth {
    /// Path to a PEM encoded private key file
    pub key_path: PathBuf,
    /// Passphrase for the key, if it has one
    pub passphrase: Option<String>,
}

/// Everything needed to fetch and check out a single commit
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Remote repository URL (SSH or HTTPS)
    pub repo: String,
    /// Full 40 hexadecimal character commit SHA1
    pub sha: String,
    /// Working directory for the repository
    pub directory: PathBuf,
    /// Remove the `.git` directory after checkout
    pub rm_dotgit: bool,
    /// Suppress progress and log output
    pub silent: bool,
    pub basic_auth: Option<BasicAuth>,
    pub ssh_auth: Option<SshAuth>,
}

impl FetchOptions {
    /// Check field presence and mutual exclusivity before any network
    /// activity happens.
    pub fn validate(&self) -> Result<()> {
        if self.repo.is_empty() {
            bail!("\"repo\" is invalid: it is required");
        }

        if !is_full_sha(&self.sha) {
            bail!("\"sha\" is invalid: must be full 40 hexadecimal character SHA1");
        }

        if self.basic_auth.is_some() && self.ssh_auth.is_some() {
            bail!("cannot specify both basic auth and ssh auth options");
        }

        if let Some(basic) = &self.basic_auth {
            if basic.username.is_empty() {
                bail!(
                    "\"username\" is invalid: required if password specified \
                     (if using a token, set username to {:?})",
                    TOKEN_USERNAME
                );
            }
            if basic.password.is_empty() {
                bail!("\"password\" is invalid: required if username specified");
            }
        }

        if let Some(ssh) = &self.ssh_auth {
            if ssh.key_path.as_os_str().is_empty() {
                bail!("\"key-path\" is invalid: required if ssh options set");
            }
        }

        Ok(())
    }
}

fn is_full_sha(sha: &str) -> bool {
    sha.len() == 40 && sha.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHA: &str = "70a3acb3b2b43b1b5ec8a63b7cd1a3986d48d24b";

    fn options() -> FetchOptions {
        FetchOptions {
            repo: "git@github.com:octocat/hello-world.git".to_string(),
            sha: SHA.to_string(),
            directory: PathBuf::from("."),
            ..Default::default()
        }
    }

    #[test]
    fn valid_without_auth() {
        assert!(options().validate().is_ok());
    }

    #[test]
    fn valid_with_ssh_auth() {
        let mut opts = options();
        opts.ssh_auth = Some(SshAuth {
            key_path: PathBuf::from("/my/key.pem"),
            passphrase: Some("foo-bar-baz".to_string()),
        });
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn valid_with_basic_auth() {
        let mut opts = options();
        opts.basic_auth = Some(BasicAuth {
            username: "token".to_string(),
            password: "notpassword".to_string(),
        });
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn rejects_both_auth_modes() {
        let mut opts = options();
        opts.basic_auth = Some(BasicAuth {
            username: "token".to_string(),
            password: "notpassword".to_string(),
        });
        opts.ssh_auth = Some(SshAuth {
            key_path: PathBuf::from("/my/key.pem"),
            passphrase: None,
        });
        let err = opts.validate().unwrap_err();
        assert!(err.to_string().contains("both"), "unexpected error: {err}");
    }

    #[test]
    fn rejects_empty_repo() {
        let mut opts = options();
        opts.repo = String::new();
        assert!(opts.validate().is_err());
    }

    #[test]
    fn rejects_bad_sha() {
        for sha in ["", "deadbeef", "zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz"] {
            let mut opts = options();
            opts.sha = sha.to_string();
            assert!(opts.validate().is_err(), "sha {sha:?} should be rejected");
        }

        // one char short, one char long
        let mut opts = options();
        opts.sha = SHA[..39].to_string();
        assert!(opts.validate().is_err());
        opts.sha = format!("{SHA}a");
        assert!(opts.validate().is_err());
    }

    #[test]
    fn accepts_uppercase_sha() {
        let mut opts = options();
        opts.sha = SHA.to_uppercase();
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn rejects_incomplete_basic_auth() {
        let mut opts = options();
        opts.basic_auth = Some(BasicAuth {
            username: String::new(),
            password: "notpassword".to_string(),
        });
        assert!(opts.validate().is_err());

        opts.basic_auth = Some(BasicAuth {
            username: "token".to_string(),
            password: String::new(),
        });
        assert!(opts.validate().is_err());
    }

    #[test]
    fn rejects_ssh_auth_without_key() {
        let mut opts = options();
        opts.ssh_auth = Some(SshAuth {
            key_path: PathBuf::new(),
            passphrase: Some("foo-bar-baz".to_string()),
        });
        assert!(opts.validate().is_err());
    }
}
