//! Credential selection for remote callbacks

use crate::core::FetchOptions;
use git2::Cred;
use url::Url;

/// User assumed for SSH remotes when the URL doesn't embed one
pub const DEFAULT_SSH_USER: &str = "git";

/// Extract the user embedded in an SSH remote URL, defaulting to `git`.
///
/// Handles both scp-like (`user@host:path`) and `ssh://user@host/path` forms.
pub fn ssh_user(repo: &str) -> String {
    if !repo.contains("://") {
        // scp-like urls aren't parseable as standard urls
        if let Some((head, _)) = repo.split_once(':') {
            if let Some((user, _)) = head.split_once('@') {
                if !user.is_empty() {
                    return user.to_string();
                }
            }
        }
    } else if let Ok(url) = Url::parse(repo) {
        if !url.username().is_empty() {
            return url.username().to_string();
        }
    }

    DEFAULT_SSH_USER.to_string()
}

/// Produce a credential for the remote based on the configured auth mode.
///
/// With no auth configured, fall back to the SSH agent. HTTPS remotes that
/// never challenge for credentials don't reach this at all.
pub(crate) fn credentials(
    opts: &FetchOptions,
    username_from_url: Option<&str>,
) -> Result<Cred, git2::Error> {
    if let Some(basic) = &opts.basic_auth {
        return Cred::userpass_plaintext(&basic.username, &basic.password);
    }

    if let Some(ssh) = &opts.ssh_auth {
        let user = match username_from_url {
            Some(user) if !user.is_empty() => user.to_string(),
            _ => ssh_user(&opts.repo),
        };
        return Cred::ssh_key(&user, None, &ssh.key_path, ssh.passphrase.as_deref());
    }

    Cred::ssh_key_from_agent(username_from_url.unwrap_or(DEFAULT_SSH_USER))
}
