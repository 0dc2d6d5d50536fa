//! Shallow fetch and checkout of a single commit

use crate::core::FetchOptions;
use crate::git::auth;
use anyhow::{Context, Result};
use git2::build::CheckoutBuilder;
use git2::{AutotagOption, Oid, RemoteCallbacks, Repository};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const REMOTE_NAME: &str = "origin";
const DEPTH: i32 = 1;

/// Fetch `opts.sha` from `opts.repo` at depth 1 and check it out into
/// `opts.directory`.
///
/// Four sequential steps, all delegated to libgit2: init the repository, add
/// the remote, fetch a single targeted refspec, check out the commit. The
/// remote must allow requesting commits directly by SHA
/// (`uploadpack.allowReachableSHA1InWant` on Git servers).
pub fn shallow_fetch_sha(opts: &FetchOptions) -> Result<()> {
    let dir = std::path::absolute(&opts.directory)
        .with_context(|| format!("invalid directory: {}", opts.directory.display()))?;

    info!(sha = %opts.sha, dir = %dir.display(), "shallow fetching repository");

    debug!("initializing repository on filesystem");
    let repo = Repository::init(&dir)
        .context("unable to initialize repository, did you specify auth properly?")?;

    debug!(remote = REMOTE_NAME, url = %opts.repo, "creating remote");
    let mut remote = repo.remote(REMOTE_NAME, &opts.repo)?;

    let refspec = format!("+{sha}:refs/remotes/{REMOTE_NAME}/{sha}", sha = opts.sha);

    debug!(
        https = opts.basic_auth.is_some(),
        ssh = opts.ssh_auth.is_some(),
        "configuring auth"
    );
    let mut callbacks = RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, _allowed| {
        auth::credentials(opts, username_from_url)
    });

    // most normal git commands report progress to stderr, indicatif does too
    let progress = (!opts.silent).then(transfer_progress_bar);
    if let Some(pb) = &progress {
        let sideband = pb.clone();
        callbacks.sideband_progress(move |data| {
            let text = String::from_utf8_lossy(data);
            if let Some(line) = text.lines().last() {
                sideband.set_message(line.trim().to_string());
            }
            true
        });
        let transfer = pb.clone();
        callbacks.transfer_progress(move |stats| {
            transfer.set_length(stats.total_objects() as u64);
            transfer.set_position(stats.received_objects() as u64);
            true
        });
    }

    let mut fetch_options = git2::FetchOptions::new();
    fetch_options
        .remote_callbacks(callbacks)
        .depth(DEPTH)
        .download_tags(AutotagOption::None);

    debug!(remote = REMOTE_NAME, url = %opts.repo, %refspec, "fetching ref");
    remote
        .fetch(&[refspec.as_str()], Some(&mut fetch_options), None)
        .context("unable to fetch from remote")?;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    debug!(hash = %opts.sha, "checking out hash");
    let oid = Oid::from_str(&opts.sha)?;
    let commit = repo
        .find_commit(oid)
        .context("commit not present after fetch")?;
    repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))?;
    repo.set_head_detached(oid)?;

    if opts.rm_dotgit {
        remove_dot_git(&dir)?;
    }

    Ok(())
}

fn transfer_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} objects {msg}")
            .unwrap(),
    );
    pb
}

fn remove_dot_git(dir: &Path) -> Result<()> {
    let dot_git = dir.join(".git");
    debug!(path = %dot_git.display(), "removing .git directory");
    fs::remove_dir_all(&dot_git)
        .with_context(|| format!("unable to remove {}", dot_git.display()))
}
