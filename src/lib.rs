//! Shallow-fetch a single commit from a git repository.
//!
//! For a given repository URL and commit sha, fetch only the objects needed
//! for that commit (depth 1, a single targeted refspec) and check it out into
//! a working directory. All protocol and object plumbing is delegated to
//! libgit2 via the `git2` crate.

pub mod cli;
pub mod core;
pub mod git;

pub use crate::core::{BasicAuth, FetchOptions, SshAuth};
pub use crate::git::{shallow_fetch_sha, ssh_user};
