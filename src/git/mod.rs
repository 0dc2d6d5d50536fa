//! git2 plumbing: credential selection and the fetch orchestration

mod auth;
mod fetch;

pub use auth::{ssh_user, DEFAULT_SSH_USER};
pub use fetch::shallow_fetch_sha;
