//! Core option types for the fetch

mod options;

pub use options::{BasicAuth, FetchOptions, SshAuth, TOKEN_USERNAME};
