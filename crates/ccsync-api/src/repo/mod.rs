// GitHub REST API client
//
// Repository listing, contents, commit metadata, and file create/update.
// Endpoint groups live in separate files as inherent methods on
// `RepoClient`; `client.rs` holds the transport mechanics.

mod client;
mod commits;
mod contents;
pub mod models;

pub use client::RepoClient;
pub use models::{CommitInfo, RemoteFile};
