// ccsync-api: Async Rust clients for the Catalyst Center and GitHub REST APIs

pub mod controller;
pub mod error;
pub mod lookup;
pub mod repo;
pub mod transport;

pub use controller::ControllerClient;
pub use error::Error;
pub use lookup::Lookup;
pub use repo::RepoClient;
pub use transport::{TlsMode, TransportConfig};
