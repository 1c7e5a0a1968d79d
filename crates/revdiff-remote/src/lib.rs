//! Remote revision gateway for revdiff.
//!
//! Abstracts the two capabilities the comparison core needs from a remote
//! repository host: listing files changed between two revisions, and fetching
//! a file's content at a revision.
//!
//! - [`RevisionGateway`] -- the async gateway trait
//! - [`HttpGateway`] -- Bitbucket Server REST implementation over `reqwest`
//! - [`InMemoryGateway`] -- deterministic implementation for tests and embedders
//! - [`RemoteConfig`] -- explicit connection configuration

pub mod config;
pub mod endpoint;
pub mod error;
pub mod gateway;
pub mod http;
pub mod memory;

pub use config::{AuthMethod, ChangeListing, RemoteConfig, DEFAULT_PAGE_LIMIT};
pub use error::{GatewayError, GatewayResult};
pub use gateway::RevisionGateway;
pub use http::HttpGateway;
pub use memory::InMemoryGateway;
