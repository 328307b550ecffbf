//! # dirdav-server
//!
//! Serve a directory over WebDAV.
//!
//! This crate provides:
//! - Optional HTTP Basic authentication
//! - Read-only mode rejecting every write method
//! - Generated HTML indexes for plain `GET` requests on directories
//! - Plain HTTP or TLS transport
//!
//! Everything else (PROPFIND, PUT, MKCOL, LOCK, ...) is answered by
//! `dav-server` against the local filesystem.
//!
//! ## Example
//!
//! ```ignore
//! use dirdav_server::{webdav, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> dirdav_server::Result<()> {
//!     let config = ServerConfig::new("/srv/share")
//!         .with_port("8080")
//!         .with_credentials("alice", "secret")
//!         .with_read_only(true);
//!
//!     // Blocks until the process exits
//!     webdav::serve(config).await
//! }
//! ```

mod config;
mod error;
pub mod listing;
pub mod policy;
mod response;
pub mod router;
pub mod webdav;

pub use config::{
    Credentials, ServerConfig, Settings, TlsConfig, DEFAULT_CERT_FILE, DEFAULT_KEY_FILE,
    DEFAULT_PORT,
};
pub use error::{Error, Result};
pub use listing::{DirectoryListing, ListingOutcome};
pub use policy::{AccessDecision, Authenticator, ReadOnlyGuard};
pub use router::Router;
