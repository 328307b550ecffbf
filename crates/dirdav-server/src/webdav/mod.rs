//! WebDAV transport.
//!
//! The protocol itself is handled by `dav-server`; this module wires it to a
//! hyper server (plain or TLS) and a local filesystem backend.
//!
//! # Example
//!
//! ```ignore
//! use dirdav_server::webdav::serve_background;
//! use dirdav_server::ServerConfig;
//!
//! let server = serve_background(ServerConfig::new("/srv").with_port("127.0.0.1:0")).await?;
//! println!("Server running at {}", server.url());
//! server.shutdown();
//! ```

mod filesystem;
mod server;
mod tls;

pub use filesystem::SkipBrokenLinks;
pub use server::{serve, serve_background, DirDavServer};
