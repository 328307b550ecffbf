//! Per-request dispatch.
//!
//! Order: authentication, read-only guard, directory listing (GET only),
//! then the WebDAV handler with the original request.

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::listing::{DirectoryListing, ListingOutcome};
use crate::policy::{Authenticator, ReadOnlyGuard};
use crate::webdav::SkipBrokenLinks;
use bytes::Buf;
use dav_server::body::Body;
use dav_server::fs::DavFileSystem;
use dav_server::localfs::LocalFs;
use dav_server::memls::MemLs;
use dav_server::DavHandler;
use hyper::body::Body as HttpBody;
use hyper::{Method, Request, Response};
use log::debug;
use std::error::Error as StdError;
use std::sync::Arc;

/// Top-level request handler. Cheap to clone.
#[derive(Clone)]
pub struct Router {
    inner: Arc<RouterInner>,
}

struct RouterInner {
    config: ServerConfig,
    authenticator: Authenticator,
    guard: ReadOnlyGuard,
    listing: DirectoryListing,
    dav: DavHandler,
}

impl Router {
    /// Create a router serving `config.root` from the local disk.
    pub fn new(config: ServerConfig) -> Result<Self> {
        if !config.root.is_dir() {
            return Err(Error::RootNotFound(config.root.clone()));
        }
        let fs = SkipBrokenLinks::new(*LocalFs::new(&config.root, false, false, false));
        Ok(Self::with_filesystem(config, fs))
    }

    /// Create a router over any `DavFileSystem`.
    pub fn with_filesystem<F>(config: ServerConfig, fs: F) -> Self
    where
        F: DavFileSystem + Clone + Send + Sync + 'static,
    {
        let dav = DavHandler::builder()
            .filesystem(Box::new(fs.clone()))
            .locksystem(MemLs::new())
            .build_handler();

        Self {
            inner: Arc::new(RouterInner {
                authenticator: Authenticator::new(config.credentials.clone()),
                guard: ReadOnlyGuard::new(config.read_only),
                listing: DirectoryListing::new(Arc::new(fs), config.show_hidden),
                dav,
                config,
            }),
        }
    }

    /// The configuration this router was built with.
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Handle one request.
    pub async fn handle<B, D, E>(&self, req: Request<B>) -> Response<Body>
    where
        B: HttpBody<Data = D, Error = E> + Send + 'static,
        D: Buf + Send + 'static,
        E: StdError + Send + Sync + 'static,
    {
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let res = self.dispatch(req).await;

        debug!("{} {} -> {}", method, path, res.status().as_u16());
        res
    }

    async fn dispatch<B, D, E>(&self, req: Request<B>) -> Response<Body>
    where
        B: HttpBody<Data = D, Error = E> + Send + 'static,
        D: Buf + Send + 'static,
        E: StdError + Send + Sync + 'static,
    {
        let inner = &self.inner;

        if let Some(res) = inner.authenticator.check(req.headers()).into_response() {
            return res;
        }
        if let Some(res) = inner.guard.check(req.method()).into_response() {
            return res;
        }

        if req.method() == Method::GET {
            let path = req.uri().path().to_owned();
            if let ListingOutcome::Handled(res) = inner.listing.handle(&path).await {
                return res;
            }
        }

        inner.dav.handle(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_root_is_rejected() {
        let temp = TempDir::new().unwrap();
        let config = ServerConfig::new(temp.path().join("missing"));
        assert!(matches!(Router::new(config), Err(Error::RootNotFound(_))));
    }

    #[test]
    fn file_root_is_rejected() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        std::fs::write(&file, b"x").unwrap();
        assert!(matches!(
            Router::new(ServerConfig::new(file)),
            Err(Error::RootNotFound(_))
        ));
    }
}
