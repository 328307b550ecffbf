//! HTTP server loop using hyper.
//!
//! This module binds the listener, optionally terminates TLS, and hands every
//! request to the [`Router`].

use super::tls;
use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::router::Router;
use hyper::rt::{Read, Write};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use log::{debug, error, info, warn};
use std::convert::Infallible;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio_rustls::TlsAcceptor;

/// Handle to a server running in the background.
pub struct DirDavServer {
    /// Server address.
    addr: SocketAddr,
    /// URL scheme, `http` or `https`.
    scheme: &'static str,
    /// Shutdown signal sender.
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl DirDavServer {
    /// Get the server's listen address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get the base URL of the server.
    pub fn url(&self) -> String {
        format!("{}://{}", self.scheme, self.addr)
    }

    /// Shutdown the server.
    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Listener, router and TLS acceptor ready to accept connections.
struct Prepared {
    listener: TcpListener,
    router: Router,
    tls: Option<TlsAcceptor>,
    addr: SocketAddr,
    scheme: &'static str,
}

async fn prepare(config: ServerConfig) -> Result<Prepared> {
    let router = Router::new(config)?;
    let config = router.config();
    let tls = config.tls.as_ref().map(tls::load_acceptor).transpose()?;
    let scheme = config.scheme();
    let addr = config.listen_addr();

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| Error::Bind {
            addr: addr.clone(),
            source,
        })?;
    let addr = listener.local_addr()?;

    Ok(Prepared {
        listener,
        router,
        tls,
        addr,
        scheme,
    })
}

/// Start the server and block until the process exits.
///
/// # Example
///
/// ```ignore
/// use dirdav_server::{webdav::serve, ServerConfig};
///
/// #[tokio::main]
/// async fn main() -> dirdav_server::Result<()> {
///     serve(ServerConfig::new("/srv/share").with_read_only(true)).await
/// }
/// ```
pub async fn serve(config: ServerConfig) -> Result<()> {
    let server = prepare(config).await?;
    let config = server.router.config();

    info!(
        "WebDAV server listening on {}://{}",
        server.scheme, server.addr
    );
    info!("Serving {}", config.root.display());
    info!(
        "Authentication: {}, read-only: {}",
        if config.credentials.is_some() { "basic" } else { "none" },
        config.read_only
    );

    loop {
        match server.listener.accept().await {
            Ok((stream, remote_addr)) => {
                spawn_connection(stream, remote_addr, server.router.clone(), server.tls.clone());
            }
            Err(e) => error!("Accept error: {:?}", e),
        }
    }
}

/// Start the server in the background.
///
/// Returns a handle that can be used to get the server address and shut it down.
pub async fn serve_background(config: ServerConfig) -> Result<DirDavServer> {
    let Prepared {
        listener,
        router,
        tls,
        addr,
        scheme,
    } = prepare(config).await?;

    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

    info!("WebDAV server started on {}://{}", scheme, addr);

    tokio::spawn(async move {
        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, remote_addr)) => {
                            spawn_connection(stream, remote_addr, router.clone(), tls.clone());
                        }
                        Err(e) => {
                            error!("Accept error: {:?}", e);
                        }
                    }
                }
                _ = &mut shutdown_rx => {
                    info!("WebDAV server shutting down");
                    break;
                }
            }
        }
    });

    Ok(DirDavServer {
        addr,
        scheme,
        shutdown_tx: Some(shutdown_tx),
    })
}

fn spawn_connection(
    stream: TcpStream,
    remote_addr: SocketAddr,
    router: Router,
    tls: Option<TlsAcceptor>,
) {
    debug!("Connection from {}", remote_addr);

    tokio::spawn(async move {
        match tls {
            Some(acceptor) => match acceptor.accept(stream).await {
                Ok(stream) => serve_connection(TokioIo::new(stream), router, remote_addr).await,
                Err(e) => warn!("TLS handshake with {} failed: {}", remote_addr, e),
            },
            None => serve_connection(TokioIo::new(stream), router, remote_addr).await,
        }
    });
}

async fn serve_connection<I>(io: I, router: Router, remote_addr: SocketAddr)
where
    I: Read + Write + Unpin + Send + 'static,
{
    let service = service_fn(move |req| {
        let router = router.clone();
        async move { Ok::<_, Infallible>(router.handle(req).await) }
    });

    if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
        error!("Connection error from {}: {:?}", remote_addr, err);
    }
}
