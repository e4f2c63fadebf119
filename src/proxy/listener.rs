//! Proxy listener and upstream connector.
//!
//! One listening socket is bound for the proxy display (TCP on
//! `6000 + display`, or a Unix socket under `/tmp/.X11-unix`). Each accepted
//! client gets its own upstream connection to the real server, opened on
//! demand. TCP sockets enable keep-alive; the Unix socket file is unlinked
//! when the listener goes away.

use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpSocket, UnixListener, UnixStream};
use tracing::info;

use super::display::{DisplayInfo, Family};
use super::stream::ProxyStream;
use crate::{Error, Result};

const MAX_PENDING_CONNECTIONS: u32 = 20;

/// The proxy's listening socket.
pub enum Listener {
    Tcp(TcpListener),
    Unix {
        listener: UnixListener,
        path: std::path::PathBuf,
    },
}

impl Listener {
    /// Bind the listening socket for the proxy display.
    pub fn bind(disp: &DisplayInfo) -> Result<Self> {
        match disp.family {
            Family::Tcp => {
                let addr: SocketAddr = ([0, 0, 0, 0], disp.port()).into();
                let socket = TcpSocket::new_v4()?;
                socket.set_reuseaddr(true)?;
                socket.set_keepalive(true)?;
                socket.bind(addr).map_err(|e| {
                    Error::Setup(format!("could not bind {} for '{}': {}", addr, disp.name, e))
                })?;
                let listener = socket.listen(MAX_PENDING_CONNECTIONS)?;
                info!("listening on {} for display '{}'", addr, disp.name);
                Ok(Listener::Tcp(listener))
            }
            Family::Unix => {
                let path = disp.socket_path();
                // A stale socket file from an earlier run would fail the bind.
                let _ = std::fs::remove_file(&path);
                let listener = UnixListener::bind(&path).map_err(|e| {
                    Error::Setup(format!(
                        "could not bind unix socket {} for '{}': {}",
                        path.display(),
                        disp.name,
                        e
                    ))
                })?;
                info!(
                    "listening on {} for display '{}'",
                    path.display(),
                    disp.name
                );
                Ok(Listener::Unix { listener, path })
            }
        }
    }

    /// Accept one client. Returns the stream and a human label of its origin
    /// (`address:port`, socket path, or `unknown(local)`).
    pub async fn accept(&self) -> std::io::Result<(ProxyStream, String)> {
        match self {
            Listener::Tcp(listener) => {
                let (stream, addr) = listener.accept().await?;
                Ok((ProxyStream::Tcp(stream), addr.to_string()))
            }
            Listener::Unix { listener, .. } => {
                let (stream, addr) = listener.accept().await?;
                let from = addr
                    .as_pathname()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "unknown(local)".to_string());
                Ok((ProxyStream::Unix(stream), from))
            }
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Listener::Unix { path, .. } = self {
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Open one upstream connection to the real X server.
pub async fn connect_upstream(display: &DisplayInfo) -> Result<ProxyStream> {
    match display.family {
        Family::Tcp => {
            let port = display.port();
            let mut addrs = tokio::net::lookup_host((display.hostname.as_str(), port))
                .await
                .map_err(|e| {
                    Error::Setup(format!(
                        "could not resolve '{}' from '{}': {}",
                        display.hostname, display.name, e
                    ))
                })?;
            let addr = addrs.next().ok_or_else(|| {
                Error::Setup(format!(
                    "no addresses for '{}' from '{}'",
                    display.hostname, display.name
                ))
            })?;
            let socket = match addr {
                SocketAddr::V4(_) => TcpSocket::new_v4()?,
                SocketAddr::V6(_) => TcpSocket::new_v6()?,
            };
            socket.set_keepalive(true)?;
            let stream = socket.connect(addr).await.map_err(|e| {
                Error::Setup(format!("could not connect to '{}': {}", display.name, e))
            })?;
            Ok(ProxyStream::Tcp(stream))
        }
        Family::Unix => {
            let path = display.socket_path();
            let stream = UnixStream::connect(&path).await.map_err(|e| {
                Error::Setup(format!(
                    "could not connect to unix socket {} for '{}': {}",
                    path.display(),
                    display.name,
                    e
                ))
            })?;
            Ok(ProxyStream::Unix(stream))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unix_listener_creates_and_removes_socket_file() {
        let dir = std::env::temp_dir().join(format!("xsnoop-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("X77");

        // Point a DisplayInfo at a private path by building the listener by hand.
        let listener = UnixListener::bind(&path).unwrap();
        let wrapped = Listener::Unix {
            listener,
            path: path.clone(),
        };
        assert!(path.exists());
        drop(wrapped);
        assert!(!path.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn tcp_listener_accepts_clients() {
        // Bind an ephemeral listener directly; the display-derived port may
        // be taken on the test machine.
        let listener = Listener::Tcp(TcpListener::bind("127.0.0.1:0").await.unwrap());
        let addr = match &listener {
            Listener::Tcp(l) => l.local_addr().unwrap(),
            _ => unreachable!(),
        };
        let client = tokio::net::TcpStream::connect(addr);
        let (accepted, client) = tokio::join!(listener.accept(), client);
        let (_, from) = accepted.unwrap();
        let client = client.unwrap();
        assert_eq!(from, client.local_addr().unwrap().to_string());
    }
}
