//! Stream abstraction over the proxy's two socket families.
//!
//! TCP streams move bytes only. Unix-domain streams additionally carry file
//! descriptors as SCM_RIGHTS ancillary data; reads drain them into the
//! connection's bounded queue and writes push queued descriptors onward,
//! closing them locally once sent.

use std::collections::VecDeque;
use std::io::{self, IoSlice, IoSliceMut};
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};

use nix::sys::socket::{ControlMessage, ControlMessageOwned, MsgFlags, recvmsg, sendmsg};
use tokio::io::Interest;
use tokio::net::{TcpStream, UnixStream};
use tracing::warn;

/// Upper bound on descriptors parked per direction.
pub const MAX_QUEUED_FDS: usize = 16;

/// One side of a proxied connection.
pub enum ProxyStream {
    Tcp(TcpStream),
    Unix(UnixStream),
}

impl ProxyStream {
    pub async fn readable(&self) -> io::Result<()> {
        match self {
            ProxyStream::Tcp(s) => s.readable().await,
            ProxyStream::Unix(s) => s.readable().await,
        }
    }

    pub async fn writable(&self) -> io::Result<()> {
        match self {
            ProxyStream::Tcp(s) => s.writable().await,
            ProxyStream::Unix(s) => s.writable().await,
        }
    }

    /// Non-blocking read; Unix streams also drain SCM_RIGHTS descriptors
    /// into `fdq`. Returns `Ok(0)` on EOF (or truncated ancillary data, which
    /// cannot be recovered from).
    pub fn try_read_with_fds(
        &self,
        buf: &mut [u8],
        fdq: &mut VecDeque<OwnedFd>,
    ) -> io::Result<usize> {
        match self {
            ProxyStream::Tcp(s) => s.try_read(buf),
            ProxyStream::Unix(s) => s.try_io(Interest::READABLE, || {
                let fd = s.as_raw_fd();
                let mut iov = [IoSliceMut::new(buf)];
                let mut cmsg_space = nix::cmsg_space!([std::os::fd::RawFd; MAX_QUEUED_FDS]);
                let msg = recvmsg::<()>(
                    fd,
                    &mut iov,
                    Some(&mut cmsg_space),
                    MsgFlags::MSG_CMSG_CLOEXEC,
                )
                .map_err(io::Error::from)?;

                // Truncated ancillary data means the peer sent more
                // descriptors than the queue can hold; the stream cannot be
                // trusted past this point.
                if msg.flags.intersects(MsgFlags::MSG_TRUNC | MsgFlags::MSG_CTRUNC) {
                    return Ok(0);
                }
                let received = msg.bytes;
                let cmsgs: Vec<ControlMessageOwned> = match msg.cmsgs() {
                    Ok(iter) => iter.collect(),
                    Err(_) => Vec::new(),
                };
                for cmsg in cmsgs {
                    if let ControlMessageOwned::ScmRights(fds) = cmsg {
                        for raw in fds {
                            // SAFETY: the kernel just handed us ownership.
                            fdq.push_back(unsafe { OwnedFd::from_raw_fd(raw) });
                        }
                    }
                }
                Ok(received)
            }),
        }
    }

    /// Non-blocking write; Unix streams attach every queued descriptor as
    /// SCM_RIGHTS and close the local copies once the send succeeds.
    pub fn try_write_with_fds(
        &self,
        buf: &[u8],
        fdq: &mut VecDeque<OwnedFd>,
    ) -> io::Result<usize> {
        match self {
            ProxyStream::Tcp(s) => {
                if !fdq.is_empty() {
                    // Descriptors cannot cross a TCP link; dropping closes them.
                    warn!("discarding {} queued fds on TCP stream", fdq.len());
                    fdq.clear();
                }
                s.try_write(buf)
            }
            ProxyStream::Unix(s) => s.try_io(Interest::WRITABLE, || {
                let fd = s.as_raw_fd();
                let iov = [IoSlice::new(buf)];
                let raw_fds: Vec<std::os::fd::RawFd> =
                    fdq.iter().map(|owned| owned.as_raw_fd()).collect();
                let cmsgs = if raw_fds.is_empty() {
                    Vec::new()
                } else {
                    vec![ControlMessage::ScmRights(&raw_fds)]
                };
                let sent =
                    sendmsg::<()>(fd, &iov, &cmsgs, MsgFlags::empty(), None).map_err(io::Error::from)?;
                // Sent descriptors live on in the peer; close our copies.
                fdq.clear();
                Ok(sent)
            }),
        }
    }

    /// Human label of the peer, for transcripts and logs.
    pub fn peer_label(&self) -> String {
        match self {
            ProxyStream::Tcp(s) => s
                .peer_addr()
                .map(|addr| addr.to_string())
                .unwrap_or_else(|_| "unknown(tcp)".to_string()),
            ProxyStream::Unix(s) => match s.peer_addr() {
                Ok(addr) => match addr.as_pathname() {
                    Some(path) => path.display().to_string(),
                    None => "unknown(local)".to_string(),
                },
                Err(_) => "unknown(local)".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::fd::IntoRawFd;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn tcp_round_trip_moves_bytes() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let client = TcpStream::connect(addr).await.unwrap();
        let (mut accepted, _) = listener.accept().await.unwrap();

        accepted.write_all(b"hello").await.unwrap();
        accepted.flush().await.unwrap();

        let stream = ProxyStream::Tcp(client);
        let mut fdq = VecDeque::new();
        let mut buf = [0u8; 16];
        stream.readable().await.unwrap();
        let n = stream.try_read_with_fds(&mut buf, &mut fdq).unwrap();
        assert_eq!(&buf[..n], b"hello");
        assert!(fdq.is_empty());
    }

    #[tokio::test]
    async fn unix_stream_forwards_fds() {
        let (left, right) = UnixStream::pair().unwrap();
        let sender = ProxyStream::Unix(left);
        let receiver = ProxyStream::Unix(right);

        // Queue a pipe read end for forwarding.
        let (pipe_read, _pipe_write) = nix::unistd::pipe().unwrap();
        let mut out_fdq = VecDeque::new();
        out_fdq.push_back(pipe_read);

        sender.writable().await.unwrap();
        let sent = sender.try_write_with_fds(b"x", &mut out_fdq).unwrap();
        assert_eq!(sent, 1);
        assert!(out_fdq.is_empty(), "sent fds are closed locally");

        let mut in_fdq = VecDeque::new();
        let mut buf = [0u8; 4];
        receiver.readable().await.unwrap();
        let n = receiver.try_read_with_fds(&mut buf, &mut in_fdq).unwrap();
        assert_eq!(n, 1);
        assert_eq!(in_fdq.len(), 1);
        let fd = in_fdq.pop_front().unwrap();
        assert!(fd.into_raw_fd() >= 0);
    }
}
