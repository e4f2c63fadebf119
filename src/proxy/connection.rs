//! Per-connection byte shuttle.
//!
//! Every accepted client is paired with an upstream server stream and driven
//! by one cooperative task. The task reads into fixed-capacity rings (never
//! dropping bytes; a full ring simply stops being read), feeds the parser,
//! and forwards only bytes the parser has accounted for, preserving byte and
//! descriptor order per direction. Half-close propagates once the outbound
//! buffer toward the surviving side has drained.

use std::collections::VecDeque;
use std::io;
use std::os::fd::OwnedFd;
use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::gate::Gate;
use super::stream::{MAX_QUEUED_FDS, ProxyStream};
use crate::core::Settings;
use crate::output::Transcript;
use crate::protocol::parser::{ParserState, Phase};

/// Capacity of each direction's receive ring.
pub const BUFFER_SIZE: usize = 64 * 1024;

/// One direction's ring: received bytes, how many of them the parser has
/// approved for forwarding, and the message boundaries inside the approved
/// span (kept only for interactive gating).
struct TrafficBuf {
    data: BytesMut,
    ignore: usize,
    boundaries: VecDeque<usize>,
}

impl TrafficBuf {
    fn new() -> Self {
        Self {
            data: BytesMut::with_capacity(BUFFER_SIZE),
            ignore: 0,
            boundaries: VecDeque::new(),
        }
    }

    fn room(&self) -> usize {
        if self.data.len() < BUFFER_SIZE {
            BUFFER_SIZE - self.data.len()
        } else if self.data.len() > self.ignore {
            // The tail is an incomplete message (a big request can exceed
            // the ring); keep reading so the parser can ever finish it.
            // Fully-approved backlog gets no extra room: that is the
            // backpressure path.
            BUFFER_SIZE
        } else {
            0
        }
    }

    /// Bytes cleared for forwarding right now.
    fn forwardable(&self) -> usize {
        self.ignore.min(self.data.len())
    }

    fn consume(&mut self, n: usize) {
        self.data.advance(n);
        self.ignore -= n;
    }
}

pub struct Connection {
    id: u32,
    from: String,
    client: Option<ProxyStream>,
    server: Option<ProxyStream>,
    /// Client-to-server traffic.
    client_buf: TrafficBuf,
    /// Server-to-client traffic.
    server_buf: TrafficBuf,
    client_fdq: VecDeque<OwnedFd>,
    server_fdq: VecDeque<OwnedFd>,
    parser: ParserState,
    transcript: Arc<Transcript>,
    settings: Arc<Settings>,
    gate: Option<Arc<Gate>>,
    /// Bytes of the currently released message not yet sent (interactive).
    release_remaining: usize,
}

async fn readable_opt(stream: &Option<ProxyStream>) -> io::Result<()> {
    match stream {
        Some(stream) => stream.readable().await,
        None => std::future::pending().await,
    }
}

async fn writable_opt(stream: &Option<ProxyStream>) -> io::Result<()> {
    match stream {
        Some(stream) => stream.writable().await,
        None => std::future::pending().await,
    }
}

async fn gate_changed(gate: &Option<Arc<Gate>>) {
    match gate {
        Some(gate) => gate.changed().await,
        None => std::future::pending().await,
    }
}

impl Connection {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: u32,
        client: ProxyStream,
        server: ProxyStream,
        from: String,
        settings: Arc<Settings>,
        transcript: Arc<Transcript>,
        gate: Option<Arc<Gate>>,
        prefetched_atoms: &[String],
    ) -> Self {
        let mut parser = ParserState::new(id, settings.denyextensions, settings.verbose);
        if !prefetched_atoms.is_empty() {
            parser.seed_fetched_atoms(prefetched_atoms);
        }
        Self {
            id,
            from,
            client: Some(client),
            server: Some(server),
            client_buf: TrafficBuf::new(),
            server_buf: TrafficBuf::new(),
            client_fdq: VecDeque::new(),
            server_fdq: VecDeque::new(),
            parser,
            transcript,
            settings,
            gate,
            release_remaining: 0,
        }
    }

    /// Drive the connection until both sides have closed, then report back.
    pub async fn run(mut self, cancel: CancellationToken, done: mpsc::UnboundedSender<u32>) {
        info!("connection {}: client {}", self.id, self.from);
        loop {
            self.propagate_half_close();
            if self.client.is_none() && self.server.is_none() {
                break;
            }

            let parsing = !matches!(self.parser.phase(), Phase::Failed);
            let client_read = self.client.is_some()
                && parsing
                && self.client_buf.room() > 0
                && self.client_fdq.len() < MAX_QUEUED_FDS;
            let server_read = self.server.is_some()
                && parsing
                && self.server_buf.room() > 0
                && self.server_fdq.len() < MAX_QUEUED_FDS;

            let server_budget = self.server_write_budget();
            let server_write = self.server.is_some() && server_budget > 0;
            let client_budget = self.server_buf.forwardable();
            let client_write = self.client.is_some() && client_budget > 0;

            // With everything quiet and the gate shut, wake on new permits.
            let gate_blocked = self.gate.is_some()
                && self.server.is_some()
                && server_budget == 0
                && self.release_remaining == 0
                && !self.client_buf.boundaries.is_empty();

            if !client_read && !server_read && !server_write && !client_write && !gate_blocked {
                // Nothing can make progress until a peer closes; wait for
                // whichever side is still open to become readable (EOF).
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = readable_opt(&self.client), if self.client.is_some() => self.read_client(),
                    _ = readable_opt(&self.server), if self.server.is_some() => self.read_server(),
                }
                continue;
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = readable_opt(&self.client), if client_read => self.read_client(),
                _ = readable_opt(&self.server), if server_read => self.read_server(),
                _ = writable_opt(&self.server), if server_write => self.write_server(server_budget),
                _ = writable_opt(&self.client), if client_write => self.write_client(client_budget),
                _ = gate_changed(&self.gate), if gate_blocked => {}
            }
        }
        self.teardown();
        let _ = done.send(self.id);
    }

    /// Close a side once the other is gone and everything owed to it has
    /// been delivered; discard traffic that can no longer reach anyone.
    fn propagate_half_close(&mut self) {
        if self.client.is_none() && self.server.is_some() {
            let stranded = self.server_buf.forwardable();
            if stranded > 0 {
                self.transcript.notice(
                    self.id,
                    &format!("discarded last answer of {} bytes", stranded),
                );
                self.server_buf.consume(stranded);
            }
            // An incomplete request can never be completed now.
            let approved = self.client_buf.forwardable();
            self.client_buf.data.truncate(approved);
            if self.client_buf.data.is_empty() && self.client_fdq.is_empty() {
                self.server = None;
                if self.settings.readwritedebug {
                    self.transcript.line(self.id, '<', "sent EOF");
                }
            }
        }
        if self.server.is_none() && self.client.is_some() {
            let stranded = self.client_buf.forwardable();
            if stranded > 0 {
                self.transcript.notice(
                    self.id,
                    &format!("discarding last request of {} bytes", stranded),
                );
                self.client_buf.consume(stranded);
            }
            // An incomplete answer can never be completed now.
            let approved = self.server_buf.forwardable();
            self.server_buf.data.truncate(approved);
            if self.server_buf.data.is_empty() && self.server_fdq.is_empty() {
                self.client = None;
                if self.settings.readwritedebug {
                    self.transcript.line(self.id, '>', "sent EOF");
                }
            }
        }
        // A failed connection forwards what was already approved, nothing more.
        if matches!(self.parser.phase(), Phase::Failed)
            && self.client_buf.forwardable() == 0
            && self.server_buf.forwardable() == 0
        {
            self.client = None;
            self.server = None;
        }
    }

    /// Forwardable client bytes, clipped to whole released messages when the
    /// interactive gate is in play.
    fn server_write_budget(&mut self) -> usize {
        let approved = self.client_buf.forwardable();
        let Some(gate) = &self.gate else {
            return approved;
        };
        if self.release_remaining == 0 {
            if let Some(&next) = self.client_buf.boundaries.front() {
                if gate.try_consume() {
                    self.client_buf.boundaries.pop_front();
                    self.release_remaining = next;
                }
            }
        }
        approved.min(self.release_remaining)
    }

    fn read_client(&mut self) {
        let Some(client) = &self.client else { return };
        let mut chunk = vec![0u8; self.client_buf.room().max(1)];
        match client.try_read_with_fds(&mut chunk, &mut self.client_fdq) {
            Ok(0) => {
                if self.settings.readwritedebug {
                    self.transcript.line(self.id, '<', "got EOF");
                }
                self.client = None;
            }
            Ok(n) => {
                if self.settings.readwritedebug {
                    self.transcript
                        .line(self.id, '<', &format!("received {} bytes", n));
                }
                self.client_buf.data.extend_from_slice(&chunk[..n]);
                self.drive_client_parser();
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {}
            Err(e) => {
                warn!("connection {}: error reading from client: {}", self.id, e);
                self.client = None;
            }
        }
    }

    fn read_server(&mut self) {
        let Some(server) = &self.server else { return };
        let mut chunk = vec![0u8; self.server_buf.room().max(1)];
        match server.try_read_with_fds(&mut chunk, &mut self.server_fdq) {
            Ok(0) => {
                if self.settings.readwritedebug {
                    self.transcript.line(self.id, '>', "got EOF");
                }
                self.server = None;
            }
            Ok(n) => {
                if self.settings.readwritedebug {
                    self.transcript
                        .line(self.id, '>', &format!("received {} bytes", n));
                }
                self.server_buf.data.extend_from_slice(&chunk[..n]);
                self.drive_server_parser();
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {}
            Err(e) => {
                warn!("connection {}: error reading from server: {}", self.id, e);
                self.server = None;
            }
        }
    }

    fn drive_client_parser(&mut self) {
        let start = self.client_buf.ignore;
        if start >= self.client_buf.data.len() {
            return;
        }
        let parsed = self
            .parser
            .parse_client(&self.client_buf.data[start..], &self.transcript);
        self.client_buf.ignore += parsed.consumed;
        if self.gate.is_some() {
            self.client_buf.boundaries.extend(parsed.boundaries);
        }
    }

    fn drive_server_parser(&mut self) {
        let start = self.server_buf.ignore;
        if start >= self.server_buf.data.len() {
            return;
        }
        let consumed = self
            .parser
            .parse_server(&mut self.server_buf.data[start..], &self.transcript);
        self.server_buf.ignore += consumed;
    }

    fn write_server(&mut self, budget: usize) {
        let Some(server) = &self.server else { return };
        match server.try_write_with_fds(&self.client_buf.data[..budget], &mut self.client_fdq) {
            Ok(n) => {
                if self.settings.readwritedebug {
                    self.transcript
                        .line(self.id, '<', &format!("wrote {} bytes", n));
                }
                self.client_buf.consume(n);
                if self.gate.is_some() {
                    self.release_remaining = self.release_remaining.saturating_sub(n);
                }
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {}
            Err(e) => {
                warn!("connection {}: error writing to server: {}", self.id, e);
                self.server = None;
            }
        }
    }

    fn write_client(&mut self, budget: usize) {
        let Some(client) = &self.client else { return };
        match client.try_write_with_fds(&self.server_buf.data[..budget], &mut self.server_fdq) {
            Ok(n) => {
                if self.settings.readwritedebug {
                    self.transcript
                        .line(self.id, '>', &format!("wrote {} bytes", n));
                }
                self.server_buf.consume(n);
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {}
            Err(e) => {
                warn!("connection {}: error writing to client: {}", self.id, e);
                self.client = None;
            }
        }
    }

    fn teardown(&mut self) {
        self.client = None;
        self.server = None;
        // Dropping an OwnedFd closes it; nothing leaks past this point.
        let pending = self.client_fdq.len() + self.server_fdq.len();
        if pending > 0 {
            debug!("connection {}: closing {} queued fds", self.id, pending);
        }
        self.client_fdq.clear();
        self.server_fdq.clear();
        if !matches!(self.parser.phase(), Phase::Failed) {
            self.parser.set_closed();
        }
        info!("connection {}: closed", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::UnixStream;

    fn minimal_client_setup() -> Vec<u8> {
        let mut buf = vec![b'l', 0];
        buf.extend_from_slice(&11u16.to_le_bytes());
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.extend_from_slice(&0u16.to_le_bytes());
        buf.extend_from_slice(&[0, 0]);
        buf
    }

    fn spawn_connection(
        gate: Option<Arc<Gate>>,
    ) -> (
        UnixStream,
        UnixStream,
        CancellationToken,
        mpsc::UnboundedReceiver<u32>,
    ) {
        let (client_ours, client_theirs) = UnixStream::pair().unwrap();
        let (server_ours, server_theirs) = UnixStream::pair().unwrap();
        let settings = Arc::new(Settings::default());
        let transcript = Arc::new(Transcript::open(&settings).unwrap());
        let conn = Connection::new(
            1,
            ProxyStream::Unix(client_ours),
            ProxyStream::Unix(server_ours),
            "test".to_string(),
            settings,
            transcript,
            gate,
            &[],
        );
        let cancel = CancellationToken::new();
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(conn.run(cancel.clone(), tx));
        (client_theirs, server_theirs, cancel, rx)
    }

    #[tokio::test]
    async fn forwards_setup_bytes_verbatim() {
        let (mut client, mut server, _cancel, _rx) = spawn_connection(None);

        let setup = minimal_client_setup();
        client.write_all(&setup).await.unwrap();

        let mut received = vec![0u8; setup.len()];
        server.read_exact(&mut received).await.unwrap();
        assert_eq!(received, setup, "bytes must arrive unmodified");
    }

    #[tokio::test]
    async fn half_close_drains_then_closes_client() {
        let (mut client, server, _cancel, mut rx) = spawn_connection(None);

        let setup = minimal_client_setup();
        client.write_all(&setup).await.unwrap();

        // Server closes without answering; the client side must see EOF and
        // the connection must finish.
        drop(server);
        let mut rest = Vec::new();
        client.read_to_end(&mut rest).await.unwrap();
        let closed_id = rx.recv().await.unwrap();
        assert_eq!(closed_id, 1);
    }

    #[tokio::test]
    async fn gate_holds_requests_until_released() {
        let gate = Gate::new();
        let (mut client, mut server, _cancel, _rx) = spawn_connection(Some(Arc::clone(&gate)));

        let setup = minimal_client_setup();
        client.write_all(&setup).await.unwrap();

        // Gate is shut: nothing may reach the server yet.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let mut probe = [0u8; 12];
        let pending = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            server.read_exact(&mut probe),
        )
        .await;
        assert!(pending.is_err(), "no bytes may pass before a release");

        // One release lets exactly the one message through.
        gate.release(1);
        server.read_exact(&mut probe).await.unwrap();
        assert_eq!(probe.to_vec(), setup);
    }
}
