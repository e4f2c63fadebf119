//! Per-connection protocol state and the top-level parse driver.
//!
//! One [`ParserState`] lives inside each proxied connection. It tracks the
//! handshake phase, the client's byte order, the 16-bit request sequence
//! counter, the stash of request context awaiting reply correlation, the
//! per-connection atom cache, and whether BIG-REQUESTS is active. The parse
//! entry points walk a buffer one complete message at a time and emit each
//! message to the transcript; bytes they account for become eligible for
//! forwarding.

use std::collections::HashMap;
use std::collections::VecDeque;
use std::time::Instant;

use tracing::{debug, warn};

use super::ParseError;
use super::atoms::AtomTable;
use super::decode::{self, Member};
use super::endian::{ByteOrder, ByteReader};
use super::events::ENCODING_SIZE;
use super::requests::{self, BIG_REQUESTS_ENABLE, opcode};
use super::setup::{self, ServerSetup};
use crate::output::{EntryInfo, Transcript};

/// Lifecycle of a proxied connection.
///
/// Transitions run strictly forward: `Unestablished` to (optionally)
/// `Authentication` to `Open`, ending in `Closed` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unestablished,
    Authentication,
    Open,
    Closed,
    Failed,
}

/// Requests whose replies never arrived are pruned past this depth.
const PENDING_REPLY_LIMIT: usize = 4096;

/// Context stashed when a request is parsed whose reply must be correlated
/// back to the request's input.
#[derive(Debug, Clone)]
enum Stash {
    /// InternAtom: the name being interned.
    AtomName(Vec<u8>),
    /// GetAtomName: the atom id being resolved.
    AtomId(u32),
    /// QueryExtension: the extension name being probed.
    ExtensionName(Vec<u8>),
    /// ListFontsWithInfo: the pattern; survives the whole reply series.
    FontPattern(Vec<u8>),
}

#[derive(Debug, Clone, Copy)]
struct PendingRequest {
    sequence: u16,
    major: u8,
    /// True when this was the BIG-REQUESTS Enable request.
    big_req_enable: bool,
}

/// Result of one [`ParserState::parse_client`] call.
#[derive(Debug, Default)]
pub struct ClientParse {
    /// Bytes accounted for; they may now be forwarded.
    pub consumed: usize,
    /// Size of each message inside `consumed`, for per-message gating.
    pub boundaries: Vec<usize>,
}

/// Per-connection protocol state.
pub struct ParserState {
    conn_id: u32,
    phase: Phase,
    order: ByteOrder,
    client_setup_seen: bool,
    sequence: u16,
    atoms: AtomTable,
    stashed: HashMap<u16, Stash>,
    pending: VecDeque<PendingRequest>,
    big_requests_active: bool,
    big_requests_opcode: Option<u8>,
    denyextensions: bool,
    verbose: bool,
    start: Instant,
}

impl ParserState {
    pub fn new(conn_id: u32, denyextensions: bool, verbose: bool) -> Self {
        Self {
            conn_id,
            phase: Phase::Unestablished,
            // Provisional until the setup byte arrives.
            order: ByteOrder::Lsb,
            client_setup_seen: false,
            sequence: 0,
            atoms: AtomTable::new(),
            stashed: HashMap::new(),
            pending: VecDeque::new(),
            big_requests_active: false,
            big_requests_opcode: None,
            denyextensions,
            verbose,
            start: Instant::now(),
        }
    }

    /// Seed atom names fetched from the server above the predefined range.
    pub fn seed_fetched_atoms(&mut self, names: &[String]) {
        self.atoms.seed_fetched(names);
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_closed(&mut self) {
        self.phase = Phase::Closed;
    }

    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    pub fn big_requests_active(&self) -> bool {
        self.big_requests_active
    }

    pub fn atoms(&self) -> &AtomTable {
        &self.atoms
    }

    pub fn stashed_len(&self) -> usize {
        self.stashed.len()
    }

    /// Milliseconds since this connection was accepted.
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn entry(&self, marker: char, sequence: Option<u16>) -> EntryInfo {
        EntryInfo {
            conn_id: self.conn_id,
            marker,
            sequence,
            elapsed_ms: Some(self.elapsed_ms()),
        }
    }

    fn next_sequence(&mut self) -> u16 {
        let seq = self.sequence;
        self.sequence = self.sequence.wrapping_add(1);
        seq
    }

    fn protocol_error(&mut self, marker: char, error: &ParseError, transcript: &Transcript) {
        warn!(
            "connection {}: protocol parse error ({}): {}",
            self.conn_id, marker, error
        );
        transcript.notice(self.conn_id, &format!("parse error, failing connection: {}", error));
        self.phase = Phase::Failed;
    }

    /// Parse as many complete client messages as the buffer holds.
    ///
    /// Hard errors put the connection in [`Phase::Failed`]; bytes already
    /// accounted for stay accounted for.
    pub fn parse_client(&mut self, buf: &[u8], transcript: &Transcript) -> ClientParse {
        let mut result = ClientParse::default();
        loop {
            let rest = &buf[result.consumed..];
            if rest.is_empty() {
                break;
            }
            match self.phase {
                Phase::Unestablished => {
                    if self.client_setup_seen {
                        // Wait for the server's verdict before reading more.
                        break;
                    }
                    match setup::parse_client_setup(rest) {
                        Ok(client_setup) => {
                            self.order = client_setup.order;
                            self.client_setup_seen = true;
                            let seq = self.next_sequence();
                            let info = self.entry('<', Some(seq));
                            transcript.message(&info, "ConnectionSetup", &client_setup.members);
                            result.consumed += client_setup.total;
                            result.boundaries.push(client_setup.total);
                        }
                        Err(ParseError::NeedMoreData) => break,
                        Err(e) => {
                            self.protocol_error('<', &e, transcript);
                            break;
                        }
                    }
                }
                Phase::Authentication => {
                    // The negotiation payload has no specified encoding; it
                    // is forwarded verbatim.
                    result.boundaries.push(rest.len());
                    result.consumed += rest.len();
                    break;
                }
                Phase::Open => match self.parse_one_request(rest, transcript) {
                    Ok(n) => {
                        result.consumed += n;
                        result.boundaries.push(n);
                    }
                    Err(ParseError::NeedMoreData) => break,
                    Err(e) => {
                        self.protocol_error('<', &e, transcript);
                        break;
                    }
                },
                Phase::Closed | Phase::Failed => break,
            }
        }
        result
    }

    fn parse_one_request(
        &mut self,
        buf: &[u8],
        transcript: &Transcript,
    ) -> Result<usize, ParseError> {
        let header = decode::request_header(buf, self.order, self.big_requests_active)?;
        let big_req_enable = self.big_requests_opcode == Some(header.major);
        let spec = if big_req_enable {
            Some(&BIG_REQUESTS_ENABLE)
        } else {
            requests::request_spec(header.major)
        };

        let seq = self.next_sequence();
        match spec {
            Some(spec) => {
                let mut members =
                    decode::decode_request(spec, buf, &header, self.order, &self.atoms)?;
                if self.verbose {
                    members.insert(0, Member::new("opcode", format!("{}", header.major)));
                    members.insert(1, Member::new("length", format!("{} bytes", header.total)));
                }
                let info = self.entry('<', Some(seq));
                transcript.message(&info, spec.name, &members);
                self.remember_request(seq, header.major, big_req_enable);
                self.stash_request_context(seq, &header, buf);
            }
            None => {
                let members = decode::unknown_request_members(&header);
                let info = self.entry('<', Some(seq));
                transcript.message(&info, "UnknownRequest", &members);
                self.remember_request(seq, header.major, false);
            }
        }
        Ok(header.total)
    }

    fn remember_request(&mut self, sequence: u16, major: u8, big_req_enable: bool) {
        self.pending.push_back(PendingRequest {
            sequence,
            major,
            big_req_enable,
        });
        if self.pending.len() > PENDING_REPLY_LIMIT {
            self.pending.pop_front();
        }
    }

    /// Stash request context that the matching reply will need.
    fn stash_request_context(
        &mut self,
        sequence: u16,
        header: &decode::RequestHeader,
        buf: &[u8],
    ) {
        let shift = header.shift();
        let stash = match header.major {
            opcode::INTERN_ATOM => {
                self.read_counted_string(buf, 4 + shift, 8 + shift).map(Stash::AtomName)
            }
            opcode::GET_ATOM_NAME => self.read_u32_at(buf, 4 + shift).map(Stash::AtomId),
            opcode::QUERY_EXTENSION => self
                .read_counted_string(buf, 4 + shift, 8 + shift)
                .map(Stash::ExtensionName),
            opcode::LIST_FONTS_WITH_INFO => self
                .read_counted_string(buf, 6 + shift, 8 + shift)
                .map(Stash::FontPattern),
            _ => None,
        };
        if let Some(stash) = stash {
            // The sequence space can wrap with a stash still outstanding;
            // the newer request wins, matching what the server will answer.
            if self.stashed.insert(sequence, stash).is_some() {
                debug!(
                    "connection {}: sequence {} stashed twice",
                    self.conn_id, sequence
                );
            }
        }
    }

    fn read_counted_string(&self, buf: &[u8], len_offset: usize, data_offset: usize) -> Option<Vec<u8>> {
        let mut reader = ByteReader::new(buf, self.order);
        reader.seek(len_offset).ok()?;
        let len = reader.read_u16().ok()? as usize;
        reader.seek(data_offset).ok()?;
        reader.read_bytes(len).ok().map(|b| b.to_vec())
    }

    fn read_u32_at(&self, buf: &[u8], offset: usize) -> Option<u32> {
        let mut reader = ByteReader::new(buf, self.order);
        reader.seek(offset).ok()?;
        reader.read_u32().ok()
    }

    /// Parse as many complete server messages as the buffer holds.
    ///
    /// Takes the buffer mutably because `--denyextensions` rewrites the
    /// `present` byte of QueryExtension replies in place before they are
    /// forwarded.
    pub fn parse_server(&mut self, buf: &mut [u8], transcript: &Transcript) -> usize {
        let mut consumed = 0;
        loop {
            if consumed >= buf.len() {
                break;
            }
            match self.phase {
                Phase::Unestablished => match setup::parse_server_setup(&buf[consumed..], self.order)
                {
                    Ok(ServerSetup::Failed { total, members }) => {
                        let info = self.entry('>', None);
                        transcript.message(&info, "SetupFailed", &members);
                        self.phase = Phase::Closed;
                        consumed += total;
                    }
                    Ok(ServerSetup::Authenticate { total, members }) => {
                        let info = self.entry('>', None);
                        transcript.message(&info, "SetupAuthenticate", &members);
                        transcript.notice(
                            self.conn_id,
                            "server requests authentication negotiation; \
                             forwarding verbatim (no encoding specified)",
                        );
                        self.phase = Phase::Authentication;
                        consumed += total;
                    }
                    Ok(ServerSetup::Success { total, members }) => {
                        let info = self.entry('>', None);
                        transcript.message(&info, "SetupSuccess", &members);
                        self.phase = Phase::Open;
                        consumed += total;
                    }
                    Err(ParseError::NeedMoreData) => break,
                    Err(e) => {
                        self.protocol_error('>', &e, transcript);
                        break;
                    }
                },
                Phase::Authentication => {
                    consumed = buf.len();
                    break;
                }
                Phase::Open => match self.parse_one_response(&mut buf[consumed..], transcript) {
                    Ok(n) => consumed += n,
                    Err(ParseError::NeedMoreData) => break,
                    Err(e) => {
                        self.protocol_error('>', &e, transcript);
                        break;
                    }
                },
                Phase::Closed | Phase::Failed => break,
            }
        }
        consumed
    }

    fn parse_one_response(
        &mut self,
        buf: &mut [u8],
        transcript: &Transcript,
    ) -> Result<usize, ParseError> {
        match buf[0] {
            0 => self.parse_one_error(buf, transcript),
            1 => self.parse_one_reply(buf, transcript),
            _ => self.parse_one_event(buf, transcript),
        }
    }

    fn parse_one_error(
        &mut self,
        buf: &[u8],
        transcript: &Transcript,
    ) -> Result<usize, ParseError> {
        let (name, sequence, mut members) = decode::decode_error(buf, self.order)?;
        if let Some(request) = self.find_pending(sequence) {
            self.pending.pop_front();
            if let Some(spec) = requests::request_spec(request.major) {
                members.push(Member::new("request", spec.name.to_string()));
            }
        }
        // An errored request never gets its reply; drop any stash for it.
        self.stashed.remove(&sequence);
        let info = self.entry('>', Some(sequence));
        transcript.message(&info, &format!("Error {}", name), &members);
        Ok(ENCODING_SIZE)
    }

    fn parse_one_event(
        &mut self,
        buf: &[u8],
        transcript: &Transcript,
    ) -> Result<usize, ParseError> {
        let (name, sequence, mut members) = decode::decode_event(buf, self.order, &self.atoms)?;
        if self.verbose {
            members.insert(0, Member::new("code", format!("{}", buf[0] & 0x7F)));
        }
        let info = self.entry('>', sequence);
        transcript.message(&info, &format!("Event {}", name), &members);
        Ok(ENCODING_SIZE)
    }

    fn parse_one_reply(
        &mut self,
        buf: &mut [u8],
        transcript: &Transcript,
    ) -> Result<usize, ParseError> {
        let header = decode::reply_header(buf, self.order)?;
        let sequence = header.sequence;

        let Some(request) = self.find_pending(sequence) else {
            // Reply to a request we never saw (or pruned); report its size.
            let members = vec![
                Member::new("sequence", format!("{}", sequence)),
                Member::new(
                    "(unparseable suffix)",
                    format!("{} bytes", header.total.saturating_sub(32)),
                ),
            ];
            let info = self.entry('>', Some(sequence));
            transcript.message(&info, "Reply", &members);
            return Ok(header.total);
        };

        // A ListFontsWithInfo request produces one reply per font; only the
        // terminating reply (zero-length name) finishes the series.
        let end_of_series =
            request.major != opcode::LIST_FONTS_WITH_INFO || header.detail == 0;

        if request.major == opcode::QUERY_EXTENSION && self.denyextensions {
            buf[8] = 0;
        }

        let (request_name, reply_spec) = if request.big_req_enable {
            (BIG_REQUESTS_ENABLE.name, BIG_REQUESTS_ENABLE.reply)
        } else {
            match requests::request_spec(request.major) {
                Some(spec) => (spec.name, spec.reply),
                None => ("UnknownRequest", None),
            }
        };

        match reply_spec {
            Some(spec) => {
                let mut members =
                    decode::decode_reply(spec, buf, &header, self.order, &self.atoms)?;
                if self.verbose {
                    members.insert(0, Member::new("length", format!("{} units", header.length)));
                }
                let info = self.entry('>', Some(sequence));
                transcript.message(&info, &format!("Reply to {}", request_name), &members);
            }
            None => {
                let members = vec![Member::new(
                    "(unparseable suffix)",
                    format!("{} bytes", header.total.saturating_sub(32)),
                )];
                let info = self.entry('>', Some(sequence));
                transcript.message(&info, &format!("Reply to {}", request_name), &members);
            }
        }

        self.apply_reply_effects(&request, &header, buf)?;

        if end_of_series {
            self.pending.pop_front();
            self.stashed.remove(&sequence);
        }
        Ok(header.total)
    }

    /// Correlate the reply with the stash it answers: atom internments and
    /// BIG-REQUESTS activation. A reply to one of the stash-requiring
    /// requests with no stashed context is a hard error.
    fn apply_reply_effects(
        &mut self,
        request: &PendingRequest,
        header: &decode::ReplyHeader,
        buf: &[u8],
    ) -> Result<(), ParseError> {
        match (request.major, self.stashed.get(&header.sequence)) {
            (opcode::INTERN_ATOM, Some(Stash::AtomName(name))) => {
                if let Some(atom) = self.read_u32_at(buf, 8) {
                    if atom != 0 {
                        let name = String::from_utf8_lossy(name).into_owned();
                        debug!("connection {}: interned atom {} = \"{}\"", self.conn_id, atom, name);
                        self.atoms.intern(atom, name);
                    }
                }
            }
            (opcode::GET_ATOM_NAME, Some(Stash::AtomId(atom))) => {
                let atom = *atom;
                if let Some(name) = self.read_counted_string(buf, 8, 32) {
                    let name = String::from_utf8_lossy(&name).into_owned();
                    debug!("connection {}: resolved atom {} = \"{}\"", self.conn_id, atom, name);
                    self.atoms.intern(atom, name);
                }
            }
            (opcode::QUERY_EXTENSION, Some(Stash::ExtensionName(name))) => {
                let present = buf.get(8).copied().unwrap_or(0) == 1;
                if present && name.as_slice() == b"BIG-REQUESTS" {
                    self.big_requests_active = true;
                    self.big_requests_opcode = buf.get(9).copied();
                    debug!(
                        "connection {}: BIG-REQUESTS active, major opcode {:?}",
                        self.conn_id, self.big_requests_opcode
                    );
                }
            }
            (opcode::LIST_FONTS_WITH_INFO, Some(Stash::FontPattern(_))) => {}
            (
                opcode::INTERN_ATOM
                | opcode::GET_ATOM_NAME
                | opcode::QUERY_EXTENSION
                | opcode::LIST_FONTS_WITH_INFO,
                stash,
            ) => {
                // Missing (or mistyped) entry for a request whose reply
                // depends on it; the correlation state is unrecoverable.
                return Err(ParseError::Invalid(format!(
                    "reply sequence {} to opcode {} has no stashed request context ({})",
                    header.sequence,
                    request.major,
                    if stash.is_some() { "wrong kind" } else { "absent" }
                )));
            }
            _ => {}
        }
        Ok(())
    }

    /// Walk the pending-request queue up to `sequence`, discarding requests
    /// that answered nothing; the match (if any) is left at the front.
    fn find_pending(&mut self, sequence: u16) -> Option<PendingRequest> {
        while let Some(front) = self.pending.front().copied() {
            if front.sequence == sequence {
                return Some(front);
            }
            self.pending.pop_front();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Settings;

    fn transcript() -> Transcript {
        Transcript::open(&Settings::default()).unwrap()
    }

    fn open_parser() -> ParserState {
        let mut parser = ParserState::new(1, false, false);
        parser.phase = Phase::Open;
        parser.client_setup_seen = true;
        parser.sequence = 1;
        parser
    }

    fn intern_atom_request(name: &[u8], only_if_exists: u8) -> Vec<u8> {
        let padded = crate::protocol::pad(name.len());
        let units = (8 + padded) / 4;
        let mut buf = vec![16u8, only_if_exists];
        buf.extend_from_slice(&(units as u16).to_le_bytes());
        buf.extend_from_slice(&(name.len() as u16).to_le_bytes());
        buf.extend_from_slice(&[0, 0]);
        buf.extend_from_slice(name);
        buf.resize(8 + padded, 0);
        buf
    }

    fn reply_bytes(detail: u8, sequence: u16, extra_units: u32, body: &[u8]) -> Vec<u8> {
        let mut buf = vec![1u8, detail];
        buf.extend_from_slice(&sequence.to_le_bytes());
        buf.extend_from_slice(&extra_units.to_le_bytes());
        buf.extend_from_slice(body);
        buf.resize(32 + extra_units as usize * 4, 0);
        buf
    }

    fn query_extension_request(name: &[u8]) -> Vec<u8> {
        let padded = crate::protocol::pad(name.len());
        let units = (8 + padded) / 4;
        let mut buf = vec![98u8, 0];
        buf.extend_from_slice(&(units as u16).to_le_bytes());
        buf.extend_from_slice(&(name.len() as u16).to_le_bytes());
        buf.extend_from_slice(&[0, 0]);
        buf.extend_from_slice(name);
        buf.resize(8 + padded, 0);
        buf
    }

    #[test]
    fn intern_atom_round_trip_interns_and_clears_stash() {
        let transcript = transcript();
        let mut parser = open_parser();

        let request = intern_atom_request(b"PRIMARY", 1);
        let parsed = parser.parse_client(&request, &transcript);
        assert_eq!(parsed.consumed, 16);
        assert_eq!(parsed.boundaries, vec![16]);
        assert_eq!(parser.stashed_len(), 1);

        // Server replies with atom 1.
        let mut reply = reply_bytes(0, 1, 0, &1u32.to_le_bytes());
        let consumed = parser.parse_server(&mut reply, &transcript);
        assert_eq!(consumed, 32);
        assert_eq!(parser.atoms().lookup(1), Some("PRIMARY"));
        assert_eq!(parser.stashed_len(), 0);
    }

    #[test]
    fn sequence_counts_every_request() {
        let transcript = transcript();
        let mut parser = open_parser();
        let start = parser.sequence();

        for _ in 0..3 {
            let request = intern_atom_request(b"X", 0);
            parser.parse_client(&request, &transcript);
        }
        assert_eq!(parser.sequence(), start + 3);
    }

    #[test]
    fn big_requests_activates_via_query_extension_reply() {
        let transcript = transcript();
        let mut parser = open_parser();

        let request = query_extension_request(b"BIG-REQUESTS");
        parser.parse_client(&request, &transcript);
        assert!(!parser.big_requests_active());

        // present=1, major-opcode=133
        let mut reply = reply_bytes(0, 1, 0, &[1, 133, 0, 0]);
        parser.parse_server(&mut reply, &transcript);
        assert!(parser.big_requests_active());

        // A zero 16-bit length now selects the long form instead of failing.
        let mut big = vec![127u8, 0, 0, 0];
        big.extend_from_slice(&2u32.to_le_bytes());
        let parsed = parser.parse_client(&big, &transcript);
        assert_eq!(parsed.consumed, 8);
        assert_eq!(parser.phase(), Phase::Open);
    }

    #[test]
    fn zero_length_without_big_requests_fails_the_connection() {
        let transcript = transcript();
        let mut parser = open_parser();

        let mut buf = vec![127u8, 0, 0, 0];
        buf.extend_from_slice(&2u32.to_le_bytes());
        let parsed = parser.parse_client(&buf, &transcript);
        assert_eq!(parsed.consumed, 0);
        assert_eq!(parser.phase(), Phase::Failed);
    }

    #[test]
    fn denyextensions_rewrites_present_byte() {
        let transcript = transcript();
        let mut parser = ParserState::new(1, true, false);
        parser.phase = Phase::Open;
        parser.client_setup_seen = true;
        parser.sequence = 1;

        let request = query_extension_request(b"BIG-REQUESTS");
        parser.parse_client(&request, &transcript);

        let mut reply = reply_bytes(0, 1, 0, &[1, 133, 0, 0]);
        parser.parse_server(&mut reply, &transcript);
        assert_eq!(reply[8], 0, "present byte must be cleared");
        assert!(!parser.big_requests_active());
    }

    #[test]
    fn unknown_request_is_logged_and_skipped_without_failing() {
        let transcript = transcript();
        let mut parser = open_parser();

        let mut buf = vec![200u8, 0];
        buf.extend_from_slice(&4u16.to_le_bytes());
        buf.resize(16, 0xEE);
        let parsed = parser.parse_client(&buf, &transcript);
        assert_eq!(parsed.consumed, 16);
        assert_eq!(parser.phase(), Phase::Open);
    }

    #[test]
    fn get_atom_name_reply_interns_by_request_atom() {
        let transcript = transcript();
        let mut parser = open_parser();

        let mut request = vec![17u8, 0];
        request.extend_from_slice(&2u16.to_le_bytes());
        request.extend_from_slice(&200u32.to_le_bytes());
        parser.parse_client(&request, &transcript);

        let mut body = Vec::new();
        body.extend_from_slice(&9u16.to_le_bytes()); // name-len
        let mut reply = reply_bytes(0, 1, 3, &body);
        reply[32..41].copy_from_slice(b"MY_MARKER");
        let consumed = parser.parse_server(&mut reply, &transcript);
        assert_eq!(consumed, 44);
        assert_eq!(parser.atoms().lookup(200), Some("MY_MARKER"));
        assert_eq!(parser.stashed_len(), 0);
    }

    #[test]
    fn reply_without_its_stash_fails_the_connection() {
        let transcript = transcript();
        let mut parser = open_parser();

        let mut request = vec![17u8, 0];
        request.extend_from_slice(&2u16.to_le_bytes());
        request.extend_from_slice(&200u32.to_le_bytes());
        parser.parse_client(&request, &transcript);
        assert_eq!(parser.stashed_len(), 1);

        // The stash vanishes out from under the reply; correlation for a
        // GetAtomName answer is now impossible.
        parser.stashed.clear();
        let mut reply = reply_bytes(0, 1, 0, &[]);
        let consumed = parser.parse_server(&mut reply, &transcript);
        assert_eq!(consumed, 0);
        assert_eq!(parser.phase(), Phase::Failed);
    }

    #[test]
    fn error_consumes_the_stash_of_its_request() {
        let transcript = transcript();
        let mut parser = open_parser();

        let request = intern_atom_request(b"DOOMED", 0);
        parser.parse_client(&request, &transcript);
        assert_eq!(parser.stashed_len(), 1);

        // Alloc error for sequence 1.
        let mut error = vec![0u8, 11];
        error.extend_from_slice(&1u16.to_le_bytes());
        error.resize(32, 0);
        let consumed = parser.parse_server(&mut error, &transcript);
        assert_eq!(consumed, ENCODING_SIZE);
        assert_eq!(parser.stashed_len(), 0);
        assert_eq!(parser.phase(), Phase::Open);
    }

    #[test]
    fn list_fonts_with_info_stash_survives_until_final_reply() {
        let transcript = transcript();
        let mut parser = open_parser();

        let mut request = vec![50u8, 0];
        request.extend_from_slice(&4u16.to_le_bytes());
        request.extend_from_slice(&10u16.to_le_bytes()); // max-names
        request.extend_from_slice(&1u16.to_le_bytes()); // pattern-len
        request.extend_from_slice(b"*");
        request.resize(12, 0);
        parser.parse_client(&request, &transcript);
        assert_eq!(parser.stashed_len(), 1);

        // One font reply: name-len 4, fixed part 60 bytes + 4-byte name.
        let mut font_reply = reply_bytes(4, 1, 8, &[]);
        font_reply[60..64].copy_from_slice(b"fixd");
        parser.parse_server(&mut font_reply, &transcript);
        assert_eq!(parser.stashed_len(), 1, "series still in flight");

        // Terminating reply: name-len 0, length 7.
        let mut last = reply_bytes(0, 1, 7, &[]);
        parser.parse_server(&mut last, &transcript);
        assert_eq!(parser.stashed_len(), 0);
    }

    #[test]
    fn client_setup_then_server_success_opens_connection() {
        let transcript = transcript();
        let mut parser = ParserState::new(3, false, false);

        let mut setup = vec![b'l', 0];
        setup.extend_from_slice(&11u16.to_le_bytes());
        setup.extend_from_slice(&0u16.to_le_bytes());
        setup.extend_from_slice(&0u16.to_le_bytes());
        setup.extend_from_slice(&0u16.to_le_bytes());
        setup.extend_from_slice(&[0, 0]);
        let parsed = parser.parse_client(&setup, &transcript);
        assert_eq!(parsed.consumed, 12);
        assert_eq!(parser.phase(), Phase::Unestablished);
        assert_eq!(parser.sequence(), 1);

        // Further client bytes wait until the server answers.
        let more = parser.parse_client(&[42u8; 8], &transcript);
        assert_eq!(more.consumed, 0);
    }

    #[test]
    fn authentication_phase_forwards_verbatim() {
        let transcript = transcript();
        let mut parser = ParserState::new(4, false, false);
        parser.phase = Phase::Authentication;
        parser.client_setup_seen = true;

        let blob = [0x55u8; 40];
        let parsed = parser.parse_client(&blob, &transcript);
        assert_eq!(parsed.consumed, 40);
        assert_eq!(parsed.boundaries, vec![40]);
        assert_eq!(parser.phase(), Phase::Authentication);
    }
}
