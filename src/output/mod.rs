//! Transcript output.
//!
//! The transcript is the product of the proxy: one line (or one block, in
//! multiline mode) per protocol message, written to stdout or the file given
//! with `--outfile`. Diagnostics never go through here; they use `tracing`
//! and stderr.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use parking_lot::Mutex;

use crate::core::Settings;
use crate::protocol::decode::Member;
use crate::{Error, Result};

enum Sink {
    Stdout(io::Stdout),
    File(BufWriter<File>),
}

impl Sink {
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Sink::Stdout(out) => out.lock().write_all(buf),
            Sink::File(file) => file.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Stdout(out) => out.lock().flush(),
            Sink::File(file) => file.flush(),
        }
    }
}

/// Addressing information for one transcript entry.
#[derive(Debug, Clone, Copy)]
pub struct EntryInfo {
    /// Connection id, rendered as a three-digit prefix.
    pub conn_id: u32,
    /// `<` for client-to-server traffic, `>` for server-to-client.
    pub marker: char,
    /// Sequence number of the message, where it has one.
    pub sequence: Option<u16>,
    /// Milliseconds since the connection was accepted; only rendered under
    /// `--relativetimestamps`.
    pub elapsed_ms: Option<u64>,
}

/// Shared transcript writer.
pub struct Transcript {
    sink: Mutex<Sink>,
    multiline: bool,
    relativetimestamps: bool,
    unbuffered: bool,
}

impl Transcript {
    /// Open the transcript sink described by the settings.
    pub fn open(settings: &Settings) -> Result<Self> {
        let sink = match settings.outfile.as_deref() {
            Some(path) => {
                let file = File::create(path).map_err(|e| {
                    Error::Transcript(format!("could not open log file \"{}\": {}", path, e))
                })?;
                Sink::File(BufWriter::new(file))
            }
            None => Sink::Stdout(io::stdout()),
        };
        Ok(Self {
            sink: Mutex::new(sink),
            multiline: settings.multiline,
            relativetimestamps: settings.relativetimestamps,
            unbuffered: settings.unbuffered,
        })
    }

    fn prefix(&self, info: &EntryInfo) -> String {
        let mut prefix = format!("{:03}:{}:", info.conn_id, info.marker);
        if let Some(seq) = info.sequence {
            prefix.push_str(&format!("{:04}:", seq));
        }
        if self.relativetimestamps {
            if let Some(ms) = info.elapsed_ms {
                prefix.push_str(&format!("+{}ms:", ms));
            }
        }
        prefix
    }

    /// Write one decoded message: a headline (message kind) plus its members.
    pub fn message(&self, info: &EntryInfo, headline: &str, members: &[Member]) {
        let prefix = self.prefix(info);
        let mut text = String::new();
        if self.multiline {
            text.push_str(&format!("{} {}(\n", prefix, headline));
            for member in members {
                text.push_str(&format!("{}   {}={}\n", prefix, member.name, member.value));
            }
            text.push_str(&format!("{} )\n", prefix));
        } else {
            let inner: Vec<String> = members
                .iter()
                .map(|m| format!("{}={}", m.name, m.value))
                .collect();
            text.push_str(&format!("{} {}({})\n", prefix, headline, inner.join(", ")));
        }
        self.write(text.as_bytes());
    }

    /// Write one free-form line (EOF notices, discard notices, read/write
    /// debugging), already without a trailing newline.
    pub fn line(&self, conn_id: u32, marker: char, text: &str) {
        self.write(format!("{:03}:{}:{}\n", conn_id, marker, text).as_bytes());
    }

    /// Write one connection-scoped notice with no direction marker.
    pub fn notice(&self, conn_id: u32, text: &str) {
        self.write(format!("{:03}: {}\n", conn_id, text).as_bytes());
    }

    fn write(&self, bytes: &[u8]) {
        let mut sink = self.sink.lock();
        // A dead transcript stream is not worth killing connections over.
        let _ = sink.write_all(bytes);
        if self.unbuffered {
            let _ = sink.flush();
        }
    }

    /// Flush pending output; called on shutdown.
    pub fn flush(&self) {
        let _ = self.sink.lock().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_transcript(multiline: bool) -> Transcript {
        Transcript {
            sink: Mutex::new(Sink::Stdout(io::stdout())),
            multiline,
            relativetimestamps: true,
            unbuffered: false,
        }
    }

    #[test]
    fn prefix_includes_sequence_and_timestamp() {
        let transcript = test_transcript(false);
        let info = EntryInfo {
            conn_id: 1,
            marker: '<',
            sequence: Some(7),
            elapsed_ms: Some(12),
        };
        assert_eq!(transcript.prefix(&info), "001:<:0007:+12ms:");
    }

    #[test]
    fn prefix_without_sequence() {
        let transcript = test_transcript(false);
        let info = EntryInfo {
            conn_id: 23,
            marker: '>',
            sequence: None,
            elapsed_ms: None,
        };
        assert_eq!(transcript.prefix(&info), "023:>:");
    }
}
