//! Display-name parsing.
//!
//! Display names follow the Xlib grammar `[protocol/][hostname]:display[.screen]`,
//! matched case-insensitively with optional whitespace around the tokens.
//! A missing hostname (or the literal hostname `unix`) selects a Unix-domain
//! socket at `/tmp/.X11-unix/X<display>`; anything else selects TCP on port
//! `6000 + display`.

use std::path::PathBuf;

use crate::{Error, Result};

/// TCP port of display 0.
pub const X_TCP_PORT_BASE: u16 = 6000;

/// Directory of Unix-domain X sockets.
const UNIX_SOCKET_PATH_PREFIX: &str = "/tmp/.X11-unix/X";

/// Socket family selected by a display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Tcp,
    Unix,
}

/// A parsed display name.
#[derive(Debug, Clone)]
pub struct DisplayInfo {
    /// The name as given, for child `DISPLAY` and diagnostics.
    pub name: String,
    pub hostname: String,
    pub display: u16,
    pub screen: Option<u16>,
    pub family: Family,
}

impl DisplayInfo {
    /// Parse `[protocol/][hostname]:display[.screen]`.
    pub fn parse(name: &str) -> Result<Self> {
        let bad = || Error::DisplayName(name.to_string());

        let mut rest = name.trim();
        let protocol = match rest.find('/') {
            Some(slash) => {
                let proto = rest[..slash].trim();
                if proto.is_empty() || !proto.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(bad());
                }
                rest = &rest[slash + 1..];
                proto.to_ascii_lowercase()
            }
            None => String::new(),
        };

        let colon = rest.find(':').ok_or_else(bad)?;
        let hostname = rest[..colon].trim().to_ascii_lowercase();
        if !hostname.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(bad());
        }
        rest = rest[colon + 1..].trim();

        let (display_str, screen_str) = match rest.find('.') {
            Some(dot) => (rest[..dot].trim(), Some(rest[dot + 1..].trim())),
            None => (rest, None),
        };
        if display_str.is_empty() || !display_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(bad());
        }
        let display: u16 = display_str.parse().map_err(|_| bad())?;
        let screen = match screen_str {
            Some(s) => {
                if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
                    return Err(bad());
                }
                Some(s.parse().map_err(|_| bad())?)
            }
            None => None,
        };

        // Hostnames other than "unix" default to tcp; "unix" or a missing
        // hostname means the local socket regardless of protocol token.
        let (hostname, protocol) = if !hostname.is_empty() && hostname != "unix" {
            let protocol = if protocol.is_empty() {
                "tcp".to_string()
            } else {
                protocol
            };
            (hostname, protocol)
        } else {
            (String::new(), "local".to_string())
        };

        let family = match protocol.as_str() {
            "inet" | "tcp" => Family::Tcp,
            "unix" | "local" => Family::Unix,
            _ => return Err(bad()),
        };

        Ok(Self {
            name: name.trim().to_string(),
            hostname,
            display,
            screen,
            family,
        })
    }

    /// TCP port for this display.
    pub fn port(&self) -> u16 {
        X_TCP_PORT_BASE + self.display
    }

    /// Unix socket path for this display.
    pub fn socket_path(&self) -> PathBuf {
        PathBuf::from(format!("{}{}", UNIX_SOCKET_PATH_PREFIX, self.display))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_display_is_local() {
        let info = DisplayInfo::parse(":9").unwrap();
        assert_eq!(info.family, Family::Unix);
        assert_eq!(info.display, 9);
        assert_eq!(info.screen, None);
        assert_eq!(info.socket_path(), PathBuf::from("/tmp/.X11-unix/X9"));
    }

    #[test]
    fn hostname_selects_tcp() {
        let info = DisplayInfo::parse("localhost:2").unwrap();
        assert_eq!(info.family, Family::Tcp);
        assert_eq!(info.hostname, "localhost");
        assert_eq!(info.port(), 6002);
    }

    #[test]
    fn unix_hostname_stays_local() {
        let info = DisplayInfo::parse("unix:0").unwrap();
        assert_eq!(info.family, Family::Unix);
        assert_eq!(info.hostname, "");
    }

    #[test]
    fn unix_hostname_overrides_protocol_token() {
        let info = DisplayInfo::parse("tcp/unix:5").unwrap();
        assert_eq!(info.family, Family::Unix);
        assert_eq!(info.hostname, "");
        assert_eq!(info.display, 5);

        let info = DisplayInfo::parse("inet/:5").unwrap();
        assert_eq!(info.family, Family::Unix);
    }

    #[test]
    fn screen_number_is_parsed() {
        let info = DisplayInfo::parse("localhost:1.2").unwrap();
        assert_eq!(info.display, 1);
        assert_eq!(info.screen, Some(2));
    }

    #[test]
    fn protocol_token_is_honored() {
        let info = DisplayInfo::parse("tcp/remotehost:3").unwrap();
        assert_eq!(info.family, Family::Tcp);
        assert_eq!(info.hostname, "remotehost");
    }

    #[test]
    fn whitespace_is_tolerated() {
        let info = DisplayInfo::parse("  :4 ").unwrap();
        assert_eq!(info.display, 4);
    }

    #[test]
    fn rejects_garbage() {
        assert!(DisplayInfo::parse("").is_err());
        assert!(DisplayInfo::parse("nocolon").is_err());
        assert!(DisplayInfo::parse(":abc").is_err());
        assert!(DisplayInfo::parse("h0st:1").is_err());
        assert!(DisplayInfo::parse("bogus/host:1").is_err());
        assert!(DisplayInfo::parse(":1.").is_err());
    }
}
