// SPDX-License-Identifier: Apache-2.0

// xsnoop - Command Line Arguments

/// Command-line surface of the proxy.
///
/// Everything after a literal `--` is treated as a subcommand to spawn with
/// `DISPLAY` pointing at the proxy display.
#[derive(clap::Parser, Debug, Default)]
#[command(
    name = "xsnoop",
    about = "Intercept and log X11 protocol traffic between clients and an X server"
)]
pub struct CommandlineArgs {
    /// Display name of the actual X server
    #[arg(short = 'd', long)]
    pub display: Option<String>,
    /// Proxy display name representing this process
    #[arg(short = 'D', long)]
    pub proxydisplay: Option<String>,
    /// Fake unavailability of all extensions
    #[arg(short = 'e', long)]
    pub denyextensions: bool,
    /// Do not exit when all clients have disconnected
    #[arg(short = 'k', long)]
    pub keeprunning: bool,
    /// Print amounts of data read/sent
    #[arg(short = 'w', long)]
    pub readwritedebug: bool,
    /// Write the transcript to a file instead of stdout
    #[arg(short = 'o', long)]
    pub outfile: Option<String>,
    /// Print one member per line in message structures
    #[arg(short = 'm', long)]
    pub multiline: bool,
    /// Include otherwise-elided fields (opcodes, lengths)
    #[arg(short = 'v', long)]
    pub verbose: bool,
    /// Subtract the per-connection start time from timestamps
    #[arg(short = 'r', long)]
    pub relativetimestamps: bool,
    /// Pre-populate the atom cache from the upstream server
    #[arg(short = 'p', long)]
    pub prefetchatoms: bool,
    /// Disable buffering on the transcript stream
    #[arg(short = 'u', long)]
    pub unbuffered: bool,
    /// Forward client requests only after confirmation on stdin
    #[arg(short = 'i', long)]
    pub interactive: bool,
    /// Command to spawn with DISPLAY overwritten to the proxy display
    #[arg(last = true)]
    pub subcommand: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_short_options() {
        let args =
            CommandlineArgs::parse_from(["xsnoop", "-d", ":0", "-D", ":9", "-e", "-m", "-v"]);
        assert_eq!(args.display.as_deref(), Some(":0"));
        assert_eq!(args.proxydisplay.as_deref(), Some(":9"));
        assert!(args.denyextensions);
        assert!(args.multiline);
        assert!(args.verbose);
        assert!(!args.keeprunning);
    }

    #[test]
    fn captures_trailing_subcommand() {
        let args = CommandlineArgs::parse_from(["xsnoop", "-w", "--", "xterm", "-rv"]);
        assert!(args.readwritedebug);
        assert_eq!(args.subcommand, vec!["xterm".to_string(), "-rv".to_string()]);
    }

    #[test]
    fn outfile_takes_one_argument() {
        let args = CommandlineArgs::parse_from(["xsnoop", "-o", "trace.log"]);
        assert_eq!(args.outfile.as_deref(), Some("trace.log"));
    }
}
