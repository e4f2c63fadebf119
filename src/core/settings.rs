//! Runtime settings resolved from the command line and environment.

use crate::core::CommandlineArgs;
use crate::{Error, Result};

/// Environment variable naming the upstream X server display.
pub const UPSTREAM_DISPLAY_ENV: &str = "DISPLAY";
/// Environment variable naming the display the proxy should advertise.
pub const PROXY_DISPLAY_ENV: &str = "FAKEDISPLAY";
/// Proxy display used when neither `-D` nor `FAKEDISPLAY` is given.
pub const DEFAULT_PROXY_DISPLAY: &str = ":9";

/// Fully resolved configuration for one proxy run.
///
/// Produced once at startup from [`CommandlineArgs`] plus the environment,
/// then treated as read-only.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Display name of the real X server we connect to.
    pub upstream_display: String,
    /// Display name this proxy listens on.
    pub proxy_display: String,
    /// Rewrite every QueryExtension reply to `present = 0`.
    pub denyextensions: bool,
    /// Keep the process alive after the last client disconnects.
    pub keeprunning: bool,
    /// Log each buffer read/write size.
    pub readwritedebug: bool,
    /// Transcript file path; `None` means stdout.
    pub outfile: Option<String>,
    /// One member per line in message structures.
    pub multiline: bool,
    /// Include otherwise-elided fields in the transcript.
    pub verbose: bool,
    /// Prefix messages with milliseconds since the connection was accepted.
    pub relativetimestamps: bool,
    /// Seed the atom cache from the upstream server at startup.
    pub prefetchatoms: bool,
    /// Flush the transcript after every line.
    pub unbuffered: bool,
    /// Gate client requests on stdin confirmation.
    pub interactive: bool,
    /// Subcommand to spawn with `DISPLAY` set to the proxy display.
    pub subcommand: Vec<String>,
}

impl Settings {
    /// Resolve settings from parsed arguments plus `DISPLAY`/`FAKEDISPLAY`.
    pub fn from_args(args: CommandlineArgs) -> Result<Self> {
        let upstream_display = match args.display {
            Some(name) => name,
            None => std::env::var(UPSTREAM_DISPLAY_ENV).map_err(|_| {
                Error::Setup(format!(
                    "no upstream display: pass --display or set ${UPSTREAM_DISPLAY_ENV}"
                ))
            })?,
        };
        let proxy_display = match args.proxydisplay {
            Some(name) => name,
            None => std::env::var(PROXY_DISPLAY_ENV).unwrap_or_else(|_| {
                tracing::info!(
                    "no proxy display specified, using {}",
                    DEFAULT_PROXY_DISPLAY
                );
                DEFAULT_PROXY_DISPLAY.to_string()
            }),
        };
        if let Some(path) = args.outfile.as_deref() {
            // A path like "-k" here is almost always an option-parsing accident.
            if path.starts_with('-') {
                return Err(Error::Setup(
                    "file path passed to --outfile may not begin with '-'".into(),
                ));
            }
        }
        Ok(Self {
            upstream_display,
            proxy_display,
            denyextensions: args.denyextensions,
            keeprunning: args.keeprunning,
            readwritedebug: args.readwritedebug,
            outfile: args.outfile,
            multiline: args.multiline,
            verbose: args.verbose,
            relativetimestamps: args.relativetimestamps,
            prefetchatoms: args.prefetchatoms,
            unbuffered: args.unbuffered,
            interactive: args.interactive,
            subcommand: args.subcommand,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            upstream_display: ":0".to_string(),
            proxy_display: DEFAULT_PROXY_DISPLAY.to_string(),
            denyextensions: false,
            keeprunning: false,
            readwritedebug: false,
            outfile: None,
            multiline: false,
            verbose: false,
            relativetimestamps: false,
            prefetchatoms: false,
            unbuffered: false,
            interactive: false,
            subcommand: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_displays_override_environment() {
        let args = CommandlineArgs {
            display: Some(":4".into()),
            proxydisplay: Some(":12".into()),
            ..Default::default()
        };
        let settings = Settings::from_args(args).unwrap();
        assert_eq!(settings.upstream_display, ":4");
        assert_eq!(settings.proxy_display, ":12");
    }

    #[test]
    fn outfile_must_not_look_like_an_option() {
        let args = CommandlineArgs {
            display: Some(":0".into()),
            outfile: Some("--help".into()),
            ..Default::default()
        };
        assert!(Settings::from_args(args).is_err());
    }
}
