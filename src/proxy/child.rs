//! Subcommand handling.
//!
//! Arguments after `--` are spawned as a child process with `DISPLAY`
//! overwritten to the proxy display, so the command's X traffic flows
//! through us. The child's exit status becomes the proxy's own exit code
//! once the last client disconnects.

use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use tokio::process::{Child, Command};
use tracing::info;

use crate::{Error, Result};

pub struct ChildProcess {
    child: Child,
}

impl ChildProcess {
    /// Spawn `argv` with `DISPLAY` pointing at the proxy display.
    pub fn spawn(argv: &[String], proxy_display: &str) -> Result<Self> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| Error::Setup("empty subcommand".to_string()))?;
        let child = Command::new(program)
            .args(args)
            .env("DISPLAY", proxy_display)
            .spawn()
            .map_err(|e| Error::Setup(format!("could not exec '{}': {}", program, e)))?;
        info!("spawned '{}' with DISPLAY={}", program, proxy_display);
        Ok(Self { child })
    }

    /// Wait for the child to exit and map its status to an exit code.
    pub async fn wait(&mut self) -> i32 {
        match self.child.wait().await {
            Ok(status) => exit_code(status),
            Err(_) => 1,
        }
    }

    /// Ask the child to stop during shutdown; best effort.
    pub fn kill(&mut self) {
        let _ = self.child.start_kill();
    }
}

/// Exit code of a finished child: its own code, or `128 + signal` when a
/// signal terminated it.
pub fn exit_code(status: ExitStatus) -> i32 {
    match status.code() {
        Some(code) => code,
        None => 128 + status.signal().unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn child_exit_code_is_propagated() {
        let mut child =
            ChildProcess::spawn(&["sh".to_string(), "-c".to_string(), "exit 7".to_string()], ":9")
                .unwrap();
        assert_eq!(child.wait().await, 7);
    }

    #[tokio::test]
    async fn signal_death_maps_to_128_plus_signal() {
        let mut child = ChildProcess::spawn(
            &["sh".to_string(), "-c".to_string(), "kill -TERM $$".to_string()],
            ":9",
        )
        .unwrap();
        assert_eq!(child.wait().await, 128 + 15);
    }

    #[tokio::test]
    async fn child_inherits_proxy_display() {
        let mut child = ChildProcess::spawn(
            &[
                "sh".to_string(),
                "-c".to_string(),
                "test \"$DISPLAY\" = :42".to_string(),
            ],
            ":42",
        )
        .unwrap();
        assert_eq!(child.wait().await, 0);
    }
}
