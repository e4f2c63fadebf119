//! Interactive gating.
//!
//! With `--interactive`, requests are held back until the user confirms them
//! on stdin. Each line containing a non-negative integer N releases N
//! messages toward the server; an empty line (or anything unparseable)
//! releases one. EOF on stdin ends the process. Gating is shared across
//! connections, which can interleave oddly when several clients are
//! tunneled at once.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Notify;
use tracing::{debug, info};

/// Shared message-release gate. Starts with zero permits: nothing reaches
/// the server before the first confirmation.
pub struct Gate {
    permits: Mutex<u64>,
    notify: Notify,
}

impl Gate {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            permits: Mutex::new(0),
            notify: Notify::new(),
        })
    }

    /// Spawn the stdin reader feeding this gate.
    pub fn spawn_stdin_reader(self: &Arc<Self>) {
        let gate = Arc::clone(self);
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let n = match line.trim() {
                            "" => 1,
                            text => text.parse::<u64>().unwrap_or(1),
                        };
                        gate.release(n);
                    }
                    Ok(None) | Err(_) => {
                        info!("stdin closed, exiting");
                        std::process::exit(0);
                    }
                }
            }
        });
    }

    pub(crate) fn release(&self, n: u64) {
        if n == 0 {
            return;
        }
        {
            let mut permits = self.permits.lock();
            *permits = permits.saturating_add(n);
            debug!("released {} messages ({} available)", n, *permits);
        }
        self.notify.notify_waiters();
    }

    /// Consume one permit if any is available.
    pub fn try_consume(&self) -> bool {
        let mut permits = self.permits.lock();
        if *permits > 0 {
            *permits -= 1;
            true
        } else {
            false
        }
    }

    pub fn available(&self) -> bool {
        *self.permits.lock() > 0
    }

    /// Wait until the permit count changes.
    pub async fn changed(&self) {
        self.notify.notified().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_starts_closed() {
        let gate = Gate::new();
        assert!(!gate.available());
        assert!(!gate.try_consume());
    }

    #[test]
    fn release_grants_exactly_n_permits() {
        let gate = Gate::new();
        gate.release(3);
        assert!(gate.try_consume());
        assert!(gate.try_consume());
        assert!(gate.try_consume());
        assert!(!gate.try_consume());
    }

    #[test]
    fn zero_releases_nothing() {
        let gate = Gate::new();
        gate.release(0);
        assert!(!gate.available());
    }
}
