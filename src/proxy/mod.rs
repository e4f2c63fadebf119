//! The proxy process: listener, connection registry, subcommand, shutdown.
//!
//! Everything runs on one current-thread runtime. [`run`] binds the proxy
//! display, accepts clients, pairs each with an upstream connection driven by
//! its own cooperative task, reaps the optional subcommand, and decides the
//! process exit code.

pub mod child;
pub mod connection;
pub mod display;
pub mod fetch;
pub mod gate;
pub mod listener;
pub mod stream;

use std::sync::Arc;

use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::core::Settings;
use crate::output::Transcript;
use crate::{Error, Result};

use child::ChildProcess;
use connection::Connection;
use display::DisplayInfo;
use gate::Gate;
use listener::Listener;

async fn wait_child(child: &mut Option<ChildProcess>) -> i32 {
    match child {
        Some(child) => child.wait().await,
        None => std::future::pending().await,
    }
}

/// Run the proxy to completion. Returns the process exit code: the
/// subcommand's (or `128 + signal`) when one ran, otherwise 0.
pub async fn run(settings: Settings) -> Result<i32> {
    let settings = Arc::new(settings);
    let transcript = Arc::new(Transcript::open(&settings)?);

    let proxy_display = DisplayInfo::parse(&settings.proxy_display)?;
    let upstream_display = DisplayInfo::parse(&settings.upstream_display)?;
    if proxy_display.family == upstream_display.family
        && proxy_display.display == upstream_display.display
        && proxy_display.hostname == upstream_display.hostname
    {
        return Err(Error::Setup(format!(
            "proxy display '{}' and upstream display '{}' are the same endpoint",
            proxy_display.name, upstream_display.name
        )));
    }

    let prefetched_atoms: Arc<Vec<String>> = if settings.prefetchatoms {
        match fetch::fetch_atom_names(&upstream_display).await {
            Ok(names) => Arc::new(names),
            Err(e) => {
                warn!("atom prefetch failed, continuing without: {}", e);
                Arc::new(Vec::new())
            }
        }
    } else {
        Arc::new(Vec::new())
    };

    let listener = Listener::bind(&proxy_display)?;

    let gate = if settings.interactive {
        let gate = Gate::new();
        gate.spawn_stdin_reader();
        Some(gate)
    } else {
        None
    };

    let mut child = if settings.subcommand.is_empty() {
        None
    } else {
        Some(ChildProcess::spawn(
            &settings.subcommand,
            &proxy_display.name,
        )?)
    };
    let mut child_code: Option<i32> = None;

    let cancel = CancellationToken::new();
    let (closed_tx, mut closed_rx) = mpsc::unbounded_channel::<u32>();
    let mut sigint = signal(SignalKind::interrupt()).map_err(Error::Io)?;
    let mut sigterm = signal(SignalKind::terminate()).map_err(Error::Io)?;

    let mut next_id: u32 = 0;
    let mut active: usize = 0;

    let exit_code = loop {
        tokio::select! {
            accepted = listener.accept() => {
                match accepted {
                    Ok((client, from)) => {
                        info!("got connection from {}", from);
                        match listener::connect_upstream(&upstream_display).await {
                            Ok(server) => {
                                let id = next_id;
                                next_id += 1;
                                let conn = Connection::new(
                                    id,
                                    client,
                                    server,
                                    from,
                                    Arc::clone(&settings),
                                    Arc::clone(&transcript),
                                    gate.clone(),
                                    &prefetched_atoms,
                                );
                                active += 1;
                                tokio::spawn(conn.run(cancel.clone(), closed_tx.clone()));
                            }
                            Err(e) => {
                                // The client is dropped (closed); the proxy lives on.
                                error!(
                                    "error connecting to server {}: {}",
                                    upstream_display.name, e
                                );
                            }
                        }
                    }
                    Err(e) => {
                        error!("accept failed: {}", e);
                    }
                }
            }
            Some(id) = closed_rx.recv() => {
                info!("connection {} finished", id);
                active = active.saturating_sub(1);
                if active == 0 && !settings.keeprunning {
                    match (&child, child_code) {
                        // Subcommand already over: leave with its code.
                        (_, Some(code)) => break code,
                        // No subcommand at all: clean exit.
                        (None, None) => break 0,
                        // Subcommand still running: keep serving it.
                        (Some(_), None) => {}
                    }
                }
            }
            code = wait_child(&mut child), if child_code.is_none() => {
                info!("subcommand exited with code {}", code);
                child = None;
                child_code = Some(code);
                if active == 0 && !settings.keeprunning {
                    break code;
                }
            }
            _ = sigint.recv() => {
                info!("interrupted, shutting down");
                break 0;
            }
            _ = sigterm.recv() => {
                info!("terminated, shutting down");
                break 0;
            }
        }
    };

    // Orderly shutdown: stop every connection task (closing streams and
    // queued fds), stop the child, release the listener socket.
    cancel.cancel();
    while active > 0 {
        if closed_rx.recv().await.is_some() {
            active -= 1;
        } else {
            break;
        }
    }
    if let Some(mut child) = child {
        child.kill();
    }
    drop(listener);
    transcript.flush();
    Ok(exit_code)
}
