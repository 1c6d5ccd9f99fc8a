use anyhow::{bail, Result};
use arc_swap::ArcSwap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info};

#[cfg(unix)]
use nix::libc;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use crate::config::{load_config, Config};

/// Shutdown signal types
#[derive(Debug, Clone, Copy)]
pub enum ShutdownSignal {
    /// Graceful shutdown (drain connections, clean up)
    Graceful,
}

/// Setup signal handlers for the server
///
/// Returns a broadcast sender for shutdown signals and a join handle for the signal task
///
/// Handles:
/// - SIGTERM/SIGINT: Graceful shutdown
/// - SIGHUP: Reload `config_path` and swap in the new rate table
#[cfg(unix)]
pub fn setup_signal_handlers(
    config: Arc<ArcSwap<Config>>,
    config_path: PathBuf,
) -> (
    broadcast::Sender<ShutdownSignal>,
    tokio::task::JoinHandle<()>,
) {
    let (shutdown_tx, _) = broadcast::channel(16);
    let tx_clone = shutdown_tx.clone();

    let handle = tokio::spawn(async move {
        let mut sigterm = signal(SignalKind::terminate()).expect("Failed to setup SIGTERM handler");
        let mut sigint = signal(SignalKind::interrupt()).expect("Failed to setup SIGINT handler");
        let mut sighup = signal(SignalKind::hangup()).expect("Failed to setup SIGHUP handler");

        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("SIGTERM received, initiating graceful shutdown");
                    let _ = tx_clone.send(ShutdownSignal::Graceful);
                    break;
                }
                _ = sigint.recv() => {
                    info!("SIGINT received, initiating graceful shutdown");
                    let _ = tx_clone.send(ShutdownSignal::Graceful);
                    break;
                }
                _ = sighup.recv() => {
                    info!("SIGHUP received, reloading configuration");
                    if let Err(e) = reload_config(&config, &config_path) {
                        error!("Failed to reload configuration: {}", e);
                    } else {
                        info!("Configuration reloaded successfully");
                    }
                }
            }
        }
    });

    (shutdown_tx, handle)
}

/// Windows placeholder - signals not fully supported
#[cfg(not(unix))]
pub fn setup_signal_handlers(
    _config: Arc<ArcSwap<Config>>,
    _config_path: PathBuf,
) -> (
    broadcast::Sender<ShutdownSignal>,
    tokio::task::JoinHandle<()>,
) {
    let (shutdown_tx, _) = broadcast::channel(16);
    let tx_clone = shutdown_tx.clone();

    let handle = tokio::spawn(async move {
        // On Windows, only Ctrl+C is supported
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl+C received, initiating shutdown");
                let _ = tx_clone.send(ShutdownSignal::Graceful);
            }
            Err(e) => {
                error!("Failed to listen for Ctrl+C: {}", e);
            }
        }
    });

    (shutdown_tx, handle)
}

/// Reload configuration atomically
///
/// The new file is loaded and validated first; if that fails the running
/// configuration stays in place.
pub fn reload_config(config: &ArcSwap<Config>, config_path: &Path) -> Result<()> {
    info!("Loading new configuration from {}", config_path.display());

    let new_config = load_config(config_path)?;

    info!(
        "New configuration loaded. Buses: {}, daily allowance: {}, rates: {:?}",
        new_config.fleet.len(),
        new_config.pricing.daily_allowance,
        new_config.pricing.rates
    );

    config.store(Arc::new(new_config));
    Ok(())
}

/// Send a signal to a process by PID (for the reload command)
#[cfg(unix)]
pub fn send_signal_to_pid(pid: u32, signal_kind: SignalKind) -> Result<()> {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let nix_signal = match signal_kind.as_raw_value() {
        libc::SIGHUP => Signal::SIGHUP,
        _ => bail!("Unsupported signal: {:?}", signal_kind),
    };

    let raw_pid = i32::try_from(pid).map_err(|_| anyhow::anyhow!("Invalid PID: {}", pid))?;

    info!("Sending signal {:?} to PID {}", nix_signal, pid);

    kill(Pid::from_raw(raw_pid), nix_signal)
        .map_err(|e| anyhow::anyhow!("Failed to send signal to PID {}: {}", pid, e))?;

    Ok(())
}

/// Windows placeholder
#[cfg(not(unix))]
pub fn send_signal_to_pid(_pid: u32, _signal_kind: ()) -> Result<()> {
    bail!("Signal sending not supported on this platform");
}
