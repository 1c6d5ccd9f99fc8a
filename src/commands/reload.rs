use anyhow::Result;
use colored::Colorize;
use tracing::info;

#[cfg(unix)]
use coach_fare::signals::send_signal_to_pid;
#[cfg(unix)]
use tokio::signal::unix::SignalKind;

/// Execute the reload command
///
/// This sends SIGHUP to the running server, which re-reads its config file
/// and swaps in the new rate table without dropping connections
pub fn execute(pid: u32) -> Result<()> {
    #[cfg(not(unix))]
    {
        let _ = pid;
        anyhow::bail!("Reload command is not supported on this platform");
    }

    #[cfg(unix)]
    {
        println!(
            "{} {}",
            "Reloading configuration".yellow(),
            format!("(PID: {})", pid).cyan()
        );
        info!("Sending SIGHUP to PID {} for config reload", pid);

        send_signal_to_pid(pid, SignalKind::hangup())?;

        println!("{}", "  Reload signal sent successfully".green());
        println!(
            "  {}",
            "Note: Check server logs to verify reload succeeded".dimmed()
        );

        Ok(())
    }
}
