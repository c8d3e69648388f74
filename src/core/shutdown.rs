//! Cross-platform termination-signal handling.
//!
//! [`wait_for_shutdown_signal`] completes when the process receives a
//! termination signal: SIGINT or SIGTERM on Unix (systemd/Kubernetes send
//! SIGTERM), Ctrl-C elsewhere. Each call installs independent listeners.

/// Waits for a termination signal.
///
/// Returns `Ok(())` when a signal arrives, or `Err` if listener registration
/// fails.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = sigint.recv() => {}
        _ = sigterm.recv() => {}
    }
    Ok(())
}

/// Waits for a termination signal.
///
/// Returns `Ok(())` when a signal arrives, or `Err` if listener registration
/// fails.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
