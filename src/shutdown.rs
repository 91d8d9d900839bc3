use dayglance::error::DayResult;
use tracing::info;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
#[cfg(windows)]
use tokio::signal::windows::{ctrl_break, ctrl_c};

/// Resolves once the process is asked to terminate
#[cfg(unix)]
pub async fn wait_for_signal() -> DayResult<()> {
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => {
            info!("Received SIGTERM signal, closing the day view");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT signal, closing the day view");
        }
    }

    Ok(())
}

/// Resolves once the process is asked to terminate
#[cfg(windows)]
pub async fn wait_for_signal() -> DayResult<()> {
    let mut ctrlc = ctrl_c()?;
    let mut ctrlbreak = ctrl_break()?;

    tokio::select! {
        _ = ctrlc.recv() => {
            info!("Received Ctrl+C signal, closing the day view");
        }
        _ = ctrlbreak.recv() => {
            info!("Received Ctrl+Break signal, closing the day view");
        }
    }

    Ok(())
}
