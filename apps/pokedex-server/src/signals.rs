use std::future::{Future, pending};

use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Token cancelled once the server is asked to stop: Ctrl+C, or SIGTERM on unix.
///
/// The SIGTERM listener is installed before this returns, so a signal sent
/// after the call is never lost to the default handler.
#[must_use]
pub fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    let terminated = terminated();
    tokio::spawn(async move {
        let source = tokio::select! {
            () = interrupted() => "ctrl_c",
            () = terminated => "sigterm",
        };
        tracing::info!(signal = source, "stopping pokedex server, draining connections");
        trigger.cancel();
    });
    token
}

// A listener that cannot be installed never fires, leaving the other one in charge.
async fn interrupted() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::warn!(error = %e, "Ctrl+C listener unavailable");
        pending::<()>().await;
    }
}

#[cfg(unix)]
fn terminated() -> impl Future<Output = ()> + Send + 'static {
    use signal::unix::{SignalKind, signal as listen};

    let sigterm = listen(SignalKind::terminate())
        .inspect_err(|e| tracing::warn!(error = %e, "SIGTERM listener unavailable"))
        .ok();
    async move {
        match sigterm {
            Some(mut sigterm) => {
                sigterm.recv().await;
            }
            None => pending::<()>().await,
        }
    }
}

#[cfg(not(unix))]
fn terminated() -> impl Future<Output = ()> + Send + 'static {
    pending::<()>()
}
