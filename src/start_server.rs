//! Startup helpers for the conversation groups server.

use std::process::ExitCode;

use crate::server::{self, AppState, ServeError};

/// Environment variable selecting the listening port.
pub const ENV_PORT: &str = "CONVERSATION_GROUPS_PORT";

/// Run the server until Ctrl-C (used by the `conversation-groups-server` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` after a graceful stop, `1` if the runtime, the bind or serving fails.
#[must_use]
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let port = get_port();
    tracing::info!(port, version = env!("CARGO_PKG_VERSION"), "starting conversation groups server");

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("cannot build tokio runtime: {e}");
            return ExitCode::from(1);
        }
    };

    let outcome: Result<(), ServeError> = runtime.block_on(async {
        let listener = server::bind(port).await?;
        server::serve(listener, AppState::new(), ctrl_c()).await
    });

    match outcome {
        Ok(()) => {
            tracing::info!("server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("server error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Resolve on Ctrl-C. If the handler cannot be installed, never resolve.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

/// Get configured server port.
#[must_use]
pub fn get_port() -> u16 {
    parse_port(std::env::var(ENV_PORT).ok().as_deref())
}

fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|p| p.trim().parse().ok())
        .unwrap_or(server::DEFAULT_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port(Some("9100")), 9100);
        assert_eq!(parse_port(Some("nope")), server::DEFAULT_PORT);
        assert_eq!(parse_port(None), server::DEFAULT_PORT);
    }
}
