//! HTTP server receiving conversation group edits.
//!
//! Provides REST endpoints for:
//! - Replacing a conversation's groups (`/conversation/{key}/edit_groups/`)
//! - Reading them back (`/conversation/{key}/groups/`)
//! - Health checks

pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppState, MembershipRecord};

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Default server port.
pub const DEFAULT_PORT: u16 = 8000;

/// Error returned when the server cannot bind or stops abnormally.
pub type ServeError = Box<dyn std::error::Error + Send + Sync>;

/// Bind the listener on every interface at `port`.
///
/// # Errors
/// Returns an error if the port cannot be bound.
pub async fn bind(port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port))).await
}

/// Serve on an already bound listener until `shutdown_signal` completes.
///
/// # Errors
/// Returns an error if serving fails.
pub async fn serve<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown_signal: F,
) -> Result<(), ServeError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app: Router = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    tracing::info!("Conversation groups server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::conversation::{ConversationGroupsModel, Group, GroupRef};
    use crate::sync::{HttpTransport, SyncError};

    #[tokio::test]
    async fn test_model_saves_through_http() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = AppState::new();
        let (stop, stopped) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(serve(listener, state.clone(), async move {
            let _ = stopped.await;
        }));

        let config = ClientConfig::new().with_base_url(format!("http://{addr}/"));
        let transport = Arc::new(HttpTransport::new(&config).unwrap());
        let mut model = ConversationGroupsModel::new(
            "conversation1",
            vec![
                Group::new("group1", true),
                Group::new("group2", true),
                Group::new("group3", true),
            ],
            transport,
        )
        .unwrap();

        model.set_in_conversation("group3", false).unwrap();
        let response = model.save().await.unwrap();
        assert_eq!(response.status, 200);

        let record = state.membership("conversation1").unwrap();
        assert_eq!(
            record.groups,
            vec![
                GroupRef { key: "group1".to_string() },
                GroupRef { key: "group2".to_string() },
            ]
        );

        drop(model);
        let _ = stop.send(());
        server.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_missing_route_surfaces_status() {
        let listener = bind(0).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let (stop, stopped) = tokio::sync::oneshot::channel::<()>();
        let server = tokio::spawn(serve(listener, AppState::new(), async move {
            let _ = stopped.await;
        }));

        // Base path the server does not mount.
        let config = ClientConfig::new().with_base_url(format!("http://127.0.0.1:{port}/nowhere/"));
        let transport = Arc::new(HttpTransport::new(&config).unwrap());
        let model =
            ConversationGroupsModel::new("c1", vec![Group::new("g1", true)], transport).unwrap();

        let result = model.save().await;
        assert!(matches!(result, Err(SyncError::Status { status: 404, .. })));

        drop(model);
        let _ = stop.send(());
        server.await.unwrap().unwrap();
    }
}
