//! HTTP Server
//!
//! Axum router for the control plane plus its listener lifecycle.

use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use pollwatch_core::application::{CommandSender, ShutdownToken};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::handler;

const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
const DEFAULT_HTTP_PORT: u16 = 8080;

/// HTTP Server Configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
        }
    }
}

/// Build the control plane router
pub fn make_router(commands: CommandSender) -> Router {
    Router::new()
        .route("/exit", post(handler::exit))
        .route("/activate/", post(handler::missing_job_id))
        .route("/activate/{*job_id}", post(handler::activate))
        .route("/deactivate/", post(handler::missing_job_id))
        .route("/deactivate/{*job_id}", post(handler::deactivate))
        .route("/jobs", get(handler::list_jobs))
        .with_state(commands)
}

/// HTTP Server
pub struct HttpServer {
    config: HttpServerConfig,
    commands: CommandSender,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, commands: CommandSender) -> Self {
        Self { config, commands }
    }

    /// Bind and serve until `shutdown` fires.
    ///
    /// Returns the bound address (useful with port 0) and the serving task.
    pub async fn start(
        self,
        mut shutdown: ShutdownToken,
    ) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        let local_addr = listener.local_addr()?;

        info!(addr = %local_addr, "Control plane listening");

        let app = make_router(self.commands);
        let handle = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.wait().await })
                .await;
            if let Err(e) = served {
                error!(error = %e, "Control plane server failed");
            }
            info!("Control plane stopped");
        });

        Ok((local_addr, handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use pollwatch_core::application::serializer::{command_channel, Request as EngineRequest};
    use pollwatch_core::domain::{Command, JobSnapshot, SortMode};
    use tower::ServiceExt; // for `oneshot`

    fn post(uri: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_commands_are_accepted_and_queued() {
        let (commands, mut rx) = command_channel(3);
        let app = make_router(commands);

        let response = app.clone().oneshot(post("/activate/2")).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let response = app.clone().oneshot(post("/deactivate/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let response = app.oneshot(post("/exit")).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let mut received = Vec::new();
        while let Ok(EngineRequest::Control(command)) = rx.try_recv() {
            received.push(command);
        }
        assert_eq!(
            received,
            vec![Command::Activate(2), Command::Deactivate(1), Command::Exit]
        );
    }

    #[tokio::test]
    async fn test_unparseable_job_id_is_bad_request() {
        let (commands, mut rx) = command_channel(3);
        let app = make_router(commands);

        for uri in ["/activate/abc", "/deactivate/1.5", "/activate/%20"] {
            let response = app.clone().oneshot(post(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {}", uri);
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_empty_or_nested_job_id_is_bad_request() {
        let (commands, mut rx) = command_channel(3);
        let app = make_router(commands);

        for uri in [
            "/activate/",
            "/deactivate/",
            "/activate/1/2",
            "/deactivate/0/",
            "/activate/%202",
        ] {
            let response = app.clone().oneshot(post(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {}", uri);
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_full_queue_is_service_unavailable() {
        let (commands, _rx) = command_channel(3);
        let app = make_router(commands);

        for id in 0..3 {
            let response = app.clone().oneshot(post(&format!("/activate/{}", id))).await.unwrap();
            assert_eq!(response.status(), StatusCode::ACCEPTED);
        }
        let response = app.clone().oneshot(post("/activate/0")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let response = app.oneshot(post("/exit")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_closed_queue_is_service_unavailable() {
        let (commands, rx) = command_channel(3);
        drop(rx);
        let app = make_router(commands);

        let response = app.oneshot(post("/exit")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_list_jobs_returns_snapshot() {
        let (commands, mut rx) = command_channel(3);
        let app = make_router(commands);

        tokio::spawn(async move {
            if let Some(EngineRequest::Snapshot(reply)) = rx.recv().await {
                let _ = reply.send(vec![JobSnapshot {
                    id: 0,
                    query: "trump".to_string(),
                    sort_mode: SortMode::New,
                    window_size: 3,
                    cursor: "A".to_string(),
                    active: true,
                    in_flight: true,
                }]);
            }
        });

        let request = Request::builder().uri("/jobs").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["jobs"][0]["query"], "trump");
        assert_eq!(json["jobs"][0]["sort_mode"], "new");
        assert_eq!(json["jobs"][0]["cursor"], "A");
    }
}
