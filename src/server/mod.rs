//! Inbound HTTP surface: the generation endpoints used by the web forms.

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, warn};

use crate::error::{LettricsError, Result};
use crate::generation::Generator;
use crate::types::{GenerationRequest, ToolKind};

const GENERIC_FAILURE: &str = "Failed to generate content";

type SharedState = Arc<AppState>;

#[derive(Clone)]
pub struct AppState {
    pub generator: Generator,
}

/// Bind `addr` and serve until Ctrl-C or SIGTERM.
pub async fn serve(addr: SocketAddr, generator: Generator) -> Result<()> {
    let router = build_router(generator);
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Binding HTTP listener");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server exited");
    Ok(())
}

pub fn build_router(generator: Generator) -> Router {
    let state = Arc::new(AppState { generator });
    Router::new()
        .route("/api/generate", post(generate))
        .route("/api/generate_app", post(generate_app))
        .route("/api/gen_rep", post(gen_rep))
        .route("/api/gen_con", post(gen_con))
        .route("/healthz", get(health))
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new())
                .on_response(DefaultOnResponse::new()),
        )
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: GENERIC_FAILURE.to_string(),
        }
    }
}

impl From<LettricsError> for ApiError {
    fn from(err: LettricsError) -> Self {
        if err.is_validation() {
            return Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            };
        }
        warn!(error = %err, "generation request failed");
        Self::internal()
    }
}

fn panic_response(_: Box<dyn Any + Send + 'static>) -> Response {
    warn!("handler panicked");
    ApiError::internal().into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = json!({ "success": false, "error": self.message });
        (self.status, Json(payload)).into_response()
    }
}

/// Which tool an endpoint serves.
#[derive(Debug, Clone, Copy)]
enum Route {
    /// The body names the tool.
    Any,
    /// The endpoint serves one tool; `tool` in the body may be omitted but
    /// must match when present.
    Dedicated(ToolKind),
}

async fn generate(State(state): State<SharedState>, body: Bytes) -> Response {
    respond(&state, Route::Any, &body).await
}

async fn generate_app(State(state): State<SharedState>, body: Bytes) -> Response {
    respond(&state, Route::Dedicated(ToolKind::Application), &body).await
}

async fn gen_rep(State(state): State<SharedState>, body: Bytes) -> Response {
    respond(&state, Route::Dedicated(ToolKind::Report), &body).await
}

async fn gen_con(State(state): State<SharedState>, body: Bytes) -> Response {
    respond(&state, Route::Dedicated(ToolKind::Content), &body).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn respond(state: &AppState, route: Route, body: &[u8]) -> Response {
    match run(state, route, body).await {
        Ok(content) => Json(json!({ "success": true, "content": content })).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn run(state: &AppState, route: Route, body: &[u8]) -> std::result::Result<String, ApiError> {
    let value: Value = serde_json::from_slice(body).map_err(|err| {
        warn!(error = %err, "unreadable request body");
        ApiError::internal()
    })?;

    let request = match route {
        Route::Any => GenerationRequest::from_json(value, None)?,
        Route::Dedicated(tool) => {
            let request = GenerationRequest::from_json(value, Some(tool))?;
            if request.tool != tool {
                return Err(LettricsError::UnsupportedTool(request.tool.to_string()).into());
            }
            request
        }
    };

    let outcome = state.generator.generate(&request).await?;
    Ok(outcome.into_content())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{body, body::Body, http::Request};
    use tower::ServiceExt;

    use crate::provider::RemoteGenerator;
    use crate::request::ShapedRequest;

    struct Echo;

    #[async_trait]
    impl RemoteGenerator for Echo {
        async fn fetch(&self, request: &ShapedRequest) -> Result<String> {
            Ok(format!("**{}** reply", request.tool))
        }
    }

    fn test_router() -> Router {
        build_router(Generator::new(Arc::new(Echo)))
    }

    async fn post_json(uri: &str, body: &str) -> (StatusCode, Value) {
        let response = test_router()
            .oneshot(
                Request::post(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn generate_returns_normalized_content() {
        let (status, payload) = post_json("/api/generate", r#"{"tool":"essay","topic":"Rain"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["success"], true);
        assert_eq!(payload["content"], "𝗲𝘀𝘀𝗮𝘆 reply");
    }

    #[tokio::test]
    async fn missing_tool_is_a_bad_request() {
        let (status, payload) = post_json("/api/generate", r#"{"topic":"Rain"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["success"], false);
        assert_eq!(payload["error"], "Missing required fields: tool");
    }

    #[tokio::test]
    async fn unknown_tool_is_a_bad_request() {
        let (status, payload) = post_json("/api/generate", r#"{"tool":"sonnet","topic":"x"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["error"], "Unsupported tool: sonnet");
    }

    #[tokio::test]
    async fn dedicated_route_fills_in_its_tool() {
        let (status, payload) = post_json(
            "/api/gen_rep",
            r#"{"topic":"Flood","context":"River rose","date":"2024-07-01","tone":"Formal"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["content"], "𝗿𝗲𝗽𝗼𝗿𝘁 reply");
    }

    #[tokio::test]
    async fn dedicated_route_rejects_other_tools() {
        let (status, _) = post_json("/api/gen_con", r#"{"tool":"poem","topic":"x"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_json_is_a_server_error() {
        let (status, payload) = post_json("/api/generate", "{not json").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(payload["error"], GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = test_router()
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.status().is_success());
    }
}
