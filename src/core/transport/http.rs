//! HTTP transport implementation.
//!
//! JSON over HTTP. Every failure is answered with `{"error": "<message>"}`
//! and a status chosen per route:
//!
//! | Route | bad input | bad index | provider failure |
//! |---|---|---|---|
//! | `POST /prompt` | 400 | - | - |
//! | `GET /prompt/{index}` | - | 404 | 500 |
//! | `PUT /prompt/{index}` | 400 | 400 | - |
//! | `DELETE /prompt/{index}` | - | 400 | - |

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use super::{HttpConfig, TransportError, TransportResult};
use crate::core::RelayServer;
use crate::domains::prompts::{CreatedPrompt, DeletedPrompt, PromptCompletion, PromptError};

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Bind the configured address and serve until the server stops.
    pub async fn run(self, server: RelayServer) -> TransportResult<()> {
        let addr = self.address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → Prompts: POST /prompt, GET|PUT|DELETE /prompt/{{index}}");
        info!("  → Health:  GET /health");

        serve(listener, server).await
    }
}

/// Serve the relay on an already-bound listener.
pub async fn serve(listener: TcpListener, server: RelayServer) -> TransportResult<()> {
    let app = build_router(server);

    axum::serve(listener, app)
        .await
        .map_err(|e| TransportError::http(e.to_string()))
}

/// Build the relay router.
pub fn build_router(server: RelayServer) -> Router {
    let enable_cors = server.config().http.enable_cors;

    let mut app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/prompt", post(create_prompt))
        .route(
            "/prompt/{index}",
            get(get_response).put(update_prompt).delete(delete_prompt),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(server);

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

/// JSON error response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Map a prompt error, using `bad_index` for out-of-range indices.
    fn from_prompt(err: PromptError, bad_index: StatusCode) -> Self {
        let status = match &err {
            PromptError::InvalidInput => StatusCode::BAD_REQUEST,
            PromptError::IndexOutOfRange { .. } => bad_index,
            PromptError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }

    fn unknown_index() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Invalid prompt index")
    }
}

/// Parse an `{index}` path segment.
///
/// Returns `None` when the segment is not an integer. Integers too large for
/// `i64` saturate, which no store can hold, so they are reported as out of
/// range by the store like any other bad index.
fn parse_index(segment: &str) -> Option<i64> {
    let (negative, digits) = match segment.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, segment),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(segment.parse().unwrap_or(if negative { i64::MIN } else { i64::MAX }))
}

fn index_from(path: Result<Path<String>, PathRejection>) -> Result<i64, ApiError> {
    let Path(segment) = path.map_err(|_| ApiError::unknown_index())?;
    parse_index(&segment).ok_or_else(ApiError::unknown_index)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}

type ApiResult<T> = Result<(StatusCode, Json<T>), ApiError>;

/// Read the `prompt` string out of a request body.
///
/// Malformed JSON, a missing field and a non-string value all yield `None`.
fn prompt_text(payload: Result<Json<serde_json::Value>, JsonRejection>) -> Option<String> {
    match payload {
        Ok(Json(body)) => body
            .get("prompt")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
        Err(rejection) => {
            warn!("Rejected request body: {}", rejection.body_text());
            None
        }
    }
}

/// Root handler - liveness probe used by the client.
async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

/// Health check endpoint.
async fn health_check(State(server): State<RelayServer>) -> impl IntoResponse {
    let prompts = server.prompts().len().await;

    Json(serde_json::json!({
        "status": "healthy",
        "name": server.name(),
        "version": server.version(),
        "prompts": prompts,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all)]
async fn create_prompt(
    State(server): State<RelayServer>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> ApiResult<CreatedPrompt> {
    let text = prompt_text(payload)
        .ok_or_else(|| ApiError::from_prompt(PromptError::InvalidInput, StatusCode::BAD_REQUEST))?;

    let created = server
        .prompts()
        .create(&text)
        .await
        .map_err(|e| ApiError::from_prompt(e, StatusCode::BAD_REQUEST))?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip_all)]
async fn get_response(
    State(server): State<RelayServer>,
    index: Result<Path<String>, PathRejection>,
) -> ApiResult<PromptCompletion> {
    let index = index_from(index)?;
    info!("Completing prompt {}", index);

    let completion = server
        .prompts()
        .complete(index)
        .await
        .map_err(|e| ApiError::from_prompt(e, StatusCode::NOT_FOUND))?;

    Ok((StatusCode::OK, Json(completion)))
}

#[instrument(skip_all)]
async fn update_prompt(
    State(server): State<RelayServer>,
    index: Result<Path<String>, PathRejection>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> ApiResult<CreatedPrompt> {
    let index = index_from(index)?;

    // An unusable body becomes empty text so the store still reports a bad
    // index before bad input.
    let text = prompt_text(payload).unwrap_or_default();

    let updated = server
        .prompts()
        .update(index, &text)
        .await
        .map_err(|e| ApiError::from_prompt(e, StatusCode::BAD_REQUEST))?;

    Ok((StatusCode::OK, Json(updated)))
}

#[instrument(skip_all)]
async fn delete_prompt(
    State(server): State<RelayServer>,
    index: Result<Path<String>, PathRejection>,
) -> ApiResult<DeletedPrompt> {
    let index = index_from(index)?;

    let deleted = server
        .prompts()
        .delete(index)
        .await
        .map_err(|e| ApiError::from_prompt(e, StatusCode::BAD_REQUEST))?;

    Ok((StatusCode::OK, Json(deleted)))
}
