use axum::{
    Router,
    body::Bytes,
    extract::{Request, State, rejection::BytesRejection},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{Next, from_fn},
    response::{Json, Response},
    routing::post,
};
use movie_recs::RecommendationSource;
use serde_json::value::RawValue;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{Instrument, error, info, warn};
use uuid::Uuid;

use crate::models::{ApiResponse, ErrorResponse, PromptRequest};

const CORRELATION_HEADER: &str = "x-correlation-id";
const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn bad_request_error(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn internal_error(message: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RecommendationSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn RecommendationSource>) -> Self {
        Self { source }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(recommend))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn(correlation_id_middleware))
                .layer(cors_layer())
                .layer(CatchPanicLayer::new()),
        )
        .with_state(state)
}

/// Any origin may call, with credentials. The origin is mirrored back because
/// browsers refuse a literal `*` when credentials are allowed.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_LENGTH])
        .allow_credentials(true)
        .max_age(PREFLIGHT_MAX_AGE)
}

/// Tag every request with a correlation id, in a span and on both header maps.
async fn correlation_id_middleware(mut request: Request, next: Next) -> Response {
    let correlation_id = Uuid::new_v4().to_string();
    let header_value = HeaderValue::from_str(&correlation_id).ok();

    if let Some(value) = &header_value {
        request.headers_mut().insert(CORRELATION_HEADER, value.clone());
    }

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    let mut response = next.run(request).instrument(span).await;

    if let Some(value) = header_value {
        response.headers_mut().insert(CORRELATION_HEADER, value);
    }
    response
}

/// Decode the body as JSON whatever the Content-Type says.
fn bind_prompt(body: Result<Bytes, BytesRejection>) -> Result<PromptRequest, ApiError> {
    let bytes = body.map_err(|rejection| {
        warn!(error = %rejection, "Failed to read request body");
        bad_request_error("Invalid request format")
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(error = %e, "Request binding error");
        bad_request_error("Invalid request format")
    })
}

async fn recommend(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<ApiResponse> {
    info!("Starting new request");

    let request = bind_prompt(body)?;

    info!(prompt = %request.prompt, "Received prompt");

    if request.prompt.is_empty() {
        warn!("Empty prompt received");
        return Err(bad_request_error("Prompt cannot be empty"));
    }

    info!("Getting AI recommendations");
    let recommendations = state.source.fetch(&request.prompt).await.map_err(|e| {
        error!(error = %e, "Getting recommendations failed");
        internal_error(&format!("Getting recommendations failed: {}", e))
    })?;
    info!("Received recommendations");

    let recommendations = RawValue::from_string(recommendations).map_err(|e| {
        error!(error = %e, "Failed to parse recommendations as JSON");
        internal_error("Invalid recommendations format")
    })?;

    info!("Sending final response");
    Ok(Json(ApiResponse::success(request.prompt, recommendations)))
}
