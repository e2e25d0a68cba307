use std::sync::Arc;

use asegurate_core::{
    Action, AdvisorError, AdvisorRunner, Catalog, ComparisonCriteria, ComparisonView,
    InMemorySessionStorage, InsuranceProduct, SessionState, SessionStorage, StepResult,
    TextGenerator, compare,
};
use axum::{
    Router,
    extract::{Path, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::{Next, from_fn},
    response::{Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, error, info, warn};
use uuid::Uuid;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

#[derive(Clone)]
pub struct AppState {
    pub runner: AdvisorRunner,
    pub generator: Arc<dyn TextGenerator>,
    pub catalog: Arc<Catalog>,
}

impl AppState {
    /// State backed by in-memory sessions; each session lives as long as the process.
    pub fn new(generator: Arc<dyn TextGenerator>, catalog: Catalog) -> Self {
        Self::with_storage(generator, catalog, Arc::new(InMemorySessionStorage::new()))
    }

    pub fn with_storage(
        generator: Arc<dyn TextGenerator>,
        catalog: Catalog,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        let runner = AdvisorRunner::new(generator.clone(), storage);
        Self {
            runner,
            generator,
            catalog: Arc::new(catalog),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AdvisorRequest {
    pub session_id: Option<String>,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn advisor_error(err: AdvisorError) -> ApiError {
    let status = match &err {
        AdvisorError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        AdvisorError::InvalidTransition { .. } | AdvisorError::MissingProfile => {
            StatusCode::CONFLICT
        }
        AdvisorError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!(error = %err, "Request failed");
    } else {
        warn!(error = %err, status = %status, "Request rejected");
    }
    error_response(status, err.to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/advisor", post(advisor_step))
        .route("/advisor/{session_id}", get(get_session))
        .route("/compare", post(compare_products))
        .route("/catalog", get(list_catalog))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn(correlation_id_middleware))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Middleware to add a correlation ID to every request and its response
async fn correlation_id_middleware(mut request: Request, next: Next) -> Response {
    let correlation_id = Uuid::new_v4().to_string();
    let header = HeaderValue::from_str(&correlation_id).ok();

    if let Some(value) = &header {
        request
            .headers_mut()
            .insert(CORRELATION_ID_HEADER, value.clone());
    }

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    let mut response = next.run(request).instrument(span).await;

    if let Some(value) = header {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
    response
}

async fn health_check() -> &'static str {
    "OK"
}

async fn advisor_step(
    State(state): State<AppState>,
    Json(request): Json<AdvisorRequest>,
) -> ApiResult<StepResult> {
    info!(
        session_id = ?request.session_id,
        action = request.action.name(),
        "Processing advisor action"
    );

    let session_id = match request.session_id {
        Some(id) => {
            if Uuid::parse_str(&id).is_err() {
                warn!(session_id = %id, "Invalid session ID format");
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    "Invalid session ID format",
                ));
            }
            id
        }
        None => {
            // A new session is only stored once its first action is known to apply
            SessionState::new()
                .transition(request.action.clone())
                .map_err(advisor_error)?;
            state.runner.open().await.map_err(advisor_error)?.session_id
        }
    };

    let step = state
        .runner
        .run(&session_id, request.action)
        .await
        .map_err(advisor_error)?;

    Ok(Json(step))
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<SessionState> {
    let session = state
        .runner
        .state(&session_id)
        .await
        .map_err(advisor_error)?;
    Ok(Json(session))
}

async fn compare_products(
    State(state): State<AppState>,
    Json(criteria): Json<ComparisonCriteria>,
) -> ApiResult<ComparisonView> {
    let view = compare(&criteria, state.catalog.products(), state.generator.as_ref())
        .await
        .map_err(advisor_error)?;
    Ok(Json(view))
}

async fn list_catalog(State(state): State<AppState>) -> Json<Vec<InsuranceProduct>> {
    Json(state.catalog.products().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use asegurate_core::Result;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct CannedGenerator {
        reply: std::result::Result<String, String>,
    }

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        fn model(&self) -> &str {
            "canned"
        }

        async fn generate(&self, _prompt: &str) -> Result<String> {
            self.reply.clone().map_err(AdvisorError::Generation)
        }
    }

    fn app(reply: std::result::Result<&str, &str>) -> Router {
        app_with_storage(reply, Arc::new(InMemorySessionStorage::new()))
    }

    fn app_with_storage(
        reply: std::result::Result<&str, &str>,
        storage: Arc<InMemorySessionStorage>,
    ) -> Router {
        let generator = CannedGenerator {
            reply: reply.map(str::to_string).map_err(str::to_string),
        };
        build_router(AppState::with_storage(
            Arc::new(generator),
            Catalog::builtin(),
            storage,
        ))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        };
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn ana() -> Value {
        json!({
            "name": "Ana",
            "age": 40,
            "occupation": "Chef",
            "monthly_income": 3000,
            "insurance_type": "health",
            "specific_needs": ""
        })
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let app = app(Ok("unused"));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
    }

    #[tokio::test]
    async fn advisor_flow_over_http() {
        let app = app(Ok("Recomendación de Seguro: Salud"));

        let (status, body) = send(&app, "POST", "/advisor", Some(json!({"action": "start"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], "form");
        assert_eq!(body["view"]["kind"], "form");
        let session_id = body["session_id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            "POST",
            "/advisor",
            Some(json!({"session_id": session_id, "action": "submit", "profile": ana()})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], "result");
        assert_eq!(body["view"]["outcome"]["status"], "recommendation");
        assert_eq!(body["view"]["outcome"]["text"], "Recomendación de Seguro: Salud");

        let (status, body) = send(&app, "GET", &format!("/advisor/{session_id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], "result");
        assert_eq!(body["profile"]["name"], "Ana");

        let (status, body) = send(
            &app,
            "POST",
            "/advisor",
            Some(json!({"session_id": session_id, "action": "restart"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], "main");
    }

    #[tokio::test]
    async fn advisor_generation_failure_is_inline() {
        let app = app(Err("quota exceeded"));
        let (_, body) = send(&app, "POST", "/advisor", Some(json!({"action": "start"}))).await;
        let session_id = body["session_id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            "POST",
            "/advisor",
            Some(json!({"session_id": session_id, "action": "submit", "profile": ana()})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["view"]["outcome"]["status"], "generation_failed");
        assert!(
            body["view"]["outcome"]["error"]
                .as_str()
                .unwrap()
                .contains("quota exceeded")
        );
    }

    #[tokio::test]
    async fn advisor_rejects_bad_requests() {
        let storage = Arc::new(InMemorySessionStorage::new());
        let app = app_with_storage(Ok("unused"), storage.clone());

        let (status, _) = send(
            &app,
            "POST",
            "/advisor",
            Some(json!({"session_id": "not-a-uuid", "action": "start"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let unknown = Uuid::new_v4().to_string();
        let (status, _) = send(
            &app,
            "POST",
            "/advisor",
            Some(json!({"session_id": unknown, "action": "start"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "POST", "/advisor", Some(json!({"action": "restart"}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("restart"));
        assert!(storage.is_empty());

        let (status, _) = send(
            &app,
            "POST",
            "/advisor",
            Some(json!({"action": "submit", "profile": ana()})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(storage.is_empty());

        let (_, body) = send(&app, "POST", "/advisor", Some(json!({"action": "start"}))).await;
        let session_id = body["session_id"].as_str().unwrap().to_string();
        let mut minor = ana();
        minor["age"] = json!(15);
        let (status, _) = send(
            &app,
            "POST",
            "/advisor",
            Some(json!({"session_id": session_id, "action": "submit", "profile": minor})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn compare_returns_recommendation() {
        let app = app(Ok("### ✨ Tu Recomendación Personalizada: Plan Futuro Brillante"));
        let (status, body) = send(
            &app,
            "POST",
            "/compare",
            Some(json!({
                "age": 30,
                "annual_income": 30000,
                "coverage_duration": "short",
                "priorities": ["low_cost"]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "recommendation");
        assert_eq!(
            body["text"],
            "### ✨ Tu Recomendación Personalizada: Plan Futuro Brillante"
        );
    }

    #[tokio::test]
    async fn compare_rejects_out_of_range_age() {
        let app = app(Ok("unused"));
        let (status, _) = send(
            &app,
            "POST",
            "/compare",
            Some(json!({
                "age": 85,
                "annual_income": 30000,
                "coverage_duration": "unsure"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn catalog_lists_builtin_products() {
        let app = app(Ok("unused"));
        let (status, body) = send(&app, "GET", "/catalog", None).await;
        assert_eq!(status, StatusCode::OK);
        let products = body.as_array().unwrap();
        assert_eq!(products.len(), 4);
        assert_eq!(products[0]["name"], "Póliza SeguraVida Clásica");
    }
}
