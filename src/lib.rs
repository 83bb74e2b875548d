use axum::{
    Router,
    extract::{FromRef, Request, State},
    http::HeaderName,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Session gating core.
pub mod auth;
pub mod guard;
pub mod paths;

// Host process plumbing.
pub mod config;
pub mod error;
pub mod handlers;

// Gate-owned routes and the front-end bundle.
pub mod routes;
use routes::{pages, public};

// --- Public Re-exports ---

pub use auth::SessionToken;
pub use config::AppConfig;
pub use error::ConfigError;
pub use guard::GuardDecision;
pub use paths::{PROTECTED, ProtectedPaths};

/// AppState
///
/// Read-only state shared by every request: the loaded configuration and the protected
/// path set. Cloning is cheap; nothing in it is ever mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub paths: ProtectedPaths,
}

impl AppState {
    /// State gating the compiled-in `PROTECTED` set.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            paths: PROTECTED,
        }
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for ProtectedPaths {
    fn from_ref(app_state: &AppState) -> ProtectedPaths {
        app_state.paths
    }
}

/// route_guard
///
/// Middleware evaluated once per request, ahead of every route and the page fallback.
///
/// *Mechanism*: reads the URI path and the optional `token` cookie, asks
/// [`guard::evaluate`] for a decision, records it on the request span, and either hands
/// the untouched request to the next service or answers with a 307 to the sign-in page.
async fn route_guard(
    State(paths): State<ProtectedPaths>,
    token: Option<SessionToken>,
    request: Request,
    next: Next,
) -> Response {
    let decision = guard::evaluate(&paths, request.uri().path(), token.as_ref());
    Span::current().record("guard", decision.label());

    match decision {
        GuardDecision::Forward => next.run(request).await,
        GuardDecision::Redirect(redirect) => redirect.into_response(),
    }
}

/// create_router
///
/// Assembles the gate: public routes, the page fallback, the route guard in front of
/// both, then the observability stack around everything.
pub fn create_router(state: AppState) -> Router {
    // 1. CORS Configuration
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for Request Correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // 2. Base Router Assembly
    let base_router = Router::new()
        // Gate-owned endpoints.
        .merge(public::public_routes())
        // Everything else is a page of the front-end bundle.
        .fallback_service(pages::page_service(&state.config))
        // Route Guard: applied with `layer` rather than `route_layer` so it also covers
        // the fallback, where every protected page lives.
        .layer(middleware::from_fn_with_state(state.clone(), route_guard))
        .with_state(state);

    // 3. Observability and Correlation Layers (outermost)
    base_router
        .layer(
            ServiceBuilder::new()
                // 3a. Request ID Generation.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // 3b. Request Tracing, one span per request carrying the request ID.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // 3c. Request ID Propagation back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        // 4. CORS Layer
        .layer(cors)
}

/// trace_span_logger
///
/// Builds the `TraceLayer` span so every log line of a request carries its method, URI
/// and `x-request-id`. The `guard` field is left empty here and filled in by
/// `route_guard` with the decision (`forward` or `redirect`), so the response log line
/// shows why a protected page answered 307.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
        guard = tracing::field::Empty,
    )
}
