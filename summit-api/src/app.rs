/// Router assembly and shared state
///
/// `AppState` is what every handler sees through Axum's `State` extractor: the
/// connection pool plus the parsed configuration behind an `Arc`, so cloning
/// per request stays cheap. `build_router` wires the route tree:
///
/// ```text
/// /health                      public liveness + DB probe
/// /v1/auth/register            public
/// /v1/auth/login               public
/// /v1/hotels                   session-authenticated, eligibility-gated
/// /v1/hotels/:hotel_id         session-authenticated, eligibility-gated
/// ```
///
/// Tracing and CORS layers wrap the whole tree; the session middleware wraps
/// only the hotel routes.

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use summit_shared::auth::middleware::{session_auth_middleware, AuthError};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Config;
use crate::routes;

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Parsed configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// The token signing key
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the full router with middleware attached
pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    let hotel_routes = Router::new()
        .route("/", get(routes::hotels::list_hotels))
        .route("/:hotel_id", get(routes::hotels::get_hotel))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/v1/auth", auth_routes)
        .nest("/v1/hotels", hotel_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .with_state(state)
}

/// Builds the CORS layer from configuration
///
/// A lone "*" in `cors_origins` (the development default) yields permissive
/// CORS; anything else becomes an explicit origin allowlist.
fn cors_layer(config: &Config) -> CorsLayer {
    if config.api.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Adapts the shared session middleware to this router's state
async fn require_session(
    state: axum::extract::State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    session_auth_middleware(state.db.clone(), state.jwt_secret().to_string(), req, next).await
}
