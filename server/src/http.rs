use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use analytics::{
    Category, ParseCategoryError, Summary, employee_growth_figure, promotion_rate_figure,
    service_distribution_figure,
};
use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{self, HeaderName, HeaderValue, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use dataset::Dataset;
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::AppConfig;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

/// Shared request state. The table is read-only after load, so it is shared
/// without locking; the two static figures are computed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub dataset: Arc<Dataset>,
    pub summary: Summary,
    pub growth_figure: Arc<Value>,
    pub distribution_figure: Arc<Value>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(dataset: Dataset, config: Arc<AppConfig>) -> Self {
        let summary = Summary::compute(&dataset);
        let growth_figure = Arc::new(employee_growth_figure(&dataset));
        let distribution_figure = Arc::new(service_distribution_figure(&dataset));
        Self {
            dataset: Arc::new(dataset),
            summary,
            growth_figure,
            distribution_figure,
            config,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "dashboard server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };
    CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::GET])
        .allow_origin(allow_origin)
}

pub fn build_router(state: AppState) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/summary", get(summary_handler))
        .route("/api/categories", get(categories_handler))
        .route("/api/charts/employee-growth", get(employee_growth_handler))
        .route(
            "/api/charts/service-distribution",
            get(service_distribution_handler),
        )
        .route("/api/charts/promotion-rate", get(promotion_rate_handler))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

async fn index_handler() -> Response {
    match Assets::get("index.html") {
        Some(asset) => Html(asset.data.into_owned()).into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "dashboard page missing").into_response(),
    }
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        ok: true,
        dataset_rows: state.dataset.len(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    dataset_rows: usize,
    version: &'static str,
}

#[derive(Serialize)]
struct SummaryResponse {
    title: String,
    #[serde(flatten)]
    summary: Summary,
}

async fn summary_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(SummaryResponse {
        title: state.config.dashboard_title.clone(),
        summary: state.summary,
    })
}

async fn categories_handler() -> impl IntoResponse {
    Json(Category::options())
}

async fn employee_growth_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.growth_figure.as_ref().clone())
}

async fn service_distribution_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.distribution_figure.as_ref().clone())
}

#[derive(Deserialize)]
struct PromotionRateQuery {
    category: String,
}

/// The dropdown callback: recomputes the ranking figure from the full table
/// on every request. Values outside the option set fail loudly.
async fn promotion_rate_handler(
    State(state): State<AppState>,
    Query(query): Query<PromotionRateQuery>,
) -> HttpResult<Json<Value>> {
    let category: Category = query
        .category
        .parse()
        .map_err(|err: ParseCategoryError| HttpError::new(StatusCode::BAD_REQUEST, &err.to_string()))?;
    Ok(Json(promotion_rate_figure(&state.dataset, category)))
}

type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    fn new(status: StatusCode, msg: &str) -> Self {
        Self {
            status,
            message: msg.to_string(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
}
