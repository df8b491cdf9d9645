use axum::body::Body;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use ferrous_cdn_application::services::RenderedResponse;
use ferrous_cdn_application::use_cases::{GetCacheStatsUseCase, ServeResourceUseCase};
use ferrous_cdn_domain::{CacheStats, DomainError};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub serve_resource: Arc<ServeResourceUseCase>,
    pub get_cache_stats: Arc<GetCacheStatsUseCase>,
    pub route_prefix: Arc<str>,
}

pub fn create_app(state: AppState) -> Router {
    let resource_route = if &*state.route_prefix == "/" {
        "/{*path}".to_string()
    } else {
        format!("{}/{{*path}}", state.route_prefix)
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/api/cache/stats", get(get_cache_stats))
        .route(&resource_route, get(serve_resource))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_web_server(
    addr: SocketAddr,
    app: Router,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Web server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    info!("Web server stopped");
    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

async fn get_cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.get_cache_stats.execute())
}

/// Keys are taken from the raw request path so percent-encoding is kept as sent.
async fn serve_resource(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri
        .path()
        .strip_prefix(&*state.route_prefix)
        .unwrap_or(uri.path());

    match state.serve_resource.execute(path).await {
        Ok(rendered) => into_http_response(rendered),
        Err(e) => {
            warn!(path = %path, error = %e, "Resource request failed");
            (error_status(&e), e.to_string()).into_response()
        }
    }
}

fn into_http_response(rendered: RenderedResponse) -> Response {
    let mut response = Response::new(Body::from(rendered.body));
    *response.status_mut() = StatusCode::from_u16(rendered.status).unwrap_or(StatusCode::OK);

    if let Some(content_type) = rendered.content_type {
        if let Ok(value) = HeaderValue::from_str(&content_type) {
            response.headers_mut().insert(CONTENT_TYPE, value);
        }
    }
    response
}

fn error_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::MalformedKey(_) => StatusCode::BAD_REQUEST,
        DomainError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::FetchAborted(_) => StatusCode::BAD_GATEWAY,
        DomainError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
