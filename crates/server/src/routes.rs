pub mod auth;
pub mod collections;
pub mod contact;
pub mod public;

use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public API, auth, session-gated admin API
/// and the static frontend (SPA fallback to `index.html`).
pub fn build_router(state: ServerState, cors: CorsLayer, static_dir: &str) -> Router {
    let frontend = ServeDir::new(static_dir).fallback(ServeFile::new(format!("{static_dir}/index.html")));

    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/api/home", get(public::home))
        .route("/api/about", get(public::about))
        .route("/api/services", get(public::services))
        .route("/api/portfolio", get(public::portfolio))
        .route("/api/stock-videos", get(public::stock_videos))
        .route("/api/collections/:collection", get(collections::public_list))
        .route("/api/contact-info", get(contact::public_info))
        .route("/api/contact", post(contact::submit))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout));

    let admin = Router::new()
        .route("/auth/session", get(auth::current_session))
        .route("/admin/dashboard", get(collections::dashboard))
        .route("/admin/collections/:collection", get(collections::list).post(collections::create))
        .route("/admin/collections/:collection/reorder", post(collections::reorder))
        .route("/admin/collections/:collection/move", post(collections::move_record))
        .route(
            "/admin/collections/:collection/:id",
            put(collections::update).delete(collections::delete),
        )
        .route("/admin/contact-info", get(contact::get_info).put(contact::put_info))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_admin_session));

    public
        .merge(admin)
        .fallback_service(frontend)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
