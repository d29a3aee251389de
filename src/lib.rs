pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod state;
pub mod taxonomy;
pub mod web;

use axum::Router;
use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let db_ok = sqlx::query("SELECT 1")
        .execute(state.db.inner())
        .await
        .is_ok();
    Json(serde_json::json!({
        "status": if db_ok { "ok" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": if db_ok { "connected" } else { "error" },
    }))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(|| async { axum::response::Redirect::to("/web/api/categories") }),
        )
        .route("/health", get(health_check))
        .nest("/web", web::router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
