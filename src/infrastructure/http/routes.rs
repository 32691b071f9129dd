//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping               GET   健康检查
//! - /api/dialogue/generate  POST  提交脚本 JSON，同步执行整条流水线
//! - /api/audio/final        GET   下载最终合并音频

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/dialogue/generate", post(handlers::generate_audio))
        .route("/audio/final", get(handlers::get_final_audio))
}
