//! Audio Handler - 下载最终合并音频

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;

use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 返回最后一次运行产出的合并 MP3
pub async fn get_final_audio(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let audio_data = state.store.read_final().await.map_err(|_| {
        ApiError::NotFound("No combined audio yet, run a generation first".to_string())
    })?;

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "audio/mpeg")
        .header(header::CONTENT_LENGTH, audio_data.len())
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"final_output.mp3\"",
        )
        .body(Body::from(audio_data))
        .map_err(|e| ApiError::Internal(e.to_string()))?)
}
