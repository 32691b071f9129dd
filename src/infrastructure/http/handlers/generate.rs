//! Generate Handler - 触发一次对话音频生成
//!
//! 请求体是用户提交的原始脚本 JSON。不用 Json extractor：
//! 畸形 JSON 属于业务层的输入校验错误，要以 errno 形式报告，
//! 而不是被框架拒绝成 400。

use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use crate::application::GenerateAudioCommand;
use crate::infrastructure::http::dto::{
    ApiResponse, FailedEntryDto, GenerateResponseDto, SkippedEntryDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn generate_audio(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<ApiResponse<GenerateResponseDto>>, ApiError> {
    if body.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Request body must contain the script JSON".to_string(),
        ));
    }

    let result = state
        .generate_handler
        .handle(GenerateAudioCommand { raw_script: body })
        .await?;

    Ok(Json(ApiResponse::success(GenerateResponseDto {
        run_id: result.run_id.to_string(),
        audio_url: format!("{}/api/audio/final", state.public_base_url),
        duration_ms: result.duration_ms,
        entry_count: result.entry_count,
        synthesized_count: result.synthesized_count,
        skipped: result
            .skipped
            .into_iter()
            .map(|s| SkippedEntryDto {
                index: s.index,
                reason: s.reason,
            })
            .collect(),
        failed: result
            .failed
            .into_iter()
            .map(|f| FailedEntryDto {
                index: f.index,
                error: f.error,
            })
            .collect(),
        generated_at: result.generated_at.to_rfc3339(),
    })))
}
