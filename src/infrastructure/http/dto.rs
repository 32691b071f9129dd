//! Data Transfer Objects

use serde::Serialize;

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

/// 跳过条目的呈现
#[derive(Debug, Serialize)]
pub struct SkippedEntryDto {
    pub index: usize,
    pub reason: String,
}

/// 失败条目的呈现
#[derive(Debug, Serialize)]
pub struct FailedEntryDto {
    pub index: usize,
    pub error: String,
}

/// 生成运行的结果报告
#[derive(Debug, Serialize)]
pub struct GenerateResponseDto {
    pub run_id: String,
    /// 合并文件的下载地址
    pub audio_url: String,
    pub duration_ms: u64,
    pub entry_count: usize,
    pub synthesized_count: usize,
    pub skipped: Vec<SkippedEntryDto>,
    pub failed: Vec<FailedEntryDto>,
    pub generated_at: String,
}
