//! TTS Engine Port - 远端语音合成抽象
//!
//! 远端 TTS 服务视为黑盒：一段文本 + 一个音色 ID 换一段音频字节流

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: HTTP {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 音色参数
///
/// 本版本为进程级常量，不开放给用户配置。合成器配置持有唯一一份，
/// 随每个请求传给 TTS 客户端。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
    pub style: f32,
    pub use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.8,
            similarity_boost: 0.8,
            style: 0.5,
            use_speaker_boost: true,
        }
    }
}

/// 合成请求
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 要合成的文本
    pub text: String,
    /// 音色 ID（决定请求的目标端点）
    pub voice_id: String,
    /// 音色参数（固定常量，由合成器注入）
    pub voice_settings: VoiceSettings,
}

/// 合成响应
#[derive(Debug, Clone)]
pub struct SynthesisResponse {
    /// 原始音频字节流，按原样落盘
    pub audio_data: Vec<u8>,
}

/// TTS Engine Port
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 合成一条语音
    ///
    /// 每个条目一次请求，阻塞等待响应或超时
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError>;
}
