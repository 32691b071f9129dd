//! Fake TTS Client - 用于开发和测试的 TTS 客户端
//!
//! 不调用远端服务，始终返回生成的固定时长 WAV

use async_trait::async_trait;

use crate::application::ports::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError};
use crate::infrastructure::adapters::codec::synthetic_wav;

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 每条返回音频的时长（毫秒）
    pub duration_ms: u64,
    /// 采样率
    pub sample_rate: u32,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000,
            sample_rate: 22050,
        }
    }
}

/// Fake TTS Client
pub struct FakeTtsClient {
    /// 预生成的音频数据
    audio_data: Vec<u8>,
    config: FakeTtsClientConfig,
}

impl FakeTtsClient {
    pub fn new(config: FakeTtsClientConfig) -> Self {
        let audio_data = synthetic_wav(config.duration_ms, config.sample_rate);
        tracing::info!(
            duration_ms = config.duration_ms,
            sample_rate = config.sample_rate,
            "FakeTtsClient initialized"
        );
        Self { audio_data, config }
    }

    pub fn with_defaults() -> Self {
        Self::new(FakeTtsClientConfig::default())
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
        tracing::debug!(
            text_len = request.text.len(),
            voice_id = %request.voice_id,
            duration_ms = self.config.duration_ms,
            "FakeTtsClient: returning generated audio"
        );

        // 模拟一点推理延迟
        tokio::time::sleep(tokio::time::Duration::from_millis(20)).await;

        Ok(SynthesisResponse {
            audio_data: self.audio_data.clone(),
        })
    }
}
