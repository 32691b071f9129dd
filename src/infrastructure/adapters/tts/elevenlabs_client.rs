//! ElevenLabs TTS Client - 调用 ElevenLabs HTTP API
//!
//! 实现 TtsEnginePort trait
//!
//! 外部 API:
//! POST {base_url}/v1/text-to-speech/{voice_id}
//! Request: {"text": "...", "model_id": "...", "voice_settings": {...}}  (JSON)
//! Headers: xi-api-key, Accept: audio/mpeg
//! Response: audio/mpeg binary

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::application::ports::{
    SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError, VoiceSettings,
};

/// 合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct TtsHttpRequest {
    /// 要合成的文本
    text: String,
    /// 固定模型标识
    model_id: String,
    /// 固定音色参数
    voice_settings: VoiceSettings,
}

/// ElevenLabs 客户端配置
///
/// API key 在进程启动时解析一次并显式传入（不做全局查找）
#[derive(Debug, Clone)]
pub struct ElevenLabsClientConfig {
    /// API 基础 URL
    pub base_url: String,
    /// API 凭证（xi-api-key 头）
    pub api_key: String,
    /// 模型标识（本版本固定）
    pub model_id: String,
    /// 单次请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for ElevenLabsClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".to_string(),
            api_key: String::new(),
            model_id: "eleven_multilingual_v2".to_string(),
            timeout_secs: 60,
        }
    }
}

impl ElevenLabsClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// ElevenLabs TTS 客户端
pub struct ElevenLabsClient {
    client: Client,
    config: ElevenLabsClientConfig,
}

impl ElevenLabsClient {
    /// 创建新的客户端
    pub fn new(config: ElevenLabsClientConfig) -> Result<Self, TtsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TtsError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 指定音色的合成端点
    fn synthesis_url(&self, voice_id: &str) -> String {
        format!(
            "{}/v1/text-to-speech/{}",
            self.config.base_url.trim_end_matches('/'),
            voice_id
        )
    }
}

#[async_trait]
impl TtsEnginePort for ElevenLabsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
        let url = self.synthesis_url(&request.voice_id);
        let http_request = TtsHttpRequest {
            text: request.text,
            model_id: self.config.model_id.clone(),
            voice_settings: request.voice_settings,
        };

        tracing::debug!(
            url = %url,
            text_len = http_request.text.len(),
            "Sending TTS synthesis request"
        );

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.config.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&http_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TtsError::Timeout
                } else if e.is_connect() {
                    TtsError::NetworkError(format!("Cannot connect to TTS service: {}", e))
                } else {
                    TtsError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TtsError::ServiceError {
                status: status.as_u16(),
                body,
            });
        }

        // 响应体就是音频字节流，按原样返回
        let audio_data = response
            .bytes()
            .await
            .map_err(|e| TtsError::InvalidResponse(format!("Failed to read audio: {}", e)))?
            .to_vec();

        if audio_data.is_empty() {
            return Err(TtsError::InvalidResponse(
                "Empty audio response body".to_string(),
            ));
        }

        tracing::debug!(audio_size = audio_data.len(), "TTS synthesis completed");

        Ok(SynthesisResponse { audio_data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ElevenLabsClientConfig::default();
        assert_eq!(config.base_url, "https://api.elevenlabs.io");
        assert_eq!(config.model_id, "eleven_multilingual_v2");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_config_builder() {
        let config = ElevenLabsClientConfig::new("key-123")
            .with_base_url("http://localhost:9000")
            .with_timeout(30);
        assert_eq!(config.api_key, "key-123");
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_synthesis_url_per_voice() {
        let client =
            ElevenLabsClient::new(ElevenLabsClientConfig::new("k")).unwrap();
        assert_eq!(
            client.synthesis_url("21m00Tcm4TlvDq8ikWAM"),
            "https://api.elevenlabs.io/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"
        );

        let client = ElevenLabsClient::new(
            ElevenLabsClientConfig::new("k").with_base_url("http://host:9000/"),
        )
        .unwrap();
        assert_eq!(
            client.synthesis_url("V1"),
            "http://host:9000/v1/text-to-speech/V1"
        );
    }

    #[test]
    fn test_request_body_carries_fixed_settings() {
        let body = TtsHttpRequest {
            text: "Hi".to_string(),
            model_id: "eleven_multilingual_v2".to_string(),
            voice_settings: VoiceSettings::default(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["text"], "Hi");
        assert_eq!(json["model_id"], "eleven_multilingual_v2");
        let settings = &json["voice_settings"];
        // f32 序列化的浮点容差
        assert!((settings["stability"].as_f64().unwrap() - 0.8).abs() < 1e-6);
        assert!((settings["similarity_boost"].as_f64().unwrap() - 0.8).abs() < 1e-6);
        assert!((settings["style"].as_f64().unwrap() - 0.5).abs() < 1e-6);
        assert_eq!(settings["use_speaker_boost"], true);
    }
}
