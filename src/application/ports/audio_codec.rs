//! Audio Codec Port - 音频编解码抽象
//!
//! 解码产出单声道 f32 PCM 剪辑，编码将拼接结果导出为固定输出格式。
//! 拼接所需的静音、追加、重采样是剪辑自身的纯函数。

use thiserror::Error;

/// 编解码错误
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 解码后的音频剪辑
///
/// 单声道 f32 样本序列。剪辑由当前持有它的阶段独占，
/// 不存在并发共享或修改。
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// PCM 样本（单声道，[-1.0, 1.0]）
    pub samples: Vec<f32>,
    /// 采样率（Hz）
    pub sample_rate: u32,
}

impl AudioClip {
    /// 指定时长的静音剪辑
    pub fn silence(duration_ms: u64, sample_rate: u32) -> Self {
        let sample_count = (duration_ms * sample_rate as u64 / 1000) as usize;
        Self {
            samples: vec![0.0; sample_count],
            sample_rate,
        }
    }

    /// 剪辑时长（毫秒）
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.samples.len() as u64 * 1000 / self.sample_rate as u64
    }

    /// 追加另一段剪辑
    ///
    /// 采样率不一致时先把对方线性重采样到本剪辑的采样率
    pub fn append(&mut self, other: &AudioClip) {
        if other.sample_rate == self.sample_rate {
            self.samples.extend_from_slice(&other.samples);
        } else {
            let resampled = other.resampled(self.sample_rate);
            self.samples.extend_from_slice(&resampled.samples);
        }
    }

    /// 线性插值重采样
    pub fn resampled(&self, target_rate: u32) -> AudioClip {
        if target_rate == self.sample_rate || self.samples.is_empty() {
            return AudioClip {
                samples: self.samples.clone(),
                sample_rate: target_rate,
            };
        }

        let ratio = target_rate as f64 / self.sample_rate as f64;
        let frame_count = self.samples.len();
        let new_frame_count = (frame_count as f64 * ratio) as usize;
        let mut resampled = Vec::with_capacity(new_frame_count);

        for i in 0..new_frame_count {
            let src_pos = i as f64 / ratio;
            let src_idx = src_pos as usize;
            let frac = src_pos - src_idx as f64;

            let s0 = self.samples.get(src_idx).copied().unwrap_or(0.0);
            let s1 = self
                .samples
                .get((src_idx + 1).min(frame_count - 1))
                .copied()
                .unwrap_or(s0);

            // 线性插值
            resampled.push(s0 + (s1 - s0) * frac as f32);
        }

        AudioClip {
            samples: resampled,
            sample_rate: target_rate,
        }
    }
}

/// Audio Codec Port
///
/// 解码剪辑、编码拼接结果的抽象接口
pub trait AudioCodecPort: Send + Sync {
    /// 解码音频字节为剪辑
    ///
    /// 解码失败是致命错误，调用方应整体中止拼接
    fn decode(&self, data: &[u8]) -> Result<AudioClip, CodecError>;

    /// 将剪辑编码为输出格式的字节流
    fn encode(&self, clip: &AudioClip) -> Result<Vec<u8>, CodecError>;

    /// 输出文件扩展名（不含点）
    fn output_extension(&self) -> &'static str;
}
