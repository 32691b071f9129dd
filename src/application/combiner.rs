//! Audio Combiner - 音频拼接器
//!
//! 按顺序解码剪辑，在相邻剪辑之间插入固定时长静音，导出单个输出文件。
//! 缺失文件容忍跳过；解码失败立即整体中止，不写任何输出。
//! 拼接串行执行，后一步依赖累积器状态。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::application::ports::{AudioClip, AudioCodecPort};

/// 拼接错误
#[derive(Debug, Error)]
pub enum CombineError {
    /// 输入路径列表为空
    #[error("No audio files to combine")]
    EmptyInput,

    /// 所有路径都缺失，没有可解码的剪辑
    #[error("No decodable audio clips among {0} path(s)")]
    NoClips(usize),

    /// 剪辑解码失败 - 致命，中止整个拼接
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },

    /// 合并结果编码失败
    #[error("Failed to encode combined audio: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// 拼接结果
#[derive(Debug)]
pub struct CombineOutcome {
    /// 输出文件路径
    pub output_path: PathBuf,
    /// 合并音频的精确时长（毫秒，编码前的累积器时长）
    pub duration_ms: u64,
    /// 参与拼接的剪辑数
    pub clip_count: usize,
    /// 中途缺失被跳过的路径
    pub skipped_missing: Vec<PathBuf>,
}

/// 音频拼接器
pub struct AudioCombiner {
    codec: Arc<dyn AudioCodecPort>,
}

impl AudioCombiner {
    pub fn new(codec: Arc<dyn AudioCodecPort>) -> Self {
        Self { codec }
    }

    /// 拼接剪辑序列并导出
    ///
    /// 首个成功解码的剪辑作为累积器并决定目标采样率；后续每个剪辑
    /// 前插 `pause_ms` 静音。首尾不加静音。输出文件覆盖写入。
    pub async fn combine(
        &self,
        paths: &[PathBuf],
        output_path: &Path,
        pause_ms: u64,
    ) -> Result<CombineOutcome, CombineError> {
        if paths.is_empty() {
            return Err(CombineError::EmptyInput);
        }

        let mut accumulator: Option<AudioClip> = None;
        let mut clip_count = 0usize;
        let mut skipped_missing = Vec::new();

        for path in paths {
            let data = match tokio::fs::read(path).await {
                Ok(d) => d,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::warn!(path = %path.display(), "Audio part missing, skipping");
                    skipped_missing.push(path.clone());
                    continue;
                }
                Err(e) => return Err(CombineError::Io(e.to_string())),
            };

            let clip = self.codec.decode(&data).map_err(|e| CombineError::Decode {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

            tracing::debug!(
                path = %path.display(),
                duration_ms = clip.duration_ms(),
                sample_rate = clip.sample_rate,
                "Decoded audio part"
            );

            clip_count += 1;
            match accumulator.as_mut() {
                None => accumulator = Some(clip),
                Some(acc) => {
                    acc.append(&AudioClip::silence(pause_ms, acc.sample_rate));
                    acc.append(&clip);
                }
            }
        }

        let accumulator = accumulator.ok_or(CombineError::NoClips(paths.len()))?;
        let duration_ms = accumulator.duration_ms();

        let encoded = self
            .codec
            .encode(&accumulator)
            .map_err(|e| CombineError::Encode(e.to_string()))?;

        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CombineError::Io(e.to_string()))?;
        }
        tokio::fs::write(output_path, &encoded)
            .await
            .map_err(|e| CombineError::Io(e.to_string()))?;

        tracing::info!(
            output = %output_path.display(),
            duration_ms,
            clip_count,
            skipped = skipped_missing.len(),
            output_bytes = encoded.len(),
            "Combined audio exported"
        );

        Ok(CombineOutcome {
            output_path: output_path.to_path_buf(),
            duration_ms,
            clip_count,
            skipped_missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{synthetic_wav, Mp3Codec};
    use tempfile::tempdir;

    fn combiner() -> AudioCombiner {
        AudioCombiner::new(Arc::new(Mp3Codec::new(192)))
    }

    /// 写一个指定时长的测试 WAV 分段
    fn write_clip(dir: &Path, name: &str, duration_ms: u64) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, synthetic_wav(duration_ms, 22050)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_combine_empty_input_fails_without_output() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("final_output.mp3");

        let err = combiner().combine(&[], &output, 1000).await.unwrap_err();
        assert!(matches!(err, CombineError::EmptyInput));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_combine_single_clip_inserts_no_silence() {
        let dir = tempdir().unwrap();
        let paths = vec![write_clip(dir.path(), "voice_0.mp3", 2000)];
        let output = dir.path().join("final_output.mp3");

        let outcome = combiner().combine(&paths, &output, 1000).await.unwrap();
        assert_eq!(outcome.clip_count, 1);
        assert_eq!(outcome.duration_ms, 2000);
        assert!(output.exists());
    }

    #[tokio::test]
    async fn test_combined_duration_is_sum_plus_pauses() {
        let dir = tempdir().unwrap();
        let paths = vec![
            write_clip(dir.path(), "voice_0.mp3", 2000),
            write_clip(dir.path(), "voice_1.mp3", 2000),
        ];
        let output = dir.path().join("final_output.mp3");

        // 2000 + 1000 + 2000
        let outcome = combiner().combine(&paths, &output, 1000).await.unwrap();
        assert_eq!(outcome.duration_ms, 5000);
        assert_eq!(outcome.clip_count, 2);

        // 导出为 MP3（帧同步字或 ID3 头）
        let data = std::fs::read(&output).unwrap();
        assert!(data.len() > 4);
        assert!(data[0] == 0xFF || &data[0..3] == b"ID3");
    }

    #[tokio::test]
    async fn test_zero_pause_concatenates_directly() {
        let dir = tempdir().unwrap();
        let paths = vec![
            write_clip(dir.path(), "voice_0.mp3", 1000),
            write_clip(dir.path(), "voice_1.mp3", 1500),
            write_clip(dir.path(), "voice_2.mp3", 500),
        ];
        let output = dir.path().join("final_output.mp3");

        let outcome = combiner().combine(&paths, &output, 0).await.unwrap();
        assert_eq!(outcome.duration_ms, 3000);
    }

    #[tokio::test]
    async fn test_missing_path_skipped_mid_sequence() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("voice_1.mp3");
        let paths = vec![
            write_clip(dir.path(), "voice_0.mp3", 1000),
            missing.clone(),
            write_clip(dir.path(), "voice_2.mp3", 1000),
        ];
        let output = dir.path().join("final_output.mp3");

        let outcome = combiner().combine(&paths, &output, 500).await.unwrap();
        // 1000 + 500 + 1000，缺失的不占静音位
        assert_eq!(outcome.duration_ms, 2500);
        assert_eq!(outcome.clip_count, 2);
        assert_eq!(outcome.skipped_missing, vec![missing]);
    }

    #[tokio::test]
    async fn test_undecodable_clip_aborts_without_output() {
        let dir = tempdir().unwrap();
        let garbage = dir.path().join("voice_1.mp3");
        std::fs::write(&garbage, b"definitely not audio").unwrap();
        let paths = vec![write_clip(dir.path(), "voice_0.mp3", 1000), garbage];
        let output = dir.path().join("final_output.mp3");

        let err = combiner().combine(&paths, &output, 1000).await.unwrap_err();
        assert!(matches!(err, CombineError::Decode { .. }));
        // 不能留下损坏或半成品的输出文件
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_all_paths_missing_reports_no_clips() {
        let dir = tempdir().unwrap();
        let paths = vec![dir.path().join("a.mp3"), dir.path().join("b.mp3")];
        let output = dir.path().join("final_output.mp3");

        let err = combiner().combine(&paths, &output, 1000).await.unwrap_err();
        assert!(matches!(err, CombineError::NoClips(2)));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_mixed_sample_rates_follow_first_clip() {
        let dir = tempdir().unwrap();
        let p0 = dir.path().join("voice_0.mp3");
        std::fs::write(&p0, synthetic_wav(1000, 44100)).unwrap();
        let p1 = dir.path().join("voice_1.mp3");
        std::fs::write(&p1, synthetic_wav(1000, 22050)).unwrap();
        let output = dir.path().join("final_output.mp3");

        let outcome = combiner()
            .combine(&[p0, p1], &output, 1000)
            .await
            .unwrap();
        // 重采样容差 1ms
        assert!((2999..=3001).contains(&outcome.duration_ms));
    }
}
