//! Dialogue Synthesizer - 对话合成器
//!
//! 按脚本顺序逐条调用远端 TTS，把每条响应写成编号分段文件。
//! 单条失败只记入结果，不中断整个脚本；请求严格串行，无并发分发。

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioStorePort, SynthesisRequest, TtsEnginePort, VoiceSettings,
};
use crate::domain::dialogue::DialogueScript;

/// 合成器配置
///
/// 固定音色参数的唯一持有者（进程内不复制第二份）
#[derive(Debug, Clone, Default)]
pub struct SynthesizerConfig {
    /// 固定音色参数，随每个请求发送
    pub voice_settings: VoiceSettings,
}

/// 被跳过的条目（text/voice_id 缺失或为空）
#[derive(Debug, Clone)]
pub struct EntrySkip {
    /// 脚本中的 0 起始索引
    pub index: usize,
    pub reason: String,
}

/// 合成失败的条目（远端调用或落盘失败）
#[derive(Debug, Clone)]
pub struct EntryFailure {
    pub index: usize,
    pub error: String,
}

/// 一次合成运行的结构化结果
///
/// 成功路径按脚本顺序排列，可能短于脚本甚至为空；
/// 跳过和失败单独记录，由表现层决定如何呈现。
#[derive(Debug, Default)]
pub struct SynthesisOutcome {
    /// 成功写入的分段文件路径（脚本顺序）
    pub files: Vec<std::path::PathBuf>,
    pub skipped: Vec<EntrySkip>,
    pub failed: Vec<EntryFailure>,
}

impl SynthesisOutcome {
    /// 是否一条音频都没产出
    pub fn is_total_failure(&self) -> bool {
        self.files.is_empty()
    }
}

/// 对话合成器
pub struct DialogueSynthesizer {
    config: SynthesizerConfig,
    tts: Arc<dyn TtsEnginePort>,
    store: Arc<dyn AudioStorePort>,
}

impl DialogueSynthesizer {
    pub fn new(
        config: SynthesizerConfig,
        tts: Arc<dyn TtsEnginePort>,
        store: Arc<dyn AudioStorePort>,
    ) -> Self {
        Self { config, tts, store }
    }

    /// 合成整个脚本
    ///
    /// 逐条串行请求远端 TTS。分段文件名沿用脚本索引，跳过的条目
    /// 不补位，索引可以不连续，下游只消费返回的路径序列。
    pub async fn synthesize(
        &self,
        script: &DialogueScript,
    ) -> Result<SynthesisOutcome, ApplicationError> {
        let mut outcome = SynthesisOutcome::default();

        for (index, entry) in script.entries().iter().enumerate() {
            if let Some(reason) = entry.invalid_reason() {
                tracing::warn!(index, reason, "Skipping invalid dialogue entry");
                outcome.skipped.push(EntrySkip {
                    index,
                    reason: reason.to_string(),
                });
                continue;
            }

            tracing::info!(
                index,
                voice_id = %entry.voice_id,
                voice_name = entry.voice_name.as_deref().unwrap_or(""),
                text_len = entry.text.len(),
                "Synthesizing dialogue entry"
            );

            let request = SynthesisRequest {
                text: entry.text.clone(),
                voice_id: entry.voice_id.clone(),
                voice_settings: self.config.voice_settings,
            };

            let response = match self.tts.synthesize(request).await {
                Ok(r) => r,
                Err(e) => {
                    tracing::error!(index, error = %e, "TTS synthesis failed, continuing");
                    outcome.failed.push(EntryFailure {
                        index,
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            match self.store.save_part(index, &response.audio_data).await {
                Ok(path) => outcome.files.push(path),
                Err(e) => {
                    // 半写状态可接受：失败条目视为缺失
                    tracing::error!(index, error = %e, "Failed to persist audio part, continuing");
                    outcome.failed.push(EntryFailure {
                        index,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            produced = outcome.files.len(),
            skipped = outcome.skipped.len(),
            failed = outcome.failed.len(),
            "Dialogue synthesis finished"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{SynthesisResponse, TtsError};
    use crate::infrastructure::adapters::FileAudioStore;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// 脚本化的 TTS 桩：记录请求顺序，可按索引注入失败
    struct StubTts {
        calls: Mutex<Vec<String>>,
        fail_on: Vec<usize>,
    }

    impl StubTts {
        fn new(fail_on: Vec<usize>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_on,
            }
        }
    }

    #[async_trait]
    impl TtsEnginePort for StubTts {
        async fn synthesize(
            &self,
            request: SynthesisRequest,
        ) -> Result<SynthesisResponse, TtsError> {
            let mut calls = self.calls.lock().unwrap();
            let call_index = calls.len();
            calls.push(request.text.clone());

            if self.fail_on.contains(&call_index) {
                return Err(TtsError::ServiceError {
                    status: 500,
                    body: "synthetic failure".to_string(),
                });
            }

            Ok(SynthesisResponse {
                audio_data: format!("audio:{}", request.text).into_bytes(),
            })
        }
    }

    fn script(entries: &str) -> DialogueScript {
        DialogueScript::parse(&format!(r#"{{"content": {}}}"#, entries)).unwrap()
    }

    async fn synthesizer_with(
        fail_on: Vec<usize>,
    ) -> (DialogueSynthesizer, Arc<StubTts>, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = Arc::new(
            FileAudioStore::new(dir.path(), "final_output.mp3")
                .await
                .unwrap(),
        );
        let tts = Arc::new(StubTts::new(fail_on));
        let synthesizer =
            DialogueSynthesizer::new(SynthesizerConfig::default(), tts.clone(), store);
        (synthesizer, tts, dir)
    }

    #[tokio::test]
    async fn test_all_valid_entries_produce_ordered_paths() {
        let (synthesizer, tts, _dir) = synthesizer_with(vec![]).await;
        let script = script(
            r#"[{"text": "one", "voice_id": "V1"},
                {"text": "two", "voice_id": "V2"},
                {"text": "three", "voice_id": "V1"}]"#,
        );

        let outcome = synthesizer.synthesize(&script).await.unwrap();

        assert_eq!(outcome.files.len(), 3);
        assert!(outcome.skipped.is_empty());
        assert!(outcome.failed.is_empty());
        // 请求按脚本顺序发出
        assert_eq!(*tts.calls.lock().unwrap(), vec!["one", "two", "three"]);
        // 分段文件名沿用脚本索引
        for (i, path) in outcome.files.iter().enumerate() {
            assert!(path.ends_with(format!("voice_{}.mp3", i)));
            assert_eq!(
                std::fs::read(path).unwrap(),
                format!("audio:{}", tts.calls.lock().unwrap()[i]).into_bytes()
            );
        }
    }

    #[tokio::test]
    async fn test_invalid_entries_skipped_without_abort() {
        let (synthesizer, tts, _dir) = synthesizer_with(vec![]).await;
        let script = script(
            r#"[{"text": "one", "voice_id": "V1"},
                {"text": "no voice"},
                {"voice_id": "V3"},
                {"text": "four", "voice_id": "V4"}]"#,
        );

        let outcome = synthesizer.synthesize(&script).await.unwrap();

        // n - k 条产出，k 条跳过
        assert_eq!(outcome.files.len(), 2);
        assert_eq!(outcome.skipped.len(), 2);
        assert_eq!(outcome.skipped[0].index, 1);
        assert_eq!(outcome.skipped[1].index, 2);
        // 跳过的条目不发请求
        assert_eq!(tts.calls.lock().unwrap().len(), 2);
        // 索引不连续是正常的
        assert!(outcome.files[0].ends_with("voice_0.mp3"));
        assert!(outcome.files[1].ends_with("voice_3.mp3"));
    }

    #[tokio::test]
    async fn test_remote_failure_skips_entry_and_continues() {
        // 第二次远端调用失败
        let (synthesizer, _tts, _dir) = synthesizer_with(vec![1]).await;
        let script = script(
            r#"[{"text": "one", "voice_id": "V1"},
                {"text": "two", "voice_id": "V2"},
                {"text": "three", "voice_id": "V3"}]"#,
        );

        let outcome = synthesizer.synthesize(&script).await.unwrap();

        assert_eq!(outcome.files.len(), 2);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].index, 1);
        assert!(outcome.failed[0].error.contains("500"));
        assert!(outcome.files[1].ends_with("voice_2.mp3"));
    }

    #[tokio::test]
    async fn test_all_failures_yield_empty_outcome() {
        let (synthesizer, _tts, _dir) = synthesizer_with(vec![0, 1]).await;
        let script = script(
            r#"[{"text": "one", "voice_id": "V1"},
                {"text": "two", "voice_id": "V2"}]"#,
        );

        let outcome = synthesizer.synthesize(&script).await.unwrap();
        assert!(outcome.is_total_failure());
        assert_eq!(outcome.failed.len(), 2);
    }
}
