//! Generate Audio Command - 一次运行的编排
//!
//! 解析脚本 → 清理上次运行的产物 → 逐条合成 → 拼接导出。
//! 数据单向流动，两个阶段之间只通过文件路径衔接。

use std::sync::Arc;

use crate::application::combiner::AudioCombiner;
use crate::application::error::ApplicationError;
use crate::application::ports::AudioStorePort;
use crate::application::synthesizer::{DialogueSynthesizer, EntryFailure, EntrySkip};
use crate::domain::dialogue::DialogueScript;

/// 生成命令
#[derive(Debug, Clone)]
pub struct GenerateAudioCommand {
    /// 用户提交的原始脚本 JSON
    pub raw_script: String,
}

/// 生成结果
#[derive(Debug)]
pub struct GenerateAudioResult {
    /// 运行 ID（用于日志关联）
    pub run_id: uuid::Uuid,
    /// 最终输出文件路径
    pub output_path: std::path::PathBuf,
    /// 合并音频时长（毫秒）
    pub duration_ms: u64,
    /// 脚本条目总数
    pub entry_count: usize,
    /// 成功合成的条目数
    pub synthesized_count: usize,
    /// 跳过的条目
    pub skipped: Vec<EntrySkip>,
    /// 失败的条目
    pub failed: Vec<EntryFailure>,
    /// 完成时间
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// 生成命令处理器
pub struct GenerateAudioHandler {
    synthesizer: DialogueSynthesizer,
    combiner: AudioCombiner,
    store: Arc<dyn AudioStorePort>,
    /// 相邻剪辑之间的静音时长（毫秒）
    pause_ms: u64,
}

impl GenerateAudioHandler {
    pub fn new(
        synthesizer: DialogueSynthesizer,
        combiner: AudioCombiner,
        store: Arc<dyn AudioStorePort>,
        pause_ms: u64,
    ) -> Self {
        Self {
            synthesizer,
            combiner,
            store,
            pause_ms,
        }
    }

    /// 执行一次完整的生成运行
    ///
    /// 运行一旦开始就走到自然终点（脚本处理完或致命解码错误），
    /// 不支持中途取消。同一时刻只有一次运行在途，由外层交互壳保证。
    pub async fn handle(
        &self,
        command: GenerateAudioCommand,
    ) -> Result<GenerateAudioResult, ApplicationError> {
        let run_id = uuid::Uuid::new_v4();

        // 1. 解析与校验（失败则运行不开始，不触碰文件系统）
        let script = DialogueScript::parse(&command.raw_script)?;

        tracing::info!(%run_id, entries = script.len(), "Starting dialogue audio run");

        // 2. 清理上一次运行的产物
        let removed = self.store.clear_parts().await?;
        self.store.remove_final().await?;
        if removed > 0 {
            tracing::debug!(%run_id, removed, "Cleared stale audio parts");
        }

        // 3. 合成
        let outcome = self.synthesizer.synthesize(&script).await?;

        // 4. 零产出则不进入拼接
        if outcome.is_total_failure() {
            return Err(ApplicationError::SynthesisFailed(format!(
                "0 of {} entries produced audio ({} skipped, {} failed)",
                script.len(),
                outcome.skipped.len(),
                outcome.failed.len()
            )));
        }

        // 5. 拼接导出
        let combined = self
            .combiner
            .combine(&outcome.files, &self.store.final_path(), self.pause_ms)
            .await?;

        tracing::info!(
            %run_id,
            duration_ms = combined.duration_ms,
            clips = combined.clip_count,
            "Dialogue audio run complete"
        );

        Ok(GenerateAudioResult {
            run_id,
            output_path: combined.output_path,
            duration_ms: combined.duration_ms,
            entry_count: script.len(),
            synthesized_count: outcome.files.len(),
            skipped: outcome.skipped,
            failed: outcome.failed,
            generated_at: chrono::Utc::now(),
        })
    }
}
