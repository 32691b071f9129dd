//! 应用层错误定义

use thiserror::Error;

use super::combiner::CombineError;
use crate::domain::dialogue::DialogueError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 输入校验错误 - 运行不会开始
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 整体合成失败 - 没有任何条目产出音频，不进入拼接阶段
    #[error("Synthesis produced no audio: {0}")]
    SynthesisFailed(String),

    /// 拼接失败
    #[error("Audio combination failed: {0}")]
    CombinationFailed(#[from] CombineError),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DialogueError> for ApplicationError {
    fn from(err: DialogueError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<crate::application::ports::StoreError> for ApplicationError {
    fn from(err: crate::application::ports::StoreError) -> Self {
        Self::StorageError(err.to_string())
    }
}
