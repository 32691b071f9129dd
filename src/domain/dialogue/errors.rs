//! Dialogue Domain Errors

use thiserror::Error;

/// 对话脚本错误
#[derive(Debug, Error)]
pub enum DialogueError {
    /// JSON 格式错误
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    /// 缺少 content 键
    #[error("Missing 'content' key in script JSON")]
    MissingContent,

    /// content 不是数组
    #[error("'content' must be an array of dialogue entries")]
    ContentNotArray,

    /// 脚本为空
    #[error("Dialogue script contains no entries")]
    EmptyScript,
}
