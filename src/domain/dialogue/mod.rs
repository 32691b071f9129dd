//! Dialogue Context - 对话脚本上下文
//!
//! 负责对话脚本 JSON 的解析与条目校验

mod errors;
mod script;

pub use errors::DialogueError;
pub use script::{DialogueEntry, DialogueScript};
