//! Domain Layer
//!
//! 对话脚本领域模型 - 无 IO，纯解析与校验逻辑

pub mod dialogue;
