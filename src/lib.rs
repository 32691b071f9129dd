//! Voxweave - 多角色对话音频生成服务
//!
//! 把 JSON 描述的多角色对话脚本变成一个合并的 MP3：
//! 每条台词调用一次远端 TTS，剪辑之间插入固定时长静音后拼接。
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Dialogue Context: 对话脚本解析与校验
//!
//! 应用层 (application/):
//! - Ports: 端口定义（TtsEngine, AudioCodec, AudioStore）
//! - Synthesizer / Combiner: 两段式流水线
//! - Generate: 单次运行编排
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API（交互壳后端）
//! - Adapters: ElevenLabs Client, MP3 Codec, File Store

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
