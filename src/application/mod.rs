//! Application Layer
//!
//! - Ports: 出站端口定义（TtsEngine, AudioCodec, AudioStore）
//! - Synthesizer: 逐条合成对话音频
//! - Combiner: 拼接剪辑并导出
//! - Generate: 一次用户触发运行的编排

pub mod combiner;
pub mod error;
pub mod generate;
pub mod ports;
pub mod synthesizer;

pub use combiner::{AudioCombiner, CombineError, CombineOutcome};
pub use error::ApplicationError;
pub use generate::{GenerateAudioCommand, GenerateAudioHandler, GenerateAudioResult};
pub use synthesizer::{
    DialogueSynthesizer, EntryFailure, EntrySkip, SynthesisOutcome, SynthesizerConfig,
};
