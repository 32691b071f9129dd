//! Application Ports - 出站端口定义
//!
//! 具体实现在 infrastructure/adapters 层

mod audio_codec;
mod audio_store;
mod tts_engine;

pub use audio_codec::{AudioClip, AudioCodecPort, CodecError};
pub use audio_store::{AudioStorePort, StoreError};
pub use tts_engine::{SynthesisRequest, SynthesisResponse, TtsEnginePort, TtsError, VoiceSettings};
