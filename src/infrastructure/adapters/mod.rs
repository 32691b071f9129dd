//! Infrastructure Adapters
//!
//! 出站端口的具体实现：TTS 客户端、音频编解码、文件存储

pub mod codec;
pub mod storage;
pub mod tts;

pub use codec::{synthetic_wav, Mp3Codec};
pub use storage::FileAudioStore;
pub use tts::{ElevenLabsClient, ElevenLabsClientConfig, FakeTtsClient, FakeTtsClientConfig};
