//! Codec Adapters - 音频编解码实现

mod mp3_codec;
mod synthetic;

pub use mp3_codec::Mp3Codec;
pub use synthetic::synthetic_wav;
