//! Infrastructure Layer
//!
//! - HTTP: RESTful API（交互壳的后端）
//! - Adapters: ElevenLabs TTS Client, MP3 Codec, File Store

pub mod adapters;
pub mod http;
