//! HTTP Handlers

mod audio;
mod generate;
mod ping;

pub use audio::*;
pub use generate::*;
pub use ping::*;
