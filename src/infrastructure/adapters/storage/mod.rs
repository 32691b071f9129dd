//! Storage Adapters - 文件系统存储实现

mod file_store;

pub use file_store::FileAudioStore;
