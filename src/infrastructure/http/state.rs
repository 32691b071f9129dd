//! Application State

use std::sync::Arc;

use crate::application::{GenerateAudioHandler, ports::AudioStorePort};

/// 应用状态
pub struct AppState {
    /// 生成命令处理器
    pub generate_handler: GenerateAudioHandler,
    /// 音频存储（读取最终输出用）
    pub store: Arc<dyn AudioStorePort>,
    /// 对外可访问的 Base URL（拼接音频下载地址）
    pub public_base_url: String,
}

impl AppState {
    pub fn new(
        generate_handler: GenerateAudioHandler,
        store: Arc<dyn AudioStorePort>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            generate_handler,
            store,
            public_base_url: public_base_url.into(),
        }
    }
}
