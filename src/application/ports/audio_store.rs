//! Audio Store Port - 音频文件存储抽象
//!
//! 管理分段文件目录与最终输出文件的布局和清理

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// 存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Audio Store Port - 出站端口
///
/// 分段文件是运行的临时产物，每次新运行开始前清空；
/// 最终输出文件保留到下一次运行的清理。
#[async_trait]
pub trait AudioStorePort: Send + Sync {
    /// 第 index 条分段文件的路径（voice_{index}.mp3）
    fn part_path(&self, index: usize) -> PathBuf;

    /// 最终输出文件的路径
    fn final_path(&self) -> PathBuf;

    /// 保存一条分段音频，返回写入的路径
    async fn save_part(&self, index: usize, data: &[u8]) -> Result<PathBuf, StoreError>;

    /// 清空分段目录，返回删除的文件数
    async fn clear_parts(&self) -> Result<u64, StoreError>;

    /// 删除上一次运行的最终输出文件（不存在时静默成功）
    async fn remove_final(&self) -> Result<(), StoreError>;

    /// 读取最终输出文件
    async fn read_final(&self) -> Result<Vec<u8>, StoreError>;
}
