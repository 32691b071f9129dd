//! File Audio Store - 文件系统音频存储实现
//!
//! 实现 AudioStorePort trait
//!
//! 目录布局:
//!   {base_dir}/parts/voice_{i}.mp3   分段文件（每次运行前清空）
//!   {base_dir}/{final_filename}      最终合并文件

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{AudioStorePort, StoreError};

/// 文件系统音频存储
pub struct FileAudioStore {
    /// 分段文件目录
    parts_dir: PathBuf,
    /// 最终输出文件路径
    final_path: PathBuf,
}

impl FileAudioStore {
    /// 创建存储并确保目录存在
    pub async fn new(
        base_dir: impl AsRef<Path>,
        final_filename: &str,
    ) -> Result<Self, StoreError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let parts_dir = base_dir.join("parts");

        fs::create_dir_all(&parts_dir)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        Ok(Self {
            parts_dir,
            final_path: base_dir.join(final_filename),
        })
    }

    pub fn parts_dir(&self) -> &Path {
        &self.parts_dir
    }
}

#[async_trait]
impl AudioStorePort for FileAudioStore {
    fn part_path(&self, index: usize) -> PathBuf {
        self.parts_dir.join(format!("voice_{}.mp3", index))
    }

    fn final_path(&self) -> PathBuf {
        self.final_path.clone()
    }

    async fn save_part(&self, index: usize, data: &[u8]) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.parts_dir)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        let path = self.part_path(index);
        fs::write(&path, data)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        tracing::debug!(
            path = %path.display(),
            size = data.len(),
            "Saved audio part"
        );

        Ok(path)
    }

    async fn clear_parts(&self) -> Result<u64, StoreError> {
        if !self.parts_dir.exists() {
            return Ok(0);
        }

        let mut removed = 0u64;
        let mut entries = fs::read_dir(&self.parts_dir)
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::IoError(e.to_string()))?
        {
            if entry.path().is_file() {
                fs::remove_file(entry.path())
                    .await
                    .map_err(|e| StoreError::IoError(e.to_string()))?;
                removed += 1;
            }
        }

        Ok(removed)
    }

    async fn remove_final(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.final_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::IoError(e.to_string())),
        }
    }

    async fn read_final(&self) -> Result<Vec<u8>, StoreError> {
        match fs::read(&self.final_path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::FileNotFound(
                self.final_path.to_string_lossy().to_string(),
            )),
            Err(e) => Err(StoreError::IoError(e.to_string())),
        }
    }
}
