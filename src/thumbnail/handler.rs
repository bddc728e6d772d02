//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `ThumbnailHandler` 只负责流程编排与配置管理，处理链路固定为：
//! 1. 读取配置快照
//! 2. 加载原始字节（`loader`）
//! 3. 解码、缩放、编码（`pipeline`）
//!
//! ## 实现思路
//!
//! - 配置通过 `Arc<RwLock<ThumbnailConfig>>` 支持运行时切换档位。
//! - 单次请求内使用同一份配置快照，避免处理中途参数漂移。
//! - 读取与解码都是阻塞操作，放进 `spawn_blocking`，不占用异步运行时。
//! - 记录 `load/encode/total` 阶段耗时，便于性能诊断。

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use super::source::Thumbnail;
use super::{ImageError, ThumbnailConfig, ThumbnailProfile};

/// 头像缩略图处理器。
#[derive(Debug, Clone)]
pub struct ThumbnailHandler {
    config: Arc<RwLock<ThumbnailConfig>>,
}

impl Default for ThumbnailHandler {
    fn default() -> Self {
        Self::new(ThumbnailConfig::default())
    }
}

impl ThumbnailHandler {
    pub fn new(config: ThumbnailConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// 获取配置快照，保证单次请求链路使用一致参数。
    pub fn config_snapshot(&self) -> Result<ThumbnailConfig, ImageError> {
        self.config
            .read()
            .map(|cfg| cfg.clone())
            .map_err(|_| ImageError::ResourceLimit("配置读取锁已中毒".to_string()))
    }

    /// 切换缩放档位。
    pub fn set_profile(&self, profile: ThumbnailProfile) -> Result<(), ImageError> {
        let mut config = self
            .config
            .write()
            .map_err(|_| ImageError::ResourceLimit("配置写入锁已中毒".to_string()))?;
        config.apply_profile(profile);

        log::info!(
            "⚙️ 已切换缩略图档位：{:?}（filter={:?}, max_dim={}）",
            profile,
            config.resize_filter,
            config.max_dimension
        );

        Ok(())
    }

    pub fn profile(&self) -> Result<ThumbnailProfile, ImageError> {
        Ok(self.config_snapshot()?.infer_profile())
    }

    /// 处理主入口：读取图片文件并生成缩略图。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use signature_studio::thumbnail::ThumbnailHandler;
    ///
    /// # async fn demo() -> Result<(), signature_studio::thumbnail::ImageError> {
    /// let handler = ThumbnailHandler::default();
    /// let thumbnail = handler.thumbnail_from_file("avatar.png").await?;
    /// println!("{}", thumbnail.data_url);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn thumbnail_from_file(&self, path: impl AsRef<Path>) -> Result<Thumbnail, ImageError> {
        let config = self.config_snapshot()?;
        let path: PathBuf = path.as_ref().to_path_buf();

        tokio::task::spawn_blocking(move || Self::process_file(&path, &config))
            .await
            .map_err(|e| ImageError::Task(format!("线程执行失败：{}", e)))?
    }

    /// 与 [`Self::thumbnail_from_file`] 相同，只返回 Data URL。
    pub async fn resize_to_data_url(&self, path: impl AsRef<Path>) -> Result<String, ImageError> {
        Ok(self.thumbnail_from_file(path).await?.data_url)
    }

    /// 同步处理内存中的图片字节。
    pub fn thumbnail_from_bytes(&self, bytes: Vec<u8>) -> Result<Thumbnail, ImageError> {
        let config = self.config_snapshot()?;
        config.validate()?;
        let raw = Self::load_from_bytes(bytes, &config)?;
        Self::decode_and_encode(raw, &config)
    }

    fn process_file(path: &Path, config: &ThumbnailConfig) -> Result<Thumbnail, ImageError> {
        config.validate()?;
        let total_start = Instant::now();

        let load_start = Instant::now();
        let raw = Self::load_from_file(path, config)?;
        let load_elapsed = load_start.elapsed();

        let encode_start = Instant::now();
        let thumbnail = Self::decode_and_encode(raw, config)?;
        let encode_elapsed = encode_start.elapsed();

        log::info!(
            "✅ 头像处理完成 - load={}ms encode={}ms total={}ms",
            load_elapsed.as_millis(),
            encode_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(thumbnail)
    }
}
