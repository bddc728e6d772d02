//! # 加载模块
//!
//! ## 设计思路
//!
//! 读取用户选择的图片文件，并在解码前完成两道廉价检查：
//! 文件体积上限与文件签名（magic bytes）。
//! 非图片文件在这里就被拒绝，不会进入解码阶段。

use std::path::Path;

use super::source::RawImageData;
use super::{ImageError, ThumbnailConfig, ThumbnailHandler};

impl ThumbnailHandler {
    /// 从本地路径加载图片原始字节。
    pub(super) fn load_from_file(
        path: &Path,
        config: &ThumbnailConfig,
    ) -> Result<RawImageData, ImageError> {
        log::info!("📁 开始读取头像图片 - 路径: {}", path.display());

        if !path.exists() {
            return Err(ImageError::FileSystem(format!(
                "文件不存在：{}",
                path.display()
            )));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| ImageError::FileSystem(format!("无法读取文件信息：{}", e)))?;

        if !metadata.is_file() {
            return Err(ImageError::FileSystem(format!(
                "不是普通文件：{}",
                path.display()
            )));
        }

        Self::check_file_size(metadata.len(), config)?;

        let bytes = std::fs::read(path)
            .map_err(|e| ImageError::FileSystem(format!("无法读取图片文件：{}", e)))?;
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            source_hint: "file",
        })
    }

    /// 包装内存中的图片字节（例如拖放或测试场景）。
    pub(super) fn load_from_bytes(
        bytes: Vec<u8>,
        config: &ThumbnailConfig,
    ) -> Result<RawImageData, ImageError> {
        Self::check_file_size(bytes.len() as u64, config)?;
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            source_hint: "memory",
        })
    }

    fn check_file_size(len: u64, config: &ThumbnailConfig) -> Result<(), ImageError> {
        if len > config.max_file_size {
            return Err(ImageError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                len as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }
        Ok(())
    }

    /// 通过文件签名校验输入是否为图片。
    fn validate_image_signature(bytes: &[u8]) -> Result<(), ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::InvalidFormat("图片内容为空".to_string()));
        }

        let kind = infer::get(bytes)
            .ok_or_else(|| ImageError::InvalidFormat("无法识别图片类型".to_string()))?;

        if kind.matcher_type() != infer::MatcherType::Image {
            return Err(ImageError::InvalidFormat(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            )));
        }

        Ok(())
    }
}
