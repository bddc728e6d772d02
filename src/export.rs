//! 签名导出模块
//!
//! # 设计思路
//!
//! 把生成的 HTML 片段落盘，方便手动导入不支持粘贴富文本的邮件客户端。
//! 支持两种目标：显式文件路径，或输出目录下按时间戳自动命名。
//!
//! # 实现思路
//!
//! - 目录不存在时自动 `create_dir_all`，避免上层判断。
//! - 自动命名格式为 `signature_%Y%m%d%H%M%S%6f.html`，同一秒内多次导出也不会冲突。
//! - 所有可能失败的操作均返回 `Result`，不使用 `expect()` / `unwrap()`。

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::AppError;

/// 导出目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// 写入指定文件
    File(PathBuf),
    /// 在目录下按时间戳生成文件名
    Directory(PathBuf),
}

/// 根据时间戳生成导出文件名。
pub fn timestamped_file_name(now: DateTime<Local>) -> String {
    format!("signature_{}.html", now.format("%Y%m%d%H%M%S%6f"))
}

/// 确保输出目录存在
///
/// # 返回
/// - `Ok(PathBuf)` — 可用的输出目录
/// - `Err(AppError::Export)` — 路径被文件占用或无法创建
pub fn ensure_output_dir(dir: &Path) -> Result<PathBuf, AppError> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(AppError::Export(format!(
                "'{}' 已存在且不是目录",
                dir.display()
            )));
        }
        return Ok(dir.to_path_buf());
    }

    fs::create_dir_all(dir).map_err(|e| {
        AppError::Export(format!("创建输出目录 '{}' 失败: {}", dir.display(), e))
    })?;
    log::info!("📁 已创建输出目录: {}", dir.display());
    Ok(dir.to_path_buf())
}

/// 写出签名片段，返回最终文件路径。
pub fn export_signature(html: &str, target: &ExportTarget) -> Result<PathBuf, AppError> {
    let path = match target {
        ExportTarget::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                ensure_output_dir(parent)?;
            }
            path.clone()
        }
        ExportTarget::Directory(dir) => {
            ensure_output_dir(dir)?.join(timestamped_file_name(Local::now()))
        }
    };

    fs::write(&path, html)?;
    log::info!("✅ 签名已导出: {} ({} 字节)", path.display(), html.len());
    Ok(path)
}
