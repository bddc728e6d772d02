//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义 crate 级 `AppError`，命令行各入口统一返回 `Result<T, AppError>`，
//! 由 `main` 记录日志并转换为非零退出码。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `ImageError` 与 `std::io::Error` 提供 `From` 转换，无需手动 map。
//! - 剪贴板与缩略图失败在表单会话内部就地恢复，只有命令行需要它们时才转换。

use crate::thumbnail::ImageError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 所有复制方式均失败
    #[error("剪贴板操作失败: {0}")]
    Clipboard(String),

    /// 缩略图流水线错误（读取 / 解码 / 编码）
    #[error("{0}")]
    Image(#[from] ImageError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 记录 JSON 或字段名无效
    #[error("签名记录无效: {0}")]
    Record(String),

    /// 导出目标不可用
    #[error("导出失败: {0}")]
    Export(String),
}
