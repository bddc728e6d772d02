//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 缩略图链路（读取 → 校验 → 解码 → 缩放 → 编码）的所有失败都归入同一个枚举，
//! 调用侧按分支决定提示文案，而不是解析字符串。

/// 缩略图处理统一错误类型。
///
/// 在表单层被转换为可关闭的提示；在命令行层上转为 `AppError`。
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("配置错误：{0}")]
    InvalidConfig(String),

    #[error("后台任务失败：{0}")]
    Task(String),
}
