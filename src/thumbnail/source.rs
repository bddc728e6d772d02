//! # 中间数据模型
//!
//! - `RawImageData`：已读取但未解码的字节
//! - `Thumbnail`：缩放并编码完成、可直接嵌入签名的结果

/// 加载阶段输出：原始图片字节与来源标识。
pub(crate) struct RawImageData {
    pub(crate) bytes: Vec<u8>,
    /// 来源提示（用于日志）。
    pub(crate) source_hint: &'static str,
}

/// 缩略图结果。
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    /// `data:image/jpeg;base64,...`
    pub data_url: String,
}
