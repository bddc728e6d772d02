//! # 头像缩略图模块（thumbnail）
//!
//! ## 设计思路
//!
//! 用户选择的头像会以 Base64 嵌入签名，因此必须先缩小再编码，
//! 否则签名体积会失控。该模块按职责拆分：
//!
//! - `handler`：编排整条流水线，承载可切换的配置
//! - `loader`：读取文件，校验体积与文件签名
//! - `pipeline`：解码、等比缩放、JPEG 编码与 Data URL 拼装
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 调用链
//!
//! ```text
//! 表单选择图片 (FormEffect::LoadThumbnail)
//!    ↓
//! handler.rs（配置快照 + spawn_blocking + 阶段耗时日志）
//!    ├─ loader.rs（体积上限 + magic bytes）
//!    └─ pipeline.rs（解码 + 缩放 + JPEG + Base64）
//!    ↓
//! Ok(data:image/jpeg;base64,...) / Err(ImageError)
//! ```

mod config;
mod error;
mod handler;
mod loader;
mod pipeline;
mod source;

pub use config::{ThumbnailConfig, ThumbnailProfile};
pub use error::ImageError;
pub use handler::ThumbnailHandler;
pub use source::Thumbnail;
