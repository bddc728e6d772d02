//! # 签名生成模块（signature）
//!
//! ## 设计思路
//!
//! 整个工具唯一有“算法”的部分：把一份联系人记录映射为一段
//! 可粘贴进邮件客户端的 HTML。其余模块（缩略图、剪贴板、表单会话）
//! 都只是调用或喂数据给这里的薄适配层。
//!
//! - `record`：`SignatureRecord` 与 `RecordField`，以及 JSON 取值转文本规则
//! - `derive`：首字母、`tel:` 目标、网址展示文本
//! - `generator`：`generate()` 纯函数
//!
//! ```text
//! SignatureRecord ──► derive (initials / phone_href / display_url)
//!        │                         │
//!        └────────► generate() ◄───┘ ──► <table ...> HTML 片段
//! ```

mod derive;
mod generator;
mod record;

pub use derive::{display_url, initials, phone_href};
pub use generator::generate;
pub use record::{safe_text, RecordField, SignatureRecord};
