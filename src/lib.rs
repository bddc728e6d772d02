//! # 邮件签名工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │              命令行 (clap: render / copy / ...)           │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ FormMessage
//! ┌───────┼──────────────────────────────────────────────────┐
//! │  form ─────── FormSession 快照 + FormRuntime (tokio)      │
//! │   │                                                      │
//! │   ├─ signature ── generate(): 记录 → 内联样式 HTML        │
//! │   ├─ thumbnail ── 头像缩放 → JPEG Data URL               │
//! │   └─ clipboard ── 富文本 → 纯文本 → OSC 52 降级复制       │
//! │                                                          │
//! │  export ────── HTML 片段落盘                              │
//! │  error ─────── AppError (统一错误类型)                    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`signature`] | 签名记录模型、派生值、HTML 生成 |
//! | [`thumbnail`] | 读取头像、等比缩放、JPEG 编码为 Data URL |
//! | [`clipboard`] | 分级复制状态机与系统剪贴板写入端 |
//! | [`form`] | 表单会话状态与副作用运行时 |
//! | [`export`] | 将签名写入文件或带时间戳的输出目录 |
//! | [`error`] | 统一错误类型 `AppError` |

pub mod clipboard;
pub mod error;
pub mod export;
pub mod form;
pub mod signature;
pub mod thumbnail;
