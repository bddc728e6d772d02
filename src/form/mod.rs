//! # 表单会话模块（form）
//!
//! ## 设计思路
//!
//! 编辑表单的全部状态收敛为 `FormSession` 快照，由 `FormRuntime` 独占。
//! 用户操作与异步结果都以 `FormMessage` 进入，`update()` 给出新快照和
//! `FormEffect`，运行时负责执行副作用并把结果作为新消息送回。
//!
//! ```text
//! 用户操作 ─► FormMessage ─► FormSession::update ─► FormEffect
//!                ▲                                     │
//!                └──── PhotoLoaded / CopyFinished ◄────┘ (tokio 任务)
//!                      / CopiedExpired
//! ```

mod runtime;
mod session;

pub use runtime::FormRuntime;
pub use session::{FormEffect, FormMessage, FormSession, Notice};
