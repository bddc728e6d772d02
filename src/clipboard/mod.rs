//! 剪贴板复制模块
//!
//! # 设计思路
//!
//! 把生成好的签名放进系统剪贴板。邮件客户端只有拿到 `text/html`
//! 才会渲染表格，但并非所有环境都支持富文本，因此按能力逐级降级：
//! - **富文本**：`arboard::set_html`
//! - **纯文本**：写入 HTML 源码，用户仍可粘贴到支持源码编辑的客户端
//! - **终端选区**：OSC 52，适用于 SSH 等没有图形剪贴板的场景
//!
//! # 实现思路
//!
//! - `sink` 定义写入端 trait 与系统实现，`fallback` 实现降级状态机。
//! - `copy_signature()` 在 `spawn_blocking` 中打开写入端并执行状态机，
//!   线程失败按“全部失败”处理，只记录日志，不向上抛错。
//! - 成功后的“已复制”提示时长由 `CopyConfig` 决定。

mod fallback;
pub(crate) mod sink;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;

pub use fallback::{copy_with_fallback, CopyOutcome, CopyTier};
pub use sink::{
    ClipboardFailureKind, ClipboardProvider, ClipboardSink, ClipboardWriteFailure,
    SystemClipboard, SystemClipboardProvider,
};

/// 默认“已复制”提示持续时间（毫秒）
pub const DEFAULT_ACK_MS: u64 = 1500;

/// 复制相关配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyConfig {
    /// 成功后“已复制”提示的持续时间
    pub ack_duration: Duration,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            ack_duration: Duration::from_millis(DEFAULT_ACK_MS),
        }
    }
}

/// 在阻塞线程中执行完整的降级复制。
///
/// 结果在写入完成后立即返回；富文本或纯文本写入成功时，阻塞线程随后继续
/// `hold_selection()`。tokio 运行时关闭时会等待阻塞任务结束，
/// 因此命令行进程不会在持有期内提前退出。
pub async fn copy_signature(provider: Arc<dyn ClipboardProvider>, html: String) -> CopyOutcome {
    let (tx, rx) = oneshot::channel();

    tokio::task::spawn_blocking(move || {
        let mut sink = provider.open();
        let outcome = copy_with_fallback(sink.as_mut(), &html);
        let holds = matches!(outcome.tier, Some(CopyTier::RichHtml | CopyTier::PlainText));

        if tx.send(outcome).is_err() {
            log::debug!("复制结果无人接收");
        }
        if holds {
            sink.hold_selection();
        }
    });

    match rx.await {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("❌ 复制线程执行失败: {}", e);
            CopyOutcome {
                tier: None,
                failures: Vec::new(),
            }
        }
    }
}
