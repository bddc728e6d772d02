//! # 分级复制状态机
//!
//! ## 设计思路
//!
//! 富文本复制并非所有平台都支持，因此按能力从高到低依次尝试：
//!
//! ```text
//! TryRichCopy ──失败──► TryPlainCopy ──失败──► TryLegacyCopy ──失败──► Done(None)
//!      │                    │                      │
//!      └──成功──► Done(RichHtml)  └──成功──► Done(PlainText)  └──成功──► Done(Legacy)
//! ```
//!
//! 每个状态只尝试一次，不做重试；任一层成功立即结束。
//! 纯文本与终端两层写入的都是 HTML 源码本身。

use std::fmt;

use super::sink::{ClipboardSink, ClipboardWriteFailure};

/// 最终成功写入的层级。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTier {
    /// `text/html` 富文本
    RichHtml,
    /// 纯文本（HTML 源码）
    PlainText,
    /// 终端 OSC 52 选区
    Legacy,
}

impl fmt::Display for CopyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RichHtml => "rich-html",
            Self::PlainText => "plain-text",
            Self::Legacy => "legacy",
        })
    }
}

/// 一次复制的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    /// 成功的层级；三层全部失败时为 `None`。
    pub tier: Option<CopyTier>,
    /// 失败层级的错误信息（按尝试顺序）。
    pub failures: Vec<(CopyTier, String)>,
}

impl CopyOutcome {
    pub fn is_success(&self) -> bool {
        self.tier.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CopyState {
    TryRichCopy,
    TryPlainCopy,
    TryLegacyCopy,
    Done(Option<CopyTier>),
}

impl CopyState {
    fn on_failure(self) -> Self {
        match self {
            Self::TryRichCopy => Self::TryPlainCopy,
            Self::TryPlainCopy => Self::TryLegacyCopy,
            Self::TryLegacyCopy | Self::Done(_) => Self::Done(None),
        }
    }
}

/// 依次尝试三层写入，返回第一个成功的层级。
pub fn copy_with_fallback<S>(sink: &mut S, html: &str) -> CopyOutcome
where
    S: ClipboardSink + ?Sized,
{
    let mut state = CopyState::TryRichCopy;
    let mut failures = Vec::new();

    let tier = loop {
        let tier = match state {
            CopyState::Done(result) => break result,
            CopyState::TryRichCopy => CopyTier::RichHtml,
            CopyState::TryPlainCopy => CopyTier::PlainText,
            CopyState::TryLegacyCopy => CopyTier::Legacy,
        };

        let attempt: Result<(), ClipboardWriteFailure> = match tier {
            CopyTier::RichHtml => sink.write_html(html),
            CopyTier::PlainText => sink.write_text(html),
            CopyTier::Legacy => sink.write_legacy(html),
        };

        state = match attempt {
            Ok(()) => {
                log::info!("✅ 签名已复制（tier={}）", tier);
                CopyState::Done(Some(tier))
            }
            Err(failure) => {
                log::debug!(
                    "❌ 复制层级 {} 失败: {}（kind={:?}）",
                    tier,
                    failure.message,
                    failure.kind
                );
                failures.push((tier, failure.message));
                state.on_failure()
            }
        };
    };

    if tier.is_none() {
        log::warn!("⚠️ 所有复制方式均失败，共 {} 次尝试", failures.len());
    }

    CopyOutcome { tier, failures }
}
