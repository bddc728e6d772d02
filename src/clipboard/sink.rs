//! # 剪贴板写入端
//!
//! ## 设计思路
//!
//! 与操作系统交互的部分收敛到 `ClipboardSink` 三个方法上，
//! 状态机只依赖这个 trait，测试可以注入脚本化的假实现。
//!
//! ## 实现思路
//!
//! - 富文本与纯文本两层沿用 `arboard`（`set_html` / `set_text`）。
//! - 最后一层是终端选区：向 stdout 写 OSC 52 转义序列
//!   （`ESC ] 52 ; c ; <base64> BEL`），由终端模拟器放入系统剪贴板。
//!   stdout 不是终端时该层直接判定不可用。
//! - `ClipboardProvider` 负责在阻塞线程里打开一个写入端，
//!   每次复制使用独立实例。
//! - Linux（X11 / Wayland）上剪贴板内容由写入进程持有，`Clipboard` 一旦释放，
//!   没有剪贴板管理器接管时内容就会消失。因此写入成功后还要调用
//!   `hold_selection()`：借助 `SetExtLinux::wait_until` 继续持有内容，
//!   直到保持时长结束或被其他程序的复制替换。其他平台写入即持久，无需保持。

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose};

/// 失败分类，仅用于日志。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardFailureKind {
    /// 当前平台或环境不提供该能力
    Unavailable,
    /// 能力存在但写入被拒绝
    Rejected,
}

#[derive(Debug, Clone)]
pub struct ClipboardWriteFailure {
    pub kind: ClipboardFailureKind,
    pub message: String,
}

impl ClipboardWriteFailure {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: ClipboardFailureKind::Unavailable,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            kind: ClipboardFailureKind::Rejected,
            message: message.into(),
        }
    }
}

/// 三种写入能力，对应复制状态机的三个层级。
pub trait ClipboardSink {
    /// 以 `text/html` 写入。
    fn write_html(&mut self, html: &str) -> Result<(), ClipboardWriteFailure>;
    /// 以纯文本写入。
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardWriteFailure>;
    /// 最后手段的选区复制。
    fn write_legacy(&mut self, text: &str) -> Result<(), ClipboardWriteFailure>;

    /// 写入成功后继续持有剪贴板内容；默认立即返回。
    ///
    /// 在阻塞线程中调用，可能阻塞到保持时长结束。
    fn hold_selection(&mut self) {}
}

/// 打开写入端的工厂，跨线程共享。
pub trait ClipboardProvider: Send + Sync {
    fn open(&self) -> Box<dyn ClipboardSink>;
}

/// 最近一次成功写入的内容，用于在 Linux 上继续持有。
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
enum HeldContent {
    Html(String),
    Text(String),
}

/// 基于 `arboard` 与 OSC 52 的系统剪贴板。
pub struct SystemClipboard {
    clipboard: Result<arboard::Clipboard, String>,
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    hold: Duration,
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    last_write: Option<HeldContent>,
}

impl SystemClipboard {
    pub fn open(hold: Duration) -> Self {
        let clipboard = arboard::Clipboard::new().map_err(|e| e.to_string());
        if let Err(err) = &clipboard {
            log::debug!("📋 系统剪贴板不可用：{}", err);
        }
        Self {
            clipboard,
            hold,
            last_write: None,
        }
    }

    fn clipboard(&mut self) -> Result<&mut arboard::Clipboard, ClipboardWriteFailure> {
        self.clipboard
            .as_mut()
            .map_err(|e| ClipboardWriteFailure::unavailable(format!("无法访问剪贴板：{}", e)))
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_html(&mut self, html: &str) -> Result<(), ClipboardWriteFailure> {
        self.clipboard()?
            .set_html(html, None)
            .map_err(|e| ClipboardWriteFailure::rejected(format!("写入 HTML 失败：{}", e)))?;
        self.last_write = Some(HeldContent::Html(html.to_string()));
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardWriteFailure> {
        self.clipboard()?
            .set_text(text)
            .map_err(|e| ClipboardWriteFailure::rejected(format!("写入文本失败：{}", e)))?;
        self.last_write = Some(HeldContent::Text(text.to_string()));
        Ok(())
    }

    fn write_legacy(&mut self, text: &str) -> Result<(), ClipboardWriteFailure> {
        let stdout = io::stdout();
        if !stdout.is_terminal() {
            return Err(ClipboardWriteFailure::unavailable("stdout 不是终端，无法使用 OSC 52"));
        }

        let mut handle = stdout.lock();
        handle
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| handle.flush())
            .map_err(|e| ClipboardWriteFailure::rejected(format!("写入终端选区失败：{}", e)))
    }

    #[cfg(target_os = "linux")]
    fn hold_selection(&mut self) {
        use arboard::SetExtLinux;

        let Some(content) = self.last_write.take() else {
            return;
        };
        let Ok(clipboard) = self.clipboard.as_mut() else {
            return;
        };

        log::debug!("📋 持有剪贴板内容 {}ms", self.hold.as_millis());
        let deadline = std::time::Instant::now() + self.hold;
        let result = match &content {
            HeldContent::Html(html) => clipboard
                .set()
                .wait_until(deadline)
                .html(html.as_str(), None::<&str>),
            HeldContent::Text(text) => clipboard.set().wait_until(deadline).text(text.as_str()),
        };

        if let Err(e) = result {
            log::warn!("⚠️ 持有剪贴板内容失败: {}", e);
        }
    }
}

/// 默认的系统剪贴板工厂。
///
/// `hold` 为写入成功后继续持有内容的时长，通常与“已复制”提示时长一致。
#[derive(Debug, Clone, Copy)]
pub struct SystemClipboardProvider {
    hold: Duration,
}

impl SystemClipboardProvider {
    pub fn new(hold: Duration) -> Self {
        Self { hold }
    }
}

impl Default for SystemClipboardProvider {
    fn default() -> Self {
        Self::new(Duration::from_millis(super::DEFAULT_ACK_MS))
    }
}

impl ClipboardProvider for SystemClipboardProvider {
    fn open(&self) -> Box<dyn ClipboardSink> {
        Box::new(SystemClipboard::open(self.hold))
    }
}

/// 构造把 `text` 放入系统剪贴板的 OSC 52 序列。
pub(crate) fn osc52_sequence(text: &str) -> String {
    format!(
        "\x1b]52;c;{}\x07",
        general_purpose::STANDARD.encode(text.as_bytes())
    )
}
