//! # 表单会话状态
//!
//! ## 设计思路
//!
//! 表单状态是一份不可变快照，`update()` 接收一条消息，返回新的快照和
//! 至多一个副作用描述。副作用本身（读图、写剪贴板、计时）由
//! `runtime` 执行，结果再以消息形式回到这里。
//!
//! ```text
//! FormMessage ──► update() ──► (FormSession', Option<FormEffect>)
//!                                      │
//!                         runtime 执行 ─┘──► 结果消息 ──► update()
//! ```
//!
//! ## 实现思路
//!
//! - HTML 只在记录真正变化时重新生成。
//! - “已复制”提示带代次号：过期消息的代次落后时直接忽略，
//!   避免旧计时器清掉新一次复制的提示。
//! - 头像加载失败只产生可关闭的提示，`photo_url` 保持原值。

use std::path::PathBuf;
use std::time::Duration;

use crate::clipboard::{CopyConfig, CopyOutcome};
use crate::signature::{generate, RecordField, SignatureRecord};
use crate::thumbnail::ImageError;

/// 可关闭的提示。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

/// 输入消息
#[derive(Debug)]
pub enum FormMessage {
    FieldChanged { field: RecordField, value: String },
    PhotoSelected(PathBuf),
    PhotoLoaded(Result<String, ImageError>),
    CopyRequested,
    CopyFinished(CopyOutcome),
    CopiedExpired(u64),
    ToggleHtmlSource,
    DismissNotice,
}

/// 需要运行时执行的副作用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEffect {
    /// 读取并缩放头像
    LoadThumbnail(PathBuf),
    /// 复制签名 HTML
    CopyToClipboard(String),
    /// 指定时长后发送 `CopiedExpired(generation)`
    ResetCopiedAfter(u64, Duration),
}

/// 表单会话快照。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSession {
    record: SignatureRecord,
    signature_html: String,
    copied: bool,
    show_html: bool,
    notice: Option<Notice>,
    copy_generation: u64,
    copy_config: CopyConfig,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(SignatureRecord::seed())
    }
}

impl FormSession {
    pub fn new(record: SignatureRecord) -> Self {
        Self::with_copy_config(record, CopyConfig::default())
    }

    pub fn with_copy_config(record: SignatureRecord, copy_config: CopyConfig) -> Self {
        let signature_html = generate(&record);
        Self {
            record,
            signature_html,
            copied: false,
            show_html: false,
            notice: None,
            copy_generation: 0,
            copy_config,
        }
    }

    pub fn record(&self) -> &SignatureRecord {
        &self.record
    }

    pub fn signature_html(&self) -> &str {
        &self.signature_html
    }

    /// “已复制”提示是否可见
    pub fn copied(&self) -> bool {
        self.copied
    }

    pub fn show_html(&self) -> bool {
        self.show_html
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// 处理一条消息，返回新快照与待执行的副作用。
    pub fn update(&self, message: FormMessage) -> (FormSession, Option<FormEffect>) {
        let mut next = self.clone();

        let effect = match message {
            FormMessage::FieldChanged { field, value } => {
                next.replace_record(self.record.with_field(field, value));
                None
            }
            FormMessage::PhotoSelected(path) => Some(FormEffect::LoadThumbnail(path)),
            FormMessage::PhotoLoaded(Ok(data_url)) => {
                next.replace_record(self.record.with_field(RecordField::PhotoUrl, data_url));
                next.notice = None;
                None
            }
            FormMessage::PhotoLoaded(Err(err)) => {
                log::warn!("⚠️ 头像加载失败，保留原头像: {}", err);
                next.notice = Some(Notice {
                    message: format!("头像无法加载：{}", err),
                });
                None
            }
            FormMessage::CopyRequested => {
                Some(FormEffect::CopyToClipboard(self.signature_html.clone()))
            }
            FormMessage::CopyFinished(outcome) => {
                if outcome.is_success() {
                    next.copy_generation += 1;
                    next.copied = true;
                    Some(FormEffect::ResetCopiedAfter(
                        next.copy_generation,
                        self.copy_config.ack_duration,
                    ))
                } else {
                    None
                }
            }
            FormMessage::CopiedExpired(generation) => {
                if generation == self.copy_generation {
                    next.copied = false;
                }
                None
            }
            FormMessage::ToggleHtmlSource => {
                next.show_html = !self.show_html;
                None
            }
            FormMessage::DismissNotice => {
                next.notice = None;
                None
            }
        };

        (next, effect)
    }

    fn replace_record(&mut self, record: SignatureRecord) {
        if record == self.record {
            return;
        }
        self.signature_html = generate(&record);
        self.record = record;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::CopyTier;

    fn changed(field: RecordField, value: &str) -> FormMessage {
        FormMessage::FieldChanged {
            field,
            value: value.to_string(),
        }
    }

    fn copied_ok() -> FormMessage {
        FormMessage::CopyFinished(CopyOutcome {
            tier: Some(CopyTier::RichHtml),
            failures: Vec::new(),
        })
    }

    #[test]
    fn field_change_regenerates_html() {
        let session = FormSession::default();
        let (next, effect) = session.update(changed(RecordField::Title, "Chief Engineer"));

        assert!(effect.is_none());
        assert_eq!(next.record().title, "Chief Engineer");
        assert!(next.signature_html().contains("Chief Engineer"));
        assert_eq!(next.signature_html(), generate(next.record()));
    }

    #[test]
    fn unchanged_value_keeps_the_snapshot() {
        let session = FormSession::default();
        let name = session.record().name.clone();
        let (next, _) = session.update(changed(RecordField::Name, &name));

        assert_eq!(next, session);
    }

    #[test]
    fn photo_selection_requests_a_thumbnail() {
        let (_, effect) = FormSession::default().update(FormMessage::PhotoSelected("me.png".into()));
        assert_eq!(effect, Some(FormEffect::LoadThumbnail(PathBuf::from("me.png"))));
    }

    #[test]
    fn loaded_photo_replaces_initials() {
        let (next, _) = FormSession::default().update(FormMessage::PhotoLoaded(Ok(
            "data:image/jpeg;base64,AAAA".to_string(),
        )));

        assert_eq!(next.record().photo_url, "data:image/jpeg;base64,AAAA");
        assert!(next.signature_html().contains(r#"<img src="data:image/jpeg;base64,AAAA""#));
    }

    #[test]
    fn failed_photo_keeps_previous_url_and_raises_notice() {
        let session = FormSession::default()
            .update(changed(RecordField::PhotoUrl, "https://example.com/me.jpg"))
            .0;
        let (next, effect) = session.update(FormMessage::PhotoLoaded(Err(ImageError::Decode(
            "truncated".to_string(),
        ))));

        assert!(effect.is_none());
        assert_eq!(next.record().photo_url, "https://example.com/me.jpg");
        assert_eq!(next.signature_html(), session.signature_html());
        assert!(next.notice().is_some());

        let (dismissed, _) = next.update(FormMessage::DismissNotice);
        assert!(dismissed.notice().is_none());
    }

    #[test]
    fn copy_request_carries_current_html() {
        let session = FormSession::default();
        let (_, effect) = session.update(FormMessage::CopyRequested);
        assert_eq!(
            effect,
            Some(FormEffect::CopyToClipboard(session.signature_html().to_string()))
        );
    }

    #[test]
    fn successful_copy_schedules_expiry() {
        let (next, effect) = FormSession::default().update(copied_ok());

        assert!(next.copied());
        assert_eq!(
            effect,
            Some(FormEffect::ResetCopiedAfter(1, Duration::from_millis(1500)))
        );

        let (expired, _) = next.update(FormMessage::CopiedExpired(1));
        assert!(!expired.copied());
    }

    #[test]
    fn failed_copy_shows_nothing() {
        let (next, effect) = FormSession::default().update(FormMessage::CopyFinished(CopyOutcome {
            tier: None,
            failures: Vec::new(),
        }));

        assert!(effect.is_none());
        assert!(!next.copied());
        assert!(next.notice().is_none());
    }

    #[test]
    fn stale_expiry_does_not_clear_newer_acknowledgement() {
        let first = FormSession::default().update(copied_ok()).0;
        let second = first.update(copied_ok()).0;

        let (after_stale, _) = second.update(FormMessage::CopiedExpired(1));
        assert!(after_stale.copied());

        let (after_current, _) = after_stale.update(FormMessage::CopiedExpired(2));
        assert!(!after_current.copied());
    }

    #[test]
    fn toggle_flips_source_view() {
        let session = FormSession::default();
        let shown = session.update(FormMessage::ToggleHtmlSource).0;
        assert!(shown.show_html());
        assert!(!shown.update(FormMessage::ToggleHtmlSource).0.show_html());
    }
}
