//! # 表单运行时
//!
//! ## 设计思路
//!
//! 单一逻辑执行者：运行时独占 `FormSession`，一次只应用一条消息。
//! 副作用在 tokio 任务中执行，结果通过无界通道回送，
//! 不存在跨任务共享的可变状态。
//!
//! ## 实现思路
//!
//! - `dispatch()` 同步应用消息，并把产生的副作用派发为任务。
//! - `pending` 记录尚未回送结果的任务数；为 0 时 `next_event()` 返回 `None`，
//!   调用方据此判断会话已空闲。
//! - 派发任务需要处于 tokio 运行时上下文中。

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::session::{FormEffect, FormMessage, FormSession};
use crate::clipboard::{copy_signature, ClipboardProvider};
use crate::thumbnail::ThumbnailHandler;

pub struct FormRuntime {
    session: FormSession,
    thumbnails: ThumbnailHandler,
    clipboard: Arc<dyn ClipboardProvider>,
    tx: UnboundedSender<FormMessage>,
    rx: UnboundedReceiver<FormMessage>,
    pending: usize,
}

impl FormRuntime {
    pub fn new(
        session: FormSession,
        thumbnails: ThumbnailHandler,
        clipboard: Arc<dyn ClipboardProvider>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            session,
            thumbnails,
            clipboard,
            tx,
            rx,
            pending: 0,
        }
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    /// 尚未完成的副作用数量
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// 应用一条消息并派发其副作用。
    pub fn dispatch(&mut self, message: FormMessage) {
        let (next, effect) = self.session.update(message);
        self.session = next;

        if let Some(effect) = effect {
            self.spawn_effect(effect);
        }
    }

    /// 等待下一条副作用结果并应用；没有在途任务时返回 `None`。
    pub async fn next_event(&mut self) -> Option<&FormSession> {
        if self.pending == 0 {
            return None;
        }

        let message = self.rx.recv().await?;
        self.pending -= 1;
        log::debug!("📨 收到副作用结果: {:?}", message);
        self.dispatch(message);
        Some(&self.session)
    }

    /// 处理所有在途副作用（包括它们继续产生的副作用），直到空闲。
    pub async fn run_until_idle(&mut self) -> &FormSession {
        while self.next_event().await.is_some() {}
        &self.session
    }

    fn spawn_effect(&mut self, effect: FormEffect) {
        let tx = self.tx.clone();
        self.pending += 1;

        match effect {
            FormEffect::LoadThumbnail(path) => {
                let thumbnails = self.thumbnails.clone();
                tokio::spawn(async move {
                    let result = thumbnails.resize_to_data_url(&path).await;
                    let _ = tx.send(FormMessage::PhotoLoaded(result));
                });
            }
            FormEffect::CopyToClipboard(html) => {
                let clipboard = Arc::clone(&self.clipboard);
                tokio::spawn(async move {
                    let outcome = copy_signature(clipboard, html).await;
                    let _ = tx.send(FormMessage::CopyFinished(outcome));
                });
            }
            FormEffect::ResetCopiedAfter(generation, duration) => {
                tokio::spawn(async move {
                    tokio::time::sleep(duration).await;
                    let _ = tx.send(FormMessage::CopiedExpired(generation));
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::sink::tests::ScriptedProvider;
    use crate::clipboard::CopyConfig;
    use crate::signature::SignatureRecord;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
    use std::io::Cursor;
    use std::time::Duration;

    fn runtime(script: [bool; 3]) -> FormRuntime {
        let session = FormSession::with_copy_config(
            SignatureRecord::seed(),
            CopyConfig {
                ack_duration: Duration::from_millis(20),
            },
        );
        FormRuntime::new(
            session,
            ThumbnailHandler::default(),
            Arc::new(ScriptedProvider(script)),
        )
    }

    #[tokio::test]
    async fn idle_runtime_has_no_events() {
        let mut runtime = runtime([true, true, true]);
        assert!(runtime.next_event().await.is_none());
    }

    #[tokio::test]
    async fn copy_acknowledgement_appears_then_expires() {
        let mut runtime = runtime([false, true, true]);
        runtime.dispatch(FormMessage::CopyRequested);
        assert_eq!(runtime.pending(), 1);

        let session = runtime.next_event().await.expect("copy result");
        assert!(session.copied());

        let session = runtime.run_until_idle().await;
        assert!(!session.copied());
        assert_eq!(runtime.pending(), 0);
    }

    #[tokio::test]
    async fn failed_copy_leaves_no_acknowledgement() {
        let mut runtime = runtime([false, false, false]);
        runtime.dispatch(FormMessage::CopyRequested);

        let session = runtime.run_until_idle().await;
        assert!(!session.copied());
    }

    #[tokio::test]
    async fn selected_photo_is_embedded_as_jpeg() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("avatar.png");
        let img = ImageBuffer::from_fn(600, 400, |x, y| Rgb([(x % 255) as u8, (y % 255) as u8, 90]));
        let mut cursor = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut cursor, ImageFormat::Png)
            .expect("encode png");
        std::fs::write(&path, cursor.into_inner()).expect("write png");

        let mut runtime = runtime([true, true, true]);
        runtime.dispatch(FormMessage::PhotoSelected(path));

        let session = runtime.run_until_idle().await;
        assert!(session.record().photo_url.starts_with("data:image/jpeg;base64,"));
        assert!(session.notice().is_none());
    }

    #[tokio::test]
    async fn unreadable_photo_raises_notice() {
        let mut runtime = runtime([true, true, true]);
        runtime.dispatch(FormMessage::PhotoSelected("/definitely/not/here.png".into()));

        let session = runtime.run_until_idle().await;
        assert!(session.record().photo_url.is_empty());
        assert!(session.notice().is_some());
    }
}
