//! The translate-the-selection cycle.
//!
//! capture (snapshot, copy, settle, read) -> translate -> replace (write,
//! paste) -> restore (delayed write of the snapshot). At most one cycle runs
//! at a time; triggers that arrive while one is running are dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::clipboard::Clipboard;
use crate::error::TranslateError;
use crate::input::InputSimulator;
use crate::notify::{Notifier, Status};
use crate::translator::{Direction, Translate, TranslationRequest, MAX_CAPTURE_CHARS, MAX_PREVIEW_CHARS};

pub const SETTLE_DELAY: Duration = Duration::from_millis(300);
pub const RESTORE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, Debug)]
pub struct CycleTimings {
    /// Wait after the simulated copy before reading the clipboard.
    pub settle_delay: Duration,
    /// Wait after the paste before putting the old clipboard back.
    pub restore_delay: Duration,
}

impl Default for CycleTimings {
    fn default() -> Self {
        Self { settle_delay: SETTLE_DELAY, restore_delay: RESTORE_DELAY }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Another cycle was running; nothing happened.
    Skipped,
    Failed(TranslateError),
    Completed,
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Orchestrator {
    clipboard: Arc<dyn Clipboard>,
    input: Arc<dyn InputSimulator>,
    translator: Arc<dyn Translate>,
    notifier: Notifier,
    timings: CycleTimings,
    busy: AtomicBool,
    shutdown: watch::Receiver<bool>,
}

impl Orchestrator {
    pub fn new(
        clipboard: Arc<dyn Clipboard>,
        input: Arc<dyn InputSimulator>,
        translator: Arc<dyn Translate>,
        notifier: Notifier,
        timings: CycleTimings,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            clipboard,
            input,
            translator,
            notifier,
            timings,
            busy: AtomicBool::new(false),
            shutdown,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn try_acquire(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(&self.busy))
    }

    /// Translate whatever is selected in the foreground application and paste
    /// the result over it. Every error ends up as a status message.
    pub async fn run_cycle(&self, direction: Direction) -> CycleOutcome {
        let Some(_guard) = self.try_acquire() else {
            tracing::debug!("cycle already running; dropping {} trigger", direction);
            return CycleOutcome::Skipped;
        };
        tracing::info!("cycle start: {}", direction);
        match self.cycle(direction).await {
            Ok(()) => CycleOutcome::Completed,
            Err(e) => {
                tracing::warn!("cycle failed: {:?}", e);
                self.notifier.notify(Status::error(e.to_string()));
                CycleOutcome::Failed(e)
            }
        }
    }

    async fn cycle(&self, direction: Direction) -> Result<(), TranslateError> {
        let original = match self.clipboard.read_text() {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!("could not snapshot clipboard, it will not be restored: {}", e);
                None
            }
        };

        let translated = match self.capture_and_translate(direction).await {
            Ok(text) => text,
            Err(e) => {
                self.revert(original.as_deref());
                return Err(e);
            }
        };

        if let Err(e) = self.replace_selection(&translated) {
            self.revert(original.as_deref());
            return Err(e);
        }
        self.notifier.notify(Status::success("Translation completed!"));

        if let Some(original) = original {
            self.schedule_restore(original);
        }
        Ok(())
    }

    async fn capture_and_translate(&self, direction: Direction) -> Result<String, TranslateError> {
        self.input.copy()?;
        tokio::time::sleep(self.timings.settle_delay).await;

        let selected = self.clipboard.read_text().unwrap_or_else(|e| {
            tracing::warn!("reading selection failed: {}", e);
            String::new()
        });
        let request = TranslationRequest::new(&selected, direction, MAX_CAPTURE_CHARS)?;

        self.notifier.notify(Status::info("Translating..."));
        self.translator.translate(&request).await
    }

    fn replace_selection(&self, translated: &str) -> Result<(), TranslateError> {
        self.clipboard.write_text(translated)?;
        self.input.paste()
    }

    /// Undo whatever the copy did to the clipboard. Only writes when the
    /// content actually changed.
    fn revert(&self, original: Option<&str>) {
        let Some(original) = original else { return };
        let current = self.clipboard.read_text().ok();
        if current.as_deref() == Some(original) {
            return;
        }
        if let Err(e) = self.clipboard.write_text(original) {
            let e = TranslateError::ClipboardRestoreFailure(e.to_string());
            tracing::warn!("{}", e);
        }
    }

    /// Put `original` back once the target application has had time to
    /// consume the paste. Dropped without writing if the app shuts down first.
    fn schedule_restore(&self, original: String) {
        let clipboard = Arc::clone(&self.clipboard);
        let delay = self.timings.restore_delay;
        let mut shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {
                    match clipboard.write_text(&original) {
                        Ok(()) => tracing::debug!("clipboard restored"),
                        Err(e) => {
                            let e = TranslateError::ClipboardRestoreFailure(e.to_string());
                            tracing::warn!("{}", e);
                        }
                    }
                }
                _ = wait_for_shutdown(&mut shutdown) => {
                    tracing::debug!("shutting down; pending clipboard restore dropped");
                }
            }
        });
    }

    /// Test translation from the settings window. Leaves the clipboard and the
    /// cycle guard alone.
    pub async fn preview(&self, text: &str, direction: Direction) -> Result<String, TranslateError> {
        let result = match TranslationRequest::new(text, direction, MAX_PREVIEW_CHARS) {
            Ok(request) => {
                self.notifier.notify(Status::info("Testing translation..."));
                self.translator.translate(&request).await
            }
            Err(e) => Err(e),
        };
        match &result {
            Ok(out) => self.notifier.notify(Status::success(format!("Translation: {}", out))),
            Err(TranslateError::InputTooLong { max, .. }) => self.notifier.notify(Status::error(format!(
                "Test text too long. Please use less than {} characters.",
                max
            ))),
            Err(e) => self.notifier.notify(Status::error(format!("Test failed: {}", e))),
        }
        result
    }
}

async fn wait_for_shutdown(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            // Sender gone: no shutdown signal can arrive any more.
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, SharedConfig};
    use crate::notify::StatusKind;
    use crate::translator::OpenAiTranslator;
    use async_trait::async_trait;
    use crossbeam_channel::Receiver;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeClipboard {
        content: Mutex<String>,
        writes: AtomicUsize,
        fail_writes: AtomicBool,
        /// Writes of exactly this text fail; everything else goes through.
        reject: Mutex<Option<String>>,
        fail_next_read: AtomicBool,
    }

    impl FakeClipboard {
        fn holding(text: &str) -> Arc<Self> {
            Arc::new(Self { content: Mutex::new(text.to_string()), ..Self::default() })
        }

        fn get(&self) -> String {
            self.content.lock().unwrap().clone()
        }
    }

    impl Clipboard for FakeClipboard {
        fn read_text(&self) -> Result<String, TranslateError> {
            if self.fail_next_read.swap(false, Ordering::SeqCst) {
                return Err(TranslateError::Clipboard("access denied".into()));
            }
            Ok(self.get())
        }

        fn write_text(&self, text: &str) -> Result<(), TranslateError> {
            let rejected = self.reject.lock().unwrap().as_deref() == Some(text);
            if rejected || self.fail_writes.load(Ordering::SeqCst) {
                return Err(TranslateError::Clipboard("locked by another app".into()));
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            *self.content.lock().unwrap() = text.to_string();
            Ok(())
        }
    }

    /// Stands in for the foreground app: a copy puts `selection` on the
    /// clipboard, unless it is `None` (app ignored the keystroke).
    struct FakeInput {
        clipboard: Arc<FakeClipboard>,
        selection: Option<String>,
        copies: AtomicUsize,
        pastes: AtomicUsize,
        fail_copy: AtomicBool,
        fail_paste: AtomicBool,
    }

    impl FakeInput {
        fn new(clipboard: &Arc<FakeClipboard>, selection: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                clipboard: Arc::clone(clipboard),
                selection: selection.map(str::to_string),
                copies: AtomicUsize::new(0),
                pastes: AtomicUsize::new(0),
                fail_copy: AtomicBool::new(false),
                fail_paste: AtomicBool::new(false),
            })
        }
    }

    impl InputSimulator for FakeInput {
        fn copy(&self) -> Result<(), TranslateError> {
            self.copies.fetch_add(1, Ordering::SeqCst);
            if self.fail_copy.load(Ordering::SeqCst) {
                return Err(TranslateError::Input("SendInput blocked".into()));
            }
            if let Some(sel) = &self.selection {
                *self.clipboard.content.lock().unwrap() = sel.clone();
            }
            Ok(())
        }

        fn paste(&self) -> Result<(), TranslateError> {
            self.pastes.fetch_add(1, Ordering::SeqCst);
            if self.fail_paste.load(Ordering::SeqCst) {
                return Err(TranslateError::Input("blocked".into()));
            }
            Ok(())
        }
    }

    struct FakeTranslator {
        reply: Result<String, TranslateError>,
        delay: Duration,
        calls: AtomicUsize,
        last_text: Mutex<Option<String>>,
    }

    impl FakeTranslator {
        fn replying(reply: Result<&str, TranslateError>) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.map(str::to_string),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
                last_text: Mutex::new(None),
            })
        }

        fn slow(reply: &str, delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                delay,
                calls: AtomicUsize::new(0),
                last_text: Mutex::new(None),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Translate for FakeTranslator {
        async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_text.lock().unwrap() = Some(request.text().to_string());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.reply.clone()
        }
    }

    const FAST: CycleTimings = CycleTimings {
        settle_delay: Duration::from_millis(5),
        restore_delay: Duration::from_millis(50),
    };

    struct Harness {
        orch: Arc<Orchestrator>,
        clipboard: Arc<FakeClipboard>,
        input: Arc<FakeInput>,
        statuses: Receiver<Status>,
        shutdown: watch::Sender<bool>,
    }

    fn harness(
        clipboard_text: &str,
        selection: Option<&str>,
        translator: Arc<dyn Translate>,
    ) -> Harness {
        let clipboard = FakeClipboard::holding(clipboard_text);
        let input = FakeInput::new(&clipboard, selection);
        let (notifier, statuses) = Notifier::new(false);
        let (shutdown, shutdown_rx) = watch::channel(false);
        let orch = Arc::new(Orchestrator::new(
            clipboard.clone(),
            input.clone(),
            translator,
            notifier,
            FAST,
            shutdown_rx,
        ));
        Harness { orch, clipboard, input, statuses, shutdown }
    }

    fn drain(rx: &Receiver<Status>) -> Vec<Status> {
        rx.try_iter().collect()
    }

    async fn past_restore() {
        tokio::time::sleep(FAST.restore_delay * 3).await;
    }

    #[tokio::test]
    async fn success_pastes_then_restores_original() {
        let translator = FakeTranslator::replying(Ok("Hello, aap kaise hain?"));
        let h = harness("before", Some("  Hello, how are you? "), translator.clone());

        let outcome = h.orch.run_cycle(Direction::EnToRomanUrdu).await;

        assert_eq!(outcome, CycleOutcome::Completed);
        assert_eq!(h.clipboard.get(), "Hello, aap kaise hain?");
        assert_eq!(h.input.pastes.load(Ordering::SeqCst), 1);
        assert_eq!(translator.last_text.lock().unwrap().as_deref(), Some("Hello, how are you?"));
        assert!(!h.orch.is_busy());
        assert_eq!(
            drain(&h.statuses),
            vec![Status::info("Translating..."), Status::success("Translation completed!")]
        );

        past_restore().await;
        assert_eq!(h.clipboard.get(), "before");
    }

    #[tokio::test]
    async fn second_trigger_while_busy_is_a_no_op() {
        let translator = FakeTranslator::slow("Salaam", Duration::from_millis(100));
        let h = harness("before", Some("Hello"), translator.clone());

        let first = tokio::spawn({
            let orch = Arc::clone(&h.orch);
            async move { orch.run_cycle(Direction::EnToRomanUrdu).await }
        });
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(h.orch.is_busy());

        let seen_before = drain(&h.statuses);
        let writes_before = h.clipboard.writes.load(Ordering::SeqCst);

        let second = h.orch.run_cycle(Direction::RomanUrduToEn).await;

        assert_eq!(second, CycleOutcome::Skipped);
        assert!(h.statuses.is_empty());
        assert_eq!(h.clipboard.writes.load(Ordering::SeqCst), writes_before);
        assert_eq!(h.input.copies.load(Ordering::SeqCst), 1);
        assert_eq!(translator.calls(), 1);
        assert_eq!(seen_before, vec![Status::info("Translating...")]);

        assert_eq!(first.await.unwrap(), CycleOutcome::Completed);
    }

    #[tokio::test]
    async fn guard_is_released_after_failure() {
        let translator = FakeTranslator::replying(Err(TranslateError::Unauthorized));
        let h = harness("before", Some("Hello"), translator.clone());

        h.orch.run_cycle(Direction::EnToRomanUrdu).await;
        let again = h.orch.run_cycle(Direction::EnToRomanUrdu).await;

        assert_eq!(again, CycleOutcome::Failed(TranslateError::Unauthorized));
        assert_eq!(translator.calls(), 2);
    }

    #[tokio::test]
    async fn oversized_selection_never_reaches_translator() {
        let translator = FakeTranslator::replying(Ok("unused"));
        let long = "a".repeat(MAX_CAPTURE_CHARS + 1);
        let h = harness("before", Some(&long), translator.clone());

        let outcome = h.orch.run_cycle(Direction::EnToRomanUrdu).await;

        assert_eq!(
            outcome,
            CycleOutcome::Failed(TranslateError::InputTooLong { len: 4001, max: 4000 })
        );
        assert_eq!(translator.calls(), 0);
        assert_eq!(h.clipboard.get(), "before");
        let statuses = drain(&h.statuses);
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].kind, StatusKind::Error);
        assert!(statuses[0].message.to_lowercase().contains("text too long"));
    }

    #[tokio::test]
    async fn blank_selection_is_reported() {
        let translator = FakeTranslator::replying(Ok("unused"));
        let h = harness("before", Some(" \n\t "), translator.clone());

        let outcome = h.orch.run_cycle(Direction::RomanUrduToEn).await;

        assert_eq!(outcome, CycleOutcome::Failed(TranslateError::EmptySelection));
        assert_eq!(translator.calls(), 0);
        assert_eq!(h.clipboard.get(), "before");
        let statuses = drain(&h.statuses);
        assert!(statuses[0].message.to_lowercase().contains("no text selected"));
    }

    #[tokio::test]
    async fn timeout_leaves_clipboard_as_it_was() {
        let translator = FakeTranslator::replying(Err(TranslateError::Timeout));
        let h = harness("before", Some("Hello"), translator);

        let outcome = h.orch.run_cycle(Direction::EnToRomanUrdu).await;

        assert_eq!(outcome, CycleOutcome::Failed(TranslateError::Timeout));
        assert_eq!(h.clipboard.get(), "before");
        assert_eq!(h.input.pastes.load(Ordering::SeqCst), 0);
        let last = drain(&h.statuses).pop().unwrap();
        assert_eq!(last.kind, StatusKind::Error);
        assert!(last.message.to_lowercase().contains("timeout"));

        past_restore().await;
        assert_eq!(h.clipboard.get(), "before");
    }

    #[tokio::test]
    async fn failure_without_copy_change_does_not_write() {
        // The app ignored Ctrl+C; the clipboard already held the text.
        let translator = FakeTranslator::replying(Err(TranslateError::MalformedResponse));
        let h = harness("Hello", None, translator.clone());

        h.orch.run_cycle(Direction::EnToRomanUrdu).await;

        assert_eq!(translator.last_text.lock().unwrap().as_deref(), Some("Hello"));
        assert_eq!(h.clipboard.get(), "Hello");
        assert_eq!(h.clipboard.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn restore_failure_is_not_surfaced() {
        let translator = FakeTranslator::replying(Ok("Salaam"));
        let h = harness("before", Some("Hello"), translator);

        assert_eq!(h.orch.run_cycle(Direction::EnToRomanUrdu).await, CycleOutcome::Completed);
        h.clipboard.fail_writes.store(true, Ordering::SeqCst);
        past_restore().await;

        assert_eq!(h.clipboard.get(), "Salaam");
        assert!(drain(&h.statuses).iter().all(|s| s.kind != StatusKind::Error));
    }

    #[tokio::test]
    async fn copy_failure_is_reported_and_nothing_is_sent() {
        let translator = FakeTranslator::replying(Ok("unused"));
        let h = harness("before", Some("Hello"), translator.clone());
        h.input.fail_copy.store(true, Ordering::SeqCst);

        let outcome = h.orch.run_cycle(Direction::EnToRomanUrdu).await;

        assert_eq!(outcome, CycleOutcome::Failed(TranslateError::Input("SendInput blocked".into())));
        assert_eq!(translator.calls(), 0);
        assert_eq!(h.clipboard.get(), "before");
        assert_eq!(h.clipboard.writes.load(Ordering::SeqCst), 0);
        assert_eq!(
            drain(&h.statuses),
            vec![Status::error("Key simulation failed: SendInput blocked")]
        );
        assert!(!h.orch.is_busy());
    }

    #[tokio::test]
    async fn paste_failure_reverts_clipboard() {
        let translator = FakeTranslator::replying(Ok("Salaam"));
        let h = harness("before", Some("Hello"), translator);
        h.input.fail_paste.store(true, Ordering::SeqCst);

        let outcome = h.orch.run_cycle(Direction::EnToRomanUrdu).await;

        assert_eq!(outcome, CycleOutcome::Failed(TranslateError::Input("blocked".into())));
        assert_eq!(h.clipboard.get(), "before");
        assert_eq!(
            drain(&h.statuses),
            vec![Status::info("Translating..."), Status::error("Key simulation failed: blocked")]
        );
        assert!(!h.orch.is_busy());

        past_restore().await;
        assert_eq!(h.clipboard.get(), "before");
    }

    #[tokio::test]
    async fn write_failure_while_replacing_reverts_clipboard() {
        let translator = FakeTranslator::replying(Ok("Salaam"));
        let h = harness("before", Some("Hello"), translator);
        *h.clipboard.reject.lock().unwrap() = Some("Salaam".into());

        let outcome = h.orch.run_cycle(Direction::EnToRomanUrdu).await;

        assert_eq!(
            outcome,
            CycleOutcome::Failed(TranslateError::Clipboard("locked by another app".into()))
        );
        assert_eq!(h.input.pastes.load(Ordering::SeqCst), 0);
        assert_eq!(h.clipboard.get(), "before");
        assert_eq!(
            drain(&h.statuses),
            vec![
                Status::info("Translating..."),
                Status::error("Clipboard error: locked by another app"),
            ]
        );
        assert!(!h.orch.is_busy());

        past_restore().await;
        assert_eq!(h.clipboard.get(), "before");
    }

    #[tokio::test]
    async fn unreadable_snapshot_skips_restore() {
        let translator = FakeTranslator::replying(Ok("Salaam"));
        let h = harness("before", Some("Hello"), translator);
        h.clipboard.fail_next_read.store(true, Ordering::SeqCst);

        let outcome = h.orch.run_cycle(Direction::EnToRomanUrdu).await;

        assert_eq!(outcome, CycleOutcome::Completed);
        assert_eq!(h.clipboard.get(), "Salaam");
        assert_eq!(h.input.pastes.load(Ordering::SeqCst), 1);
        assert!(!h.orch.is_busy());
        let writes = h.clipboard.writes.load(Ordering::SeqCst);

        past_restore().await;
        assert_eq!(h.clipboard.get(), "Salaam");
        assert_eq!(h.clipboard.writes.load(Ordering::SeqCst), writes);
    }

    #[tokio::test]
    async fn shutdown_cancels_pending_restore() {
        let translator = FakeTranslator::replying(Ok("Salaam"));
        let h = harness("before", Some("Hello"), translator);

        h.orch.run_cycle(Direction::EnToRomanUrdu).await;
        h.shutdown.send(true).unwrap();
        past_restore().await;

        assert_eq!(h.clipboard.get(), "Salaam");
    }

    #[tokio::test]
    async fn missing_key_fails_fast_through_real_client() {
        let cfg: SharedConfig = Arc::new(Mutex::new(Config {
            api_base: "http://127.0.0.1:1".into(),
            ..Config::default()
        }));
        let translator = Arc::new(OpenAiTranslator::new(cfg).unwrap());
        let h = harness("before", Some("Hello"), translator);

        let outcome = tokio::time::timeout(
            Duration::from_secs(1),
            h.orch.run_cycle(Direction::EnToRomanUrdu),
        )
        .await
        .expect("should not wait on the network");

        assert_eq!(outcome, CycleOutcome::Failed(TranslateError::MissingCredential));
        assert_eq!(h.clipboard.get(), "before");
        let last = drain(&h.statuses).pop().unwrap();
        assert!(last.message.contains("API key not set"));
    }

    #[tokio::test]
    async fn preview_leaves_clipboard_alone() {
        let translator = FakeTranslator::replying(Ok("Shukriya"));
        let h = harness("before", Some("ignored"), translator.clone());

        let out = h.orch.preview("Thank you", Direction::EnToRomanUrdu).await.unwrap();

        assert_eq!(out, "Shukriya");
        assert_eq!(h.clipboard.get(), "before");
        assert_eq!(h.input.copies.load(Ordering::SeqCst), 0);
        assert_eq!(
            drain(&h.statuses).pop(),
            Some(Status::success("Translation: Shukriya"))
        );
    }

    #[tokio::test]
    async fn preview_is_bounded_to_a_thousand_chars() {
        let translator = FakeTranslator::replying(Ok("unused"));
        let h = harness("before", None, translator.clone());

        let err = h
            .orch
            .preview(&"b".repeat(MAX_PREVIEW_CHARS + 1), Direction::RomanUrduToEn)
            .await
            .unwrap_err();

        assert_eq!(err, TranslateError::InputTooLong { len: 1001, max: 1000 });
        assert_eq!(translator.calls(), 0);
        let last = drain(&h.statuses).pop().unwrap();
        assert_eq!(last.kind, StatusKind::Error);
        assert_eq!(last.message, "Test text too long. Please use less than 1000 characters.");
    }

    #[tokio::test]
    async fn preview_failure_names_the_cause() {
        let translator = FakeTranslator::replying(Err(TranslateError::Unauthorized));
        let h = harness("before", None, translator);

        h.orch.preview("Thank you", Direction::EnToRomanUrdu).await.unwrap_err();

        assert_eq!(
            drain(&h.statuses).pop(),
            Some(Status::error("Test failed: Invalid API key. Please check your OpenAI API key."))
        );
    }
}
