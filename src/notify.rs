use crossbeam_channel::{Receiver, Sender};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    /// Info and success lines clear themselves; errors stay until replaced.
    pub fn auto_clears(self) -> bool {
        !matches!(self, StatusKind::Error)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Error, message: message.into() }
    }
}

/// One-way status push to the window. Errors also raise a desktop toast on
/// Windows, since the window is usually hidden in the tray when they happen.
#[derive(Clone)]
pub struct Notifier {
    tx: Sender<Status>,
    toasts: bool,
}

impl Notifier {
    pub fn new(toasts: bool) -> (Self, Receiver<Status>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx, toasts }, rx)
    }

    pub fn notify(&self, status: Status) {
        match status.kind {
            StatusKind::Error => tracing::warn!("status: {}", status.message),
            _ => tracing::info!("status: {}", status.message),
        }
        if self.raises_toast(status.kind) {
            toast("Urdu English Translator", &status.message);
        }
        // The window may already be gone during shutdown.
        let _ = self.tx.send(status);
    }

    fn raises_toast(&self, kind: StatusKind) -> bool {
        self.toasts && kind == StatusKind::Error
    }
}

pub fn toast(title: &str, body: &str) {
    #[cfg(windows)]
    {
        if let Err(e) = winrt_notification::Toast::new(winrt_notification::Toast::POWERSHELL_APP_ID)
            .title(title)
            .text1(body)
            .show()
        {
            tracing::debug!("toast failed: {:?}", e);
        }
    }
    #[cfg(not(windows))]
    {
        let _ = (title, body);
    }
}
