//! Plain-text access to the OS clipboard.
//!
//! The clipboard belongs to the OS; other applications may read or write it
//! at any time. Callers treat it as best-effort shared state.

use crate::error::TranslateError;

pub trait Clipboard: Send + Sync {
    fn read_text(&self) -> Result<String, TranslateError>;
    fn write_text(&self, text: &str) -> Result<(), TranslateError>;
}

/// The real system clipboard: clipboard-win on Windows, arboard elsewhere.
#[derive(Default)]
pub struct SystemClipboard {
    // X11 and Wayland only serve our content while the handle is alive, so
    // one handle is kept for the life of the app.
    #[cfg(not(windows))]
    handle: std::sync::Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(windows)]
impl Clipboard for SystemClipboard {
    fn read_text(&self) -> Result<String, TranslateError> {
        clipboard_win::get_clipboard_string().map_err(|e| TranslateError::Clipboard(e.to_string()))
    }

    fn write_text(&self, text: &str) -> Result<(), TranslateError> {
        clipboard_win::set_clipboard_string(text).map_err(|e| TranslateError::Clipboard(e.to_string()))
    }
}

#[cfg(not(windows))]
impl SystemClipboard {
    fn with_handle<T>(
        &self,
        f: impl FnOnce(&mut arboard::Clipboard) -> Result<T, arboard::Error>,
    ) -> Result<T, TranslateError> {
        let mut guard = self.handle.lock().unwrap_or_else(|p| p.into_inner());
        if guard.is_none() {
            let cb = arboard::Clipboard::new().map_err(|e| TranslateError::Clipboard(e.to_string()))?;
            *guard = Some(cb);
        }
        match guard.as_mut() {
            Some(cb) => f(cb).map_err(|e| TranslateError::Clipboard(e.to_string())),
            None => Err(TranslateError::Clipboard("clipboard unavailable".to_string())),
        }
    }
}

#[cfg(not(windows))]
impl Clipboard for SystemClipboard {
    fn read_text(&self) -> Result<String, TranslateError> {
        self.with_handle(|cb| cb.get_text())
    }

    fn write_text(&self, text: &str) -> Result<(), TranslateError> {
        self.with_handle(|cb| cb.set_text(text))
    }
}
