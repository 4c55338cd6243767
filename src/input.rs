//! Copy/paste key simulation against the foreground application.
//!
//! There is no completion signal for either action; the orchestrator waits
//! a fixed delay after copying and never waits for the paste.

use crate::error::TranslateError;

pub trait InputSimulator: Send + Sync {
    /// Ctrl+C in whatever window has focus.
    fn copy(&self) -> Result<(), TranslateError>;
    /// Ctrl+V in whatever window has focus.
    fn paste(&self) -> Result<(), TranslateError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct KeyboardSimulator;

#[cfg(windows)]
mod win {
    use std::mem::size_of;

    use windows::Win32::UI::Input::KeyboardAndMouse as km;

    use crate::error::TranslateError;

    fn key(vk: km::VIRTUAL_KEY, up: bool) -> km::INPUT {
        km::INPUT {
            r#type: km::INPUT_KEYBOARD,
            Anonymous: km::INPUT_0 {
                ki: km::KEYBDINPUT {
                    wVk: vk,
                    wScan: 0,
                    dwFlags: if up { km::KEYEVENTF_KEYUP } else { km::KEYBD_EVENT_FLAGS(0) },
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        }
    }

    /// Ctrl+<vk>. Shift and Alt are released first: the hotkey that got us
    /// here (Ctrl+Shift+1/2) is usually still held and would turn Ctrl+C
    /// into Ctrl+Shift+C.
    pub fn send_ctrl_chord(vk: km::VIRTUAL_KEY) -> Result<(), TranslateError> {
        let inputs = [
            key(km::VK_SHIFT, true),
            key(km::VK_MENU, true),
            key(km::VK_CONTROL, false),
            key(vk, false),
            key(vk, true),
            key(km::VK_CONTROL, true),
        ];
        let sent = unsafe { km::SendInput(&inputs, size_of::<km::INPUT>() as i32) };
        if sent as usize != inputs.len() {
            return Err(TranslateError::Input(format!(
                "SendInput delivered {} of {} events",
                sent,
                inputs.len()
            )));
        }
        Ok(())
    }
}

#[cfg(windows)]
impl InputSimulator for KeyboardSimulator {
    fn copy(&self) -> Result<(), TranslateError> {
        win::send_ctrl_chord(windows::Win32::UI::Input::KeyboardAndMouse::VK_C)
    }

    fn paste(&self) -> Result<(), TranslateError> {
        win::send_ctrl_chord(windows::Win32::UI::Input::KeyboardAndMouse::VK_V)
    }
}

// Without key simulation we rely on the clipboard already holding the
// selection.
#[cfg(not(windows))]
impl InputSimulator for KeyboardSimulator {
    fn copy(&self) -> Result<(), TranslateError> {
        tracing::debug!("copy simulation not available on this platform; using clipboard as-is");
        Ok(())
    }

    fn paste(&self) -> Result<(), TranslateError> {
        tracing::debug!("paste simulation not available on this platform");
        Ok(())
    }
}
