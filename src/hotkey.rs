use tokio::sync::mpsc::UnboundedSender;

use crate::translator::Direction;
use crate::Command;

#[cfg(windows)]
mod imp {
    use std::thread;

    use tokio::sync::mpsc::UnboundedSender;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::Input::KeyboardAndMouse as km;
    use windows::Win32::UI::WindowsAndMessaging as wm;

    use super::BINDINGS;
    use crate::Command;

    pub fn spawn_listener(tx: UnboundedSender<Command>) {
        thread::spawn(move || unsafe {
            // Hotkeys belong to the thread that registers them, so registration
            // and the message loop share this thread.
            let modifiers = km::HOT_KEY_MODIFIERS(km::MOD_CONTROL.0 | km::MOD_SHIFT.0 | km::MOD_NOREPEAT.0);
            for binding in BINDINGS {
                if km::RegisterHotKey(HWND(std::ptr::null_mut()), binding.id, modifiers, binding.vk as u32).is_err() {
                    tracing::error!("RegisterHotKey {} FAILED", binding.label);
                    crate::notify::toast(
                        "Urdu English Translator",
                        &format!("Failed to register {} hotkey (in use?)", binding.label),
                    );
                } else {
                    tracing::info!("RegisterHotKey {} OK", binding.label);
                }
            }
            loop {
                let mut msg = wm::MSG::default();
                let got = wm::GetMessageW(&mut msg, HWND(std::ptr::null_mut()), 0, 0);
                if got.0 == -1 || got.0 == 0 {
                    tracing::warn!("GetMessageW returned {}, leaving hotkey loop", got.0);
                    break;
                }
                if msg.message == wm::WM_HOTKEY {
                    let id = msg.wParam.0 as i32;
                    if let Some(binding) = BINDINGS.iter().find(|b| b.id == id) {
                        tracing::info!("WM_HOTKEY {}", binding.label);
                        if tx.send(Command::Translate(binding.direction)).is_err() {
                            break;
                        }
                    }
                }
                let _ = wm::TranslateMessage(&msg);
                wm::DispatchMessageW(&msg);
            }
            for binding in BINDINGS {
                let _ = km::UnregisterHotKey(HWND(std::ptr::null_mut()), binding.id);
            }
            tracing::info!("hotkeys unregistered");
        });
    }
}

#[cfg_attr(not(windows), allow(dead_code))]
struct Binding {
    id: i32,
    /// Virtual-key code of the digit, pressed together with Ctrl+Shift.
    vk: u16,
    label: &'static str,
    direction: Direction,
}

const BINDINGS: [Binding; 2] = [
    Binding { id: 1, vk: 0x31, label: "Ctrl+Shift+1", direction: Direction::EnToRomanUrdu },
    Binding { id: 2, vk: 0x32, label: "Ctrl+Shift+2", direction: Direction::RomanUrduToEn },
];

/// Human-readable shortcut for a direction, for menus and the window.
pub fn shortcut_for(direction: Direction) -> &'static str {
    BINDINGS
        .iter()
        .find(|b| b.direction == direction)
        .map(|b| b.label)
        .unwrap_or("")
}

pub fn spawn_listener(tx: UnboundedSender<Command>) {
    #[cfg(windows)]
    imp::spawn_listener(tx);
    #[cfg(not(windows))]
    {
        drop(tx);
        tracing::info!(
            "global hotkeys are not available on this platform; use the window buttons instead"
        );
    }
}
