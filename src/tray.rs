use std::sync::mpsc::Sender;

use crate::translator::Direction;

#[cfg_attr(not(windows), allow(dead_code))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrayAction {
    Translate(Direction),
    ShowWindow,
    Quit,
}

#[cfg(windows)]
mod imp {
    use std::sync::mpsc::Sender;
    use std::thread;
    use std::time::Duration;

    use crossbeam_channel::Receiver;
    use tray_icon as tri;
    use tray_icon::menu::{Menu, MenuEvent, MenuItem, PredefinedMenuItem};
    use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

    use super::TrayAction;
    use crate::hotkey::shortcut_for;
    use crate::translator::Direction;

    struct TrayHandle {
        #[allow(dead_code)]
        tray: TrayIcon,
        menu_event_rx: Receiver<MenuEvent>,
        tray_event_rx: Receiver<tri::TrayIconEvent>,
        show_item: MenuItem,
        en_to_ur_item: MenuItem,
        ur_to_en_item: MenuItem,
        settings_item: MenuItem,
        quit_item: MenuItem,
        action_tx: Sender<TrayAction>,
    }

    impl TrayHandle {
        fn new(action_tx: Sender<TrayAction>) -> anyhow::Result<Self> {
            let menu = Menu::new();
            // Plain ASCII labels avoid shell/encoding quirks.
            let show = MenuItem::new("Show Translator", true, None);
            let en_to_ur = MenuItem::new(
                format!("English -> Roman Urdu ({})", shortcut_for(Direction::EnToRomanUrdu)),
                true,
                None,
            );
            let ur_to_en = MenuItem::new(
                format!("Roman Urdu -> English ({})", shortcut_for(Direction::RomanUrduToEn)),
                true,
                None,
            );
            let settings = MenuItem::new("Settings...", true, None);
            let quit = MenuItem::new("Quit", true, None);
            let sep1 = PredefinedMenuItem::separator();
            let sep2 = PredefinedMenuItem::separator();
            menu.append_items(&[&show, &en_to_ur, &ur_to_en, &sep1, &settings, &sep2, &quit])?;

            // 16x16 solid green square
            let (icon_w, icon_h) = (16, 16);
            let mut rgba = vec![0u8; icon_w * icon_h * 4];
            for px in rgba.chunks_exact_mut(4) {
                px.copy_from_slice(&[0x4C, 0xAF, 0x50, 0xFF]);
            }
            let icon = Icon::from_rgba(rgba, icon_w as u32, icon_h as u32)?;

            let tray = TrayIconBuilder::new()
                .with_tooltip(format!(
                    "Urdu English Translator\n{}: English -> Urdu\n{}: Urdu -> English",
                    shortcut_for(Direction::EnToRomanUrdu),
                    shortcut_for(Direction::RomanUrduToEn)
                ))
                .with_menu(Box::new(menu))
                .with_icon(icon)
                .build()?;

            Ok(Self {
                tray,
                menu_event_rx: MenuEvent::receiver().clone(),
                tray_event_rx: tri::TrayIconEvent::receiver().clone(),
                show_item: show,
                en_to_ur_item: en_to_ur,
                ur_to_en_item: ur_to_en,
                settings_item: settings,
                quit_item: quit,
                action_tx,
            })
        }

        fn action_for(&self, id: &tray_icon::menu::MenuId) -> Option<TrayAction> {
            if id == self.show_item.id() || id == self.settings_item.id() {
                Some(TrayAction::ShowWindow)
            } else if id == self.en_to_ur_item.id() {
                Some(TrayAction::Translate(Direction::EnToRomanUrdu))
            } else if id == self.ur_to_en_item.id() {
                Some(TrayAction::Translate(Direction::RomanUrduToEn))
            } else if id == self.quit_item.id() {
                Some(TrayAction::Quit)
            } else {
                None
            }
        }

        fn pump(&self) {
            while let Ok(event) = self.menu_event_rx.try_recv() {
                if let Some(action) = self.action_for(&event.id) {
                    tracing::info!("Tray: {:?}", action);
                    let _ = self.action_tx.send(action);
                }
            }
            while let Ok(event) = self.tray_event_rx.try_recv() {
                match event.click_type {
                    tri::ClickType::Left | tri::ClickType::Double => {
                        tracing::debug!("Tray: icon clicked, showing window");
                        let _ = self.action_tx.send(TrayAction::ShowWindow);
                    }
                    _ => {}
                }
            }
        }
    }

    pub fn spawn(action_tx: Sender<TrayAction>) {
        // TrayIcon is not Send; it lives and dies on this thread.
        thread::spawn(move || match TrayHandle::new(action_tx) {
            Ok(tray) => {
                tracing::info!("Tray created");
                use windows::Win32::Foundation::HWND;
                use windows::Win32::UI::WindowsAndMessaging as wm;
                loop {
                    unsafe {
                        let mut msg = wm::MSG::default();
                        while wm::PeekMessageW(&mut msg, HWND(std::ptr::null_mut()), 0, 0, wm::PM_REMOVE).into() {
                            let _ = wm::TranslateMessage(&msg);
                            wm::DispatchMessageW(&msg);
                        }
                    }
                    tray.pump();
                    thread::sleep(Duration::from_millis(25));
                }
            }
            Err(e) => {
                tracing::error!("Tray failed: {}", e);
                crate::notify::toast("Urdu English Translator", &format!("Tray failed: {}", e));
            }
        });
    }
}

pub fn spawn(action_tx: Sender<TrayAction>) {
    #[cfg(windows)]
    imp::spawn(action_tx);
    #[cfg(not(windows))]
    {
        drop(action_tx);
        tracing::info!("tray icon is not available on this platform");
    }
}
