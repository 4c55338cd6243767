use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use eframe::egui;
use tokio::sync::mpsc::UnboundedSender;

use crate::config::{self, SharedConfig};
use crate::hotkey::shortcut_for;
use crate::notify::{Status, StatusKind};
use crate::translator::{Direction, MAX_PREVIEW_CHARS};
use crate::Command;

/// Success and info lines disappear after this long unless replaced.
pub const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(5);

pub const WINDOW_TITLE: &str = "Urdu English Translator";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Show,
}

pub struct UiChannels {
    pub statuses: Receiver<Status>,
    pub events: Receiver<UiEvent>,
    pub commands: UnboundedSender<Command>,
}

/// The status line. Kept apart from the widgets so the clearing rules can be
/// tested without a window.
#[derive(Default)]
struct StatusLine {
    current: Option<(Status, Instant)>,
}

impl StatusLine {
    fn set(&mut self, status: Status, now: Instant) {
        self.current = Some((status, now));
    }

    fn tick(&mut self, now: Instant) {
        let expired = matches!(
            &self.current,
            Some((s, at)) if s.kind.auto_clears() && now.duration_since(*at) >= STATUS_CLEAR_AFTER
        );
        if expired {
            self.current = None;
        }
    }

    fn get(&self) -> Option<&Status> {
        self.current.as_ref().map(|(s, _)| s)
    }
}

struct TranslatorApp {
    config: SharedConfig,
    config_path: PathBuf,
    channels: UiChannels,
    api_key_input: String,
    test_text: String,
    status: StatusLine,
    hide_on_close: bool,
}

impl TranslatorApp {
    fn save_key(&mut self) {
        let now = Instant::now();
        match config::update_api_key(&self.config, &self.api_key_input, &self.config_path) {
            Ok(()) => {
                self.api_key_input.clear();
                self.status.set(Status::success("API key saved successfully!"), now);
            }
            Err(e) => {
                tracing::warn!("API key not saved: {:#}", e);
                self.status.set(Status::error(format!("{:#}", e)), now);
            }
        }
    }

    fn test_translation(&mut self, direction: Direction) {
        let text = self.test_text.trim();
        if text.is_empty() {
            self.status.set(Status::error("Please enter text to test"), Instant::now());
            return;
        }
        let cmd = Command::Preview { text: text.to_string(), direction };
        if self.channels.commands.send(cmd).is_err() {
            self.status.set(Status::error("Translator is not running"), Instant::now());
        }
    }

    fn show(&self, ctx: &egui::Context) {
        ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
        ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
    }

    fn pump_channels(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.channels.events.try_recv() {
            match event {
                UiEvent::Show => self.show(ctx),
            }
        }
        // Keep only the latest status.
        while let Ok(status) = self.channels.statuses.try_recv() {
            self.status.set(status, Instant::now());
        }
        self.status.tick(Instant::now());
    }

    fn status_ui(&self, ui: &mut egui::Ui) {
        if let Some(status) = self.status.get() {
            let color = match status.kind {
                StatusKind::Error => egui::Color32::from_rgb(0xC6, 0x28, 0x28),
                StatusKind::Success => egui::Color32::from_rgb(0x2E, 0x7D, 0x32),
                StatusKind::Info => ui.visuals().text_color(),
            };
            ui.colored_label(color, status.message.as_str());
        }
    }
}

impl eframe::App for TranslatorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Wake up periodically so the channels are polled without user input.
        ctx.request_repaint_after(Duration::from_millis(120));
        self.pump_channels(ctx);

        if ctx.input(|i| i.viewport().close_requested()) && self.hide_on_close {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
            tracing::info!("window hidden to tray");
        }

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Urdu English Translator");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.hide_on_close && ui.button("Hide").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            self.status_ui(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(format!(
                "Select text anywhere, then press {} (English -> Roman Urdu) or {} (Roman Urdu -> English).",
                shortcut_for(Direction::EnToRomanUrdu),
                shortcut_for(Direction::RomanUrduToEn)
            ));
            ui.separator();

            ui.strong("OpenAI API key");
            let hint = if config::snapshot(&self.config).has_api_key() {
                "API key is saved (click to change)"
            } else {
                "sk-..."
            };
            ui.horizontal(|ui| {
                let field = ui.add(
                    egui::TextEdit::singleline(&mut self.api_key_input)
                        .password(true)
                        .hint_text(hint)
                        .desired_width(280.0),
                );
                let entered = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Save").clicked() || entered {
                    self.save_key();
                }
            });
            ui.separator();

            ui.strong("Test translation");
            let edit = ui.add(
                egui::TextEdit::multiline(&mut self.test_text)
                    .char_limit(MAX_PREVIEW_CHARS)
                    .desired_rows(6)
                    .desired_width(f32::INFINITY)
                    .hint_text("Type text to translate (Ctrl+Enter: English -> Roman Urdu)"),
            );
            let ctrl_enter = edit.has_focus() && ui.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::Enter));
            ui.horizontal(|ui| {
                if ui.button(Direction::EnToRomanUrdu.label()).clicked() || ctrl_enter {
                    self.test_translation(Direction::EnToRomanUrdu);
                }
                if ui.button(Direction::RomanUrduToEn.label()).clicked() {
                    self.test_translation(Direction::RomanUrduToEn);
                }
            });
        });
    }
}

/// Bring the hidden window back from outside the UI thread. A window hidden
/// with `Visible(false)` gets no paint messages, so `update` cannot see a
/// queued `UiEvent::Show` until the OS shows the window again.
#[cfg(windows)]
pub fn raise_window() {
    use windows::core::PCWSTR;
    use windows::Win32::UI::WindowsAndMessaging as wm;

    let title: Vec<u16> = WINDOW_TITLE.encode_utf16().chain(std::iter::once(0)).collect();
    unsafe {
        match wm::FindWindowW(PCWSTR::null(), PCWSTR(title.as_ptr())) {
            Ok(hwnd) => {
                let _ = wm::ShowWindow(hwnd, wm::SW_RESTORE);
                let _ = wm::SetForegroundWindow(hwnd);
            }
            Err(e) => tracing::warn!("window not found, cannot show it: {}", e),
        }
    }
}

#[cfg(not(windows))]
pub fn raise_window() {}

/// Run the window on the main thread; returns when the window closes for good.
pub fn run(config: SharedConfig, config_path: PathBuf, channels: UiChannels, hide_on_close: bool) {
    tracing::info!("Main UI: starting event loop");
    let app = TranslatorApp {
        config,
        config_path,
        channels,
        api_key_input: String::new(),
        test_text: String::new(),
        status: StatusLine::default(),
        hide_on_close,
    };
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([450.0, 420.0])
            .with_resizable(true)
            .with_maximize_button(false)
            .with_visible(true),
        ..Default::default()
    };
    match eframe::run_native(WINDOW_TITLE, native_options, Box::new(|_cc| Box::new(app))) {
        Ok(_) => tracing::info!("Main UI: event loop exited"),
        Err(e) => tracing::error!("Main UI error: {}", e),
    }
}
