#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;

mod clipboard;
mod config;
mod error;
mod hotkey;
mod input;
mod logger;
mod notify;
mod orchestrator;
mod translator;
mod tray;
mod ui;

use notify::Status;
use orchestrator::{CycleTimings, Orchestrator};
use translator::{Direction, OpenAiTranslator};

/// Work for the translation worker, sent from hotkey, tray and window threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Translate(Direction),
    Preview { text: String, direction: Direction },
}

/// Single-threaded runtime: every cycle, network call and delayed restore is a
/// task on this one thread. Returns once shutdown is signalled or every
/// command sender is gone; dropping the runtime drops pending restores.
fn spawn_worker(
    orch: Arc<Orchestrator>,
    mut commands: UnboundedReceiver<Command>,
    mut shutdown: watch::Receiver<bool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
            Ok(rt) => rt,
            Err(e) => {
                tracing::error!("failed to start tokio runtime: {}", e);
                return;
            }
        };
        rt.block_on(async move {
            loop {
                tokio::select! {
                    cmd = commands.recv() => match cmd {
                        Some(Command::Translate(direction)) => {
                            let orch = Arc::clone(&orch);
                            tokio::spawn(async move {
                                orch.run_cycle(direction).await;
                            });
                        }
                        Some(Command::Preview { text, direction }) => {
                            let orch = Arc::clone(&orch);
                            tokio::spawn(async move {
                                let _ = orch.preview(&text, direction).await;
                            });
                        }
                        None => break,
                    },
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }
            tracing::info!("worker: command loop stopped");
        });
    })
}

/// The shutdown signal plus the worker it stops. Shared by the tray thread
/// (Quit) and the main thread (window closed); the first caller joins the
/// worker, later calls only resend the signal.
struct Shutdown {
    signal: watch::Sender<bool>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
}

impl Shutdown {
    fn new(signal: watch::Sender<bool>, worker: thread::JoinHandle<()>) -> Self {
        Self { signal, worker: Mutex::new(Some(worker)) }
    }

    fn stop(&self) {
        tracing::info!("shutting down");
        let _ = self.signal.send(true);
        let worker = self.worker.lock().unwrap_or_else(|p| p.into_inner()).take();
        if let Some(worker) = worker {
            if worker.join().is_err() {
                tracing::error!("worker thread panicked");
            }
        }
    }
}

/// Forward a tray action to the worker or the window. Returns false for Quit,
/// which the caller handles itself: the window may be hidden and not
/// processing events.
fn route_tray_action(
    action: tray::TrayAction,
    cmd_tx: &UnboundedSender<Command>,
    ui_tx: &crossbeam_channel::Sender<ui::UiEvent>,
) -> bool {
    match action {
        tray::TrayAction::Translate(direction) => {
            let _ = cmd_tx.send(Command::Translate(direction));
        }
        tray::TrayAction::ShowWindow => {
            let _ = ui_tx.send(ui::UiEvent::Show);
            ui::raise_window();
        }
        tray::TrayAction::Quit => return false,
    }
    true
}

fn main() {
    logger::init();
    logger::install_panic_hook();

    // Config: config.json next to the exe, env vars override when present.
    let config_path = config::Config::path();
    let mut cfg = config::Config::load_from(&config_path);
    cfg.apply_env_overrides();
    tracing::info!("Config loaded from {} (model {})", config_path.display(), cfg.openai_model);
    let has_key = cfg.has_api_key();
    let cfg: config::SharedConfig = Arc::new(Mutex::new(cfg));

    let (notifier, status_rx) = notify::Notifier::new(cfg!(windows));
    let (cmd_tx, cmd_rx) = tokio::sync::mpsc::unbounded_channel::<Command>();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (ui_tx, ui_rx) = crossbeam_channel::unbounded::<ui::UiEvent>();

    let translator = match OpenAiTranslator::new(Arc::clone(&cfg)) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("failed to build HTTP client: {:#}", e);
            notify::toast("Urdu English Translator", &format!("Startup failed: {}", e));
            return;
        }
    };
    let orch = Arc::new(Orchestrator::new(
        Arc::new(clipboard::SystemClipboard::new()),
        Arc::new(input::KeyboardSimulator),
        Arc::new(translator),
        notifier.clone(),
        CycleTimings::default(),
        shutdown_rx.clone(),
    ));

    let worker = spawn_worker(Arc::clone(&orch), cmd_rx, shutdown_rx);
    let shutdown = Arc::new(Shutdown::new(shutdown_tx, worker));

    tracing::info!("Spawning hotkey listener thread");
    hotkey::spawn_listener(cmd_tx.clone());

    // Tray actions: translation triggers go to the worker, Show to the window.
    // Quit is handled here; the window may be hidden and never see an event.
    let (tray_tx, tray_rx) = mpsc::channel::<tray::TrayAction>();
    tray::spawn(tray_tx);
    {
        let cmd_tx = cmd_tx.clone();
        let shutdown = Arc::clone(&shutdown);
        thread::spawn(move || {
            while let Ok(action) = tray_rx.recv() {
                if !route_tray_action(action, &cmd_tx, &ui_tx) {
                    tracing::info!("Quit action received");
                    shutdown.stop();
                    std::process::exit(0);
                }
            }
        });
    }

    if has_key {
        notifier.notify(Status::success("API key loaded successfully!"));
    } else {
        notifier.notify(Status::info("Please set your OpenAI API key to start translating"));
    }

    // Run UI on main thread (blocks until the window is closed for good)
    ui::run(
        Arc::clone(&cfg),
        config_path,
        ui::UiChannels { statuses: status_rx, events: ui_rx, commands: cmd_tx },
        cfg!(windows),
    );

    shutdown.stop();
    // Hotkey and tray threads block in OS message loops; exiting ends them.
    std::process::exit(0);
}
