//! reviews: a paginated review list in the terminal.
//!
//! Entry point for the `reviews` binary. Wires the terminal lifecycle (`tui`),
//! the event bus (`event`), the UI (`ui`) and themes (`theme`) to the list core
//! in `reviews-core`.
//!
//! # Startup sequence
//!
//! 1. Logging to `.reviews/reviews.log`; the terminal belongs to the UI.
//! 2. Config from the XDG config dir. Read-only, safe before terminal init.
//! 3. `install_panic_hook()` so a panic restores the terminal first.
//! 4. `register_sigterm()`, polled on the loop heartbeat.
//! 5. Fetch worker and `ListController`; worker completions and list events
//!    both flow into the event bus.
//! 6. `init_tui()`, the event task, then the first page request.
//!
//! The main loop is the only owner of the `ListController`: every page response
//! is applied there, never on the worker thread.

mod app;
mod event;
mod theme;
mod tui;
mod ui;

use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use reviews_core::{
    spawn_fetch_worker, BundleProvider, ImageCache, LayoutEngine, ListController, ListEvent, ReviewsConfig,
};
use tracing_subscriber::EnvFilter;

use ui::keybindings::{handle_key, handle_mouse, KeyAction};

/// Returns the path to the config file.
///
/// Prefers `$XDG_CONFIG_HOME/reviews/config.toml`; falls back to
/// `~/.config/reviews/config.toml` when the env var is absent.
fn config_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"));
    base.join("reviews").join("config.toml")
}

/// Resolves a relative bundle path against the working directory, then against
/// this crate's directory so `cargo run` works from the workspace root.
fn resolve_data_path(path: &Path) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }
    let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join(path);
    if bundled.exists() {
        bundled
    } else {
        path.to_path_buf()
    }
}

/// Sends logs to `.reviews/reviews.log`. `RUST_LOG` overrides the `info` default.
fn init_tracing() -> std::io::Result<()> {
    std::fs::create_dir_all(".reviews")?;
    let log_file = std::fs::File::create(".reviews/reviews.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing()?;

    let path = config_path();
    let config = ReviewsConfig::load_or_default(&path);
    tracing::info!(config = %path.display(), page_size = config.page_size, "starting reviews");
    let theme = theme::Theme::from_name(&config.theme);
    let mut state = app::AppState::default();

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;

    let handler = event::EventHandler::new();
    let provider = BundleProvider::new(resolve_data_path(&config.data_path))
        .with_latency_ms(config.latency_ms.min, config.latency_ms.max);
    tracing::info!(bundle = %provider.path().display(), "serving reviews from bundle");
    let worker = spawn_fetch_worker(provider, event::page_forwarder(handler.tx.clone()))?;

    let images = Arc::new(ImageCache::new(config.image_cache_capacity));
    let mut list = ListController::new(&config, LayoutEngine::default(), images, worker.sender.clone());
    list.subscribe(event::list_forwarder(handler.tx.clone()));

    let mut terminal = tui::init_tui()?;
    event::spawn_event_task(handler.tx.clone());
    let mut rx = handler.rx;
    list.start();

    // Exits only via `break` so `restore_tui()` below is always reached.
    let mut draw_error = None;
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: SIGTERM is checked at least every 50ms even when idle.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(event::AppEvent::Render) => {
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &mut list, &theme)) {
                            draw_error = Some(e);
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Key(key)) => {
                        if handle_key(key, &mut state, &mut list) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(event::AppEvent::Mouse(mouse)) => {
                        handle_mouse(mouse, &mut state, &mut list);
                    }
                    Some(event::AppEvent::Resize(_, _)) => {
                        // The next Render picks up the new size; layouts are memoized per width.
                    }
                    Some(event::AppEvent::Tick) => state.expire_status(Instant::now()),
                    Some(event::AppEvent::PageLoaded(response)) => list.handle_page_response(*response),
                    Some(event::AppEvent::List(list_event)) => match list_event {
                        ListEvent::StateChanged => state.clamp_to(list.item_count()),
                        ListEvent::LoadFailed(err) => {
                            state.set_status(format!("Could not load reviews: {err}"), true);
                        }
                        ListEvent::PhotoSelected { url } => {
                            tracing::info!(%url, "photo selected");
                            state.set_status(format!("Photo: {url}"), false);
                        }
                    },
                    None => break 'event_loop,
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    tui::restore_tui()?;
    drop(list);
    worker.shutdown();
    tracing::info!("reviews exited");
    match draw_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
