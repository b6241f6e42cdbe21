use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::select;

use crate::prayer::countdown::local_now;
use crate::state::AppState;
use crate::store::KeyValueStore;
use crate::ui::ui;

use super::handlers::{handle_countdown_event, handle_tick, handle_worker_msg};
use super::terminal::{restore_terminal, setup_terminal};

mod background;
mod channels;
pub mod init;

use background::{spawn_event_thread, spawn_tick_worker};
use channels::Channels;
use init::{LaunchOptions, build_workers, start_initial_loads};

pub(crate) type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Whether `NOOR_TEST_HEADLESS=1` is set.
#[must_use]
pub fn is_headless() -> bool {
    std::env::var("NOOR_TEST_HEADLESS").ok().as_deref() == Some("1")
}

/// What: Run the Noor TUI end-to-end: set up the terminal and state, start the
/// workers, drive the event loop, and restore the terminal on exit.
///
/// Inputs:
/// - `launch`: Command-line overrides for the starting location and orientation source.
///
/// Output:
/// - `Ok(())` when the UI exits cleanly; `Err` on unrecoverable terminal or runtime errors.
///
/// Details:
/// - Headless mode (`NOOR_TEST_HEADLESS=1`) skips terminal setup, the input thread, and
///   all network workers.
/// - Only this loop mutates [`AppState`]; workers report through channels.
pub async fn run(launch: LaunchOptions) -> Result<()> {
    let headless = is_headless();
    if !headless {
        setup_terminal()?;
    }
    let mut terminal = if headless {
        None
    } else {
        Some(Terminal::new(CrosstermBackend::new(std::io::stdout()))?)
    };

    let settings = crate::theme::settings();
    let store = KeyValueStore::open(crate::theme::store_path());
    let mut app = AppState::new(store, settings, local_now);

    let mut channels = Channels::new();
    let workers = match build_workers(&mut app, headless, &launch, channels.worker_tx.clone()) {
        Ok(w) => w,
        Err(e) => {
            if !headless {
                let _ = restore_terminal();
            }
            return Err(e);
        }
    };

    spawn_tick_worker(&channels.tick_tx);
    spawn_event_thread(
        headless,
        channels.event_tx.clone(),
        channels.event_thread_cancelled.clone(),
    );
    start_initial_loads(&mut app, &workers, &launch);

    loop {
        if let Some(t) = terminal.as_mut() {
            let _ = t.draw(|f| ui(f, &mut app));
        }

        select! {
            Some(ev) = channels.event_rx.recv() => {
                crate::events::handle_event(&ev, &mut app, &workers);
            }
            Some(msg) = channels.worker_rx.recv() => {
                handle_worker_msg(&mut app, msg, &workers, &channels.countdown_tx);
            }
            Some(ev) = channels.countdown_rx.recv() => {
                handle_countdown_event(&mut app, ev, &workers);
            }
            Some(()) = channels.tick_rx.recv() => {
                handle_tick(&mut app);
            }
            else => break,
        }
        if app.should_quit {
            break;
        }
    }

    tracing::info!("[Runtime] Main loop exited");
    channels
        .event_thread_cancelled
        .store(true, std::sync::atomic::Ordering::Relaxed);
    app.prayer.stop();
    app.qibla.end_tracking();
    app.player.stop();
    if !headless {
        restore_terminal()?;
    }
    Ok(())
}
