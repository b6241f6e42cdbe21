use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use crossterm::event::Event as CEvent;
use tokio::sync::mpsc;

use crate::app::messages::WorkerMsg;
use crate::prayer::countdown::CountdownEvent;

/// What: Channel definitions for runtime communication.
///
/// Details:
/// - The event loop owns every receiver; senders are cloned into threads and tasks.
pub struct Channels {
    /// Terminal events from the input thread.
    pub event_tx: mpsc::UnboundedSender<CEvent>,
    /// Receiver for terminal events.
    pub event_rx: mpsc::UnboundedReceiver<CEvent>,
    /// Set on exit so the input thread stops polling.
    pub event_thread_cancelled: Arc<AtomicBool>,
    /// Worker results.
    pub worker_tx: mpsc::UnboundedSender<WorkerMsg>,
    /// Receiver for worker results.
    pub worker_rx: mpsc::UnboundedReceiver<WorkerMsg>,
    /// Countdown ticks and expiries.
    pub countdown_tx: mpsc::UnboundedSender<CountdownEvent>,
    /// Receiver for countdown events.
    pub countdown_rx: mpsc::UnboundedReceiver<CountdownEvent>,
    /// UI redraw ticks.
    pub tick_tx: mpsc::UnboundedSender<()>,
    /// Receiver for UI ticks.
    pub tick_rx: mpsc::UnboundedReceiver<()>,
}

impl Channels {
    /// Create every channel pair.
    pub fn new() -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (worker_tx, worker_rx) = mpsc::unbounded_channel();
        let (countdown_tx, countdown_rx) = mpsc::unbounded_channel();
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        Self {
            event_tx,
            event_rx,
            event_thread_cancelled: Arc::new(AtomicBool::new(false)),
            worker_tx,
            worker_rx,
            countdown_tx,
            countdown_rx,
            tick_tx,
            tick_rx,
        }
    }
}
