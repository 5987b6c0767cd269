//! Event bus for the reviews terminal.
//!
//! Terminal input, timer ticks, fetch worker completions and list notifications
//! are normalised into one `AppEvent` enum and sent over a tokio unbounded MPSC
//! channel. The main loop is the only receiver, which makes it the single
//! context that owns the `ListController`.
//!
//! Two independent intervals drive the render and logic cycles:
//! - **Render interval** (33 ms, about 30 FPS) triggers a `terminal.draw()` call.
//! - **Tick interval** (250 ms) expires transient status messages.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use reviews_core::{ListEvent, PageResponse};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// All events the application can receive from any source.
#[derive(Debug)]
#[non_exhaustive]
pub enum AppEvent {
    /// A key press from the terminal (`KeyEventKind::Press` only).
    Key(KeyEvent),
    /// A mouse event from the terminal (click, scroll, move).
    Mouse(MouseEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Logic tick (4 Hz).
    Tick,
    /// Render tick.
    Render,
    /// A page request finished on the fetch worker thread.
    PageLoaded(Box<PageResponse>),
    /// Notification raised by the list controller.
    List(ListEvent),
}

/// Holds the sender and receiver ends of the unified event channel.
///
/// The sender (`tx`) is cloned into the event task, the fetch worker callback and
/// the list listener; the receiver (`rx`) is owned by the main event loop.
pub struct EventHandler {
    pub tx: mpsc::UnboundedSender<AppEvent>,
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the completion callback handed to the fetch worker.
///
/// Runs on the worker thread and only forwards the response; the main loop
/// applies it.
pub fn page_forwarder(tx: mpsc::UnboundedSender<AppEvent>) -> impl Fn(PageResponse) + Send + 'static {
    move |response| {
        if tx.send(AppEvent::PageLoaded(Box::new(response))).is_err() {
            tracing::debug!("event loop gone, dropping page response");
        }
    }
}

/// Returns a list listener that re-publishes `ListEvent`s on the bus.
pub fn list_forwarder(tx: mpsc::UnboundedSender<AppEvent>) -> impl FnMut(&ListEvent) + Send + 'static {
    move |event| {
        let _ = tx.send(AppEvent::List(event.clone()));
    }
}

/// Spawns the background tokio task that drives terminal input and timers.
///
/// - `reader.next().fuse()` keeps `select!` from polling a finished stream.
/// - Only `KeyEventKind::Press` is forwarded; some platforms also report releases.
/// - Send errors are ignored; the task ends with the process.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut tick_interval = interval(Duration::from_millis(250));
        let mut render_interval = interval(Duration::from_millis(33));
        let mut reader = EventStream::new();

        loop {
            let tick_tick = tick_interval.tick();
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            tokio::select! {
                _ = tick_tick => {
                    let _ = tx.send(AppEvent::Tick);
                }
                _ = render_tick => {
                    let _ = tx.send(AppEvent::Render);
                }
                maybe_event = crossterm_event => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) => {
                            if key.kind == KeyEventKind::Press {
                                let _ = tx.send(AppEvent::Key(key));
                            }
                        }
                        Some(Ok(Event::Resize(w, h))) => {
                            let _ = tx.send(AppEvent::Resize(w, h));
                        }
                        Some(Ok(Event::Mouse(mouse))) => {
                            let _ = tx.send(AppEvent::Mouse(mouse));
                        }
                        _ => {}
                    }
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviews_core::{LoadError, PageRequest};

    #[tokio::test]
    async fn worker_completions_arrive_on_the_bus() {
        let mut handler = EventHandler::new();
        let forward = page_forwarder(handler.tx.clone());

        let request = PageRequest { generation: 3, offset: 40, limit: 20 };
        std::thread::spawn(move || forward(PageResponse { request, result: Err(LoadError::SourceUnavailable) }))
            .join()
            .unwrap();

        match handler.rx.recv().await {
            Some(AppEvent::PageLoaded(response)) => {
                assert_eq!(response.request, request);
                assert!(response.result.is_err());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_events_are_republished() {
        let mut handler = EventHandler::new();
        let mut forward = list_forwarder(handler.tx.clone());
        forward(&ListEvent::PhotoSelected { url: "https://p/1.jpg".to_owned() });
        forward(&ListEvent::StateChanged);

        assert!(matches!(
            handler.rx.recv().await,
            Some(AppEvent::List(ListEvent::PhotoSelected { url })) if url == "https://p/1.jpg"
        ));
        assert!(matches!(handler.rx.recv().await, Some(AppEvent::List(ListEvent::StateChanged))));
    }
}
