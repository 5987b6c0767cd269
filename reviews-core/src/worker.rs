//! Background thread that owns the review provider for its lifetime.
//!
//! All communication is via channels: `PageRequest` in over crossbeam, each
//! finished `PageResponse` out through a completion callback. The callback is
//! expected to hand the response to the single context that owns the list; it
//! must not touch list state itself.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};

use crate::pagination::{PageRequest, PageResponse};
use crate::provider::ReviewsProvider;

/// Handle to a running fetch worker.
///
/// Dropping every clone of `sender` ends the worker loop; `join` then returns.
pub struct FetchWorker {
    pub sender: Sender<PageRequest>,
    handle: JoinHandle<()>,
}

impl FetchWorker {
    /// Closes the request channel and waits for in-flight requests to finish.
    pub fn shutdown(self) {
        drop(self.sender);
        if self.handle.join().is_err() {
            tracing::error!("fetch worker panicked");
        }
    }
}

/// Spawns the worker thread with `provider` moved into it.
///
/// # Errors
///
/// Returns the OS error if the thread cannot be spawned.
pub fn spawn_fetch_worker<P, F>(provider: P, on_complete: F) -> std::io::Result<FetchWorker>
where
    P: ReviewsProvider,
    F: Fn(PageResponse) + Send + 'static,
{
    let (sender, rx) = crossbeam_channel::unbounded();
    let handle = thread::Builder::new()
        .name("reviews-fetch".to_owned())
        .spawn(move || fetch_worker_loop(provider, rx, on_complete))?;
    Ok(FetchWorker { sender, handle })
}

/// Runs requests one at a time until the channel is closed.
///
/// Every request produces exactly one callback, success or failure; there is no
/// cancellation.
pub fn fetch_worker_loop<P, F>(provider: P, rx: Receiver<PageRequest>, on_complete: F)
where
    P: ReviewsProvider,
    F: Fn(PageResponse),
{
    for request in rx {
        tracing::debug!(offset = request.offset, limit = request.limit, "fetching page");
        let result = provider.fetch_page(request.offset, request.limit);
        on_complete(PageResponse { request, result });
    }
    tracing::debug!("fetch worker exiting, request channel closed");
}
