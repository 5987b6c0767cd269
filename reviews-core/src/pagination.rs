//! Page-loading state machine.
//!
//! `PaginationController` owns the list state and decides when a page may be
//! requested and how a finished request changes the list. It performs no I/O:
//! `request_next_page` hands back a `PageRequest` for the caller to dispatch, and
//! the caller feeds the eventual `PageResponse` into `complete` on the same
//! context that owns the controller.
//!
//! # Phases
//!
//! | phase       | `should_load` | `is_loading` | leaves on |
//! |-------------|---------------|--------------|-----------|
//! | `Idle`      | true          | false        | `request_next_page` |
//! | `Loading`   | false         | true         | `complete` (any outcome) or `reset` |
//! | `Exhausted` | false         | false        | `reset` |
//!
//! Every request is stamped with the controller's generation. `reset` bumps the
//! generation, so a request issued before a reset completes as `Completion::Stale`
//! and never touches the post-reset list.

use crate::error::LoadError;
use crate::store::ItemStore;
use crate::types::{ReviewId, ReviewItem, ReviewsEnvelope};

/// A request for one page, stamped with the generation it was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub offset: usize,
    pub limit: usize,
}

/// Outcome of running a `PageRequest` against a provider.
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub request: PageRequest,
    pub result: Result<Vec<u8>, LoadError>,
}

/// Coarse loading phase derived from the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Exhausted,
}

/// What `PaginationController::complete` did with a response.
#[derive(Debug, Clone)]
pub enum Completion {
    /// The page was decoded and appended.
    Applied { appended: usize },
    /// Fetch or decode failed; nothing but the flags changed.
    Failed(LoadError),
    /// The response belongs to an earlier generation or an offset that is no
    /// longer outstanding, and was discarded.
    Stale,
}

/// Items plus pagination counters for one list session.
#[derive(Debug, Clone)]
pub struct ListState {
    items: ItemStore,
    offset: usize,
    limit: usize,
    total_count: Option<usize>,
    should_load: bool,
    is_loading: bool,
    last_error: Option<LoadError>,
}

impl ListState {
    fn new(limit: usize) -> Self {
        Self {
            items: ItemStore::new(),
            offset: 0,
            limit,
            total_count: None,
            should_load: true,
            is_loading: false,
            last_error: None,
        }
    }

    pub fn items(&self) -> &ItemStore {
        &self.items
    }

    /// Start of the next page to request.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Page size, fixed for the session.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Total reviews on the server; unknown until the first page lands.
    pub fn total_count(&self) -> Option<usize> {
        self.total_count
    }

    pub fn should_load(&self) -> bool {
        self.should_load
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Error from the most recent failed attempt, cleared when the next request
    /// is admitted, a page is applied, or the list is reset.
    pub fn last_error(&self) -> Option<&LoadError> {
        self.last_error.as_ref()
    }
}

/// Single-flight page loader for one list.
#[derive(Debug, Clone)]
pub struct PaginationController {
    state: ListState,
    generation: u64,
}

impl PaginationController {
    /// Creates an idle controller that requests `limit` reviews per page.
    pub fn new(limit: usize) -> Self {
        Self { state: ListState::new(limit), generation: 0 }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> LoadPhase {
        let s = &self.state;
        if s.is_loading {
            LoadPhase::Loading
        } else if !s.should_load && s.total_count.is_some_and(|total| s.offset >= total) {
            LoadPhase::Exhausted
        } else {
            LoadPhase::Idle
        }
    }

    /// Admits a page request if the gate is open.
    ///
    /// Returns `None` while a request is outstanding or once the list is exhausted;
    /// such triggers are dropped, not queued.
    pub fn request_next_page(&mut self) -> Option<PageRequest> {
        if !self.state.should_load {
            tracing::trace!(offset = self.state.offset, "page request dropped, gate closed");
            return None;
        }
        self.state.should_load = false;
        self.state.is_loading = true;
        self.state.last_error = None;

        let request = PageRequest {
            generation: self.generation,
            offset: self.state.offset,
            limit: self.state.limit,
        };
        tracing::debug!(
            generation = request.generation,
            offset = request.offset,
            limit = request.limit,
            "page request admitted"
        );
        Some(request)
    }

    /// Applies a finished request to the list.
    pub fn complete(&mut self, response: PageResponse) -> Completion {
        let request = response.request;
        if request.generation != self.generation
            || !self.state.is_loading
            || request.offset != self.state.offset
        {
            tracing::warn!(
                generation = request.generation,
                current = self.generation,
                offset = request.offset,
                "discarding stale page response"
            );
            return Completion::Stale;
        }

        let envelope = match response.result.and_then(|bytes| ReviewsEnvelope::decode(&bytes)) {
            Ok(envelope) => envelope,
            Err(err) => return self.fail(err),
        };

        let total = envelope.count;
        let mut records = envelope.items;
        let room = total.saturating_sub(self.state.items.len());
        if records.len() > room {
            tracing::warn!(
                received = records.len(),
                room,
                total,
                "page exceeds reported total, dropping excess records"
            );
            records.truncate(room);
        }
        let appended = records.len();

        self.state.items.append(records.into_iter().map(ReviewItem::from_record));
        self.state.total_count = Some(total);
        self.state.offset += self.state.limit;
        self.state.should_load = self.state.offset < total;
        self.state.is_loading = false;
        self.state.last_error = None;

        tracing::debug!(
            appended,
            offset = self.state.offset,
            total,
            should_load = self.state.should_load,
            "page applied"
        );
        Completion::Applied { appended }
    }

    fn fail(&mut self, err: LoadError) -> Completion {
        tracing::warn!(offset = self.state.offset, error = %err, "page load failed, will retry on next trigger");
        self.state.should_load = true;
        self.state.is_loading = false;
        self.state.last_error = Some(err.clone());
        Completion::Failed(err)
    }

    /// Clears the list and reopens the gate, invalidating any request in flight.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state.items.clear();
        self.state.offset = 0;
        self.state.total_count = None;
        self.state.should_load = true;
        self.state.is_loading = false;
        self.state.last_error = None;
        tracing::debug!(generation = self.generation, "list reset");
    }

    /// Removes the line clamp from one item; see `ItemStore::expand`.
    pub fn expand(&mut self, id: ReviewId) -> Option<&ReviewItem> {
        self.state.items.expand(id)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use crate::types::ReviewRecord;

    fn page_bytes(n: usize, count: usize) -> Vec<u8> {
        let items: Vec<ReviewRecord> = (0..n)
            .map(|i| ReviewRecord {
                text: format!("review {i}"),
                created: "today".to_owned(),
                avatar_url: None,
                first_name: "Ann".to_owned(),
                last_name: "Lee".to_owned(),
                rating: 4,
                photos_url: None,
            })
            .collect();
        serde_json::to_vec(&ReviewsEnvelope { items, count }).unwrap()
    }

    fn ok(request: PageRequest, n: usize, count: usize) -> PageResponse {
        PageResponse { request, result: Ok(page_bytes(n, count)) }
    }

    #[test]
    fn scenario_limit_20_count_45() {
        let mut pager = PaginationController::new(20);

        let r1 = pager.request_next_page().unwrap();
        assert_eq!((r1.offset, r1.limit), (0, 20));
        assert!(matches!(pager.complete(ok(r1, 20, 45)), Completion::Applied { appended: 20 }));
        assert_eq!(pager.state().offset(), 20);
        assert!(pager.state().should_load());

        let r2 = pager.request_next_page().unwrap();
        assert_eq!(r2.offset, 20);
        pager.complete(ok(r2, 20, 45));
        assert_eq!(pager.state().offset(), 40);
        assert!(pager.state().should_load());

        let r3 = pager.request_next_page().unwrap();
        assert_eq!(r3.offset, 40);
        assert!(matches!(pager.complete(ok(r3, 5, 45)), Completion::Applied { appended: 5 }));
        assert_eq!(pager.state().offset(), 60);
        assert!(!pager.state().should_load());
        assert_eq!(pager.state().items().len(), 45);
        assert_eq!(pager.state().total_count(), Some(45));
        assert_eq!(pager.phase(), LoadPhase::Exhausted);

        for _ in 0..5 {
            assert!(pager.request_next_page().is_none());
        }
    }

    #[test]
    fn second_request_while_loading_is_dropped() {
        let mut pager = PaginationController::new(20);
        assert!(pager.request_next_page().is_some());
        assert_eq!(pager.phase(), LoadPhase::Loading);
        assert!(pager.request_next_page().is_none());
        assert!(!pager.state().should_load());
        assert!(pager.state().is_loading());
    }

    #[test]
    fn failures_keep_offset_and_reopen_the_gate() {
        let mut pager = PaginationController::new(20);
        let r1 = pager.request_next_page().unwrap();
        pager.complete(ok(r1, 20, 45));

        let r2 = pager.request_next_page().unwrap();
        let completion = pager.complete(PageResponse { request: r2, result: Err(LoadError::SourceUnavailable) });
        assert!(matches!(completion, Completion::Failed(LoadError::SourceUnavailable)));
        assert_eq!(pager.state().offset(), 20);
        assert_eq!(pager.state().items().len(), 20);
        assert!(pager.state().should_load());
        assert!(!pager.state().is_loading());
        assert!(pager.state().last_error().is_some());

        let r3 = pager.request_next_page().unwrap();
        assert_eq!(r3.offset, 20);
        assert!(pager.state().last_error().is_none());
        let bad = PageResponse { request: r3, result: Ok(b"{\"items\":".to_vec()) };
        assert!(matches!(pager.complete(bad), Completion::Failed(LoadError::MalformedPayload(_))));
        assert_eq!(pager.state().offset(), 20);

        let r4 = pager.request_next_page().unwrap();
        let io_err = LoadError::malformed(io::Error::new(io::ErrorKind::InvalidData, "truncated"));
        pager.complete(PageResponse { request: r4, result: Err(io_err) });
        assert_eq!(pager.state().offset(), 20);
        assert_eq!(pager.phase(), LoadPhase::Idle);
    }

    #[test]
    fn reset_mid_flight_discards_the_stale_page() {
        let mut pager = PaginationController::new(20);
        let r1 = pager.request_next_page().unwrap();
        pager.complete(ok(r1, 20, 45));

        let in_flight = pager.request_next_page().unwrap();
        pager.reset();
        assert_eq!(pager.state().offset(), 0);
        assert!(pager.state().items().is_empty());
        assert_eq!(pager.state().total_count(), None);

        let fresh = pager.request_next_page().unwrap();
        assert_eq!(fresh.offset, 0);
        assert_ne!(fresh.generation, in_flight.generation);

        assert!(matches!(pager.complete(ok(in_flight, 20, 45)), Completion::Stale));
        assert!(pager.state().items().is_empty());
        assert!(pager.state().is_loading());

        pager.complete(ok(fresh, 20, 45));
        assert_eq!(pager.state().items().len(), 20);
        assert_eq!(pager.state().offset(), 20);
    }

    #[test]
    fn stale_failure_does_not_reopen_gate() {
        let mut pager = PaginationController::new(20);
        let old = pager.request_next_page().unwrap();
        pager.reset();
        let _fresh = pager.request_next_page().unwrap();

        let stale = PageResponse { request: old, result: Err(LoadError::SourceUnavailable) };
        assert!(matches!(pager.complete(stale), Completion::Stale));
        assert!(!pager.state().should_load());
        assert!(pager.state().last_error().is_none());
    }

    #[test]
    fn oversized_page_never_exceeds_total() {
        let mut pager = PaginationController::new(20);
        let r1 = pager.request_next_page().unwrap();
        assert!(matches!(pager.complete(ok(r1, 20, 12)), Completion::Applied { appended: 12 }));
        assert_eq!(pager.state().items().len(), 12);
        assert!(!pager.state().should_load());
    }

    #[test]
    fn offset_is_monotonic_across_mixed_outcomes() {
        let mut pager = PaginationController::new(10);
        let mut last = 0;
        for step in 0..12 {
            let Some(request) = pager.request_next_page() else { break };
            let response = if step % 3 == 1 {
                PageResponse { request, result: Err(LoadError::SourceUnavailable) }
            } else {
                ok(request, 10, 80)
            };
            let before = pager.state().offset();
            let applied = matches!(pager.complete(response), Completion::Applied { .. });
            let after = pager.state().offset();
            assert!(after >= last);
            assert_eq!(after, if applied { before + 10 } else { before });
            assert!(pager.state().items().len() <= 80);
            last = after;
        }
    }

    #[test]
    fn expand_goes_through_the_store() {
        let mut pager = PaginationController::new(20);
        let r1 = pager.request_next_page().unwrap();
        pager.complete(ok(r1, 2, 2));
        let id = pager.state().items().get_index(1).unwrap().id;
        assert_eq!(pager.expand(id).map(|i| i.max_lines), Some(0));
        assert!(pager.expand(id).is_none());
    }
}
