//! Composition root exposed to a rendering surface.
//!
//! `ListController` wires the scroll trigger, the pagination state machine, the
//! item store and the layout engine together. A surface drives it with
//! `notify_*` calls and reads back counts, heights and bindings; it learns about
//! changes through `ListEvent` listeners.
//!
//! The controller is not thread-safe by intent: it must live on the one context
//! that owns list state. Page requests leave through a crossbeam `Sender` (usually
//! to a fetch worker) and their responses come back through
//! `handle_page_response` on that same context.

use std::num::NonZeroUsize;
use std::sync::Arc;

use crossbeam_channel::Sender;
use lru::LruCache;

use crate::config::{ErrorPolicy, ReviewsConfig};
use crate::error::LoadError;
use crate::image_cache::ImageCache;
use crate::layout::{CellContent, CellLayout, LayoutEngine};
use crate::pagination::{Completion, ListState, LoadPhase, PageResponse, PaginationController, PageRequest};
use crate::scroll::{ScrollGeometry, ScrollTrigger};
use crate::text::{MonospaceMeasurer, TextMeasurer};
use crate::types::{rating_glyphs, ReviewId};

/// Notifications delivered to listeners.
#[derive(Debug, Clone)]
pub enum ListEvent {
    /// Items or loading flags changed; re-query and re-render.
    StateChanged,
    /// A page failed to load. Only sent under `ErrorPolicy::Surface`.
    LoadFailed(LoadError),
    /// The user picked a photo; the surface may open a viewer for `url`.
    PhotoSelected { url: String },
}

/// Everything a surface needs to fill one review cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewBindings {
    pub id: ReviewId,
    pub full_name: String,
    pub rating: u8,
    /// Rating as five star glyphs, e.g. `★★★★☆`.
    pub rating_glyphs: String,
    pub text: String,
    /// `0` when expanded.
    pub max_lines: u32,
    pub created: String,
    pub avatar_url: Option<String>,
    /// True when the avatar bytes are already in the image cache.
    pub avatar_cached: bool,
    pub photos: Option<Vec<String>>,
}

type Listener = Box<dyn FnMut(&ListEvent) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct LayoutKey {
    id: ReviewId,
    width_bits: u32,
    max_lines: u32,
}

pub struct ListController<M = MonospaceMeasurer> {
    pager: PaginationController,
    trigger: ScrollTrigger,
    layout: LayoutEngine<M>,
    layouts: LruCache<LayoutKey, CellLayout>,
    images: Arc<ImageCache>,
    requests: Sender<PageRequest>,
    error_policy: ErrorPolicy,
    listeners: Vec<Listener>,
}

impl<M: TextMeasurer> ListController<M> {
    pub fn new(
        config: &ReviewsConfig,
        layout: LayoutEngine<M>,
        images: Arc<ImageCache>,
        requests: Sender<PageRequest>,
    ) -> Self {
        let capacity = NonZeroUsize::new(config.layout_cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            pager: PaginationController::new(config.page_size),
            trigger: ScrollTrigger::new(config.screens_ahead),
            layout,
            layouts: LruCache::new(capacity),
            images,
            requests,
            error_policy: config.error_policy,
            listeners: Vec::new(),
        }
    }

    /// Registers a listener called for every `ListEvent`, in registration order.
    pub fn subscribe(&mut self, listener: impl FnMut(&ListEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: ListEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    pub fn state(&self) -> &ListState {
        self.pager.state()
    }

    pub fn phase(&self) -> LoadPhase {
        self.pager.phase()
    }

    pub fn images(&self) -> &Arc<ImageCache> {
        &self.images
    }

    pub fn layout_engine(&self) -> &LayoutEngine<M> {
        &self.layout
    }

    /// Requests the first page. Same as a scroll trigger on an empty list.
    pub fn start(&mut self) -> bool {
        self.request_page()
    }

    /// Dispatches the next page request if the gate is open.
    ///
    /// Returns whether a request was sent. If the worker is gone the attempt is
    /// failed immediately as `SourceUnavailable`, so the gate reopens.
    fn request_page(&mut self) -> bool {
        let Some(request) = self.pager.request_next_page() else {
            return false;
        };
        if self.requests.send(request).is_err() {
            tracing::error!("fetch worker is gone, failing page request");
            self.handle_page_response(PageResponse { request, result: Err(LoadError::SourceUnavailable) });
            return false;
        }
        self.emit(ListEvent::StateChanged);
        true
    }

    /// Applies a finished page request. Call on the owning context only.
    pub fn handle_page_response(&mut self, response: PageResponse) {
        match self.pager.complete(response) {
            Completion::Applied { .. } => self.emit(ListEvent::StateChanged),
            Completion::Failed(err) => {
                self.emit(ListEvent::StateChanged);
                if self.error_policy == ErrorPolicy::Surface {
                    self.emit(ListEvent::LoadFailed(err));
                }
            }
            Completion::Stale => {}
        }
    }

    pub fn item_count(&self) -> usize {
        self.pager.state().items().len()
    }

    pub fn item_id_at(&self, index: usize) -> Option<ReviewId> {
        self.pager.state().items().get_index(index).map(|item| item.id)
    }

    /// Full cell layout for `id` at `width`, memoized per (id, width, max lines).
    pub fn layout_for_item(&mut self, id: ReviewId, width: f32) -> Option<CellLayout> {
        let item = self.pager.state().items().get(id)?;
        let key = LayoutKey { id, width_bits: width.to_bits(), max_lines: item.max_lines };
        if let Some(cached) = self.layouts.get(&key) {
            return Some(*cached);
        }
        let layout = self.layout.compute_layout(&CellContent::from(item), width);
        self.layouts.put(key, layout);
        Some(layout)
    }

    pub fn height_for_item(&mut self, id: ReviewId, width: f32) -> Option<f32> {
        self.layout_for_item(id, width).map(|layout| layout.total_height)
    }

    pub fn bindings_for_item(&self, id: ReviewId) -> Option<ReviewBindings> {
        let item = self.pager.state().items().get(id)?;
        let avatar_cached = item.avatar_url.as_deref().is_some_and(|url| self.images.contains(url));
        Some(ReviewBindings {
            id: item.id,
            full_name: item.full_name.clone(),
            rating: item.rating,
            rating_glyphs: rating_glyphs(item.rating),
            text: item.text.clone(),
            max_lines: item.max_lines,
            created: item.created.clone(),
            avatar_url: item.avatar_url.clone(),
            avatar_cached,
            photos: item.photos.clone(),
        })
    }

    /// Reports where a scroll is heading; may request the next page.
    pub fn notify_scrolled(&mut self, geometry: ScrollGeometry) -> bool {
        if !self.trigger.should_load_next_page(geometry) {
            return false;
        }
        self.request_page()
    }

    /// Removes the line clamp from one review. Unknown or already expanded ids are
    /// ignored.
    pub fn notify_expand_requested(&mut self, id: ReviewId) {
        if self.pager.expand(id).is_some() {
            tracing::debug!(%id, "review expanded");
            self.emit(ListEvent::StateChanged);
        }
    }

    /// Drops every item and starts over from the first page.
    pub fn notify_refresh_requested(&mut self) {
        self.pager.reset();
        self.layouts.clear();
        self.emit(ListEvent::StateChanged);
        self.request_page();
    }

    /// Reports a tap on photo `index` of review `id`.
    pub fn notify_photo_selected(&mut self, id: ReviewId, index: usize) {
        let url = self
            .pager
            .state()
            .items()
            .get(id)
            .and_then(|item| item.photos.as_ref())
            .and_then(|photos| photos.get(index))
            .cloned();
        if let Some(url) = url {
            self.emit(ListEvent::PhotoSelected { url });
        }
    }

    /// Footer text such as `"45 reviews"`, once the total is known.
    pub fn footer_label(&self) -> Option<String> {
        self.pager.state().total_count().map(|n| match n {
            1 => "1 review".to_owned(),
            n => format!("{n} reviews"),
        })
    }
}
