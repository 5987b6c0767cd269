//! reviews-core: the paginated review list without a UI.
//!
//! Data flows one way. A `ScrollTrigger` decides when the list is near its end,
//! the `PaginationController` admits at most one `PageRequest` at a time, a
//! `FetchWorker` runs it against a `ReviewsProvider`, and the response is applied
//! back on the owning context. `LayoutEngine` turns each item into frames and a
//! height. `ListController` composes all of it for a rendering surface.

pub mod config;
pub mod controller;
pub mod error;
pub mod image_cache;
pub mod layout;
pub mod pagination;
pub mod provider;
pub mod scroll;
pub mod store;
pub mod text;
pub mod types;
pub mod worker;

pub use config::{ErrorPolicy, ReviewsConfig};
pub use controller::{ListController, ListEvent, ReviewBindings};
pub use error::{ConfigError, LoadError};
pub use image_cache::ImageCache;
pub use layout::{CellFrames, CellLayout, LayoutEngine, LayoutMetrics, Rect, Size};
pub use pagination::{ListState, LoadPhase, PageRequest, PageResponse, PaginationController};
pub use provider::{BundleProvider, ReviewsProvider};
pub use scroll::{ScrollGeometry, ScrollTrigger};
pub use text::{FontMetrics, MonospaceMeasurer, TextMeasurer, Typography};
pub use types::{ReviewId, ReviewItem};
pub use worker::{spawn_fetch_worker, FetchWorker};
