//! Variable-height cell layout for review items.
//!
//! This module is pure layout arithmetic: no mutable state lives here and no
//! drawing happens. `LayoutEngine::compute_layout` stacks a review's parts top to
//! bottom in a content column to the right of a fixed avatar column, and returns
//! every frame plus the total cell height. Identical inputs always yield identical
//! output, so results can be memoized by (item id, width, max lines).
//!
//! # Stacking order
//!
//! | part       | placed below          | spacing after                     |
//! |------------|-----------------------|-----------------------------------|
//! | name       | top inset             | `name_to_rating`                  |
//! | rating     | name                  | photos: `rating_to_photos`, else `rating_to_text` |
//! | photos     | rating                | `photos_to_text` (only when non-empty) |
//! | text       | rating / photos       | `text_to_created`                 |
//! | show more  | text                  | `show_more_to_created`            |
//! | created    | last placed part      | bottom inset                      |

use crate::text::{MonospaceMeasurer, TextMeasurer, Typography};
use crate::types::ReviewItem;

/// Width and height in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned frame in cell coordinates (origin at the cell's top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Rect = Rect { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    pub fn new(x: f32, y: f32, size: Size) -> Self {
        Self { x, y, width: size.width, height: size.height }
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// True when the frame has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Fixed sizes and spacings of a review cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub inset_top: f32,
    pub inset_left: f32,
    pub inset_bottom: f32,
    pub inset_right: f32,
    pub avatar_size: Size,
    pub rating_size: Size,
    pub photo_strip_size: Size,
    /// Horizontal gap between the avatar column and the content column.
    pub avatar_to_name: f32,
    pub name_to_rating: f32,
    /// Used when the item has no photo list at all.
    pub rating_to_text: f32,
    /// Used whenever a photo list is present, even an empty one.
    pub rating_to_photos: f32,
    pub photos_to_text: f32,
    pub text_to_created: f32,
    pub show_more_to_created: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            inset_top: 9.0,
            inset_left: 12.0,
            inset_bottom: 9.0,
            inset_right: 12.0,
            avatar_size: Size::new(36.0, 36.0),
            rating_size: Size::new(85.0, 16.0),
            photo_strip_size: Size::new(330.0, 80.0),
            avatar_to_name: 10.0,
            name_to_rating: 6.0,
            rating_to_text: 6.0,
            rating_to_photos: 10.0,
            photos_to_text: 10.0,
            text_to_created: 6.0,
            show_more_to_created: 6.0,
        }
    }
}

/// The parts of a review the layout depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellContent<'a> {
    pub full_name: &'a str,
    pub text: &'a str,
    pub created: &'a str,
    pub photos: Option<&'a [String]>,
    pub max_lines: u32,
}

impl<'a> From<&'a ReviewItem> for CellContent<'a> {
    fn from(item: &'a ReviewItem) -> Self {
        Self {
            full_name: &item.full_name,
            text: &item.text,
            created: &item.created,
            photos: item.photos.as_deref(),
            max_lines: item.max_lines,
        }
    }
}

/// Every frame of a laid-out cell.
///
/// Parts that are not shown keep a stable `Rect::ZERO` rather than disappearing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellFrames {
    pub avatar: Rect,
    pub full_name: Rect,
    pub rating: Rect,
    pub photos: Rect,
    pub text: Rect,
    pub show_more: Rect,
    pub created: Rect,
}

/// Result of laying out one cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellLayout {
    pub frames: CellFrames,
    pub total_height: f32,
}

impl CellLayout {
    /// True when the text is clamped and the show-more control is placed.
    pub fn shows_more(&self) -> bool {
        !self.frames.show_more.is_empty()
    }
}

/// Computes review cell geometry from content, typography and a measurer.
#[derive(Debug, Clone)]
pub struct LayoutEngine<M = MonospaceMeasurer> {
    pub metrics: LayoutMetrics,
    pub typography: Typography,
    measurer: M,
}

impl Default for LayoutEngine<MonospaceMeasurer> {
    fn default() -> Self {
        Self::new(LayoutMetrics::default(), Typography::default(), MonospaceMeasurer::default())
    }
}

impl<M: TextMeasurer> LayoutEngine<M> {
    pub fn new(metrics: LayoutMetrics, typography: Typography, measurer: M) -> Self {
        Self { metrics, typography, measurer }
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Width of the content column for a cell `max_width` wide.
    pub fn content_width(&self, max_width: f32) -> f32 {
        let m = &self.metrics;
        (max_width - m.inset_left - m.inset_right - m.avatar_size.width - m.avatar_to_name).max(0.0)
    }

    /// Lays out one cell at `max_width` and returns all frames and the cell height.
    pub fn compute_layout(&self, content: &CellContent<'_>, max_width: f32) -> CellLayout {
        let m = &self.metrics;
        let t = &self.typography;
        let width = self.content_width(max_width);
        let x = m.inset_left + m.avatar_size.width + m.avatar_to_name;

        let mut frames = CellFrames {
            avatar: Rect::new(m.inset_left, m.inset_top, m.avatar_size),
            ..CellFrames::default()
        };
        let mut max_y = m.inset_top;

        let name_line = self.measurer.line_height(&t.name);
        frames.full_name =
            Rect::new(x, max_y, self.measurer.measure(content.full_name, &t.name, width, Some(name_line)));
        max_y = frames.full_name.max_y() + m.name_to_rating;

        frames.rating = Rect::new(x, max_y, m.rating_size);

        match content.photos {
            Some(photos) => {
                max_y = frames.rating.max_y() + m.rating_to_photos;
                if !photos.is_empty() {
                    frames.photos = Rect::new(x, max_y, m.photo_strip_size);
                    max_y = frames.photos.max_y() + m.photos_to_text;
                }
            }
            None => max_y = frames.rating.max_y() + m.rating_to_text,
        }

        let mut show_more = false;
        if !content.text.is_empty() {
            let clamped = self.measurer.line_height(&t.text) * content.max_lines as f32;
            let actual = self.measurer.measure(content.text, &t.text, width, None);
            show_more = content.max_lines != 0 && actual.height > clamped;

            let size = if content.max_lines == 0 {
                actual
            } else {
                self.measurer.measure(content.text, &t.text, width, Some(clamped))
            };
            frames.text = Rect::new(x, max_y, size);
            max_y = frames.text.max_y() + m.text_to_created;
        }

        if show_more {
            let size = self.measurer.measure(&t.show_more_label, &t.show_more, f32::INFINITY, None);
            frames.show_more = Rect::new(x, max_y, size);
            max_y = frames.show_more.max_y() + m.show_more_to_created;
        }

        frames.created = Rect::new(x, max_y, self.measurer.measure(content.created, &t.created, width, None));

        CellLayout { total_height: frames.created.max_y() + m.inset_bottom, frames }
    }
}
