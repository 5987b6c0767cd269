//! Mutable UI state for the review list surface.
//!
//! Pure state: the renderer reads it, the keybinding dispatcher mutates it. List
//! data itself lives in the `ListController`; this only tracks which review is
//! selected, which one is at the top of the viewport and what the status bar
//! says.

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

/// How long a status message stays in the status bar.
pub const STATUS_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Full-screen help overlay is shown above the list.
    HelpOverlay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    expires_at: Instant,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub mode: Mode,
    /// Index of the selected review.
    pub selected: usize,
    /// Index of the review drawn at the top of the list panel.
    pub first_visible: usize,
    /// Inner area of the list panel, cached after each render.
    pub list_viewport: Rect,
    pub help_scroll: u16,
    pub status: Option<StatusMessage>,
}

impl AppState {
    /// Moves the selection down by `n`, stopping at the last of `count` items.
    pub fn select_next(&mut self, n: usize, count: usize) {
        self.selected = self.selected.saturating_add(n).min(count.saturating_sub(1));
    }

    pub fn select_prev(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.first_visible = 0;
    }

    pub fn select_last(&mut self, count: usize) {
        self.selected = count.saturating_sub(1);
    }

    /// Keeps indices valid after the list shrank (e.g. after a refresh).
    pub fn clamp_to(&mut self, count: usize) {
        let last = count.saturating_sub(1);
        self.selected = self.selected.min(last);
        self.first_visible = self.first_visible.min(self.selected);
    }

    pub fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status = Some(StatusMessage { text: text.into(), is_error, expires_at: Instant::now() + STATUS_TTL });
    }

    /// Drops the status message once it has been shown long enough.
    pub fn expire_status(&mut self, now: Instant) {
        if self.status.as_ref().is_some_and(|s| now >= s.expires_at) {
            self.status = None;
        }
    }
}
