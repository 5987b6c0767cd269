//! UI rendering. `render()` is the single entry point called from the event
//! loop's `terminal.draw()` closure.

mod layout;
pub mod help;
pub mod keybindings;
pub mod review_list;

use ratatui::Frame;
use reviews_core::ListController;

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, render_status_bar};

/// Renders one frame: the review list, the status bar and, on top, the help
/// overlay when it is open.
///
/// The list panel's inner area is cached in `state` so the next key press can
/// compute scroll geometry against what is actually on screen.
pub fn render(frame: &mut Frame, state: &mut AppState, list: &mut ListController, theme: &Theme) {
    let [list_area, status_bar] = compute_layout(frame);

    review_list::render_review_list(frame, list_area, state, list, theme);
    render_status_bar(frame, status_bar, state, list, theme);

    if state.mode == Mode::HelpOverlay {
        help::render_help_overlay(frame, theme, state.help_scroll);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::{backend::TestBackend, layout::Rect, Terminal};
    use reviews_core::{ImageCache, LayoutEngine, PageResponse, ReviewsConfig};

    use super::*;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn draws_cards_and_total() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut list =
            ListController::new(&ReviewsConfig::default(), LayoutEngine::default(), Arc::new(ImageCache::default()), tx);
        list.start();
        let request = rx.try_recv().unwrap();
        let body = r#"{"items":[{"text":"Tasty soup","created":"1 May","first_name":"Ann","last_name":"Lee","rating":4}],"count":1}"#;
        list.handle_page_response(PageResponse { request, result: Ok(body.as_bytes().to_vec()) });

        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        let mut state = AppState::default();
        terminal.draw(|frame| render(frame, &mut state, &mut list, &Theme::dark())).unwrap();

        let screen = screen_text(&terminal);
        assert!(screen.contains("Ann Lee"));
        assert!(screen.contains("★★★★☆"));
        assert!(screen.contains("Tasty soup"));
        assert!(screen.contains("1 review"));
        assert_eq!(state.list_viewport, Rect::new(1, 1, 58, 13));
    }

    #[test]
    fn empty_list_shows_loading() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let mut list =
            ListController::new(&ReviewsConfig::default(), LayoutEngine::default(), Arc::new(ImageCache::default()), tx);
        list.start();

        let mut terminal = Terminal::new(TestBackend::new(40, 8)).unwrap();
        let mut state = AppState::default();
        terminal.draw(|frame| render(frame, &mut state, &mut list, &Theme::dark())).unwrap();
        assert!(screen_text(&terminal).contains("Loading..."));
    }
}
