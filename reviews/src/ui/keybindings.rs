//! Keybinding dispatcher.
//!
//! Translates crossterm key and mouse events into `AppState` mutations and
//! `ListController` notifications, and returns a `KeyAction` telling the event
//! loop whether to continue or quit. Every selection move reports the new scroll
//! geometry so the list can prefetch the next page.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use reviews_core::ListController;

use crate::app::{AppState, Mode};
use super::review_list::{scroll_geometry, scroll_into_view};

/// Reviews moved by Ctrl-d / Ctrl-u.
const PAGE_STEP: usize = 5;
/// Reviews moved per mouse wheel notch.
const WHEEL_STEP: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Dispatches a key event to the handler for the current mode.
pub fn handle_key(key: KeyEvent, state: &mut AppState, list: &mut ListController) -> KeyAction {
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::Normal => handle_normal(key, state, list),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

fn handle_normal(key: KeyEvent, state: &mut AppState, list: &mut ListController) -> KeyAction {
    if handle_selection_key(key, state, list) {
        report_scroll(state, list);
        return KeyAction::Continue;
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char('m') => {
            if let Some(id) = list.item_id_at(state.selected) {
                list.notify_expand_requested(id);
            }
        }
        KeyCode::Char('r') => {
            list.notify_refresh_requested();
            state.select_first();
        }
        KeyCode::Char(c @ '1'..='9') => {
            if let (Some(id), Some(n)) = (list.item_id_at(state.selected), c.to_digit(10)) {
                list.notify_photo_selected(id, n as usize - 1);
            }
        }
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
        }
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::Continue
}

/// Handles j / k / g / G and Ctrl-d / Ctrl-u. Returns whether the key was used.
fn handle_selection_key(key: KeyEvent, state: &mut AppState, list: &ListController) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let count = list.item_count();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.select_next(1, count),
        KeyCode::Char('k') | KeyCode::Up => state.select_prev(1),
        KeyCode::Char('g') | KeyCode::Home => state.select_first(),
        KeyCode::Char('G') | KeyCode::End => state.select_last(count),
        KeyCode::Char('d') if ctrl => state.select_next(PAGE_STEP, count),
        KeyCode::Char('u') if ctrl => state.select_prev(PAGE_STEP),
        KeyCode::PageDown => state.select_next(PAGE_STEP, count),
        KeyCode::PageUp => state.select_prev(PAGE_STEP),
        _ => return false,
    }
    true
}

/// Scrolls the selection into view and hands the resulting geometry to the list.
fn report_scroll(state: &mut AppState, list: &mut ListController) {
    scroll_into_view(list, state);
    let geometry = scroll_geometry(list, state);
    list.notify_scrolled(geometry);
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') => state.help_scroll = state.help_scroll.saturating_add(1),
        KeyCode::Char('k') => state.help_scroll = state.help_scroll.saturating_sub(1),
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Scroll wheel moves the selection (or scrolls the help overlay).
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState, list: &mut ListController) -> KeyAction {
    let down = match mouse.kind {
        MouseEventKind::ScrollDown => true,
        MouseEventKind::ScrollUp => false,
        _ => return KeyAction::Continue,
    };
    if state.mode == Mode::HelpOverlay {
        state.help_scroll = if down {
            state.help_scroll.saturating_add(WHEEL_STEP as u16)
        } else {
            state.help_scroll.saturating_sub(WHEEL_STEP as u16)
        };
        return KeyAction::Continue;
    }
    if down {
        state.select_next(WHEEL_STEP, list.item_count());
    } else {
        state.select_prev(WHEEL_STEP);
    }
    report_scroll(state, list);
    KeyAction::Continue
}
