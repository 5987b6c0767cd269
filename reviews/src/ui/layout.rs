//! Screen layout: the review list panel above a one-row status bar.
//!
//! Pure layout arithmetic plus the shared panel and status bar widgets. Called
//! inside `terminal.draw()` on every render so each frame reflects the current
//! terminal size.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};
use reviews_core::ListController;

use crate::app::{AppState, Mode};
use crate::theme::Theme;

/// Returns `[list, status_bar]` for the current frame.
pub fn compute_layout(frame: &Frame) -> [Rect; 2] {
    frame.area().layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]))
}

/// Inner `Rect` of a bordered panel.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Bordered `Block` for a panel; thick border when focused.
pub fn panel_block<'a>(title: Line<'a>, is_focused: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .style(Style::default().bg(theme.background))
}

/// Renders the status bar: mode, loading flag and transient message on the
/// left, the review total on the right.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, list: &ListController, theme: &Theme) {
    let mode_text = match state.mode {
        Mode::Normal => " NORMAL ",
        Mode::HelpOverlay => " HELP ",
    };
    let mut spans = vec![Span::styled(
        mode_text,
        Style::default().fg(theme.border_active).add_modifier(Modifier::BOLD),
    )];

    if list.state().is_loading() {
        spans.push(Span::styled(" loading... ", Style::default().fg(theme.status_loading)));
    }
    if let Some(status) = &state.status {
        let fg = if status.is_error { theme.status_error } else { theme.status_bar_fg };
        spans.push(Span::styled(format!(" {} ", status.text), Style::default().fg(fg)));
    }

    let bar_style = Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg);
    frame.render_widget(Paragraph::new(Line::from(spans)).style(bar_style), area);

    if let Some(label) = list.footer_label() {
        let position = format!(" {}/{} | {label} ", (state.selected + 1).min(list.item_count()), list.item_count());
        frame.render_widget(Paragraph::new(Line::from(position).right_aligned()), area);
    }
}
