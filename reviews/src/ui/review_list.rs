//! Review cards drawn from `ListController` layouts.
//!
//! The core lays cells out in points. The terminal maps one column to
//! `POINTS_PER_COL` points (one monospace advance of the 16 pt body font) and one
//! row to `POINTS_PER_ROW` points (one body line). Each frame of a `CellLayout`
//! is snapped onto that grid, so the cards keep the core's proportions without
//! being pixel accurate.
//!
//! Only the cards from `AppState::first_visible` down to the bottom of the panel
//! are laid out and drawn.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Paragraph},
};
use reviews_core::{CellLayout, LayoutEngine, ListController, MonospaceMeasurer, ReviewBindings, ScrollGeometry};

use crate::app::AppState;
use crate::theme::Theme;
use super::layout::{inner_rect, panel_block};

pub const POINTS_PER_COL: f32 = 8.0;
pub const POINTS_PER_ROW: f32 = 20.0;

/// Cell width in points for a panel `area` wide.
pub fn width_points(area: Rect) -> f32 {
    f32::from(area.width) * POINTS_PER_COL
}

/// Rows a cell of `height` points occupies.
pub fn rows_for(height: f32) -> u16 {
    (height / POINTS_PER_ROW).ceil().clamp(1.0, f32::from(u16::MAX)) as u16
}

fn item_rows(list: &mut ListController, index: usize, width: f32) -> u16 {
    list.item_id_at(index)
        .and_then(|id| list.height_for_item(id, width))
        .map_or(0, rows_for)
}

/// Moves `first_visible` so the selected card is fully on screen.
pub fn scroll_into_view(list: &mut ListController, state: &mut AppState) {
    state.clamp_to(list.item_count());
    if state.selected <= state.first_visible {
        state.first_visible = state.selected;
        return;
    }
    let width = width_points(state.list_viewport);
    let viewport = u32::from(state.list_viewport.height);
    while state.first_visible < state.selected {
        let rows: u32 = (state.first_visible..=state.selected)
            .map(|index| u32::from(item_rows(list, index, width)))
            .sum();
        if rows <= viewport {
            break;
        }
        state.first_visible += 1;
    }
}

/// Scroll geometry in points for the current viewport, as the scroll trigger
/// expects it.
pub fn scroll_geometry(list: &mut ListController, state: &AppState) -> ScrollGeometry {
    let width = width_points(state.list_viewport);
    let row = f64::from(POINTS_PER_ROW);
    let mut content_height = 0.0;
    let mut target_offset_y = 0.0;
    for index in 0..list.item_count() {
        let height = f64::from(item_rows(list, index, width)) * row;
        if index < state.first_visible {
            target_offset_y += height;
        }
        content_height += height;
    }
    ScrollGeometry {
        viewport_height: f64::from(state.list_viewport.height) * row,
        content_height,
        target_offset_y,
    }
}

/// Renders the list panel and caches its inner area in `state`.
pub fn render_review_list(
    frame: &mut Frame,
    area: Rect,
    state: &mut AppState,
    list: &mut ListController,
    theme: &Theme,
) {
    let title = Line::from(" Reviews ").style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(panel_block(title, true, theme), area);

    let inner = inner_rect(area);
    state.list_viewport = inner;
    scroll_into_view(list, state);

    let width = width_points(inner);
    let bottom = inner.bottom();
    let mut y = inner.y;
    let mut index = state.first_visible;
    while y < bottom {
        let Some(id) = list.item_id_at(index) else {
            render_list_end(frame, Rect::new(inner.x, y, inner.width, 1), list, theme);
            break;
        };
        let (Some(layout), Some(bindings)) = (list.layout_for_item(id, width), list.bindings_for_item(id)) else {
            break;
        };
        let rows = rows_for(layout.total_height);
        let card = Rect::new(inner.x, y, inner.width, rows.min(bottom - y));
        render_card(frame, card, &layout, &bindings, index == state.selected, list.layout_engine(), theme);
        y = y.saturating_add(rows);
        index += 1;
    }
}

/// Row under the last card: loading hint, retry hint or the review total.
fn render_list_end(frame: &mut Frame, area: Rect, list: &ListController, theme: &Theme) {
    let state = list.state();
    let line = if state.is_loading() {
        Line::from("Loading...").style(Style::default().fg(theme.status_loading))
    } else if state.items().is_empty() && state.last_error().is_some() {
        Line::from("Could not load reviews. Press r to retry.").style(Style::default().fg(theme.status_error))
    } else if let Some(label) = list.footer_label() {
        Line::from(label).style(Style::default().fg(theme.created))
    } else {
        return;
    };
    frame.render_widget(Paragraph::new(line.centered()), area);
}

/// Snaps a point frame inside a card onto the terminal grid, clipped to `card`.
fn cell_rect(card: Rect, frame: reviews_core::Rect) -> Option<Rect> {
    if frame.is_empty() {
        return None;
    }
    let x = card.x.saturating_add((frame.x / POINTS_PER_COL).floor() as u16);
    let y = card.y.saturating_add((frame.y / POINTS_PER_ROW).floor() as u16);
    let width = ((frame.width / POINTS_PER_COL).ceil() as u16).max(1);
    let height = ((frame.height / POINTS_PER_ROW).round() as u16).max(1);
    let rect = Rect::new(x, y, width, height).intersection(card);
    (!rect.is_empty()).then_some(rect)
}

/// Like `cell_rect`, but runs to the card's right edge. Labels in fonts smaller
/// than the body font would otherwise lose their last characters.
fn text_rect(card: Rect, frame: reviews_core::Rect) -> Option<Rect> {
    cell_rect(card, frame).map(|rect| Rect { width: card.right().saturating_sub(rect.x), ..rect })
}

fn initials(full_name: &str) -> String {
    full_name
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .collect()
}

fn render_card(
    frame: &mut Frame,
    card: Rect,
    layout: &CellLayout,
    bindings: &ReviewBindings,
    selected: bool,
    engine: &LayoutEngine<MonospaceMeasurer>,
    theme: &Theme,
) {
    if selected {
        frame.render_widget(Block::default().style(Style::default().bg(theme.selection_bg)), card);
    }
    let frames = &layout.frames;

    if let Some(area) = cell_rect(card, frames.avatar) {
        let bg = if bindings.avatar_cached { theme.avatar_loaded } else { theme.avatar };
        let label = Line::from(initials(&bindings.full_name)).centered();
        frame.render_widget(
            Paragraph::new(label).style(Style::default().bg(bg).fg(theme.name).add_modifier(Modifier::BOLD)),
            area,
        );
    }

    if let Some(area) = text_rect(card, frames.full_name) {
        let name = Span::styled(bindings.full_name.as_str(), Style::default().fg(theme.name).add_modifier(Modifier::BOLD));
        frame.render_widget(Paragraph::new(Line::from(name)), area);
    }

    if let Some(area) = text_rect(card, frames.rating) {
        let stars = Span::styled(bindings.rating_glyphs.as_str(), Style::default().fg(theme.rating));
        frame.render_widget(Paragraph::new(Line::from(stars)), area);
    }

    if let (Some(area), Some(photos)) = (cell_rect(card, frames.photos), bindings.photos.as_ref()) {
        frame.render_widget(Paragraph::new(photo_strip(photos.len(), area.height, theme)), area);
    }

    if let Some(area) = text_rect(card, frames.text) {
        let measurer = engine.measurer();
        let columns = measurer.columns(&engine.typography.text, engine.content_width(width_points(card)));
        let mut lines = measurer.wrap(&bindings.text, columns);
        if bindings.max_lines > 0 {
            lines.truncate(bindings.max_lines as usize);
        }
        let text: Vec<Line> = lines.into_iter().map(Line::from).collect();
        frame.render_widget(Paragraph::new(text).style(Style::default().fg(theme.text)), area);
    }

    if let Some(area) = text_rect(card, frames.show_more) {
        let label = Span::styled(
            engine.typography.show_more_label.as_str(),
            Style::default().fg(theme.show_more).add_modifier(Modifier::UNDERLINED),
        );
        frame.render_widget(Paragraph::new(Line::from(label)), area);
    }

    if let Some(area) = text_rect(card, frames.created) {
        let created = Span::styled(bindings.created.as_str(), Style::default().fg(theme.created));
        frame.render_widget(Paragraph::new(Line::from(created)), area);
    }
}

/// Numbered thumbnails, one per photo, `rows` tall.
fn photo_strip(count: usize, rows: u16, theme: &Theme) -> Text<'static> {
    const THUMB_COLS: usize = 7;
    let thumb = Style::default().bg(theme.photo).fg(theme.background);
    let label_row = rows / 2;
    (0..rows)
        .map(|row| {
            let spans: Vec<Span> = (0..count)
                .flat_map(|i| {
                    let body = if row == label_row {
                        format!("{:^THUMB_COLS$}", i + 1)
                    } else {
                        " ".repeat(THUMB_COLS)
                    };
                    [Span::styled(body, thumb), Span::raw(" ")]
                })
                .collect();
            Line::from(spans)
        })
        .collect::<Vec<_>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_frames_snap_to_grid() {
        let card = Rect::new(1, 10, 40, 9);
        let text = reviews_core::Rect { x: 58.0, y: 57.0, width: 192.0, height: 60.0 };
        assert_eq!(cell_rect(card, text), Some(Rect::new(8, 12, 24, 3)));

        let strip = reviews_core::Rect { x: 58.0, y: 61.0, width: 330.0, height: 80.0 };
        assert_eq!(cell_rect(card, strip), Some(Rect::new(8, 13, 33, 4)));

        assert_eq!(cell_rect(card, reviews_core::Rect::ZERO), None);

        let created = reviews_core::Rect { x: 58.0, y: 147.0, width: 30.0, height: 16.0 };
        assert_eq!(cell_rect(card, created), Some(Rect::new(8, 17, 4, 1)));
        assert_eq!(text_rect(card, created), Some(Rect::new(8, 17, 33, 1)));
    }

    #[test]
    fn row_counts_round_up() {
        assert_eq!(rows_for(172.0), 9);
        assert_eq!(rows_for(160.0), 8);
        assert_eq!(rows_for(0.0), 1);
    }

    #[test]
    fn initials_take_first_letters() {
        assert_eq!(initials("Ann Lee"), "AL");
        assert_eq!(initials("Cher"), "C");
        assert_eq!(initials("Анна Ли Мария"), "АЛ");
    }

    #[test]
    fn photo_strip_labels_middle_row() {
        let text = photo_strip(2, 4, &Theme::dark());
        assert_eq!(text.lines.len(), 4);
        let middle: String = text.lines[2].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(middle, "   1       2    ");
    }
}
