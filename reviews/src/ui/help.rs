//! Help overlay: a centred modal drawn over the list in the same draw call,
//! erasing its background with `Clear` first.

use ratatui::{
    Frame,
    layout::Constraint,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the help overlay scrolled by `help_scroll` rows.
///
/// Skipped on terminals narrower than 40 columns.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 40 {
        return;
    }

    let overlay_area = frame
        .area()
        .centered(Constraint::Percentage(70), Constraint::Percentage(70));
    frame.render_widget(Clear, overlay_area);

    let block = Block::bordered()
        .title(" Help | j/k scroll, ? or Esc to dismiss ")
        .border_style(ratatui::style::Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay_area,
    );
}

fn build_help_text() -> Text<'static> {
    Text::from(vec![
        Line::from("Navigation"),
        Line::from("  j / k         Select next / previous review"),
        Line::from("  g / G         Jump to first / last loaded review"),
        Line::from("  Ctrl-d / u    Move five reviews down / up"),
        Line::from("  Mouse wheel   Move three reviews down / up"),
        Line::from(""),
        Line::from("Reviews"),
        Line::from("  Enter / m     Show the full text of the selected review"),
        Line::from("  1 - 9         Open photo N of the selected review"),
        Line::from("  r             Refresh the list from the first page"),
        Line::from(""),
        Line::from("General"),
        Line::from("  ?             Open / close this help overlay"),
        Line::from("  q / Esc       Quit"),
    ])
}
