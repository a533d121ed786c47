//! Top bar
//!
//! App title on the left, overflow menu hint on the right.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use sharesheet_app::{Moment, ShareScreen};

use super::cols;

/// Render the top bar.
pub fn render<I: Moment>(frame: &mut Frame, screen: &ShareScreen<I>, area: Rect) {
    let bar_style = Style::default().bg(Color::Blue).fg(Color::White);

    let marker = if screen.menu_open() { "▴" } else { "⋮" };
    let hint = format!("[m] {} {marker} ", screen.config().strings.menu);
    let hint_width = cols(hint.chars().count());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(hint_width)])
        .split(area);

    let [title_area, hint_area] = chunks.as_ref() else {
        return;
    };

    let title = Line::from(vec![
        Span::raw(" "),
        Span::styled(screen.title(), Style::default().add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(title).style(bar_style), *title_area);
    frame.render_widget(Paragraph::new(hint).style(bar_style), *hint_area);
}
