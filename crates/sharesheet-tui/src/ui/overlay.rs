//! Floating elements
//!
//! Action button, notification and overflow menu, drawn over the primary
//! surface.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};
use sharesheet_app::{FabColor, Moment, ShareScreen};

use super::{HostView, cols};

const NOTIFICATION_HEIGHT: u16 = 3;
const MENU_PADDING: u16 = 6;

/// Bottom `height` rows of `area`, at most `area` itself.
fn bottom_rows(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect { y: area.y + area.height - height, height, ..area }
}

/// Render the notification at the bottom of `area`.
///
/// Returns the row the action button sits on: just above the notification,
/// or the bottom row of `area` when nothing is shown.
pub fn render_notification(frame: &mut Frame, view: &HostView<'_>, area: Rect) -> Rect {
    let Some(notification) = view.notification else {
        return bottom_rows(area, 1);
    };

    let toast = bottom_rows(area, NOTIFICATION_HEIGHT);
    let mut spans = vec![Span::raw(notification.message.as_str())];
    if let Some(label) = &notification.action_label {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("[r] {label}"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    }

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray))
        .title_bottom(" [esc] dismiss ");
    if view.queued_notifications > 0 {
        block = block.title(format!(" +{} more ", view.queued_notifications));
    }

    frame.render_widget(Clear, toast);
    frame.render_widget(
        Paragraph::new(Line::from(spans)).block(block).style(Style::default().bg(Color::Black)),
        toast,
    );

    let above = Rect { height: area.height.saturating_sub(toast.height), ..area };
    bottom_rows(above, 1)
}

/// Render the action button right-aligned on `row`.
pub fn render_fab<I: Moment>(frame: &mut Frame, screen: &ShareScreen<I>, row: Rect) {
    let Some(fab) = screen.fab() else {
        return;
    };
    if row.height == 0 {
        return;
    }

    let bg = match fab.color {
        FabColor::Primary => Color::Cyan,
        FabColor::Accent => Color::Magenta,
    };
    let label = format!(" + {} [a] ", screen.config().strings.add_files);
    let width = cols(label.chars().count()).min(row.width);
    let area = Rect { x: row.x + row.width - width, width, ..row };

    let button = Paragraph::new(label)
        .style(Style::default().bg(bg).fg(Color::Black).add_modifier(Modifier::BOLD));
    frame.render_widget(Clear, area);
    frame.render_widget(button, area);
}

/// Render the open overflow menu in the top-right corner of `area`.
pub fn render_menu<I: Moment>(frame: &mut Frame, screen: &ShareScreen<I>, view: &HostView<'_>, area: Rect) {
    let items = screen.menu_items();
    let cursor = view.menu_cursor.min(items.len().saturating_sub(1));

    let longest = items.iter().map(|item| item.label.chars().count()).max().unwrap_or(0);
    let width = cols(longest).saturating_add(MENU_PADDING).min(area.width);
    let height = cols(items.len()).saturating_add(2).min(area.height);
    let popup = Rect { x: area.x + area.width - width, y: area.y, width, height };

    let list_items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if i == cursor {
                ListItem::new(Line::from(Span::styled(
                    format!("> {}", item.label),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )))
            } else {
                ListItem::new(Line::from(format!("  {}", item.label)))
            }
        })
        .collect();

    frame.render_widget(Clear, popup);
    frame.render_widget(List::new(list_items).block(Block::default().borders(Borders::ALL)), popup);
}
