//! Primary surface
//!
//! Empty state with the advisory banner, or the list of staged files.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use sharesheet_app::{EmptyState, FileListProps, Moment, PrimarySurface, ShareScreen, format_size};

use super::HostView;

const BORDER_SIZE: u16 = 2;
const BANNER_HEIGHT: u16 = 3;
const SELECTED_PREFIX: &str = "> ";
const UNSELECTED_PREFIX: &str = "  ";

/// Render the primary surface.
pub fn render<I: Moment>(frame: &mut Frame, screen: &ShareScreen<I>, view: &HostView<'_>, area: Rect) {
    match screen.surface() {
        PrimarySurface::Empty(empty) => render_empty(frame, &empty, area),
        PrimarySurface::FileList(props) => render_files(frame, &props, view.selected, area),
    }
}

fn render_empty(frame: &mut Frame, empty: &EmptyState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(BANNER_HEIGHT), Constraint::Min(0)])
        .split(area);

    let [banner_area, rest] = chunks.as_ref() else {
        return;
    };

    let banner = Line::from(vec![
        Span::styled(empty.banner.lead.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::raw(empty.banner.body.as_str()),
    ]);
    let banner = Paragraph::new(banner)
        .wrap(Wrap { trim: true })
        .style(Style::default().bg(Color::Yellow).fg(Color::Black));
    frame.render_widget(banner, *banner_area);

    let illustration = vec![
        Line::from(""),
        Line::from("┌─────┐"),
        Line::from("│ ⇪   │"),
        Line::from("└─────┘"),
        Line::from(""),
        Line::from(Span::styled(empty.caption.as_str(), Style::default().fg(Color::DarkGray))),
    ];
    let caption = Paragraph::new(illustration).alignment(Alignment::Center).wrap(Wrap { trim: true });
    frame.render_widget(caption, *rest);
}

fn render_files(frame: &mut Frame, props: &FileListProps, selected: usize, area: Rect) {
    let files = props.files();
    let selected = selected.min(files.len().saturating_sub(1));

    let title = format!(" {} files · {} ", files.len(), format_size(props.total_size()));
    let mut block = Block::default().borders(Borders::ALL).title(title);
    if props.removable {
        block = block.title_bottom(" [d] remove  [x] remove all ");
    }

    let items: Vec<ListItem> = files
        .iter()
        .enumerate()
        .map(|(i, file)| {
            let is_selected = props.removable && i == selected;
            let prefix = if is_selected { SELECTED_PREFIX } else { UNSELECTED_PREFIX };
            let name_style = match (&file.error, is_selected) {
                (Some(_), _) => Style::default().fg(Color::Red),
                (None, true) => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                (None, false) => Style::default(),
            };

            let mut spans = vec![
                Span::raw(prefix),
                Span::styled(file.name.as_str(), name_style),
                Span::raw("  "),
                Span::styled(file.display_size.as_str(), Style::default().fg(Color::DarkGray)),
            ];
            if let Some(error) = &file.error {
                spans.push(Span::styled(format!("  ({error})"), Style::default().fg(Color::Red)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    // keep the selection on screen
    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = (selected + 1).saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
