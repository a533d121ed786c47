//! Detail sheet
//!
//! Share status and the sheet's own button. The handle in the top border
//! shows whether the sheet can be dragged.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use sharesheet_app::{Moment, ShareScreen, ShareState, format_size};

const GAUGE_WIDTH: usize = 20;

struct Content {
    headline: String,
    detail: Option<String>,
    button: &'static str,
    accent: Color,
}

fn content(state: &ShareState) -> Option<Content> {
    let files = state.files();
    let summary = format!("{} files, {}", files.len(), format_size(state.total_size()));

    let content = match state {
        ShareState::NoFiles => return None,
        ShareState::FilesAdded { .. } | ShareState::ErrorAddingFile { .. } => Content {
            headline: "Ready to share".into(),
            detail: Some(summary),
            button: "Start sharing",
            accent: Color::Cyan,
        },
        ShareState::Starting { progress_percent, .. } => {
            let filled = GAUGE_WIDTH * usize::from((*progress_percent).min(100)) / 100;
            Content {
                headline: format!("Starting share… {progress_percent}%"),
                detail: Some(format!("[{}{}]", "#".repeat(filled), "-".repeat(GAUGE_WIDTH - filled))),
                button: "Stop",
                accent: Color::Yellow,
            }
        },
        ShareState::Sharing { address, .. } => Content {
            headline: "Sharing".into(),
            detail: Some(address.clone()),
            button: "Stop sharing",
            accent: Color::Green,
        },
        ShareState::Complete { .. } => Content {
            headline: "Download complete".into(),
            detail: Some(summary),
            button: "Share again",
            accent: Color::Green,
        },
        ShareState::ErrorStarting { message, .. } => Content {
            headline: "Could not start sharing".into(),
            detail: Some(message.clone().unwrap_or_else(|| "unknown error".into())),
            button: "Retry",
            accent: Color::Red,
        },
    };
    Some(content)
}

/// Render the detail sheet.
pub fn render<I: Moment>(frame: &mut Frame, screen: &ShareScreen<I>, area: Rect) {
    let Some(content) = content(screen.state()) else {
        return;
    };

    let handle = if screen.gestures_enabled() { " ━━━ " } else { " ━ locked ━ " };
    let block = Block::default()
        .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
        .border_type(BorderType::Rounded)
        .title(Line::from(handle).alignment(Alignment::Center));

    let mut lines = vec![Line::from(Span::styled(
        content.headline,
        Style::default().fg(content.accent).add_modifier(Modifier::BOLD),
    ))];
    if let Some(detail) = content.detail {
        lines.push(Line::from(detail));
    }
    lines.push(Line::from(vec![
        Span::styled("[s] ", Style::default().fg(Color::DarkGray)),
        Span::styled(content.button, Style::default().add_modifier(Modifier::REVERSED)),
    ]));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
