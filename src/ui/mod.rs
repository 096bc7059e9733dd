//! UI rendering module for fitdex
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod category;
pub mod chat;
pub mod exercise_detail;
pub mod help_overlay;
pub mod home;
pub mod search;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Screen};
use crate::error::MessageKey;

/// Renders the current screen, plus the help overlay when it is open
pub fn render(frame: &mut Frame, app: &App) {
    match &app.screen {
        Screen::Home => home::render(frame, app),
        Screen::Search => search::render(frame, app),
        Screen::Category(selected) => category::render(frame, app, selected),
        Screen::Detail(_) => exercise_detail::render(frame, app),
        Screen::Chat => chat::render(frame, app),
    }

    if app.show_help {
        help_overlay::render(frame);
    }
}

/// Bold cyan heading used at the top of every screen
pub(crate) fn title_line(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

/// Dimmed status text such as "Loading..."
pub(crate) fn status_line(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::default().fg(Color::DarkGray)))
}

/// A failure message in the error color
pub(crate) fn error_line(message: MessageKey) -> Line<'static> {
    Line::from(Span::styled(message.text(), Style::default().fg(Color::Red)))
}

/// Renders the one-line key hint footer
pub(crate) fn render_footer(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (key, action) in hints {
        spans.push(Span::styled(
            format!(" {}", key),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::styled(
            format!(" {} ", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}


#[cfg(test)]
mod tests {
    use super::test_support::render_to_string;
    use super::*;

    #[test]
    fn test_help_overlay_drawn_over_screen() {
        let mut app = App::new(true);
        app.show_help = true;

        let content = render_to_string(&app);

        assert!(content.contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_error_line_uses_message_text() {
        let line = error_line(MessageKey::RateLimited);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "API rate limit exceeded. Please try again later");
    }
}
