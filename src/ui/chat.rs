//! Chat screen rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{render_footer, status_line, title_line};
use crate::app::App;
use crate::data::{ChatMessage, Role};

/// Renders the conversation with the input box below it
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(3),    // Conversation
            Constraint::Length(3), // Input
            Constraint::Length(1), // Help text
        ])
        .split(area);

    frame.render_widget(Paragraph::new(title_line("FitBot")), chunks[0]);

    render_conversation(frame, app, chunks[1]);
    render_input(frame, app, chunks[2]);

    render_footer(frame, chunks[3], &[("Enter", "send"), ("Esc", "back")]);
}

fn render_conversation(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    for message in &app.chat_messages {
        lines.extend(message_lines(message));
        lines.push(Line::from(""));
    }
    if app.chat_waiting {
        lines.push(status_line("FitBot is typing..."));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;
    // Rough wrapped height so the newest messages stay in view
    let wrapped: usize = lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(inner_width))
        .sum();
    let scroll = wrapped.saturating_sub(inner_height).min(u16::MAX as usize) as u16;

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

fn message_lines(message: &ChatMessage) -> Vec<Line<'static>> {
    let (speaker, color) = match message.role {
        Role::User => ("You", Color::Yellow),
        Role::Assistant => ("FitBot", Color::Cyan),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            speaker,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", message.timestamp.format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    lines.extend(
        message
            .text
            .lines()
            .map(|line| Line::from(Span::raw(line.to_string()))),
    );
    lines
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.chat_input.is_empty() {
        (
            "Ask about workouts, diet plans, or exercises...".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (app.chat_input.clone(), Style::default().fg(Color::White))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::styled(text, style),
    ]))
    .block(block);

    frame.render_widget(input, area);
}
