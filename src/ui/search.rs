//! Search screen rendering
//!
//! Left: the built-in body part or equipment list for the active tab.
//! Right: the matching wger catalog, shown as a reference.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{error_line, render_footer, status_line, title_line};
use crate::app::{App, Remote};
use crate::data::CategoryKind;

/// Renders the category picker and the reference catalog
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title and tabs
            Constraint::Min(3),    // Lists
            Constraint::Length(1), // Help text
        ])
        .split(area);

    render_tabs(frame, app, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_categories(frame, app, columns[0]);
    render_catalog(frame, app, columns[1]);

    render_footer(
        frame,
        chunks[2],
        &[
            ("↑↓", "select"),
            ("Enter", "open"),
            ("Tab", "switch"),
            ("Esc", "back"),
            ("?", "help"),
        ],
    );
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let mut tabs = Vec::new();
    for kind in [CategoryKind::BodyPart, CategoryKind::Equipment] {
        let style = if kind == app.search_kind {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        tabs.push(Span::styled(format!(" {} ", kind.label()), style));
        tabs.push(Span::raw(" "));
    }

    let lines = vec![title_line("Explore Exercises"), Line::from(tabs)];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_categories(frame: &mut Frame, app: &App, area: Rect) {
    let categories = app.search_categories();
    let visible = area.height.saturating_sub(2) as usize;
    // Keep the selection on screen for the long equipment list
    let offset = (app.search_index + 1).saturating_sub(visible);

    let lines: Vec<Line> = categories
        .iter()
        .enumerate()
        .skip(offset)
        .map(|(index, category)| {
            if index == app.search_index {
                Line::from(vec![
                    Span::styled("\u{25B8} ", Style::default().fg(Color::Cyan)),
                    Span::styled(
                        category.name.clone(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(category.name.clone(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let block = Block::default()
        .title(format!(" {} ", app.search_kind.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_catalog(frame: &mut Frame, app: &App, area: Rect) {
    let title = match app.search_kind {
        CategoryKind::BodyPart => " Muscles (wger) ",
        CategoryKind::Equipment => " Equipment (wger) ",
    };

    let lines: Vec<Line> = match app.catalog(app.search_kind) {
        Remote::Idle | Remote::Loading => vec![status_line("Loading...")],
        Remote::Failed(message) => vec![error_line(*message), status_line("Press r to retry")],
        Remote::Ready(items) if items.is_empty() => vec![status_line("Nothing listed")],
        Remote::Ready(items) => items
            .iter()
            .map(|item| {
                Line::from(Span::styled(
                    format!("\u{2022} {}", item.name),
                    Style::default().fg(Color::Gray),
                ))
            })
            .collect(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}
