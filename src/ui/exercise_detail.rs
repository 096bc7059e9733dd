//! Exercise detail screen rendering
//!
//! Shows the exercise attributes, its numbered instructions and the related
//! videos below them. The whole body scrolls as one paragraph.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{error_line, render_footer, status_line, title_line};
use crate::app::{App, Remote};
use crate::data::{Exercise, VideoSummary};
use crate::detail::LoadedExercise;

/// Renders the detail screen for the exercise held by `app`
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let lines = match &app.detail {
        Remote::Idle | Remote::Loading => vec![status_line("Loading exercise...")],
        Remote::Failed(message) => vec![
            Line::from(Span::styled(
                "Error",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            error_line(*message),
            Line::from(""),
            status_line("Press r to retry or Esc to go back"),
        ],
        Remote::Ready(loaded) => detail_lines(loaded, &app.videos),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));

    frame.render_widget(paragraph, chunks[0]);

    render_footer(
        frame,
        chunks[1],
        &[
            ("↑↓", "scroll"),
            ("g/G", "top/bottom"),
            ("r", "reload"),
            ("Esc", "back"),
            ("?", "help"),
        ],
    );
}

fn detail_lines(loaded: &LoadedExercise, videos: &Remote<Vec<VideoSummary>>) -> Vec<Line<'static>> {
    let exercise = &loaded.exercise;
    let mut lines = vec![title_line(exercise.name.clone())];

    if loaded.from_cache {
        lines.push(status_line("(cached)"));
    }

    lines.push(Line::from(""));
    lines.push(attribute_line("Body Part", &exercise.body_part));
    lines.push(attribute_line("Target", &exercise.target));
    lines.push(attribute_line("Equipment", &exercise.equipment));
    if !exercise.gif_url.is_empty() {
        lines.push(attribute_line("Demo", &exercise.gif_url));
    }

    lines.push(Line::from(""));
    lines.extend(instruction_lines(exercise));

    lines.push(Line::from(""));
    lines.push(section_heading("Related Exercise Videos"));
    lines.extend(video_lines(videos));

    lines
}

fn section_heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ))
}

fn attribute_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<11}", format!("{}:", label)), Style::default().fg(Color::DarkGray)),
        Span::styled(value.to_string(), Style::default().fg(Color::Cyan)),
    ])
}

fn instruction_lines(exercise: &Exercise) -> Vec<Line<'static>> {
    let mut lines = vec![section_heading("Instructions")];

    if exercise.instructions.is_empty() {
        lines.push(status_line("Instructions not available for this exercise."));
        return lines;
    }

    for (index, step) in exercise.instructions.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:>2}. ", index + 1), Style::default().fg(Color::Yellow)),
            Span::raw(step.clone()),
        ]));
    }
    lines
}

fn video_lines(videos: &Remote<Vec<VideoSummary>>) -> Vec<Line<'static>> {
    match videos {
        Remote::Idle | Remote::Loading => vec![status_line("Loading videos...")],
        // Video failures are reported as an empty list
        Remote::Failed(_) => vec![status_line("No related videos found.")],
        Remote::Ready(list) if list.is_empty() => vec![status_line("No related videos found.")],
        Remote::Ready(list) => list
            .iter()
            .flat_map(|video| {
                [
                    Line::from(vec![
                        Span::styled("\u{25B6} ", Style::default().fg(Color::Red)),
                        Span::styled(video.title.clone(), Style::default().fg(Color::White)),
                    ]),
                    Line::from(vec![
                        Span::raw("  "),
                        Span::styled(video.channel_title.clone(), Style::default().fg(Color::Gray)),
                        Span::raw("  "),
                        Span::styled(video.watch_url(), Style::default().fg(Color::Blue)),
                    ]),
                ]
            })
            .collect(),
    }
}
