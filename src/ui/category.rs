//! Category screen rendering
//!
//! Lists the exercises ExerciseDB returns for one body part or piece of
//! equipment, with target muscle and equipment per row.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{error_line, render_footer, status_line, title_line};
use crate::app::{App, Remote};
use crate::data::{Category, Exercise};

/// Width of the exercise name column
const NAME_WIDTH: usize = 34;

/// Renders the exercise list for `category`
pub fn render(frame: &mut Frame, app: &App, category: &Category) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Min(3),    // Exercise list
            Constraint::Length(1), // Help text
        ])
        .split(area);

    let count = app
        .exercises
        .ready()
        .map(|list| format!("{} exercises", list.len()))
        .unwrap_or_default();
    let header = vec![
        title_line(category.title()),
        Line::from(Span::styled(count, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(header), chunks[0]);

    render_list(frame, app, category, chunks[1]);

    render_footer(
        frame,
        chunks[2],
        &[
            ("↑↓", "select"),
            ("Enter", "details"),
            ("r", "retry"),
            ("Esc", "back"),
            ("?", "help"),
        ],
    );
}

fn render_list(frame: &mut Frame, app: &App, category: &Category, area: Rect) {
    let lines: Vec<Line> = match &app.exercises {
        Remote::Idle | Remote::Loading => vec![status_line("Loading exercises...")],
        Remote::Failed(message) => vec![error_line(*message)],
        Remote::Ready(exercises) if exercises.is_empty() => {
            vec![status_line(format!(
                "No exercises found for {}. Try selecting a different category.",
                category
            ))]
        }
        Remote::Ready(exercises) => {
            let visible = area.height as usize;
            let offset = (app.exercise_index + 1).saturating_sub(visible);
            exercises
                .iter()
                .enumerate()
                .skip(offset)
                .take(visible)
                .map(|(index, exercise)| exercise_row(exercise, index == app.exercise_index))
                .collect()
        }
    };

    frame.render_widget(Paragraph::new(lines), area);
}

fn exercise_row(exercise: &Exercise, is_selected: bool) -> Line<'static> {
    let cursor = if is_selected { "\u{25B8} " } else { "  " }; // ▸ or space

    let name_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("{:<width$}", truncate(&exercise.name, NAME_WIDTH), width = NAME_WIDTH),
            name_style,
        ),
        Span::styled(" Target: ", Style::default().fg(Color::DarkGray)),
        Span::styled(exercise.target.clone(), Style::default().fg(Color::Green)),
        Span::styled("  Equipment: ", Style::default().fg(Color::DarkGray)),
        Span::styled(exercise.equipment.clone(), Style::default().fg(Color::Yellow)),
    ])
}

/// Shortens `s` to at most `max` characters, marking the cut with an ellipsis
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}\u{2026}", kept)
}
