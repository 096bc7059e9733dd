//! Home screen rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{render_footer, title_line};
use crate::app::App;

/// Renders the landing screen with the main menu
pub fn render(frame: &mut Frame, _app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(area);

    let lines = vec![
        title_line("FITDEX"),
        Line::from(Span::styled(
            "Sweat, Smile And Repeat",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Browse exercises by body part or equipment, watch how-to videos,",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            "and ask FitBot about workouts and nutrition.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        menu_line("s", "Explore exercises"),
        menu_line("c", "Chat with FitBot"),
        menu_line("?", "Keyboard shortcuts"),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[1]);

    render_footer(
        frame,
        chunks[2],
        &[("s", "search"), ("c", "chat"), ("?", "help"), ("q", "quit")],
    );
}

fn menu_line(key: &'static str, label: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("[{}] ", key), Style::default().fg(Color::Yellow)),
        Span::styled(label, Style::default().fg(Color::White)),
    ])
}

#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::ui::test_support::render_to_string;

    #[test]
    fn test_home_shows_title_and_menu() {
        let app = App::new(true);

        let content = render_to_string(&app);

        assert!(content.contains("FITDEX"), "Should render title");
        assert!(content.contains("Explore exercises"));
        assert!(content.contains("Chat with FitBot"));
    }
}
