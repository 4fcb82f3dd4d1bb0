mod quiz;
mod result;
mod welcome;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::models::AppState;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.state {
        AppState::Welcome => welcome::render(frame, area, app),
        AppState::Quiz => quiz::render(frame, area, app),
        AppState::Result => result::render(frame, area, app),
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::data::builtin_questions;
    use crate::models::Category;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        App::with_questions(builtin_questions().unwrap())
    }

    #[test]
    fn test_welcome_lists_categories() {
        let mut app = app();
        app.start_quiz();
        let screen = draw(&app);

        assert!(screen.contains("PROGRAMMING APTITUDE TEST"));
        assert!(screen.contains("Logical Thinking"));
        assert!(screen.contains("JavaScript Concepts"));
        assert!(screen.contains("3 questions"));
        assert!(screen.contains("Please select a category first!"));
    }

    #[test]
    fn test_quiz_shows_hint_only_after_delay() {
        let mut app = app();
        app.choose_category(Category::Dsa);
        app.start_quiz();

        let screen = draw(&app);
        assert!(screen.contains("1/3"));
        assert!(screen.contains("1:00"));
        assert!(!screen.contains("Consider how many elements"));

        for _ in 0..30 {
            app.on_tick();
        }
        let screen = draw(&app);
        assert!(screen.contains("0:30"));
        assert!(screen.contains("Consider how many elements"));
    }

    #[test]
    fn test_quiz_shows_explanation_after_answer() {
        let mut app = app();
        app.choose_category(Category::Dsa);
        app.start_quiz();
        app.submit_answer();

        let screen = draw(&app);
        assert!(screen.contains("indexOf needs to potentially check"));
        assert!(screen.contains("Next Question"));
    }

    #[test]
    fn test_result_lists_mistakes() {
        let mut app = app();
        app.choose_category(Category::Dsa);
        app.start_quiz();
        for _ in 0..3 {
            app.submit_answer();
            app.next_question();
        }

        let screen = draw(&app);
        assert!(screen.contains("Test Complete!"));
        assert!(screen.contains("You scored 0 out of 3"));
        assert!(screen.contains("Review Mistakes"));
        assert!(screen.contains("Correct answer: O(n)"));
    }
}
