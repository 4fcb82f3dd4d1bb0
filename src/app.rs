use crate::engine::{EngineStatus, QuizEngine, SessionState, Summary, Tick, TimerConfig};
use crate::models::{AppState, Category, Question};

/// Screen-level controller: keeps cursors and prompts, and forwards user
/// actions and ticks to the [`QuizEngine`].
pub struct App {
    pub state: AppState,
    questions: Vec<Question>,
    engine: QuizEngine,
    category_cursor: usize,
    selected_category: Option<Category>,
    selected_option: usize,
    result_scroll: usize,
    notice: Option<String>,
}

impl App {
    pub fn new(questions: Vec<Question>, config: TimerConfig) -> Self {
        Self {
            state: AppState::Welcome,
            questions,
            engine: QuizEngine::new(config),
            category_cursor: 0,
            selected_category: None,
            selected_option: 0,
            result_scroll: 0,
            notice: None,
        }
    }

    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self::new(questions, TimerConfig::default())
    }

    pub fn engine(&self) -> &QuizEngine {
        &self.engine
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.engine.session()
    }

    pub fn summary(&self) -> Option<Summary> {
        self.engine.summary()
    }

    pub fn timer_config(&self) -> TimerConfig {
        self.engine.config()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn category_cursor(&self) -> usize {
        self.category_cursor
    }

    pub fn selected_category(&self) -> Option<Category> {
        self.selected_category
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    /// Message for the user, e.g. when starting without a category.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// The countdown should run only while a session is active on screen.
    pub fn is_timer_running(&self) -> bool {
        self.state == AppState::Quiz && self.engine.is_active()
    }

    pub fn select_next_category(&mut self) {
        self.category_cursor = (self.category_cursor + 1) % Category::ALL.len();
    }

    pub fn select_previous_category(&mut self) {
        let count = Category::ALL.len();
        self.category_cursor = (self.category_cursor + count - 1) % count;
    }

    pub fn choose_highlighted_category(&mut self) {
        self.choose_category(Category::ALL[self.category_cursor]);
    }

    pub fn choose_category(&mut self, category: Category) {
        self.selected_category = Some(category);
        self.category_cursor = Category::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or(0);
        self.notice = None;
    }

    pub fn start_quiz(&mut self) {
        match self.engine.start(self.selected_category, &self.questions) {
            Ok(()) => {
                self.state = AppState::Quiz;
                self.selected_option = 0;
                self.notice = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not start session");
                self.notice = Some(err.to_string());
            }
        }
    }

    pub fn select_next_option(&mut self) {
        if let Some(count) = self.selectable_option_count() {
            self.selected_option = (self.selected_option + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        if let Some(count) = self.selectable_option_count() {
            self.selected_option = (self.selected_option + count - 1) % count;
        }
    }

    /// Answers with the highlighted option, or moves on once answered.
    pub fn submit_answer(&mut self) {
        let Some(session) = self.engine.session() else {
            return;
        };

        if session.is_answered() {
            self.next_question();
            return;
        }

        let Some(option) = session
            .current_question()
            .options
            .get(self.selected_option)
            .cloned()
        else {
            return;
        };
        self.engine.record_answer(&option);
    }

    /// Moves on; only allowed after the current question was answered.
    pub fn next_question(&mut self) {
        if !self.session().is_some_and(SessionState::is_answered) {
            return;
        }

        self.engine.advance();
        self.selected_option = 0;
        self.sync_state();
    }

    pub fn on_tick(&mut self) {
        if !self.is_timer_running() {
            return;
        }

        if self.engine.tick() == Tick::TimedOut {
            self.selected_option = 0;
        }
        self.sync_state();
    }

    pub fn scroll_results_down(&mut self) {
        let mistakes = self.summary().map_or(0, |summary| summary.mistakes.len());
        let max_scroll = mistakes.saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// Discards the finished session and goes back to category selection.
    pub fn restart(&mut self) {
        self.engine.reset();
        self.state = AppState::Welcome;
        self.category_cursor = 0;
        self.selected_category = None;
        self.selected_option = 0;
        self.result_scroll = 0;
        self.notice = None;
    }

    fn selectable_option_count(&self) -> Option<usize> {
        let session = self.engine.session()?;
        if session.is_answered() {
            return None;
        }
        Some(session.current_question().options.len()).filter(|count| *count > 0)
    }

    fn sync_state(&mut self) {
        if self.engine.status() == EngineStatus::Completed {
            self.state = AppState::Result;
            self.result_scroll = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builtin_questions;

    fn app() -> App {
        App::with_questions(builtin_questions().unwrap())
    }

    fn started_app(category: Category) -> App {
        let mut app = app();
        app.choose_category(category);
        app.start_quiz();
        app
    }

    fn highlight(app: &mut App, answer: &str) {
        let options = app.session().unwrap().current_question().options.clone();
        let target = options.iter().position(|o| o == answer).unwrap();
        while app.selected_option() != target {
            app.select_next_option();
        }
    }

    #[test]
    fn test_start_without_category_shows_prompt() {
        let mut app = app();
        app.start_quiz();

        assert_eq!(app.state, AppState::Welcome);
        assert_eq!(app.notice(), Some("Please select a category first!"));
        assert!(!app.is_timer_running());

        app.choose_highlighted_category();
        assert_eq!(app.notice(), None);
        assert_eq!(app.selected_category(), Some(Category::LogicalThinking));
    }

    #[test]
    fn test_category_cursor_wraps() {
        let mut app = app();
        app.select_previous_category();
        assert_eq!(app.category_cursor(), 2);
        app.select_next_category();
        app.select_next_category();
        assert_eq!(app.category_cursor(), 1);
        app.choose_highlighted_category();
        assert_eq!(app.selected_category(), Some(Category::Dsa));
    }

    #[test]
    fn test_full_session_reaches_results() {
        let mut app = started_app(Category::Dsa);
        assert_eq!(app.state, AppState::Quiz);
        assert!(app.is_timer_running());

        highlight(&mut app, "O(n)");
        app.submit_answer();
        assert!(app.session().unwrap().is_answered());
        // Cursor is frozen once answered.
        app.select_next_option();
        assert_eq!(app.session().unwrap().selected_answer(), Some("O(n)"));

        app.submit_answer();
        assert_eq!(app.session().unwrap().current_index(), 1);
        assert_eq!(app.selected_option(), 0);

        highlight(&mut app, "Preorder");
        app.submit_answer();
        app.next_question();

        for _ in 0..60 {
            app.on_tick();
        }

        assert_eq!(app.state, AppState::Result);
        assert!(!app.is_timer_running());

        let summary = app.summary().unwrap();
        assert_eq!(summary.score, 1);
        assert_eq!(summary.percentage, 33);
        assert_eq!(summary.mistakes.len(), 1);
    }

    #[test]
    fn test_next_requires_answer() {
        let mut app = started_app(Category::LogicalThinking);
        app.next_question();
        assert_eq!(app.session().unwrap().current_index(), 0);
    }

    #[test]
    fn test_ticks_ignored_outside_quiz() {
        let mut app = app();
        app.on_tick();
        assert!(app.session().is_none());
    }

    #[test]
    fn test_restart_clears_session_and_category() {
        let mut app = started_app(Category::JavaScriptConcepts);
        for _ in 0..3 {
            let option = app.session().unwrap().current_question().options[0].clone();
            highlight(&mut app, &option);
            app.submit_answer();
            app.next_question();
        }
        assert_eq!(app.state, AppState::Result);

        app.scroll_results_down();
        app.restart();

        assert_eq!(app.state, AppState::Welcome);
        assert_eq!(app.selected_category(), None);
        assert!(app.session().is_none());
        assert_eq!(app.result_scroll(), 0);
    }

    #[test]
    fn test_result_scroll_is_bounded_by_mistakes() {
        let mut app = started_app(Category::Dsa);
        for _ in 0..3 {
            let question = app.session().unwrap().current_question().clone();
            let wrong = question
                .options
                .iter()
                .find(|o| **o != question.correct_answer)
                .unwrap();
            highlight(&mut app, wrong);
            app.submit_answer();
            app.next_question();
        }
        assert_eq!(app.summary().unwrap().mistakes.len(), 3);

        for _ in 0..5 {
            app.scroll_results_down();
        }
        assert_eq!(app.result_scroll(), 2);

        app.scroll_results_up();
        app.scroll_results_up();
        app.scroll_results_up();
        assert_eq!(app.result_scroll(), 0);
    }
}
