//! # aptitude-quiz
//!
//! A terminal programming-aptitude quiz: pick a category, answer each
//! question before its countdown runs out, reveal a hint halfway through
//! and review your mistakes at the end.
//!
//! The session logic lives in [`QuizEngine`], which is driven entirely by
//! explicit calls (`start`, `record_answer`, `advance`, `tick`) and can be
//! used without the terminal front end.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use aptitude_quiz::{Category, Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let quiz = Quiz::builtin()?.with_category(Category::Dsa);
//!     quiz.run().await
//! }
//! ```

mod app;
mod data;
mod engine;
mod models;
pub mod terminal;
mod ticker;
mod ui;

use std::io;
use std::path::Path;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use thiserror::Error;

pub use app::App;
pub use data::{builtin_questions, load_questions_from_json, validate_questions, LoadError};
pub use engine::{
    AnswerOutcome, EngineStatus, Mistake, QuizEngine, SessionError, SessionState, Summary, Tick,
    TimerConfig, DEFAULT_HINT_DELAY, DEFAULT_TIME_LIMIT,
};
pub use models::{AppState, Category, ParseCategoryError, Question};
pub use ticker::{Ticker, TICK_PERIOD};

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz that can be run in the terminal.
pub struct Quiz {
    questions: Vec<Question>,
    config: TimerConfig,
    category: Option<Category>,
}

impl Quiz {
    /// Create a quiz from a vector of questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Load` if the questions break the data contract
    /// (empty set, duplicate options, correct answer not among the options).
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        validate_questions(&questions)?;
        Ok(Self {
            questions,
            config: TimerConfig::default(),
            category: None,
        })
    }

    /// The quiz with the bundled question set.
    pub fn builtin() -> Result<Self, QuizError> {
        Self::new(builtin_questions()?)
    }

    /// Load a quiz from a JSON file.
    ///
    /// ```rust,no_run
    /// use aptitude_quiz::Quiz;
    ///
    /// let quiz = Quiz::from_json("questions.json").expect("Failed to load quiz");
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        Self::new(load_questions_from_json(path)?)
    }

    pub fn with_timer(mut self, config: TimerConfig) -> Self {
        self.config = config;
        self
    }

    /// Preselect a category on the welcome screen.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Build the screen controller without taking over the terminal.
    pub fn into_app(self) -> App {
        let mut app = App::new(self.questions, self.config);
        if let Some(category) = self.category {
            app.choose_category(category);
        }
        app
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub async fn run(self) -> Result<(), QuizError> {
        let mut app = self.into_app();
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut app).await;
        terminal::restore()?;
        result
    }
}

async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
) -> Result<(), QuizError> {
    let mut events = EventStream::new();
    let mut ticker = Ticker::default();
    let mut counting = None;

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;
        sync_countdown(&mut ticker, app, &mut counting);

        tokio::select! {
            _ = ticker.tick() => app.on_tick(),
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if handle_input(app, key.code) {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
        }
    }

    ticker.stop();
    tracing::debug!("event loop finished");
    Ok(())
}

/// Keeps the ticker running only while a question is counting down, and gives
/// every newly shown question a full first second.
///
/// `counting` is the question index the ticker is currently timing.
fn sync_countdown(ticker: &mut Ticker, app: &App, counting: &mut Option<usize>) {
    let current = app
        .is_timer_running()
        .then(|| app.session().map(SessionState::current_index))
        .flatten();

    if current == *counting {
        return;
    }

    match current {
        Some(_) => ticker.restart(),
        None => ticker.stop(),
    }
    *counting = current;
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
        return true;
    }

    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
    false
}

fn handle_welcome_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_category(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_category(),
        KeyCode::Char(' ') => app.choose_highlighted_category(),
        KeyCode::Enter => app.start_quiz(),
        _ => {}
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.submit_answer(),
        KeyCode::Char('n') | KeyCode::Right => app.next_question(),
        _ => {}
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_keyboard_flow() {
        let mut app = Quiz::builtin().unwrap().into_app();

        // Starting without a category keeps the welcome screen.
        assert!(!handle_input(&mut app, KeyCode::Enter));
        assert_eq!(app.state, AppState::Welcome);
        assert!(app.notice().is_some());

        handle_input(&mut app, KeyCode::Char('j'));
        handle_input(&mut app, KeyCode::Char(' '));
        handle_input(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(app.session().unwrap().category(), Category::Dsa);

        for _ in 0..3 {
            handle_input(&mut app, KeyCode::Enter);
            handle_input(&mut app, KeyCode::Char('n'));
        }
        assert_eq!(app.state, AppState::Result);

        handle_input(&mut app, KeyCode::Char('r'));
        assert_eq!(app.state, AppState::Welcome);
        assert!(handle_input(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_preselected_category() {
        let mut app = Quiz::builtin()
            .unwrap()
            .with_category(Category::JavaScriptConcepts)
            .into_app();

        handle_input(&mut app, KeyCode::Enter);
        assert_eq!(app.state, AppState::Quiz);
        assert_eq!(app.session().unwrap().category(), Category::JavaScriptConcepts);
    }

    #[test]
    fn test_new_rejects_invalid_questions() {
        let mut questions = builtin_questions().unwrap();
        questions[0].correct_answer = "not an option".to_string();

        assert!(matches!(
            Quiz::new(questions),
            Err(QuizError::Load(LoadError::InvalidQuestion { index: 0, .. }))
        ));
        assert!(matches!(Quiz::new(Vec::new()), Err(QuizError::Load(LoadError::Empty))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_question_gets_a_full_first_second() {
        let mut app = Quiz::builtin()
            .unwrap()
            .with_category(Category::Dsa)
            .into_app();
        let mut ticker = Ticker::default();
        let mut counting = None;

        app.start_quiz();
        sync_countdown(&mut ticker, &app, &mut counting);
        assert!(ticker.is_running());

        app.submit_answer();
        tokio::time::advance(Duration::from_millis(950)).await;
        app.next_question();
        sync_countdown(&mut ticker, &app, &mut counting);
        let shown = tokio::time::Instant::now();

        ticker.tick().await;
        app.on_tick();

        assert_eq!(shown.elapsed(), TICK_PERIOD);
        assert_eq!(app.session().unwrap().current_index(), 1);
        assert_eq!(app.session().unwrap().time_left(), 59);
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_stops_when_session_completes() {
        let mut app = Quiz::builtin()
            .unwrap()
            .with_category(Category::Dsa)
            .into_app();
        let mut ticker = Ticker::default();
        let mut counting = None;

        app.start_quiz();
        sync_countdown(&mut ticker, &app, &mut counting);
        for _ in 0..3 {
            app.submit_answer();
            app.next_question();
            sync_countdown(&mut ticker, &app, &mut counting);
        }

        assert_eq!(app.state, AppState::Result);
        assert!(!ticker.is_running());
        assert_eq!(counting, None);
    }

    #[test]
    fn test_custom_timer_reaches_engine() {
        let app = Quiz::builtin()
            .unwrap()
            .with_timer(TimerConfig::new(20, 5).unwrap())
            .into_app();
        assert_eq!(app.timer_config().time_limit, 20);
        assert_eq!(app.timer_config().hint_delay, 5);
    }
}
