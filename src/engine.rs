//! Quiz session engine.
//!
//! Owns the state of a single pass through a category's questions: the
//! current question, score, streak, mistakes and the two per-question
//! countdowns. Time only moves when [`QuizEngine::tick`] is called, so the
//! engine is fully deterministic and knows nothing about rendering.

use thiserror::Error;

use crate::models::{Category, Question};

/// Seconds allowed per question.
pub const DEFAULT_TIME_LIMIT: u32 = 60;
/// Seconds before the hint of the current question is revealed.
pub const DEFAULT_HINT_DELAY: u32 = 30;

/// Errors returned by [`QuizEngine::start`] and [`TimerConfig::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No category was chosen before starting.
    #[error("Please select a category first!")]
    InvalidStart,

    #[error("category {0} has no questions")]
    EmptyCategory(Category),

    #[error("a session is already running; reset it first")]
    SessionInProgress,

    #[error("invalid timer configuration: {0}")]
    InvalidTimerConfig(&'static str),
}

/// Per-question countdown lengths, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    pub time_limit: u32,
    pub hint_delay: u32,
}

impl TimerConfig {
    pub fn new(time_limit: u32, hint_delay: u32) -> Result<Self, SessionError> {
        if time_limit == 0 {
            return Err(SessionError::InvalidTimerConfig(
                "time limit must be at least one second",
            ));
        }
        if hint_delay == 0 {
            return Err(SessionError::InvalidTimerConfig(
                "hint delay must be at least one second",
            ));
        }
        if hint_delay > time_limit {
            return Err(SessionError::InvalidTimerConfig(
                "hint delay cannot exceed the time limit",
            ));
        }

        Ok(Self {
            time_limit,
            hint_delay,
        })
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            time_limit: DEFAULT_TIME_LIMIT,
            hint_delay: DEFAULT_HINT_DELAY,
        }
    }
}

/// Coarse lifecycle of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Idle,
    Active,
    Completed,
}

/// Result of a recorded answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct { streak: usize },
    Incorrect,
}

impl AnswerOutcome {
    pub fn is_correct(self) -> bool {
        matches!(self, AnswerOutcome::Correct { .. })
    }
}

/// What a single call to [`QuizEngine::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The engine was not active; nothing changed.
    Ignored,
    /// One second elapsed.
    Counted,
    /// One second elapsed and the hint became visible.
    HintRevealed,
    /// The question ran out of time and the session moved on.
    TimedOut,
}

/// The mutable state of one session.
#[derive(Debug, Clone)]
pub struct SessionState {
    category: Category,
    questions: Vec<Question>,
    current_index: usize,
    score: usize,
    streak: usize,
    max_streak: usize,
    mistakes: Vec<usize>,
    selected_answer: Option<String>,
    time_left: u32,
    hint_timer: u32,
    hint_revealed: bool,
    completed: bool,
}

impl SessionState {
    fn new(category: Category, questions: Vec<Question>, config: TimerConfig) -> Self {
        Self {
            category,
            questions,
            current_index: 0,
            score: 0,
            streak: 0,
            max_streak: 0,
            mistakes: Vec::new(),
            selected_answer: None,
            time_left: config.time_limit,
            hint_timer: config.hint_delay,
            hint_revealed: false,
            completed: false,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// The questions of the chosen category, in their original order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn streak(&self) -> usize {
        self.streak
    }

    pub fn max_streak(&self) -> usize {
        self.max_streak
    }

    /// Indices of questions answered incorrectly, in the order they happened.
    pub fn mistakes(&self) -> &[usize] {
        &self.mistakes
    }

    pub fn selected_answer(&self) -> Option<&str> {
        self.selected_answer.as_deref()
    }

    pub fn is_answered(&self) -> bool {
        self.selected_answer.is_some()
    }

    /// The explanation is shown as soon as the question has been answered.
    pub fn explanation_visible(&self) -> bool {
        self.is_answered()
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn hint_timer(&self) -> u32 {
        self.hint_timer
    }

    pub fn hint_revealed(&self) -> bool {
        self.hint_revealed
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    fn record_answer(&mut self, option: &str) -> Option<AnswerOutcome> {
        if self.selected_answer.is_some() {
            return None;
        }

        self.selected_answer = Some(option.to_string());

        if self.current_question().is_correct(option) {
            self.score += 1;
            self.streak += 1;
            self.max_streak = self.max_streak.max(self.streak);
            Some(AnswerOutcome::Correct {
                streak: self.streak,
            })
        } else {
            self.streak = 0;
            self.mistakes.push(self.current_index);
            Some(AnswerOutcome::Incorrect)
        }
    }

    fn advance(&mut self, config: TimerConfig) {
        if self.is_last_question() {
            self.completed = true;
            return;
        }

        self.current_index += 1;
        self.time_left = config.time_limit;
        self.hint_timer = config.hint_delay;
        self.hint_revealed = false;
        self.selected_answer = None;
    }

    fn tick(&mut self, config: TimerConfig) -> Tick {
        if self.time_left == 0 {
            return Tick::Ignored;
        }

        self.time_left -= 1;

        let mut revealed_now = false;
        if self.hint_timer > 0 {
            self.hint_timer -= 1;
            if self.hint_timer == 0 {
                self.hint_revealed = true;
                revealed_now = true;
            }
        }

        if self.time_left == 0 {
            // Timeouts break the streak but are not listed as mistakes.
            self.streak = 0;
            self.advance(config);
            return Tick::TimedOut;
        }

        if revealed_now { Tick::HintRevealed } else { Tick::Counted }
    }
}

/// A question missed during the session, for the review list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mistake {
    pub index: usize,
    pub question: String,
    pub correct_answer: String,
}

/// End-of-session report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub category: Category,
    pub score: usize,
    pub total: usize,
    /// `100 * score / total`, rounded half up.
    pub percentage: u32,
    /// Streak at the moment the session ended.
    pub streak: usize,
    /// Longest run of correct answers during the session.
    pub best_streak: usize,
    pub mistakes: Vec<Mistake>,
}

impl Summary {
    fn from_state(state: &SessionState) -> Self {
        let mistakes = state
            .mistakes
            .iter()
            .filter_map(|&index| {
                let question = state.questions.get(index)?;
                Some(Mistake {
                    index,
                    question: question.text.clone(),
                    correct_answer: question.correct_answer.clone(),
                })
            })
            .collect();

        Self {
            category: state.category,
            score: state.score,
            total: state.total_questions(),
            percentage: percentage(state.score, state.total_questions()),
            streak: state.streak,
            best_streak: state.max_streak,
            mistakes,
        }
    }
}

fn percentage(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * score + total) / (2 * total)) as u32
}

/// Drives a quiz session: Idle, then Active after [`start`](Self::start),
/// then Completed once the last question is passed.
#[derive(Debug, Clone, Default)]
pub struct QuizEngine {
    config: TimerConfig,
    session: Option<SessionState>,
}

impl QuizEngine {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> TimerConfig {
        self.config
    }

    pub fn status(&self) -> EngineStatus {
        match &self.session {
            None => EngineStatus::Idle,
            Some(state) if state.completed => EngineStatus::Completed,
            Some(_) => EngineStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status() == EngineStatus::Active
    }

    /// Read-only view of the current session, if any.
    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    /// Starts a session over the questions of `category`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidStart` when no category is given,
    /// `SessionError::EmptyCategory` when it has no questions and
    /// `SessionError::SessionInProgress` unless the engine is idle.
    pub fn start(
        &mut self,
        category: Option<Category>,
        questions: &[Question],
    ) -> Result<(), SessionError> {
        if self.session.is_some() {
            return Err(SessionError::SessionInProgress);
        }

        let category = category.ok_or(SessionError::InvalidStart)?;

        let filtered: Vec<Question> = questions
            .iter()
            .filter(|q| q.category == category)
            .cloned()
            .collect();

        if filtered.is_empty() {
            return Err(SessionError::EmptyCategory(category));
        }

        tracing::info!(%category, questions = filtered.len(), "session started");
        self.session = Some(SessionState::new(category, filtered, self.config));
        Ok(())
    }

    /// Records the first answer to the current question.
    ///
    /// Returns `None` without changing anything if the question was already
    /// answered or no session is active.
    pub fn record_answer(&mut self, option: &str) -> Option<AnswerOutcome> {
        let state = self.active_mut()?;
        let index = state.current_index;
        let outcome = state.record_answer(option)?;

        tracing::debug!(
            question = index,
            correct = outcome.is_correct(),
            score = state.score,
            streak = state.streak,
            "answer recorded"
        );
        Some(outcome)
    }

    /// Moves to the next question, or completes the session on the last one.
    pub fn advance(&mut self) {
        let config = self.config;
        let Some(state) = self.active_mut() else {
            return;
        };

        state.advance(config);
        log_completion(state);
    }

    /// Lets one second pass on the current question.
    pub fn tick(&mut self) -> Tick {
        let config = self.config;
        let Some(state) = self.active_mut() else {
            return Tick::Ignored;
        };

        let index = state.current_index;
        let tick = state.tick(config);
        match tick {
            Tick::HintRevealed => tracing::debug!(question = index, "hint revealed"),
            Tick::TimedOut => {
                tracing::info!(question = index, "question timed out");
                log_completion(state);
            }
            Tick::Counted | Tick::Ignored => {}
        }
        tick
    }

    /// Discards the session and returns to idle.
    pub fn reset(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!("session reset");
        }
    }

    /// Final report, available once the session is completed.
    pub fn summary(&self) -> Option<Summary> {
        self.session
            .as_ref()
            .filter(|state| state.completed)
            .map(Summary::from_state)
    }

    fn active_mut(&mut self) -> Option<&mut SessionState> {
        self.session.as_mut().filter(|state| !state.completed)
    }
}

fn log_completion(state: &SessionState) {
    if state.completed {
        tracing::info!(
            score = state.score,
            total = state.total_questions(),
            "session completed"
        );
    }
}
