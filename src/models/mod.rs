mod question;

pub use question::{Category, ParseCategoryError, Question};

/// Which screen the application is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Category selection and rules.
    Welcome,
    /// A session is running.
    Quiz,
    /// Final score and mistakes review.
    Result,
}
