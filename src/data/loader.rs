use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::Question;

const BUILTIN_QUESTIONS: &str = include_str!("questions.json");

/// Errors raised while loading a question set.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse questions: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("question set must contain at least one question")]
    Empty,

    #[error("question {} is invalid: {reason}", index + 1)]
    InvalidQuestion { index: usize, reason: String },
}

/// The question set bundled with the binary.
pub fn builtin_questions() -> Result<Vec<Question>, LoadError> {
    parse_questions(BUILTIN_QUESTIONS)
}

pub fn load_questions_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let questions = parse_questions(&json_content)?;
    tracing::info!(path = %path.display(), count = questions.len(), "loaded questions");
    Ok(questions)
}

fn parse_questions(json: &str) -> Result<Vec<Question>, LoadError> {
    let questions: Vec<Question> = serde_json::from_str(json)?;
    validate_questions(&questions)?;
    Ok(questions)
}

/// Checks the data contract the quiz engine relies on.
pub fn validate_questions(questions: &[Question]) -> Result<(), LoadError> {
    if questions.is_empty() {
        return Err(LoadError::Empty);
    }

    for (index, question) in questions.iter().enumerate() {
        validate_question(question).map_err(|reason| LoadError::InvalidQuestion {
            index,
            reason: reason.to_string(),
        })?;
    }

    Ok(())
}

fn validate_question(question: &Question) -> Result<(), &'static str> {
    if question.text.trim().is_empty() {
        return Err("question text is empty");
    }

    if question.options.len() < 2 {
        return Err("at least two options are required");
    }

    let mut seen = HashSet::with_capacity(question.options.len());
    if !question.options.iter().all(|option| seen.insert(option.as_str())) {
        return Err("options contain duplicates");
    }

    if !question.options.contains(&question.correct_answer) {
        return Err("correct answer is not one of the options");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn question() -> Question {
        Question {
            text: "What is 2 + 2?".to_string(),
            options: vec!["3".to_string(), "4".to_string()],
            correct_answer: "4".to_string(),
            hint: "Count.".to_string(),
            explanation: "Two plus two is four.".to_string(),
            category: Category::LogicalThinking,
        }
    }

    #[test]
    fn test_builtin_questions() {
        let questions = builtin_questions().unwrap();
        assert_eq!(questions.len(), 9);
        for category in Category::ALL {
            assert_eq!(category.question_count(&questions), 3);
        }
    }

    #[test]
    fn test_rejects_empty_set() {
        assert!(matches!(parse_questions("[]"), Err(LoadError::Empty)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            parse_questions("[{\"text\": 1}]"),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_category() {
        let json = r#"[{"text": "q", "options": ["a", "b"], "correct_answer": "a",
            "hint": "", "explanation": "", "category": "Rust"}]"#;
        assert!(matches!(parse_questions(json), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_rejects_correct_answer_outside_options() {
        let mut bad = question();
        bad.correct_answer = "5".to_string();

        let err = validate_questions(&[question(), bad]).unwrap_err();
        match err {
            LoadError::InvalidQuestion { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("correct answer"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_duplicate_options() {
        let mut bad = question();
        bad.options = vec!["4".to_string(), "4".to_string()];
        assert!(matches!(
            validate_questions(&[bad]),
            Err(LoadError::InvalidQuestion { index: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_single_option() {
        let mut bad = question();
        bad.options = vec!["4".to_string()];
        assert!(validate_questions(&[bad]).is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_questions_from_json("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
