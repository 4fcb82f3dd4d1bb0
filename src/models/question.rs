use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of question categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Logical Thinking")]
    LogicalThinking,
    #[serde(rename = "DSA")]
    Dsa,
    #[serde(rename = "JavaScript Concepts")]
    JavaScriptConcepts,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::LogicalThinking,
        Category::Dsa,
        Category::JavaScriptConcepts,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::LogicalThinking => "Logical Thinking",
            Category::Dsa => "DSA",
            Category::JavaScriptConcepts => "JavaScript Concepts",
        }
    }

    /// Number of questions in `questions` that belong to this category.
    pub fn question_count(self, questions: &[Question]) -> usize {
        questions.iter().filter(|q| q.category == self).count()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category `{0}` (expected one of: Logical Thinking, DSA, JavaScript Concepts)")]
pub struct ParseCategoryError(String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Accepts the display name in any case, with spaces, dashes or underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "logicalthinking" | "logic" => Ok(Category::LogicalThinking),
            "dsa" => Ok(Category::Dsa),
            "javascriptconcepts" | "javascript" | "js" => Ok(Category::JavaScriptConcepts),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

/// A single multiple-choice question. Never mutated once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub hint: String,
    pub explanation: String,
    pub category: Category,
}

impl Question {
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!("DSA".parse::<Category>(), Ok(Category::Dsa));
        assert_eq!("dsa".parse::<Category>(), Ok(Category::Dsa));
        assert_eq!(
            "logical-thinking".parse::<Category>(),
            Ok(Category::LogicalThinking)
        );
        assert_eq!(
            "JavaScript Concepts".parse::<Category>(),
            Ok(Category::JavaScriptConcepts)
        );
        assert!("rust".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&Category::JavaScriptConcepts).unwrap();
        assert_eq!(json, "\"JavaScript Concepts\"");

        let category: Category = serde_json::from_str("\"Logical Thinking\"").unwrap();
        assert_eq!(category, Category::LogicalThinking);
    }
}
