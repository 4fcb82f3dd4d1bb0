mod loader;

pub use loader::{builtin_questions, load_questions_from_json, validate_questions, LoadError};
