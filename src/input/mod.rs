use std::path::Path;

pub mod config;
pub mod reader;
pub mod table;

pub use config::{SurveyConfig, load_config};
pub use table::{SurveyTable, TableOptions, parse_table};

use reader::{delimiter_for, open_maybe_gz};

/// Tokens that always mean "no answer" (compared case-insensitively).
pub const DEFAULT_MISSING_TOKENS: &[&str] = &["", "na", "n/a", "nan", "null", "-"];

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("config error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_table(path: &Path, options: &TableOptions<'_>) -> Result<SurveyTable, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(format!(
            "response table {} not found",
            path.display()
        )));
    }
    let delim = delimiter_for(path);
    tracing::info!(
        path = %path.display(),
        delimiter = ?delim,
        "loading response table"
    );
    let reader = open_maybe_gz(path)?;
    let table = parse_table(reader, delim, options)?;
    tracing::info!(
        respondents = table.rows.len(),
        questions = table.questions.len(),
        "response table loaded"
    );
    Ok(table)
}

pub fn is_missing(value: &str, extra_tokens: &[String]) -> bool {
    let v = value.trim();
    DEFAULT_MISSING_TOKENS
        .iter()
        .any(|t| v.eq_ignore_ascii_case(t))
        || extra_tokens.iter().any(|t| v.eq_ignore_ascii_case(t.trim()))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
