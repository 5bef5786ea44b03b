pub mod palette;
pub mod scale;
pub mod series;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReshapeError {
    #[error("question {question} has no valid responses")]
    EmptyQuestion { question: String },

    #[error("degenerate scale: {0}")]
    DegenerateScale(String),

    #[error("question {question}, row {row}: value {value:?} is not on the scale")]
    UnknownCategory {
        question: String,
        value: String,
        row: usize,
    },

    #[error("palette has {actual} colors but the scale has {expected} categories")]
    PaletteMismatch { expected: usize, actual: usize },

    #[error("invalid color {0:?} (expected #rrggbb)")]
    InvalidColor(String),

    #[error("no questions left to chart")]
    NoQuestions,
}

impl ReshapeError {
    /// Errors tied to one question; the rest invalidate the whole run.
    pub fn is_question_scoped(&self) -> bool {
        matches!(
            self,
            ReshapeError::EmptyQuestion { .. } | ReshapeError::UnknownCategory { .. }
        )
    }
}
