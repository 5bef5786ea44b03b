use serde::Serialize;

/// Per-question response distribution over the full scale.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedSeries {
    pub question: String,
    pub n_valid: u32,
    pub n_missing: u32,
    pub counts: Vec<u32>,
    pub fractions: Vec<f64>,
}

impl AggregatedSeries {
    pub fn total_fraction(&self) -> f64 {
        self.fractions.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignedEntry {
    pub category: String,
    pub scale_index: usize,
    pub fraction: f64,
    pub color: String,
    /// Set on the two halves of a split neutral category.
    pub neutral_half: bool,
}

/// Negative and positive partitions of one question, each ordered from the
/// midpoint outward.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedSeries {
    pub question: String,
    pub negative: Vec<SignedEntry>,
    pub positive: Vec<SignedEntry>,
    /// Positive minus negative share, taken from the integer counts so that
    /// balanced questions score exactly zero.
    pub net: f64,
}

impl SignedSeries {
    pub fn negative_total(&self) -> f64 {
        self.negative.iter().map(|e| e.fraction).sum()
    }

    pub fn positive_total(&self) -> f64 {
        self.positive.iter().map(|e| e.fraction).sum()
    }
}
