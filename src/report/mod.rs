pub mod json;
pub mod text;

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSummary {
    pub question: String,
    pub n_valid: u32,
    pub n_missing: u32,
    /// Strict shares; the neutral category is not split here.
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    pub net: f64,
}

#[derive(Debug, Clone)]
pub struct ReportContext {
    pub tool_name: String,
    pub tool_version: String,
    pub input: String,
    pub n_respondents: usize,
    pub scale_labels: Vec<String>,
    pub neutral_label: Option<String>,
    pub palette: Vec<String>,
    pub layout: String,
    pub groups: Vec<String>,
    pub questions: Vec<QuestionSummary>,
    pub skipped: Vec<(String, String)>,
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn format_percent_1(v: f64) -> String {
    format!("{:.1}%", v * 100.0)
}

/// Highest and lowest net score; ties resolve to the earlier question.
pub fn net_extremes(questions: &[QuestionSummary]) -> Option<(&QuestionSummary, &QuestionSummary)> {
    let first = questions.first()?;
    let mut best = first;
    let mut worst = first;
    for q in &questions[1..] {
        if q.net > best.net {
            best = q;
        }
        if q.net < worst.net {
            worst = q;
        }
    }
    Some((best, worst))
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
