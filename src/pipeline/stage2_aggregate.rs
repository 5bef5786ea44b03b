use std::collections::HashMap;

use crate::model::ReshapeError;
use crate::model::scale::LikertScale;
use crate::model::series::AggregatedSeries;
use crate::pipeline::stage1_select::QuestionColumn;
use crate::pipeline::{ErrorPolicy, SkippedQuestion};

#[derive(Debug)]
pub struct Stage2Output {
    pub series: Vec<AggregatedSeries>,
    pub skipped: Vec<SkippedQuestion>,
}

pub fn run_stage2(
    columns: &[QuestionColumn<'_>],
    scale: &LikertScale,
    policy: ErrorPolicy,
) -> Result<Stage2Output, ReshapeError> {
    let lookup = label_lookup(scale);
    let mut series = Vec::with_capacity(columns.len());
    let mut skipped = Vec::new();

    for column in columns {
        match aggregate_with(column, scale.len(), &lookup) {
            Ok(s) => series.push(s),
            Err(err) if policy == ErrorPolicy::Skip && err.is_question_scoped() => {
                tracing::warn!(question = %column.label, error = %err, "skipping question");
                skipped.push(SkippedQuestion {
                    question: column.label.clone(),
                    reason: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
    }

    if series.is_empty() {
        return Err(ReshapeError::NoQuestions);
    }

    Ok(Stage2Output { series, skipped })
}

fn label_lookup(scale: &LikertScale) -> HashMap<&str, usize> {
    scale
        .points()
        .iter()
        .map(|p| (p.label.as_str(), p.index))
        .collect()
}

fn aggregate_with(
    column: &QuestionColumn<'_>,
    n_points: usize,
    lookup: &HashMap<&str, usize>,
) -> Result<AggregatedSeries, ReshapeError> {
    let mut counts = vec![0u32; n_points];
    let mut n_missing = 0u32;

    for cell in &column.cells {
        let Some(value) = cell.value else {
            n_missing += 1;
            continue;
        };
        let idx = lookup
            .get(value)
            .copied()
            .ok_or_else(|| ReshapeError::UnknownCategory {
                question: column.label.clone(),
                value: value.to_string(),
                row: cell.line,
            })?;
        counts[idx] += 1;
    }

    let n_valid: u32 = counts.iter().sum();
    if n_valid == 0 {
        return Err(ReshapeError::EmptyQuestion {
            question: column.label.clone(),
        });
    }

    let denom = n_valid as f64;
    let fractions = counts.iter().map(|&c| c as f64 / denom).collect();

    let series = AggregatedSeries {
        question: column.label.clone(),
        n_valid,
        n_missing,
        counts,
        fractions,
    };
    debug_assert!((series.total_fraction() - 1.0).abs() < 1e-9);
    Ok(series)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_aggregate.rs"]
mod tests;
