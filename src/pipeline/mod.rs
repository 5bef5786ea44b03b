pub mod stage1_select;
pub mod stage2_aggregate;
pub mod stage3_partition;
pub mod stage4_layout;
pub mod stage5_report;

use serde::Serialize;

use crate::model::ReshapeError;
use crate::model::palette::Palette;
use crate::model::scale::LikertScale;
use crate::model::series::{AggregatedSeries, SignedSeries};
use crate::pipeline::stage1_select::Stage1Output;
use crate::pipeline::stage2_aggregate::run_stage2;
use crate::pipeline::stage3_partition::run_stage3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ErrorPolicy {
    Fail,
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum QuestionOrder {
    Input,
    Net,
    Positive,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedQuestion {
    pub question: String,
    pub reason: String,
}

/// Canonical per-question series plus their signed partitions, index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct Reshaped {
    pub aggregated: Vec<AggregatedSeries>,
    pub signed: Vec<SignedSeries>,
    pub skipped: Vec<SkippedQuestion>,
}

/// Stages 2 and 3: selected columns in, ordered signed series out.
pub fn reshape(
    selected: &Stage1Output<'_>,
    scale: &LikertScale,
    palette: &Palette,
    policy: ErrorPolicy,
    order: QuestionOrder,
) -> Result<Reshaped, ReshapeError> {
    palette.ensure_len(scale.len())?;

    let stage2 = run_stage2(&selected.columns, scale, policy)?;
    let mut stage3 = run_stage3(stage2.series, scale, palette)?;
    stage3.apply_order(order);

    Ok(Reshaped {
        aggregated: stage3.aggregated,
        signed: stage3.signed,
        skipped: stage2.skipped,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/reshape.rs"]
mod tests;
