use crate::model::ReshapeError;
use crate::model::palette::Palette;
use crate::model::scale::LikertScale;
use crate::model::series::{AggregatedSeries, SignedEntry, SignedSeries};
use crate::pipeline::QuestionOrder;

#[derive(Debug)]
pub struct Stage3Output {
    pub aggregated: Vec<AggregatedSeries>,
    pub signed: Vec<SignedSeries>,
}

impl Stage3Output {
    /// Stable reorder of both vectors; ties keep input order.
    pub fn apply_order(&mut self, order: QuestionOrder) {
        let key: fn(&SignedSeries) -> f64 = match order {
            QuestionOrder::Input => return,
            QuestionOrder::Net => |s: &SignedSeries| s.net,
            QuestionOrder::Positive => SignedSeries::positive_total,
        };
        let mut perm = (0..self.signed.len()).collect::<Vec<_>>();
        perm.sort_by(|&a, &b| key(&self.signed[b]).total_cmp(&key(&self.signed[a])));

        let mut aggregated = std::mem::take(&mut self.aggregated)
            .into_iter()
            .map(Some)
            .collect::<Vec<_>>();
        let mut signed = std::mem::take(&mut self.signed)
            .into_iter()
            .map(Some)
            .collect::<Vec<_>>();
        for idx in perm {
            if let (Some(a), Some(s)) = (aggregated[idx].take(), signed[idx].take()) {
                self.aggregated.push(a);
                self.signed.push(s);
            }
        }
    }
}

pub fn run_stage3(
    aggregated: Vec<AggregatedSeries>,
    scale: &LikertScale,
    palette: &Palette,
) -> Result<Stage3Output, ReshapeError> {
    let signed = aggregated
        .iter()
        .map(|s| partition(s, scale, palette))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Stage3Output { aggregated, signed })
}

pub fn partition(
    series: &AggregatedSeries,
    scale: &LikertScale,
    palette: &Palette,
) -> Result<SignedSeries, ReshapeError> {
    palette.ensure_len(scale.len())?;
    if series.fractions.len() != scale.len() {
        return Err(ReshapeError::DegenerateScale(format!(
            "series for {} has {} points, scale has {}",
            series.question,
            series.fractions.len(),
            scale.len()
        )));
    }

    let entry = |index: usize, fraction: f64, neutral_half: bool| -> Result<SignedEntry, ReshapeError> {
        let color = palette.color(index).ok_or(ReshapeError::PaletteMismatch {
            expected: scale.len(),
            actual: palette.len(),
        })?;
        Ok(SignedEntry {
            category: scale.points()[index].label.clone(),
            scale_index: index,
            fraction,
            color: color.to_hex(),
            neutral_half,
        })
    };

    let mut negative = Vec::new();
    let mut positive = Vec::new();

    if let Some(mid) = scale.midpoint() {
        let half = series.fractions[mid] / 2.0;
        negative.push(entry(mid, half, true)?);
        positive.push(entry(mid, half, true)?);
    }
    for idx in scale.negative_outward() {
        negative.push(entry(idx, series.fractions[idx], false)?);
    }
    for idx in scale.positive_outward() {
        positive.push(entry(idx, series.fractions[idx], false)?);
    }

    Ok(SignedSeries {
        question: series.question.clone(),
        negative,
        positive,
        net: exact_net(series, scale),
    })
}

/// The neutral halves cancel, so only the strict sides contribute.
fn exact_net(series: &AggregatedSeries, scale: &LikertScale) -> f64 {
    if series.n_valid == 0 {
        return 0.0;
    }
    let side_count = |indices: Vec<usize>| -> i64 {
        indices
            .into_iter()
            .map(|i| i64::from(series.counts.get(i).copied().unwrap_or(0)))
            .sum()
    };
    let diff = side_count(scale.positive_outward()) - side_count(scale.negative_outward());
    diff as f64 / f64::from(series.n_valid)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_partition.rs"]
mod tests;
