use serde::Serialize;

use crate::model::palette::Palette;
use crate::model::scale::{LikertScale, Side};
use crate::model::series::{AggregatedSeries, SignedSeries};

pub const AXIS_MIN_PERCENT: f64 = -100.0;
pub const AXIS_MAX_PERCENT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LayoutKind {
    Split,
    Offset,
    Both,
}

impl LayoutKind {
    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::Split => "split",
            LayoutKind::Offset => "offset",
            LayoutKind::Both => "both",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitSegment {
    pub category: String,
    pub percent: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitRow {
    pub question: String,
    pub segments: Vec<SplitSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OffsetSegment {
    pub category: String,
    pub left: f64,
    pub width: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OffsetBar {
    pub question: String,
    pub start: f64,
    pub end: f64,
    pub segments: Vec<OffsetSegment>,
}

/// Chart-ready forms of the same signed series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartLayout {
    /// One trace per category; negative side carries negative percentages.
    Split {
        negative: Vec<SplitRow>,
        positive: Vec<SplitRow>,
    },
    /// One bar per question, segments in scale order from a left offset.
    Offset { bars: Vec<OffsetBar> },
}

pub fn build_layouts(
    aggregated: &[AggregatedSeries],
    signed: &[SignedSeries],
    palette: &Palette,
    scale: &LikertScale,
    kind: LayoutKind,
) -> Vec<ChartLayout> {
    let mut out = Vec::with_capacity(2);
    if matches!(kind, LayoutKind::Split | LayoutKind::Both) {
        out.push(split_layout(signed));
    }
    if matches!(kind, LayoutKind::Offset | LayoutKind::Both) {
        out.push(offset_layout(aggregated, signed, palette, scale));
    }
    out
}

pub fn split_layout(signed: &[SignedSeries]) -> ChartLayout {
    ChartLayout::Split {
        negative: split_rows(signed, Side::Negative),
        positive: split_rows(signed, Side::Positive),
    }
}

fn split_rows(signed: &[SignedSeries], side: Side) -> Vec<SplitRow> {
    let sign = if side == Side::Negative { -1.0 } else { 1.0 };
    signed
        .iter()
        .map(|s| {
            let entries = if side == Side::Negative {
                &s.negative
            } else {
                &s.positive
            };
            SplitRow {
                question: s.question.clone(),
                segments: entries
                    .iter()
                    .map(|e| SplitSegment {
                        category: e.category.clone(),
                        percent: signed_percent(sign, e.fraction),
                        color: e.color.clone(),
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Percent with the side's sign; an empty segment stays at +0.
pub fn signed_percent(sign: f64, fraction: f64) -> f64 {
    if fraction == 0.0 {
        0.0
    } else {
        sign * fraction * 100.0
    }
}

pub fn offset_layout(
    aggregated: &[AggregatedSeries],
    signed: &[SignedSeries],
    palette: &Palette,
    scale: &LikertScale,
) -> ChartLayout {
    let bars = aggregated
        .iter()
        .zip(signed)
        .map(|(agg, sig)| {
            let start = 0.0 - sig.negative_total() * 100.0;
            let mut left = start;
            let segments = scale
                .points()
                .iter()
                .map(|p| {
                    let width = agg.fractions.get(p.index).copied().unwrap_or(0.0) * 100.0;
                    let seg = OffsetSegment {
                        category: p.label.clone(),
                        left,
                        width,
                        color: palette
                            .color(p.index)
                            .map(|c| c.to_hex())
                            .unwrap_or_default(),
                    };
                    left += width;
                    seg
                })
                .collect();
            OffsetBar {
                question: agg.question.clone(),
                start,
                end: sig.positive_total() * 100.0,
                segments,
            }
        })
        .collect();
    ChartLayout::Offset { bars }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_layout.rs"]
mod tests;
