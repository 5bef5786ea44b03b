use serde::Serialize;

use crate::pipeline::SkippedQuestion;
use crate::pipeline::stage4_layout::{AXIS_MAX_PERCENT, AXIS_MIN_PERCENT, ChartLayout};
use crate::report::ReportContext;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartAxis {
    pub min: f64,
    pub max: f64,
    pub format: &'static str,
}

impl Default for ChartAxis {
    fn default() -> Self {
        Self {
            min: AXIS_MIN_PERCENT,
            max: AXIS_MAX_PERCENT,
            format: "percent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub category: String,
    pub color: String,
}

/// Hand-off document for the external charting step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDocument<'a> {
    pub tool: &'a str,
    pub version: &'a str,
    pub axis: ChartAxis,
    pub legend: Vec<LegendEntry>,
    pub neutral: Option<&'a str>,
    pub layouts: &'a [ChartLayout],
    pub skipped: &'a [SkippedQuestion],
}

pub fn build_legend(labels: &[String], palette: &[String]) -> Vec<LegendEntry> {
    labels
        .iter()
        .zip(palette)
        .map(|(category, color)| LegendEntry {
            category: category.clone(),
            color: color.clone(),
        })
        .collect()
}

pub fn render_chart_json(doc: &ChartDocument<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(doc)
}

#[derive(Debug, Serialize)]
struct PipelineStep<'a> {
    tool: &'a str,
    version: &'a str,
    input: &'a str,
    layout: &'a str,
    n_respondents: usize,
    n_questions: usize,
    n_skipped: usize,
    outputs: &'a [String],
}

pub fn render_pipeline_step_json(
    ctx: &ReportContext,
    outputs: &[String],
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&PipelineStep {
        tool: &ctx.tool_name,
        version: &ctx.tool_version,
        input: &ctx.input,
        layout: &ctx.layout,
        n_respondents: ctx.n_respondents,
        n_questions: ctx.questions.len(),
        n_skipped: ctx.skipped.len(),
        outputs,
    })
}
