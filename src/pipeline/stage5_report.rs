use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::palette::Palette;
use crate::model::scale::{LikertScale, Side};
use crate::model::series::{AggregatedSeries, SignedEntry, SignedSeries};
use crate::pipeline::stage4_layout::{ChartLayout, signed_percent};
use crate::pipeline::{Reshaped, SkippedQuestion};
use crate::report::json::{
    ChartAxis, ChartDocument, build_legend, render_chart_json, render_pipeline_step_json,
};
use crate::report::text::render_report_text;
use crate::report::{QuestionSummary, ReportContext, format_f64_6};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RunMode {
    Standalone,
    Pipeline,
}

#[derive(Debug, Clone)]
pub struct Stage5Input<'a> {
    pub reshaped: &'a Reshaped,
    pub layouts: &'a [ChartLayout],
    pub scale: &'a LikertScale,
    pub palette: &'a Palette,
    pub groups: &'a [String],
    pub layout_name: &'a str,
    pub input_name: String,
    pub n_respondents: usize,
    pub tool_name: String,
    pub tool_version: String,
    pub run_mode: RunMode,
}

pub const AGGREGATED_FILE: &str = "aggregated.tsv";
pub const NEGATIVE_FILE: &str = "negative.tsv";
pub const POSITIVE_FILE: &str = "positive.tsv";
pub const CHART_FILE: &str = "chart.json";
pub const REPORT_FILE: &str = "report.txt";
pub const PIPELINE_STEP_FILE: &str = "pipeline_step.json";

pub fn write_reports(input: &Stage5Input<'_>, out_dir: &Path) -> std::io::Result<Vec<String>> {
    fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();

    write_aggregated_tsv(input, &out_dir.join(AGGREGATED_FILE))?;
    written.push(AGGREGATED_FILE.to_string());

    write_signed_tsv(&input.reshaped.signed, Side::Negative, &out_dir.join(NEGATIVE_FILE))?;
    written.push(NEGATIVE_FILE.to_string());
    write_signed_tsv(&input.reshaped.signed, Side::Positive, &out_dir.join(POSITIVE_FILE))?;
    written.push(POSITIVE_FILE.to_string());

    let labels = label_strings(input.scale);
    let palette = input.palette.to_hex();
    let doc = ChartDocument {
        tool: &input.tool_name,
        version: &input.tool_version,
        axis: ChartAxis::default(),
        legend: build_legend(&labels, &palette),
        neutral: input
            .scale
            .midpoint()
            .map(|m| input.scale.points()[m].label.as_str()),
        layouts: input.layouts,
        skipped: &input.reshaped.skipped,
    };
    let json = render_chart_json(&doc).map_err(std::io::Error::other)?;
    write_text(&out_dir.join(CHART_FILE), &json)?;
    written.push(CHART_FILE.to_string());

    let ctx = build_report_context(input, labels, palette);
    write_text(&out_dir.join(REPORT_FILE), &render_report_text(&ctx))?;
    written.push(REPORT_FILE.to_string());

    if input.run_mode == RunMode::Pipeline {
        written.push(PIPELINE_STEP_FILE.to_string());
        let json = render_pipeline_step_json(&ctx, &written).map_err(std::io::Error::other)?;
        write_text(&out_dir.join(PIPELINE_STEP_FILE), &json)?;
    }

    for name in &written {
        let path = out_dir.join(name);
        tracing::info!(path = %path.display(), "wrote output");
    }
    Ok(written)
}

fn write_aggregated_tsv(input: &Stage5Input<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);

    let mut header = vec![
        "question".to_string(),
        "n_valid".to_string(),
        "n_missing".to_string(),
    ];
    header.extend(fraction_columns(input.scale));
    header.push("net".to_string());
    writeln!(w, "{}", header.join("\t"))?;

    for (agg, signed) in input.reshaped.aggregated.iter().zip(&input.reshaped.signed) {
        let mut row = vec![
            sanitize(&agg.question),
            agg.n_valid.to_string(),
            agg.n_missing.to_string(),
        ];
        row.extend(agg.fractions.iter().map(|&f| format_f64_6(f)));
        row.push(format_f64_6(signed.net));
        writeln!(w, "{}", row.join("\t"))?;
    }
    w.flush()
}

fn write_signed_tsv(signed: &[SignedSeries], side: Side, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "question\tcategory\tfraction\tpercent\tcolor")?;

    let sign = if side == Side::Negative { -1.0 } else { 1.0 };
    for s in signed {
        let entries: &[SignedEntry] = if side == Side::Negative {
            &s.negative
        } else {
            &s.positive
        };
        for e in entries {
            let category = if e.neutral_half {
                format!("{} (half)", e.category)
            } else {
                e.category.clone()
            };
            writeln!(
                w,
                "{}\t{}\t{}\t{}\t{}",
                sanitize(&s.question),
                sanitize(&category),
                format_f64_6(e.fraction),
                format_f64_6(signed_percent(sign, e.fraction)),
                e.color
            )?;
        }
    }
    w.flush()
}

pub fn build_report_context(
    input: &Stage5Input<'_>,
    scale_labels: Vec<String>,
    palette: Vec<String>,
) -> ReportContext {
    let questions = input
        .reshaped
        .aggregated
        .iter()
        .zip(&input.reshaped.signed)
        .map(|(agg, signed)| summarize(agg, signed, input.scale))
        .collect();

    ReportContext {
        tool_name: input.tool_name.clone(),
        tool_version: input.tool_version.clone(),
        input: input.input_name.clone(),
        n_respondents: input.n_respondents,
        neutral_label: input
            .scale
            .midpoint()
            .map(|m| input.scale.points()[m].label.clone()),
        scale_labels,
        palette,
        layout: input.layout_name.to_string(),
        groups: input.groups.to_vec(),
        questions,
        skipped: input
            .reshaped
            .skipped
            .iter()
            .map(|SkippedQuestion { question, reason }| (question.clone(), reason.clone()))
            .collect(),
    }
}

fn summarize(agg: &AggregatedSeries, signed: &SignedSeries, scale: &LikertScale) -> QuestionSummary {
    let mut negative = 0.0;
    let mut neutral = 0.0;
    let mut positive = 0.0;
    for point in scale.points() {
        let f = agg.fractions.get(point.index).copied().unwrap_or(0.0);
        match point.side {
            Side::Negative => negative += f,
            Side::Neutral => neutral += f,
            Side::Positive => positive += f,
        }
    }
    QuestionSummary {
        question: agg.question.clone(),
        n_valid: agg.n_valid,
        n_missing: agg.n_missing,
        negative,
        neutral,
        positive,
        net: signed.net,
    }
}

fn label_strings(scale: &LikertScale) -> Vec<String> {
    scale.labels().into_iter().map(str::to_string).collect()
}

/// One `frac_*` header per scale point. Labels whose slug is empty or already
/// taken fall back to their 1-based position.
pub fn fraction_columns(scale: &LikertScale) -> Vec<String> {
    let mut used = HashSet::new();
    let mut columns = Vec::with_capacity(scale.len());
    for point in scale.points() {
        let slug = column_slug(&point.label);
        let mut name = format!("frac_{slug}");
        if slug.is_empty() || used.contains(&name) {
            name = format!("frac_p{}", point.index + 1);
        }
        while used.contains(&name) {
            name.push('_');
        }
        used.insert(name.clone());
        columns.push(name);
    }
    columns
}

/// Lower-case ASCII column suffix for a scale label.
pub fn column_slug(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut last_underscore = false;
    for ch in label.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_underscore = false;
        } else if !last_underscore && !out.is_empty() {
            out.push('_');
            last_underscore = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

fn sanitize(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

fn write_text(path: &Path, text: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        w.write_all(b"\n")?;
    }
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
