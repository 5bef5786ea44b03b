mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::input::{SurveyConfig, TableOptions, load_config, load_table};
use crate::model::ReshapeError;
use crate::model::palette::{Palette, PalettePreset};
use crate::model::scale::{LikertScale, ScalePreset};
use crate::pipeline::stage1_select::run_stage1;
use crate::pipeline::stage4_layout::{LayoutKind, build_layouts};
use crate::pipeline::stage5_report::{RunMode, Stage5Input, write_reports};
use crate::pipeline::{ErrorPolicy, QuestionOrder, reshape};

const TOOL_NAME: &str = "kira-likert";

#[derive(Debug, Parser)]
#[command(name = "kira-likert", version, about = "Diverging stacked bar series from Likert survey responses")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Reshape a response table and write chart-ready outputs
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    /// Response table (.tsv, .csv, optionally .gz)
    #[arg(long)]
    input: PathBuf,

    /// Output directory
    #[arg(long)]
    out: PathBuf,

    /// JSON survey config (scale, neutral, palette, questions, missing_tokens)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    scale_preset: Option<ScalePreset>,

    /// Comma-separated scale labels, most negative first
    #[arg(long, value_delimiter = ',')]
    scale: Option<Vec<String>>,

    /// Neutral label of --scale
    #[arg(long, requires = "scale")]
    neutral: Vec<String>,

    #[arg(long, value_enum)]
    palette_preset: Option<PalettePreset>,

    /// Comma-separated #rrggbb colors, one per scale label
    #[arg(long, value_delimiter = ',')]
    palette: Option<Vec<String>>,

    /// Comma-separated question columns to chart, in order
    #[arg(long, value_delimiter = ',')]
    questions: Option<Vec<String>>,

    #[arg(long)]
    id_column: Option<String>,

    #[arg(long)]
    group_by: Option<String>,

    #[arg(long, value_enum, default_value_t = LayoutKind::Both)]
    layout: LayoutKind,

    #[arg(long, value_enum, default_value_t = QuestionOrder::Input)]
    sort: QuestionOrder,

    #[arg(long, value_enum, default_value_t = ErrorPolicy::Fail)]
    on_error: ErrorPolicy,

    #[arg(long, value_enum, default_value_t = RunMode::Standalone)]
    run_mode: RunMode,
}

fn main() {
    logging::init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            std::process::exit(code);
        }
    };
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Run(args) => run_reshape(&args),
    }
}

fn run_reshape(args: &RunArgs) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => load_config(path).map_err(|e| e.to_string())?,
        None => SurveyConfig::default(),
    };

    let scale = resolve_scale(args, &config).map_err(|e| e.to_string())?;
    let palette = resolve_palette(args, &config, scale.len()).map_err(|e| e.to_string())?;
    let scale_desc = scale.labels().join(" < ");
    let palette_desc = palette.to_hex().join(" ");
    tracing::info!(scale = %scale_desc, palette = %palette_desc, "scale resolved");

    let options = TableOptions {
        id_column: args.id_column.as_deref(),
        group_by: args.group_by.as_deref(),
        missing_tokens: &config.missing_tokens,
    };
    let table = load_table(&args.input, &options).map_err(|e| e.to_string())?;

    let questions = args.questions.as_deref().or(config.questions.as_deref());
    let selected =
        run_stage1(&table, questions, args.group_by.is_some()).map_err(|e| e.to_string())?;

    let reshaped = reshape(&selected, &scale, &palette, args.on_error, args.sort)
        .map_err(|e| e.to_string())?;
    let layouts = build_layouts(
        &reshaped.aggregated,
        &reshaped.signed,
        &palette,
        &scale,
        args.layout,
    );

    let out_dir = resolve_output_dir(&args.out, args.run_mode);
    let input = Stage5Input {
        reshaped: &reshaped,
        layouts: &layouts,
        scale: &scale,
        palette: &palette,
        groups: &selected.groups,
        layout_name: args.layout.name(),
        input_name: args.input.display().to_string(),
        n_respondents: table.rows.len(),
        tool_name: TOOL_NAME.to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        run_mode: args.run_mode,
    };
    write_reports(&input, &out_dir).map_err(|e| e.to_string())?;

    Ok(())
}

fn resolve_scale(args: &RunArgs, config: &SurveyConfig) -> Result<LikertScale, ReshapeError> {
    if let Some(labels) = &args.scale {
        return LikertScale::new(trimmed(labels), &trimmed(&args.neutral));
    }
    if let Some(labels) = &config.scale {
        return LikertScale::new(trimmed(labels), &trimmed(&config.neutral));
    }
    args.scale_preset.unwrap_or(ScalePreset::Agree5).build()
}

fn resolve_palette(
    args: &RunArgs,
    config: &SurveyConfig,
    n_points: usize,
) -> Result<Palette, ReshapeError> {
    let palette = if let Some(colors) = &args.palette {
        Palette::from_hex(colors)?
    } else if let Some(colors) = &config.palette {
        Palette::from_hex(colors)?
    } else {
        args.palette_preset
            .unwrap_or(PalettePreset::RdBu)
            .build(n_points)
    };
    palette.ensure_len(n_points)?;
    Ok(palette)
}

fn trimmed(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.trim().to_string()).collect()
}

fn resolve_output_dir(base: &Path, run_mode: RunMode) -> PathBuf {
    match run_mode {
        RunMode::Standalone => base.to_path_buf(),
        RunMode::Pipeline => base.join(TOOL_NAME),
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
