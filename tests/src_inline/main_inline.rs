use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_likert_main_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn parse(extra: &[&str]) -> RunArgs {
    let mut argv = vec!["kira-likert", "run", "--input", "data.tsv", "--out", "out"];
    argv.extend_from_slice(extra);
    match Cli::try_parse_from(argv).unwrap().command {
        Command::Run(args) => args,
    }
}

#[test]
fn test_parse_args_defaults() {
    let args = parse(&[]);
    assert_eq!(args.run_mode, RunMode::Standalone);
    assert_eq!(args.layout, LayoutKind::Both);
    assert_eq!(args.sort, QuestionOrder::Input);
    assert_eq!(args.on_error, ErrorPolicy::Fail);
    assert!(args.scale.is_none());
}

#[test]
fn test_parse_args_lists_and_enums() {
    let args = parse(&[
        "--scale",
        "Bad,Poor,Good,Great",
        "--palette",
        "#000000,#444444,#888888,#cccccc",
        "--questions",
        "Q2,Q1",
        "--layout",
        "offset",
        "--sort",
        "net",
        "--on-error",
        "skip",
        "--run-mode",
        "pipeline",
        "--scale-preset",
        "agree7",
        "--palette-preset",
        "puor",
    ]);
    assert_eq!(
        args.scale.as_deref(),
        Some(&["Bad", "Poor", "Good", "Great"].map(String::from)[..])
    );
    assert_eq!(args.palette.as_ref().map(Vec::len), Some(4));
    assert_eq!(args.questions, Some(vec!["Q2".to_string(), "Q1".to_string()]));
    assert_eq!(args.layout, LayoutKind::Offset);
    assert_eq!(args.sort, QuestionOrder::Net);
    assert_eq!(args.on_error, ErrorPolicy::Skip);
    assert_eq!(args.run_mode, RunMode::Pipeline);
    assert_eq!(args.scale_preset, Some(ScalePreset::Agree7));
    assert_eq!(args.palette_preset, Some(PalettePreset::PuOr));
}

#[test]
fn test_neutral_requires_scale() {
    let argv = [
        "kira-likert",
        "run",
        "--input",
        "a",
        "--out",
        "b",
        "--neutral",
        "N",
    ];
    assert!(Cli::try_parse_from(argv).is_err());
}

#[test]
fn test_scale_precedence() {
    let config = SurveyConfig {
        scale: Some(vec!["X".to_string(), "Y".to_string()]),
        ..SurveyConfig::default()
    };

    let from_cli = resolve_scale(&parse(&["--scale", "SD, D ,N,A,SA", "--neutral", "N"]), &config)
        .unwrap();
    assert_eq!(from_cli.labels(), vec!["SD", "D", "N", "A", "SA"]);
    assert_eq!(from_cli.midpoint(), Some(2));

    let from_config = resolve_scale(&parse(&["--scale-preset", "agree4"]), &config).unwrap();
    assert_eq!(from_config.labels(), vec!["X", "Y"]);

    let from_preset = resolve_scale(&parse(&["--scale-preset", "agree4"]), &SurveyConfig::default())
        .unwrap();
    assert_eq!(from_preset.len(), 4);

    let default = resolve_scale(&parse(&[]), &SurveyConfig::default()).unwrap();
    assert_eq!(default.len(), 5);
}

#[test]
fn test_palette_resolution() {
    let args = parse(&[]);
    let generated = resolve_palette(&args, &SurveyConfig::default(), 5).unwrap();
    assert_eq!(generated, PalettePreset::RdBu.build(5));

    let config = SurveyConfig {
        palette: Some(vec!["#000000".to_string(), "#ffffff".to_string()]),
        ..SurveyConfig::default()
    };
    let err = resolve_palette(&args, &config, 5).unwrap_err();
    assert_eq!(
        err,
        ReshapeError::PaletteMismatch {
            expected: 5,
            actual: 2
        }
    );
    assert!(resolve_palette(&args, &config, 2).is_ok());
}

#[test]
fn test_resolve_output_dir_pipeline() {
    let out = resolve_output_dir(Path::new("/tmp/out"), RunMode::Pipeline);
    assert_eq!(out, PathBuf::from("/tmp/out/kira-likert"));
}

#[test]
fn test_resolve_output_dir_standalone() {
    let out = resolve_output_dir(Path::new("/tmp/out"), RunMode::Standalone);
    assert_eq!(out, PathBuf::from("/tmp/out"));
}

#[test]
fn test_end_to_end_run() {
    let dir = make_temp_dir();
    let input = dir.join("survey.csv");
    fs::write(
        &input,
        "id,team,Q1,Q2\n\
         1,red,Agree,Disagree\n\
         2,blue,Strongly agree,NA\n\
         3,red,Disagree,Agree\n\
         4,blue,Agree,Strongly disagree\n",
    )
    .unwrap();
    let out = dir.join("out");
    let argv = [
        "kira-likert",
        "run",
        "--input",
        input.to_str().unwrap(),
        "--out",
        out.to_str().unwrap(),
        "--scale-preset",
        "agree4",
        "--id-column",
        "id",
        "--group-by",
        "team",
        "--sort",
        "net",
    ];
    let Command::Run(args) = Cli::try_parse_from(argv).unwrap().command;
    run_reshape(&args).unwrap();

    let aggregated = fs::read_to_string(out.join("aggregated.tsv")).unwrap();
    let labels = aggregated
        .lines()
        .skip(1)
        .map(|l| l.split('\t').next().unwrap().to_string())
        .collect::<Vec<_>>();
    assert_eq!(labels, vec!["Q1 [blue]", "Q1 [red]", "Q2 [red]", "Q2 [blue]"]);
    assert!(out.join("chart.json").exists());
    assert!(out.join("report.txt").exists());
}

#[test]
fn test_end_to_end_unknown_category_fails() {
    let dir = make_temp_dir();
    let input = dir.join("survey.tsv");
    fs::write(&input, "Q1\nAgree\nPerhaps\n").unwrap();
    let args = parse(&[]);
    let args = RunArgs {
        input,
        out: dir.join("out"),
        ..args
    };
    let err = run_reshape(&args).unwrap_err();
    assert!(err.contains("Perhaps"));
}
