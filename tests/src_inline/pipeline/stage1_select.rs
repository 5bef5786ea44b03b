use super::*;
use crate::input::table::RawResponse;

fn table() -> SurveyTable {
    let row = |line: usize, group: Option<&str>, answers: &[Option<&str>]| RawResponse {
        line,
        respondent: None,
        group: group.map(str::to_string),
        answers: answers.iter().map(|a| a.map(str::to_string)).collect(),
    };
    SurveyTable {
        questions: vec!["Q1".to_string(), "Q2".to_string(), "Q3".to_string()],
        rows: vec![
            row(2, Some("B"), &[Some("A"), None, Some("D")]),
            row(3, Some("A"), &[Some("D"), Some("A"), None]),
            row(4, None, &[None, Some("SA"), Some("SD")]),
        ],
    }
}

#[test]
fn test_all_questions_in_header_order() {
    let t = table();
    let out = run_stage1(&t, None, false).unwrap();
    let labels = out.columns.iter().map(|c| c.label.as_str()).collect::<Vec<_>>();
    assert_eq!(labels, vec!["Q1", "Q2", "Q3"]);
    assert!(out.groups.is_empty());
    assert_eq!(out.columns[0].cells.len(), 3);
    assert_eq!(
        out.columns[0].cells[1],
        ResponseCell {
            line: 3,
            value: Some("D")
        }
    );
}

#[test]
fn test_selected_questions_keep_requested_order() {
    let t = table();
    let wanted = vec!["Q3".to_string(), "Q1".to_string(), "Q3".to_string()];
    let out = run_stage1(&t, Some(wanted.as_slice()), false).unwrap();
    let labels = out.columns.iter().map(|c| c.label.as_str()).collect::<Vec<_>>();
    assert_eq!(labels, vec!["Q3", "Q1"]);
}

#[test]
fn test_unknown_question_rejected() {
    let t = table();
    let wanted = vec!["Q9".to_string()];
    let err = run_stage1(&t, Some(wanted.as_slice()), false).unwrap_err();
    assert!(matches!(err, InputError::MissingInput(_)));
}

#[test]
fn test_grouping_labels_and_order() {
    let t = table();
    let wanted = vec!["Q1".to_string()];
    let out = run_stage1(&t, Some(wanted.as_slice()), true).unwrap();
    assert_eq!(out.groups, vec!["(missing)", "A", "B"]);
    let labels = out.columns.iter().map(|c| c.label.as_str()).collect::<Vec<_>>();
    assert_eq!(labels, vec!["Q1 [(missing)]", "Q1 [A]", "Q1 [B]"]);
    assert_eq!(out.columns[2].cells.len(), 1);
    assert_eq!(out.columns[2].cells[0].value, Some("A"));
    assert_eq!(out.columns[2].question, "Q1");
}
