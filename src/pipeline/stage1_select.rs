use std::collections::BTreeMap;

use crate::input::{InputError, SurveyTable};

pub const MISSING_GROUP: &str = "(missing)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseCell<'a> {
    pub line: usize,
    pub value: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionColumn<'a> {
    pub label: String,
    pub question: &'a str,
    pub group: Option<String>,
    pub cells: Vec<ResponseCell<'a>>,
}

#[derive(Debug, Clone)]
pub struct Stage1Output<'a> {
    pub columns: Vec<QuestionColumn<'a>>,
    pub groups: Vec<String>,
}

pub fn run_stage1<'a>(
    table: &'a SurveyTable,
    questions: Option<&[String]>,
    grouped: bool,
) -> Result<Stage1Output<'a>, InputError> {
    let selected = match questions {
        Some(list) if !list.is_empty() => {
            let mut out = Vec::with_capacity(list.len());
            for q in list {
                let idx = table.question_index(q).ok_or_else(|| {
                    InputError::MissingInput(format!("question {q} not found in response table"))
                })?;
                if out.contains(&idx) {
                    tracing::warn!(question = %q, "question listed twice; keeping first occurrence");
                    continue;
                }
                out.push(idx);
            }
            out
        }
        _ => (0..table.questions.len()).collect(),
    };

    let mut by_group: BTreeMap<Option<String>, Vec<usize>> = BTreeMap::new();
    for (row_idx, row) in table.rows.iter().enumerate() {
        let key = if grouped {
            Some(row.group.clone().unwrap_or_else(|| MISSING_GROUP.to_string()))
        } else {
            None
        };
        by_group.entry(key).or_default().push(row_idx);
    }

    let groups = by_group.keys().flatten().cloned().collect::<Vec<_>>();

    let mut columns = Vec::with_capacity(selected.len() * by_group.len());
    for &q_idx in &selected {
        let question = table.questions[q_idx].as_str();
        for (group, row_ids) in &by_group {
            let cells = row_ids
                .iter()
                .map(|&r| {
                    let row = &table.rows[r];
                    ResponseCell {
                        line: row.line,
                        value: row.answers.get(q_idx).and_then(|v| v.as_deref()),
                    }
                })
                .collect();
            let label = match group {
                Some(g) => format!("{question} [{g}]"),
                None => question.to_string(),
            };
            columns.push(QuestionColumn {
                label,
                question,
                group: group.clone(),
                cells,
            });
        }
    }

    tracing::info!(
        questions = selected.len(),
        groups = groups.len(),
        series = columns.len(),
        "questions selected"
    );

    Ok(Stage1Output { columns, groups })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_select.rs"]
mod tests;
