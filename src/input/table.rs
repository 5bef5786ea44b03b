use std::io::BufRead;

use crate::input::reader::split_record;
use crate::input::{InputError, is_missing};

#[derive(Debug, Clone, Default)]
pub struct TableOptions<'a> {
    pub id_column: Option<&'a str>,
    pub group_by: Option<&'a str>,
    pub missing_tokens: &'a [String],
}

/// One respondent; `answers` is aligned with `SurveyTable::questions`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub line: usize,
    pub respondent: Option<String>,
    pub group: Option<String>,
    pub answers: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyTable {
    pub questions: Vec<String>,
    pub rows: Vec<RawResponse>,
}

impl SurveyTable {
    pub fn question_index(&self, question: &str) -> Option<usize> {
        self.questions.iter().position(|q| q == question)
    }
}

pub fn parse_table<R: BufRead>(
    mut reader: R,
    delim: char,
    options: &TableOptions<'_>,
) -> Result<SurveyTable, InputError> {
    let mut buf = String::new();
    let mut line_no = 0usize;

    let header = loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            return Err(InputError::Parse("response table is empty".to_string()));
        }
        line_no += 1;
        let line = buf.trim_end_matches(['\r', '\n']).trim_start_matches('\u{feff}');
        if line.trim().is_empty() {
            continue;
        }
        break split_record(line, delim)
            .map_err(|e| InputError::Parse(format!("header (line {line_no}): {e}")))?
            .into_iter()
            .map(|s| s.trim().to_string())
            .collect::<Vec<_>>();
    };

    let find_column = |name: &str, flag: &str| {
        header.iter().position(|h| h == name).ok_or_else(|| {
            InputError::MissingInput(format!("{flag} column {name} not found in header"))
        })
    };
    let id_col = options
        .id_column
        .map(|name| find_column(name, "--id-column"))
        .transpose()?;
    let group_col = options
        .group_by
        .map(|name| find_column(name, "--group-by"))
        .transpose()?;

    let mut question_cols = Vec::new();
    let mut questions = Vec::new();
    for (idx, name) in header.iter().enumerate() {
        if Some(idx) == id_col || Some(idx) == group_col {
            continue;
        }
        if name.is_empty() {
            return Err(InputError::Parse(format!(
                "header column {} has no name",
                idx + 1
            )));
        }
        if questions.contains(name) {
            return Err(InputError::Parse(format!("duplicate column name: {name}")));
        }
        question_cols.push(idx);
        questions.push(name.clone());
    }
    if questions.is_empty() {
        return Err(InputError::Parse(
            "response table has no question columns".to_string(),
        ));
    }

    let pick = |fields: &[String], col: usize| {
        fields
            .get(col)
            .map(|s| s.trim())
            .filter(|s| !is_missing(s, options.missing_tokens))
            .map(str::to_string)
    };

    let mut rows = Vec::new();
    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_record(line, delim)
            .map_err(|e| InputError::Parse(format!("line {line_no}: {e}")))?;
        if fields.len() > header.len() {
            return Err(InputError::Parse(format!(
                "line {} has {} fields, header has {}",
                line_no,
                fields.len(),
                header.len()
            )));
        }
        if fields.len() < header.len() {
            tracing::warn!(
                line = line_no,
                fields = fields.len(),
                expected = header.len(),
                "short row; padding with missing values"
            );
        }

        rows.push(RawResponse {
            line: line_no,
            respondent: id_col.and_then(|c| pick(&fields, c)),
            group: group_col.and_then(|c| pick(&fields, c)),
            answers: question_cols.iter().map(|&c| pick(&fields, c)).collect(),
        });
    }

    if rows.is_empty() {
        return Err(InputError::Parse(
            "response table has a header but no rows".to_string(),
        ));
    }

    Ok(SurveyTable { questions, rows })
}
