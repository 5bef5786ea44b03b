use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::input::InputError;

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Field delimiter implied by the file name; `.csv` and `.csv.gz` are comma
/// separated, everything else is tab separated.
pub fn delimiter_for(path: &Path) -> char {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    if name.ends_with(".csv") { ',' } else { '\t' }
}

/// Splits one record. Double-quoted fields may contain the delimiter and
/// `""` stands for a literal quote. Only whitespace may follow a closing
/// quote before the next delimiter.
pub fn split_record(line: &str, delim: char) -> Result<Vec<String>, String> {
    let mut fields = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    let mut closed = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    cur.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                    closed = true;
                }
            } else {
                cur.push(ch);
            }
        } else if ch == delim {
            fields.push(std::mem::take(&mut cur));
            closed = false;
        } else if closed {
            if !ch.is_whitespace() {
                return Err(format!("unexpected {ch:?} after closing quote"));
            }
        } else if ch == '"' && cur.trim().is_empty() {
            cur.clear();
            in_quotes = true;
        } else {
            cur.push(ch);
        }
    }
    if in_quotes {
        return Err("unterminated quoted field".to_string());
    }
    fields.push(cur);
    Ok(fields)
}
