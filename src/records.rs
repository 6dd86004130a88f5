//! Plain-text student records.
//!
//! Input is one student per line:
//! `id,gender,language,sva,svast,supported,flagged,preferred`, where the
//! last field is a list of ids that may be bracketed and may itself contain
//! commas. The export writes the same shape grouped under `Class <name>:`
//! headers. Languages are written with their English label whatever label
//! they were read with, so `Tyska` comes back out as `German`.

use crate::data::{ClassRoster, Student, StudentId, parse_language};
use itertools::Itertools;
use thiserror::Error;

const FIELD_COUNT: usize = 8;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("line {line}: expected 8 fields, found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: '{value}' is not a valid {field}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: '{value}' is not a valid {field} flag (expected 0 or 1)")]
    InvalidFlag {
        line: usize,
        field: &'static str,
        value: String,
    },
    #[error("line {line}: {reason}")]
    InvalidLanguage { line: usize, reason: String },
}

/// Parses every record line in `text`. Blank lines are skipped and a line
/// holding just `q` ends the input.
pub fn parse_records(text: &str) -> Result<Vec<Student>, RecordError> {
    text.lines()
        .enumerate()
        .map(|(index, raw)| (index + 1, raw.trim()))
        .take_while(|(_, raw)| !raw.eq_ignore_ascii_case("q"))
        .filter(|(_, raw)| !raw.is_empty())
        .map(|(line, raw)| parse_record(line, raw))
        .collect()
}

pub fn parse_record(line: usize, raw: &str) -> Result<Student, RecordError> {
    let fields: Vec<&str> = raw.splitn(FIELD_COUNT, ',').map(str::trim).collect();
    let &[id, gender, language, sva, svast, supported, flagged, preferred] = fields.as_slice() else {
        return Err(RecordError::FieldCount {
            line,
            found: fields.len(),
        });
    };

    let id = parse_id(line, "student id", id)?;
    let language = parse_language(language)
        .map_err(|reason| RecordError::InvalidLanguage { line, reason })?;
    let preferred = preferred
        .split(',')
        .map(|part| part.trim_matches(|c: char| c == '[' || c == ']' || c.is_whitespace()))
        .filter(|part| !part.is_empty())
        .map(|part| parse_id(line, "preferred id", part))
        .collect::<Result<Vec<StudentId>, RecordError>>()?;

    Ok(Student {
        id,
        gender: gender.to_string(),
        language,
        sva: parse_flag(line, "sva", sva)?,
        svast: parse_flag(line, "svast", svast)?,
        supported: parse_flag(line, "supported", supported)?,
        flagged: parse_flag(line, "flagged", flagged)?,
        preferred,
    })
}

fn parse_id(line: usize, field: &'static str, value: &str) -> Result<StudentId, RecordError> {
    value.parse().map_err(|_| RecordError::InvalidNumber {
        line,
        field,
        value: value.to_string(),
    })
}

fn parse_flag(line: usize, field: &'static str, value: &str) -> Result<bool, RecordError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(RecordError::InvalidFlag {
            line,
            field,
            value: value.to_string(),
        }),
    }
}

/// One export line for `student`.
pub fn format_record(student: &Student) -> String {
    let flag = |set: bool| if set { 1 } else { 0 };
    format!(
        "{},{},{},{},{},{},{},[{}]",
        student.id,
        student.gender,
        student.language.map(|l| l.label()).unwrap_or_default(),
        flag(student.sva),
        flag(student.svast),
        flag(student.supported),
        flag(student.flagged),
        student.preferred.iter().join(", ")
    )
}

/// Renders the class export: a `Class <name>:` header per class followed by
/// its members in placement order.
pub fn export(classes: &[ClassRoster]) -> String {
    let mut out = String::new();
    for class in classes {
        out.push_str(&format!("Class {}:\n", class.name));
        for student in &class.students {
            out.push_str(&format_record(student));
            out.push('\n');
        }
    }
    out
}
