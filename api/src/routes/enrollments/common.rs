//! Roster CSV parsing for `POST /enrollments/import`.
//!
//! Columns: `national_id,email,name[,last_name]`. A leading header row and a
//! UTF-8 BOM are ignored; blank lines are skipped.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    /// 1-based line in the uploaded file.
    pub line: usize,
    pub national_id: String,
    pub email: String,
    pub name: String,
}

/// Result of one import.
#[derive(Debug, Serialize, Default, PartialEq)]
pub struct ImportSummary {
    /// Student accounts created.
    pub created: u64,
    /// New enrollments.
    pub enrolled: u64,
    /// Rows whose student was already enrolled.
    pub skipped: u64,
    pub errors: Vec<String>,
}

/// Splits one CSV record, honouring double-quoted fields with `""` escapes.
pub fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' | ';' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);

    fields.into_iter().map(|f| f.trim().to_owned()).collect()
}

fn is_header(fields: &[String]) -> bool {
    fields
        .first()
        .map(|f| {
            let f = f.to_lowercase();
            f.contains("national") || f.contains("cedula") || f == "id"
        })
        .unwrap_or(false)
        || fields.get(1).is_some_and(|f| f.eq_ignore_ascii_case("email"))
}

/// Parses the uploaded roster. Rows that cannot be used are returned as
/// error messages instead of aborting the whole file.
pub fn parse_roster(input: &str) -> (Vec<RosterRow>, Vec<String>) {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut rows = Vec::new();
    let mut errors = Vec::new();
    let mut first = true;

    for (idx, raw) in input.lines().enumerate() {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let fields = split_record(raw);
        if first {
            first = false;
            if is_header(&fields) {
                continue;
            }
        }

        let national_id = fields.first().cloned().unwrap_or_default();
        let email = fields.get(1).cloned().unwrap_or_default();
        if national_id.is_empty() || email.is_empty() {
            errors.push(format!("line {line}: national_id and email are required"));
            continue;
        }
        if !email.contains('@') {
            errors.push(format!("line {line}: invalid email '{email}'"));
            continue;
        }

        let name = fields
            .iter()
            .skip(2)
            .take(2)
            .filter(|p| !p.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            errors.push(format!("line {line}: name is required"));
            continue;
        }

        rows.push(RosterRow {
            line,
            national_id,
            email: email.to_lowercase(),
            name,
        });
    }

    (rows, errors)
}
