//! Hierarchy file parser.
//!
//! Two layouts are accepted:
//! - Delimited: `employee,manager` per line, manager empty or omitted for the root
//! - Table: `| <employee_id> | <employee_name> | <manager_id> |` rows below a header row
//!
//! Blank lines and `#` comments are ignored in both.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument};

use orgchain_shared::{EmployeeRecord, InputConfig, InputFormat, OrgChainError, Result};

/// Cells per table row: id, name, manager id.
const TABLE_CELLS: usize = 3;

/// Matches markdown table separator rows such as `|----|:---:|---|`.
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|(\s*:?-+:?\s*\|)+$").expect("separator regex"));

/// Parse raw text into `(employee, manager)` pairs using the delimited format.
///
/// The manager is an empty string for the root.
pub fn parse_records(raw: &str) -> Result<Vec<(String, String)>> {
    let records = parse_delimited(raw, default_delimiter())?;
    Ok(records
        .into_iter()
        .map(|r| (r.id, r.manager.unwrap_or_default()))
        .collect())
}

/// Parse raw text into employee records according to `config`.
#[instrument(skip_all, fields(format = ?config.format, bytes = raw.len()))]
pub fn parse_employee_records(raw: &str, config: &InputConfig) -> Result<Vec<EmployeeRecord>> {
    let format = match config.format {
        InputFormat::Auto => detect_format(raw),
        other => other,
    };

    let records = match format {
        InputFormat::Table => parse_table(raw)?,
        _ => parse_delimited(raw, config.delimiter)?,
    };

    debug!(?format, records = records.len(), "parsed hierarchy records");
    Ok(records)
}

/// Guess the layout from the first meaningful line.
pub fn detect_format(raw: &str) -> InputFormat {
    let first = content_lines(raw).next();
    match first {
        Some((_, line)) if line.starts_with('|') => InputFormat::Table,
        _ => InputFormat::Delimited,
    }
}

// ---------------------------------------------------------------------------
// Layouts
// ---------------------------------------------------------------------------

fn parse_delimited(raw: &str, delimiter: char) -> Result<Vec<EmployeeRecord>> {
    let mut records = Vec::new();

    for (line_no, line) in content_lines(raw) {
        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();
        if fields.len() > 2 {
            return Err(OrgChainError::parse(
                line_no,
                format!(
                    "expected 'employee{delimiter}manager', found {} fields",
                    fields.len()
                ),
            ));
        }

        let employee = fields[0];
        if employee.is_empty() {
            return Err(OrgChainError::parse(line_no, "employee name is empty"));
        }

        let manager = fields.get(1).copied().filter(|m| !m.is_empty());
        records.push(EmployeeRecord::named(employee, manager.map(String::from)));
    }

    Ok(records)
}

fn parse_table(raw: &str) -> Result<Vec<EmployeeRecord>> {
    let mut records = Vec::new();

    // The first row is the column header.
    for (line_no, line) in content_lines(raw).skip(1) {
        if SEPARATOR_RE.is_match(line) {
            continue;
        }

        let cells = table_cells(line).ok_or_else(|| {
            OrgChainError::parse(line_no, "table rows must start and end with '|'")
        })?;
        if cells.len() != TABLE_CELLS {
            return Err(OrgChainError::parse(
                line_no,
                format!("expected {TABLE_CELLS} cells, found {}", cells.len()),
            ));
        }

        let (id, name, manager) = (cells[0], cells[1], cells[2]);
        if id.is_empty() {
            return Err(OrgChainError::parse(line_no, "employee id is empty"));
        }

        records.push(EmployeeRecord {
            id: id.to_string(),
            name: name.to_string(),
            manager: (!manager.is_empty()).then(|| manager.to_string()),
        });
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn default_delimiter() -> char {
    InputConfig::default().delimiter
}

/// Trimmed, non-blank, non-comment lines with their 1-based line numbers.
fn content_lines(raw: &str) -> impl Iterator<Item = (usize, &str)> {
    raw.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Split `| a | b | c |` into trimmed cells.
fn table_cells(line: &str) -> Option<Vec<&str>> {
    let inner = line.strip_prefix('|')?.strip_suffix('|')?;
    Some(inner.split('|').map(str::trim).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_config() -> InputConfig {
        InputConfig {
            format: InputFormat::Table,
            ..InputConfig::default()
        }
    }

    #[test]
    fn parse_pairs_with_root() {
        let pairs = parse_records("Batman,CEO\nSuperTed, CEO \nCEO,\n").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("Batman".to_string(), "CEO".to_string()),
                ("SuperTed".to_string(), "CEO".to_string()),
                ("CEO".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn omitted_manager_is_root() {
        let pairs = parse_records("# org chart\n\nCEO\nCTO,CEO\n").unwrap();
        assert_eq!(pairs[0], ("CEO".to_string(), String::new()));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn too_many_fields_reports_line() {
        let err = parse_records("A,B\n\nB,C,D\n").unwrap_err();
        match err {
            OrgChainError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn empty_employee_fails() {
        assert!(parse_records(",CEO").is_err());
    }

    #[test]
    fn custom_delimiter() {
        let config = InputConfig {
            format: InputFormat::Delimited,
            delimiter: ';',
        };
        let records = parse_employee_records("Gonzo the Great;Dangermouse\n", &config).unwrap();
        assert_eq!(records[0].id, "Gonzo the Great");
        assert_eq!(records[0].manager.as_deref(), Some("Dangermouse"));
    }

    #[test]
    fn parse_table_row() {
        let raw = "| Employee ID | Name | Manager ID |\n| 16      | Batman  |      6|\n";
        let records = parse_employee_records(raw, &table_config()).unwrap();
        assert_eq!(
            records,
            vec![EmployeeRecord {
                id: "16".into(),
                name: "Batman".into(),
                manager: Some("6".into()),
            }]
        );
    }

    #[test]
    fn table_skips_separator_and_marks_root() {
        let raw = "| id | name | manager |\n|----|:----:|---|\n| 1 | Dangermouse | |\n";
        let records = parse_employee_records(raw, &table_config()).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].manager.is_none());
    }

    #[test]
    fn table_wrong_cell_count_fails() {
        let raw = "| id | name | manager |\n| 1 | Dangermouse |\n";
        let err = parse_employee_records(raw, &table_config()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
        assert!(err.to_string().contains("expected 3 cells, found 2"));
    }

    #[test]
    fn auto_detects_layout() {
        assert_eq!(detect_format("\n| id | name | manager |\n"), InputFormat::Table);
        assert_eq!(detect_format("A,B\n"), InputFormat::Delimited);
        assert_eq!(detect_format(""), InputFormat::Delimited);
    }

    #[test]
    fn parse_superhero_fixture() {
        let content = std::fs::read_to_string("../../../fixtures/hierarchy/superheroes.txt")
            .expect("read fixture");
        let records = parse_employee_records(&content, &InputConfig::default()).unwrap();
        assert_eq!(records.len(), 9);
        assert_eq!(records[0].name, "Dangermouse");
        assert!(records[0].manager.is_none());
    }
}
