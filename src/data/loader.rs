use std::path::Path;

use anyhow::{Context, Result};

use super::model::{AuditDataset, AuditRecord, IdSource};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Result of importing one file into the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported(usize),
    NoValidRows,
}

impl ImportOutcome {
    /// Message shown to the user after an import.
    pub fn message(&self) -> String {
        match self {
            ImportOutcome::Imported(n) => format!("Successfully imported {n} records!"),
            ImportOutcome::NoValidRows => "No valid data found.".to_string(),
        }
    }
}

/// Read an exported audit sheet into memory.
pub fn read_sheet(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("reading import file {}", path.display()))
}

/// Parse `text` and append the accepted rows to `dataset`. The header line
/// is skipped without being checked against the schema.
///
/// The dataset is untouched when nothing was accepted.
pub fn import_text(dataset: &mut AuditDataset, text: &str) -> ImportOutcome {
    let records = parse_audit_csv(text, &mut dataset.id_source());
    commit(dataset, records)
}

fn commit(dataset: &mut AuditDataset, records: Vec<AuditRecord>) -> ImportOutcome {
    if records.is_empty() {
        log::warn!("Import produced no valid rows");
        return ImportOutcome::NoValidRows;
    }
    let n = records.len();
    dataset.append(records);
    log::info!("Imported {n} audit records ({} total)", dataset.len());
    ImportOutcome::Imported(n)
}

// ---------------------------------------------------------------------------
// Row parser
// ---------------------------------------------------------------------------

/// Turn comma-delimited text into audit records.
///
/// * Lines are split on `\r\n` or `\n`; the first one is the header.
/// * Blank lines and rows whose cells are all empty are dropped.
/// * Missing trailing cells are empty, extra cells are ignored.
/// * Each accepted row takes the next id from `ids`.
pub fn parse_audit_csv(text: &str, ids: &mut IdSource<'_>) -> Vec<AuditRecord> {
    let mut records = Vec::new();

    for (line_no, line) in text.split('\n').enumerate().skip(1) {
        let line = line.strip_suffix('\r').unwrap_or(line).trim();
        if line.is_empty() {
            continue;
        }

        let cells: Vec<String> = split_quoted(line).into_iter().map(clean_cell).collect();
        if cells.iter().all(|c| c.is_empty()) {
            log::debug!("Skipping line {}: every cell is empty", line_no + 1);
            continue;
        }

        records.push(AuditRecord::from_cells(ids.next_id(), &cells));
    }

    records
}

/// Split on commas that sit outside double quotes. A comma counts as a
/// delimiter when the number of `"` characters after it on the line is even.
fn split_quoted(line: &str) -> Vec<&str> {
    let total_quotes = line.bytes().filter(|&b| b == b'"').count();
    let mut seen_quotes = 0;
    let mut start = 0;
    let mut cells = Vec::new();

    for (idx, b) in line.bytes().enumerate() {
        match b {
            b'"' => seen_quotes += 1,
            b',' if (total_quotes - seen_quotes) % 2 == 0 => {
                cells.push(&line[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    cells.push(&line[start..]);
    cells
}

/// Drop one wrapping quote on each side, then trim.
fn clean_cell(cell: &str) -> String {
    let cell = cell.strip_prefix('"').unwrap_or(cell);
    let cell = cell.strip_suffix('"').unwrap_or(cell);
    cell.trim().to_string()
}
