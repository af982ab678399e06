use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{AuditRecord, Column};

/// Write `records` as a CSV sheet with the standard 21 headers, in the same
/// layout the importer reads back.
pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a AuditRecord>,
{
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(Column::ALL.iter().map(|c| c.header()))
        .context("writing CSV header")?;

    let mut rows = 0;
    for record in records {
        out.write_record(record.cells())
            .with_context(|| format!("writing record {}", record.id))?;
        rows += 1;
    }
    out.flush().context("flushing CSV output")?;
    Ok(rows)
}

pub fn save_csv<'a, I>(path: &Path, records: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a AuditRecord>,
{
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let rows = write_csv(file, records)?;
    log::info!("Exported {rows} audit records to {}", path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_audit_csv;
    use crate::data::model::AuditDataset;
    use pretty_assertions::assert_eq;

    #[test]
    fn export_reimports_to_the_same_cells() {
        let mut source = AuditDataset::seeded();
        let mut second = source.records()[1].clone();
        second.outlet_name = "D Mart, Inc".into();
        source.append(vec![second]);

        let mut buf = Vec::new();
        let rows = write_csv(&mut buf, source.records()).unwrap();
        assert_eq!(rows, 3);

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("City,Zone,S No.,Outlet Name"));

        let mut target = AuditDataset::default();
        let back = parse_audit_csv(&text, &mut target.id_source());
        let cells: Vec<Vec<String>> = back.iter().map(|r| r.cells()).collect();
        let expected: Vec<Vec<String>> = source.records().iter().map(|r| r.cells()).collect();
        assert_eq!(cells, expected);
    }
}
