use std::fmt;

use serde::{Deserialize, Serialize};

use super::normalize;
use crate::config::ConfigError;

// ---------------------------------------------------------------------------
// Column – the fixed audit sheet schema
// ---------------------------------------------------------------------------

/// One column of the market audit sheet, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Column {
    City,
    Zone,
    SerialNo,
    OutletName,
    Location,
    SurveyDate,
    Brand,
    Sku,
    Category,
    BusinessUnit,
    Unit,
    BatchNo,
    MfgDate,
    ExpDate,
    UnitName,
    MfgType,
    SampleChecked,
    Defects,
    DefectType,
    Freshness,
    DefectSource,
}

impl Column {
    /// Every column in the order it appears in an import file.
    pub const ALL: [Column; 21] = [
        Column::City,
        Column::Zone,
        Column::SerialNo,
        Column::OutletName,
        Column::Location,
        Column::SurveyDate,
        Column::Brand,
        Column::Sku,
        Column::Category,
        Column::BusinessUnit,
        Column::Unit,
        Column::BatchNo,
        Column::MfgDate,
        Column::ExpDate,
        Column::UnitName,
        Column::MfgType,
        Column::SampleChecked,
        Column::Defects,
        Column::DefectType,
        Column::Freshness,
        Column::DefectSource,
    ];

    /// Header text as written in the audit spreadsheet.
    pub fn header(self) -> &'static str {
        match self {
            Column::City => "City",
            Column::Zone => "Zone",
            Column::SerialNo => "S No.",
            Column::OutletName => "Outlet Name",
            Column::Location => "Location",
            Column::SurveyDate => "Survey Date",
            Column::Brand => "Brand",
            Column::Sku => "SKU",
            Column::Category => "Category",
            Column::BusinessUnit => "BU",
            Column::Unit => "Unit",
            Column::BatchNo => "Batch No.",
            Column::MfgDate => "MFG Date",
            Column::ExpDate => "Exp. Date",
            Column::UnitName => "Unit Name",
            Column::MfgType => "MFG Type",
            Column::SampleChecked => "Sample Checked",
            Column::Defects => "Defect (Cr.+Ma.)",
            Column::DefectType => "Defect Type",
            Column::Freshness => "Freshness",
            Column::DefectSource => "Defect generation from",
        }
    }

    pub fn from_header(header: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.header() == header)
    }

    /// Columns coerced to numbers at import time.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Column::Sku | Column::SampleChecked | Column::Defects | Column::Freshness
        )
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl TryFrom<String> for Column {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Column::from_header(&value).ok_or(ConfigError::UnknownColumn(value))
    }
}

impl From<Column> for String {
    fn from(column: Column) -> Self {
        column.header().to_string()
    }
}

// ---------------------------------------------------------------------------
// FieldValue – a borrowed view of one cell
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl FieldValue<'_> {
    /// Empty text or a zero number: the values a multi-select never offers.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(n) => *n == 0.0,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => normalize::to_number(s),
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{n}"),
        }
    }
}

// ---------------------------------------------------------------------------
// AuditRecord – one row of the audit sheet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single audited sample line. Every schema column is always present;
/// missing input cells are stored as empty text or `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditRecord {
    pub id: RecordId,
    pub city: String,
    pub zone: String,
    pub serial_no: String,
    pub outlet_name: String,
    pub location: String,
    pub survey_date: String,
    pub brand: String,
    pub sku: f64,
    pub category: String,
    pub business_unit: String,
    pub unit: String,
    pub batch_no: String,
    pub mfg_date: String,
    pub exp_date: String,
    pub unit_name: String,
    pub mfg_type: String,
    pub sample_checked: f64,
    pub defects: f64,
    pub defect_type: String,
    pub freshness: f64,
    pub defect_source: String,
}

impl AuditRecord {
    /// Build a record from raw cells in schema order. Cells beyond the
    /// schema are ignored, missing trailing cells become empty.
    pub fn from_cells<S: AsRef<str>>(id: RecordId, cells: &[S]) -> Self {
        let mut record = AuditRecord {
            id,
            ..Default::default()
        };
        for (idx, column) in Column::ALL.into_iter().enumerate() {
            let raw = cells.get(idx).map(|c| c.as_ref()).unwrap_or("");
            record.set(column, raw);
        }
        record
    }

    pub fn value(&self, column: Column) -> FieldValue<'_> {
        use FieldValue::{Number, Text};
        match column {
            Column::City => Text(&self.city),
            Column::Zone => Text(&self.zone),
            Column::SerialNo => Text(&self.serial_no),
            Column::OutletName => Text(&self.outlet_name),
            Column::Location => Text(&self.location),
            Column::SurveyDate => Text(&self.survey_date),
            Column::Brand => Text(&self.brand),
            Column::Sku => Number(self.sku),
            Column::Category => Text(&self.category),
            Column::BusinessUnit => Text(&self.business_unit),
            Column::Unit => Text(&self.unit),
            Column::BatchNo => Text(&self.batch_no),
            Column::MfgDate => Text(&self.mfg_date),
            Column::ExpDate => Text(&self.exp_date),
            Column::UnitName => Text(&self.unit_name),
            Column::MfgType => Text(&self.mfg_type),
            Column::SampleChecked => Number(self.sample_checked),
            Column::Defects => Number(self.defects),
            Column::DefectType => Text(&self.defect_type),
            Column::Freshness => Number(self.freshness),
            Column::DefectSource => Text(&self.defect_source),
        }
    }

    /// Store a raw cell. Numeric columns go through the number normalizer,
    /// every other column through the text one.
    pub fn set(&mut self, column: Column, raw: &str) {
        if column.is_numeric() {
            if let Some(slot) = self.number_mut(column) {
                *slot = normalize::to_number(raw);
            }
        } else if let Some(slot) = self.text_mut(column) {
            *slot = normalize::clean_text(raw);
        }
    }

    fn number_mut(&mut self, column: Column) -> Option<&mut f64> {
        match column {
            Column::Sku => Some(&mut self.sku),
            Column::SampleChecked => Some(&mut self.sample_checked),
            Column::Defects => Some(&mut self.defects),
            Column::Freshness => Some(&mut self.freshness),
            _ => None,
        }
    }

    fn text_mut(&mut self, column: Column) -> Option<&mut String> {
        let slot = match column {
            Column::City => &mut self.city,
            Column::Zone => &mut self.zone,
            Column::SerialNo => &mut self.serial_no,
            Column::OutletName => &mut self.outlet_name,
            Column::Location => &mut self.location,
            Column::SurveyDate => &mut self.survey_date,
            Column::Brand => &mut self.brand,
            Column::Category => &mut self.category,
            Column::BusinessUnit => &mut self.business_unit,
            Column::Unit => &mut self.unit,
            Column::BatchNo => &mut self.batch_no,
            Column::MfgDate => &mut self.mfg_date,
            Column::ExpDate => &mut self.exp_date,
            Column::UnitName => &mut self.unit_name,
            Column::MfgType => &mut self.mfg_type,
            Column::DefectType => &mut self.defect_type,
            Column::DefectSource => &mut self.defect_source,
            _ => return None,
        };
        Some(slot)
    }

    /// Every cell rendered as text, in schema order.
    pub fn cells(&self) -> Vec<String> {
        Column::ALL
            .into_iter()
            .map(|c| self.value(c).to_string())
            .collect()
    }

    pub fn has_defects(&self) -> bool {
        self.defects > 0.0
    }
}

// ---------------------------------------------------------------------------
// AuditDataset – the in-memory store every view reads
// ---------------------------------------------------------------------------

/// Append-only record collection plus the id allocator for new imports.
#[derive(Debug, Clone)]
pub struct AuditDataset {
    records: Vec<AuditRecord>,
    next_id: u64,
}

impl Default for AuditDataset {
    fn default() -> Self {
        AuditDataset::new(Vec::new())
    }
}

impl AuditDataset {
    pub fn new(records: Vec<AuditRecord>) -> Self {
        let next_id = records.iter().map(|r| r.id.0 + 1).max().unwrap_or(1);
        AuditDataset { records, next_id }
    }

    /// The two demo rows the dashboard opens with.
    pub fn seeded() -> Self {
        let honey = |id: u64, batch: &str, mfg: &str, exp: &str, samples: f64, defects: f64| {
            AuditRecord {
                id: RecordId(id),
                city: "Ahmedabad".into(),
                zone: "West".into(),
                serial_no: "1".into(),
                outlet_name: "D Mart".into(),
                location: "Bandu Nagar".into(),
                survey_date: "22-10-2024".into(),
                brand: "Honey".into(),
                sku: 1300.0,
                category: "Health Supplement".into(),
                business_unit: "Health Care".into(),
                unit: "Gm".into(),
                batch_no: batch.into(),
                mfg_date: mfg.into(),
                exp_date: exp.into(),
                unit_name: "Baddi Manakpur".into(),
                mfg_type: "DIL Unit".into(),
                sample_checked: samples,
                defects,
                defect_type: String::new(),
                freshness: 94.0,
                defect_source: String::new(),
            }
        };
        let first = honey(101, "BM5592", "20-07-2024", "19-01-2026", 26.0, 0.0);
        let mut second = honey(102, "BM5595", "23-07-2024", "22-01-2026", 18.0, 1.0);
        second.defect_type = "Torn Label".into();
        second.freshness = 91.0;
        second.defect_source = "Manufacturing".into();
        AuditDataset::new(vec![first, second])
    }

    /// Hand out ids for a new import batch, starting after every id seen so far.
    pub fn id_source(&mut self) -> IdSource<'_> {
        IdSource {
            next: &mut self.next_id,
        }
    }

    pub fn append(&mut self, batch: Vec<AuditRecord>) {
        for record in &batch {
            self.next_id = self.next_id.max(record.id.0 + 1);
        }
        self.records.extend(batch);
    }

    pub fn records(&self) -> &[AuditRecord] {
        &self.records
    }

    pub fn get(&self, id: RecordId) -> Option<&AuditRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Monotonic id allocator borrowed from the dataset during an import.
pub struct IdSource<'a> {
    next: &'a mut u64,
}

impl IdSource<'_> {
    pub fn next_id(&mut self) -> RecordId {
        let id = RecordId(*self.next);
        *self.next += 1;
        id
    }
}
