use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{AuditRecord, Column};

/// Label for records whose group-by cell is empty text or a zero number.
pub const UNKNOWN_GROUP: &str = "Unknown";

/// How a group's records are reduced to one number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Count,
    Defects,
    Samples,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Count, Metric::Defects, Metric::Samples];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Count => "Count of Rows",
            Metric::Defects => "Sum of Defects",
            Metric::Samples => "Sum of Samples Checked",
        }
    }

    fn contribution(self, record: &AuditRecord) -> f64 {
        match self {
            Metric::Count => 1.0,
            Metric::Defects => record.value(Column::Defects).as_f64(),
            Metric::Samples => record.value(Column::SampleChecked).as_f64(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One bar / slice / point of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupPoint {
    pub name: String,
    pub value: f64,
}

/// Group `records` by `group_by` and reduce each group with `metric`.
/// Groups come out in the order their key was first seen.
pub fn aggregate<'a, I>(records: I, group_by: Column, metric: Metric) -> Vec<GroupPoint>
where
    I: IntoIterator<Item = &'a AuditRecord>,
{
    let mut points: Vec<GroupPoint> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let value = record.value(group_by);
        let key = if value.is_blank() {
            UNKNOWN_GROUP.to_string()
        } else {
            value.to_string()
        };
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            points.push(GroupPoint {
                name: key,
                value: 0.0,
            });
            points.len() - 1
        });
        points[slot].value += metric.contribution(record);
    }

    points
}

// ---------------------------------------------------------------------------
// Headline numbers for the overview page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KpiSummary {
    pub total_audits: usize,
    pub total_defects: f64,
    pub total_samples: f64,
    pub active_cities: usize,
}

pub fn kpi_summary<'a, I>(records: I) -> KpiSummary
where
    I: IntoIterator<Item = &'a AuditRecord>,
{
    let mut cities = HashSet::new();
    let mut summary = KpiSummary::default();
    for record in records {
        summary.total_audits += 1;
        summary.total_defects += Metric::Defects.contribution(record);
        summary.total_samples += Metric::Samples.contribution(record);
        cities.insert(record.city.as_str());
    }
    summary.active_cities = cities.len();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{AuditDataset, RecordId};
    use pretty_assertions::assert_eq;

    fn record(brand: &str, city: &str, samples: f64, defects: f64) -> AuditRecord {
        AuditRecord {
            id: RecordId(1),
            brand: brand.into(),
            city: city.into(),
            sample_checked: samples,
            defects,
            ..Default::default()
        }
    }

    fn point(name: &str, value: f64) -> GroupPoint {
        GroupPoint {
            name: name.into(),
            value,
        }
    }

    #[test]
    fn counts_per_group() {
        let ds = AuditDataset::seeded();
        assert_eq!(
            aggregate(ds.records(), Column::Brand, Metric::Count),
            vec![point("Honey", 2.0)]
        );
    }

    #[test]
    fn sums_defects_and_samples() {
        let records = vec![
            record("Honey", "Pune", 26.0, 0.0),
            record("Hajmola", "Pune", 10.0, 3.0),
            record("Honey", "Delhi", 18.0, 1.0),
            // Missing defect count contributes nothing.
            AuditRecord {
                brand: "Hajmola".into(),
                ..Default::default()
            },
        ];
        assert_eq!(
            aggregate(&records, Column::Brand, Metric::Defects),
            vec![point("Honey", 1.0), point("Hajmola", 3.0)]
        );
        assert_eq!(
            aggregate(&records, Column::Brand, Metric::Samples),
            vec![point("Honey", 44.0), point("Hajmola", 10.0)]
        );
    }

    #[test]
    fn groups_keep_discovery_order_and_blank_is_unknown() {
        let records = vec![
            record("Zandu", "", 1.0, 0.0),
            record("", "", 1.0, 0.0),
            record("Amla", "", 1.0, 0.0),
            record("Zandu", "", 1.0, 0.0),
        ];
        let names: Vec<String> = aggregate(&records, Column::Brand, Metric::Count)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Zandu", UNKNOWN_GROUP, "Amla"]);
    }

    #[test]
    fn numeric_group_keys_use_display_text() {
        let mut a = record("Honey", "", 0.0, 0.0);
        a.sku = 1300.0;
        let mut b = a.clone();
        b.sku = 250.0;
        let mut missing = a.clone();
        missing.sku = 0.0;
        assert_eq!(
            aggregate([&a, &missing, &b, &a], Column::Sku, Metric::Count),
            vec![point("1300", 2.0), point(UNKNOWN_GROUP, 1.0), point("250", 1.0)]
        );
    }

    #[test]
    fn unparseable_number_groups_as_unknown() {
        let mut ds = AuditDataset::default();
        let records = crate::data::loader::parse_audit_csv(
            "h\nPune,West,1,O,L,01-01-2024,Honey,,x\nDelhi,North,2,O,L,01-01-2024,Honey,abc\n",
            &mut ds.id_source(),
        );
        assert_eq!(
            aggregate(&records, Column::Sku, Metric::Count),
            vec![point(UNKNOWN_GROUP, 2.0)]
        );
    }

    #[test]
    fn normalised_text_sums_like_numbers() {
        let mut ds = AuditDataset::default();
        let from_text = crate::data::loader::parse_audit_csv(
            "h\n,,,,,,Honey,,,,,,,,,,4,2,,,\n,,,,,,Honey,,,,,,,,,,6,3,,,\n",
            &mut ds.id_source(),
        );
        let from_numbers = vec![
            record("Honey", "", 4.0, 2.0),
            record("Honey", "", 6.0, 3.0),
        ];
        assert_eq!(
            aggregate(&from_text, Column::Brand, Metric::Defects),
            aggregate(&from_numbers, Column::Brand, Metric::Defects)
        );
        assert_eq!(
            aggregate(&from_text, Column::Brand, Metric::Samples),
            vec![point("Honey", 10.0)]
        );
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(aggregate(&Vec::<AuditRecord>::new(), Column::Zone, Metric::Count).is_empty());
    }

    #[test]
    fn kpis_over_records() {
        let records = vec![
            record("Honey", "Pune", 26.0, 0.0),
            record("Honey", "Delhi", 18.0, 1.0),
            record("Amla", "Pune", 10.0, 2.0),
        ];
        assert_eq!(
            kpi_summary(&records),
            KpiSummary {
                total_audits: 3,
                total_defects: 3.0,
                total_samples: 54.0,
                active_cities: 2,
            }
        );
        assert_eq!(kpi_summary(&Vec::<AuditRecord>::new()), KpiSummary::default());
    }
}
