use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDate;

use super::model::{AuditRecord, Column};

// ---------------------------------------------------------------------------
// Filter predicate: which values are selected per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps column → set of selected values.
/// An absent column or an empty set means "no filter" (show all).
pub type FilterState = BTreeMap<Column, BTreeSet<String>>;

/// Seed an empty selection for every configured column, keeping whatever
/// was already selected for columns that stay configured.
pub fn sync_filter_state(filters: &mut FilterState, columns: &[Column]) {
    for col in columns {
        filters.entry(*col).or_default();
    }
}

/// Inclusive date bounds applied to one date column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub column: Column,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Default for DateRange {
    fn default() -> Self {
        DateRange {
            column: Column::SurveyDate,
            start: None,
            end: None,
        }
    }
}

impl DateRange {
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

/// Parse a `DD-MM-YYYY` sheet date.
pub fn parse_sheet_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('-');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(
        year.trim().parse().ok()?,
        month.trim().parse().ok()?,
        day.trim().parse().ok()?,
    )
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Every column with a non-empty selection must contain the record's value.
pub fn matches_columns(record: &AuditRecord, filters: &FilterState) -> bool {
    filters.iter().all(|(col, selected)| {
        selected.is_empty() || selected.contains(&record.value(*col).to_string())
    })
}

/// Records whose date does not parse always pass.
pub fn matches_date(record: &AuditRecord, range: &DateRange) -> bool {
    if range.is_unbounded() {
        return true;
    }
    let Some(date) = parse_sheet_date(&record.value(range.column).to_string()) else {
        return true;
    };
    if range.start.is_some_and(|start| date < start) {
        return false;
    }
    if range.end.is_some_and(|end| date > end) {
        return false;
    }
    true
}

/// Case-insensitive substring match over the id and every cell.
pub fn matches_search(record: &AuditRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    std::iter::once(record.id.to_string())
        .chain(record.cells())
        .any(|cell| cell.to_lowercase().contains(&needle))
}

pub fn matches(record: &AuditRecord, filters: &FilterState, range: &DateRange) -> bool {
    matches_columns(record, filters) && matches_date(record, range)
}

// ---------------------------------------------------------------------------
// RecordFilter – everything one view filters by
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub selections: FilterState,
    pub date_range: DateRange,
    /// Free-text search; only the record list exposes it.
    pub search: String,
}

impl RecordFilter {
    pub fn matches(&self, record: &AuditRecord) -> bool {
        matches(record, &self.selections, &self.date_range)
            && matches_search(record, &self.search)
    }

    /// Indices of records passing every active filter.
    pub fn filtered_indices(&self, records: &[AuditRecord]) -> Vec<usize> {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.matches(r))
            .map(|(i, _)| i)
            .collect()
    }

    /// Clear every selection and both date bounds. The search term is kept.
    pub fn reset(&mut self) {
        for selected in self.selections.values_mut() {
            selected.clear();
        }
        self.date_range.start = None;
        self.date_range.end = None;
    }

    pub fn toggle(&mut self, column: Column, value: &str) {
        let selected = self.selections.entry(column).or_default();
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
    }
}

/// Options a multi-select offers for `column`: distinct non-blank values in
/// first-seen order.
pub fn distinct_values<'a, I>(records: I, column: Column) -> Vec<String>
where
    I: IntoIterator<Item = &'a AuditRecord>,
{
    let mut seen = HashSet::new();
    records
        .into_iter()
        .map(|r| r.value(column))
        .filter(|v| !v.is_blank())
        .map(|v| v.to_string())
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{AuditDataset, RecordId};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn record(zone: &str, brand: &str, survey_date: &str) -> AuditRecord {
        AuditRecord {
            id: RecordId(1),
            zone: zone.into(),
            brand: brand.into(),
            survey_date: survey_date.into(),
            ..Default::default()
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn second_half_2024() -> DateRange {
        DateRange {
            start: Some(ymd(2024, 7, 1)),
            end: Some(ymd(2024, 12, 31)),
            ..Default::default()
        }
    }

    #[test]
    fn empty_selections_are_identity() {
        let mut filters = FilterState::new();
        sync_filter_state(&mut filters, &[Column::Zone, Column::City, Column::Brand]);
        for r in AuditDataset::seeded().records() {
            assert!(matches(r, &filters, &DateRange::default()));
        }
        assert!(matches(&record("", "", ""), &filters, &DateRange::default()));
    }

    #[test]
    fn selected_values_restrict_column() {
        let mut filters = FilterState::new();
        filters.insert(Column::Zone, BTreeSet::from(["West".to_string()]));
        assert!(matches_columns(&record("West", "Honey", ""), &filters));
        assert!(!matches_columns(&record("East", "Honey", ""), &filters));
    }

    #[test]
    fn columns_are_anded() {
        let mut filters = FilterState::new();
        filters.insert(Column::Zone, BTreeSet::from(["West".to_string()]));
        filters.insert(
            Column::Brand,
            BTreeSet::from(["Honey".to_string(), "Hajmola".to_string()]),
        );
        assert!(matches_columns(&record("West", "Hajmola", ""), &filters));
        assert!(!matches_columns(&record("West", "Chyawanprash", ""), &filters));
        assert!(!matches_columns(&record("North", "Honey", ""), &filters));
    }

    #[test]
    fn numeric_columns_match_their_display_text() {
        let mut filters = FilterState::new();
        filters.insert(Column::Sku, BTreeSet::from(["1300".to_string()]));
        let mut r = record("West", "Honey", "");
        r.sku = 1300.0;
        assert!(matches_columns(&r, &filters));
        r.sku = 250.0;
        assert!(!matches_columns(&r, &filters));
    }

    #[rstest]
    #[case("22-10-2024", true)]
    #[case("05-01-2024", false)]
    #[case("01-07-2024", true)]
    #[case("31-12-2024", true)]
    #[case("01-01-2025", false)]
    #[case("", true)]
    #[case("not a date", true)]
    #[case("31-02-2024", true)]
    fn date_range_is_inclusive_and_fails_open(#[case] date: &str, #[case] expected: bool) {
        assert_eq!(matches_date(&record("", "", date), &second_half_2024()), expected);
    }

    #[test]
    fn open_ended_bounds() {
        let only_start = DateRange {
            start: Some(ymd(2024, 7, 1)),
            ..Default::default()
        };
        assert!(matches_date(&record("", "", "01-01-2030"), &only_start));
        assert!(!matches_date(&record("", "", "30-06-2024"), &only_start));

        let only_end = DateRange {
            end: Some(ymd(2024, 7, 1)),
            ..Default::default()
        };
        assert!(matches_date(&record("", "", "30-06-2024"), &only_end));
        assert!(!matches_date(&record("", "", "02-07-2024"), &only_end));
    }

    #[test]
    fn sheet_dates_are_day_month_year() {
        assert_eq!(parse_sheet_date("22-10-2024"), Some(ymd(2024, 10, 22)));
        assert_eq!(parse_sheet_date("2024-10-22"), None);
        assert_eq!(parse_sheet_date("22-10"), None);
        assert_eq!(parse_sheet_date("22-10-2024-1"), None);
    }

    #[test]
    fn search_is_case_insensitive_over_all_cells() {
        let mut r = record("West", "Honey", "22-10-2024");
        r.outlet_name = "D Mart".into();
        r.sample_checked = 26.0;
        assert!(matches_search(&r, "d mart"));
        assert!(matches_search(&r, "HON"));
        assert!(matches_search(&r, "26"));
        assert!(matches_search(&r, ""));
        assert!(!matches_search(&r, "reliance"));
    }

    #[test]
    fn search_also_matches_the_id() {
        let mut r = record("", "", "");
        r.id = RecordId(4711);
        assert!(matches_search(&r, "4711"));
    }

    #[test]
    fn record_filter_combines_search_columns_and_dates() {
        let records = vec![
            record("West", "Honey", "22-10-2024"),
            record("West", "Hajmola", "22-10-2024"),
            record("East", "Honey", "22-10-2024"),
            record("West", "Honey", "05-01-2024"),
            record("West", "Honey", ""),
        ];
        let mut filter = RecordFilter {
            date_range: second_half_2024(),
            search: "honey".into(),
            ..Default::default()
        };
        filter.toggle(Column::Zone, "West");
        assert_eq!(filter.filtered_indices(&records), vec![0, 4]);

        filter.toggle(Column::Zone, "West");
        filter.search.clear();
        filter.date_range = DateRange::default();
        assert_eq!(filter.filtered_indices(&records).len(), records.len());
    }

    #[test]
    fn reset_clears_selections_and_dates() {
        let mut filter = RecordFilter {
            date_range: second_half_2024(),
            ..Default::default()
        };
        filter.toggle(Column::Brand, "Honey");
        filter.reset();
        assert!(filter.selections[&Column::Brand].is_empty());
        assert!(filter.date_range.is_unbounded());
    }

    #[test]
    fn sync_keeps_existing_selections() {
        let mut filters = FilterState::new();
        filters.insert(Column::Zone, BTreeSet::from(["West".to_string()]));
        sync_filter_state(&mut filters, &[Column::Zone, Column::DefectType]);
        assert_eq!(filters[&Column::Zone].len(), 1);
        assert!(filters[&Column::DefectType].is_empty());
    }

    #[test]
    fn options_skip_blanks_and_keep_first_seen_order() {
        let records = vec![
            record("West", "Honey", ""),
            record("", "Hajmola", ""),
            record("East", "Honey", ""),
            record("West", "", ""),
        ];
        assert_eq!(distinct_values(&records, Column::Zone), vec!["West", "East"]);
        assert_eq!(distinct_values(&records, Column::Brand), vec!["Honey", "Hajmola"]);
        assert!(distinct_values(&records, Column::Defects).is_empty());
    }
}
