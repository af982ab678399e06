use std::path::Path;

use crate::admin::surveys::{QuestionKind, SurveyCatalog};
use crate::admin::users::{UserDirectory, UserForm};
use crate::config::DashboardConfig;
use crate::data::export;
use crate::data::filter::{sync_filter_state, RecordFilter};
use crate::data::loader::{self, ImportOutcome};
use crate::data::model::{AuditDataset, AuditRecord, Column, RecordId};
use crate::session::Session;
use crate::widgets::{WidgetBoard, WidgetDraft};

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Overview,
    AuditRecords,
    Surveys,
    Users,
    Settings,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Overview,
        View::AuditRecords,
        View::Surveys,
        View::Users,
        View::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::AuditRecords => "Audit Records",
            View::Surveys => "Manage Surveys",
            View::Users => "Role Management",
            View::Settings => "System Settings",
        }
    }
}

/// The two pages that filter the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPage {
    Dashboard,
    Records,
}

// ---------------------------------------------------------------------------
// Per-page filter state
// ---------------------------------------------------------------------------

/// Configured filter columns, the live filter and its cached result.
#[derive(Debug, Clone, Default)]
pub struct PageFilter {
    pub columns: Vec<Column>,
    pub filter: RecordFilter,
    /// Indices into the dataset of records passing `filter` (cached).
    pub visible_indices: Vec<usize>,
}

impl PageFilter {
    fn new(columns: Vec<Column>, date_column: Column, dataset: &AuditDataset) -> Self {
        let mut page = PageFilter {
            columns,
            ..Default::default()
        };
        page.filter.date_range.column = date_column;
        sync_filter_state(&mut page.filter.selections, &page.columns);
        page.refilter(dataset);
        page
    }

    pub fn refilter(&mut self, dataset: &AuditDataset) {
        self.visible_indices = self.filter.filtered_indices(dataset.records());
    }

    /// Add `column` to the configured list, or drop it if present. A dropped
    /// column stops constraining the page.
    pub fn toggle_column(&mut self, column: Column) {
        if let Some(pos) = self.columns.iter().position(|c| *c == column) {
            self.columns.remove(pos);
            self.filter.selections.remove(&column);
        } else {
            self.columns.push(column);
            sync_filter_state(&mut self.filter.selections, &self.columns);
        }
    }

    pub fn visible<'a>(&'a self, dataset: &'a AuditDataset) -> impl Iterator<Item = &'a AuditRecord> {
        let records = dataset.records();
        self.visible_indices.iter().filter_map(move |&i| records.get(i))
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// One edit made in the survey editor.
#[derive(Debug, Clone, PartialEq)]
pub enum SurveyAction {
    Rename(String),
    ToggleStatus,
    Delete,
    AddQuestion,
    UpdateQuestion(u64, String, QuestionKind),
    DeleteQuestion(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// User form being edited: `None` id means "invite".
#[derive(Debug, Clone)]
pub struct UserEditor {
    pub editing: Option<u64>,
    pub form: UserForm,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,
    pub session: Session,
    pub view: View,

    /// Every audit record; only imports mutate it.
    pub dataset: AuditDataset,
    pub dashboard: PageFilter,
    pub records: PageFilter,

    pub widgets: WidgetBoard,
    pub widget_draft: WidgetDraft,
    pub widget_builder_open: bool,

    pub users: UserDirectory,
    pub user_editor: Option<UserEditor>,

    pub surveys: SurveyCatalog,
    pub selected_survey: Option<u64>,

    /// Record shown in the detail window.
    pub selected_record: Option<RecordId>,

    /// Status / error message shown in the UI.
    pub status_message: Option<StatusMessage>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let dataset = AuditDataset::seeded();
        let dashboard = PageFilter::new(
            config.dashboard_filters.clone(),
            config.date_column,
            &dataset,
        );
        let records = PageFilter::new(config.record_filters.clone(), config.date_column, &dataset);
        let surveys = SurveyCatalog::seeded();
        let selected_survey = surveys.first_id();
        Self {
            config,
            session: Session::default(),
            view: View::Overview,
            dataset,
            dashboard,
            records,
            widgets: WidgetBoard::default(),
            widget_draft: WidgetDraft::default(),
            widget_builder_open: false,
            users: UserDirectory::seeded(),
            user_editor: None,
            surveys,
            selected_survey,
            selected_record: None,
            status_message: None,
        }
    }

    pub fn page(&self, page: FilterPage) -> &PageFilter {
        match page {
            FilterPage::Dashboard => &self.dashboard,
            FilterPage::Records => &self.records,
        }
    }

    pub fn page_mut(&mut self, page: FilterPage) -> &mut PageFilter {
        match page {
            FilterPage::Dashboard => &mut self.dashboard,
            FilterPage::Records => &mut self.records,
        }
    }

    /// Recompute both pages' visible records after a filter or dataset change.
    pub fn refilter(&mut self) {
        self.dashboard.refilter(&self.dataset);
        self.records.refilter(&self.dataset);
    }

    pub fn set_status(&mut self, text: impl Into<String>, is_error: bool) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            is_error,
        });
    }

    fn finish_import(&mut self, outcome: ImportOutcome) -> ImportOutcome {
        if let ImportOutcome::Imported(_) = outcome {
            self.refilter();
        }
        self.set_status(outcome.message(), outcome == ImportOutcome::NoValidRows);
        outcome
    }

    /// Import a sheet from disk. An unreadable file counts as an import
    /// with no rows.
    pub fn import_file(&mut self, path: &Path) -> ImportOutcome {
        match loader::read_sheet(path) {
            Ok(text) => self.import_text(&text),
            Err(e) => {
                log::warn!("Import failed: {e:#}");
                self.finish_import(ImportOutcome::NoValidRows)
            }
        }
    }

    pub fn import_text(&mut self, text: &str) -> ImportOutcome {
        let outcome = loader::import_text(&mut self.dataset, text);
        self.finish_import(outcome)
    }

    /// Write the records currently visible in the audit list.
    pub fn export_records(&mut self, path: &Path) {
        match export::save_csv(path, self.records.visible(&self.dataset)) {
            Ok(rows) => self.set_status(format!("Exported {rows} records"), false),
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.set_status(format!("Error: {e:#}"), true);
            }
        }
    }

    pub fn toggle_filter_column(&mut self, page: FilterPage, column: Column) {
        self.page_mut(page).toggle_column(column);
        self.refilter();
    }

    pub fn add_survey(&mut self) {
        self.selected_survey = Some(self.surveys.add_new());
    }

    /// Delete the selected survey. Returns true when it was removed.
    pub fn delete_selected_survey(&mut self) -> bool {
        let Some(id) = self.selected_survey else {
            return false;
        };
        match self.surveys.delete(id) {
            Ok(next) => {
                self.selected_survey = Some(next);
                true
            }
            Err(e) => {
                log::warn!("{e}");
                self.set_status(e.to_string(), true);
                false
            }
        }
    }

    /// Apply edits collected from one frame of the survey editor, in order.
    /// Anything queued after a successful delete is dropped.
    pub fn apply_survey_actions(&mut self, survey: u64, actions: Vec<SurveyAction>) {
        for action in actions {
            let result = match action {
                SurveyAction::Rename(title) => self.surveys.rename(survey, &title),
                SurveyAction::ToggleStatus => self.surveys.toggle_status(survey).map(|_| ()),
                SurveyAction::Delete => {
                    if self.delete_selected_survey() {
                        return;
                    }
                    Ok(())
                }
                SurveyAction::AddQuestion => self.surveys.add_question(survey).map(|_| ()),
                SurveyAction::UpdateQuestion(q, text, kind) => {
                    self.surveys.update_question(survey, q, &text, kind)
                }
                SurveyAction::DeleteQuestion(q) => self.surveys.delete_question(survey, q),
            };
            if let Err(e) = result {
                log::warn!("{e}");
                self.set_status(e.to_string(), true);
            }
        }
    }

    pub fn save_user(&mut self) {
        let Some(editor) = self.user_editor.take() else {
            return;
        };
        match editor.editing {
            Some(id) => {
                if let Err(e) = self.users.update(id, editor.form) {
                    self.set_status(e.to_string(), true);
                }
            }
            None => {
                self.users.add(editor.form);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pages_start_with_configured_columns_unrestricted() {
        let state = AppState::default();
        assert_eq!(state.dashboard.columns, vec![Column::Zone, Column::City, Column::Brand]);
        assert_eq!(
            state.records.columns,
            vec![Column::Zone, Column::Brand, Column::DefectType]
        );
        assert_eq!(state.dashboard.visible_indices, vec![0, 1]);
        assert!(state.records.filter.selections.values().all(|s| s.is_empty()));
    }

    #[test]
    fn import_refreshes_both_pages() {
        let mut state = AppState::default();
        state.records.filter.toggle(Column::Zone, "West");
        state.refilter();

        let outcome = state.import_text("h\nPune,West\nDelhi,North\n");
        assert_eq!(outcome, ImportOutcome::Imported(2));
        assert_eq!(state.dashboard.visible_indices.len(), 4);
        assert_eq!(state.records.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.status_message.as_ref().map(|m| m.is_error), Some(false));
    }

    #[test]
    fn empty_import_is_reported() {
        let mut state = AppState::default();
        assert_eq!(state.import_text("h\n,,\n"), ImportOutcome::NoValidRows);
        assert_eq!(state.dataset.len(), 2);
        assert_eq!(
            state.status_message,
            Some(StatusMessage {
                text: "No valid data found.".into(),
                is_error: true
            })
        );
    }

    #[test]
    fn unreadable_file_is_reported_as_empty_import() {
        let mut state = AppState::default();
        let outcome = state.import_file(Path::new("/definitely/not/here.csv"));
        assert_eq!(outcome, ImportOutcome::NoValidRows);
        assert_eq!(state.dataset.len(), 2);
        assert_eq!(
            state.status_message.map(|m| m.text),
            Some("No valid data found.".to_string())
        );
    }

    #[test]
    fn toggling_a_column_off_drops_its_constraint() {
        let mut state = AppState::default();
        state.dashboard.filter.toggle(Column::Zone, "East");
        state.refilter();
        assert!(state.dashboard.visible_indices.is_empty());

        state.toggle_filter_column(FilterPage::Dashboard, Column::Zone);
        assert_eq!(state.dashboard.visible_indices, vec![0, 1]);
        assert!(!state.dashboard.columns.contains(&Column::Zone));

        state.toggle_filter_column(FilterPage::Dashboard, Column::Category);
        assert_eq!(state.dashboard.columns.last(), Some(&Column::Category));
        assert!(state.dashboard.filter.selections[&Column::Category].is_empty());
    }

    #[test]
    fn deleting_the_only_survey_warns() {
        let mut state = AppState::default();
        state.delete_selected_survey();
        assert_eq!(state.surveys.surveys().len(), 1);
        assert_eq!(
            state.status_message.map(|m| m.text),
            Some("Cannot delete the last survey!".to_string())
        );
    }

    #[test]
    fn new_survey_becomes_selected_and_deletion_moves_selection() {
        let mut state = AppState::default();
        state.add_survey();
        let draft = state.selected_survey.unwrap();
        assert_ne!(Some(draft), state.surveys.first_id());
        state.delete_selected_survey();
        assert_eq!(state.selected_survey, state.surveys.first_id());
    }

    #[test]
    fn edits_after_a_delete_are_dropped() {
        let mut state = AppState::default();
        state.add_survey();
        let draft = state.selected_survey.unwrap();
        state.apply_survey_actions(
            draft,
            vec![
                SurveyAction::Rename("Monsoon Check".into()),
                SurveyAction::Delete,
                SurveyAction::AddQuestion,
                SurveyAction::ToggleStatus,
            ],
        );
        assert!(state.surveys.get(draft).is_none());
        assert_eq!(state.selected_survey, state.surveys.first_id());
        assert_eq!(state.status_message, None);
    }

    #[test]
    fn rejected_delete_keeps_applying_edits() {
        let mut state = AppState::default();
        let only = state.selected_survey.unwrap();
        state.apply_survey_actions(only, vec![SurveyAction::Delete, SurveyAction::AddQuestion]);
        assert_eq!(state.surveys.surveys().len(), 1);
        assert_eq!(state.surveys.get(only).map(|s| s.questions.len()), Some(3));
        assert_eq!(
            state.status_message.map(|m| m.text),
            Some("Cannot delete the last survey!".to_string())
        );
    }

    #[test]
    fn user_editor_adds_and_updates() {
        let mut state = AppState::default();
        state.user_editor = Some(UserEditor {
            editing: None,
            form: UserForm {
                name: "Priya".into(),
                ..Default::default()
            },
        });
        state.save_user();
        assert_eq!(state.users.users().len(), 3);
        assert!(state.user_editor.is_none());

        let mut form = state.users.get(1).unwrap().profile.clone();
        form.zone = "South".into();
        state.user_editor = Some(UserEditor {
            editing: Some(1),
            form,
        });
        state.save_user();
        assert_eq!(state.users.get(1).unwrap().profile.zone, "South");
    }
}
