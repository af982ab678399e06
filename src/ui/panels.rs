use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::data::filter::distinct_values;
use crate::data::model::AuditDataset;
use crate::state::{AppState, PageFilter, View};

const EMERALD: Color32 = Color32::from_rgb(0x10, 0xB9, 0x81);

// ---------------------------------------------------------------------------
// Login screen
// ---------------------------------------------------------------------------

pub fn login_screen(ui: &mut Ui, state: &mut AppState) {
    let pending = state.session.is_pending();
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(ui.available_height() * 0.3);
        ui.heading(RichText::new("Market Darpan").size(32.0).strong());
        ui.label("Admin Command Center");
        ui.add_space(24.0);

        let label = if pending {
            "Connecting..."
        } else {
            "Sign in with Microsoft SSO"
        };
        if ui
            .add_enabled(!pending, egui::Button::new(label).min_size([260.0, 36.0].into()))
            .clicked()
        {
            state.session.begin_sso(std::time::Instant::now());
        }

        ui.add_space(12.0);
        if ui.link("Skip Login (Dev Mode)").clicked() {
            state.session.bypass();
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – navigation
// ---------------------------------------------------------------------------

pub fn nav_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(8.0);
    ui.heading(RichText::new("Market Darpan").color(EMERALD).strong());
    ui.label(RichText::new("ADMIN PANEL").small());
    ui.separator();

    for view in View::ALL {
        if ui
            .selectable_label(state.view == view, view.label())
            .clicked()
        {
            state.view = view;
        }
    }

    ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui: &mut Ui| {
        ui.add_space(8.0);
        if ui.button("Sign Out").clicked() {
            state.session.sign_out();
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Import CSV…").clicked() {
                open_import_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export records…").clicked() {
                open_export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} audit records loaded, {} on overview",
            state.dataset.len(),
            state.dashboard.visible_indices.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.is_error { Color32::RED } else { EMERALD };
            ui.label(RichText::new(&msg.text).color(color));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if let Some(profile) = state.session.profile() {
                ui.label(RichText::new(profile.initial().to_string()).strong().color(EMERALD));
                ui.label(format!("{} ({})", profile.name, profile.role));
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Filter bar – shared by the overview and the record list
// ---------------------------------------------------------------------------

/// Render multi-selects for the page's configured columns plus the date
/// range. Returns true when any filter changed.
pub fn filter_bar(ui: &mut Ui, id: &str, dataset: &AuditDataset, page: &mut PageFilter) -> bool {
    let mut changed = false;

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for col in page.columns.clone() {
            let options = distinct_values(dataset.records(), col);
            let n_selected = page.filter.selections.get(&col).map_or(0, |s| s.len());
            let summary = if n_selected == 0 {
                "All Selected".to_string()
            } else {
                format!("{n_selected} Selected")
            };

            ui.vertical(|ui: &mut Ui| {
                ui.label(RichText::new(col.header()).small().strong());
                ui.menu_button(summary, |ui: &mut Ui| {
                    egui::ScrollArea::vertical()
                        .max_height(240.0)
                        .show(ui, |ui: &mut Ui| {
                            for opt in &options {
                                let mut checked = page
                                    .filter
                                    .selections
                                    .get(&col)
                                    .is_some_and(|s| s.contains(opt));
                                if ui.checkbox(&mut checked, opt.as_str()).changed() {
                                    page.filter.toggle(col, opt);
                                    changed = true;
                                }
                            }
                            if options.is_empty() {
                                ui.label("No values");
                            }
                        });
                });
            });
        }
    });

    ui.horizontal(|ui: &mut Ui| {
        let range = &mut page.filter.date_range;
        ui.label(RichText::new(format!("{} range", range.column)).small().strong());
        changed |= date_bound(ui, &format!("{id}_start"), "From", &mut range.start);
        changed |= date_bound(ui, &format!("{id}_end"), "To", &mut range.end);

        if ui.button("Reset").clicked() {
            page.filter.reset();
            changed = true;
        }
    });

    changed
}

fn date_bound(ui: &mut Ui, id: &str, label: &str, bound: &mut Option<chrono::NaiveDate>) -> bool {
    let mut changed = false;
    let mut enabled = bound.is_some();
    if ui.checkbox(&mut enabled, label).changed() {
        *bound = enabled.then(|| chrono::Local::now().date_naive());
        changed = true;
    }
    if let Some(date) = bound.as_mut() {
        changed |= ui.add(DatePickerButton::new(date).id_salt(id)).changed();
    }
    changed
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_import_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Import audit sheet")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.import_file(&path);
    }
}

pub fn open_export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export audit records")
        .set_file_name("audit-records.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_records(&path);
    }
}
