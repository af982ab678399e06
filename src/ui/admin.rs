use eframe::egui::{self, Color32, RichText, Ui};

use crate::admin::surveys::{QuestionKind, SurveyStatus};
use crate::admin::users::{Role, UserForm, UserStatus, NO_ASSIGNMENT};
use crate::admin::AdminError;
use crate::state::{AppState, SurveyAction, UserEditor};

fn report(state: &mut AppState, result: Result<(), AdminError>) {
    if let Err(e) = result {
        log::warn!("{e}");
        state.set_status(e.to_string(), true);
    }
}

// ---------------------------------------------------------------------------
// Role management
// ---------------------------------------------------------------------------

pub fn users(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Role Management");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if ui.button("Invite User").clicked() {
                state.user_editor = Some(UserEditor {
                    editing: None,
                    form: UserForm::default(),
                });
            }
        });
    });
    ui.separator();

    let mut edit = None;
    let mut toggle = None;
    let mut delete = None;
    egui::Grid::new("users_grid")
        .num_columns(5)
        .striped(true)
        .spacing([24.0, 10.0])
        .show(ui, |ui: &mut Ui| {
            for heading in ["NAME", "ROLE", "STATUS", "ASSIGNED SURVEY", "ACTIONS"] {
                ui.label(RichText::new(heading).small().strong());
            }
            ui.end_row();

            for user in state.users.users() {
                ui.vertical(|ui: &mut Ui| {
                    ui.strong(user.profile.name.as_str());
                    ui.label(RichText::new(&user.profile.email).small());
                });
                let role_color = match user.profile.role {
                    Role::Admin => Color32::from_rgb(0x8B, 0x5C, 0xF6),
                    Role::Editor => Color32::from_rgb(0x3B, 0x82, 0xF6),
                    Role::Viewer => Color32::GRAY,
                };
                ui.label(RichText::new(user.profile.role.to_string()).color(role_color));
                let status_color = match user.status {
                    UserStatus::Active => Color32::from_rgb(0x10, 0xB9, 0x81),
                    UserStatus::Inactive => Color32::GRAY,
                };
                if ui
                    .button(RichText::new(user.status.to_string()).color(status_color))
                    .on_hover_text("Toggle Active / Inactive")
                    .clicked()
                {
                    toggle = Some(user.id);
                }
                ui.label(user.profile.assigned_survey.as_str());
                ui.horizontal(|ui: &mut Ui| {
                    if ui.small_button("Edit").clicked() {
                        edit = Some(user.id);
                    }
                    if ui.small_button("Delete").clicked() {
                        delete = Some(user.id);
                    }
                });
                ui.end_row();
            }
        });

    if let Some(user) = edit.and_then(|id| state.users.get(id)) {
        state.user_editor = Some(UserEditor {
            editing: Some(user.id),
            form: user.profile.clone(),
        });
    }
    if let Some(id) = toggle {
        let result = state.users.toggle_status(id).map(|_| ());
        report(state, result);
    }
    if let Some(id) = delete {
        let result = state.users.remove(id).map(|_| ());
        report(state, result);
    }

    user_editor_window(ui.ctx(), state);
}

fn user_editor_window(ctx: &egui::Context, state: &mut AppState) {
    let survey_titles: Vec<String> = state
        .surveys
        .surveys()
        .iter()
        .map(|s| s.title.clone())
        .collect();
    let Some(editor) = state.user_editor.as_mut() else {
        return;
    };

    let title = if editor.editing.is_some() {
        "Edit User"
    } else {
        "Invite User"
    };
    let mut open = true;
    let mut save = false;
    egui::Window::new(title)
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui: &mut Ui| {
            let form = &mut editor.form;
            egui::Grid::new("user_form_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui: &mut Ui| {
                    ui.label("Full Name");
                    ui.text_edit_singleline(&mut form.name);
                    ui.end_row();

                    ui.label("Email Address");
                    ui.text_edit_singleline(&mut form.email);
                    ui.end_row();

                    ui.label("Role");
                    egui::ComboBox::from_id_salt("user_role")
                        .selected_text(form.role.to_string())
                        .show_ui(ui, |ui: &mut Ui| {
                            for role in Role::ALL {
                                ui.selectable_value(&mut form.role, role, role.to_string());
                            }
                        });
                    ui.end_row();

                    ui.label("Zone");
                    ui.text_edit_singleline(&mut form.zone);
                    ui.end_row();

                    ui.label("Assigned Survey");
                    let shown = if form.assigned_survey == NO_ASSIGNMENT {
                        "No Task Assigned".to_string()
                    } else {
                        form.assigned_survey.clone()
                    };
                    egui::ComboBox::from_id_salt("user_survey")
                        .selected_text(shown)
                        .show_ui(ui, |ui: &mut Ui| {
                            ui.selectable_value(
                                &mut form.assigned_survey,
                                NO_ASSIGNMENT.to_string(),
                                "No Task Assigned",
                            );
                            for t in &survey_titles {
                                ui.selectable_value(&mut form.assigned_survey, t.clone(), t.as_str());
                            }
                        });
                    ui.end_row();
                });

            ui.add_space(8.0);
            if ui.button("Save").clicked() {
                save = true;
            }
        });

    if save {
        state.save_user();
    } else if !open {
        state.user_editor = None;
    }
}

// ---------------------------------------------------------------------------
// Survey configuration
// ---------------------------------------------------------------------------

pub fn surveys(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Manage Surveys");
    ui.separator();

    egui::SidePanel::left("survey_list")
        .resizable(false)
        .default_width(200.0)
        .show_inside(ui, |ui: &mut Ui| {
            if ui.button("+ New Survey").clicked() {
                state.add_survey();
            }
            ui.separator();
            let mut picked = None;
            for survey in state.surveys.surveys() {
                let label = format!("{}  ({})", survey.title, survey.status);
                if ui
                    .selectable_label(state.selected_survey == Some(survey.id), label)
                    .clicked()
                {
                    picked = Some(survey.id);
                }
            }
            if picked.is_some() {
                state.selected_survey = picked;
            }
        });

    egui::CentralPanel::default().show_inside(ui, |ui: &mut Ui| {
        survey_editor(ui, state);
    });
}

fn survey_editor(ui: &mut Ui, state: &mut AppState) {
    let Some(survey) = state.selected_survey.and_then(|id| state.surveys.get(id)) else {
        ui.label("No Survey");
        return;
    };
    let id = survey.id;
    let mut actions = Vec::new();

    ui.horizontal(|ui: &mut Ui| {
        let mut title = survey.title.clone();
        ui.label(RichText::new("SURVEY TITLE").small().strong());
        if ui
            .add(egui::TextEdit::singleline(&mut title).font(egui::TextStyle::Heading))
            .changed()
        {
            actions.push(SurveyAction::Rename(title));
        }
    });

    ui.horizontal(|ui: &mut Ui| {
        let status_color = match survey.status {
            SurveyStatus::Active => Color32::from_rgb(0x10, 0xB9, 0x81),
            SurveyStatus::Draft => Color32::from_rgb(0xF5, 0x9E, 0x0B),
        };
        if ui
            .button(RichText::new(survey.status.to_string()).color(status_color))
            .on_hover_text("Toggle Active / Draft")
            .clicked()
        {
            actions.push(SurveyAction::ToggleStatus);
        }
        if ui.button("Delete Survey").clicked() {
            actions.push(SurveyAction::Delete);
        }
    });
    ui.separator();

    for (index, q) in survey.questions.iter().enumerate() {
        ui.horizontal(|ui: &mut Ui| {
            ui.strong(format!("Q{}", index + 1));
            let mut text = q.text.clone();
            let mut kind = q.kind;
            let edited = ui.text_edit_singleline(&mut text).changed();
            let mut kind_changed = false;
            egui::ComboBox::from_id_salt(("question_kind", q.id))
                .selected_text(kind.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for k in QuestionKind::ALL {
                        kind_changed |= ui.selectable_value(&mut kind, k, k.to_string()).changed();
                    }
                });
            if edited || kind_changed {
                actions.push(SurveyAction::UpdateQuestion(q.id, text, kind));
            }
            if ui.small_button("Remove").on_hover_text("Delete question").clicked() {
                actions.push(SurveyAction::DeleteQuestion(q.id));
            }
        });
    }

    ui.add_space(8.0);
    if ui.button("+ Add Question").clicked() {
        actions.push(SurveyAction::AddQuestion);
    }

    state.apply_survey_actions(id, actions);
}
