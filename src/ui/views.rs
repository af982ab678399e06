use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::color::WidgetColor;
use crate::data::aggregate::{aggregate, kpi_summary, Metric};
use crate::data::model::Column;
use crate::state::{AppState, FilterPage};
use crate::ui::{panels, plot};
use crate::widgets::ChartKind;

// ---------------------------------------------------------------------------
// Overview – KPIs, filters and chart widgets
// ---------------------------------------------------------------------------

pub fn overview(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Overview");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if ui.button("Add Widget").clicked() {
                state.widget_builder_open = true;
            }
            if ui.button("Import CSV").clicked() {
                panels::open_import_dialog(state);
            }
        });
    });
    ui.separator();

    let kpis = kpi_summary(state.dashboard.visible(&state.dataset));
    ui.columns(4, |cols| {
        stat_card(&mut cols[0], "Total Audits", kpis.total_audits.to_string());
        stat_card(&mut cols[1], "Defects Found", format!("{}", kpis.total_defects));
        stat_card(&mut cols[2], "Samples Checked", format!("{}", kpis.total_samples));
        stat_card(&mut cols[3], "Active Cities", kpis.active_cities.to_string());
    });
    ui.add_space(8.0);

    if panels::filter_bar(ui, "dashboard", &state.dataset, &mut state.dashboard) {
        state.dashboard.refilter(&state.dataset);
    }
    ui.separator();

    let mut remove = None;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if state.widgets.widgets().is_empty() {
                ui.label("No widgets yet. Use \"Add Widget\" to build a chart.");
            }
            for widget in state.widgets.widgets() {
                let points = aggregate(
                    state.dashboard.visible(&state.dataset),
                    widget.spec.group_by,
                    widget.spec.metric,
                );
                egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        ui.strong(widget.spec.title.as_str());
                        ui.label(
                            RichText::new(format!(
                                "{} by {}",
                                widget.spec.metric, widget.spec.group_by
                            ))
                            .small(),
                        );
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui: &mut Ui| {
                                if ui.small_button("✖").on_hover_text("Remove widget").clicked() {
                                    remove = Some(widget.id);
                                }
                            },
                        );
                    });
                    plot::widget_chart(ui, widget, &points);
                });
                ui.add_space(6.0);
            }
        });

    if let Some(id) = remove {
        state.widgets.remove(id);
    }

    widget_builder(ui.ctx(), state);
}

fn stat_card(ui: &mut Ui, title: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(title.to_uppercase()).small().strong());
        ui.heading(RichText::new(value).size(26.0).strong());
    });
}

fn widget_builder(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.widget_builder_open;
    let mut submitted = false;
    let draft = &mut state.widget_draft;

    egui::Window::new("Add Widget")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui: &mut Ui| {
            egui::Grid::new("widget_builder_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui: &mut Ui| {
                    ui.label("Title");
                    ui.text_edit_singleline(&mut draft.title);
                    ui.end_row();

                    ui.label("Chart type");
                    egui::ComboBox::from_id_salt("widget_kind")
                        .selected_text(draft.kind.to_string())
                        .show_ui(ui, |ui: &mut Ui| {
                            for kind in ChartKind::ALL {
                                ui.selectable_value(&mut draft.kind, kind, kind.to_string());
                            }
                        });
                    ui.end_row();

                    ui.label("Group by");
                    egui::ComboBox::from_id_salt("widget_group_by")
                        .selected_text(draft.group_by.header())
                        .show_ui(ui, |ui: &mut Ui| {
                            for col in Column::ALL {
                                ui.selectable_value(&mut draft.group_by, col, col.header());
                            }
                        });
                    ui.end_row();

                    ui.label("Metric");
                    egui::ComboBox::from_id_salt("widget_metric")
                        .selected_text(draft.metric.label())
                        .show_ui(ui, |ui: &mut Ui| {
                            for metric in Metric::ALL {
                                ui.selectable_value(&mut draft.metric, metric, metric.label());
                            }
                        });
                    ui.end_row();

                    ui.label("Color");
                    ui.horizontal(|ui: &mut Ui| {
                        for choice in WidgetColor::ALL {
                            let picked = draft.color == choice;
                            let text = RichText::new(if picked { "●" } else { "○" })
                                .color(choice.color32());
                            if ui
                                .add(egui::Button::new(text).frame(false))
                                .on_hover_text(choice.hex())
                                .clicked()
                            {
                                draft.color = choice;
                            }
                        }
                    });
                    ui.end_row();
                });

            ui.add_space(8.0);
            if ui.button("Add Widget").clicked() {
                submitted = true;
            }
        });

    if submitted {
        let draft = std::mem::take(&mut state.widget_draft);
        state.widgets.add(draft);
        open = false;
    }
    state.widget_builder_open = open;
}

// ---------------------------------------------------------------------------
// Audit records – search, filters, table, detail
// ---------------------------------------------------------------------------

pub fn audit_records(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Audit Records");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if ui.button("Export CSV").clicked() {
                panels::open_export_dialog(state);
            }
            let search = ui.add(
                egui::TextEdit::singleline(&mut state.records.filter.search)
                    .hint_text("Search records…")
                    .desired_width(220.0),
            );
            if search.changed() {
                state.records.refilter(&state.dataset);
            }
        });
    });
    ui.separator();

    if panels::filter_bar(ui, "records", &state.dataset, &mut state.records) {
        state.records.refilter(&state.dataset);
    }
    ui.label(format!(
        "Showing {} of {} records",
        state.records.visible_indices.len(),
        state.dataset.len()
    ));
    ui.separator();

    let records = state.dataset.records();
    let visible = &state.records.visible_indices;
    let mut open_detail = None;

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        let mut table = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .column(TableColumn::exact(28.0));
        for _ in Column::ALL {
            table = table.column(TableColumn::auto().at_least(60.0));
        }

        table
            .header(22.0, |mut header| {
                header.col(|_ui| {});
                for col in Column::ALL {
                    header.col(|ui: &mut Ui| {
                        ui.strong(col.header());
                    });
                }
            })
            .body(|body| {
                body.rows(20.0, visible.len(), |mut row| {
                    let Some(record) = visible.get(row.index()).and_then(|&i| records.get(i)) else {
                        return;
                    };
                    row.col(|ui: &mut Ui| {
                        if ui.small_button("›").on_hover_text("View details").clicked() {
                            open_detail = Some(record.id);
                        }
                    });
                    for col in Column::ALL {
                        row.col(|ui: &mut Ui| {
                            ui.label(record.value(col).to_string());
                        });
                    }
                });
            });
    });

    if open_detail.is_some() {
        state.selected_record = open_detail;
    }

    record_detail(ui.ctx(), state);
}

fn record_detail(ctx: &egui::Context, state: &mut AppState) {
    let Some(record) = state.selected_record.and_then(|id| state.dataset.get(id)) else {
        return;
    };

    let mut open = true;
    egui::Window::new(format!("Audit Detail #{}", record.id))
        .open(&mut open)
        .collapsible(false)
        .show(ctx, |ui: &mut Ui| {
            let (status, color) = if record.has_defects() {
                ("Defects found", Color32::RED)
            } else {
                ("Passed", Color32::from_rgb(0x10, 0xB9, 0x81))
            };
            ui.horizontal(|ui: &mut Ui| {
                ui.strong("Quality Status:");
                ui.label(RichText::new(status).color(color).strong());
            });
            ui.separator();

            egui::Grid::new("record_detail_grid")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    for col in Column::ALL {
                        ui.label(RichText::new(col.header()).strong());
                        ui.label(record.value(col).to_string());
                        ui.end_row();
                    }
                });
        });

    if !open {
        state.selected_record = None;
    }
}

// ---------------------------------------------------------------------------
// System settings – which columns each page filters by
// ---------------------------------------------------------------------------

pub fn settings(ui: &mut Ui, state: &mut AppState) {
    ui.heading("System Settings");
    ui.separator();

    let mut toggles = Vec::new();
    let pages = [
        (
            FilterPage::Dashboard,
            "Dashboard Filters",
            "Select filters for the overview page.",
        ),
        (
            FilterPage::Records,
            "Audit Log Filters",
            "Select filters for the detailed records.",
        ),
    ];
    ui.columns(2, |cols| {
        for (ui, (page, title, blurb)) in cols.iter_mut().zip(pages) {
            ui.strong(title);
            ui.label(RichText::new(blurb).small());
            egui::ScrollArea::vertical()
                .id_salt(title)
                .show(ui, |ui: &mut Ui| {
                    let configured = &state.page(page).columns;
                    for col in Column::ALL {
                        let mut checked = configured.contains(&col);
                        if ui.checkbox(&mut checked, col.header()).changed() {
                            toggles.push((page, col));
                        }
                    }
                });
        }
    });

    for (page, col) in toggles {
        state.toggle_filter_column(page, col);
    }
}
