use std::time::{Duration, Instant};

use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::{AppState, View};
use crate::ui::{admin, panels, views};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MarketDarpanApp {
    pub state: AppState,
}

impl MarketDarpanApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for MarketDarpanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let delay = self.state.config.login_delay();
        self.state.session.poll(Instant::now(), delay);

        if self.state.session.profile().is_none() {
            if self.state.session.is_pending() {
                // Keep frames coming so the pending login can complete.
                ctx.request_repaint_after(Duration::from_millis(100));
            }
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::login_screen(ui, &mut self.state);
            });
            return;
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: navigation ----
        egui::SidePanel::left("nav_panel")
            .default_width(200.0)
            .resizable(false)
            .show(ctx, |ui| {
                panels::nav_panel(ui, &mut self.state);
            });

        // ---- Central panel: current view ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Overview => views::overview(ui, &mut self.state),
            View::AuditRecords => views::audit_records(ui, &mut self.state),
            View::Surveys => admin::surveys(ui, &mut self.state),
            View::Users => admin::users(ui, &mut self.state),
            View::Settings => views::settings(ui, &mut self.state),
        });
    }
}
