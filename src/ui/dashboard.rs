use eframe::egui;

use crate::session::dashboard::Dashboard;
use crate::session::navigation::Tab;
use crate::session::request::Request;
use crate::session::root::BackendStatus;
use crate::session::toast::Toast;
use crate::types::profile::UserProfile;
use crate::ui::widgets::{component_state, GREEN, RED};
use crate::ui::{chat, overview, results, scan, tools};

/// Left navigation column. Also shows who is logged in and whether the
/// backend answered its last health check.
pub fn draw_navigation(
    ui: &mut egui::Ui,
    dashboard: &mut Dashboard,
    profile: &UserProfile,
    backend: &BackendStatus,
    config_error: Option<&str>,
    outbox: &mut Vec<Request>,
) -> bool {
    let mut logout = false;
    ui.heading("🌾 AgroScan");
    ui.label(format!("{} · {}", profile.name, profile.location));
    ui.separator();

    for tab in Tab::ALL {
        let selected = dashboard.tab() == tab;
        if ui.selectable_label(selected, format!("{} {}", tab.icon(), tab.label())).clicked() && !selected {
            outbox.extend(dashboard.select_tab(tab));
        }
    }

    ui.separator();
    ui.collapsing("Backend", |ui| {
        match backend {
            BackendStatus::Unknown => {
                ui.label("Status not checked yet.");
            }
            BackendStatus::Reachable(status) => {
                let color = if status.is_healthy() { GREEN } else { RED };
                ui.colored_label(color, format!("Status: {}", status.status));
                for (name, state) in &status.components {
                    ui.label(format!("{}: {}", name, component_state(state)));
                }
            }
            BackendStatus::Unreachable(err) => {
                ui.colored_label(RED, format!("Unreachable: {}", err));
            }
        }
        if ui.small_button("Check again").clicked() {
            outbox.push(Request::Health);
        }
        if let Some(err) = config_error {
            ui.colored_label(RED, format!("Config: {}", err));
        }
    });

    ui.add_space(12.0);
    if ui.button("Logout").clicked() {
        logout = true;
    }
    logout
}

pub fn draw_active_tab(ui: &mut egui::Ui, dashboard: &mut Dashboard, profile: &UserProfile, toast: &mut Toast, outbox: &mut Vec<Request>) {
    match dashboard.tab() {
        Tab::Overview => overview::draw_overview(ui, dashboard, profile, outbox),
        Tab::Scan => scan::draw_scan(ui, dashboard, toast, outbox),
        Tab::Results => results::draw_results(ui, dashboard.analysis()),
        Tab::Chat => chat::draw_chat(ui, dashboard, outbox),
        Tab::Risk | Tab::Twin | Tab::Heatmap | Tab::Voice | Tab::Treatment | Tab::Report => {
            egui::ScrollArea::vertical().id_source("tool_scroll").auto_shrink([false, false]).show(ui, |ui| {
                tools::draw_tool(ui, dashboard, toast, outbox);
            });
        }
    }
}
