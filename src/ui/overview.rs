use eframe::egui;

use crate::session::dashboard::Dashboard;
use crate::session::navigation::Tab;
use crate::session::request::Request;
use crate::types::profile::UserProfile;
use crate::ui::widgets::{badge, risk_color, stat_card};

pub fn draw_overview(ui: &mut egui::Ui, dashboard: &mut Dashboard, profile: &UserProfile, outbox: &mut Vec<Request>) {
    ui.heading(format!("Welcome back, {}!", profile.name));
    ui.label(format!("Growing {} in {}", profile.crop_type, profile.location));
    ui.separator();

    ui.horizontal_wrapped(|ui| {
        match dashboard.analysis() {
            Some(analysis) => {
                let verdict = if analysis.disease.is_healthy { "Healthy" } else { analysis.disease.disease.as_str() };
                stat_card(ui, "Last scan", verdict, &format!("{:.1}% confidence", analysis.disease.confidence));
                stat_card(ui, "Severity", &analysis.severity_label(), analysis.affected_area.as_deref().unwrap_or(""));
            }
            None => stat_card(ui, "Last scan", "None yet", "Scan a leaf to get started"),
        }
        let weather = dashboard.current_weather().or_else(|| dashboard.analysis().and_then(|a| a.current_weather()));
        match weather {
            Some(w) => stat_card(ui, &format!("Weather in {}", w.city), &format!("{:.0}°C", w.temperature), &format!("{} · {:.0}% humidity", w.description, w.humidity)),
            None => stat_card(ui, "Weather", "–", "Open the assistant to fetch conditions"),
        }
        stat_card(ui, "Assistant", &dashboard.chat.log().len().to_string(), "messages this session");
    });

    if let Some(risk) = dashboard.analysis().and_then(|a| a.risk.as_ref()) {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.label("Current risk:");
            badge(ui, &risk.risk.to_uppercase(), risk_color(&risk.risk));
            ui.label(&risk.message);
        });
    }

    ui.add_space(12.0);
    ui.label(egui::RichText::new("Quick actions").strong());
    ui.horizontal_wrapped(|ui| {
        for tab in [Tab::Scan, Tab::Chat, Tab::Risk, Tab::Treatment, Tab::Report] {
            if ui.button(format!("{} {}", tab.icon(), tab.label())).clicked() {
                outbox.extend(dashboard.select_tab(tab));
            }
        }
    });
}
