use eframe::egui;
use serde_json::Value;
use std::time::{Duration, Instant};

use crate::session::lifecycle::{RequestLifecycle, RequestPhase};
use crate::session::toast::{Toast, ToastLevel};

pub const GREEN: egui::Color32 = egui::Color32::from_rgb(46, 125, 50);
pub const AMBER: egui::Color32 = egui::Color32::from_rgb(239, 160, 0);
pub const ORANGE: egui::Color32 = egui::Color32::from_rgb(230, 81, 0);
pub const RED: egui::Color32 = egui::Color32::from_rgb(198, 40, 40);

/// Badge colour for a risk level ("low", "moderate", "high", "critical").
pub fn risk_color(level: &str) -> egui::Color32 {
    match level.to_ascii_lowercase().as_str() {
        "low" | "none" => GREEN,
        "moderate" | "medium" => AMBER,
        "high" => ORANGE,
        "critical" | "severe" => RED,
        _ => egui::Color32::GRAY,
    }
}

pub fn outlook_color(outlook: &str) -> egui::Color32 {
    match outlook.to_ascii_lowercase().as_str() {
        "good" | "excellent" => GREEN,
        "fair" | "concerning" => AMBER,
        "poor" => ORANGE,
        "critical" => RED,
        _ => egui::Color32::GRAY,
    }
}

pub fn badge(ui: &mut egui::Ui, text: &str, color: egui::Color32) {
    egui::Frame::none()
        .fill(color)
        .rounding(4.0)
        .inner_margin(egui::Margin::symmetric(6.0, 2.0))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).color(egui::Color32::WHITE).strong());
        });
}

/// Display text for one `/health` component flag.
pub fn component_state(state: &Value) -> String {
    match state {
        Value::Bool(true) => "ready".to_string(),
        Value::Bool(false) => "unavailable".to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Small titled card used on the overview and results tabs.
pub fn stat_card(ui: &mut egui::Ui, title: &str, value: &str, note: &str) {
    egui::Frame::group(ui.style()).inner_margin(8.0).show(ui, |ui| {
        ui.set_min_width(160.0);
        ui.label(egui::RichText::new(title).small());
        ui.label(egui::RichText::new(value).heading());
        if !note.is_empty() {
            ui.label(egui::RichText::new(note).weak());
        }
    });
}

/// Read-only monospace dump of a backend body.
pub fn json_view(ui: &mut egui::Ui, id: &str, value: &Value) {
    let mut text = serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unprintable: {}>", e));
    egui::ScrollArea::vertical().id_source(id).max_height(420.0).show(ui, |ui| {
        ui.add(
            egui::TextEdit::multiline(&mut text)
                .font(egui::TextStyle::Monospace)
                .desired_width(f32::INFINITY)
                .interactive(false)
                .frame(true),
        );
    });
}

/// Spinner while in flight, the error in red after a failure.
pub fn lifecycle_status(ui: &mut egui::Ui, lifecycle: &RequestLifecycle, busy_text: &str) {
    match lifecycle.phase() {
        RequestPhase::InFlight => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(busy_text);
            });
        }
        RequestPhase::Failed { message, .. } => {
            ui.colored_label(RED, message);
        }
        RequestPhase::Idle | RequestPhase::Succeeded => {}
    }
}

/// Draws the current notification in the top-right corner. Returns how long
/// until it should disappear so the caller can schedule a repaint.
pub fn toast_overlay(ctx: &egui::Context, toast: &mut Toast, now: Instant) -> Option<Duration> {
    let text = toast.message()?.to_string();
    let fill = match toast.level() {
        Some(ToastLevel::Info) => GREEN,
        _ => RED,
    };
    let mut dismissed = false;
    egui::Area::new(egui::Id::new("toast"))
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::RIGHT_TOP, [-16.0, 48.0])
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).fill(fill).show(ui, |ui| {
                ui.set_max_width(360.0);
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&text).color(egui::Color32::WHITE));
                    if ui.small_button("✖").clicked() {
                        dismissed = true;
                    }
                });
            });
        });
    if dismissed {
        toast.dismiss();
        return None;
    }
    toast.remaining(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_levels_map_case_insensitively() {
        assert_eq!(risk_color("HIGH"), ORANGE);
        assert_eq!(risk_color("moderate"), AMBER);
        assert_eq!(risk_color("unheard-of"), egui::Color32::GRAY);
        assert_eq!(outlook_color("Critical"), RED);
    }

    #[test]
    fn health_components_render_boolean_flags() {
        assert_eq!(component_state(&Value::Bool(true)), "ready");
        assert_eq!(component_state(&Value::Bool(false)), "unavailable");
        assert_eq!(component_state(&Value::String("loaded".into())), "loaded");
        assert_eq!(component_state(&Value::Null), "null");
    }
}
