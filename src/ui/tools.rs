// Forms for the auxiliary advisory routes. Responses are shown as the raw
// JSON the backend returned.

use eframe::egui;
use std::time::Instant;

use crate::session::dashboard::Dashboard;
use crate::session::navigation::Tab;
use crate::session::request::Request;
use crate::session::toast::Toast;
use crate::session::tools::{ToolPanel, Tools};
use crate::ui::widgets::{json_view, lifecycle_status};

type Trigger = fn(&mut Tools) -> Result<Request, String>;

fn field(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).desired_width(260.0));
    ui.end_row();
}

fn response_section(ui: &mut egui::Ui, id: &str, panel: &ToolPanel) {
    lifecycle_status(ui, panel.lifecycle(), "Waiting for the backend…");
    match panel.response() {
        Some(body) => {
            ui.add_space(6.0);
            json_view(ui, id, body);
        }
        None if !panel.is_busy() => {
            ui.label(egui::RichText::new("No data yet.").weak());
        }
        None => {}
    }
}

fn trigger_button(
    ui: &mut egui::Ui,
    text: &str,
    busy: bool,
    trigger: Trigger,
    dashboard: &mut Dashboard,
    toast: &mut Toast,
    outbox: &mut Vec<Request>,
) {
    if ui.add_enabled(!busy, egui::Button::new(text)).clicked() {
        outbox.extend(dashboard.run_tool(trigger, toast, Instant::now()));
    }
}

/// Draws whichever auxiliary tab is active. Other tabs are ignored.
pub fn draw_tool(ui: &mut egui::Ui, dashboard: &mut Dashboard, toast: &mut Toast, outbox: &mut Vec<Request>) {
    match dashboard.tab() {
        Tab::Risk => draw_risk(ui, dashboard, toast, outbox),
        Tab::Twin => draw_twin(ui, dashboard, toast, outbox),
        Tab::Heatmap => draw_heatmap(ui, dashboard, toast, outbox),
        Tab::Voice => draw_voice(ui, dashboard, toast, outbox),
        Tab::Treatment => draw_treatment(ui, dashboard, toast, outbox),
        Tab::Report => draw_report(ui, dashboard, toast, outbox),
        _ => {}
    }
}

fn draw_risk(ui: &mut egui::Ui, dashboard: &mut Dashboard, toast: &mut Toast, outbox: &mut Vec<Request>) {
    ui.heading("⚠ Risk Predictor");
    ui.label("Forecast disease pressure for a crop from local conditions.");
    ui.separator();
    egui::Grid::new("risk_form").num_columns(2).show(ui, |ui| {
        field(ui, "Location:", &mut dashboard.tools.risk_location);
        field(ui, "Crop:", &mut dashboard.tools.risk_crop);
    });
    let busy = dashboard.tools.risk.is_busy();
    trigger_button(ui, "Predict Risk", busy, Tools::request_risk, dashboard, toast, outbox);
    response_section(ui, "risk_json", &dashboard.tools.risk);
}

fn draw_twin(ui: &mut egui::Ui, dashboard: &mut Dashboard, toast: &mut Toast, outbox: &mut Vec<Request>) {
    ui.heading("🌱 Digital Crop Twin");
    ui.separator();
    egui::Grid::new("twin_form").num_columns(2).show(ui, |ui| {
        field(ui, "Farmer ID:", &mut dashboard.tools.twin_farmer);
        field(ui, "Crop:", &mut dashboard.tools.twin_crop);
    });
    let busy = dashboard.tools.twin.is_busy();
    trigger_button(ui, "Load Twin", busy, Tools::request_twin, dashboard, toast, outbox);

    ui.collapsing("Update crop data", |ui| {
        ui.add(
            egui::TextEdit::multiline(&mut dashboard.tools.twin_update_json)
                .font(egui::TextStyle::Monospace)
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        trigger_button(ui, "Push Update", busy, Tools::request_twin_update, dashboard, toast, outbox);
    });
    response_section(ui, "twin_json", &dashboard.tools.twin);
}

fn draw_heatmap(ui: &mut egui::Ui, dashboard: &mut Dashboard, toast: &mut Toast, outbox: &mut Vec<Request>) {
    ui.heading("🗺 Disease Heatmap");
    ui.label("Outbreak hotspots reported by farmers in the region.");
    ui.separator();
    egui::Grid::new("heatmap_form").num_columns(2).show(ui, |ui| {
        field(ui, "Region:", &mut dashboard.tools.heatmap_region);
    });
    let busy = dashboard.tools.heatmap.is_busy();
    trigger_button(ui, "Load Heatmap", busy, Tools::request_heatmap, dashboard, toast, outbox);
    response_section(ui, "heatmap_json", &dashboard.tools.heatmap);
}

fn draw_voice(ui: &mut egui::Ui, dashboard: &mut Dashboard, toast: &mut Toast, outbox: &mut Vec<Request>) {
    ui.heading("🎤 Voice Diagnosis");
    ui.label("Describe the symptoms in a recording and let the assistant diagnose them.");
    ui.separator();
    ui.horizontal(|ui| {
        ui.label("Recording:");
        ui.add(egui::TextEdit::singleline(&mut dashboard.tools.voice_path).hint_text("/path/to/note.wav").desired_width(300.0));
        if ui.button("Load").clicked() {
            if let Err(message) = dashboard.tools.load_voice_clip() {
                toast.show(message, Instant::now());
            }
        }
    });
    if let Some(clip) = &dashboard.tools.voice_clip {
        ui.label(format!("{} ({}, {} bytes)", clip.file().file_name, clip.file().mime, clip.file().size()));
    }
    let busy = dashboard.tools.voice.is_busy();
    trigger_button(ui, "Diagnose", busy, Tools::request_voice, dashboard, toast, outbox);
    response_section(ui, "voice_json", &dashboard.tools.voice);
}

fn draw_treatment(ui: &mut egui::Ui, dashboard: &mut Dashboard, toast: &mut Toast, outbox: &mut Vec<Request>) {
    ui.heading("💊 Treatment Guide");
    ui.separator();
    egui::Grid::new("treatment_form").num_columns(2).show(ui, |ui| {
        field(ui, "Disease:", &mut dashboard.tools.treatment_disease);
        field(ui, "Severity:", &mut dashboard.tools.treatment_severity);
    });
    let busy = dashboard.tools.treatment.is_busy();
    trigger_button(ui, "Get Treatment Plan", busy, Tools::request_treatment, dashboard, toast, outbox);
    response_section(ui, "treatment_json", &dashboard.tools.treatment);
}

fn draw_report(ui: &mut egui::Ui, dashboard: &mut Dashboard, toast: &mut Toast, outbox: &mut Vec<Request>) {
    ui.heading("📝 Field Report");
    ui.label("Share what you see in your field so neighbours get early warnings.");
    ui.separator();
    let form = &mut dashboard.tools.report_form;
    egui::Grid::new("report_form").num_columns(2).show(ui, |ui| {
        field(ui, "Farmer name:", &mut form.farmer_name);
        field(ui, "Location:", &mut form.location);
        field(ui, "Crop:", &mut form.crop_type);
        field(ui, "Disease observed:", &mut form.disease_observed);
        ui.label("Description:");
        ui.add(egui::TextEdit::multiline(&mut form.description).desired_rows(3).desired_width(260.0));
        ui.end_row();
    });
    let busy = dashboard.tools.report.is_busy();
    trigger_button(ui, "Submit Report", busy, Tools::request_report, dashboard, toast, outbox);
    response_section(ui, "report_json", &dashboard.tools.report);
}
