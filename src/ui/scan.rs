use eframe::egui;
use std::time::Instant;

use crate::session::dashboard::Dashboard;
use crate::session::request::Request;
use crate::session::toast::Toast;
use crate::ui::widgets::lifecycle_status;

pub fn draw_scan(ui: &mut egui::Ui, dashboard: &mut Dashboard, toast: &mut Toast, outbox: &mut Vec<Request>) {
    let now = Instant::now();
    ui.heading("📸 Scan Plant");
    ui.label("Pick a clear photo of an affected leaf, then run the analysis.");
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Image file:");
        let response = ui.add(
            egui::TextEdit::singleline(&mut dashboard.image_path)
                .hint_text("/path/to/leaf.jpg")
                .desired_width(320.0),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Load").clicked() || submitted {
            dashboard.load_image(toast, now);
        }
    });

    ui.horizontal(|ui| {
        ui.label("City:");
        ui.add(egui::TextEdit::singleline(&mut dashboard.city).desired_width(200.0));
    });

    ui.add_space(8.0);
    let mut remove = false;
    match dashboard.selected_image() {
        Some(image) => {
            let file = image.file();
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.label(egui::RichText::new(&file.file_name).strong());
                ui.label(format!("{} · {:.1} KiB", file.mime, file.size() as f64 / 1024.0));
                if let Some(preview) = dashboard.preview() {
                    let head: String = preview.chars().take(48).collect();
                    ui.label(egui::RichText::new(format!("{}…", head)).monospace().weak());
                }
                if ui.button("Remove").clicked() {
                    remove = true;
                }
            });
        }
        None => {
            ui.label("No image selected.");
        }
    }
    if remove {
        dashboard.remove_image();
    }

    ui.add_space(8.0);
    let busy = dashboard.is_analyzing();
    let label = if busy { "Analyzing…" } else { "🔬 Analyze" };
    if ui.add_enabled(!busy, egui::Button::new(label)).clicked() {
        outbox.extend(dashboard.analyze(toast, now));
    }
    lifecycle_status(ui, dashboard.analysis_lifecycle(), "Sending image to the disease model…");
}
