use eframe::egui;

use crate::session::root::LoginForm;

/// Landing screen. Returns true when the farmer pressed "Get Started".
pub fn draw_home(ui: &mut egui::Ui, form: &mut LoginForm) -> bool {
    let mut submitted = false;
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading(egui::RichText::new("🌾 AgroScan").size(32.0));
        ui.label("AI-powered crop disease detection and farm advisory");
        ui.add_space(24.0);

        egui::Frame::group(ui.style()).inner_margin(16.0).show(ui, |ui| {
            ui.set_max_width(360.0);
            egui::Grid::new("login_grid").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
                ui.label("Name:");
                ui.add(egui::TextEdit::singleline(&mut form.name).hint_text("Your name"));
                ui.end_row();

                ui.label("Location:");
                ui.add(egui::TextEdit::singleline(&mut form.location).hint_text("City or village"));
                ui.end_row();

                ui.label("Crop:");
                let response = ui.add(egui::TextEdit::singleline(&mut form.crop_type).hint_text("e.g. Tomato"));
                ui.end_row();

                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submitted = true;
                }
            });
            ui.add_space(8.0);
            if ui.button("Get Started").clicked() {
                submitted = true;
            }
        });
    });
    submitted
}
