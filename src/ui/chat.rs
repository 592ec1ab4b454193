use eframe::egui;

use crate::session::dashboard::Dashboard;
use crate::session::request::Request;
use crate::types::chat::ChatRole;
use crate::ui::widgets::GREEN;

pub const EMPTY_CHAT_TEXT: &str = "Ask me anything about your crops!";

pub fn draw_chat(ui: &mut egui::Ui, dashboard: &mut Dashboard, outbox: &mut Vec<Request>) {
    ui.horizontal(|ui| {
        ui.heading("💬 AI Assistant");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Clear").clicked() {
                outbox.push(dashboard.clear_chat());
            }
        });
    });
    if let Some(w) = dashboard.current_weather() {
        ui.label(egui::RichText::new(format!("{}: {:.0}°C, {}", w.city, w.temperature, w.description)).weak());
    }
    ui.separator();

    let input_height = 36.0;
    egui::ScrollArea::vertical()
        .id_source("chat_scroll")
        .max_height((ui.available_height() - input_height).max(80.0))
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            let log = dashboard.chat.log();
            if log.is_empty() {
                ui.label(egui::RichText::new(EMPTY_CHAT_TEXT).italics());
            }
            for message in log.messages() {
                match message.role {
                    ChatRole::User => {
                        ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                            ui.label(egui::RichText::new(&message.content).color(GREEN));
                        });
                    }
                    ChatRole::Assistant => {
                        ui.label(format!("🤖 {}", message.content));
                    }
                }
                ui.add_space(4.0);
            }
            if dashboard.chat.is_sending() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Thinking…");
                });
            }
        });

    ui.separator();
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut dashboard.chat.input)
                .hint_text("Type your question…")
                .desired_width(ui.available_width() - 70.0),
        );
        let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        let send = ui.add_enabled(dashboard.chat.can_send(), egui::Button::new("Send")).clicked();
        if enter || send {
            outbox.extend(dashboard.send_chat());
            response.request_focus();
        }
    });
}
