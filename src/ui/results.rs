use eframe::egui;

use crate::types::analysis::AnalysisResult;
use crate::ui::widgets::{badge, outlook_color, risk_color, stat_card, GREEN, RED};

pub const NO_ANALYSIS_TEXT: &str = "No analysis yet. Upload and scan a plant image first.";

pub fn draw_results(ui: &mut egui::Ui, analysis: Option<&AnalysisResult>) {
    ui.heading("🔬 Analysis Results");
    ui.separator();
    let Some(analysis) = analysis else {
        ui.label(NO_ANALYSIS_TEXT);
        return;
    };

    egui::ScrollArea::vertical().id_source("results_scroll").auto_shrink([false, false]).show(ui, |ui| {
        let disease = &analysis.disease;
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&disease.plant).heading());
            if disease.is_healthy {
                badge(ui, "Healthy", GREEN);
            } else {
                badge(ui, &disease.disease, RED);
            }
        });
        if let Some(class) = &disease.full_class {
            ui.label(egui::RichText::new(class).monospace().weak());
        }
        ui.add(egui::ProgressBar::new((disease.confidence / 100.0).clamp(0.0, 1.0) as f32)
            .text(format!("{:.1}% confidence", disease.confidence)));

        ui.add_space(8.0);
        ui.horizontal_wrapped(|ui| {
            stat_card(ui, "Severity", &analysis.severity_label(), "");
            if let Some(area) = &analysis.affected_area {
                stat_card(ui, "Affected area", area, "");
            }
            if let Some(survival) = &analysis.survival {
                stat_card(ui, "Survival", &format!("{} days", survival.survival_days), &survival.outlook);
            }
            if let Some(w) = analysis.current_weather() {
                stat_card(ui, &w.city, &format!("{:.0}°C", w.temperature), &format!("{:.0}% humidity · {}", w.humidity, w.description));
            }
        });

        if !analysis.symptoms.is_empty() {
            ui.add_space(8.0);
            ui.label(egui::RichText::new("Symptoms").strong());
            for symptom in &analysis.symptoms {
                ui.label(format!("• {}", symptom));
            }
        }

        if let Some(risk) = &analysis.risk {
            ui.add_space(8.0);
            ui.separator();
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Spread risk").strong());
                badge(ui, &risk.risk.to_uppercase(), risk_color(&risk.risk));
            });
            ui.label(&risk.message);
            for factor in &risk.factors {
                ui.label(format!("• {}", factor));
            }
        }

        if let Some(survival) = &analysis.survival {
            ui.add_space(8.0);
            ui.separator();
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Outlook").strong());
                badge(ui, &survival.outlook, outlook_color(&survival.outlook));
            });
            ui.label(&survival.message);
            ui.collapsing("Recommendations", |ui| {
                for step in &survival.recommendation {
                    ui.label(format!("✔ {}", step));
                }
            });
        }

        if let Some(tomorrow) = analysis.weather.as_ref().and_then(|w| w.tomorrow.as_ref()) {
            ui.add_space(8.0);
            ui.label(format!("Tomorrow: {:.0}°C, {:.0}% humidity, {}", tomorrow.temperature, tomorrow.humidity, tomorrow.description));
        }
        if let Some(ts) = analysis.timestamp {
            ui.label(egui::RichText::new(format!("Analyzed {}", ts.format("%Y-%m-%d %H:%M UTC"))).weak());
        }
    });
}
