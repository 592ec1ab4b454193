//*** START FILE: src/ui/app.rs ***//
use eframe::{egui, App};
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Runtime;
use tracing::info;

use crate::api::AdvisoryBackend;
use crate::config::Config;
use crate::session::request::Request;
use crate::session::root::{RootController, Screen};
use crate::session::runner::RequestRunner;
use crate::ui::dashboard::{draw_active_tab, draw_navigation};
use crate::ui::home::draw_home;
use crate::ui::widgets::toast_overlay;

pub struct AgroScanApp {
    controller: RootController,
    runner: RequestRunner,
    config_error: Option<String>,
    // Keeps the worker threads alive for as long as the window is open.
    _runtime: Runtime,
}

impl AgroScanApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: Runtime,
        backend: Arc<dyn AdvisoryBackend>,
        config: &Config,
        config_error: Option<String>,
    ) -> Self {
        let ctx = cc.egui_ctx.clone();
        let runner = RequestRunner::new(runtime.handle().clone(), backend).with_wakeup(move || ctx.request_repaint());
        runner.submit(Request::Health);
        Self {
            controller: RootController::from_config(config),
            runner,
            config_error,
            _runtime: runtime,
        }
    }
}

impl App for AgroScanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        for completion in self.runner.drain() {
            self.controller.apply(completion, now);
        }
        self.controller.toast_mut().expire(now);

        let mut outbox: Vec<Request> = Vec::new();
        let mut login = false;
        let mut logout = false;
        let config_error = self.config_error.as_deref();
        let view = self.controller.view_state();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                if view.profile.is_some() {
                    ui.menu_button("Session", |ui| {
                        if ui.button("Logout").clicked() {
                            logout = true;
                            ui.close_menu();
                        }
                    });
                }
            });
        });

        match view.screen {
            Screen::Home(form) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    login = draw_home(ui, form);
                });
            }
            Screen::Dashboard(dashboard) => match view.profile {
                Some(profile) => {
                    egui::SidePanel::left("side_panel_left").min_width(200.0).default_width(240.0).show(ctx, |ui| {
                        if draw_navigation(ui, dashboard, profile, view.backend, config_error, &mut outbox) {
                            logout = true;
                        }
                    });
                    egui::CentralPanel::default().show(ctx, |ui| {
                        draw_active_tab(ui, dashboard, profile, view.toast, &mut outbox);
                    });
                }
                None => logout = true,
            },
        }

        if let Some(remaining) = toast_overlay(ctx, view.toast, now) {
            ctx.request_repaint_after(remaining);
        }

        if login && self.controller.submit_login(now) {
            outbox.push(Request::Health);
        }
        if logout {
            info!("logout requested");
            self.controller.logout();
        }
        self.runner.submit_all(outbox);
    }
}
//*** END FILE: src/ui/app.rs ***//
