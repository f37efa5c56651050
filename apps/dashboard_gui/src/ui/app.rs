use std::time::Duration;

use client_core::{
    ChannelEvent, ClientSettings, DashboardController, DashboardView, UserAction,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiEvent},
    orchestration::{dispatch_backend_command, BridgeRequestSink},
};
use crate::ui::{theme, widgets};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub server_url: String,
    pub ws_path: String,
    pub training: bool,
}

impl From<&ClientSettings> for StartupConfig {
    fn from(settings: &ClientSettings) -> Self {
        Self {
            server_url: settings.server_url.clone(),
            ws_path: settings.ws_path.clone(),
            training: settings.training,
        }
    }
}

pub struct DashboardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: DashboardController<BridgeRequestSink>,
    server_url: String,
    ws_path: String,
    status: String,
    last_error: Option<UiError>,
    request_training_on_connect: bool,
}

impl DashboardApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let mut app = Self {
            controller: DashboardController::new(BridgeRequestSink::new(cmd_tx.clone())),
            cmd_tx,
            ui_rx,
            server_url: startup.server_url,
            ws_path: startup.ws_path,
            status: "Not connected".to_string(),
            last_error: None,
            request_training_on_connect: startup.training,
        };
        app.connect();
        app
    }

    fn connect(&mut self) {
        self.last_error = None;
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Connect {
                server_url: self.server_url.trim().to_string(),
                ws_path: self.ws_path.clone(),
            },
            &mut self.status,
        );
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Channel(event) => {
                    match &event {
                        ChannelEvent::Connected => {
                            self.status = format!("Connected to {}", self.server_url.trim());
                            self.last_error = None;
                        }
                        ChannelEvent::Disconnected => {
                            self.status = "Disconnected".to_string();
                        }
                        ChannelEvent::Server(_) => {}
                    }
                    let connected = event == ChannelEvent::Connected;
                    self.controller.handle_channel_event(event);
                    if connected && self.request_training_on_connect {
                        self.request_training_on_connect = false;
                        self.controller.dispatch(UserAction::SetTraining(true));
                    }
                }
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), "{}", err.message());
                    self.status = err.status_text();
                    self.last_error = Some(err);
                }
            }
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context, view: &DashboardView) {
        egui::TopBottomPanel::top("connection_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let (dot, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                let color = if view.connected {
                    theme::CONNECTED
                } else {
                    theme::DISCONNECTED
                };
                ui.painter().circle_filled(dot.center(), 5.0, color);

                ui.label("Server");
                ui.add_enabled(
                    !view.connected,
                    egui::TextEdit::singleline(&mut self.server_url).desired_width(240.0),
                );
                if view.connected {
                    if ui.button("Disconnect").clicked() {
                        dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::Disconnect,
                            &mut self.status,
                        );
                    }
                } else if ui.button("Connect").clicked() {
                    self.connect();
                }

                if self.last_error.is_some() {
                    ui.colored_label(theme::ERROR_TEXT, &self.status);
                } else {
                    ui.label(&self.status);
                }
            });
        });
    }

    fn show_controls(ui: &mut egui::Ui, view: &DashboardView, actions: &mut Vec<UserAction>) {
        let controls = view.controls;
        ui.horizontal(|ui| {
            if ui
                .add_enabled(controls.start_enabled, egui::Button::new("Start"))
                .clicked()
            {
                actions.push(UserAction::Start);
            }
            if ui
                .add_enabled(controls.stop_enabled, egui::Button::new("Stop"))
                .clicked()
            {
                actions.push(UserAction::Stop);
            }
            if ui
                .add_enabled(controls.reset_enabled, egui::Button::new("Reset"))
                .clicked()
            {
                actions.push(UserAction::Reset);
            }

            let mut checked = controls.training_checked;
            if ui
                .add_enabled(
                    controls.training_toggle_enabled,
                    egui::Checkbox::new(&mut checked, "Training mode"),
                )
                .changed()
            {
                actions.push(UserAction::SetTraining(checked));
            }
        });
    }

    fn show_history_panel(ctx: &egui::Context, view: &DashboardView) {
        egui::SidePanel::right("history_panel")
            .default_width(340.0)
            .show(ctx, |ui| {
                ui.heading("Action History");
                egui::ScrollArea::vertical()
                    .id_salt("action_history")
                    .max_height(ui.available_height() * 0.5)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for item in &view.actions {
                            widgets::action_item(ui, item);
                        }
                    });

                ui.separator();
                ui.heading("Episode Summaries");
                egui::ScrollArea::vertical()
                    .id_salt("episode_summaries")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for item in &view.summaries {
                            widgets::summary_item(ui, item);
                            ui.add_space(4.0);
                        }
                    });
            });
    }

    fn show_intersection(ctx: &egui::Context, view: &DashboardView, actions: &mut Vec<UserAction>) {
        egui::CentralPanel::default().show(ctx, |ui| {
            Self::show_controls(ui, view, actions);
            ui.separator();

            ui.heading("Statistics");
            widgets::stats_grid(ui, &view.stats);
            ui.separator();

            ui.heading("Traffic Lights");
            ui.horizontal(|ui| {
                for light in &view.lights {
                    widgets::traffic_light(ui, light);
                    ui.add_space(16.0);
                }
            });
            ui.separator();

            ui.heading("Queues");
            for queue in &view.queues {
                widgets::queue_strip(ui, queue);
            }
        });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        let view = self.controller.render();
        let mut actions = Vec::new();
        self.show_top_bar(ctx, &view);
        Self::show_history_panel(ctx, &view);
        Self::show_intersection(ctx, &view, &mut actions);

        for action in actions {
            self.controller.dispatch(action);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
