//! Main application

use std::time::Instant;

use ragdoll_core::Hierarchy;

use crate::actions::handle_action;
use crate::config::{SAVE_DELAY, SharedConfig, UiConfig, UiTheme, create_shared_config};
use crate::panels::{AdjusterPanel, HierarchyPanel, Panel};
use crate::state::{
    AppAction, AppState, DocumentSource, SessionDefaults, SharedAppState, StatusMessage,
    create_shared_state,
};

/// Ragdoll Adjuster editor window
pub struct RagdollAdjusterApp {
    app_state: SharedAppState,
    config: SharedConfig,
    hierarchy_panel: HierarchyPanel,
    adjuster_panel: AdjusterPanel,
    show_settings: bool,
}

impl RagdollAdjusterApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = create_shared_config();
        let (ui_config, defaults) = {
            let config = config.read();
            (
                config.config().ui.clone(),
                SessionDefaults::from(&config.config().editor),
            )
        };
        apply_ui_config(&cc.egui_ctx, &ui_config);

        let state = AppState::with_demo(defaults).unwrap_or_else(|e| {
            tracing::error!("Failed to build demo ragdoll: {}", e);
            AppState::new(Hierarchy::new(), DocumentSource::Demo, defaults)
        });

        Self {
            app_state: create_shared_state(state),
            config,
            hierarchy_panel: HierarchyPanel::new(),
            adjuster_panel: AdjusterPanel::new(),
            show_settings: false,
        }
    }

    fn queue(&self, action: AppAction) {
        self.app_state.lock().queue_action(action);
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Load Demo Ragdoll").clicked() {
                    self.queue(AppAction::LoadDemo);
                    ui.close_menu();
                }
                if ui.button("Open Scene…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Ragdoll Scene", &["ron"])
                        .pick_file()
                    {
                        self.queue(AppAction::OpenScene(path));
                    }
                    ui.close_menu();
                }
                if ui.button("Import URDF…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("URDF", &["urdf", "xml"])
                        .pick_file()
                    {
                        self.queue(AppAction::OpenUrdf(path));
                    }
                    ui.close_menu();
                }

                ui.separator();

                if ui.button("Save Scene…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Ragdoll Scene", &["ron"])
                        .set_file_name("ragdoll.ron")
                        .save_file()
                    {
                        self.queue(AppAction::SaveScene(path));
                    }
                    ui.close_menu();
                }
                let is_urdf = matches!(
                    self.app_state.lock().document,
                    DocumentSource::Urdf { .. }
                );
                if ui
                    .add_enabled(is_urdf, egui::Button::new("Export URDF…"))
                    .clicked()
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("URDF", &["urdf"])
                        .save_file()
                    {
                        self.queue(AppAction::ExportUrdf(path));
                    }
                    ui.close_menu();
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Settings").clicked() {
                    self.show_settings = true;
                    ui.close_menu();
                }
            });
        });
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        let state = self.app_state.lock();
        ui.horizontal(|ui| {
            let title = state.document.display_name();
            if state.modified {
                ui.label(format!("{} *", title));
            } else {
                ui.label(title);
            }
            ui.separator();
            match &state.status {
                Some(StatusMessage::Info(msg)) => {
                    ui.label(msg.as_str());
                }
                Some(StatusMessage::Error(msg)) => {
                    let color = ui.visuals().error_fg_color;
                    ui.colored_label(color, msg.as_str());
                }
                None => {
                    ui.weak("Ready");
                }
            }
        });
    }

    fn settings_window(&mut self, ctx: &egui::Context) {
        let config = self.config.clone();
        let app_state = self.app_state.clone();
        egui::Window::new("Settings")
            .open(&mut self.show_settings)
            .resizable(false)
            .show(ctx, |ui| {
                let mut manager = config.write();
                let mut settings = manager.config().clone();

                ui.heading("Editor");
                ui.checkbox(
                    &mut settings.editor.include_children_of_ignored,
                    "Include children of ignored parts",
                );
                ui.horizontal(|ui| {
                    ui.label("Default new mass:");
                    ui.add(
                        egui::DragValue::new(&mut settings.editor.default_new_mass)
                            .speed(0.1)
                            .range(0.0..=f32::MAX)
                            .suffix(" kg"),
                    );
                });
                ui.checkbox(
                    &mut settings.editor.show_massless_nodes,
                    "Show nodes without rigid body",
                );
                ui.horizontal(|ui| {
                    ui.label("Ratio decimals:");
                    ui.add(egui::DragValue::new(&mut settings.editor.ratio_decimals).range(0..=10));
                });

                ui.separator();
                ui.heading("UI");
                ui.horizontal(|ui| {
                    ui.radio_value(&mut settings.ui.theme, UiTheme::Dark, "Dark");
                    ui.radio_value(&mut settings.ui.theme, UiTheme::Light, "Light");
                });
                ui.add(egui::Slider::new(&mut settings.ui.font_size, 0.75..=2.0).text("Font size"));

                ui.separator();
                let now = Instant::now();
                let change = if ui.button("Reset to Defaults").clicked() {
                    manager.reset_to_defaults(now)
                } else {
                    manager.update(settings, now)
                };

                if change.ui {
                    apply_ui_config(ui.ctx(), &manager.config().ui);
                }
                if change.editor {
                    let defaults = SessionDefaults::from(&manager.config().editor);
                    app_state.lock().set_defaults(defaults);
                }
            });
    }

    /// Write settings once edits settle, or at once when the window is closed
    fn save_settings(&self, ctx: &egui::Context) {
        let mut manager = self.config.write();
        if !manager.has_unsaved_changes() {
            return;
        }

        let result = if self.show_settings {
            manager.save_if_settled(Instant::now()).map(|_| ())
        } else {
            manager.flush()
        };
        if let Err(e) = result {
            tracing::warn!("Failed to save settings: {}", e);
        }
        if manager.has_unsaved_changes() && self.show_settings {
            ctx.request_repaint_after(SAVE_DELAY);
        }
    }

    fn process_actions(&mut self) {
        let mut state = self.app_state.lock();
        for action in state.take_pending_actions() {
            handle_action(&mut state, action);
        }
    }
}

impl eframe::App for RagdollAdjusterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.menu_bar(ui);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.status_bar(ui);
        });

        egui::SidePanel::left("hierarchy")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                self.hierarchy_panel.ui(ui, &self.app_state, &self.config);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.adjuster_panel.name());
            ui.separator();
            self.adjuster_panel.ui(ui, &self.app_state, &self.config);
        });

        if self.show_settings {
            self.settings_window(ctx);
        }
        self.save_settings(ctx);

        self.process_actions();
    }
}

impl Drop for RagdollAdjusterApp {
    fn drop(&mut self) {
        if let Err(e) = self.config.write().flush() {
            tracing::warn!("Failed to save settings on exit: {}", e);
        }
    }
}

fn apply_ui_config(ctx: &egui::Context, ui_config: &UiConfig) {
    let visuals = match ui_config.theme {
        UiTheme::Dark => egui::Visuals::dark(),
        UiTheme::Light => egui::Visuals::light(),
    };
    ctx.set_visuals(visuals);
    ctx.set_zoom_factor(ui_config.font_size);
}
