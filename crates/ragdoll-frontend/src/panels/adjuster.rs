//! Adjuster panel - root/ignore selection, mass table, Check/Apply/Clear

use egui::{ComboBox, DragValue, RichText, ScrollArea};
use ragdoll_core::{Hierarchy, NodeId};

use crate::config::SharedConfig;
use crate::panels::Panel;
use crate::state::{AppAction, SharedAppState};

const DESCRIPTION: &str =
    "Pick the ragdoll root and press Check, then Apply to redistribute a new total mass.";

/// Main panel driving the mass adjustment session
pub struct AdjusterPanel;

impl AdjusterPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AdjusterPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for AdjusterPanel {
    fn name(&self) -> &str {
        "Ragdoll Adjuster"
    }

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState, config: &SharedConfig) {
        let ratio_decimals = config.read().config().editor.ratio_decimals;
        let mut state = app_state.lock();
        let mut actions: Vec<AppAction> = Vec::new();

        ui.add_space(10.0);
        ui.label(DESCRIPTION);
        ui.add_space(6.0);

        let hierarchy = &state.hierarchy;
        let adjuster = &state.adjuster;
        let root = adjuster.root();

        // Root picker
        let root_text = root
            .and_then(|id| hierarchy.name_of(id))
            .unwrap_or("None")
            .to_string();
        ComboBox::from_label("Ragdoll root")
            .selected_text(root_text)
            .show_ui(ui, |ui| {
                if ui.selectable_label(root.is_none(), "None").clicked() {
                    actions.push(AppAction::SetRoot(None));
                }
                for id in hierarchy.iter_preorder() {
                    if ui
                        .selectable_label(root == Some(id), indented_name(hierarchy, id))
                        .clicked()
                    {
                        actions.push(AppAction::SetRoot(Some(id)));
                    }
                }
            });

        // Ignore list
        ui.add_space(4.0);
        ui.label("Ignored parts");
        ui.indent("ignored_parts", |ui| {
            if adjuster.ignored().is_empty() {
                ui.weak("(none)");
            }
            for id in adjuster.ignored() {
                ui.horizontal(|ui| {
                    ui.label(hierarchy.name_of(*id).unwrap_or("<missing>"));
                    if ui.small_button("✖").on_hover_text("Stop ignoring").clicked() {
                        actions.push(AppAction::RemoveIgnored(*id));
                    }
                });
            }

            ComboBox::from_id_salt("add_ignored")
                .selected_text("Add…")
                .show_ui(ui, |ui| {
                    for id in ignore_candidates(hierarchy, root, adjuster.ignored()) {
                        if ui
                            .selectable_label(false, indented_name(hierarchy, id))
                            .clicked()
                        {
                            actions.push(AppAction::AddIgnored(id));
                        }
                    }
                });
        });

        let mut include_children = adjuster.include_children_of_ignored();
        if ui
            .checkbox(&mut include_children, "Include children of ignored parts")
            .changed()
        {
            actions.push(AppAction::SetIncludeChildren(include_children));
        }

        ui.add_space(5.0);

        let mut new_mass = adjuster.new_mass();
        ui.horizontal(|ui| {
            ui.label("New mass:");
            if ui
                .add(DragValue::new(&mut new_mass).speed(0.1).range(0.0..=f32::MAX).suffix(" kg"))
                .changed()
            {
                actions.push(AppAction::SetNewMass(new_mass));
            }
        });

        ui.add_space(20.0);

        // Information
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.label(format!("Current total mass: {}", adjuster.total_mass_label()));
        });

        if let Some(report) = adjuster.report(hierarchy) {
            ScrollArea::vertical()
                .max_height(320.0)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    if report.is_empty() {
                        ui.weak("No parts with a rigid body under this root.");
                    }
                    for row in &report.rows {
                        ui.label(RichText::new(row.name.as_str()).strong());
                        let text = format!("Current mass:\t{}", mass_text(row.mass));
                        if row.mass.is_some() {
                            ui.label(text);
                        } else {
                            let color = ui.visuals().error_fg_color;
                            ui.colored_label(color, text)
                                .on_hover_text("Rigid body removed since the check");
                        }
                        ui.label(format!("Current ratio:\t{:.*}", ratio_decimals, row.ratio));
                        ui.separator();
                    }
                });
        }

        ui.add_space(10.0);

        let checked = adjuster.is_checked();
        ui.horizontal(|ui| {
            if ui.button("Check").clicked() {
                actions.push(AppAction::Check);
            }
            if ui
                .add_enabled(checked, egui::Button::new("Apply"))
                .on_disabled_hover_text("Run Check first")
                .clicked()
            {
                actions.push(AppAction::Apply);
            }
            if ui.button("Clear").clicked() {
                actions.push(AppAction::Clear);
            }
        });

        for action in actions {
            state.queue_action(action);
        }
    }
}

/// Node name indented by depth for flat pickers
fn indented_name(hierarchy: &Hierarchy, id: NodeId) -> String {
    let name = hierarchy.name_of(id).unwrap_or("<missing>");
    format!("{}{}", "  ".repeat(hierarchy.depth(id)), name)
}

fn mass_text(mass: Option<f32>) -> String {
    match mass {
        Some(mass) => mass.to_string(),
        None => "missing".to_string(),
    }
}

/// Nodes that may still be added to the ignore list
fn ignore_candidates(hierarchy: &Hierarchy, root: Option<NodeId>, ignored: &[NodeId]) -> Vec<NodeId> {
    let scope = match root {
        Some(root) => hierarchy.subtree(root),
        None => hierarchy.iter_preorder(),
    };
    scope
        .into_iter()
        .filter(|id| Some(*id) != root && !ignored.contains(id))
        .collect()
}
