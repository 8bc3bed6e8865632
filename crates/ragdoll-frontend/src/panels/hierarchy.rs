//! Hierarchy panel - tree view of the document

use egui::RichText;
use ragdoll_core::{Hierarchy, NodeId, exclusion_set};

use crate::config::SharedConfig;
use crate::panels::Panel;
use crate::state::{AppAction, SharedAppState};

/// Hierarchy panel showing the node tree
pub struct HierarchyPanel;

impl HierarchyPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HierarchyPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for HierarchyPanel {
    fn name(&self) -> &str {
        "Hierarchy"
    }

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState, config: &SharedConfig) {
        let show_massless = config.read().config().editor.show_massless_nodes;
        let mut state = app_state.lock();
        let mut actions: Vec<AppAction> = Vec::new();

        ui.heading(state.document.display_name());
        ui.separator();

        let hierarchy = &state.hierarchy;
        if hierarchy.is_empty() {
            ui.weak("No nodes in this document.");
        } else {
            let root = state.adjuster.root();
            let ignored = state.adjuster.ignored();
            let excluded = exclusion_set(hierarchy, state.adjuster.selection());

            egui::ScrollArea::vertical().show(ui, |ui| {
                for id in hierarchy.iter_preorder() {
                    let Some(node) = hierarchy.get(id) else {
                        continue;
                    };
                    if node.rigid_body.is_none() && !show_massless && Some(id) != root {
                        continue;
                    }

                    let is_ignored = ignored.contains(&id);
                    let mut text = RichText::new(node_label(hierarchy, id));
                    if excluded.contains(&id) {
                        text = text.weak().strikethrough();
                    } else if node.rigid_body.is_none() {
                        text = text.weak();
                    }

                    ui.horizontal(|ui| {
                        ui.add_space(hierarchy.depth(id) as f32 * 16.0);

                        let response = ui
                            .selectable_label(root == Some(id), text)
                            .on_hover_text("Click to use as ragdoll root");
                        if response.clicked() {
                            actions.push(AppAction::SetRoot(Some(id)));
                        }

                        response.context_menu(|ui| {
                            let label = if is_ignored { "Stop ignoring" } else { "Ignore" };
                            if ui.button(label).clicked() {
                                actions.push(if is_ignored {
                                    AppAction::RemoveIgnored(id)
                                } else {
                                    AppAction::AddIgnored(id)
                                });
                                ui.close_menu();
                            }
                        });
                    });
                }
            });
        }

        for action in actions {
            state.queue_action(action);
        }
    }
}

fn node_label(hierarchy: &Hierarchy, id: NodeId) -> String {
    let Some(node) = hierarchy.get(id) else {
        return String::new();
    };
    let icon = if hierarchy.children_of(id).is_empty() {
        "•"
    } else {
        "▼"
    };
    match node.mass() {
        Some(mass) => format!("{} {} ({} kg)", icon, node.name, mass),
        None => format!("{} {}", icon, node.name),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::RwLock;
    use ragdoll_core::Node;

    use super::*;
    use crate::config::{AppConfig, ConfigManager};
    use crate::state::{AppState, DocumentSource, SessionDefaults, create_shared_state};

    fn render(panel: &mut HierarchyPanel, app_state: &SharedAppState) {
        let config: SharedConfig = Arc::new(RwLock::new(ConfigManager::in_memory(AppConfig::new())));
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| panel.ui(ui, app_state, &config));
        });
    }

    #[test]
    fn test_empty_document_keeps_queued_actions() {
        let state = AppState::new(Hierarchy::new(), DocumentSource::Demo, SessionDefaults::default());
        let app_state = create_shared_state(state);
        app_state.lock().queue_action(AppAction::Check);

        render(&mut HierarchyPanel::new(), &app_state);

        assert_eq!(app_state.lock().take_pending_actions(), vec![AppAction::Check]);
    }

    #[test]
    fn test_tree_renders_without_queuing() {
        let state = AppState::with_demo(SessionDefaults::default()).unwrap();
        let app_state = create_shared_state(state);

        render(&mut HierarchyPanel::new(), &app_state);

        assert!(app_state.lock().take_pending_actions().is_empty());
    }

    #[test]
    fn test_node_label_shows_mass() {
        let mut hierarchy = Hierarchy::new();
        let root = hierarchy.add_node(Node::new("root"));
        let arm = hierarchy.add_child(root, Node::with_mass("arm", 2.5)).unwrap();

        assert_eq!(node_label(&hierarchy, root), "▼ root");
        assert_eq!(node_label(&hierarchy, arm), "• arm (2.5 kg)");
    }
}
