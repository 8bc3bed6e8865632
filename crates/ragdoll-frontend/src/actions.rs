//! Action handling: the command interface between panels and the session

use std::path::Path;

use ragdoll_core::{ApplyOutcome, Scene, import_urdf, presets};

use crate::state::{AppAction, AppState, DocumentSource};

/// Handle a single queued action
pub fn handle_action(state: &mut AppState, action: AppAction) {
    tracing::debug!("Handling action: {:?}", action);

    match action {
        AppAction::LoadDemo => handle_load_demo(state),
        AppAction::OpenScene(path) => handle_open_scene(state, &path),
        AppAction::OpenUrdf(path) => handle_open_urdf(state, &path),
        AppAction::SaveScene(path) => handle_save_scene(state, &path),
        AppAction::ExportUrdf(path) => handle_export_urdf(state, &path),

        AppAction::SetRoot(root) => state.adjuster.set_root(root),
        AppAction::AddIgnored(id) => state.adjuster.add_ignored(id),
        AppAction::RemoveIgnored(id) => state.adjuster.remove_ignored(id),
        AppAction::SetIncludeChildren(include) => {
            state.adjuster.set_include_children_of_ignored(include);
        }
        AppAction::SetNewMass(mass) => state.adjuster.set_new_mass(mass),

        AppAction::Check => handle_check(state),
        AppAction::Apply => handle_apply(state),
        AppAction::Clear => {
            state.clear_session();
            state.status = None;
        }
    }
}

fn handle_load_demo(state: &mut AppState) {
    match presets::humanoid() {
        Ok(hierarchy) => {
            state.load_document(hierarchy, DocumentSource::Demo);
            state.info("Loaded demo ragdoll");
        }
        Err(e) => state.error(format!("Failed to build demo ragdoll: {}", e)),
    }
}

fn handle_open_scene(state: &mut AppState, path: &Path) {
    match Scene::load(path) {
        Ok(scene) => {
            let name = scene.name.clone();
            state.load_document(scene.hierarchy, DocumentSource::Scene(path.to_path_buf()));
            state.info(format!("Opened scene '{}'", name));
        }
        Err(e) => state.error(format!("Failed to open scene: {}", e)),
    }
}

fn handle_open_urdf(state: &mut AppState, path: &Path) {
    match import_urdf(path) {
        Ok(import) => {
            let name = import.source.robot_name().to_string();
            state.load_document(
                import.hierarchy,
                DocumentSource::Urdf {
                    path: path.to_path_buf(),
                    source: import.source,
                },
            );
            state.info(format!("Imported robot '{}'", name));
        }
        Err(e) => state.error(format!("Failed to import URDF: {}", e)),
    }
}

fn handle_save_scene(state: &mut AppState, path: &Path) {
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| state.document.display_name());

    let scene = Scene::new(name, state.hierarchy.clone());
    match scene.save(path) {
        Ok(()) => {
            state.document = DocumentSource::Scene(path.to_path_buf());
            state.modified = false;
            state.info(format!("Saved scene to {}", path.display()));
        }
        Err(e) => state.error(format!("Failed to save scene: {}", e)),
    }
}

fn handle_export_urdf(state: &mut AppState, path: &Path) {
    let DocumentSource::Urdf { source, .. } = &state.document else {
        state.error("Only documents imported from URDF can be exported as URDF");
        return;
    };

    match source.save(path, &state.hierarchy) {
        Ok(()) => {
            state.modified = false;
            state.info(format!("Exported URDF to {}", path.display()));
        }
        Err(e) => state.error(format!("Failed to export URDF: {}", e)),
    }
}

fn handle_check(state: &mut AppState) {
    if state.adjuster.root().is_none() {
        state.error("Pick a ragdoll root before checking");
        return;
    }

    match state.adjuster.check(&state.hierarchy) {
        Some(report) => state.info(format!(
            "Found {} parts, total mass {}",
            report.rows.len(),
            report.total_mass
        )),
        None => state.error("The selected root is not part of this document"),
    }
}

fn handle_apply(state: &mut AppState) {
    let new_mass = state.adjuster.new_mass();

    match state.adjuster.apply_new_mass(&mut state.hierarchy) {
        Ok(ApplyOutcome::Skipped) => state.info("New mass is zero; nothing applied"),
        Ok(ApplyOutcome::Applied {
            parts,
            root_updated,
        }) => {
            state.modified = true;
            // Apply ends the session; start the next one from the default
            let seed = state.defaults().new_mass;
            state.adjuster.set_new_mass(seed);
            if root_updated {
                state.info(format!("Distributed {} over {} parts", new_mass, parts));
            } else {
                state.info(format!(
                    "Distributed {} over {} parts (root has no rigid body)",
                    new_mass, parts
                ));
            }
        }
        Err(e) => state.error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::state::{SessionDefaults, StatusMessage};

    fn demo_state() -> AppState {
        AppState::with_demo(SessionDefaults::default()).unwrap()
    }

    #[test]
    fn test_check_apply_cycle() {
        let mut state = demo_state();
        let pelvis = state.hierarchy.find_by_name("pelvis").unwrap();
        let head = state.hierarchy.find_by_name("head").unwrap();

        handle_action(&mut state, AppAction::SetRoot(Some(pelvis)));
        handle_action(&mut state, AppAction::SetNewMass(112.0));
        handle_action(&mut state, AppAction::Check);
        assert!(state.adjuster.is_checked());
        assert!(matches!(state.status, Some(StatusMessage::Info(_))));

        handle_action(&mut state, AppAction::Apply);
        assert!(!state.adjuster.is_checked());
        assert!(state.modified);
        assert_eq!(state.hierarchy.mass(pelvis), Some(112.0));
        // head is 5 of 56 kg
        assert_abs_diff_eq!(state.hierarchy.mass(head).unwrap(), 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_apply_before_check_reports_error() {
        let mut state = demo_state();
        let pelvis = state.hierarchy.find_by_name("pelvis").unwrap();

        handle_action(&mut state, AppAction::SetRoot(Some(pelvis)));
        handle_action(&mut state, AppAction::SetNewMass(50.0));
        handle_action(&mut state, AppAction::Apply);

        assert!(matches!(state.status, Some(StatusMessage::Error(_))));
        assert!(!state.modified);
        assert_eq!(state.hierarchy.mass(pelvis), Some(10.0));
    }

    #[test]
    fn test_check_without_root_reports_error() {
        let mut state = demo_state();
        handle_action(&mut state, AppAction::Check);

        assert!(!state.adjuster.is_checked());
        assert!(matches!(state.status, Some(StatusMessage::Error(_))));
    }

    #[test]
    fn test_clear_resets_session() {
        let mut state = demo_state();
        let pelvis = state.hierarchy.find_by_name("pelvis").unwrap();
        let spine = state.hierarchy.find_by_name("spine").unwrap();

        handle_action(&mut state, AppAction::SetRoot(Some(pelvis)));
        handle_action(&mut state, AppAction::AddIgnored(spine));
        handle_action(&mut state, AppAction::Check);
        handle_action(&mut state, AppAction::Clear);

        assert!(!state.adjuster.is_checked());
        assert_eq!(state.adjuster.root(), None);
        assert!(state.adjuster.ignored().is_empty());
        assert_eq!(state.status, None);
    }

    #[test]
    fn test_default_new_mass_survives_clear_and_apply() {
        let defaults = SessionDefaults {
            include_children_of_ignored: false,
            new_mass: 80.0,
        };
        let mut state = AppState::with_demo(defaults).unwrap();
        let pelvis = state.hierarchy.find_by_name("pelvis").unwrap();
        assert_eq!(state.adjuster.new_mass(), 80.0);

        handle_action(&mut state, AppAction::SetNewMass(30.0));
        handle_action(&mut state, AppAction::Clear);
        assert_eq!(state.adjuster.new_mass(), 80.0);

        handle_action(&mut state, AppAction::SetRoot(Some(pelvis)));
        handle_action(&mut state, AppAction::Check);
        handle_action(&mut state, AppAction::Apply);
        assert_eq!(state.hierarchy.mass(pelvis), Some(80.0));
        assert!(!state.adjuster.is_checked());
        assert_eq!(state.adjuster.new_mass(), 80.0);
    }

    #[test]
    fn test_load_demo_clears_session() {
        let mut state = demo_state();
        let pelvis = state.hierarchy.find_by_name("pelvis").unwrap();
        handle_action(&mut state, AppAction::SetRoot(Some(pelvis)));
        handle_action(&mut state, AppAction::Check);

        handle_action(&mut state, AppAction::LoadDemo);
        assert!(!state.adjuster.is_checked());
        assert_eq!(state.adjuster.root(), None);
    }

    #[test]
    fn test_export_urdf_requires_urdf_document() {
        let mut state = demo_state();
        let path = std::env::temp_dir().join("ragdoll-frontend-never-written.urdf");
        handle_action(&mut state, AppAction::ExportUrdf(path.clone()));

        assert!(matches!(state.status, Some(StatusMessage::Error(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_and_open_scene() {
        let mut state = demo_state();
        let pelvis = state.hierarchy.find_by_name("pelvis").unwrap();
        handle_action(&mut state, AppAction::SetRoot(Some(pelvis)));
        handle_action(&mut state, AppAction::SetNewMass(28.0));
        handle_action(&mut state, AppAction::Check);
        handle_action(&mut state, AppAction::Apply);

        let path = std::env::temp_dir().join(format!("ragdoll-{}.ron", uuid::Uuid::new_v4()));
        handle_action(&mut state, AppAction::SaveScene(path.clone()));
        assert!(!state.modified);

        let mut reopened = demo_state();
        handle_action(&mut reopened, AppAction::OpenScene(path.clone()));
        assert!(matches!(reopened.document, DocumentSource::Scene(_)));
        assert_eq!(reopened.hierarchy.mass(pelvis), Some(28.0));

        std::fs::remove_file(&path).unwrap();
    }
}
