//! Application state shared between panels

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use ragdoll_core::{Hierarchy, HierarchyError, MassAdjuster, NodeId, UrdfSource, presets};

use crate::config::EditorConfig;

/// Shared application state type
pub type SharedAppState = Arc<Mutex<AppState>>;

/// Where the current hierarchy came from
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// Built-in humanoid ragdoll
    Demo,
    /// RON scene file
    Scene(PathBuf),
    /// URDF file, kept so masses can be exported back
    Urdf { path: PathBuf, source: UrdfSource },
}

impl DocumentSource {
    pub fn display_name(&self) -> String {
        match self {
            DocumentSource::Demo => "Demo ragdoll".to_string(),
            DocumentSource::Scene(path) | DocumentSource::Urdf { path, .. } => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }
}

/// Message shown in the status bar
#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// Actions queued by panels and handled after rendering
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // File actions
    LoadDemo,
    OpenScene(PathBuf),
    OpenUrdf(PathBuf),
    SaveScene(PathBuf),
    ExportUrdf(PathBuf),

    // Selection
    SetRoot(Option<NodeId>),
    AddIgnored(NodeId),
    RemoveIgnored(NodeId),
    SetIncludeChildren(bool),
    SetNewMass(f32),

    // Session commands
    Check,
    Apply,
    Clear,
}

/// Session inputs taken from the editor settings
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionDefaults {
    pub include_children_of_ignored: bool,
    /// Value of the new mass field after start, Clear and Apply
    pub new_mass: f32,
}

impl From<&EditorConfig> for SessionDefaults {
    fn from(editor: &EditorConfig) -> Self {
        Self {
            include_children_of_ignored: editor.include_children_of_ignored,
            new_mass: editor.default_new_mass,
        }
    }
}

/// Main application state
pub struct AppState {
    /// Hierarchy being edited
    pub hierarchy: Hierarchy,
    /// Origin of the hierarchy
    pub document: DocumentSource,
    /// The window's adjustment session
    pub adjuster: MassAdjuster,
    /// Last outcome to show in the status bar
    pub status: Option<StatusMessage>,
    /// Masses changed since the document was loaded or saved
    pub modified: bool,
    defaults: SessionDefaults,
    pending_actions: Vec<AppAction>,
}

impl AppState {
    pub fn new(hierarchy: Hierarchy, document: DocumentSource, defaults: SessionDefaults) -> Self {
        let mut adjuster = MassAdjuster::new();
        adjuster.set_include_children_of_ignored(defaults.include_children_of_ignored);
        adjuster.set_new_mass(defaults.new_mass);

        Self {
            hierarchy,
            document,
            adjuster,
            status: None,
            modified: false,
            defaults,
            pending_actions: Vec::new(),
        }
    }

    /// State holding the demo humanoid
    pub fn with_demo(defaults: SessionDefaults) -> Result<Self, HierarchyError> {
        Ok(Self::new(presets::humanoid()?, DocumentSource::Demo, defaults))
    }

    pub fn defaults(&self) -> SessionDefaults {
        self.defaults
    }

    /// Adopt edited settings.
    ///
    /// A changed include-children default is pushed into the live session,
    /// which drops pending check results like any other selection change.
    /// The new mass default waits for the next Clear or Apply.
    pub fn set_defaults(&mut self, defaults: SessionDefaults) {
        if defaults.include_children_of_ignored != self.defaults.include_children_of_ignored {
            self.adjuster
                .set_include_children_of_ignored(defaults.include_children_of_ignored);
        }
        self.defaults = defaults;
    }

    /// Clear the session and seed the new mass field again
    pub fn clear_session(&mut self) {
        self.adjuster.clear();
        self.adjuster.set_new_mass(self.defaults.new_mass);
    }

    /// Replace the document; the session starts over
    pub fn load_document(&mut self, hierarchy: Hierarchy, document: DocumentSource) {
        self.clear_session();
        self.hierarchy = hierarchy;
        self.document = document;
        self.modified = false;
    }

    pub fn queue_action(&mut self, action: AppAction) {
        self.pending_actions.push(action);
    }

    pub fn take_pending_actions(&mut self) -> Vec<AppAction> {
        std::mem::take(&mut self.pending_actions)
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.status = Some(StatusMessage::Info(message.into()));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("{}", message);
        self.status = Some(StatusMessage::Error(message));
    }
}

/// Wrap a state for sharing between panels
pub fn create_shared_state(state: AppState) -> SharedAppState {
    Arc::new(Mutex::new(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> SessionDefaults {
        SessionDefaults {
            include_children_of_ignored: true,
            new_mass: 70.0,
        }
    }

    #[test]
    fn test_new_state_uses_defaults() {
        let state = AppState::with_demo(defaults()).unwrap();
        assert!(state.adjuster.include_children_of_ignored());
        assert_eq!(state.adjuster.new_mass(), 70.0);
    }

    #[test]
    fn test_defaults_from_editor_config() {
        let editor = EditorConfig {
            default_new_mass: 42.0,
            ..EditorConfig::default()
        };
        let defaults = SessionDefaults::from(&editor);
        assert_eq!(defaults.new_mass, 42.0);
        assert!(!defaults.include_children_of_ignored);
    }

    #[test]
    fn test_changed_include_default_reaches_live_session() {
        let mut state = AppState::with_demo(SessionDefaults::default()).unwrap();
        let pelvis = state.hierarchy.find_by_name("pelvis").unwrap();
        state.adjuster.set_root(Some(pelvis));
        state.adjuster.check(&state.hierarchy).unwrap();

        // Unrelated default: session untouched
        state.set_defaults(SessionDefaults {
            include_children_of_ignored: false,
            new_mass: 5.0,
        });
        assert!(state.adjuster.is_checked());
        assert_eq!(state.adjuster.new_mass(), 0.0);

        state.set_defaults(defaults());
        assert!(state.adjuster.include_children_of_ignored());
        assert!(!state.adjuster.is_checked());
        assert_eq!(state.adjuster.root(), Some(pelvis));
    }

    #[test]
    fn test_load_document_seeds_new_mass() {
        let mut state = AppState::with_demo(defaults()).unwrap();
        state.adjuster.set_new_mass(12.0);

        state.load_document(Hierarchy::new(), DocumentSource::Demo);
        assert_eq!(state.adjuster.new_mass(), 70.0);
    }
}
