//! UI panels

mod adjuster;
mod hierarchy;

pub use adjuster::AdjusterPanel;
pub use hierarchy::HierarchyPanel;

use crate::config::SharedConfig;
use crate::state::SharedAppState;

/// A region of the editor window
pub trait Panel {
    /// Panel title
    fn name(&self) -> &str;

    /// Render the panel. Panels never mutate the session directly; they queue actions.
    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState, config: &SharedConfig);
}
