//! Scene file format (RON)

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hierarchy::{Hierarchy, HierarchyError};

/// Errors while reading or writing scene files
#[derive(Debug, Clone, Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Deserialization error: {0}")]
    Deserialize(String),

    #[error("Unsupported scene version {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid hierarchy: {0}")]
    InvalidHierarchy(#[from] HierarchyError),
}

/// A named hierarchy stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub version: u32,
    pub name: String,
    pub hierarchy: Hierarchy,
}

impl Scene {
    /// Current scene format version
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(name: impl Into<String>, hierarchy: Hierarchy) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            name: name.into(),
            hierarchy,
        }
    }

    pub fn from_ron_str(content: &str) -> Result<Self, SceneError> {
        let scene: Scene =
            ron::from_str(content).map_err(|e| SceneError::Deserialize(e.to_string()))?;
        if scene.version > Self::CURRENT_VERSION {
            return Err(SceneError::UnsupportedVersion(scene.version));
        }
        scene.hierarchy.validate()?;
        Ok(scene)
    }

    pub fn to_ron_string(&self) -> Result<String, SceneError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SceneError::Serialize(e.to_string()))
    }

    /// Load a scene from a `.ron` file
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path).map_err(|e| SceneError::Io(e.to_string()))?;
        let scene = Self::from_ron_str(&content)?;
        tracing::info!("Loaded scene '{}' from {:?}", scene.name, path);
        Ok(scene)
    }

    /// Save the scene to a `.ron` file
    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        let content = self.to_ron_string()?;
        std::fs::write(path, content).map_err(|e| SceneError::Io(e.to_string()))?;
        tracing::info!("Saved scene '{}' to {:?}", self.name, path);
        Ok(())
    }
}
