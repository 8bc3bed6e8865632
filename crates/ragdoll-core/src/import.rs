//! URDF import/export
//!
//! Every URDF link becomes a node and every joint a parent/child edge.
//! Links with at least one `<collision>` element carry a rigid body whose
//! mass is the link's `<inertial><mass>`.

use std::collections::HashMap;
use std::path::Path;

use crate::hierarchy::{Hierarchy, HierarchyError, Node, NodeId, RigidBody};

/// Errors that can occur during URDF import or export
#[derive(Debug, Clone, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to parse URDF: {0}")]
    UrdfParse(String),

    #[error("Failed to write URDF: {0}")]
    UrdfWrite(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Link not found: {0}")]
    LinkNotFound(String),

    #[error("Duplicate link name: {0}")]
    DuplicateLink(String),

    #[error("Empty URDF: no links defined")]
    EmptyUrdf,

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}

/// A hierarchy built from a URDF file, plus what is needed to write it back
#[derive(Debug, Clone)]
pub struct UrdfImport {
    pub hierarchy: Hierarchy,
    pub source: UrdfSource,
}

/// The parsed robot and its link-to-node mapping
#[derive(Debug, Clone)]
pub struct UrdfSource {
    robot: urdf_rs::Robot,
    link_nodes: HashMap<String, NodeId>,
    root: Option<NodeId>,
}

impl UrdfSource {
    /// Robot name from the `<robot>` element
    pub fn robot_name(&self) -> &str {
        &self.robot.name
    }

    /// First link (in file order) that is nobody's child
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Node created for a link
    pub fn node_for_link(&self, link: &str) -> Option<NodeId> {
        self.link_nodes.get(link).copied()
    }

    /// Render the robot with masses taken from `hierarchy`.
    ///
    /// Inertia tensors are scaled with the mass so the link keeps its shape.
    pub fn export(&self, hierarchy: &Hierarchy) -> Result<String, ImportError> {
        let mut robot = self.robot.clone();

        for link in &mut robot.links {
            let Some(mass) = self
                .node_for_link(&link.name)
                .and_then(|id| hierarchy.mass(id))
            else {
                continue;
            };

            let new_mass = f64::from(mass);
            let old_mass = link.inertial.mass.value;
            if old_mass > 0.0 {
                scale_inertia(&mut link.inertial.inertia, new_mass / old_mass);
            }
            link.inertial.mass.value = new_mass;
        }

        urdf_rs::write_to_string(&robot).map_err(|e| ImportError::UrdfWrite(e.to_string()))
    }

    /// Write the robot with updated masses to `path`
    pub fn save(&self, path: &Path, hierarchy: &Hierarchy) -> Result<(), ImportError> {
        let content = self.export(hierarchy)?;
        std::fs::write(path, content).map_err(|e| ImportError::Io(e.to_string()))?;
        tracing::info!("Exported URDF '{}' to {:?}", self.robot.name, path);
        Ok(())
    }
}

/// Import a URDF file
pub fn import_urdf(urdf_path: &Path) -> Result<UrdfImport, ImportError> {
    let robot =
        urdf_rs::read_file(urdf_path).map_err(|e| ImportError::UrdfParse(e.to_string()))?;
    let import = build_import(robot)?;
    tracing::info!(
        "Imported URDF '{}' from {:?} ({} links)",
        import.source.robot_name(),
        urdf_path,
        import.hierarchy.len()
    );
    Ok(import)
}

/// Import URDF from an XML string
pub fn import_urdf_str(xml: &str) -> Result<UrdfImport, ImportError> {
    let robot = urdf_rs::read_from_string(xml).map_err(|e| ImportError::UrdfParse(e.to_string()))?;
    build_import(robot)
}

fn build_import(robot: urdf_rs::Robot) -> Result<UrdfImport, ImportError> {
    if robot.links.is_empty() {
        return Err(ImportError::EmptyUrdf);
    }

    let mut hierarchy = Hierarchy::new();
    let mut link_nodes = HashMap::with_capacity(robot.links.len());

    for link in &robot.links {
        let node = convert_link(link);
        if link_nodes.insert(link.name.clone(), node.id).is_some() {
            return Err(ImportError::DuplicateLink(link.name.clone()));
        }
        hierarchy.add_node(node);
    }

    for joint in &robot.joints {
        let parent = *link_nodes
            .get(&joint.parent.link)
            .ok_or_else(|| ImportError::LinkNotFound(joint.parent.link.clone()))?;
        let child = *link_nodes
            .get(&joint.child.link)
            .ok_or_else(|| ImportError::LinkNotFound(joint.child.link.clone()))?;
        hierarchy.attach(parent, child)?;
    }

    let root = robot
        .links
        .iter()
        .filter_map(|link| link_nodes.get(&link.name).copied())
        .find(|id| hierarchy.parent_of(*id).is_none());

    Ok(UrdfImport {
        hierarchy,
        source: UrdfSource {
            robot,
            link_nodes,
            root,
        },
    })
}

fn convert_link(link: &urdf_rs::Link) -> Node {
    let mut node = Node::new(link.name.clone());
    if !link.collision.is_empty() {
        node.rigid_body = Some(RigidBody::new(link.inertial.mass.value as f32));
    }
    node
}

fn scale_inertia(inertia: &mut urdf_rs::Inertia, factor: f64) {
    inertia.ixx *= factor;
    inertia.ixy *= factor;
    inertia.ixz *= factor;
    inertia.iyy *= factor;
    inertia.iyz *= factor;
    inertia.izz *= factor;
}
