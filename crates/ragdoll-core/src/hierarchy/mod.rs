//! Body hierarchy (scene graph of ragdoll nodes)

mod graph;
pub mod presets;
mod traverse;
mod validate;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Identity of a node. Names may collide, ids never do.
pub type NodeId = Uuid;

/// Hierarchy-related errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HierarchyError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Attaching would create a cycle")]
    WouldCreateCycle,

    #[error("Node already has a parent: {0}")]
    AlreadyHasParent(NodeId),

    #[error("Node has no parent: {0}")]
    NoParent(NodeId),

    #[error("Node has no rigid body: {0}")]
    NoRigidBody(NodeId),

    #[error("Node is stored under another id: {0}")]
    IdMismatch(NodeId),

    #[error("Node is listed as a child more than once: {0}")]
    DuplicateChild(NodeId),

    #[error("Parent and child links disagree for node {0}")]
    LinkMismatch(NodeId),

    #[error("Node is its own ancestor: {0}")]
    Cycle(NodeId),
}

/// Mass-bearing association of a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    /// Mass in kg
    pub mass: f32,
}

impl RigidBody {
    pub fn new(mass: f32) -> Self {
        Self { mass }
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        Self { mass: 1.0 }
    }
}

/// A node in the body hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    /// Rigid body attached to this node's collider, if any
    pub rigid_body: Option<RigidBody>,
}

impl Node {
    /// Create a node without a rigid body (pure transform)
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            rigid_body: None,
        }
    }

    /// Create a node carrying a rigid body of the given mass
    pub fn with_mass(name: impl Into<String>, mass: f32) -> Self {
        Self {
            rigid_body: Some(RigidBody::new(mass)),
            ..Self::new(name)
        }
    }

    /// Mass of the attached rigid body
    pub fn mass(&self) -> Option<f32> {
        self.rigid_body.map(|body| body.mass)
    }
}

/// Tree of nodes. A hierarchy may hold several disconnected trees.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hierarchy {
    /// All nodes by id
    pub nodes: HashMap<NodeId, Node>,
    /// Parent -> ordered children
    pub children: HashMap<NodeId, Vec<NodeId>>,
    /// Child -> parent
    pub parent: HashMap<NodeId, NodeId>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Display name of a node, if it exists
    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).map(|node| node.name.as_str())
    }

    /// Mass of a node's rigid body (None if the node is unknown or has no body)
    pub fn mass(&self, id: NodeId) -> Option<f32> {
        self.nodes.get(&id).and_then(Node::mass)
    }

    /// Overwrite the mass of a node's rigid body
    pub fn set_mass(&mut self, id: NodeId, mass: f32) -> Result<(), HierarchyError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(HierarchyError::NodeNotFound(id))?;
        let body = node
            .rigid_body
            .as_mut()
            .ok_or(HierarchyError::NoRigidBody(id))?;
        body.mass = mass;
        Ok(())
    }
}
