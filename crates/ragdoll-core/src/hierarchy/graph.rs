//! Graph operations for Hierarchy (add, remove, attach, detach)

use super::{Hierarchy, HierarchyError, Node, NodeId};

impl Hierarchy {
    /// Add a detached node (it becomes a root until attached)
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Add a node as the last child of `parent`
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId, HierarchyError> {
        if !self.nodes.contains_key(&parent) {
            return Err(HierarchyError::NodeNotFound(parent));
        }
        let id = self.add_node(node);
        self.attach(parent, id)?;
        Ok(id)
    }

    /// Make `child` the last child of `parent`
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), HierarchyError> {
        if !self.nodes.contains_key(&parent) {
            return Err(HierarchyError::NodeNotFound(parent));
        }
        if !self.nodes.contains_key(&child) {
            return Err(HierarchyError::NodeNotFound(child));
        }

        if self.would_create_cycle(parent, child) {
            return Err(HierarchyError::WouldCreateCycle);
        }

        if self.parent.contains_key(&child) {
            return Err(HierarchyError::AlreadyHasParent(child));
        }

        self.children.entry(parent).or_default().push(child);
        self.parent.insert(child, parent);
        Ok(())
    }

    /// Detach a node from its parent, returning the former parent
    pub fn detach(&mut self, child: NodeId) -> Result<NodeId, HierarchyError> {
        let parent = self
            .parent
            .remove(&child)
            .ok_or(HierarchyError::NoParent(child))?;

        if let Some(children) = self.children.get_mut(&parent) {
            children.retain(|id| *id != child);
        }

        Ok(parent)
    }

    /// Remove a node and all of its descendants, returning the removed nodes in pre-order
    pub fn remove_node(&mut self, id: NodeId) -> Result<Vec<Node>, HierarchyError> {
        if !self.nodes.contains_key(&id) {
            return Err(HierarchyError::NodeNotFound(id));
        }

        if self.parent.contains_key(&id) {
            self.detach(id)?;
        }

        let to_remove = self.subtree(id);
        let mut removed = Vec::with_capacity(to_remove.len());
        for node_id in &to_remove {
            self.children.remove(node_id);
            self.parent.remove(node_id);
            if let Some(node) = self.nodes.remove(node_id) {
                removed.push(node);
            }
        }

        Ok(removed)
    }

    /// Check if attaching `child` under `parent` would create a cycle
    pub(crate) fn would_create_cycle(&self, parent: NodeId, child: NodeId) -> bool {
        // Cycle iff child is parent itself or one of its ancestors
        parent == child || self.is_ancestor(child, parent)
    }
}
