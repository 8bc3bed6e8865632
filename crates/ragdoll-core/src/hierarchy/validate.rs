//! Structural checks for hierarchies built outside the graph operations

use std::collections::HashSet;

use super::{Hierarchy, HierarchyError, NodeId};

impl Hierarchy {
    /// Check that the maps describe a forest.
    ///
    /// Hierarchies built with [`Hierarchy::attach`] always pass. Deserialized
    /// ones may not: every node must be stored under its own id, each child must
    /// appear in exactly one children list, `children` and `parent` must agree,
    /// and no node may be its own ancestor.
    pub fn validate(&self) -> Result<(), HierarchyError> {
        for (key, node) in &self.nodes {
            if *key != node.id {
                return Err(HierarchyError::IdMismatch(*key));
            }
        }

        let mut listed: HashSet<NodeId> = HashSet::new();
        for (parent, children) in &self.children {
            self.require(*parent)?;
            for child in children {
                self.require(*child)?;
                if !listed.insert(*child) {
                    return Err(HierarchyError::DuplicateChild(*child));
                }
                if self.parent.get(child) != Some(parent) {
                    return Err(HierarchyError::LinkMismatch(*child));
                }
            }
        }

        for (child, parent) in &self.parent {
            self.require(*child)?;
            self.require(*parent)?;
            if !self.children_of(*parent).contains(child) {
                return Err(HierarchyError::LinkMismatch(*child));
            }
        }

        // Each node has at most one parent, so a cycle shows up as a walk
        // upwards that never reaches a root.
        for id in self.nodes.keys() {
            let mut seen = HashSet::new();
            let mut current = *id;
            while let Some(parent) = self.parent.get(&current) {
                if !seen.insert(current) {
                    return Err(HierarchyError::Cycle(*id));
                }
                current = *parent;
            }
        }

        Ok(())
    }

    fn require(&self, id: NodeId) -> Result<(), HierarchyError> {
        if self.nodes.contains_key(&id) {
            Ok(())
        } else {
            Err(HierarchyError::NodeNotFound(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::hierarchy::{Hierarchy, HierarchyError, Node};

    fn pair() -> (Hierarchy, uuid::Uuid, uuid::Uuid) {
        let mut hierarchy = Hierarchy::new();
        let root = hierarchy.add_node(Node::new("root"));
        let a = hierarchy.add_child(root, Node::with_mass("a", 2.0)).unwrap();
        (hierarchy, root, a)
    }

    #[test]
    fn test_built_hierarchy_is_valid() {
        let (hierarchy, _, _) = pair();
        assert_eq!(hierarchy.validate(), Ok(()));
        assert_eq!(Hierarchy::new().validate(), Ok(()));
    }

    #[test]
    fn test_back_edge_in_children_is_rejected() {
        let (mut hierarchy, root, a) = pair();
        hierarchy.children.entry(a).or_default().push(root);

        assert_eq!(
            hierarchy.validate(),
            Err(HierarchyError::LinkMismatch(root))
        );
    }

    #[test]
    fn test_parent_cycle_is_rejected() {
        let (mut hierarchy, root, a) = pair();
        hierarchy.children.entry(a).or_default().push(root);
        hierarchy.parent.insert(root, a);

        assert!(matches!(
            hierarchy.validate(),
            Err(HierarchyError::Cycle(_))
        ));
    }

    #[test]
    fn test_duplicate_child_is_rejected() {
        let (mut hierarchy, root, a) = pair();
        hierarchy.children.entry(root).or_default().push(a);

        assert_eq!(
            hierarchy.validate(),
            Err(HierarchyError::DuplicateChild(a))
        );
    }

    #[test]
    fn test_dangling_child_is_rejected() {
        let (mut hierarchy, root, _) = pair();
        let ghost = uuid::Uuid::new_v4();
        hierarchy.children.entry(root).or_default().push(ghost);

        assert_eq!(
            hierarchy.validate(),
            Err(HierarchyError::NodeNotFound(ghost))
        );
    }

    #[test]
    fn test_missing_child_entry_is_rejected() {
        let (mut hierarchy, root, a) = pair();
        hierarchy.children.insert(root, Vec::new());

        assert_eq!(hierarchy.validate(), Err(HierarchyError::LinkMismatch(a)));
    }

    #[test]
    fn test_key_must_match_node_id() {
        let (mut hierarchy, _, _) = pair();
        let stray = Node::new("stray");
        let key = uuid::Uuid::new_v4();
        hierarchy.nodes.insert(key, stray);

        assert_eq!(hierarchy.validate(), Err(HierarchyError::IdMismatch(key)));
    }
}
