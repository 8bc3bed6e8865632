//! Read-only traversal queries for Hierarchy

use std::collections::HashSet;

use super::{Hierarchy, NodeId};

impl Hierarchy {
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(&id).copied()
    }

    /// Ordered children of a node (empty if none or unknown)
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nodes without a parent, ordered by name then id
    pub fn roots(&self) -> Vec<NodeId> {
        let mut roots: Vec<_> = self
            .nodes
            .values()
            .filter(|node| !self.parent.contains_key(&node.id))
            .collect();
        roots.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        roots.into_iter().map(|node| node.id).collect()
    }

    /// The subtree rooted at `id` in pre-order (`id` first, children in insertion order).
    ///
    /// Returns an empty list for unknown ids.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        if !self.nodes.contains_key(&id) {
            return Vec::new();
        }

        let mut order = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            // Malformed maps may repeat a node or loop back to an ancestor
            if !visited.insert(current) {
                continue;
            }
            order.push(current);
            // Reverse so the first child is visited first
            stack.extend(self.children_of(current).iter().rev());
        }
        order
    }

    /// Every node of every tree, roots ordered as in [`Hierarchy::roots`]
    pub fn iter_preorder(&self) -> Vec<NodeId> {
        self.roots()
            .into_iter()
            .flat_map(|root| self.subtree(root))
            .collect()
    }

    /// Whether `ancestor` is a strict ancestor of `node`
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent_of(node);
        // A parent chain longer than the node count has looped
        for _ in 0..self.nodes.len() {
            let Some(id) = current else {
                break;
            };
            if id == ancestor {
                return true;
            }
            current = self.parent_of(id);
        }
        false
    }

    /// Number of ancestors above a node
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent_of(id);
        while let Some(parent) = current {
            if depth == self.nodes.len() {
                break;
            }
            depth += 1;
            current = self.parent_of(parent);
        }
        depth
    }

    /// First node with the given name in pre-order
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.iter_preorder()
            .into_iter()
            .find(|id| self.name_of(*id) == Some(name))
    }
}

#[cfg(test)]
mod tests {
    use crate::hierarchy::{Hierarchy, Node};

    #[test]
    fn test_subtree_is_preorder() {
        let mut hierarchy = Hierarchy::new();
        let root = hierarchy.add_node(Node::new("root"));
        let a = hierarchy.add_child(root, Node::new("a")).unwrap();
        let a1 = hierarchy.add_child(a, Node::new("a1")).unwrap();
        let a2 = hierarchy.add_child(a, Node::new("a2")).unwrap();
        let b = hierarchy.add_child(root, Node::new("b")).unwrap();

        assert_eq!(hierarchy.subtree(root), vec![root, a, a1, a2, b]);
        assert_eq!(hierarchy.subtree(a), vec![a, a1, a2]);
        assert_eq!(hierarchy.subtree(b), vec![b]);
    }

    #[test]
    fn test_subtree_unknown_node_is_empty() {
        let hierarchy = Hierarchy::new();
        assert!(hierarchy.subtree(uuid::Uuid::new_v4()).is_empty());
    }

    #[test]
    fn test_subtree_terminates_on_malformed_links() {
        let mut hierarchy = Hierarchy::new();
        let root = hierarchy.add_node(Node::new("root"));
        let a = hierarchy.add_child(root, Node::new("a")).unwrap();
        let b = hierarchy.add_child(root, Node::new("b")).unwrap();
        // Back edge to the root and a repeated child
        hierarchy.children.entry(a).or_default().push(root);
        hierarchy.children.entry(root).or_default().push(b);
        hierarchy.parent.insert(root, a);

        assert_eq!(hierarchy.subtree(root), vec![root, a, b]);
        assert!(hierarchy.depth(root) <= hierarchy.len());
        assert!(!hierarchy.is_ancestor(uuid::Uuid::new_v4(), root));
    }

    #[test]
    fn test_ancestry_and_depth() {
        let mut hierarchy = Hierarchy::new();
        let root = hierarchy.add_node(Node::new("root"));
        let a = hierarchy.add_child(root, Node::new("a")).unwrap();
        let a1 = hierarchy.add_child(a, Node::new("a1")).unwrap();

        assert!(hierarchy.is_ancestor(root, a1));
        assert!(hierarchy.is_ancestor(a, a1));
        assert!(!hierarchy.is_ancestor(a1, a));
        assert!(!hierarchy.is_ancestor(a, a));
        assert_eq!(hierarchy.depth(root), 0);
        assert_eq!(hierarchy.depth(a1), 2);
    }

    #[test]
    fn test_find_by_name_returns_first_in_preorder() {
        let mut hierarchy = Hierarchy::new();
        let root = hierarchy.add_node(Node::new("root"));
        let first = hierarchy.add_child(root, Node::new("collider")).unwrap();
        let _second = hierarchy.add_child(root, Node::new("collider")).unwrap();

        assert_eq!(hierarchy.find_by_name("collider"), Some(first));
        assert_eq!(hierarchy.find_by_name("missing"), None);
    }

    #[test]
    fn test_roots_sorted_by_name() {
        let mut hierarchy = Hierarchy::new();
        let zeta = hierarchy.add_node(Node::new("zeta"));
        let alpha = hierarchy.add_node(Node::new("alpha"));
        hierarchy.add_child(alpha, Node::new("child")).unwrap();

        assert_eq!(hierarchy.roots(), vec![alpha, zeta]);
    }
}
