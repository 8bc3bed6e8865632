//! Part discovery: which nodes under a root take part in mass redistribution

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::hierarchy::{Hierarchy, NodeId};

/// What to inspect: the ragdoll root and the nodes to leave out
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Anchor of the ragdoll (never a part itself)
    pub root: Option<NodeId>,
    /// Nodes excluded from the part set
    pub ignore: Vec<NodeId>,
    /// Also exclude every descendant of an ignored node
    pub include_children_of_ignored: bool,
}

impl Selection {
    pub fn new(root: NodeId) -> Self {
        Self {
            root: Some(root),
            ..Default::default()
        }
    }

    pub fn ignoring(mut self, ignore: impl IntoIterator<Item = NodeId>) -> Self {
        self.ignore.extend(ignore);
        self
    }

    pub fn with_children_of_ignored(mut self, include: bool) -> Self {
        self.include_children_of_ignored = include;
        self
    }
}

/// Nodes that must never become parts.
///
/// Ignored ids that are not in the hierarchy are kept verbatim; they simply match nothing.
pub fn exclusion_set(hierarchy: &Hierarchy, selection: &Selection) -> HashSet<NodeId> {
    let mut excluded: HashSet<NodeId> = selection.ignore.iter().copied().collect();

    if selection.include_children_of_ignored {
        for ignored in &selection.ignore {
            excluded.extend(hierarchy.subtree(*ignored));
        }
    }

    excluded
}

/// Rigid-body nodes under the selection's root, in pre-order.
///
/// The root itself and excluded nodes are skipped. Returns an empty list
/// when no root is selected or the root is unknown.
pub fn collect_parts(hierarchy: &Hierarchy, selection: &Selection) -> Vec<NodeId> {
    let Some(root) = selection.root else {
        return Vec::new();
    };

    let excluded = exclusion_set(hierarchy, selection);

    hierarchy
        .subtree(root)
        .into_iter()
        .filter(|id| *id != root)
        .filter(|id| !excluded.contains(id))
        .filter(|id| hierarchy.mass(*id).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::Node;

    /// root -> [x -> [y -> [z]], w]; every node except root has a body
    fn chain() -> (Hierarchy, [NodeId; 5]) {
        let mut hierarchy = Hierarchy::new();
        let root = hierarchy.add_node(Node::with_mass("root", 1.0));
        let x = hierarchy.add_child(root, Node::with_mass("x", 1.0)).unwrap();
        let y = hierarchy.add_child(x, Node::with_mass("y", 1.0)).unwrap();
        let z = hierarchy.add_child(y, Node::with_mass("z", 1.0)).unwrap();
        let w = hierarchy.add_child(root, Node::with_mass("w", 1.0)).unwrap();
        (hierarchy, [root, x, y, z, w])
    }

    #[test]
    fn test_no_root_yields_nothing() {
        let (hierarchy, _) = chain();
        assert!(collect_parts(&hierarchy, &Selection::default()).is_empty());
    }

    #[test]
    fn test_root_is_never_a_part() {
        let (hierarchy, [root, x, y, z, w]) = chain();
        let parts = collect_parts(&hierarchy, &Selection::new(root));
        assert_eq!(parts, vec![x, y, z, w]);
    }

    #[test]
    fn test_ignore_without_children() {
        let (hierarchy, [root, x, y, z, w]) = chain();
        let selection = Selection::new(root).ignoring([x]);
        assert_eq!(collect_parts(&hierarchy, &selection), vec![y, z, w]);
    }

    #[test]
    fn test_ignore_with_children() {
        let (hierarchy, [root, x, y, z, w]) = chain();
        let selection = Selection::new(root)
            .ignoring([x])
            .with_children_of_ignored(true);

        let excluded = exclusion_set(&hierarchy, &selection);
        assert!(excluded.contains(&x));
        assert!(excluded.contains(&y));
        assert!(excluded.contains(&z));
        assert!(!excluded.contains(&w));

        assert_eq!(collect_parts(&hierarchy, &selection), vec![w]);
    }

    #[test]
    fn test_nodes_without_body_are_skipped() {
        let mut hierarchy = Hierarchy::new();
        let root = hierarchy.add_node(Node::new("root"));
        let helper = hierarchy.add_child(root, Node::new("helper")).unwrap();
        let limb = hierarchy.add_child(helper, Node::with_mass("limb", 4.0)).unwrap();

        assert_eq!(collect_parts(&hierarchy, &Selection::new(root)), vec![limb]);
    }

    #[test]
    fn test_unknown_ignored_nodes_are_harmless() {
        let (hierarchy, [root, x, y, z, w]) = chain();
        let selection = Selection::new(root)
            .ignoring([NodeId::new_v4()])
            .with_children_of_ignored(true);
        assert_eq!(collect_parts(&hierarchy, &selection), vec![x, y, z, w]);
    }
}
