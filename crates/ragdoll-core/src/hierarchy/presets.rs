//! Ready-made hierarchies for demos and tests

use super::{Hierarchy, HierarchyError, Node};

/// Build a humanoid ragdoll rooted at `pelvis`.
///
/// Masses add up to 66 kg, 56 kg of it below the pelvis. The `armature` node has no
/// rigid body and so never becomes a part.
pub fn humanoid() -> Result<Hierarchy, HierarchyError> {
    let mut hierarchy = Hierarchy::new();

    let pelvis = hierarchy.add_node(Node::with_mass("pelvis", 10.0));
    hierarchy.add_child(pelvis, Node::new("armature"))?;

    let spine = hierarchy.add_child(pelvis, Node::with_mass("spine", 8.0))?;
    let chest = hierarchy.add_child(spine, Node::with_mass("chest", 12.0))?;
    hierarchy.add_child(chest, Node::with_mass("head", 5.0))?;

    for side in ["left", "right"] {
        let upper_arm = hierarchy.add_child(chest, Node::with_mass(format!("{side}_upper_arm"), 2.0))?;
        let forearm = hierarchy.add_child(upper_arm, Node::with_mass(format!("{side}_forearm"), 1.5))?;
        hierarchy.add_child(forearm, Node::with_mass(format!("{side}_hand"), 0.5))?;
    }

    for side in ["left", "right"] {
        let thigh = hierarchy.add_child(pelvis, Node::with_mass(format!("{side}_thigh"), 7.0))?;
        let shin = hierarchy.add_child(thigh, Node::with_mass(format!("{side}_shin"), 3.5))?;
        hierarchy.add_child(shin, Node::with_mass(format!("{side}_foot"), 1.0))?;
    }

    Ok(hierarchy)
}
