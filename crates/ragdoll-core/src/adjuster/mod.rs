//! Proportional mass redistribution session
//!
//! A [`MassAdjuster`] holds one Check -> Apply/Clear cycle:
//! - `check` walks the hierarchy and records each part's share of the total mass
//! - `apply` writes a new total to the root and rescales every part by its share
//! - `clear` drops everything and returns to the unchecked state

mod report;
mod selection;

pub use report::*;
pub use selection::*;

use std::collections::HashMap;

use thiserror::Error;

use crate::hierarchy::{Hierarchy, HierarchyError, Node, NodeId};

/// Mass adjustment errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdjustError {
    #[error("Nothing to apply: run a check first")]
    NotChecked,

    #[error("Hierarchy changed since the check: {0}")]
    Hierarchy(#[from] HierarchyError),
}

/// What an `apply` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// New mass was zero; nothing changed and the session is kept
    Skipped,
    /// Masses were written and the session was reset
    Applied {
        /// Number of parts rescaled
        parts: usize,
        /// Whether the root carried a rigid body to receive the new total
        root_updated: bool,
    },
}

/// Session state for one ragdoll adjustment
#[derive(Debug, Clone, Default)]
pub struct MassAdjuster {
    selection: Selection,
    new_mass: f32,
    parts: Vec<NodeId>,
    ratios: HashMap<NodeId, f64>,
    total_mass: f64,
    checked: bool,
}

impl MassAdjuster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.selection.root
    }

    pub fn ignored(&self) -> &[NodeId] {
        &self.selection.ignore
    }

    pub fn include_children_of_ignored(&self) -> bool {
        self.selection.include_children_of_ignored
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn new_mass(&self) -> f32 {
        self.new_mass
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Parts found by the last check, in discovery order
    pub fn parts(&self) -> &[NodeId] {
        &self.parts
    }

    /// Share of the total mass recorded for a part
    pub fn ratio(&self, part: NodeId) -> Option<f64> {
        self.ratios.get(&part).copied()
    }

    /// Total part mass recorded by the last check (0 when unchecked)
    pub fn total_mass(&self) -> f64 {
        self.total_mass
    }

    /// Text for the total mass info box: `"none"` until a root is chosen
    pub fn total_mass_label(&self) -> String {
        match self.selection.root {
            Some(_) => self.total_mass.to_string(),
            None => "none".to_string(),
        }
    }

    pub fn set_root(&mut self, root: Option<NodeId>) {
        if self.selection.root != root {
            self.invalidate("root changed");
            self.selection.root = root;
        }
    }

    pub fn set_ignore(&mut self, ignore: Vec<NodeId>) {
        if self.selection.ignore != ignore {
            self.invalidate("ignore set changed");
            self.selection.ignore = ignore;
        }
    }

    pub fn add_ignored(&mut self, id: NodeId) {
        if !self.selection.ignore.contains(&id) {
            self.invalidate("ignore set changed");
            self.selection.ignore.push(id);
        }
    }

    pub fn remove_ignored(&mut self, id: NodeId) {
        if self.selection.ignore.contains(&id) {
            self.invalidate("ignore set changed");
            self.selection.ignore.retain(|ignored| *ignored != id);
        }
    }

    pub fn set_include_children_of_ignored(&mut self, include: bool) {
        if self.selection.include_children_of_ignored != include {
            self.invalidate("include-children flag changed");
            self.selection.include_children_of_ignored = include;
        }
    }

    pub fn set_new_mass(&mut self, mass: f32) {
        self.new_mass = mass;
    }

    /// Discover parts under the root and record their mass ratios.
    ///
    /// Does nothing when no root is chosen (or the root is not in the hierarchy)
    /// and when the session is already checked; call [`MassAdjuster::clear`] first
    /// to check again.
    pub fn check(&mut self, hierarchy: &Hierarchy) -> Option<MassReport> {
        if self.checked {
            tracing::debug!("Check skipped: session already checked");
            return self.report(hierarchy);
        }

        let root = self.selection.root?;
        if !hierarchy.contains(root) {
            tracing::warn!("Check skipped: root {} is not in the hierarchy", root);
            return None;
        }

        let parts = collect_parts(hierarchy, &self.selection);
        let masses: Vec<(NodeId, f64)> = parts
            .iter()
            .filter_map(|id| hierarchy.mass(*id).map(|mass| (*id, f64::from(mass))))
            .collect();

        let total_mass: f64 = masses.iter().map(|(_, mass)| mass).sum();

        let mut ratios = HashMap::with_capacity(masses.len());
        if total_mass != 0.0 {
            for (id, mass) in &masses {
                ratios.insert(*id, mass / total_mass);
            }
        }

        tracing::debug!(
            "Checked {} parts under {:?}, total mass {}",
            parts.len(),
            hierarchy.name_of(root),
            total_mass
        );

        self.parts = parts;
        self.ratios = ratios;
        self.total_mass = total_mass;
        self.checked = true;

        self.report(hierarchy)
    }

    /// Write `new_mass` to the root and rescale every part by its recorded ratio.
    ///
    /// A zero mass is a no-op that keeps the session. On success the session is
    /// reset. If any part lost its rigid body since the check, nothing is written
    /// and the session is kept.
    pub fn apply(
        &mut self,
        hierarchy: &mut Hierarchy,
        new_mass: f32,
    ) -> Result<ApplyOutcome, AdjustError> {
        if new_mass == 0.0 {
            tracing::debug!("Apply skipped: new mass is zero");
            return Ok(ApplyOutcome::Skipped);
        }

        if !self.checked {
            return Err(AdjustError::NotChecked);
        }
        let root = self.selection.root.ok_or(AdjustError::NotChecked)?;

        // Validate before touching anything
        if !hierarchy.contains(root) {
            return Err(HierarchyError::NodeNotFound(root).into());
        }
        for part in &self.parts {
            if !hierarchy.contains(*part) {
                return Err(HierarchyError::NodeNotFound(*part).into());
            }
            if hierarchy.mass(*part).is_none() {
                return Err(HierarchyError::NoRigidBody(*part).into());
            }
        }

        let root_updated = hierarchy.mass(root).is_some();
        if root_updated {
            hierarchy.set_mass(root, new_mass)?;
        } else {
            tracing::warn!(
                "Root {:?} has no rigid body; only parts were rescaled",
                hierarchy.name_of(root)
            );
        }

        let mut rescaled = 0;
        for part in &self.parts {
            // Parts of a zero-mass ragdoll have no ratio and keep their mass
            if let Some(ratio) = self.ratios.get(part) {
                hierarchy.set_mass(*part, (ratio * f64::from(new_mass)) as f32)?;
                rescaled += 1;
            }
        }

        tracing::debug!("Applied new mass {} to {} parts", new_mass, rescaled);

        self.clear();

        Ok(ApplyOutcome::Applied {
            parts: rescaled,
            root_updated,
        })
    }

    /// [`MassAdjuster::apply`] with the session's own new mass field
    pub fn apply_new_mass(&mut self, hierarchy: &mut Hierarchy) -> Result<ApplyOutcome, AdjustError> {
        self.apply(hierarchy, self.new_mass)
    }

    /// Reset the session to its initial empty state.
    ///
    /// The include-children flag is a preference and survives.
    pub fn clear(&mut self) {
        self.selection.root = None;
        self.selection.ignore.clear();
        self.new_mass = 0.0;
        self.reset_results();
        tracing::debug!("Session cleared");
    }

    /// Table of parts with live masses and recorded ratios; `None` while unchecked
    pub fn report(&self, hierarchy: &Hierarchy) -> Option<MassReport> {
        if !self.checked {
            return None;
        }

        let rows = self
            .parts
            .iter()
            .map(|id| {
                let node = hierarchy.get(*id);
                PartMass {
                    id: *id,
                    name: node
                        .map(|node| node.name.clone())
                        .unwrap_or_else(|| id.to_string()),
                    mass: node.and_then(Node::mass),
                    ratio: self.ratio(*id).unwrap_or(0.0),
                }
            })
            .collect();

        Some(MassReport {
            rows,
            total_mass: self.total_mass,
        })
    }

    fn invalidate(&mut self, reason: &str) {
        if self.checked {
            tracing::debug!("Check results dropped: {}", reason);
            self.reset_results();
        }
    }

    fn reset_results(&mut self) {
        self.parts.clear();
        self.ratios.clear();
        self.total_mass = 0.0;
        self.checked = false;
    }
}
