//! Display data produced by a successful check

use serde::Serialize;

use crate::hierarchy::NodeId;

/// One row of the mass table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartMass {
    pub id: NodeId,
    pub name: String,
    /// Live mass of the part's rigid body, `None` if the node or its body
    /// went away after the check
    pub mass: Option<f32>,
    /// Share of the total mass at check time
    pub ratio: f64,
}

/// Result of a check, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MassReport {
    pub rows: Vec<PartMass>,
    /// Sum of part masses at check time
    pub total_mass: f64,
}

impl MassReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all ratios (1.0 for any non-empty report)
    pub fn ratio_sum(&self) -> f64 {
        self.rows.iter().map(|row| row.ratio).sum()
    }

    pub fn row(&self, id: NodeId) -> Option<&PartMass> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Parts whose rigid body can no longer be found
    pub fn missing(&self) -> impl Iterator<Item = &PartMass> {
        self.rows.iter().filter(|row| row.mass.is_none())
    }
}
