//! Ragdoll Adjuster Core
//!
//! This crate contains the core data structures and logic for ragdoll mass editing:
//! - Hierarchy: tree of nodes, some of which carry a rigid body
//! - MassAdjuster: Check / Apply / Clear session that rescales part masses
//! - Scene: RON file format for hierarchies
//! - Import: URDF bridge (links become nodes, collision links become parts)

pub mod adjuster;
pub mod hierarchy;
pub mod import;
pub mod scene;

pub use adjuster::*;
pub use hierarchy::*;
pub use import::*;
pub use scene::*;
