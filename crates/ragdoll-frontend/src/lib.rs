//! Ragdoll Adjuster Frontend
//!
//! egui-based editor window that drives a [`ragdoll_core::MassAdjuster`] session.

pub mod actions;
mod app;
pub mod config;
mod panels;
pub mod state;

pub use app::RagdollAdjusterApp;
