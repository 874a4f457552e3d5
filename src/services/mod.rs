//! Service layer: the in-memory view store and the simulated analysis engine.

pub mod engine;
pub mod views;

pub use engine::SimulatedEngine;
pub use views::{SharedView, ViewLimitReached, ViewSnapshot, ViewStore};
