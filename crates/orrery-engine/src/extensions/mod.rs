// extensions/mod.rs
//
// Optional extension modules for the orrery engine.
// These are decoupled from core SceneNode/Scene; games opt in by creating these systems.

pub mod transform;

pub use transform::{TransformGraph, LocalTransform};
