pub mod lighting;
pub mod render;
#[cfg(feature = "vectors")]
pub mod vector;
