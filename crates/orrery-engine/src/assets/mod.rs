pub mod loader;
pub mod manifest;
pub mod obj;
pub mod resources;
