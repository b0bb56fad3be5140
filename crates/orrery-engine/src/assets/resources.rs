use std::collections::HashMap;
use serde::Serialize;
use crate::components::mesh::{GeometryId, TextureId};

/// Geometry descriptors shared by many nodes. The host builds GPU buffers
/// from these once, then draws instances by handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeometryDesc {
    /// Subdivided icosahedron.
    Sphere { radius: f32, detail: u32 },
    /// Torus in the XY plane.
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    /// Imported triangle mesh (flat xyz triples).
    Mesh {
        name: String,
        positions: Vec<f32>,
        normals: Vec<f32>,
        indices: Vec<u32>,
    },
    /// Point cloud with per-point rgb.
    Points {
        positions: Vec<f32>,
        colors: Vec<f32>,
        size: f32,
    },
    /// Camera-facing quad.
    Sprite { size: f32 },
    /// Pre-tessellated triangle list (xyz triples).
    Triangles { positions: Vec<f32> },
}

/// Registry of geometries and textures referenced by scene meshes.
#[derive(Debug, Default, Serialize)]
pub struct ResourceTable {
    geometries: Vec<GeometryDesc>,
    textures: Vec<String>,
    texture_dir: String,
    #[serde(skip)]
    texture_lookup: HashMap<String, TextureId>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix the host should prepend to texture names.
    pub fn set_texture_dir(&mut self, dir: impl Into<String>) {
        self.texture_dir = dir.into();
    }

    pub fn add_geometry(&mut self, desc: GeometryDesc) -> GeometryId {
        self.geometries.push(desc);
        GeometryId(self.geometries.len() as u32 - 1)
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&GeometryDesc> {
        self.geometries.get(id.0 as usize)
    }

    /// Intern a texture file name. The same name always yields the same handle.
    pub fn texture(&mut self, name: &str) -> TextureId {
        if let Some(&id) = self.texture_lookup.get(name) {
            return id;
        }
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(name.to_string());
        self.texture_lookup.insert(name.to_string(), id);
        id
    }

    pub fn texture_name(&self, id: TextureId) -> Option<&str> {
        self.textures.get(id.0 as usize).map(String::as_str)
    }

    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Serialize for the host renderer.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textures_are_interned() {
        let mut table = ResourceTable::new();
        let earth = table.texture("earth.png");
        let mars = table.texture("mars.png");
        assert_ne!(earth, mars);
        assert_eq!(table.texture("earth.png"), earth);
        assert_eq!(table.texture_count(), 2);
        assert_eq!(table.texture_name(mars), Some("mars.png"));
    }

    #[test]
    fn geometry_handles_are_dense() {
        let mut table = ResourceTable::new();
        let a = table.add_geometry(GeometryDesc::Sphere { radius: 1.0, detail: 6 });
        let b = table.add_geometry(GeometryDesc::Sprite { size: 80.0 });
        assert_eq!(a, GeometryId(0));
        assert_eq!(b, GeometryId(1));
        assert_eq!(table.geometry(b), Some(&GeometryDesc::Sprite { size: 80.0 }));
    }

    #[test]
    fn json_is_tagged_by_kind() {
        let mut table = ResourceTable::new();
        table.set_texture_dir("./textures/");
        table.add_geometry(GeometryDesc::Torus {
            radius: 0.6,
            tube: 0.15,
            radial_segments: 8,
            tubular_segments: 64,
        });
        table.texture("saturn.png");

        let json: serde_json::Value = serde_json::from_str(&table.to_json().unwrap()).unwrap();
        assert_eq!(json["geometries"][0]["kind"], "torus");
        assert_eq!(json["geometries"][0]["tubular_segments"], 64);
        assert_eq!(json["textures"][0], "saturn.png");
        assert_eq!(json["texture_dir"], "./textures/");
        assert!(json.get("texture_lookup").is_none());
    }
}
