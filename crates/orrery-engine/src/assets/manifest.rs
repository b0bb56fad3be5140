use serde::{Deserialize, Serialize};
use crate::error::AssetError;

/// Asset manifest describing where the scene's meshes and textures live.
/// An embedded default is used unless the host passes its own JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetManifest {
    /// Names of the mesh assets to fetch before the scene is composed.
    #[serde(default = "default_meshes")]
    pub meshes: Vec<String>,
    /// Path pattern for mesh assets; `{name}` is replaced by the mesh name.
    #[serde(default = "default_mesh_path")]
    pub mesh_path: String,
    /// Directory prefix for texture images.
    #[serde(default = "default_texture_dir")]
    pub texture_dir: String,
}

fn default_meshes() -> Vec<String> {
    vec!["Rock1".into(), "Rock2".into(), "Rock3".into()]
}

fn default_mesh_path() -> String {
    "./rocks/{name}.obj".into()
}

fn default_texture_dir() -> String {
    "./textures/".into()
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            meshes: default_meshes(),
            mesh_path: default_mesh_path(),
            texture_dir: default_texture_dir(),
        }
    }
}

impl AssetManifest {
    /// Parse a manifest from a JSON string. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// URL for a named mesh asset.
    pub fn mesh_url(&self, name: &str) -> String {
        self.mesh_path.replace("{name}", name)
    }

    /// `(name, url)` pairs for every mesh asset, in manifest order.
    pub fn mesh_requests(&self) -> Vec<(String, String)> {
        self.meshes
            .iter()
            .map(|name| (name.clone(), self.mesh_url(name)))
            .collect()
    }

    /// URL for a texture file name.
    pub fn texture_url(&self, file: &str) -> String {
        format!("{}{}", self.texture_dir, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_requests_three_rocks() {
        let manifest = AssetManifest::default();
        let requests = manifest.mesh_requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0], ("Rock1".to_string(), "./rocks/Rock1.obj".to_string()));
        assert_eq!(requests[2].1, "./rocks/Rock3.obj");
    }

    #[test]
    fn parse_partial_manifest() {
        let manifest = AssetManifest::from_json(r#"{ "texture_dir": "/static/tex/" }"#).unwrap();
        assert_eq!(manifest.meshes.len(), 3);
        assert_eq!(manifest.texture_url("earth.png"), "/static/tex/earth.png");
    }

    #[test]
    fn parse_custom_meshes() {
        let json = r#"{ "meshes": ["Boulder"], "mesh_path": "assets/{name}.obj" }"#;
        let manifest = AssetManifest::from_json(json).unwrap();
        assert_eq!(manifest.mesh_requests(), vec![("Boulder".to_string(), "assets/Boulder.obj".to_string())]);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            AssetManifest::from_json("{ not json"),
            Err(AssetError::Manifest(_))
        ));
    }
}
