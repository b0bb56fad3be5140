//! Wavefront OBJ decoding.
//!
//! An asset decodes to a small node tree: a root group with one mesh child per
//! `o`/`g` section that carries faces. Materials, texture coordinates,
//! smoothing groups and line/point elements are ignored.

use glam::Vec3;
use crate::assets::resources::GeometryDesc;
use crate::error::AssetError;

/// Triangle mesh de-indexed to one vertex per face corner.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub name: String,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Distance from the local origin to the farthest vertex.
    pub fn bounding_radius(&self) -> f32 {
        self.positions.iter().map(|p| p.length()).fold(0.0, f32::max)
    }

    /// Flatten into a shareable geometry descriptor.
    pub fn to_geometry(&self) -> GeometryDesc {
        GeometryDesc::Mesh {
            name: self.name.clone(),
            positions: self.positions.iter().flat_map(|p| p.to_array()).collect(),
            normals: self.normals.iter().flat_map(|n| n.to_array()).collect(),
            indices: self.indices.clone(),
        }
    }
}

/// Node of a decoded asset. Group nodes have no mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetNode {
    pub name: String,
    pub mesh: Option<MeshData>,
    pub children: Vec<AssetNode>,
}

impl AssetNode {
    /// Depth-first, parent before children.
    pub fn traverse<'a>(&'a self, visit: &mut impl FnMut(&'a AssetNode)) {
        visit(self);
        for child in &self.children {
            child.traverse(visit);
        }
    }
}

/// A decoded OBJ file.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjAsset {
    pub root: AssetNode,
}

impl ObjAsset {
    /// Every mesh sub-node in discovery order.
    pub fn meshes(&self) -> Vec<&MeshData> {
        let mut found = Vec::new();
        self.root.traverse(&mut |node| {
            if let Some(mesh) = &node.mesh {
                found.push(mesh);
            }
        });
        found
    }

    pub fn into_meshes(self) -> Vec<MeshData> {
        self.meshes().into_iter().cloned().collect()
    }
}

/// Section currently being filled while parsing.
struct Section {
    name: String,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            positions: Vec::new(),
            normals: Vec::new(),
        }
    }

    fn finish(self, into: &mut Vec<AssetNode>) {
        if self.positions.is_empty() {
            return;
        }
        let indices = (0..self.positions.len() as u32).collect();
        into.push(AssetNode {
            name: self.name.clone(),
            mesh: Some(MeshData {
                name: self.name,
                positions: self.positions,
                normals: self.normals,
                indices,
            }),
            children: Vec::new(),
        });
    }
}

/// Decode OBJ text. `name` labels the root node and error messages.
pub fn parse_obj(name: &str, text: &str) -> Result<ObjAsset, AssetError> {
    let mut vertices: Vec<Vec3> = Vec::new();
    let mut vertex_normals: Vec<Vec3> = Vec::new();
    let mut children = Vec::new();
    let mut section = Section::new("");

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else { continue };

        match keyword {
            "v" => vertices.push(parse_vec3(name, line_no, tokens)?),
            "vn" => vertex_normals.push(parse_vec3(name, line_no, tokens)?),
            "o" | "g" => {
                let label = line[keyword.len()..].trim();
                let finished = std::mem::replace(&mut section, Section::new(label));
                finished.finish(&mut children);
            }
            "f" => {
                let corners = tokens
                    .map(|tok| parse_corner(name, line_no, tok, vertices.len(), vertex_normals.len()))
                    .collect::<Result<Vec<_>, _>>()?;
                if corners.len() < 3 {
                    return Err(AssetError::obj(name, line_no, "face needs at least three vertices"));
                }
                // Fan triangulation around the first corner.
                for i in 1..corners.len() - 1 {
                    let tri = [corners[0], corners[i], corners[i + 1]];
                    let p = tri.map(|(v, _)| vertices[v]);
                    let flat = (p[1] - p[0]).cross(p[2] - p[0]).normalize_or_zero();
                    for (k, (_, n)) in tri.iter().enumerate() {
                        section.positions.push(p[k]);
                        section.normals.push(n.map(|n| vertex_normals[n]).unwrap_or(flat));
                    }
                }
            }
            _ => {}
        }
    }
    section.finish(&mut children);

    Ok(ObjAsset {
        root: AssetNode {
            name: name.to_string(),
            mesh: None,
            children,
        },
    })
}

fn parse_vec3<'a>(
    asset: &str,
    line: usize,
    mut tokens: impl Iterator<Item = &'a str>,
) -> Result<Vec3, AssetError> {
    let mut out = [0.0f32; 3];
    for slot in out.iter_mut() {
        let tok = tokens
            .next()
            .ok_or_else(|| AssetError::obj(asset, line, "expected three components"))?;
        *slot = tok
            .parse()
            .map_err(|_| AssetError::obj(asset, line, format!("invalid number '{tok}'")))?;
    }
    Ok(Vec3::from_array(out))
}

/// Parse `v`, `v/vt`, `v//vn` or `v/vt/vn` into zero-based (vertex, normal) indices.
fn parse_corner(
    asset: &str,
    line: usize,
    token: &str,
    vertex_count: usize,
    normal_count: usize,
) -> Result<(usize, Option<usize>), AssetError> {
    let mut parts = token.split('/');
    let v = parts.next().unwrap_or_default();
    let vertex = resolve_index(asset, line, v, vertex_count)?;
    let _uv = parts.next();
    let normal = match parts.next() {
        Some(n) if !n.is_empty() => Some(resolve_index(asset, line, n, normal_count)?),
        _ => None,
    };
    Ok((vertex, normal))
}

/// OBJ indices are 1-based; negative values count back from the end.
fn resolve_index(asset: &str, line: usize, token: &str, count: usize) -> Result<usize, AssetError> {
    let raw: i64 = token
        .parse()
        .map_err(|_| AssetError::obj(asset, line, format!("invalid index '{token}'")))?;
    let resolved = if raw > 0 { raw - 1 } else { count as i64 + raw };
    if raw == 0 || resolved < 0 || resolved >= count as i64 {
        return Err(AssetError::obj(asset, line, format!("index {raw} out of range")));
    }
    Ok(resolved as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ROCKS: &str = "\
# two objects sharing one vertex pool
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
vn 0 0 1
o RockA
f 1//1 2//1 3//1
o RockB
f 1 2 3 4
";

    #[test]
    fn sections_become_mesh_children() {
        let asset = parse_obj("Rock1", TWO_ROCKS).unwrap();
        assert_eq!(asset.root.name, "Rock1");
        assert!(asset.root.mesh.is_none());

        let meshes = asset.meshes();
        assert_eq!(meshes.len(), 2);
        assert_eq!(meshes[0].name, "RockA");
        assert_eq!(meshes[0].triangle_count(), 1);
        assert_eq!(meshes[0].normals[0], Vec3::Z);
        // Quad is fan-triangulated.
        assert_eq!(meshes[1].name, "RockB");
        assert_eq!(meshes[1].triangle_count(), 2);
        assert_eq!(meshes[1].indices, (0..6).collect::<Vec<u32>>());
    }

    #[test]
    fn faces_without_section_use_unnamed_mesh() {
        let asset = parse_obj("Rock2", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        let meshes = asset.meshes();
        assert_eq!(meshes.len(), 1);
        // Flat normal from winding.
        assert_eq!(meshes[0].normals[0], Vec3::Z);
    }

    #[test]
    fn empty_sections_are_skipped() {
        let text = "o Empty\nv 0 0 0\nv 1 0 0\nv 0 1 0\ng Filled\nf -3 -2 -1\n";
        let asset = parse_obj("Rock3", text).unwrap();
        let meshes = asset.meshes();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].name, "Filled");
    }

    #[test]
    fn bounding_radius_is_farthest_vertex() {
        let asset = parse_obj("r", "v 3 4 0\nv 0 1 0\nv 1 0 0\nf 1 2 3\n").unwrap();
        assert!((asset.meshes()[0].bounding_radius() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn reports_line_of_bad_number() {
        let err = parse_obj("bad", "v 0 0 0\nv 1 x 0\n").unwrap_err();
        match err {
            AssetError::ObjParse { asset, line, .. } => {
                assert_eq!(asset, "bad");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_out_of_range_index() {
        assert!(parse_obj("bad", "v 0 0 0\nf 1 2 3\n").is_err());
    }

    #[test]
    fn mesh_geometry_is_flattened() {
        let asset = parse_obj("r", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        match asset.meshes()[0].to_geometry() {
            GeometryDesc::Mesh { positions, normals, indices, .. } => {
                assert_eq!(positions.len(), 9);
                assert_eq!(normals.len(), 9);
                assert_eq!(indices, vec![0, 1, 2]);
            }
            other => panic!("unexpected geometry: {other:?}"),
        }
    }
}
