use bytemuck::{Pod, Zeroable};

/// Handle into `ResourceTable::geometries`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId(pub u32);

/// Handle into `ResourceTable::textures`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Linear RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color from a packed `0xRRGGBB` value.
    pub fn hex(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
        )
    }

    /// Color from hue/saturation/lightness, all in [0, 1]. Hue wraps.
    pub fn hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        if s == 0.0 {
            return Self::rgb(l, l, l);
        }
        let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self::rgb(
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// How the host composites a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Depth-tested, depth-written, no blending.
    #[default]
    Opaque,
    /// Standard alpha blending, drawn after opaque meshes.
    Alpha,
    /// Additive blending without depth writes (glows, nebulae, stars).
    Additive,
}

impl BlendMode {
    /// Wire value written into `NodeInstance::blend`.
    pub fn as_f32(self) -> f32 {
        match self {
            BlendMode::Opaque => 0.0,
            BlendMode::Alpha => 1.0,
            BlendMode::Additive => 2.0,
        }
    }
}

/// Surface description for a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    /// Optional diffuse texture (planet maps, sprite gradients).
    pub texture: Option<TextureId>,
    /// Self-illumination multiplier (0.0 = lit only by lights).
    pub emissive: f32,
    pub blend: BlendMode,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            texture: None,
            emissive: 0.0,
            blend: BlendMode::Opaque,
        }
    }
}

impl Material {
    pub fn textured(texture: TextureId) -> Self {
        Self {
            texture: Some(texture),
            ..Default::default()
        }
    }

    pub fn colored(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.color.a = opacity;
        self
    }
}

/// Renderable mesh: shared geometry plus a per-node material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub geometry: GeometryId,
    pub material: Material,
}

impl MeshComponent {
    pub fn new(geometry: GeometryId, material: Material) -> Self {
        Self { geometry, material }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-4 && (a.g - b.g).abs() < 1e-4 && (a.b - b.b).abs() < 1e-4
    }

    #[test]
    fn hex_unpacks_channels() {
        let c = Color::hex(0x0099ff);
        assert_eq!(c.r, 0.0);
        assert!((c.g - 0.6).abs() < 1e-6);
        assert_eq!(c.b, 1.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn hsl_primaries() {
        assert!(close(Color::hsl(0.0, 1.0, 0.5), Color::rgb(1.0, 0.0, 0.0)));
        assert!(close(Color::hsl(1.0 / 3.0, 1.0, 0.5), Color::rgb(0.0, 1.0, 0.0)));
        assert!(close(Color::hsl(2.0 / 3.0, 1.0, 0.5), Color::rgb(0.0, 0.0, 1.0)));
    }

    #[test]
    fn hsl_grey_when_unsaturated() {
        assert!(close(Color::hsl(0.6, 0.0, 0.25), Color::rgb(0.25, 0.25, 0.25)));
    }

    #[test]
    fn blend_wire_values_are_distinct() {
        assert_ne!(BlendMode::Opaque.as_f32(), BlendMode::Alpha.as_f32());
        assert_ne!(BlendMode::Alpha.as_f32(), BlendMode::Additive.as_f32());
    }
}
