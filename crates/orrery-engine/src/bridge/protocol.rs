//! Frame buffer layout shared with the host renderer.
//! Must stay in sync with the host's reader.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [Camera: 36 floats (view 16, projection 16, eye xyzw)]
//! [Lights: max_lights × 8 floats]
//! [Instances: max_instances × 24 floats]
//! ```
//!
//! Capacities are written once into the header at init.
//! The host reads them from the header to compute offsets.

use crate::api::game::GameConfig;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::NodeInstance;
use crate::systems::lighting::LightUniform;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_ALPHA_START: usize = 4;
pub const HEADER_ADDITIVE_START: usize = 5;
pub const HEADER_MAX_LIGHTS: usize = 6;
pub const HEADER_LIGHT_COUNT: usize = 7;
pub const HEADER_VIEWPORT_WIDTH: usize = 8;
pub const HEADER_VIEWPORT_HEIGHT: usize = 9;
pub const HEADER_SIM_TIME: usize = 10;
pub const HEADER_AMBIENT_R: usize = 11;
pub const HEADER_AMBIENT_G: usize = 12;
pub const HEADER_AMBIENT_B: usize = 13;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

pub const CAMERA_FLOATS: usize = CameraUniform::FLOATS;
pub const LIGHT_FLOATS: usize = LightUniform::FLOATS;
pub const INSTANCE_FLOATS: usize = NodeInstance::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_lights: usize,

    pub light_data_floats: usize,
    pub instance_data_floats: usize,

    /// Offset (in floats) where the camera block begins.
    pub camera_data_offset: usize,
    pub light_data_offset: usize,
    pub instance_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_instances: usize, max_lights: usize) -> Self {
        let light_data_floats = max_lights * LIGHT_FLOATS;
        let instance_data_floats = max_instances * INSTANCE_FLOATS;

        let camera_data_offset = HEADER_FLOATS;
        let light_data_offset = camera_data_offset + CAMERA_FLOATS;
        let instance_data_offset = light_data_offset + light_data_floats;

        let buffer_total_floats = instance_data_offset + instance_data_floats;

        Self {
            max_instances,
            max_lights,
            light_data_floats,
            instance_data_floats,
            camera_data_offset,
            light_data_offset,
            instance_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_lights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());
        assert_eq!(layout.max_instances, 2048);
        assert_eq!(layout.max_lights, 8);
        assert_eq!(layout.instance_data_floats, 2048 * 24);
        assert_eq!(
            layout.buffer_total_floats,
            HEADER_FLOATS + 36 + 8 * 8 + 2048 * 24
        );
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(10, 3);
        assert_eq!(layout.camera_data_offset, HEADER_FLOATS);
        assert_eq!(layout.light_data_offset, layout.camera_data_offset + CAMERA_FLOATS);
        assert_eq!(layout.instance_data_offset, layout.light_data_offset + layout.light_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.instance_data_offset + layout.instance_data_floats);
    }

    #[test]
    fn header_fields_fit() {
        assert!(HEADER_AMBIENT_B < HEADER_FLOATS);
    }
}
