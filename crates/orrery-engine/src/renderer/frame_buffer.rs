//! Renderer that serializes each frame into a flat `f32` buffer laid out per
//! [`ProtocolLayout`]. The host reads it through the exported pointer and
//! issues the draw calls itself.

use crate::bridge::protocol::*;
use super::traits::{FrameData, Renderer};

pub struct FrameBufferRenderer {
    layout: ProtocolLayout,
    buffer: Vec<f32>,
    width: u32,
    height: u32,
    overflow_logged: bool,
}

impl FrameBufferRenderer {
    pub fn new(layout: ProtocolLayout) -> Self {
        let mut buffer = vec![0.0; layout.buffer_total_floats];
        buffer[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        buffer[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
        buffer[HEADER_MAX_LIGHTS] = layout.max_lights as f32;
        Self {
            layout,
            buffer,
            width: 0,
            height: 0,
            overflow_logged: false,
        }
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn instance_count(&self) -> usize {
        self.buffer[HEADER_INSTANCE_COUNT] as usize
    }

    /// Floats of instance `index` as written by the last draw.
    pub fn instance(&self, index: usize) -> Option<&[f32]> {
        if index >= self.instance_count() {
            return None;
        }
        let start = self.layout.instance_data_offset + index * INSTANCE_FLOATS;
        self.buffer.get(start..start + INSTANCE_FLOATS)
    }
}

impl Renderer for FrameBufferRenderer {
    fn backend(&self) -> &'static str {
        "frame-buffer"
    }

    fn draw(&mut self, frame: &FrameData) {
        let layout = &self.layout;
        let instance_count = frame.instances.len().min(layout.max_instances);
        let light_count = frame.lights.len().min(layout.max_lights);
        if instance_count < frame.instances.len() && !self.overflow_logged {
            log::warn!(
                "Frame has {} instances, buffer holds {}; extra instances dropped",
                frame.instances.len(),
                layout.max_instances
            );
            self.overflow_logged = true;
        }

        let header = &mut self.buffer[..HEADER_FLOATS];
        header[HEADER_FRAME_COUNTER] = frame.frame as f32;
        header[HEADER_INSTANCE_COUNT] = instance_count as f32;
        header[HEADER_ALPHA_START] = (frame.alpha_start as usize).min(instance_count) as f32;
        header[HEADER_ADDITIVE_START] = (frame.additive_start as usize).min(instance_count) as f32;
        header[HEADER_LIGHT_COUNT] = light_count as f32;
        header[HEADER_VIEWPORT_WIDTH] = frame.viewport.0;
        header[HEADER_VIEWPORT_HEIGHT] = frame.viewport.1;
        header[HEADER_SIM_TIME] = frame.time;
        header[HEADER_AMBIENT_R..=HEADER_AMBIENT_B].copy_from_slice(&frame.ambient);

        let camera: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&frame.camera));
        let cam_start = layout.camera_data_offset;
        self.buffer[cam_start..cam_start + CAMERA_FLOATS].copy_from_slice(camera);

        let lights: &[f32] = bytemuck::cast_slice(&frame.lights[..light_count]);
        let light_start = layout.light_data_offset;
        self.buffer[light_start..light_start + lights.len()].copy_from_slice(lights);

        let instances: &[f32] = bytemuck::cast_slice(&frame.instances[..instance_count]);
        let inst_start = layout.instance_data_offset;
        self.buffer[inst_start..inst_start + instances.len()].copy_from_slice(instances);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
