use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

/// Number of formations the vertex program blends between.
pub const ANIMATION_COUNT: usize = 8;

const ANIMATION_VALUE_NAMES: [&str; ANIMATION_COUNT] = [
    "animationValue1",
    "animationValue2",
    "animationValue3",
    "animationValue4",
    "animationValue5",
    "animationValue6",
    "animationValue7",
    "animationValue8",
];

/// Named scalar uniform slots of the shading stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformSlot {
    Time,
    NumVertices,
    /// 1-based formation weight, `AnimationValue(1)..=AnimationValue(8)`.
    AnimationValue(usize),
    NumTextureGridCols,
    NumTextureGridRows,
    TextureTxtLength,
}

impl UniformSlot {
    /// Shader-side uniform name. `None` for an out-of-range animation index.
    pub fn name(self) -> Option<&'static str> {
        match self {
            UniformSlot::Time => Some("time"),
            UniformSlot::NumVertices => Some("numVertices"),
            UniformSlot::AnimationValue(k) => {
                k.checked_sub(1).and_then(|i| ANIMATION_VALUE_NAMES.get(i)).copied()
            }
            UniformSlot::NumTextureGridCols => Some("numTextureGridCols"),
            UniformSlot::NumTextureGridRows => Some("numTextureGridRows"),
            UniformSlot::TextureTxtLength => Some("textureTxtLength"),
        }
    }
}

/// Write-only destination for per-frame uniform values.
pub trait UniformSink {
    fn set_uniform(&mut self, slot: UniformSlot, value: f32);
}

impl UniformSink for HashMap<String, f32> {
    fn set_uniform(&mut self, slot: UniformSlot, value: f32) {
        if let Some(name) = slot.name() {
            self.insert(name.to_string(), value);
        }
    }
}

/// GPU-compatible uniform block: 64 bytes, matches the `FrameUniforms` block
/// consumed by the vertex program.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub time: f32,
    pub num_vertices: f32,
    pub animation_values: [f32; ANIMATION_COUNT],
    pub num_texture_grid_cols: f32,
    pub num_texture_grid_rows: f32,
    pub texture_txt_length: f32,
    _pad: f32,
}

impl FrameUniforms {
    pub fn new(num_vertices: f32) -> Self {
        let mut animation_values = [0.0; ANIMATION_COUNT];
        animation_values[0] = 1.0;
        Self {
            time: 0.0,
            num_vertices,
            animation_values,
            num_texture_grid_cols: 1.0,
            num_texture_grid_rows: 1.0,
            texture_txt_length: 1.0,
            _pad: 0.0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Push every slot into another sink (e.g. a host material).
    pub fn write_to<S: UniformSink + ?Sized>(&self, sink: &mut S) {
        sink.set_uniform(UniformSlot::Time, self.time);
        sink.set_uniform(UniformSlot::NumVertices, self.num_vertices);
        for (i, &w) in self.animation_values.iter().enumerate() {
            sink.set_uniform(UniformSlot::AnimationValue(i + 1), w);
        }
        sink.set_uniform(UniformSlot::NumTextureGridCols, self.num_texture_grid_cols);
        sink.set_uniform(UniformSlot::NumTextureGridRows, self.num_texture_grid_rows);
        sink.set_uniform(UniformSlot::TextureTxtLength, self.texture_txt_length);
    }
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl UniformSink for FrameUniforms {
    fn set_uniform(&mut self, slot: UniformSlot, value: f32) {
        match slot {
            UniformSlot::Time => self.time = value,
            UniformSlot::NumVertices => self.num_vertices = value,
            UniformSlot::AnimationValue(k) => {
                if let Some(w) = k.checked_sub(1).and_then(|i| self.animation_values.get_mut(i)) {
                    *w = value;
                }
            }
            UniformSlot::NumTextureGridCols => self.num_texture_grid_cols = value,
            UniformSlot::NumTextureGridRows => self.num_texture_grid_rows = value,
            UniformSlot::TextureTxtLength => self.texture_txt_length = value,
        }
    }
}
