use crate::atlas::{DEFAULT_CELL_SIZE, DEFAULT_FONT_FAMILY, DEFAULT_GLYPHS, DEFAULT_GRID_COLS};
use crate::easing::Easing;
use crate::error::ConfigError;
use crate::geometry::{ParticleTemplate, SeedRange};

/// The two page variants the visual ships as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    /// Plain jittered triangles, rotating formations on a timer.
    #[default]
    Triangles,
    /// Glyph quads textured from a character atlas, formations picked manually.
    FloatingChars,
}

impl Variant {
    /// Map a host-side numeric tag to a variant. Unknown tags fall back to `Triangles`.
    pub fn from_tag(tag: u32) -> Self {
        match tag {
            1 => Variant::FloatingChars,
            _ => Variant::Triangles,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BlendConfig {
    /// Transition length in seconds.
    pub duration: f32,
    pub easing: Easing,
    /// Nominal seconds per published frame, used to convert `duration` into frames.
    pub frame_interval: f32,
    /// Added to the shader `time` uniform on every published frame.
    pub time_step: f32,
}

impl Default for BlendConfig {
    fn default() -> Self {
        Self {
            duration: 2.0,
            easing: Easing::Linear,
            frame_interval: 1.0 / 60.0,
            time_step: 0.001,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AtlasConfig {
    pub glyphs: String,
    pub font_family: String,
    pub grid_cols: u32,
    pub cell_size: u32,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            glyphs: DEFAULT_GLYPHS.to_string(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            grid_cols: DEFAULT_GRID_COLS,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VisualConfig {
    pub variant: Variant,
    pub num_particles: usize,
    pub template: ParticleTemplate,
    pub seed_range: SeedRange,
    pub blend: BlendConfig,
    /// Seconds between automatic formation changes; `None` disables the rotation driver.
    pub rotation_interval: Option<f32>,
    pub atlas: Option<AtlasConfig>,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self::triangles()
    }
}

impl VisualConfig {
    pub fn triangles() -> Self {
        Self {
            variant: Variant::Triangles,
            num_particles: 10_000,
            template: ParticleTemplate::JitteredTriangle,
            seed_range: SeedRange::Signed,
            blend: BlendConfig::default(),
            rotation_interval: Some(15.0),
            atlas: None,
        }
    }

    pub fn floating_chars() -> Self {
        Self {
            variant: Variant::FloatingChars,
            num_particles: 10_000,
            template: ParticleTemplate::FixedTriangle,
            seed_range: SeedRange::Unit,
            blend: BlendConfig {
                duration: 1.0,
                easing: Easing::ExpoOut,
                ..BlendConfig::default()
            },
            rotation_interval: None,
            atlas: Some(AtlasConfig::default()),
        }
    }

    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Triangles => Self::triangles(),
            Variant::FloatingChars => Self::floating_chars(),
        }
    }

    pub fn with_particles(mut self, num_particles: usize) -> Self {
        self.num_particles = num_particles;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let blend = &self.blend;
        if !blend.duration.is_finite() || blend.duration < 0.0 {
            return Err(ConfigError::InvalidDuration(blend.duration));
        }
        if !blend.frame_interval.is_finite() || blend.frame_interval <= 0.0 {
            return Err(ConfigError::InvalidFrameInterval(blend.frame_interval));
        }
        if !blend.time_step.is_finite() || blend.time_step < 0.0 {
            return Err(ConfigError::InvalidTimeStep(blend.time_step));
        }
        if let Some(interval) = self.rotation_interval {
            if !interval.is_finite() || interval <= 0.0 {
                return Err(ConfigError::InvalidRotationInterval(interval));
            }
        }
        if let Some(atlas) = &self.atlas {
            crate::atlas::AtlasLayout::new(&atlas.glyphs, atlas.grid_cols, atlas.cell_size)?;
        }
        Ok(())
    }
}
