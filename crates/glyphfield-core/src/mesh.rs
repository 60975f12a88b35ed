use rand::Rng;

use crate::atlas::AtlasLayout;
use crate::blend::BlendController;
use crate::config::VisualConfig;
use crate::error::Result;
use crate::formations::evaluator::{evaluate_all, ShadedVertex};
use crate::geometry::{GeometryBuffers, GeometryBuilder};
use crate::uniforms::{FrameUniforms, UniformSink, UniformSlot};

/// Shading parameters handed to the host renderer alongside the geometry.
#[derive(Debug, Clone)]
pub struct Material {
    pub uniforms: FrameUniforms,
    /// Non-glyph texels are see-through.
    pub transparent: bool,
    pub double_sided: bool,
}

/// A drawable particle cloud: geometry, material and the blend controller
/// driving the material's formation weights.
pub struct ParticleMesh {
    geometry: GeometryBuffers,
    material: Material,
    controller: BlendController,
    builder: GeometryBuilder,
    atlas: Option<AtlasLayout>,
}

impl ParticleMesh {
    pub fn new(config: &VisualConfig) -> Result<Self> {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(config: &VisualConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let builder = GeometryBuilder::new(config.template, config.seed_range);
        let geometry = builder.build_with_rng(config.num_particles, rng);
        let mut mesh = Self {
            geometry,
            material: Material {
                uniforms: FrameUniforms::new(config.num_particles as f32),
                transparent: true,
                double_sided: true,
            },
            controller: BlendController::new(config.blend.clone()),
            builder,
            atlas: None,
        };
        if let Some(atlas) = &config.atlas {
            mesh.set_atlas(AtlasLayout::new(&atlas.glyphs, atlas.grid_cols, atlas.cell_size)?);
        }
        log::info!(
            "particle mesh ready: {:?}, {} particles",
            config.variant,
            mesh.geometry.particle_count()
        );
        Ok(mesh)
    }

    pub fn geometry(&self) -> &GeometryBuffers {
        &self.geometry
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn uniforms(&self) -> &FrameUniforms {
        &self.material.uniforms
    }

    pub fn controller(&self) -> &BlendController {
        &self.controller
    }

    pub fn atlas(&self) -> Option<&AtlasLayout> {
        self.atlas.as_ref()
    }

    pub fn select_animation(&mut self, k: i32) {
        self.controller.select_animation(k);
    }

    /// Manual weight override. Written to the material immediately.
    pub fn set_weight(&mut self, k: i32, value: f32) {
        self.controller.set_weight(k, value);
        if let Some(w) = self.controller.weight(k) {
            self.material.uniforms.set_uniform(UniformSlot::AnimationValue(k as usize), w);
        }
    }

    /// Per-frame update: advance the controller one frame and publish into the material.
    pub fn update(&mut self) -> &FrameUniforms {
        self.controller.publish_frame(&mut self.material.uniforms);
        &self.material.uniforms
    }

    /// Publish the current uniform block into an external sink as well.
    pub fn write_uniforms<S: UniformSink + ?Sized>(&self, sink: &mut S) {
        self.material.uniforms.write_to(sink);
    }

    pub fn set_atlas(&mut self, layout: AtlasLayout) {
        layout.publish(&mut self.material.uniforms);
        self.atlas = Some(layout);
    }

    /// Replace the geometry with a freshly built cloud of `num_particles`.
    pub fn rebuild<R: Rng + ?Sized>(&mut self, num_particles: usize, rng: &mut R) {
        self.geometry = self.builder.build_with_rng(num_particles, rng);
        self.material
            .uniforms
            .set_uniform(UniformSlot::NumVertices, num_particles as f32);
    }

    /// Run the formation program on the CPU for the current frame uniforms.
    pub fn evaluate(&self) -> Vec<ShadedVertex> {
        evaluate_all(&self.geometry, &self.material.uniforms)
    }
}
