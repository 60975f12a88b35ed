use glyphfield_core::config::{Variant, VisualConfig};
use glyphfield_core::mesh::ParticleMesh;
use glyphfield_core::rotation::RotationDriver;
use glyphfield_core::AtlasLayout;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

mod atlas;
mod sink;

pub use atlas::prepare_atlas_canvas;

const VERTEX_SHADER: &str = include_str!("../shaders/formations.vert");
const FLAT_FRAGMENT_SHADER: &str = include_str!("../shaders/flat.frag");
const GLYPH_FRAGMENT_SHADER: &str = include_str!("../shaders/glyph.frag");

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Particle cloud driven from the page's frame loop.
///
/// The host uploads the geometry channels once, then every frame calls
/// `frame()` (and `advanceRotation(dt)` for the rotating variant) and copies
/// the uniform block or calls `writeUniforms(material.uniforms)`.
#[wasm_bindgen]
pub struct GlyphField {
    mesh: ParticleMesh,
    rotation: Option<RotationDriver>,
    rng: StdRng,
}

#[wasm_bindgen]
impl GlyphField {
    /// `variant`: 0 = triangles, 1 = floating chars. Non-positive counts give an empty cloud.
    #[wasm_bindgen(constructor)]
    pub fn new(num_particles: i32, variant: u32) -> Result<GlyphField, JsValue> {
        Self::build(num_particles, variant, StdRng::from_entropy())
    }

    /// Deterministic construction for reproducible layouts.
    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(num_particles: i32, variant: u32, seed: u32) -> Result<GlyphField, JsValue> {
        Self::build(num_particles, variant, StdRng::seed_from_u64(seed as u64))
    }

    #[wasm_bindgen(js_name = selectAnimation)]
    pub fn select_animation(&mut self, index: i32) {
        self.mesh.select_animation(index);
    }

    #[wasm_bindgen(js_name = setWeight)]
    pub fn set_weight(&mut self, index: i32, value: f32) {
        self.mesh.set_weight(index, value);
    }

    /// Advance one frame. Returns the new `time` uniform.
    #[wasm_bindgen]
    pub fn frame(&mut self) -> f32 {
        self.mesh.update().time
    }

    /// Write every uniform into a three.js-style `{ name: { value } }` object.
    #[wasm_bindgen(js_name = writeUniforms)]
    pub fn write_uniforms(&self, uniforms: &JsValue) -> Result<(), JsValue> {
        let mut sink = sink::MaterialUniforms::new(uniforms);
        self.mesh.write_uniforms(&mut sink);
        sink.finish()
    }

    /// Advance the rotation timer by `dt` seconds. Returns the formation it
    /// switched to, or 0 when nothing fired (or the variant does not rotate).
    #[wasm_bindgen(js_name = advanceRotation)]
    pub fn advance_rotation(&mut self, dt: f32) -> u32 {
        let Some(driver) = self.rotation.as_mut() else {
            return 0;
        };
        match driver.tick(dt, &mut self.rng) {
            Some(selection) => {
                self.mesh.select_animation(selection as i32);
                selection
            }
            None => 0,
        }
    }

    #[wasm_bindgen]
    pub fn weights(&self) -> Vec<f32> {
        self.mesh.controller().weights().to_vec()
    }

    #[wasm_bindgen]
    pub fn time(&self) -> f32 {
        self.mesh.uniforms().time
    }

    #[wasm_bindgen(js_name = isTransitioning)]
    pub fn is_transitioning(&self) -> bool {
        self.mesh.controller().is_transitioning()
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.mesh.geometry().particle_count()
    }

    #[wasm_bindgen(js_name = vertexCount)]
    pub fn vertex_count(&self) -> usize {
        self.mesh.geometry().vertex_count()
    }

    #[wasm_bindgen]
    pub fn positions(&self) -> Vec<f32> {
        self.mesh.geometry().positions.clone()
    }

    #[wasm_bindgen(js_name = randomSeeds)]
    pub fn random_seeds(&self) -> Vec<f32> {
        self.mesh.geometry().random_seeds.clone()
    }

    #[wasm_bindgen(js_name = vertexIndices)]
    pub fn vertex_indices(&self) -> Vec<u32> {
        self.mesh.geometry().vertex_indices.clone()
    }

    #[wasm_bindgen(js_name = ringIndices)]
    pub fn ring_indices(&self) -> Vec<f32> {
        self.mesh.geometry().ring_indices.clone()
    }

    #[wasm_bindgen]
    pub fn normals(&self) -> Vec<f32> {
        self.mesh.geometry().normals.clone()
    }

    #[wasm_bindgen]
    pub fn uvs(&self) -> Vec<f32> {
        self.mesh.geometry().uvs.clone()
    }

    #[wasm_bindgen]
    pub fn indices(&self) -> Vec<u32> {
        self.mesh.geometry().indices.clone()
    }

    /// Pointer to the 64-byte uniform block inside wasm memory.
    #[wasm_bindgen(js_name = uniformBufferPtr)]
    pub fn uniform_buffer_ptr(&self) -> *const u8 {
        self.mesh.uniforms().as_bytes().as_ptr()
    }

    #[wasm_bindgen(js_name = uniformBufferByteLength)]
    pub fn uniform_buffer_byte_length(&self) -> usize {
        self.mesh.uniforms().as_bytes().len()
    }

    /// Rebuild the geometry for a new particle count. Channels must be re-uploaded.
    #[wasm_bindgen]
    pub fn rebuild(&mut self, num_particles: i32) {
        let count = usize::try_from(num_particles).unwrap_or(0);
        self.mesh.rebuild(count, &mut self.rng);
        log::info!("geometry rebuilt: {} particles", count);
    }

    /// Lay out a glyph atlas and publish its grid to the uniforms.
    #[wasm_bindgen(js_name = setAtlas)]
    pub fn set_atlas(&mut self, glyphs: &str, grid_cols: u32, cell_size: u32) -> Result<(), JsValue> {
        let layout = AtlasLayout::new(glyphs, grid_cols, cell_size).map_err(to_js_error)?;
        self.mesh.set_atlas(layout);
        Ok(())
    }

    #[wasm_bindgen(js_name = atlasRows)]
    pub fn atlas_rows(&self) -> u32 {
        self.mesh.atlas().map_or(0, |a| a.grid_rows())
    }

    #[wasm_bindgen(js_name = vertexShader)]
    pub fn vertex_shader() -> String {
        VERTEX_SHADER.to_string()
    }

    /// Fragment program: textured glyphs when `glyphs` is set, flat color otherwise.
    #[wasm_bindgen(js_name = fragmentShader)]
    pub fn fragment_shader(glyphs: bool) -> String {
        if glyphs {
            GLYPH_FRAGMENT_SHADER.to_string()
        } else {
            FLAT_FRAGMENT_SHADER.to_string()
        }
    }
}

impl GlyphField {
    fn build(num_particles: i32, variant: u32, mut rng: StdRng) -> Result<GlyphField, JsValue> {
        let variant = Variant::from_tag(variant);
        let count = usize::try_from(num_particles).unwrap_or(0);
        let config = VisualConfig::for_variant(variant).with_particles(count);
        let mesh = ParticleMesh::with_rng(&config, &mut rng).map_err(to_js_error)?;
        let rotation = config
            .rotation_interval
            .map(|interval| RotationDriver::new(interval, &mut rng));
        log::info!("GlyphField created: {:?}, {} particles", variant, count);
        Ok(GlyphField { mesh, rotation, rng })
    }
}
