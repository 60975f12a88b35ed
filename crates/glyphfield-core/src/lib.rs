//! Procedural particle geometry and formation blending for an animated
//! glyph/triangle cloud.
//!
//! The geometry builder lays out per-vertex attributes for the vertex program;
//! the blend controller crossfades the program's eight formation weights.

pub mod atlas;
pub mod blend;
pub mod config;
pub mod easing;
pub mod error;
pub mod formations;
pub mod geometry;
pub mod math;
pub mod mesh;
pub mod rotation;
pub mod uniforms;

pub use atlas::AtlasLayout;
pub use blend::{BlendController, Weights};
pub use config::{AtlasConfig, BlendConfig, Variant, VisualConfig};
pub use easing::Easing;
pub use error::{AtlasError, ConfigError, Error};
pub use geometry::{GeometryBuffers, GeometryBuilder, ParticleTemplate, SeedRange};
pub use mesh::ParticleMesh;
pub use rotation::RotationDriver;
pub use uniforms::{FrameUniforms, UniformSink, UniformSlot, ANIMATION_COUNT};
