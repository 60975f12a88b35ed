//! Procedural particle geometry.
//!
//! One particle is one small primitive (a triangle, or a quad for glyphs). Every
//! vertex of a particle carries the particle's random seed and ring index so the
//! vertex program can tell per-particle behaviour from per-vertex behaviour.
//! Buffers are laid out SoA, ready for upload as vertex attributes.

use glam::{Vec2, Vec3};
use rand::Rng;

/// Vertex layout emitted for each particle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParticleTemplate {
    /// Fixed triangle shared by every particle: (1,-1,-1), (-1,1,1), (0,0,1).
    FixedTriangle,
    /// Right triangle with jittered legs and a jittered depth shared by its corners.
    #[default]
    JitteredTriangle,
    /// Axis-aligned quad of half-width `half_size`, emitted as two triangles.
    Quad { half_size: f32 },
}

impl ParticleTemplate {
    pub fn vertices_per_particle(self) -> usize {
        match self {
            ParticleTemplate::FixedTriangle | ParticleTemplate::JitteredTriangle => 3,
            ParticleTemplate::Quad { .. } => 4,
        }
    }

    pub fn indices_per_particle(self) -> usize {
        match self {
            ParticleTemplate::FixedTriangle | ParticleTemplate::JitteredTriangle => 3,
            ParticleTemplate::Quad { .. } => 6,
        }
    }

    /// Corner uv coordinates in emission order.
    fn corner_uvs(self) -> &'static [[f32; 2]] {
        match self {
            ParticleTemplate::FixedTriangle | ParticleTemplate::JitteredTriangle => {
                &[[0.0, 1.0], [0.0, 0.0], [1.0, 0.0]]
            }
            ParticleTemplate::Quad { .. } => &[[0.0, 1.0], [0.0, 0.0], [1.0, 0.0], [1.0, 1.0]],
        }
    }

    /// Local index pattern, offset by the particle's first vertex.
    fn local_indices(self) -> &'static [u32] {
        match self {
            ParticleTemplate::FixedTriangle | ParticleTemplate::JitteredTriangle => &[0, 1, 2],
            ParticleTemplate::Quad { .. } => &[0, 1, 2, 2, 3, 1],
        }
    }

    fn emit_positions<R: Rng + ?Sized>(self, rng: &mut R, out: &mut Vec<f32>) {
        match self {
            ParticleTemplate::FixedTriangle => {
                out.extend_from_slice(&[1.0, -1.0, -1.0, -1.0, 1.0, 1.0, 0.0, 0.0, 1.0]);
            }
            ParticleTemplate::JitteredTriangle => {
                let z = 1.0 + 0.5 * rng.gen::<f32>();
                let x = 1.0 + rng.gen::<f32>();
                let y = 1.0 + rng.gen::<f32>();
                out.extend_from_slice(&[0.0, 0.0, z, x, 0.0, z, 0.0, y, z]);
            }
            ParticleTemplate::Quad { half_size: h } => {
                out.extend_from_slice(&[-h, -h, 0.0, -h, h, 0.0, h, h, 0.0, h, -h, 0.0]);
            }
        }
    }
}

/// Range the per-particle random seed components are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedRange {
    /// `[0, 1)`
    Unit,
    /// `[-1, 1)`
    #[default]
    Signed,
}

impl SeedRange {
    fn draw<R: Rng + ?Sized>(self, rng: &mut R) -> f32 {
        let u = rng.gen::<f32>();
        match self {
            SeedRange::Unit => u,
            SeedRange::Signed => u * 2.0 - 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Float32,
    Uint32,
}

/// Describes one vertex attribute channel for the host's buffer upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLayout {
    pub name: &'static str,
    pub components: usize,
    pub kind: ScalarKind,
}

pub const ATTRIBUTE_LAYOUTS: [AttributeLayout; 6] = [
    AttributeLayout { name: "position", components: 3, kind: ScalarKind::Float32 },
    AttributeLayout { name: "randomSeed", components: 3, kind: ScalarKind::Float32 },
    AttributeLayout { name: "vertexIndex", components: 1, kind: ScalarKind::Uint32 },
    AttributeLayout { name: "ringIndex", components: 1, kind: ScalarKind::Float32 },
    AttributeLayout { name: "normal", components: 3, kind: ScalarKind::Float32 },
    AttributeLayout { name: "uv", components: 2, kind: ScalarKind::Float32 },
];

/// Attributes of a single vertex, gathered from the SoA buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexAttributes {
    pub position: Vec3,
    pub random_seed: Vec3,
    pub vertex_index: u32,
    pub ring_index: f32,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// SoA geometry buffers for the whole particle cloud. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct GeometryBuffers {
    pub positions: Vec<f32>,
    pub random_seeds: Vec<f32>,
    pub vertex_indices: Vec<u32>,
    pub ring_indices: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: Vec<u32>,
    vertices_per_particle: usize,
}

impl GeometryBuffers {
    pub fn vertex_count(&self) -> usize {
        self.vertex_indices.len()
    }

    pub fn particle_count(&self) -> usize {
        if self.vertices_per_particle == 0 {
            0
        } else {
            self.vertex_count() / self.vertices_per_particle
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertices_per_particle(&self) -> usize {
        self.vertices_per_particle
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_indices.is_empty()
    }

    pub fn vertex(&self, i: usize) -> Option<VertexAttributes> {
        if i >= self.vertex_count() {
            return None;
        }
        let v3 = |buf: &[f32]| Vec3::new(buf[i * 3], buf[i * 3 + 1], buf[i * 3 + 2]);
        Some(VertexAttributes {
            position: v3(&self.positions),
            random_seed: v3(&self.random_seeds),
            vertex_index: self.vertex_indices[i],
            ring_index: self.ring_indices[i],
            normal: v3(&self.normals),
            uv: Vec2::new(self.uvs[i * 2], self.uvs[i * 2 + 1]),
        })
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexAttributes> + '_ {
        (0..self.vertex_count()).filter_map(move |i| self.vertex(i))
    }

    /// Accumulate face normals (`(c - b) x (a - b)`) per vertex, then normalize.
    fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertex_count()];
        let pos = |i: usize| {
            Vec3::new(self.positions[i * 3], self.positions[i * 3 + 1], self.positions[i * 3 + 2])
        };
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let face = (pos(c) - pos(b)).cross(pos(a) - pos(b));
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
        self.normals = normals
            .into_iter()
            .flat_map(|n| n.normalize_or_zero().to_array())
            .collect();
    }
}

/// Builds [`GeometryBuffers`] from a template and a seed range.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryBuilder {
    pub template: ParticleTemplate,
    pub seed_range: SeedRange,
}

impl GeometryBuilder {
    pub fn new(template: ParticleTemplate, seed_range: SeedRange) -> Self {
        Self { template, seed_range }
    }

    /// Build with the thread-local RNG. Contents differ between calls.
    pub fn build(&self, num_particles: usize) -> GeometryBuffers {
        self.build_with_rng(num_particles, &mut rand::thread_rng())
    }

    /// Build from a host-supplied signed count; non-positive counts give empty buffers.
    pub fn build_signed(&self, num_particles: i64) -> GeometryBuffers {
        self.build(usize::try_from(num_particles).unwrap_or(0))
    }

    pub fn build_with_rng<R: Rng + ?Sized>(&self, num_particles: usize, rng: &mut R) -> GeometryBuffers {
        let per = self.template.vertices_per_particle();
        let vertex_count = num_particles * per;
        let mut buffers = GeometryBuffers {
            positions: Vec::with_capacity(vertex_count * 3),
            random_seeds: Vec::with_capacity(vertex_count * 3),
            vertex_indices: Vec::with_capacity(vertex_count),
            ring_indices: Vec::with_capacity(vertex_count),
            normals: Vec::new(),
            uvs: Vec::with_capacity(vertex_count * 2),
            indices: Vec::with_capacity(num_particles * self.template.indices_per_particle()),
            vertices_per_particle: per,
        };

        for i in 0..num_particles {
            let seed = [
                self.seed_range.draw(rng),
                self.seed_range.draw(rng),
                self.seed_range.draw(rng),
            ];
            let first = (i * per) as u32;

            self.template.emit_positions(rng, &mut buffers.positions);
            for (v, uv) in self.template.corner_uvs().iter().enumerate() {
                buffers.random_seeds.extend_from_slice(&seed);
                buffers.ring_indices.push(i as f32);
                buffers.vertex_indices.push(first + v as u32);
                buffers.uvs.extend_from_slice(uv);
            }
            buffers
                .indices
                .extend(self.template.local_indices().iter().map(|&local| first + local));
        }

        buffers.compute_vertex_normals();
        log::debug!(
            "built {} particles ({} vertices, {:?})",
            num_particles,
            buffers.vertex_count(),
            self.template
        );
        buffers
    }
}
