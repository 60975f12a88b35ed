//! The eight formations, ported from the vertex program.
//!
//! Each takes the running position/normal, the vertex attributes, the
//! formation's blend progress `p` and the frame uniforms. Formations are applied
//! in order 1..=8, each seeing the output of the previous one.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::geometry::VertexAttributes;
use crate::math::{cycle_angle, glsl_mod, map_range, rotate_vec3};

/// Base radius shared by the billboard, cylinder and sphere formations.
pub const RADIUS: f32 = 30.0;

/// Running state threaded through the formations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexState {
    pub position: Vec3,
    pub normal: Vec3,
}

/// Per-frame inputs every formation may read.
#[derive(Debug, Clone, Copy)]
pub struct FormationContext<'a> {
    pub vertex: &'a VertexAttributes,
    pub time: f32,
    pub num_vertices: f32,
}

impl FormationContext<'_> {
    fn rad(&self, scale: f32, offset: f32) -> f32 {
        cycle_angle(self.time, scale, offset)
    }
}

/// 1: billboard cloud. Each particle orbits at a pulsing radius.
pub fn billboard(s: &mut VertexState, ctx: &FormationContext, _p: f32) {
    let r = ctx.vertex.random_seed;
    s.position -= ctx.vertex.position;
    let theta = ctx.rad(4.0, (r.x + r.y + r.z) * 200.0);
    s.position.z += RADIUS + RADIUS * map_range(theta.sin(), -1.0, 1.0, 0.0, 1.0, true);
    s.position = rotate_vec3(s.position, ctx.rad(4.0, r.x * 20.0), Vec3::Y);
    s.position = rotate_vec3(s.position, ctx.rad(4.0, r.y * 20.0), Vec3::Z);
    s.position = rotate_vec3(s.position, ctx.rad(4.0, r.z * 20.0), Vec3::X);
}

/// 2: cylinder of eight stacked rings spinning about the y axis.
pub fn cylinder(s: &mut VertexState, ctx: &FormationContext, _p: f32) {
    let num_rings = 8.0;
    let ring = ctx.vertex.ring_index;
    let ring_slot = glsl_mod(ring, num_rings);
    let per_ring = ctx.num_vertices / num_rings;

    s.position.y += map_range(ring_slot, 0.0, num_rings - 1.0, -2.0 * RADIUS, 2.0 * RADIUS, true);
    s.position.z += 1.5 * RADIUS;
    let theta = ctx.rad(10.0, TAU / per_ring * glsl_mod((ring - ring_slot) / num_rings, per_ring));
    s.position = rotate_vec3(s.position, theta, Vec3::Y);
}

/// 3: sphere of small particles.
pub fn sphere(s: &mut VertexState, ctx: &FormationContext, _p: f32) {
    let r = ctx.vertex.random_seed;
    s.position.z += RADIUS;
    s.position = rotate_vec3(s.position, ctx.rad(6.0, r.x * 10.0), Vec3::Y);
    s.position = rotate_vec3(s.position, ctx.rad(6.0, r.y * 10.0), Vec3::X);
    s.position = rotate_vec3(s.position, ctx.rad(6.0, r.z * 10.0), Vec3::Z);
}

/// 4: vibrating shards. Only the non-leading vertices of a triangle move.
pub fn shards(s: &mut VertexState, ctx: &FormationContext, p: f32) {
    let r = ctx.vertex.random_seed;
    s.position -= Vec3::splat(s.position.z * p);
    if glsl_mod(ctx.vertex.vertex_index as f32, 3.0) > 0.0 {
        s.position.z += p * (8.0 * r.z * (r.z * 100.0).sin());
        s.position = rotate_vec3(s.position, p * ctx.rad(10.0, r.x * 10.0), Vec3::X);
        s.position = rotate_vec3(s.position, p * ctx.rad(10.0, r.y * 10.0), Vec3::Y);
        let pulse = p * ctx.rad(60.0, r.z * 60.0).sin() * r.z * 16.0;
        s.position += pulse * s.position.normalize_or_zero();
    }
}

/// 5: sphere of tangential particles, breathing in and out.
pub fn tangential_sphere(s: &mut VertexState, ctx: &FormationContext, p: f32) {
    let r = ctx.vertex.random_seed;
    s.position.z *= 10.0;
    s.position -= (s.position - s.position.normalize_or_zero() * 3.0) * p;
    let rad1 = ctx.rad(10.0, r.x * 10.0);
    let rad2 = ctx.rad(10.0, r.y * 10.0);
    s.position = rotate_vec3(s.position, p * rad1, Vec3::X);
    s.position = rotate_vec3(s.position, p * rad2, Vec3::Y);
    s.normal = rotate_vec3(s.normal, p * rad1, Vec3::X);
    s.normal = rotate_vec3(s.normal, p * rad2, Vec3::Y);
    s.position = p * ctx.rad(10.0, r.z * 10.0).sin() * 30.0 * s.position.normalize_or_zero();
}

/// 6: three nested cubes whose edges the triangles trace.
pub fn nested_cubes(s: &mut VertexState, ctx: &FormationContext, p: f32) {
    let r = ctx.vertex.random_seed;
    s.position *= Vec3::new(1.0, 1.0, 0.0);
    s.position = rotate_vec3(s.position, p * ctx.rad(30.0, r.x * 10.0), Vec3::X);
    s.position = rotate_vec3(s.position, p * ctx.rad(30.0, r.y * 10.0), Vec3::Y);

    let triangle = (ctx.vertex.vertex_index as f32 / 3.0).floor();
    let cube = glsl_mod(glsl_mod(triangle, 41.0), 3.0);
    let size = 8.0 + cube * 8.0;
    let t = glsl_mod(ctx.time * 10.0 + r.z * 10.0, 4.0);
    let edge = |lo: f32| map_range(t, lo, lo + 1.0, -1.0, 1.0, true) * size * p;

    s.position.x += edge(0.0) - size * p;
    s.position.y += edge(1.0) - size * p;
    s.position.x -= edge(2.0);
    s.position.y -= edge(3.0);
    s.position.z -= size * p;

    s.position = rotate_vec3(s.position, p * PI * glsl_mod(triangle, 2.0), Vec3::Z);
    s.position = rotate_vec3(s.position, p * PI / 2.0 * glsl_mod(triangle, 3.0), Vec3::X);
    s.position = rotate_vec3(s.position, p * PI / 2.0 * glsl_mod(triangle, 4.0), Vec3::Y);
    let spin = p * ctx.time * 2.0 * (cube + 1.0);
    s.position = rotate_vec3(s.position, spin, Vec3::Z);
    s.position = rotate_vec3(s.position, spin, Vec3::X);
}

/// 7: flat spiral disc with a travelling wave, tumbling slowly.
pub fn spiral(s: &mut VertexState, ctx: &FormationContext, p: f32) {
    let r = ctx.vertex.random_seed;
    s.position *= Vec3::new(1.0, 1.0, 0.0);
    s.position -= Vec3::splat(r.x * p);
    let rad1 = ctx.rad(40.0, r.x * 5.0);
    let rad2 = ctx.rad(40.0, r.y * 5.0);
    s.position = rotate_vec3(s.position, p * rad1, Vec3::X);
    s.position = rotate_vec3(s.position, p * rad2, Vec3::Y);
    s.normal = rotate_vec3(s.normal, p * rad1, Vec3::X);
    s.normal = rotate_vec3(s.normal, p * rad2, Vec3::Y);

    let radius = 120.0 * map_range(r.y, -1.0, 1.0, 0.02, 1.0, true);
    let orbit = ctx.rad(6.0, r.x * 60.0);
    s.position += Vec3::new(
        p * 2.0 * radius * orbit.cos(),
        p * 6.0 * (ctx.rad(3.0, r.y) * 10.0).sin(),
        p * 2.0 * radius * orbit.sin(),
    );
    let tumble = p * ctx.rad(4.0, 0.0);
    s.position = rotate_vec3(s.position, tumble, Vec3::new(0.3, 1.0, 0.5 * ctx.time.sin()));
    s.normal = rotate_vec3(s.normal, tumble, Vec3::new(0.3, 1.0, ctx.time.sin()));
}

/// 8: particles burst out toward random points of a cube.
pub fn cube_burst(s: &mut VertexState, ctx: &FormationContext, p: f32) {
    let r = ctx.vertex.random_seed;
    s.position -= Vec3::splat(s.position.x * p);
    s.position *= 1.0 + p;
    let rad1 = TAU * ctx.rad(1.0, s.position.x).sin();
    let rad2 = TAU * ctx.rad(1.0, s.position.y).sin();
    s.position = rotate_vec3(s.position, p * rad1, Vec3::X);
    s.position = rotate_vec3(s.position, p * rad2, Vec3::Y);
    s.normal = rotate_vec3(s.normal, p * rad1, Vec3::X);
    s.normal = rotate_vec3(s.normal, p * rad2, Vec3::Y);

    let center = r * 20.0;
    s.position += p * center;
    s.position = rotate_vec3(s.position, p * ctx.rad(1.0, 0.0), Vec3::new(0.3, 1.0, 0.2));
    let wobble = p * ctx.rad(160.0, 160.0).sin() * 0.3;
    s.position += wobble * (center - s.position).normalize_or_zero();
}

pub type Formation = fn(&mut VertexState, &FormationContext, f32);

/// Formations in weight order: index 0 is driven by `animationValue1`.
pub const FORMATIONS: [Formation; 8] = [
    billboard,
    cylinder,
    sphere,
    shards,
    tangential_sphere,
    nested_cubes,
    spiral,
    cube_burst,
];
