//! Blend and color stage of the formation program.

use glam::{Vec3, Vec4};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::easing::exponential_in_out;
use crate::formations::animations::{FormationContext, VertexState, FORMATIONS};
use crate::geometry::{GeometryBuffers, VertexAttributes};
use crate::math::{cycle_angle, hsv_to_rgb, map_range};
use crate::uniforms::FrameUniforms;

/// Output of the vertex program for one vertex, in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadedVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub color: Vec4,
}

/// Per-particle progress of a formation. The random seed staggers the start so
/// particles peel off one by one instead of moving in lockstep.
pub fn formation_progress(weight: f32, seed_x: f32) -> f32 {
    let p = (weight * 1.5 - map_range(seed_x, -1.0, 1.0, 0.0, 0.6, true)).clamp(0.0, 1.0);
    exponential_in_out(p)
}

/// Run all eight formations and the color stage for one vertex.
pub fn evaluate(vertex: &VertexAttributes, uniforms: &FrameUniforms) -> ShadedVertex {
    let ctx = FormationContext {
        vertex,
        time: uniforms.time,
        num_vertices: uniforms.num_vertices,
    };
    let mut state = VertexState {
        position: vertex.position,
        normal: vertex.normal,
    };

    for (formation, &weight) in FORMATIONS.iter().zip(uniforms.animation_values.iter()) {
        let p = formation_progress(weight, vertex.random_seed.x);
        if p > 0.0 {
            formation(&mut state, &ctx, p);
        }
    }

    let w = &uniforms.animation_values;
    // Billboard corners are re-added in view space by the host; strip them here.
    state.position -= w[0] * vertex.position;

    ShadedVertex {
        position: state.position,
        normal: state.normal,
        color: shade(state.position, state.normal, w, uniforms.time),
    }
}

/// Hue/saturation drift with distance from the origin, lit by a fixed
/// directional light with a 0.5 ambient floor.
pub fn shade(position: Vec3, normal: Vec3, w: &[f32; 8], time: f32) -> Vec4 {
    let len = position.length();
    let hue = map_range(
        cycle_angle(time, 2.0, 0.6 + len * (w[4] * 0.2 * 0.2 + w[5] * 0.2 * 0.5)).sin(),
        -1.0,
        1.0,
        0.0,
        1.0,
        true,
    );
    let saturation = map_range(
        cycle_angle(time, 3.0, 2.0 + len * (w[7] * 2.0 + w[6] * 3.0)).cos(),
        -1.0,
        1.0,
        0.3,
        0.5,
        true,
    );
    let value = map_range(cycle_angle(time, 1.0, 0.3).cos(), -1.0, 1.0, 1.6, 2.0, true) + w[3] * 0.2;
    let rgb = hsv_to_rgb(hue, saturation, value);
    let diffuse = normal.dot(Vec3::ONE.normalize()).clamp(0.5, 1.0);
    (rgb * diffuse).extend(1.0)
}

/// Evaluate every vertex of `geometry`.
pub fn evaluate_all(geometry: &GeometryBuffers, uniforms: &FrameUniforms) -> Vec<ShadedVertex> {
    #[cfg(feature = "parallel")]
    {
        (0..geometry.vertex_count())
            .into_par_iter()
            .filter_map(|i| geometry.vertex(i))
            .map(|v| evaluate(&v, uniforms))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        geometry.vertices().map(|v| evaluate(&v, uniforms)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_staggered_by_seed() {
        assert_eq!(formation_progress(0.0, -1.0), 0.0);
        assert_eq!(formation_progress(1.0, -1.0), 1.0);
        assert!(formation_progress(1.0, 1.0) > 0.99);
        // At half weight the low-seed particle is further along than the high-seed one.
        assert!(formation_progress(0.5, -1.0) > formation_progress(0.5, 1.0));
    }

    #[test]
    fn test_zero_weight_progress_is_zero() {
        for i in 0..=20 {
            let seed = -1.0 + i as f32 * 0.1;
            assert_eq!(formation_progress(0.0, seed), 0.0, "seed {seed}");
        }
    }
}
