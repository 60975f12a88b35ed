use std::f32::consts::{PI, TAU};

use glam::{Quat, Vec3};

/// Fractional part with GLSL semantics (`x - floor(x)`), always in [0,1).
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Modulo with GLSL semantics: the result takes the sign of `y`.
pub fn glsl_mod(x: f32, y: f32) -> f32 {
    x - y * (x / y).floor()
}

/// Linear remap of `value` from `[in_min, in_max]` to `[out_min, out_max]` - port of the
/// shader's `map`. With `clamp` set, inputs outside the source range pin to the output bounds.
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32, clamp: bool) -> f32 {
    if clamp {
        if value < in_min {
            return out_min;
        }
        if value > in_max {
            return out_max;
        }
    }
    let p = (out_max - out_min) / (in_max - in_min);
    (value - in_min) * p + out_min
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Rotate `p` by `angle` radians around `axis` (normalized here) - port of GLSL `rotateVec3`.
pub fn rotate_vec3(p: Vec3, angle: f32, axis: Vec3) -> Vec3 {
    let axis = axis.normalize_or_zero();
    if axis == Vec3::ZERO {
        return p;
    }
    Quat::from_axis_angle(axis, angle) * p
}

/// Wrap `time * scale + offset` into a periodic angle in [-PI, PI].
pub fn cycle_angle(time: f32, scale: f32, offset: f32) -> f32 {
    map_range(glsl_mod(time * scale + offset, TAU), 0.0, TAU, -PI, PI, true)
}

/// HSV (all components nominally in [0,1]) to RGB - port of the GLSL `hsv2rgb`.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Vec3 {
    let k = [1.0, 2.0 / 3.0, 1.0 / 3.0];
    let channel = |offset: f32| {
        let p = (fract(h + offset) * 6.0 - 3.0).abs();
        let c = (p - 1.0).clamp(0.0, 1.0);
        v * lerp(1.0, c, s)
    };
    Vec3::new(channel(k[0]), channel(k[1]), channel(k[2]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glsl_mod_negative() {
        assert!((glsl_mod(-1.0, 3.0) - 2.0).abs() < 1e-6);
        assert!((glsl_mod(7.0, 3.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let p = rotate_vec3(Vec3::X, std::f32::consts::FRAC_PI_2, Vec3::Z);
        assert!((p - Vec3::Y).length() < 1e-5, "x rotated about z should land on y: {p:?}");
    }
}
