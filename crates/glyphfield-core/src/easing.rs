/// Easing curves mapping an elapsed fraction in [0,1] to an eased fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    #[default]
    Linear,
    /// Exponential ease-out, `1 - 2^(-10t)`, pinned to exactly 1 at the end.
    ExpoOut,
    /// Exponential in/out, the same curve the vertex program uses per formation.
    ExpoInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Easing::ExpoInOut => exponential_in_out(t),
        }
    }
}

/// Exponential in/out without clamping the endpoints away.
pub fn exponential_in_out(t: f32) -> f32 {
    if t == 0.0 || t == 1.0 {
        t
    } else if t < 0.5 {
        0.5 * 2f32.powf(20.0 * t - 10.0)
    } else {
        -0.5 * 2f32.powf(10.0 - t * 20.0) + 1.0
    }
}
