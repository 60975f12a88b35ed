//! Animation blend controller.
//!
//! Holds the eight formation weights and tweens them toward a one-hot target
//! when a formation is selected. The weights and an elapsed-time scalar are
//! pushed to the shading stage once per rendered frame.
//!
//! Elapsed time advances by a fixed step per published frame rather than by
//! wall-clock time, so the visual speed follows the frame rate.

use crate::config::BlendConfig;
use crate::easing::Easing;
use crate::math::lerp;
use crate::uniforms::{UniformSink, UniformSlot, ANIMATION_COUNT};

pub type Weights = [f32; ANIMATION_COUNT];

/// Weights with formation 1 fully active.
pub const DEFAULT_WEIGHTS: Weights = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];

/// One-hot vector for a 1-based formation index. Out-of-range indices give all zeros.
pub fn one_hot(k: i32) -> Weights {
    let mut w = [0.0; ANIMATION_COUNT];
    if let Some(slot) = usize::try_from(k).ok().and_then(|k| k.checked_sub(1)) {
        if let Some(v) = w.get_mut(slot) {
            *v = 1.0;
        }
    }
    w
}

/// An in-flight tween toward a one-hot target.
#[derive(Debug, Clone)]
pub struct Transition {
    pub target_index: i32,
    from: Weights,
    target: Weights,
    easing: Easing,
    frames_total: u32,
    frames_elapsed: u32,
}

impl Transition {
    fn new(target_index: i32, from: Weights, duration: f32, frame_interval: f32, easing: Easing) -> Self {
        let frames_total = (duration / frame_interval).ceil().max(1.0) as u32;
        Self {
            target_index,
            from,
            target: one_hot(target_index),
            easing,
            frames_total,
            frames_elapsed: 0,
        }
    }

    /// Elapsed fraction in [0,1].
    pub fn progress(&self) -> f32 {
        self.frames_elapsed as f32 / self.frames_total as f32
    }

    pub fn frames_total(&self) -> u32 {
        self.frames_total
    }

    /// Advance one frame and write the interpolated weights. Returns true once finished.
    fn step(&mut self, weights: &mut Weights) -> bool {
        self.frames_elapsed = (self.frames_elapsed + 1).min(self.frames_total);
        if self.frames_elapsed >= self.frames_total {
            *weights = self.target;
            return true;
        }
        let k = self.easing.apply(self.progress());
        for (j, w) in weights.iter_mut().enumerate() {
            *w = lerp(self.from[j], self.target[j], k).clamp(0.0, 1.0);
        }
        false
    }
}

pub struct BlendController {
    weights: Weights,
    transition: Option<Transition>,
    elapsed: f32,
    config: BlendConfig,
}

impl BlendController {
    pub fn new(config: BlendConfig) -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            transition: None,
            elapsed: 0.0,
            config,
        }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Weight of a 1-based formation index.
    pub fn weight(&self, k: i32) -> Option<f32> {
        usize::try_from(k)
            .ok()
            .and_then(|k| k.checked_sub(1))
            .and_then(|i| self.weights.get(i))
            .copied()
    }

    /// Value published as the `time` uniform on the last frame.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn config(&self) -> &BlendConfig {
        &self.config
    }

    /// Start tweening toward formation `k` (1-based), discarding any in-flight tween.
    ///
    /// Indices outside 1..=8 are accepted: the target is all zeros and every
    /// weight fades out. Weights are not touched until the next published frame.
    pub fn select_animation(&mut self, k: i32) {
        if let Some(prev) = self.transition.take() {
            log::trace!("transition to {} cancelled at {:.2}", prev.target_index, prev.progress());
        }
        if !(1..=ANIMATION_COUNT as i32).contains(&k) {
            log::debug!("animation index {} out of range, fading all formations out", k);
        }
        let transition = Transition::new(
            k,
            self.weights,
            self.config.duration,
            self.config.frame_interval,
            self.config.easing,
        );
        log::debug!(
            "transition to animation {} over {} frames ({:?})",
            k,
            transition.frames_total,
            self.config.easing
        );
        self.transition = Some(transition);
    }

    /// Overwrite one weight directly, clamped to [0,1]. Cancels any in-flight
    /// tween so the manual value sticks. Out-of-range indices are ignored.
    pub fn set_weight(&mut self, k: i32, value: f32) {
        let Some(i) = usize::try_from(k).ok().and_then(|k| k.checked_sub(1)) else {
            return;
        };
        let Some(w) = self.weights.get_mut(i) else {
            return;
        };
        *w = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        self.transition = None;
    }

    /// Advance time and any tween by one frame, without publishing.
    pub fn tick(&mut self) {
        self.elapsed += self.config.time_step;
        if let Some(transition) = self.transition.as_mut() {
            if transition.step(&mut self.weights) {
                log::trace!("transition to {} complete", transition.target_index);
                self.transition = None;
            }
        }
    }

    /// Advance one frame, then write `time` and `animationValue1..8` into `sink`.
    /// Call once per rendered frame, after any selection for that frame.
    pub fn publish_frame<S: UniformSink + ?Sized>(&mut self, sink: &mut S) {
        self.tick();
        sink.set_uniform(UniformSlot::Time, self.elapsed);
        for (i, &w) in self.weights.iter().enumerate() {
            sink.set_uniform(UniformSlot::AnimationValue(i + 1), w);
        }
    }
}

impl Default for BlendController {
    fn default() -> Self {
        Self::new(BlendConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::uniforms::FrameUniforms;

    #[test]
    fn test_one_hot_bounds() {
        assert_eq!(one_hot(1), DEFAULT_WEIGHTS);
        assert_eq!(one_hot(0), [0.0; ANIMATION_COUNT]);
        assert_eq!(one_hot(9), [0.0; ANIMATION_COUNT]);
        assert_eq!(one_hot(-2), [0.0; ANIMATION_COUNT]);
        assert_eq!(one_hot(8)[7], 1.0);
    }

    #[test]
    fn test_frame_count_from_duration() {
        let t = Transition::new(2, DEFAULT_WEIGHTS, 1.0, 0.25, Easing::Linear);
        assert_eq!(t.frames_total(), 4);
        let t = Transition::new(2, DEFAULT_WEIGHTS, 0.0, 0.25, Easing::Linear);
        assert_eq!(t.frames_total(), 1, "zero duration still takes one frame");
    }

    #[test]
    fn test_linear_midpoint() {
        let mut c = BlendController::new(BlendConfig {
            duration: 1.0,
            frame_interval: 0.25,
            easing: Easing::Linear,
            time_step: 0.001,
        });
        let mut sink = FrameUniforms::default();
        c.select_animation(2);
        c.publish_frame(&mut sink);
        c.publish_frame(&mut sink);
        assert!((c.weights()[0] - 0.5).abs() < 1e-6);
        assert!((c.weights()[1] - 0.5).abs() < 1e-6);
        assert_eq!(sink.animation_values, *c.weights());
    }
}
