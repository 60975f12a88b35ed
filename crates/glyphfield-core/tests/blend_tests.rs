use std::collections::HashMap;

use glyphfield_core::blend::{BlendController, DEFAULT_WEIGHTS};
use glyphfield_core::config::BlendConfig;
use glyphfield_core::easing::Easing;
use glyphfield_core::uniforms::{FrameUniforms, UniformSink, UniformSlot};

fn controller(duration: f32, easing: Easing) -> BlendController {
    BlendController::new(BlendConfig {
        duration,
        easing,
        ..BlendConfig::default()
    })
}

fn frames_for(c: &BlendController) -> usize {
    (c.config().duration / c.config().frame_interval).ceil() as usize + 1
}

fn one_hot(k: usize) -> [f32; 8] {
    let mut w = [0.0; 8];
    w[k - 1] = 1.0;
    w
}

#[test]
fn test_default_weights() {
    let c = BlendController::default();
    assert_eq!(*c.weights(), DEFAULT_WEIGHTS);
    assert_eq!(c.elapsed(), 0.0);
    assert!(!c.is_transitioning());
}

#[test]
fn test_select_three_scenario() {
    let mut c = controller(2.0, Easing::Linear);
    let mut sink = FrameUniforms::default();

    c.select_animation(3);
    assert_eq!(*c.weights(), DEFAULT_WEIGHTS, "no frames yet, weights unchanged");

    for _ in 0..frames_for(&c) {
        c.publish_frame(&mut sink);
    }
    assert_eq!(*c.weights(), [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    assert_eq!(sink.animation_values, *c.weights());
    assert!(!c.is_transitioning());
}

#[test]
fn test_end_state_independent_of_start() {
    for start in 1..=8 {
        for target in 1..=8 {
            let mut c = controller(1.0, Easing::ExpoOut);
            let mut sink = FrameUniforms::default();
            c.set_weight(start, 0.7);
            c.set_weight(8, 0.3);
            c.select_animation(target);
            for _ in 0..frames_for(&c) {
                c.publish_frame(&mut sink);
            }
            assert_eq!(*c.weights(), one_hot(target as usize), "start {start} target {target}");
        }
    }
}

#[test]
fn test_first_frame_observes_interpolation_step() {
    let mut c = controller(1.0, Easing::Linear);
    let mut sink = FrameUniforms::default();
    c.select_animation(5);
    c.publish_frame(&mut sink);
    let w = c.weights();
    assert!(w[0] < 1.0 && w[0] > 0.9, "w1 should have just started fading: {}", w[0]);
    assert!(w[4] > 0.0 && w[4] < 0.1, "w5 should have just started rising: {}", w[4]);
}

#[test]
fn test_reselect_cancels_previous() {
    let mut c = controller(2.0, Easing::Linear);
    let mut sink = FrameUniforms::default();
    c.select_animation(2);
    for _ in 0..30 {
        c.publish_frame(&mut sink);
    }
    c.select_animation(6);
    let mut settled_on_two = false;
    for _ in 0..frames_for(&c) {
        c.publish_frame(&mut sink);
        if *c.weights() == one_hot(2) {
            settled_on_two = true;
        }
    }
    assert!(!settled_on_two, "cancelled target must never be reached");
    assert_eq!(*c.weights(), one_hot(6));
}

#[test]
fn test_reselect_starts_from_current_weights() {
    let mut c = controller(1.0, Easing::Linear);
    let mut sink = FrameUniforms::default();
    c.select_animation(2);
    for _ in 0..30 {
        c.publish_frame(&mut sink);
    }
    let mid = *c.weights();
    c.select_animation(2);
    assert_eq!(*c.weights(), mid, "restart does not snap weights");
    c.publish_frame(&mut sink);
    assert!(c.weights()[1] >= mid[1]);
}

#[test]
fn test_out_of_range_fades_everything() {
    for k in [0, 9, -1, 42] {
        let mut c = controller(1.0, Easing::Linear);
        let mut sink = FrameUniforms::default();
        c.select_animation(k);
        for _ in 0..frames_for(&c) {
            c.publish_frame(&mut sink);
        }
        assert_eq!(*c.weights(), [0.0; 8], "index {k}");
    }
}

#[test]
fn test_time_monotonic() {
    let mut c = BlendController::default();
    let mut sink = FrameUniforms::default();
    let mut last = sink.time;
    for i in 0..500 {
        if i % 37 == 0 {
            c.select_animation(i % 9);
        }
        c.publish_frame(&mut sink);
        assert!(sink.time >= last, "time went backwards at frame {i}");
        last = sink.time;
    }
    assert!((c.elapsed() - 0.5).abs() < 1e-3);
}

#[test]
fn test_publish_writes_named_slots() {
    let mut c = BlendController::default();
    let mut sink: HashMap<String, f32> = HashMap::new();
    c.publish_frame(&mut sink);
    assert_eq!(sink.len(), 9);
    assert_eq!(sink["animationValue1"], 1.0);
    assert_eq!(sink["animationValue8"], 0.0);
    assert!((sink["time"] - 0.001).abs() < 1e-7);
}

#[test]
fn test_weights_stay_in_unit_range() {
    for easing in [Easing::Linear, Easing::ExpoOut, Easing::ExpoInOut] {
        let mut c = controller(1.0, easing);
        let mut sink = FrameUniforms::default();
        for k in [4, 7, 1, 3] {
            c.select_animation(k);
            for _ in 0..25 {
                c.publish_frame(&mut sink);
                assert!(c.weights().iter().all(|w| (0.0..=1.0).contains(w)), "{easing:?}");
            }
        }
    }
}

#[test]
fn test_set_weight_cancels_and_clamps() {
    let mut c = controller(1.0, Easing::Linear);
    let mut sink = FrameUniforms::default();
    c.select_animation(4);
    c.publish_frame(&mut sink);
    c.set_weight(4, 3.0);
    assert!(!c.is_transitioning());
    assert_eq!(c.weight(4), Some(1.0));
    c.set_weight(2, -1.0);
    assert_eq!(c.weight(2), Some(0.0));
    c.set_weight(12, 0.5);
    assert_eq!(c.weight(12), None);

    let before = *c.weights();
    c.publish_frame(&mut sink);
    assert_eq!(*c.weights(), before, "manual weights hold without a transition");
}

struct Recorder(Vec<(UniformSlot, f32)>);

impl UniformSink for Recorder {
    fn set_uniform(&mut self, slot: UniformSlot, value: f32) {
        self.0.push((slot, value));
    }
}

#[test]
fn test_publish_order_time_first() {
    let mut c = BlendController::default();
    let mut rec = Recorder(Vec::new());
    c.publish_frame(&mut rec);
    assert_eq!(rec.0[0].0, UniformSlot::Time);
    for k in 1..=8 {
        assert_eq!(rec.0[k].0, UniformSlot::AnimationValue(k));
    }
}
