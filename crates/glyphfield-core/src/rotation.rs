//! Periodic formation rotation.
//!
//! Every `interval` seconds the driver fires and picks a formation from a
//! pre-drawn id. Ids 2..=7 map to themselves; anything else (1, 8, or a value
//! outside the range) maps to formation 4. The first id is drawn from 2..=8,
//! every later id from 2..=7, and each new id is drawn right after a firing
//! for use at the next one.

use rand::Rng;

/// Formation used when the drawn id has no direct mapping.
pub const FALLBACK_ANIMATION: u32 = 4;

/// Default seconds between automatic changes.
pub const DEFAULT_INTERVAL: f32 = 15.0;

/// Map a drawn id to the formation that gets selected.
pub fn resolve_selection(id: i32) -> u32 {
    match id {
        2..=7 => id as u32,
        _ => FALLBACK_ANIMATION,
    }
}

fn initial_draw<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    (6.0 * rng.gen::<f32>() + 2.0).round() as i32
}

fn next_draw<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    (5.0 * rng.gen::<f32>() + 2.0).round() as i32
}

pub struct RotationDriver {
    interval: f32,
    since_fire: f32,
    next_id: i32,
}

impl RotationDriver {
    pub fn new<R: Rng + ?Sized>(interval: f32, rng: &mut R) -> Self {
        Self::with_id(interval, initial_draw(rng))
    }

    /// Start from a known pending id instead of a random draw.
    pub fn with_id(interval: f32, next_id: i32) -> Self {
        Self {
            interval,
            since_fire: 0.0,
            next_id,
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Id that the next firing will resolve.
    pub fn pending_id(&self) -> i32 {
        self.next_id
    }

    /// Resolve the pending id into a selection and draw the next one.
    pub fn fire<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u32 {
        let selection = resolve_selection(self.next_id);
        log::debug!("rotation fired: id {} -> animation {}", self.next_id, selection);
        self.next_id = next_draw(rng);
        selection
    }

    /// Advance the timer by `dt` seconds. Returns the selection of the last
    /// firing inside this step, if the interval elapsed at least once.
    pub fn tick<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> Option<u32> {
        if dt.is_nan() || dt <= 0.0 || self.interval.is_nan() || self.interval <= 0.0 {
            return None;
        }
        self.since_fire += dt;
        let mut selection = None;
        while self.since_fire >= self.interval {
            self.since_fire -= self.interval;
            selection = Some(self.fire(rng));
        }
        selection
    }
}
