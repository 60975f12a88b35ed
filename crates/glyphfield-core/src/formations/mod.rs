//! CPU port of the formation vertex program.
//!
//! Eight formations (billboard cloud, ring cylinder, sphere, vibrating shards,
//! tangential sphere, nested cubes, spiral, cube burst) each transform a vertex
//! in turn, gated by their blend progress, followed by the color stage.

pub mod animations;
pub mod evaluator;
