// core/mod.rs
//
// Frame scheduling and deterministic randomness. Everything else in the
// engine is driven through these.

pub mod rng;
pub mod scheduler;

pub use rng::Rng;
pub use scheduler::{Animatable, AnimationId, Playback, Scheduler};
