// extensions/mod.rs
//
// Animation and spatial building blocks: easing curves, tweens driven by the
// scheduler, and rigid 3D transforms with explicit reparenting.

pub mod easing;
pub mod transform;
pub mod tween;

pub use easing::{Easing, lerp, ease};
pub use transform::{Transform, reparent, look_rotation, quarter_rotation};
pub use tween::{Tween, TweenFrame, Interpolation, Properties};
