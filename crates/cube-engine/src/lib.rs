pub mod api;
pub mod controls;
pub mod core;
pub mod cube;
pub mod extensions;
pub mod input;
pub mod renderer;
pub mod scramble;

// Re-export key types at crate root for convenience
pub use api::game::{CubeConfig, CubeContext, ScrambleError};
pub use api::session::CubeSession;
pub use api::types::{CubeEvent, PieceId, TileId};
pub use controls::{ControlState, FlipConfig, FlipKind, RotationControls};
pub use crate::core::scheduler::{Animatable, AnimationId, Playback, Scheduler};
pub use cube::{is_solved, Axis, Cube, Face, FaceTile, Piece};
pub use input::drag::{DragEvent, Draggable, ElementBounds};
pub use input::queue::{InputEvent, InputQueue, MouseButton};
pub use renderer::camera::{Camera, CameraUniform};
pub use renderer::instance::{PieceInstance, RenderBuffer, TileInstance};
pub use scramble::{Move, NotationError, Scramble, Scrambler};

// Extensions: animation and transform building blocks
pub use extensions::{
    Easing, lerp, ease,
    Transform, reparent,
    Tween, TweenFrame, Interpolation, Properties,
};
