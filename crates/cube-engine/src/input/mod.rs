// input/mod.rs
//
// Raw pointer events from the host and the drag normalizer that turns them
// into start/move/end gestures.

pub mod drag;
pub mod queue;

pub use drag::{convert_position, DragEvent, DragOptions, DragPosition, Draggable, ElementBounds};
pub use queue::{InputEvent, InputQueue, MouseButton};
