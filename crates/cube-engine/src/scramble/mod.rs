// scramble/mod.rs
//
// Move notation and the scramble compiler that turns it into layer rotations.

pub mod notation;
pub mod scrambler;

pub use notation::{parse_sequence, Modifier, Move, NotationError};
pub use scrambler::{compile, CompiledMove, Scramble, Scrambler, DEFAULT_SCRAMBLE_LENGTH};
