// cube/mod.rs
//
// The 27-piece lattice, its face tiles, the rig of nested transforms holding
// them, and the solved-state check.

pub mod face;
pub mod model;
pub mod solved;

pub use face::{Axis, Face};
pub use model::{Cube, FaceTile, Parent, Piece, PIECE_SIZE, TILE_SCALE};
pub use solved::is_solved;
