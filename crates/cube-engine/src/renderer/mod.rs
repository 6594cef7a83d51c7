pub mod camera;
pub mod instance;
pub mod raycast;

pub use camera::{Camera, CameraUniform, DEFAULT_FOV, STAGE};
pub use instance::{PieceInstance, RenderBuffer, TileInstance};
pub use raycast::{intersect_box, intersect_plane, nearest_box, Hit, Ray};
