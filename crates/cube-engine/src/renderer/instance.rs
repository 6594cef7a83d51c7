use bytemuck::{Pod, Zeroable};
use glam::{Affine3A, Mat4};
use crate::cube::Cube;

/// Per-piece render data for the host renderer.
/// Must match the TypeScript protocol: 16 floats = 64 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct PieceInstance {
    /// World matrix, column-major.
    pub model: [[f32; 4]; 4],
}

impl PieceInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(world: Affine3A) -> Self {
        Self { model: Mat4::from(world).to_cols_array_2d() }
    }
}

/// Per-tile render data: 20 floats = 80 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct TileInstance {
    /// World matrix, column-major.
    pub model: [[f32; 4]; 4],
    /// Face index (L R D U B F) used for the color lookup.
    pub face: f32,
    pub _pad: [f32; 3],
}

impl TileInstance {
    pub const FLOATS: usize = 20;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// World transforms of every piece and tile, rebuilt once per frame.
pub struct RenderBuffer {
    pub pieces: Vec<PieceInstance>,
    pub tiles: Vec<TileInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            pieces: Vec::with_capacity(27),
            tiles: Vec::with_capacity(54),
        }
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
        self.tiles.clear();
    }

    /// Refill both buffers from the current cube pose.
    pub fn rebuild(&mut self, cube: &Cube) {
        self.clear();

        for piece in cube.pieces() {
            if let Some(world) = cube.piece_world(piece.id) {
                self.pieces.push(PieceInstance::new(world));
            }
        }

        for tile in cube.tiles() {
            if let Some(world) = cube.tile_world(tile.id) {
                self.tiles.push(TileInstance {
                    model: Mat4::from(world).to_cols_array_2d(),
                    face: tile.face.index() as f32,
                    _pad: [0.0; 3],
                });
            }
        }
    }

    pub fn piece_count(&self) -> u32 {
        self.pieces.len() as u32
    }

    pub fn tile_count(&self) -> u32 {
        self.tiles.len() as u32
    }

    /// Raw pointer to piece data for SharedArrayBuffer reads.
    pub fn pieces_ptr(&self) -> *const f32 {
        self.pieces.as_ptr() as *const f32
    }

    /// Raw pointer to tile data for SharedArrayBuffer reads.
    pub fn tiles_ptr(&self) -> *const f32 {
        self.tiles.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_strides() {
        assert_eq!(std::mem::size_of::<PieceInstance>(), PieceInstance::STRIDE_BYTES);
        assert_eq!(std::mem::size_of::<TileInstance>(), TileInstance::STRIDE_BYTES);
    }

    #[test]
    fn rebuild_fills_every_piece_and_tile() {
        let cube = Cube::new();
        let mut buf = RenderBuffer::new();
        buf.rebuild(&cube);
        assert_eq!(buf.piece_count(), 27);
        assert_eq!(buf.tile_count(), 54);

        // Rebuild replaces rather than appends.
        buf.rebuild(&cube);
        assert_eq!(buf.piece_count(), 27);

        let first = cube.piece_world(cube.pieces()[0].id).unwrap();
        assert_eq!(buf.pieces[0].model[3][0], first.translation.x);
    }
}
