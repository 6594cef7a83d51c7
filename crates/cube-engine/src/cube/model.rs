//! Cube data model.
//!
//! Node chain: `holder → animator → object → group`. Pieces hang off the
//! permanent `object`, or off `group` while their layer is isolated for a
//! rotation. Positions inside `object` are in cube units: the whole cube spans
//! one unit and each piece a third of it.

use glam::{Affine3A, IVec3, Mat3, Vec3};
use std::f32::consts::FRAC_PI_2;
use crate::api::types::{PieceId, TileId};
use crate::extensions::transform::{reparent, Transform};
use super::face::{Axis, Face};

/// Edge length of one piece.
pub const PIECE_SIZE: f32 = 1.0 / 3.0;

/// Scale of a face tile relative to the piece face it sits on.
pub const TILE_SCALE: f32 = 0.82;

/// Node a piece is currently attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    /// The permanent cube object.
    Cube,
    /// The temporary rotation group.
    Group,
}

/// One of the 27 sub-cubes.
#[derive(Debug, Clone)]
pub struct Piece {
    pub id: PieceId,
    /// Lattice coordinate at construction, in {-1, 0, 1}³.
    pub home: IVec3,
    /// Transform relative to `parent`.
    pub local: Transform,
    pub parent: Parent,
    /// Faces this piece shows in the solved state.
    pub faces: Vec<Face>,
    pub tiles: Vec<TileId>,
    rest: Transform,
}

impl Piece {
    /// Transform recorded at construction.
    pub fn rest(&self) -> &Transform {
        &self.rest
    }
}

/// A colored sticker on one piece.
#[derive(Debug, Clone)]
pub struct FaceTile {
    pub id: TileId,
    /// The face this tile belongs to when solved. Fixed for life.
    pub face: Face,
    pub piece: PieceId,
    /// Transform relative to the piece.
    pub local: Transform,
}

pub struct Cube {
    pub holder: Transform,
    pub animator: Transform,
    pub object: Transform,
    pub group: Transform,
    pieces: Vec<Piece>,
    tiles: Vec<FaceTile>,
}

impl Cube {
    pub fn new() -> Self {
        let mut pieces = Vec::with_capacity(27);
        let mut tiles = Vec::with_capacity(54);

        for x in 0..3 {
            for y in 0..3 {
                for z in 0..3 {
                    let id = PieceId(pieces.len() as u8);
                    let home = IVec3::new(x - 1, y - 1, z - 1);
                    let faces = touched_faces(home);
                    let rest = Transform::from_position(home.as_vec3() / 3.0);

                    let mut piece_tiles = Vec::with_capacity(faces.len());
                    for &face in &faces {
                        let tile = TileId(tiles.len() as u8);
                        tiles.push(FaceTile {
                            id: tile,
                            face,
                            piece: id,
                            local: tile_transform(face),
                        });
                        piece_tiles.push(tile);
                    }

                    pieces.push(Piece {
                        id,
                        home,
                        local: rest,
                        parent: Parent::Cube,
                        faces,
                        tiles: piece_tiles,
                        rest,
                    });
                }
            }
        }

        log::debug!("cube: {} pieces, {} tiles", pieces.len(), tiles.len());

        Self {
            holder: Transform::IDENTITY,
            animator: Transform::IDENTITY,
            object: Transform::IDENTITY,
            group: Transform::IDENTITY,
            pieces,
            tiles,
        }
    }

    /// Put every piece back at its rest transform on the permanent object and
    /// zero the rotation of every rig node. Positions of the rig nodes are
    /// presentation offsets and stay as they are.
    pub fn reset(&mut self) {
        self.holder.rotation = Mat3::IDENTITY;
        self.animator.rotation = Mat3::IDENTITY;
        self.object.rotation = Mat3::IDENTITY;
        self.group.rotation = Mat3::IDENTITY;

        for piece in &mut self.pieces {
            piece.local = piece.rest;
            piece.parent = Parent::Cube;
        }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.0 as usize)
    }

    pub fn tiles(&self) -> &[FaceTile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&FaceTile> {
        self.tiles.get(id.0 as usize)
    }

    // -- World frames --

    pub fn animator_world(&self) -> Affine3A {
        self.holder.matrix() * self.animator.matrix()
    }

    pub fn object_world(&self) -> Affine3A {
        self.animator_world() * self.object.matrix()
    }

    pub fn group_world(&self) -> Affine3A {
        self.object_world() * self.group.matrix()
    }

    /// Frame of `parent` relative to the permanent object.
    fn parent_frame(&self, parent: Parent) -> Affine3A {
        match parent {
            Parent::Cube => Affine3A::IDENTITY,
            Parent::Group => self.group.matrix(),
        }
    }

    /// A piece's transform relative to the permanent object.
    pub fn piece_in_object(&self, id: PieceId) -> Option<Affine3A> {
        let piece = self.piece(id)?;
        Some(self.parent_frame(piece.parent) * piece.local.matrix())
    }

    pub fn piece_world(&self, id: PieceId) -> Option<Affine3A> {
        Some(self.object_world() * self.piece_in_object(id)?)
    }

    /// A tile's transform relative to the permanent object.
    pub fn tile_in_object(&self, id: TileId) -> Option<Affine3A> {
        let tile = self.tile(id)?;
        Some(self.piece_in_object(tile.piece)? * tile.local.matrix())
    }

    pub fn tile_world(&self, id: TileId) -> Option<Affine3A> {
        Some(self.object_world() * self.tile_in_object(id)?)
    }

    /// Current lattice coordinate of a piece inside the permanent object.
    /// Rounding folds accumulated float error back onto the lattice.
    pub fn piece_position(&self, id: PieceId) -> Option<IVec3> {
        let frame = self.piece_in_object(id)?;
        Some((Vec3::from(frame.translation) * 3.0).round().as_ivec3())
    }

    /// Pieces whose current coordinate along `axis` equals `value`.
    pub fn layer(&self, axis: Axis, value: i32) -> Vec<PieceId> {
        self.pieces
            .iter()
            .filter(|piece| {
                self.piece_position(piece.id)
                    .is_some_and(|position| axis.of_lattice(position) == value)
            })
            .map(|piece| piece.id)
            .collect()
    }

    /// The layer through `piece` perpendicular to `axis`.
    pub fn layer_of(&self, piece: PieceId, axis: Axis) -> Vec<PieceId> {
        match self.piece_position(piece) {
            Some(position) => self.layer(axis, axis.of_lattice(position)),
            None => Vec::new(),
        }
    }

    /// Reset the group to identity and move `layer` into it.
    pub fn select_layer(&mut self, layer: &[PieceId]) {
        self.group.rotation = Mat3::IDENTITY;
        self.move_pieces(layer, Parent::Cube, Parent::Group);
    }

    /// Bake the group's rotation into `layer` and move it back to the object.
    pub fn deselect_layer(&mut self, layer: &[PieceId]) {
        self.move_pieces(layer, Parent::Group, Parent::Cube);
    }

    /// Reattach pieces without changing their world transforms.
    fn move_pieces(&mut self, layer: &[PieceId], from: Parent, to: Parent) {
        let from_frame = self.parent_frame(from);
        let to_frame = self.parent_frame(to);

        for id in layer {
            let Some(piece) = self.pieces.get_mut(id.0 as usize) else {
                continue;
            };
            if piece.parent != from {
                continue;
            }
            piece.local = reparent(&piece.local, from_frame, to_frame);
            piece.parent = to;
        }
    }

    pub fn pieces_in_group(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|piece| piece.parent == Parent::Group)
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::new()
    }
}

/// Faces a lattice position lies on, in creation order.
fn touched_faces(position: IVec3) -> Vec<Face> {
    Face::ALL
        .into_iter()
        .filter(|face| face.axis().of_lattice(position) == face.row())
        .collect()
}

/// Sticker placement flush against `face` of a piece.
fn tile_transform(face: Face) -> Transform {
    let distance = PIECE_SIZE / 2.0;
    let (pitch, yaw) = match face {
        Face::Left => (0.0, -1.0),
        Face::Right => (0.0, 1.0),
        Face::Down => (1.0, 0.0),
        Face::Up => (-1.0, 0.0),
        Face::Back => (0.0, 2.0),
        Face::Front => (0.0, 0.0),
    };
    let rotation = Mat3::from_euler(
        glam::EulerRot::XYZ,
        FRAC_PI_2 * pitch,
        FRAC_PI_2 * yaw,
        0.0,
    );
    Transform::from_position(face.normal() * distance)
        .with_rotation(rotation)
        .with_scale(Vec3::splat(TILE_SCALE))
}
