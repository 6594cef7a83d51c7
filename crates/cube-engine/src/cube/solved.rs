//! Solved-state check.
//!
//! Every tile is bucketed into the side of the cube it currently sits on; the
//! cube is solved when each side holds a single face identity.

use glam::Vec3;
use super::face::{Axis, Face};
use super::model::Cube;

/// Side of the cube a tile currently sits on.
fn side_of(position: Vec3) -> Face {
    let axis = Axis::dominant(position);
    Face::from_axis(axis, axis.of(position) > 0.0)
}

/// Whether every side shows one color.
pub fn is_solved(cube: &Cube) -> bool {
    let mut sides: [Option<Face>; 6] = [None; 6];

    for tile in cube.tiles() {
        let Some(frame) = cube.tile_in_object(tile.id) else {
            continue;
        };
        let side = side_of(Vec3::from(frame.translation)).index();
        match sides[side] {
            None => sides[side] = Some(tile.face),
            Some(face) if face != tile.face => return false,
            Some(_) => {}
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn turn(cube: &mut Cube, axis: Axis, value: i32, quarters: f32) {
        let layer = cube.layer(axis, value);
        cube.select_layer(&layer);
        cube.group.rotate_on_axis(axis.unit(), FRAC_PI_2 * quarters);
        cube.group.snap_rotation();
        cube.deselect_layer(&layer);
    }

    #[test]
    fn fresh_cube_is_solved() {
        assert!(is_solved(&Cube::new()));
    }

    #[test]
    fn face_turn_and_inverse() {
        let mut cube = Cube::new();
        turn(&mut cube, Axis::X, 1, -1.0);
        assert!(!is_solved(&cube));
        turn(&mut cube, Axis::X, 1, 1.0);
        assert!(is_solved(&cube));
    }

    #[test]
    fn whole_cube_turn_stays_solved() {
        let mut cube = Cube::new();
        for value in -1..=1 {
            turn(&mut cube, Axis::Y, value, 1.0);
        }
        assert!(is_solved(&cube));
    }

    #[test]
    fn half_turn_is_unsolved() {
        let mut cube = Cube::new();
        turn(&mut cube, Axis::Z, 1, 2.0);
        assert!(!is_solved(&cube));
    }
}
