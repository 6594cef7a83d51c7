//! Scramble compiler.
//!
//! Turns notation, or a random sequence, into a queue of layer rotations:
//! an axis, a lattice position selecting the layer, and a signed angle.

use std::f32::consts::FRAC_PI_2;
use glam::IVec3;
use crate::core::rng::Rng;
use crate::cube::face::{Axis, Face};
use super::notation::{parse_sequence, Modifier, Move, NotationError};

pub const DEFAULT_SCRAMBLE_LENGTH: usize = 20;

/// Order faces are drawn in for random scrambles.
const RANDOM_FACES: [Face; 6] = [
    Face::Up,
    Face::Down,
    Face::Left,
    Face::Right,
    Face::Front,
    Face::Back,
];

/// What to scramble with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scramble<'a> {
    /// Random moves, using the scrambler's configured length.
    Random,
    /// Random moves of the given length.
    Length(usize),
    /// Explicit notation.
    Notation(&'a str),
}

/// One queued quarter turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompiledMove {
    /// The notated move this came from.
    pub notation: Move,
    pub axis: Axis,
    /// Lattice point on the layer: `row` along `axis`, 0 elsewhere.
    pub position: IVec3,
    /// Signed rotation about the positive `axis`.
    pub angle: f32,
}

impl CompiledMove {
    /// Lattice row of the layer (-1 or 1).
    pub fn row(&self) -> i32 {
        self.axis.of_lattice(self.position)
    }
}

/// Compile moves into quarter turns. Half turns queue the same quarter twice.
pub fn compile(moves: &[Move]) -> Vec<CompiledMove> {
    let mut compiled = Vec::with_capacity(moves.len() * 2);
    for &notation in moves {
        let axis = notation.face.axis();
        let row = notation.face.row();
        let mut position = IVec3::ZERO;
        position[axis.index()] = row;
        let direction = if notation.modifier == Modifier::Prime { -1.0 } else { 1.0 };
        let step = CompiledMove {
            notation,
            axis,
            position,
            angle: FRAC_PI_2 * -(row as f32) * direction,
        };
        compiled.push(step);
        if notation.modifier == Modifier::Double {
            compiled.push(step);
        }
    }
    compiled
}

/// Holds the last scramble and the RNG that generates random ones.
#[derive(Debug, Clone)]
pub struct Scrambler {
    pub scramble_length: usize,
    rng: Rng,
    moves: Vec<Move>,
    compiled: Vec<CompiledMove>,
    print: String,
}

impl Scrambler {
    pub fn new(seed: u64, scramble_length: usize) -> Self {
        Self {
            scramble_length,
            rng: Rng::new(seed),
            moves: Vec::new(),
            compiled: Vec::new(),
            print: String::new(),
        }
    }

    /// Random moves where no face repeats either of the two moves before it.
    pub fn generate(&mut self, length: usize) -> Vec<Move> {
        let mut moves: Vec<Move> = Vec::with_capacity(length);
        while moves.len() < length {
            let face = RANDOM_FACES[self.rng.below(RANDOM_FACES.len())];
            let modifier = Modifier::ALL[self.rng.below(Modifier::ALL.len())];
            if moves.iter().rev().take(2).any(|previous| previous.face == face) {
                continue;
            }
            moves.push(Move::new(face, modifier));
        }
        moves
    }

    /// Build a new scramble and compile it into the replay queue.
    pub fn scramble(&mut self, request: Scramble<'_>) -> Result<&[CompiledMove], NotationError> {
        let moves = match request {
            Scramble::Random => self.generate(self.scramble_length),
            Scramble::Length(length) => self.generate(length),
            Scramble::Notation(notation) => parse_sequence(notation)?,
        };

        self.compiled = compile(&moves);
        self.print = moves
            .iter()
            .map(Move::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        self.moves = moves;

        log::debug!("scrambler: {} ({} quarter turns)", self.print, self.compiled.len());
        Ok(&self.compiled)
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn compiled(&self) -> &[CompiledMove] {
        &self.compiled
    }

    /// Printable notation of the last scramble.
    pub fn print(&self) -> &str {
        &self.print
    }
}

impl Default for Scrambler {
    fn default() -> Self {
        Self::new(1, DEFAULT_SCRAMBLE_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_axis_row_and_angle() {
        let steps = compile(&parse_sequence("R U' B2").unwrap());
        assert_eq!(steps.len(), 4);

        assert_eq!(steps[0].axis, Axis::X);
        assert_eq!(steps[0].position, IVec3::new(1, 0, 0));
        assert_eq!(steps[0].angle, -FRAC_PI_2);

        assert_eq!(steps[1].axis, Axis::Y);
        assert_eq!(steps[1].row(), 1);
        assert_eq!(steps[1].angle, FRAC_PI_2);

        assert_eq!(steps[2], steps[3]);
        assert_eq!(steps[2].position, IVec3::new(0, 0, -1));
        assert_eq!(steps[2].angle, FRAC_PI_2);
    }

    #[test]
    fn random_never_repeats_recent_faces() {
        let mut scrambler = Scrambler::new(12345, 20);
        for _ in 0..50 {
            scrambler.scramble(Scramble::Random).unwrap();
            let moves = scrambler.moves();
            assert_eq!(moves.len(), 20);
            for i in 1..moves.len() {
                assert_ne!(moves[i].face, moves[i - 1].face);
                if i > 1 {
                    assert_ne!(moves[i].face, moves[i - 2].face);
                }
            }
        }
    }

    #[test]
    fn print_matches_moves() {
        let mut scrambler = Scrambler::default();
        scrambler.scramble(Scramble::Notation("F2  L'")).unwrap();
        assert_eq!(scrambler.print(), "F2 L'");
        assert_eq!(scrambler.compiled().len(), 3);

        scrambler.scramble(Scramble::Length(5)).unwrap();
        assert_eq!(scrambler.print().split(' ').count(), 5);
    }

    #[test]
    fn same_seed_same_scramble() {
        let mut a = Scrambler::new(7, 20);
        let mut b = Scrambler::new(7, 20);
        a.scramble(Scramble::Random).unwrap();
        b.scramble(Scramble::Random).unwrap();
        assert_eq!(a.print(), b.print());
    }

    #[test]
    fn bad_notation_keeps_previous_scramble() {
        let mut scrambler = Scrambler::default();
        scrambler.scramble(Scramble::Notation("R U")).unwrap();
        assert!(scrambler.scramble(Scramble::Notation("R Q")).is_err());
        assert_eq!(scrambler.print(), "R U");
    }
}
