//! Cube faces and lattice axes.

use glam::{IVec3, Vec2, Vec3};

/// One of the three lattice axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Positive unit vector along this axis.
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    pub fn of(self, v: Vec3) -> f32 {
        v[self.index()]
    }

    pub fn of_lattice(self, v: IVec3) -> i32 {
        v[self.index()]
    }

    /// Component of a screen-plane vector; `Z` reads as 0.
    pub fn of_planar(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => 0.0,
        }
    }

    /// Axis of the largest absolute component. Ties go to the later axis.
    pub fn dominant(v: Vec3) -> Axis {
        Axis::ALL
            .into_iter()
            .reduce(|a, b| if a.of(v).abs() > b.of(v).abs() { a } else { b })
            .unwrap_or(Axis::X)
    }
}

/// The six outer faces, in tile-creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Left,
    Right,
    Down,
    Up,
    Back,
    Front,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Left,
        Face::Right,
        Face::Down,
        Face::Up,
        Face::Back,
        Face::Front,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Notation letter.
    pub fn letter(self) -> char {
        match self {
            Face::Left => 'L',
            Face::Right => 'R',
            Face::Down => 'D',
            Face::Up => 'U',
            Face::Back => 'B',
            Face::Front => 'F',
        }
    }

    pub fn from_letter(letter: char) -> Option<Face> {
        Face::ALL.into_iter().find(|face| face.letter() == letter)
    }

    pub fn axis(self) -> Axis {
        match self {
            Face::Left | Face::Right => Axis::X,
            Face::Down | Face::Up => Axis::Y,
            Face::Back | Face::Front => Axis::Z,
        }
    }

    /// Lattice row of the face's layer: -1 or 1.
    pub fn row(self) -> i32 {
        match self {
            Face::Left | Face::Down | Face::Back => -1,
            Face::Right | Face::Up | Face::Front => 1,
        }
    }

    /// Outward normal.
    pub fn normal(self) -> Vec3 {
        self.axis().unit() * self.row() as f32
    }

    pub fn from_axis(axis: Axis, positive: bool) -> Face {
        match (axis, positive) {
            (Axis::X, false) => Face::Left,
            (Axis::X, true) => Face::Right,
            (Axis::Y, false) => Face::Down,
            (Axis::Y, true) => Face::Up,
            (Axis::Z, false) => Face::Back,
            (Axis::Z, true) => Face::Front,
        }
    }
}
