use glam::{Vec2, Vec3};
use crate::cube::face::Axis;

/// Rotation control states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlState {
    /// Nothing happening.
    #[default]
    Still,
    /// Pointer down, axis not locked yet.
    Preparing,
    /// Axis locked, following the pointer.
    Rotating,
    /// A commit tween (or scramble) is running.
    Animating,
}

/// What a gesture turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipKind {
    /// One face layer.
    Layer,
    /// The whole cube.
    Cube,
}

/// Pointer position handed to the controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    /// Element pixels.
    pub pixel: Vec2,
    /// Normalized device coordinates.
    pub ndc: Vec2,
}

/// Context captured for one drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub kind: FlipKind,
    /// Normal of the grabbed face in the edges frame; +z for cube gestures.
    pub normal: Vec3,
    /// Last pointer position on the drag plane (plane-local).
    pub current: Vec2,
    /// Sum of every delta since the gesture started.
    pub total: Vec2,
    /// Most recent delta.
    pub delta: Vec2,
    /// Drag-plane axis locked once the drag is long enough.
    pub direction: Option<Axis>,
    /// Signed angle turned so far.
    pub flip_angle: f32,
}

impl Gesture {
    pub fn new(kind: FlipKind, normal: Vec3, anchor: Vec2) -> Self {
        Self {
            kind,
            normal,
            current: anchor,
            total: Vec2::ZERO,
            delta: Vec2::ZERO,
            direction: None,
            flip_angle: 0.0,
        }
    }

    /// Move the pointer to `point` (plane-local), returning the delta.
    pub fn drag_to(&mut self, point: Vec2) -> Vec2 {
        self.delta = point - self.current;
        self.total += self.delta;
        self.current = point;
        self.delta
    }

    /// Component of the latest delta along the locked axis.
    pub fn locked_delta(&self) -> f32 {
        self.direction.map_or(0.0, |axis| axis.of_planar(self.delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_accumulates() {
        let mut g = Gesture::new(FlipKind::Cube, Vec3::Z, Vec2::new(1.0, 1.0));
        g.drag_to(Vec2::new(1.5, 1.0));
        let delta = g.drag_to(Vec2::new(1.5, 0.8));
        assert!((delta - Vec2::new(0.0, -0.2)).length() < 1e-6);
        assert!((g.total - Vec2::new(0.5, -0.2)).length() < 1e-6);
        assert_eq!(g.locked_delta(), 0.0);

        g.direction = Some(Axis::Y);
        assert!((g.locked_delta() + 0.2).abs() < 1e-6);
    }
}
