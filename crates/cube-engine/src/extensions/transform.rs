// extensions/transform.rs
//
// Rigid 3D transforms and reparenting.
// A node's world matrix is its parent's world matrix times its local one; the
// cube rig composes these by hand instead of keeping a shared scene graph.
//
// Usage:
//   let mut group = Transform::IDENTITY;
//   group.rotate_on_axis(Vec3::Y, FRAC_PI_2);
//   let baked = reparent(&piece_local, group.matrix(), Affine3A::IDENTITY);

use std::f32::consts::FRAC_PI_2;
use glam::{Affine3A, IVec3, Mat3, Mat3A, Vec3, Vec3A};
use super::tween::Properties;

/// Position, rotation and scale of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Pure rotation (orthonormal).
    pub rotation: Mat3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Mat3::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    pub fn with_rotation(mut self, rotation: Mat3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Local-to-parent matrix.
    pub fn matrix(&self) -> Affine3A {
        Affine3A {
            matrix3: Mat3A::from(self.rotation * Mat3::from_diagonal(self.scale)),
            translation: Vec3A::from(self.position),
        }
    }

    /// Decompose an affine matrix (rotation times positive scale).
    pub fn from_matrix(matrix: Affine3A) -> Self {
        let basis = Mat3::from(matrix.matrix3);
        let scale = Vec3::new(
            basis.x_axis.length(),
            basis.y_axis.length(),
            basis.z_axis.length(),
        );
        let rotation = Mat3::from_cols(
            unit_or(basis.x_axis, scale.x, Vec3::X),
            unit_or(basis.y_axis, scale.y, Vec3::Y),
            unit_or(basis.z_axis, scale.z, Vec3::Z),
        );
        Self {
            position: Vec3::from(matrix.translation),
            rotation,
            scale,
        }
    }

    /// Rotate about an axis expressed in this node's own frame.
    pub fn rotate_on_axis(&mut self, axis: Vec3, angle: f32) {
        self.rotation *= Mat3::from_axis_angle(axis.normalize(), angle);
    }

    /// Rotate about an axis expressed in the parent's frame.
    pub fn rotate_on_world_axis(&mut self, axis: Vec3, angle: f32) {
        self.rotation = Mat3::from_axis_angle(axis.normalize(), angle) * self.rotation;
    }

    /// Rotation as XYZ Euler angles.
    pub fn euler(&self) -> Vec3 {
        euler_xyz(&self.rotation)
    }

    pub fn set_euler(&mut self, euler: Vec3) {
        self.rotation = Mat3::from_euler(glam::EulerRot::XYZ, euler.x, euler.y, euler.z);
    }

    /// Snap to the nearest quarter-turn rotation, so every entry is exactly
    /// -1, 0 or 1. Each basis vector rounds to its nearest signed axis; if
    /// that is not a rotation, each XYZ Euler angle rounds to a quarter turn
    /// instead.
    pub fn snap_rotation(&mut self) {
        if let Some(rotation) = lattice_rotation(&self.rotation) {
            self.rotation = rotation;
            return;
        }
        let euler = self.euler();
        let turns = IVec3::new(
            quarter_count(euler.x),
            quarter_count(euler.y),
            quarter_count(euler.z),
        );
        self.rotation = quarter_rotation(turns);
    }

    /// Euler quarter-turn counts, if the rotation is exactly quarter-aligned.
    pub fn quarter_turns(&self) -> Option<IVec3> {
        let exact = self
            .rotation
            .to_cols_array()
            .iter()
            .all(|v| *v == 0.0 || v.abs() == 1.0);
        if !exact {
            return None;
        }
        let euler = self.euler();
        Some(IVec3::new(
            quarter_count(euler.x),
            quarter_count(euler.y),
            quarter_count(euler.z),
        ))
    }
}

impl Properties for Transform {
    fn property(&self, key: &str) -> Option<f32> {
        match key {
            "x" => Some(self.position.x),
            "y" => Some(self.position.y),
            "z" => Some(self.position.z),
            "scale" => Some(self.scale.x),
            _ => None,
        }
    }

    fn set_property(&mut self, key: &str, value: f32) -> bool {
        match key {
            "x" => self.position.x = value,
            "y" => self.position.y = value,
            "z" => self.position.z = value,
            "scale" => self.scale = Vec3::splat(value),
            _ => return false,
        }
        true
    }
}

/// Re-express `local` (relative to the frame `from`) relative to the frame
/// `to`, leaving the world transform unchanged. Both frames must be given in
/// the same space.
pub fn reparent(local: &Transform, from: Affine3A, to: Affine3A) -> Transform {
    Transform::from_matrix(to.inverse() * from * local.matrix())
}

/// Rotation whose +z axis points along `forward`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Mat3 {
    let mut z = forward.normalize_or_zero();
    if z == Vec3::ZERO {
        z = Vec3::Z;
    }
    let mut x = up.cross(z);
    if x.length_squared() == 0.0 {
        // up and forward are parallel; nudge forward off the up axis
        if up.z.abs() == 1.0 {
            z.x += 0.0001;
        } else {
            z.z += 0.0001;
        }
        z = z.normalize();
        x = up.cross(z);
    }
    let x = x.normalize();
    let y = z.cross(x);
    Mat3::from_cols(x, y, z)
}

/// XYZ Euler decomposition of a pure rotation.
pub fn euler_xyz(m: &Mat3) -> Vec3 {
    let m11 = m.x_axis.x;
    let m12 = m.y_axis.x;
    let m13 = m.z_axis.x;
    let m22 = m.y_axis.y;
    let m23 = m.z_axis.y;
    let m32 = m.y_axis.z;
    let m33 = m.z_axis.z;

    let y = m13.clamp(-1.0, 1.0).asin();
    if m13.abs() < 0.999_999_9 {
        Vec3::new((-m23).atan2(m33), y, (-m12).atan2(m11))
    } else {
        Vec3::new(m32.atan2(m22), y, 0.0)
    }
}

/// Nearest signed quarter-turn count of an angle.
pub fn quarter_count(angle: f32) -> i32 {
    (angle / FRAC_PI_2).round() as i32
}

/// Exact rotation for XYZ Euler quarter-turn counts.
pub fn quarter_rotation(turns: IVec3) -> Mat3 {
    let (cx, sx) = quarter_cos_sin(turns.x);
    let (cy, sy) = quarter_cos_sin(turns.y);
    let (cz, sz) = quarter_cos_sin(turns.z);
    let rx = Mat3::from_cols(Vec3::X, Vec3::new(0.0, cx, sx), Vec3::new(0.0, -sx, cx));
    let ry = Mat3::from_cols(Vec3::new(cy, 0.0, -sy), Vec3::Y, Vec3::new(sy, 0.0, cy));
    let rz = Mat3::from_cols(Vec3::new(cz, sz, 0.0), Vec3::new(-sz, cz, 0.0), Vec3::Z);
    rx * ry * rz
}

/// Round each column to its nearest signed unit axis. None unless the result
/// is a proper rotation.
fn lattice_rotation(m: &Mat3) -> Option<Mat3> {
    let snap = |v: Vec3| {
        let abs = v.abs();
        let (positive, negative, value) = if abs.x >= abs.y && abs.x >= abs.z {
            (Vec3::X, Vec3::NEG_X, v.x)
        } else if abs.y >= abs.z {
            (Vec3::Y, Vec3::NEG_Y, v.y)
        } else {
            (Vec3::Z, Vec3::NEG_Z, v.z)
        };
        if value < 0.0 { negative } else { positive }
    };
    let rotation = Mat3::from_cols(snap(m.x_axis), snap(m.y_axis), snap(m.z_axis));
    (rotation.determinant() == 1.0).then_some(rotation)
}

fn quarter_cos_sin(turns: i32) -> (f32, f32) {
    match turns.rem_euclid(4) {
        0 => (1.0, 0.0),
        1 => (0.0, 1.0),
        2 => (-1.0, 0.0),
        _ => (0.0, -1.0),
    }
}

fn unit_or(axis: Vec3, length: f32, fallback: Vec3) -> Vec3 {
    if length > 0.0 {
        axis / length
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn matrix_round_trip() {
        let mut t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0)).with_scale(Vec3::splat(0.5));
        t.rotate_on_axis(Vec3::Y, 0.3);
        let back = Transform::from_matrix(t.matrix());
        assert!(close(back.position, t.position));
        assert!(close(back.scale, t.scale));
        assert!((back.rotation - t.rotation).abs_diff_eq(Mat3::ZERO, 1e-5));
    }

    #[test]
    fn local_and_world_axes_differ() {
        let mut local = Transform::IDENTITY;
        local.rotate_on_axis(Vec3::X, FRAC_PI_2);
        local.rotate_on_axis(Vec3::Y, FRAC_PI_2);

        let mut world = Transform::IDENTITY;
        world.rotate_on_axis(Vec3::X, FRAC_PI_2);
        world.rotate_on_world_axis(Vec3::Y, FRAC_PI_2);

        assert!(!close(local.rotation * Vec3::Z, world.rotation * Vec3::Z));
    }

    #[test]
    fn snap_is_exact() {
        let mut t = Transform::IDENTITY;
        for _ in 0..7 {
            t.rotate_on_axis(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2 + 0.01);
            t.rotate_on_world_axis(Vec3::X, FRAC_PI_2 - 0.02);
            t.snap_rotation();
            assert!(t.quarter_turns().is_some(), "{:?}", t.rotation);
        }
    }

    #[test]
    fn snap_survives_gimbal_lock() {
        let mut t = Transform::IDENTITY;
        t.rotate_on_axis(Vec3::Y, FRAC_PI_2 + 1e-4);
        t.rotate_on_axis(Vec3::Z, FRAC_PI_2);
        let expected = t.rotation * Vec3::X;
        t.snap_rotation();
        assert!(t.quarter_turns().is_some());
        assert!(close(t.rotation * Vec3::X, expected.round()));
    }

    #[test]
    fn quarter_turns_reads_euler() {
        let mut t = Transform::IDENTITY;
        t.rotation = quarter_rotation(IVec3::new(0, 0, -1));
        assert_eq!(t.quarter_turns(), Some(IVec3::new(0, 0, -1)));
        t.rotation = quarter_rotation(IVec3::new(1, 1, 0));
        assert_eq!(t.quarter_turns(), Some(IVec3::new(1, 1, 0)));

        t.rotate_on_axis(Vec3::Y, FRAC_PI_4);
        assert_eq!(t.quarter_turns(), None);
    }

    #[test]
    fn reparent_preserves_world() {
        let mut frame = Transform::IDENTITY;
        frame.rotate_on_axis(Vec3::new(1.0, 1.0, 0.0), 0.7);
        let piece = Transform::from_position(Vec3::new(1.0 / 3.0, 0.0, -1.0 / 3.0));

        let local = reparent(&piece, Affine3A::IDENTITY, frame.matrix());
        let world = frame.matrix() * local.matrix();
        assert!(close(Vec3::from(world.translation), piece.position));

        let back = reparent(&local, frame.matrix(), Affine3A::IDENTITY);
        assert!(close(back.position, piece.position));
    }

    #[test]
    fn look_rotation_points_z() {
        let rotation = look_rotation(Vec3::Z, Vec3::Y);
        assert!(close(rotation.x_axis, Vec3::X));
        assert!(close(rotation.y_axis, Vec3::Y));

        // Degenerate: forward parallel to up still yields a valid basis.
        let rotation = look_rotation(Vec3::Y, Vec3::Y);
        assert!(rotation.z_axis.dot(Vec3::Y) > 0.9999);
        assert!((rotation.determinant() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn properties_address_position() {
        let mut t = Transform::IDENTITY;
        assert!(t.set_property("y", -0.2));
        assert_eq!(t.property("y"), Some(-0.2));
        assert!(!t.set_property("w", 1.0));
    }
}
