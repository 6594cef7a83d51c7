//! Rotation controls.
//!
//! A state machine turning drag gestures into rotations. A drag that starts
//! on the cube turns the layer under the pointer; a drag that starts beside
//! it turns the whole cube. Releasing commits to a quarter turn through a
//! tween, and scrambles replay compiled moves through the same path.

pub mod flip;
pub mod momentum;
pub mod state;

pub use flip::{commit_angle, round_angle, FlipConfig, FlipConfigError};
pub use momentum::Momentum;
pub use state::{ControlState, FlipKind, Gesture, Pointer};

use std::collections::VecDeque;
use std::f32::consts::FRAC_PI_4;
use glam::{Affine3A, Mat3, Vec2, Vec3};
use crate::api::game::CubeContext;
use crate::api::types::PieceId;
use crate::core::scheduler::AnimationId;
use crate::cube::face::Axis;
use crate::cube::model::{Cube, PIECE_SIZE};
use crate::extensions::transform::{look_rotation, Transform};
use crate::extensions::tween::Tween;
use crate::renderer::camera::Camera;
use crate::renderer::raycast::{intersect_box, intersect_plane, nearest_box, Ray};
use crate::scramble::scrambler::CompiledMove;
use self::flip::{cube_tween, layer_tween};

/// Edge length of the invisible box used to pick the grabbed face.
pub const EDGES_SIZE: f32 = 0.95;

/// Edge length of the drag plane.
pub const HELPER_SIZE: f32 = 20.0;

/// Drag length (plane units) before the rotation axis locks.
pub const AXIS_LOCK_DISTANCE: f32 = 0.05;

pub struct RotationControls {
    pub state: ControlState,
    pub flip_config: FlipConfig,
    /// Invisible box standing in for the cube. Whole-cube rotations turn it
    /// and the cube object copies its orientation.
    pub edges: Transform,
    /// Drag plane, in world space.
    pub helper: Transform,
    /// Axis of the rotation in progress; object frame for layers, world
    /// frame for the whole cube.
    pub flip_axis: Vec3,
    flip_layer: Option<Vec<PieceId>>,
    gesture: Option<Gesture>,
    /// A new gesture started while a commit was animating.
    pending: bool,
    momentum: Momentum,
    scramble: Option<VecDeque<CompiledMove>>,
    rotation_tween: Option<AnimationId>,
}

impl RotationControls {
    pub fn new(flip_config: FlipConfig) -> Self {
        Self {
            state: ControlState::Still,
            flip_config,
            edges: Transform::IDENTITY,
            helper: default_helper(),
            flip_axis: Vec3::ZERO,
            flip_layer: None,
            gesture: None,
            pending: false,
            momentum: Momentum::new(),
            scramble: None,
            rotation_tween: None,
        }
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    /// Pieces currently held by the rotation group.
    pub fn flip_layer(&self) -> Option<&[PieceId]> {
        self.flip_layer.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_scrambling(&self) -> bool {
        self.scramble.is_some()
    }

    /// Quarter turns left in the running scramble, including the current one.
    pub fn scramble_remaining(&self) -> usize {
        self.scramble.as_ref().map_or(0, VecDeque::len)
    }

    pub fn rotation_tween(&self) -> Option<AnimationId> {
        self.rotation_tween
    }

    pub fn set_rotation_tween(&mut self, id: AnimationId) {
        self.rotation_tween = Some(id);
    }

    /// World frame of the edges box: it follows the cube's position but keeps
    /// its own orientation.
    pub fn edges_world(&self, cube: &Cube) -> Affine3A {
        cube.animator_world()
            * Affine3A::from_translation(cube.object.position)
            * Affine3A::from_mat3(self.edges.rotation)
    }

    // -- Gestures --

    pub fn drag_start(&mut self, cube: &Cube, camera: &Camera, pointer: Pointer) {
        if self.scramble.is_some() {
            return;
        }
        if matches!(self.state, ControlState::Preparing | ControlState::Rotating) {
            return;
        }

        let ray = camera.ray(pointer.ndc);
        let edges_world = self.edges_world(cube);

        let (kind, normal, helper) = match intersect_box(&ray, edges_world, EDGES_SIZE / 2.0) {
            Some(hit) => {
                let normal = hit.normal.round();
                let world_normal = edges_world.transform_vector3(normal).normalize();
                let center = Vec3::from(edges_world.translation);
                let helper = Transform::from_position(center + world_normal * 0.5)
                    .with_rotation(look_rotation(world_normal, Vec3::Y));
                (FlipKind::Layer, normal, helper)
            }
            None => (FlipKind::Cube, Vec3::Z, default_helper()),
        };

        let Some(anchor) = plane_point(&ray, &helper) else {
            log::debug!("controls: drag start missed everything");
            return;
        };

        self.pending = self.state == ControlState::Animating;
        if self.state == ControlState::Still {
            self.state = ControlState::Preparing;
        }
        self.helper = helper;
        self.gesture = Some(Gesture::new(kind, normal, anchor));

        log::debug!(
            "controls: {:?} gesture started{}",
            kind,
            if self.pending { " (queued)" } else { "" }
        );
    }

    pub fn drag_move(
        &mut self,
        cube: &mut Cube,
        camera: &Camera,
        pointer: Pointer,
        now: f64,
    ) {
        if self.scramble.is_some() {
            return;
        }
        if self.state == ControlState::Still
            || (self.state == ControlState::Animating && !self.pending)
        {
            return;
        }
        let Some(mut gesture) = self.gesture else {
            return;
        };

        let ray = camera.ray(pointer.ndc);
        let Some(point) = plane_point(&ray, &self.helper) else {
            return;
        };

        let delta = gesture.drag_to(point);
        self.momentum.add(delta, now);

        match self.state {
            ControlState::Preparing if gesture.total.length() > AXIS_LOCK_DISTANCE => {
                let direction = Axis::dominant(gesture.total.extend(0.0));
                gesture.direction = Some(direction);

                if !self.lock_axis(&gesture, direction, cube, camera, &ray, pointer) {
                    self.gesture = None;
                    self.state = ControlState::Still;
                    return;
                }

                gesture.flip_angle = 0.0;
                self.state = ControlState::Rotating;
            }
            ControlState::Rotating => {
                let angle = gesture.locked_delta();
                match gesture.kind {
                    FlipKind::Layer => cube.group.rotate_on_axis(self.flip_axis, angle),
                    FlipKind::Cube => {
                        self.edges.rotate_on_world_axis(self.flip_axis, angle);
                        cube.object.rotation = self.edges.rotation;
                    }
                }
                gesture.flip_angle += angle;
            }
            _ => {}
        }

        self.gesture = Some(gesture);
    }

    /// Release the pointer. Returns the commit tween when a rotation was in
    /// progress; the caller registers it and hands back its id.
    pub fn drag_end(&mut self, now: f64) -> Option<Tween<CubeContext>> {
        if self.scramble.is_some() {
            return None;
        }

        if self.state != ControlState::Rotating {
            if self.state == ControlState::Animating {
                self.pending = false;
            } else {
                self.state = ControlState::Still;
                self.gesture = None;
            }
            return None;
        }

        let Some(gesture) = self.gesture else {
            self.state = ControlState::Still;
            return None;
        };

        self.state = ControlState::Animating;

        let momentum = self.momentum.get(now);
        let momentum = gesture.direction.map_or(0.0, |axis| axis.of_planar(momentum));
        let angle = commit_angle(gesture.flip_angle, momentum);
        let rotation = angle - gesture.flip_angle;

        log::debug!(
            "controls: {:?} released at {:.3} rad, momentum {:.3}, committing to {:.3}",
            gesture.kind,
            gesture.flip_angle,
            momentum,
            angle
        );

        Some(match gesture.kind {
            FlipKind::Layer => layer_tween(self.flip_axis, rotation, false, self.flip_config),
            FlipKind::Cube => cube_tween(self.flip_axis, rotation, self.flip_config),
        })
    }

    /// Decide the rotation axis for a drag locked along `direction`.
    /// Layer gestures also pick and isolate the grabbed layer. Returns false
    /// when the gesture has to be dropped.
    fn lock_axis(
        &mut self,
        gesture: &Gesture,
        direction: Axis,
        cube: &mut Cube,
        camera: &Camera,
        ray: &Ray,
        pointer: Pointer,
    ) -> bool {
        match gesture.kind {
            FlipKind::Layer => {
                let world_direction = self.helper.rotation * direction.unit();
                let object_direction = self
                    .edges_world(cube)
                    .inverse()
                    .transform_vector3(world_direction)
                    .round();
                let axis = -object_direction.cross(gesture.normal);

                if !is_lattice_axis(axis) {
                    log::debug!("controls: degenerate layer axis {:?}, gesture dropped", axis);
                    return false;
                }

                let targets = cube
                    .pieces()
                    .iter()
                    .filter_map(|piece| Some((piece.id, cube.piece_world(piece.id)?)));
                let Some((piece, _)) = nearest_box(ray, targets, PIECE_SIZE / 2.0) else {
                    log::debug!("controls: no piece under the pointer, gesture dropped");
                    return false;
                };

                let layer = cube.layer_of(piece, Axis::dominant(axis));
                cube.select_layer(&layer);
                log::debug!(
                    "controls: layer of {} pieces through {:?} about {:?}",
                    layer.len(),
                    piece,
                    axis
                );

                self.flip_axis = axis;
                self.flip_layer = Some(layer);
            }
            FlipKind::Cube => {
                let axis = match direction {
                    Axis::X => Axis::Y,
                    Axis::Y if pointer.pixel.x > camera.viewport.x / 2.0 => Axis::Z,
                    _ => Axis::X,
                };
                let sign = if axis == Axis::X { -1.0 } else { 1.0 };
                self.flip_axis = axis.unit() * sign;
                log::debug!("controls: cube rotation about {:?}", self.flip_axis);
            }
        }
        true
    }

    // -- Scramble --

    /// Start replaying compiled moves. Returns the first step's tween, or
    /// None when there is nothing to replay.
    pub fn begin_scramble(
        &mut self,
        moves: Vec<CompiledMove>,
        cube: &mut Cube,
    ) -> Option<Tween<CubeContext>> {
        if moves.is_empty() {
            return None;
        }
        log::info!("controls: scrambling {} quarter turns", moves.len());
        self.scramble = Some(moves.into());
        self.gesture = None;
        self.pending = false;
        self.state = ControlState::Animating;
        self.scramble_step(cube)
    }

    /// Isolate the layer of the next queued move and build its tween.
    fn scramble_step(&mut self, cube: &mut Cube) -> Option<Tween<CubeContext>> {
        let step = *self.scramble.as_ref()?.front()?;
        let layer = cube.layer(step.axis, step.row());
        cube.select_layer(&layer);

        self.flip_axis = step.axis.unit();
        self.flip_layer = Some(layer);
        log::trace!("controls: scramble step {}", step.notation);

        Some(layer_tween(self.flip_axis, step.angle, true, self.flip_config))
    }

    /// Leave the animating state once a commit finishes.
    fn settle(&mut self) {
        self.state = if self.pending {
            ControlState::Preparing
        } else {
            ControlState::Still
        };
        self.pending = false;
    }

    /// Drop every gesture, scramble and in-flight rotation. The caller stops
    /// the rotation tween itself.
    pub fn reset(&mut self) {
        self.state = ControlState::Still;
        self.edges = Transform::IDENTITY;
        self.helper = default_helper();
        self.flip_axis = Vec3::ZERO;
        self.flip_layer = None;
        self.gesture = None;
        self.pending = false;
        self.momentum.clear();
        self.scramble = None;
        self.rotation_tween = None;
    }
}

impl Default for RotationControls {
    fn default() -> Self {
        Self::new(FlipConfig::default())
    }
}

/// Drag plane for whole-cube gestures: through the origin, facing the
/// camera diagonal.
fn default_helper() -> Transform {
    Transform::IDENTITY.with_rotation(Mat3::from_rotation_y(FRAC_PI_4))
}

/// Where `ray` crosses the drag plane, in plane coordinates.
fn plane_point(ray: &Ray, helper: &Transform) -> Option<Vec2> {
    let world = helper.matrix();
    let hit = intersect_plane(ray, world, HELPER_SIZE / 2.0)?;
    Some(world.inverse().transform_point3(hit.point).truncate())
}

fn is_lattice_axis(v: Vec3) -> bool {
    let abs = v.abs();
    abs.max_element() == 1.0 && abs.element_sum() == 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::camera::DEFAULT_FOV;
    use crate::scramble::notation::parse_sequence;
    use crate::scramble::scrambler::compile;

    fn camera() -> Camera {
        Camera::new(600.0, 800.0, DEFAULT_FOV)
    }

    fn pointer_at(camera: &Camera, world: Vec3) -> Pointer {
        let ndc = camera.project(world);
        Pointer {
            pixel: Vec2::new(
                (ndc.x + 1.0) / 2.0 * camera.viewport.x,
                (1.0 - ndc.y) / 2.0 * camera.viewport.y,
            ),
            ndc,
        }
    }

    #[test]
    fn start_on_face_prepares_layer_gesture() {
        let cube = Cube::new();
        let cam = camera();
        let mut controls = RotationControls::default();

        controls.drag_start(&cube, &cam, pointer_at(&cam, Vec3::new(0.0, 0.25, 0.5)));
        assert_eq!(controls.state, ControlState::Preparing);
        let gesture = controls.gesture().unwrap();
        assert_eq!(gesture.kind, FlipKind::Layer);
        assert_eq!(gesture.normal, Vec3::Z);
        assert!((controls.helper.position - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-5);
    }

    #[test]
    fn start_beside_cube_prepares_cube_gesture() {
        let cube = Cube::new();
        let cam = camera();
        let mut controls = RotationControls::default();

        let beside = default_helper().matrix().transform_point3(Vec3::new(-1.0, 1.0, 0.0));
        controls.drag_start(&cube, &cam, pointer_at(&cam, beside));
        assert_eq!(controls.state, ControlState::Preparing);
        let gesture = controls.gesture().unwrap();
        assert_eq!(gesture.kind, FlipKind::Cube);
        assert!((gesture.current - Vec2::new(-1.0, 1.0)).length() < 1e-3);
    }

    #[test]
    fn complete_miss_changes_nothing() {
        let cube = Cube::new();
        let cam = camera();
        let mut controls = RotationControls::default();

        let far = Pointer {
            pixel: Vec2::splat(-1e5),
            ndc: crate::input::drag::convert_position(
                Vec2::splat(-1e5),
                crate::input::drag::ElementBounds::new(600.0, 800.0),
            ),
        };
        controls.drag_start(&cube, &cam, far);
        assert_eq!(controls.state, ControlState::Still);
        assert!(controls.gesture().is_none());
        assert_eq!(controls.helper, default_helper());
    }

    #[test]
    fn short_drag_returns_to_still() {
        let mut cube = Cube::new();
        let cam = camera();
        let mut controls = RotationControls::default();

        controls.drag_start(&cube, &cam, pointer_at(&cam, Vec3::new(0.0, 0.25, 0.5)));
        let short = pointer_at(&cam, Vec3::new(0.02, 0.25, 0.5));
        controls.drag_move(&mut cube, &cam, short, 10.0);
        assert_eq!(controls.state, ControlState::Preparing);
        assert!(controls.drag_end(20.0).is_none());
        assert_eq!(controls.state, ControlState::Still);
        assert_eq!(cube.pieces_in_group().count(), 0);
    }

    #[test]
    fn long_drag_locks_layer_axis() {
        let mut cube = Cube::new();
        let cam = camera();
        let mut controls = RotationControls::default();

        controls.drag_start(&cube, &cam, pointer_at(&cam, Vec3::new(0.0, 0.25, 0.5)));
        let past_lock = pointer_at(&cam, Vec3::new(0.1, 0.25, 0.5));
        controls.drag_move(&mut cube, &cam, past_lock, 10.0);

        assert_eq!(controls.state, ControlState::Rotating);
        assert_eq!(controls.gesture().unwrap().direction, Some(Axis::X));
        assert_eq!(controls.flip_axis, Vec3::Y);
        assert_eq!(controls.flip_layer().map(|layer| layer.len()), Some(9));
        assert_eq!(cube.pieces_in_group().count(), 9);
        assert!(cube.pieces_in_group().all(|piece| piece.home.y == 1));
    }

    #[test]
    fn scramble_isolates_layer_and_blocks_gestures() {
        let mut cube = Cube::new();
        let cam = camera();
        let mut controls = RotationControls::default();

        let moves = compile(&parse_sequence("R U").unwrap());
        assert!(controls.begin_scramble(moves, &mut cube).is_some());
        assert!(controls.is_scrambling());
        assert_eq!(controls.scramble_remaining(), 2);
        assert_eq!(controls.flip_axis, Vec3::X);
        assert!(cube.pieces_in_group().all(|piece| piece.home.x == 1));

        controls.drag_start(&cube, &cam, pointer_at(&cam, Vec3::new(0.0, 0.25, 0.5)));
        assert!(controls.gesture().is_none());
        assert_eq!(controls.state, ControlState::Animating);
    }

    #[test]
    fn empty_scramble_does_nothing() {
        let mut cube = Cube::new();
        let mut controls = RotationControls::default();
        assert!(controls.begin_scramble(Vec::new(), &mut cube).is_none());
        assert!(!controls.is_scrambling());
        assert_eq!(controls.state, ControlState::Still);
    }

    #[test]
    fn lattice_axes() {
        assert!(is_lattice_axis(Vec3::NEG_Y));
        assert!(!is_lattice_axis(Vec3::ZERO));
        assert!(!is_lattice_axis(Vec3::new(1.0, 1.0, 0.0)));
    }
}
