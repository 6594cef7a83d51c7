// api/session.rs
//
// CubeSession owns the cube, its controls, the scheduler driving every
// tween, and the input pipeline. Hosts feed it pointer events and frame
// timestamps; everything else happens inside.

use std::f32::consts::{FRAC_PI_3, TAU};
use glam::{Mat3, Vec2, Vec3};
use crate::api::game::{
    holder_transform, object_transform, world_camera, CubeConfig, CubeContext, ScrambleError,
};
use crate::api::types::CubeEvent;
use crate::controls::{ControlState, FlipConfig, Pointer, RotationControls};
use crate::core::scheduler::{AnimationId, Scheduler};
use crate::cube::Cube;
use crate::extensions::easing::Easing;
use crate::extensions::tween::{Interpolation, Tween};
use crate::input::drag::{DragEvent, DragOptions, Draggable, ElementBounds};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::Camera;
use crate::scramble::scrambler::{Scramble, Scrambler};

/// Idle float cycle (ms).
const FLOAT_DURATION: f32 = 1500.0;

/// Elevation of the cube object when shown, and when tucked away.
const ELEVATED_Y: f32 = -0.05;
const LOWERED_Y: f32 = -0.2;
const ELEVATE_DURATION: f32 = 1500.0;

/// Camera zoom outside of play.
const MENU_ZOOM: f32 = 0.85;
/// Shortest zoom transition, and the length of one animator spin.
const ZOOM_DURATION: f32 = 1500.0;

/// Height the cube drops in from, or leaves to.
const SHOW_HEIGHT: f32 = 4.0;
const SHOW_DURATION: f32 = 3000.0;
const HIDE_DURATION: f32 = 1250.0;

pub struct CubeSession {
    config: CubeConfig,
    scheduler: Scheduler<CubeContext>,
    ctx: CubeContext,
    draggable: Draggable,
    input: InputQueue,
    scrambler: Scrambler,
    float_tween: Option<AnimationId>,
    elevate_tween: Option<AnimationId>,
    zoom_tween: Option<AnimationId>,
    show_tween: Option<AnimationId>,
}

impl CubeSession {
    pub fn new(config: CubeConfig) -> Self {
        let draggable = Draggable::new(
            ElementBounds::new(config.viewport_width, config.viewport_height),
            DragOptions { calc_delta: true },
        );

        log::info!(
            "session: {}x{} viewport, flip config {:?}",
            config.viewport_width,
            config.viewport_height,
            config.flip_config
        );

        Self {
            scheduler: Scheduler::new(),
            ctx: CubeContext::new(&config),
            draggable,
            input: InputQueue::new(),
            scrambler: Scrambler::new(config.seed, config.scramble_length),
            float_tween: None,
            elevate_tween: None,
            zoom_tween: None,
            show_tween: None,
            config,
        }
    }

    pub fn config(&self) -> &CubeConfig {
        &self.config
    }

    pub fn cube(&self) -> &Cube {
        &self.ctx.cube
    }

    pub fn controls(&self) -> &RotationControls {
        &self.ctx.controls
    }

    pub fn context(&self) -> &CubeContext {
        &self.ctx
    }

    pub fn camera(&self) -> &Camera {
        &self.ctx.camera
    }

    pub fn scrambler(&self) -> &Scrambler {
        &self.scrambler
    }

    pub fn state(&self) -> ControlState {
        self.ctx.controls.state
    }

    /// Timestamp of the most recent frame (ms).
    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    // -- Frame loop --

    /// Queue a raw pointer event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Drive one display frame at `now` (ms): queued input first, then every
    /// running tween.
    pub fn frame(&mut self, now: f64) {
        for event in self.input.drain() {
            self.handle_input(&event);
        }

        self.scheduler.frame(now, &mut self.ctx);

        if let Some(tween) = self.ctx.take_spawned_rotation() {
            self.start_rotation(tween);
        }
    }

    /// Advance the clock by `delta` ms and drive a frame.
    pub fn tick(&mut self, delta: f32) {
        self.frame(self.scheduler.now() + delta as f64);
    }

    /// Feed one pointer event straight to the gesture pipeline.
    pub fn handle_input(&mut self, event: &InputEvent) {
        let Some(drag) = self.draggable.handle(event) else {
            return;
        };
        let now = self.scheduler.now();

        match drag {
            DragEvent::Start(position) => {
                let pointer = self.pointer(position.current);
                self.ctx.controls.drag_start(&self.ctx.cube, &self.ctx.camera, pointer);
            }
            DragEvent::Move(position) => {
                let pointer = self.pointer(position.current);
                let ctx = &mut self.ctx;
                ctx.controls.drag_move(&mut ctx.cube, &ctx.camera, pointer, now);
            }
            DragEvent::End(_) => {
                if let Some(tween) = self.ctx.controls.drag_end(now) {
                    self.start_rotation(tween);
                }
            }
        }
    }

    fn pointer(&self, pixel: Vec2) -> Pointer {
        Pointer {
            pixel,
            ndc: self.draggable.convert_position(pixel),
        }
    }

    fn start_rotation(&mut self, tween: Tween<CubeContext>) {
        let id = self.scheduler.register(tween);
        self.ctx.controls.set_rotation_tween(id);
    }

    // -- Commands --

    /// Start a scramble and return its notation. Refused unless the cube is
    /// at rest.
    pub fn scramble(&mut self, request: Scramble<'_>) -> Result<String, ScrambleError> {
        let controls = &self.ctx.controls;
        if controls.state != ControlState::Still || controls.is_scrambling() {
            log::warn!("session: scramble refused while {:?}", controls.state);
            return Err(ScrambleError::Busy);
        }

        let moves = self.scrambler.scramble(request)?.to_vec();
        let print = self.scrambler.print().to_string();
        log::info!("session: scramble {}", print);

        match self.ctx.controls.begin_scramble(moves, &mut self.ctx.cube) {
            Some(tween) => self.start_rotation(tween),
            None => self.ctx.emit_event(CubeEvent::ScrambleFinished),
        }

        Ok(print)
    }

    /// Stop any rotation and put every piece back where it started.
    pub fn reset(&mut self) {
        if let Some(id) = self.ctx.controls.rotation_tween() {
            self.scheduler.unregister(id);
        }
        self.ctx.take_spawned_rotation();
        self.ctx.controls.reset();
        self.ctx.cube.reset();
        log::info!("session: reset");
    }

    pub fn enable(&mut self) {
        self.draggable.enable();
    }

    pub fn disable(&mut self) {
        self.draggable.disable();
    }

    pub fn is_enabled(&self) -> bool {
        self.draggable.is_enabled()
    }

    pub fn flip_config(&self) -> FlipConfig {
        self.ctx.controls.flip_config
    }

    pub fn set_flip_config(&mut self, flip_config: FlipConfig) {
        self.config.flip_config = flip_config;
        self.ctx.controls.flip_config = flip_config;
    }

    pub fn scramble_length(&self) -> usize {
        self.scrambler.scramble_length
    }

    pub fn set_scramble_length(&mut self, length: usize) {
        self.config.scramble_length = length;
        self.scrambler.scramble_length = length;
    }

    pub fn is_solved(&self) -> bool {
        self.ctx.is_solved()
    }

    /// A rotation or scramble is running.
    pub fn is_animating(&self) -> bool {
        let controls = &self.ctx.controls;
        controls.state == ControlState::Animating || controls.is_scrambling()
    }

    /// Events emitted since the last drain.
    pub fn events(&self) -> &[CubeEvent] {
        &self.ctx.events
    }

    pub fn drain_events(&mut self) -> Vec<CubeEvent> {
        self.ctx.drain_events()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self.ctx.camera.resize(width, height);
        self.draggable.set_bounds(ElementBounds::new(width, height));
    }

    // -- Presentation --

    /// Gently bob and tilt the cube until `stop_float`.
    pub fn float(&mut self) {
        if self.float_tween.is_some() {
            return;
        }

        let tween = Tween::new()
            .with_duration(FLOAT_DURATION)
            .with_easing(Easing::SineInOut)
            .with_yoyo()
            .with_interpolation(
                Interpolation::new(holder_transform)
                    .from("y", -0.02)
                    .to("y", 0.02),
            )
            .on_update(|frame, ctx: &mut CubeContext| {
                let tilt = 0.005 - frame.value * 0.01;
                ctx.cube.holder.set_euler(Vec3::new(tilt, tilt, -tilt));
            });

        self.float_tween = Some(self.scheduler.register(tween));
    }

    pub fn stop_float(&mut self) {
        if let Some(id) = self.float_tween.take() {
            self.scheduler.unregister(id);
        }
    }

    /// Raise the cube into view, or drop it back instantly.
    pub fn elevate(&mut self, complete: bool) {
        if let Some(id) = self.elevate_tween.take() {
            self.scheduler.unregister(id);
        }

        let tween = if complete {
            Tween::new()
                .with_duration(ELEVATE_DURATION)
                .with_easing(Easing::power_in_out(3.0))
                .with_interpolation(Interpolation::new(object_transform).to("y", ELEVATED_Y))
        } else {
            Tween::new()
                .with_duration(0.0)
                .with_interpolation(Interpolation::new(object_transform).to("y", LOWERED_Y))
        };

        self.elevate_tween = Some(self.scheduler.register(tween));
    }

    /// Zoom the camera in for play, or back out to the menu, while the cube
    /// spins about y. A positive `time` (ms) stretches the transition to at
    /// least that long with one spin per 1.5 s.
    pub fn zoom(&mut self, play: bool, time: f32) {
        if let Some(id) = self.zoom_tween.take() {
            self.scheduler.unregister(id);
        }

        let zoom = if play { 1.0 } else { MENU_ZOOM };
        let (duration, spins, power) = if time > 0.0 {
            let duration = time.max(ZOOM_DURATION);
            (duration, (duration / ZOOM_DURATION).round(), 2.0)
        } else {
            (ZOOM_DURATION, 1.0, 3.0)
        };
        let spin = -TAU * spins;

        let tween = Tween::new()
            .with_duration(duration)
            .with_easing(Easing::power_in_out(power))
            .with_interpolation(Interpolation::new(world_camera).to("zoom", zoom))
            .on_update(move |frame, ctx: &mut CubeContext| {
                ctx.cube.animator.rotation = Mat3::from_rotation_y(spin * frame.value);
            })
            .on_complete(|ctx: &mut CubeContext| {
                ctx.cube.animator.rotation = Mat3::IDENTITY;
            });

        log::debug!("session: zoom to {} over {}ms, {} spins", zoom, duration, spins);
        self.zoom_tween = Some(self.scheduler.register(tween));
    }

    /// Drop the cube in from above with a springy tilt, or throw it back up.
    pub fn show_cube(&mut self, show: bool) {
        if let Some(id) = self.show_tween.take() {
            self.scheduler.unregister(id);
        }

        let start_y = self.ctx.cube.animator.position.y;
        let start_tilt = self.ctx.cube.animator.euler().x;

        let tween = if show {
            Tween::new()
                .with_duration(SHOW_DURATION)
                .with_easing(Easing::elastic_out(0.8, 0.6))
        } else {
            Tween::new()
                .with_duration(HIDE_DURATION)
                .with_easing(Easing::back_in(1.0))
        };

        let tween = tween.on_update(move |frame, ctx: &mut CubeContext| {
            let v = frame.value;
            let (y, tilt) = if show {
                ((1.0 - v) * SHOW_HEIGHT, (1.0 - v) * FRAC_PI_3)
            } else {
                (start_y + v * SHOW_HEIGHT, start_tilt - v * FRAC_PI_3)
            };
            ctx.cube.animator.position.y = y;
            ctx.cube.animator.rotation = Mat3::from_rotation_x(tilt);
        });

        self.show_tween = Some(self.scheduler.register(tween));
    }
}

impl Default for CubeSession {
    fn default() -> Self {
        Self::new(CubeConfig::default())
    }
}
