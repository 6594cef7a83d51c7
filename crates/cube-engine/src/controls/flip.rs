// controls/flip.rs
//
// Committing a rotation: flip presets, the snap-or-flick decision on release,
// and the tweens that carry a layer or the whole cube to the committed angle.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::api::game::CubeContext;
use crate::api::types::CubeEvent;
use crate::extensions::easing::Easing;
use crate::extensions::tween::Tween;
use super::state::ControlState;

/// Momentum magnitude above which a short drag flicks to the next quarter.
pub const FLICK_MOMENTUM: f32 = 0.05;

/// Easing and duration preset for committing rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FlipConfig {
    /// Power-out, quickest.
    #[default]
    Fast,
    /// Sine-out.
    Smooth,
    /// Back-out overshoot; the whole cube bounces through with the layer.
    Bounce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown flip config {0}, expected 0, 1 or 2")]
pub struct FlipConfigError(pub u8);

impl FlipConfig {
    pub fn layer_easing(self) -> Easing {
        match self {
            FlipConfig::Fast => Easing::power_out(3.0),
            FlipConfig::Smooth => Easing::SineOut,
            FlipConfig::Bounce => Easing::back_out(2.0),
        }
    }

    /// Layer flip duration (ms).
    pub fn layer_duration(self) -> f32 {
        match self {
            FlipConfig::Fast => 125.0,
            FlipConfig::Smooth => 200.0,
            FlipConfig::Bounce => 350.0,
        }
    }

    pub fn cube_easing(self) -> Easing {
        match self {
            FlipConfig::Fast => Easing::power_out(4.0),
            FlipConfig::Smooth => Easing::SineOut,
            FlipConfig::Bounce => Easing::back_out(2.0),
        }
    }

    /// Whole-cube flip duration (ms).
    pub fn cube_duration(self) -> f32 {
        match self {
            FlipConfig::Fast => 100.0,
            FlipConfig::Smooth => 150.0,
            FlipConfig::Bounce => 350.0,
        }
    }

    pub fn bounces(self) -> bool {
        self == FlipConfig::Bounce
    }
}

impl TryFrom<u8> for FlipConfig {
    type Error = FlipConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(FlipConfig::Fast),
            1 => Ok(FlipConfig::Smooth),
            2 => Ok(FlipConfig::Bounce),
            other => Err(FlipConfigError(other)),
        }
    }
}

impl From<FlipConfig> for u8 {
    fn from(config: FlipConfig) -> u8 {
        config as u8
    }
}

/// Sign with `sign(0) == 0`.
fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Round an angle to the nearest quarter turn, halves away from zero.
pub fn round_angle(angle: f32) -> f32 {
    sign(angle) * (angle.abs() / FRAC_PI_2).round() * FRAC_PI_2
}

/// Angle a released drag commits to.
///
/// A drag shorter than a quarter turn released with enough momentum flicks on
/// to the next quarter in the direction already turned; anything else snaps to
/// the nearest quarter, which may be zero.
pub fn commit_angle(flip_angle: f32, momentum: f32) -> f32 {
    let flick = momentum.abs() > FLICK_MOMENTUM && flip_angle.abs() < FRAC_PI_2;
    if flick {
        round_angle(flip_angle + sign(flip_angle) * FRAC_PI_4)
    } else {
        round_angle(flip_angle)
    }
}

/// Tween turning the rotation group by `rotation` about `axis` (object frame).
///
/// Scramble steps always run on the fast preset and report no move.
pub fn layer_tween(
    axis: Vec3,
    rotation: f32,
    scramble: bool,
    config: FlipConfig,
) -> Tween<CubeContext> {
    let config = if scramble { FlipConfig::Fast } else { config };
    let bounce = config.bounces();
    let mut fix_delta = true;

    Tween::new()
        .with_duration(config.layer_duration())
        .with_easing(config.layer_easing())
        .on_update(move |frame, ctx: &mut CubeContext| {
            let mut delta = frame.delta * rotation;
            ctx.cube.group.rotate_on_axis(axis, delta);

            // Past the target the whole cube follows the overshoot.
            if bounce && frame.value >= 1.0 {
                if fix_delta {
                    delta = (frame.value - 1.0) * rotation;
                    fix_delta = false;
                }
                ctx.cube.object.rotate_on_axis(axis, delta);
            }
        })
        .on_complete(move |ctx: &mut CubeContext| finish_layer_flip(ctx, scramble))
}

/// Tween turning the whole cube by `rotation` about world `axis`.
pub fn cube_tween(axis: Vec3, rotation: f32, config: FlipConfig) -> Tween<CubeContext> {
    Tween::new()
        .with_duration(config.cube_duration())
        .with_easing(config.cube_easing())
        .on_update(move |frame, ctx: &mut CubeContext| {
            let controls = &mut ctx.controls;
            controls.edges.rotate_on_world_axis(axis, frame.delta * rotation);
            ctx.cube.object.rotation = controls.edges.rotation;
        })
        .on_complete(|ctx: &mut CubeContext| {
            ctx.controls.edges.snap_rotation();
            ctx.cube.object.rotation = ctx.controls.edges.rotation;
            ctx.controls.rotation_tween = None;
            ctx.controls.settle();
            log::debug!("controls: cube flip committed");
        })
}

/// Snap, reattach the layer, then either continue the scramble or settle.
fn finish_layer_flip(ctx: &mut CubeContext, scramble: bool) {
    if !scramble {
        ctx.emit_event(CubeEvent::Moved);
    }

    ctx.cube.object.snap_rotation();
    ctx.cube.group.snap_rotation();
    if let Some(layer) = ctx.controls.flip_layer.take() {
        ctx.cube.deselect_layer(&layer);
    }
    ctx.controls.rotation_tween = None;

    if scramble {
        advance_scramble(ctx);
        return;
    }

    ctx.controls.settle();
    log::debug!("controls: layer flip committed, now {:?}", ctx.controls.state);

    if ctx.is_solved() {
        log::info!("controls: cube solved");
        ctx.emit_event(CubeEvent::Solved);
    }
}

/// Drop the finished scramble step and start the next, if any.
fn advance_scramble(ctx: &mut CubeContext) {
    if let Some(queue) = ctx.controls.scramble.as_mut() {
        queue.pop_front();
    }

    if let Some(tween) = ctx.controls.scramble_step(&mut ctx.cube) {
        ctx.spawn_rotation(tween);
        return;
    }

    ctx.controls.scramble = None;
    ctx.controls.state = ControlState::Still;
    log::info!("controls: scramble finished");
    ctx.emit_event(CubeEvent::ScrambleFinished);
}
