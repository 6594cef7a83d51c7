use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::api::types::CubeEvent;
use crate::controls::{FlipConfig, RotationControls};
use crate::cube::{is_solved, Cube};
use crate::extensions::tween::{Properties, Tween};
use crate::renderer::camera::{Camera, DEFAULT_FOV};
use crate::scramble::notation::NotationError;
use crate::scramble::scrambler::DEFAULT_SCRAMBLE_LENGTH;

/// Configuration for a cube session, usually supplied by the host as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CubeConfig {
    /// Commit preset: 0 fast, 1 smooth, 2 bounce.
    pub flip_config: FlipConfig,
    /// Moves in a random scramble (default: 20).
    pub scramble_length: usize,
    /// Seed for the scramble RNG.
    pub seed: u64,
    /// Element size in pixels.
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Vertical field of view in degrees (default: 10).
    pub fov: f32,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            flip_config: FlipConfig::Fast,
            scramble_length: DEFAULT_SCRAMBLE_LENGTH,
            seed: 1,
            viewport_width: 600.0,
            viewport_height: 800.0,
            fov: DEFAULT_FOV,
        }
    }
}

impl CubeConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Why a scramble request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrambleError {
    #[error("cannot scramble while the cube is moving")]
    Busy,
    #[error(transparent)]
    Notation(#[from] NotationError),
}

/// Mutable world state lent to every animation by the scheduler.
pub struct CubeContext {
    pub cube: Cube,
    pub controls: RotationControls,
    pub camera: Camera,
    pub events: Vec<CubeEvent>,
    /// Rotation tween started from inside a callback, registered after the frame.
    spawned_rotation: Option<Tween<CubeContext>>,
}

impl CubeContext {
    pub fn new(config: &CubeConfig) -> Self {
        Self {
            cube: Cube::new(),
            controls: RotationControls::new(config.flip_config),
            camera: Camera::new(config.viewport_width, config.viewport_height, config.fov),
            events: Vec::new(),
            spawned_rotation: None,
        }
    }

    /// Emit an event to be forwarded to the host.
    pub fn emit_event(&mut self, event: CubeEvent) {
        self.events.push(event);
    }

    /// Queue the next rotation tween; the session registers it after the
    /// current frame.
    pub fn spawn_rotation(&mut self, tween: Tween<CubeContext>) {
        self.spawned_rotation = Some(tween);
    }

    pub fn take_spawned_rotation(&mut self) -> Option<Tween<CubeContext>> {
        self.spawned_rotation.take()
    }

    pub fn is_solved(&self) -> bool {
        is_solved(&self.cube)
    }

    pub fn drain_events(&mut self) -> Vec<CubeEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for CubeContext {
    fn default() -> Self {
        Self::new(&CubeConfig::default())
    }
}

// -- Interpolation targets --

pub fn holder_transform(ctx: &mut CubeContext) -> &mut dyn Properties {
    &mut ctx.cube.holder
}

pub fn object_transform(ctx: &mut CubeContext) -> &mut dyn Properties {
    &mut ctx.cube.object
}

pub fn world_camera(ctx: &mut CubeContext) -> &mut dyn Properties {
    &mut ctx.camera
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_fill_missing_fields() {
        let config = CubeConfig::from_json(r#"{ "flip_config": 2, "seed": 7 }"#).unwrap();
        assert_eq!(config.flip_config, FlipConfig::Bounce);
        assert_eq!(config.seed, 7);
        assert_eq!(config.scramble_length, DEFAULT_SCRAMBLE_LENGTH);
        assert_eq!(config.fov, DEFAULT_FOV);
    }

    #[test]
    fn config_rejects_unknown_preset() {
        assert!(CubeConfig::from_json(r#"{ "flip_config": 3 }"#).is_err());
    }

    #[test]
    fn notation_errors_convert() {
        let err: ScrambleError = NotationError::Empty.into();
        assert!(matches!(err, ScrambleError::Notation(NotationError::Empty)));
    }

    #[test]
    fn context_collects_events() {
        let mut ctx = CubeContext::default();
        assert!(ctx.is_solved());
        ctx.emit_event(CubeEvent::Moved);
        assert_eq!(ctx.drain_events(), vec![CubeEvent::Moved]);
        assert!(ctx.events.is_empty());
    }
}
