//! Drag normalizer.
//!
//! Folds mouse and touch streams into one start/move/end protocol. Once a
//! gesture starts it only follows the source that started it, and it keeps
//! following even while start listening is disabled.

use glam::Vec2;
use super::queue::{InputEvent, MouseButton};

/// Configuration for a [`Draggable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DragOptions {
    /// Track per-move delta and cumulative drag vectors.
    pub calc_delta: bool,
}

/// Pixel rectangle of the element receiving gestures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ElementBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { left: 0.0, top: 0.0, width, height }
    }
}

/// Positions carried by every drag event, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragPosition {
    pub current: Vec2,
    pub start: Vec2,
    /// Previous `current`, kept when `calc_delta` is on.
    pub old: Vec2,
    /// `current - old`.
    pub delta: Vec2,
    /// `current - start`.
    pub drag: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    Start(DragPosition),
    Move(DragPosition),
    End(DragPosition),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Mouse,
    Touch,
}

/// Gesture source bound to one element.
#[derive(Debug, Clone)]
pub struct Draggable {
    pub options: DragOptions,
    bounds: ElementBounds,
    position: DragPosition,
    enabled: bool,
    active: Option<Source>,
}

impl Draggable {
    pub fn new(bounds: ElementBounds, options: DragOptions) -> Self {
        Self {
            options,
            bounds,
            position: DragPosition::default(),
            enabled: true,
            active: None,
        }
    }

    /// Start listening for gesture starts.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Stop listening for gesture starts. A gesture in progress still ends.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn position(&self) -> &DragPosition {
        &self.position
    }

    pub fn bounds(&self) -> ElementBounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: ElementBounds) {
        self.bounds = bounds;
    }

    /// Pixel position to normalized device coordinates of this element.
    pub fn convert_position(&self, position: Vec2) -> Vec2 {
        convert_position(position, self.bounds)
    }

    /// Feed one raw event. Returns the gesture event it produced, if any.
    pub fn handle(&mut self, event: &InputEvent) -> Option<DragEvent> {
        match *event {
            InputEvent::MouseDown { button, x, y } => {
                if button != MouseButton::Primary {
                    return None;
                }
                self.start(Source::Mouse, Vec2::new(x, y))
            }
            InputEvent::TouchStart { x, y, touches } => {
                if touches > 1 {
                    return None;
                }
                self.start(Source::Touch, Vec2::new(x, y))
            }
            InputEvent::MouseMove { x, y } => self.moved(Source::Mouse, Vec2::new(x, y)),
            InputEvent::TouchMove { x, y } => self.moved(Source::Touch, Vec2::new(x, y)),
            InputEvent::MouseUp { x, y } => self.end(Source::Mouse, Vec2::new(x, y)),
            InputEvent::TouchEnd { x, y } => self.end(Source::Touch, Vec2::new(x, y)),
        }
    }

    fn start(&mut self, source: Source, at: Vec2) -> Option<DragEvent> {
        if !self.enabled {
            return None;
        }
        self.position.current = at;
        if self.options.calc_delta {
            self.position.start = at;
            self.position.delta = Vec2::ZERO;
            self.position.drag = Vec2::ZERO;
        }
        self.active = Some(source);
        Some(DragEvent::Start(self.position))
    }

    fn moved(&mut self, source: Source, at: Vec2) -> Option<DragEvent> {
        if self.active != Some(source) {
            return None;
        }
        if self.options.calc_delta {
            self.position.old = self.position.current;
        }
        self.position.current = at;
        if self.options.calc_delta {
            self.position.delta = at - self.position.old;
            self.position.drag = at - self.position.start;
        }
        Some(DragEvent::Move(self.position))
    }

    fn end(&mut self, source: Source, at: Vec2) -> Option<DragEvent> {
        if self.active != Some(source) {
            return None;
        }
        self.position.current = at;
        self.active = None;
        Some(DragEvent::End(self.position))
    }
}

/// Pixel position to normalized device coordinates: x right and y up, both
/// in [-1, 1] across the element.
pub fn convert_position(position: Vec2, bounds: ElementBounds) -> Vec2 {
    let x = (position.x - bounds.left) / bounds.width;
    let y = (position.y - bounds.top) / bounds.height;
    Vec2::new(x * 2.0 - 1.0, -(y * 2.0 - 1.0))
}
