//! Per-frame scheduler.
//! Owns every running animation and advances them once per display frame
//! with the wall-clock delta since the previous frame.

/// Anything the scheduler can advance.
///
/// `C` is the mutable world the animation writes into; it is lent to each
/// animation for the duration of its update.
pub trait Animatable<C> {
    /// Advance by `delta` milliseconds.
    fn update(&mut self, delta: f32, ctx: &mut C) -> Playback;
}

/// Returned by [`Animatable::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// Keep ticking next frame.
    Running,
    /// Remove from the scheduler.
    Finished,
}

/// Handle to a registered animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(pub u32);

/// Frame scheduler.
///
/// The loop is "running" from the first registration until the registry
/// empties. Frames received while idle only record the clock, so the first
/// frame after a registration never sees a stale delta.
pub struct Scheduler<C> {
    entries: Vec<(AnimationId, Box<dyn Animatable<C>>)>,
    next_id: u32,
    /// Timestamp of the most recent frame (ms).
    now: f64,
    /// Timestamp the next delta is measured from (ms).
    last_frame: f64,
    running: bool,
}

impl<C> Scheduler<C> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            now: 0.0,
            last_frame: 0.0,
            running: false,
        }
    }

    /// Register an animation. Starts the loop if it was idle.
    pub fn register(&mut self, animation: impl Animatable<C> + 'static) -> AnimationId {
        let id = AnimationId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, Box::new(animation)));

        if !self.running {
            self.running = true;
            self.last_frame = self.now;
            log::trace!("scheduler: loop started");
        }

        id
    }

    /// Remove an animation without letting it finish.
    /// Returns false if it was already gone, which is not an error.
    pub fn unregister(&mut self, id: AnimationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        let removed = self.entries.len() != before;
        if self.entries.is_empty() {
            self.running = false;
        }
        removed
    }

    /// Drive one display frame at timestamp `now` (ms).
    pub fn frame(&mut self, now: f64, ctx: &mut C) {
        self.now = now;
        if !self.running {
            return;
        }

        let delta = (now - self.last_frame).max(0.0) as f32;
        self.last_frame = now;

        // Iterate a snapshot; finished animations drop out as they go.
        let mut active = std::mem::take(&mut self.entries);
        active.retain_mut(|(_, animation)| animation.update(delta, ctx) == Playback::Running);
        active.append(&mut self.entries);
        self.entries = active;

        if self.entries.is_empty() {
            self.running = false;
            log::trace!("scheduler: loop idle");
        }
    }

    /// Advance the clock by `delta` ms and drive a frame.
    pub fn tick(&mut self, delta: f32, ctx: &mut C) {
        self.frame(self.now + delta as f64, ctx);
    }

    /// Timestamp of the most recent frame (ms).
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn contains(&self, id: AnimationId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    /// Number of registered animations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts frames into the context, finishing after `frames` updates.
    struct Counter {
        frames: u32,
    }

    impl Animatable<Vec<f32>> for Counter {
        fn update(&mut self, delta: f32, ctx: &mut Vec<f32>) -> Playback {
            ctx.push(delta);
            self.frames -= 1;
            if self.frames == 0 {
                Playback::Finished
            } else {
                Playback::Running
            }
        }
    }

    #[test]
    fn first_frame_measures_from_registration() {
        let mut scheduler = Scheduler::new();
        let mut log = Vec::new();

        scheduler.frame(1000.0, &mut log);
        scheduler.register(Counter { frames: 2 });
        scheduler.frame(1016.0, &mut log);
        scheduler.frame(1040.0, &mut log);

        assert_eq!(log, vec![16.0, 24.0]);
    }

    #[test]
    fn loop_stops_when_empty_and_restarts_lazily() {
        let mut scheduler = Scheduler::new();
        let mut log = Vec::new();

        scheduler.register(Counter { frames: 1 });
        assert!(scheduler.is_running());
        scheduler.tick(10.0, &mut log);
        assert!(!scheduler.is_running());
        assert!(scheduler.is_empty());

        // Idle frames only move the clock.
        scheduler.tick(500.0, &mut log);
        assert_eq!(log.len(), 1);

        scheduler.register(Counter { frames: 1 });
        scheduler.tick(20.0, &mut log);
        assert_eq!(log, vec![10.0, 20.0]);
    }

    #[test]
    fn unregister_twice_is_noop() {
        let mut scheduler: Scheduler<Vec<f32>> = Scheduler::new();
        let id = scheduler.register(Counter { frames: 10 });
        assert!(scheduler.contains(id));
        assert!(scheduler.unregister(id));
        assert!(!scheduler.unregister(id));
        assert!(!scheduler.is_running());
    }

    #[test]
    fn finished_animations_are_dropped_mid_frame() {
        let mut scheduler = Scheduler::new();
        let mut log = Vec::new();

        scheduler.register(Counter { frames: 1 });
        scheduler.register(Counter { frames: 3 });
        scheduler.tick(5.0, &mut log);

        assert_eq!(log.len(), 2);
        assert_eq!(scheduler.len(), 1);
    }
}
