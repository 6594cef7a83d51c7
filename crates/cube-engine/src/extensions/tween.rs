// extensions/tween.rs
//
// Tween: one eased value driven from 0 to 1 over a duration.
// Registered with a `Scheduler<C>`; callbacks and property interpolation get
// the scheduler's context `C` mutably.
//
// Usage:
//   let tween = Tween::new()
//       .with_duration(350.0)
//       .with_easing(Easing::back_out(2.0))
//       .on_update(|frame, ctx: &mut World| ctx.angle += frame.delta * target)
//       .on_complete(|ctx: &mut World| ctx.done = true);
//   let id = scheduler.register(tween);
//   scheduler.unregister(id);  // stop early; onComplete never fires

use crate::core::scheduler::{Animatable, Playback};
use super::easing::{lerp, Easing};

/// Default duration in milliseconds.
pub const DEFAULT_DURATION: f32 = 500.0;

/// Snapshot handed to `on_update` each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenFrame {
    /// Normalized progress, in [0, 1].
    pub progress: f32,
    /// Eased value for this frame.
    pub value: f32,
    /// Eased value minus the previous frame's.
    pub delta: f32,
}

/// Named numeric properties a tween can interpolate directly.
pub trait Properties {
    /// Current value of `key`, if the target has it.
    fn property(&self, key: &str) -> Option<f32>;
    /// Write `key`. Returns false for unknown keys.
    fn set_property(&mut self, key: &str, value: f32) -> bool;
}

/// Resolves the interpolation target inside the context.
pub type TargetFn<C> = fn(&mut C) -> &mut dyn Properties;

type UpdateFn<C> = Box<dyn FnMut(&TweenFrame, &mut C)>;
type CompleteFn<C> = Box<dyn FnOnce(&mut C)>;

/// Direct `from → to` interpolation of target properties.
///
/// Keys given in `to` but not in `from` start from the target's value when the
/// tween first runs.
pub struct Interpolation<C> {
    target: TargetFn<C>,
    from: Vec<(&'static str, f32)>,
    to: Vec<(&'static str, f32)>,
    tracks: Option<Vec<(&'static str, f32, f32)>>,
}

impl<C> Interpolation<C> {
    pub fn new(target: TargetFn<C>) -> Self {
        Self {
            target,
            from: Vec::new(),
            to: Vec::new(),
            tracks: None,
        }
    }

    pub fn from(mut self, key: &'static str, value: f32) -> Self {
        self.from.push((key, value));
        self
    }

    pub fn to(mut self, key: &'static str, value: f32) -> Self {
        self.to.push((key, value));
        self
    }

    fn apply(&mut self, ctx: &mut C, value: f32) {
        let target = (self.target)(ctx);

        if self.tracks.is_none() {
            let tracks = self
                .to
                .iter()
                .filter_map(|&(key, to)| {
                    let from = self
                        .from
                        .iter()
                        .find(|(k, _)| *k == key)
                        .map(|&(_, v)| v)
                        .or_else(|| target.property(key));
                    if from.is_none() {
                        log::warn!("tween: target has no property '{}'", key);
                    }
                    from.map(|from| (key, from, to))
                })
                .collect();
            self.tracks = Some(tracks);
        }

        for &(key, from, to) in self.tracks.iter().flatten() {
            target.set_property(key, lerp(from, to, value));
        }
    }
}

/// A single tween animation.
pub struct Tween<C> {
    /// Duration in milliseconds.
    pub duration: f32,
    pub easing: Easing,
    /// Milliseconds left before the tween starts moving.
    delay: f32,
    /// Ping-pong forever instead of completing.
    yoyo: bool,
    /// Yoyo direction; false while running backwards.
    forward: bool,
    /// Signed elapsed time (ms); progress is `elapsed / duration`.
    elapsed: f32,
    progress: f32,
    value: f32,
    delta: f32,
    interpolation: Option<Interpolation<C>>,
    on_update: Option<UpdateFn<C>>,
    on_complete: Option<CompleteFn<C>>,
}

impl<C> Tween<C> {
    pub fn new() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            easing: Easing::Linear,
            delay: 0.0,
            yoyo: false,
            forward: true,
            elapsed: 0.0,
            progress: 0.0,
            value: 0.0,
            delta: 0.0,
            interpolation: None,
            on_update: None,
            on_complete: None,
        }
    }

    // -- Builder methods --

    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Ping-pong between 0 and 1 until stopped.
    pub fn with_yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation<C>) -> Self {
        self.interpolation = Some(interpolation);
        self
    }

    pub fn on_update(mut self, callback: impl FnMut(&TweenFrame, &mut C) + 'static) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    pub fn on_complete(mut self, callback: impl FnOnce(&mut C) + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    // -- State --

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    fn frame(&self) -> TweenFrame {
        TweenFrame {
            progress: self.progress,
            value: self.value,
            delta: self.delta,
        }
    }

    fn emit(&mut self, ctx: &mut C) {
        if let Some(interpolation) = &mut self.interpolation {
            interpolation.apply(ctx, self.value);
        }
        let frame = self.frame();
        if let Some(callback) = &mut self.on_update {
            callback(&frame, ctx);
        }
    }

    fn advance(&mut self, delta: f32) {
        self.elapsed += if self.forward { delta } else { -delta };
        self.progress = if self.duration > 0.0 {
            self.elapsed / self.duration
        } else if self.forward {
            1.0
        } else {
            0.0
        };
    }
}

impl<C> Default for Tween<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Animatable<C> for Tween<C> {
    fn update(&mut self, delta: f32, ctx: &mut C) -> Playback {
        let mut delta = delta;
        if self.delay > 0.0 {
            self.delay -= delta;
            if self.delay > 0.0 {
                return Playback::Running;
            }
            delta = -self.delay;
            self.delay = 0.0;
        }

        let old = self.value;
        self.advance(delta);

        if self.yoyo {
            if self.progress > 1.0 || self.progress < 0.0 {
                let end = if self.progress > 1.0 { 1.0 } else { 0.0 };
                self.progress = end;
                self.elapsed = end * self.duration;
                self.value = end;
                self.forward = !self.forward;
            } else {
                self.value = self.easing.apply(self.progress);
            }
            self.delta = self.value - old;
            self.emit(ctx);
            return Playback::Running;
        }

        if self.progress >= 1.0 {
            self.progress = 1.0;
            self.value = 1.0;
            self.delta = 1.0 - old;
            self.emit(ctx);
            if let Some(callback) = self.on_complete.take() {
                callback(ctx);
            }
            return Playback::Finished;
        }

        self.value = self.easing.apply(self.progress);
        self.delta = self.value - old;
        self.emit(ctx);
        Playback::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scheduler::Scheduler;

    #[derive(Default)]
    struct Probe {
        frames: Vec<TweenFrame>,
        completed: u32,
        x: f32,
        y: f32,
    }

    impl Properties for Probe {
        fn property(&self, key: &str) -> Option<f32> {
            match key {
                "x" => Some(self.x),
                "y" => Some(self.y),
                _ => None,
            }
        }

        fn set_property(&mut self, key: &str, value: f32) -> bool {
            match key {
                "x" => self.x = value,
                "y" => self.y = value,
                _ => return false,
            }
            true
        }
    }

    fn probe(ctx: &mut Probe) -> &mut dyn Properties {
        ctx
    }

    fn recording() -> Tween<Probe> {
        Tween::new()
            .on_update(|frame, ctx: &mut Probe| ctx.frames.push(*frame))
            .on_complete(|ctx: &mut Probe| ctx.completed += 1)
    }

    #[test]
    fn five_ticks_of_100_complete_500() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Probe::default();
        scheduler.register(recording());

        for _ in 0..4 {
            scheduler.tick(100.0, &mut ctx);
        }
        assert_eq!(ctx.completed, 0);
        scheduler.tick(100.0, &mut ctx);

        assert_eq!(ctx.frames.len(), 5);
        assert_eq!(ctx.frames[4].progress, 1.0);
        assert_eq!(ctx.completed, 1);
        assert!(scheduler.is_empty());

        // Nothing left to fire.
        scheduler.tick(100.0, &mut ctx);
        assert_eq!(ctx.completed, 1);
    }

    #[test]
    fn deltas_sum_to_one() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Probe::default();
        scheduler.register(recording().with_easing(Easing::back_out(2.0)).with_duration(350.0));

        for _ in 0..30 {
            scheduler.tick(16.0, &mut ctx);
        }
        let sum: f32 = ctx.frames.iter().map(|f| f.delta).sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert_eq!(ctx.completed, 1);
    }

    #[test]
    fn overshoot_clamps_final_value() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Probe::default();
        scheduler.register(recording().with_duration(100.0));

        scheduler.tick(60.0, &mut ctx);
        scheduler.tick(60.0, &mut ctx);

        let last = ctx.frames.last().unwrap();
        assert_eq!(last.progress, 1.0);
        assert_eq!(last.value, 1.0);
        assert!((last.delta - 0.4).abs() < 1e-6);
    }

    #[test]
    fn yoyo_never_completes() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Probe::default();
        scheduler.register(recording().with_duration(100.0).with_yoyo());

        for _ in 0..100 {
            scheduler.tick(30.0, &mut ctx);
        }
        assert_eq!(ctx.completed, 0);
        assert_eq!(scheduler.len(), 1);
        assert!(ctx.frames.iter().all(|f| (0.0..=1.0).contains(&f.progress)));
        assert!(ctx.frames.iter().any(|f| f.delta < 0.0));
    }

    #[test]
    fn stop_skips_on_complete() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Probe::default();
        let id = scheduler.register(recording());

        scheduler.tick(100.0, &mut ctx);
        assert!(scheduler.unregister(id));
        assert!(!scheduler.unregister(id));
        scheduler.tick(1000.0, &mut ctx);

        assert_eq!(ctx.completed, 0);
        assert_eq!(ctx.frames.len(), 1);
    }

    #[test]
    fn delay_holds_then_carries_over() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Probe::default();
        scheduler.register(recording().with_delay(150.0));

        scheduler.tick(100.0, &mut ctx);
        assert!(ctx.frames.is_empty());
        scheduler.tick(100.0, &mut ctx);
        assert_eq!(ctx.frames.len(), 1);
        assert!((ctx.frames[0].progress - 0.1).abs() < 1e-6);
    }

    #[test]
    fn interpolates_properties_with_missing_from() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Probe { x: 4.0, ..Default::default() };
        let lerp = Interpolation::new(probe).from("y", 10.0).to("x", 8.0).to("y", 20.0);
        scheduler.register(Tween::new().with_duration(200.0).with_interpolation(lerp));

        scheduler.tick(100.0, &mut ctx);
        assert!((ctx.x - 6.0).abs() < 1e-6);
        assert!((ctx.y - 15.0).abs() < 1e-6);

        scheduler.tick(100.0, &mut ctx);
        assert_eq!(ctx.x, 8.0);
        assert_eq!(ctx.y, 20.0);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut scheduler = Scheduler::new();
        let mut ctx = Probe::default();
        scheduler.register(recording().with_duration(0.0));
        scheduler.tick(0.0, &mut ctx);
        assert_eq!(ctx.completed, 1);
    }
}
