use glam::Vec2;

/// Window of drag samples that count toward momentum (ms).
pub const MOMENTUM_WINDOW: f64 = 500.0;

/// Recent drag deltas, weighted toward the newest on release.
#[derive(Debug, Clone, Default)]
pub struct Momentum {
    points: Vec<(Vec2, f64)>,
}

impl Momentum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a drag delta at `now` (ms), dropping samples older than the window.
    pub fn add(&mut self, delta: Vec2, now: f64) {
        self.expire(now);
        self.points.push((delta, now));
    }

    /// Weighted sum of the samples still inside the window at `now`.
    ///
    /// Sample `i` is weighted `i / n`, where `n` counts the samples recorded
    /// before expiry, so the oldest sample never contributes.
    pub fn get(&mut self, now: f64) -> Vec2 {
        let count = self.points.len();
        self.expire(now);
        self.points
            .iter()
            .enumerate()
            .fold(Vec2::ZERO, |sum, (index, (delta, _))| {
                sum + *delta * (index as f32 / count as f32)
            })
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn expire(&mut self, now: f64) {
        self.points.retain(|(_, time)| now - time < MOMENTUM_WINDOW);
    }
}
