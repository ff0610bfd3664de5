// Radius animation: a single cubic ease-out tween sampled once per frame.
// Time is always passed in as milliseconds so the frame loop (or a test) decides
// when frames happen.

/// Ease-out cubic: fast start, gentle landing.
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// One time-boxed interpolation from `start` to `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusTween {
    pub start: f32,
    pub target: f32,
    pub started_at_ms: f64,
    pub duration_ms: f64,
}

impl RadiusTween {
    /// Fraction of the duration elapsed at `now_ms`, clamped to [0, 1].
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.started_at_ms) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Radius at `now_ms`. Exactly `target` once progress reaches 1.
    pub fn sample(&self, now_ms: f64) -> f32 {
        let progress = self.progress(now_ms);
        if progress >= 1.0 {
            return self.target;
        }
        let eased = ease_out_cubic(progress);
        (self.start as f64 + (self.target as f64 - self.start as f64) * eased) as f32
    }
}

/// What one animation frame produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub radius: f32,
    pub target: f32,
    pub finished: bool,
}

/// Owns the reveal radius. Only `tick` writes it.
#[derive(Debug, Clone)]
pub struct RadiusAnimator {
    radius: f32,
    tween: Option<RadiusTween>,
    duration_ms: f64,
}

impl RadiusAnimator {
    pub fn new(duration_ms: f64) -> Self {
        Self { radius: 0.0, tween: None, duration_ms }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Start (or redirect) toward `target`. The new tween starts from the live
    /// radius, so a redirect never jumps.
    pub fn animate_to(&mut self, target: f32, now_ms: f64) {
        self.tween = Some(RadiusTween {
            start: self.radius,
            target,
            started_at_ms: now_ms,
            duration_ms: self.duration_ms,
        });
    }

    /// Sample the running tween. `None` when idle.
    pub fn tick(&mut self, now_ms: f64) -> Option<Frame> {
        let tween = self.tween?;
        self.radius = tween.sample(now_ms);
        let finished = tween.progress(now_ms) >= 1.0;
        if finished {
            self.tween = None;
        }
        Some(Frame { radius: self.radius, target: tween.target, finished })
    }
}
