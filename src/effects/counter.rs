//! Animated number counters
//!
//! Every counter counts linearly from 0 to its target over a fixed duration.
//! The whole group starts once, the first time the trigger element is
//! reported intersecting, and never restarts. How much of the trigger must
//! be visible is left to the observer's threshold, since a trigger taller
//! than the viewport may never reach a given ratio.

use std::time::Duration;

/// Start-once latch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartLatch {
    started: bool,
}

impl StartLatch {
    /// Returns true for the first caller only
    pub fn try_start(&mut self) -> bool {
        !std::mem::replace(&mut self.started, true)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}

/// Parse a `data-target` attribute. Missing, non-numeric and non-finite
/// values count as zero.
pub fn parse_target(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Animation phase for a counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterPhase {
    /// Not started yet
    Waiting,
    /// Counting up
    Running,
    /// Showing the target
    Complete,
}

/// One counter's time-boxed animation
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    pub target: f64,
    duration: Duration,
    started_at: Option<Duration>,
}

impl CounterAnimation {
    pub fn new(target: f64, duration: Duration) -> Self {
        Self {
            target,
            duration,
            started_at: None,
        }
    }

    pub fn start(&mut self, now: Duration) {
        self.started_at.get_or_insert(now);
    }

    /// Fraction of the animation elapsed, in `[0, 1]`
    pub fn progress(&self, now: Duration) -> f32 {
        let Some(start) = self.started_at else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Displayed value: `floor(progress * target)`, so the target is reached
    /// exactly on completion and never overshot
    pub fn value_at(&self, now: Duration) -> f64 {
        let progress = simple_easing::linear(self.progress(now));
        (f64::from(progress) * self.target).floor()
    }

    pub fn display(&self, now: Duration) -> String {
        format!("{}", self.value_at(now) as i64)
    }

    pub fn phase(&self, now: Duration) -> CounterPhase {
        match self.started_at {
            None => CounterPhase::Waiting,
            Some(_) if self.progress(now) < 1.0 => CounterPhase::Running,
            Some(_) => CounterPhase::Complete,
        }
    }
}

/// All counters on the page, started together
#[derive(Debug, Clone, PartialEq)]
pub struct CounterGroup {
    latch: StartLatch,
    counters: Vec<CounterAnimation>,
}

impl CounterGroup {
    pub fn new(targets: &[f64], duration: Duration) -> Self {
        Self {
            latch: StartLatch::default(),
            counters: targets
                .iter()
                .map(|&target| CounterAnimation::new(target, duration))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    pub fn is_started(&self) -> bool {
        self.latch.is_started()
    }

    /// Intersection notification for the trigger element. Returns true only
    /// for the notification that starts the animation.
    pub fn on_visibility(&mut self, is_intersecting: bool, now: Duration) -> bool {
        if !is_intersecting || !self.latch.try_start() {
            return false;
        }
        for counter in &mut self.counters {
            counter.start(now);
        }
        true
    }

    /// Text for every counter at `now`, in document order
    pub fn frame(&self, now: Duration) -> Vec<String> {
        self.counters.iter().map(|c| c.display(now)).collect()
    }

    /// Whether another animation frame is needed
    pub fn is_running(&self, now: Duration) -> bool {
        self.counters
            .iter()
            .any(|c| c.phase(now) == CounterPhase::Running)
    }
}
