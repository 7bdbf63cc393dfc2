use std::time::{Duration, Instant};

pub const DEFAULT_MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Timing for a single tick of the loop.
///
/// `now` is monotonic time since the loop started, `dt` is the number of
/// seconds elapsed since the previous tick began.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickTime {
    pub now: Duration,
    pub dt: f32,
}

impl TickTime {
    pub fn new(now: Duration, dt: f32) -> Self {
        Self { now, dt }
    }

    /// Same instant with a zero delta; updates fed this tick do not move anything.
    pub fn paused(self) -> Self {
        Self { dt: 0.0, ..self }
    }
}

#[derive(Debug)]
pub struct FrameClock {
    origin: Instant,
    last_tick: Instant,
    max_frame_delta: Duration,
}

impl FrameClock {
    pub fn new(origin: Instant, max_frame_delta: Duration) -> Self {
        let max_frame_delta = if max_frame_delta.is_zero() {
            DEFAULT_MAX_FRAME_DELTA
        } else {
            max_frame_delta
        };
        Self {
            origin,
            last_tick: origin,
            max_frame_delta,
        }
    }

    pub fn tick(&mut self, at: Instant) -> TickTime {
        let raw_frame_dt = at.saturating_duration_since(self.last_tick);
        if at > self.last_tick {
            self.last_tick = at;
        }
        TickTime {
            now: self.last_tick.saturating_duration_since(self.origin),
            dt: raw_frame_dt.min(self.max_frame_delta).as_secs_f32(),
        }
    }

    pub fn max_frame_delta(&self) -> Duration {
        self.max_frame_delta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Inactive,
    Pending,
    Expired,
}

/// Deadline tracker for one-shot or repeating deferred actions.
///
/// The timer never runs work itself: `advance` reports [`TimerEvent::Expired`]
/// and the owner reacts. A repeating timer restarts from the `now` of the tick
/// that observed the expiry, so it is never inactive between cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineTimer {
    duration: Duration,
    started_at: Option<Duration>,
    repeat: bool,
}

impl DeadlineTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            started_at: None,
            repeat: false,
        }
    }

    /// Negative and non-finite durations become zero and expire on the first advance.
    /// Values too large for `Duration` saturate and never expire.
    pub fn from_secs_f32(seconds: f32) -> Self {
        let duration = if seconds.is_finite() && seconds > 0.0 {
            Duration::try_from_secs_f32(seconds).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        };
        Self::new(duration)
    }

    pub fn repeating(mut self) -> Self {
        self.repeat = true;
        self
    }

    pub fn started(mut self, now: Duration) -> Self {
        self.activate(now);
        self
    }

    /// Calling this on an active timer pushes the deadline out from `now`.
    pub fn activate(&mut self, now: Duration) {
        self.started_at = Some(now);
    }

    pub fn deactivate(&mut self, now: Duration) {
        self.started_at = None;
        if self.repeat {
            self.activate(now);
        }
    }

    pub fn advance(&mut self, now: Duration) -> TimerEvent {
        let Some(started_at) = self.started_at else {
            return TimerEvent::Inactive;
        };
        if now.saturating_sub(started_at) >= self.duration {
            self.deactivate(now);
            TimerEvent::Expired
        } else {
            TimerEvent::Pending
        }
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn elapsed(&self, now: Duration) -> Option<Duration> {
        self.started_at
            .map(|started_at| now.saturating_sub(started_at))
    }

    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.elapsed(now)
            .map(|elapsed| self.duration.saturating_sub(elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(value: f32) -> Duration {
        Duration::from_secs_f32(value)
    }

    #[test]
    fn new_timer_is_inactive_and_advance_is_noop() {
        let mut timer = DeadlineTimer::new(secs(1.0));

        assert!(!timer.is_active());
        assert_eq!(timer.advance(secs(5.0)), TimerEvent::Inactive);
        assert!(!timer.is_active());
    }

    #[test]
    fn repeating_autostart_fires_once_per_period() {
        let mut timer = DeadlineTimer::new(secs(1.0))
            .repeating()
            .started(Duration::ZERO);
        let mut fired = 0;
        let mut counts = Vec::new();

        for now in [secs(1.0), secs(2.0), secs(2.5)] {
            if timer.advance(now) == TimerEvent::Expired {
                fired += 1;
            }
            counts.push(fired);
        }

        assert_eq!(counts, vec![1, 2, 2]);
        assert!(timer.is_active());
    }

    #[test]
    fn repeating_timer_stays_active_after_k_periods() {
        let period = Duration::from_millis(400);
        let mut timer = DeadlineTimer::new(period).repeating().started(Duration::ZERO);
        let mut fired = 0;
        let mut now = Duration::ZERO;

        for _ in 0..7 {
            now += period;
            if timer.advance(now) == TimerEvent::Expired {
                fired += 1;
            }
        }

        assert_eq!(fired, 7);
        assert!(timer.is_active());
        assert!(timer.elapsed(now).expect("active") < period);
    }

    #[test]
    fn one_shot_does_not_refire_until_reactivated() {
        let mut timer = DeadlineTimer::new(secs(0.5)).started(Duration::ZERO);

        assert_eq!(timer.advance(secs(0.25)), TimerEvent::Pending);
        assert_eq!(timer.advance(secs(0.5)), TimerEvent::Expired);
        assert!(!timer.is_active());
        for step in 1..10 {
            assert_eq!(timer.advance(secs(0.5 + step as f32)), TimerEvent::Inactive);
        }

        timer.activate(secs(20.0));
        assert_eq!(timer.advance(secs(20.4)), TimerEvent::Pending);
        assert_eq!(timer.advance(secs(20.5)), TimerEvent::Expired);
    }

    #[test]
    fn activate_while_active_resets_deadline() {
        let mut timer = DeadlineTimer::new(secs(1.0)).started(Duration::ZERO);

        timer.activate(secs(0.75));

        assert_eq!(timer.advance(secs(1.0)), TimerEvent::Pending);
        assert_eq!(timer.advance(secs(1.75)), TimerEvent::Expired);
    }

    #[test]
    fn zero_and_negative_durations_expire_on_first_advance() {
        for seconds in [0.0, -3.0, f32::NAN] {
            let mut timer = DeadlineTimer::from_secs_f32(seconds).started(secs(2.0));
            assert_eq!(timer.advance(secs(2.0)), TimerEvent::Expired, "seconds={seconds}");
        }
    }

    #[test]
    fn oversized_duration_saturates_instead_of_panicking() {
        let mut timer = DeadlineTimer::from_secs_f32(1.0e20).started(Duration::ZERO);

        assert_eq!(timer.duration(), Duration::MAX);
        assert_eq!(timer.advance(secs(5.0)), TimerEvent::Pending);
        assert!(timer.is_active());
    }

    #[test]
    fn deactivate_on_repeating_timer_restarts_immediately() {
        let mut timer = DeadlineTimer::new(secs(1.0)).repeating().started(Duration::ZERO);

        timer.deactivate(Duration::from_millis(300));

        assert!(timer.is_active());
        assert_eq!(timer.elapsed(Duration::from_millis(300)), Some(Duration::ZERO));
        assert_eq!(
            timer.remaining(Duration::from_millis(800)),
            Some(Duration::from_millis(500))
        );
    }

    #[test]
    fn repeating_restart_is_anchored_to_observing_tick() {
        let mut timer = DeadlineTimer::new(secs(1.0)).repeating().started(Duration::ZERO);

        assert_eq!(timer.advance(secs(1.25)), TimerEvent::Expired);

        assert_eq!(timer.advance(secs(2.0)), TimerEvent::Pending);
        assert_eq!(timer.advance(secs(2.25)), TimerEvent::Expired);
    }

    #[test]
    fn clock_reports_delta_since_previous_tick() {
        let origin = Instant::now();
        let mut clock = FrameClock::new(origin, DEFAULT_MAX_FRAME_DELTA);

        let first = clock.tick(origin + Duration::from_millis(16));
        let second = clock.tick(origin + Duration::from_millis(50));

        assert_eq!(first.now, Duration::from_millis(16));
        assert!((first.dt - 0.016).abs() < 1e-6);
        assert_eq!(second.now, Duration::from_millis(50));
        assert!((second.dt - 0.034).abs() < 1e-6);
    }

    #[test]
    fn clock_clamps_large_frame_delta() {
        let origin = Instant::now();
        let mut clock = FrameClock::new(origin, Duration::from_millis(250));

        let tick = clock.tick(origin + Duration::from_millis(600));

        assert!((tick.dt - 0.25).abs() < 1e-6);
        assert_eq!(tick.now, Duration::from_millis(600));
    }

    #[test]
    fn clock_zero_max_delta_falls_back_to_default() {
        let clock = FrameClock::new(Instant::now(), Duration::ZERO);
        assert_eq!(clock.max_frame_delta(), DEFAULT_MAX_FRAME_DELTA);
    }

    #[test]
    fn clock_never_runs_backwards() {
        let origin = Instant::now();
        let mut clock = FrameClock::new(origin, DEFAULT_MAX_FRAME_DELTA);
        clock.tick(origin + Duration::from_millis(100));

        let tick = clock.tick(origin + Duration::from_millis(40));

        assert_eq!(tick.dt, 0.0);
        assert_eq!(tick.now, Duration::from_millis(100));
    }

    #[test]
    fn paused_tick_keeps_now_and_zeroes_delta() {
        let tick = TickTime::new(Duration::from_secs(3), 0.016).paused();
        assert_eq!(tick.now, Duration::from_secs(3));
        assert_eq!(tick.dt, 0.0);
    }
}
