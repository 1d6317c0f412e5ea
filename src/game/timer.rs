use std::time::Duration;

/// Fixed-interval movement scheduler driven by frame time.
///
/// The host feeds elapsed frame time in with [`MoveTimer::advance()`] and then
/// calls [`MoveTimer::fire()`] until it returns `false`; each `true` is one
/// movement step.  Because the timer is only ever touched through `&mut self`,
/// a `cancel()` or `restart()` takes effect before any further step can fire.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MoveTimer {
    interval: Duration,
    /// Time accumulated towards the next step; `None` while stopped
    pending: Option<Duration>,
}

impl MoveTimer {
    pub(crate) fn new(interval: Duration) -> MoveTimer {
        MoveTimer {
            interval,
            pending: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the step interval.  Time already accumulated is kept, so a
    /// running timer with enough banked time fires on the next `fire()`.
    pub(crate) fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    pub(crate) fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Start the timer from zero.  Starting a running timer discards its
    /// accumulated time, so there is never more than one schedule active.
    pub(crate) fn start(&mut self) {
        self.pending = Some(Duration::ZERO);
    }

    pub(crate) fn cancel(&mut self) {
        self.pending = None;
    }

    pub(crate) fn advance(&mut self, dt: Duration) {
        if let Some(ref mut pending) = self.pending {
            *pending = pending.saturating_add(dt);
        }
    }

    /// Consume one interval's worth of accumulated time.  Returns `true` if a
    /// movement step is due.
    pub(crate) fn fire(&mut self) -> bool {
        let Some(ref mut pending) = self.pending else {
            return false;
        };
        if self.interval.is_zero() || *pending < self.interval {
            return false;
        }
        *pending -= self.interval;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_fires(timer: &mut MoveTimer) -> usize {
        std::iter::from_fn(|| timer.fire().then_some(())).count()
    }

    #[test]
    fn stopped_timer_never_fires() {
        let mut timer = MoveTimer::new(Duration::from_millis(100));
        timer.advance(Duration::from_secs(5));
        assert!(!timer.is_running());
        assert_eq!(count_fires(&mut timer), 0);
    }

    #[test]
    fn fires_once_per_interval() {
        let mut timer = MoveTimer::new(Duration::from_millis(250));
        timer.start();
        timer.advance(Duration::from_millis(240));
        assert_eq!(count_fires(&mut timer), 0);
        timer.advance(Duration::from_millis(10));
        assert_eq!(count_fires(&mut timer), 1);
        timer.advance(Duration::from_millis(760));
        assert_eq!(count_fires(&mut timer), 3);
        timer.advance(Duration::from_millis(240));
        assert_eq!(count_fires(&mut timer), 1);
    }

    #[test]
    fn cancel_discards_banked_time() {
        let mut timer = MoveTimer::new(Duration::from_millis(100));
        timer.start();
        timer.advance(Duration::from_millis(350));
        timer.cancel();
        assert_eq!(count_fires(&mut timer), 0);
        timer.start();
        assert_eq!(count_fires(&mut timer), 0);
        timer.advance(Duration::from_millis(100));
        assert_eq!(count_fires(&mut timer), 1);
    }

    #[test]
    fn restart_resets_accumulator() {
        let mut timer = MoveTimer::new(Duration::from_millis(100));
        timer.start();
        timer.advance(Duration::from_millis(90));
        timer.start();
        timer.advance(Duration::from_millis(20));
        assert_eq!(count_fires(&mut timer), 0);
    }

    #[test]
    fn shorter_interval_applies_to_banked_time() {
        let mut timer = MoveTimer::new(Duration::from_millis(650));
        timer.start();
        timer.advance(Duration::from_millis(300));
        timer.set_interval(Duration::from_millis(250));
        assert_eq!(timer.interval(), Duration::from_millis(250));
        assert_eq!(count_fires(&mut timer), 1);
    }
}
