// Recurring game-time timers

use std::time::Duration;

/// Smallest interval a timer accepts
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Maximum number of times one timer fires during a single `advance`
const MAX_FIRES_PER_ADVANCE: u32 = 8;

/// Identifies a registered timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

#[derive(Debug)]
struct IntervalTimer {
    id: TimerId,
    interval: Duration,
    elapsed: Duration,
}

/// Set of recurring interval timers driven by frame time
///
/// A timer fires every `interval` of advanced time until it is cancelled.
/// Fires from one `advance` call are returned in the order they fell due,
/// ties going to the timer registered first.
#[derive(Debug, Default)]
pub struct Timers {
    timers: Vec<IntervalTimer>,
    next_id: u32,
}

impl Timers {
    /// Create an empty timer set
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a timer firing every `interval`
    pub fn every(&mut self, interval: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(IntervalTimer {
            id,
            interval: interval.max(MIN_INTERVAL),
            elapsed: Duration::ZERO,
        });
        id
    }

    /// Cancel every timer, returns how many were active
    pub fn cancel_all(&mut self) -> usize {
        let count = self.timers.len();
        self.timers.clear();
        count
    }

    /// Number of active timers
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Advance all timers by `dt` and return the timers that fired
    pub fn advance(&mut self, dt: Duration) -> Vec<TimerId> {
        let mut fired: Vec<(Duration, TimerId)> = Vec::new();

        for timer in &mut self.timers {
            let start = timer.elapsed;
            timer.elapsed += dt;

            let mut fires = 0;
            while timer.elapsed >= timer.interval && fires < MAX_FIRES_PER_ADVANCE {
                fires += 1;
                timer.elapsed -= timer.interval;
                // Offset into this frame at which the fire fell due
                fired.push((timer.interval * fires - start, timer.id));
            }

            if timer.elapsed >= timer.interval {
                log::debug!("Timer {:?} dropped a backlog of {:?}", timer.id, timer.elapsed);
                let interval = timer.interval.as_nanos();
                timer.elapsed = Duration::from_nanos((timer.elapsed.as_nanos() % interval) as u64);
            }
        }

        // Stable sort keeps registration order for simultaneous fires
        fired.sort_by_key(|(due, _)| *due);
        fired.into_iter().map(|(_, id)| id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_on_interval() {
        let mut timers = Timers::new();
        let id = timers.every(Duration::from_millis(100));

        assert!(timers.advance(Duration::from_millis(99)).is_empty());
        assert_eq!(timers.advance(Duration::from_millis(1)), vec![id]);
        assert!(timers.advance(Duration::from_millis(50)).is_empty());
        assert_eq!(timers.advance(Duration::from_millis(50)), vec![id]);
    }

    #[test]
    fn test_long_frame_fires_repeatedly() {
        let mut timers = Timers::new();
        let id = timers.every(Duration::from_millis(10));
        assert_eq!(timers.advance(Duration::from_millis(35)), vec![id, id, id]);
        // Remaining 5ms carries over
        assert_eq!(timers.advance(Duration::from_millis(5)), vec![id]);
    }

    #[test]
    fn test_backlog_is_capped() {
        let mut timers = Timers::new();
        timers.every(Duration::from_millis(1));
        let fired = timers.advance(Duration::from_secs(1));
        assert_eq!(fired.len(), MAX_FIRES_PER_ADVANCE as usize);
        assert!(timers.advance(Duration::ZERO).is_empty());
    }

    #[test]
    fn test_fires_are_ordered_by_due_time() {
        let mut timers = Timers::new();
        let slow = timers.every(Duration::from_millis(30));
        let fast = timers.every(Duration::from_millis(20));

        let fired = timers.advance(Duration::from_millis(60));
        assert_eq!(fired, vec![fast, slow, fast, slow, fast]);
    }

    #[test]
    fn test_cancel_all() {
        let mut timers = Timers::new();
        timers.every(Duration::from_millis(10));
        timers.every(Duration::from_millis(20));

        assert_eq!(timers.cancel_all(), 2);
        assert!(timers.is_empty());
        assert!(timers.advance(Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut timers = Timers::new();
        let id = timers.every(Duration::ZERO);
        assert_eq!(timers.advance(Duration::from_millis(2)), vec![id, id]);
    }
}
