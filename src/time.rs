use std::time::{Duration, Instant};

/// Decides when the iterative deepening loop stops, given an absolute deadline.
#[derive(Debug, Clone)]
pub struct TimeManager {
    deadline: Instant,
    iterations_completed: u16,
    iteration_start: Instant,
    last_iteration_duration: [Duration; 2],
}

impl TimeManager {
    const SAFETY_MARGIN: Duration = Duration::from_millis(30);
    const MIN_ITERATIONS: u16 = 1;

    /// Creates a new TimeManager that must stop at the given deadline.
    ///
    /// # Parameters
    /// * `deadline` - The instant after which no new work should be started. It can already be in the past, in which
    ///   case only the minimum number of iterations is searched.
    pub fn new(deadline: Instant) -> Self {
        let now = Instant::now();
        TimeManager {
            deadline,
            iterations_completed: 0,
            iteration_start: now,
            last_iteration_duration: [Duration::ZERO; 2],
        }
    }

    /// Creates a new TimeManager for a fixed time per move, keeping a small safety margin.
    pub fn from_move_time(move_time: Duration) -> Self {
        Self::new(Instant::now() + move_time.saturating_sub(Self::SAFETY_MARGIN))
    }

    /// Returns the deadline of the search.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Returns the number of iterations that completed.
    pub fn iterations_completed(&self) -> u16 {
        self.iterations_completed
    }

    /// Records the start time of a new iteration.
    pub fn iteration_started(&mut self) {
        self.iteration_start = Instant::now();
    }

    /// Records the completion of the current search iteration.
    ///
    /// Updates the history of iteration durations by shifting the previous duration and storing the current iteration's
    /// duration. Also increments the count of completed iterations.
    pub fn iteration_finished(&mut self) {
        self.last_iteration_duration[0] = self.last_iteration_duration[1];
        self.last_iteration_duration[1] = self.iteration_start.elapsed();
        self.iterations_completed += 1;
    }

    /// Determines whether the search can continue running.
    ///
    /// # Returns
    /// `true` if the minimum number of iterations has not been completed yet, or if the deadline is not reached.
    pub fn can_continue(&self) -> bool {
        self.need_to_continue() || Instant::now() < self.deadline
    }

    /// Returns true while the minimum number of iterations has not been completed, whatever the deadline.
    fn need_to_continue(&self) -> bool {
        self.iterations_completed < Self::MIN_ITERATIONS
    }

    /// Determines whether a new search iteration should be started.
    ///
    /// # Returns
    /// `true` if:
    /// - The minimum number of iterations has not been completed yet, or
    /// - The deadline is not reached and the estimated time to complete at least half of the next iteration fits
    ///   before it.
    pub fn can_start_iteration(&self) -> bool {
        if self.need_to_continue() {
            return true;
        }

        let now = Instant::now();
        if self.deadline <= now {
            return false;
        }

        // Without two measured iterations there is nothing to extrapolate from.
        let [previous, last] = self.last_iteration_duration;
        if previous.is_zero() || last.is_zero() {
            return true;
        }

        // Return true if we expect to finish at least half of the next iteration before the deadline
        let time_before_deadline = self.deadline - now;
        let estimate_next_iteration =
            Duration::try_from_secs_f64((last.as_secs_f64() / previous.as_secs_f64()) * last.as_secs_f64())
                .unwrap_or(Duration::MAX);
        estimate_next_iteration / 2 < time_before_deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_iteration_ignores_past_deadline() {
        let mut time = TimeManager::new(Instant::now());

        assert!(time.can_start_iteration());
        assert!(time.can_continue());

        time.iteration_started();
        time.iteration_finished();

        assert_eq!(time.iterations_completed(), 1);
        assert!(!time.can_continue());
        assert!(!time.can_start_iteration());
    }

    #[test]
    fn test_far_deadline() {
        let mut time = TimeManager::new(Instant::now() + Duration::from_secs(3600));

        time.iteration_started();
        time.iteration_finished();
        time.iteration_started();
        time.iteration_finished();

        assert!(time.can_continue());
        assert!(time.can_start_iteration());
    }

    #[test]
    fn test_from_move_time_keeps_margin() {
        let before = Instant::now();
        let time = TimeManager::from_move_time(Duration::from_millis(1000));

        assert!(time.deadline() >= before + Duration::from_millis(970));
        assert!(time.deadline() < Instant::now() + Duration::from_millis(1000));
    }

    #[test]
    fn test_move_time_shorter_than_margin() {
        let time = TimeManager::from_move_time(Duration::from_millis(10));

        assert!(time.deadline() <= Instant::now());
    }
}
