//! Bounded history of live dashboard samples.

use std::collections::VecDeque;

use crate::config::REALTIME_SAMPLE_CAPACITY;
use crate::models::{RealtimeStats, SystemStatus};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub at: f64,
    pub active_users: u64,
}

/// Most recent samples, oldest first. Pushing past capacity drops the oldest.
#[derive(Debug, Clone, PartialEq)]
pub struct RealtimeHistory {
    samples: VecDeque<Sample>,
    capacity: usize,
    last_status: Option<SystemStatus>,
}

impl Default for RealtimeHistory {
    fn default() -> Self {
        Self::new(REALTIME_SAMPLE_CAPACITY)
    }
}

impl RealtimeHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            last_status: None,
        }
    }

    /// Record a poll result. Stats without an active-user count only update the status.
    pub fn record(&mut self, stats: &RealtimeStats, at: f64) {
        if let Some(status) = stats.system_status {
            self.last_status = Some(status);
        }
        let Some(active_users) = stats.active_users else {
            return;
        };
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample { at, active_users });
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<Sample> {
        self.samples.back().copied()
    }

    pub fn last_status(&self) -> Option<SystemStatus> {
        self.last_status
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Sample> + ExactSizeIterator {
        self.samples.iter()
    }

    /// Heights in `0.0..=1.0` relative to the largest sample, for the trend strip.
    pub fn normalized(&self) -> Vec<f64> {
        let peak = self.samples.iter().map(|s| s.active_users).max().unwrap_or(0);
        if peak == 0 {
            return vec![0.0; self.samples.len()];
        }
        self.samples
            .iter()
            .map(|s| s.active_users as f64 / peak as f64)
            .collect()
    }

    /// Change between the two most recent samples.
    pub fn delta(&self) -> Option<i64> {
        let mut rev = self.samples.iter().rev();
        let last = rev.next()?;
        let prev = rev.next()?;
        Some(last.active_users as i64 - prev.active_users as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(active: u64) -> RealtimeStats {
        RealtimeStats {
            active_users: Some(active),
            system_status: None,
        }
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut h = RealtimeHistory::new(3);
        for (i, n) in [10, 20, 30, 40].into_iter().enumerate() {
            h.record(&stats(n), i as f64);
        }
        assert_eq!(h.len(), 3);
        let values: Vec<u64> = h.iter().map(|s| s.active_users).collect();
        assert_eq!(values, vec![20, 30, 40]);
        assert_eq!(h.latest().map(|s| s.at), Some(3.0));
    }

    #[test]
    fn test_default_capacity() {
        assert_eq!(RealtimeHistory::default().capacity(), REALTIME_SAMPLE_CAPACITY);
        assert_eq!(RealtimeHistory::new(0).capacity(), 1);
    }

    #[test]
    fn test_status_only_sample() {
        let mut h = RealtimeHistory::default();
        h.record(
            &RealtimeStats {
                active_users: None,
                system_status: Some(SystemStatus::Degraded),
            },
            0.0,
        );
        assert!(h.is_empty());
        assert_eq!(h.last_status(), Some(SystemStatus::Degraded));
    }

    #[test]
    fn test_normalized_and_delta() {
        let mut h = RealtimeHistory::default();
        assert_eq!(h.delta(), None);
        h.record(&stats(50), 0.0);
        h.record(&stats(100), 1.0);
        h.record(&stats(75), 2.0);
        assert_eq!(h.normalized(), vec![0.5, 1.0, 0.75]);
        assert_eq!(h.delta(), Some(-25));
    }
}
