use std::collections::BTreeMap;

use foundation::time::Time;

/// Keyed one-shot timers where starting a timer replaces any pending one on
/// the same key. Expiry is polled from the frame loop.
#[derive(Debug, Clone)]
pub struct FlashTimers<K: Ord + Clone> {
    deadlines: BTreeMap<K, Time>,
}

impl<K: Ord + Clone> Default for FlashTimers<K> {
    fn default() -> Self {
        Self {
            deadlines: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone> FlashTimers<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `key` to fire `duration_s` after `now`. Returns `true` if a
    /// pending timer on the same key was replaced.
    pub fn start(&mut self, key: K, now: Time, duration_s: f64) -> bool {
        self.deadlines.insert(key, now.after(duration_s)).is_some()
    }

    pub fn cancel(&mut self, key: &K) -> bool {
        self.deadlines.remove(key).is_some()
    }

    pub fn is_active(&self, key: &K) -> bool {
        self.deadlines.contains_key(key)
    }

    pub fn deadline(&self, key: &K) -> Option<Time> {
        self.deadlines.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    /// Removes and returns every key whose deadline is at or before `now`,
    /// in key order.
    pub fn expire(&mut self, now: Time) -> Vec<K> {
        let due: Vec<K> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| now.is_at_or_after(**deadline))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &due {
            self.deadlines.remove(key);
        }
        due
    }

    pub fn clear(&mut self) {
        self.deadlines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::FlashTimers;
    use foundation::time::Time;

    #[test]
    fn fires_once_at_deadline() {
        let mut timers = FlashTimers::new();
        timers.start("a", Time(0.0), 1.0);
        assert!(timers.expire(Time(0.9)).is_empty());
        assert_eq!(timers.expire(Time(1.0)), vec!["a"]);
        assert!(timers.expire(Time(5.0)).is_empty());
    }

    #[test]
    fn restart_pushes_deadline_out() {
        let mut timers = FlashTimers::new();
        assert!(!timers.start("a", Time(0.0), 1.0));
        assert!(timers.start("a", Time(0.8), 1.0));
        assert_eq!(timers.len(), 1);
        assert!(timers.expire(Time(1.2)).is_empty());
        assert_eq!(timers.expire(Time(1.8)), vec!["a"]);
    }

    #[test]
    fn cancel_drops_pending_timer() {
        let mut timers = FlashTimers::new();
        timers.start(3u32, Time(0.0), 1.0);
        assert!(timers.cancel(&3));
        assert!(!timers.is_active(&3));
        assert!(timers.expire(Time(2.0)).is_empty());
    }
}
