//! Conversation id generation.

use chrono::Utc;

/// Issues creation-time derived conversation ids.
///
/// Ids are the creation time in epoch milliseconds. When two conversations
/// are created within the same millisecond (or the clock steps backwards),
/// the generator bumps past the last issued value so ids stay strictly
/// increasing for the life of the generator.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id based on the current wall clock.
    pub fn next(&mut self) -> String {
        self.next_at(Utc::now().timestamp_millis())
    }

    /// Next id for the given clock reading.
    pub fn next_at(&mut self, now_millis: i64) -> String {
        let value = now_millis.max(self.last.saturating_add(1));
        self.last = value;
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_clock_when_advancing() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_at(1_000), "1000");
        assert_eq!(ids.next_at(2_500), "2500");
    }

    #[test]
    fn test_same_millisecond_bumps() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_at(1_000), "1000");
        assert_eq!(ids.next_at(1_000), "1001");
        assert_eq!(ids.next_at(1_000), "1002");
    }

    #[test]
    fn test_clock_going_backwards_stays_monotonic() {
        let mut ids = IdGenerator::new();
        ids.next_at(5_000);
        assert_eq!(ids.next_at(10), "5001");
    }

    #[test]
    fn test_wall_clock_ids_are_distinct() {
        let mut ids = IdGenerator::new();
        let a = ids.next();
        let b = ids.next();
        assert_ne!(a, b);
        assert!(b.parse::<i64>().unwrap() > a.parse::<i64>().unwrap());
    }
}
