use chrono::Utc;
use std::sync::Mutex;

/// Generates workout plan ids from the current millisecond timestamp, bumped
/// past the previous id when two creations land in the same millisecond.
/// Unique within a session, which is all the single-user operation rate needs.
pub struct PlanIdGenerator {
    last_millis: Mutex<i64>,
}

impl PlanIdGenerator {
    pub fn new() -> Self {
        Self {
            last_millis: Mutex::new(0),
        }
    }

    pub fn next_id(&self) -> String {
        let mut last = self.last_millis.lock().unwrap();
        let now = Utc::now().timestamp_millis();
        let value = if now > *last { now } else { *last + 1 };
        *last = value;
        value.to_string()
    }
}

impl Default for PlanIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
