use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A named point in time.
///
/// Stored as a JSON object. Fields unknown to this version are ignored on
/// read, so older binaries can still load records written by newer ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    #[serde(default)]
    pub name: String,

    /// Unix timestamp (seconds) the timer counts down to.
    pub deadline: i64,

    /// Unix timestamp (seconds) at which the timer was saved, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
}

impl Timer {
    pub fn new(name: impl Into<String>, deadline: i64) -> Self {
        Self {
            name: name.into(),
            deadline,
            created: None,
        }
    }

    /// Returns a copy stamped with `now` as its creation time.
    pub fn created_at(mut self, now: SystemTime) -> Self {
        self.created = Some(unix_seconds(now));
        self
    }

    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn decode(data: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(data)
    }

    /// Seconds left until the deadline, zero once it has passed.
    pub fn remaining(&self, now: SystemTime) -> u64 {
        u64::try_from(self.deadline.saturating_sub(unix_seconds(now))).unwrap_or(0)
    }
}

fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(since) => i64::try_from(since.as_secs()).unwrap_or(i64::MAX),
        Err(before) => i64::try_from(before.duration().as_secs()).map_or(i64::MIN, |s| -s),
    }
}

#[cfg(test)]
mod tests;
