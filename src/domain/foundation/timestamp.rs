//! UTC points in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serialized as an RFC 3339 string; ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Unix epoch milliseconds, used in upload paths.
    pub fn as_unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> Timestamp {
        Timestamp::from_datetime(
            DateTime::parse_from_rfc3339(rfc3339)
                .unwrap()
                .with_timezone(&Utc),
        )
    }

    #[test]
    fn orders_chronologically() {
        assert!(at("2024-01-15T10:30:00Z") < at("2024-01-15T10:30:01Z"));
    }

    #[test]
    fn unix_millis_of_known_instant() {
        assert_eq!(at("2024-01-15T00:00:00Z").as_unix_millis(), 1_705_276_800_000);
    }

    #[test]
    fn json_round_trips_as_string() {
        let ts = at("2024-01-15T10:30:00Z");
        let json = serde_json::to_string(&ts).unwrap();
        assert!(json.starts_with("\"2024-01-15T10:30:00"));
        assert_eq!(serde_json::from_str::<Timestamp>(&json).unwrap(), ts);
    }
}
