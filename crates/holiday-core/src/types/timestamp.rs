use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
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

    pub fn unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    pub fn unix_secs(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn from_unix_millis(millis: i64) -> Option<Self> {
        DateTime::from_timestamp_millis(millis).map(Self)
    }

    pub fn from_unix_secs(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(Self)
    }

    pub fn elapsed(&self) -> Duration {
        let now = Utc::now().timestamp_millis();
        let then = self.0.timestamp_millis();
        if now > then {
            Duration::from_millis((now - then) as u64)
        } else {
            Duration::ZERO
        }
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0.to_rfc3339())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_millis_roundtrip() {
        let ts = Timestamp::from_unix_millis(1_729_000_000_000).unwrap();
        assert_eq!(ts.unix_millis(), 1_729_000_000_000);
        assert_eq!(ts.unix_secs(), 1_729_000_000);
    }

    #[test]
    fn test_elapsed_never_negative() {
        let future = Timestamp::from_unix_secs(Timestamp::now().unix_secs() + 3600).unwrap();
        assert_eq!(future.elapsed(), Duration::ZERO);
    }
}
