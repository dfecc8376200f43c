//! Timestamp representation for WrenDB values.

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in time carried as whole microseconds since the Unix epoch.
///
/// Timestamps are kept as raw microseconds rather than a calendar type so the
/// full `i64` range stays representable; in particular [`Timestamp::MAX`]
/// (the commit-timestamp sentinel) lies beyond the range calendar libraries
/// can express. Rendering to RFC-3339 happens only for values that fit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The maximum representable timestamp.
    pub const MAX: Timestamp = Timestamp(i64::MAX);

    /// Creates a timestamp from microseconds since the Unix epoch.
    #[inline]
    pub const fn from_unix_micros(micros: i64) -> Self {
        Self(micros)
    }

    /// Returns the timestamp as microseconds since the Unix epoch.
    #[inline]
    pub const fn as_unix_micros(&self) -> i64 {
        self.0
    }

    /// Renders the timestamp as an RFC-3339 UTC string
    /// (`YYYY-MM-DDThh:mm:ss[.ffffff]Z`, subseconds only when nonzero).
    ///
    /// Returns `None` if the instant is outside the renderable calendar
    /// range (notably [`Timestamp::MAX`]).
    pub fn to_rfc3339(&self) -> Option<String> {
        DateTime::from_timestamp_micros(self.0)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_rfc3339() {
            Some(s) => write!(f, "{}", s),
            None => write!(f, "{}us", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_second_has_no_subseconds() {
        let ts = Timestamp::from_unix_micros(1_000_000);
        assert_eq!(ts.to_rfc3339().unwrap(), "1970-01-01T00:00:01Z");
    }

    #[test]
    fn test_subseconds_rendered_when_nonzero() {
        let ts = Timestamp::from_unix_micros(1_500_000);
        assert_eq!(ts.to_rfc3339().unwrap(), "1970-01-01T00:00:01.500Z");
    }

    #[test]
    fn test_micros_precision() {
        let ts = Timestamp::from_unix_micros(1_500_001);
        assert_eq!(ts.to_rfc3339().unwrap(), "1970-01-01T00:00:01.500001Z");
    }

    #[test]
    fn test_max_is_not_renderable() {
        assert!(Timestamp::MAX.to_rfc3339().is_none());
    }

    #[test]
    fn test_ordering() {
        assert!(Timestamp::from_unix_micros(1) < Timestamp::from_unix_micros(2));
        assert!(Timestamp::from_unix_micros(i64::MAX - 1) < Timestamp::MAX);
    }
}
