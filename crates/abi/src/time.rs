//! Time-point codecs.
//!
//! The chain carries instants in two resolutions: whole seconds in a `u32`
//! and whole milliseconds in a `u64`, both counted from the Unix epoch in
//! UTC. Conversions from [`DateTime`] floor to the wire resolution;
//! pre-epoch instants clamp to zero.

use crate::{Pack, Result, Unpack};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The text layout the node uses for timestamps: ISO-8601 without an offset.
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// An instant at one-second resolution, wire-encoded as a `u32`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimePointSec(u32);

impl TimePointSec {
    /// Creates a time point from whole seconds since the Unix epoch.
    #[inline]
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// Returns the whole seconds since the Unix epoch.
    #[inline]
    pub const fn as_secs(self) -> u32 {
        self.0
    }
}

impl From<DateTime<Utc>> for TimePointSec {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant.timestamp().clamp(0, u32::MAX as i64) as u32)
    }
}

impl From<TimePointSec> for DateTime<Utc> {
    fn from(t: TimePointSec) -> Self {
        // Every u32 second count is within chrono's representable range.
        DateTime::from_timestamp(i64::from(t.0), 0).unwrap_or_default()
    }
}

impl fmt::Display for TimePointSec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        DateTime::<Utc>::from(*self).format("%Y-%m-%dT%H:%M:%S").fmt(f)
    }
}

impl Pack for TimePointSec {
    fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
        self.0.pack(out)
    }
}

impl Unpack for TimePointSec {
    fn unpack(buf: &mut &[u8]) -> Result<Self> {
        Ok(Self(u32::unpack(buf)?))
    }
}

impl Serialize for TimePointSec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimePointSec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let instant = parse_node_time(&String::deserialize(deserializer)?)
            .map_err(de::Error::custom)?;
        Ok(Self::from(instant))
    }
}

/// An instant at one-millisecond resolution, wire-encoded as a `u64`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimePoint(u64);

impl TimePoint {
    /// Creates a time point from whole milliseconds since the Unix epoch.
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Returns the whole milliseconds since the Unix epoch.
    #[inline]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Converts to a [`DateTime`], or `None` when the millisecond count lies
    /// outside chrono's representable range.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(i64::try_from(self.0).ok()?)
    }
}

impl From<DateTime<Utc>> for TimePoint {
    fn from(instant: DateTime<Utc>) -> Self {
        Self(instant.timestamp_millis().max(0) as u64)
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(instant) => instant.format("%Y-%m-%dT%H:%M:%S%.3f").fmt(f),
            None => write!(f, "{}ms", self.0),
        }
    }
}

impl Pack for TimePoint {
    fn pack(&self, out: &mut Vec<u8>) -> Result<()> {
        self.0.pack(out)
    }
}

impl Unpack for TimePoint {
    fn unpack(buf: &mut &[u8]) -> Result<Self> {
        Ok(Self(u64::unpack(buf)?))
    }
}

impl Serialize for TimePoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimePoint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let instant = parse_node_time(&String::deserialize(deserializer)?)
            .map_err(de::Error::custom)?;
        Ok(Self::from(instant))
    }
}

fn parse_node_time(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, TIME_FORMAT).map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pack, unpack};

    #[test]
    fn seconds_pack_as_u32() {
        let expiration = TimePointSec::from_secs(1_573_563_048);
        assert_eq!(pack(&expiration).unwrap(), [0xa8, 0xaa, 0xca, 0x5d]);
        assert_eq!(unpack::<TimePointSec>(&[0xa8, 0xaa, 0xca, 0x5d]).unwrap(), expiration);
    }

    #[test]
    fn datetime_conversion_floors_to_seconds() {
        let instant = DateTime::parse_from_rfc3339("2019-11-12T12:50:48.731Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(TimePointSec::from(instant).as_secs(), 1_573_563_048);
    }

    #[test]
    fn millis_pack_as_u64() {
        let instant = DateTime::parse_from_rfc3339("2019-11-12T12:50:48.731Z")
            .unwrap()
            .with_timezone(&Utc);
        let t = TimePoint::from(instant);
        assert_eq!(t.as_millis(), 1_573_563_048_731);
        let encoded = pack(&t).unwrap();
        assert_eq!(encoded.len(), 8);
        assert_eq!(unpack::<TimePoint>(&encoded).unwrap(), t);
    }

    #[test]
    fn pre_epoch_instants_clamp_to_zero() {
        let instant = DateTime::parse_from_rfc3339("1969-07-20T20:17:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(TimePointSec::from(instant).as_secs(), 0);
        assert_eq!(TimePoint::from(instant).as_millis(), 0);
    }

    #[test]
    fn node_text_form() {
        let expiration = TimePointSec::from_secs(1_573_563_048);
        assert_eq!(expiration.to_string(), "2019-11-12T12:50:48");
        let parsed: TimePointSec = serde_json::from_str("\"2019-11-12T12:50:48\"").unwrap();
        assert_eq!(parsed, expiration);
        let with_millis: TimePointSec =
            serde_json::from_str("\"2019-11-12T12:50:48.500\"").unwrap();
        assert_eq!(with_millis, expiration);
    }
}
