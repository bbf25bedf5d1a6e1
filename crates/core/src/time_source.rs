//! Wall clock and time zone access

use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Time zone a clock renders in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockZone {
    /// The host's local zone
    Local,
    /// A named IANA zone
    Named(Tz),
}

impl ClockZone {
    /// Parse a zone id such as "Europe/Paris" or "Local".
    ///
    /// Unknown ids resolve to UTC.
    pub fn from_id(id: &str) -> Self {
        if id.eq_ignore_ascii_case("local") {
            return ClockZone::Local;
        }
        match id.parse::<Tz>() {
            Ok(tz) => ClockZone::Named(tz),
            Err(_) => {
                log::warn!("Unknown time zone '{}', using UTC", id);
                ClockZone::Named(Tz::UTC)
            }
        }
    }

    /// Convert an instant into this zone
    pub fn localize(&self, instant: DateTime<Utc>) -> ZonedTime {
        match self {
            ClockZone::Local => {
                let local = instant.with_timezone(&Local);
                ZonedTime {
                    time: local.fixed_offset(),
                    abbreviation: local.format("%Z").to_string(),
                }
            }
            ClockZone::Named(tz) => {
                let zoned = instant.with_timezone(tz);
                let offset = zoned.offset().fix();
                ZonedTime {
                    time: offset.from_utc_datetime(&instant.naive_utc()),
                    abbreviation: zoned.format("%Z").to_string(),
                }
            }
        }
    }
}

impl std::fmt::Display for ClockZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockZone::Local => f.write_str("Local"),
            ClockZone::Named(tz) => f.write_str(tz.name()),
        }
    }
}

/// An instant resolved in a zone, with the zone's display abbreviation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonedTime {
    pub time: DateTime<FixedOffset>,
    pub abbreviation: String,
}

/// Source of the current instant and default zone
pub trait TimeSource {
    fn now(&self) -> DateTime<Utc>;

    fn default_zone(&self) -> ClockZone;
}

/// Host wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn default_zone(&self) -> ClockZone {
        ClockZone::Local
    }
}
