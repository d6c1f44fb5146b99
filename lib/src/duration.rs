//! ISO 8601 / XML Schema durations (`-P1Y2M3DT4H5M6.7S`).

use crate::decimal::Decimal;
use crate::errors::{RdfError, Result};
use chrono::{DateTime, Duration as TimeSpan, FixedOffset, Months};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref DURATION_PATTERN: Regex = Regex::new(
        r"^(-)?P(?:(\d+)Y)?(?:(\d+)M)?(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+(?:\.\d+)?)S)?)?$"
    )
    .expect("duration pattern compiles");
}

const DATATYPE: &str = "xsd:duration";

/// A signed span of calendar time. Fields are stored as written; `PT90M` keeps
/// ninety minutes rather than normalising to an hour and a half.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Duration {
    negative: bool,
    years: u64,
    months: u64,
    days: u64,
    hours: u64,
    minutes: u64,
    seconds: Decimal,
}

impl Duration {
    pub fn new(
        negative: bool,
        years: u64,
        months: u64,
        days: u64,
        hours: u64,
        minutes: u64,
        seconds: Decimal,
    ) -> Result<Self> {
        if seconds.is_negative() {
            return Err(RdfError::malformed_literal(
                seconds.to_string(),
                DATATYPE,
                "seconds must not be negative",
            ));
        }
        Ok(Duration {
            negative,
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        })
    }

    pub fn years(years: u64) -> Self {
        Duration {
            years,
            ..Default::default()
        }
    }

    pub fn months(months: u64) -> Self {
        Duration {
            months,
            ..Default::default()
        }
    }

    pub fn days(days: u64) -> Self {
        Duration {
            days,
            ..Default::default()
        }
    }

    /// A span of whole seconds; negative input yields a negative duration.
    pub fn seconds(seconds: i64) -> Self {
        let magnitude = seconds.unsigned_abs();
        match i64::try_from(magnitude) {
            Ok(whole) => Duration {
                negative: seconds < 0,
                seconds: Decimal::from_integer(whole),
                ..Default::default()
            },
            // only i64::MIN lands here; carry the excess into minutes
            Err(_) => Duration {
                negative: true,
                minutes: magnitude / 60,
                seconds: Decimal::from_integer((magnitude % 60) as i64),
                ..Default::default()
            },
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        let text = s.trim();
        let caps = DURATION_PATTERN
            .captures(text)
            .ok_or_else(|| RdfError::malformed_literal(s, DATATYPE, "not an ISO 8601 duration"))?;
        if (2..=7).all(|i| caps.get(i).is_none()) || text.ends_with('T') {
            return Err(RdfError::malformed_literal(
                s,
                DATATYPE,
                "a duration needs at least one component",
            ));
        }
        let field = |i: usize| -> Result<u64> {
            match caps.get(i) {
                Some(m) => m.as_str().parse::<u64>().map_err(|_| {
                    RdfError::malformed_literal(s, DATATYPE, "component out of range")
                }),
                None => Ok(0),
            }
        };
        let seconds = match caps.get(7) {
            Some(m) => Decimal::parse(m.as_str())?,
            None => Decimal::default(),
        };
        Ok(Duration {
            negative: caps.get(1).is_some(),
            years: field(2)?,
            months: field(3)?,
            days: field(4)?,
            hours: field(5)?,
            minutes: field(6)?,
            seconds,
        })
    }

    pub fn is_positive(&self) -> bool {
        !self.negative
    }

    pub fn is_zero(&self) -> bool {
        self.years == 0
            && self.months == 0
            && self.days == 0
            && self.hours == 0
            && self.minutes == 0
            && self.seconds.is_zero()
    }

    pub fn year_count(&self) -> u64 {
        self.years
    }

    pub fn month_count(&self) -> u64 {
        self.months
    }

    pub fn day_count(&self) -> u64 {
        self.days
    }

    pub fn hour_count(&self) -> u64 {
        self.hours
    }

    pub fn minute_count(&self) -> u64 {
        self.minutes
    }

    pub fn second_count(&self) -> Decimal {
        self.seconds
    }

    pub fn negated(&self) -> Duration {
        Duration {
            negative: !self.negative,
            ..self.clone()
        }
    }

    // Days, hours, minutes and seconds as one exact span.
    fn clock_span(&self) -> Option<TimeSpan> {
        let (secs, nanos) = self.seconds.split_nanos()?;
        let days = i64::try_from(self.days).ok()?;
        let hours = i64::try_from(self.hours).ok()?;
        let minutes = i64::try_from(self.minutes).ok()?;
        let total = days
            .checked_mul(86_400)?
            .checked_add(hours.checked_mul(3_600)?)?
            .checked_add(minutes.checked_mul(60)?)?
            .checked_add(secs)?;
        TimeSpan::try_seconds(total)?.checked_add(&TimeSpan::nanoseconds(nanos as i64))
    }

    fn calendar_months(&self) -> Option<u32> {
        let months = self.years.checked_mul(12)?.checked_add(self.months)?;
        u32::try_from(months).ok()
    }

    /// `instant + self`, applying years and months on the calendar first.
    pub fn add_to(&self, instant: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        if self.negative {
            return self.negated().subtract_from(instant);
        }
        let months = Months::new(self.calendar_months()?);
        instant
            .checked_add_months(months)?
            .checked_add_signed(self.clock_span()?)
    }

    /// `instant - self`.
    pub fn subtract_from(&self, instant: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
        if self.negative {
            return self.negated().add_to(instant);
        }
        let months = Months::new(self.calendar_months()?);
        instant
            .checked_sub_months(months)?
            .checked_sub_signed(self.clock_span()?)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "PT0S");
        }
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "P")?;
        if self.years > 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.months > 0 {
            write!(f, "{}M", self.months)?;
        }
        if self.days > 0 {
            write!(f, "{}D", self.days)?;
        }
        if self.hours > 0 || self.minutes > 0 || !self.seconds.is_zero() {
            write!(f, "T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if !self.seconds.is_zero() {
                write!(f, "{}S", self.seconds)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Duration {
    type Err = RdfError;

    fn from_str(s: &str) -> Result<Self> {
        Duration::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_round_trip() {
        let text = "P21Y2M13DT23H12342M1993.21S";
        assert_eq!(Duration::parse(text).unwrap().to_string(), text);
        assert_eq!(Duration::parse("-P1D").unwrap().to_string(), "-P1D");
        assert_eq!(Duration::parse("PT0S").unwrap().to_string(), "PT0S");
        assert_eq!(Duration::parse("P0Y1M").unwrap().to_string(), "P1M");
    }

    #[test]
    fn test_signed_seconds() {
        assert_eq!(Duration::seconds(-5).to_string(), "-PT5S");
        assert!(!Duration::seconds(-5).is_positive());
        assert_eq!(Duration::seconds(5).to_string(), "PT5S");
        assert_eq!(Duration::seconds(0).to_string(), "PT0S");
        assert_eq!(
            Duration::seconds(i64::MIN).to_string(),
            "-PT153722867280912930M8S"
        );
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(Duration::parse("P").is_err());
        assert!(Duration::parse("P1DT").is_err());
        assert!(Duration::parse("1D").is_err());
        assert!(Duration::parse("P1H").is_err());
        assert!(Duration::parse("+P1D").is_err());
        assert!(Duration::parse("PT1.S").is_err());
    }

    #[test]
    fn test_calendar_arithmetic() {
        let start = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2021, 1, 31, 12, 0, 0)
            .unwrap();
        let end = Duration::parse("P1MT1H").unwrap().add_to(start).unwrap();
        assert_eq!(end.to_rfc3339(), "2021-02-28T13:00:00+00:00");

        let back = Duration::parse("-P1D").unwrap().add_to(start).unwrap();
        assert_eq!(back.to_rfc3339(), "2021-01-30T12:00:00+00:00");
    }
}
