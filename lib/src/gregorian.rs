//! Partial and recurring Gregorian date-times: the value space behind
//! `xsd:dateTime`, `xsd:date`, `xsd:time` and the `xsd:g*` types.
//!
//! A [`GregorianDate`] stores whichever calendar fields were written plus an
//! optional timezone. Exactly eight field combinations are valid, one per
//! datatype. A value without a year recurs: `---15` is the fifteenth of every
//! month, `12:30:00` is half past noon of every day. Calendar maths happens in
//! the value's own timezone, UTC when none was given.

use crate::datatype::Datatype;
use crate::decimal::Decimal;
use crate::duration::Duration;
use crate::errors::{RdfError, Result};
use chrono::{
    DateTime, Datelike, Duration as TimeSpan, FixedOffset, NaiveDate, NaiveDateTime, Offset,
    Timelike, Utc,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref DATE_TIME: Regex = Regex::new(
        r"^(-?\d{4,})-(\d{2})-(\d{2})T(\d{2}):(\d{2}):(\d{2}(?:\.\d+)?)(Z|[+-]\d{2}:\d{2})?$"
    )
    .expect("dateTime pattern compiles");
    static ref DATE: Regex =
        Regex::new(r"^(-?\d{4,})-(\d{2})-(\d{2})(Z|[+-]\d{2}:\d{2})?$").expect("date pattern compiles");
    static ref TIME: Regex = Regex::new(r"^(\d{2}):(\d{2}):(\d{2}(?:\.\d+)?)(Z|[+-]\d{2}:\d{2})?$")
        .expect("time pattern compiles");
    static ref G_YEAR_MONTH: Regex =
        Regex::new(r"^(-?\d{4,})-(\d{2})(Z|[+-]\d{2}:\d{2})?$").expect("gYearMonth pattern compiles");
    static ref G_YEAR: Regex =
        Regex::new(r"^(-?\d{4,})(Z|[+-]\d{2}:\d{2})?$").expect("gYear pattern compiles");
    static ref G_MONTH_DAY: Regex =
        Regex::new(r"^--(\d{2})-(\d{2})(Z|[+-]\d{2}:\d{2})?$").expect("gMonthDay pattern compiles");
    // the trailing "--" is the pre-errata form of gMonth
    static ref G_MONTH: Regex =
        Regex::new(r"^--(\d{2})(?:--)?(Z|[+-]\d{2}:\d{2})?$").expect("gMonth pattern compiles");
    static ref G_DAY: Regex =
        Regex::new(r"^---(\d{2})(Z|[+-]\d{2}:\d{2})?$").expect("gDay pattern compiles");
}

// Enough to find the next 29th of February.
const MAX_ROLL: i32 = 12;

/// The eight valid field-presence patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateKind {
    DateTime,
    Date,
    GYearMonth,
    GYear,
    Time,
    GMonthDay,
    GMonth,
    GDay,
}

impl DateKind {
    pub const ALL: [DateKind; 8] = [
        DateKind::DateTime,
        DateKind::Date,
        DateKind::GYearMonth,
        DateKind::GYear,
        DateKind::Time,
        DateKind::GMonthDay,
        DateKind::GMonth,
        DateKind::GDay,
    ];

    pub fn datatype(&self) -> Datatype {
        match self {
            DateKind::DateTime => Datatype::DateTime,
            DateKind::Date => Datatype::Date,
            DateKind::GYearMonth => Datatype::GYearMonth,
            DateKind::GYear => Datatype::GYear,
            DateKind::Time => Datatype::Time,
            DateKind::GMonthDay => Datatype::GMonthDay,
            DateKind::GMonth => Datatype::GMonth,
            DateKind::GDay => Datatype::GDay,
        }
    }

    pub fn from_datatype(datatype: &Datatype) -> Option<Self> {
        DateKind::ALL
            .into_iter()
            .find(|kind| kind.datatype() == *datatype)
    }

    pub fn is_recurring(&self) -> bool {
        matches!(
            self,
            DateKind::Time | DateKind::GMonthDay | DateKind::GMonth | DateKind::GDay
        )
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            DateKind::DateTime => &DATE_TIME,
            DateKind::Date => &DATE,
            DateKind::GYearMonth => &G_YEAR_MONTH,
            DateKind::GYear => &G_YEAR,
            DateKind::Time => &TIME,
            DateKind::GMonthDay => &G_MONTH_DAY,
            DateKind::GMonth => &G_MONTH,
            DateKind::GDay => &G_DAY,
        }
    }

    // Which of year, month, day, time the pattern carries.
    fn fields(&self) -> (bool, bool, bool, bool) {
        match self {
            DateKind::DateTime => (true, true, true, true),
            DateKind::Date => (true, true, true, false),
            DateKind::GYearMonth => (true, true, false, false),
            DateKind::GYear => (true, false, false, false),
            DateKind::Time => (false, false, false, true),
            DateKind::GMonthDay => (false, true, true, false),
            DateKind::GMonth => (false, true, false, false),
            DateKind::GDay => (false, false, true, false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GregorianDate {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<Decimal>,
    timezone: Option<FixedOffset>,
}

fn is_leap_year(year: i32) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

fn days_in_month(year: Option<i32>, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        // a recurring 29th of February is fine
        2 => match year {
            Some(y) if !is_leap_year(y) => 28,
            _ => 29,
        },
        _ => 31,
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

fn format_year(year: i32) -> String {
    if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{:04}", year)
    }
}

fn format_seconds(second: &Decimal) -> String {
    let s = second.to_string();
    let whole_len = s.find('.').unwrap_or(s.len());
    if whole_len < 2 {
        format!("0{}", s)
    } else {
        s
    }
}

fn format_timezone(tz: &FixedOffset) -> String {
    let secs = tz.local_minus_utc();
    if secs == 0 {
        return "Z".to_string();
    }
    let sign = if secs < 0 { '-' } else { '+' };
    let secs = secs.unsigned_abs();
    format!("{}{:02}:{:02}", sign, secs / 3600, (secs % 3600) / 60)
}

impl GregorianDate {
    /// Builds a value from explicit fields. The hour, minute and second must be
    /// given together, and the combination must be one of the eight patterns.
    pub fn from_fields(
        year: Option<i32>,
        month: Option<u32>,
        day: Option<u32>,
        time: Option<(u32, u32, Decimal)>,
        timezone: Option<FixedOffset>,
    ) -> Result<Self> {
        let date = GregorianDate {
            year,
            month,
            day,
            hour: time.map(|t| t.0),
            minute: time.map(|t| t.1),
            second: time.map(|t| t.2),
            timezone,
        };
        date.validate()?;
        Ok(date)
    }

    /// A full date-time for the given instant.
    pub fn from_instant(instant: DateTime<FixedOffset>) -> Self {
        let nanos = instant.nanosecond().min(999_999_999) as i64;
        let second = Decimal::new(instant.second() as i64 * 1_000_000_000 + nanos, 9)
            .map(|d| d.normalized())
            .unwrap_or_default();
        GregorianDate {
            year: Some(instant.year()),
            month: Some(instant.month()),
            day: Some(instant.day()),
            hour: Some(instant.hour()),
            minute: Some(instant.minute()),
            second: Some(second),
            timezone: Some(*instant.offset()),
        }
    }

    /// Parses any of the eight lexical forms.
    pub fn parse(s: &str) -> Result<Self> {
        let text = s.trim();
        for kind in DateKind::ALL {
            if kind.pattern().is_match(text) {
                return GregorianDate::parse_as(kind, text);
            }
        }
        Err(RdfError::malformed_literal(
            s,
            "xsd:dateTime",
            "not a date, time or Gregorian fragment",
        ))
    }

    /// Parses `s` in the lexical form of one specific kind.
    pub fn parse_as(kind: DateKind, s: &str) -> Result<Self> {
        let datatype = kind.datatype().to_string();
        let fail = |reason: &str| RdfError::malformed_literal(s, datatype.as_str(), reason);
        let caps = kind
            .pattern()
            .captures(s.trim())
            .ok_or_else(|| fail("does not match the lexical form"))?;

        let (has_year, has_month, has_day, has_time) = kind.fields();
        let mut groups = caps.iter().skip(1).map(|m| m.map(|m| m.as_str()));
        let mut next = || groups.next().flatten();

        let year = if has_year {
            let text = next().ok_or_else(|| fail("missing year"))?;
            Some(text.parse::<i32>().map_err(|_| fail("year out of range"))?)
        } else {
            None
        };
        let mut number = |name: &str| -> Result<u32> {
            next()
                .ok_or_else(|| fail(&format!("missing {}", name)))?
                .parse::<u32>()
                .map_err(|_| fail(&format!("invalid {}", name)))
        };
        let month = if has_month { Some(number("month")?) } else { None };
        let day = if has_day { Some(number("day")?) } else { None };
        let (hour, minute) = if has_time {
            (Some(number("hour")?), Some(number("minute")?))
        } else {
            (None, None)
        };
        let second = if has_time {
            let text = next().ok_or_else(|| fail("missing seconds"))?;
            Some(Decimal::parse(text).map_err(|_| fail("invalid seconds"))?)
        } else {
            None
        };
        let timezone = match next() {
            Some(tz) => Some(parse_timezone(tz).ok_or_else(|| fail("invalid timezone"))?),
            None => None,
        };

        let date = GregorianDate {
            year,
            month,
            day,
            hour,
            minute,
            second,
            timezone,
        };
        date.validate().map_err(|e| match e {
            RdfError::MalformedLiteral { reason, .. } => fail(&reason),
            other => other,
        })?;
        Ok(date)
    }

    fn validate(&self) -> Result<()> {
        let fail = |reason: String| {
            RdfError::malformed_literal(format!("{:?}", self), "xsd:dateTime", reason)
        };
        if self.kind_of_fields().is_none() {
            return Err(fail("unsupported combination of date fields".to_string()));
        }
        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                return Err(fail(format!("month {} out of range", month)));
            }
        }
        if let Some(day) = self.day {
            let max = self.month.map(|m| days_in_month(self.year, m)).unwrap_or(31);
            if day < 1 || day > max {
                return Err(fail(format!("day {} out of range", day)));
            }
        }
        if let Some(year) = self.year {
            if NaiveDate::from_ymd_opt(year, self.month.unwrap_or(1), 1).is_none() {
                return Err(fail(format!("year {} out of range", year)));
            }
        }
        if let (Some(hour), Some(minute), Some(second)) = (self.hour, self.minute, self.second) {
            if hour > 23 || minute > 59 {
                return Err(fail(format!("time {}:{} out of range", hour, minute)));
            }
            if second.is_negative() || second >= Decimal::from_integer(60) {
                return Err(fail(format!("second {} out of range", second)));
            }
        }
        if let Some(tz) = self.timezone {
            if tz.local_minus_utc().unsigned_abs() > 14 * 3600 {
                return Err(fail("timezone offset beyond 14 hours".to_string()));
            }
        }
        Ok(())
    }

    fn kind_of_fields(&self) -> Option<DateKind> {
        let time = match (self.hour, self.minute, self.second) {
            (Some(_), Some(_), Some(_)) => true,
            (None, None, None) => false,
            _ => return None,
        };
        let presence = (
            self.year.is_some(),
            self.month.is_some(),
            self.day.is_some(),
            time,
        );
        DateKind::ALL
            .into_iter()
            .find(|kind| kind.fields() == presence)
    }

    pub fn kind(&self) -> DateKind {
        // constructors reject every other combination
        self.kind_of_fields().unwrap_or(DateKind::DateTime)
    }

    pub fn datatype(&self) -> Datatype {
        self.kind().datatype()
    }

    pub fn is_recurring(&self) -> bool {
        self.year.is_none()
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn day(&self) -> Option<u32> {
        self.day
    }

    pub fn hour(&self) -> Option<u32> {
        self.hour
    }

    pub fn minute(&self) -> Option<u32> {
        self.minute
    }

    pub fn second(&self) -> Option<Decimal> {
        self.second
    }

    pub fn timezone(&self) -> Option<FixedOffset> {
        self.timezone
    }

    fn offset(&self) -> FixedOffset {
        self.timezone.unwrap_or_else(utc)
    }

    /// The length of one occurrence of this value.
    pub fn grain(&self) -> Duration {
        match self.kind() {
            DateKind::DateTime | DateKind::Time => Duration::seconds(1),
            DateKind::Date | DateKind::GMonthDay | DateKind::GDay => Duration::days(1),
            DateKind::GYearMonth | DateKind::GMonth => Duration::months(1),
            DateKind::GYear => Duration::years(1),
        }
    }

    /// The distance between two occurrences of a recurring value.
    pub fn period(&self) -> Option<Duration> {
        match self.kind() {
            DateKind::Time => Some(Duration::days(1)),
            DateKind::GDay => Some(Duration::months(1)),
            DateKind::GMonth | DateKind::GMonthDay => Some(Duration::years(1)),
            _ => None,
        }
    }

    /// The same value in the lexical shape of another kind. Missing lower
    /// order fields take their first value (January, the 1st, midnight);
    /// missing higher order fields cannot be invented, giving `None`.
    pub fn project(&self, kind: DateKind) -> Option<GregorianDate> {
        let (needs_year, needs_month, needs_day, needs_time) = kind.fields();
        if needs_year && self.year.is_none() {
            return None;
        }
        if needs_month && !needs_year && self.month.is_none() && self.year.is_none() {
            return None;
        }
        if needs_day
            && !needs_month
            && self.day.is_none()
            && self.month.is_none()
            && self.year.is_none()
        {
            return None;
        }
        let month = self.month.unwrap_or(1);
        let day = self.day.unwrap_or(1);
        Some(GregorianDate {
            year: if needs_year { self.year } else { None },
            month: needs_month.then_some(month),
            day: needs_day.then_some(day),
            hour: needs_time.then_some(self.hour.unwrap_or(0)),
            minute: needs_time.then_some(self.minute.unwrap_or(0)),
            second: needs_time.then_some(self.second.unwrap_or_default()),
            timezone: self.timezone,
        })
    }

    pub fn date_time(&self) -> Option<String> {
        self.project(DateKind::DateTime).map(|d| d.to_string())
    }

    pub fn date(&self) -> Option<String> {
        self.project(DateKind::Date).map(|d| d.to_string())
    }

    pub fn g_year_month(&self) -> Option<String> {
        self.project(DateKind::GYearMonth).map(|d| d.to_string())
    }

    pub fn g_year(&self) -> Option<String> {
        self.project(DateKind::GYear).map(|d| d.to_string())
    }

    pub fn time(&self) -> Option<String> {
        self.project(DateKind::Time).map(|d| d.to_string())
    }

    pub fn g_month_day(&self) -> Option<String> {
        self.project(DateKind::GMonthDay).map(|d| d.to_string())
    }

    pub fn g_month(&self) -> Option<String> {
        self.project(DateKind::GMonth).map(|d| d.to_string())
    }

    pub fn g_day(&self) -> Option<String> {
        self.project(DateKind::GDay).map(|d| d.to_string())
    }

    fn at(&self, date: NaiveDate) -> Option<DateTime<FixedOffset>> {
        let (second, nanos) = self.second.unwrap_or_default().split_nanos()?;
        let naive: NaiveDateTime = date.and_hms_nano_opt(
            self.hour.unwrap_or(0),
            self.minute.unwrap_or(0),
            u32::try_from(second).ok()?,
            nanos,
        )?;
        naive.and_local_timezone(self.offset()).single()
    }

    /// Start of a non-recurring value.
    pub fn start_instant(&self) -> Option<DateTime<FixedOffset>> {
        let year = self.year?;
        let date = NaiveDate::from_ymd_opt(year, self.month.unwrap_or(1), self.day.unwrap_or(1))?;
        self.at(date)
    }

    /// End (exclusive) of a non-recurring value.
    pub fn end_instant(&self) -> Option<DateTime<FixedOffset>> {
        self.grain().add_to(self.start_instant()?)
    }

    // The occurrence `step` periods away from the one in the reference's
    // own day, month or year.
    fn occurrence(
        &self,
        reference: &DateTime<FixedOffset>,
        step: i32,
    ) -> Option<DateTime<FixedOffset>> {
        let local = reference.with_timezone(&self.offset());
        let date = match self.kind() {
            DateKind::Time => local
                .date_naive()
                .checked_add_signed(TimeSpan::days(step as i64))?,
            DateKind::GDay => {
                let months = local.year() * 12 + local.month0() as i32 + step;
                NaiveDate::from_ymd_opt(
                    months.div_euclid(12),
                    months.rem_euclid(12) as u32 + 1,
                    self.day?,
                )?
            }
            DateKind::GMonth => NaiveDate::from_ymd_opt(local.year() + step, self.month?, 1)?,
            DateKind::GMonthDay => {
                NaiveDate::from_ymd_opt(local.year() + step, self.month?, self.day?)?
            }
            _ => return None,
        };
        self.at(date)
    }

    /// The first occurrence starting strictly after `instant`.
    pub fn next_start_time_after(
        &self,
        instant: DateTime<FixedOffset>,
    ) -> Option<DateTime<FixedOffset>> {
        if !self.is_recurring() {
            return self.start_instant().filter(|start| *start > instant);
        }
        (0..=MAX_ROLL)
            .filter_map(|step| self.occurrence(&instant, step))
            .find(|start| *start > instant)
    }

    /// The last occurrence starting at or before `instant`.
    pub fn previous_start_time_before(
        &self,
        instant: DateTime<FixedOffset>,
    ) -> Option<DateTime<FixedOffset>> {
        if !self.is_recurring() {
            return self.start_instant().filter(|start| *start <= instant);
        }
        (0..=MAX_ROLL)
            .filter_map(|step| self.occurrence(&instant, -step))
            .find(|start| *start <= instant)
    }

    /// True when `instant` falls inside an occurrence of this value.
    pub fn is_recurring_at(&self, instant: DateTime<FixedOffset>) -> bool {
        let start = match self.previous_start_time_before(instant) {
            Some(start) => start,
            None => return false,
        };
        match self.grain().add_to(start) {
            Some(end) => start <= instant && instant < end,
            None => false,
        }
    }
}

fn parse_timezone(tz: &str) -> Option<FixedOffset> {
    if tz == "Z" {
        return Some(utc());
    }
    let sign = match tz.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let (hours, minutes) = tz[1..].split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 14 || minutes > 59 || (hours == 14 && minutes > 0) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl fmt::Display for GregorianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let month = self.month.unwrap_or(1);
        let day = self.day.unwrap_or(1);
        match self.kind() {
            DateKind::DateTime | DateKind::Date | DateKind::GYearMonth | DateKind::GYear => {
                write!(f, "{}", format_year(self.year.unwrap_or(0)))?;
                if self.month.is_some() {
                    write!(f, "-{:02}", month)?;
                }
                if self.day.is_some() {
                    write!(f, "-{:02}", day)?;
                }
                if self.kind() == DateKind::DateTime {
                    write!(f, "T")?;
                }
            }
            DateKind::Time => {}
            DateKind::GMonthDay => write!(f, "--{:02}-{:02}", month, day)?,
            DateKind::GMonth => write!(f, "--{:02}", month)?,
            DateKind::GDay => write!(f, "---{:02}", day)?,
        }
        if let (Some(hour), Some(minute), Some(second)) = (self.hour, self.minute, self.second) {
            write!(f, "{:02}:{:02}:{}", hour, minute, format_seconds(&second))?;
        }
        if let Some(tz) = &self.timezone {
            write!(f, "{}", format_timezone(tz))?;
        }
        Ok(())
    }
}

impl FromStr for GregorianDate {
    type Err = RdfError;

    fn from_str(s: &str) -> Result<Self> {
        GregorianDate::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_kinds_are_detected() {
        let cases = [
            ("2002-10-10T12:00:00-05:00", DateKind::DateTime),
            ("2002-10-10", DateKind::Date),
            ("2002-10", DateKind::GYearMonth),
            ("2002Z", DateKind::GYear),
            ("13:20:00.5", DateKind::Time),
            ("--12-25", DateKind::GMonthDay),
            ("--12", DateKind::GMonth),
            ("---01", DateKind::GDay),
        ];
        for (text, kind) in cases {
            let date = GregorianDate::parse(text).unwrap();
            assert_eq!(date.kind(), kind, "{}", text);
            assert_eq!(date.to_string(), text);
        }
    }

    #[test]
    fn test_range_checks() {
        assert!(GregorianDate::parse("2002-13").is_err());
        assert!(GregorianDate::parse("2001-02-29").is_err());
        assert!(GregorianDate::parse("2000-02-29").is_ok());
        assert!(GregorianDate::parse("--02-29").is_ok());
        assert!(GregorianDate::parse("--04-31").is_err());
        assert!(GregorianDate::parse("25:00:00").is_err());
        assert!(GregorianDate::parse("12:00:60").is_err());
        assert!(GregorianDate::parse("2002+15:00").is_err());
        assert!(GregorianDate::parse_as(DateKind::Date, "2002-10").is_err());
    }

    #[test]
    fn test_from_fields_rejects_partial_time() {
        let ok = GregorianDate::from_fields(None, Some(5), None, None, None).unwrap();
        assert_eq!(ok.kind(), DateKind::GMonth);
        assert!(GregorianDate::from_fields(Some(2000), None, Some(3), None, None).is_err());
        assert!(GregorianDate::from_fields(None, None, None, None, None).is_err());
    }

    #[test]
    fn test_projections_downgrade() {
        let year = GregorianDate::parse_as(DateKind::GYear, "2002Z").unwrap();
        assert_eq!(year.date_time().unwrap(), "2002-01-01T00:00:00Z");
        assert_eq!(year.date().unwrap(), "2002-01-01Z");
        assert_eq!(year.g_year_month().unwrap(), "2002-01Z");
        assert_eq!(year.g_year().unwrap(), "2002Z");

        let full = GregorianDate::parse("2002-10-10T12:30:05.25+02:00").unwrap();
        assert_eq!(full.g_year_month().unwrap(), "2002-10+02:00");
        assert_eq!(full.g_month_day().unwrap(), "--10-10+02:00");
        assert_eq!(full.time().unwrap(), "12:30:05.25+02:00");

        let day = GregorianDate::parse("---15").unwrap();
        assert!(day.date_time().is_none());
        assert!(day.g_month().is_none());
        assert_eq!(day.g_day().unwrap(), "---15");
    }

    #[test]
    fn test_recurring_time_rolls_over_a_day() {
        let noon = GregorianDate::parse("12:00:00Z").unwrap();
        let morning = instant("2020-03-01T09:00:00Z");
        let evening = instant("2020-03-01T18:00:00Z");
        assert_eq!(
            noon.next_start_time_after(morning).unwrap(),
            instant("2020-03-01T12:00:00Z")
        );
        assert_eq!(
            noon.next_start_time_after(evening).unwrap(),
            instant("2020-03-02T12:00:00Z")
        );
        assert_eq!(
            noon.previous_start_time_before(morning).unwrap(),
            instant("2020-02-29T12:00:00Z")
        );
        assert!(noon.is_recurring_at(instant("2020-03-01T12:00:00.5Z")));
        assert!(!noon.is_recurring_at(instant("2020-03-01T12:00:01Z")));
    }

    #[test]
    fn test_recurring_day_skips_short_months() {
        let day = GregorianDate::parse("---31").unwrap();
        let reference = instant("2021-02-10T00:00:00Z");
        assert_eq!(
            day.next_start_time_after(reference).unwrap(),
            instant("2021-03-31T00:00:00Z")
        );
        assert_eq!(
            day.previous_start_time_before(reference).unwrap(),
            instant("2021-01-31T00:00:00Z")
        );
        assert!(day.is_recurring_at(instant("2021-01-31T23:59:59Z")));
        assert!(!day.is_recurring_at(instant("2021-02-01T00:00:00Z")));
    }

    #[test]
    fn test_recurring_month_day_uses_timezone() {
        let christmas = GregorianDate::parse("--12-25+05:00").unwrap();
        // 2020-12-24T20:00Z is already the 25th at +05:00
        assert!(christmas.is_recurring_at(instant("2020-12-24T20:00:00Z")));
        assert!(!christmas.is_recurring_at(instant("2020-12-24T18:00:00Z")));

        let leap_day = GregorianDate::parse("--02-29").unwrap();
        assert_eq!(
            leap_day
                .next_start_time_after(instant("2021-01-01T00:00:00Z"))
                .unwrap(),
            instant("2024-02-29T00:00:00Z")
        );
    }

    #[test]
    fn test_recurring_month() {
        let march = GregorianDate::parse("--03").unwrap();
        let reference = instant("2020-06-15T00:00:00Z");
        assert_eq!(
            march.next_start_time_after(reference).unwrap(),
            instant("2021-03-01T00:00:00Z")
        );
        assert_eq!(
            march.previous_start_time_before(reference).unwrap(),
            instant("2020-03-01T00:00:00Z")
        );
        assert!(march.is_recurring_at(instant("2019-03-31T10:00:00Z")));
    }

    #[test]
    fn test_fixed_values_straddle() {
        let year = GregorianDate::parse("2002").unwrap();
        assert!(year.is_recurring_at(instant("2002-06-01T00:00:00Z")));
        assert!(!year.is_recurring_at(instant("2003-01-01T00:00:00Z")));
        assert_eq!(
            year.end_instant().unwrap(),
            instant("2003-01-01T00:00:00Z")
        );
        assert!(year
            .next_start_time_after(instant("2003-01-01T00:00:00Z"))
            .is_none());
    }

    #[test]
    fn test_from_instant() {
        let dt = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2010, 5, 6, 7, 8, 9)
            .unwrap();
        let date = GregorianDate::from_instant(dt);
        assert_eq!(date.to_string(), "2010-05-06T07:08:09+01:00");
        assert_eq!(date.start_instant().unwrap(), dt);
    }
}
