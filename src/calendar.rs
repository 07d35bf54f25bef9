use chrono::{Datelike, Month, NaiveDate, Weekday};
use num_traits::FromPrimitive;
use serde::Deserialize;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::provider::{Error, ErrorKind, Result};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("literal date should be valid")
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, DeserializeFromStr, SerializeDisplay,
)]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(DateKey)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s.trim(), DATE_KEY_FORMAT)
            .map(DateKey)
            .map_err(|_| {
                Error::new(
                    ErrorKind::DateParse,
                    &format!("'{}' is not a date of the form YYYY-MM-DD", s),
                )
            })
    }
}

// Calendar components in `date`'s own timezone, never converted through UTC
pub fn to_key<D: Datelike>(date: &D) -> DateKey {
    DateKey(
        NaiveDate::from_ymd_opt(date.year(), date.month(), date.day())
            .expect("Datelike values always denote a valid calendar date"),
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SupportedRange {
    min: DateKey,
    max: DateKey,
}

impl Default for SupportedRange {
    fn default() -> Self {
        SupportedRange {
            min: DateKey(ymd(1970, 1, 1)),
            max: DateKey(ymd(2200, 12, 31)),
        }
    }
}

impl SupportedRange {
    pub fn new(min: DateKey, max: DateKey) -> Result<Self> {
        if min > max {
            return Err(Error::new(
                ErrorKind::ConfigParse,
                &format!("minimum date {} lies after maximum date {}", min, max),
            ));
        }

        Ok(SupportedRange { min, max })
    }

    pub fn min(&self) -> DateKey {
        self.min
    }

    pub fn max(&self) -> DateKey {
        self.max
    }

    pub fn contains<D: Datelike>(&self, date: &D) -> bool {
        let key = to_key(date);
        self.min <= key && key <= self.max
    }

    pub fn clamp(&self, key: DateKey) -> DateKey {
        key.max(self.min).min(self.max)
    }

    /// A month is navigable iff its first day lies inside the range.
    pub fn contains_month(&self, cursor: &CalendarCursor) -> bool {
        cursor
            .first_day()
            .map_or(false, |first| self.contains(&first))
    }

    pub fn check<D: Datelike>(&self, date: &D) -> Result<()> {
        if self.contains(date) {
            Ok(())
        } else {
            Err(self.violation())
        }
    }

    pub fn check_month(&self, cursor: &CalendarCursor) -> Result<()> {
        if self.contains_month(cursor) {
            Ok(())
        } else {
            Err(self.violation())
        }
    }

    fn violation(&self) -> Error {
        Error::new(
            ErrorKind::OutOfSupportedRange,
            &format!(
                "The calendar supports dates from {} to {}",
                self.min.date().year(),
                self.max.date().year()
            ),
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    const SUNDAY_FIRST: [&'static str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    const MONDAY_FIRST: [&'static str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

    pub fn offset_of(&self, weekday: Weekday) -> u32 {
        match self {
            WeekStart::Sunday => weekday.num_days_from_sunday(),
            WeekStart::Monday => weekday.num_days_from_monday(),
        }
    }

    pub fn labels(&self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => Self::SUNDAY_FIRST,
            WeekStart::Monday => Self::MONDAY_FIRST,
        }
    }
}

pub fn weekday_labels(week_start: WeekStart) -> [&'static str; 7] {
    week_start.labels()
}

pub fn days_of_month(month: Month, year: i32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1);
    let next = if month == Month::December {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month.number_from_month() + 1, 1)
    };

    match (first, next) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthMetadata {
    pub days_in_month: u32,
    pub first_weekday_offset: u32,
    pub label: String,
}

pub fn month_metadata(year: i32, month: Month, week_start: WeekStart) -> MonthMetadata {
    let first_weekday_offset = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
        .map_or(0, |first| week_start.offset_of(first.weekday()));

    MonthMetadata {
        days_in_month: days_of_month(month, year),
        first_weekday_offset,
        label: format!("{} {}", month.name(), year),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarCursor {
    year: i32,
    month: Month,
}

impl CalendarCursor {
    pub fn new(month: Month, year: i32) -> Self {
        CalendarCursor { year, month }
    }

    pub fn of<D: Datelike>(date: &D) -> Self {
        CalendarCursor {
            year: date.year(),
            month: Month::from_u32(date.month()).expect("month of a date is always in 1..=12"),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn succ(&self) -> Self {
        let next = self.month.succ();

        CalendarCursor {
            month: next,
            year: if next == Month::January {
                self.year + 1
            } else {
                self.year
            },
        }
    }

    pub fn pred(&self) -> Self {
        let prev = self.month.pred();

        CalendarCursor {
            month: prev,
            year: if prev == Month::December {
                self.year - 1
            } else {
                self.year
            },
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.day(1)
    }

    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.number_from_month(), day)
    }

    pub fn num_days(&self) -> u32 {
        days_of_month(self.month, self.year)
    }

    pub fn contains<D: Datelike>(&self, date: &D) -> bool {
        date.year() == self.year && date.month() == self.month.number_from_month()
    }

    pub fn metadata(&self, week_start: WeekStart) -> MonthMetadata {
        month_metadata(self.year, self.month, week_start)
    }
}

impl PartialOrd for CalendarCursor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarCursor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year.cmp(&other.year).then(
            self.month
                .number_from_month()
                .cmp(&other.month.number_from_month()),
        )
    }
}

impl fmt::Display for CalendarCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month.name(), self.year)
    }
}
