//! Reporting time periods
//!
//! Values of a time dimension in the basic SDMX reporting formats:
//! `2020`, `2020-S1`, `2020-Q3`, `2020-03` or `2020-M03`, `2020-W05` and
//! `2020-03-15`. Construction validates the year range and the sub-period
//! and never clamps.

use crate::error::{RegistryError, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Earliest supported reporting year
pub const MIN_YEAR: i32 = 1;

/// Latest supported reporting year
pub const MAX_YEAR: i32 = 9999;

/// Kind of reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PeriodKind {
    Year,
    Semester,
    Quarter,
    Month,
    Week,
    Day,
}

/// A reporting period.
///
/// Only built through the checked constructors or [`FromStr`], so every
/// value holds a year in `MIN_YEAR..=MAX_YEAR` and a valid sub-period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimePeriod(Period);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Period {
    Year(i32),
    Semester(i32, u8),
    Quarter(i32, u8),
    Month(i32, u8),
    Week(i32, u8),
    Day(NaiveDate),
}

fn check_year(year: i32) -> Result<i32> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(RegistryError::YearOutOfRange {
            year,
            min: MIN_YEAR,
            max: MAX_YEAR,
        })
    }
}

fn check_sub_period(kind: &str, value: u8, max: u8) -> Result<u8> {
    if (1..=max).contains(&value) {
        Ok(value)
    } else {
        Err(RegistryError::InvalidTimePeriod(format!(
            "{} {} is outside 1..={}",
            kind, value, max
        )))
    }
}

impl TimePeriod {
    pub fn year(year: i32) -> Result<Self> {
        Ok(TimePeriod(Period::Year(check_year(year)?)))
    }

    pub fn semester(year: i32, semester: u8) -> Result<Self> {
        Ok(TimePeriod(Period::Semester(
            check_year(year)?,
            check_sub_period("semester", semester, 2)?,
        )))
    }

    pub fn quarter(year: i32, quarter: u8) -> Result<Self> {
        Ok(TimePeriod(Period::Quarter(
            check_year(year)?,
            check_sub_period("quarter", quarter, 4)?,
        )))
    }

    pub fn month(year: i32, month: u8) -> Result<Self> {
        Ok(TimePeriod(Period::Month(
            check_year(year)?,
            check_sub_period("month", month, 12)?,
        )))
    }

    pub fn week(year: i32, week: u8) -> Result<Self> {
        let year = check_year(year)?;
        let last_week = NaiveDate::from_ymd_opt(year, 12, 28)
            .map(|d| d.iso_week().week() as u8)
            .unwrap_or(52);
        Ok(TimePeriod(Period::Week(year, check_sub_period("week", week, last_week)?)))
    }

    pub fn day(year: i32, month: u32, day: u32) -> Result<Self> {
        let year = check_year(year)?;
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|date| TimePeriod(Period::Day(date)))
            .ok_or_else(|| {
                RegistryError::InvalidTimePeriod(format!("{:04}-{:02}-{:02}", year, month, day))
            })
    }

    pub fn kind(&self) -> PeriodKind {
        match self.0 {
            Period::Year(_) => PeriodKind::Year,
            Period::Semester(..) => PeriodKind::Semester,
            Period::Quarter(..) => PeriodKind::Quarter,
            Period::Month(..) => PeriodKind::Month,
            Period::Week(..) => PeriodKind::Week,
            Period::Day(_) => PeriodKind::Day,
        }
    }

    /// Reporting year of the period
    pub fn reporting_year(&self) -> i32 {
        match self.0 {
            Period::Year(y)
            | Period::Semester(y, _)
            | Period::Quarter(y, _)
            | Period::Month(y, _)
            | Period::Week(y, _) => y,
            Period::Day(date) => date.year(),
        }
    }

    /// Semester, quarter, month or week number; `None` for years and days
    pub fn sub_period(&self) -> Option<u8> {
        match self.0 {
            Period::Semester(_, n) | Period::Quarter(_, n) | Period::Month(_, n) | Period::Week(_, n) => {
                Some(n)
            }
            Period::Year(_) | Period::Day(_) => None,
        }
    }

    /// First day of the period
    pub fn start_date(&self) -> NaiveDate {
        let first_of = |year: i32, month: u32| {
            NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
        };
        // Sub-periods are checked on construction, so none of these can underflow
        match self.0 {
            Period::Year(y) => first_of(y, 1),
            Period::Semester(y, s) => first_of(y, (u32::from(s) - 1) * 6 + 1),
            Period::Quarter(y, q) => first_of(y, (u32::from(q) - 1) * 3 + 1),
            Period::Month(y, m) => first_of(y, u32::from(m)),
            Period::Week(y, w) => NaiveDate::from_isoywd_opt(y, u32::from(w), Weekday::Mon)
                .unwrap_or(NaiveDate::MIN),
            Period::Day(date) => date,
        }
    }
}

fn parse_number<T: FromStr>(value: &str, input: &str) -> Result<T> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RegistryError::InvalidTimePeriod(input.to_string()));
    }
    value
        .parse()
        .map_err(|_| RegistryError::InvalidTimePeriod(input.to_string()))
}

impl FromStr for TimePeriod {
    type Err = RegistryError;

    fn from_str(input: &str) -> Result<Self> {
        let value = input.trim();
        let parts: Vec<&str> = value.split('-').collect();
        let year: i32 = parse_number(parts[0], input)?;
        if parts[0].len() != 4 {
            return Err(RegistryError::InvalidTimePeriod(input.to_string()));
        }

        match parts.as_slice() {
            [_] => TimePeriod::year(year),
            [_, period] => {
                let (Some(prefix), Some(number)) = (period.get(..1), period.get(1..)) else {
                    return Err(RegistryError::InvalidTimePeriod(input.to_string()));
                };
                match prefix {
                    "S" => TimePeriod::semester(year, parse_number(number, input)?),
                    "Q" => TimePeriod::quarter(year, parse_number(number, input)?),
                    "M" => TimePeriod::month(year, parse_number(number, input)?),
                    "W" => TimePeriod::week(year, parse_number(number, input)?),
                    _ if period.len() == 2 => TimePeriod::month(year, parse_number(period, input)?),
                    _ => Err(RegistryError::InvalidTimePeriod(input.to_string())),
                }
            }
            [_, month, day] if month.len() == 2 && day.len() == 2 => {
                TimePeriod::day(year, parse_number(month, input)?, parse_number(day, input)?)
            }
            _ => Err(RegistryError::InvalidTimePeriod(input.to_string())),
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Period::Year(y) => write!(f, "{:04}", y),
            Period::Semester(y, s) => write!(f, "{:04}-S{}", y, s),
            Period::Quarter(y, q) => write!(f, "{:04}-Q{}", y, q),
            Period::Month(y, m) => write!(f, "{:04}-{:02}", y, m),
            Period::Week(y, w) => write!(f, "{:04}-W{:02}", y, w),
            Period::Day(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl PartialOrd for TimePeriod {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimePeriod {
    /// Periods order by start date; longer periods sort first on a tie
    fn cmp(&self, other: &Self) -> Ordering {
        self.start_date()
            .cmp(&other.start_date())
            .then_with(|| self.kind().cmp(&other.kind()))
    }
}
