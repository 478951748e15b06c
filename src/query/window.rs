//! Named date windows anchored to "now"
//!
//! Calendar windows (today, month, quarter, year) start at local midnight in
//! the configured UTC offset. The week window is rolling: the last 7 days.

use std::fmt;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

use super::errors::{QueryResult, ValidationError};

/// Inclusive lower bound on record timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateWindow {
    #[default]
    All,
    Today,
    Week,
    Month,
    Quarter,
    Year,
}

impl DateWindow {
    /// Parses a window name; `field` names the descriptor field for errors
    pub fn parse(field: &str, value: &str) -> QueryResult<Self> {
        match value {
            "all" => Ok(DateWindow::All),
            "today" => Ok(DateWindow::Today),
            "week" | "this-week" => Ok(DateWindow::Week),
            "month" | "this-month" => Ok(DateWindow::Month),
            "quarter" | "this-quarter" => Ok(DateWindow::Quarter),
            "year" | "this-year" => Ok(DateWindow::Year),
            other => Err(ValidationError::unknown_date_range(field, other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DateWindow::All => "all",
            DateWindow::Today => "today",
            DateWindow::Week => "week",
            DateWindow::Month => "month",
            DateWindow::Quarter => "quarter",
            DateWindow::Year => "year",
        }
    }

    /// Returns the window start, or `None` when the window is unbounded
    pub fn start(&self, now: DateTime<Utc>, offset: FixedOffset) -> Option<DateTime<Utc>> {
        let today = now.with_timezone(&offset).date_naive();

        let first_day = match self {
            DateWindow::All => return None,
            DateWindow::Week => return Some(now - Duration::days(7)),
            DateWindow::Today => today,
            DateWindow::Month => NaiveDate::from_ymd_opt(today.year(), today.month(), 1)?,
            DateWindow::Quarter => {
                let quarter_month = (today.month0() / 3) * 3 + 1;
                NaiveDate::from_ymd_opt(today.year(), quarter_month, 1)?
            }
            DateWindow::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1)?,
        };

        local_midnight(first_day, offset)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Start of the calendar month containing `now`, in UTC
pub fn month_start(now: DateTime<Utc>, offset: FixedOffset) -> DateTime<Utc> {
    // A fixed offset has no gaps, so a month start always resolves
    DateWindow::Month.start(now, offset).unwrap_or(now)
}

fn local_midnight(day: NaiveDate, offset: FixedOffset) -> Option<DateTime<Utc>> {
    let naive = day.and_hms_opt(0, 0, 0)?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
}
