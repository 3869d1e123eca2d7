//! Partial calendar points and the concrete day spans they resolve to.

use chrono::{Duration, NaiveDate};

/// How specific a [`DateSelection`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    #[default]
    Unset,
    Year,
    Month,
    Day,
}

/// A partially-specified calendar point.
///
/// A selection is built by drilling year, then month, then day, and may stop
/// at any level. Months are 1-12 and days 1-31, chrono's convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateSelection {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub precision: Precision,
}

impl DateSelection {
    pub fn year(year: i32) -> Self {
        Self {
            year: Some(year),
            month: None,
            day: None,
            precision: Precision::Year,
        }
    }

    pub fn month(year: i32, month: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: None,
            precision: Precision::Month,
        }
    }

    pub fn day(year: i32, month: u32, day: u32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            precision: Precision::Day,
        }
    }

    pub fn is_set(&self) -> bool {
        self.precision != Precision::Unset
    }

    /// The earliest day this selection covers, or `None` when unset.
    ///
    /// A year selection starts at Jan 1, a month selection at day 1, a day
    /// selection at that exact day.
    pub fn range_start(&self) -> Option<NaiveDate> {
        match self.precision {
            Precision::Unset => None,
            Precision::Year => NaiveDate::from_ymd_opt(self.year?, 1, 1),
            Precision::Month => NaiveDate::from_ymd_opt(self.year?, self.month?, 1),
            Precision::Day => NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?),
        }
    }

    /// The latest day this selection covers, or `None` when unset.
    ///
    /// A year selection ends at Dec 31, a month selection at the last day of
    /// that month, a day selection at that exact day.
    pub fn range_end(&self) -> Option<NaiveDate> {
        match self.precision {
            Precision::Unset => None,
            Precision::Year => NaiveDate::from_ymd_opt(self.year?, 12, 31),
            Precision::Month => last_day_of_month(self.year?, self.month?),
            Precision::Day => NaiveDate::from_ymd_opt(self.year?, self.month?, self.day?),
        }
    }
}

/// The last calendar day of the given month, or `None` for an invalid month.
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;
    // Also validates `month` itself.
    NaiveDate::from_ymd_opt(year, month, 1)?;
    Some(first_of_next - Duration::days(1))
}

/// Number of days in the given month, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    use chrono::Datelike;
    last_day_of_month(year, month).map(|d| d.day())
}

/// A resolved span of concrete calendar days, inclusive on both sides.
///
/// `None` on either side leaves that side open: an open-started range
/// matches everything up to `end`, an open-ended one everything from
/// `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Resolves a `from`/`to` selection pair into one range.
    ///
    /// The `from` side resolves to its earliest covered day and the `to`
    /// side to its latest, so a year-precision `from` of 2024 and a
    /// month-precision `to` of Jun 2024 span Jan 1 through Jun 30.
    pub fn resolve(from: &DateSelection, to: &DateSelection) -> Self {
        Self {
            start: from.range_start(),
            end: to.range_end(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}

/// Parses a custom-range endpoint token into a [`DateSelection`].
///
/// Accepted forms, matching the graduated precision of the picker:
/// `YYYY`, `YYYY-MM`, and `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// # use transpara_core::selection::{parse_selection_token, Precision};
/// let sel = parse_selection_token("2024-06").unwrap();
/// assert_eq!(sel.year, Some(2024));
/// assert_eq!(sel.month, Some(6));
/// assert_eq!(sel.precision, Precision::Month);
///
/// assert!(parse_selection_token("2024-13").is_none());
/// ```
pub fn parse_selection_token(s: &str) -> Option<DateSelection> {
    let parts: Vec<&str> = s.trim().split('-').collect();
    match parts.as_slice() {
        [y] => {
            let year = y.parse::<i32>().ok()?;
            NaiveDate::from_ymd_opt(year, 1, 1)?;
            Some(DateSelection::year(year))
        }
        [y, m] => {
            let year = y.parse::<i32>().ok()?;
            let month = m.parse::<u32>().ok()?;
            NaiveDate::from_ymd_opt(year, month, 1)?;
            Some(DateSelection::month(year, month))
        }
        [y, m, d] => {
            let year = y.parse::<i32>().ok()?;
            let month = m.parse::<u32>().ok()?;
            let day = d.parse::<u32>().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)?;
            Some(DateSelection::day(year, month, day))
        }
        _ => None,
    }
}
