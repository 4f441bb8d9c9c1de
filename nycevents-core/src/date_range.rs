//! Date ranges for querying events, and the month grid a calendar shows.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::constants::DEFAULT_LIST_DAYS;
use crate::error::{NycEventsError, NycEventsResult};
use crate::event::parse_timestamp;

/// Date range for filtering events on their start time.
/// None values mean unbounded in that direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl DateRange {
    /// Range covering whole days from `from` through `to`.
    pub fn days(from: NaiveDate, to: NaiveDate) -> Self {
        DateRange {
            from: Some(start_of_day(from)),
            to: Some(end_of_day(to)),
        }
    }

    /// Build a range from command-line style arguments.
    /// - Each bound is YYYY-MM-DD or a full timestamp
    /// - With neither bound given, covers `today` plus DEFAULT_LIST_DAYS
    /// - With one bound given, the other stays open
    pub fn from_args(from: Option<&str>, to: Option<&str>, today: NaiveDate) -> NycEventsResult<Self> {
        if from.is_none() && to.is_none() {
            return Ok(DateRange::days(today, today + Duration::days(DEFAULT_LIST_DAYS)));
        }

        Ok(DateRange {
            from: from.map(parse_range_start).transpose()?,
            to: to.map(parse_range_end).transpose()?,
        })
    }
}

/// Parse a lower bound. A bare date means the start of that day.
pub fn parse_range_start(s: &str) -> NycEventsResult<NaiveDateTime> {
    parse_bound(s, start_of_day)
}

/// Parse an upper bound. A bare date means the last second of that day.
pub fn parse_range_end(s: &str) -> NycEventsResult<NaiveDateTime> {
    parse_bound(s, end_of_day)
}

fn parse_bound(s: &str, on_date: fn(NaiveDate) -> NaiveDateTime) -> NycEventsResult<NaiveDateTime> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(on_date(date));
    }
    parse_timestamp(s).ok_or_else(|| {
        NycEventsError::InvalidDate(format!("'{}'. Expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS", s))
    })
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(23, 59, 59).unwrap_or_else(|| start_of_day(date))
}

/// The visible grid of a month calendar: whole Sunday-to-Saturday weeks
/// covering every day of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    first: NaiveDate,
    last: NaiveDate,
    grid_start: NaiveDate,
    grid_end: NaiveDate,
}

impl MonthWindow {
    /// Window for the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let next_month = if first.month() == 12 {
            NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
        };
        let last = next_month.and_then(|d| d.pred_opt()).unwrap_or(first);

        let grid_start = first - Duration::days(first.weekday().num_days_from_sunday() as i64);
        let grid_end = last + Duration::days(6 - last.weekday().num_days_from_sunday() as i64);

        MonthWindow {
            first,
            last,
            grid_start,
            grid_end,
        }
    }

    /// Parse a `YYYY-MM` month argument.
    pub fn parse(month: &str) -> NycEventsResult<Self> {
        NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
            .map(Self::containing)
            .map_err(|_| NycEventsError::InvalidDate(format!("'{}'. Expected YYYY-MM", month)))
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    /// Whether `date` belongs to this month (not just the grid).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first && date <= self.last
    }

    /// Every day of the grid, in weeks of seven.
    pub fn weeks(&self) -> Vec<Vec<NaiveDate>> {
        let days: Vec<NaiveDate> = self.grid_start.iter_days().take_while(|d| *d <= self.grid_end).collect();
        days.chunks(7).map(|week| week.to_vec()).collect()
    }

    /// Range to fetch when this month is shown: the whole grid.
    pub fn fetch_range(&self) -> DateRange {
        DateRange::days(self.grid_start, self.grid_end)
    }

    /// Title such as "March 2024".
    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_window_grid_covers_whole_weeks() {
        // March 2024 starts on a Friday and ends on a Sunday
        let window = MonthWindow::containing(date(2024, 3, 14));

        assert_eq!(window.first_day(), date(2024, 3, 1));
        assert_eq!(window.last_day(), date(2024, 3, 31));

        let weeks = window.weeks();
        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks[0][0], date(2024, 2, 25));
        assert_eq!(weeks[5][6], date(2024, 4, 6));
        assert!(weeks.iter().all(|w| w.len() == 7));

        let range = window.fetch_range();
        assert_eq!(range.from, Some(date(2024, 2, 25).and_hms_opt(0, 0, 0).unwrap()));
        assert_eq!(range.to, Some(date(2024, 4, 6).and_hms_opt(23, 59, 59).unwrap()));
    }

    #[test]
    fn test_month_window_december_rolls_over() {
        let window = MonthWindow::parse("2024-12").unwrap();
        assert_eq!(window.last_day(), date(2024, 12, 31));
        assert_eq!(window.title(), "December 2024");
        assert!(window.contains(date(2024, 12, 31)));
        assert!(!window.contains(date(2025, 1, 1)));
    }

    #[test]
    fn test_month_window_rejects_bad_month() {
        assert!(MonthWindow::parse("2024-13").is_err());
        assert!(MonthWindow::parse("March").is_err());
    }

    #[test]
    fn test_from_args_defaults_to_upcoming_week() {
        let range = DateRange::from_args(None, None, date(2024, 3, 6)).unwrap();
        assert_eq!(range.from, Some(date(2024, 3, 6).and_hms_opt(0, 0, 0).unwrap()));
        assert_eq!(range.to, Some(date(2024, 3, 13).and_hms_opt(23, 59, 59).unwrap()));
    }

    #[test]
    fn test_from_args_single_bound_stays_open() {
        let range = DateRange::from_args(None, Some("2024-03-31"), date(2024, 3, 6)).unwrap();
        assert_eq!(range.from, None);
        assert_eq!(range.to, Some(date(2024, 3, 31).and_hms_opt(23, 59, 59).unwrap()));
    }

    #[test]
    fn test_parse_bounds() {
        assert_eq!(
            parse_range_start("2024-03-01").unwrap(),
            date(2024, 3, 1).and_hms_opt(0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_range_end("2024-03-01T18:30:00").unwrap(),
            date(2024, 3, 1).and_hms_opt(18, 30, 0).unwrap()
        );
        assert!(matches!(
            parse_range_start("03/01/2024"),
            Err(NycEventsError::InvalidDate(_))
        ));
    }
}
