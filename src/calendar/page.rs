use std::iter::successors;
use time::{Date, Duration, Month};

/// Number of days in a month page: six Sunday-first weeks
pub(crate) const PAGE_DAYS: usize = 42;

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// The month shown by one page of the calendar, together with the Sunday on
/// which its grid starts.  Days of the neighboring months fill the rest of the
/// grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthPage {
    first: Date,
    grid_start: Date,
}

impl MonthPage {
    pub(crate) fn containing(date: Date) -> MonthPage {
        let first = date.replace_day(1).unwrap_or(date);
        let lead = Duration::days(first.weekday().number_days_from_sunday().into());
        // At the very beginning of time the grid cannot reach back to a
        // Sunday, so it starts on the earliest representable date instead.
        let grid_start = first.checked_sub(lead).unwrap_or(Date::MIN);
        MonthPage { first, grid_start }
    }

    pub(crate) fn year(&self) -> i32 {
        self.first.year()
    }

    pub(crate) fn month(&self) -> Month {
        self.first.month()
    }

    /// Whether `date` belongs to the page's month (as opposed to being a
    /// grayed day of a neighboring month)
    pub(crate) fn contains(&self, date: Date) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    pub(crate) fn first_day(&self) -> Date {
        self.first
    }

    pub(crate) fn last_day(&self) -> Date {
        successors(Some(self.first), |d| d.next_day())
            .take_while(|&d| self.contains(d))
            .last()
            .unwrap_or(self.first)
    }

    /// The dates of the grid in display order.  Yields fewer than
    /// [`PAGE_DAYS`] items only at the end of time.
    pub(crate) fn dates(&self) -> impl Iterator<Item = Date> {
        successors(Some(self.grid_start), |d| d.next_day()).take(PAGE_DAYS)
    }

    pub(crate) fn date_at(&self, position: usize) -> Option<Date> {
        self.dates().nth(position)
    }

    pub(crate) fn position_of(&self, date: Date) -> Option<usize> {
        self.dates().position(|d| d == date)
    }

    pub(crate) fn next(&self) -> Option<MonthPage> {
        self.last_day().next_day().map(MonthPage::containing)
    }

    pub(crate) fn previous(&self) -> Option<MonthPage> {
        self.first_day().previous_day().map(MonthPage::containing)
    }
}

/// Iterates over the days strictly between `a` and `b`, in ascending order,
/// regardless of which of the two comes first
pub(crate) fn days_between(a: Date, b: Date) -> impl Iterator<Item = Date> {
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    successors(start.next_day(), |d| d.next_day()).take_while(move |&d| d < end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_grid_starts_on_sunday() {
        let page = MonthPage::containing(date!(2023 - 11 - 16));
        assert_eq!(page.year(), 2023);
        assert_eq!(page.month(), Month::November);
        let dates = page.dates().collect::<Vec<_>>();
        assert_eq!(dates.len(), PAGE_DAYS);
        assert_eq!(dates[0], date!(2023 - 10 - 29));
        assert_eq!(dates[3], date!(2023 - 11 - 01));
        assert_eq!(dates[PAGE_DAYS - 1], date!(2023 - 12 - 09));
    }

    #[test]
    fn test_month_starting_on_sunday() {
        let page = MonthPage::containing(date!(2023 - 10 - 31));
        assert_eq!(page.date_at(0), Some(date!(2023 - 10 - 01)));
        assert_eq!(page.position_of(date!(2023 - 10 - 31)), Some(30));
        assert_eq!(page.first_day(), date!(2023 - 10 - 01));
        assert_eq!(page.last_day(), date!(2023 - 10 - 31));
    }

    #[test]
    fn test_contains() {
        let page = MonthPage::containing(date!(2025 - 01 - 22));
        assert!(page.contains(date!(2025 - 01 - 01)));
        assert!(page.contains(date!(2025 - 01 - 31)));
        assert!(!page.contains(date!(2024 - 12 - 31)));
        assert!(!page.contains(date!(2025 - 02 - 01)));
        assert!(!page.contains(date!(2024 - 01 - 15)));
        assert_eq!(page.position_of(date!(2025 - 01 - 10)), Some(12));
        assert_eq!(page.position_of(date!(2025 - 03 - 10)), None);
        assert_eq!(page.date_at(PAGE_DAYS), None);
    }

    #[test]
    fn test_next_and_previous_across_years() {
        let page = MonthPage::containing(date!(2024 - 12 - 05));
        let next = page.next().unwrap();
        assert_eq!((next.year(), next.month()), (2025, Month::January));
        let back = next.previous().unwrap();
        assert_eq!(back, page);
    }

    #[test]
    fn test_days_between() {
        let days = days_between(date!(2025 - 01 - 10), date!(2025 - 01 - 13)).collect::<Vec<_>>();
        assert_eq!(days, [date!(2025 - 01 - 11), date!(2025 - 01 - 12)]);
        let reversed =
            days_between(date!(2025 - 01 - 13), date!(2025 - 01 - 10)).collect::<Vec<_>>();
        assert_eq!(reversed, days);
        assert_eq!(
            days_between(date!(2025 - 01 - 10), date!(2025 - 01 - 11)).count(),
            0
        );
        assert_eq!(
            days_between(date!(2025 - 01 - 10), date!(2025 - 01 - 10)).count(),
            0
        );
    }
}
