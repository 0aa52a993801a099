use super::cell::DayCell;
use super::page::{MonthPage, DAYS_IN_WEEK, PAGE_DAYS};
use super::selection::{ClickOutcome, Selection};
use super::styling::DayRules;
use super::{CalendarProperties, OnDayClick};
use std::mem;
use thiserror::Error;
use time::Date;

/// State of the calendar widget: the configuration, the selection, the page
/// on display with its bound cells, and the cursor used to click cells
#[derive(Clone, Debug)]
pub(crate) struct CalendarView {
    pub(super) today: Date,
    props: CalendarProperties,
    selection: Selection,
    page: MonthPage,
    cells: Vec<DayCell>,
    cursor: usize,
    stale: bool,
}

impl CalendarView {
    pub(crate) fn new(today: Date, props: CalendarProperties) -> Self {
        let start = props.clamp(today);
        let page = MonthPage::containing(start);
        CalendarView {
            today,
            selection: Selection::from_properties(&props),
            props,
            page,
            cells: Vec::with_capacity(PAGE_DAYS),
            cursor: page.position_of(start).unwrap_or(0),
            stale: true,
        }
    }

    /// Shows the page containing `date` (moved into the date bounds) instead
    /// of today's
    pub(crate) fn start_date(mut self, date: Date) -> Self {
        self.show_date(self.props.clamp(date));
        self
    }

    pub(crate) fn on_day_click(mut self, callback: OnDayClick) -> Self {
        self.props.on_day_click = Some(callback);
        self
    }

    pub(crate) fn properties(&self) -> &CalendarProperties {
        &self.props
    }

    /// Replaces the configuration.  The selection is reset to the configured
    /// initial selection and the page is moved into the new date bounds.
    pub(crate) fn set_properties(&mut self, props: CalendarProperties) {
        self.selection = Selection::from_properties(&props);
        self.props = props;
        let page = self.page;
        if !self.props.is_between_min_and_max(page.first_day())
            && !self.props.is_between_min_and_max(page.last_day())
        {
            self.show_date(self.props.clamp(page.first_day()));
        }
        self.stale = true;
    }

    pub(crate) fn page(&self) -> MonthPage {
        self.page
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn cursor_date(&self) -> Option<Date> {
        self.page.date_at(self.cursor)
    }

    pub(crate) fn selected_dates(&self) -> Vec<Date> {
        self.selection.dates()
    }

    /// Returns the cells of the current page, binding them first if anything
    /// they depend on has changed
    pub(super) fn ensure_cells(&mut self) -> &[DayCell] {
        if self.stale {
            let rules = DayRules::new(&self.props, self.page, self.today);
            self.selection.detach_cells();
            let mut recycled = mem::take(&mut self.cells).into_iter();
            for (position, date) in self.page.dates().enumerate() {
                let cell = rules.bind(date, position, recycled.next(), &mut self.selection);
                self.cells.push(cell);
            }
            self.stale = false;
        }
        &self.cells
    }

    /// Clicks the cell under the cursor: reports the day to the click
    /// callback, then applies the selection mode
    pub(crate) fn click(&mut self) -> ClickOutcome {
        let Some(date) = self.cursor_date() else {
            return ClickOutcome::Ignored;
        };
        self.ensure_cells();
        self.props.dispatch_click(date);
        let rules = DayRules::new(&self.props, self.page, self.today);
        let outcome = self
            .selection
            .click(&rules, date, self.cursor, &mut self.cells);
        log::debug!(
            "clicked {date} in {} mode: {outcome:?}; {} day(s) selected",
            self.props.mode,
            self.selection.len()
        );
        if outcome.needs_rebind() {
            self.stale = true;
        }
        outcome
    }

    pub(crate) fn cursor_left(&mut self) -> Result<(), CursorError> {
        self.move_cursor(self.cursor.checked_sub(1))
    }

    pub(crate) fn cursor_right(&mut self) -> Result<(), CursorError> {
        self.move_cursor(self.cursor.checked_add(1))
    }

    pub(crate) fn cursor_up(&mut self) -> Result<(), CursorError> {
        self.move_cursor(self.cursor.checked_sub(DAYS_IN_WEEK))
    }

    pub(crate) fn cursor_down(&mut self) -> Result<(), CursorError> {
        self.move_cursor(self.cursor.checked_add(DAYS_IN_WEEK))
    }

    fn move_cursor(&mut self, position: Option<usize>) -> Result<(), CursorError> {
        match position {
            Some(pos) if self.page.date_at(pos).is_some() => {
                self.cursor = pos;
                Ok(())
            }
            _ => Err(CursorError),
        }
    }

    pub(crate) fn one_page_forwards(&mut self) -> Result<(), PageLimitError> {
        let next = self.page.next().ok_or(PageLimitError)?;
        if self
            .props
            .maximum_date
            .is_some_and(|max| next.first_day() > max)
        {
            return Err(PageLimitError);
        }
        self.show_page(next);
        Ok(())
    }

    pub(crate) fn one_page_backwards(&mut self) -> Result<(), PageLimitError> {
        let previous = self.page.previous().ok_or(PageLimitError)?;
        if self
            .props
            .minimum_date
            .is_some_and(|min| previous.last_day() < min)
        {
            return Err(PageLimitError);
        }
        self.show_page(previous);
        Ok(())
    }

    pub(crate) fn jump_to_today(&mut self) {
        self.show_date(self.props.clamp(self.today));
    }

    fn show_date(&mut self, date: Date) {
        let page = MonthPage::containing(date);
        if page != self.page {
            self.page = page;
            self.stale = true;
        }
        self.cursor = page.position_of(date).unwrap_or(0);
    }

    fn show_page(&mut self, page: MonthPage) {
        log::debug!("showing {} {}", page.month(), page.year());
        self.page = page;
        self.cursor = page.position_of(page.first_day()).unwrap_or(0);
        self.stale = true;
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("no more months within the date bounds")]
pub(crate) struct PageLimitError;

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("cursor cannot leave the page")]
pub(crate) struct CursorError;
