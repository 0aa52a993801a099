use super::cell::DaySurface;
use super::page::days_between;
use super::styling::DayRules;
use super::{CalendarMode, CalendarProperties};
use std::mem;
use time::Date;

/// A selected date.  `cell` is the grid position of the surface showing it,
/// valid only until the page is next bound.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SelectedDay {
    pub(crate) date: Date,
    pub(crate) cell: Option<usize>,
}

impl SelectedDay {
    fn new(date: Date) -> SelectedDay {
        SelectedDay { date, cell: None }
    }

    fn at(date: Date, position: usize) -> SelectedDay {
        SelectedDay {
            date,
            cell: Some(position),
        }
    }
}

/// What a click did to the selection
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ClickOutcome {
    /// The day cannot be selected, or the click would not change anything
    Ignored,
    /// Classic mode: the day became the last-clicked marker
    Marked,
    Selected,
    Deselected,
    /// The second end of a range was accepted
    RangeCompleted,
    /// The range would have reached the maximum length.  The days between
    /// the two ends were still added, but the clicked end was not.
    RangeRejected,
}

impl ClickOutcome {
    /// Whether every cell of the page needs to be bound again
    pub(crate) fn needs_rebind(self) -> bool {
        matches!(
            self,
            ClickOutcome::RangeCompleted | ClickOutcome::RangeRejected
        )
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Selection {
    // Insertion order; in range mode the first entry is the anchor
    pub(super) days: Vec<SelectedDay>,
}

impl Selection {
    /// Builds the initial selection from the configured selected days,
    /// dropping those that are disabled or out of bounds.  In range mode the
    /// earliest and latest of them become the ends of the range.
    pub(crate) fn from_properties(props: &CalendarProperties) -> Selection {
        let mut selection = Selection::default();
        let mut valid = props
            .selected_days
            .iter()
            .copied()
            .filter(|&date| props.is_between_min_and_max(date) && props.is_active_day(date));
        match props.mode {
            CalendarMode::Classic => (),
            CalendarMode::OneDayPicker => {
                if let Some(date) = valid.next() {
                    selection.insert(SelectedDay::new(date));
                }
            }
            CalendarMode::ManyDaysPicker => {
                for date in valid {
                    selection.insert(SelectedDay::new(date));
                }
            }
            CalendarMode::RangePicker => {
                let ends = valid.fold(None, |ends: Option<(Date, Date)>, date| {
                    Some(ends.map_or((date, date), |(first, last)| {
                        (date.min(first), date.max(last))
                    }))
                });
                if let Some((first, last)) = ends {
                    selection.preselect_range(props, first, last);
                }
            }
        }
        selection
    }

    // `first` and `last` are both selectable
    fn preselect_range(&mut self, props: &CalendarProperties, first: Date, last: Date) {
        let between = days_between(first, last).collect::<Vec<_>>();
        let length = if first == last { 1 } else { between.len() + 2 };
        let limit = props.maximum_days_range;
        if limit != 0 && length >= limit {
            log::warn!(
                "initial range {first}..={last} spans {length} days; limit is {limit}; \
                 starting with nothing selected"
            );
            return;
        }
        self.insert(SelectedDay::new(first));
        for day in between {
            if props.is_active_day(day) {
                self.insert(SelectedDay::new(day));
            }
        }
        self.insert(SelectedDay::new(last));
    }

    pub(crate) fn len(&self) -> usize {
        self.days.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        self.days.iter().any(|sd| sd.date == date)
    }

    /// The selected dates in ascending order
    pub(crate) fn dates(&self) -> Vec<Date> {
        let mut dates = self.days.iter().map(|sd| sd.date).collect::<Vec<_>>();
        dates.sort_unstable();
        dates
    }

    pub(super) fn attach(&mut self, date: Date, position: usize) {
        if let Some(sd) = self.days.iter_mut().find(|sd| sd.date == date) {
            sd.cell = Some(position);
        }
    }

    pub(super) fn detach_cells(&mut self) {
        for sd in &mut self.days {
            sd.cell = None;
        }
    }

    fn insert(&mut self, day: SelectedDay) {
        if !self.contains(day.date) {
            self.days.push(day);
        }
    }

    fn replace(&mut self, day: SelectedDay) {
        self.days.clear();
        self.days.push(day);
    }

    /// Applies a click on `date`, shown at grid `position` of the page that
    /// `cells` were bound for, according to the calendar mode.  Cells whose
    /// selection state changes are restyled in place.
    pub(crate) fn click<S: DaySurface>(
        &mut self,
        rules: &DayRules<'_>,
        date: Date,
        position: usize,
        cells: &mut [S],
    ) -> ClickOutcome {
        match rules.mode() {
            CalendarMode::Classic => {
                self.replace(SelectedDay::at(date, position));
                ClickOutcome::Marked
            }
            CalendarMode::OneDayPicker => self.select_one_day(rules, date, position, cells),
            CalendarMode::ManyDaysPicker => self.toggle_day(rules, date, position, cells),
            CalendarMode::RangePicker => self.select_range(rules, date, position, cells),
        }
    }

    fn select_one_day<S: DaySurface>(
        &mut self,
        rules: &DayRules<'_>,
        date: Date,
        position: usize,
        cells: &mut [S],
    ) -> ClickOutcome {
        if self.contains(date) || !rules.is_selectable(date) {
            return ClickOutcome::Ignored;
        }
        let previous = mem::take(&mut self.days);
        self.start(rules, date, position, cells);
        for sd in previous {
            restyle_unselected(rules, sd, cells);
        }
        ClickOutcome::Selected
    }

    fn toggle_day<S: DaySurface>(
        &mut self,
        rules: &DayRules<'_>,
        date: Date,
        position: usize,
        cells: &mut [S],
    ) -> ClickOutcome {
        if !rules.is_selectable(date) {
            return ClickOutcome::Ignored;
        }
        if self.contains(date) {
            self.days.retain(|sd| sd.date != date);
            restyle_unselected(rules, SelectedDay::at(date, position), cells);
            ClickOutcome::Deselected
        } else {
            if let Some(cell) = cells.get_mut(position) {
                rules.paint_selected(cell);
            }
            self.days.push(SelectedDay::at(date, position));
            ClickOutcome::Selected
        }
    }

    fn select_range<S: DaySurface>(
        &mut self,
        rules: &DayRules<'_>,
        date: Date,
        position: usize,
        cells: &mut [S],
    ) -> ClickOutcome {
        if !rules.is_selectable(date) {
            return ClickOutcome::Ignored;
        }
        if self.len() > 1 {
            for sd in mem::take(&mut self.days) {
                restyle_unselected(rules, sd, cells);
            }
        }
        if let Some(anchor) = self.days.first().map(|sd| sd.date) {
            self.extend_range(rules, anchor, date, position, cells)
        } else {
            self.start(rules, date, position, cells);
            ClickOutcome::Selected
        }
    }

    fn extend_range<S: DaySurface>(
        &mut self,
        rules: &DayRules<'_>,
        anchor: Date,
        date: Date,
        position: usize,
        cells: &mut [S],
    ) -> ClickOutcome {
        if anchor == date {
            return ClickOutcome::Ignored;
        }
        // Both ends plus everything in between
        let mut length = 2;
        for day in days_between(anchor, date) {
            length += 1;
            if rules.props.is_active_day(day) {
                self.insert(SelectedDay::new(day));
            }
        }
        let limit = rules.props.maximum_days_range;
        if limit != 0 && length >= limit {
            log::debug!("range {anchor}..={date} spans {length} days; limit is {limit}");
            return ClickOutcome::RangeRejected;
        }
        if let Some(cell) = cells.get_mut(position) {
            rules.paint_selected(cell);
        }
        self.insert(SelectedDay::at(date, position));
        ClickOutcome::RangeCompleted
    }

    // Makes `date` the only selected day
    fn start<S: DaySurface>(
        &mut self,
        rules: &DayRules<'_>,
        date: Date,
        position: usize,
        cells: &mut [S],
    ) {
        if let Some(cell) = cells.get_mut(position) {
            rules.paint_selected(cell);
        }
        self.replace(SelectedDay::at(date, position));
    }
}

fn restyle_unselected<S: DaySurface>(rules: &DayRules<'_>, day: SelectedDay, cells: &mut [S]) {
    if let Some(cell) = day.cell.and_then(|pos| cells.get_mut(pos)) {
        rules.paint_unselected(day.date, cell);
    }
}
