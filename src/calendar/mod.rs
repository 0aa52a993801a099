mod cell;
mod page;
mod selection;
mod styling;
mod view;
mod widget;
pub(crate) use self::selection::ClickOutcome;
pub(crate) use self::view::CalendarView;
pub(crate) use self::widget::{Calendar, CALENDAR_LINES};
use crate::theme;
use ratatui::style::Color;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use thiserror::Error;
use time::Date;

/// How clicks on day cells affect the selection
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum CalendarMode {
    /// Clicks only report the day; nothing is shown as selected
    #[default]
    Classic,
    OneDayPicker,
    ManyDaysPicker,
    RangePicker,
}

impl CalendarMode {
    pub(crate) fn is_picker(self) -> bool {
        self != CalendarMode::Classic
    }

    pub(crate) fn next(self) -> CalendarMode {
        match self {
            CalendarMode::Classic => CalendarMode::OneDayPicker,
            CalendarMode::OneDayPicker => CalendarMode::ManyDaysPicker,
            CalendarMode::ManyDaysPicker => CalendarMode::RangePicker,
            CalendarMode::RangePicker => CalendarMode::Classic,
        }
    }
}

impl fmt::Display for CalendarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalendarMode::Classic => "classic",
            CalendarMode::OneDayPicker => "one-day-picker",
            CalendarMode::ManyDaysPicker => "many-days-picker",
            CalendarMode::RangePicker => "range-picker",
        };
        f.write_str(name)
    }
}

impl FromStr for CalendarMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<CalendarMode, ParseModeError> {
        match s {
            "classic" => Ok(CalendarMode::Classic),
            "one-day" | "one-day-picker" => Ok(CalendarMode::OneDayPicker),
            "many-days" | "many-days-picker" => Ok(CalendarMode::ManyDaysPicker),
            "range" | "range-picker" => Ok(CalendarMode::RangePicker),
            _ => Err(ParseModeError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid calendar mode {0:?}; expected one of: classic, one-day, many-days, range")]
pub(crate) struct ParseModeError(String);

/// A day marked with an icon and/or a custom label color
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct EventDay {
    pub(crate) date: Date,
    pub(crate) icon: Option<char>,
    pub(crate) label_color: Option<Color>,
    /// Set when the day is clicked: `true` if the day is in the disabled set
    /// or outside the minimum/maximum dates.  Despite the name, this reports
    /// whether the day is unavailable.
    pub(crate) enabled: bool,
}

impl EventDay {
    pub(crate) fn new(date: Date) -> EventDay {
        EventDay {
            date,
            icon: None,
            label_color: None,
            enabled: true,
        }
    }

    pub(crate) fn icon(mut self, icon: char) -> EventDay {
        self.icon = Some(icon);
        self
    }

    pub(crate) fn label_color(mut self, color: Color) -> EventDay {
        self.label_color = Some(color);
        self
    }
}

/// Label colors and backgrounds for each kind of day cell
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Palette {
    pub(crate) days_labels: Color,
    pub(crate) another_month_labels: Color,
    pub(crate) disabled_labels: Color,
    pub(crate) highlighted_labels: Color,
    pub(crate) today_label: Color,
    /// When set, today is drawn on a circle of this color instead of in bold
    pub(crate) today_background: Option<Color>,
    pub(crate) selection_label: Color,
    pub(crate) selection: Color,
}

impl Default for Palette {
    fn default() -> Palette {
        Palette {
            days_labels: theme::DAY_LABEL_COLOR,
            another_month_labels: theme::ANOTHER_MONTH_LABEL_COLOR,
            disabled_labels: theme::DISABLED_LABEL_COLOR,
            highlighted_labels: theme::HIGHLIGHTED_LABEL_COLOR,
            today_label: theme::TODAY_LABEL_COLOR,
            today_background: None,
            selection_label: theme::SELECTION_LABEL_COLOR,
            selection: theme::SELECTION_COLOR,
        }
    }
}

/// Callback invoked synchronously with the clicked day on every click
#[derive(Clone)]
pub(crate) struct OnDayClick(Rc<dyn Fn(&EventDay)>);

impl OnDayClick {
    pub(crate) fn new<F>(func: F) -> OnDayClick
    where
        F: Fn(&EventDay) + 'static,
    {
        OnDayClick(Rc::new(func))
    }

    fn call(&self, event: &EventDay) {
        (self.0)(event);
    }
}

impl fmt::Debug for OnDayClick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OnDayClick(..)")
    }
}

#[derive(Clone, Debug)]
pub(crate) struct CalendarProperties {
    pub(crate) mode: CalendarMode,
    pub(crate) minimum_date: Option<Date>,
    pub(crate) maximum_date: Option<Date>,
    pub(crate) disabled_days: BTreeSet<Date>,
    pub(crate) highlighted_days: BTreeSet<Date>,
    /// `None` means no event list has been configured, which hides every
    /// icon slot
    pub(crate) event_days: Option<Vec<EventDay>>,
    pub(crate) events_enabled: bool,
    /// Maximum number of days in a range selection; 0 means unlimited
    pub(crate) maximum_days_range: usize,
    pub(crate) palette: Palette,
    /// Days selected when the calendar is first set up
    pub(crate) selected_days: Vec<Date>,
    pub(crate) on_day_click: Option<OnDayClick>,
}

impl CalendarProperties {
    pub(crate) fn is_between_min_and_max(&self, date: Date) -> bool {
        !(self.minimum_date.is_some_and(|min| date < min)
            || self.maximum_date.is_some_and(|max| date > max))
    }

    pub(crate) fn is_active_day(&self, date: Date) -> bool {
        !self.disabled_days.contains(&date)
    }

    /// Whether the day is drawn and reported as disabled: either explicitly
    /// disabled or out of bounds
    pub(crate) fn is_disabled(&self, date: Date) -> bool {
        !self.is_active_day(date) || !self.is_between_min_and_max(date)
    }

    /// Moves `date` into the minimum/maximum bounds
    pub(crate) fn clamp(&self, date: Date) -> Date {
        let date = self.minimum_date.map_or(date, |min| date.max(min));
        self.maximum_date.map_or(date, |max| date.min(max))
    }

    pub(crate) fn find_event(&self, date: Date) -> Option<&EventDay> {
        self.event_days.as_deref()?.iter().find(|e| e.date == date)
    }

    /// Returns the label color of the first event on `date` that has one
    pub(crate) fn event_label_color(&self, date: Date) -> Option<Color> {
        self.event_days
            .as_deref()?
            .iter()
            .filter(|e| e.date == date)
            .find_map(|e| e.label_color)
    }

    /// Reports a click on `date` to the registered callback, if any.  The
    /// callback gets the first event on `date`, or a bare event day if there
    /// is none.
    pub(crate) fn dispatch_click(&self, date: Date) {
        let Some(callback) = self.on_day_click.as_ref() else {
            return;
        };
        let mut event = self
            .find_event(date)
            .copied()
            .unwrap_or_else(|| EventDay::new(date));
        event.enabled = self.is_disabled(date);
        callback.call(&event);
    }
}

impl Default for CalendarProperties {
    fn default() -> CalendarProperties {
        CalendarProperties {
            mode: CalendarMode::default(),
            minimum_date: None,
            maximum_date: None,
            disabled_days: BTreeSet::new(),
            highlighted_days: BTreeSet::new(),
            event_days: None,
            events_enabled: true,
            maximum_days_range: 0,
            palette: Palette::default(),
            selected_days: Vec::new(),
            on_day_click: None,
        }
    }
}
