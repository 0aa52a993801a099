use super::cell::{Background, DaySurface, Opacity, Weight};
use super::page::MonthPage;
use super::selection::Selection;
use super::{CalendarMode, CalendarProperties};
use ratatui::style::Color;
use time::Date;

/// The visual category of a day cell.  Categories are mutually exclusive and
/// are tried in declaration order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DayKind {
    AnotherMonth,
    Selected,
    Disabled,
    Today,
    Event(Color),
    Highlighted,
    Normal,
}

/// Classification and styling rules for the days of one page
#[derive(Clone, Copy, Debug)]
pub(crate) struct DayRules<'a> {
    pub(super) props: &'a CalendarProperties,
    pub(super) page: MonthPage,
    pub(super) today: Date,
}

impl<'a> DayRules<'a> {
    pub(crate) fn new(props: &'a CalendarProperties, page: MonthPage, today: Date) -> Self {
        DayRules { props, page, today }
    }
}

impl DayRules<'_> {
    pub(crate) fn mode(&self) -> CalendarMode {
        self.props.mode
    }

    /// Whether a click on `date` may change the selection: the day must be in
    /// the page's month, within the date bounds, and not disabled
    pub(crate) fn is_selectable(&self, date: Date) -> bool {
        self.page.contains(date)
            && self.props.is_between_min_and_max(date)
            && self.props.is_active_day(date)
    }

    pub(crate) fn classify(&self, date: Date, selection: &Selection) -> DayKind {
        if !self.page.contains(date) {
            DayKind::AnotherMonth
        } else if self.mode().is_picker() && selection.contains(date) {
            DayKind::Selected
        } else if self.props.is_disabled(date) {
            DayKind::Disabled
        } else {
            self.current_month_kind(date)
        }
    }

    // Used both for fresh binds and for restyling a cell that has just lost
    // its selection
    fn current_month_kind(&self, date: Date) -> DayKind {
        if date == self.today {
            DayKind::Today
        } else if let Some(color) = self.props.event_label_color(date) {
            DayKind::Event(color)
        } else if self.props.highlighted_days.contains(&date) {
            DayKind::Highlighted
        } else {
            DayKind::Normal
        }
    }

    pub(crate) fn paint<S: DaySurface>(&self, kind: DayKind, cell: &mut S) {
        let palette = &self.props.palette;
        let (color, weight, background) = match kind {
            DayKind::AnotherMonth => (
                palette.another_month_labels,
                Weight::Normal,
                Background::Transparent,
            ),
            DayKind::Selected => (
                palette.selection_label,
                Weight::Normal,
                Background::Circle(palette.selection),
            ),
            DayKind::Disabled => (
                palette.disabled_labels,
                Weight::Normal,
                Background::Transparent,
            ),
            DayKind::Today => match palette.today_background {
                Some(bg) => (
                    palette.selection_label,
                    Weight::Normal,
                    Background::Circle(bg),
                ),
                None => (palette.today_label, Weight::Bold, Background::Transparent),
            },
            DayKind::Event(color) => (color, Weight::Normal, Background::Transparent),
            DayKind::Highlighted => (
                palette.highlighted_labels,
                Weight::Normal,
                Background::Transparent,
            ),
            DayKind::Normal => (
                palette.days_labels,
                Weight::Normal,
                Background::Transparent,
            ),
        };
        cell.set_label_color(color);
        cell.set_weight(weight);
        cell.set_background(background);
    }

    pub(crate) fn paint_selected<S: DaySurface>(&self, cell: &mut S) {
        self.paint(DayKind::Selected, cell);
    }

    pub(crate) fn paint_unselected<S: DaySurface>(&self, date: Date, cell: &mut S) {
        self.paint(self.current_month_kind(date), cell);
    }

    /// Binds `date`, shown at grid `position`, to a surface, reusing
    /// `recycled` if given.  Every visual property is recomputed.  If the day
    /// is drawn as selected, its selection entry is pointed at `position`.
    pub(crate) fn bind<S>(
        &self,
        date: Date,
        position: usize,
        recycled: Option<S>,
        selection: &mut Selection,
    ) -> S
    where
        S: DaySurface + Default,
    {
        let mut cell = recycled.unwrap_or_default();
        self.load_icon(date, &mut cell);
        let kind = self.classify(date, selection);
        if kind == DayKind::Selected {
            selection.attach(date, position);
        }
        self.paint(kind, &mut cell);
        cell.set_day_number(date.day());
        cell
    }

    fn load_icon<S: DaySurface>(&self, date: Date, cell: &mut S) {
        let event = match self.props.event_days {
            Some(_) if self.props.events_enabled => self.props.find_event(date),
            _ => None,
        };
        if let Some(event) = event {
            cell.set_icon(event.icon);
            cell.set_icon_opacity(
                if !self.page.contains(date) || self.props.is_disabled(date) {
                    Opacity::Faded
                } else {
                    Opacity::Opaque
                },
            );
        } else {
            cell.set_icon(None);
            cell.set_icon_opacity(Opacity::Opaque);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::cell::DayCell;
    use crate::calendar::{EventDay, Palette};
    use std::collections::BTreeSet;
    use time::macros::date;

    const TODAY: Date = date!(2025 - 01 - 22);

    fn properties(mode: CalendarMode) -> CalendarProperties {
        CalendarProperties {
            mode,
            minimum_date: Some(date!(2025 - 01 - 03)),
            maximum_date: Some(date!(2025 - 02 - 20)),
            disabled_days: BTreeSet::from([date!(2025 - 01 - 15), date!(2025 - 01 - 30)]),
            highlighted_days: BTreeSet::from([date!(2025 - 01 - 08), date!(2025 - 01 - 20)]),
            event_days: Some(vec![
                EventDay::new(date!(2025 - 01 - 20))
                    .icon('*')
                    .label_color(Color::Magenta),
                EventDay::new(date!(2025 - 01 - 15)).icon('!'),
                EventDay::new(date!(2025 - 01 - 01)).icon('#'),
                EventDay::new(date!(2025 - 01 - 11)).icon('+'),
                EventDay::new(date!(2025 - 02 - 01)).icon('%'),
            ]),
            ..CalendarProperties::default()
        }
    }

    fn rules(props: &CalendarProperties) -> DayRules<'_> {
        DayRules::new(props, MonthPage::containing(TODAY), TODAY)
    }

    fn selection_of(props: &CalendarProperties, dates: &[Date]) -> Selection {
        let props = CalendarProperties {
            selected_days: dates.to_vec(),
            ..props.clone()
        };
        Selection::from_properties(&props)
    }

    #[test]
    fn test_another_month_wins_over_everything() {
        let props = properties(CalendarMode::ManyDaysPicker);
        let selection = selection_of(&props, &[date!(2025 - 02 - 01)]);
        let rules = rules(&props);
        for date in [
            date!(2024 - 12 - 29),
            date!(2025 - 02 - 01),
            date!(2025 - 02 - 08),
        ] {
            assert_eq!(rules.classify(date, &selection), DayKind::AnotherMonth);
        }
    }

    #[test]
    fn test_selected_only_in_picker_modes() {
        for (mode, expected) in [
            (CalendarMode::Classic, DayKind::Normal),
            (CalendarMode::OneDayPicker, DayKind::Selected),
            (CalendarMode::ManyDaysPicker, DayKind::Selected),
            (CalendarMode::RangePicker, DayKind::Selected),
        ] {
            let props = properties(mode);
            let selection = selection_of(
                &properties(CalendarMode::ManyDaysPicker),
                &[date!(2025 - 01 - 10)],
            );
            assert_eq!(
                rules(&props).classify(date!(2025 - 01 - 10), &selection),
                expected,
                "mode {mode}"
            );
        }
    }

    #[test]
    fn test_priority_order() {
        let props = properties(CalendarMode::OneDayPicker);
        let rules = rules(&props);
        let selection = Selection::default();
        assert_eq!(
            rules.classify(date!(2025 - 01 - 15), &selection),
            DayKind::Disabled
        );
        assert_eq!(
            rules.classify(date!(2025 - 01 - 02), &selection),
            DayKind::Disabled
        );
        assert_eq!(rules.classify(TODAY, &selection), DayKind::Today);
        assert_eq!(
            rules.classify(date!(2025 - 01 - 20), &selection),
            DayKind::Event(Color::Magenta)
        );
        assert_eq!(
            rules.classify(date!(2025 - 01 - 08), &selection),
            DayKind::Highlighted
        );
        assert_eq!(
            rules.classify(date!(2025 - 01 - 11), &selection),
            DayKind::Normal
        );
    }

    #[test]
    fn test_today_style() {
        let props = properties(CalendarMode::Classic);
        let cell: DayCell = rules(&props).bind(TODAY, 24, None, &mut Selection::default());
        assert_eq!(cell.day, 22);
        assert_eq!(cell.label_color, props.palette.today_label);
        assert_eq!(cell.weight, Weight::Bold);
        assert_eq!(cell.background, Background::Transparent);
    }

    #[test]
    fn test_today_with_custom_background() {
        let props = CalendarProperties {
            palette: Palette {
                today_background: Some(Color::Rgb(0, 95, 135)),
                ..Palette::default()
            },
            ..properties(CalendarMode::Classic)
        };
        let cell: DayCell = rules(&props).bind(TODAY, 24, None, &mut Selection::default());
        assert_eq!(cell.label_color, props.palette.selection_label);
        assert_eq!(cell.weight, Weight::Normal);
        assert_eq!(cell.background, Background::Circle(Color::Rgb(0, 95, 135)));
    }

    #[test]
    fn test_event_label_color() {
        let props = properties(CalendarMode::Classic);
        let cell: DayCell =
            rules(&props).bind(date!(2025 - 01 - 20), 22, None, &mut Selection::default());
        assert_eq!(cell.label_color, Color::Magenta);
        assert_eq!(cell.weight, Weight::Normal);
        assert_eq!(cell.background, Background::Transparent);
        assert_eq!(cell.icon, Some('*'));
        assert_eq!(cell.icon_opacity, Opacity::Opaque);
    }

    #[test]
    fn test_selected_style_and_attachment() {
        let props = properties(CalendarMode::ManyDaysPicker);
        let mut selection = selection_of(&props, &[date!(2025 - 01 - 10)]);
        let cell: DayCell = rules(&props).bind(date!(2025 - 01 - 10), 12, None, &mut selection);
        assert_eq!(cell.label_color, props.palette.selection_label);
        assert_eq!(cell.background, Background::Circle(props.palette.selection));
        assert_eq!(cell.weight, Weight::Normal);
        assert_eq!(selection.days[0].date, date!(2025 - 01 - 10));
        assert_eq!(selection.days[0].cell, Some(12));
    }

    #[test]
    fn test_icons_fade_for_unavailable_days() {
        let props = properties(CalendarMode::Classic);
        let rules = rules(&props);
        let mut selection = Selection::default();
        for (date, position, glyph) in [
            (date!(2025 - 01 - 15), 17, '!'),
            (date!(2025 - 01 - 01), 3, '#'),
            (date!(2025 - 02 - 01), 34, '%'),
        ] {
            let cell: DayCell = rules.bind(date, position, None, &mut selection);
            assert_eq!(cell.icon, Some(glyph));
            assert_eq!(cell.icon_opacity, Opacity::Faded, "{date}");
        }
        let cell: DayCell = rules.bind(date!(2025 - 01 - 11), 13, None, &mut selection);
        assert_eq!(cell.icon, Some('+'));
        assert_eq!(cell.icon_opacity, Opacity::Opaque);
        let cell: DayCell = rules.bind(date!(2025 - 01 - 12), 14, None, &mut selection);
        assert_eq!(cell.icon, None);
    }

    #[test]
    fn test_icons_hidden_when_events_disabled() {
        let props = CalendarProperties {
            events_enabled: false,
            ..properties(CalendarMode::Classic)
        };
        let cell: DayCell =
            rules(&props).bind(date!(2025 - 01 - 20), 22, None, &mut Selection::default());
        assert_eq!(cell.icon, None);
        let props = CalendarProperties {
            event_days: None,
            ..properties(CalendarMode::Classic)
        };
        let cell: DayCell =
            rules(&props).bind(date!(2025 - 01 - 20), 22, None, &mut Selection::default());
        assert_eq!(cell.icon, None);
    }

    #[test]
    fn test_recycled_surface_is_fully_restyled() {
        let props = properties(CalendarMode::RangePicker);
        let rules = rules(&props);
        let mut selection = Selection::default();
        let stale: DayCell = rules.bind(TODAY, 24, None, &mut selection);
        let stale = DayCell {
            icon: Some('!'),
            icon_opacity: Opacity::Faded,
            ..stale
        };
        for (date, position) in [
            (date!(2025 - 01 - 12), 14),
            (date!(2025 - 01 - 20), 22),
            (date!(2025 - 02 - 03), 36),
        ] {
            let recycled: DayCell = rules.bind(date, position, Some(stale), &mut selection);
            let fresh: DayCell = rules.bind(date, position, None, &mut selection);
            assert_eq!(recycled, fresh, "{date}");
        }
    }

    #[test]
    fn test_paint_unselected_ignores_selection() {
        let props = properties(CalendarMode::OneDayPicker);
        let rules = rules(&props);
        let mut selection = selection_of(&props, &[date!(2025 - 01 - 08)]);
        let mut cell: DayCell = rules.bind(date!(2025 - 01 - 08), 10, None, &mut selection);
        assert_eq!(cell.background, Background::Circle(props.palette.selection));
        rules.paint_unselected(date!(2025 - 01 - 08), &mut cell);
        assert_eq!(cell.label_color, props.palette.highlighted_labels);
        assert_eq!(cell.background, Background::Transparent);
    }
}
