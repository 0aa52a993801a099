use super::cell::DayCell;
use super::page::DAYS_IN_WEEK;
use super::view::CalendarView;
use crate::theme::{TITLE_STYLE, WEEKDAY_STYLE};
use ratatui::{prelude::*, widgets::*};

static HEADER: &str = " Su    Mo    Tu    We    Th    Fr    Sa";

/// Number of columns per day of week: the four-column label followed by the
/// icon slot and a space
const DAY_WIDTH: u16 = 6;

/// Column of a day's icon, relative to the left edge of the day
const ICON_OFFSET: u16 = 4;

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = DAY_WIDTH * 7;

/// Number of lines taken up by the title, the header, and its rule
const HEADER_LINES: u16 = 3;

/// Number of lines taken up by each week of the calendar
const WEEK_LINES: u16 = 2;

/// Number of lines needed to draw a whole page
pub(crate) const CALENDAR_LINES: u16 = HEADER_LINES + WEEK_LINES * 6;

const ACS_HLINE: char = '─';

/// Draws the page of a [`CalendarView`] as a grid of day cells, with the cell
/// under the cursor in brackets
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Calendar;

impl StatefulWidget for Calendar {
    type State = CalendarView;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(left),
                Constraint::Length(MAIN_WIDTH.min(area.width)),
                Constraint::Min(0),
            ])
            .split(area);
        let area = chunks[1];
        let page = state.page();
        let cursor = state.cursor();
        let cells = state.ensure_cells();
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(format!("{} {}", page.month(), page.year()));
        canvas.draw_header();
        for (position, cell) in cells.iter().enumerate() {
            let Ok(week_no) = u16::try_from(position / DAYS_IN_WEEK) else {
                break;
            };
            let Ok(wd) = u16::try_from(position % DAYS_IN_WEEK) else {
                break;
            };
            canvas.draw_day(week_no, wd, cell, position == cursor);
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: String) {
        let width = u16::try_from(title.len()).unwrap_or(MAIN_WIDTH);
        let x = MAIN_WIDTH.saturating_sub(width) / 2;
        self.mvprint(0, x, title, Some(TITLE_STYLE));
    }

    fn draw_header(&mut self) {
        self.mvprint(1, 0, HEADER, Some(WEEKDAY_STYLE));
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, week_no: u16, wd: u16, cell: &DayCell, under_cursor: bool) {
        let y = week_no * WEEK_LINES + HEADER_LINES;
        let x = DAY_WIDTH * wd;
        let label = if under_cursor {
            format!("[{:>2}]", cell.day)
        } else {
            format!(" {:>2} ", cell.day)
        };
        self.mvprint(y, x, label, Some(cell.label_style()));
        if let Some(icon) = cell.icon {
            self.mvprint(y, x + ICON_OFFSET, icon.to_string(), Some(cell.icon_style()));
        }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{CalendarMode, CalendarProperties, EventDay};
    use crate::theme::SELECTION_COLOR;
    use std::collections::BTreeSet;
    use time::macros::date;

    fn rows(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn test_render_page() {
        let mut view = CalendarView::new(
            date!(2025 - 01 - 22),
            CalendarProperties {
                mode: CalendarMode::ManyDaysPicker,
                event_days: Some(vec![EventDay::new(date!(2025 - 01 - 09)).icon('*')]),
                selected_days: vec![date!(2025 - 01 - 14)],
                disabled_days: BTreeSet::from([date!(2025 - 01 - 15)]),
                ..CalendarProperties::default()
            },
        );
        let area = Rect::new(0, 0, MAIN_WIDTH, CALENDAR_LINES);
        let mut buffer = Buffer::empty(area);
        Calendar.render(area, &mut buffer, &mut view);
        assert_eq!(
            rows(&buffer),
            [
                "               January 2025               ",
                " Su    Mo    Tu    We    Th    Fr    Sa   ",
                "──────────────────────────────────────────",
                " 29    30    31     1     2     3     4   ",
                "                                          ",
                "  5     6     7     8     9*   10    11   ",
                "                                          ",
                " 12    13    14    15    16    17    18   ",
                "                                          ",
                " 19    20    21   [22]   23    24    25   ",
                "                                          ",
                " 26    27    28    29    30    31     1   ",
                "                                          ",
                "  2     3     4     5     6     7     8   ",
                "                                          ",
            ]
        );
        // 2025-01-14 is selected
        assert_eq!(buffer[(12, 7)].style().bg, Some(SELECTION_COLOR));
        assert_eq!(buffer[(18, 7)].style().bg, Some(Color::Reset));
    }

    #[test]
    fn test_render_narrow_area_truncates() {
        let mut view = CalendarView::new(date!(2025 - 01 - 22), CalendarProperties::default());
        let area = Rect::new(0, 0, 20, 4);
        let mut buffer = Buffer::empty(area);
        Calendar.render(area, &mut buffer, &mut view);
        assert_eq!(
            rows(&buffer),
            [
                "               Janua",
                " Su    Mo    Tu    W",
                "────────────────────",
                " 29    30    31     ",
            ]
        );
    }
}
