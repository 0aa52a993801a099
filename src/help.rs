use crate::calendar::CalendarMode;
use ratatui::{
    buffer::Buffer,
    layout::Flex,
    layout::{Alignment, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static TEXT: &[&str] = &[
    "h, LEFT         Move left one day",
    "l, RIGHT        Move right one day",
    "k, UP           Move up one week",
    "j, DOWN         Move down one week",
    "ENTER, SPACE    Click the day",
    "p, PAGE UP      Previous month",
    "n, PAGE DOWN    Next month",
    "0, HOME         Jump to today",
    "m               Change selection mode",
    "?               Show this help",
    "q, ESC          Quit",
];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help {
    pub(crate) style: Style,
    pub(crate) mode: CalendarMode,
}

impl Help {
    fn mode_hint(&self) -> &'static str {
        match self.mode {
            CalendarMode::Classic => "Clicks report the day without selecting it.",
            CalendarMode::OneDayPicker => "Clicking a day selects only that day.",
            CalendarMode::ManyDaysPicker => "Clicking a day toggles it.",
            CalendarMode::RangePicker => "Click the first and last days of a range.",
        }
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = TEXT.iter().map(|&s| Line::raw(s)).collect::<Vec<_>>();
        lines.push(Line::raw(""));
        lines.push(Line::raw(format!("Mode: {}", self.mode)));
        lines.push(Line::raw(self.mode_hint()));
        lines.push(Line::raw(""));
        lines.push(Line::raw("Press the Any Key to dismiss."));
        let text = Text::from(lines);
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.style);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        };
        Clear.render(outer_area, buf);
        Block::new().style(self.style).render(outer_area, buf);
        para.render(help_area, buf);
    }
}
