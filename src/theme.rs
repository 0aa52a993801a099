use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const DAY_LABEL_COLOR: Color = Color::White;

pub(crate) const ANOTHER_MONTH_LABEL_COLOR: Color = Color::DarkGray;

pub(crate) const DISABLED_LABEL_COLOR: Color = Color::LightRed;

pub(crate) const HIGHLIGHTED_LABEL_COLOR: Color = Color::LightCyan;

pub(crate) const TODAY_LABEL_COLOR: Color = Color::LightYellow;

pub(crate) const SELECTION_LABEL_COLOR: Color = Color::Black;

pub(crate) const SELECTION_COLOR: Color = Color::LightBlue;
