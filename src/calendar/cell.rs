use ratatui::style::{Color, Modifier, Style};

/// The visual cell a day is bound to: a day-number label, a background behind
/// it, and an optional event icon.  Implementations may be recycled for
/// different dates, so binding always sets every property.
pub(crate) trait DaySurface {
    fn set_day_number(&mut self, day: u8);
    fn set_label_color(&mut self, color: Color);
    fn set_weight(&mut self, weight: Weight);
    fn set_background(&mut self, background: Background);
    /// `None` hides the icon slot
    fn set_icon(&mut self, icon: Option<char>);
    fn set_icon_opacity(&mut self, opacity: Opacity);
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum Weight {
    #[default]
    Normal,
    Bold,
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum Background {
    #[default]
    Transparent,
    /// A filled marker behind the label in the given color
    Circle(Color),
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum Opacity {
    #[default]
    Opaque,
    /// Low alpha; terminals render this as dimmed
    Faded,
}

/// A day cell as drawn by the terminal calendar widget
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DayCell {
    pub(crate) day: u8,
    pub(crate) label_color: Color,
    pub(crate) weight: Weight,
    pub(crate) background: Background,
    pub(crate) icon: Option<char>,
    pub(crate) icon_opacity: Opacity,
}

impl DayCell {
    pub(crate) fn label_style(&self) -> Style {
        let style = Style::new().fg(self.label_color);
        let style = match self.background {
            Background::Transparent => style,
            Background::Circle(color) => style.bg(color),
        };
        match self.weight {
            Weight::Normal => style,
            Weight::Bold => style.add_modifier(Modifier::BOLD),
        }
    }

    pub(crate) fn icon_style(&self) -> Style {
        match self.icon_opacity {
            Opacity::Opaque => Style::new(),
            Opacity::Faded => Style::new().add_modifier(Modifier::DIM),
        }
    }
}

impl Default for DayCell {
    fn default() -> DayCell {
        DayCell {
            day: 0,
            label_color: Color::Reset,
            weight: Weight::Normal,
            background: Background::Transparent,
            icon: None,
            icon_opacity: Opacity::Opaque,
        }
    }
}

impl DaySurface for DayCell {
    fn set_day_number(&mut self, day: u8) {
        self.day = day;
    }

    fn set_label_color(&mut self, color: Color) {
        self.label_color = color;
    }

    fn set_weight(&mut self, weight: Weight) {
        self.weight = weight;
    }

    fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    fn set_icon(&mut self, icon: Option<char>) {
        self.icon = icon;
    }

    fn set_icon_opacity(&mut self, opacity: Opacity) {
        self.icon_opacity = opacity;
    }
}
