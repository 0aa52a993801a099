use crate::calendar::{CalendarMode, CalendarProperties, EventDay, Palette};
use crate::YMD_FMT;
use ratatui::style::{Color, ParseColorError};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::Date;

/// Calendar settings as read from a TOML file.  Dates are written as
/// `YYYY-MM-DD` and colors as anything ratatui can parse (`"light-blue"`,
/// `"#005f87"`, `"42"`).
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub(crate) struct Config {
    mode: CalendarMode,
    minimum_date: Option<String>,
    maximum_date: Option<String>,
    disabled_days: Vec<String>,
    highlighted_days: Vec<String>,
    selected_days: Vec<String>,
    maximum_days_range: usize,
    events_enabled: Option<bool>,
    events: Option<Vec<EventConfig>>,
    colors: ColorConfig,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct EventConfig {
    date: String,
    icon: Option<char>,
    label_color: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
struct ColorConfig {
    days_labels: Option<String>,
    another_month_labels: Option<String>,
    disabled_labels: Option<String>,
    highlighted_labels: Option<String>,
    today_label: Option<String>,
    today_background: Option<String>,
    selection_label: Option<String>,
    selection: Option<String>,
}

impl Config {
    pub(crate) fn load(path: &Path) -> Result<Config, ConfigError> {
        log::info!("loading configuration from {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        content.parse()
    }

    pub(crate) fn into_properties(self) -> Result<CalendarProperties, ConfigError> {
        let minimum_date = parse_optional_date("minimum-date", self.minimum_date.as_deref())?;
        let maximum_date = parse_optional_date("maximum-date", self.maximum_date.as_deref())?;
        if let (Some(minimum), Some(maximum)) = (minimum_date, maximum_date) {
            if minimum > maximum {
                return Err(ConfigError::InvertedBounds { minimum, maximum });
            }
        }
        let event_days = match self.events {
            Some(events) => Some(
                events
                    .into_iter()
                    .map(EventConfig::into_event_day)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };
        let events_enabled = self.events_enabled.unwrap_or(true);
        if !events_enabled && event_days.as_ref().is_some_and(|events| !events.is_empty()) {
            log::warn!("events are configured but events-enabled is false; icons will be hidden");
        }
        Ok(CalendarProperties {
            mode: self.mode,
            minimum_date,
            maximum_date,
            disabled_days: parse_dates("disabled-days", &self.disabled_days)?
                .into_iter()
                .collect(),
            highlighted_days: parse_dates("highlighted-days", &self.highlighted_days)?
                .into_iter()
                .collect(),
            event_days,
            events_enabled,
            maximum_days_range: self.maximum_days_range,
            palette: self.colors.into_palette()?,
            selected_days: parse_dates("selected-days", &self.selected_days)?,
            on_day_click: None,
        })
    }
}

impl std::str::FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}

impl EventConfig {
    fn into_event_day(self) -> Result<EventDay, ConfigError> {
        let mut event = EventDay::new(parse_date("events.date", &self.date)?);
        if let Some(icon) = self.icon {
            event = event.icon(icon);
        }
        if let Some(color) =
            parse_optional_color("events.label-color", self.label_color.as_deref())?
        {
            event = event.label_color(color);
        }
        Ok(event)
    }
}

impl ColorConfig {
    fn into_palette(self) -> Result<Palette, ConfigError> {
        let default = Palette::default();
        let color = |field, value: Option<String>, fallback| {
            parse_optional_color(field, value.as_deref()).map(|c| c.unwrap_or(fallback))
        };
        Ok(Palette {
            days_labels: color("colors.days-labels", self.days_labels, default.days_labels)?,
            another_month_labels: color(
                "colors.another-month-labels",
                self.another_month_labels,
                default.another_month_labels,
            )?,
            disabled_labels: color(
                "colors.disabled-labels",
                self.disabled_labels,
                default.disabled_labels,
            )?,
            highlighted_labels: color(
                "colors.highlighted-labels",
                self.highlighted_labels,
                default.highlighted_labels,
            )?,
            today_label: color("colors.today-label", self.today_label, default.today_label)?,
            today_background: parse_optional_color(
                "colors.today-background",
                self.today_background.as_deref(),
            )?,
            selection_label: color(
                "colors.selection-label",
                self.selection_label,
                default.selection_label,
            )?,
            selection: color("colors.selection", self.selection, default.selection)?,
        })
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<Date, ConfigError> {
    Date::parse(value, &YMD_FMT).map_err(|source| ConfigError::Date {
        field,
        value: value.to_owned(),
        source,
    })
}

fn parse_optional_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<Date>, ConfigError> {
    value.map(|v| parse_date(field, v)).transpose()
}

fn parse_dates(field: &'static str, values: &[String]) -> Result<Vec<Date>, ConfigError> {
    values.iter().map(|v| parse_date(field, v)).collect()
}

fn parse_optional_color(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<Color>, ConfigError> {
    value
        .map(|v| {
            v.parse::<Color>().map_err(|source| ConfigError::Color {
                field,
                value: v.to_owned(),
                source,
            })
        })
        .transpose()
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read configuration file {}", path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),
    #[error("invalid date {value:?} for {field}")]
    Date {
        field: &'static str,
        value: String,
        source: time::error::Parse,
    },
    #[error("invalid color {value:?} for {field}")]
    Color {
        field: &'static str,
        value: String,
        source: ParseColorError,
    },
    #[error("minimum-date {minimum} is after maximum-date {maximum}")]
    InvertedBounds { minimum: Date, maximum: Date },
}
