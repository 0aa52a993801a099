use crate::calendar::{
    Calendar, CalendarProperties, CalendarView, ClickOutcome, EventDay, OnDayClick, CALENDAR_LINES,
};
use crate::help::Help;
use crate::theme::{BASE_STYLE, STATUS_STYLE};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::cell::Cell;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::rc::Rc;
use time::Date;

#[derive(Debug)]
pub(crate) struct App {
    view: CalendarView,
    state: AppState,
    /// The day most recently reported to the click callback
    last_click: Rc<Cell<Option<EventDay>>>,
    last_outcome: Option<ClickOutcome>,
}

impl App {
    pub(crate) fn new(view: CalendarView) -> App {
        let last_click = Rc::new(Cell::new(None));
        let sink = Rc::clone(&last_click);
        let view = view.on_day_click(OnDayClick::new(move |event: &EventDay| {
            log::info!(
                "day clicked: {} (icon: {:?}, unavailable: {})",
                event.date,
                event.icon,
                event.enabled
            );
            sink.set(Some(*event));
        }));
        App {
            view,
            state: AppState::Calendar,
            last_click,
            last_outcome: None,
        }
    }

    /// Runs the event loop until the user quits, then returns the selected
    /// dates.  Nothing counts as selected in classic mode.
    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<Vec<Date>> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(self.selection())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key or the action was
    // refused
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.view.cursor_left().is_ok(),
                KeyCode::Char('l') | KeyCode::Right => self.view.cursor_right().is_ok(),
                KeyCode::Char('k') | KeyCode::Up => self.view.cursor_up().is_ok(),
                KeyCode::Char('j') | KeyCode::Down => self.view.cursor_down().is_ok(),
                KeyCode::Char('n') | KeyCode::PageDown => self.view.one_page_forwards().is_ok(),
                KeyCode::Char('p') | KeyCode::PageUp => self.view.one_page_backwards().is_ok(),
                KeyCode::Enter | KeyCode::Char(' ') => self.click(),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.view.jump_to_today();
                    true
                }
                KeyCode::Char('m') => {
                    self.cycle_mode();
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn click(&mut self) -> bool {
        let outcome = self.view.click();
        self.last_outcome = Some(outcome);
        match outcome {
            ClickOutcome::RangeRejected => false,
            ClickOutcome::Ignored => !self.view.properties().mode.is_picker(),
            _ => true,
        }
    }

    fn cycle_mode(&mut self) {
        let props = CalendarProperties {
            mode: self.view.properties().mode.next(),
            ..self.view.properties().clone()
        };
        log::info!("switching to {} mode", props.mode);
        self.view.set_properties(props);
        self.last_outcome = None;
    }

    fn selection(&self) -> Vec<Date> {
        if self.view.properties().mode.is_picker() {
            self.view.selected_dates()
        } else {
            Vec::new()
        }
    }

    fn status_line(&self) -> String {
        let props = self.view.properties();
        let mut status = format!("Mode: {}", props.mode);
        if props.mode.is_picker() {
            let _ = write!(status, "  Selected: {}", self.view.selected_dates().len());
        }
        if let Some(event) = self.last_click.get() {
            let _ = write!(status, "  Clicked: {}", event.date);
            if event.enabled {
                status.push_str(" (unavailable)");
            }
        }
        if self.last_outcome == Some(ClickOutcome::RangeRejected) {
            status.push_str("  Range too long");
        }
        status
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [cal_area, status_area] =
            Layout::vertical([Constraint::Length(CALENDAR_LINES), Constraint::Length(1)])
                .areas(area);
        Calendar.render(cal_area, buf, &mut self.view);
        Line::styled(self.status_line(), STATUS_STYLE)
            .centered()
            .render(status_area, buf);
        if self.state == AppState::Helping {
            Help {
                style: BASE_STYLE,
                mode: self.view.properties().mode,
            }
            .render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Quitting,
}
