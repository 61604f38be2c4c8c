use crate::calendar::{CalendarView, MonthCalendar};
use crate::colorpick::{ColorPicker, ColorPickerInput, ColorPickerOutput, ColorPickerState};
use crate::detail::DayDetail;
use crate::goto::{GoTo, GoToInput, GoToOutput, GoToState};
use crate::help::Help;
use crate::theme::BASE_STYLE;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::Date;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    view: CalendarView,
    state: AppState,
}

impl App {
    pub(crate) fn new(view: CalendarView) -> App {
        App {
            view,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
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

    // Returns `false` if the user pressed an invalid key or entered an
    // invalid date
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.view.move_cursor(-1).is_ok(),
                KeyCode::Char('l') | KeyCode::Right => self.view.move_cursor(1).is_ok(),
                KeyCode::Char('k') | KeyCode::Up => self.view.move_cursor(-7).is_ok(),
                KeyCode::Char('j') | KeyCode::Down => self.view.move_cursor(7).is_ok(),
                KeyCode::Char('p') | KeyCode::PageUp => self.view.previous_month().is_ok(),
                KeyCode::Char('n') | KeyCode::PageDown => self.view.next_month().is_ok(),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.view.jump_to_today();
                    true
                }
                KeyCode::Char('g') => {
                    self.state = AppState::GoingTo(GoToState::new());
                    true
                }
                KeyCode::Char('c') => {
                    self.state = AppState::PickingColor(ColorPickerState::new(self.view.color()));
                    true
                }
                KeyCode::Enter => self.show_day(self.view.cursor()),
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
            AppState::Helping | AppState::Showing(_) => {
                self.state = AppState::Calendar;
                true
            }
            AppState::GoingTo(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    return true;
                }
                let output = match key {
                    KeyCode::Char(c @ '0'..='9') => match c.to_digit(10).map(u8::try_from) {
                        Some(Ok(d)) => state.handle_input(GoToInput::Digit(d)),
                        _ => GoToOutput::Invalid,
                    },
                    KeyCode::Backspace | KeyCode::Delete => state.handle_input(GoToInput::Backspace),
                    KeyCode::Enter => state.handle_input(GoToInput::Enter),
                    _ => GoToOutput::Invalid,
                };
                match output {
                    GoToOutput::Ok => true,
                    GoToOutput::Invalid => false,
                    GoToOutput::Select { year, month, day } => {
                        match self.view.select_date(year, month, day) {
                            Ok(_) => {
                                self.state = AppState::Calendar;
                                true
                            }
                            Err(e) => {
                                log::warn!("Rejected date input: {e}");
                                false
                            }
                        }
                    }
                }
            }
            AppState::PickingColor(state) => {
                let output = match key {
                    KeyCode::Char('q' | 'c') | KeyCode::Esc => {
                        self.state = AppState::Calendar;
                        return true;
                    }
                    KeyCode::Char('k') | KeyCode::Up => state.handle_input(ColorPickerInput::Up),
                    KeyCode::Char('j') | KeyCode::Down => {
                        state.handle_input(ColorPickerInput::Down)
                    }
                    KeyCode::Enter => state.handle_input(ColorPickerInput::Enter),
                    _ => ColorPickerOutput::Invalid,
                };
                match output {
                    ColorPickerOutput::Ok => true,
                    ColorPickerOutput::Invalid => false,
                    ColorPickerOutput::Pick(color) => {
                        self.view.set_view_color(color);
                        self.state = AppState::Calendar;
                        true
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    /// Open the detail popup for `date`
    fn show_day(&mut self, date: Date) -> bool {
        match self
            .view
            .select_date(date.year(), u8::from(date.month()), date.day())
        {
            Ok(date) => {
                let events = self
                    .view
                    .grid()
                    .cell(date)
                    .map(|cell| cell.events().to_vec())
                    .unwrap_or_default();
                self.state = AppState::Showing(DayDetail::new(date, events));
                true
            }
            Err(e) => {
                log::warn!("Could not select {date}: {e}");
                false
            }
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        MonthCalendar.render(area, buf, &mut self.view);
        match &mut self.state {
            AppState::Helping => Help.render(area, buf),
            AppState::GoingTo(state) => GoTo.render(area, buf, state),
            AppState::PickingColor(state) => ColorPicker.render(area, buf, state),
            AppState::Showing(detail) => (&*detail).render(area, buf),
            AppState::Calendar | AppState::Quitting => (),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    GoingTo(GoToState),
    PickingColor(ColorPickerState),
    Showing(DayDetail),
    Quitting,
}
