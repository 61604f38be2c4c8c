use crate::popup::{clear_centered, fit_text};
use crate::theme::{picker::SELECTED_STYLE, ViewColor, BASE_STYLE, PALETTE};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Margin, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, StatefulWidget, Widget},
};

/// Width of the color name column
const NAME_WIDTH: usize = 8;

/// Width of the sample block shown next to each color name
const SWATCH_WIDTH: usize = 4;

/// Popup listing the colors the day cells can be painted with
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ColorPicker;

impl StatefulWidget for ColorPicker {
    type State = ColorPickerState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let text = state.to_text();
        let (width, height) = fit_text(&text, 0, area);
        let picker_area = clear_centered(area, width, height, buf);
        Block::bordered()
            .title(" Cell Color ")
            .title_alignment(Alignment::Center)
            .style(BASE_STYLE)
            .render(picker_area, buf);
        text.render(picker_area.inner(Margin::new(1, 1)), buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct ColorPickerState {
    selected: usize,
}

impl ColorPickerState {
    /// Start with the cursor on `current` if it is one of the palette colors
    pub(crate) fn new(current: ViewColor) -> ColorPickerState {
        let selected = PALETTE
            .iter()
            .position(|&(_, c)| c == current)
            .unwrap_or_default();
        ColorPickerState { selected }
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter(PALETTE.iter().enumerate().map(|(i, &(name, color))| {
            let name_style = if i == self.selected {
                SELECTED_STYLE
            } else {
                BASE_STYLE
            };
            Line::from_iter([
                Span::styled(format!(" {name:<width$} ", width = NAME_WIDTH), name_style),
                Span::styled(" ".repeat(SWATCH_WIDTH), Style::new().bg(color.into())),
                Span::styled(" ", BASE_STYLE),
            ])
        }))
    }

    pub(crate) fn handle_input(&mut self, input: ColorPickerInput) -> ColorPickerOutput {
        match input {
            ColorPickerInput::Up => {
                if self.selected == 0 {
                    return ColorPickerOutput::Invalid;
                }
                self.selected -= 1;
                ColorPickerOutput::Ok
            }
            ColorPickerInput::Down => {
                if self.selected + 1 >= PALETTE.len() {
                    return ColorPickerOutput::Invalid;
                }
                self.selected += 1;
                ColorPickerOutput::Ok
            }
            ColorPickerInput::Enter => match PALETTE.get(self.selected) {
                Some(&(_, color)) => ColorPickerOutput::Pick(color),
                None => ColorPickerOutput::Invalid,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ColorPickerInput {
    Up,
    Down,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ColorPickerOutput {
    Ok,
    Invalid,
    Pick(ViewColor),
}
