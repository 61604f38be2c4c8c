use crate::theme::{
    goto::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 18;
const OUTER_HEIGHT: u16 = 8;
const ENTER_POS: usize = 8;

/// Popup in which the user types a date to select
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GoTo;

impl StatefulWidget for GoTo {
    type State = GoToState;

    /*
     * ..................
     * .┌─ Go To Date ─┐.
     * .│              │.
     * .│  YYYY-MM-DD  │.
     * .│              │.
     * .│   [ENTER]    │.
     * .└──────────────┘.
     * ..................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Go To Date ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

/// Digits entered so far.  No validation happens here beyond limiting input
/// to digits; the assembled components are checked when the date is
/// selected.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct GoToState {
    year: [Option<u8>; 4],
    month: [Option<u8>; 2],
    day: [Option<u8>; 2],
    pos: usize,
}

impl GoToState {
    pub(crate) fn new() -> GoToState {
        GoToState::default()
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.to_line(),
            Line::styled("", BASE_STYLE),
            // Only the "[ENTER]" text, not its centering padding, should be
            // underlined
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == ENTER_POS {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        let mut spans = Vec::new();
        let mut first = true;
        for (fallback, digits) in [
            ("Y", self.year.as_slice()),
            ("M", self.month.as_slice()),
            ("D", self.day.as_slice()),
        ] {
            if !std::mem::replace(&mut first, false) {
                spans.push(Span::styled("-", BASE_STYLE));
            }
            for dg in digits {
                spans.push(match dg {
                    Some(d) => Span::styled(d.to_string(), BASE_STYLE),
                    None => Span::styled(fallback, UNFILLED_CELL_STYLE),
                });
            }
        }
        Line::from_iter(spans)
    }

    /// The digit slot at input position `pos`
    fn slot(&mut self, pos: usize) -> Option<&mut Option<u8>> {
        match pos {
            0..4 => self.year.get_mut(pos),
            4..6 => self.month.get_mut(pos - 4),
            6..ENTER_POS => self.day.get_mut(pos - 6),
            _ => None,
        }
    }

    pub(crate) fn handle_input(&mut self, input: GoToInput) -> GoToOutput {
        match input {
            GoToInput::Digit(d) => match self.slot(self.pos) {
                Some(slot) => {
                    *slot = Some(d);
                    self.pos += 1;
                    GoToOutput::Ok
                }
                None => GoToOutput::Invalid,
            },
            GoToInput::Backspace => {
                let Some(pos) = self.pos.checked_sub(1) else {
                    return GoToOutput::Invalid;
                };
                match self.slot(pos) {
                    Some(slot) => {
                        *slot = None;
                        self.pos = pos;
                        GoToOutput::Ok
                    }
                    None => GoToOutput::Invalid,
                }
            }
            GoToInput::Enter => self.selection().unwrap_or(GoToOutput::Invalid),
        }
    }

    fn selection(&self) -> Option<GoToOutput> {
        if self.pos != ENTER_POS {
            return None;
        }
        Some(GoToOutput::Select {
            year: i32::try_from(combine(&self.year)?).ok()?,
            month: u8::try_from(combine(&self.month)?).ok()?,
            day: u8::try_from(combine(&self.day)?).ok()?,
        })
    }
}

/// The number spelled by `digits`, or `None` if any of them is unset
fn combine(digits: &[Option<u8>]) -> Option<u32> {
    digits
        .iter()
        .try_fold(0, |acc, d| Some(acc * 10 + u32::from((*d)?)))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GoToInput {
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GoToOutput {
    Ok,
    Invalid,
    Select { year: i32, month: u8, day: u8 },
}
