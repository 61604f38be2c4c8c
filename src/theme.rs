use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

/// Text color used on top of the colored day cells
pub(crate) const CELL_TEXT: Color = Color::Black;

/// Added to the style of the highlighted day
pub(crate) const CURSOR_MODIFIER: Modifier = Modifier::REVERSED;

pub(crate) const TODAY_MODIFIER: Modifier = Modifier::BOLD.union(Modifier::UNDERLINED);

pub(crate) mod picker {
    use super::*;

    pub(crate) const SELECTED_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);
}

pub(crate) mod help {
    use super::*;

    pub(crate) const KEY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);
}

pub(crate) mod goto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}

/// Background color of the day cells.  Days outside the displayed month use a
/// dimmed version.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct ViewColor {
    r: u8,
    g: u8,
    b: u8,
}

impl ViewColor {
    pub(crate) const fn new(r: u8, g: u8, b: u8) -> ViewColor {
        ViewColor { r, g, b }
    }

    /// The same color at 70% intensity
    pub(crate) fn dimmed(self) -> ViewColor {
        fn scale(c: u8) -> u8 {
            u8::try_from(u16::from(c) * 7 / 10).unwrap_or(u8::MAX)
        }
        ViewColor::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl Default for ViewColor {
    fn default() -> ViewColor {
        GREY
    }
}

impl From<ViewColor> for Color {
    fn from(value: ViewColor) -> Color {
        Color::Rgb(value.r, value.g, value.b)
    }
}

const GREY: ViewColor = ViewColor::new(179, 179, 179);

/// Colors offered by the color picker
pub(crate) static PALETTE: &[(&str, ViewColor)] = &[
    ("Grey", GREY),
    ("White", ViewColor::new(240, 240, 240)),
    ("Red", ViewColor::new(230, 110, 110)),
    ("Orange", ViewColor::new(240, 170, 90)),
    ("Yellow", ViewColor::new(235, 220, 110)),
    ("Green", ViewColor::new(130, 200, 120)),
    ("Teal", ViewColor::new(100, 190, 190)),
    ("Blue", ViewColor::new(120, 160, 230)),
    ("Purple", ViewColor::new(180, 140, 220)),
    ("Pink", ViewColor::new(235, 150, 190)),
];
