mod grid;
mod view;
mod widget;
mod yearmonth;
pub(crate) use self::view::CalendarView;
pub(crate) use self::widget::MonthCalendar;
