//! Turning merged events into text: note insertion and the day-view panel.

pub mod day_view;
pub mod format;
pub mod insert;

pub use day_view::{DayRow, DayView, Navigation, ViewState};
pub use insert::format_events_markdown;
