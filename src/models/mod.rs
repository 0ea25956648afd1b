pub mod anchor;
pub mod cell;
pub mod event;

pub use anchor::{ResolvedAnchor, TimeRange};
pub use cell::CellValue;
pub use event::ScheduleEvent;
