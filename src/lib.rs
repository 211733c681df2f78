pub mod config;
pub mod error;
pub mod replay;
pub mod terminal;
pub mod widgets;

pub use config::PageConfig;
pub use error::ConfigError;
pub use replay::{ReplayHost, ReplayReport};

pub use terminal::input_event;

pub use widgets::components::calendar::{
    CalendarPage, CellState, FocusTargets, PageContext, PageFlags, PageMode, PageView,
};
pub use widgets::shared::constraints::{DateConstraints, DateInterval, ExcludedDate};
pub use widgets::shared::range::{SelectionFlags, SelectionMode};
pub use widgets::traits::{CellRef, InteractionResult, PageAction, PageHost, Trigger};
