//! `dash_core` — deterministic dashboard state machine.
//!
//! No IO, no network, no clocks of its own: time enters as `Instant`
//! arguments, interaction arrives as tagged events, and every transition
//! returns its render effects as data for the client layer to apply.

mod alert;
mod classify;
mod dashboard;
mod debounce;
mod logview;
pub mod panel;
mod selection;
pub mod test_fixtures;
mod tips;
mod types;

pub use alert::{banner_message, AlertController};
pub use classify::{
    classify, color_for, marker_color, Level, CH4_HIGH_THRESHOLD, CO2_HIGH_THRESHOLD,
    NOX_HIGH_THRESHOLD,
};
pub use dashboard::Dashboard;
pub use debounce::{DebounceArena, HOVER_DEBOUNCE_DELAY};
pub use logview::{group_log_blocks, LogBlock, LogColor, LOG_COLOR_CYCLE};
pub use selection::{LockTransition, SelectionStore};
pub use tips::simulation_tips;
pub use types::*;
