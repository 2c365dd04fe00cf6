//! The view controller.
//!
//! State lives in a single [`ViewState`] record. [`update`] is the only
//! way to change it; [`Controller`] runs the fetches the reducer asks for
//! and feeds their outcomes back in. [`ViewModel`] is what templates see.

mod controller;
mod reducer;
mod render;
mod state;

pub use controller::Controller;
pub use reducer::{Command, Event, Results, update};
pub use render::{NOTHING_FOUND, PagerView, PersonRow, RegionTab, ViewModel, YearOption};
pub use state::{Mode, RequestId, ViewState};
