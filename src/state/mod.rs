//! Application state module

mod app_state;
mod forms;
mod shake_state;

pub use app_state::*;
pub use forms::*;
pub use shake_state::*;
