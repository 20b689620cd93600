// App module for antagning-tui
// Handles application state and input

pub mod actions;
pub mod input;
pub mod state;

pub use actions::AppActions;
pub use input::handle_input;
pub use state::{App, AppEvent, AppScreen, ChartsStatus, Focus};
