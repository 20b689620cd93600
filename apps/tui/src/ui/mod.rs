// UI module for antagning-tui
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::{App, AppScreen};
use ratatui::Frame;

pub fn ui(app: &mut App, f: &mut Frame<'_>) {
    match app.screen {
        AppScreen::Charts => screens::charts::render_charts(app, f),
        AppScreen::Map => screens::map::render_map(app, f),
    }
}
