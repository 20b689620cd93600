use crossterm::event::KeyCode;

use super::state::{App, AppScreen, Focus};

pub fn handle_input(app: &mut App, key: KeyCode) {
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.screen {
        AppScreen::Charts => handle_charts_input(app, key),
        AppScreen::Map => handle_map_input(app, key),
    }
}

fn handle_charts_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('h') => {
            app.show_help = true;
        }
        KeyCode::Char('2') | KeyCode::Tab => {
            app.screen = AppScreen::Map;
            app.focus = Focus::SearchField;
        }
        _ => {}
    }
}

fn handle_map_input(app: &mut App, key: KeyCode) {
    match app.focus {
        Focus::SearchField => handle_search_field(app, key),
        Focus::MapRegion => handle_map_region(app, key),
    }
}

fn handle_search_field(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char(c) => app.search_input.push(c),
        KeyCode::Backspace => {
            app.search_input.pop();
        }
        KeyCode::Enter => app.submit_search(),
        KeyCode::Tab => {
            app.screen = AppScreen::Charts;
        }
        KeyCode::Esc => {
            app.screen = AppScreen::Charts;
        }
        _ => {}
    }
}

fn handle_map_region(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Esc | KeyCode::Char('/') => {
            app.focus = Focus::SearchField;
        }
        KeyCode::Tab | KeyCode::Char('1') => {
            app.screen = AppScreen::Charts;
        }
        _ => {}
    }
}
