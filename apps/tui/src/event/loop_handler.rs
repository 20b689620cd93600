use color_eyre::Result;
use crossterm::event::{self, Event};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::convert::TryFrom;
use std::fmt;
use std::io::Stdout;

use antagning_tui::api::Place;
use antagning_tui::domain::RankedDataset;
use antagning_tui::map::Placement;

use crate::app::state::{
    MSG_NO_MATCH, MSG_SEARCHING, MSG_SEARCH_FAILED, MSG_SHOWING_PREFIX,
};
use crate::app::{handle_input, App, AppActions, AppEvent, Focus};
use crate::ui;
use crate::ui::widgets::fmt as numfmt;

// Define states for the place search
#[derive(Clone, Copy, PartialEq, Debug)]
enum SearchState {
    Idle,
    Searching,
    Shown,
    NoMatch,
    Error,
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Searching => write!(f, "Searching"),
            Self::Shown => write!(f, "Shown"),
            Self::NoMatch => write!(f, "NoMatch"),
            Self::Error => write!(f, "Error"),
        }
    }
}

// Define events for the place search
#[derive(Clone, Debug)]
enum SearchEvent {
    Submit,
    Found(Place),
    NoMatch,
    Failed(String),
    Reset,
}

impl fmt::Display for SearchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submit => write!(f, "Submit"),
            Self::Found(place) => write!(f, "Found({name})", name = place.display_name),
            Self::NoMatch => write!(f, "NoMatch"),
            Self::Failed(msg) => write!(f, "Failed({msg})"),
            Self::Reset => write!(f, "Reset"),
        }
    }
}

// Define a custom error type for state transitions
#[derive(Debug)]
struct StateTransitionError {
    from: SearchState,
    event: SearchEvent,
}

impl fmt::Display for StateTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid transition from {} with event {}",
            self.from, self.event
        )
    }
}

impl std::error::Error for StateTransitionError {}

// State machine for the search pipeline
struct SearchMachine {
    state: SearchState,
}

impl SearchMachine {
    const fn new(initial_state: SearchState) -> Self {
        Self {
            state: initial_state,
        }
    }

    const fn state(&self) -> SearchState {
        self.state
    }

    // Process an event and update the state machine and app
    fn process_event(
        &mut self,
        event: &SearchEvent,
        app: &mut App,
    ) -> std::result::Result<(), StateTransitionError> {
        let next_state = NextState::try_from((self.state, event, app))?;
        self.state = next_state.0;
        Ok(())
    }
}

// Helper struct for state transitions
struct NextState(SearchState);

impl NextState {
    const fn new(state: SearchState) -> Self {
        Self(state)
    }
}

impl SearchState {
    const fn next_state(self) -> NextState {
        NextState::new(self)
    }
}

impl TryFrom<(SearchState, &SearchEvent, &mut App)> for NextState {
    type Error = StateTransitionError;

    fn try_from(
        value: (SearchState, &SearchEvent, &mut App),
    ) -> std::result::Result<Self, Self::Error> {
        let (current_state, event, app) = value;

        // Resolutions are accepted from every state on purpose: in-flight
        // lookups are never cancelled, so a late completion may arrive after
        // the machine has already settled. The last one to land wins.
        match (current_state, event) {
            (_, SearchEvent::Submit) => {
                app.searching = true;
                app.search_status = MSG_SEARCHING.to_string();
                Ok(SearchState::Searching.next_state())
            }
            (_, SearchEvent::Found(place)) => {
                let placement = app.map.show(place);
                if placement == Placement::Created {
                    eprintln!("[DEBUG] marker created at {}, {}", place.lat, place.lon);
                }
                app.searching = false;
                app.search_status = format!("{MSG_SHOWING_PREFIX}{}", place.display_name);
                app.focus = Focus::MapRegion;
                Ok(SearchState::Shown.next_state())
            }
            (_, SearchEvent::NoMatch) => {
                app.searching = false;
                app.search_status = MSG_NO_MATCH.to_string();
                Ok(SearchState::NoMatch.next_state())
            }
            (_, SearchEvent::Failed(error)) => {
                eprintln!("[DEBUG] geocode error: {error}");
                app.searching = false;
                app.search_status = MSG_SEARCH_FAILED.to_string();
                Ok(SearchState::Error.next_state())
            }
            (SearchState::Shown | SearchState::NoMatch | SearchState::Error, SearchEvent::Reset) => {
                Ok(SearchState::Idle.next_state())
            }
            (SearchState::Idle | SearchState::Searching, SearchEvent::Reset) => {
                Err(StateTransitionError {
                    from: current_state,
                    event: event.clone(),
                })
            }
        }
    }
}

/// Run the application in headless mode (no UI): load the feed once, rank,
/// print, exit.
pub async fn run_headless(actions: &AppActions, json: bool) -> Result<()> {
    let records = actions.load_admissions().await?;
    let rankings = HeadlessRankings::from_records(&records);

    if json {
        println!("{}", serde_json::to_string_pretty(&rankings)?);
    } else {
        render_headless_text(&rankings);
    }

    Ok(())
}

fn render_headless_text(rankings: &HeadlessRankings) {
    println!("\nAntagningsstatistik HT24");
    println!("========================");
    println!("Poster i flödet: {}", rankings.record_count);

    println!("\nMest sökta kurser:");
    print_ranking(&rankings.courses);

    println!("\nMest sökta program:");
    print_ranking(&rankings.programs);
}

fn print_ranking(dataset: &RankedDataset) {
    for (label, value) in dataset.labels.iter().zip(&dataset.values) {
        println!("- {label}: {} sökande", numfmt::group_thousands(*value));
    }
}

#[derive(serde::Serialize)]
struct HeadlessRankings {
    record_count: usize,
    courses: RankedDataset,
    programs: RankedDataset,
}

impl HeadlessRankings {
    fn from_records(records: &[antagning_tui::domain::AdmissionRecord]) -> Self {
        use antagning_tui::domain::{rank, Category, TOP_COURSES, TOP_PROGRAMS};

        Self {
            record_count: records.len(),
            courses: rank(records, Category::Course, TOP_COURSES),
            programs: rank(records, Category::Program, TOP_PROGRAMS),
        }
    }
}

/// Run the main application event loop
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    actions: &AppActions,
    events_rx: &mut tokio::sync::mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let mut search_machine = SearchMachine::new(SearchState::Idle);

    // Kick off the one feed load the charts are built from.
    actions.spawn_load_admissions();

    loop {
        // Advance animations and any in-progress map flight
        app.update();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(_) | Err(_) => {
                    // Ignore non-key events for now
                }
            }
        }

        // A submitted query starts a lookup; the machine owns the status text
        if let Some(query) = app.take_pending_search() {
            if search_machine
                .process_event(&SearchEvent::Submit, app)
                .is_ok()
            {
                actions.spawn_search(query);
            }
        }

        // Drain completed fetches
        while let Ok(completion) = events_rx.try_recv() {
            match completion {
                AppEvent::AdmissionsLoaded(Ok(records)) => {
                    app.install_charts(&records);
                }
                AppEvent::AdmissionsLoaded(Err(error)) => {
                    eprintln!("[DEBUG] feed load error: {error}");
                    app.charts_failed();
                }
                AppEvent::SearchResolved(result) => {
                    let search_event = match result {
                        Ok(Some(place)) => SearchEvent::Found(place),
                        Ok(None) => SearchEvent::NoMatch,
                        Err(error) => SearchEvent::Failed(error.to_string()),
                    };

                    if search_machine.process_event(&search_event, app).is_ok()
                        && search_machine.state() != SearchState::Idle
                    {
                        // Settle back to Idle so the next submit starts clean
                        if search_machine.process_event(&SearchEvent::Reset, app).is_err() {
                            // Non-fatal reset error
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use antagning_tui::map::{DEFAULT_CENTER, DEFAULT_ZOOM, FLY_DURATION, FOCUS_ZOOM};

    fn sundsvall() -> Place {
        Place {
            lat: 62.3908,
            lon: 17.3069,
            display_name: "Sundsvall, Sweden".to_string(),
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual}, diff {diff}"
        );
    }

    #[test]
    fn submit_sets_the_searching_status() {
        let mut app = App::new();
        let mut machine = SearchMachine::new(SearchState::Idle);

        machine
            .process_event(&SearchEvent::Submit, &mut app)
            .expect("submit from idle");

        assert_eq!(machine.state(), SearchState::Searching);
        assert!(app.searching);
        assert_eq!(app.search_status, MSG_SEARCHING);
    }

    #[test]
    fn found_place_updates_map_status_and_focus() {
        let mut app = App::new();
        let mut machine = SearchMachine::new(SearchState::Idle);
        machine
            .process_event(&SearchEvent::Submit, &mut app)
            .expect("submit");

        machine
            .process_event(&SearchEvent::Found(sundsvall()), &mut app)
            .expect("found");

        assert_eq!(app.search_status, "Visar: Sundsvall, Sweden");
        assert_eq!(app.focus, Focus::MapRegion);
        assert!(!app.searching);

        // Let the flight land: the view centers on the hit at close zoom
        app.map.advance(FLY_DURATION);
        assert_close(app.map.center.0, 62.3908);
        assert_close(app.map.center.1, 17.3069);
        assert_close(app.map.zoom, FOCUS_ZOOM);
    }

    #[test]
    fn no_match_leaves_the_map_untouched() {
        let mut app = App::new();
        let mut machine = SearchMachine::new(SearchState::Idle);
        machine
            .process_event(&SearchEvent::Submit, &mut app)
            .expect("submit");

        machine
            .process_event(&SearchEvent::NoMatch, &mut app)
            .expect("no match");

        assert_eq!(app.search_status, MSG_NO_MATCH);
        assert!(app.map.marker.is_none());
        assert_eq!(app.map.center, DEFAULT_CENTER);
        assert_close(app.map.zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn failure_keeps_the_previous_marker() {
        let mut app = App::new();
        let mut machine = SearchMachine::new(SearchState::Idle);
        machine
            .process_event(&SearchEvent::Found(sundsvall()), &mut app)
            .expect("found");

        machine
            .process_event(&SearchEvent::Failed("timeout".to_string()), &mut app)
            .expect("failed");

        assert_eq!(app.search_status, MSG_SEARCH_FAILED);
        let marker = app.map.marker.as_ref().expect("marker survives failure");
        assert_eq!(marker.popup, "Sundsvall, Sweden");
    }

    #[test]
    fn late_resolution_is_accepted_after_settling() {
        let mut app = App::new();
        let mut machine = SearchMachine::new(SearchState::Idle);

        machine
            .process_event(&SearchEvent::NoMatch, &mut app)
            .expect("resolution while idle");
        machine
            .process_event(&SearchEvent::Reset, &mut app)
            .expect("reset");

        // A second, slower lookup resolves after the first settled
        machine
            .process_event(&SearchEvent::Found(sundsvall()), &mut app)
            .expect("late resolution wins");
        assert_eq!(app.search_status, "Visar: Sundsvall, Sweden");
    }

    #[test]
    fn reset_requires_a_settled_state() {
        let mut app = App::new();
        let mut machine = SearchMachine::new(SearchState::Idle);

        assert!(machine.process_event(&SearchEvent::Reset, &mut app).is_err());
    }
}
