use std::time::Instant;

use antagning_tui::api::{FetchError, Place};
use antagning_tui::domain::{self, AdmissionRecord, Category, RankedDataset};
use antagning_tui::map::MapView;
use throbber_widgets_tui::ThrobberState;

/// User-facing status strings. The service locale is Swedish, matching the
/// `accept-language` hint sent to the geocoder.
pub const MSG_CHARTS_LOADING: &str = "Hämtar antagningsdata...";
pub const MSG_CHARTS_FAILED: &str = "Kunde inte ladda data för diagrammen. Försök igen senare.";
pub const MSG_SEARCHING: &str = "Söker plats!";
pub const MSG_NO_MATCH: &str = "Hittade inga träffar. Försök förtydliga sökningen.";
pub const MSG_SEARCH_FAILED: &str = "Kunde inte hämta plats just nu.";
pub const MSG_SHOWING_PREFIX: &str = "Visar: ";

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AppScreen {
    Charts,
    Map,
}

/// Which part of the map screen owns keystrokes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Focus {
    SearchField,
    MapRegion,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ChartsStatus {
    Loading,
    Ready,
    Failed,
}

/// Completions delivered back to the event loop by spawned fetch tasks.
#[derive(Debug)]
pub enum AppEvent {
    AdmissionsLoaded(Result<Vec<AdmissionRecord>, FetchError>),
    SearchResolved(Result<Option<Place>, FetchError>),
}

/// Both rankings derived from one feed payload. Built exactly once per
/// session; the charts never re-render from new data.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub courses: RankedDataset,
    pub programs: RankedDataset,
    pub fetched_at: String,
}

impl ChartData {
    pub fn from_records(records: &[AdmissionRecord]) -> Self {
        Self {
            courses: domain::rank(records, Category::Course, domain::TOP_COURSES),
            programs: domain::rank(records, Category::Program, domain::TOP_PROGRAMS),
            fetched_at: chrono::Local::now().format("%H:%M").to_string(),
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub charts: Option<ChartData>,
    pub charts_status: ChartsStatus,
    pub search_input: String,
    pub pending_search: Option<String>,
    pub searching: bool,
    pub search_status: String,
    pub focus: Focus,
    pub map: MapView,
    pub show_help: bool,
    pub animation_counter: f64,
    pub last_frame: Instant,
    pub throbber: ThrobberState,
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            screen: AppScreen::Charts,
            charts: None,
            charts_status: ChartsStatus::Loading,
            search_input: String::new(),
            pending_search: None,
            searching: false,
            search_status: String::new(),
            focus: Focus::SearchField,
            map: MapView::new(),
            show_help: false,
            animation_counter: 0.0,
            last_frame: Instant::now(),
            throbber: ThrobberState::default(),
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame);
        self.last_frame = now;

        // Update animation counter (cycles between 0 and 2*PI)
        self.animation_counter += delta.as_secs_f64() * 2.0;
        if self.animation_counter > 2.0 * std::f64::consts::PI {
            self.animation_counter -= 2.0 * std::f64::consts::PI;
        }

        self.map.advance(delta.as_secs_f64());

        if self.searching {
            self.throbber.calc_next();
        }
    }

    /// Install chart data from a successful feed load.
    pub fn install_charts(&mut self, records: &[AdmissionRecord]) {
        self.charts = Some(ChartData::from_records(records));
        self.charts_status = ChartsStatus::Ready;
    }

    /// Collapse any feed failure into the one shared status message. The
    /// search pipeline shares no state with the charts and stays usable.
    pub fn charts_failed(&mut self) {
        self.charts = None;
        self.charts_status = ChartsStatus::Failed;
    }

    /// Queue the current input for geocoding. A blank query is swallowed
    /// silently: no fetch, no status change.
    pub fn submit_search(&mut self) {
        let query = self.search_input.trim();
        if query.is_empty() {
            return;
        }
        self.pending_search = Some(query.to_string());
    }

    pub fn take_pending_search(&mut self) -> Option<String> {
        self.pending_search.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feed_record(kind: &str, name: &str, total: u64) -> AdmissionRecord {
        AdmissionRecord {
            kind: kind.to_string(),
            name: name.to_string(),
            applicants_total: Some(json!(total)),
        }
    }

    #[test]
    fn install_charts_ranks_both_categories_from_one_payload() {
        let mut app = App::new();
        let records = vec![
            feed_record("Kurs", "K1", 10),
            feed_record("Program", "P1", 20),
            feed_record("Kurs", "K2", 30),
        ];

        app.install_charts(&records);

        assert_eq!(app.charts_status, ChartsStatus::Ready);
        let charts = app.charts.as_ref().expect("chart data installed");
        assert_eq!(charts.courses.labels, vec!["K2", "K1"]);
        assert_eq!(charts.programs.labels, vec!["P1"]);
    }

    #[test]
    fn failed_feed_leaves_no_chart_data() {
        let mut app = App::new();

        app.charts_failed();

        assert_eq!(app.charts_status, ChartsStatus::Failed);
        assert!(app.charts.is_none());
    }

    #[test]
    fn blank_submit_is_a_silent_noop() {
        let mut app = App::new();
        app.search_status = "tidigare status".to_string();

        app.search_input = String::new();
        app.submit_search();
        app.search_input = "   ".to_string();
        app.submit_search();

        assert!(app.pending_search.is_none());
        assert_eq!(app.search_status, "tidigare status");
    }

    #[test]
    fn submit_trims_the_query() {
        let mut app = App::new();
        app.search_input = "  Sundsvall  ".to_string();

        app.submit_search();

        assert_eq!(app.take_pending_search().as_deref(), Some("Sundsvall"));
        assert!(app.pending_search.is_none());
    }
}
