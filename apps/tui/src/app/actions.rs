use antagning_tui::api::{self, FetchError};
use antagning_tui::config::{init_endpoints, Endpoints};
use antagning_tui::domain::AdmissionRecord;
use color_eyre::Result;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use super::state::AppEvent;

/// Owns the HTTP client and the endpoints, and runs the remote lookups.
/// Completions come back as [`AppEvent`]s so the UI thread never blocks on
/// the network.
#[derive(Debug)]
pub struct AppActions {
    client: reqwest::Client,
    pub endpoints: Endpoints,
    events_tx: UnboundedSender<AppEvent>,
}

impl AppActions {
    pub fn new() -> Result<(Self, UnboundedReceiver<AppEvent>)> {
        let (events_tx, events_rx) = unbounded_channel();
        let actions = Self {
            client: api::build_client()?,
            endpoints: init_endpoints(),
            events_tx,
        };

        Ok((actions, events_rx))
    }

    /// Fire the one startup load of the admissions feed. No retry; the
    /// result, good or bad, lands as a single event.
    pub fn spawn_load_admissions(&self) {
        let client = self.client.clone();
        let url = self.endpoints.admissions_url.clone();
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let result = api::fetch_admissions(&client, &url).await;
            let _ = tx.send(AppEvent::AdmissionsLoaded(result));
        });
    }

    /// Fire a geocode lookup. In-flight lookups are not cancelled when a new
    /// one starts; whichever completion is handled last wins.
    pub fn spawn_search(&self, query: String) {
        let client = self.client.clone();
        let url = self.endpoints.nominatim_url.clone();
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let result = api::geocode(&client, &url, &query).await;
            let _ = tx.send(AppEvent::SearchResolved(result));
        });
    }

    /// Inline feed load for the headless path.
    pub async fn load_admissions(&self) -> Result<Vec<AdmissionRecord>, FetchError> {
        api::fetch_admissions(&self.client, &self.endpoints.admissions_url).await
    }
}
