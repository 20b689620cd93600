use dotenv::dotenv;
use std::env;

pub const DEFAULT_ADMISSIONS_URL: &str = "https://studenter.miun.se/~mallar/dt211g/";
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Remote endpoints the client talks to. Fixed in production; overridable
/// through the environment so the probe binary can point at a fixture server.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub admissions_url: String,
    pub nominatim_url: String,
}

/// Initializes the application configuration.
/// Loads `.env` if present, then falls back to the production endpoints.
pub fn init_endpoints() -> Endpoints {
    dotenv().ok();

    Endpoints {
        admissions_url: env::var("ADMISSIONS_URL")
            .unwrap_or_else(|_| DEFAULT_ADMISSIONS_URL.to_string()),
        nominatim_url: env::var("NOMINATIM_URL")
            .unwrap_or_else(|_| DEFAULT_NOMINATIM_URL.to_string()),
    }
}
