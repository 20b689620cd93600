use reqwest::header::{ACCEPT, CACHE_CONTROL};
use serde::Deserialize;
use serde_json::Value;

use super::FetchError;

/// A geocoded place, reduced to what the map needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
}

/// One candidate as Nominatim's jsonv2 format returns it: coordinates come
/// back as strings, and the display name is not guaranteed.
#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    lat: Option<Value>,
    #[serde(default)]
    lon: Option<Value>,
    #[serde(default)]
    display_name: Option<String>,
}

/// Resolve a free-text place name against Nominatim. Zero matches is a
/// normal outcome (`Ok(None)`), distinct from transport and parse failures.
/// The query must already be trimmed and non-empty.
pub async fn geocode(
    client: &reqwest::Client,
    base_url: &str,
    query: &str,
) -> Result<Option<Place>, FetchError> {
    let response = client
        .get(base_url)
        .query(&[
            ("q", query),
            ("format", "jsonv2"),
            ("limit", "1"),
            ("addressdetails", "1"),
            ("accept-language", "sv"),
        ])
        .header(ACCEPT, "application/json")
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let body = response.text().await?;
    parse_response(&body, query)
}

/// Pick the first (highest ranked) candidate out of a response body.
pub fn parse_response(body: &str, query: &str) -> Result<Option<Place>, FetchError> {
    let candidates: Vec<Candidate> = serde_json::from_str(body)?;

    let Some(first) = candidates.into_iter().next() else {
        return Ok(None);
    };

    let display_name = first
        .display_name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| query.to_string());

    Ok(Some(Place {
        lat: coerce_coord(first.lat.as_ref()),
        lon: coerce_coord(first.lon.as_ref()),
        display_name,
    }))
}

/// jsonv2 serializes coordinates as strings; accept numbers too and fall
/// back to 0.0 rather than failing the whole lookup.
fn coerce_coord(raw: Option<&Value>) -> f64 {
    match raw {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual}, diff {diff}"
        );
    }

    #[test]
    fn empty_result_is_none_not_error() {
        let place = parse_response("[]", "Sundsvall").expect("valid body");
        assert!(place.is_none());
    }

    #[test]
    fn first_candidate_wins() {
        let body = r#"[
            {"lat": "62.3908", "lon": "17.3069", "display_name": "Sundsvall, Sweden"},
            {"lat": "0.0", "lon": "0.0", "display_name": "elsewhere"}
        ]"#;

        let place = parse_response(body, "Sundsvall")
            .expect("valid body")
            .expect("one match");
        assert_close(place.lat, 62.3908);
        assert_close(place.lon, 17.3069);
        assert_eq!(place.display_name, "Sundsvall, Sweden");
    }

    #[test]
    fn display_name_falls_back_to_query() {
        let body = r#"[{"lat": "59.33", "lon": "18.07"}]"#;

        let place = parse_response(body, "Stockholm")
            .expect("valid body")
            .expect("one match");
        assert_eq!(place.display_name, "Stockholm");
    }

    #[test]
    fn numeric_coordinates_are_accepted() {
        let body = r#"[{"lat": 57.7, "lon": 11.97, "display_name": "Göteborg"}]"#;

        let place = parse_response(body, "Göteborg")
            .expect("valid body")
            .expect("one match");
        assert_close(place.lat, 57.7);
        assert_close(place.lon, 11.97);
    }

    #[test]
    fn non_array_body_is_a_parse_error() {
        let result = parse_response(r#"{"error": "rate limited"}"#, "Umeå");
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }
}
