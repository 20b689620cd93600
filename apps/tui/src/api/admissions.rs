use reqwest::header::CACHE_CONTROL;

use super::FetchError;
use crate::domain::AdmissionRecord;

/// Fetch the admissions feed. The figures move during the admissions cycle,
/// so intermediaries are told not to serve a cached copy. One attempt, no
/// retry; any failure goes straight back to the caller.
pub async fn fetch_admissions(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<AdmissionRecord>, FetchError> {
    let response = client
        .get(url)
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }

    let body = response.text().await?;
    parse_records(&body)
}

/// Parse the feed body, a JSON array of admission records.
pub fn parse_records(body: &str) -> Result<Vec<AdmissionRecord>, FetchError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coerce_total;

    #[test]
    fn parses_mixed_total_types() {
        let body = r#"[
            {"type": "Kurs", "name": "Webbutveckling", "applicantsTotal": "312"},
            {"type": "Program", "name": "Civilingenjör", "applicantsTotal": 845},
            {"type": "Kurs", "name": "Utan siffror"}
        ]"#;

        let records = parse_records(body).expect("valid feed body");
        assert_eq!(records.len(), 3);
        assert_eq!(coerce_total(records[0].applicants_total.as_ref()), 312);
        assert_eq!(coerce_total(records[1].applicants_total.as_ref()), 845);
        assert_eq!(coerce_total(records[2].applicants_total.as_ref()), 0);
    }

    #[test]
    fn tolerates_unknown_and_missing_fields() {
        let body = r#"[{"applicantsTotal": "7", "term": "HT24"}]"#;

        let records = parse_records(body).expect("valid feed body");
        assert_eq!(records[0].kind, "");
        assert_eq!(records[0].name, "");
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        let result = parse_records("<html>not json</html>");
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }
}
