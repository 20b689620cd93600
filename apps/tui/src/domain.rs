use serde::Deserialize;
use serde_json::Value;

/// Rank sizes used by the dashboard.
pub const TOP_COURSES: usize = 6;
pub const TOP_PROGRAMS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Course,
    Program,
}

impl Category {
    /// The literal value the feed uses in its `type` field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Course => "Kurs",
            Self::Program => "Program",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Kurs" => Some(Self::Course),
            "Program" => Some(Self::Program),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Course => "Kurser",
            Self::Program => "Program",
        }
    }
}

/// One row of the remote admissions feed. The schema is not ours:
/// `applicantsTotal` shows up as a number, a numeric string, or not at all,
/// so it is kept raw here and coerced at ranking time.
#[derive(Debug, Clone, Deserialize)]
pub struct AdmissionRecord {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "applicantsTotal", default)]
    pub applicants_total: Option<Value>,
}

/// Labels and values ordered by descending value, index-aligned.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RankedDataset {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

impl RankedDataset {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Coerce a loosely typed applicant count to a definite number.
/// Missing, non-numeric, negative, and non-finite input all become 0.
pub fn coerce_total(raw: Option<&Value>) -> u64 {
    let parsed = match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(count) if count.is_finite() && count > 0.0 => count.round() as u64,
        _ => 0,
    }
}

/// Keep the records of one category, coerce their applicant counts, sort
/// descending (stable, so equal counts keep their feed order) and take the
/// first `top_n`. Fewer matches than `top_n` just yields a shorter dataset.
pub fn rank(records: &[AdmissionRecord], category: Category, top_n: usize) -> RankedDataset {
    let mut entries: Vec<(&str, u64)> = records
        .iter()
        .filter(|record| record.kind == category.as_str())
        .map(|record| {
            (
                record.name.as_str(),
                coerce_total(record.applicants_total.as_ref()),
            )
        })
        .collect();

    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(top_n);

    RankedDataset {
        labels: entries.iter().map(|&(name, _)| name.to_string()).collect(),
        values: entries.iter().map(|&(_, total)| total).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(kind: &str, name: &str, total: Value) -> AdmissionRecord {
        AdmissionRecord {
            kind: kind.to_string(),
            name: name.to_string(),
            applicants_total: Some(total),
        }
    }

    #[test]
    fn coerces_numbers_strings_and_garbage() {
        assert_eq!(coerce_total(Some(&json!(120))), 120);
        assert_eq!(coerce_total(Some(&json!("85"))), 85);
        assert_eq!(coerce_total(Some(&json!(" 42 "))), 42);
        assert_eq!(coerce_total(Some(&json!("abc"))), 0);
        assert_eq!(coerce_total(Some(&json!(null))), 0);
        assert_eq!(coerce_total(None), 0);
    }

    #[test]
    fn negative_counts_clamp_to_zero() {
        assert_eq!(coerce_total(Some(&json!(-5))), 0);
        assert_eq!(coerce_total(Some(&json!("-17"))), 0);
    }

    #[test]
    fn ranks_courses_descending() {
        let records = vec![
            record("Kurs", "A", json!("100")),
            record("Kurs", "B", json!("50")),
        ];

        let dataset = rank(&records, Category::Course, TOP_COURSES);
        assert_eq!(dataset.labels, vec!["A", "B"]);
        assert_eq!(dataset.values, vec![100, 50]);
    }

    #[test]
    fn filters_by_category_and_truncates() {
        let records = vec![
            record("Kurs", "K1", json!(10)),
            record("Program", "P1", json!(900)),
            record("Kurs", "K2", json!(30)),
            record("Kurs", "K3", json!(20)),
        ];

        let dataset = rank(&records, Category::Course, 2);
        assert_eq!(dataset.labels, vec!["K2", "K3"]);
        assert_eq!(dataset.values, vec![30, 20]);
    }

    #[test]
    fn values_are_non_increasing() {
        let records = vec![
            record("Kurs", "low", json!(1)),
            record("Kurs", "high", json!(300)),
            record("Kurs", "mid", json!(40)),
        ];

        let dataset = rank(&records, Category::Course, TOP_COURSES);
        assert!(dataset.len() <= TOP_COURSES);
        for pair in dataset.values.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn equal_values_keep_feed_order() {
        let records = vec![
            record("Program", "first", json!(70)),
            record("Program", "second", json!(70)),
            record("Program", "third", json!(70)),
        ];

        let dataset = rank(&records, Category::Program, TOP_PROGRAMS);
        assert_eq!(dataset.labels, vec!["first", "second", "third"]);
    }

    #[test]
    fn missing_totals_rank_last_not_panic() {
        let records = vec![
            AdmissionRecord {
                kind: "Kurs".to_string(),
                name: "no total".to_string(),
                applicants_total: None,
            },
            record("Kurs", "has total", json!(5)),
        ];

        let dataset = rank(&records, Category::Course, TOP_COURSES);
        assert_eq!(dataset.labels, vec!["has total", "no total"]);
        assert_eq!(dataset.values, vec![5, 0]);
    }

    #[test]
    fn short_input_returns_all_matches() {
        let records = vec![record("Program", "only", json!(12))];

        let dataset = rank(&records, Category::Program, TOP_PROGRAMS);
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn category_roundtrip() {
        assert_eq!(Category::parse("Kurs"), Some(Category::Course));
        assert_eq!(Category::parse(" Program "), Some(Category::Program));
        assert_eq!(Category::parse("kurs"), None);
        assert_eq!(Category::Course.as_str(), "Kurs");
    }
}
