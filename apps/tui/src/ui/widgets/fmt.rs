//! Pure formatting helpers for the chart widgets.

/// Group digits the way sv-SE locale output does: "1 234 567".
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }

    out
}

/// Per-slice shares of the total in percent, rounded to one decimal.
/// A zero total reports zero shares instead of dividing by zero.
pub fn percentages(values: &[u64]) -> Vec<f64> {
    let total: u64 = values.iter().sum();

    values
        .iter()
        .map(|&value| {
            if total == 0 {
                0.0
            } else {
                #[allow(clippy::cast_precision_loss)]
                let share = value as f64 / total as f64 * 100.0;
                (share * 10.0).round() / 10.0
            }
        })
        .collect()
}
