use log::debug;

/// Converts a raw form entry into an amount. Blank, unparseable and
/// non-finite entries become `0.0`; negatives pass through.
pub fn coerce_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            debug!("coercing non-numeric entry {raw:?} to 0");
            0.0
        }
    }
}
