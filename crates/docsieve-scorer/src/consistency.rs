//! Plausibility checks: is the value sensible, independent of its format.

use crate::dates;
use chrono::{Datelike, Utc};

const MIN_PLAUSIBLE_YEAR: i32 = 1900;
const MAX_FUTURE_YEARS: i32 = 5;
const MAX_PLAUSIBLE_AMOUNT: f64 = 1_000_000.0;

/// How plausible the value is for its field name.
pub(crate) fn context_confidence(field_name: &str, value: &str) -> f64 {
    if value.trim().is_empty() {
        return 0.0;
    }

    let field_lower = field_name.to_lowercase();

    if field_lower.contains("date") {
        date_consistency(value)
    } else if field_lower.contains("amount")
        || field_lower.contains("total")
        || field_lower.contains("price")
    {
        amount_consistency(value)
    } else if field_lower.contains("name") {
        name_consistency(value)
    } else {
        0.7
    }
}

fn date_consistency(value: &str) -> f64 {
    match dates::parse_loose(value) {
        Some(date) => {
            let max_year = Utc::now().year() + MAX_FUTURE_YEARS;
            if (MIN_PLAUSIBLE_YEAR..=max_year).contains(&date.year()) {
                0.9
            } else {
                0.4
            }
        }
        None => 0.3,
    }
}

fn amount_consistency(value: &str) -> f64 {
    // Sign is kept so clearly negative amounts score as implausible
    let clean: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    match clean.parse::<f64>() {
        Ok(amount) if (0.0..=MAX_PLAUSIBLE_AMOUNT).contains(&amount) => 0.9,
        Ok(amount) if amount > MAX_PLAUSIBLE_AMOUNT => 0.6,
        Ok(_) => 0.3,
        Err(_) => 0.2,
    }
}

fn name_consistency(value: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.len() < 2 {
        return 0.2;
    }
    let words = trimmed.split_whitespace().count();
    if words >= 2 {
        0.8
    } else {
        0.6
    }
}
