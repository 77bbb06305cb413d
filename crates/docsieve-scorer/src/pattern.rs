//! Format validation of field values against name-keyed patterns.

use regex::Regex;

/// Keyword-dispatched patterns, checked in order against the lowercased
/// field name. First keyword contained in the name wins.
const KEYED_PATTERNS: &[(&str, &str)] = &[
    ("date", r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{4}-\d{2}-\d{2}"),
    ("amount", r"[\$]?\d{1,3}(?:,\d{3})*(?:\.\d{2})?"),
    ("phone", r"\d{3}[-.]?\d{3}[-.]?\d{4}"),
    ("email", r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"),
    ("invoice_number", r"(?i)[A-Z]*[-]?\d+"),
    ("medication", r"(?i)[A-Za-z]+(?:\s+\d+mg)?"),
    ("name", r"^[A-Za-z\s.,-]+$"),
    ("number", r"^\d+$"),
];

const DATE_SHAPES: &[&str] = &[
    r"\d{1,2}[/-]\d{1,2}[/-]\d{2,4}",
    r"\d{4}-\d{2}-\d{2}",
    r"(?i)\d{1,2}\s+(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+\d{2,4}",
    r"(?i)(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+\d{1,2},?\s+\d{2,4}",
];

/// Compiled pattern set.
///
/// Each pattern is stored as `Option<Regex>`; a pattern that fails to compile
/// falls back to a neutral 0.5 instead of panicking.
pub(crate) struct PatternTable {
    keyed: Vec<(&'static str, Option<Regex>)>,
    name_shape: Option<Regex>,
    amount_grouped: Option<Regex>,
    amount_bare: Option<Regex>,
    date_shapes: Vec<Option<Regex>>,
}

impl PatternTable {
    pub(crate) fn new() -> Self {
        Self {
            keyed: KEYED_PATTERNS
                .iter()
                .map(|(key, pattern)| (*key, Regex::new(pattern).ok()))
                .collect(),
            name_shape: Regex::new(r"^[A-Za-z\s.,-]+$").ok(),
            amount_grouped: Regex::new(r"^\d{1,3}(?:,\d{3})*(?:\.\d{2})?$").ok(),
            amount_bare: Regex::new(r"^\d+\.?\d*$").ok(),
            date_shapes: DATE_SHAPES
                .iter()
                .map(|p| Regex::new(p).ok())
                .collect(),
        }
    }

    /// How well the value fits the format its field name implies.
    pub(crate) fn pattern_confidence(&self, field_name: &str, value: &str) -> f64 {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return 0.0;
        }

        let field_lower = field_name.to_lowercase();

        for (keyword, regex) in &self.keyed {
            if field_lower.contains(keyword) {
                return match regex {
                    Some(re) if re.is_match(trimmed) => 0.9,
                    Some(_) => 0.3,
                    None => 0.5,
                };
            }
        }

        if field_lower.contains("name") {
            self.name_pattern(trimmed)
        } else if field_lower.contains("total")
            || field_lower.contains("amount")
            || field_lower.contains("price")
        {
            self.amount_pattern(trimmed)
        } else if field_lower.contains("date") {
            self.date_pattern(trimmed)
        } else {
            0.7
        }
    }

    fn name_pattern(&self, value: &str) -> f64 {
        if value.len() < 2 {
            return 0.1;
        }
        match &self.name_shape {
            Some(re) if re.is_match(value) => {
                if value.len() <= 50 {
                    0.9
                } else {
                    0.6
                }
            }
            Some(_) => 0.3,
            None => 0.5,
        }
    }

    fn amount_pattern(&self, value: &str) -> f64 {
        let clean: String = value
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
            .collect();

        match (&self.amount_grouped, &self.amount_bare) {
            (Some(grouped), _) if grouped.is_match(&clean) => 0.95,
            (_, Some(bare)) if bare.is_match(&clean) => 0.8,
            (None, None) => 0.5,
            _ => 0.3,
        }
    }

    fn date_pattern(&self, value: &str) -> f64 {
        let any_match = self
            .date_shapes
            .iter()
            .flatten()
            .any(|re| re.is_match(value));
        if any_match {
            0.9
        } else {
            0.2
        }
    }
}
