//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::*;
use docsieve_domain::{DocumentClassification, ExtractionResult};
use docsieve_pipeline::{HIGH_CONFIDENCE_THRESHOLD, LOW_CONFIDENCE_THRESHOLD};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a full extraction result.
    pub fn format_result(&self, result: &ExtractionResult) -> Result<String> {
        match self.format {
            CliFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            CliFormat::Table => self.format_result_table(result),
        }
    }

    /// Format a classification.
    pub fn format_classification(&self, classification: &DocumentClassification) -> Result<String> {
        match self.format {
            CliFormat::Json => Ok(serde_json::to_string_pretty(classification)?),
            CliFormat::Table => Ok(format!(
                "{}: {} ({:.0}% confidence)\n{}",
                self.colorize("Document type", "bold"),
                self.colorize(classification.doc_type.as_str(), "cyan"),
                classification.confidence * 100.0,
                classification.reasoning
            )),
        }
    }

    fn format_result_table(&self, result: &ExtractionResult) -> Result<String> {
        let mut out = format!(
            "{}: {}    {}: {}\n",
            self.colorize("Document type", "bold"),
            self.colorize(result.doc_type.as_str(), "cyan"),
            self.colorize("Overall confidence", "bold"),
            self.confidence_cell(result.overall_confidence),
        );

        if result.fields.is_empty() {
            out.push_str(&self.colorize("No fields extracted.", "yellow"));
            out.push('\n');
        } else {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value", "Confidence"]);
            for field in &result.fields {
                builder.push_record([
                    field.name.as_str(),
                    field.value.as_str(),
                    &self.confidence_cell(field.confidence),
                ]);
            }

            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));
            out.push_str(&table.to_string());
            out.push('\n');

            let high = result
                .high_confidence_fields(HIGH_CONFIDENCE_THRESHOLD)
                .count();
            out.push_str(&format!(
                "{} of {} fields above {:.2} confidence\n",
                high,
                result.fields.len(),
                HIGH_CONFIDENCE_THRESHOLD
            ));
        }

        if !result.qa.passed_rules.is_empty() {
            out.push_str(&format!(
                "{} {}\n",
                self.colorize("Passed rules:", "green"),
                result.qa.passed_rules.join(", ")
            ));
        }
        if !result.qa.failed_rules.is_empty() {
            out.push_str(&format!(
                "{} {}\n",
                self.colorize("Failed rules:", "red"),
                result.qa.failed_rules.join(", ")
            ));
        }
        if !result.qa.notes.is_empty() {
            out.push_str(&format!("Notes: {}\n", result.qa.notes));
        }

        Ok(out)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    fn confidence_cell(&self, confidence: f64) -> String {
        let text = format!("{:.2}", confidence);
        if confidence >= HIGH_CONFIDENCE_THRESHOLD {
            self.colorize(&text, "green")
        } else if confidence < LOW_CONFIDENCE_THRESHOLD {
            self.colorize(&text, "red")
        } else {
            self.colorize(&text, "yellow")
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        match color {
            "bold" => text.bold().to_string(),
            "green" => text.green().to_string(),
            "red" => text.red().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
