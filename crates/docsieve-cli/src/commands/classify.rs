//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::setup;
use std::fs;

/// Execute the classify command: OCR the document, report its type.
pub async fn execute_classify(args: ClassifyArgs, formatter: &Formatter) -> Result<()> {
    let bytes = fs::read(&args.file)?;
    let mime = setup::mime_for_path(&args.file).to_string();

    let gateway = setup::build_gateway()?;
    let classifier = setup::build_classifier(args.no_vision)?;

    // OCR and the vision call both block on network IO
    let classification = tokio::task::spawn_blocking(move || -> Result<_> {
        let ocr = gateway.process(&bytes, &mime)?;
        let image = mime.starts_with("image/").then_some(bytes.as_slice());
        Ok(classifier.classify(image, &ocr.full_text))
    })
    .await
    .map_err(|e| CliError::Internal(e.to_string()))??;

    println!("{}", formatter.format_classification(&classification)?);
    Ok(())
}
