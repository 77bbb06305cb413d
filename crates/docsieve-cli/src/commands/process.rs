//! Process command implementation.

use crate::cli::ProcessArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::setup;
use docsieve_pipeline::PipelineOptions;
use std::fs;

/// Execute the process command: run a document through the full pipeline.
pub async fn execute_process(args: ProcessArgs, formatter: &Formatter) -> Result<()> {
    let bytes = fs::read(&args.file)?;
    let mime = setup::mime_for_path(&args.file);

    let pipeline = setup::build_pipeline(args.no_vision)?;
    let options = PipelineOptions {
        custom_fields: args.fields,
        doc_type: args.doc_type.map(Into::into),
        enable_classification: !args.no_vision,
        enable_validation: !args.no_validate,
        confidence_threshold: args.confidence_threshold,
    };

    let result = pipeline.process(&bytes, mime, &options).await?;

    println!("{}", formatter.format_result(&result)?);

    if let Some(path) = &args.output {
        fs::write(path, serde_json::to_string_pretty(&result)?)?;
        eprintln!(
            "{}",
            formatter.success(&format!("Result written to {}", path.display()))
        );
    }

    Ok(())
}
