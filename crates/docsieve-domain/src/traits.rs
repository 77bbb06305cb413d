//! Trait definitions for external services
//!
//! These traits define the boundaries between the pipeline and infrastructure.
//! Implementations live in other crates (docsieve-llm, docsieve-ocr).

/// Trait for LLM completion services.
///
/// Implementations are treated as fallible and non-deterministic: identical
/// prompts may yield different responses across calls, which is what the
/// consensus extractor exploits.
pub trait LlmProvider {
    /// Error type for provider operations
    type Error;

    /// Generate a completion for a prompt, with an optional system instruction.
    fn complete(&self, prompt: &str, system: Option<&str>) -> Result<String, Self::Error>;
}
