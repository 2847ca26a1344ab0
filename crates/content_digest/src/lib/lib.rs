mod error;
mod llm;
pub mod presenter;
mod processor;
pub mod tracing;
pub mod types;

pub use error::{DigestError, ValidationError};
pub use llm::{
    budget, openai, prompt,
    summarizer::{Summarizer, SummaryRequest, SummaryResponse},
};
pub use processor::{builder::DigestProcessorBuilder, DigestProcessor};
pub use types::{ApiKey, ContentRequest, Digest, SubmissionForm, SummaryOptions, SummaryStyle};
