use std::{fmt::Debug, future::Future};

use serde::Deserialize;

use crate::{budget, ApiKey, DigestError};

/// What a single summarization call needs besides the credential
#[derive(Debug, Clone, Copy)]
pub struct SummaryRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

pub trait Summarizer {
    type Error: Debug + Into<DigestError>;

    /// Number of tokens `model` accepts in a single request
    fn context_window(&self, model: &str) -> usize {
        budget::context_window(model)
    }

    fn summarize(
        &self,
        api_key: &ApiKey,
        request: SummaryRequest<'_>,
    ) -> impl Future<Output = Result<SummaryResponse, Self::Error>> + Send;
}
