use std::sync::{Arc, Mutex};

use content_digest::{ApiKey, DigestError, Summarizer, SummaryRequest, SummaryResponse};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub api_key: String,
    pub model: String,
    pub prompt: String,
}

#[derive(Clone)]
pub struct MockSummarizer {
    pub summary: String,
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
    pub context_window: Option<usize>,
    fail_with: Option<fn(String) -> DigestError>,
    message: String,
}

impl MockSummarizer {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            context_window: None,
            fail_with: None,
            message: String::new(),
        }
    }

    /// Fails every call with an upstream error
    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(DigestError::Upstream),
            message: msg.to_string(),
            ..Self::new("")
        }
    }

    pub fn rejecting_credentials(msg: &str) -> Self {
        Self {
            fail_with: Some(DigestError::Authentication),
            message: msg.to_string(),
            ..Self::new("")
        }
    }

    pub fn with_context_window(mut self, tokens: usize) -> Self {
        self.context_window = Some(tokens);
        self
    }
}

impl Summarizer for MockSummarizer {
    type Error = DigestError;

    fn context_window(&self, model: &str) -> usize {
        self.context_window
            .unwrap_or_else(|| content_digest::budget::context_window(model))
    }

    async fn summarize(
        &self,
        api_key: &ApiKey,
        request: SummaryRequest<'_>,
    ) -> Result<SummaryResponse, Self::Error> {
        self.calls.lock().unwrap().push(RecordedCall {
            api_key: api_key.expose().to_string(),
            model: request.model.to_string(),
            prompt: request.prompt.to_string(),
        });
        if let Some(fail) = self.fail_with {
            return Err(fail(self.message.clone()));
        }
        Ok(SummaryResponse {
            summary: self.summary.clone(),
        })
    }
}
