use content_extract::ExtractError;

use crate::openai::OpenAIError;

/// Problems with the user's input, caught before any network call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please provide an API key")]
    MissingCredential,
    #[error("Please provide a valid URL or upload a PDF file")]
    MissingSource,
    #[error("'{0}' is not a valid URL")]
    InvalidSource(String),
    #[error("Summary length must be between {min} and {max} words, got {got}")]
    SummaryLength { got: u16, min: u16, max: u16 },
    #[error("Model name must not be empty")]
    EmptyModel,
    #[error("Unknown summary style '{0}', expected one of: concise, detailed, bullet-points")]
    UnknownStyle(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Extraction(#[from] ExtractError),
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Summarization request failed: {0}")]
    Upstream(String),
}

impl DigestError {
    /// A follow-up suggestion to show next to the error, if there is one
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            DigestError::Extraction(e) if e.is_caption_failure() => Some(
                "If you're having issues with YouTube videos, check if captions are available for this video.",
            ),
            DigestError::Authentication(_) => Some("Check that your API key is valid."),
            _ => None,
        }
    }
}

impl From<OpenAIError> for DigestError {
    fn from(error: OpenAIError) -> Self {
        match error {
            OpenAIError::Api {
                status: 401 | 403,
                message,
            } => DigestError::Authentication(message),
            OpenAIError::Request(e) if e.is_timeout() => {
                DigestError::Upstream(format!("request timed out: {e}"))
            }
            other => DigestError::Upstream(other.to_string()),
        }
    }
}
