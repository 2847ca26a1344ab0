use std::{fmt, str::FromStr};

use content_extract::{classify, parse_web_url, DocumentUpload, Source, SourceClass, SourceKind};

use crate::ValidationError;

pub const MIN_SUMMARY_LENGTH: u16 = 100;
pub const MAX_SUMMARY_LENGTH: u16 = 500;
pub const DEFAULT_SUMMARY_LENGTH: u16 = 300;

pub const DEFAULT_MODEL: &str = "deepseek-r1-distill-qwen-32b";
pub const AVAILABLE_MODELS: [&str; 3] = [DEFAULT_MODEL, "llama3-70b-8192", "mixtral-8x7b-32768"];

/// Credential for the chat completion endpoint.
///
/// Supplied per run and passed explicitly to the summarizer; never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let key = raw.trim();
        if key.is_empty() {
            return Err(ValidationError::MissingCredential);
        }
        Ok(ApiKey(key.to_owned()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryStyle {
    #[default]
    Concise,
    Detailed,
    BulletPoints,
}

impl fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SummaryStyle::Concise => "concise",
            SummaryStyle::Detailed => "detailed",
            SummaryStyle::BulletPoints => "bullet-points",
        };
        f.write_str(name)
    }
}

impl FromStr for SummaryStyle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "concise" => Ok(SummaryStyle::Concise),
            "detailed" => Ok(SummaryStyle::Detailed),
            "bullet-points" | "bullets" => Ok(SummaryStyle::BulletPoints),
            _ => Err(ValidationError::UnknownStyle(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOptions {
    pub model_name: String,
    /// Target summary length in words
    pub summary_length: u16,
    pub style: SummaryStyle,
    pub include_metadata: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL.into(),
            summary_length: DEFAULT_SUMMARY_LENGTH,
            style: SummaryStyle::default(),
            include_metadata: true,
        }
    }
}

impl SummaryOptions {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model_name.trim().is_empty() {
            return Err(ValidationError::EmptyModel);
        }
        if !(MIN_SUMMARY_LENGTH..=MAX_SUMMARY_LENGTH).contains(&self.summary_length) {
            return Err(ValidationError::SummaryLength {
                got: self.summary_length,
                min: MIN_SUMMARY_LENGTH,
                max: MAX_SUMMARY_LENGTH,
            });
        }
        Ok(())
    }
}

/// A validated request for a single pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRequest {
    pub source: Source,
    pub options: SummaryOptions,
}

impl ContentRequest {
    pub fn kind(&self) -> SourceKind {
        self.source.kind()
    }
}

/// Raw user input, as collected from the command line or a prompt
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub api_key: String,
    pub url: Option<String>,
    pub document: Option<DocumentUpload>,
    pub options: SummaryOptions,
}

impl SubmissionForm {
    /// Checks the credential, the options and the source, in that order
    pub fn validate(self) -> Result<(ApiKey, ContentRequest), ValidationError> {
        let api_key = ApiKey::parse(&self.api_key)?;
        self.options.validate()?;

        let url = self.url.as_deref().map(str::trim).filter(|u| !u.is_empty());
        let class = classify(url, self.document.is_some());
        tracing::debug!(?class, "Classified source");

        let source = match (class, self.document, url) {
            (SourceClass::Document, Some(upload), _) => Source::Document(upload),
            (SourceClass::Video, _, Some(url)) => Source::Video { url: url.to_owned() },
            (SourceClass::Website, _, Some(url)) => Source::Website {
                url: parse_web_url(url)
                    .ok_or_else(|| ValidationError::InvalidSource(url.to_owned()))?,
            },
            (_, None, None) => return Err(ValidationError::MissingSource),
            (_, _, url) => {
                return Err(ValidationError::InvalidSource(
                    url.unwrap_or_default().to_owned(),
                ))
            }
        };

        Ok((
            api_key,
            ContentRequest {
                source,
                options: self.options,
            },
        ))
    }
}

/// The outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest {
    pub summary: String,
    pub source_label: String,
    pub model: String,
}
