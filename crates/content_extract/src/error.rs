use itertools::Itertools;

/// Failures of a caption lookup for a single video
#[derive(Debug, thiserror::Error)]
pub enum CaptionError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Video unavailable: {0}")]
    Unavailable(String),
    #[error("No caption track found for {}", describe_languages(.languages))]
    NoTracks { languages: Vec<String> },
    #[error("Failed to parse caption data: {0}")]
    Parse(String),
}

fn describe_languages(languages: &[String]) -> String {
    if languages.is_empty() {
        "any language".into()
    } else {
        format!("languages [{}]", languages.iter().join(", "))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Could not extract a video id from '{0}'")]
    InvalidVideoUrl(String),
    #[error("No captions available for video {video_id}")]
    NoCaptions { video_id: String },
    #[error("Caption lookup failed for video {video_id}: {source}")]
    Captions {
        video_id: String,
        #[source]
        source: CaptionError,
    },
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },
    #[error("Unsupported content type: {0}")]
    UnsupportedContent(String),
    #[error("Failed to render page text: {0}")]
    Markup(String),
    #[error("No readable text extracted from {0}")]
    EmptyContent(String),
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

impl ExtractError {
    /// Whether the failure came from the caption lookup of a video
    pub fn is_caption_failure(&self) -> bool {
        matches!(
            self,
            ExtractError::NoCaptions { .. } | ExtractError::Captions { .. }
        )
    }
}
