pub mod captions;
pub mod player;

use std::future::Future;

use itertools::Itertools;
use url::Url;

use crate::{CaptionError, CaptionFragment, ExtractError, ExtractedDocument};

const SHORT_LINK_HOST: &str = "youtu.be";

/// Caption language preferences, tried in order. An empty list means any
/// language the video has.
const LANGUAGE_ATTEMPTS: [&[&str]; 2] = [&["en"], &[]];

pub trait CaptionSource {
    /// Fetches the caption track of `video_id` for the first matching entry
    /// of `languages`, or any track when `languages` is empty.
    fn fetch_captions(
        &self,
        video_id: &str,
        languages: &[&str],
    ) -> impl Future<Output = Result<Vec<CaptionFragment>, CaptionError>> + Send;
}

impl<T: CaptionSource + Sync> CaptionSource for &T {
    async fn fetch_captions(
        &self,
        video_id: &str,
        languages: &[&str],
    ) -> Result<Vec<CaptionFragment>, CaptionError> {
        (**self).fetch_captions(video_id, languages).await
    }
}

/// Pulls the video id out of a YouTube URL.
///
/// Short links (`youtu.be/<id>`) use the last path segment, everything else
/// uses the value of the `v` query parameter. A missing scheme is read as
/// https.
pub fn parse_video_id(url: &str) -> Result<String, ExtractError> {
    let invalid = || ExtractError::InvalidVideoUrl(url.to_owned());

    let trimmed = url.trim();
    let parsed = Url::parse(trimmed)
        .or_else(|_| Url::parse(&format!("https://{trimmed}")))
        .map_err(|_| invalid())?;

    let is_short_link = parsed
        .host_str()
        .is_some_and(|host| host == SHORT_LINK_HOST || host.ends_with(".youtu.be"));

    let id = if is_short_link {
        parsed
            .path_segments()
            .and_then(|segments| segments.last())
            .map(str::to_owned)
    } else {
        parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
    };

    id.map(|id| id.trim().to_owned())
        .filter(|id| !id.is_empty())
        .ok_or_else(invalid)
}

/// Joins caption fragments in time order with single spaces
pub fn join_fragments(mut fragments: Vec<CaptionFragment>) -> String {
    fragments.sort_by(|a, b| a.start.total_cmp(&b.start));
    fragments
        .iter()
        .map(|f| f.text.trim())
        .filter(|t| !t.is_empty())
        .join(" ")
}

pub struct VideoExtractor<C> {
    captions: C,
}

impl<C: CaptionSource> VideoExtractor<C> {
    pub fn new(captions: C) -> Self {
        Self { captions }
    }

    #[tracing::instrument(skip(self))]
    pub async fn extract(&self, url: &str) -> Result<ExtractedDocument, ExtractError> {
        let video_id = parse_video_id(url)
            .inspect_err(|e| tracing::error!(error = %e, "Failed to parse video id"))?;

        let mut last_error = None;

        for (attempt, languages) in LANGUAGE_ATTEMPTS.iter().enumerate() {
            let fragments = match self.captions.fetch_captions(&video_id, languages).await {
                Ok(fragments) => fragments,
                Err(e) => {
                    tracing::warn!(error = %e, ?languages, "Caption lookup failed");
                    last_error = Some(e);
                    continue;
                }
            };

            let text = join_fragments(fragments);
            if text.is_empty() {
                tracing::warn!(?languages, "Caption track is empty");
                last_error = Some(CaptionError::NoTracks {
                    languages: languages.iter().map(|l| l.to_string()).collect(),
                });
                continue;
            }

            let source_label = if attempt == 0 {
                format!("YouTube Video (ID: {video_id})")
            } else {
                format!("YouTube Video (ID: {video_id}, Non-English)")
            };
            tracing::info!(%video_id, chars = text.len(), "Extracted captions");

            return Ok(ExtractedDocument::new(text, source_label));
        }

        match last_error {
            Some(CaptionError::NoTracks { .. }) | None => {
                Err(ExtractError::NoCaptions { video_id })
            }
            Some(source) => Err(ExtractError::Captions { video_id, source }),
        }
    }
}
