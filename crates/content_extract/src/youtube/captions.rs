use std::ops::Deref;

use reqwest::header::{ACCEPT_LANGUAGE, COOKIE};
use url::Url;

use crate::{
    youtube::{
        player::{parse_timed_text, select_track, CaptionTrack, WatchPage},
        CaptionSource,
    },
    CaptionError, CaptionFragment,
};

/// Caption lookups against YouTube's watch page and timed text endpoint
#[derive(Debug, Clone)]
pub struct YoutubeCaptionClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for YoutubeCaptionClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl Deref for YoutubeCaptionClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

impl YoutubeCaptionClient {
    const BASE_URL: &str = "https://www.youtube.com";

    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: Self::BASE_URL.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Loads the watch page html of `video_id`
    #[tracing::instrument(skip(self))]
    async fn fetch_watch_page(&self, video_id: &str) -> Result<WatchPage, CaptionError> {
        let html = self
            .get(format!("{}/watch", self.base_url))
            .query(&[("v", video_id)])
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            // skips the cookie consent interstitial served to EU visitors
            .header(COOKIE, "CONSENT=YES+cb")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(html.into())
    }

    /// Downloads a caption track as json3 timed text
    #[tracing::instrument(skip_all, fields(language = %track.language_code))]
    async fn fetch_timed_text(
        &self,
        track: &CaptionTrack,
    ) -> Result<Vec<CaptionFragment>, CaptionError> {
        let mut url = Url::parse(&self.base_url)
            .and_then(|base| base.join(&track.base_url))
            .map_err(|e| CaptionError::Parse(format!("Invalid caption track url: {e}")))?;

        let params = url
            .query_pairs()
            .filter(|(key, _)| key != "fmt")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect::<Vec<_>>();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(params)
            .append_pair("fmt", "json3");

        let payload = self
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_timed_text(&payload)
    }
}

impl CaptionSource for YoutubeCaptionClient {
    async fn fetch_captions(
        &self,
        video_id: &str,
        languages: &[&str],
    ) -> Result<Vec<CaptionFragment>, CaptionError> {
        let player_response = self.fetch_watch_page(video_id).await?.player_response()?;
        player_response.ensure_playable()?;

        let track = select_track(player_response.caption_tracks(), languages).ok_or_else(|| {
            CaptionError::NoTracks {
                languages: languages.iter().map(|l| l.to_string()).collect(),
            }
        })?;
        tracing::debug!(
            language = %track.language_code,
            generated = track.is_generated(),
            "Selected caption track"
        );

        self.fetch_timed_text(track).await
    }
}
