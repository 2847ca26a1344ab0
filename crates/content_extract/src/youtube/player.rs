//! # Watch page parsing
//!
//! Pulls the `ytInitialPlayerResponse` object out of a YouTube watch page and
//! decodes the caption track list and timed text payloads it points to.

use std::{ops::Deref, sync::LazyLock};

use regex::Regex;
use serde::Deserialize;

use crate::{CaptionError, CaptionFragment};

static PLAYER_RESPONSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ytInitialPlayerResponse\s*=\s*\{").unwrap());

#[derive(Debug, Clone)]
pub struct WatchPage(String);

impl WatchPage {
    pub fn new(html: String) -> Self {
        WatchPage(html)
    }

    /// Decodes the player response embedded in the page.
    ///
    /// Only the JSON object itself is read; whatever script follows it on the
    /// same line is ignored.
    pub fn player_response(&self) -> Result<PlayerResponse, CaptionError> {
        let found = PLAYER_RESPONSE_RE
            .find(&self.0)
            .ok_or_else(|| CaptionError::Parse("ytInitialPlayerResponse not found".into()))?;
        let object_start = found.end() - 1;

        serde_json::Deserializer::from_str(&self.0[object_start..])
            .into_iter::<PlayerResponse>()
            .next()
            .ok_or_else(|| CaptionError::Parse("ytInitialPlayerResponse is empty".into()))?
            .map_err(|e| CaptionError::Parse(e.to_string()))
    }
}

impl Deref for WatchPage {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for WatchPage {
    fn from(value: String) -> Self {
        WatchPage(value)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    #[serde(default)]
    pub playability_status: Option<PlayabilityStatus>,
    #[serde(default)]
    pub captions: Option<Captions>,
}

#[derive(Debug, Deserialize)]
pub struct PlayabilityStatus {
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Captions {
    #[serde(rename = "playerCaptionsTracklistRenderer", default)]
    pub tracklist: Option<Tracklist>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tracklist {
    #[serde(default)]
    pub caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    #[serde(default)]
    pub kind: Option<String>,
}

impl CaptionTrack {
    /// Auto generated (speech recognition) tracks are tagged `asr`
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }

    /// `en` matches `en` as well as regional variants like `en-GB`
    pub fn matches_language(&self, language: &str) -> bool {
        let code = self.language_code.to_ascii_lowercase();
        let language = language.to_ascii_lowercase();
        code == language || code.starts_with(&format!("{language}-"))
    }
}

impl PlayerResponse {
    pub fn ensure_playable(&self) -> Result<(), CaptionError> {
        match &self.playability_status {
            Some(status) if status.status != "OK" => Err(CaptionError::Unavailable(
                status.reason.clone().unwrap_or_else(|| status.status.clone()),
            )),
            _ => Ok(()),
        }
    }

    pub fn caption_tracks(&self) -> &[CaptionTrack] {
        self.captions
            .as_ref()
            .and_then(|c| c.tracklist.as_ref())
            .map(|t| t.caption_tracks.as_slice())
            .unwrap_or_default()
    }
}

/// Picks the track to download.
///
/// Languages are tried in order and manually created tracks beat generated
/// ones of the same language. With no languages the first manual track wins,
/// falling back to the first track of any kind.
pub fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    languages: &[&str],
) -> Option<&'a CaptionTrack> {
    if languages.is_empty() {
        return tracks.iter().min_by_key(|t| t.is_generated());
    }

    languages.iter().find_map(|language| {
        tracks
            .iter()
            .filter(|t| t.matches_language(language))
            .min_by_key(|t| t.is_generated())
    })
}

#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimedTextEvent {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    #[serde(default)]
    segs: Option<Vec<TimedTextSegment>>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSegment {
    #[serde(default)]
    utf8: String,
}

/// Decodes a `fmt=json3` timed text payload into caption fragments
pub fn parse_timed_text(payload: &str) -> Result<Vec<CaptionFragment>, CaptionError> {
    let timed_text: TimedText =
        serde_json::from_str(payload).map_err(|e| CaptionError::Parse(e.to_string()))?;

    let fragments = timed_text
        .events
        .into_iter()
        .filter_map(|event| {
            let text = event
                .segs?
                .iter()
                .map(|seg| seg.utf8.as_str())
                .collect::<String>()
                .replace('\n', " ");
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(CaptionFragment::new(
                text,
                event.t_start_ms as f64 / 1000.0,
                event.d_duration_ms as f64 / 1000.0,
            ))
        })
        .collect();

    Ok(fragments)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn track(language_code: &str, kind: Option<&str>) -> CaptionTrack {
        CaptionTrack {
            base_url: format!("https://www.youtube.com/api/timedtext?lang={language_code}"),
            language_code: language_code.into(),
            kind: kind.map(Into::into),
        }
    }

    #[test]
    fn test_player_response_extraction() {
        let html = r#"
            <script nonce="abc">var ytInitialPlayerResponse = {"playabilityStatus":{"status":"OK"},"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=fr","languageCode":"fr","kind":"asr"}]}}};var meta = document.createElement('meta');</script>
        "#;

        let page = WatchPage::from(html.to_string());
        let response = page.player_response().expect("Failed to parse player response");

        response.ensure_playable().expect("Video should be playable");
        let tracks = response.caption_tracks();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].language_code, "fr");
        assert_eq!(
            tracks[0].base_url,
            "https://www.youtube.com/api/timedtext?v=abc&lang=fr"
        );
        assert!(tracks[0].is_generated());
    }

    #[test]
    fn test_missing_player_response() {
        let page = WatchPage::new("<html><body>Nothing here</body></html>".into());
        assert!(matches!(page.player_response(), Err(CaptionError::Parse(_))));
    }

    #[test]
    fn test_video_without_captions_has_no_tracks() {
        let html = r#"var ytInitialPlayerResponse = {"playabilityStatus":{"status":"OK"}};"#;
        let response = WatchPage::new(html.into()).player_response().unwrap();
        assert!(response.caption_tracks().is_empty());
    }

    #[test]
    fn test_unplayable_video() {
        let html = r#"var ytInitialPlayerResponse = {"playabilityStatus":{"status":"LOGIN_REQUIRED","reason":"Sign in to confirm your age"}};"#;
        let response = WatchPage::new(html.into()).player_response().unwrap();

        match response.ensure_playable() {
            Err(CaptionError::Unavailable(reason)) => {
                assert_eq!(reason, "Sign in to confirm your age")
            }
            other => panic!("Expected Unavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_select_track_prefers_manual_in_language() {
        let tracks = vec![
            track("de", None),
            track("en", Some("asr")),
            track("en-GB", None),
        ];

        let selected = select_track(&tracks, &["en"]).unwrap();
        assert_eq!(selected.language_code, "en-GB");
    }

    #[test]
    fn test_select_track_any_language() {
        let tracks = vec![track("fr", Some("asr")), track("es", None)];
        assert_eq!(select_track(&tracks, &[]).unwrap().language_code, "es");

        let generated_only = vec![track("fr", Some("asr"))];
        assert_eq!(
            select_track(&generated_only, &[]).unwrap().language_code,
            "fr"
        );
    }

    #[test]
    fn test_select_track_no_match() {
        let tracks = vec![track("fr", None)];
        assert!(select_track(&tracks, &["en"]).is_none());
        assert!(select_track(&[], &[]).is_none());
    }

    #[test]
    fn test_parse_timed_text() {
        let payload = r#"{
            "wireMagic": "pb3",
            "events": [
                {"tStartMs": 0, "dDurationMs": 2000, "segs": [{"utf8": "Hello"}]},
                {"tStartMs": 1000, "dDurationMs": 10, "aAppend": 1, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 2000, "dDurationMs": 1500, "segs": [{"utf8": "wor"}, {"utf8": "ld"}]},
                {"tStartMs": 3500}
            ]
        }"#;

        let fragments = parse_timed_text(payload).unwrap();
        assert_eq!(
            fragments,
            vec![
                CaptionFragment::new("Hello", 0.0, 2.0),
                CaptionFragment::new("world", 2.0, 1.5),
            ]
        );
    }

    #[test]
    fn test_parse_timed_text_rejects_garbage() {
        assert!(matches!(
            parse_timed_text("<transcript/>"),
            Err(CaptionError::Parse(_))
        ));
    }
}
