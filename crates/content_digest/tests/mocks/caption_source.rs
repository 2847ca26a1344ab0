use std::sync::{Arc, Mutex};

use content_extract::{youtube::CaptionSource, CaptionError, CaptionFragment};

#[derive(Clone)]
pub struct MockCaptionSource {
    pub language: String,
    pub lines: Vec<String>,
    pub calls: Arc<Mutex<Vec<Vec<String>>>>,
    pub fail_with: Option<String>,
}

impl MockCaptionSource {
    pub fn new(language: &str, lines: &[&str]) -> Self {
        Self {
            language: language.to_string(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::new("en", &[])
        }
    }
}

impl Default for MockCaptionSource {
    fn default() -> Self {
        Self::new("en", &["Hello", "world"])
    }
}

impl CaptionSource for MockCaptionSource {
    async fn fetch_captions(
        &self,
        _video_id: &str,
        languages: &[&str],
    ) -> Result<Vec<CaptionFragment>, CaptionError> {
        self.calls
            .lock()
            .unwrap()
            .push(languages.iter().map(|l| l.to_string()).collect());

        if let Some(ref msg) = self.fail_with {
            return Err(CaptionError::Unavailable(msg.clone()));
        }

        if !languages.is_empty() && !languages.contains(&self.language.as_str()) {
            return Err(CaptionError::NoTracks {
                languages: languages.iter().map(|l| l.to_string()).collect(),
            });
        }

        Ok(self
            .lines
            .iter()
            .enumerate()
            .map(|(idx, text)| CaptionFragment::new(text.as_str(), idx as f64 * 2.0, 2.0))
            .collect())
    }
}
