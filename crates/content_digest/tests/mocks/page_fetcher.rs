use std::sync::{Arc, Mutex};

use content_extract::{
    website::{FetchedPage, PageFetcher},
    ExtractError,
};
use url::Url;

#[derive(Clone)]
pub struct MockPageFetcher {
    pub html: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockPageFetcher {
    pub fn new(html: &str) -> Self {
        Self {
            html: html.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::new("")
        }
    }
}

impl Default for MockPageFetcher {
    fn default() -> Self {
        Self::new("<html><body><p>Default page</p></body></html>")
    }
}

impl PageFetcher for MockPageFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, ExtractError> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(ExtractError::Fetch {
                url: url.to_string(),
                reason: msg.clone(),
            });
        }
        Ok(FetchedPage {
            content_type: Some("text/html; charset=utf-8".into()),
            body: self.html.clone(),
        })
    }
}
