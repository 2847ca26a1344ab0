use std::{future::Future, ops::Deref, sync::LazyLock, time::Duration};

use regex::Regex;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::{ExtractError, ExtractedDocument};

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_5_1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/116.0.0.0 Safari/537.36";

const TEXT_WIDTH: usize = 120;

static NON_CONTENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<noscript\b[^>]*>.*?</noscript\s*>|<template\b[^>]*>.*?</template\s*>",
    )
    .unwrap()
});

/// A fetched page body along with the content type the server declared
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub content_type: Option<String>,
    pub body: String,
}

pub trait PageFetcher {
    fn fetch_page(
        &self,
        url: &Url,
    ) -> impl Future<Output = Result<FetchedPage, ExtractError>> + Send;
}

impl<T: PageFetcher + Sync> PageFetcher for &T {
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, ExtractError> {
        (**self).fetch_page(url).await
    }
}

pub struct HttpPageFetcher(pub reqwest::Client);

impl Deref for HttpPageFetcher {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl HttpPageFetcher {
    /// Builds a fetcher that identifies itself as a desktop browser.
    ///
    /// `accept_invalid_certs` turns off TLS certificate verification and
    /// should only be used for hosts the user trusts.
    pub fn new(timeout: Duration, accept_invalid_certs: bool) -> Result<Self, reqwest::Error> {
        if accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled for website fetches");
        }

        reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map(HttpPageFetcher)
    }
}

fn fetch_error(url: &Url, reason: impl ToString) -> ExtractError {
    ExtractError::Fetch {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, ExtractError> {
        let resp = self
            .get(url.clone())
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))
            .map_err(|e| fetch_error(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(fetch_error(url, format!("HTTP {status}")));
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = resp.text().await.map_err(|e| fetch_error(url, e))?;

        Ok(FetchedPage { content_type, body })
    }
}

/// Whether a `Content-Type` header value denotes a readable text page
fn is_textual(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime.starts_with("text/") || mime == "application/xhtml+xml" || mime == "application/xml"
}

/// Renders the readable text of an html document, dropping scripts,
/// stylesheets and markup
pub fn html_to_text(html: &str) -> Result<String, ExtractError> {
    let stripped = NON_CONTENT_RE.replace_all(html, " ");

    let rendered = html2text::config::plain()
        .string_from_read(stripped.as_bytes(), TEXT_WIDTH)
        .map_err(|e| ExtractError::Markup(e.to_string()))?;

    let mut text = String::with_capacity(rendered.len());
    let mut previous_blank = true;
    for line in rendered.lines().map(str::trim_end) {
        let blank = line.trim().is_empty();
        if blank && previous_blank {
            continue;
        }
        text.push_str(line);
        text.push('\n');
        previous_blank = blank;
    }

    Ok(text.trim().to_string())
}

pub struct WebsiteExtractor<F> {
    fetcher: F,
}

impl<F: PageFetcher> WebsiteExtractor<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    #[tracing::instrument(skip_all, fields(url = %url))]
    pub async fn extract(&self, url: &Url) -> Result<ExtractedDocument, ExtractError> {
        let page = self.fetcher.fetch_page(url).await?;

        if let Some(content_type) = page.content_type.as_deref() {
            if !is_textual(content_type) {
                tracing::error!(%content_type, "Page is not a text document");
                return Err(ExtractError::UnsupportedContent(content_type.into()));
            }
        }

        let text = html_to_text(&page.body)?;
        if text.is_empty() {
            return Err(ExtractError::EmptyContent(url.to_string()));
        }
        tracing::info!(chars = text.len(), "Extracted page text");

        Ok(ExtractedDocument::new(text, format!("Website: {url}")))
    }
}
