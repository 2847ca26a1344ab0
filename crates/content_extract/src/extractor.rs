use std::time::Duration;

use crate::{
    document::{DocumentExtractor, PageReader, PdfPageReader},
    website::{HttpPageFetcher, PageFetcher, WebsiteExtractor},
    youtube::{captions::YoutubeCaptionClient, CaptionSource, VideoExtractor},
    ExtractError, ExtractedDocument, Source,
};

/// Routes a [`Source`] to the strategy for its kind
pub struct ContentExtractor<C, F, R> {
    video: VideoExtractor<C>,
    website: WebsiteExtractor<F>,
    document: DocumentExtractor<R>,
}

impl<C, F, R> ContentExtractor<C, F, R>
where
    C: CaptionSource,
    F: PageFetcher,
    R: PageReader,
{
    pub fn new(captions: C, fetcher: F, reader: R) -> Self {
        Self {
            video: VideoExtractor::new(captions),
            website: WebsiteExtractor::new(fetcher),
            document: DocumentExtractor::new(reader),
        }
    }

    #[tracing::instrument(skip_all, fields(kind = %source.kind()))]
    pub async fn extract(&self, source: &Source) -> Result<ExtractedDocument, ExtractError> {
        match source {
            Source::Video { url } => self.video.extract(url).await,
            Source::Website { url } => self.website.extract(url).await,
            Source::Document(upload) => self.document.extract(upload),
        }
    }
}

impl ContentExtractor<YoutubeCaptionClient, HttpPageFetcher, PdfPageReader> {
    /// Extractor backed by live HTTP clients and the PDF reader
    pub fn http(timeout: Duration, accept_invalid_certs: bool) -> Result<Self, reqwest::Error> {
        let captions_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self::new(
            YoutubeCaptionClient::new(captions_client),
            HttpPageFetcher::new(timeout, accept_invalid_certs)?,
            PdfPageReader,
        ))
    }
}
