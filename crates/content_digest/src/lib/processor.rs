pub mod builder;

use content_extract::{
    document::PageReader, website::PageFetcher, youtube::CaptionSource, ContentExtractor,
    ExtractedDocument,
};

use crate::{
    budget::{input_budget, truncate_to_budget},
    prompt::render_prompt,
    ApiKey, ContentRequest, Digest, DigestError, SubmissionForm, Summarizer, SummaryOptions,
    SummaryRequest,
};

/// Runs one submission through validation, extraction and summarization.
///
/// Holds only stateless clients, so a single processor can serve any number
/// of runs.
pub struct DigestProcessor<C, F, R, S>
where
    C: CaptionSource,
    F: PageFetcher,
    R: PageReader,
    S: Summarizer,
{
    extractor: ContentExtractor<C, F, R>,
    summarizer: S,
}

impl<C, F, R, S> DigestProcessor<C, F, R, S>
where
    C: CaptionSource,
    F: PageFetcher,
    R: PageReader,
    S: Summarizer,
{
    pub fn new(extractor: ContentExtractor<C, F, R>, summarizer: S) -> Self {
        DigestProcessor {
            extractor,
            summarizer,
        }
    }

    /// Validates the raw form before anything touches the network
    #[tracing::instrument(skip_all)]
    pub async fn run(&self, form: SubmissionForm) -> Result<Digest, DigestError> {
        let (api_key, request) = form
            .validate()
            .inspect_err(|e| tracing::warn!(error = %e, "Rejected submission"))?;

        self.process(&api_key, &request).await
    }

    #[tracing::instrument(skip_all, fields(kind = %request.kind(), model = %request.options.model_name))]
    pub async fn process(
        &self,
        api_key: &ApiKey,
        request: &ContentRequest,
    ) -> Result<Digest, DigestError> {
        let document = self
            .extractor
            .extract(&request.source)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to extract content"))?;
        tracing::info!(source = %document.source_label, "Extracted content");

        let summary = self
            .summarize(api_key, &document, &request.options)
            .await?;

        Ok(Digest {
            summary,
            source_label: document.source_label,
            model: request.options.model_name.clone(),
        })
    }

    /// Fits the text to the model's budget, renders the prompt and makes the
    /// single completion call
    async fn summarize(
        &self,
        api_key: &ApiKey,
        document: &ExtractedDocument,
        options: &SummaryOptions,
    ) -> Result<String, DigestError> {
        let budget = input_budget(
            self.summarizer.context_window(&options.model_name),
            options.summary_length,
        );
        let text = truncate_to_budget(&document.text, budget);
        let prompt = render_prompt(options.style, options.summary_length, &text);

        let response = self
            .summarizer
            .summarize(
                api_key,
                SummaryRequest {
                    model: &options.model_name,
                    prompt: &prompt,
                },
            )
            .await
            .map_err(|e| -> DigestError {
                tracing::error!(error = ?e, "Failed to summarize content");
                e.into()
            })?;

        Ok(response.summary)
    }
}
