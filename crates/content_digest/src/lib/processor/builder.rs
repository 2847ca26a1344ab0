use content_extract::{
    document::PageReader, website::PageFetcher, youtube::CaptionSource, ContentExtractor,
};

use crate::{DigestProcessor, Summarizer};

pub struct DigestProcessorBuilder<E = (), S = ()> {
    extractor: E,
    summarizer: S,
}

impl DigestProcessorBuilder {
    pub fn new() -> Self {
        Self {
            extractor: (),
            summarizer: (),
        }
    }
}

impl Default for DigestProcessorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, S> DigestProcessorBuilder<E, S> {
    pub fn extractor<C, F, R>(
        self,
        extractor: ContentExtractor<C, F, R>,
    ) -> DigestProcessorBuilder<ContentExtractor<C, F, R>, S>
    where
        C: CaptionSource,
        F: PageFetcher,
        R: PageReader,
    {
        DigestProcessorBuilder {
            extractor,
            summarizer: self.summarizer,
        }
    }

    pub fn summarizer<S2: Summarizer>(self, summarizer: S2) -> DigestProcessorBuilder<E, S2> {
        DigestProcessorBuilder {
            extractor: self.extractor,
            summarizer,
        }
    }
}

impl<C, F, R, S> DigestProcessorBuilder<ContentExtractor<C, F, R>, S>
where
    C: CaptionSource,
    F: PageFetcher,
    R: PageReader,
    S: Summarizer,
{
    pub fn build(self) -> DigestProcessor<C, F, R, S> {
        DigestProcessor::new(self.extractor, self.summarizer)
    }
}
