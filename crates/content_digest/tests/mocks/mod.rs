pub mod caption_source;
pub mod page_fetcher;
pub mod page_reader;
pub mod summarizer;
