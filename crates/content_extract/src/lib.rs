//! # Content Extract
//!
//! Turns a user supplied source (a YouTube link, a web page or an uploaded
//! PDF) into a single block of plain text ready to be summarized.
//!
//! Each source kind has its own strategy behind a small I/O seam
//! ([`youtube::CaptionSource`], [`website::PageFetcher`],
//! [`document::PageReader`]) so the strategies can be exercised without the
//! network. [`ContentExtractor`] dispatches a [`Source`] to the matching
//! strategy.

mod classifier;
pub mod document;
mod domain;
mod error;
mod extractor;
pub mod website;
pub mod youtube;

pub use classifier::{classify, is_video_url, parse_web_url, SourceClass};
pub use domain::{CaptionFragment, DocumentUpload, ExtractedDocument, Source, SourceKind};
pub use error::{CaptionError, ExtractError};
pub use extractor::ContentExtractor;
