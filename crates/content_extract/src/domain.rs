use std::fmt;

use url::Url;

/// The three kinds of content the pipeline knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Video,
    Website,
    Document,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::Video => "video",
            SourceKind::Website => "website",
            SourceKind::Document => "document",
        };
        f.write_str(name)
    }
}

/// An uploaded file, held fully in memory
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

impl fmt::Debug for DocumentUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentUpload")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A classified source, carrying whatever its extraction strategy needs
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Video { url: String },
    Website { url: Url },
    Document(DocumentUpload),
}

impl Source {
    pub fn kind(&self) -> SourceKind {
        match self {
            Source::Video { .. } => SourceKind::Video,
            Source::Website { .. } => SourceKind::Website,
            Source::Document(_) => SourceKind::Document,
        }
    }
}

/// Plain text pulled out of a source, plus a human readable label for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    pub text: String,
    pub source_label: String,
}

impl ExtractedDocument {
    pub fn new(text: impl Into<String>, source_label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_label: source_label.into(),
        }
    }
}

/// A single timed caption line. `start` and `duration` are in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionFragment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl CaptionFragment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}
