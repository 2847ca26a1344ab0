use url::Url;

const VIDEO_MARKERS: [&str; 2] = ["youtube.com", "youtu.be"];

/// Outcome of inspecting the user's input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceClass {
    Video,
    Website,
    Document,
    Invalid,
}

/// Decides which extraction strategy applies.
///
/// An uploaded file always wins. Otherwise a URL mentioning a YouTube domain
/// is a video, any other absolute http(s) URL is a website, and anything else
/// (including no URL at all) is invalid.
pub fn classify(url: Option<&str>, has_file: bool) -> SourceClass {
    if has_file {
        return SourceClass::Document;
    }

    let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) else {
        return SourceClass::Invalid;
    };

    if is_video_url(url) {
        SourceClass::Video
    } else if parse_web_url(url).is_some() {
        SourceClass::Website
    } else {
        SourceClass::Invalid
    }
}

pub fn is_video_url(url: &str) -> bool {
    let url = url.to_ascii_lowercase();
    VIDEO_MARKERS.iter().any(|marker| url.contains(marker))
}

/// Parses `url` as an absolute http(s) URL with a host
pub fn parse_web_url(url: &str) -> Option<Url> {
    Url::parse(url.trim()).ok().filter(|u| {
        matches!(u.scheme(), "http" | "https") && u.host_str().is_some_and(|h| !h.is_empty())
    })
}
