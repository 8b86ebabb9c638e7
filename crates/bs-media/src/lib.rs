//! Media reference resolution.
//!
//! Turns a node's declared media kind and url into a [`ResolvedMedia`]
//! descriptor. Resolution looks only at the url's structure and never
//! fails: a url nothing recognizes is embedded verbatim.

mod providers;

use std::sync::OnceLock;

use bs_core::{MediaKind, MediaMode, ResolvedMedia};
use regex::Regex;
use url::Url;

pub use providers::{match_provider, Provider, PROVIDERS};

fn direct_media_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?i)\.(mp4|webm|ogg|mp3|wav)(?:[?#].*)?$")
            .expect("direct media regex should compile")
    })
}

/// Absolute urls are judged by their path alone; anything else by the raw text.
pub fn is_direct_media_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => direct_media_regex().is_match(parsed.path()),
        Err(_) => direct_media_regex().is_match(url),
    }
}

pub fn resolve(kind: MediaKind, url: &str, transcript_url: Option<&str>) -> ResolvedMedia {
    let url = url.trim();
    if kind == MediaKind::None || url.is_empty() {
        return ResolvedMedia::none(kind);
    }

    let transcript = transcript_url
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    match kind {
        MediaKind::None => ResolvedMedia::none(kind),
        MediaKind::Image => direct_file(kind, url, None),
        MediaKind::Audio => direct_file(kind, url, transcript),
        MediaKind::Video => {
            if is_direct_media_url(url) {
                return direct_file(kind, url, transcript);
            }
            let embed_url = embed_url_for(url);
            ResolvedMedia {
                mode: MediaMode::Embed,
                kind,
                url: url.to_string(),
                embed_url: Some(embed_url),
                show_transcript: transcript.is_some(),
                transcript_url: transcript,
            }
        }
    }
}

/// Provider player url for `raw`, or `raw` itself when no provider claims it.
pub fn embed_url_for(raw: &str) -> String {
    let Ok(parsed) = Url::parse(raw) else {
        tracing::trace!(url = raw, "media url does not parse, embedding verbatim");
        return raw.to_string();
    };
    match match_provider(&parsed) {
        Some((provider, embed)) => {
            tracing::trace!(url = raw, provider = provider.name, "media url normalized");
            embed
        }
        None => raw.to_string(),
    }
}

fn direct_file(kind: MediaKind, url: &str, transcript: Option<String>) -> ResolvedMedia {
    ResolvedMedia {
        mode: MediaMode::DirectFile,
        kind,
        url: url.to_string(),
        embed_url: None,
        show_transcript: transcript.is_some(),
        transcript_url: transcript,
    }
}
