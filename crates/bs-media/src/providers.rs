use url::Url;

/// A hosted video provider: host predicate, id extractor and player url builder.
pub struct Provider {
    pub name: &'static str,
    pub matches_host: fn(&str) -> bool,
    pub extract_id: fn(&Url) -> Option<String>,
    pub build_embed: fn(&Url, &str) -> String,
}

/// Evaluated in order; the first provider that yields an id wins.
pub const PROVIDERS: &[Provider] = &[
    Provider {
        name: "youtube",
        matches_host: youtube_host,
        extract_id: youtube_id,
        build_embed: youtube_embed,
    },
    Provider {
        name: "vimeo",
        matches_host: vimeo_host,
        extract_id: vimeo_id,
        build_embed: vimeo_embed,
    },
    Provider {
        name: "panopto",
        matches_host: panopto_host,
        extract_id: panopto_id,
        build_embed: panopto_embed,
    },
];

pub fn match_provider(url: &Url) -> Option<(&'static Provider, String)> {
    let host = url.host_str()?.to_ascii_lowercase();
    PROVIDERS.iter().find_map(|provider| {
        if !(provider.matches_host)(&host) {
            return None;
        }
        let id = (provider.extract_id)(url)?;
        Some((provider, (provider.build_embed)(url, &id)))
    })
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn path_segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|segments| segments.filter(|segment| !segment.is_empty()).collect())
        .unwrap_or_default()
}

fn youtube_host(host: &str) -> bool {
    host.contains("youtube.com") || host.contains("youtu.be")
}

fn youtube_id(url: &Url) -> Option<String> {
    if let Some(id) = query_value(url, "v") {
        return Some(id);
    }
    let segments = path_segments(url);
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    if host.contains("youtu.be") {
        if let Some(first) = segments.first() {
            return Some((*first).to_string());
        }
    }
    let path = url.path();
    if path.contains("/embed/") || path.contains("/shorts/") {
        return segments.last().map(|last| (*last).to_string());
    }
    None
}

fn youtube_embed(_url: &Url, id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", id)
}

fn vimeo_host(host: &str) -> bool {
    host.contains("vimeo.com")
}

fn vimeo_id(url: &Url) -> Option<String> {
    let last = path_segments(url).last().copied()?;
    last.chars()
        .all(|ch| ch.is_ascii_digit())
        .then(|| last.to_string())
}

fn vimeo_embed(_url: &Url, id: &str) -> String {
    format!("https://player.vimeo.com/video/{}", id)
}

fn panopto_host(host: &str) -> bool {
    host.contains("panopto")
}

fn panopto_id(url: &Url) -> Option<String> {
    query_value(url, "id")
}

fn panopto_embed(url: &Url, id: &str) -> String {
    let id = url::form_urlencoded::byte_serialize(id.as_bytes()).collect::<String>();
    format!(
        "{}/Panopto/Pages/Embed.aspx?id={}&autoplay=false",
        url.origin().ascii_serialization(),
        id
    )
}
