//! Video id extraction from user-pasted links.

use url::Url;

fn is_youtube_host(host: &str) -> bool {
    let h = host.to_ascii_lowercase();
    h == "youtube.com"
        || h == "youtu.be"
        || h == "youtube-nocookie.com"
        || h.ends_with(".youtube.com")
        || h.ends_with(".youtube-nocookie.com")
}

/// Ids are exactly 11 characters of `[A-Za-z0-9_-]`.
pub fn is_valid_video_id(id: &str) -> bool {
    id.len() == 11
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Extract the video id from a YouTube link.
///
/// Handles `watch?v=`, `youtu.be/<id>`, and the `/embed/`, `/v/`,
/// `/shorts/` and `/live/` path forms. Links without a scheme are read as
/// `https`; any scheme other than `http`/`https` is rejected.
pub fn extract_video_id(link: &str) -> Option<String> {
    let link = link.trim();
    let parsed = Url::parse(link)
        .or_else(|_| Url::parse(&format!("https://{link}")))
        .ok()?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    let host = parsed.host_str()?;
    if !is_youtube_host(host) {
        return None;
    }

    let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());
    let candidate = if host.eq_ignore_ascii_case("youtu.be") {
        segments.next().map(str::to_string)
    } else {
        match segments.next() {
            Some("watch") => parsed
                .query_pairs()
                .find(|(k, _)| k == "v")
                .map(|(_, v)| v.trim().to_string()),
            Some("embed" | "v" | "shorts" | "live") => segments.next().map(str::to_string),
            _ => None,
        }
    };

    candidate.filter(|id| is_valid_video_id(id))
}
