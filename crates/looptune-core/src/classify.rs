//! Deciding what the user asked for.

use crate::normalize::normalize;

/// What a piece of user input refers to. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaReference {
    /// A playlist link, or any other http(s) link.
    Playlist {
        url: String,
        /// Value of the `list=` query parameter, when present.
        playlist_id: Option<String>,
    },
    /// Free text to search for.
    Search { query: String },
}

impl MediaReference {
    pub fn is_playlist(&self) -> bool {
        matches!(self, Self::Playlist { .. })
    }
}

/// Normalize `raw` and classify it.
///
/// Anything mentioning `playlist` or `list=` (case-insensitive) is a playlist.
/// Any other input starting with `http` is handed to the playlist path too:
/// yt-dlp's flat listing of a single video link yields that video's own id,
/// so a plain video link plays as a one-track queue.
pub fn classify(raw: &str) -> MediaReference {
    let input = normalize(raw);
    let lower = input.to_ascii_lowercase();

    if lower.contains("playlist") || lower.contains("list=") || lower.starts_with("http") {
        let playlist_id = extract_playlist_id(&input);
        MediaReference::Playlist {
            url: input,
            playlist_id,
        }
    } else {
        MediaReference::Search { query: input }
    }
}

/// Value of the first `list` key in the query string, up to the next `&`.
pub fn extract_playlist_id(url: &str) -> Option<String> {
    let query = match url.split_once('?') {
        Some((_, query)) => query,
        None => url,
    };
    let query = query.split('#').next().unwrap_or(query);

    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.eq_ignore_ascii_case("list"))
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
