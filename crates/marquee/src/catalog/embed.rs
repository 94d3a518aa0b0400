//! Embed-id extraction for YouTube watch and share URLs.

const VIDEO_ID_LEN: usize = 11;

/// Extract the 11-character video id from a `youtube.com/watch?v=` or
/// `youtu.be/` URL. Anything else yields `None`.
pub fn youtube_embed_id(url: &str) -> Option<&str> {
    let rest = url
        .split_once("youtube.com/watch?v=")
        .or_else(|| url.split_once("youtu.be/"))
        .map(|(_, rest)| rest)?;
    take_video_id(rest)
}

/// Embeddable player URL for a recognized video link.
pub fn youtube_embed_url(url: &str) -> Option<String> {
    youtube_embed_id(url).map(|id| format!("https://www.youtube.com/embed/{id}"))
}

fn take_video_id(rest: &str) -> Option<&str> {
    if rest.len() < VIDEO_ID_LEN || !rest.is_char_boundary(VIDEO_ID_LEN) {
        return None;
    }
    let candidate = &rest[..VIDEO_ID_LEN];
    candidate
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        .then_some(candidate)
}
