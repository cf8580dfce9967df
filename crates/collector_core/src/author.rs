use url::Url;

/// Best-effort extraction of the post author from an Instagram post URL.
///
/// Only the `.../{owner}/p/{id}/` and `.../{owner}/reel/{id}/` shapes carry
/// the owner; the canonical `.../p/{id}/` form does not, and yields an empty
/// string rather than an error. Submission completeness is checked
/// separately, so a failed derivation just leaves the field for the user.
pub fn derive_post_author(input: &str) -> String {
    let Ok(parsed) = Url::parse(input.trim()) else {
        return String::new();
    };
    let Some(host) = parsed.host_str() else {
        return String::new();
    };
    let host = host.to_ascii_lowercase();
    if host != "instagram.com" && !host.ends_with(".instagram.com") {
        return String::new();
    }

    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|parts| parts.filter(|part| !part.is_empty()).collect())
        .unwrap_or_default();

    match segments.as_slice() {
        [owner, kind, _id, ..] if matches!(*kind, "p" | "reel") => (*owner).to_string(),
        _ => String::new(),
    }
}
