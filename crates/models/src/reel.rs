//! Instagram reel URL helpers.

const REEL_MARKER: &str = "instagram.com/reel/";

/// Turn a pasted Instagram reel link into its `/embed` form.
/// Non-Instagram URLs and reel links without a shortcode are only trimmed.
pub fn normalize_embed_url(url: &str) -> String {
    let url = url.trim();
    if !url.contains(REEL_MARKER) || extract_reel_id(url).is_none() {
        return url.to_string();
    }
    let base = url.split('?').next().unwrap_or(url).trim_end_matches('/');
    let base = base.strip_suffix("/embed").unwrap_or(base).trim_end_matches('/');
    format!("{base}/embed")
}

/// True for an Instagram reel link that carries no shortcode.
pub fn is_missing_reel_id(url: &str) -> bool {
    url.contains(REEL_MARKER) && extract_reel_id(url).is_none()
}

/// Extract the reel shortcode from an Instagram reel URL.
pub fn extract_reel_id(url: &str) -> Option<&str> {
    let start = url.find("reel/")? + "reel/".len();
    let rest = &url[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(rest.len());
    if end == 0 { None } else { Some(&rest[..end]) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_embed_once() {
        let expected = "https://www.instagram.com/reel/ABC-1_z/embed";
        assert_eq!(normalize_embed_url("https://www.instagram.com/reel/ABC-1_z/"), expected);
        assert_eq!(normalize_embed_url("https://www.instagram.com/reel/ABC-1_z/embed/"), expected);
        assert_eq!(normalize_embed_url(" https://www.instagram.com/reel/ABC-1_z?utm=1 "), expected);
    }

    #[test]
    fn other_urls_are_left_alone() {
        assert_eq!(normalize_embed_url("https://youtu.be/xyz "), "https://youtu.be/xyz");
        assert_eq!(normalize_embed_url("https://www.instagram.com/reel/"), "https://www.instagram.com/reel/");
    }

    #[test]
    fn extracts_shortcode() {
        assert_eq!(extract_reel_id("https://www.instagram.com/reel/ABC-1_z/embed"), Some("ABC-1_z"));
        assert_eq!(extract_reel_id("https://www.instagram.com/reel/"), None);
        assert_eq!(extract_reel_id("https://example.com/video"), None);
    }

    #[test]
    fn flags_reel_links_without_shortcode() {
        assert!(is_missing_reel_id("https://www.instagram.com/reel/"));
        assert!(!is_missing_reel_id("https://www.instagram.com/reel/ABC/"));
        assert!(!is_missing_reel_id("https://youtu.be/xyz"));
    }
}
