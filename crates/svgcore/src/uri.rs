use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

use crate::tables::ANCHOR_TAG;

lazy_static! {
    static ref SAFE_LINK_PROTOCOL: Regex =
        Regex::new(r"(?i)^(?:https?:|mailto:)").expect("Invalid SAFE_LINK_PROTOCOL regex pattern");
    static ref DATA_URI: Regex = Regex::new(r"(?i)^data:").expect("Invalid DATA_URI regex pattern");
    // image/svg+xml is deliberately absent: it could carry a second, unsanitized document.
    static ref RASTER_DATA_URI: Regex = Regex::new(
        r"(?i)^data:image/(?:png|jpeg|jpg|gif|webp|avif|bmp|tiff|x-icon|vnd\.microsoft\.icon)[;,]"
    )
    .expect("Invalid RASTER_DATA_URI regex pattern");
}

/// Control characters, spaces and invisible separators that browsers skip
/// when sniffing a scheme (`java\0script:`, `&#x09;javascript:` ...).
pub fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{0000}'..='\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{180E}'
            | '\u{2000}'..='\u{2029}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

pub fn strip_invisible(value: &str) -> Cow<'_, str> {
    if value.chars().any(is_invisible) {
        Cow::Owned(value.chars().filter(|c| !is_invisible(*c)).collect())
    } else {
        Cow::Borrowed(value)
    }
}

/// Which URI forms an element may reference, derived from its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriContext {
    /// `<image>`, `<feImage>`
    RasterDataOnly,
    /// `<use>`
    FragmentOnly,
    /// `<a>`
    SafeLinkProtocolOnly,
    DataOrFragment,
}

impl UriContext {
    pub fn for_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "image" | "feimage" => UriContext::RasterDataOnly,
            "use" => UriContext::FragmentOnly,
            ANCHOR_TAG => UriContext::SafeLinkProtocolOnly,
            _ => UriContext::DataOrFragment,
        }
    }

    /// `stripped` must already have gone through [`strip_invisible`].
    pub fn accepts(self, stripped: &str) -> bool {
        match self {
            UriContext::RasterDataOnly => RASTER_DATA_URI.is_match(stripped),
            UriContext::FragmentOnly => is_fragment(stripped),
            UriContext::SafeLinkProtocolOnly => SAFE_LINK_PROTOCOL.is_match(stripped),
            UriContext::DataOrFragment => DATA_URI.is_match(stripped) || is_fragment(stripped),
        }
    }
}

pub fn is_fragment(stripped: &str) -> bool {
    stripped.starts_with('#')
}

/// `http:`, `https:` or `mailto:` after invisible characters are removed.
pub fn is_safe_link(value: &str) -> bool {
    SAFE_LINK_PROTOCOL.is_match(&strip_invisible(value))
}

/// Returns the original value when `tag` may reference it, `None` when the
/// attribute carrying it has to go. Values are never rewritten.
pub fn validate_uri<'a>(tag: &str, value: &'a str) -> Option<&'a str> {
    let stripped = strip_invisible(value);
    if UriContext::for_tag(tag).accepts(&stripped) {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_invisible() {
        assert_eq!(strip_invisible("java\0script:"), "javascript:");
        assert_eq!(strip_invisible(" \tjava\u{200B}scr\u{00A0}ipt:\n"), "javascript:");
        assert_eq!(strip_invisible("\u{FEFF}#id"), "#id");
        assert!(matches!(strip_invisible("#plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_context_for_tag() {
        assert_eq!(UriContext::for_tag("image"), UriContext::RasterDataOnly);
        assert_eq!(UriContext::for_tag("feImage"), UriContext::RasterDataOnly);
        assert_eq!(UriContext::for_tag("use"), UriContext::FragmentOnly);
        assert_eq!(UriContext::for_tag("A"), UriContext::SafeLinkProtocolOnly);
        assert_eq!(UriContext::for_tag("textPath"), UriContext::DataOrFragment);
    }

    #[test]
    fn test_anchor_links() {
        assert_eq!(validate_uri("a", "https://example.com"), Some("https://example.com"));
        assert!(validate_uri("a", "HTTP://example.com").is_some());
        assert!(validate_uri("a", "mailto:someone@example.com").is_some());
        assert!(validate_uri("a", "javascript:alert(1)").is_none());
        assert!(validate_uri("a", " java\0script:alert(1)").is_none());
        assert!(validate_uri("a", "\\6Aavascript:alert(1)").is_none());
        assert!(validate_uri("a", "#local").is_none());
    }

    #[test]
    fn test_image_requires_raster_data() {
        assert!(validate_uri("image", "data:image/png;base64,AAA").is_some());
        assert!(validate_uri("image", "DATA:IMAGE/JPEG,xyz").is_some());
        assert!(validate_uri("feImage", "data:image/vnd.microsoft.icon;base64,AAA").is_some());
        assert!(validate_uri("image", "data:image/svg+xml;base64,AAA").is_none());
        assert!(validate_uri("image", "data:image/pngx;base64,AAA").is_none());
        assert!(validate_uri("image", "https://evil.example/x.png").is_none());
        assert!(validate_uri("image", "#frag").is_none());
    }

    #[test]
    fn test_use_requires_fragment() {
        assert_eq!(validate_uri("use", "#y"), Some("#y"));
        assert!(validate_uri("use", "https://evil.example/x.svg#y").is_none());
        assert!(validate_uri("use", "data:image/svg+xml,<svg/>").is_none());
    }

    #[test]
    fn test_other_elements_accept_data_or_fragment() {
        assert!(validate_uri("textpath", "#curve").is_some());
        assert!(validate_uri("font-face-uri", "data:font/woff2;base64,AAA").is_some());
        assert!(validate_uri("lineargradient", "https://evil.example/g").is_none());
        assert!(validate_uri("mpath", "javascript:alert(1)").is_none());
    }

    #[test]
    fn test_is_safe_link() {
        assert!(is_safe_link("https://example.com"));
        assert!(is_safe_link("\u{2003}mailto:x@example.com"));
        assert!(!is_safe_link("vbscript:msgbox"));
    }
}
