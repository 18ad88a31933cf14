//! Stylesheet filtering for `<style>` text, `style=""` values and `url()`
//! presentation attributes.
//!
//! This is a pattern-based pass over escape-decoded text, not a CSS
//! tokenizer. Escapes are decoded exactly once and comments dropped before
//! any keyword is matched. The pass is repeated while a removal splices two
//! fragments into a new forbidden token, up to [`MAX_PASSES`]; text that is
//! still changing after that is dropped entirely.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::uri::{is_fragment, strip_invisible};

lazy_static! {
    static ref CSS_ESCAPE: Regex = Regex::new(r"\\([0-9a-fA-F]{1,6})\s?|\\([^\n])")
        .expect("Invalid CSS_ESCAPE regex pattern");
    // Unterminated comments run to end of input.
    static ref COMMENT: Regex =
        Regex::new(r"(?s)/\*.*?(?:\*/|$)").expect("Invalid COMMENT regex pattern");
    // Quoted and url() targets first, so a ';' inside the target does not end the match early.
    static ref IMPORT_RULE: Regex = Regex::new(
        r#"(?i)@import\s+(?:url\s*\([^)]*\)|"[^"]*"|'[^']*')[^;]*;?|@import[^;]*;?"#
    )
    .expect("Invalid IMPORT_RULE regex pattern");
    static ref EXPRESSION: Regex =
        Regex::new(r"(?i)expression\s*\([^)]*\)").expect("Invalid EXPRESSION regex pattern");
    static ref MOZ_BINDING: Regex =
        Regex::new(r"(?i)-moz-binding\s*:[^;]*").expect("Invalid MOZ_BINDING regex pattern");
    static ref BEHAVIOR: Regex =
        Regex::new(r"(?i)behavior\s*:[^;]*").expect("Invalid BEHAVIOR regex pattern");
    // image-set() fetches bare strings, not just url() tokens.
    static ref IMAGE_SET: Regex = Regex::new(r"(?i)(?:-webkit-)?image-set\s*\(")
        .expect("Invalid IMAGE_SET regex pattern");
    // An unterminated url( still fetches at end of input, hence `$`.
    static ref URL_TOKEN: Regex =
        Regex::new(r#"(?is)url\s*\(\s*(?:"(.*?)"|'(.*?)'|(.*?))\s*(?:\)|$)"#)
            .expect("Invalid URL_TOKEN regex pattern");
    static ref SAFE_CSS_DATA_URI: Regex = Regex::new(
        r"(?i)^data:(?:image/(?:png|jpeg|jpg|gif|webp|avif)|font/(?:woff2?|opentype|truetype|sfnt)|application/(?:x-font-woff|font-woff2?|x-font-ttf|x-font-opentype|font-sfnt))[;,]"
    )
    .expect("Invalid SAFE_CSS_DATA_URI regex pattern");
    static ref URL_FUNCTION: Regex =
        Regex::new(r"(?i)url\s*\(").expect("Invalid URL_FUNCTION regex pattern");
}

/// Replaces `\HHHHHH ` and `\c` escapes with the characters they stand for.
/// Zero, surrogates and values past U+10FFFF become U+FFFD.
pub fn decode_css_escapes(css: &str) -> String {
    CSS_ESCAPE
        .replace_all(css, |caps: &Captures| {
            if let Some(hex) = caps.get(1) {
                let decoded = u32::from_str_radix(hex.as_str(), 16)
                    .ok()
                    .filter(|cp| *cp != 0)
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                decoded.to_string()
            } else {
                caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default()
            }
        })
        .into_owned()
}

/// Decodes escapes once, then drops leftover backslashes and comments. A
/// decoded `\5c` can therefore never start a second escape.
fn normalize(css: &str) -> String {
    let decoded = decode_css_escapes(css).replace('\\', "");
    COMMENT.replace_all(&decoded, "").into_owned()
}

/// `true` when a presentation attribute value contains a `url(` token,
/// escaped spellings (`u\72 l(`) included.
pub fn contains_url_function(value: &str) -> bool {
    URL_FUNCTION.is_match(&normalize(value))
}

fn is_allowed_url_payload(payload: &str) -> bool {
    let stripped = strip_invisible(payload);
    is_fragment(&stripped) || SAFE_CSS_DATA_URI.is_match(&stripped)
}

fn filter_url_tokens(css: &str) -> String {
    URL_TOKEN
        .replace_all(css, |caps: &Captures| {
            let payload = caps
                .get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();
            if is_allowed_url_payload(payload) {
                caps[0].to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

fn sanitize_css_once(css: &str) -> String {
    let normalized = normalize(css);
    let without_imports = IMPORT_RULE.replace_all(&normalized, "");
    let without_expressions = EXPRESSION.replace_all(&without_imports, "");
    let without_bindings = MOZ_BINDING.replace_all(&without_expressions, "");
    let without_behaviors = BEHAVIOR.replace_all(&without_bindings, "");
    let without_image_sets = IMAGE_SET.replace_all(&without_behaviors, "(");
    filter_url_tokens(&without_image_sets)
}

/// Upper bound on re-runs of the pipeline for one value.
pub const MAX_PASSES: usize = 4;

/// Cleans free-form style text. Surviving `url()` tokens reference either a
/// fragment or an inline raster image or web font.
pub fn sanitize_css(css: &str) -> String {
    let mut current = sanitize_css_once(css);
    for _ in 1..MAX_PASSES {
        let next = sanitize_css_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
    log::debug!(
        "Dropped style text still changing after {} passes",
        MAX_PASSES
    );
    String::new()
}
