use crate::css::{contains_url_function, sanitize_css};
use crate::dom::Element;
use crate::sanitize::SanitizeReport;
use crate::tables::{SanitizeMode, ANCHOR_TAG, URL_BEARING_ATTRS};
use crate::uri::{is_safe_link, strip_invisible, validate_uri};

/// How an attribute is treated, in the order the rules are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeClass {
    /// Any name starting with `on`, including handlers that do not exist yet.
    EventHandler,
    DataOrAria,
    KnownAllowed,
    Uri,
    Style,
    /// `fill`, `stroke`, `filter` ... whose value contains `url(`.
    UrlBearingPresentation,
    Disallowed,
}

pub fn classify_attribute(mode: SanitizeMode, name: &str, value: &str) -> AttributeClass {
    if strip_invisible(name).to_lowercase().starts_with("on") {
        return AttributeClass::EventHandler;
    }

    let lower = name.to_lowercase();
    if lower.starts_with("data-") || lower.starts_with("aria-") {
        return AttributeClass::DataOrAria;
    }
    if !mode.allowed_attrs().contains(lower.as_str()) {
        return AttributeClass::Disallowed;
    }

    match lower.as_str() {
        "href" | "xlink:href" => AttributeClass::Uri,
        "style" => AttributeClass::Style,
        _ if URL_BEARING_ATTRS.contains(lower.as_str()) && contains_url_function(value) => {
            AttributeClass::UrlBearingPresentation
        }
        _ => AttributeClass::KnownAllowed,
    }
}

fn uri_allowed(mode: SanitizeMode, tag: &str, value: &str) -> bool {
    match mode {
        SanitizeMode::VectorGraphics => validate_uri(tag, value).is_some(),
        // links only, and only on anchors
        SanitizeMode::EmbeddedDocument => tag == ANCHOR_TAG && is_safe_link(value),
    }
}

/// Drops or rewrites the attributes of one element in place. Children are
/// not touched.
pub fn sanitize_attributes(element: &mut Element, mode: SanitizeMode, report: &mut SanitizeReport) {
    let tag = element.tag();
    element.attributes.retain_mut(|attr| {
        let keep = match classify_attribute(mode, &attr.name, &attr.value) {
            AttributeClass::EventHandler | AttributeClass::Disallowed => false,
            AttributeClass::DataOrAria | AttributeClass::KnownAllowed => true,
            AttributeClass::Uri => uri_allowed(mode, &tag, &attr.value),
            AttributeClass::Style | AttributeClass::UrlBearingPresentation => {
                let cleaned = sanitize_css(&attr.value);
                if cleaned != attr.value {
                    log::trace!("Rewrote {} on <{}>", attr.name, tag);
                    report.rewritten_values += 1;
                    attr.value = cleaned;
                }
                true
            }
        };
        if !keep {
            log::trace!("Removed attribute {} from <{}>", attr.name, tag);
            report.removed_attributes += 1;
        }
        keep
    });
}
