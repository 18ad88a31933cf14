use crate::attrs::sanitize_attributes;
use crate::css::sanitize_css;
use crate::dom::{self, Element, Node};
use crate::error::SanitizeError;
use crate::tables::{
    SanitizeMode, ANIMATION_TAGS, BLOCKED_HTML_TAGS, EMBEDDED_DOCUMENT_CONTAINER, STYLE_TAG,
    SVG_ROOT_TAG,
};
use crate::uri::strip_invisible;

/// What was dropped or rewritten while sanitizing one document. Partial
/// removal is the normal outcome, not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub removed_elements: usize,
    pub removed_attributes: usize,
    pub rewritten_values: usize,
}

impl SanitizeReport {
    pub fn is_clean(&self) -> bool {
        self.removed_elements == 0 && self.removed_attributes == 0 && self.rewritten_values == 0
    }
}

#[derive(Debug, Clone, Default)]
pub struct SanitizeOptions {
    /// Inputs longer than this many bytes are rejected before parsing.
    pub max_input_bytes: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Sanitized {
    pub svg: String,
    pub report: SanitizeReport,
}

/// `true` when an `<animate>`/`<set>`-style element would rewrite a link or
/// an event handler at render time. Prefixed targets (`x:href`) count too,
/// and every `attributeName` spelling on the element is checked.
pub fn is_animation_dangerous(element: &Element) -> bool {
    element
        .attributes
        .iter()
        .filter(|attr| attr.name.to_lowercase() == "attributename")
        .any(|attr| is_protected_target(&attr.value))
}

fn is_protected_target(target: &str) -> bool {
    let target = strip_invisible(target).to_lowercase();
    let local = target.rsplit(':').next().unwrap_or_default();
    local == "href" || target.starts_with("on") || local.starts_with("on")
}

/// Returns `false` when `child` has to be detached from its parent.
fn sanitize_child(child: &mut Element, mode: SanitizeMode, report: &mut SanitizeReport) -> bool {
    let tag = child.tag();
    match mode {
        SanitizeMode::VectorGraphics => {
            if tag == EMBEDDED_DOCUMENT_CONTAINER {
                sanitize_attributes(child, SanitizeMode::VectorGraphics, report);
                sanitize_children(child, SanitizeMode::EmbeddedDocument, report);
            } else if tag == STYLE_TAG {
                sanitize_attributes(child, mode, report);
                let css = child.text_content();
                let cleaned = sanitize_css(&css);
                if cleaned != css || child.child_element_count() > 0 {
                    report.rewritten_values += 1;
                }
                child.set_text_content(cleaned);
            } else if ANIMATION_TAGS.contains(tag.as_str()) && is_animation_dangerous(child) {
                return false;
            } else if mode.allowed_tags().contains(tag.as_str()) {
                sanitize_attributes(child, mode, report);
                sanitize_children(child, mode, report);
            } else {
                return false;
            }
        }
        SanitizeMode::EmbeddedDocument => {
            if BLOCKED_HTML_TAGS.contains(tag.as_str()) {
                return false;
            } else if mode.allowed_tags().contains(tag.as_str()) {
                sanitize_attributes(child, mode, report);
                sanitize_children(child, mode, report);
            } else {
                return false;
            }
        }
    }
    true
}

// Reverse order: removing a child never shifts an unvisited sibling.
fn sanitize_children(node: &mut Element, mode: SanitizeMode, report: &mut SanitizeReport) {
    for index in (0..node.children.len()).rev() {
        let Node::Element(child) = &mut node.children[index] else {
            continue;
        };
        if !sanitize_child(child, mode, report) {
            log::trace!("Removed <{}> ({:?})", child.name, mode);
            node.children.remove(index);
            report.removed_elements += 1;
        }
    }
}

/// Sanitizes a parsed tree in place. Fails when the root is not `<svg>` or
/// when no child element survives.
pub fn sanitize_tree(root: &mut Element) -> Result<SanitizeReport, SanitizeError> {
    if root.tag() != SVG_ROOT_TAG {
        return Err(SanitizeError::UnexpectedRoot {
            found: root.name.clone(),
        });
    }

    let mut report = SanitizeReport::default();
    sanitize_attributes(root, SanitizeMode::VectorGraphics, &mut report);
    sanitize_children(root, SanitizeMode::VectorGraphics, &mut report);

    if root.child_element_count() == 0 {
        return Err(SanitizeError::Empty);
    }
    Ok(report)
}

pub fn sanitize_document_with(
    text: &str,
    options: &SanitizeOptions,
) -> Result<Sanitized, SanitizeError> {
    if let Some(limit) = options.max_input_bytes {
        if text.len() > limit {
            return Err(SanitizeError::InputTooLarge {
                len: text.len(),
                limit,
            });
        }
    }

    let mut root = dom::parse(text)?;
    let report = sanitize_tree(&mut root)?;
    log::debug!(
        "Sanitized SVG: {} elements and {} attributes removed, {} values rewritten",
        report.removed_elements,
        report.removed_attributes,
        report.rewritten_values
    );
    Ok(Sanitized {
        svg: dom::serialize(&root),
        report,
    })
}

pub fn sanitize_document(text: &str) -> Result<Sanitized, SanitizeError> {
    sanitize_document_with(text, &SanitizeOptions::default())
}

/// Sanitizes untrusted SVG markup for inline rendering.
///
/// Returns an empty string when the input is not well-formed, its root is
/// not `<svg>`, or nothing safe is left; never a partially trusted document.
pub fn sanitize_svg(text: &str) -> String {
    match sanitize_document(text) {
        Ok(sanitized) => sanitized.svg,
        Err(e) => {
            log::debug!("Rejected SVG: {}", e);
            String::new()
        }
    }
}
