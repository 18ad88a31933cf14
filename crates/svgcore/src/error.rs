use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Structural failure while turning text into an element tree.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed markup: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("malformed attribute: {0}")]
    Attribute(#[from] AttrError),
    #[error("name is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// Names that differ only in case count as the same attribute.
    #[error("attribute {0} appears more than once")]
    DuplicateAttribute(String),
    #[error("document has no root element")]
    NoRoot,
    #[error("document has more than one root element")]
    MultipleRoots,
    #[error("text outside the root element")]
    TextOutsideRoot,
    #[error("element <{0}> is never closed")]
    Unclosed(String),
    #[error("closing tag without a matching start tag")]
    UnexpectedEnd,
}

/// Why a document was rejected as a whole. Every variant maps to the same
/// empty result at the [`crate::sanitize_svg`] boundary.
#[derive(Debug, Error)]
pub enum SanitizeError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("root element is <{found}>, expected <svg>")]
    UnexpectedRoot { found: String },
    #[error("nothing safe left after sanitization")]
    Empty,
    #[error("input is {len} bytes, limit is {limit}")]
    InputTooLarge { len: usize, limit: usize },
}

impl SanitizeError {
    /// `true` for the failures that mean the input was not an SVG document.
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            SanitizeError::Parse(_) | SanitizeError::UnexpectedRoot { .. }
        )
    }
}
