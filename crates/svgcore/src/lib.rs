//! Sanitizer for untrusted SVG markup that is about to be rendered inline.
//!
//! ```
//! let clean = svgcore::sanitize_svg(
//!     r#"<svg xmlns="http://www.w3.org/2000/svg"><script>alert(1)</script><rect width="10" height="10"/></svg>"#,
//! );
//! assert!(clean.contains("<rect"));
//! assert!(!clean.contains("<script"));
//! ```

pub mod attrs;
pub mod css;
pub mod dom;
pub mod error;
pub mod sanitize;
pub mod tables;
pub mod uri;

pub use error::{ParseError, SanitizeError};
pub use sanitize::{
    sanitize_document, sanitize_document_with, sanitize_svg, sanitize_tree, SanitizeOptions,
    SanitizeReport, Sanitized,
};
