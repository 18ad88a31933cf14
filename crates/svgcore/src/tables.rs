//! Allowlists for SVG and for the XHTML content permitted inside
//! `<foreignObject>`. Every name is stored lowercase and compared against a
//! lowercased key.
//!
//! The SVG tag and attribute lists follow the DOMPurify profile
//! (MIT License, Copyright (c) 2015 Mario Heiderich).

use lazy_static::lazy_static;
use std::collections::HashSet;

/// Root element every accepted document must carry.
pub const SVG_ROOT_TAG: &str = "svg";

/// The single element whose children switch to [`SanitizeMode::EmbeddedDocument`].
pub const EMBEDDED_DOCUMENT_CONTAINER: &str = "foreignobject";

/// Element whose text content is a stylesheet.
pub const STYLE_TAG: &str = "style";

/// Anchor element, the only tag allowed to carry a navigable link.
pub const ANCHOR_TAG: &str = "a";

lazy_static! {
    pub static ref SVG_TAGS: HashSet<&'static str> = [
        "svg",
        "a",
        "altglyph",
        "altglyphdef",
        "altglyphitem",
        "animate",
        "animatecolor",
        "animatemotion",
        "animatetransform",
        "circle",
        "clippath",
        "defs",
        "desc",
        "ellipse",
        "feblend",
        "fecolormatrix",
        "fecomponenttransfer",
        "fecomposite",
        "feconvolvematrix",
        "fediffuselighting",
        "fedisplacementmap",
        "fedistantlight",
        "fedropshadow",
        "feflood",
        "fefunca",
        "fefuncb",
        "fefuncg",
        "fefuncr",
        "fegaussianblur",
        "feimage",
        "femerge",
        "femergenode",
        "femorphology",
        "feoffset",
        "fepointlight",
        "fespecularlighting",
        "fespotlight",
        "fetile",
        "feturbulence",
        "filter",
        "font",
        "foreignobject",
        "g",
        "glyph",
        "glyphref",
        "hkern",
        "image",
        "line",
        "lineargradient",
        "marker",
        "mask",
        "metadata",
        "mpath",
        "path",
        "pattern",
        "polygon",
        "polyline",
        "radialgradient",
        "rect",
        "set",
        "stop",
        "style",
        "switch",
        "symbol",
        "text",
        "textpath",
        "title",
        "tref",
        "tspan",
        "use",
        "view",
        "vkern",
    ]
    .into_iter()
    .collect();

    pub static ref HTML_TAGS: HashSet<&'static str> = [
        "a",
        "b",
        "blockquote",
        "body",
        "br",
        "code",
        "del",
        "div",
        "em",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "i",
        "li",
        "mark",
        "ol",
        "p",
        "pre",
        "span",
        "strong",
        "s",
        "sub",
        "sup",
        "table",
        "tbody",
        "td",
        "th",
        "thead",
        "tr",
        "u",
        "ul",
    ]
    .into_iter()
    .collect();

    /// Removed inside `<foreignObject>` even though none of them is on
    /// [`HTML_TAGS`].
    pub static ref BLOCKED_HTML_TAGS: HashSet<&'static str> = [
        "script",
        "iframe",
        "object",
        "embed",
        "form",
        "input",
        "textarea",
        "select",
        "button",
        "link",
        "meta",
        "base",
        "img", // onerror
        "video",
        "audio",
        "source",
        "picture",
        "svg", // no nested documents
    ]
    .into_iter()
    .collect();

    pub static ref SVG_ATTRS: HashSet<&'static str> = [
        "accent-height",
        "accumulate",
        "additive",
        "alignment-baseline",
        "amplitude",
        "ascent",
        "attributename",
        "attributetype",
        "azimuth",
        "basefrequency",
        "baseline-shift",
        "begin",
        "bias",
        "by",
        "class",
        "clip",
        "clip-path",
        "clip-rule",
        "clippathunits",
        "color",
        "color-interpolation",
        "color-interpolation-filters",
        "color-profile",
        "color-rendering",
        "cx",
        "cy",
        "d",
        "diffuseconstant",
        "direction",
        "display",
        "divisor",
        "dominant-baseline",
        "dur",
        "dx",
        "dy",
        "edgemode",
        "elevation",
        "end",
        "exponent",
        "fill",
        "fill-opacity",
        "fill-rule",
        "filter",
        "filterunits",
        "flood-color",
        "flood-opacity",
        "font-family",
        "font-size",
        "font-size-adjust",
        "font-stretch",
        "font-style",
        "font-variant",
        "font-weight",
        "from",
        "fx",
        "fy",
        "g1",
        "g2",
        "glyph-name",
        "glyphref",
        "gradienttransform",
        "gradientunits",
        "height",
        "href",
        "id",
        "image-rendering",
        "in",
        "in2",
        "intercept",
        "k",
        "k1",
        "k2",
        "k3",
        "k4",
        "kerning",
        "kernelmatrix",
        "kernelunitlength",
        "keypoints",
        "keysplines",
        "keytimes",
        "lang",
        "lengthadjust",
        "letter-spacing",
        "lighting-color",
        "local",
        "marker-end",
        "marker-mid",
        "marker-start",
        "markerheight",
        "markerunits",
        "markerwidth",
        "mask",
        "mask-type",
        "maskcontentunits",
        "maskunits",
        "max",
        "media",
        "method",
        "min",
        "mode",
        "name",
        "numoctaves",
        "offset",
        "opacity",
        "operator",
        "order",
        "orient",
        "orientation",
        "origin",
        "overflow",
        "paint-order",
        "path",
        "pathlength",
        "patterncontentunits",
        "patterntransform",
        "patternunits",
        "pointer-events",
        "points",
        "preservealpha",
        "preserveaspectratio",
        "primitiveunits",
        "r",
        "radius",
        "refx",
        "refy",
        "repeatcount",
        "repeatdur",
        "requiredfeatures",
        "restart",
        "result",
        "role",
        "rotate",
        "rx",
        "ry",
        "scale",
        "seed",
        "shape-rendering",
        "slope",
        "specularconstant",
        "specularexponent",
        "spreadmethod",
        "startoffset",
        "stddeviation",
        "stitchtiles",
        "stop-color",
        "stop-opacity",
        "stroke",
        "stroke-dasharray",
        "stroke-dashoffset",
        "stroke-linecap",
        "stroke-linejoin",
        "stroke-miterlimit",
        "stroke-opacity",
        "stroke-width",
        "style",
        "surfacescale",
        "systemlanguage",
        "tabindex",
        "tablevalues",
        "targetx",
        "targety",
        "text-anchor",
        "text-decoration",
        "text-rendering",
        "textlength",
        "to",
        "transform",
        "transform-origin",
        "type",
        "u1",
        "u2",
        "unicode",
        "values",
        "version",
        "vert-adv-y",
        "vert-origin-x",
        "vert-origin-y",
        "viewbox",
        "visibility",
        "width",
        "word-spacing",
        "wrap",
        "writing-mode",
        "x",
        "x1",
        "x2",
        "xchannelselector",
        "xlink:href",
        "xml:id",
        "xml:space",
        "xlink:title",
        "xmlns",
        "xmlns:xlink",
        "y",
        "y1",
        "y2",
        "z",
        "zoomandpan",
    ]
    .into_iter()
    .collect();

    pub static ref HTML_ATTRS: HashSet<&'static str> = [
        "class",
        "dir",
        "href", // <a> only
        "id",
        "lang",
        "role",
        "style",
        "tabindex",
        "title",
        "xmlns",
    ]
    .into_iter()
    .collect();

    /// Presentation attributes whose value may hold a `url()` reference.
    pub static ref URL_BEARING_ATTRS: HashSet<&'static str> = [
        "clip-path",
        "cursor",
        "fill",
        "filter",
        "marker-end",
        "marker-mid",
        "marker-start",
        "mask",
        "stroke",
    ]
    .into_iter()
    .collect();

    /// Elements that can rewrite another attribute at render time.
    pub static ref ANIMATION_TAGS: HashSet<&'static str> =
        ["animate", "set", "animatecolor", "animatetransform"]
            .into_iter()
            .collect();
}

/// Which rule set governs a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SanitizeMode {
    VectorGraphics,
    /// Inside `<foreignObject>`.
    EmbeddedDocument,
}

impl SanitizeMode {
    pub fn allowed_tags(self) -> &'static HashSet<&'static str> {
        match self {
            SanitizeMode::VectorGraphics => &*SVG_TAGS,
            SanitizeMode::EmbeddedDocument => &*HTML_TAGS,
        }
    }

    pub fn allowed_attrs(self) -> &'static HashSet<&'static str> {
        match self {
            SanitizeMode::VectorGraphics => &*SVG_ATTRS,
            SanitizeMode::EmbeddedDocument => &*HTML_ATTRS,
        }
    }
}
