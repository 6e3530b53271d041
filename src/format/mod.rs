//! Response formatting: turns raw generated text into display text.
//!
//! Markdown-like markup is rendered for plain-text surfaces: `###` headings
//! become upper-cased pseudo-bold lines, `#` lines become glyph bullets and
//! emphasis spans are rewritten with Mathematical Sans-Serif Bold code
//! points. See [`normalize`] for the full rewrite order.

pub mod bold;
pub mod envelope;
pub mod normalize;
pub mod profile;

pub use bold::{bold_char, to_bold};
pub use normalize::{normalize, normalize_with};
pub use profile::NormalizerProfile;
