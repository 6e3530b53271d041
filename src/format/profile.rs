//! Per-tool normalizer settings.

use crate::types::ToolKind;

/// Knobs that differ between tools when cleaning generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerProfile {
    /// Glyph that replaces a single `#` at the start of a line.
    pub bullet: char,
    /// Convert literal escape sequences such as `\n` and `\u2014`.
    pub unescape: bool,
    /// Remove `<...>` tags.
    pub strip_tags: bool,
    /// Also bold `__x__` and `*x*`, not only `**x**`.
    pub extended_emphasis: bool,
    /// Newlines kept when a run of four or more is collapsed (1..=3).
    pub blank_run_limit: usize,
}

impl Default for NormalizerProfile {
    fn default() -> Self {
        Self::standard()
    }
}

impl NormalizerProfile {
    /// Creative tools: `•` bullets, roomy spacing.
    pub const fn standard() -> Self {
        Self {
            bullet: '•',
            unescape: true,
            strip_tags: true,
            extended_emphasis: true,
            blank_run_limit: 3,
        }
    }

    /// Report-style tools: `➥` bullets, tight spacing.
    pub const fn compact() -> Self {
        Self {
            bullet: '➥',
            unescape: true,
            strip_tags: true,
            extended_emphasis: true,
            blank_run_limit: 2,
        }
    }

    pub fn for_tool(tool: ToolKind) -> Self {
        match tool {
            ToolKind::Report | ToolKind::Content => Self::compact(),
            _ => Self::standard(),
        }
    }

    pub fn with_bullet(mut self, bullet: char) -> Self {
        self.bullet = bullet;
        self
    }

    pub fn with_unescape(mut self, enabled: bool) -> Self {
        self.unescape = enabled;
        self
    }

    pub fn with_strip_tags(mut self, enabled: bool) -> Self {
        self.strip_tags = enabled;
        self
    }

    pub fn with_extended_emphasis(mut self, enabled: bool) -> Self {
        self.extended_emphasis = enabled;
        self
    }

    /// Clamped to 1..=3 so a collapsed run never re-triggers collapsing.
    pub fn with_blank_run_limit(mut self, limit: usize) -> Self {
        self.blank_run_limit = limit.clamp(1, 3);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_and_content_use_compact_profile() {
        assert_eq!(NormalizerProfile::for_tool(ToolKind::Report).bullet, '➥');
        assert_eq!(NormalizerProfile::for_tool(ToolKind::Content).blank_run_limit, 2);
        assert_eq!(
            NormalizerProfile::for_tool(ToolKind::Poem),
            NormalizerProfile::standard()
        );
    }

    #[test]
    fn blank_run_limit_is_clamped() {
        assert_eq!(NormalizerProfile::standard().with_blank_run_limit(9).blank_run_limit, 3);
        assert_eq!(NormalizerProfile::standard().with_blank_run_limit(0).blank_run_limit, 1);
    }
}
