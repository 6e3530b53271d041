//! Tests for the markup normalizer.

use pretty_assertions::assert_eq;

use lettrics::format::{bold_char, normalize, normalize_with, to_bold, NormalizerProfile};

const SAMPLES: &[&str] = &[
    "",
    "plain text",
    "### Heading\nbody",
    "# one\n## two\n### three\n#### four",
    "**bold** and __under__ and *star*",
    r####"{"success":true,"reply":"### Nested\n**x**"}"####,
    r#"{"success":true,"reply":"{\"success\":true,\"reply\":\"inner\"}"}"#,
    r"line\nbreak — dash \\n double",
    "<p>para</p>\n\n\n\n\n\nafter",
    "a\r\n\r\n\r\n\r\n\r\nb",
    "# \n##\n###",
    "** **",
    "***triple***",
    "  ### spaced heading   \n\n\n\n",
    r#"{"success":false}"#,
    "issue #42 and C# code",
];

#[test]
fn clean_text_only_loses_outer_whitespace() {
    assert_eq!(normalize("Dear team,\n\nThanks."), "Dear team,\n\nThanks.");
    assert_eq!(normalize("  padded\n\n"), "padded");
    assert_eq!(normalize("a\n\n\n\n\n\nb"), "a\n\n\nb");
    for prose in [
        "Compute 3 * 4 * 5 = 60.",
        "If a < b and c > d, stop.",
        "Call my__private__fn here.",
        "Rates rose 5% * 2 quarters; x<y holds.",
        "snake_case and dunder__names stay put",
    ] {
        assert_eq!(normalize(prose), prose);
    }
}

#[test]
fn normalize_is_idempotent() {
    for profile in [NormalizerProfile::standard(), NormalizerProfile::compact()] {
        for sample in SAMPLES {
            let once = normalize_with(sample, &profile);
            let twice = normalize_with(&once, &profile);
            assert_eq!(twice, once, "sample {sample:?}");
        }
    }
}

#[test]
fn every_table_character_is_emboldened() {
    let chars = ('A'..='Z').chain('a'..='z').chain('0'..='9');
    for c in chars {
        let out = normalize(&format!("**{c}**"));
        let bold = bold_char(c);
        assert_ne!(bold, c);
        assert!(out.contains(bold), "{c} -> {out}");
        assert!(!out.contains(c), "{c} left plain in {out}");
    }
}

#[test]
fn envelope_is_transparent() {
    for reply in ["X", "### Title\n**b** c", "plain"] {
        let wrapped = serde_json::json!({ "success": true, "reply": reply }).to_string();
        assert_eq!(normalize(&wrapped), normalize(reply));
    }
}

#[test]
fn failed_envelope_is_plain_text() {
    assert_eq!(normalize(r#"{"success":false}"#), r#"{"success":false}"#);
    assert_eq!(
        normalize(r#"{"success":true,"reply":""}"#),
        r#"{"success":true,"reply":""}"#
    );
}

#[test]
fn heading_and_emphasis_render_together() {
    assert_eq!(
        normalize("### Autumn\n**falling** leaves"),
        format!("{}\n\n\n{} leaves", to_bold("AUTUMN"), to_bold("falling"))
    );
}

#[test]
fn compact_profile_uses_arrow_bullets_and_tighter_gaps() {
    let out = normalize_with("## Findings\n\n\n\n\nAll clear", &NormalizerProfile::compact());
    assert_eq!(out, "➥ Findings\n\nAll clear");
}

#[test]
fn escapes_can_be_disabled() {
    let profile = NormalizerProfile::standard().with_unescape(false);
    assert_eq!(normalize_with(r"a\nb", &profile), r"a\nb");
    assert_eq!(normalize(r"a\nb"), "a\nb");
}

#[test]
fn tags_can_be_kept() {
    let profile = NormalizerProfile::standard().with_strip_tags(false);
    assert_eq!(normalize_with("<b>x</b>", &profile), "<b>x</b>");
    assert_eq!(normalize("<b>x</b>"), "x");
}

#[test]
fn custom_bullet_and_basic_emphasis_only() {
    let profile = NormalizerProfile::standard()
        .with_bullet('-')
        .with_extended_emphasis(false);
    assert_eq!(
        normalize_with("# item\n*soft* **hard**", &profile),
        format!("- item\n\n*soft* {}", to_bold("hard"))
    );
}
