//! The normalizer pipeline.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use super::bold::to_bold;
use super::envelope::Envelope;
use super::profile::NormalizerProfile;

/// Upper bound on rewrite passes. Every rewrite shortens the markup, so real
/// replies settle in two or three passes.
const MAX_PASSES: usize = 32;

/// Normalize `raw` with the standard profile.
pub fn normalize(raw: &str) -> String {
    normalize_with(raw, &NormalizerProfile::standard())
}

/// Normalize `raw` into display text.
///
/// Each pass applies, in order:
/// 1. envelope unwrap (`{"success":true,"reply":"..."}` becomes the reply),
/// 2. literal escape sequences (`\n`, `\"`, `\u2014`, ...) when enabled,
/// 3. tag stripping when enabled,
/// 4. `###` headings and `#` bullets,
/// 5. emphasis spans rendered in bold glyphs,
/// 6. blank-line collapsing and trimming.
///
/// Passes repeat until the text stops changing, so the result is a fixed
/// point: normalizing it again returns it unchanged. Never fails; input the
/// rules do not recognise passes through.
pub fn normalize_with(raw: &str, profile: &NormalizerProfile) -> String {
    let mut current = rewrite_pass(raw, profile);
    for _ in 0..MAX_PASSES {
        let next = rewrite_pass(&current, profile);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn rewrite_pass(text: &str, profile: &NormalizerProfile) -> String {
    let text = unwrap_envelope(text);
    let text = if profile.unescape {
        unescape_literals(&text)
    } else {
        text
    };
    let text = if profile.strip_tags {
        strip_tags(&text)
    } else {
        text
    };
    let text = convert_headings(&text, profile.bullet);
    let text = convert_emphasis(&text, profile.extended_emphasis);
    collapse_blank_runs(&text, profile.blank_run_limit)
}

fn unwrap_envelope(text: &str) -> Cow<'_, str> {
    match Envelope::decode(text).as_ref().and_then(Envelope::successful_reply) {
        Some(reply) => Cow::Owned(reply.to_string()),
        None => Cow::Borrowed(text),
    }
}

fn unescape_literals<'a>(text: &Cow<'a, str>) -> Cow<'a, str> {
    if !text.contains('\\') {
        return text.clone();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest: &str = text;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match decode_escape(tail) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('\\');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Decode the escape at the start of `tail` (which begins with `\`),
/// returning the character and the bytes consumed.
fn decode_escape(tail: &str) -> Option<(char, usize)> {
    let ch = match tail[1..].chars().next()? {
        'n' => '\n',
        't' => '\t',
        '"' => '"',
        '\'' => '\'',
        '\\' => '\\',
        '/' => '/',
        'u' => {
            let code = tail.get(2..6)?.to_ascii_lowercase();
            let ch = match code.as_str() {
                "2014" => '\u{2014}',
                "2013" => '\u{2013}',
                "2018" => '\u{2018}',
                "2019" => '\u{2019}',
                "201c" => '\u{201C}',
                "201d" => '\u{201D}',
                "2026" => '\u{2026}',
                _ => return None,
            };
            return Some((ch, 6));
        }
        _ => return None,
    };
    Some((ch, 2))
}

fn strip_tags<'a>(text: &Cow<'a, str>) -> Cow<'a, str> {
    match tag_re().replace_all(text, "") {
        Cow::Borrowed(_) => text.clone(),
        Cow::Owned(stripped) => Cow::Owned(stripped),
    }
}

fn convert_headings(text: &str, bullet: char) -> String {
    let text = heading_re().replace_all(text, |caps: &Captures<'_>| {
        format!("\n\n{}\n\n\n", to_bold(&caps[1].trim_end().to_uppercase()))
    });
    bullet_re()
        .replace_all(&text, |caps: &Captures<'_>| {
            format!("\n{bullet} {}\n", caps[1].trim_end())
        })
        .into_owned()
}

fn convert_emphasis(text: &str, extended: bool) -> String {
    let bolden = |caps: &Captures<'_>| to_bold(&caps[1]);
    let text = strong_re().replace_all(text, bolden);
    if !extended {
        return text.into_owned();
    }
    let text = underscore_re().replace_all(&text, bolden);
    star_re().replace_all(&text, bolden).into_owned()
}

fn collapse_blank_runs(text: &str, limit: usize) -> String {
    let text = text.replace("\r\n", "\n");
    blank_run_re()
        .replace_all(&text, "\n".repeat(limit).as_str())
        .trim()
        .to_string()
}

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*#{3,}[ \t]*([^\s#][^\n]*)$").expect("heading pattern is valid")
    })
}

fn bullet_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*#{1,2}[ \t]*([^\s#][^\n]*)$").expect("bullet pattern is valid")
    })
}

fn strong_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*([^\n]+?)\*\*").expect("strong pattern is valid"))
}

/// `__x__` that does not sit inside an identifier such as `my__private__fn`.
fn underscore_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b__([^\s_](?:[^\n]*?[^\s_])?)__\b").expect("underscore pattern is valid")
    })
}

/// Spans open and close on a non-space, so `3 * 4 * 5` is left alone.
fn star_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\*([^\s*](?:[^*\n]*[^\s*])?)\*").expect("emphasis pattern is valid")
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"</?[A-Za-z][^<>]*>").expect("tag pattern is valid"))
}

fn blank_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n{4,}").expect("blank run pattern is valid"))
}
