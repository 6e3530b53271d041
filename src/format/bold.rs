//! ASCII to Mathematical Sans-Serif Bold substitution table.

/// Contiguous ASCII ranges and the code point their first member maps to.
const BOLD_RANGES: [(char, char, u32); 3] = [
    ('A', 'Z', 0x1D5D4),
    ('a', 'z', 0x1D5EE),
    ('0', '9', 0x1D7EC),
];

/// Bold equivalent of `c`, or `c` itself when the table has no entry.
pub fn bold_char(c: char) -> char {
    for (first, last, base) in BOLD_RANGES {
        if (first..=last).contains(&c) {
            return char::from_u32(base + (c as u32 - first as u32)).unwrap_or(c);
        }
    }
    c
}

/// Render `text` through the bold table.
pub fn to_bold(text: &str) -> String {
    text.chars().map(bold_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_range_endpoints() {
        assert_eq!(bold_char('A'), '𝗔');
        assert_eq!(bold_char('Z'), '𝗭');
        assert_eq!(bold_char('a'), '𝗮');
        assert_eq!(bold_char('z'), '𝘇');
        assert_eq!(bold_char('0'), '𝟬');
        assert_eq!(bold_char('9'), '𝟵');
    }

    #[test]
    fn unmapped_characters_pass_through() {
        assert_eq!(to_bold("Hi, 2 you!"), "𝗛𝗶, 𝟮 𝘆𝗼𝘂!");
        assert_eq!(to_bold("é—#"), "é—#");
    }

    #[test]
    fn bolding_is_stable() {
        let once = to_bold("Report 7");
        assert_eq!(to_bold(&once), once);
    }
}
