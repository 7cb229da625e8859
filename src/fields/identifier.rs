const MAX_LEN: usize = 6;
const PREFIX_LEN: usize = 5;

/// Normalizes a vendor/client identifier: at most six characters, ASCII letters, digits
/// and `_` only, capitalized, and a five-character prefix gets a trailing `_`.
pub fn format_identifier(input: &str) -> String {
    let mut out = String::with_capacity(MAX_LEN);
    for (index, ch) in input
        .chars()
        .take(MAX_LEN)
        .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
        .enumerate()
    {
        if index == 0 {
            out.push(ch.to_ascii_uppercase());
        } else {
            out.push(ch.to_ascii_lowercase());
        }
    }
    if out.len() == PREFIX_LEN {
        out.push('_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::format_identifier;

    #[test]
    fn truncates_before_filtering() {
        assert_eq!(format_identifier("bdgbn12345"), "Bdgbn1");
        assert_eq!(format_identifier("ab-cdefgh"), "Abcde_");
    }

    #[test]
    fn five_character_prefix_gets_underscore() {
        assert_eq!(format_identifier("bdgbn"), "Bdgbn_");
        assert_eq!(format_identifier("KMNPX"), "Kmnpx_");
    }

    #[test]
    fn strips_everything_outside_word_characters() {
        assert_eq!(format_identifier("a b"), "Ab");
        assert_eq!(format_identifier("é1"), "1");
        assert_eq!(format_identifier(""), "");
        assert_eq!(format_identifier("_x"), "_x");
    }

    #[test]
    fn formatting_is_idempotent() {
        for input in [
            "bdgbn12345",
            "bdgbn",
            "Bdgbn_",
            "ab-cdefgh",
            "a",
            "",
            "ZZZZZZZZ",
            "x y z w v",
            "ÄÖÜabc",
        ] {
            let once = format_identifier(input);
            assert_eq!(format_identifier(&once), once, "input {input:?}");
        }
    }
}
