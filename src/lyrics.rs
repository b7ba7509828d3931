/// Splits run-together lyrics into lines by breaking before every ASCII
/// capital, the first character included.
pub fn format_lyrics(text: &str) -> String {
    let capitals = text.bytes().filter(u8::is_ascii_uppercase).count();
    let mut out = String::with_capacity(text.len() + capitals);
    for c in text.chars() {
        if c.is_ascii_uppercase() {
            out.push('\n');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaks_before_each_capital() {
        assert_eq!(format_lyrics("AbC"), "\nAb\nC");
        assert_eq!(
            format_lyrics("Is this the real lifeIs this just fantasy"),
            "\nIs this the real life\nIs this just fantasy"
        );
    }

    #[test]
    fn leaves_lowercase_text_alone() {
        for input in ["", "abc", "no capitals here, 123!", "ünïcödé", "\n\t  "] {
            assert_eq!(format_lyrics(input), input);
        }
    }

    #[test]
    fn ignores_non_ascii_capitals() {
        assert_eq!(format_lyrics("Ärger"), "Ärger");
        assert_eq!(format_lyrics("ÄB"), "Ä\nB");
    }

    #[test]
    fn keeps_existing_line_breaks() {
        assert_eq!(format_lyrics("a\nB"), "a\n\nB");
    }
}
