/// Decodes HTML entities (`&eacute;`, `&amp;`, `&#39;`, ...) left in
/// service text by the content editors.
pub fn decode_text(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_entities() {
        assert_eq!(decode_text("Caf&eacute; Support"), "Café Support");
        assert_eq!(decode_text("Food &amp; Shelter"), "Food & Shelter");
    }

    #[test]
    fn decodes_numeric_entities() {
        assert_eq!(decode_text("St Ann&#39;s"), "St Ann's");
        assert_eq!(decode_text("&#x41;dvice"), "Advice");
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(decode_text("Drop-in centre"), "Drop-in centre");
        assert_eq!(decode_text(""), "");
    }
}
