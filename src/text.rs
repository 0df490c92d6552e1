use unicode_normalization::UnicodeNormalization;

/// Strip accents and any other non-ASCII character, as ASM rejects them.
pub fn unaccent(text: &str) -> String {
    text.nfkd().filter(char::is_ascii).collect()
}

pub fn unaccent_opt(text: Option<&str>) -> String {
    text.map(unaccent).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_spanish_diacritics() {
        assert_eq!(unaccent("Camí de l'Àngel, 5º"), "Cami de l'Angel, 5o");
        assert_eq!(unaccent("Peñíscola"), "Peniscola");
    }

    #[test]
    fn drops_characters_without_ascii_base() {
        assert_eq!(unaccent("Straße €"), "Strae ");
    }

    #[test]
    fn missing_text_is_empty() {
        assert_eq!(unaccent_opt(None), "");
    }
}
