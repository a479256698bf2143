//! Slug derivation for records created without an explicit slug.

/// Lowercase ASCII slug: Spanish accents folded, anything else that is not
/// alphanumeric collapsed into single hyphens.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for ch in input.chars().flat_map(char::to_lowercase) {
        let folded = fold_accent(ch);
        if folded.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(folded);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Slug given by the form, or one derived from the title.
pub fn slug_or_derive(slug: Option<&str>, title: &str) -> String {
    match slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s.to_string(),
        None => slugify(title),
    }
}

fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'ä' | 'â' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_spanish_accents() {
        assert_eq!(slugify("Quinceañera"), "quinceanera");
        assert_eq!(slugify("Cancún & Riviera Maya"), "cancun-riviera-maya");
    }

    #[test]
    fn collapses_separators_and_trims() {
        assert_eq!(slugify("  Europa -- 15 días!  "), "europa-15-dias");
        assert_eq!(slugify("¡Oferta!"), "oferta");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn explicit_slug_wins_over_title() {
        assert_eq!(slug_or_derive(Some("mi-slug"), "Otro Título"), "mi-slug");
        assert_eq!(slug_or_derive(Some("  "), "Otro Título"), "otro-titulo");
        assert_eq!(slug_or_derive(None, "Otro Título"), "otro-titulo");
    }
}
