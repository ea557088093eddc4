//! option text normalization used for every correctness check

/// canonical form of an option or answer: trimmed, without a single leading
/// "A) " .. "D) " label (any case), lower-cased.
pub fn normalize_option(text: &str) -> String {
    let trimmed = text.trim();
    let mut chars = trimmed.chars();

    let unlabelled = match (chars.next(), chars.next()) {
        (Some(letter), Some(')')) if matches!(letter.to_ascii_uppercase(), 'A'..='D') => {
            chars.as_str().trim_start()
        }
        _ => trimmed,
    };

    unlabelled.to_lowercase()
}

/// true when both strings name the same option
pub fn answers_match(a: &str, b: &str) -> bool {
    normalize_option(a) == normalize_option(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_label_case_and_whitespace() {
        assert_eq!(normalize_option("  A) London "), "london");
        assert_eq!(normalize_option("b)Paris"), "paris");
        assert_eq!(normalize_option("D)   Oslo"), "oslo");
        assert_eq!(normalize_option("LONDON"), "london");
    }

    #[test]
    fn test_label_variants_match() {
        let variants = ["A) Alan Turing", "a) alan turing", "  alan TURING", "c) Alan Turing  "];
        for a in variants {
            for b in variants {
                assert!(answers_match(a, b), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_only_a_to_d_labels_are_stripped() {
        assert_eq!(normalize_option("E) Five"), "e) five");
        assert_eq!(normalize_option("AB) x"), "ab) x");
        assert!(!answers_match("E) Five", "Five"));
    }

    #[test]
    fn test_only_one_label_is_stripped() {
        assert_eq!(normalize_option("A) B) text"), "b) text");
    }

    #[test]
    fn test_different_text_does_not_match() {
        assert!(!answers_match("A) London", "B) Paris"));
    }
}
