/// Orders a pair so the shorter string comes second; strsim sizes its row
/// buffer by the second argument.
fn longer_first<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a.chars().count() >= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    }
}

/// Levenshtein distance with unit costs, over Unicode scalar values.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let (long, short) = longer_first(a, b);
    strsim::levenshtein(long, short)
}

/// `1 - distance / max(len)`; two empty strings are identical (1.0).
pub fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    let (long, short) = longer_first(a, b);
    strsim::normalized_levenshtein(long, short)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_distances() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("flaw", "lawn"), 2);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("same", "same"), 0);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(levenshtein_distance("café", "cafe"), 1);
        assert_eq!(levenshtein_ratio("日本", "日本"), 1.0);
    }

    #[test]
    fn test_ratio_bounds() {
        assert_eq!(levenshtein_ratio("", ""), 1.0);
        assert_eq!(levenshtein_ratio("abc", "xyz"), 0.0);
        assert_eq!(levenshtein_ratio("hello", ""), 0.0);
        assert_eq!(levenshtein_ratio("", "hello"), 0.0);
    }
}
