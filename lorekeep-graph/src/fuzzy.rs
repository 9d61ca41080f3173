//! Edit-distance similarity on strings.
//!
//! Both scores are on a 0-100 scale and rounded to whole points. Callers
//! normalize case themselves.

/// Levenshtein distance over chars.
pub fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two DP rows: distances between `a[..i]` and `b[..j]`.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            let deletion = prev[j + 1] + 1;
            let insertion = curr[j] + 1;
            let substitution = prev[j] + cost;
            curr[j + 1] = deletion.min(insertion).min(substitution);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn char_ratio(a: &[char], b: &[char]) -> f64 {
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 100.0;
    }
    let distance = levenshtein(a, b) as f64;
    (100.0 * (1.0 - distance / longest as f64)).round()
}

/// Whole-string similarity.
///
/// Two empty strings are identical; one empty string matches nothing.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() != b.is_empty() {
        return 0.0;
    }
    char_ratio(&a, &b)
}

/// Best similarity of the shorter string against any equal-length window
/// of the longer one.
///
/// An empty string on either side scores 0.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let mut best = 0.0f64;

    for window in long.windows(short.len()) {
        let score = char_ratio(short, window);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein(&chars("kitten"), &chars("sitting")), 3);
        assert_eq!(levenshtein(&chars(""), &chars("abc")), 3);
        assert_eq!(levenshtein(&chars("same"), &chars("same")), 0);
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio("collapse", "collapse"), 100.0);
        assert_eq!(ratio("", ""), 100.0);
        assert_eq!(ratio("abc", ""), 0.0);
        // one substitution in four
        assert_eq!(ratio("lore", "love"), 75.0);
    }

    #[test]
    fn test_ratio_is_symmetric() {
        assert_eq!(ratio("astrallum", "astral"), ratio("astral", "astrallum"));
    }

    #[test]
    fn test_partial_ratio_finds_substring() {
        assert_eq!(partial_ratio("collaps", "the collapse"), 100.0);
        assert_eq!(partial_ratio("the collapse", "collaps"), 100.0);
    }

    #[test]
    fn test_partial_ratio_with_typo() {
        // "colapse" vs best window "collaps" / "ollapse"
        let score = partial_ratio("colapse", "the collapse of veyra");
        assert!(score >= 70.0, "score was {score}");
        assert!(score < 100.0);
    }

    #[test]
    fn test_partial_ratio_empty() {
        assert_eq!(partial_ratio("", "anything"), 0.0);
        assert_eq!(partial_ratio("query", ""), 0.0);
    }

    #[test]
    fn test_unicode_is_char_based() {
        assert_eq!(ratio("éclipse", "eclipse"), 86.0);
    }
}
