//! Text similarity for the no-exact-match fallback

use std::collections::HashSet;

fn tokens(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Normalized token-overlap ratio (Jaccard index) between two texts.
///
/// Returns a value in `[0.0, 1.0]`. Two texts without any tokens are
/// considered identical.
///
/// ```
/// use llm_plus_domain::consensus::token_overlap;
///
/// assert_eq!(token_overlap("the red fox", "the red fox"), 1.0);
/// assert_eq!(token_overlap("red fox", "blue whale"), 0.0);
/// assert_eq!(token_overlap("red fox", "red dog"), 1.0 / 3.0);
/// ```
pub fn token_overlap(a: &str, b: &str) -> f64 {
    let left = tokens(a);
    let right = tokens(b);
    if left.is_empty() && right.is_empty() {
        return 1.0;
    }
    let shared = left.intersection(&right).count();
    let union = left.union(&right).count();
    shared as f64 / union as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_ignores_case_and_punctuation() {
        assert_eq!(token_overlap("Paris, France.", "paris france"), 1.0);
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = "the capital is paris";
        let b = "paris is the largest city";
        assert_eq!(token_overlap(a, b), token_overlap(b, a));
    }

    #[test]
    fn test_overlap_empty() {
        assert_eq!(token_overlap("", ""), 1.0);
        assert_eq!(token_overlap("", "paris"), 0.0);
    }
}
