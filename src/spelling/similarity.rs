//! String similarity measures used by the fuzzy matcher.
//!
//! Every measure returns a score in `[0, 100]`, where 100 means identical.
//! The base measure is the normalized indel similarity: the share of
//! characters that survive in a longest common subsequence of both strings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Length of the longest common subsequence of two character slices.
#[allow(clippy::needless_range_loop)]
pub fn lcs_length(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Use only two rows for space optimization
    let mut prev_row = vec![0usize; b.len() + 1];
    let mut curr_row = vec![0usize; b.len() + 1];

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            curr_row[j] = if a[i - 1] == b[j - 1] {
                prev_row[j - 1] + 1
            } else {
                prev_row[j].max(curr_row[j - 1])
            };
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

/// Number of insertions and deletions needed to turn one string into the other.
pub fn indel_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    a.len() + b.len() - 2 * lcs_length(&a, &b)
}

fn char_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    let distance = total - 2 * lcs_length(a, b);
    100.0 * (1.0 - distance as f64 / total as f64)
}

/// Whole-string similarity.
pub fn ratio(s1: &str, s2: &str) -> f64 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    char_ratio(&a, &b)
}

/// Best similarity between the shorter string and any equally long window of
/// the longer one.
///
/// Windows hanging off either end of the longer string are considered too,
/// so a short string matching the start or end of a long one is found.
pub fn partial_ratio(s1: &str, s2: &str) -> f64 {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let m = shorter.len();
    let n = longer.len();

    if m == n {
        return char_ratio(&shorter, &longer);
    }

    let mut best: f64 = 0.0;

    // Full windows.
    for start in 0..=(n - m) {
        best = best.max(char_ratio(&shorter, &longer[start..start + m]));
        if best >= 100.0 {
            return 100.0;
        }
    }

    // Partial windows at the edges.
    for width in 1..m {
        best = best
            .max(char_ratio(&shorter, &longer[..width]))
            .max(char_ratio(&shorter, &longer[n - width..]));
    }

    best
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Similarity after sorting the whitespace-separated tokens of both strings.
pub fn token_sort_ratio(s1: &str, s2: &str) -> f64 {
    ratio(&sorted_tokens(s1), &sorted_tokens(s2))
}

/// Similarity based on shared and unshared token sets.
///
/// Returns 100 when one token set contains the other.
pub fn token_set_ratio(s1: &str, s2: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = s1.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = s2.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let sect = intersection.join(" ");
    let join_with_sect = |diff: &[&str]| {
        let joined = diff.join(" ");
        if sect.is_empty() {
            joined
        } else {
            format!("{sect} {joined}")
        }
    };
    let sect_ab = join_with_sect(&diff_ab);
    let sect_ba = join_with_sect(&diff_ba);

    let mut best = ratio(&sect_ab, &sect_ba);
    if !sect.is_empty() {
        best = best.max(ratio(&sect, &sect_ab)).max(ratio(&sect, &sect_ba));
    }
    best
}

/// The similarity measures combined by the fuzzy matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMeasure {
    /// Whole-string similarity; catches near-identical typos.
    Ratio,
    /// Best-aligned substring; catches missing or extra leading/trailing text.
    PartialRatio,
    /// Token-order invariant similarity.
    TokenSortRatio,
    /// Token presence/absence similarity.
    TokenSetRatio,
}

impl SimilarityMeasure {
    /// All measures, in their default weighting order.
    pub const ALL: [SimilarityMeasure; 4] = [
        SimilarityMeasure::Ratio,
        SimilarityMeasure::PartialRatio,
        SimilarityMeasure::TokenSortRatio,
        SimilarityMeasure::TokenSetRatio,
    ];

    /// Score two strings with this measure.
    pub fn score(&self, s1: &str, s2: &str) -> f64 {
        match self {
            SimilarityMeasure::Ratio => ratio(s1, s2),
            SimilarityMeasure::PartialRatio => partial_ratio(s1, s2),
            SimilarityMeasure::TokenSortRatio => token_sort_ratio(s1, s2),
            SimilarityMeasure::TokenSetRatio => token_set_ratio(s1, s2),
        }
    }

    /// Get the name of this measure.
    pub fn name(&self) -> &'static str {
        match self {
            SimilarityMeasure::Ratio => "ratio",
            SimilarityMeasure::PartialRatio => "partial_ratio",
            SimilarityMeasure::TokenSortRatio => "token_sort_ratio",
            SimilarityMeasure::TokenSetRatio => "token_set_ratio",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_lcs_length() {
        let chars = |s: &str| s.chars().collect::<Vec<char>>();
        assert_eq!(lcs_length(&chars(""), &chars("abc")), 0);
        assert_eq!(lcs_length(&chars("abc"), &chars("abc")), 3);
        assert_eq!(lcs_length(&chars("python"), &chars("pyhton")), 5);
        assert_eq!(lcs_length(&chars("kitten"), &chars("sitting")), 4);
    }

    #[test]
    fn test_indel_distance() {
        assert_eq!(indel_distance("", ""), 0);
        assert_eq!(indel_distance("abc", ""), 3);
        assert_eq!(indel_distance("python", "pyhton"), 2);
        assert_eq!(indel_distance("search", "serach"), 2);
    }

    #[test]
    fn test_ratio() {
        assert!(approx(ratio("", ""), 100.0));
        assert!(approx(ratio("abc", "abc"), 100.0));
        assert!(approx(ratio("abc", "xyz"), 0.0));
        assert!(approx(ratio("abc", ""), 0.0));
        // 2 * 5 / 12
        assert!(approx(ratio("python", "pyhton"), 1000.0 / 12.0));
    }

    #[test]
    fn test_partial_ratio() {
        assert!(approx(partial_ratio("net", "network"), 100.0));
        assert!(approx(partial_ratio("work", "network"), 100.0));
        assert!(approx(partial_ratio("", "network"), 0.0));
        assert!(approx(partial_ratio("", ""), 100.0));
        assert!(approx(partial_ratio("python", "pyhton"), ratio("python", "pyhton")));
        // best window of "python" for "pythn" is "pyth" + edge, 2 * 4 / 9
        assert!(approx(partial_ratio("pythn", "python"), 800.0 / 9.0));
    }

    #[test]
    fn test_token_sort_ratio() {
        assert!(approx(token_sort_ratio("world hello", "hello world"), 100.0));
        assert!(token_sort_ratio("world hello", "hello word") > 90.0);
    }

    #[test]
    fn test_token_set_ratio() {
        assert!(approx(token_set_ratio("hello", "hello world"), 100.0));
        assert!(approx(token_set_ratio("", "hello"), 0.0));
        assert!(approx(token_set_ratio("python", "pyhton"), ratio("python", "pyhton")));

        assert!(approx(
            token_set_ratio("mets new york", "new york mets vs yankees"),
            100.0
        ));
        assert!(approx(token_set_ratio("big red ball", "big blue ball"), 80.0));
    }

    #[test]
    fn test_scores_are_bounded() {
        let pairs = [
            ("", "abc"),
            ("a", "a"),
            ("hello world", "world"),
            ("pyhton", "python"),
            ("completely", "different"),
        ];

        for (a, b) in pairs {
            for measure in SimilarityMeasure::ALL {
                let score = measure.score(a, b);
                assert!(
                    (0.0..=100.0).contains(&score),
                    "{} out of range for {a:?} / {b:?}: {score}",
                    measure.name()
                );
            }
        }
    }
}
