//! Normalized string similarity on a 0-100 scale
//!
//! [`ratio`] is the normalized indel similarity `200 * LCS / (len1 + len2)`.
//! [`partial_ratio`] slides the shorter string over the longer one and keeps
//! the best [`ratio`] of any alignment, including the partial overlaps at
//! both ends. Both work on Unicode scalar values and are deterministic.

use std::collections::HashSet;

/// Similarity of two strings, 100 for identical input
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best [`ratio`] between the shorter string and any window of the longer one
///
/// Returns 0 when exactly one side is empty and 100 when both are.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let (needle, haystack) = if a.len() <= b.len() {
        (&a, &b)
    } else {
        (&b, &a)
    };
    let best = best_alignment(needle, haystack);

    // Equal lengths are not symmetric under windowing, so try both ways
    if best < 100.0 && a.len() == b.len() {
        return best.max(best_alignment(haystack, needle));
    }
    best
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

/// Length of the longest common subsequence
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diagonal = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

/// Score every alignment of `needle` against `haystack`
///
/// Windows whose boundary character cannot occur in the needle are skipped;
/// only a strictly better score replaces the current best.
fn best_alignment(needle: &[char], haystack: &[char]) -> f64 {
    let n = needle.len();
    let m = haystack.len();
    let needle_chars: HashSet<char> = needle.iter().copied().collect();

    let mut best = 0.0;
    let mut consider = |window: &[char]| -> bool {
        let score = ratio_chars(needle, window);
        if score > best {
            best = score;
        }
        best >= 100.0
    };

    // Windows hanging off the left edge
    for i in 1..n {
        if needle_chars.contains(&haystack[i - 1]) && consider(&haystack[..i]) {
            return 100.0;
        }
    }

    // Full-length windows
    for i in 0..(m - n) {
        if needle_chars.contains(&haystack[i + n - 1]) && consider(&haystack[i..i + n]) {
            return 100.0;
        }
    }

    // Windows hanging off the right edge
    for i in (m - n)..m {
        if needle_chars.contains(&haystack[i]) && consider(&haystack[i..]) {
            return 100.0;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_ratio() {
        assert!(approx(ratio("adyar", "adyar"), 100.0));
        assert!(approx(ratio("", ""), 100.0));
        assert!(approx(ratio("abc", "xyz"), 0.0));
        // LCS("this is a test", "this is a test!") = 14
        assert!(approx(ratio("this is a test", "this is a test!"), 2800.0 / 29.0));
    }

    #[test]
    fn test_partial_ratio_substring_is_perfect() {
        assert!(approx(
            partial_ratio("marina beach", "flooding near marina beach now"),
            100.0
        ));
        assert!(approx(
            partial_ratio("flooding near marina beach now", "marina beach"),
            100.0
        ));
    }

    #[test]
    fn test_partial_ratio_misspelling() {
        // One dropped letter: LCS 11 against an 11-char window of a 12-char needle
        let score = partial_ratio("marina beach", "stuck at marin beach");
        assert!(score > 85.0, "score was {}", score);
        assert!(score < 100.0);
    }

    #[test]
    fn test_partial_ratio_unrelated() {
        assert!(partial_ratio("velachery", "boat needed quickly") < 60.0);
    }

    #[test]
    fn test_partial_ratio_empty() {
        assert!(approx(partial_ratio("", "adyar"), 0.0));
        assert!(approx(partial_ratio("adyar", ""), 0.0));
        assert!(approx(partial_ratio("", ""), 100.0));
    }

    #[test]
    fn test_partial_ratio_equal_length_is_symmetric() {
        assert!(approx(partial_ratio("abcd", "bcda"), partial_ratio("bcda", "abcd")));
    }

    #[test]
    fn test_lcs() {
        let a: Vec<char> = "abcbdab".chars().collect();
        let b: Vec<char> = "bdcaba".chars().collect();
        assert_eq!(lcs_len(&a, &b), 4);
    }
}
