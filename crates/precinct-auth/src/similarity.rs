//! Password similarity guard
//!
//! Rejects a candidate password that is insufficiently different from the
//! current one, so rotating "password123" to "password124" does not count
//! as a change. Advisory input validation for the password-change flow
//! only - this is not a security boundary and login never calls it.
//!
//! The thresholds (0.7 overall, 0.6 with a small length delta) are carried
//! over from the portal's existing behavior and are not claimed optimal.

use crate::constants::{
    SIMILARITY_MAX_CHARS, SIMILARITY_NEAR_LENGTH_DELTA, SIMILARITY_NEAR_LENGTH_RATIO,
    SIMILARITY_REJECT_RATIO,
};

/// Check whether `new_pw` is too similar to `old_pw`
///
/// Checks short-circuit in order: exact match, case-insensitive match,
/// edit-distance ratio above 0.7, ratio above 0.6 when lengths differ by
/// at most 2, then substring containment either way.
pub fn is_too_similar(new_pw: &str, old_pw: &str) -> bool {
    if new_pw == old_pw {
        return true;
    }

    if new_pw.to_lowercase() == old_pw.to_lowercase() {
        return true;
    }

    let sim = similarity_ratio(new_pw, old_pw);
    if sim > SIMILARITY_REJECT_RATIO {
        return true;
    }

    let len_delta = new_pw.chars().count().abs_diff(old_pw.chars().count());
    if len_delta <= SIMILARITY_NEAR_LENGTH_DELTA && sim > SIMILARITY_NEAR_LENGTH_RATIO {
        return true;
    }

    if new_pw.contains(old_pw) || old_pw.contains(new_pw) {
        return true;
    }

    false
}

/// Similarity ratio in [0, 1]: `(longer_len - distance) / longer_len`
///
/// An empty longer string compares as maximally similar (1.0). Inputs are
/// bounded at `SIMILARITY_MAX_CHARS` chars; the ratio runs over the
/// truncated prefixes since this executes on user-supplied text at
/// request time.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().take(SIMILARITY_MAX_CHARS).collect();
    let b: Vec<char> = b.chars().take(SIMILARITY_MAX_CHARS).collect();

    let longer_len = a.len().max(b.len());
    if longer_len == 0 {
        return 1.0;
    }

    let distance = levenshtein(&a, &b);
    (longer_len - distance) as f64 / longer_len as f64
}

/// Classic Levenshtein distance, two-row dynamic programming table
fn levenshtein(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
