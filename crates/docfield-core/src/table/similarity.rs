//! Sequence-matching similarity ratio.
//!
//! Ratcliff/Obershelp matching over characters: repeatedly take the longest
//! common block, then recurse on the pieces left and right of it. The ratio
//! is `2 * M / T` where `M` counts matched characters and `T` is the total
//! length of both strings.
//!
//! As with the classic sequence matcher, when the second string has 200 or
//! more characters, characters occurring in more than 1% of it (plus one)
//! are treated as popular and never start a match.

use std::collections::HashMap;

/// Length of the second sequence from which popular characters are ignored.
const AUTOJUNK_MIN_LEN: usize = 200;

/// A matching block: `a[a_start..a_start + size] == b[b_start..b_start + size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchBlock {
    pub a_start: usize,
    pub b_start: usize,
    pub size: usize,
}

struct SequenceMatcher {
    a: Vec<char>,
    b: Vec<char>,
    /// Positions of each non-popular character of `b`, ascending.
    b2j: HashMap<char, Vec<usize>>,
}

impl SequenceMatcher {
    fn new(a: &str, b: &str) -> Self {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();

        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &c) in b.iter().enumerate() {
            b2j.entry(c).or_default().push(j);
        }

        if b.len() >= AUTOJUNK_MIN_LEN {
            let threshold = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= threshold);
        }

        Self { a, b, b2j }
    }

    /// Longest block in `a[alo..ahi]` and `b[blo..bhi]`, earliest in `a`, then in `b`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> MatchBlock {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next_j2len: HashMap<usize, usize> = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let k = j.checked_sub(1).and_then(|p| j2len.get(&p)).copied().unwrap_or(0) + 1;
                    next_j2len.insert(j, k);
                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next_j2len;
        }

        // Popular characters never seed a match but may extend one.
        while best_i > alo && best_j > blo && self.a[best_i - 1] == self.b[best_j - 1] {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        MatchBlock {
            a_start: best_i,
            b_start: best_j,
            size: best_size,
        }
    }

    fn matching_blocks(&self) -> Vec<MatchBlock> {
        let mut queue = vec![(0, self.a.len(), 0, self.b.len())];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let block = self.longest_match(alo, ahi, blo, bhi);
            if block.size == 0 {
                continue;
            }
            let (i, j, k) = (block.a_start, block.b_start, block.size);
            if alo < i && blo < j {
                queue.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                queue.push((i + k, ahi, j + k, bhi));
            }
            blocks.push(block);
        }

        blocks.sort_by_key(|b| (b.a_start, b.b_start));
        blocks
    }
}

/// Matching blocks between two strings, ordered by position.
pub fn matching_blocks(a: &str, b: &str) -> Vec<MatchBlock> {
    SequenceMatcher::new(a, b).matching_blocks()
}

/// Similarity of two strings in `[0, 1]`; two empty strings are identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    let matcher = SequenceMatcher::new(a, b);
    let total = matcher.a.len() + matcher.b.len();
    if total == 0 {
        return 1.0;
    }
    let matched: usize = matcher.matching_blocks().iter().map(|b| b.size).sum();
    2.0 * matched as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_ratio_known_pairs() {
        assert_close(ratio("abcd", "bcde"), 0.75);
        assert_close(ratio("abc", "abc"), 1.0);
        assert_close(ratio("abc", "xyz"), 0.0);
        assert_close(ratio("", ""), 1.0);
        assert_close(ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_longest_block_prefers_earliest_in_a() {
        let blocks = matching_blocks(" abcd", "abcd abcd");
        assert_eq!(
            blocks,
            vec![MatchBlock {
                a_start: 0,
                b_start: 4,
                size: 5
            }]
        );
        assert_close(ratio(" abcd", "abcd abcd"), 10.0 / 14.0);
    }

    #[test]
    fn test_recurses_on_both_sides() {
        // "ab" and "d" match on either side of the mismatched middle.
        assert_close(ratio("abXd", "abYd"), 0.75);
    }

    #[test]
    fn test_popular_characters_are_ignored_in_long_sequences() {
        let b = format!("b{}", "a".repeat(200));
        assert_close(ratio(&"xa".repeat(5), &b), 0.0);

        // A popular character still extends a block that starts at the range edge.
        let b = "a".repeat(200);
        assert_close(ratio("aaaaaaaaaa", &b), 20.0 / 210.0);

        let b = "a".repeat(199);
        assert_close(ratio("aaaaaaaaaa", &b), 20.0 / 209.0);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_close(ratio("zażółć", "zażółć"), 1.0);
        assert_close(ratio("łódź", "lodz"), 0.25);
    }
}
