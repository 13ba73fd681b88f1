//! Levenshtein edit distance.
//!
//! Insertions, deletions and substitutions each cost 1. Strings are
//! compared by Unicode scalar value, so an accented letter is one symbol.

use smallvec::SmallVec;

type Chars = SmallVec<[char; 32]>;
type Row = SmallVec<[usize; 32]>;

/// Edit distance between two strings.
///
/// ```
/// use card_sorter::matching::levenshtein;
///
/// assert_eq!(levenshtein("Island", "Island"), 0);
/// assert_eq!(levenshtein("Ilsand", "Island"), 2);
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// ```
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Chars = a.chars().collect();
    let b: Chars = b.chars().collect();
    levenshtein_chars(&a, &b)
}

/// Edit distance over pre-split characters.
#[must_use]
pub fn levenshtein_chars(a: &[char], b: &[char]) -> usize {
    // Keep the row over the shorter string.
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut prev: Row = (0..=short.len()).collect();
    let mut curr: Row = SmallVec::from_elem(0, short.len() + 1);

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}
