use std::collections::BTreeMap;
use super::prelude::*;

///
/// How many times each letter occurs across a list of candidate words.
///
/// Every square counts, so a word with a double letter contributes 2 for that letter. Letters are
/// kept in alphabetical order, which is also how ties are broken when ranking.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LetterCounts {
    counts: BTreeMap<char, usize>,
}

impl LetterCounts {
    /// Tallies every character of every candidate. An empty list yields an empty table.
    pub fn tally<W>(candidates: &[W]) -> Self
        where W: AsRef<str>
    {
        let mut counts = BTreeMap::new();
        for word in candidates {
            for c in word.as_ref().chars() {
                *counts.entry(c).or_insert(0) += 1;
            }
        }

        Self { counts }
    }

    /// The count for a single letter (0 if it never appeared)
    pub fn get(&self, letter: char) -> usize {
        self.counts.get(&letter).copied().unwrap_or(0)
    }

    /// Number of distinct letters seen
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, which is the total number of letters across the candidates
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// (letter, count) pairs in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item=(char, usize)> + '_ {
        self.counts.iter().map(|(c, n)| (*c, *n))
    }

    /// Every (letter, count) pair, most common first, ties in alphabetical order
    pub fn ranked(&self) -> Vec<(char, usize)> {
        let mut out: Vec<(char, usize)> = self.iter().collect();
        // sort_by is stable, and iter() is alphabetical
        out.sort_by(|a, b| b.1.cmp(&a.1));
        out
    }

    /// The K most common letters, in the same order as ranked()
    pub fn top<const K: usize>(&self) -> TopK<(char, usize), K>
        where
            [Option<(char, usize)>; K]: Default,
            [Option<usize>; K]: Default,
    {
        self.iter().top_k(|(_, n)| *n)
    }
}

/// Convenience wrapper around LetterCounts::tally
pub fn tally<W>(candidates: &[W]) -> LetterCounts
    where W: AsRef<str>
{
    LetterCounts::tally(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_empty_input() {
        let empty: [&str; 0] = [];
        let counts = tally(&empty);
        assert!(counts.is_empty());
        assert_eq!(counts.total(), 0);
        assert!(counts.ranked().is_empty());
        assert_eq!(counts.top::<N_LETTER_HINTS>().count(), 0);
    }

    #[test]
    fn test_double_letters_count_twice() {
        let counts = tally(&["ALLEY", "LEVEL"]);
        assert_eq!(counts.get('L'), 4);
        assert_eq!(counts.get('E'), 3);
        assert_eq!(counts.get('A'), 1);
        assert_eq!(counts.get('V'), 1);
        assert_eq!(counts.get('Y'), 1);
        assert_eq!(counts.get('Z'), 0);
        assert_eq!(counts.len(), 5);
    }

    #[test]
    fn test_ranked_breaks_ties_alphabetically() {
        let counts = tally(&["ALLEY", "LEVEL"]);
        assert_eq!(
            counts.ranked(),
            vec![('L', 4), ('E', 3), ('A', 1), ('V', 1), ('Y', 1)],
        );
    }

    #[test]
    fn test_top_k_agrees_with_ranked() {
        let words = ["CRANE", "SLATE", "TRACE", "GRAPE", "THEFT", "WHEAT"];
        let counts = tally(&words);
        let top: Vec<(char, usize)> = counts.top::<4>().collect();
        assert_eq!(top, counts.ranked()[..4].to_vec());
    }

    #[test_case(&["CRANE"]; "single word")]
    #[test_case(&["CRANE", "SLATE", "TRACE", "GRAPE"]; "several words")]
    #[test_case(&["EERIE", "LEVEL", "SPEED"]; "lots of repeats")]
    fn test_tally_conserves_letters(words: &[&str]) {
        let expected: usize = words.iter().map(|w| w.len()).sum();
        assert_eq!(tally(words).total(), expected);
    }
}
