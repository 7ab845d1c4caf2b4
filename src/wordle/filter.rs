/*
 * MIT License
 *
 * Copyright (c) 2022 Joseph Sacchini
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use serde::{Deserialize, Serialize};
use super::{prelude::*, status::*};

///
/// One row of history: the letters that were guessed and the status each square received.
///
/// Rows are created when a guess is submitted in game mode, or read off the grid in solver mode
/// (where the user types letters and clicks squares to set the statuses by hand). Once a row is
/// part of a history it is never changed.
///
/// The fields are only reachable through new(), so the guess is always a valid wordle word. That
/// includes deserialized rows, which go through the same check.
///
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawGuessRecord")]
pub struct GuessRecord {
    guess: String,
    statuses: StatusRow,
}

/// The serialized shape of a GuessRecord, before the guess has been checked
#[derive(Deserialize)]
struct RawGuessRecord {
    guess: String,
    statuses: StatusRow,
}

impl TryFrom<RawGuessRecord> for GuessRecord {
    type Error = InputErr;

    fn try_from(raw: RawGuessRecord) -> Result<Self, Self::Error> {
        Self::new(&raw.guess, raw.statuses)
    }
}

impl GuessRecord {
    /// Builds a row, normalizing the guess to uppercase. Fails if the guess is not a wordle word
    /// (which also means it can't line up with the WORD_SIZE statuses).
    pub fn new(guess: &str, statuses: impl Into<StatusRow>) -> Result<Self, InputErr> {
        Ok(Self {
            guess: validated_word(guess)?,
            statuses: statuses.into(),
        })
    }

    /// Builds the row a guess would receive against a known secret
    pub fn with_secret(guess: &str, secret: &str) -> Result<Self, InputErr> {
        let statuses = classify(guess, secret)?;
        Self::new(guess, statuses)
    }

    /// The guessed word, uppercase
    pub fn guess(&self) -> &str {
        &self.guess
    }

    pub fn statuses(&self) -> StatusRow {
        self.statuses
    }

    /// Whether or not the row indicates that the guess was the secret
    pub fn is_correct(&self) -> bool {
        self.statuses.is_all_correct()
    }

    /// Iterates (position, letter, status) for each square of the row
    pub fn squares(&self) -> impl Iterator<Item=(usize, u8, LetterStatus)> + '_ {
        self.guess
            .bytes()
            .zip(self.statuses.iter())
            .enumerate()
            .map(|(idx, (c, status))| (idx, c, status))
    }

    ///
    /// For every letter with at least one Absent square in this row, the maximum number of times
    /// that letter may occur in the secret: the number of Correct plus Present squares with the
    /// same letter. None means the row places no upper bound on the letter.
    ///
    /// For example "SPEED" with [Absent, Absent, Correct, Absent, Absent] bounds E to 1 (the
    /// Correct one), and S, P & D to 0.
    ///
    pub fn letter_bounds(&self) -> [Option<usize>; ALPHABET_SIZE] {
        let mut known = [0; ALPHABET_SIZE];
        let mut has_absent = [false; ALPHABET_SIZE];
        for (_, c, status) in self.squares() {
            match status {
                LetterStatus::Absent => has_absent[letter_idx(c)] = true,
                _ => known[letter_idx(c)] += 1,
            }
        }

        let mut out = [None; ALPHABET_SIZE];
        for idx in 0..ALPHABET_SIZE {
            if has_absent[idx] {
                out[idx] = Some(known[idx]);
            }
        }

        out
    }

    ///
    /// Removes every candidate which this row rules out, keeping the relative order of the rest.
    ///
    /// The statuses are applied in precedence order: every Correct square, then every Present
    /// square, then the count bounds from letter_bounds (which are derived from the Correct and
    /// Present squares of this same row).
    ///
    /// Candidates are compared byte-for-byte. A candidate of the wrong length is never indexed
    /// out of bounds, it simply fails whichever positional checks it can't satisfy.
    ///
    pub fn narrow(&self, candidates: &mut Vec<&str>) {
        // Correct pass
        for (idx, c, status) in self.squares() {
            if status == LetterStatus::Correct {
                candidates.retain(|word| word.as_bytes().get(idx) == Some(&c));
            }
        }

        // Present pass
        for (idx, c, status) in self.squares() {
            if status == LetterStatus::Present {
                candidates.retain(|word| {
                    let bytes = word.as_bytes();
                    bytes.get(idx) != Some(&c) && bytes.contains(&c)
                });
            }
        }

        // Absent / count-bound pass
        for (idx, bound) in self.letter_bounds().iter().enumerate() {
            if let Some(max) = *bound {
                let letter = idx_letter(idx) as u8;
                candidates.retain(|word| word.bytes().filter(|c| *c == letter).count() <= max);
            }
        }
    }

    /// Tests a single word against this row, with the same semantics as narrow()
    pub fn allows(&self, word: &str) -> bool {
        let mut single = vec![word];
        self.narrow(&mut single);
        !single.is_empty()
    }
}

///
/// Returns the words from the word set which are consistent with every row of history, in the
/// order they appear in the word set.
///
/// Rows are applied oldest first, each one narrowing what the previous rows left behind. An
/// empty history returns the entire word set.
///
pub fn filter_words<'a, W>(word_set: &'a [W], history: &[GuessRecord]) -> Vec<&'a str>
    where W: AsRef<str>
{
    let mut out: Vec<&'a str> = word_set.iter().map(|w| w.as_ref()).collect();
    for record in history {
        record.narrow(&mut out);
        log::trace!("{} {} leaves {} candidates", record.guess, record.statuses, out.len());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::LetterStatus::*;
    use test_case::test_case;

    const SAMPLE: [&str; 12] = [
        "CRANE", "SLATE", "TRACE", "GRAPE", "THEFT", "WHEAT",
        "ALLEY", "HOLES", "SPEED", "ABIDE", "LEVEL", "EERIE",
    ];

    fn row(guess: &str, statuses: StatusArray) -> GuessRecord {
        GuessRecord::new(guess, statuses).expect("valid guess")
    }

    #[test]
    fn test_empty_history_keeps_everything() {
        assert_eq!(filter_words(&SAMPLE, &[]), SAMPLE.to_vec());
    }

    #[test]
    fn test_empty_word_set() {
        let empty: [&str; 0] = [];
        let history = [row("CRANE", [Absent; WORD_SIZE])];
        assert_eq!(filter_words(&empty, &history), Vec::<&str>::new());
    }

    #[test]
    fn test_crane_against_trace() {
        let words = ["CRANE", "SLATE", "TRACE", "GRAPE"];
        let history = [row("CRANE", [Present, Correct, Correct, Absent, Correct])];
        assert_eq!(filter_words(&words, &history), vec!["TRACE"]);
    }

    #[test_case(
        &["CREEK", "THEFT", "SHEET", "WHEAT", "EVENT"],
        "SPEED", [Absent, Absent, Correct, Absent, Absent],
        &["THEFT", "WHEAT"];
        "correct and absent copies of the same letter bound its count"
    )]
    #[test_case(
        &["ALLEY", "BELLE", "HOLES", "VOLES", "EXCEL"],
        "LEVEL", [Present, Absent, Absent, Correct, Present],
        &["ALLEY", "HOLES"];
        "present letters are excluded from their own square"
    )]
    #[test_case(
        &["OLIVE", "SPEED", "ASIDE", "GUIDE", "GEESE"],
        "ERASE", [Absent, Absent, Absent, Absent, Correct],
        &["OLIVE", "GUIDE"];
        "absent letters with no other copies are excluded entirely"
    )]
    fn test_filter_cases(words: &[&str], guess: &str, statuses: StatusArray, expected: &[&str]) {
        let history = [row(guess, statuses)];
        assert_eq!(filter_words(words, &history), expected.to_vec());
    }

    #[test]
    fn test_count_bound_is_not_a_plain_exclusion() {
        // excluding every word with an E would drop THEFT, even though the secret has one E
        let history = [GuessRecord::with_secret("SPEED", "THEFT").expect("valid words")];
        let out = filter_words(&SAMPLE, &history);
        assert!(out.contains(&"THEFT"));
        assert!(out.iter().all(|w| w.bytes().filter(|c| *c == b'E').count() == 1));
    }

    #[test]
    fn test_all_correct_row_keeps_only_that_word() {
        for word in SAMPLE {
            let history = [row(word, [Correct; WORD_SIZE])];
            assert_eq!(filter_words(&SAMPLE, &history), vec![word]);
        }

        let history = [row("ZESTY", [Correct; WORD_SIZE])];
        assert_eq!(filter_words(&SAMPLE, &history), Vec::<&str>::new());
    }

    #[test]
    fn test_self_consistency() {
        for word in SAMPLE {
            let history = [GuessRecord::with_secret(word, word).expect("valid words")];
            assert_eq!(filter_words(&SAMPLE, &history), vec![word], "word={}", word);
        }
    }

    #[test]
    fn test_secret_always_survives_its_own_history() {
        for secret in SAMPLE {
            let history: Vec<GuessRecord> = SAMPLE.iter()
                .map(|guess| GuessRecord::with_secret(guess, secret).expect("valid words"))
                .collect();
            let out = filter_words(&SAMPLE, &history);
            assert_eq!(out, vec![secret], "secret={}", secret);
        }
    }

    #[test_case("CRANE", [Absent, Absent, Absent, Absent, Present]; "one present letter")]
    #[test_case("SLATE", [Absent, Present, Absent, Absent, Correct]; "present and correct")]
    fn test_refiltering_composes(first_guess: &str, first_statuses: StatusArray) {
        let h1 = [row(first_guess, first_statuses)];
        let first = filter_words(&SAMPLE, &h1);
        for statuses in StatusRow::iter_all_possible() {
            let h2 = [row("SPEED", statuses.0)];
            let then = filter_words(&first, &h2);
            let combined: Vec<GuessRecord> = h1.iter().chain(h2.iter()).cloned().collect();
            assert_eq!(filter_words(&SAMPLE, &combined), then, "then SPEED {}", statuses);
        }
    }

    #[test]
    fn test_monotonic_narrowing_for_every_status_row() {
        let base = [row("SLATE", [Absent, Absent, Absent, Absent, Correct])];
        let before = filter_words(&SAMPLE, &base).len();
        assert!(before <= SAMPLE.len());
        for statuses in StatusRow::iter_all_possible() {
            let mut history = base.to_vec();
            history.push(row("LEVEL", statuses.0));
            let after = filter_words(&SAMPLE, &history).len();
            assert!(after <= before, "adding LEVEL {} grew {} -> {}", statuses, before, after);
        }
    }

    #[test]
    fn test_all_absent_boundary() {
        let history = [row("FUZZY", [Absent; WORD_SIZE])];
        let words = ["CRANE", "SLATE"];
        assert_eq!(filter_words(&words, &history), words.to_vec());

        let words = ["CRANE", "FLUFF", "SLATE"];
        assert_eq!(filter_words(&words, &history), vec!["CRANE", "SLATE"]);
    }

    #[test]
    fn test_duplicate_rows_are_harmless() {
        let r = row("CRANE", [Present, Correct, Correct, Absent, Correct]);
        let once = filter_words(&SAMPLE, &[r.clone()]);
        let twice = filter_words(&SAMPLE, &[r.clone(), r]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mismatched_candidate_lengths_do_not_panic() {
        let words = ["TRAC", "TRACES", "TRACE", ""];
        let history = [row("CRANE", [Present, Correct, Correct, Absent, Correct])];
        let out = filter_words(&words, &history);
        assert!(out.contains(&"TRACE"));
    }

    #[test]
    fn test_rows_only_hold_valid_guesses() {
        let r = row("crane", [Present, Correct, Correct, Absent, Correct]);
        assert_eq!(r.guess(), "CRANE");
        assert!(r.allows("TRACE"));

        assert_eq!(
            GuessRecord::new("CRAN", [Absent; WORD_SIZE]),
            Err(InputErr::NotAWord("CRAN".to_string())),
        );
        assert!(GuessRecord::new("CRANES", [Absent; WORD_SIZE]).is_err());
        assert!(GuessRecord::new("cr4ne", [Absent; WORD_SIZE]).is_err());
    }

    #[test]
    fn test_deserialized_rows_go_through_new() {
        let raw = RawGuessRecord { guess: "cr4ne".to_string(), statuses: StatusRow::default() };
        assert_eq!(GuessRecord::try_from(raw), Err(InputErr::NotAWord("cr4ne".to_string())));

        let raw = RawGuessRecord { guess: "crane".to_string(), statuses: StatusRow::default() };
        let r = GuessRecord::try_from(raw).expect("valid guess");
        assert_eq!(r.guess(), "CRANE");
        assert!(!r.allows("TRACE"));
    }

    #[test]
    fn test_letter_bounds() {
        let bounds = row("SPEED", [Absent, Absent, Correct, Absent, Absent]).letter_bounds();
        assert_eq!(bounds[letter_idx(b'E')], Some(1));
        assert_eq!(bounds[letter_idx(b'S')], Some(0));
        assert_eq!(bounds[letter_idx(b'D')], Some(0));
        assert_eq!(bounds[letter_idx(b'A')], None);

        let bounds = row("ERASE", [Present, Absent, Absent, Present, Present]).letter_bounds();
        assert_eq!(bounds[letter_idx(b'E')], None);
        assert_eq!(bounds[letter_idx(b'R')], Some(0));
    }

    #[test]
    fn test_allows_matches_narrow() {
        let r = row("CRANE", [Present, Correct, Correct, Absent, Correct]);
        assert!(r.allows("TRACE"));
        assert!(!r.allows("GRAPE"));
        assert!(!r.allows("CRANE"));
    }
}
