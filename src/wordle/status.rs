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

use std::fmt::{Display, Formatter};
#[cfg(test)]
use std::iter::FusedIterator;
use std::ops::{Index, IndexMut};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use self::LetterStatus::*;
use super::prelude::*;

///
/// The three different statuses a letter of a guess can have...
///   * Correct = the letter is in the secret at this position
///   * Present = the letter is in the secret, but not at this position
///   * Absent = the letter is not in the secret (also indicates no further instances of a letter
///              when another square with the same letter is marked present/correct)
///
/// The declaration order is also the order in which the filter applies the statuses of a row.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterStatus {
    Correct,
    Present,
    Absent,
}

impl LetterStatus {
    /// All three statuses, in filtering precedence order
    pub const ALL: [LetterStatus; 3] = [Correct, Present, Absent];
    /// The number of possible statuses
    pub const NUM: usize = Self::ALL.len();

    /// The status a solver-mode tile moves to when clicked: Absent -> Present -> Correct -> Absent
    pub fn cycle(&self) -> Self {
        match self {
            Absent => Present,
            Present => Correct,
            Correct => Absent,
        }
    }

    /// How much information the status carries about its letter. Used to decide which status
    /// "wins" on the on-screen keyboard when a letter has been seen more than once.
    pub fn strength(&self) -> u8 {
        match self {
            Absent => 0,
            Present => 1,
            Correct => 2,
        }
    }

    /// Gives the best emoji to represent the status (used for debug printing)
    pub fn emoji(&self) -> &'static str {
        match self {
            Absent => "⬛",
            Present => "🟨",
            Correct => "🟩"
        }
    }

    /// The css class the front-end uses to color a square or key with this status
    pub fn css_class(&self) -> &'static str {
        match self {
            Absent => "s-absent",
            Present => "s-present",
            Correct => "s-correct",
        }
    }
}

impl Default for LetterStatus {
    fn default() -> Self {
        Absent
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputErr {
    #[error("'{0}' is not a valid wordle word")]
    NotAWord(String),
}

/// An array of LetterStatus, one for each square in a row.
pub type StatusArray = [LetterStatus; WORD_SIZE];

/// The array of statuses, but in a struct, so that we can attach some useful functions to a
/// complete row.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct StatusRow(pub StatusArray);

/// Automatic conversion of [LetterStatus; WORD_SIZE] -> StatusRow
impl From<StatusArray> for StatusRow {
    fn from(arr: StatusArray) -> Self {
        Self(arr)
    }
}

/// Delegate indexing of the struct to it's inner value
impl Index<usize> for StatusRow {
    type Output = LetterStatus;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Delegate mutable indexing of the struct to it's inner value
impl IndexMut<usize> for StatusRow {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl StatusRow {
    /// How many different possible rows are there? In the case of a 5 word puzzle with 3
    /// statuses it's 3^5=243 possible rows
    pub const NUM_STATES: usize = LetterStatus::NUM.pow(WORD_SIZE as u32);

    ///
    /// Compute what statuses would be shown given some guess & secret. For example if the guess was
    /// "CRANE" and the secret was "TRACE" we should compute [Present, Correct, Correct, Absent, Correct]
    ///
    /// Both words are uppercased before comparing. Returns an error if either one is not a
    /// WORD_SIZE letter word.
    ///
    /// This is implemented by:
    /// * creating a row where all statuses are defaulted to Absent
    /// * computing a "budget" for each letter in the alphabet (based on their frequency in the secret)
    /// * performing a "GREEN pass" which marks all correctly positioned letters (and updates the budget)
    /// * performing a "YELLOW pass", left to right, to mark present letters while budget remains
    ///
    /// The budget is what stops a letter which appears once in the secret from being credited to
    /// two squares of the guess.
    ///
    pub fn classify(guess: &str, secret: &str) -> Result<Self, InputErr> {
        let guess = validated_word(guess)?;
        let secret = validated_word(secret)?;

        let mut out = Self::default();
        let mut secret_letter_counts = count_letters(&secret);
        let secret_bytes = secret.as_bytes();
        let guess_bytes = guess.as_bytes();

        // GREEN pass
        for i in 0..WORD_SIZE {
            let gc = guess_bytes[i];
            if gc == secret_bytes[i] {
                secret_letter_counts[letter_idx(gc)] -= 1;
                out[i] = Correct;
            }
        }

        // YELLOW pass
        for i in 0..WORD_SIZE {
            if out[i] != Correct {
                let counter = &mut secret_letter_counts[letter_idx(guess_bytes[i])];
                if *counter > 0 {
                    *counter -= 1;
                    out[i] = Present;
                }
            }
        }

        Ok(out)
    }

    /// Whether or not the row indicates that the guess was the secret
    pub fn is_all_correct(&self) -> bool {
        self.0.iter().all(|v| v == &Correct)
    }

    /// Iterates the statuses from left to right
    pub fn iter(&self) -> impl Iterator<Item=LetterStatus> + '_ {
        self.0.iter().copied()
    }

    #[cfg(test)]
    /// Iterates through all possible [LetterStatus; 5] configurations
    pub(crate) fn iter_all_possible() -> IterAllStatusRows {
        IterAllStatusRows::default()
    }
}

/// Convenience wrapper around StatusRow::classify
pub fn classify(guess: &str, secret: &str) -> Result<StatusRow, InputErr> {
    StatusRow::classify(guess, secret)
}

/// Normalizes the input and rejects anything that is not a wordle word
pub(crate) fn validated_word(word: &str) -> Result<String, InputErr> {
    let normalized = normalize_wordle_word(word);
    if is_wordle_str(&normalized) {
        Ok(normalized)
    } else {
        Err(InputErr::NotAWord(word.to_string()))
    }
}

impl Display for StatusRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for status in self.iter() {
            f.write_str(status.emoji())?;
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) struct IterAllStatusRows {
    next: Option<StatusRow>,
}

#[cfg(test)]
impl Default for IterAllStatusRows {
    fn default() -> Self {
        Self { next: Some(StatusRow([Absent; WORD_SIZE])) }
    }
}

#[cfg(test)]
impl Iterator for IterAllStatusRows {
    type Item = StatusRow;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.next?;
        let mut next = cur;
        // flip the right-most status through absent -> present -> correct, and when it is already
        // correct reset it to absent and carry into the status to its left. Running out of
        // digits to carry into means every row has been emitted.
        self.next = None;
        for k in (0..WORD_SIZE).rev() {
            match next[k] {
                Absent => {
                    next[k] = Present;
                    self.next = Some(next);
                    break;
                }
                Present => {
                    next[k] = Correct;
                    self.next = Some(next);
                    break;
                }
                Correct => next[k] = Absent,
            }
        }

        Some(cur)
    }
}

#[cfg(test)]
impl FusedIterator for IterAllStatusRows {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use test_case::test_case;

    #[test]
    fn test_iter_all_possible_is_exhaustive() {
        let all: HashSet<StatusRow> = StatusRow::iter_all_possible().collect();
        assert_eq!(all.len(), StatusRow::NUM_STATES);
        assert_eq!(StatusRow::iter_all_possible().count(), StatusRow::NUM_STATES);
    }

    #[test]
    fn test_cycle_visits_every_status() {
        let mut status = Absent;
        let mut seen = Vec::new();
        for _ in 0..LetterStatus::NUM {
            seen.push(status);
            status = status.cycle();
        }
        assert_eq!(status, Absent);
        assert_eq!(seen, vec![Absent, Present, Correct]);
    }

    #[test_case("CRANE", "TRACE", [Present, Correct, Correct, Absent, Correct])]
    #[test_case("ERASE", "SPEED", [Present, Absent, Absent, Present, Present])]
    #[test_case("ALLEY", "LEVEL", [Absent, Present, Present, Correct, Absent])]
    #[test_case("LEVEL", "ALLEY", [Present, Absent, Absent, Correct, Present])]
    #[test_case("SPEED", "ABIDE", [Absent, Absent, Present, Absent, Present])]
    #[test_case("EERIE", "THEME", [Present, Absent, Absent, Absent, Correct])]
    #[test_case("SPEED", "THEFT", [Absent, Absent, Correct, Absent, Absent])]
    #[test_case("TARES", "SCARE", [Absent, Present, Present, Present, Present])]
    #[test_case("SPARE", "SCARE", [Correct, Absent, Correct, Correct, Correct])]
    #[test_case("LEMMA", "LEGAL", [Correct, Correct, Absent, Absent, Present])]
    #[test_case("TRACE", "TRACE", [Correct, Correct, Correct, Correct, Correct])]
    #[test_case("crane", "trace", [Present, Correct, Correct, Absent, Correct]; "lowercase input is uppercased")]
    fn test_classify(guess: &str, secret: &str, expected: StatusArray) {
        assert_eq!(
            classify(guess, secret),
            Ok(StatusRow(expected)),
            "guess={}, secret={}",
            guess,
            secret
        );
    }

    #[test_case("ALLEY", "LEVEL")]
    #[test_case("LEVEL", "ALLEY")]
    #[test_case("ERASE", "SPEED")]
    #[test_case("EERIE", "THEME")]
    #[test_case("BOBBY", "BLOBS")]
    fn test_classify_credits_each_secret_letter_once(guess: &str, secret: &str) {
        let row = classify(guess, secret).expect("valid words");
        let secret_counts = count_letters(secret);
        let mut credited = [0; ALPHABET_SIZE];
        for (c, status) in guess.bytes().zip(row.iter()) {
            if status != Absent {
                credited[letter_idx(c)] += 1;
            }
        }
        for idx in 0..ALPHABET_SIZE {
            assert!(
                credited[idx] <= secret_counts[idx],
                "letter {} credited {} times but secret {} has {}",
                idx_letter(idx),
                credited[idx],
                secret,
                secret_counts[idx],
            );
        }
    }

    #[test_case("CRANE", "TRACES")]
    #[test_case("CRAN", "TRACE")]
    #[test_case("CR4NE", "TRACE")]
    fn test_classify_rejects_bad_words(guess: &str, secret: &str) {
        assert!(matches!(classify(guess, secret), Err(InputErr::NotAWord(_))));
    }

    #[test]
    fn test_display_uses_emoji() {
        let row = classify("CRANE", "TRACE").expect("valid words");
        assert_eq!(row.to_string(), "🟨🟩🟩⬛🟩");
        assert!(!row.is_all_correct());
        assert!(classify("TRACE", "TRACE").expect("valid words").is_all_correct());
    }
}
