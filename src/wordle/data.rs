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

use crate::wordle::prelude::*;
use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::str::{FromStr, Utf8Error};
use thiserror::Error;

// The word lists, one uppercase word per line. They are embedded into the binary at build time
// and can be re-normalized with the gen_word_sets binary.
pub const EMBED_DATA_DIRECTORY: &str = "txt_data/";
pub const COMMON_WORDS_FILE_NAME: &str = "common_words.txt";
pub const PREVIOUS_WORDS_FILE_NAME: &str = "previous_words.txt";
pub const ALL_WORDS_FILE_NAME: &str = "all_words.txt";

lazy_static! {
    pub static ref DATA: Data = Data::read().expect("should have no failures reading data...");
}

#[derive(RustEmbed)]
#[folder = "txt_data/"]
struct RawData;

///
/// The named word sets a game can be played with. The source decides which words a secret is
/// drawn from (and which words the hints consider), while guesses may always use any word from
/// the "all" set too.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordSource {
    Common,
    Previous,
    All,
}

impl WordSource {
    pub const ALL: [WordSource; 3] = [WordSource::Common, WordSource::Previous, WordSource::All];

    /// The short, stable name used in snapshots (and by the old url format)
    pub fn name(&self) -> &'static str {
        match self {
            WordSource::Common => "common",
            WordSource::Previous => "previous",
            WordSource::All => "all",
        }
    }

    /// Human readable label for the word set selection screen
    pub fn label(&self) -> &'static str {
        match self {
            WordSource::Common => "Common Words",
            WordSource::Previous => "Previous Words",
            WordSource::All => "All Words",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            WordSource::Common => COMMON_WORDS_FILE_NAME,
            WordSource::Previous => PREVIOUS_WORDS_FILE_NAME,
            WordSource::All => ALL_WORDS_FILE_NAME,
        }
    }
}

impl Default for WordSource {
    fn default() -> Self {
        WordSource::Common
    }
}

impl Display for WordSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WordSource {
    type Err = LoadDataErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        WordSource::ALL
            .iter()
            .copied()
            .find(|source| source.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| LoadDataErr::UnknownWordSource(s.to_string()))
    }
}

#[derive(Error, Debug)]
pub enum LoadDataErr {
    #[error("missing word list file '{0}'")]
    MissingWordsFile(&'static str),
    #[error(transparent)]
    EncodingError(#[from] Utf8Error),
    #[error("the word '{0}' in '{1}' is not a valid wordle word")]
    NonWordleWord(String, &'static str),
    #[error("unknown word set '{0}'")]
    UnknownWordSource(String),
}

/// One word set, in file order, plus a lookup for membership tests
#[derive(Clone, Debug, Default)]
pub struct WordList {
    words: Vec<String>,
    lookup: HashSet<String>,
}

impl WordList {
    pub fn new(words: Vec<String>) -> Self {
        let lookup = words.iter().cloned().collect();
        Self { words, lookup }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lookup.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Holds all of the word sets represented by the static/embedded text files
#[derive(Clone, Debug)]
pub struct Data {
    common: WordList,
    previous: WordList,
    all: WordList,
}

impl Data {
    pub fn read() -> Result<Self, LoadDataErr> {
        let out = Self::with_lists(
            try_read_words(WordSource::Common)?,
            try_read_words(WordSource::Previous)?,
            try_read_words(WordSource::All)?,
        );
        for source in WordSource::ALL {
            log::debug!("got {} {} words from data file", out.list(source).len(), source);
        }
        Ok(out)
    }

    /// Builds the data from already normalized lists (the embedded files go through read())
    pub fn with_lists(common: Vec<String>, previous: Vec<String>, all: Vec<String>) -> Self {
        Self {
            common: WordList::new(common),
            previous: WordList::new(previous),
            all: WordList::new(all),
        }
    }

    pub fn list(&self, source: WordSource) -> &WordList {
        match source {
            WordSource::Common => &self.common,
            WordSource::Previous => &self.previous,
            WordSource::All => &self.all,
        }
    }

    /// The words a secret may be drawn from, which is also the candidate pool for hints
    pub fn secrets(&self, source: WordSource) -> &[String] {
        self.list(source).words()
    }

    /// Whether a submitted guess is a real word for a game played with the given source
    pub fn is_allowed_guess(&self, source: WordSource, word: &str) -> bool {
        self.list(source).contains(word) || self.all.contains(word)
    }

    /// Picks a secret uniformly at random from the source. None if the source has no words.
    pub fn random_secret<R>(&self, source: WordSource, rng: &mut R) -> Option<&str>
        where R: Rng + ?Sized
    {
        self.secrets(source).choose(rng).map(|w| w.as_str())
    }
}

/// Reads one of the word list files: one word per line, blank lines are skipped
fn try_read_words(source: WordSource) -> Result<Vec<String>, LoadDataErr> {
    let name = source.file_name();
    let raw = retrieve_file_as_str(name)?.ok_or(LoadDataErr::MissingWordsFile(name))?;
    parse_words(&raw, name)
}

/// Normalizes each non-blank line and rejects anything which is not a wordle word
pub fn parse_words(raw: &str, name: &'static str) -> Result<Vec<String>, LoadDataErr> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let word = normalize_wordle_word(line);
            if is_wordle_str(&word) {
                Ok(word)
            } else {
                Err(LoadDataErr::NonWordleWord(word, name))
            }
        })
        .collect()
}

fn retrieve_file_as_str(name: &str) -> Result<Option<String>, LoadDataErr> {
    let f: rust_embed::EmbeddedFile = if let Some(data) = RawData::get(name) {
        data
    } else {
        #[cfg(not(target_arch = "wasm32"))]
        if let Ok(out) = std::fs::read_to_string(format!("{}{}", EMBED_DATA_DIRECTORY, name)) {
            return Ok(Some(out));
        }

        return Ok(None);
    };

    Ok(Some(
        std::str::from_utf8(&f.data)
            .map_err(LoadDataErr::EncodingError)?
            .to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_case::test_case;

    fn list(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn small_data() -> Data {
        Data::with_lists(
            list(&["CRANE", "SLATE"]),
            list(&["TRACE"]),
            list(&["CRANE", "SLATE", "TRACE", "ZESTY"]),
        )
    }

    #[test]
    fn test_embedded_lists_load() {
        let data = Data::read().expect("embedded data should load");
        for source in WordSource::ALL {
            let words = data.secrets(source);
            assert!(!words.is_empty(), "{} should have words", source);
            assert!(words.iter().all(|w| is_wordle_str(w)), "{} has a bad word", source);
        }
    }

    #[test]
    fn test_embedded_all_contains_other_lists() {
        for source in [WordSource::Common, WordSource::Previous] {
            for word in DATA.secrets(source) {
                assert!(DATA.list(WordSource::All).contains(word), "{} missing from all", word);
            }
        }
    }

    #[test_case("common", WordSource::Common)]
    #[test_case("previous", WordSource::Previous)]
    #[test_case(" ALL ", WordSource::All)]
    fn test_parse_word_source(raw: &str, expected: WordSource) {
        assert_eq!(raw.parse::<WordSource>().ok(), Some(expected));
        assert_eq!(expected.to_string().parse::<WordSource>().ok(), Some(expected));
    }

    #[test]
    fn test_unknown_word_source() {
        assert!(matches!("hard".parse::<WordSource>(), Err(LoadDataErr::UnknownWordSource(_))));
    }

    #[test]
    fn test_parse_words() {
        let words = parse_words("crane\n\n  Slate \n", "test").expect("valid words");
        assert_eq!(words, vec!["CRANE".to_string(), "SLATE".to_string()]);
        assert!(matches!(parse_words("crane\nslates\n", "test"), Err(LoadDataErr::NonWordleWord(w, _)) if w == "SLATES"));
    }

    #[test]
    fn test_allowed_guesses() {
        let data = small_data();
        assert!(data.is_allowed_guess(WordSource::Common, "CRANE"));
        assert!(data.is_allowed_guess(WordSource::Common, "ZESTY"));
        assert!(data.is_allowed_guess(WordSource::Previous, "SLATE"));
        assert!(!data.is_allowed_guess(WordSource::Common, "QQQQQ"));
    }

    #[test]
    fn test_random_secret_comes_from_source() {
        let data = small_data();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let secret = data.random_secret(WordSource::Common, &mut rng).expect("has words");
            assert!(data.list(WordSource::Common).contains(secret));
        }

        let empty = Data::with_lists(Vec::new(), Vec::new(), Vec::new());
        assert_eq!(empty.random_secret(WordSource::All, &mut rng), None);
    }
}
