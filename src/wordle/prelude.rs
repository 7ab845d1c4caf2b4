// This file allows you to configure some of the constants that define the game of wordle.
//
// It is unlikely you will ever change the WORD_SIZE but if you want to, it should be supported by
// this implementation.


// how many characters are in a wordle answer?
pub const WORD_SIZE: usize = 5;
// how many turns are you allowed to play?
pub const NUM_TURNS: usize = 6;
// how many letters are in the english alphabet? (don't change this lol)
pub const ALPHABET_SIZE: usize = (('Z' as usize) - ('A' as usize)) + 1;
// how many letters to show in the "most common letters" hint
pub const N_LETTER_HINTS: usize = 10;
// how many candidate words the hint panel shows before truncating with "..."
pub const N_WORD_HINTS: usize = 50;
// how many clicks on the title it takes to unlock solver mode
pub const SOLVER_UNLOCK_CLICKS: usize = 5;

pub use crate::util::*;

/// Returns the number of times each letter of the alphabet occurs in the argument. The &str should
/// be in uppercase. The output is indexed by the position of the letter in the alphabet.
pub fn count_letters(word: &str) -> [usize; ALPHABET_SIZE] {
    count_letters_bytes(word.as_bytes())
}

/// Returns the number of times each letter of the alphabet occurs in the argument. Bytes which are
/// not uppercase ASCII letters are skipped, so this never panics on malformed candidates.
pub fn count_letters_bytes(word: &[u8]) -> [usize; ALPHABET_SIZE] {
    let mut out = [0; ALPHABET_SIZE];
    for c in word.iter().filter(|c| is_normal_wordle_char(c)) {
        out[letter_idx(*c)] += 1;
    }

    out
}

/// Returns the index of the given letter within the alphabet (like 'A' = 0, 'B' = 1, etc...)
pub fn letter_idx(letter: u8) -> usize {
    ((letter as isize) - ('A' as isize)) as usize
}

/// Inverse of letter_idx
pub fn idx_letter(idx: usize) -> char {
    debug_assert!(idx < ALPHABET_SIZE);
    (b'A' + idx as u8) as char
}

/// Checks whether or not the passed string meets the constraints of a "wordle_str"
/// must be (5 letters, all uppercase)
pub fn is_wordle_str(v: &str) -> bool {
    is_wordle_str_bytes(v.as_bytes())
}

/// Checks whether or not the passed bytes represent an ASCII sequence which is also a "wordle_str"
pub fn is_wordle_str_bytes(v: &[u8]) -> bool {
    v.len() == WORD_SIZE && v.iter().all(is_normal_wordle_char)
}

/// Given some input &str, try to clean it up such that it might be a wordle_str.
///
/// This function does not trim the length of a word or remove non alpha characters. It simply
/// cleans up words that are already valid wordle words by removing any spacing and converting
/// to all uppercase.
///
/// You should always verify that the output of this function passes is_wordle_str.
pub fn normalize_wordle_word(str: &str) -> String {
    str.trim().to_uppercase()
}

/// Verifies that a byte represents an uppercase alphabetic character (a valid wordle_str char)
pub fn is_normal_wordle_char(v: &u8) -> bool {
    v.is_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("CRANE", true)]
    #[test_case("crane", false)]
    #[test_case("CRANES", false)]
    #[test_case("CR4NE", false)]
    #[test_case("", false)]
    fn test_is_wordle_str(word: &str, expected: bool) {
        assert_eq!(is_wordle_str(word), expected, "word={:?}", word);
    }

    #[test]
    fn test_normalize_then_validate() {
        assert_eq!(normalize_wordle_word("  crane\n"), "CRANE");
        assert!(is_wordle_str(&normalize_wordle_word(" Slate ")));
    }

    #[test]
    fn test_count_letters_with_repeats() {
        let counts = count_letters("LEVEL");
        assert_eq!(counts[letter_idx(b'L')], 2);
        assert_eq!(counts[letter_idx(b'E')], 2);
        assert_eq!(counts[letter_idx(b'V')], 1);
        assert_eq!(counts.iter().sum::<usize>(), 5);
    }

    #[test]
    fn test_count_letters_skips_junk() {
        let counts = count_letters_bytes(b"A-b!A");
        assert_eq!(counts[letter_idx(b'A')], 2);
        assert_eq!(counts.iter().sum::<usize>(), 2);
    }

    #[test]
    fn test_letter_idx_roundtrip() {
        for idx in 0..ALPHABET_SIZE {
            assert_eq!(letter_idx(idx_letter(idx) as u8), idx);
        }
    }
}
