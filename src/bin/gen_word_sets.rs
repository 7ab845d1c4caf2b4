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
use std::{io::{self, Write, BufRead}, fs, time::{Duration, Instant}, collections::{BTreeSet, HashSet}};
use wordle_hints::wordle::*;

/// Re-writes the embedded word lists in canonical form: uppercase, one word per line, no
/// duplicates, and every common/previous word also present in the (sorted) all words list.
fn main() -> io::Result<()> {
    let (dur, out) = timed(normalize_all);
    out?;
    eprintln!("done! normalized {} word sets in {:.2}s", WordSource::ALL.len(), dur.as_secs_f64());
    Ok(())
}

fn normalize_all() -> io::Result<()> {
    let common = read_words(WordSource::Common)?;
    let previous = read_words(WordSource::Previous)?;
    let mut all: BTreeSet<String> = read_words(WordSource::All)?.into_iter().collect();

    let before = all.len();
    all.extend(common.iter().cloned());
    all.extend(previous.iter().cloned());
    if all.len() != before {
        eprintln!("added {} words to {}", all.len() - before, WordSource::All);
    }

    write_words(WordSource::Common, &common)?;
    write_words(WordSource::Previous, &previous)?;
    write_words(WordSource::All, all.iter())?;
    Ok(())
}

fn path_for(source: WordSource) -> String {
    format!("{}{}", EMBED_DATA_DIRECTORY, source.file_name())
}

/// Reads a list in file order, dropping blank lines, duplicates and anything that isn't a word
fn read_words(source: WordSource) -> io::Result<Vec<String>> {
    let path = path_for(source);
    let f = fs::File::open(&path)?;

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for line in io::BufReader::new(f).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let word = normalize_wordle_word(&line);
        if !is_wordle_str(&word) {
            eprintln!("skipping '{}' in {}, not a wordle word", word, path);
            continue;
        }

        if seen.insert(word.clone()) {
            out.push(word);
        }
    }

    eprintln!("read {} {} words", out.len(), source);
    Ok(out)
}

fn write_words<I, W>(source: WordSource, words: I) -> io::Result<()>
    where I: IntoIterator<Item=W>,
          W: AsRef<str>
{
    let at = path_for(source);
    let mut out = io::BufWriter::new(fs::File::options()
        .truncate(true)
        .create(true)
        .write(true)
        .open(&at)?);

    for word in words {
        writeln!(out, "{}", word.as_ref())?;
    }

    out.flush()
}

fn timed<R, F>(f: F) -> (Duration, R)
    where F: FnOnce() -> R
{
    let start_at = Instant::now();
    let out = f();
    let dur = start_at.elapsed();

    (dur, out)
}
