//! Word list loading utilities
//!
//! Word lists are plain text, one word per line. Usage lists pair a word
//! with a count, separated by whitespace, a comma or a tab. Blank lines and
//! lines starting with `#` are ignored in both.

use crate::core::Word;
use crate::error::{AdvisorError, Result};
use crate::solver::UsageTable;
use rustc_hash::FxHashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| AdvisorError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn content_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Parse a word list, keeping first occurrences only
///
/// With `length` set, words of any other length are dropped. Invalid words
/// are skipped.
///
/// # Examples
/// ```
/// use wordle_advisor::wordlists::loader::parse_words;
///
/// let words = parse_words("crane\nSlate\n# comment\nsh0rt\ncrane\nbat\n", Some(5));
/// assert_eq!(words.len(), 2);
/// assert_eq!(words[1].text(), "slate");
/// ```
#[must_use]
pub fn parse_words(content: &str, length: Option<usize>) -> Vec<Word> {
    let mut seen = FxHashSet::default();
    let mut skipped = 0usize;
    let mut words = Vec::new();

    for (_, line) in content_lines(content) {
        let parsed = match length {
            Some(length) => Word::with_length(line, length),
            None => Word::new(line),
        };
        match parsed {
            Ok(word) => {
                if seen.insert(word.clone()) {
                    words.push(word);
                }
            }
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, kept = words.len(), "skipped unusable word list entries");
    }
    words
}

/// Load a word list from a file
///
/// # Errors
///
/// Returns `AdvisorError::Io` if the file cannot be read.
///
/// # Examples
/// ```no_run
/// use wordle_advisor::wordlists::loader::load_words;
///
/// let words = load_words("data/answers.txt", Some(5)).unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_words<P: AsRef<Path>>(path: P, length: Option<usize>) -> Result<Vec<Word>> {
    let path = path.as_ref();
    let words = parse_words(&read(path)?, length);
    debug!(path = %path.display(), count = words.len(), "word list loaded");
    Ok(words)
}

/// Convert a string slice to a Word vector, skipping invalid entries
///
/// # Examples
/// ```
/// use wordle_advisor::wordlists::loader::words_from_slice;
///
/// let words = words_from_slice(&["crane", "sl@te", "irate"]);
/// assert_eq!(words.len(), 2);
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    slice.iter().filter_map(|&s| Word::new(s).ok()).collect()
}

/// Parse `word count` lines into a usage table
///
/// Malformed lines are logged and skipped.
#[must_use]
pub fn parse_usage(content: &str) -> UsageTable {
    let mut counts = Vec::new();
    for (number, line) in content_lines(content) {
        let mut fields = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty());
        let parsed = match (fields.next(), fields.next(), fields.next()) {
            (Some(word), Some(count), None) => count.parse::<f64>().ok().map(|c| (word, c)),
            _ => None,
        };
        match parsed {
            Some((word, count)) => counts.push((word, count)),
            None => warn!(line = number, content = line, "skipping malformed usage line"),
        }
    }
    UsageTable::from_counts(counts)
}

/// Load a usage table from a file
///
/// # Errors
///
/// Returns `AdvisorError::Io` if the file cannot be read.
pub fn load_usage<P: AsRef<Path>>(path: P) -> Result<UsageTable> {
    let path = path.as_ref();
    let table = parse_usage(&read(path)?);
    debug!(path = %path.display(), entries = table.len(), "usage table loaded");
    Ok(table)
}
