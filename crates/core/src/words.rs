// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Word splitting and edit-prefix splicing.

/// Split a line for completion.
///
/// The last element is always the word being completed: when the line is
/// empty or ends in whitespace, an empty word is appended for it.
pub fn split_line(line: &str) -> Vec<String> {
    let mut words: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    if line.is_empty() || line.ends_with(char::is_whitespace) {
        words.push(String::new());
    }
    words
}

/// Split a submitted line into its words.
pub fn split_command(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

/// Insert `prefix` after the first word.
///
/// A single word is left alone so top-level commands such as `top` or
/// `exit` keep working while a prefix is active.
pub fn splice_prefix(words: Vec<String>, prefix: &[String]) -> Vec<String> {
    if prefix.is_empty() || words.len() < 2 {
        return words;
    }
    let mut words = words.into_iter();
    let mut spliced = Vec::with_capacity(words.len() + prefix.len());
    spliced.extend(words.next());
    spliced.extend(prefix.iter().cloned());
    spliced.extend(words);
    spliced
}

#[cfg(test)]
#[path = "words_tests.rs"]
mod tests;
