//! Lexical analysis for the shell: splitting an input line into words.

use log::debug;

/// Characters that end a word on a command line: space, tab, carriage
/// return, newline and the bell character.
const DELIMITERS: [char; 5] = [' ', '\t', '\r', '\n', '\u{7}'];

/// Split one command line into its argument vector.
///
/// Splitting is deliberately naive: any run of delimiter characters ends a
/// word, and quotes and backslashes have no special meaning. Leading and
/// trailing delimiters produce no empty words, so an empty or
/// all-delimiter line yields an empty vector. The first element, when
/// present, is the command name.
pub fn split_line(line: &str) -> Vec<String> {
    let argv: Vec<String> = line
        .split(|ch: char| DELIMITERS.contains(&ch))
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect();
    debug!("{} token(s)", argv.len());
    argv
}
