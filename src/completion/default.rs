use std::collections::BTreeSet;

use super::{Completer, Span, Suggestion};

/// A completer over a fixed word list: candidates are the known words
/// beginning with the word under the cursor, replacing that word.
#[derive(Debug, Default, Clone)]
pub struct DefaultCompleter {
    words: BTreeSet<String>,
}

impl DefaultCompleter {
    pub fn new(words: Vec<String>) -> DefaultCompleter {
        DefaultCompleter {
            words: words.into_iter().collect(),
        }
    }

    /// Add more words to complete from.
    pub fn insert(&mut self, words: Vec<String>) {
        self.words.extend(words);
    }
}

/// Start of the whitespace-delimited word containing `pos`.
fn word_start(line: &str, pos: usize) -> usize {
    line[..pos]
        .rfind(char::is_whitespace)
        .map_or(0, |i| i + line[i..].chars().next().map_or(1, char::len_utf8))
}

impl Completer for DefaultCompleter {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let pos = pos.min(line.len());
        let start = word_start(line, pos);
        let seed = &line[start..pos];
        if seed.is_empty() {
            return Vec::new();
        }
        let span = Span::new(start, pos);
        self.words
            .iter()
            .filter(|word| word.starts_with(seed))
            .map(|word| Suggestion {
                value: word.clone(),
                style: None,
                span,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn completer() -> DefaultCompleter {
        DefaultCompleter::new(
            ["hello", "help", "halt", "world"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    #[test]
    fn completes_the_word_under_the_cursor() {
        let mut completer = completer();
        let suggestions = completer.complete("echo h", 6);
        let values: Vec<&str> = suggestions.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec!["halt", "hello", "help"]);
        assert!(suggestions.iter().all(|s| s.span == Span::new(5, 6)));
    }

    #[test]
    fn narrower_seeds_narrow_the_candidates() {
        let mut completer = completer();
        let suggestions = completer.complete("hel", 3);
        let values: Vec<&str> = suggestions.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec!["hello", "help"]);
        assert_eq!(suggestions[0].span, Span::new(0, 3));
    }

    #[test]
    fn empty_seed_completes_nothing() {
        let mut completer = completer();
        assert!(completer.complete("echo ", 5).is_empty());
        assert!(completer.complete("", 0).is_empty());
    }
}
