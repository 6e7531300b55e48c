//! Line tokenizer: maximal runs of non-separator characters.

use std::str::CharIndices;

/// Token boundary rule. Punctuation follows the POSIX `punct` class, i.e.
/// every character that is neither alphanumeric, space, nor control.
pub fn is_separator(c: char) -> bool {
    c.is_control() || c.is_whitespace() || c.is_numeric() || !c.is_alphanumeric()
}

/// A token borrowed from its line, with its byte offset in that line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub offset: usize,
}

/// Iterator over the tokens of one line. See [`tokenize`].
pub struct Tokens<'a> {
    line: &'a str,
    chars: CharIndices<'a>,
    start: Option<usize>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, c) in self.chars.by_ref() {
            if is_separator(c) {
                if let Some(start) = self.start.take() {
                    return Some(Token {
                        text: &self.line[start..idx],
                        offset: start,
                    });
                }
            } else if self.start.is_none() {
                self.start = Some(idx);
            }
        }
        // End of line closes an open run.
        self.start.take().map(|start| Token {
            text: &self.line[start..],
            offset: start,
        })
    }
}

pub fn tokenize(line: &str) -> Tokens<'_> {
    Tokens {
        line,
        chars: line.char_indices(),
        start: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &str) -> Vec<&str> {
        tokenize(line).map(|t| t.text).collect()
    }

    #[test]
    fn splits_on_punctuation_digits_and_space() {
        assert_eq!(
            texts("Хорошая разработка, 2024 г.: продукт!"),
            vec!["Хорошая", "разработка", "г", "продукт"]
        );
    }

    #[test]
    fn emits_trailing_token_and_offsets() {
        let tokens: Vec<_> = tokenize("  ab\tcd").collect();
        assert_eq!(
            tokens,
            vec![
                Token { text: "ab", offset: 2 },
                Token { text: "cd", offset: 5 },
            ]
        );
    }

    #[test]
    fn digits_and_symbols_break_words() {
        assert_eq!(texts("abc1def"), vec!["abc", "def"]);
        assert_eq!(texts("кило-грамм"), vec!["кило", "грамм"]);
        assert_eq!(texts("a+b«c»\r"), vec!["a", "b", "c"]);
    }

    #[test]
    fn empty_and_separator_only_lines_yield_nothing() {
        assert!(texts("").is_empty());
        assert!(texts(" ,.;123\t").is_empty());
    }

    #[test]
    fn separator_classes() {
        for c in [' ', '\t', '\u{7}', '.', '—', '«', '5', '٣', '$'] {
            assert!(is_separator(c), "{c:?} should separate");
        }
        for c in ['a', 'Я', 'ё', 'ß'] {
            assert!(!is_separator(c), "{c:?} should not separate");
        }
    }
}
