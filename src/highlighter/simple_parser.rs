use super::{Parser, PrimaryKind, Token, TokenKind};

/// A self-contained tokenizer for a small shell-like syntax: barewords,
/// single and double quotes, `$variables`, comments, separators and
/// redirections. It stands in for the real language parser wherever one
/// has not been plugged in.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleParser;

fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, ';' | '|' | '&' | '<' | '>' | '#' | '\'' | '"' | '$')
}

impl Parser for SimpleParser {
    fn parse(&self, src: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut at_head = true;
        let mut iter = src.char_indices().peekable();

        let mut push = |begin: usize, end: usize, kind: TokenKind| {
            tokens.push(Token {
                begin,
                end,
                kind,
                text: src[begin..end].to_owned(),
            });
        };

        while let Some(&(begin, c)) = iter.peek() {
            if c.is_whitespace() && c != '\n' {
                iter.next();
                continue;
            }
            match c {
                '#' => {
                    let mut end = src.len();
                    for (i, c) in iter.by_ref() {
                        if c == '\n' {
                            end = i;
                            break;
                        }
                    }
                    push(begin, end, TokenKind::Comment);
                    at_head = true;
                }
                '\n' | ';' | '|' | '&' => {
                    iter.next();
                    let mut end = begin + c.len_utf8();
                    // && and || are one separator
                    if (c == '&' || c == '|') && iter.peek().map(|&(_, n)| n) == Some(c) {
                        iter.next();
                        end += c.len_utf8();
                    }
                    push(begin, end, TokenKind::Sep);
                    at_head = true;
                }
                '<' | '>' => {
                    iter.next();
                    let mut end = begin + c.len_utf8();
                    if c == '>' && iter.peek().map(|&(_, n)| n) == Some('>') {
                        iter.next();
                        end += 1;
                    }
                    push(begin, end, TokenKind::Operator);
                }
                '\'' | '"' => {
                    iter.next();
                    let mut end = src.len();
                    while let Some((i, n)) = iter.next() {
                        if n == '\\' && c == '"' {
                            iter.next();
                            continue;
                        }
                        if n == c {
                            end = i + n.len_utf8();
                            break;
                        }
                    }
                    let kind = if c == '\'' {
                        PrimaryKind::SingleQuoted
                    } else {
                        PrimaryKind::DoubleQuoted
                    };
                    push(begin, end, TokenKind::Primary(kind));
                    at_head = false;
                }
                '$' => {
                    iter.next();
                    let mut end = begin + 1;
                    while let Some(&(i, n)) = iter.peek() {
                        if is_word_char(n) {
                            iter.next();
                            end = i + n.len_utf8();
                        } else {
                            break;
                        }
                    }
                    push(begin, end, TokenKind::Primary(PrimaryKind::Variable));
                    at_head = false;
                }
                _ => {
                    let mut end = begin;
                    while let Some(&(i, n)) = iter.peek() {
                        if is_word_char(n) {
                            iter.next();
                            end = i + n.len_utf8();
                        } else {
                            break;
                        }
                    }
                    let kind = if at_head {
                        TokenKind::Head
                    } else {
                        TokenKind::Primary(PrimaryKind::Bareword)
                    };
                    push(begin, end, kind);
                    at_head = false;
                }
            }
        }
        tokens
    }
}
