mod resolver;
mod simple_parser;
mod styling;

pub use resolver::SystemResolver;
pub use simple_parser::SimpleParser;
pub use styling::{Styling, StylingApplier};

use crate::styles::{sgr_params, StyleSheet};

/// What a token is, as reported by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// The command head of a form
    Head,
    /// An ordinary word
    Primary(PrimaryKind),
    /// A command separator (`;`, `|`, `&`, newline)
    Sep,
    /// A comment to the end of the line
    Comment,
    /// A redirection operator
    Operator,
}

/// The flavor of a primary word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryKind {
    Bareword,
    SingleQuoted,
    DoubleQuoted,
    Variable,
}

/// One token of the current line, with byte offsets into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub begin: usize,
    pub end: usize,
    pub kind: TokenKind,
    pub text: String,
}

/// The seam to the script language's lexer: given the current line,
/// produce a token stream. Must be cheap enough to run on every keystroke.
pub trait Parser {
    fn parse(&self, src: &str) -> Vec<Token>;
}

/// The narrow name-resolution capability the highlighter needs to judge
/// command heads. The shell's evaluator implements this; the editor never
/// sees the evaluator itself.
pub trait NameResolver {
    /// Is `name` a special form built into the language?
    fn is_builtin_special(&self, name: &str) -> bool;
    /// Is `name` a builtin function?
    fn is_builtin_fn(&self, name: &str) -> bool;
    /// Is `name` a user-defined function in namespace `ns` (`""` for the
    /// global namespace)?
    fn is_user_fn(&self, ns: &str, name: &str) -> bool;
    /// Is `name` an external command on `PATH`?
    fn is_external(&self, name: &str) -> bool;
    /// Is `path` an executable file?
    fn is_executable(&self, path: &str) -> bool;
    /// Is `path` a directory?
    fn is_dir(&self, path: &str) -> bool;
}

/// Whether a head of this shape is looked up on `PATH` (false) or treated
/// as a filesystem path directly (true).
fn dont_search(head: &str) -> bool {
    head.starts_with('/') || head.starts_with("./") || head.starts_with("../")
}

fn good_form_head(head: &str, resolver: &dyn NameResolver) -> bool {
    if resolver.is_builtin_special(head) {
        return true;
    }
    if dont_search(head) {
        return resolver.is_executable(head) || resolver.is_dir(head);
    }
    let (ns, name) = head.split_once(':').unwrap_or(("", head));
    match ns {
        "" => {
            if resolver.is_builtin_fn(name) || resolver.is_user_fn("", name) {
                return true;
            }
        }
        "e" => {
            if resolver.is_external(name) {
                return true;
            }
        }
        _ => {
            if resolver.is_user_fn(ns, name) {
                return true;
            }
        }
    }
    resolver.is_external(head)
}

/// The argument tokens of the form whose head is at `head_idx`: everything
/// up to the next separator, skipping redirections.
fn form_args<'a>(tokens: &'a [Token], head_idx: usize) -> Vec<&'a Token> {
    let mut args = Vec::new();
    for token in &tokens[head_idx + 1..] {
        match token.kind {
            TokenKind::Sep | TokenKind::Comment => break,
            TokenKind::Operator => {}
            _ => args.push(token),
        }
    }
    args
}

fn highlight_for_form(args: &[&Token], styling: &mut Styling, sheet: &StyleSheet) {
    if let Some(var) = args.first() {
        styling.add(var.begin, var.end, sgr_params(&sheet.variable));
    }
    if let Some(arg) = args.get(3) {
        if arg.text == "else" {
            styling.add(arg.begin, arg.end, sgr_params(&sheet.keyword));
        }
    }
}

/// Walk the `except`/`else`/`finally` keyword positions of a `try` form.
/// A missing position stops the walk; the remainder of the form is left
/// unstyled rather than guessed at.
fn highlight_try_form(args: &[&Token], styling: &mut Styling, sheet: &StyleSheet) {
    let mut i = 1;
    let keyword_at = |idx: usize, name: &str, styling: &mut Styling| -> Option<bool> {
        let arg = args.get(idx)?;
        if arg.text == name {
            styling.add(arg.begin, arg.end, sgr_params(&sheet.keyword));
            Some(true)
        } else {
            Some(false)
        }
    };
    match keyword_at(i, "except", styling) {
        None => return,
        Some(true) => {
            if let Some(var) = args.get(i + 1) {
                styling.add(var.begin, var.end, sgr_params(&sheet.variable));
            }
            i += 3;
        }
        Some(false) => {}
    }
    match keyword_at(i, "else", styling) {
        None => return,
        Some(true) => i += 2,
        Some(false) => {}
    }
    keyword_at(i, "finally", styling);
}

/// Turn the token stream into styling spans. Pure over its inputs, so it
/// can be re-run on every keystroke; cost is linear in the tokens.
pub(crate) fn highlight(
    tokens: &[Token],
    resolver: &dyn NameResolver,
    sheet: &StyleSheet,
) -> Styling {
    let mut styling = Styling::default();
    for (i, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::Head => {
                let style = if good_form_head(&token.text, resolver) {
                    &sheet.good_command
                } else {
                    &sheet.bad_command
                };
                styling.add(token.begin, token.end, sgr_params(style));
                let args = form_args(tokens, i);
                match token.text.as_str() {
                    "for" => highlight_for_form(&args, &mut styling, sheet),
                    "try" => highlight_try_form(&args, &mut styling, sheet),
                    _ => {}
                }
            }
            TokenKind::Primary(kind) => {
                let style = match kind {
                    PrimaryKind::Bareword => continue,
                    PrimaryKind::SingleQuoted => &sheet.single_quoted,
                    PrimaryKind::DoubleQuoted => &sheet.double_quoted,
                    PrimaryKind::Variable => &sheet.variable,
                };
                styling.add(token.begin, token.end, sgr_params(style));
            }
            TokenKind::Sep => {
                let style = if token.text.starts_with('#') {
                    &sheet.comment
                } else {
                    &sheet.sep
                };
                styling.add(token.begin, token.end, sgr_params(style));
            }
            TokenKind::Comment => {
                styling.add(token.begin, token.end, sgr_params(&sheet.comment));
            }
            TokenKind::Operator => {
                styling.add(token.begin, token.end, sgr_params(&sheet.operator));
            }
        }
    }
    styling
}
