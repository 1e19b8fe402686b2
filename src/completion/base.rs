use nu_ansi_term::Style;

/// A byte range of the line, `[start, end)`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// # Panics
    /// If `end < start`.
    pub fn new(start: usize, end: usize) -> Span {
        assert!(
            end >= start,
            "Can't create a Span whose end < start, start={start}, end={end}"
        );
        Span { start, end }
    }
}

/// A single completion candidate.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Suggestion {
    /// Replacement text introduced into the line when accepted
    pub value: String,
    /// Optional style for the menu entry
    pub style: Option<Style>,
    /// The byte range of the line this replaces
    pub span: Span,
}

/// Converts the line and the dot into completion candidates.
///
/// All suggestions of one invocation are expected to share their span;
/// the completion mode replaces exactly one range of the line.
pub trait Completer: Send {
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion>;
}
