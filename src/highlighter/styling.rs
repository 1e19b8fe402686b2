/// An ordered list of half-open `[begin, end)` spans over byte offsets of
/// the current line, each mapping to an SGR parameter string.
#[derive(Debug, Clone, Default)]
pub struct Styling {
    /// Sorted by `begin`; spans may nest or overlap, in which case the
    /// active styles are joined.
    spans: Vec<Span>,
}

#[derive(Debug, Clone)]
struct Span {
    begin: usize,
    end: usize,
    style: String,
}

impl Styling {
    /// Record that `[begin, end)` should be painted with `style`.
    /// Empty styles and empty ranges are dropped.
    pub fn add(&mut self, begin: usize, end: usize, style: String) {
        if begin >= end || style.is_empty() {
            return;
        }
        let at = self
            .spans
            .partition_point(|s| s.begin <= begin);
        self.spans.insert(at, Span { begin, end, style });
    }

    /// An applier that steps through offsets in ascending order and yields
    /// the style active at each position.
    pub fn apply(&self) -> StylingApplier<'_> {
        StylingApplier {
            spans: &self.spans,
            next: 0,
            active: Vec::new(),
        }
    }
}

/// Stateful cursor over a [`Styling`]; positions must be visited in
/// ascending order.
pub struct StylingApplier<'a> {
    spans: &'a [Span],
    next: usize,
    active: Vec<&'a Span>,
}

impl StylingApplier<'_> {
    /// Move to byte offset `pos`, activating spans that begin at or before
    /// it and retiring spans that end at or before it.
    pub fn advance_to(&mut self, pos: usize) {
        self.active.retain(|s| s.end > pos);
        while self.next < self.spans.len() && self.spans[self.next].begin <= pos {
            let span = &self.spans[self.next];
            self.next += 1;
            if span.end > pos {
                self.active.push(span);
            }
        }
    }

    /// The style at the current position: active styles joined with `;`.
    pub fn current(&self) -> String {
        let mut out = String::new();
        for span in &self.active {
            if !out.is_empty() {
                out.push(';');
            }
            out.push_str(&span.style);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn styles_at(styling: &Styling, positions: &[usize]) -> Vec<String> {
        let mut applier = styling.apply();
        positions
            .iter()
            .map(|&p| {
                applier.advance_to(p);
                applier.current()
            })
            .collect()
    }

    #[test]
    fn spans_activate_and_retire() {
        let mut styling = Styling::default();
        styling.add(0, 4, "32".to_owned());
        styling.add(5, 7, "31".to_owned());
        assert_eq!(
            styles_at(&styling, &[0, 3, 4, 5, 7]),
            vec!["32", "32", "", "31", ""]
        );
    }

    #[test]
    fn overlapping_spans_join() {
        let mut styling = Styling::default();
        styling.add(0, 10, "4".to_owned());
        styling.add(2, 5, "32".to_owned());
        assert_eq!(styles_at(&styling, &[0, 2, 5]), vec!["4", "4;32", "4"]);
    }

    #[test]
    fn out_of_order_adds_are_sorted() {
        let mut styling = Styling::default();
        styling.add(5, 6, "31".to_owned());
        styling.add(0, 1, "32".to_owned());
        assert_eq!(styles_at(&styling, &[0, 5]), vec!["32", "31"]);
    }

    #[test]
    fn empty_ranges_and_styles_are_ignored() {
        let mut styling = Styling::default();
        styling.add(3, 3, "31".to_owned());
        styling.add(0, 2, String::new());
        assert_eq!(styles_at(&styling, &[0, 3]), vec!["", ""]);
    }
}
