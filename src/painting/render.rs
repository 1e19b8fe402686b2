use log::debug;

use super::buffer::{row_width, Buffer};
use super::utils::{force_width, str_width};
use crate::editor::{EditorState, Mode};
use crate::highlighter::Styling;
use crate::styles::{sgr_params, Styled, StyleSheet};

/// A layout element that paints itself into a width-allocated buffer.
pub(crate) trait Render {
    fn render(&self, b: &mut Buffer);
}

/// Paint `r` into a fresh buffer of the given width.
pub(crate) fn render(r: &dyn Render, width: usize) -> Buffer {
    let mut b = Buffer::new(width);
    r.render(&mut b);
    b
}

/// Renders a list of newline-free strings with a uniform style.
pub(crate) struct Lines<'a> {
    pub(crate) lines: &'a [String],
    pub(crate) style: String,
}

impl Render for Lines<'_> {
    fn render(&self, b: &mut Buffer) {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                b.newline();
            }
            b.writes(line, &self.style);
        }
    }
}

/// Renders the mode title plus the filter text, leaving the dot after the
/// filter so listing modes can park the cursor there.
pub(crate) struct ModeLineRenderer<'a> {
    pub(crate) title: &'a str,
    pub(crate) filter: &'a str,
    pub(crate) sheet: &'a StyleSheet,
}

impl Render for ModeLineRenderer<'_> {
    fn render(&self, b: &mut Buffer) {
        b.writes(self.title, &sgr_params(&self.sheet.mode_line));
        b.writes(" ", "");
        b.writes(self.filter, &sgr_params(&self.sheet.filter));
        b.dot = b.cursor();
    }
}

/// Mode line with a trailing horizontal scrollbar, drawn only when at
/// least three columns remain.
pub(crate) struct ModeLineWithScrollBarRenderer<'a> {
    pub(crate) mode_line: ModeLineRenderer<'a>,
    pub(crate) n: usize,
    pub(crate) low: usize,
    pub(crate) high: usize,
}

impl Render for ModeLineWithScrollBarRenderer<'_> {
    fn render(&self, b: &mut Buffer) {
        self.mode_line.render(b);
        let used = b.cells.last().map_or(0, |row| row_width(row));
        let scrollbar_width = b.width.saturating_sub(used + 2);
        if scrollbar_width >= 3 {
            b.writes(" ", "");
            write_horizontal_scrollbar(
                b,
                self.mode_line.sheet,
                self.n,
                self.low,
                self.high,
                scrollbar_width,
            );
        }
    }
}

/// Renders one styled entry per row, each forced to exactly the buffer
/// width.
pub(crate) struct ListingRenderer<'a> {
    pub(crate) items: &'a [Styled],
}

impl Render for ListingRenderer<'_> {
    fn render(&self, b: &mut Buffer) {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                b.newline();
            }
            b.writes(&force_width(&item.text, b.width), &item.style);
        }
    }
}

/// Listing with a vertical scrollbar in the rightmost column.
pub(crate) struct ListingWithScrollBarRenderer<'a> {
    pub(crate) listing: ListingRenderer<'a>,
    pub(crate) sheet: &'a StyleSheet,
    pub(crate) n: usize,
    pub(crate) low: usize,
    pub(crate) high: usize,
    pub(crate) height: usize,
}

impl Render for ListingWithScrollBarRenderer<'_> {
    fn render(&self, b: &mut Buffer) {
        let inner = render(&self.listing, b.width.saturating_sub(1));
        b.extend_horizontal(Some(inner), 0);
        let bar = render_vertical_scrollbar(self.sheet, self.n, self.low, self.high, self.height);
        b.extend_horizontal(Some(bar), b.width.saturating_sub(1));
    }
}

const NAV_COL_MARGIN: usize = 1;
const NAV_WEIGHTS: [f64; 3] = [1.0, 3.0, 4.0];

/// Renders the three navigator panes side by side; the preview pane is
/// omitted when its allocated width is zero.
pub(crate) struct NavRenderer<'a> {
    pub(crate) parent: ListingRenderer<'a>,
    pub(crate) current: ListingRenderer<'a>,
    pub(crate) preview: ListingRenderer<'a>,
    pub(crate) full_widths: [usize; 3],
}

impl Render for NavRenderer<'_> {
    fn render(&self, b: &mut Buffer) {
        let w = b.width.saturating_sub(2 * NAV_COL_MARGIN);
        let ws = distribute_widths(w, &NAV_WEIGHTS, &self.full_widths);

        let parent = render(&self.parent, ws[0]);
        b.extend_horizontal(Some(parent), 0);

        let current = render(&self.current, ws[1]);
        b.extend_horizontal(Some(current), ws[0] + NAV_COL_MARGIN);

        if ws[2] > 0 {
            let preview = render(&self.preview, ws[2]);
            b.extend_horizontal(Some(preview), ws[0] + ws[1] + 2 * NAV_COL_MARGIN);
        }
    }
}

/// Distribute `width` columns over weighted panes, never exceeding a
/// pane's preferred (full) width.
///
/// Unused budget is redistributed proportionally among panes still below
/// their full width; the rightmost open pane absorbs rounding slack.
pub(crate) fn distribute_widths(width: usize, weights: &[f64], full_widths: &[usize]) -> Vec<usize> {
    let n = weights.len();
    let mut widths = vec![0usize; n];
    let mut done = vec![false; n];
    let mut budget = width;
    loop {
        let open: Vec<usize> = (0..n).filter(|&i| !done[i]).collect();
        if open.is_empty() || budget == 0 {
            break;
        }
        let weight_sum: f64 = open.iter().map(|&i| weights[i]).sum();
        if weight_sum <= 0.0 {
            break;
        }
        let mut capped = false;
        let mut spent = 0usize;
        for &i in &open {
            let share = (budget as f64 * weights[i] / weight_sum).floor() as usize;
            let room = full_widths[i] - widths[i];
            if share >= room {
                widths[i] = full_widths[i];
                spent += room;
                done[i] = true;
                capped = true;
            }
        }
        if capped {
            budget -= spent;
            continue;
        }
        let mut handed = 0usize;
        for (k, &i) in open.iter().enumerate() {
            let share = if k == open.len() - 1 {
                budget - handed
            } else {
                (budget as f64 * weights[i] / weight_sum).floor() as usize
            };
            let share = share.min(full_widths[i] - widths[i]);
            widths[i] += share;
            handed += share;
        }
        break;
    }
    widths
}

fn find_scroll_interval(n: usize, low: usize, high: usize, extent: usize) -> (usize, usize) {
    if n == 0 {
        return (0, extent);
    }
    let project = |i: usize| ((i as f64 / n as f64) * extent as f64 + 0.5) as usize;
    let (mut lo, mut hi) = (project(low).min(extent), project(high).min(extent));
    if lo == hi {
        if hi == extent {
            lo = hi.saturating_sub(1);
        } else {
            hi += 1;
        }
    }
    (lo, hi)
}

fn render_vertical_scrollbar(
    sheet: &StyleSheet,
    n: usize,
    low: usize,
    high: usize,
    height: usize,
) -> Buffer {
    let (lo, hi) = find_scroll_interval(n, low, high, height);
    let thumb = sgr_params(&sheet.scrollbar_thumb);
    let area = sgr_params(&sheet.scrollbar_area);
    let mut b = Buffer::new(1);
    for i in 0..height {
        if i > 0 {
            b.newline();
        }
        if lo <= i && i < hi {
            b.write(' ', &thumb);
        } else {
            b.write('│', &area);
        }
    }
    b
}

fn write_horizontal_scrollbar(
    b: &mut Buffer,
    sheet: &StyleSheet,
    n: usize,
    low: usize,
    high: usize,
    width: usize,
) {
    let (lo, hi) = find_scroll_interval(n, low, high, width);
    let thumb = sgr_params(&sheet.scrollbar_thumb);
    let area = sgr_params(&sheet.scrollbar_area);
    for i in 0..width {
        if lo <= i && i < hi {
            b.write(' ', &thumb);
        } else {
            b.write('━', &area);
        }
    }
}

/// Renders the command line: prompt, styled input, optional completion
/// preview and history suffix, and a right-aligned rprompt when it fits.
pub(crate) struct CmdlineRenderer<'a> {
    pub(crate) prompt: &'a [Styled],
    pub(crate) line: &'a str,
    pub(crate) styling: &'a Styling,
    pub(crate) dot: usize,
    pub(crate) rprompt: &'a [Styled],
    /// Byte range being replaced and the candidate text shown in its place
    pub(crate) comp: Option<(usize, usize, &'a str)>,
    /// Byte offset where the history suffix starts, and the suffix
    pub(crate) hist: Option<(usize, &'a str)>,
    pub(crate) sheet: &'a StyleSheet,
}

impl Render for CmdlineRenderer<'_> {
    fn render(&self, b: &mut Buffer) {
        b.newline_when_full = true;

        b.write_styleds(self.prompt);

        // A short single-row prompt fixes the wrap indent so continuation
        // rows line up under the start of the input.
        if b.line() == 0 && b.col * 2 < b.width {
            b.indent = b.col;
        }

        let comp_style = sgr_params(&self.sheet.completed);
        let mut applier = self.styling.apply();

        // Invoked at every rune boundary i.
        let now_at = |b: &mut Buffer,
                          applier: &mut crate::highlighter::StylingApplier<'_>,
                          i: usize| {
            applier.advance_to(i);
            if let Some((begin, _, text)) = self.comp {
                if i == begin {
                    b.writes(text, &comp_style);
                }
            }
            if i == self.dot {
                b.dot = b.cursor();
            }
        };
        now_at(b, &mut applier, 0);

        let mut i = 0;
        for c in self.line.chars() {
            let replaced = matches!(self.comp, Some((begin, end, _)) if begin <= i && i < end);
            if !replaced {
                let style = applier.current();
                b.write(c, &style);
            }
            i += c.len_utf8();
            now_at(b, &mut applier, i);
            if matches!(self.hist, Some((begin, _)) if i == begin) {
                break;
            }
        }

        if let Some((_, suffix)) = self.hist {
            b.writes(suffix, &sgr_params(&self.sheet.completed_history));
            b.dot = b.cursor();
        }

        if !self.rprompt.is_empty() {
            let rprompt_width: usize = self.rprompt.iter().map(|s| str_width(&s.text)).sum();
            let padding = (b.width as isize) - (b.col as isize) - (rprompt_width as isize);
            if padding >= 1 {
                b.newline_when_full = false;
                b.write_padding(padding as usize, "");
                b.write_styleds(self.rprompt);
            }
        }
    }
}

fn nlines(bufs: &[&Option<Buffer>]) -> usize {
    bufs.iter()
        .map(|b| b.as_ref().map_or(0, |b| b.lines()))
        .sum()
}

fn render_mode_line(es: &EditorState, sheet: &StyleSheet, width: usize) -> Option<Buffer> {
    match es.mode {
        Mode::Insert => None,
        Mode::Command => Some(render(
            &ModeLineRenderer {
                title: "COMMAND",
                filter: "",
                sheet,
            },
            width,
        )),
        Mode::Completion => es.completion.as_ref().map(|c| {
            let (low, high) = c.last_shown;
            render(
                &ModeLineWithScrollBarRenderer {
                    mode_line: ModeLineRenderer {
                        title: "COMPLETING",
                        filter: &c.filter,
                        sheet,
                    },
                    n: c.last_rows,
                    low,
                    high,
                },
                width,
            )
        }),
        Mode::Navigation => es.navigation.as_ref().map(|nav| {
            let here = nav.here().to_string_lossy();
            render(
                &ModeLineRenderer {
                    title: "NAVIGATING",
                    filter: &here,
                    sheet,
                },
                width,
            )
        }),
        Mode::History => es.history_walk.as_ref().map(|h| {
            let title = format!("HISTORY #{}", h.current);
            render(
                &ModeLineRenderer {
                    title: &title,
                    filter: &h.prefix,
                    sheet,
                },
                width,
            )
        }),
    }
}

/// Compose the whole frame: notifications (returned separately, printed
/// once), command line, mode line, tips, and the mode's listing, trimmed
/// to the terminal height.
pub(crate) fn render_editor(
    es: &mut EditorState,
    styling: &Styling,
    sheet: &StyleSheet,
    width: usize,
    height: usize,
) -> (Buffer, Option<Buffer>) {
    let mut buf_noti = None;
    if !es.notifications.is_empty() {
        buf_noti = Some(render(
            &Lines {
                lines: &es.notifications,
                style: String::new(),
            },
            width,
        ));
        es.notifications.clear();
    }

    let selected_text = match es.mode {
        Mode::Completion => es
            .completion
            .as_ref()
            .and_then(|c| c.selected())
            .map(|cand| cand.text.clone()),
        _ => None,
    };
    let mut clr = CmdlineRenderer {
        prompt: &es.prompt,
        line: es.buffer.as_str(),
        styling,
        dot: es.buffer.dot(),
        rprompt: &es.rprompt,
        comp: None,
        hist: None,
        sheet,
    };
    match es.mode {
        Mode::Completion => {
            if let (Some(c), Some(text)) = (&es.completion, &selected_text) {
                clr.comp = Some((c.begin, c.end, text));
            }
        }
        Mode::History => {
            if let Some(h) = &es.history_walk {
                let begin = h.prefix.len();
                clr.hist = Some((begin, &h.line[begin..]));
            }
        }
        _ => {}
    }
    let mut buf_line = Some(render(&clr, width));
    let mut buf_mode = render_mode_line(es, sheet, width);
    let mut buf_tips = if es.tips.is_empty() {
        None
    } else {
        Some(render(
            &Lines {
                lines: &es.tips,
                style: sgr_params(&sheet.tip),
            },
            width,
        ))
    };

    // Decide how much height the listing may take, shedding the lesser
    // elements one by one as the terminal shrinks.
    let mut h_listing = 0;
    if height >= nlines(&[&buf_noti, &buf_line, &buf_mode, &buf_tips]) {
        h_listing = height - nlines(&[&buf_line, &buf_mode, &buf_tips]);
    } else if height >= nlines(&[&buf_noti, &buf_line, &buf_tips]) {
        buf_mode = None;
    } else if height >= nlines(&[&buf_noti, &buf_line]) {
        buf_mode = None;
        let keep = height - nlines(&[&buf_noti, &buf_line]);
        if keep == 0 {
            buf_tips = None;
        } else if let Some(tips) = &mut buf_tips {
            tips.trim_to_lines(0, keep);
        }
    } else if height >= nlines(&[&buf_line]) {
        buf_mode = None;
        buf_tips = None;
        let keep = height - nlines(&[&buf_line]);
        if keep == 0 {
            buf_noti = None;
        } else if let Some(noti) = &mut buf_noti {
            let n = noti.lines();
            noti.trim_to_lines(n - keep, n);
        }
    } else if height >= 1 {
        buf_noti = None;
        buf_mode = None;
        buf_tips = None;
        if let Some(line) = &mut buf_line {
            let dot_line = line.dot.line;
            line.trim_to_lines((dot_line + 1).saturating_sub(height), dot_line + 1);
        }
    } else {
        // Broken terminal; still keep the row holding the dot.
        buf_noti = None;
        buf_mode = None;
        buf_tips = None;
        if let Some(line) = &mut buf_line {
            let dot_line = line.dot.line;
            line.trim_to_lines(dot_line, dot_line + 1);
        }
    }

    let mut buf_listing = None;
    if h_listing > 0 {
        buf_listing = match es.mode {
            Mode::Completion => es
                .completion
                .as_mut()
                .map(|c| c.list_render(width, h_listing, sheet)),
            Mode::Navigation => es
                .navigation
                .as_ref()
                .map(|n| n.list_render(width, h_listing, sheet)),
            Mode::History => es
                .history_walk
                .as_ref()
                .and_then(|h| h.list_render(width, h_listing, sheet)),
            _ => None,
        };
        // The completion scrollbar depends on what the listing just
        // showed, so repaint the mode line; this never changes its row
        // count, which keeps the layout above valid.
        if es.mode == Mode::Completion {
            buf_mode = render_mode_line(es, sheet, width);
        }
    }

    debug!(
        "layout: line {} mode {} tips {} listing {}",
        nlines(&[&buf_line]),
        nlines(&[&buf_mode]),
        nlines(&[&buf_tips]),
        nlines(&[&buf_listing]),
    );

    let mut buf = buf_line.take().unwrap_or_else(|| Buffer::new(width));
    buf.extend(buf_mode, es.mode.cursor_on_mode_line());
    buf.extend(buf_tips, false);
    buf.extend(buf_listing, false);
    (buf, buf_noti)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painting::buffer::Pos;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn row_text(b: &Buffer, i: usize) -> String {
        b.cells[i].iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn lines_renderer_paints_rows() {
        let lines = vec!["one".to_owned(), "two".to_owned()];
        let b = render(
            &Lines {
                lines: &lines,
                style: String::new(),
            },
            10,
        );
        assert_eq!(b.lines(), 2);
        assert_eq!(row_text(&b, 0), "one");
        assert_eq!(row_text(&b, 1), "two");
    }

    #[test]
    fn mode_line_sets_dot_after_filter() {
        let sheet = StyleSheet::default();
        let b = render(
            &ModeLineRenderer {
                title: "COMPLETING",
                filter: "ab",
                sheet: &sheet,
            },
            40,
        );
        assert_eq!(b.dot, Pos::new(0, "COMPLETING ab".len()));
    }

    #[test]
    fn mode_line_scrollbar_needs_three_columns() {
        let sheet = StyleSheet::default();
        let narrow = render(
            &ModeLineWithScrollBarRenderer {
                mode_line: ModeLineRenderer {
                    title: "COMPLETING",
                    filter: "",
                    sheet: &sheet,
                },
                n: 10,
                low: 0,
                high: 5,
            },
            14,
        );
        // Only the title and filter fit; no scrollbar cells were added.
        assert_eq!(row_width(&narrow.cells[0]), "COMPLETING ".len());

        let wide = render(
            &ModeLineWithScrollBarRenderer {
                mode_line: ModeLineRenderer {
                    title: "COMPLETING",
                    filter: "",
                    sheet: &sheet,
                },
                n: 10,
                low: 0,
                high: 5,
            },
            20,
        );
        // title + filter (11) + separating space + 7 columns of bar
        assert_eq!(row_width(&wide.cells[0]), 19);
    }

    #[test]
    fn listing_rows_are_forced_to_width() {
        let items = vec![Styled::plain("short"), Styled::plain("very long entry")];
        let b = render(&ListingRenderer { items: &items }, 8);
        assert_eq!(row_text(&b, 0), "short   ");
        assert_eq!(row_text(&b, 1), "very lon");
        for row in &b.cells {
            assert_eq!(row_width(row), 8);
        }
    }

    #[test]
    fn listing_scrollbar_occupies_last_column() {
        let sheet = StyleSheet::default();
        let items: Vec<Styled> = (0..3).map(|i| Styled::plain(format!("i{i}"))).collect();
        let b = render(
            &ListingWithScrollBarRenderer {
                listing: ListingRenderer { items: &items },
                sheet: &sheet,
                n: 10,
                low: 0,
                high: 3,
                height: 3,
            },
            10,
        );
        assert_eq!(b.lines(), 3);
        for row in &b.cells {
            assert_eq!(row_width(row), 10);
        }
    }

    #[rstest]
    #[case(10, 0, 10, 5, (0, 5))] // full range fills the bar
    #[case(10, 0, 1, 5, (0, 1))] // tiny windows still show a thumb
    #[case(10, 9, 10, 5, (4, 5))] // window at the end keeps the thumb inside
    #[case(10, 10, 10, 5, (4, 5))] // degenerate empty window at the end
    fn scroll_interval_cases(
        #[case] n: usize,
        #[case] low: usize,
        #[case] high: usize,
        #[case] extent: usize,
        #[case] expected: (usize, usize),
    ) {
        assert_eq!(find_scroll_interval(n, low, high, extent), expected);
    }

    #[test]
    fn distribute_respects_full_widths() {
        // Plenty of space: everyone gets their preferred width.
        assert_eq!(
            distribute_widths(100, &[1.0, 3.0, 4.0], &[5, 10, 20]),
            vec![5, 10, 20]
        );
    }

    #[test]
    fn distribute_shares_by_weight_when_tight() {
        let ws = distribute_widths(16, &[1.0, 3.0, 4.0], &[100, 100, 100]);
        assert_eq!(ws.iter().sum::<usize>(), 16);
        assert_eq!(ws, vec![2, 6, 8]);
    }

    #[test]
    fn distribute_redistributes_capped_remainder() {
        let ws = distribute_widths(16, &[1.0, 3.0, 4.0], &[1, 100, 100]);
        assert_eq!(ws[0], 1);
        assert_eq!(ws.iter().sum::<usize>(), 16);
    }

    #[test]
    fn distribute_zero_weight_pane_gets_nothing() {
        let ws = distribute_widths(10, &[0.0, 1.0], &[5, 100]);
        assert_eq!(ws[0], 0);
        assert_eq!(ws[1], 10);
    }

    fn plain_prompt() -> Vec<Styled> {
        vec![Styled::plain("> ")]
    }

    #[test]
    fn cmdline_sets_dot_at_byte_offset() {
        let sheet = StyleSheet::default();
        let styling = Styling::default();
        let prompt = plain_prompt();
        let b = render(
            &CmdlineRenderer {
                prompt: &prompt,
                line: "hello",
                styling: &styling,
                dot: 3,
                rprompt: &[],
                comp: None,
                hist: None,
                sheet: &sheet,
            },
            40,
        );
        assert_eq!(b.dot, Pos::new(0, 2 + 3));
        assert_eq!(row_text(&b, 0), "> hello");
    }

    #[test]
    fn cmdline_sets_indent_for_short_prompts() {
        let sheet = StyleSheet::default();
        let styling = Styling::default();
        let prompt = plain_prompt();
        let b = render(
            &CmdlineRenderer {
                prompt: &prompt,
                line: "0123456789",
                styling: &styling,
                dot: 10,
                rprompt: &[],
                comp: None,
                hist: None,
                sheet: &sheet,
            },
            8,
        );
        assert_eq!(b.indent, 2);
        assert_eq!(b.lines(), 2);
        assert_eq!(row_text(&b, 1), "  6789");
    }

    #[test]
    fn cmdline_wide_prompt_does_not_set_indent() {
        let sheet = StyleSheet::default();
        let styling = Styling::default();
        let prompt = vec![Styled::plain("very-long-prompt> ")];
        let b = render(
            &CmdlineRenderer {
                prompt: &prompt,
                line: "x",
                styling: &styling,
                dot: 1,
                rprompt: &[],
                comp: None,
                hist: None,
                sheet: &sheet,
            },
            20,
        );
        assert_eq!(b.indent, 0);
    }

    #[test]
    fn cmdline_completion_preview_replaces_range() {
        let sheet = StyleSheet::default();
        let styling = Styling::default();
        let prompt = plain_prompt();
        let b = render(
            &CmdlineRenderer {
                prompt: &prompt,
                line: "echo h",
                styling: &styling,
                dot: 6,
                rprompt: &[],
                comp: Some((5, 6, "hello")),
                hist: None,
                sheet: &sheet,
            },
            40,
        );
        assert_eq!(row_text(&b, 0), "> echo hello");
    }

    #[test]
    fn cmdline_history_suffix_is_painted_and_takes_the_dot() {
        let sheet = StyleSheet::default();
        let styling = Styling::default();
        let prompt = plain_prompt();
        let b = render(
            &CmdlineRenderer {
                prompt: &prompt,
                line: "g",
                styling: &styling,
                dot: 1,
                rprompt: &[],
                comp: None,
                hist: Some((1, "rep foo")),
                sheet: &sheet,
            },
            40,
        );
        assert_eq!(row_text(&b, 0), "> grep foo");
        assert_eq!(b.dot, Pos::new(0, "> grep foo".len()));
    }

    #[test]
    fn cmdline_rprompt_right_aligned_when_it_fits() {
        let sheet = StyleSheet::default();
        let styling = Styling::default();
        let prompt = plain_prompt();
        let rprompt = vec![Styled::plain("RP")];
        let b = render(
            &CmdlineRenderer {
                prompt: &prompt,
                line: "ab",
                styling: &styling,
                dot: 2,
                rprompt: &rprompt,
                comp: None,
                hist: None,
                sheet: &sheet,
            },
            10,
        );
        assert_eq!(row_text(&b, 0), "> ab    RP");
        // The dot stays at the input position, not after the rprompt.
        assert_eq!(b.dot, Pos::new(0, 4));
    }

    #[test]
    fn cmdline_rprompt_dropped_without_a_padding_column() {
        let sheet = StyleSheet::default();
        let styling = Styling::default();
        let prompt = plain_prompt();
        let rprompt = vec![Styled::plain("RPROMPT")];
        let b = render(
            &CmdlineRenderer {
                prompt: &prompt,
                line: "abc",
                styling: &styling,
                dot: 3,
                rprompt: &rprompt,
                comp: None,
                hist: None,
                sheet: &sheet,
            },
            12,
        );
        assert_eq!(row_text(&b, 0), "> abc");
    }
}
