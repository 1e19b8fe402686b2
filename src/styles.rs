use nu_ansi_term::{Color, Style};

/// A run of text painted with one style.
///
/// The style is kept as the SGR parameter list (the digits between `\x1b[`
/// and `m`); an empty string means the terminal default.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Styled {
    pub text: String,
    pub style: String,
}

impl Styled {
    /// A run with the terminal's default style.
    pub fn plain(text: impl Into<String>) -> Styled {
        Styled {
            text: text.into(),
            style: String::new(),
        }
    }

    /// A run painted with `style`.
    pub fn new(text: impl Into<String>, style: &Style) -> Styled {
        Styled {
            text: text.into(),
            style: sgr_params(style),
        }
    }
}

/// Extract the SGR parameter list from a [`Style`].
///
/// `Style::prefix()` renders the full escape sequence; the screen buffer
/// stores only the parameters so that cell diffs compare cheaply.
pub(crate) fn sgr_params(style: &Style) -> String {
    let prefix = style.prefix().to_string();
    prefix
        .strip_prefix("\x1b[")
        .and_then(|p| p.strip_suffix('m'))
        .unwrap_or("")
        .to_owned()
}

/// The named styles used by the renderers and the highlighter.
///
/// Every color decision the editor makes goes through one of these fields,
/// so embedders can restyle the whole surface by replacing the sheet.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    /// Mode name in the mode line
    pub mode_line: Style,
    /// Filter text following the mode name
    pub filter: Style,
    /// Tips printed under the mode line
    pub tip: Style,
    /// Selected entry in a listing
    pub selected: Style,
    /// Completion candidate previewed in the command line
    pub completed: Style,
    /// History suffix previewed in the command line
    pub completed_history: Style,
    /// Scrollbar thumb
    pub scrollbar_thumb: Style,
    /// Scrollbar trough
    pub scrollbar_area: Style,

    /// Command head that resolves to something runnable
    pub good_command: Style,
    /// Command head that resolves to nothing
    pub bad_command: Style,
    /// Variables, including loop and exception variables
    pub variable: Style,
    /// Comments
    pub comment: Style,
    /// Command separators
    pub sep: Style,
    /// Structural keywords inside special forms
    pub keyword: Style,
    /// Redirection operators
    pub operator: Style,
    /// Single-quoted strings
    pub single_quoted: Style,
    /// Double-quoted strings
    pub double_quoted: Style,

    /// Directory entries in the navigator
    pub nav_dir: Style,
    /// Symlink entries in the navigator
    pub nav_symlink: Style,
    /// Executable entries in the navigator
    pub nav_executable: Style,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            mode_line: Style::new().bold().fg(Color::White).on(Color::Magenta),
            filter: Style::new().underline(),
            tip: Style::default(),
            selected: Style::new().reverse(),
            completed: Style::new().underline(),
            completed_history: Style::new().dimmed(),
            scrollbar_thumb: Style::new().reverse().fg(Color::Magenta),
            scrollbar_area: Style::new().fg(Color::Magenta),

            good_command: Style::new().fg(Color::Green),
            bad_command: Style::new().fg(Color::Red),
            variable: Style::new().fg(Color::Magenta),
            comment: Style::new().fg(Color::Cyan),
            sep: Style::default(),
            keyword: Style::new().bold().fg(Color::Yellow),
            operator: Style::new().fg(Color::Yellow),
            single_quoted: Style::new().fg(Color::Yellow),
            double_quoted: Style::new().fg(Color::Yellow),

            nav_dir: Style::new().bold().fg(Color::Blue),
            nav_symlink: Style::new().fg(Color::Cyan),
            nav_executable: Style::new().fg(Color::Green),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sgr_params_of_default_style_is_empty() {
        assert_eq!(sgr_params(&Style::default()), "");
    }

    #[test]
    fn sgr_params_strips_the_escape_framing() {
        let style = Style::new().bold().fg(Color::Red);
        let params = sgr_params(&style);
        assert!(!params.contains('\x1b'));
        assert!(!params.contains('m'));
        assert_eq!(format!("\x1b[{params}m"), style.prefix().to_string());
    }

    #[test]
    fn styled_runs_carry_params() {
        let s = Styled::new("ls", &Style::new().fg(Color::Green));
        assert_eq!(s.text, "ls");
        assert!(!s.style.is_empty());
        assert_eq!(Styled::plain("x").style, "");
    }
}
