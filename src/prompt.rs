use crate::styles::Styled;

/// Computes the prompt and the right-aligned rprompt.
///
/// Both are re-rendered before every refresh, so a prompt may change from
/// keystroke to keystroke (clocks, git status, and the like).
pub trait Prompt {
    /// The styled runs drawn before the input.
    fn render_prompt_left(&self) -> Vec<Styled>;

    /// The styled runs drawn right-aligned on the first line, when at
    /// least one column of padding remains.
    fn render_prompt_right(&self) -> Vec<Styled> {
        Vec::new()
    }
}

/// A fixed-text prompt.
#[derive(Debug, Clone)]
pub struct DefaultPrompt {
    left: String,
    right: String,
}

impl DefaultPrompt {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> DefaultPrompt {
        DefaultPrompt {
            left: left.into(),
            right: right.into(),
        }
    }
}

impl Default for DefaultPrompt {
    fn default() -> Self {
        DefaultPrompt::new("> ", "")
    }
}

impl Prompt for DefaultPrompt {
    fn render_prompt_left(&self) -> Vec<Styled> {
        vec![Styled::plain(self.left.clone())]
    }

    fn render_prompt_right(&self) -> Vec<Styled> {
        if self.right.is_empty() {
            Vec::new()
        } else {
            vec![Styled::plain(self.right.clone())]
        }
    }
}
