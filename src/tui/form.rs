use crate::core::{AspectRatio, GenerationRequest, ImageStyle};

/// Longest prompt the form accepts
pub const MAX_PROMPT_CHARS: usize = 1000;

/// Field of the form that has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Prompt,
    Style,
    AspectRatio,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Prompt => FormField::Style,
            FormField::Style => FormField::AspectRatio,
            FormField::AspectRatio => FormField::Prompt,
        }
    }

    fn previous(self) -> Self {
        match self {
            FormField::Prompt => FormField::AspectRatio,
            FormField::Style => FormField::Prompt,
            FormField::AspectRatio => FormField::Style,
        }
    }
}

/// Prompt text plus single-select style and ratio.
///
/// The form never talks to the network: `submit` hands back a request and
/// the caller owns the generating/error flags.
#[derive(Debug, Clone)]
pub struct GeneratorForm {
    prompt: String,
    /// Cursor position, in chars
    cursor: usize,
    pub style: ImageStyle,
    pub aspect_ratio: AspectRatio,
    pub focus: FormField,
}

impl Default for GeneratorForm {
    fn default() -> Self {
        Self::new(ImageStyle::default(), AspectRatio::default())
    }
}

impl GeneratorForm {
    pub fn new(style: ImageStyle, aspect_ratio: AspectRatio) -> Self {
        Self {
            prompt: String::new(),
            cursor: 0,
            style,
            aspect_ratio,
            focus: FormField::Prompt,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn char_count(&self) -> usize {
        self.prompt.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.prompt
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.prompt.len())
    }

    pub fn insert_char(&mut self, c: char) {
        if self.char_count() >= MAX_PROMPT_CHARS {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.prompt.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.prompt.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.prompt.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Left/Right: move the cursor, or cycle the focused selector
    pub fn left(&mut self) {
        match self.focus {
            FormField::Prompt => self.move_left(),
            FormField::Style => self.style = self.style.previous(),
            FormField::AspectRatio => self.aspect_ratio = self.aspect_ratio.previous(),
        }
    }

    pub fn right(&mut self) {
        match self.focus {
            FormField::Prompt => self.move_right(),
            FormField::Style => self.style = self.style.next(),
            FormField::AspectRatio => self.aspect_ratio = self.aspect_ratio.next(),
        }
    }

    /// Whether the generate button is enabled
    pub fn can_submit(&self, is_generating: bool) -> bool {
        !is_generating && !self.prompt.trim().is_empty()
    }

    /// Build a request, or `None` when submission is not allowed
    pub fn submit(&self, is_generating: bool) -> Option<GenerationRequest> {
        if !self.can_submit(is_generating) {
            return None;
        }
        Some(
            GenerationRequest::new(self.prompt.clone())
                .with_style(self.style)
                .with_aspect_ratio(self.aspect_ratio),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> GeneratorForm {
        let mut form = GeneratorForm::default();
        text.chars().for_each(|c| form.insert_char(c));
        form
    }

    #[test]
    fn defaults_to_realistic_square() {
        let form = GeneratorForm::default();
        assert_eq!(form.prompt(), "");
        assert_eq!(form.style, ImageStyle::UltraRealistic);
        assert_eq!(form.aspect_ratio, AspectRatio::Square);
        assert_eq!(form.focus, FormField::Prompt);
    }

    #[test]
    fn blank_prompt_is_not_submitted() {
        assert!(GeneratorForm::default().submit(false).is_none());
        assert!(typed("   ").submit(false).is_none());
    }

    #[test]
    fn nothing_is_submitted_while_generating() {
        let form = typed("a red fox");
        assert!(!form.can_submit(true));
        assert!(form.submit(true).is_none());
    }

    #[test]
    fn submission_carries_selections_and_raw_prompt() {
        let mut form = typed(" a red fox ");
        form.focus = FormField::Style;
        while form.style != ImageStyle::Anime {
            form.right();
        }
        form.focus_next();
        form.right();

        let request = form.submit(false).unwrap();
        assert_eq!(request.prompt, " a red fox ");
        assert_eq!(request.style, ImageStyle::Anime);
        assert_eq!(request.aspect_ratio, AspectRatio::Wide);
    }

    #[test]
    fn editing_handles_multibyte_chars() {
        let mut form = typed("café");
        form.move_left();
        form.backspace();
        assert_eq!(form.prompt(), "caé");
        form.move_home();
        form.delete();
        assert_eq!(form.prompt(), "aé");
        form.move_end();
        form.insert_char('!');
        assert_eq!(form.prompt(), "aé!");
        assert_eq!(form.cursor(), 3);
    }

    #[test]
    fn prompt_is_capped() {
        let form = typed(&"x".repeat(MAX_PROMPT_CHARS + 10));
        assert_eq!(form.char_count(), MAX_PROMPT_CHARS);
    }

    #[test]
    fn focus_cycles_through_fields() {
        let mut form = GeneratorForm::default();
        form.focus_next();
        assert_eq!(form.focus, FormField::Style);
        form.focus_next();
        assert_eq!(form.focus, FormField::AspectRatio);
        form.focus_next();
        assert_eq!(form.focus, FormField::Prompt);
        form.focus_previous();
        assert_eq!(form.focus, FormField::AspectRatio);
    }
}
