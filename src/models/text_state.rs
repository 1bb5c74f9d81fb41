// src/models/text_state.rs
//
// The text being displayed and edited

#[derive(Debug, Clone)]
pub struct TextState {
    main_text: String,
    caption_text: String,
    first_edit_done: bool, // flips once, on the first typed character
}

impl TextState {
    pub fn new(main_text: &str, caption_text: &str) -> Self {
        Self {
            main_text: main_text.to_string(),
            caption_text: caption_text.to_string(),
            first_edit_done: false,
        }
    }

    pub fn main_text(&self) -> &str {
        &self.main_text
    }

    pub fn caption_text(&self) -> &str {
        &self.caption_text
    }

    pub fn first_edit_done(&self) -> bool {
        self.first_edit_done
    }

    /// Appends a printable character. The first one also wipes both placeholder
    /// strings. Control characters are rejected and leave the state untouched.
    pub fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }

        if !self.first_edit_done {
            self.first_edit_done = true;
            self.main_text.clear();
            self.caption_text.clear();
        }

        self.main_text.push(ch);
        true
    }

    /// Removes the last character of the main text; returns false when it was already empty.
    pub fn backspace(&mut self) -> bool {
        self.main_text.pop().is_some()
    }
}
