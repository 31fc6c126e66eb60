//! Typed path entry.

/// Line editor for the "go to path" prompt.
#[derive(Debug, Default)]
pub struct PathInput {
    is_active: bool,
    buffer: String,
}

impl PathInput {
    /// Create an inactive prompt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the prompt is open.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Open the prompt, pre-filled with `initial`.
    pub fn start(&mut self, initial: &str) {
        self.is_active = true;
        self.buffer = initial.to_string();
    }

    /// Text typed so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Append a character.
    pub fn input(&mut self, c: char) {
        self.buffer.push(c);
    }

    /// Remove the last character.
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Close the prompt and return the typed path.
    pub fn submit(&mut self) -> String {
        self.is_active = false;
        std::mem::take(&mut self.buffer)
    }

    /// Close the prompt without a result.
    pub fn cancel(&mut self) {
        self.is_active = false;
        self.buffer.clear();
    }
}
