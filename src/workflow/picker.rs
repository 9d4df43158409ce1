/// Glyphs cycled by the progress indicator
pub const SPINNER_FRAMES: [char; 4] = ['█', '▓', '▒', '░'];

/// Key input understood by a list picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListInput {
    Up,
    Down,
    Confirm,
    Abort,
}

/// Single-choice list with a clamped cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picker {
    title: String,
    items: Vec<String>,
    cursor: usize,
}

impl Picker {
    pub fn new(title: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            title: title.into(),
            items,
            cursor: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
        }
    }

    /// Index under the cursor, `None` for an empty list
    pub fn selected(&self) -> Option<usize> {
        (self.cursor < self.items.len()).then_some(self.cursor)
    }
}

/// Progress indicator shown while background work runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spinner {
    label: String,
    frame: usize,
}

impl Spinner {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            frame: 0,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn advance(&mut self) {
        self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn glyph(&self) -> char {
        SPINNER_FRAMES[self.frame]
    }
}
