/// Single-line text being composed in the creation drawer. `cursor` is a
/// byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeField {
    value: String,
    cursor: usize,
}

impl ComposeField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.len();
    }

    pub fn insert_char(&mut self, ch: char) {
        // newlines would break the single-line row layout
        let ch = if ch == '\n' || ch == '\r' { ' ' } else { ch };
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.insert_char(ch);
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_char(self.cursor, &self.value);
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        let next = next_char(self.cursor, &self.value);
        self.value.drain(self.cursor..next);
    }

    pub fn move_left(&mut self) {
        self.cursor = prev_char(self.cursor, &self.value);
    }

    pub fn move_right(&mut self) {
        self.cursor = next_char(self.cursor, &self.value);
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn with_caret(&self) -> String {
        let mut text = self.value.clone();
        text.insert_str(self.cursor, "▌");
        text
    }
}

fn prev_char(cursor: usize, text: &str) -> usize {
    text[..cursor]
        .char_indices()
        .next_back()
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

fn next_char(cursor: usize, text: &str) -> usize {
    text[cursor..]
        .chars()
        .next()
        .map(|ch| cursor + ch.len_utf8())
        .unwrap_or(text.len())
}
