//! Line-based text buffer behind the editor pane
//!
//! The cursor is a `(row, column)` pair counted in chars, 0-based.

/// Editable text held as one `String` per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    row: usize,
    column: usize,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            column: 0,
        }
    }
}

impl TextBuffer {
    /// Load `text`, with the cursor at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
            row: 0,
            column: 0,
        }
    }

    /// The whole buffer, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    pub fn insert_char(&mut self, ch: char) {
        let index = self.byte_index();
        self.lines[self.row].insert(index, ch);
        self.column += 1;
    }

    /// Split the current line at the cursor.
    pub fn insert_newline(&mut self) {
        let index = self.byte_index();
        let tail = self.lines[self.row].split_off(index);
        self.lines.insert(self.row + 1, tail);
        self.row += 1;
        self.column = 0;
    }

    /// Delete the char before the cursor, joining lines at column 0.
    /// Returns whether anything changed.
    pub fn backspace(&mut self) -> bool {
        if self.column > 0 {
            self.column -= 1;
            let index = self.byte_index();
            self.lines[self.row].remove(index);
            true
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.column = self.line_len(self.row);
            self.lines[self.row].push_str(&line);
            true
        } else {
            false
        }
    }

    /// Delete the char under the cursor, joining lines at line end.
    /// Returns whether anything changed.
    pub fn delete(&mut self) -> bool {
        if self.column < self.line_len(self.row) {
            let index = self.byte_index();
            self.lines[self.row].remove(index);
            true
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) {
        if self.column > 0 {
            self.column -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.column = self.line_len(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.column < self.line_len(self.row) {
            self.column += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.column = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.column = self.column.min(self.line_len(self.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.column = self.column.min(self.line_len(self.row));
        }
    }

    pub fn move_home(&mut self) {
        self.column = 0;
    }

    pub fn move_end(&mut self) {
        self.column = self.line_len(self.row);
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    /// Byte offset of the cursor within the current line.
    fn byte_index(&self) -> usize {
        let line = &self.lines[self.row];
        line.char_indices()
            .nth(self.column)
            .map_or(line.len(), |(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_text() {
        let source = "int main() {\n  return 0;\n}\n";
        let buffer = TextBuffer::from_text(source);
        assert_eq!(buffer.text(), source);
        assert_eq!(buffer.line_count(), 4);
    }

    #[test]
    fn test_insert_and_newline() {
        let mut buffer = TextBuffer::default();
        for ch in "x = 1".chars() {
            buffer.insert_char(ch);
        }
        buffer.move_left();
        buffer.insert_newline();
        assert_eq!(buffer.text(), "x = \n1");
        assert_eq!(buffer.cursor(), (1, 0));
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut buffer = TextBuffer::from_text("ab\ncd");
        buffer.move_down();
        assert!(buffer.backspace());
        assert_eq!(buffer.text(), "abcd");
        assert_eq!(buffer.cursor(), (0, 2));

        buffer.move_home();
        assert!(!buffer.backspace());
    }

    #[test]
    fn test_delete_joins_lines() {
        let mut buffer = TextBuffer::from_text("ab\ncd");
        buffer.move_end();
        assert!(buffer.delete());
        assert_eq!(buffer.text(), "abcd");

        buffer.move_end();
        assert!(!buffer.delete());
    }

    #[test]
    fn test_multibyte_chars() {
        let mut buffer = TextBuffer::from_text("é = 1");
        buffer.move_right();
        buffer.insert_char('x');
        assert_eq!(buffer.text(), "éx = 1");
        assert!(buffer.backspace());
        assert!(buffer.backspace());
        assert_eq!(buffer.text(), " = 1");
    }

    #[test]
    fn test_vertical_moves_clamp_column() {
        let mut buffer = TextBuffer::from_text("long line\nab");
        buffer.move_end();
        buffer.move_down();
        assert_eq!(buffer.cursor(), (1, 2));
        buffer.move_up();
        assert_eq!(buffer.cursor(), (0, 2));
    }

    #[test]
    fn test_horizontal_moves_wrap_lines() {
        let mut buffer = TextBuffer::from_text("a\nb");
        buffer.move_right();
        buffer.move_right();
        assert_eq!(buffer.cursor(), (1, 0));
        buffer.move_left();
        assert_eq!(buffer.cursor(), (0, 1));
    }
}
