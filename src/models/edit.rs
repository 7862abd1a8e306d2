use ropey::Rope;

/// One logical edit batch delivered by the host. Offsets are char indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextEdit {
    Insert { char_offset: usize, text: String },
    Delete { start: usize, end: usize },
    Append(String),
    Replace(String),
}

impl TextEdit {
    /// Applies the edit, clamping offsets to the rope. Returns `false` when the
    /// rope is left unchanged.
    pub fn apply(self, rope: &mut Rope) -> bool {
        let len = rope.len_chars();
        match self {
            TextEdit::Insert { char_offset, text } => {
                if text.is_empty() {
                    return false;
                }
                rope.insert(char_offset.min(len), &text);
                true
            }
            TextEdit::Delete { start, end } => {
                let (start, end) = if start <= end { (start, end) } else { (end, start) };
                let (start, end) = (start.min(len), end.min(len));
                if start == end {
                    return false;
                }
                rope.remove(start..end);
                true
            }
            TextEdit::Append(text) => {
                if text.is_empty() {
                    return false;
                }
                rope.insert(len, &text);
                true
            }
            TextEdit::Replace(text) => {
                if *rope == text.as_str() {
                    return false;
                }
                *rope = Rope::from_str(&text);
                true
            }
        }
    }
}
