#![forbid(unsafe_code)]

//! Headless single-line text field.
//!
//! Holds the text, cursor and selection of an editable label. Grapheme-cluster
//! aware: the cursor and selection anchor are grapheme indices, never byte
//! offsets. Rendering belongs to the host.

use bboard_core::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use unicode_segmentation::UnicodeSegmentation;

/// A single-line editable text buffer.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    /// Text value.
    value: String,
    /// Cursor position (grapheme index).
    cursor: usize,
    /// Selection anchor (grapheme index). When set, selection spans from anchor to cursor.
    selection_anchor: Option<usize>,
    /// Maximum length in graphemes (None = unlimited).
    max_length: Option<usize>,
    /// Whether the field holds keyboard focus.
    focused: bool,
}

impl TextField {
    /// Create a new empty text field.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Builder methods ---

    /// Set the text value (builder). The cursor moves to the end.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self.cursor = self.grapheme_count();
        self
    }

    /// Set maximum length in graphemes (builder).
    #[must_use]
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Set focus state (builder).
    #[must_use]
    pub fn with_focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    // --- Value access ---

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value, clamping cursor to valid range.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        let max = self.grapheme_count();
        self.cursor = self.cursor.min(max);
        self.selection_anchor = None;
    }

    /// Clear all text.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
        self.selection_anchor = None;
    }

    /// Get the cursor position (grapheme index).
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the field is focused.
    #[inline]
    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Set focus state. Losing focus drops the selection.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.selection_anchor = None;
        }
    }

    #[inline]
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Get selected text, if any.
    #[must_use]
    pub fn selected_text(&self) -> Option<&str> {
        let anchor = self.selection_anchor?;
        let (start, end) = self.selection_range(anchor);
        let byte_start = self.grapheme_byte_offset(start);
        let byte_end = self.grapheme_byte_offset(end);
        Some(&self.value[byte_start..byte_end])
    }

    /// Handle an input event.
    ///
    /// Returns `true` if the state changed. Enter and Escape are left to the
    /// owner of the field.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let changed = match event {
            Event::Key(key)
                if key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat =>
            {
                self.handle_key(key)
            }
            Event::Paste(text) => {
                let had_selection = self.selection_anchor.is_some();

                // Reject an oversized replacement before deleting the selection.
                if let (Some(anchor), Some(max)) = (self.selection_anchor, self.max_length) {
                    let clean_text = Self::sanitize_input_text(text);
                    let (start, end) = self.selection_range(anchor);
                    let available =
                        max.saturating_sub(self.grapheme_count().saturating_sub(end - start));
                    if clean_text.graphemes(true).count() > available {
                        return false;
                    }
                }

                self.delete_selection();
                self.insert_text(text);
                had_selection || !text.is_empty()
            }
            _ => false,
        };

        #[cfg(feature = "tracing")]
        if changed {
            self.trace_edit(Self::event_operation_name(event));
        }

        changed
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let ctrl = key.ctrl();
        let shift = key.shift();

        match key.code {
            KeyCode::Char(c) if !ctrl => {
                self.delete_selection();
                self.insert_char(c);
                true
            }
            // Ctrl+A: select all
            KeyCode::Char('a') if ctrl => {
                self.select_all();
                true
            }
            // Ctrl+W: delete word back
            KeyCode::Char('w') if ctrl => {
                self.delete_word_back();
                true
            }
            KeyCode::Backspace => {
                if self.selection_anchor.is_some() {
                    self.delete_selection();
                } else if ctrl {
                    self.delete_word_back();
                } else {
                    self.delete_char_back();
                }
                true
            }
            KeyCode::Delete => {
                if self.selection_anchor.is_some() {
                    self.delete_selection();
                } else if ctrl {
                    self.delete_word_forward();
                } else {
                    self.delete_char_forward();
                }
                true
            }
            KeyCode::Left => {
                if ctrl {
                    self.move_cursor_word_left(shift);
                } else if shift {
                    self.move_cursor_left_select();
                } else {
                    self.move_cursor_left();
                }
                true
            }
            KeyCode::Right => {
                if ctrl {
                    self.move_cursor_word_right(shift);
                } else if shift {
                    self.move_cursor_right_select();
                } else {
                    self.move_cursor_right();
                }
                true
            }
            KeyCode::Home => {
                if shift {
                    self.ensure_selection_anchor();
                } else {
                    self.selection_anchor = None;
                }
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                if shift {
                    self.ensure_selection_anchor();
                } else {
                    self.selection_anchor = None;
                }
                self.cursor = self.grapheme_count();
                true
            }
            _ => false,
        }
    }

    #[cfg(feature = "tracing")]
    fn trace_edit(&self, operation: &'static str) {
        let _span = tracing::debug_span!(
            "text_field.edit",
            operation,
            cursor_position = self.cursor,
            grapheme_count = self.grapheme_count(),
            has_selection = self.selection_anchor.is_some()
        )
        .entered();
    }

    #[cfg(feature = "tracing")]
    fn event_operation_name(event: &Event) -> &'static str {
        match event {
            Event::Key(key) => Self::key_operation_name(key),
            Event::Paste(_) => "paste",
            Event::Focus(_) => "focus",
            Event::Mouse(_) => "mouse",
        }
    }

    #[cfg(feature = "tracing")]
    fn key_operation_name(key: &KeyEvent) -> &'static str {
        let ctrl = key.ctrl();
        let shift = key.shift();

        match key.code {
            KeyCode::Char(_) if !ctrl => "insert_char",
            KeyCode::Char('a') if ctrl => "select_all",
            KeyCode::Char('w') if ctrl => "delete_word_back",
            KeyCode::Backspace if ctrl => "delete_word_back",
            KeyCode::Backspace => "delete_back",
            KeyCode::Delete if ctrl => "delete_word_forward",
            KeyCode::Delete => "delete_forward",
            KeyCode::Left if ctrl => "move_word_left",
            KeyCode::Left if shift => "move_left_select",
            KeyCode::Left => "move_left",
            KeyCode::Right if ctrl => "move_word_right",
            KeyCode::Right if shift => "move_right_select",
            KeyCode::Right => "move_right",
            KeyCode::Home => "move_home",
            KeyCode::End => "move_end",
            _ => "key_other",
        }
    }

    // --- Editing operations ---

    fn sanitize_input_text(text: &str) -> String {
        // Line breaks and tabs become spaces; other control chars are dropped.
        text.chars()
            .map(|c| {
                if c == '\n' || c == '\r' || c == '\t' {
                    ' '
                } else {
                    c
                }
            })
            .filter(|c| !c.is_control())
            .collect()
    }

    /// Insert text at the current cursor position.
    ///
    /// Newlines and tabs become spaces, other control characters are
    /// filtered, and the result is truncated to `max_length`.
    pub fn insert_text(&mut self, text: &str) {
        let clean_text = Self::sanitize_input_text(text);
        if clean_text.is_empty() {
            return;
        }

        let current_count = self.grapheme_count();
        let old_cursor = self.cursor;
        let avail = match self.max_length {
            // One grapheme may still merge into its neighbour (combining mark).
            Some(max) if current_count >= max => 1,
            Some(max) => max - current_count,
            None => usize::MAX,
        };

        let new_graphemes = clean_text.graphemes(true).count();
        let to_insert = if new_graphemes > avail {
            let end_byte = clean_text
                .grapheme_indices(true)
                .map(|(i, _)| i)
                .nth(avail)
                .unwrap_or(clean_text.len());
            &clean_text[..end_byte]
        } else {
            clean_text.as_str()
        };

        if to_insert.is_empty() {
            return;
        }

        let byte_offset = self.grapheme_byte_offset(self.cursor);
        self.value.insert_str(byte_offset, to_insert);

        let new_total = self.grapheme_count();
        if let Some(max) = self.max_length
            && new_total > max
        {
            self.value.drain(byte_offset..byte_offset + to_insert.len());
            return;
        }

        let delta = new_total.saturating_sub(current_count);
        self.cursor = (old_cursor + delta).min(new_total);
    }

    fn insert_char(&mut self, c: char) {
        if c.is_control() {
            return;
        }

        let old_count = self.grapheme_count();
        let byte_offset = self.grapheme_byte_offset(self.cursor);
        self.value.insert(byte_offset, c);

        let new_count = self.grapheme_count();
        if let Some(max) = self.max_length
            && new_count > max
        {
            self.value.drain(byte_offset..byte_offset + c.len_utf8());
            return;
        }

        // A combining char merges into the previous grapheme: cursor stays.
        if new_count > old_count {
            self.cursor += 1;
        }
    }

    fn delete_char_back(&mut self) {
        if self.cursor > 0 {
            let byte_start = self.grapheme_byte_offset(self.cursor - 1);
            let byte_end = self.grapheme_byte_offset(self.cursor);
            self.value.drain(byte_start..byte_end);
            self.cursor -= 1;
        }
    }

    fn delete_char_forward(&mut self) {
        if self.cursor < self.grapheme_count() {
            let byte_start = self.grapheme_byte_offset(self.cursor);
            let byte_end = self.grapheme_byte_offset(self.cursor + 1);
            self.value.drain(byte_start..byte_end);
        }
    }

    fn delete_word_back(&mut self) {
        if self.cursor == 0 {
            return;
        }

        let graphemes: Vec<&str> = self.value.graphemes(true).collect();
        let old_cursor = self.cursor;
        let mut pos = old_cursor;

        let mut skipped_whitespace = false;
        while pos > 0 && grapheme_class(graphemes[pos - 1]) == GraphemeClass::Space {
            pos -= 1;
            skipped_whitespace = true;
        }

        if !skipped_whitespace && pos > 0 {
            let target = grapheme_class(graphemes[pos - 1]);
            while pos > 0 && grapheme_class(graphemes[pos - 1]) == target {
                pos -= 1;
            }
        }

        if pos < old_cursor {
            let byte_start = self.grapheme_byte_offset(pos);
            let byte_end = self.grapheme_byte_offset(old_cursor);
            self.value.drain(byte_start..byte_end);
            self.cursor = pos;
        }
    }

    fn delete_word_forward(&mut self) {
        let old_cursor = self.cursor;
        self.move_cursor_word_right(false);
        let new_cursor = self.cursor;
        self.cursor = old_cursor;

        if new_cursor > old_cursor {
            let byte_start = self.grapheme_byte_offset(old_cursor);
            let byte_end = self.grapheme_byte_offset(new_cursor);
            self.value.drain(byte_start..byte_end);
        }
    }

    // --- Selection ---

    /// Select all text.
    pub fn select_all(&mut self) {
        self.selection_anchor = Some(0);
        self.cursor = self.grapheme_count();
    }

    /// Delete selected text. No-op if no selection.
    fn delete_selection(&mut self) {
        if let Some(anchor) = self.selection_anchor.take() {
            let (start, end) = self.selection_range(anchor);
            let byte_start = self.grapheme_byte_offset(start);
            let byte_end = self.grapheme_byte_offset(end);
            self.value.drain(byte_start..byte_end);
            self.cursor = start;
        }
    }

    fn ensure_selection_anchor(&mut self) {
        if self.selection_anchor.is_none() {
            self.selection_anchor = Some(self.cursor);
        }
    }

    fn selection_range(&self, anchor: usize) -> (usize, usize) {
        if anchor <= self.cursor {
            (anchor, self.cursor)
        } else {
            (self.cursor, anchor)
        }
    }

    // --- Cursor movement ---

    fn move_cursor_left(&mut self) {
        if let Some(anchor) = self.selection_anchor.take() {
            self.cursor = self.cursor.min(anchor);
        } else if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    fn move_cursor_right(&mut self) {
        if let Some(anchor) = self.selection_anchor.take() {
            self.cursor = self.cursor.max(anchor);
        } else if self.cursor < self.grapheme_count() {
            self.cursor += 1;
        }
    }

    fn move_cursor_left_select(&mut self) {
        self.ensure_selection_anchor();
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    fn move_cursor_right_select(&mut self) {
        self.ensure_selection_anchor();
        if self.cursor < self.grapheme_count() {
            self.cursor += 1;
        }
    }

    fn move_cursor_word_left(&mut self, select: bool) {
        if select {
            self.ensure_selection_anchor();
        } else {
            self.selection_anchor = None;
        }

        let graphemes: Vec<&str> = self.value.graphemes(true).collect();
        let mut pos = self.cursor;

        while pos > 0 && grapheme_class(graphemes[pos - 1]) != GraphemeClass::Word {
            pos -= 1;
        }
        while pos > 0 && grapheme_class(graphemes[pos - 1]) == GraphemeClass::Word {
            pos -= 1;
        }

        self.cursor = pos;
    }

    fn move_cursor_word_right(&mut self, select: bool) {
        if select {
            self.ensure_selection_anchor();
        } else {
            self.selection_anchor = None;
        }

        let graphemes: Vec<&str> = self.value.graphemes(true).collect();
        let max = graphemes.len();
        let mut pos = self.cursor;

        while pos < max && grapheme_class(graphemes[pos]) == GraphemeClass::Word {
            pos += 1;
        }
        while pos < max && grapheme_class(graphemes[pos]) != GraphemeClass::Word {
            pos += 1;
        }

        self.cursor = pos;
    }

    // --- Internal helpers ---

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn grapheme_byte_offset(&self, grapheme_idx: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GraphemeClass {
    Space,
    Word,
    Punct,
}

fn grapheme_class(g: &str) -> GraphemeClass {
    if g.chars().all(char::is_whitespace) {
        GraphemeClass::Space
    } else if g.chars().any(char::is_alphanumeric) {
        GraphemeClass::Word
    } else {
        GraphemeClass::Punct
    }
}
