#![forbid(unsafe_code)]

//! Inline edit session shared by the path label and property name rows.
//!
//! A session swaps a read-only label for a [`TextField`] and swaps it back on
//! blur, reporting what the user did. It never sanitizes or mutates anything
//! outside itself: the owner decides what a committed text means.
//!
//! # State Machine
//!
//! ```text
//!          start(initial)
//!   Idle ─────────────────► Editing ──── Escape ────► (cancelled, blur requested)
//!    ▲                        │  │
//!    │                        │  └────── Enter ─────► (blur requested)
//!    │        blur()          │
//!    └────────────────────────┘   outcome: Cancelled | Unchanged | Committed
//! ```
//!
//! # Invariants
//!
//! 1. The field is visible if and only if the session is editing; the label
//!    is visible otherwise.
//! 2. `blur` always returns the session to idle with `cancelled` cleared.
//! 3. A cancelled session never reports `Committed`, whatever was typed.

use bboard_core::event::{Event, KeyCode};

use crate::text_field::TextField;

/// What a blur resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// No session was open.
    Idle,
    /// The user pressed Escape.
    Cancelled,
    /// The text equals the text the session started with.
    Unchanged,
    /// The text differs from the initial text. Not yet sanitized.
    Committed(String),
}

/// How a session reacted to an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditResponse {
    /// The event was not for the session.
    Ignored,
    /// The event edited the field (text, cursor or selection).
    Edited,
    /// The session wants to lose focus; the owner should blur it.
    BlurRequested,
}

/// One inline editing surface.
#[derive(Debug, Clone, Default)]
pub struct InlineEditSession {
    field: TextField,
    /// Text captured at start; `Some` while editing.
    original: Option<String>,
    cancelled: bool,
    blur_requested: bool,
}

impl InlineEditSession {
    /// Create an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the field to `max` graphemes (builder).
    #[must_use]
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.field = self.field.with_max_length(max);
        self
    }

    #[inline]
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.original.is_some()
    }

    /// Whether the editable field is shown.
    #[inline]
    #[must_use]
    pub fn field_visible(&self) -> bool {
        self.is_editing()
    }

    /// Whether the read-only label is shown.
    #[inline]
    #[must_use]
    pub fn label_visible(&self) -> bool {
        !self.is_editing()
    }

    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Whether Escape or Enter asked for the session to end.
    #[inline]
    #[must_use]
    pub fn blur_requested(&self) -> bool {
        self.blur_requested
    }

    /// Text captured when the session started.
    #[must_use]
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    #[must_use]
    pub fn field(&self) -> &TextField {
        &self.field
    }

    /// Current text of the field.
    #[must_use]
    pub fn text(&self) -> &str {
        self.field.value()
    }

    /// Open the session on `initial`: show and focus the field, select all.
    ///
    /// Starting an open session discards its edits and starts over.
    pub fn start(&mut self, initial: &str) {
        self.field.set_value(initial);
        self.field.set_focused(true);
        self.field.select_all();
        self.original = Some(initial.to_owned());
        self.cancelled = false;
        self.blur_requested = false;

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "edit_session.start", initial_len = initial.len());
    }

    /// Feed an input event to the session.
    pub fn handle_event(&mut self, event: &Event) -> EditResponse {
        if !self.is_editing() {
            return EditResponse::Ignored;
        }

        match event {
            Event::Key(key) if key.is_press() && key.code == KeyCode::Escape => {
                self.cancelled = true;
                self.request_blur()
            }
            Event::Key(key)
                if key.is_press() && matches!(key.code, KeyCode::Enter | KeyCode::KeypadEnter) =>
            {
                self.request_blur()
            }
            Event::Focus(false) => self.request_blur(),
            _ => {
                if self.field.handle_event(event) {
                    EditResponse::Edited
                } else {
                    EditResponse::Ignored
                }
            }
        }
    }

    fn request_blur(&mut self) -> EditResponse {
        self.blur_requested = true;
        self.field.set_focused(false);
        EditResponse::BlurRequested
    }

    /// Close the session: show the label, hide the field, report the outcome.
    pub fn blur(&mut self) -> EditOutcome {
        let Some(original) = self.original.take() else {
            return EditOutcome::Idle;
        };

        let outcome = if self.cancelled {
            EditOutcome::Cancelled
        } else if self.field.value() == original {
            EditOutcome::Unchanged
        } else {
            EditOutcome::Committed(self.field.value().to_owned())
        };

        self.cancelled = false;
        self.blur_requested = false;
        self.field.set_focused(false);
        self.field.clear();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "edit_session.blur",
            outcome = match &outcome {
                EditOutcome::Idle => "idle",
                EditOutcome::Cancelled => "cancelled",
                EditOutcome::Unchanged => "unchanged",
                EditOutcome::Committed(_) => "committed",
            }
        );

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bboard_core::event::{KeyEvent, KeyEventKind};

    fn type_str(session: &mut InlineEditSession, text: &str) {
        for c in text.chars() {
            session.handle_event(&Event::key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn idle_by_default() {
        let mut session = InlineEditSession::new();
        assert!(!session.is_editing());
        assert!(session.label_visible());
        assert!(!session.field_visible());
        assert_eq!(session.blur(), EditOutcome::Idle);
    }

    #[test]
    fn start_selects_all_and_focuses() {
        let mut session = InlineEditSession::new();
        session.start("Speed");
        assert!(session.is_editing());
        assert!(session.field_visible());
        assert!(!session.label_visible());
        assert!(session.field().focused());
        assert_eq!(session.field().selected_text(), Some("Speed"));
        assert_eq!(session.original(), Some("Speed"));
    }

    #[test]
    fn typing_replaces_initial_text_and_commits() {
        let mut session = InlineEditSession::new();
        session.start("Float");
        type_str(&mut session, "Speed");
        assert_eq!(session.handle_event(&Event::key(KeyCode::Enter)), EditResponse::BlurRequested);
        assert!(session.blur_requested());
        assert_eq!(session.blur(), EditOutcome::Committed("Speed".into()));
        assert!(!session.is_editing());
        assert!(session.label_visible());
    }

    #[test]
    fn enter_does_not_commit_by_itself() {
        let mut session = InlineEditSession::new();
        session.start("a");
        type_str(&mut session, "b");
        session.handle_event(&Event::key(KeyCode::KeypadEnter));
        // Still editing until the owner blurs.
        assert!(session.is_editing());
        assert_eq!(session.text(), "b");
    }

    #[test]
    fn escape_cancels_regardless_of_edits() {
        let mut session = InlineEditSession::new();
        session.start("Color");
        type_str(&mut session, "Tint");
        assert_eq!(session.handle_event(&Event::key(KeyCode::Escape)), EditResponse::BlurRequested);
        assert!(session.is_cancelled());
        assert_eq!(session.blur(), EditOutcome::Cancelled);
        assert!(!session.is_cancelled());
    }

    #[test]
    fn unchanged_text_reports_unchanged() {
        let mut session = InlineEditSession::new();
        session.start("Speed");
        session.handle_event(&Event::key(KeyCode::End));
        type_str(&mut session, "x");
        session.handle_event(&Event::key(KeyCode::Backspace));
        assert_eq!(session.blur(), EditOutcome::Unchanged);
    }

    #[test]
    fn cancel_flag_resets_for_next_session() {
        let mut session = InlineEditSession::new();
        session.start("a");
        session.handle_event(&Event::key(KeyCode::Escape));
        session.blur();
        session.start("a");
        type_str(&mut session, "b");
        assert_eq!(session.blur(), EditOutcome::Committed("b".into()));
    }

    #[test]
    fn focus_loss_requests_blur() {
        let mut session = InlineEditSession::new();
        session.start("a");
        assert_eq!(session.handle_event(&Event::blur()), EditResponse::BlurRequested);
        assert!(!session.field().focused());
    }

    #[test]
    fn events_ignored_while_idle() {
        let mut session = InlineEditSession::new();
        assert_eq!(session.handle_event(&Event::key(KeyCode::Char('x'))), EditResponse::Ignored);
        assert_eq!(session.handle_event(&Event::key(KeyCode::Escape)), EditResponse::Ignored);
        assert!(!session.is_cancelled());
    }

    #[test]
    fn released_escape_is_not_a_cancel() {
        let mut session = InlineEditSession::new();
        session.start("a");
        let release = KeyEvent::new(KeyCode::Escape).with_kind(KeyEventKind::Release);
        assert_eq!(session.handle_event(&Event::Key(release)), EditResponse::Ignored);
        assert!(!session.is_cancelled());
    }

    #[test]
    fn restart_discards_previous_edits() {
        let mut session = InlineEditSession::new();
        session.start("one");
        type_str(&mut session, "zzz");
        session.handle_event(&Event::key(KeyCode::Escape));
        session.start("two");
        assert!(!session.is_cancelled());
        assert_eq!(session.text(), "two");
        assert_eq!(session.blur(), EditOutcome::Unchanged);
    }

    #[test]
    fn max_length_applies_to_typing() {
        let mut session = InlineEditSession::new().with_max_length(3);
        session.start("");
        type_str(&mut session, "abcdef");
        assert_eq!(session.blur(), EditOutcome::Committed("abc".into()));
    }
}
