#![forbid(unsafe_code)]

//! Click-count detection for label activation.
//!
//! [`ClickDetector`] turns raw mouse-down events into counted clicks so the
//! panel can react to a *double activation* on an editable label. Counting
//! happens on button press, matching hosts that report a click count with
//! the mouse-down event.
//!
//! # Invariants
//!
//! 1. Click count is monotonically increasing within a multi-click window
//!    and wraps back to 1 after a triple click.
//! 2. A press with a different button, outside the position tolerance, or
//!    after the timeout starts a new sequence at 1.
//! 3. Focus loss resets the sequence.

use std::time::Duration;

use web_time::Instant;

use crate::event::{Event, MouseButton, MouseEventKind};

/// Thresholds for multi-click detection.
#[derive(Debug, Clone)]
pub struct ClickConfig {
    /// Time window for double/triple click detection (default: 300ms).
    pub multi_click_timeout: Duration,
    /// Position tolerance for multi-click detection (manhattan distance, default: 1).
    pub click_tolerance: u16,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            multi_click_timeout: Duration::from_millis(300),
            click_tolerance: 1,
        }
    }
}

/// A counted button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Click {
    /// Button that was pressed.
    pub button: MouseButton,
    /// Position of the press.
    pub pos: (u16, u16),
    /// 1 for a single click, 2 for a double click, 3 for a triple click.
    pub count: u8,
}

impl Click {
    /// Whether this press completes a double left-click.
    #[must_use]
    pub fn is_double_left(&self) -> bool {
        self.button == MouseButton::Left && self.count == 2
    }
}

#[derive(Debug, Clone)]
struct ClickState {
    pos: (u16, u16),
    button: MouseButton,
    time: Instant,
    count: u8,
}

/// Stateful multi-click counter.
#[derive(Debug, Clone, Default)]
pub struct ClickDetector {
    config: ClickConfig,
    last_click: Option<ClickState>,
}

impl ClickDetector {
    /// Create a detector with the given configuration.
    #[must_use]
    pub fn new(config: ClickConfig) -> Self {
        Self {
            config,
            last_click: None,
        }
    }

    /// Process a raw event, returning the counted click for a button press.
    pub fn process(&mut self, event: &Event, now: Instant) -> Option<Click> {
        match event {
            Event::Mouse(mouse) => {
                let MouseEventKind::Down(button) = mouse.kind else {
                    return None;
                };
                let pos = mouse.position();
                let count = match &self.last_click {
                    Some(last)
                        if last.button == button
                            && manhattan_distance(last.pos, pos)
                                <= u32::from(self.config.click_tolerance)
                            && now.duration_since(last.time) <= self.config.multi_click_timeout
                            && last.count < 3 =>
                    {
                        last.count + 1
                    }
                    _ => 1,
                };
                self.last_click = Some(ClickState {
                    pos,
                    button,
                    time: now,
                    count,
                });
                Some(Click { button, pos, count })
            }
            Event::Focus(false) => {
                self.reset();
                None
            }
            _ => None,
        }
    }

    /// Forget any in-progress click sequence.
    pub fn reset(&mut self) {
        self.last_click = None;
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ClickConfig {
        &self.config
    }
}

fn manhattan_distance(a: (u16, u16), b: (u16, u16)) -> u32 {
    (i32::from(a.0) - i32::from(b.0)).unsigned_abs() + (i32::from(a.1) - i32::from(b.1)).unsigned_abs()
}
