//! # OperandInput Component
//!
//! Single-line text field for a binary operand on the ripple-carry page.
//!
//! ## Responsibilities
//!
//! - Capture typed and pasted characters (newlines in a paste are dropped)
//! - Handle editing (backspace, delete, cursor movement, Home/End)
//! - Cap the number of binary digits at `max_digits`
//! - Scroll horizontally so the cursor stays visible
//!
//! Non-binary characters are still accepted into the buffer: whether they
//! are stripped or rejected is the input policy's call, made by the core.
//!
//! `OperandForm` pairs two inputs (A and B) and routes events to whichever
//! is active. Both live in `TuiState` and persist across frames.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Border width on each side of the field.
const BORDER: u16 = 1;

/// High-level events emitted by the operand fields.
#[derive(Debug, Clone, PartialEq)]
pub enum OperandEvent {
    /// Buffer text changed; the sum should be recomputed.
    Changed,
    /// Cursor moved or focus switched; nothing to recompute.
    Moved,
    /// Enter pressed.
    Submit,
}

pub struct OperandInput {
    pub label: String,
    pub buffer: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    pub max_digits: usize,
    /// Prop: whether this field receives keys
    pub active: bool,
    /// First visible display column
    scroll: u16,
}

impl OperandInput {
    pub fn new(label: &str, initial: &str, max_digits: usize) -> Self {
        Self {
            label: label.to_string(),
            buffer: initial.to_string(),
            pos: initial.len(),
            max_digits,
            active: false,
            scroll: 0,
        }
    }

    /// Replace the whole buffer and park the cursor at the end.
    pub fn set(&mut self, value: &str) {
        self.buffer = value.to_string();
        self.pos = self.buffer.len();
        self.scroll = 0;
    }

    fn digit_count(&self) -> usize {
        self.buffer.chars().filter(|c| matches!(c, '0' | '1')).count()
    }

    /// Insert `text` at the cursor, dropping newlines and any binary digit
    /// past the limit. Returns whether anything was inserted.
    fn insert(&mut self, text: &str) -> bool {
        let mut digits = self.digit_count();
        let mut inserted = false;
        for c in text.chars() {
            if c == '\n' || c == '\r' {
                continue;
            }
            if matches!(c, '0' | '1') {
                if digits >= self.max_digits {
                    continue;
                }
                digits += 1;
            }
            self.buffer.insert(self.pos, c);
            self.pos += c.len_utf8();
            inserted = true;
        }
        inserted
    }

    /// Display column of the cursor.
    fn cursor_column(&self) -> u16 {
        self.buffer[..self.pos].width() as u16
    }

    /// Keep the cursor inside a field `inner` columns wide.
    fn update_scroll(&mut self, inner: u16) {
        if inner == 0 {
            self.scroll = 0;
            return;
        }
        let col = self.cursor_column();
        if col < self.scroll {
            self.scroll = col;
        } else if col >= self.scroll + inner {
            self.scroll = col + 1 - inner;
        }
    }

    /// The slice of the buffer that starts at the scroll column.
    fn visible_text(&self) -> &str {
        let mut col = 0u16;
        for (i, c) in self.buffer.char_indices() {
            if col >= self.scroll {
                return &self.buffer[i..];
            }
            col += c.width().unwrap_or(0) as u16;
        }
        ""
    }

    pub fn screen_pos(&self, area: Rect) -> (u16, u16) {
        let col = self.cursor_column().saturating_sub(self.scroll);
        (area.x + BORDER + col, area.y + BORDER)
    }
}

impl Component for OperandInput {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.update_scroll(area.width.saturating_sub(2 * BORDER));

        let border_style = if self.active {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let title = format!(
            " Binary {} ({}/{}) ",
            self.label,
            self.digit_count(),
            self.max_digits
        );
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title);
        let field = Paragraph::new(self.visible_text())
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .block(block);
        frame.render_widget(field, area);

        if self.active {
            frame.set_cursor_position(self.screen_pos(area));
        }
    }
}

impl EventHandler for OperandInput {
    type Event = OperandEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => self
                .insert(c.encode_utf8(&mut [0; 4]))
                .then_some(OperandEvent::Changed),
            TuiEvent::Paste(text) => self.insert(text).then_some(OperandEvent::Changed),
            TuiEvent::Backspace => {
                let prev = self.buffer[..self.pos].char_indices().next_back()?.0;
                self.buffer.drain(prev..self.pos);
                self.pos = prev;
                Some(OperandEvent::Changed)
            }
            TuiEvent::Delete => {
                let c = self.buffer[self.pos..].chars().next()?;
                self.buffer.drain(self.pos..self.pos + c.len_utf8());
                Some(OperandEvent::Changed)
            }
            TuiEvent::CursorLeft => {
                let prev = self.buffer[..self.pos].char_indices().next_back()?.0;
                self.pos = prev;
                Some(OperandEvent::Moved)
            }
            TuiEvent::CursorRight => {
                let c = self.buffer[self.pos..].chars().next()?;
                self.pos += c.len_utf8();
                Some(OperandEvent::Moved)
            }
            TuiEvent::CursorHome => (self.pos != 0).then(|| {
                self.pos = 0;
                OperandEvent::Moved
            }),
            TuiEvent::CursorEnd => (self.pos != self.buffer.len()).then(|| {
                self.pos = self.buffer.len();
                OperandEvent::Moved
            }),
            TuiEvent::Submit => Some(OperandEvent::Submit),
            _ => None,
        }
    }
}

/// The A/B operand pair. Up/Down switches the active field.
pub struct OperandForm {
    pub a: OperandInput,
    pub b: OperandInput,
    /// false = A active, true = B active
    pub b_active: bool,
}

impl OperandForm {
    pub fn new(a: &str, b: &str, max_digits: usize) -> Self {
        let mut form = Self {
            a: OperandInput::new("A", a, max_digits),
            b: OperandInput::new("B", b, max_digits),
            b_active: false,
        };
        form.sync_active();
        form
    }

    pub const HEIGHT: u16 = 3;

    fn sync_active(&mut self) {
        self.a.active = !self.b_active;
        self.b.active = self.b_active;
    }

    fn active_mut(&mut self) -> &mut OperandInput {
        if self.b_active { &mut self.b } else { &mut self.a }
    }

    pub fn values(&self) -> (String, String) {
        (self.a.buffer.clone(), self.b.buffer.clone())
    }
}

impl Component for OperandForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [a_area, b_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(area);
        self.a.render(frame, a_area);
        self.b.render(frame, b_area);
    }
}

impl EventHandler for OperandForm {
    type Event = OperandEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp | TuiEvent::CursorDown => {
                self.b_active = !self.b_active;
                self.sync_active();
                Some(OperandEvent::Moved)
            }
            _ => self.active_mut().handle_event(event),
        }
    }
}
