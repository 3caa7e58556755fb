//! # Documentation Page
//!
//! A scrollable reference for every circuit. The prose is static markdown;
//! the truth tables are generated from the logic core at render time and
//! spliced in as ` ```bits ` blocks, so the markdown renderer colours their
//! digits like the live pages do.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::Color;
use ratatui::widgets::{Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::logic::TruthTable;
use crate::core::logic::truth_table::{
    decoder_table, demux_table, encoder_table, full_adder_table, half_adder_table, mux_table,
};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

/// Width reserved for the vertical scrollbar.
const SCROLLBAR_WIDTH: u16 = 1;

const INTRO: &str = "\
# BinSim

Every page models a combinational circuit: outputs depend only on the \
current inputs. Flip an input with **Space** and the outputs, schematic and \
truth table update immediately. Bit vectors are numbered from 0, the least \
significant bit.";

const HALF_ADDER: &str = "\
## Half Adder

Adds two bits. `Sum = A XOR B`, `Carry = A AND B`. It has no carry input, \
so on its own it can only add the lowest column of a number.";

const FULL_ADDER: &str = "\
## Full Adder

Adds two bits plus an incoming carry. Built from two half adders: the first \
adds *A* and *B*, the second adds that partial sum to *Cin*, and the two \
carries are OR-ed into *Cout*.";

const RIPPLE: &str = "\
## Ripple-Carry Adder

A chain of full adders, one per bit. Stage 0 starts with a carry of 0 and \
every stage hands its *Cout* to the next one, which is why the carry is said \
to ripple. The shorter operand is padded with leading zeros. When the last \
stage carries out, the result is one bit wider than the operands.

- `1011 + 0110 = 10001` (11 + 6 = 17, carry out)
- `0011 + 0001 = 0100` (3 + 1 = 4)

With the *strict* input policy any character other than 0 or 1 is \
rejected; the default *permissive* policy ignores it.";

const MUX: &str = "\
## Multiplexer

Routes one of 2^n data inputs to the single output *Y*. The select lines, \
read as a binary number, pick which input goes through.";

const DEMUX: &str = "\
## Demultiplexer

The inverse of the multiplexer: the single input *D* is sent to the output \
chosen by the select lines. Every other output stays 0.";

const DECODER: &str = "\
## Decoder

Turns an n-bit address into 2^n one-hot outputs: exactly one output is 1 \
while *E* (enable) is high, and all outputs are 0 when it is low.";

const ENCODER: &str = "\
## Encoder

The inverse of the decoder. Exactly one of the 2^n inputs should be high; \
the outputs give its index in binary. *V* (valid) shows whether any input \
is asserted at all.";

const KEYS: &str = "\
## Keys

- **Tab** / **Shift+Tab**: next / previous page
- **1**-**8**: jump to a page
- **Arrows**: move between inputs
- **Space** / **Enter**: toggle the focused input
- **[** / **]**: shrink / grow the circuit
- **Ctrl+R**: random operands on the ripple-carry page
- **Esc** / **Ctrl+C**: quit";

fn table_block(caption: &str, table: &TruthTable) -> String {
    format!("```{} {}\n{}```", markdown::BITS_LANG, caption, table.render_plain())
}

/// The full page as markdown.
pub fn docs_markdown() -> String {
    [
        INTRO.to_string(),
        HALF_ADDER.to_string(),
        table_block("Half Adder", &half_adder_table()),
        FULL_ADDER.to_string(),
        table_block("Full Adder", &full_adder_table()),
        RIPPLE.to_string(),
        MUX.to_string(),
        table_block("4x1 MUX", &mux_table(2)),
        DEMUX.to_string(),
        table_block("1x4 DEMUX, D = 1", &demux_table(2)),
        DECODER.to_string(),
        table_block("2-to-4 DECODER", &decoder_table(2)),
        ENCODER.to_string(),
        table_block("4-to-2 ENCODER", &encoder_table(2)),
        KEYS.to_string(),
    ]
    .join("\n\n")
}

/// Scroll position of the docs page. Persists across frames.
pub struct DocsState {
    pub scroll: ScrollViewState,
    /// Content rows at the last render, for clamping.
    content_height: u16,
    viewport_height: u16,
}

impl Default for DocsState {
    fn default() -> Self {
        Self::new()
    }
}

impl DocsState {
    pub fn new() -> Self {
        Self {
            scroll: ScrollViewState::default(),
            content_height: 0,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    fn clamp(&mut self) {
        let max = self.max_offset();
        if self.scroll.offset().y > max {
            self.scroll.set_offset(Position::new(0, max));
        }
    }
}

impl EventHandler for DocsState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => self.scroll.scroll_up(),
            TuiEvent::ScrollDown | TuiEvent::CursorDown => self.scroll.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll.scroll_page_down(),
            TuiEvent::CursorHome => self.scroll.scroll_to_top(),
            TuiEvent::CursorEnd => self.scroll.set_offset(Position::new(0, self.max_offset())),
            _ => return None,
        }
        self.clamp();
        Some(())
    }
}

pub struct DocsView<'a> {
    state: &'a mut DocsState,
}

impl<'a> DocsView<'a> {
    pub fn new(state: &'a mut DocsState) -> Self {
        Self { state }
    }
}

impl Component for DocsView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(SCROLLBAR_WIDTH);
        let text = markdown::render(&docs_markdown(), Color::Gray);
        let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
        let height = paragraph.line_count(content_width) as u16;

        self.state.content_height = height;
        self.state.viewport_height = area.height;
        self.state.clamp();

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height));
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::render_view;
    use super::*;
    use crate::core::state::View;
    use crate::test_support::test_app;

    #[test]
    fn test_docs_markdown_embeds_generated_tables() {
        let docs = docs_markdown();
        assert!(docs.contains("```bits Half Adder\n"));
        assert!(docs.contains(&half_adder_table().render_plain()));
        assert!(docs.contains("## Encoder"));
    }

    #[test]
    fn test_docs_page_renders_top() {
        let mut app = test_app();
        app.view = View::Docs;
        let text = render_view(&app, 80, 20);
        assert!(text.contains("BinSim"));
        assert!(text.contains("Half Adder"));
    }

    #[test]
    fn test_scroll_clamped_to_content() {
        let mut state = DocsState::new();
        state.content_height = 30;
        state.viewport_height = 20;
        for _ in 0..50 {
            state.handle_event(&TuiEvent::ScrollDown);
        }
        assert_eq!(state.scroll.offset().y, 10);
        state.handle_event(&TuiEvent::CursorHome);
        assert_eq!(state.scroll.offset().y, 0);
        state.handle_event(&TuiEvent::CursorEnd);
        assert_eq!(state.scroll.offset().y, 10);
    }

    #[test]
    fn test_unrelated_events_ignored() {
        let mut state = DocsState::new();
        assert_eq!(state.handle_event(&TuiEvent::InputChar('x')), None);
    }
}
