//! # BitRow Component
//!
//! A titled row of labelled bit cells, e.g. `A [1]  B [0]`. Used for both
//! toggleable inputs (with a focused cell) and read-only outputs (with an
//! optional highlighted cell, such as the routed demux output).
//!
//! Stateless: everything arrives as props and the row is rebuilt each frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::logic::Bit;
use crate::tui::component::Component;

/// Colour for a bit value: lit green for 1, dim slate for 0.
pub fn bit_style(bit: Bit) -> Style {
    match bit {
        Bit::One => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Bit::Zero => Style::default().fg(Color::DarkGray),
    }
}

pub struct BitRow {
    pub title: String,
    pub cells: Vec<(String, Bit)>,
    /// Cell with keyboard focus (inputs).
    pub focus: Option<usize>,
    /// Cell drawn with an accent border (outputs).
    pub highlight: Option<usize>,
}

impl BitRow {
    pub fn new(title: impl Into<String>, cells: Vec<(String, Bit)>) -> Self {
        Self {
            title: title.into(),
            cells,
            focus: None,
            highlight: None,
        }
    }

    pub fn focus(mut self, focus: Option<usize>) -> Self {
        self.focus = focus;
        self
    }

    pub fn highlight(mut self, highlight: Option<usize>) -> Self {
        self.highlight = highlight;
        self
    }

    /// Rows needed to show every cell at `width`, borders included. Wide
    /// rows (16 demux outputs) wrap onto a second line.
    pub fn height(&self, width: u16) -> u16 {
        let inner = width.saturating_sub(2).max(1);
        let lines = Paragraph::new(self.line())
            .wrap(Wrap { trim: false })
            .line_count(inner);
        lines.max(1) as u16 + 2
    }

    fn line(&self) -> Line<'static> {
        let mut spans = Vec::with_capacity(self.cells.len() * 3);
        for (i, (label, bit)) in self.cells.iter().enumerate() {
            let focused = self.focus == Some(i);
            let highlighted = self.highlight == Some(i);

            let label_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let mut value_style = bit_style(*bit);
            if focused {
                value_style = value_style.add_modifier(Modifier::REVERSED);
            }
            let bracket_style = if highlighted {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(format!("{label} "), label_style));
            spans.push(Span::styled("[", bracket_style));
            spans.push(Span::styled(bit.to_string(), value_style));
            spans.push(Span::styled("]", bracket_style));
        }
        Line::from(spans)
    }
}

impl Component for BitRow {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.title));
        let paragraph = Paragraph::new(self.line())
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn cells() -> Vec<(String, Bit)> {
        vec![("A".into(), Bit::One), ("B".into(), Bit::Zero)]
    }

    #[test]
    fn test_bit_row_renders_cells() {
        let backend = TestBackend::new(30, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut row = BitRow::new("Inputs", cells()).focus(Some(1));

        terminal.draw(|f| row.render(f, f.area())).unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Inputs"));
        assert!(text.contains("A [1]"));
        assert!(text.contains("B [0]"));
    }

    #[test]
    fn test_focused_cell_is_reversed() {
        let row = BitRow::new("Inputs", cells()).focus(Some(1));
        let line = row.line();
        let value = line.spans.iter().filter(|s| s.content == "0").next().unwrap();
        assert!(value.style.add_modifier.contains(Modifier::REVERSED));
        let other = line.spans.iter().find(|s| s.content == "1").unwrap();
        assert!(!other.style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_height_wraps_wide_rows() {
        let row = BitRow::new("Inputs", cells());
        assert_eq!(row.height(40), 3);
        let wide = (0..16)
            .map(|i| (format!("Y{i}"), Bit::Zero))
            .collect::<Vec<_>>();
        assert!(BitRow::new("Outputs", wide).height(40) > 3);
    }

    #[test]
    fn test_bit_style_colours() {
        assert_eq!(bit_style(Bit::One).fg, Some(Color::Green));
        assert_eq!(bit_style(Bit::Zero).fg, Some(Color::DarkGray));
    }
}
