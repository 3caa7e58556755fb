//! # Circuit Pages
//!
//! One view per [`View`] variant. Views are transient wrappers built every
//! frame from borrowed state: `&App` for the circuit inputs, and `&mut` TUI
//! state where a page owns presentation state (operand fields, docs scroll).
//!
//! ```text
//! ┌ Schematic ───────────────┐
//! │ box-drawing diagram      │
//! └──────────────────────────┘
//! ┌ Inputs ────┐┌ Outputs ───┐
//! │ A [1] B [0]││ Sum [1]    │
//! └────────────┘└────────────┘
//! ┌ Truth Table ─────────────┐
//! │ ...                      │
//! └──────────────────────────┘
//! ```

mod adders;
mod converters;
mod docs;
mod ripple;
mod routing;

pub use docs::DocsState;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::logic::TruthTable;
use crate::core::state::{App, Line, View};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{BitRow, Diagram, TruthTableView};

/// Draw the page for `app.view` into `area`.
pub fn draw_view(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    let area = match &app.error {
        Some(message) => {
            let height = error_height(message, area.width);
            let [body, banner] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(height)]).areas(area);
            draw_error(frame, banner, message);
            body
        }
        None => area,
    };

    match app.view {
        View::HalfAdder => adders::HalfAdderView::new(app).render(frame, area),
        View::FullAdder => adders::FullAdderView::new(app).render(frame, area),
        View::RippleCarry => ripple::RippleView::new(app, &mut tui.operands).render(frame, area),
        View::Mux => routing::MuxView::new(app).render(frame, area),
        View::Demux => routing::DemuxView::new(app).render(frame, area),
        View::Decoder => converters::DecoderView::new(app).render(frame, area),
        View::Encoder => converters::EncoderView::new(app).render(frame, area),
        View::Docs => docs::DocsView::new(&mut tui.docs).render(frame, area),
    }
}

/// Wrapped message lines plus borders.
fn error_height(message: &str, width: u16) -> u16 {
    let inner = width.saturating_sub(2).max(1) as usize;
    textwrap::wrap(message, inner).len().max(1) as u16 + 2
}

fn draw_error(frame: &mut Frame, area: Rect, message: &str) {
    let style = Style::default().fg(Color::Red);
    let paragraph = Paragraph::new(message)
        .style(style)
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(style)
                .title(Span::styled(" Error ", style.add_modifier(Modifier::BOLD))),
        );
    frame.render_widget(paragraph, area);
}

/// Input cells for `lines`, with focus translated from the page-wide focus
/// index. `offset` is the position of `lines[0]` in `app.lines()`.
fn input_row(app: &App, title: &str, lines: &[Line], offset: usize) -> BitRow {
    let cells = lines
        .iter()
        .map(|line| (line.label(), app.line_value(*line)))
        .collect();
    let focus = app
        .focus
        .checked_sub(offset)
        .filter(|&i| i < lines.len());
    BitRow::new(title, cells).focus(focus)
}

/// The layout every bit-level page shares: schematic and I/O rows on the
/// left, the truth table with its live row on the right.
struct CircuitPage {
    diagram: Diagram,
    rows: Vec<BitRow>,
    table: TruthTable,
    live: Option<usize>,
    table_title: String,
}

impl Component for CircuitPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut table = TruthTableView::new(&self.table, self.live, &self.table_title);
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(table.width())])
                .spacing(1)
                .areas(area);

        let mut constraints = vec![Constraint::Length(self.diagram.height())];
        constraints.extend(
            self.rows
                .iter()
                .map(|row| Constraint::Length(row.height(left.width))),
        );
        constraints.push(Constraint::Min(0));
        let areas = Layout::vertical(constraints).split(left);

        self.diagram.render(frame, areas[0]);
        for (row, area) in self.rows.iter_mut().zip(areas.iter().skip(1)) {
            row.render(frame, *area);
        }

        let table_area = Rect {
            height: right.height.min(table.height()),
            ..right
        };
        table.render(frame, table_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    pub(super) fn render_view(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::new(app);
        terminal
            .draw(|f| draw_view(f, f.area(), app, &mut tui))
            .unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_error_banner_shown() {
        let mut app = test_app();
        app.error = Some("operand \"10101\" is 5 bits wide (limit 4)".into());
        let text = render_view(&app, 60, 24);
        assert!(text.contains("Error"));
        assert!(text.contains("limit 4"));
    }

    #[test]
    fn test_error_height_wraps() {
        assert_eq!(error_height("short", 40), 3);
        assert_eq!(error_height("one two three four five six", 12), 2 + 3);
    }

    #[test]
    fn test_input_row_focus_offset() {
        let mut app = test_app();
        app.view = View::Mux;
        app.focus = 5;
        let lines = app.lines();
        let selects = &lines[4..];
        let row = input_row(&app, "Select", selects, 4);
        assert_eq!(row.focus, Some(1));
        let data = input_row(&app, "Data", &lines[..4], 0);
        assert_eq!(data.focus, None);
    }
}
