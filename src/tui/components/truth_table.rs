//! # TruthTable Component
//!
//! Renders a [`TruthTable`] with ratatui's `Table` widget. Input and output
//! columns are separated by a `│` column, and the row matching the live
//! inputs is highlighted.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Cell, Row, Table};

use crate::core::logic::TruthTable;
use crate::tui::component::Component;
use crate::tui::components::bit_row::bit_style;

const COLUMN_SPACING: u16 = 2;

pub struct TruthTableView<'a> {
    pub table: &'a TruthTable,
    /// Index of the row to highlight.
    pub live: Option<usize>,
    pub title: &'a str,
}

impl<'a> TruthTableView<'a> {
    pub fn new(table: &'a TruthTable, live: Option<usize>, title: &'a str) -> Self {
        Self { table, live, title }
    }

    /// Rows + header + borders.
    pub fn height(&self) -> u16 {
        self.table.rows.len() as u16 + 3
    }

    /// Columns + separator + spacing + borders.
    pub fn width(&self) -> u16 {
        let labels: usize = self
            .table
            .inputs
            .iter()
            .chain(&self.table.outputs)
            .map(|l| l.len().max(1))
            .sum();
        let columns = self.table.inputs.len() + self.table.outputs.len() + 1;
        (labels + 1 + COLUMN_SPACING as usize * (columns - 1) + 2) as u16
    }
}

impl Component for TruthTableView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let header_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        let output_header = header_style.fg(Color::Green);

        let header: Vec<Cell> = self
            .table
            .inputs
            .iter()
            .map(|l| Cell::from(l.as_str()).style(header_style))
            .chain(std::iter::once(Cell::from("│")))
            .chain(
                self.table
                    .outputs
                    .iter()
                    .map(|l| Cell::from(l.as_str()).style(output_header)),
            )
            .collect();

        let rows = self.table.rows.iter().enumerate().map(|(i, row)| {
            let cells: Vec<Cell> = row
                .inputs
                .iter()
                .map(|b| Cell::from(Span::styled(b.to_string(), bit_style(*b))))
                .chain(std::iter::once(Cell::from("│")))
                .chain(
                    row.outputs
                        .iter()
                        .map(|b| Cell::from(Span::styled(b.to_string(), bit_style(*b)))),
                )
                .collect();
            let row = Row::new(cells);
            if self.live == Some(i) {
                row.style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            } else {
                row
            }
        });

        let widths: Vec<Constraint> = self
            .table
            .inputs
            .iter()
            .map(|l| Constraint::Length(l.len().max(1) as u16))
            .chain(std::iter::once(Constraint::Length(1)))
            .chain(
                self.table
                    .outputs
                    .iter()
                    .map(|l| Constraint::Length(l.len().max(1) as u16)),
            )
            .collect();

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", self.title));

        let table = Table::new(rows, widths)
            .header(Row::new(header))
            .column_spacing(COLUMN_SPACING)
            .block(block);
        frame.render_widget(table, area);
    }
}
