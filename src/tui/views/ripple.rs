//! Ripple-carry adder page.
//!
//! Two operand fields feed a chain of full adders. The stage table lists
//! every adder MSB first, so it reads in the same order as the operands.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Cell, Paragraph, Row, Table};

use crate::core::logic::{AdderStep, Bit, RippleCarryResult};
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::bit_row::bit_style;
use crate::tui::components::{Diagram, OperandForm, diagram};

const STAGE_ROWS: [&str; 5] = ["Cin", "A", "B", "Sum", "Cout"];

pub struct RippleView<'a> {
    app: &'a App,
    form: &'a mut OperandForm,
}

impl<'a> RippleView<'a> {
    pub fn new(app: &'a App, form: &'a mut OperandForm) -> Self {
        Self { app, form }
    }

    fn stage_width(&self) -> usize {
        match &self.app.ripple.result {
            Some(result) => result.width(),
            None => self.app.ripple.a.len().max(self.app.ripple.b.len()),
        }
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {title} "))
}

fn bit_cell(bit: Bit) -> Cell<'static> {
    Cell::from(Span::styled(bit.to_string(), bit_style(bit)))
}

fn stage_value(step: &AdderStep, row: usize) -> Bit {
    match row {
        0 => step.carry_in,
        1 => step.a,
        2 => step.b,
        3 => step.sum,
        _ => step.carry_out,
    }
}

fn stage_table(result: &RippleCarryResult) -> Table<'static> {
    let label_style = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);
    let header = std::iter::once(Cell::from(""))
        .chain(
            result
                .steps
                .iter()
                .rev()
                .map(|s| Cell::from(format!("{}", s.index)).style(label_style)),
        )
        .collect::<Vec<_>>();

    let rows = STAGE_ROWS.iter().enumerate().map(|(r, label)| {
        let cells = std::iter::once(Cell::from(*label).style(label_style))
            .chain(result.steps.iter().rev().map(|s| bit_cell(stage_value(s, r))))
            .collect::<Vec<_>>();
        Row::new(cells)
    });

    let widths = std::iter::once(Constraint::Length(4))
        .chain(result.steps.iter().map(|_| Constraint::Length(2)))
        .collect::<Vec<_>>();

    Table::new(rows, widths)
        .header(Row::new(header))
        .column_spacing(1)
        .block(panel("Stages (MSB first)"))
}

/// `A + B = 10001 (17)`, carry-out bit set apart in magenta.
fn result_line(result: &RippleCarryResult) -> Line<'static> {
    let mut spans = vec![Span::styled("A + B = ", Style::default().fg(Color::Gray))];
    let digits = &result.result_bits;
    let (carry, sum) = if result.overflow {
        digits.split_at(1)
    } else {
        ("", digits.as_str())
    };
    if !carry.is_empty() {
        spans.push(Span::styled(
            carry.to_string(),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(
        sum.to_string(),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ));
    if let Some(value) = result.value() {
        spans.push(Span::raw(format!(" ({value})")));
    }
    if result.overflow {
        spans.push(Span::styled(
            "  carry out",
            Style::default().fg(Color::Magenta),
        ));
    }
    Line::from(spans)
}

impl Component for RippleView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut diagram = Diagram::new(diagram::ripple_carry(self.stage_width()));
        let [diagram_area, form_area, stages_area, result_area, _] = Layout::vertical([
            Constraint::Length(diagram.height()),
            Constraint::Length(OperandForm::HEIGHT),
            Constraint::Length(STAGE_ROWS.len() as u16 + 3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .areas(area);

        diagram.render(frame, diagram_area);
        self.form.render(frame, form_area);

        match &self.app.ripple.result {
            Some(result) => {
                frame.render_widget(stage_table(result), stages_area);
                frame.render_widget(
                    Paragraph::new(result_line(result)).block(panel("Result")),
                    result_area,
                );
            }
            None => {
                let idle = Paragraph::new("Fix the operands to see the sum.")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(panel("Stages (MSB first)"));
                frame.render_widget(idle, stages_area);
            }
        }
    }
}
