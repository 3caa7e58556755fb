//! Half and full adder pages.

use ratatui::Frame;
use ratatui::layout::Rect;

use super::{CircuitPage, input_row};
use crate::core::logic::truth_table::{full_adder_table, half_adder_table};
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{BitRow, Diagram, diagram};

pub struct HalfAdderView<'a> {
    app: &'a App,
}

impl<'a> HalfAdderView<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Component for HalfAdderView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inputs = self.app.half;
        let out = inputs.output();
        let table = half_adder_table();
        let live = table.find_row(&[inputs.a, inputs.b]);

        let mut page = CircuitPage {
            diagram: Diagram::new(diagram::half_adder()),
            rows: vec![
                input_row(self.app, "Inputs", &self.app.lines(), 0),
                BitRow::new(
                    "Outputs",
                    vec![("Sum".into(), out.sum), ("Carry".into(), out.carry)],
                ),
            ],
            table,
            live,
            table_title: "Truth Table".into(),
        };
        page.render(frame, area);
    }
}

pub struct FullAdderView<'a> {
    app: &'a App,
}

impl<'a> FullAdderView<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Component for FullAdderView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inputs = self.app.full;
        let out = inputs.output();
        let table = full_adder_table();
        let live = table.find_row(&[inputs.cin, inputs.a, inputs.b]);

        let mut page = CircuitPage {
            diagram: Diagram::new(diagram::full_adder()),
            rows: vec![
                input_row(self.app, "Inputs", &self.app.lines(), 0),
                BitRow::new(
                    "Outputs",
                    vec![("Sum".into(), out.sum), ("Cout".into(), out.carry)],
                ),
            ],
            table,
            live,
            table_title: "Truth Table".into(),
        };
        page.render(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::render_view;
    use crate::core::logic::Bit;
    use crate::core::state::View;
    use crate::test_support::test_app;

    #[test]
    fn test_half_adder_page() {
        let mut app = test_app();
        app.half.a = Bit::One;
        app.half.b = Bit::One;
        let text = render_view(&app, 90, 24);
        assert!(text.contains("Schematic"));
        assert!(text.contains("A [1]  B [1]"));
        assert!(text.contains("Sum [0]  Carry [1]"));
        assert!(text.contains("Truth Table"));
    }

    #[test]
    fn test_full_adder_page() {
        let mut app = test_app();
        app.view = View::FullAdder;
        app.full.a = Bit::One;
        app.full.cin = Bit::One;
        let text = render_view(&app, 90, 30);
        assert!(text.contains("Cin [1]"));
        assert!(text.contains("Sum [0]  Cout [1]"));
    }
}
