//! Multiplexer and demultiplexer pages.

use ratatui::Frame;
use ratatui::layout::Rect;

use super::{CircuitPage, input_row};
use crate::core::logic::Bit;
use crate::core::logic::truth_table::{demux_table, mux_table};
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{BitRow, Diagram, diagram};

/// Select lines as the table lists them (MSB first).
pub(super) fn msb_first(bits: &[Bit]) -> Vec<Bit> {
    bits.iter().rev().copied().collect()
}

pub struct MuxView<'a> {
    app: &'a App,
}

impl<'a> MuxView<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Component for MuxView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mux = &self.app.mux;
        let lines = self.app.lines();
        let (data, selects) = lines.split_at(mux.width());
        let index = mux.index();
        let table = mux_table(mux.select_bits);
        let live = table.find_row(&msb_first(&mux.selects));

        let mut page = CircuitPage {
            diagram: Diagram::new(diagram::mux(mux.select_bits)),
            rows: vec![
                input_row(self.app, "Data", data, 0).highlight(Some(index)),
                input_row(self.app, "Select", selects, data.len()),
                BitRow::new(
                    format!("Output (I{index} selected)"),
                    vec![("Y".into(), mux.output())],
                ),
            ],
            table,
            live,
            table_title: "Routing".into(),
        };
        page.render(frame, area);
    }
}

pub struct DemuxView<'a> {
    app: &'a App,
}

impl<'a> DemuxView<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Component for DemuxView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let demux = &self.app.demux;
        let index = demux.index();
        let outputs = demux
            .outputs()
            .into_iter()
            .enumerate()
            .map(|(i, bit)| (format!("Y{i}"), bit))
            .collect();
        let table = demux_table(demux.select_bits);
        let live = table.find_row(&msb_first(&demux.selects));

        let mut page = CircuitPage {
            diagram: Diagram::new(diagram::demux(demux.select_bits)),
            rows: vec![
                input_row(self.app, "Inputs", &self.app.lines(), 0),
                BitRow::new(format!("Outputs (D routed to Y{index})"), outputs)
                    .highlight(Some(index)),
            ],
            table,
            live,
            table_title: "Routing (D = 1)".into(),
        };
        page.render(frame, area);
    }
}
