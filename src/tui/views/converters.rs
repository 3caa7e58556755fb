//! Decoder and encoder pages.

use ratatui::Frame;
use ratatui::layout::Rect;

use super::routing::msb_first;
use super::{CircuitPage, input_row};
use crate::core::logic::Bit;
use crate::core::logic::truth_table::{decoder_table, encoder_table};
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{BitRow, Diagram, diagram};

pub struct DecoderView<'a> {
    app: &'a App,
}

impl<'a> DecoderView<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Component for DecoderView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let decoder = &self.app.decoder;
        let enabled = decoder.enable.is_set();
        let outputs = decoder
            .outputs()
            .into_iter()
            .enumerate()
            .map(|(i, bit)| (format!("Y{i}"), bit))
            .collect();

        let table = decoder_table(decoder.address_bits);
        // The table has a single disabled row standing for every address.
        let key = if enabled {
            let mut key = vec![Bit::One];
            key.extend(msb_first(&decoder.address));
            key
        } else {
            vec![Bit::Zero; decoder.address_bits + 1]
        };
        let live = table.find_row(&key);

        let title = if enabled {
            format!("Outputs (Y{} active)", decoder.index())
        } else {
            "Outputs (disabled)".to_string()
        };

        let mut page = CircuitPage {
            diagram: Diagram::new(diagram::decoder(decoder.address_bits)),
            rows: vec![
                input_row(self.app, "Inputs", &self.app.lines(), 0),
                BitRow::new(title, outputs).highlight(enabled.then(|| decoder.index())),
            ],
            table,
            live,
            table_title: "Truth Table".into(),
        };
        page.render(frame, area);
    }
}

pub struct EncoderView<'a> {
    app: &'a App,
}

impl<'a> EncoderView<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Component for EncoderView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let encoder = &self.app.encoder;
        let address = encoder.address();
        let mut outputs: Vec<(String, Bit)> = address
            .iter()
            .enumerate()
            .rev()
            .map(|(i, bit)| (format!("A{i}"), *bit))
            .collect();
        outputs.push(("V".into(), encoder.valid()));

        let title = match encoder.active {
            Some(line) => format!("Outputs (address {line})"),
            None => "Outputs (no input asserted)".to_string(),
        };

        let table = encoder_table(encoder.address_bits);
        let live = table.find_row(&encoder.lines());

        let mut page = CircuitPage {
            diagram: Diagram::new(diagram::encoder(encoder.address_bits)),
            rows: vec![
                input_row(self.app, "Inputs", &self.app.lines(), 0)
                    .highlight(encoder.active),
                BitRow::new(title, outputs),
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
    use super::*;
    use crate::core::state::View;
    use crate::test_support::test_app;

    #[test]
    fn test_decoder_page_active_output() {
        let mut app = test_app();
        app.view = View::Decoder;
        app.decoder.address = vec![Bit::One, Bit::One];
        let text = render_view(&app, 100, 30);
        assert!(text.contains("2-to-4 DECODER"));
        assert!(text.contains("Outputs (Y3 active)"));
        assert!(text.contains("Y3 [1]"));
    }

    #[test]
    fn test_decoder_page_disabled() {
        let mut app = test_app();
        app.view = View::Decoder;
        app.decoder.enable = Bit::Zero;
        let text = render_view(&app, 100, 30);
        assert!(text.contains("Outputs (disabled)"));
        assert!(text.contains("E [0]"));
    }

    #[test]
    fn test_encoder_page_shows_address_msb_first() {
        let mut app = test_app();
        app.view = View::Encoder;
        app.encoder.active = Some(2);
        let text = render_view(&app, 100, 30);
        assert!(text.contains("Outputs (address 2)"));
        assert!(text.contains("A1 [1]  A0 [0]  V [1]"));
    }

    #[test]
    fn test_encoder_page_idle() {
        let mut app = test_app();
        app.view = View::Encoder;
        let text = render_view(&app, 100, 30);
        assert!(text.contains("no input asserted"));
        assert!(text.contains("V [0]"));
    }
}
