//! # Actions
//!
//! Everything that can happen in BinSim becomes an `Action`.
//! User flips a switch? That's `Action::ToggleFocused`.
//! User types a new operand? That's `Action::SetOperands { .. }`.
//!
//! The `update()` function takes the current state and an action and
//! mutates the state in place. No I/O here; randomness, terminal handling
//! and logging sinks live in the TUI adapter.
//!
//! ```text
//! State + Action  →  update()  →  New State (+ Effect)
//! ```

use log::{debug, info, warn};

use crate::core::logic::Bit;
use crate::core::state::{
    App, DECODER_ADDRESS_BITS, DecoderInputs, DemuxInputs, ENCODER_ADDRESS_BITS,
    EncoderInputs, Line, MUX_SELECT_BITS, MuxInputs, View,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(View),
    NextView,
    PrevView,
    FocusNext,
    FocusPrev,
    /// Flip whichever line has focus in the current view.
    ToggleFocused,
    Toggle(Line),
    /// Next larger topology of the current circuit (4:1 → 8:1 ...).
    Grow,
    Shrink,
    SetOperands { a: String, b: String },
    Quit,
}

/// What the adapter must do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Navigate(view) => navigate(app, view),
        Action::NextView => navigate(app, app.view.next()),
        Action::PrevView => navigate(app, app.view.prev()),
        Action::FocusNext => {
            let count = app.lines().len();
            if count > 0 {
                app.focus = (app.focus + 1) % count;
            }
        }
        Action::FocusPrev => {
            let count = app.lines().len();
            if count > 0 {
                app.focus = (app.focus + count - 1) % count;
            }
        }
        Action::ToggleFocused => {
            if let Some(line) = app.focused_line() {
                toggle(app, line);
            }
        }
        Action::Toggle(line) => toggle(app, line),
        Action::Grow => resize(app, 1),
        Action::Shrink => resize(app, -1),
        Action::SetOperands { a, b } => {
            app.ripple.a = a;
            app.ripple.b = b;
            match app.ripple.evaluate() {
                Ok(()) => {
                    app.error = None;
                    if let Some(result) = &app.ripple.result {
                        app.status_message = format!(
                            "{} + {} = {}{}",
                            app.ripple.a,
                            app.ripple.b,
                            result.result_bits,
                            if result.overflow { " (carry out)" } else { "" }
                        );
                    }
                }
                Err(e) => {
                    warn!("Rejected operands: {}", e);
                    app.error = Some(e.to_string());
                }
            }
        }
        Action::Quit => {
            info!("Quit requested");
            return Effect::Quit;
        }
    }
    Effect::None
}

fn navigate(app: &mut App, view: View) {
    if app.view != view {
        info!("Switching view: {} -> {}", app.view.label(), view.label());
    }
    app.view = view;
    app.focus = 0;
    app.error = None;
    app.status_message = view.label().to_string();
}

fn flip(bits: &mut [Bit], i: usize) {
    if let Some(bit) = bits.get_mut(i) {
        *bit = bit.toggle();
    }
}

fn toggle(app: &mut App, line: Line) {
    match line {
        Line::HalfA => app.half.a = app.half.a.toggle(),
        Line::HalfB => app.half.b = app.half.b.toggle(),
        Line::FullA => app.full.a = app.full.a.toggle(),
        Line::FullB => app.full.b = app.full.b.toggle(),
        Line::FullCin => app.full.cin = app.full.cin.toggle(),
        Line::MuxData(i) => flip(&mut app.mux.data, i),
        Line::MuxSelect(i) => flip(&mut app.mux.selects, i),
        Line::DemuxData => app.demux.data = app.demux.data.toggle(),
        Line::DemuxSelect(i) => flip(&mut app.demux.selects, i),
        Line::DecoderEnable => app.decoder.enable = app.decoder.enable.toggle(),
        Line::DecoderAddress(i) => flip(&mut app.decoder.address, i),
        // Encoder inputs are radio buttons: selecting a line deasserts the rest.
        Line::EncoderInput(i) => {
            app.encoder.active = if app.encoder.active == Some(i) {
                None
            } else {
                Some(i)
            };
        }
    }
    debug!("{} -> {}", line.label(), app.line_value(line));
}

/// Step `current` by `delta` inside `range`; `None` at either end.
fn step_within(current: usize, delta: isize, range: &std::ops::RangeInclusive<usize>) -> Option<usize> {
    current
        .checked_add_signed(delta)
        .filter(|next| range.contains(next))
}

fn resize(app: &mut App, delta: isize) {
    let resized = match app.view {
        View::Mux => step_within(app.mux.select_bits, delta, &MUX_SELECT_BITS).map(|bits| {
            // A new mux size starts from a clean slate.
            app.mux = MuxInputs::new(bits);
            format!("{}x1 MUX", 1 << bits)
        }),
        View::Demux => step_within(app.demux.select_bits, delta, &MUX_SELECT_BITS).map(|bits| {
            let data = app.demux.data;
            let mut selects = std::mem::take(&mut app.demux.selects);
            selects.resize(bits, Bit::Zero);
            app.demux = DemuxInputs {
                data,
                selects,
                ..DemuxInputs::new(bits)
            };
            format!("1x{} DEMUX", 1 << bits)
        }),
        View::Decoder => {
            step_within(app.decoder.address_bits, delta, &DECODER_ADDRESS_BITS).map(|bits| {
                let enable = app.decoder.enable;
                let mut address = std::mem::take(&mut app.decoder.address);
                address.resize(bits, Bit::Zero);
                app.decoder = DecoderInputs {
                    enable,
                    address,
                    ..DecoderInputs::new(bits)
                };
                format!("{}-to-{} DECODER", bits, 1 << bits)
            })
        }
        View::Encoder => {
            step_within(app.encoder.address_bits, delta, &ENCODER_ADDRESS_BITS).map(|bits| {
                app.encoder = EncoderInputs::new(bits);
                format!("{}-to-{} ENCODER", 1 << bits, bits)
            })
        }
        _ => None,
    };

    match resized {
        Some(label) => {
            info!("Resized circuit: {}", label);
            app.focus = app.focus.min(app.lines().len().saturating_sub(1));
            app.status_message = label;
        }
        None => debug!("Resize ignored for {:?} (delta {})", app.view, delta),
    }
}
