//! BinSim library exports for testing

use std::fmt;
use std::ops::RangeInclusive;

use clap::ValueEnum;

use crate::core::logic::TruthTable;
use crate::core::logic::truth_table;
use crate::core::state::{DECODER_ADDRESS_BITS, ENCODER_ADDRESS_BITS, MUX_SELECT_BITS};

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Circuits with a printable truth table (`binsim table <circuit>`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Circuit {
    HalfAdder,
    FullAdder,
    Mux,
    Demux,
    Decoder,
    Encoder,
}

impl Circuit {
    /// Accepted `--bits` values (select or address bits); `None` for the
    /// fixed-size adders.
    pub fn bit_range(self) -> Option<RangeInclusive<usize>> {
        match self {
            Circuit::HalfAdder | Circuit::FullAdder => None,
            Circuit::Mux | Circuit::Demux => Some(MUX_SELECT_BITS),
            Circuit::Decoder => Some(DECODER_ADDRESS_BITS),
            Circuit::Encoder => Some(ENCODER_ADDRESS_BITS),
        }
    }

    /// Build the table, defaulting to 2 select/address bits.
    pub fn truth_table(self, bits: Option<usize>) -> Result<TruthTable, CircuitError> {
        let bits = match (self.bit_range(), bits) {
            (None, Some(_)) => return Err(CircuitError::FixedSize(self)),
            (None, None) => 0,
            (Some(range), Some(bits)) if !range.contains(&bits) => {
                return Err(CircuitError::BitsOutOfRange {
                    circuit: self,
                    bits,
                    range,
                });
            }
            (Some(_), bits) => bits.unwrap_or(2),
        };

        Ok(match self {
            Circuit::HalfAdder => truth_table::half_adder_table(),
            Circuit::FullAdder => truth_table::full_adder_table(),
            Circuit::Mux => truth_table::mux_table(bits),
            Circuit::Demux => truth_table::demux_table(bits),
            Circuit::Decoder => truth_table::decoder_table(bits),
            Circuit::Encoder => truth_table::encoder_table(bits),
        })
    }
}

/// Why `binsim table` could not build a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CircuitError {
    /// `--bits` given for an adder.
    FixedSize(Circuit),
    BitsOutOfRange {
        circuit: Circuit,
        bits: usize,
        range: RangeInclusive<usize>,
    },
}

impl fmt::Display for CircuitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitError::FixedSize(circuit) => {
                write!(f, "{circuit:?} has a fixed size; --bits does not apply")
            }
            CircuitError::BitsOutOfRange {
                circuit,
                bits,
                range,
            } => write!(
                f,
                "--bits {} out of range for {:?} (expected {}..={})",
                bits,
                circuit,
                range.start(),
                range.end()
            ),
        }
    }
}

impl std::error::Error for CircuitError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_default_bits() {
        let table = Circuit::Mux.truth_table(None).unwrap();
        assert_eq!(table.rows.len(), 4);
        assert_eq!(Circuit::Encoder.truth_table(Some(3)).unwrap().rows.len(), 8);
    }

    #[test]
    fn test_circuit_rejects_bad_bits() {
        assert_eq!(
            Circuit::HalfAdder.truth_table(Some(2)),
            Err(CircuitError::FixedSize(Circuit::HalfAdder))
        );
        let err = Circuit::Decoder.truth_table(Some(7)).unwrap_err();
        assert_eq!(
            err,
            CircuitError::BitsOutOfRange {
                circuit: Circuit::Decoder,
                bits: 7,
                range: 2..=4,
            }
        );
        assert!(err.to_string().contains("expected 2..=4"));
    }
}
