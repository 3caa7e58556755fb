//! # Truth Tables
//!
//! Tables are generated by running the real circuit functions over every
//! input combination, so they can never drift from the logic they document.
//!
//! The sized tables clamp their select/address width to [`MAX_TABLE_BITS`].

use serde::Serialize;

use super::{Bit, decoder, demux, encoder, full_adder, half_adder, mux, routing::selects_for};

/// Widest select/address input a generated table covers (16 lines).
pub const MAX_TABLE_BITS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruthRow {
    pub inputs: Vec<Bit>,
    pub outputs: Vec<Bit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruthTable {
    /// Input column labels, left to right.
    pub inputs: Vec<String>,
    /// Output column labels, left to right.
    pub outputs: Vec<String>,
    pub rows: Vec<TruthRow>,
}

impl TruthTable {
    fn new(inputs: &[String], outputs: &[String]) -> Self {
        Self {
            inputs: inputs.to_vec(),
            outputs: outputs.to_vec(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, inputs: Vec<Bit>, outputs: Vec<Bit>) {
        self.rows.push(TruthRow { inputs, outputs });
    }

    /// Index of the row whose inputs equal `inputs` (the "live" row).
    pub fn find_row(&self, inputs: &[Bit]) -> Option<usize> {
        self.rows.iter().position(|row| row.inputs == inputs)
    }

    /// Aligned plain-text rendering with a `|` between inputs and outputs.
    pub fn render_plain(&self) -> String {
        let widths: Vec<usize> = self
            .inputs
            .iter()
            .chain(&self.outputs)
            .map(|label| label.len().max(1))
            .collect();

        let cells = |values: Vec<String>| -> String {
            let (ins, outs) = values.split_at(self.inputs.len());
            let fmt = |vals: &[String], offset: usize| {
                vals.iter()
                    .enumerate()
                    .map(|(i, v)| format!("{:>w$}", v, w = widths[offset + i]))
                    .collect::<Vec<_>>()
                    .join("  ")
            };
            format!("{} | {}", fmt(ins, 0), fmt(outs, self.inputs.len()))
                .trim_end()
                .to_string()
        };

        let header = cells(self.inputs.iter().chain(&self.outputs).cloned().collect());
        let mut out = String::new();
        out.push_str(&header);
        out.push('\n');
        out.push_str(&"-".repeat(header.len()));
        out.push('\n');
        for row in &self.rows {
            let values = row
                .inputs
                .iter()
                .chain(&row.outputs)
                .map(|b| b.to_string())
                .collect();
            out.push_str(&cells(values));
            out.push('\n');
        }
        out
    }
}

/// Labels `prefix{n-1}` … `prefix0`, most significant first.
fn labels_msb_first(prefix: &str, count: usize) -> Vec<String> {
    (0..count).rev().map(|i| format!("{prefix}{i}")).collect()
}

/// Labels `prefix0` … `prefix{n-1}`.
fn labels(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i}")).collect()
}

fn reversed(bits: &[Bit]) -> Vec<Bit> {
    bits.iter().rev().copied().collect()
}

/// Columns: A B | Sum Carry.
pub fn half_adder_table() -> TruthTable {
    let mut table = TruthTable::new(
        &["A".into(), "B".into()],
        &["Sum".into(), "Carry".into()],
    );
    for value in 0..4 {
        let bits = Bit::vec_from_value(value, 2);
        let (a, b) = (bits[1], bits[0]);
        let r = half_adder(a, b);
        table.push(vec![a, b], vec![r.sum, r.carry]);
    }
    table
}

/// Columns: Cin A B | Sum Cout, rows counting up with Cin as the MSB.
pub fn full_adder_table() -> TruthTable {
    let mut table = TruthTable::new(
        &["Cin".into(), "A".into(), "B".into()],
        &["Sum".into(), "Cout".into()],
    );
    for value in 0..8 {
        let bits = Bit::vec_from_value(value, 3);
        let (cin, a, b) = (bits[2], bits[1], bits[0]);
        let r = full_adder(a, b, cin);
        table.push(vec![cin, a, b], vec![r.sum, r.carry]);
    }
    table
}

/// Functional table for a 2^n:1 mux: columns S{n-1}..S0 | I0..I{2^n-1},
/// where the output columns mark which data input reaches Y.
pub fn mux_table(select_bits: usize) -> TruthTable {
    let select_bits = select_bits.min(MAX_TABLE_BITS);
    let width = 1usize << select_bits;
    let mut table = TruthTable::new(
        &labels_msb_first("S", select_bits),
        &labels("I", width),
    );
    for index in 0..width {
        let selects = selects_for(index, select_bits);
        // Feed each data line its own one-hot marker and see which emerges.
        let routed: Vec<Bit> = (0..width)
            .map(|line| {
                let probe = Bit::vec_from_value(1 << line, width);
                mux(&probe, &selects)
            })
            .collect();
        table.push(reversed(&selects), routed);
    }
    table
}

/// 1:2^n demux with D = 1: columns S{n-1}..S0 | Y0..Y{2^n-1}.
pub fn demux_table(select_bits: usize) -> TruthTable {
    let select_bits = select_bits.min(MAX_TABLE_BITS);
    let width = 1usize << select_bits;
    let mut table = TruthTable::new(&labels_msb_first("S", select_bits), &labels("Y", width));
    for index in 0..width {
        let selects = selects_for(index, select_bits);
        table.push(reversed(&selects), demux(Bit::One, &selects, width));
    }
    table
}

/// n-to-2^n decoder: columns E A{n-1}..A0 | Y0..Y{2^n-1}.
pub fn decoder_table(address_bits: usize) -> TruthTable {
    let address_bits = address_bits.min(MAX_TABLE_BITS);
    let width = 1usize << address_bits;
    let mut inputs = vec!["E".to_string()];
    inputs.extend(labels_msb_first("A", address_bits));
    let mut table = TruthTable::new(&inputs, &labels("Y", width));

    // One disabled row stands for all 2^n disabled combinations.
    let mut disabled = vec![Bit::Zero];
    disabled.extend(vec![Bit::Zero; address_bits]);
    table.push(disabled, decoder(&vec![Bit::Zero; address_bits], Bit::Zero));

    for index in 0..width {
        let address = selects_for(index, address_bits);
        let mut row = vec![Bit::One];
        row.extend(reversed(&address));
        table.push(row, decoder(&address, Bit::One));
    }
    table
}

/// 2^n-to-n encoder, one row per one-hot input: Y0..Y{2^n-1} | A{n-1}..A0.
pub fn encoder_table(address_bits: usize) -> TruthTable {
    let address_bits = address_bits.min(MAX_TABLE_BITS);
    let width = 1usize << address_bits;
    let mut table = TruthTable::new(&labels("Y", width), &labels_msb_first("A", address_bits));
    for line in 0..width {
        let inputs = Bit::vec_from_value(1 << line, width);
        let address = encoder(&inputs);
        table.push(inputs, reversed(&address));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use Bit::{One, Zero};

    #[test]
    fn test_half_adder_table_rows() {
        let t = half_adder_table();
        assert_eq!(t.rows.len(), 4);
        assert_eq!(t.rows[3].inputs, vec![One, One]);
        assert_eq!(t.rows[3].outputs, vec![Zero, One]);
    }

    #[test]
    fn test_full_adder_table_matches_documented_order() {
        let expected = [
            [0, 0, 0, 0, 0],
            [0, 0, 1, 1, 0],
            [0, 1, 0, 1, 0],
            [0, 1, 1, 0, 1],
            [1, 0, 0, 1, 0],
            [1, 0, 1, 0, 1],
            [1, 1, 0, 0, 1],
            [1, 1, 1, 1, 1],
        ];
        let t = full_adder_table();
        for (row, want) in t.rows.iter().zip(expected) {
            let got: Vec<u8> = row.inputs.iter().chain(&row.outputs).map(|&b| u8::from(b)).collect();
            assert_eq!(got, want.to_vec());
        }
    }

    #[test]
    fn test_find_row() {
        let t = full_adder_table();
        assert_eq!(t.find_row(&[One, Zero, One]), Some(5));
        assert_eq!(t.find_row(&[One]), None);
    }

    #[test]
    fn test_mux_table_is_diagonal() {
        let t = mux_table(2);
        assert_eq!(t.inputs, vec!["S1", "S0"]);
        for (index, row) in t.rows.iter().enumerate() {
            assert_eq!(row.outputs.iter().position(|b| b.is_set()), Some(index));
        }
    }

    #[test]
    fn test_demux_table() {
        let t = demux_table(1);
        assert_eq!(t.rows[1].inputs, vec![One]);
        assert_eq!(t.rows[1].outputs, vec![Zero, One]);
    }

    #[test]
    fn test_decoder_table_has_disabled_row() {
        let t = decoder_table(2);
        assert_eq!(t.rows.len(), 5);
        assert!(t.rows[0].outputs.iter().all(|b| !b.is_set()));
        // E=1, A1=1, A0=0 → Y2
        assert_eq!(t.rows[3].inputs, vec![One, One, Zero]);
        assert_eq!(t.rows[3].outputs[2], One);
    }

    #[test]
    fn test_encoder_table_addresses() {
        let t = encoder_table(3);
        assert_eq!(t.outputs, vec!["A2", "A1", "A0"]);
        assert_eq!(t.rows[6].outputs, vec![One, One, Zero]);
    }

    #[test]
    fn test_sized_tables_clamp_width() {
        assert_eq!(mux_table(64), mux_table(MAX_TABLE_BITS));
        assert_eq!(demux_table(usize::MAX).rows.len(), 1 << MAX_TABLE_BITS);
        assert_eq!(decoder_table(40).inputs.len(), 1 + MAX_TABLE_BITS);
        assert_eq!(encoder_table(9).rows.len(), 16);
    }

    #[test]
    fn test_render_plain_layout() {
        let text = half_adder_table().render_plain();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "A  B | Sum  Carry");
        assert_eq!(lines[2], "0  0 |   0      0");
        assert_eq!(lines[5], "1  1 |   0      1");
    }
}
