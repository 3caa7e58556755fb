//! # Routing Circuits
//!
//! Multiplexer and demultiplexer. Both read their select lines the same way:
//! select bit `i` is worth `2^i`, so `selects[0]` is the least significant.

use super::Bit;

/// Binary index addressed by `selects`.
///
/// Returns `None` only when a set bit lies beyond what `usize` can hold, which
/// callers treat the same as any other out-of-range index.
pub fn select_index(selects: &[Bit]) -> Option<usize> {
    selects
        .iter()
        .enumerate()
        .filter(|(_, bit)| bit.is_set())
        .try_fold(0usize, |index, (i, _)| {
            1usize.checked_shl(u32::try_from(i).ok()?).map(|w| index | w)
        })
}

/// Select lines that address `index` with `width` lines (LSB first).
pub fn selects_for(index: usize, width: usize) -> Vec<Bit> {
    Bit::vec_from_value(index, width)
}

/// Forward `inputs[index]` to the single output.
///
/// An index past the end of `inputs` yields `T::default()` (`Bit::Zero` for
/// bit inputs) rather than an error.
pub fn mux<T: Copy + Default>(inputs: &[T], selects: &[Bit]) -> T {
    select_index(selects)
        .and_then(|index| inputs.get(index).copied())
        .unwrap_or_default()
}

/// Route `input` to output `index`; every other output holds `T::default()`.
///
/// If the index is out of range for `width` the input goes nowhere and all
/// `width` outputs stay at the default.
pub fn demux<T: Copy + Default>(input: T, selects: &[Bit], width: usize) -> Vec<T> {
    let mut outputs = vec![T::default(); width];
    if let Some(slot) = select_index(selects).and_then(|index| outputs.get_mut(index)) {
        *slot = input;
    }
    outputs
}
