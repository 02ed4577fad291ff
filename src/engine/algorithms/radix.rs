//! Binary radix sorts, least and most significant bit first

use crate::engine::pacing::OpCost;
use crate::engine::{ArrayId, EngineError, ObservableBuffer, Result, Sorter};

/// Sort key of a value: flipping the sign bit orders negative values first
#[inline]
fn key(value: i32) -> u32 {
    (value as u32) ^ 0x8000_0000
}

/// Number of low key bits that differ between the values, or `None` if the
/// values are already sorted
fn changing_bits(values: &[i32]) -> Option<u32> {
    if crate::engine::is_sorted(values) {
        return None;
    }
    let (ones, zeroes) = values
        .iter()
        .fold((u32::MAX, u32::MAX), |(ones, zeroes), &v| (ones & key(v), zeroes & !key(v)));
    Some(u32::BITS - (!(ones | zeroes)).leading_zeros())
}

/// LSD radix sort: one stable split by each varying bit, lowest bit first
///
/// The values alternate between the two arrays every pass; the pass count
/// decides which array is read first so that the last pass ends in the values.
#[derive(Debug, Default, Clone, Copy)]
pub struct RadixSortLsd;

impl RadixSortLsd {
    pub fn new() -> Self {
        Self
    }

    fn count_zeroes(buffer: &ObservableBuffer, array: ArrayId, mask: u32) -> Result<usize> {
        buffer
            .view(|view| {
                let data = match array {
                    ArrayId::Values => Some(view.values),
                    ArrayId::Auxiliary => view.auxiliary,
                };
                data.map(|data| data.iter().filter(|&&v| key(v) & mask == 0).count())
            })
            .ok_or_else(|| EngineError::InvalidState("no auxiliary array was created".into()))
    }
}

impl Sorter for RadixSortLsd {
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        let n = buffer.len();
        let Some(bits) = changing_bits(&buffer.to_vec()) else {
            return Ok(());
        };

        let aux = buffer.create_auxiliary()?;
        let (mut input, mut output) = if bits % 2 == 0 {
            (ArrayId::Values, aux)
        } else {
            (aux, ArrayId::Values)
        };

        for bit in 0..bits {
            let mask = 1u32 << bit;
            let split = Self::count_zeroes(buffer, input, mask)?;
            let (mut zeroes, mut ones) = (0, split);
            buffer.push_range(0, 0);
            buffer.push_range(0, 0);
            buffer.push_range(split, split);
            for i in 0..n {
                buffer.modify_range(2, i, i + 1)?;
                let value = buffer.value_in(input, i)?;
                let pos = if key(value) & mask == 0 {
                    zeroes += 1;
                    buffer.modify_range(1, 0, zeroes)?;
                    zeroes - 1
                } else {
                    ones += 1;
                    buffer.modify_range(0, split, ones)?;
                    ones - 1
                };
                buffer.set_special_value(Some(value));
                buffer.set_value(output, pos, value)?;
            }
            buffer.pop_range()?;
            buffer.pop_range()?;
            buffer.pop_range()?;
            buffer.set_special(None);
            std::mem::swap(&mut input, &mut output);
        }
        buffer.destroy_auxiliary()
    }
}

/// MSD radix sort: in-place two-way partition by the highest varying bit,
/// recursing with the next lower bit
#[derive(Debug, Default, Clone, Copy)]
pub struct RadixSortMsd;

impl RadixSortMsd {
    pub fn new() -> Self {
        Self
    }

    fn sort_range(buffer: &ObservableBuffer, mask: u32, start: usize, end: usize) -> Result<()> {
        if end - start < 2 {
            return Ok(());
        }
        buffer.push_range(start, end);
        let (mut l, mut r) = (start, end);
        buffer.push_range(l, r);
        while l < r {
            buffer.set_special(Some(l));
            // a bit test is paid like a comparison
            buffer.pause(OpCost::Compare)?;
            if key(buffer.value(l)) & mask == 0 {
                l += 1;
            } else {
                r -= 1;
                buffer.swap(l, r)?;
            }
            buffer.modify_range(0, l, r)?;
        }
        buffer.set_special(None);
        buffer.pop_range()?;

        let lower = mask >> 1;
        if lower != 0 {
            Self::sort_range(buffer, lower, start, r)?;
            Self::sort_range(buffer, lower, r, end)?;
        }
        buffer.pop_range()
    }
}

impl Sorter for RadixSortMsd {
    fn sort(&mut self, buffer: &ObservableBuffer) -> Result<()> {
        let Some(bits) = changing_bits(&buffer.to_vec()) else {
            return Ok(());
        };
        Self::sort_range(buffer, 1 << (bits - 1), 0, buffer.len())
    }
}
