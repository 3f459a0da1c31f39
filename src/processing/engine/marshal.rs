use super::buffer::{EngineBuffer, Precision};
use crate::error::{PipelineError, Result};

/// Copy `src[..length]` into `dst[offset..offset + length]`.
///
/// Offset 0 addresses the real plane and offset `N` the imaginary plane.
/// Out-of-range requests fail; nothing is truncated.
pub fn pack_into<T: Precision>(
    src: &[f64],
    dst: &mut EngineBuffer<T>,
    length: usize,
    offset: usize,
) -> Result<()> {
    let end = checked_end(offset, length, dst.capacity())?;
    checked_end(0, length, src.len())?;

    for (slot, &value) in dst.as_mut_slice()[offset..end].iter_mut().zip(&src[..length]) {
        *slot = T::from_sample(value);
    }
    Ok(())
}

/// Copy `src[offset..offset + length]` out into `dst[..length]`.
pub fn unpack_from<T: Precision>(
    src: &EngineBuffer<T>,
    dst: &mut [f64],
    length: usize,
    offset: usize,
) -> Result<()> {
    let end = checked_end(offset, length, src.capacity())?;
    checked_end(0, length, dst.len())?;

    for (slot, &value) in dst[..length].iter_mut().zip(&src.as_slice()[offset..end]) {
        *slot = value.to_sample();
    }
    Ok(())
}

fn checked_end(offset: usize, length: usize, capacity: usize) -> Result<usize> {
    match offset.checked_add(length) {
        Some(end) if end <= capacity => Ok(end),
        _ => Err(PipelineError::MarshalRange {
            offset,
            length,
            capacity,
        }),
    }
}
