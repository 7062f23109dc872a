use bytemuck::Zeroable;
use core_types::{MAX_DIMS, ViewDescriptor};

use crate::TensorError;

/// Row-major strides for `shape`, innermost dimension last.
/// Saturates at `usize::MAX` instead of wrapping.
pub fn compute_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1usize; shape.len()];
    for i in (0..shape.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1].saturating_mul(shape[i + 1]);
    }
    strides
}

/// Build a contiguous view descriptor for `shape`.
///
/// Extents, strides and the element count must all fit the descriptor's
/// `u32` fields.
pub(crate) fn contiguous_view(shape: &[usize]) -> Result<ViewDescriptor, TensorError> {
    if shape.len() > MAX_DIMS {
        return Err(TensorError::TooManyDims { ndim: shape.len(), max: MAX_DIMS });
    }
    let too_large = || TensorError::DimTooLarge { shape: shape.to_vec() };

    shape
        .iter()
        .try_fold(1u32, |count, &d| count.checked_mul(u32::try_from(d).ok()?))
        .ok_or_else(too_large)?;

    let mut vd = ViewDescriptor::zeroed();
    vd.ndim = shape.len() as u32;
    for (i, (&d, s)) in shape.iter().zip(compute_strides(shape)).enumerate() {
        vd.shape[i]   = u32::try_from(d).map_err(|_| too_large())?;
        vd.strides[i] = u32::try_from(s).map_err(|_| too_large())?;
    }
    Ok(vd)
}
