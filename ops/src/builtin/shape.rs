use crate::types::KernelError;

/// Map a possibly negative axis into `0..rank`.
fn normalize_axis(axis: i32, rank: usize) -> Result<usize, KernelError> {
    let resolved = if axis < 0 { axis as i64 + rank as i64 } else { axis as i64 };
    if resolved < 0 || resolved >= rank as i64 {
        return Err(KernelError::InvalidAxis { axis, rank });
    }
    Ok(resolved as usize)
}

/// Resolve `axes` against `rank`, rejecting out-of-range and repeated axes.
fn resolve_axes(axes: &[i32], rank: usize) -> Result<Vec<bool>, KernelError> {
    let mut marked = vec![false; rank];
    for &axis in axes {
        let i = normalize_axis(axis, rank)?;
        if marked[i] {
            return Err(KernelError::InvalidAxis { axis, rank });
        }
        marked[i] = true;
    }
    Ok(marked)
}

/// Output shape of unsqueeze: a size-1 dimension at every axis of the
/// output rank named in `axes`.
pub fn unsqueeze_shape(input: &[usize], axes: &[i32]) -> Result<Vec<usize>, KernelError> {
    let marked = resolve_axes(axes, input.len() + axes.len())?;

    let mut dims = input.iter();
    Ok(marked
        .into_iter()
        .map(|inserted| if inserted { 1 } else { dims.next().copied().unwrap_or(1) })
        .collect())
}

/// Output shape of squeeze. Empty `axes` drops every size-1 dimension;
/// otherwise each named axis must have extent 1.
pub fn squeeze_shape(input: &[usize], axes: &[i32]) -> Result<Vec<usize>, KernelError> {
    if axes.is_empty() {
        return Ok(input.iter().copied().filter(|&d| d != 1).collect());
    }

    let marked = resolve_axes(axes, input.len())?;
    for &axis in axes {
        if input[normalize_axis(axis, input.len())?] != 1 {
            return Err(KernelError::InvalidAxis { axis, rank: input.len() });
        }
    }

    Ok(input
        .iter()
        .zip(marked)
        .filter_map(|(&d, dropped)| (!dropped).then_some(d))
        .collect())
}
