mod utils;

use core_types::{DataType, Element, ViewDescriptor};
use std::marker::PhantomData;
use thiserror::Error;

pub use utils::compute_strides;
use utils::contiguous_view;

/// Errors raised while building or re-shaping a tensor
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TensorError {
    #[error("shape has {ndim} dimensions, at most {max} are supported")]
    TooManyDims { ndim: usize, max: usize },

    #[error("shape {shape:?} addresses {expected} elements, storage holds {found}")]
    LengthMismatch { shape: Vec<usize>, expected: usize, found: usize },

    #[error("shape {shape:?} does not fit 32-bit extents, strides and element count")]
    DimTooLarge { shape: Vec<usize> },
}

/// Host tensor: contiguous typed storage plus the view that declares its shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor<T: Element> {
    data:    Vec<T>,
    view:    ViewDescriptor,
    dtype:   DataType,
    _marker: PhantomData<T>,
}

impl<T: Element> Tensor<T> {
    /* --------------------------------------------------------------------- */
    /* Constructors                                                          */
    /* --------------------------------------------------------------------- */

    /// Allocate a zero-filled tensor of the given shape.
    pub fn zeros(shape: &[usize]) -> Result<Self, TensorError> {
        let view = contiguous_view(shape)?;
        Ok(Tensor {
            data:    vec![T::default(); view.element_count()],
            view,
            dtype:   T::DTYPE,
            _marker: PhantomData,
        })
    }

    /// Take ownership of `data` and declare it with `shape`.
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> Result<Self, TensorError> {
        let view = contiguous_view(shape)?;
        check_len(shape, view.element_count(), data.len())?;
        Ok(Tensor {
            data,
            view,
            dtype:   T::DTYPE,
            _marker: PhantomData,
        })
    }

    /* --------------------------------------------------------------------- */
    /* Shape changes                                                         */
    /* --------------------------------------------------------------------- */

    /// Re-declare the shape; the element count must not change.
    pub fn set_shape(&mut self, shape: &[usize]) -> Result<(), TensorError> {
        let view = contiguous_view(shape)?;
        check_len(shape, view.element_count(), self.data.len())?;
        self.view = view;
        Ok(())
    }

    /// Re-declare the shape and grow or shrink storage to match.
    /// New elements are zero.
    pub fn resize(&mut self, shape: &[usize]) -> Result<(), TensorError> {
        let view = contiguous_view(shape)?;
        self.data.resize(view.element_count(), T::default());
        self.view = view;
        Ok(())
    }

    /* --------------------------------------------------------------------- */
    /* Accessors                                                             */
    /* --------------------------------------------------------------------- */

    /// The view descriptor (shape, strides, offset)
    pub fn view(&self) -> &ViewDescriptor {
        &self.view
    }

    /// Declared shape
    pub fn shape(&self) -> Vec<usize> {
        self.view.dims().iter().map(|&d| d as usize).collect()
    }

    pub fn element_count(&self) -> usize {
        self.data.len()
    }

    /// The tensor’s DataType
    pub fn dtype(&self) -> DataType {
        self.dtype
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Byte view of the storage, `element_count * size_of::<T>()` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.data.as_slice())
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

fn check_len(shape: &[usize], expected: usize, found: usize) -> Result<(), TensorError> {
    if expected != found {
        return Err(TensorError::LengthMismatch { shape: shape.to_vec(), expected, found });
    }
    Ok(())
}

/* ------------------------------------------------------------------------- */
/*                                     Tests                                 */
/* ------------------------------------------------------------------------- */
