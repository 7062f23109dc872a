use core_types::{DataType, Element};
use tensor::Tensor;

use crate::node::Node;
use crate::types::{KernelError, TensorAny};

/// Element types the reference copy handles
pub const COPY_TYPES: &[DataType] = &[DataType::F32, DataType::U8];

/// The node's only input and only output
pub(crate) fn single_io(node: &mut Node) -> Result<(&TensorAny, &mut TensorAny), KernelError> {
    let (inputs, outputs) = node.io_mut();
    match (inputs, outputs) {
        ([input], [output]) => Ok((input, output)),
        (inputs, outputs) => Err(KernelError::ArityMismatch {
            expected_in:  1,
            expected_out: 1,
            found_in:     inputs.len(),
            found_out:    outputs.len(),
        }),
    }
}

/// Copy every element of `input` into `output`.
///
/// Both tensors must carry the same element type from `COPY_TYPES` and the
/// same element count. On error `output` is left untouched.
pub fn copy_tensor(input: &TensorAny, output: &mut TensorAny) -> Result<(), KernelError> {
    match (input, output) {
        (TensorAny::F32(i), TensorAny::F32(o)) => copy_elements(i, o),
        (TensorAny::U8(i), TensorAny::U8(o))   => copy_elements(i, o),
        (i, o) => Err(KernelError::UnsupportedDataType { input: i.dtype(), output: o.dtype() }),
    }
}

fn copy_elements<T: Element>(input: &Tensor<T>, output: &mut Tensor<T>) -> Result<(), KernelError> {
    if input.element_count() != output.element_count() {
        return Err(KernelError::ElementCountMismatch {
            input:  input.element_count(),
            output: output.element_count(),
        });
    }
    output.data_mut().copy_from_slice(input.data());
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn copies_f32_under_new_shape() {
        let input  = TensorAny::from(Tensor::from_vec(vec![1.5f32, -2.0, 3.25], &[3]).unwrap());
        let mut output = TensorAny::from(Tensor::<f32>::zeros(&[1, 3]).unwrap());

        copy_tensor(&input, &mut output).unwrap();

        assert_eq!(output.as_bytes(), input.as_bytes());
        assert_eq!(output.shape(), vec![1, 3]);
    }

    #[test]
    fn empty_tensors_are_a_noop() {
        let input  = TensorAny::from(Tensor::<u8>::zeros(&[0]).unwrap());
        let mut output = TensorAny::from(Tensor::<u8>::zeros(&[0, 1]).unwrap());
        copy_tensor(&input, &mut output).unwrap();
        assert_eq!(output.element_count(), 0);
    }

    #[test]
    fn mismatched_types_write_nothing() {
        let input  = TensorAny::from(Tensor::from_vec(vec![1.0f32, 2.0], &[2]).unwrap());
        let mut output = TensorAny::from(Tensor::from_vec(vec![9u8, 9], &[1, 2]).unwrap());

        let err = copy_tensor(&input, &mut output).unwrap_err();

        assert_eq!(err, KernelError::UnsupportedDataType { input: DataType::F32, output: DataType::U8 });
        assert_eq!(output.as_bytes(), &[9, 9]);
    }

    #[test]
    fn types_outside_the_table_are_rejected() {
        let input  = TensorAny::from(Tensor::from_vec(vec![1i32, 2], &[2]).unwrap());
        let mut output = TensorAny::from(Tensor::<i32>::zeros(&[2, 1]).unwrap());

        assert!(matches!(
            copy_tensor(&input, &mut output),
            Err(KernelError::UnsupportedDataType { input: DataType::I32, output: DataType::I32 })
        ));
        assert!(!COPY_TYPES.contains(&DataType::I32));
    }

    #[test]
    fn count_mismatch_is_reported() {
        let input  = TensorAny::from(Tensor::from_vec(vec![1u8, 2, 3], &[3]).unwrap());
        let mut output = TensorAny::from(Tensor::<u8>::zeros(&[1, 2]).unwrap());

        assert_eq!(
            copy_tensor(&input, &mut output),
            Err(KernelError::ElementCountMismatch { input: 3, output: 2 })
        );
        assert_eq!(output.as_bytes(), &[0, 0]);
    }

    proptest! {
        #[test]
        fn f32_output_is_byte_identical(data in prop::collection::vec(any::<f32>(), 0..256)) {
            let n = data.len();
            let input  = TensorAny::from(Tensor::from_vec(data, &[n]).unwrap());
            let mut output = TensorAny::from(Tensor::<f32>::zeros(&[1, n]).unwrap());

            copy_tensor(&input, &mut output).unwrap();
            prop_assert_eq!(output.as_bytes(), input.as_bytes());
        }

        #[test]
        fn u8_output_is_byte_identical(data in prop::collection::vec(any::<u8>(), 0..256)) {
            let n = data.len();
            let input  = TensorAny::from(Tensor::from_vec(data, &[n, 1]).unwrap());
            let mut output = TensorAny::from(Tensor::<u8>::zeros(&[n]).unwrap());

            copy_tensor(&input, &mut output).unwrap();
            prop_assert_eq!(output.as_bytes(), input.as_bytes());
        }
    }
}
