/// Dynamically-typed Tensor: wraps `Tensor<T>` for various T
#[derive(Clone, Debug, PartialEq, From)]
pub enum TensorAny {
    F32(Tensor<f32>),
    I32(Tensor<i32>),
    U32(Tensor<u32>),
    U8(Tensor<u8>),
}

impl TensorAny {
    pub fn dtype(&self) -> DataType {
        match self {
            TensorAny::F32(_) => DataType::F32,
            TensorAny::I32(_) => DataType::I32,
            TensorAny::U32(_) => DataType::U32,
            TensorAny::U8(_) => DataType::U8,
        }
    }

    pub fn view(&self) -> &ViewDescriptor {
        match self {
            TensorAny::F32(t) => t.view(),
            TensorAny::I32(t) => t.view(),
            TensorAny::U32(t) => t.view(),
            TensorAny::U8(t) => t.view(),
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        match self {
            TensorAny::F32(t) => t.shape(),
            TensorAny::I32(t) => t.shape(),
            TensorAny::U32(t) => t.shape(),
            TensorAny::U8(t) => t.shape(),
        }
    }

    pub fn element_count(&self) -> usize {
        match self {
            TensorAny::F32(t) => t.element_count(),
            TensorAny::I32(t) => t.element_count(),
            TensorAny::U32(t) => t.element_count(),
            TensorAny::U8(t) => t.element_count(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            TensorAny::F32(t) => t.as_bytes(),
            TensorAny::I32(t) => t.as_bytes(),
            TensorAny::U32(t) => t.as_bytes(),
            TensorAny::U8(t) => t.as_bytes(),
        }
    }

    pub fn set_shape(&mut self, shape: &[usize]) -> Result<(), TensorError> {
        match self {
            TensorAny::F32(t) => t.set_shape(shape),
            TensorAny::I32(t) => t.set_shape(shape),
            TensorAny::U32(t) => t.set_shape(shape),
            TensorAny::U8(t) => t.set_shape(shape),
        }
    }

    pub fn resize(&mut self, shape: &[usize]) -> Result<(), TensorError> {
        match self {
            TensorAny::F32(t) => t.resize(shape),
            TensorAny::I32(t) => t.resize(shape),
            TensorAny::U32(t) => t.resize(shape),
            TensorAny::U8(t) => t.resize(shape),
        }
    }

    /// Typed view, `None` when `T` is not the stored element type
    pub fn downcast_ref<T: AnyElement>(&self) -> Option<&Tensor<T>> {
        T::from_any(self)
    }

    pub fn downcast_mut<T: AnyElement>(&mut self) -> Option<&mut Tensor<T>> {
        T::from_any_mut(self)
    }
}

/// Element types that have a `TensorAny` variant
pub trait AnyElement: Element {
    fn from_any(t: &TensorAny) -> Option<&Tensor<Self>>;
    fn from_any_mut(t: &mut TensorAny) -> Option<&mut Tensor<Self>>;
}

impl AnyElement for f32 {
    fn from_any(t: &TensorAny) -> Option<&Tensor<Self>> {
        match t {
            TensorAny::F32(inner) => Some(inner),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    fn from_any_mut(t: &mut TensorAny) -> Option<&mut Tensor<Self>> {
        match t {
            TensorAny::F32(inner) => Some(inner),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}

impl AnyElement for i32 {
    fn from_any(t: &TensorAny) -> Option<&Tensor<Self>> {
        match t {
            TensorAny::I32(inner) => Some(inner),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    fn from_any_mut(t: &mut TensorAny) -> Option<&mut Tensor<Self>> {
        match t {
            TensorAny::I32(inner) => Some(inner),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}

impl AnyElement for u32 {
    fn from_any(t: &TensorAny) -> Option<&Tensor<Self>> {
        match t {
            TensorAny::U32(inner) => Some(inner),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    fn from_any_mut(t: &mut TensorAny) -> Option<&mut Tensor<Self>> {
        match t {
            TensorAny::U32(inner) => Some(inner),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}

impl AnyElement for u8 {
    fn from_any(t: &TensorAny) -> Option<&Tensor<Self>> {
        match t {
            TensorAny::U8(inner) => Some(inner),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    fn from_any_mut(t: &mut TensorAny) -> Option<&mut Tensor<Self>> {
        match t {
            TensorAny::U8(inner) => Some(inner),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}
