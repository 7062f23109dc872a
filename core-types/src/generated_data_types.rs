/// Supported element types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataType {
    F32,
    I32,
    U32,
    U8,
}

impl DataType {
    /// Every element type, in declaration order
    pub const ALL: &'static [DataType] = &[
        DataType::F32,
        DataType::I32,
        DataType::U32,
        DataType::U8,
    ];

    /// Size of one element, in bytes
    pub fn size_in_bytes(self) -> usize {
        match self {
            DataType::F32 => std::mem::size_of::<f32>(),
            DataType::I32 => std::mem::size_of::<i32>(),
            DataType::U32 => std::mem::size_of::<u32>(),
            DataType::U8 => std::mem::size_of::<u8>(),
        }
    }

    /// Name of the matching Rust scalar
    pub fn name(self) -> &'static str {
        match self {
            DataType::F32 => "f32",
            DataType::I32 => "i32",
            DataType::U32 => "u32",
            DataType::U8 => "u8",
        }
    }
}

/// Marker‐trait so we can go from T to DataType
pub trait Element: bytemuck::Pod + Default + Send + Sync {
    const DTYPE: DataType;
}

impl Element for f32 { const DTYPE: DataType = DataType::F32; }

impl Element for i32 { const DTYPE: DataType = DataType::I32; }

impl Element for u32 { const DTYPE: DataType = DataType::U32; }

impl Element for u8 { const DTYPE: DataType = DataType::U8; }
