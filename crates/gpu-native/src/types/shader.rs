use bytemuck::{Pod, Zeroable};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Pipeline stage of a shader (`GPU_ShaderEnum`).
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, TryFromPrimitive, IntoPrimitive)]
pub enum ShaderType {
    Vertex = 0,
    Fragment = 1,
    Geometry = 2,
}

impl ShaderType {
    pub const PIXEL: Self = Self::Fragment;
}

/// Shading language a renderer accepts (`GPU_ShaderLanguageEnum`).
#[repr(i32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, TryFromPrimitive, IntoPrimitive)]
pub enum ShaderLanguage {
    #[default]
    None = 0,
    ArbAssembly = 1,
    Glsl = 2,
    Glsles = 3,
    Hlsl = 4,
    Cg = 5,
}

/// Scalar type of attribute data (`GPU_TypeEnum`). Values are the GL constants.
#[repr(u32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, TryFromPrimitive, IntoPrimitive)]
pub enum DataType {
    Byte = 0x1400,
    UnsignedByte = 0x1401,
    Short = 0x1402,
    UnsignedShort = 0x1403,
    Int = 0x1404,
    UnsignedInt = 0x1405,
    #[default]
    Float = 0x1406,
    Double = 0x140A,
}

impl DataType {
    pub const fn size_bytes(self) -> usize {
        match self {
            Self::Byte | Self::UnsignedByte => 1,
            Self::Short | Self::UnsignedShort => 2,
            Self::Int | Self::UnsignedInt | Self::Float => 4,
            Self::Double => 8,
        }
    }

    /// Packs script numbers into native-endian bytes of this type.
    /// Integer types truncate toward zero and saturate at the type bounds.
    pub fn encode(self, values: &[f64]) -> Vec<u8> {
        fn pack<T: Pod>(items: Vec<T>) -> Vec<u8> {
            bytemuck::cast_slice::<T, u8>(items.as_slice()).to_vec()
        }

        match self {
            Self::Byte => pack(values.iter().map(|&v| v as i8).collect()),
            Self::UnsignedByte => pack(values.iter().map(|&v| v as u8).collect()),
            Self::Short => pack(values.iter().map(|&v| v as i16).collect()),
            Self::UnsignedShort => pack(values.iter().map(|&v| v as u16).collect()),
            Self::Int => pack(values.iter().map(|&v| v as i32).collect()),
            Self::UnsignedInt => pack(values.iter().map(|&v| v as u32).collect()),
            Self::Float => pack(values.iter().map(|&v| v as f32).collect()),
            Self::Double => pack(values.to_vec()),
        }
    }
}

/// Standard attribute/uniform locations of a program (`GPU_ShaderBlock`).
#[repr(C)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default, Pod, Zeroable)]
pub struct ShaderBlock {
    pub position_loc: i32,
    pub texcoord_loc: i32,
    pub color_loc: i32,
    pub modelview_projection_loc: i32,
}

impl ShaderBlock {
    #[inline]
    pub const fn new(position_loc: i32, texcoord_loc: i32, color_loc: i32, modelview_projection_loc: i32) -> Self {
        Self { position_loc, texcoord_loc, color_loc, modelview_projection_loc }
    }
}

/// Layout of one vertex attribute stream (`GPU_AttributeFormat`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct AttributeFormat {
    pub is_per_sprite: bool,
    pub num_elems_per_value: i32,
    pub kind: DataType,
    pub normalize: bool,
    pub stride_bytes: i32,
    pub offset_bytes: i32,
}

impl AttributeFormat {
    #[inline]
    pub const fn new(
        num_elems_per_value: i32,
        kind: DataType,
        normalize: bool,
        stride_bytes: i32,
        offset_bytes: i32,
    ) -> Self {
        Self { is_per_sprite: false, num_elems_per_value, kind, normalize, stride_bytes, offset_bytes }
    }
}

/// A vertex attribute with its own copy of the data (`GPU_Attribute`).
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub location: i32,
    pub format: AttributeFormat,
    values: Vec<u8>,
}

impl Attribute {
    pub fn new(location: i32, values: &[f64], format: AttributeFormat) -> Self {
        Self { location, format, values: format.kind.encode(values) }
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.values
    }

    /// Number of scalar elements stored.
    pub fn len(&self) -> usize {
        self.values.len() / self.format.kind.size_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A value for one of the `set_uniform*` entry points.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Int(i32),
    UInt(u32),
    Float(f32),
    IntVec { elems_per_value: i32, values: Vec<i32> },
    UIntVec { elems_per_value: i32, values: Vec<u32> },
    FloatVec { elems_per_value: i32, values: Vec<f32> },
    Matrix { num_matrices: i32, rows: i32, cols: i32, transpose: bool, values: Vec<f32> },
}

/// A constant value for one of the `set_attribute*` entry points.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Float(f32),
    Int(i32),
    UInt(u32),
    FloatVec(Vec<f32>),
    IntVec(Vec<i32>),
    UIntVec(Vec<u32>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_keeps_every_element() {
        let fmt = AttributeFormat::new(2, DataType::Float, false, 0, 0);
        let attr = Attribute::new(3, &[1.0, 2.0, 3.0, 4.0], fmt);
        assert_eq!(attr.len(), 4);
        let floats: &[f32] = bytemuck::cast_slice(attr.bytes());
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn integer_encoding_saturates() {
        let bytes = DataType::UnsignedByte.encode(&[-3.0, 12.7, 400.0]);
        assert_eq!(bytes, vec![0, 12, 255]);
    }

    #[test]
    fn data_type_from_gl_constant() {
        assert_eq!(DataType::try_from(0x140Au32).unwrap(), DataType::Double);
        assert!(DataType::try_from(0x1407u32).is_err());
    }
}
