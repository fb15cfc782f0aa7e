//! Typed property decoding.
//!
//! Every element in the parsed file tree carries a list of properties, each
//! a tagged byte span. The tag alone decides how many bytes the value
//! occupies: scalars have a fixed width per tag, arrays a fixed width per
//! element times a declared count, and strings are length-delimited by the
//! low-level reader. Array payloads may additionally be stored
//! DEFLATE-compressed (zlib stream, `encoding != 0`).

use std::borrow::Cow;
use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use flate2::read::ZlibDecoder;

use crate::util::{Error, Result};

/// Property type tag alphabet.
///
/// One letter per storage kind, as written in the file. Lowercase tags are
/// the array forms of their uppercase scalar counterparts; `b` and `c`
/// (bool/byte arrays) are recognized but their element decoding is not
/// implemented. Tags outside the alphabet are carried as [`Unknown`] so
/// diagnostics can name them.
///
/// [`Unknown`]: PropertyKind::Unknown
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// 'C' - boolean, 1 byte
    Bool,
    /// 'Y' - 16-bit signed integer
    Int16,
    /// 'I' - 32-bit signed integer
    Int32,
    /// 'L' - 64-bit signed integer
    Int64,
    /// 'F' - 32-bit float
    Float32,
    /// 'D' - 64-bit float
    Float64,
    /// 'S' - UTF-8 string
    String,
    /// 'R' - raw byte string
    Raw,
    /// 'd' - array of 64-bit floats
    ArrayFloat64,
    /// 'f' - array of 32-bit floats
    ArrayFloat32,
    /// 'i' - array of 32-bit signed integers
    ArrayInt32,
    /// 'l' - array of 64-bit signed integers
    ArrayInt64,
    /// 'b' - array of booleans (decoding unimplemented)
    ArrayBool,
    /// 'c' - array of bytes (decoding unimplemented)
    ArrayByte,
    /// Tag not in the known alphabet, carried for diagnostics
    Unknown(u8),
}

impl PropertyKind {
    /// Map a raw tag byte to its kind.
    pub const fn from_tag(tag: u8) -> Self {
        match tag {
            b'C' => Self::Bool,
            b'Y' => Self::Int16,
            b'I' => Self::Int32,
            b'L' => Self::Int64,
            b'F' => Self::Float32,
            b'D' => Self::Float64,
            b'S' => Self::String,
            b'R' => Self::Raw,
            b'd' => Self::ArrayFloat64,
            b'f' => Self::ArrayFloat32,
            b'i' => Self::ArrayInt32,
            b'l' => Self::ArrayInt64,
            b'b' => Self::ArrayBool,
            b'c' => Self::ArrayByte,
            other => Self::Unknown(other),
        }
    }

    /// The tag byte this kind is written as.
    pub const fn tag(self) -> u8 {
        match self {
            Self::Bool => b'C',
            Self::Int16 => b'Y',
            Self::Int32 => b'I',
            Self::Int64 => b'L',
            Self::Float32 => b'F',
            Self::Float64 => b'D',
            Self::String => b'S',
            Self::Raw => b'R',
            Self::ArrayFloat64 => b'd',
            Self::ArrayFloat32 => b'f',
            Self::ArrayInt32 => b'i',
            Self::ArrayInt64 => b'l',
            Self::ArrayBool => b'b',
            Self::ArrayByte => b'c',
            Self::Unknown(t) => t,
        }
    }

    /// Fixed byte width of one element of this kind.
    ///
    /// Strings, raw byte strings and unknown tags have no fixed width and
    /// report 0.
    pub const fn elem_size(self) -> usize {
        match self {
            Self::Bool | Self::ArrayBool | Self::ArrayByte => 1,
            Self::Int16 => 2,
            Self::Int32 | Self::Float32 | Self::ArrayInt32 | Self::ArrayFloat32 => 4,
            Self::Int64 | Self::Float64 | Self::ArrayInt64 | Self::ArrayFloat64 => 8,
            Self::String | Self::Raw | Self::Unknown(_) => 0,
        }
    }

    /// True exactly for the four decodable numeric array tags.
    ///
    /// Bool and byte arrays are array-shaped in the file but excluded from
    /// the supported-decode set.
    pub const fn is_array(self) -> bool {
        matches!(
            self,
            Self::ArrayFloat64 | Self::ArrayFloat32 | Self::ArrayInt32 | Self::ArrayInt64
        )
    }

    /// Human-readable kind name for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::Raw => "raw",
            Self::ArrayFloat64 => "float64 array",
            Self::ArrayFloat32 => "float32 array",
            Self::ArrayInt32 => "int32 array",
            Self::ArrayInt64 => "int64 array",
            Self::ArrayBool => "bool array",
            Self::ArrayByte => "byte array",
            Self::Unknown(_) => "unknown",
        }
    }
}

/// One typed value attached to an element.
///
/// Created once by the low-level reader, immutable thereafter. `data` holds
/// the encoded payload: raw little-endian bytes when `encoding == 0`, or a
/// zlib stream of `compressed_length` bytes otherwise. Decoding never
/// mutates the property, so repeated accessor calls yield identical results.
#[derive(Clone, Debug)]
pub struct Property {
    kind: PropertyKind,
    count: usize,
    encoding: u32,
    compressed_length: u32,
    data: Vec<u8>,
}

impl Property {
    /// Construct a property from its decoded header fields and payload.
    pub fn new(
        kind: PropertyKind,
        count: usize,
        encoding: u32,
        compressed_length: u32,
        data: Vec<u8>,
    ) -> Self {
        Self { kind, count, encoding, compressed_length, data }
    }

    /// Construct a scalar property (count 1, stored raw).
    pub fn scalar(kind: PropertyKind, data: Vec<u8>) -> Self {
        Self::new(kind, 1, 0, 0, data)
    }

    // === Convenience constructors for readers and tests ===

    /// Boolean scalar.
    pub fn boolean(v: bool) -> Self {
        Self::scalar(PropertyKind::Bool, vec![v as u8])
    }

    /// 16-bit integer scalar.
    pub fn int16(v: i16) -> Self {
        Self::scalar(PropertyKind::Int16, v.to_le_bytes().to_vec())
    }

    /// 32-bit integer scalar.
    pub fn int32(v: i32) -> Self {
        Self::scalar(PropertyKind::Int32, v.to_le_bytes().to_vec())
    }

    /// 64-bit integer scalar.
    pub fn int64(v: i64) -> Self {
        Self::scalar(PropertyKind::Int64, v.to_le_bytes().to_vec())
    }

    /// 32-bit float scalar.
    pub fn float32(v: f32) -> Self {
        Self::scalar(PropertyKind::Float32, v.to_le_bytes().to_vec())
    }

    /// 64-bit float scalar.
    pub fn float64(v: f64) -> Self {
        Self::scalar(PropertyKind::Float64, v.to_le_bytes().to_vec())
    }

    /// UTF-8 string scalar.
    pub fn string(v: impl Into<String>) -> Self {
        Self::scalar(PropertyKind::String, v.into().into_bytes())
    }

    /// Uncompressed float64 array.
    pub fn float64_array(values: &[f64]) -> Self {
        let mut data = Vec::with_capacity(values.len() * 8);
        for v in values {
            data.extend_from_slice(&v.to_le_bytes());
        }
        Self::new(PropertyKind::ArrayFloat64, values.len(), 0, 0, data)
    }

    /// Uncompressed float32 array.
    pub fn float32_array(values: &[f32]) -> Self {
        let mut data = Vec::with_capacity(values.len() * 4);
        for v in values {
            data.extend_from_slice(&v.to_le_bytes());
        }
        Self::new(PropertyKind::ArrayFloat32, values.len(), 0, 0, data)
    }

    /// Uncompressed int32 array.
    pub fn int32_array(values: &[i32]) -> Self {
        let mut data = Vec::with_capacity(values.len() * 4);
        for v in values {
            data.extend_from_slice(&v.to_le_bytes());
        }
        Self::new(PropertyKind::ArrayInt32, values.len(), 0, 0, data)
    }

    /// Uncompressed int64 array.
    pub fn int64_array(values: &[i64]) -> Self {
        let mut data = Vec::with_capacity(values.len() * 8);
        for v in values {
            data.extend_from_slice(&v.to_le_bytes());
        }
        Self::new(PropertyKind::ArrayInt64, values.len(), 0, 0, data)
    }

    // === Accessors ===

    /// The property's type tag.
    #[inline]
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    /// Declared element count (1 for scalars).
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// 0 when the payload is stored raw, nonzero when zlib-compressed.
    #[inline]
    pub fn encoding(&self) -> u32 {
        self.encoding
    }

    /// Byte length of the compressed payload when `encoding != 0`.
    #[inline]
    pub fn compressed_length(&self) -> u32 {
        self.compressed_length
    }

    /// The encoded payload bytes.
    #[inline]
    pub fn raw_data(&self) -> &[u8] {
        &self.data
    }

    // === Scalar decoding ===

    /// Decode as a boolean.
    pub fn as_bool(&self) -> Result<bool> {
        self.expect_kind(PropertyKind::Bool)?;
        self.require(1)?;
        Ok(self.data[0] != 0)
    }

    /// Decode as a 16-bit integer.
    pub fn as_i16(&self) -> Result<i16> {
        self.expect_kind(PropertyKind::Int16)?;
        self.require(2)?;
        Ok(Cursor::new(&self.data).read_i16::<LittleEndian>()?)
    }

    /// Decode as a 32-bit integer.
    pub fn as_i32(&self) -> Result<i32> {
        self.expect_kind(PropertyKind::Int32)?;
        self.require(4)?;
        Ok(Cursor::new(&self.data).read_i32::<LittleEndian>()?)
    }

    /// Decode as a 64-bit integer.
    pub fn as_i64(&self) -> Result<i64> {
        self.expect_kind(PropertyKind::Int64)?;
        self.require(8)?;
        Ok(Cursor::new(&self.data).read_i64::<LittleEndian>()?)
    }

    /// Decode as a 32-bit float.
    pub fn as_f32(&self) -> Result<f32> {
        self.expect_kind(PropertyKind::Float32)?;
        self.require(4)?;
        Ok(Cursor::new(&self.data).read_f32::<LittleEndian>()?)
    }

    /// Decode as a 64-bit float.
    pub fn as_f64(&self) -> Result<f64> {
        self.expect_kind(PropertyKind::Float64)?;
        self.require(8)?;
        Ok(Cursor::new(&self.data).read_f64::<LittleEndian>()?)
    }

    /// Decode as a UTF-8 string. Valid for both string and raw kinds.
    pub fn as_string(&self) -> Result<String> {
        match self.kind {
            PropertyKind::String | PropertyKind::Raw => {
                Ok(String::from_utf8(self.data.clone())?)
            }
            other => Err(self.type_mismatch("string", other)),
        }
    }

    /// Decode any numeric scalar kind as f64.
    ///
    /// Property blocks store vector components as whichever numeric tag the
    /// exporter chose; this accessor smooths that over.
    pub fn as_number(&self) -> Result<f64> {
        match self.kind {
            PropertyKind::Float64 => self.as_f64(),
            PropertyKind::Float32 => self.as_f32().map(f64::from),
            PropertyKind::Int64 => self.as_i64().map(|v| v as f64),
            PropertyKind::Int32 => self.as_i32().map(f64::from),
            PropertyKind::Int16 => self.as_i16().map(f64::from),
            other => Err(self.type_mismatch("numeric scalar", other)),
        }
    }

    // === Array decoding ===

    /// Decode a float64 array, decompressing if needed.
    pub fn values_f64(&self) -> Result<Vec<f64>> {
        self.expect_kind(PropertyKind::ArrayFloat64)?;
        let bytes = self.decoded_array_bytes()?;
        let mut cursor = Cursor::new(bytes.as_ref());
        let mut out = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            out.push(cursor.read_f64::<LittleEndian>()?);
        }
        Ok(out)
    }

    /// Decode a float32 array, decompressing if needed.
    pub fn values_f32(&self) -> Result<Vec<f32>> {
        self.expect_kind(PropertyKind::ArrayFloat32)?;
        let bytes = self.decoded_array_bytes()?;
        let mut cursor = Cursor::new(bytes.as_ref());
        let mut out = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            out.push(cursor.read_f32::<LittleEndian>()?);
        }
        Ok(out)
    }

    /// Decode an int32 array, decompressing if needed.
    pub fn values_i32(&self) -> Result<Vec<i32>> {
        self.expect_kind(PropertyKind::ArrayInt32)?;
        let bytes = self.decoded_array_bytes()?;
        let mut cursor = Cursor::new(bytes.as_ref());
        let mut out = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            out.push(cursor.read_i32::<LittleEndian>()?);
        }
        Ok(out)
    }

    /// Decode an int64 array, decompressing if needed.
    pub fn values_i64(&self) -> Result<Vec<i64>> {
        self.expect_kind(PropertyKind::ArrayInt64)?;
        let bytes = self.decoded_array_bytes()?;
        let mut cursor = Cursor::new(bytes.as_ref());
        let mut out = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            out.push(cursor.read_i64::<LittleEndian>()?);
        }
        Ok(out)
    }

    /// Bool array decoding is not implemented.
    pub fn values_bool(&self) -> Result<Vec<bool>> {
        self.expect_kind(PropertyKind::ArrayBool)?;
        Err(Error::UnsupportedArrayKind("bool"))
    }

    /// Byte array decoding is not implemented.
    pub fn values_bytes(&self) -> Result<Vec<u8>> {
        self.expect_kind(PropertyKind::ArrayByte)?;
        Err(Error::UnsupportedArrayKind("byte"))
    }

    // === Diagnostics ===

    /// Diagnostic text rendering of the decoded value.
    ///
    /// Never panics: array parse failures degrade to an explicit
    /// "bad format" message carrying the underlying error, and unknown tags
    /// render as an explicit unknown-type message. An empty payload renders
    /// as the empty string without invoking kind-specific decoding.
    pub fn render(&self) -> String {
        if self.data.is_empty() {
            return String::new();
        }
        match self.kind {
            PropertyKind::Bool => self.render_scalar(self.as_bool()),
            PropertyKind::Int16 => self.render_scalar(self.as_i16()),
            PropertyKind::Int32 => self.render_scalar(self.as_i32()),
            PropertyKind::Int64 => self.render_scalar(self.as_i64()),
            PropertyKind::Float32 => self.render_scalar(self.as_f32()),
            PropertyKind::Float64 => self.render_scalar(self.as_f64()),
            PropertyKind::String | PropertyKind::Raw => {
                String::from_utf8_lossy(&self.data).into_owned()
            }
            PropertyKind::ArrayFloat64 => self.render_array(self.values_f64()),
            PropertyKind::ArrayFloat32 => self.render_array(self.values_f32()),
            PropertyKind::ArrayInt32 => self.render_array(self.values_i32()),
            PropertyKind::ArrayInt64 => self.render_array(self.values_i64()),
            PropertyKind::ArrayBool => "bool array not implemented".into(),
            PropertyKind::ArrayByte => "byte array not implemented".into(),
            PropertyKind::Unknown(tag) => {
                format!("unknown property type '{}'", tag as char)
            }
        }
    }

    fn render_scalar<T: std::fmt::Display>(&self, value: Result<T>) -> String {
        match value {
            Ok(v) => v.to_string(),
            Err(e) => format!("bad format {}: {}", self.kind.name(), e),
        }
    }

    fn render_array<T: std::fmt::Debug>(&self, values: Result<Vec<T>>) -> String {
        match values {
            Ok(v) => format!("{v:?}"),
            Err(e) => format!("bad format {}: {}", self.kind.name(), e),
        }
    }

    // === Internals ===

    fn expect_kind(&self, kind: PropertyKind) -> Result<()> {
        if self.kind == kind {
            Ok(())
        } else {
            Err(self.type_mismatch(kind.name(), self.kind))
        }
    }

    fn type_mismatch(&self, expected: &str, actual: PropertyKind) -> Error {
        Error::TypeMismatch {
            expected: expected.into(),
            actual: format!("{} ('{}')", actual.name(), actual.tag() as char),
        }
    }

    fn require(&self, needed: usize) -> Result<()> {
        if self.data.len() < needed {
            Err(Error::Truncated { needed, available: self.data.len() })
        } else {
            Ok(())
        }
    }

    /// Raw element bytes of an array payload: inflated when compressed,
    /// length-checked against `count * elem_size` either way.
    fn decoded_array_bytes(&self) -> Result<Cow<'_, [u8]>> {
        let expected = self.count * self.kind.elem_size();
        if self.encoding != 0 {
            let len = self.compressed_length as usize;
            self.require(len)?;
            let mut out = Vec::with_capacity(expected);
            let mut decoder = ZlibDecoder::new(&self.data[..len]);
            decoder
                .read_to_end(&mut out)
                .map_err(|e| Error::Decompress(e.to_string()))?;
            if out.len() != expected {
                return Err(Error::SizeMismatch { expected, actual: out.len() });
            }
            Ok(Cow::Owned(out))
        } else {
            if self.data.len() != expected {
                return Err(Error::SizeMismatch { expected, actual: self.data.len() });
            }
            Ok(Cow::Borrowed(&self.data[..]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn compressed_f64_array(values: &[f64]) -> Property {
        let mut raw = Vec::with_capacity(values.len() * 8);
        for v in values {
            raw.extend_from_slice(&v.to_le_bytes());
        }
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&raw).unwrap();
        let compressed = encoder.finish().unwrap();
        let len = compressed.len() as u32;
        Property::new(PropertyKind::ArrayFloat64, values.len(), 1, len, compressed)
    }

    #[test]
    fn test_tag_roundtrip() {
        for tag in [b'C', b'Y', b'I', b'L', b'F', b'D', b'S', b'R', b'd', b'f', b'i', b'l', b'b', b'c'] {
            let kind = PropertyKind::from_tag(tag);
            assert!(!matches!(kind, PropertyKind::Unknown(_)));
            assert_eq!(kind.tag(), tag);
        }
        assert_eq!(PropertyKind::from_tag(b'X'), PropertyKind::Unknown(b'X'));
    }

    #[test]
    fn test_elem_sizes() {
        assert_eq!(PropertyKind::Bool.elem_size(), 1);
        assert_eq!(PropertyKind::Int16.elem_size(), 2);
        assert_eq!(PropertyKind::Int32.elem_size(), 4);
        assert_eq!(PropertyKind::Int64.elem_size(), 8);
        assert_eq!(PropertyKind::Float32.elem_size(), 4);
        assert_eq!(PropertyKind::Float64.elem_size(), 8);
        assert_eq!(PropertyKind::ArrayFloat64.elem_size(), 8);
        assert_eq!(PropertyKind::ArrayBool.elem_size(), 1);
        assert_eq!(PropertyKind::ArrayByte.elem_size(), 1);
        assert_eq!(PropertyKind::String.elem_size(), 0);
    }

    #[test]
    fn test_is_array_only_numeric() {
        assert!(PropertyKind::ArrayFloat64.is_array());
        assert!(PropertyKind::ArrayFloat32.is_array());
        assert!(PropertyKind::ArrayInt32.is_array());
        assert!(PropertyKind::ArrayInt64.is_array());
        // Array-shaped but excluded from the supported-decode set
        assert!(!PropertyKind::ArrayBool.is_array());
        assert!(!PropertyKind::ArrayByte.is_array());
        assert!(!PropertyKind::Float64.is_array());
        assert!(!PropertyKind::Unknown(b'Q').is_array());
    }

    #[test]
    fn test_scalar_roundtrip() {
        assert!(Property::boolean(true).as_bool().unwrap());
        assert_eq!(Property::int16(-7).as_i16().unwrap(), -7);
        assert_eq!(Property::int32(123456).as_i32().unwrap(), 123456);
        assert_eq!(Property::int64(1 << 40).as_i64().unwrap(), 1 << 40);
        assert_eq!(Property::float32(1.5).as_f32().unwrap(), 1.5);
        assert_eq!(Property::float64(-2.25).as_f64().unwrap(), -2.25);
        assert_eq!(Property::string("Geometry").as_string().unwrap(), "Geometry");
    }

    #[test]
    fn test_scalar_truncated() {
        let p = Property::scalar(PropertyKind::Int64, vec![1, 2, 3]);
        assert!(matches!(p.as_i64(), Err(Error::Truncated { needed: 8, available: 3 })));
    }

    #[test]
    fn test_scalar_type_mismatch() {
        let p = Property::float64(1.0);
        assert!(matches!(p.as_i32(), Err(Error::TypeMismatch { .. })));
        assert!(matches!(p.as_string(), Err(Error::TypeMismatch { .. })));
        // as_number tolerates any numeric kind
        assert_eq!(p.as_number().unwrap(), 1.0);
        assert_eq!(Property::int32(3).as_number().unwrap(), 3.0);
    }

    #[test]
    fn test_array_roundtrip_uncompressed() {
        let doubles = [0.0, 1.5, -2.25, 1e10];
        assert_eq!(Property::float64_array(&doubles).values_f64().unwrap(), doubles);

        let ints = [0i32, -1, 7, i32::MAX];
        assert_eq!(Property::int32_array(&ints).values_i32().unwrap(), ints);

        let longs = [0i64, -1, 1 << 40];
        assert_eq!(Property::int64_array(&longs).values_i64().unwrap(), longs);

        let floats = [1.0f32, -0.5];
        assert_eq!(Property::float32_array(&floats).values_f32().unwrap(), floats);
    }

    #[test]
    fn test_array_compressed_matches_uncompressed() {
        let values: Vec<f64> = (0..256).map(|i| i as f64 * 0.5).collect();
        let compressed = compressed_f64_array(&values);
        let plain = Property::float64_array(&values);
        assert_eq!(compressed.values_f64().unwrap(), plain.values_f64().unwrap());
    }

    #[test]
    fn test_array_corrupt_compressed_payload() {
        let mut p = compressed_f64_array(&[1.0, 2.0, 3.0]);
        // Flip bytes in the middle of the zlib stream
        let mid = p.data.len() / 2;
        p.data[mid] ^= 0xff;
        p.data[mid + 1] ^= 0xff;
        let err = p.values_f64();
        assert!(matches!(err, Err(Error::Decompress(_)) | Err(Error::SizeMismatch { .. })));
    }

    #[test]
    fn test_array_count_width_mismatch() {
        // Declares 4 elements but carries only 3
        let mut p = Property::float64_array(&[1.0, 2.0, 3.0]);
        p.count = 4;
        assert!(matches!(p.values_f64(), Err(Error::SizeMismatch { expected: 32, actual: 24 })));
    }

    #[test]
    fn test_unsupported_array_kinds() {
        let p = Property::new(PropertyKind::ArrayBool, 2, 0, 0, vec![1, 0]);
        assert!(matches!(p.values_bool(), Err(Error::UnsupportedArrayKind("bool"))));
        let p = Property::new(PropertyKind::ArrayByte, 2, 0, 0, vec![1, 2]);
        assert!(matches!(p.values_bytes(), Err(Error::UnsupportedArrayKind("byte"))));
    }

    #[test]
    fn test_decode_idempotent() {
        let p = compressed_f64_array(&[3.0, 1.0, 4.0, 1.0, 5.0]);
        let first = p.values_f64().unwrap();
        let second = p.values_f64().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render() {
        assert_eq!(Property::boolean(true).render(), "true");
        assert_eq!(Property::int64(42).render(), "42");
        assert_eq!(Property::string("Mesh").render(), "Mesh");
        assert_eq!(Property::float64_array(&[1.0, 2.0]).render(), "[1.0, 2.0]");

        // Empty payload renders empty without kind-specific decoding
        assert_eq!(Property::scalar(PropertyKind::Float64, Vec::new()).render(), "");

        // Unknown tag names itself
        let p = Property::scalar(PropertyKind::Unknown(b'X'), vec![0]);
        assert_eq!(p.render(), "unknown property type 'X'");

        // Bad array payload degrades to an explicit message
        let mut bad = Property::float64_array(&[1.0]);
        bad.count = 9;
        assert!(bad.render().starts_with("bad format float64 array"));

        // Unimplemented array kinds say so instead of crashing
        let p = Property::new(PropertyKind::ArrayBool, 1, 0, 0, vec![1]);
        assert_eq!(p.render(), "bool array not implemented");
    }
}
