//! Attribute layer resolution.
//!
//! A geometry attribute channel (normals, UVs, materials, ...) states a
//! mapping type (which per-primitive index selects an occurrence) and a
//! reference type (direct, or indirected through an index array). Given the
//! current polygon-vertex/polygon/vertex indices, [`AttributeLayer::slice`]
//! returns the raw bytes of the selected attribute value.

use crate::util::{Error, Result};

/// Which per-geometry-primitive index selects an attribute occurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MappingKind {
    /// One value per polygon vertex ("ByPolygonVertex")
    ByPolygonVertex,
    /// One value per polygon ("ByPolygon")
    ByPolygon,
    /// One value per control point ("ByVertice"/"ByVertex")
    ByVertex,
    /// A single value for the whole geometry ("AllSame")
    AllSame,
}

impl MappingKind {
    /// Parse the format's mapping type string.
    ///
    /// Unrecognized strings are a hard error; leaving the index undefined is
    /// not an option.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "ByPolygonVertex" => Ok(Self::ByPolygonVertex),
            "ByPolygon" => Ok(Self::ByPolygon),
            "ByVertice" | "ByVertex" => Ok(Self::ByVertex),
            "AllSame" => Ok(Self::AllSame),
            other => Err(Error::UnsupportedMapping(other.into())),
        }
    }
}

/// Whether an attribute index is used directly or via a secondary index array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceKind {
    Direct,
    IndexToDirect,
}

impl ReferenceKind {
    /// Parse the format's reference type string.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "Direct" => Ok(Self::Direct),
            "IndexToDirect" | "Index" => Ok(Self::IndexToDirect),
            other => Err(Error::UnsupportedMapping(other.into())),
        }
    }
}

/// One decoded geometry attribute channel.
#[derive(Clone, Debug)]
pub struct AttributeLayer {
    pub mapping: MappingKind,
    pub reference: ReferenceKind,
    /// Byte width of one attribute value in `buffer`.
    pub elem_size: usize,
    /// Index array; required for IndexToDirect reference and AllSame mapping.
    pub indices: Vec<i32>,
    /// Flat decoded value buffer.
    pub buffer: Vec<u8>,
}

impl AttributeLayer {
    /// Number of values in the buffer.
    #[inline]
    pub fn value_count(&self) -> usize {
        if self.elem_size == 0 {
            0
        } else {
            self.buffer.len() / self.elem_size
        }
    }

    /// Raw bytes of the attribute value for one occurrence.
    ///
    /// The source index is picked by the mapping kind; with IndexToDirect it
    /// is then replaced by `indices[source_index]`. For AllSame mapping with
    /// IndexToDirect reference this makes TWO trips through the same index
    /// array (`indices[indices[0]]`) — unusual, but it is what real files
    /// do, so the double lookup is kept verbatim.
    ///
    /// Every step is bounds-checked; out-of-range indices are errors, never
    /// clamped.
    pub fn slice(
        &self,
        polygon_vertex_index: usize,
        polygon_index: usize,
        vertex_index: usize,
    ) -> Result<&[u8]> {
        let mut index = match self.mapping {
            MappingKind::ByPolygonVertex => polygon_vertex_index,
            MappingKind::ByPolygon => polygon_index,
            MappingKind::ByVertex => vertex_index,
            MappingKind::AllSame => self.index_at(0)?,
        };
        if self.reference == ReferenceKind::IndexToDirect {
            index = self.index_at(index)?;
        }

        let from = index * self.elem_size;
        let to = from + self.elem_size;
        if to > self.buffer.len() {
            return Err(Error::AttributeOutOfBounds { index, count: self.value_count() });
        }
        Ok(&self.buffer[from..to])
    }

    fn index_at(&self, at: usize) -> Result<usize> {
        let value = *self
            .indices
            .get(at)
            .ok_or(Error::AttributeOutOfBounds { index: at, count: self.indices.len() })?;
        usize::try_from(value)
            .map_err(|_| Error::invalid(format!("negative attribute index {value} at {at}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f64_buffer(values: &[f64]) -> Vec<u8> {
        bytemuck::cast_slice(values).to_vec()
    }

    fn layer(mapping: MappingKind, reference: ReferenceKind, indices: &[i32]) -> AttributeLayer {
        AttributeLayer {
            mapping,
            reference,
            elem_size: 8,
            indices: indices.to_vec(),
            buffer: f64_buffer(&[0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0]),
        }
    }

    fn value_of(bytes: &[u8]) -> f64 {
        f64::from_le_bytes(bytes.try_into().unwrap())
    }

    #[test]
    fn test_parse_kinds() {
        assert_eq!(MappingKind::parse("ByPolygonVertex").unwrap(), MappingKind::ByPolygonVertex);
        assert_eq!(MappingKind::parse("ByVertice").unwrap(), MappingKind::ByVertex);
        assert_eq!(MappingKind::parse("AllSame").unwrap(), MappingKind::AllSame);
        assert!(matches!(MappingKind::parse("ByEdge"), Err(Error::UnsupportedMapping(_))));

        assert_eq!(ReferenceKind::parse("Direct").unwrap(), ReferenceKind::Direct);
        assert_eq!(ReferenceKind::parse("Index").unwrap(), ReferenceKind::IndexToDirect);
        assert!(matches!(ReferenceKind::parse("Weird"), Err(Error::UnsupportedMapping(_))));
    }

    #[test]
    fn test_direct_mappings() {
        let l = layer(MappingKind::ByPolygonVertex, ReferenceKind::Direct, &[]);
        assert_eq!(value_of(l.slice(3, 1, 0).unwrap()), 30.0);

        let l = layer(MappingKind::ByPolygon, ReferenceKind::Direct, &[]);
        assert_eq!(value_of(l.slice(3, 1, 0).unwrap()), 10.0);

        let l = layer(MappingKind::ByVertex, ReferenceKind::Direct, &[]);
        assert_eq!(value_of(l.slice(3, 1, 7).unwrap()), 70.0);
    }

    #[test]
    fn test_index_to_direct() {
        let l = layer(MappingKind::ByPolygonVertex, ReferenceKind::IndexToDirect, &[4, 2, 0]);
        assert_eq!(value_of(l.slice(1, 0, 0).unwrap()), 20.0);
    }

    #[test]
    fn test_all_same_double_indirection() {
        // AllSame + IndexToDirect goes through the SAME index array twice:
        // indices[indices[0]] = indices[2] = 9 -> buffer value at slot 9.
        let l = layer(MappingKind::AllSame, ReferenceKind::IndexToDirect, &[2, 5, 9]);
        for (pv, p, v) in [(0, 0, 0), (17, 3, 5)] {
            assert_eq!(value_of(l.slice(pv, p, v).unwrap()), 90.0);
        }
    }

    #[test]
    fn test_out_of_bounds_is_error() {
        let l = layer(MappingKind::ByPolygonVertex, ReferenceKind::Direct, &[]);
        assert!(matches!(
            l.slice(10, 0, 0),
            Err(Error::AttributeOutOfBounds { index: 10, count: 10 })
        ));

        // Index array overrun
        let l = layer(MappingKind::ByPolygonVertex, ReferenceKind::IndexToDirect, &[0, 1]);
        assert!(matches!(l.slice(2, 0, 0), Err(Error::AttributeOutOfBounds { index: 2, count: 2 })));

        // Index array pointing past the buffer
        let l = layer(MappingKind::ByPolygonVertex, ReferenceKind::IndexToDirect, &[99]);
        assert!(matches!(l.slice(0, 0, 0), Err(Error::AttributeOutOfBounds { index: 99, .. })));

        // AllSame with an empty index array
        let l = layer(MappingKind::AllSame, ReferenceKind::Direct, &[]);
        assert!(matches!(l.slice(0, 0, 0), Err(Error::AttributeOutOfBounds { index: 0, count: 0 })));
    }

    #[test]
    fn test_negative_index_is_error() {
        let l = layer(MappingKind::ByPolygonVertex, ReferenceKind::IndexToDirect, &[-3]);
        assert!(matches!(l.slice(0, 0, 0), Err(Error::InvalidStructure(_))));
    }
}
