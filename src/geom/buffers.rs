//! Geometry buffer assembly.
//!
//! Decodes a `Geometry` element into flat buffers: control points, the
//! negative-terminated polygon vertex index list, and the attribute layers
//! (normals, UVs, materials) resolved through [`AttributeLayer`].

use tracing::warn;

use crate::tree::{find_children, find_single_child_property, Element, PropertyKind};
use crate::util::{Error, ImportPolicy, Result};

use super::layer::{AttributeLayer, MappingKind, ReferenceKind};

/// One resolved polygon-vertex occurrence, carrying every index an
/// attribute layer might map by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolygonVertex {
    /// Running index over the polygon vertex list.
    pub polygon_vertex_index: usize,
    /// Index of the polygon this vertex belongs to.
    pub polygon_index: usize,
    /// Control point index.
    pub vertex_index: usize,
}

/// Flat geometry buffers decoded from a `Geometry` element.
#[derive(Clone, Debug, Default)]
pub struct GeometryBuffers {
    /// Source object id.
    pub id: i64,
    pub name: String,
    /// Control point coordinates, xyz triples.
    pub positions: Vec<f64>,
    /// Polygon vertex list in the format's negative-terminated encoding:
    /// a negative entry `i` marks the last vertex of a polygon and decodes
    /// to control point `-i - 1`.
    pub polygon_vertex_index: Vec<i32>,
    pub normals: Option<AttributeLayer>,
    pub uvs: Option<AttributeLayer>,
    pub materials: Option<AttributeLayer>,
}

impl GeometryBuffers {
    /// Decode a `Geometry` element.
    ///
    /// With [`ImportPolicy::BestEffort`] a malformed attribute layer is
    /// skipped with a warning; positions and polygon indices are always
    /// required.
    pub fn from_element(element: &Element, policy: ImportPolicy) -> Result<Self> {
        let id = element.property(0).and_then(|p| p.as_i64().ok()).unwrap_or(0);
        let name = element
            .property(1)
            .and_then(|p| p.as_string().ok())
            .map(|s| clean_name(&s))
            .unwrap_or_default();

        let positions = find_single_child_property(element, "Vertices")
            .map(|p| p.values_f64())
            .transpose()?
            .unwrap_or_default();
        let polygon_vertex_index = find_single_child_property(element, "PolygonVertexIndex")
            .map(|p| p.values_i32())
            .transpose()?
            .unwrap_or_default();

        let normals = maybe_layer(element, "LayerElementNormal", "Normals", "NormalsIndex", 3, policy)?;
        let uvs = maybe_layer(element, "LayerElementUV", "UV", "UVIndex", 2, policy)?;
        // The material layer's value array doubles as its index array; with
        // AllSame mapping and IndexToDirect reference that is exactly the
        // double indirection real files exercise.
        let materials =
            maybe_layer(element, "LayerElementMaterial", "Materials", "Materials", 1, policy)?;

        Ok(Self { id, name, positions, polygon_vertex_index, normals, uvs, materials })
    }

    /// Number of control points.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Decode the polygon vertex list into per-occurrence index triples.
    pub fn polygon_vertices(&self) -> Vec<PolygonVertex> {
        let mut out = Vec::with_capacity(self.polygon_vertex_index.len());
        let mut polygon_index = 0;
        for (polygon_vertex_index, &raw) in self.polygon_vertex_index.iter().enumerate() {
            let last_in_polygon = raw < 0;
            let vertex_index = if last_in_polygon { !raw as usize } else { raw as usize };
            out.push(PolygonVertex { polygon_vertex_index, polygon_index, vertex_index });
            if last_in_polygon {
                polygon_index += 1;
            }
        }
        out
    }

    /// Materialize one attribute value per polygon vertex.
    pub fn expand_layer(&self, layer: &AttributeLayer) -> Result<Vec<u8>> {
        let occurrences = self.polygon_vertices();
        let mut out = Vec::with_capacity(occurrences.len() * layer.elem_size);
        for pv in occurrences {
            out.extend_from_slice(layer.slice(
                pv.polygon_vertex_index,
                pv.polygon_index,
                pv.vertex_index,
            )?);
        }
        Ok(out)
    }
}

/// Strip the format's `Name\0\x01Class` suffix from object name strings.
pub(crate) fn clean_name(raw: &str) -> String {
    raw.split('\0').next().unwrap_or_default().to_string()
}

fn maybe_layer(
    geometry: &Element,
    layer_tag: &str,
    values_tag: &str,
    index_tag: &str,
    components: usize,
    policy: ImportPolicy,
) -> Result<Option<AttributeLayer>> {
    match decode_layer(geometry, layer_tag, values_tag, index_tag, components) {
        Ok(layer) => Ok(layer),
        Err(e) if !policy.is_strict() => {
            warn!(layer = layer_tag, error = %e, "skipping malformed attribute layer");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn decode_layer(
    geometry: &Element,
    layer_tag: &str,
    values_tag: &str,
    index_tag: &str,
    components: usize,
) -> Result<Option<AttributeLayer>> {
    let Some(layer) = find_children(geometry, layer_tag).first() else {
        return Ok(None);
    };

    let mapping_str = find_single_child_property(layer, "MappingInformationType")
        .and_then(|p| p.as_string().ok())
        .ok_or_else(|| Error::invalid(format!("{layer_tag}: missing MappingInformationType")))?;
    let reference_str = find_single_child_property(layer, "ReferenceInformationType")
        .and_then(|p| p.as_string().ok())
        .ok_or_else(|| Error::invalid(format!("{layer_tag}: missing ReferenceInformationType")))?;
    let mapping = MappingKind::parse(&mapping_str)?;
    let reference = ReferenceKind::parse(&reference_str)?;

    let values = find_single_child_property(layer, values_tag)
        .ok_or_else(|| Error::invalid(format!("{layer_tag}: missing {values_tag}")))?;
    let (buffer, elem_size) = match values.kind() {
        PropertyKind::ArrayFloat64 => {
            (bytemuck::cast_slice::<f64, u8>(&values.values_f64()?).to_vec(), components * 8)
        }
        PropertyKind::ArrayFloat32 => {
            (bytemuck::cast_slice::<f32, u8>(&values.values_f32()?).to_vec(), components * 4)
        }
        PropertyKind::ArrayInt32 => {
            (bytemuck::cast_slice::<i32, u8>(&values.values_i32()?).to_vec(), components * 4)
        }
        other => {
            return Err(Error::TypeMismatch {
                expected: "numeric array".into(),
                actual: format!("{} in {layer_tag}/{values_tag}", other.name()),
            })
        }
    };

    let indices = find_single_child_property(layer, index_tag)
        .filter(|p| p.kind() == PropertyKind::ArrayInt32)
        .map(|p| p.values_i32())
        .transpose()?
        .unwrap_or_default();

    Ok(Some(AttributeLayer { mapping, reference, elem_size, indices, buffer }))
}
