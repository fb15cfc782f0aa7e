//! Geometry reconstruction: attribute layers, buffers and transforms.
//!
//! - [`AttributeLayer`] - per-occurrence attribute byte resolution
//! - [`GeometryBuffers`] - decoded control points, polygons and layers
//! - [`TransformData`] - the format's extended TRS local matrix composer

mod buffers;
mod layer;
mod transform;

pub use buffers::{GeometryBuffers, PolygonVertex};
pub use layer::{AttributeLayer, MappingKind, ReferenceKind};
pub use transform::TransformData;

pub(crate) use buffers::clean_name;
