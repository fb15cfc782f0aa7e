//! # fbx
//!
//! Typed property decoding and scene-graph reconstruction for the FBX
//! (.fbx) binary 3D interchange format.
//!
//! FBX is a proprietary format originally developed by Kaydara and now
//! owned by Autodesk. This is an independent implementation of the import
//! core: it consumes the generic element tree a low-level file reader
//! produces (tag, children, tagged property byte spans) and rebuilds a
//! typed, navigable scene graph with resolved geometry buffers, the
//! format's extended node transforms, and skin/cluster bone bindings.
//!
//! ## Modules
//!
//! - [`util`] - Errors, import policy, math types (glam re-exports, Euler)
//! - [`tree`] - Generic element tree: typed property decoding and lookup
//! - [`geom`] - Attribute layers, geometry buffers, transform composition
//! - [`scene`] - Node hierarchy, skin bindings, scene assembly
//!
//! ## Example
//!
//! ```
//! use fbx::prelude::*;
//!
//! // The element tree normally comes from the low-level file reader.
//! let document = Element::new("Document");
//!
//! let scene = import_scene(&document, ImportPolicy::BestEffort)?;
//! for &child in &scene.hierarchy.node(scene.root).children {
//!     println!("{}", scene.hierarchy.node(child).name);
//! }
//! # Ok::<(), fbx::Error>(())
//! ```

pub mod geom;
pub mod scene;
pub mod tree;
pub mod util;

// Re-export commonly used types
pub use tree::{Element, Property, PropertyKind};
pub use util::{Error, ImportPolicy, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::geom::{
        AttributeLayer, GeometryBuffers, MappingKind, PolygonVertex, ReferenceKind, TransformData,
    };
    pub use crate::scene::{
        import_scene, Animation, Cluster, Hierarchy, NodeId, NodeKind, Scene, SceneNode, Skin,
        SkinId,
    };
    pub use crate::tree::{
        find_child_property, find_children, find_single_child_property, is_long, is_string,
        resolve_named_property, Element, Property, PropertyKind,
    };
    pub use crate::util::{Error, ImportPolicy, Result, RotationOrder};
}
