//! Scene graph: node hierarchy, deformers and assembly.
//!
//! - [`Hierarchy`] / [`SceneNode`] - arena-based transformable node tree
//! - [`Skin`] / [`Cluster`] - bone binding records
//! - [`import_scene`] - element tree to [`Scene`] reconstruction

mod animation;
mod import;
mod node;
mod skin;

pub use animation::Animation;
pub use import::{import_scene, transform_data, Scene};
pub use node::{Hierarchy, NodeId, NodeKind, SceneNode};
pub use skin::{Cluster, Skin, SkinId};
