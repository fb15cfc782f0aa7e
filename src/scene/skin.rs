//! Skin deformers and their clusters.
//!
//! A skin owns an ordered list of clusters; each cluster binds one bone
//! node to a subset of a geometry's control points with weights and a
//! bind-pose transform. Construction only decodes the element data — bone
//! references are wired afterwards by the import layer.

use crate::scene::node::NodeId;
use crate::tree::{find_single_child_property, Element};
use crate::util::{DMat4, Error, Result};

/// Index of a skin inside its owning [`Scene`](crate::scene::Scene).
///
/// Nodes reference skins by this id rather than owning them; several nodes
/// may share one skin. Ids are only minted by the import layer, so holders
/// of a `SkinId` can always resolve it against its scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SkinId(pub(crate) u32);

/// One bone's binding record inside a skin.
#[derive(Clone, Debug, Default)]
pub struct Cluster {
    /// Source object id of the deformer element.
    pub id: i64,
    /// The bone node deforming these control points; wired by the import
    /// layer from object connections.
    pub bone: Option<NodeId>,
    /// Control point indices of the deformed geometry.
    pub indices: Vec<i32>,
    /// Per-point weights, parallel to `indices`.
    pub weights: Vec<f64>,
    /// Bind-pose transform of the deformed geometry.
    pub transform: DMat4,
    /// Bind-pose transform of the bone.
    pub transform_link: DMat4,
}

impl Cluster {
    /// Decode a `Deformer` element of sub-type `Cluster`.
    pub fn from_element(element: &Element) -> Result<Self> {
        let id = element.property(0).and_then(|p| p.as_i64().ok()).unwrap_or(0);
        let indices = find_single_child_property(element, "Indexes")
            .map(|p| p.values_i32())
            .transpose()?
            .unwrap_or_default();
        let weights = find_single_child_property(element, "Weights")
            .map(|p| p.values_f64())
            .transpose()?
            .unwrap_or_default();
        if indices.len() != weights.len() {
            return Err(Error::invalid(format!(
                "cluster {id}: {} indices but {} weights",
                indices.len(),
                weights.len()
            )));
        }
        let transform = matrix_child(element, "Transform")?;
        let transform_link = matrix_child(element, "TransformLink")?;

        Ok(Self { id, bone: None, indices, weights, transform, transform_link })
    }
}

fn matrix_child(element: &Element, tag: &str) -> Result<DMat4> {
    let Some(prop) = find_single_child_property(element, tag) else {
        return Ok(DMat4::IDENTITY);
    };
    let values = prop.values_f64()?;
    let cols: [f64; 16] = values
        .as_slice()
        .try_into()
        .map_err(|_| Error::invalid(format!("{tag}: expected 16 matrix values, got {}", values.len())))?;
    Ok(DMat4::from_cols_array(&cols))
}

/// A skin deformer: an ordered list of clusters.
#[derive(Clone, Debug, Default)]
pub struct Skin {
    /// Source object id of the deformer element.
    pub id: i64,
    clusters: Vec<Cluster>,
}

impl Skin {
    /// Create an empty skin for the given source object id.
    pub fn new(id: i64) -> Self {
        Self { id, clusters: Vec::new() }
    }

    /// Number of clusters.
    #[inline]
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Cluster at `index`, bounds-checked.
    pub fn cluster(&self, index: usize) -> Result<&Cluster> {
        self.clusters
            .get(index)
            .ok_or(Error::ClusterOutOfBounds { index, count: self.clusters.len() })
    }

    /// Mutable cluster at `index`, bounds-checked.
    pub fn cluster_mut(&mut self, index: usize) -> Result<&mut Cluster> {
        let count = self.clusters.len();
        self.clusters
            .get_mut(index)
            .ok_or(Error::ClusterOutOfBounds { index, count })
    }

    /// Append a cluster.
    pub fn push_cluster(&mut self, cluster: Cluster) {
        self.clusters.push(cluster);
    }

    /// Iterate clusters in order.
    pub fn clusters(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter()
    }
}
