//! Scene node hierarchy.
//!
//! Nodes live in an arena owned by [`Hierarchy`]; parent/child links are
//! [`NodeId`] indices, which keeps the tree cycle-free without shared
//! ownership. The variant set is closed: a node is a group, a camera or a
//! bone, and variant-specific operations on the wrong kind are reported as
//! errors rather than panics.

use crate::scene::animation::Animation;
use crate::scene::skin::SkinId;
use crate::util::{compose, decompose, DMat4, DQuat, DVec3, Error, Result};

/// Index of a node inside its owning [`Hierarchy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Closed set of node variants.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    /// Pure grouping node (also plain meshes and nulls)
    Group,
    PerspectiveCamera {
        /// Focal length in millimeters.
        focal_length: f64,
    },
    OrthographicCamera,
    /// Skeleton bone (limb)
    Bone,
}

impl NodeKind {
    /// True for either camera variant.
    #[inline]
    pub fn is_camera(&self) -> bool {
        matches!(self, Self::PerspectiveCamera { .. } | Self::OrthographicCamera)
    }
}

/// One transformable node of the scene graph.
#[derive(Clone, Debug)]
pub struct SceneNode {
    /// Source object id from the file.
    pub id: i64,
    pub name: String,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,

    pub position: DVec3,
    pub rotation: DQuat,
    pub scale: DVec3,

    /// Local transform.
    pub matrix: DMat4,
    /// Transform relative to the scene root.
    pub matrix_world: DMat4,
    pub needs_world_update: bool,
    /// Recompose `matrix` from TRS state on every world update pass.
    pub auto_update_matrix: bool,

    /// Geometry attached to this node, as an index into the owning scene's
    /// geometry list.
    pub geometry: Option<usize>,
    /// Bound skin, if this node is deformed.
    pub skeleton: Option<SkinId>,
    /// World transform of the node at bind time.
    pub bind_matrix: DMat4,

    pub animations: Vec<Animation>,
}

impl SceneNode {
    /// Create a node with identity transform state.
    pub fn new(id: i64, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            parent: None,
            children: Vec::new(),
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
            scale: DVec3::ONE,
            matrix: DMat4::IDENTITY,
            matrix_world: DMat4::IDENTITY,
            needs_world_update: true,
            auto_update_matrix: true,
            geometry: None,
            skeleton: None,
            bind_matrix: DMat4::IDENTITY,
            animations: Vec::new(),
        }
    }

    /// True only for pure grouping nodes.
    #[inline]
    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group)
    }

    /// Seed TRS state and local matrix from a composed matrix.
    pub fn set_local_matrix(&mut self, matrix: DMat4) {
        self.matrix = matrix;
        let (position, rotation, scale) = decompose(&matrix);
        self.position = position;
        self.rotation = rotation;
        self.scale = scale;
        self.needs_world_update = true;
    }
}

/// Arena of scene nodes.
#[derive(Clone, Debug, Default)]
pub struct Hierarchy {
    nodes: Vec<SceneNode>,
}

impl Hierarchy {
    /// Create an empty hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate all node ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Add a node, returning its id.
    pub fn add(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Borrow a node. Ids are only minted by [`add`](Self::add), so lookup
    /// cannot fail.
    #[inline]
    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.index()]
    }

    /// Mutably borrow a node.
    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.index()]
    }

    /// Attach `child` under `parent`.
    ///
    /// A node has exactly one parent: reparenting silently replaces the
    /// previous link (and removes the stale forward link from the old
    /// parent). Callers that need the old placement must detach explicitly
    /// beforehand.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old_parent) = self.nodes[child.index()].parent {
            let siblings = &mut self.nodes[old_parent.index()].children;
            siblings.retain(|&c| c != child);
        }
        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[child.index()].needs_world_update = true;
    }

    /// Recompose a node's local matrix from its TRS state.
    pub fn update_matrix(&mut self, id: NodeId) {
        let node = &mut self.nodes[id.index()];
        node.matrix = compose(node.position, node.rotation, node.scale);
        node.needs_world_update = true;
    }

    /// Recompute world matrices for `root` and its whole subtree.
    ///
    /// A node recomputes when dirty or forced; once it does, every
    /// descendant is forced too, so any ancestor change propagates all the
    /// way down. World composition is always `parent_world * local`, never
    /// the node's previous world matrix.
    pub fn update_world(&mut self, root: NodeId, force: bool) {
        let i = root.index();
        if self.nodes[i].auto_update_matrix {
            let node = &mut self.nodes[i];
            node.matrix = compose(node.position, node.rotation, node.scale);
        }

        let mut force = force;
        if self.nodes[i].needs_world_update || force {
            self.nodes[i].matrix_world = match self.nodes[i].parent {
                None => self.nodes[i].matrix,
                Some(p) => self.nodes[p.index()].matrix_world * self.nodes[i].matrix,
            };
            self.nodes[i].needs_world_update = false;
            force = true;
        }

        let children = self.nodes[i].children.clone();
        for child in children {
            self.update_world(child, force);
        }
    }

    /// Pre-multiply a node's local matrix and re-derive its TRS state.
    pub fn apply_matrix(&mut self, id: NodeId, m: DMat4) {
        let node = &mut self.nodes[id.index()];
        node.matrix = m * node.matrix;
        let (position, rotation, scale) = decompose(&node.matrix);
        node.position = position;
        node.rotation = rotation;
        node.scale = scale;
        node.needs_world_update = true;
    }

    /// Set the focal length of a perspective camera node.
    ///
    /// Calling this on any other variant is a logic error reported as
    /// [`Error::UnsupportedOperation`].
    pub fn set_focal_length(&mut self, id: NodeId, value: f64) -> Result<()> {
        let node = &mut self.nodes[id.index()];
        match &mut node.kind {
            NodeKind::PerspectiveCamera { focal_length } => {
                *focal_length = value;
                Ok(())
            }
            _ => Err(Error::UnsupportedOperation(format!(
                "set_focal_length on non-camera node '{}'",
                node.name
            ))),
        }
    }

    /// Bind a skin to a node.
    pub fn bind_skeleton(&mut self, id: NodeId, skin: SkinId, bind_matrix: DMat4) {
        let node = &mut self.nodes[id.index()];
        node.skeleton = Some(skin);
        node.bind_matrix = bind_matrix;
    }

    /// Deep-copy a subtree into the arena, returning the copied root.
    ///
    /// Children are copied recursively and re-parented under the copy;
    /// animation lists are cloned, never shared. Camera variants are not
    /// copyable and abort the whole copy with [`Error::NotCopyable`]. The
    /// whole subtree is scanned before any node is allocated, so a rejected
    /// copy leaves the arena untouched.
    pub fn copy_subtree(&mut self, id: NodeId) -> Result<NodeId> {
        if let Some(camera) = self.find_camera(id) {
            return Err(Error::NotCopyable(self.node(camera).name.clone()));
        }
        Ok(self.copy_scanned_subtree(id))
    }

    fn find_camera(&self, id: NodeId) -> Option<NodeId> {
        if self.node(id).kind.is_camera() {
            return Some(id);
        }
        self.node(id).children.iter().find_map(|&child| self.find_camera(child))
    }

    fn copy_scanned_subtree(&mut self, id: NodeId) -> NodeId {
        let mut copy = self.nodes[id.index()].clone();
        copy.parent = None;
        copy.children = Vec::new();
        let copy_id = self.add(copy);

        let children = self.nodes[id.index()].children.clone();
        for child in children {
            let child_copy = self.copy_scanned_subtree(child);
            self.add_child(copy_id, child_copy);
        }
        copy_id
    }

    /// Depth-first search for a node by name.
    pub fn find_by_name(&self, root: NodeId, name: &str) -> Option<NodeId> {
        if self.node(root).name == name {
            return Some(root);
        }
        self.node(root)
            .children
            .iter()
            .find_map(|&child| self.find_by_name(child, name))
    }
}
