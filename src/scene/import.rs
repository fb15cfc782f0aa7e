//! Scene assembly from the element tree.
//!
//! Walks the document's `Objects` block into nodes, geometry buffers and
//! deformers, then wires them together from the `Connections` block and
//! runs one world-matrix pass over the finished hierarchy.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::geom::{clean_name, GeometryBuffers, TransformData};
use crate::scene::node::{Hierarchy, NodeId, NodeKind, SceneNode};
use crate::scene::skin::{Cluster, Skin, SkinId};
use crate::tree::{find_children, resolve_named_property, Element};
use crate::util::{DVec3, Error, ImportPolicy, Result, RotationOrder};

/// A reconstructed scene: the node hierarchy plus the geometry and skin
/// resources nodes refer to by index.
#[derive(Clone, Debug)]
pub struct Scene {
    pub hierarchy: Hierarchy,
    /// Synthetic root node all parentless models hang from.
    pub root: NodeId,
    pub geometries: Vec<GeometryBuffers>,
    pub skins: Vec<Skin>,
}

impl Scene {
    /// Skin by id, for nodes holding a [`SkinId`] reference.
    ///
    /// Ids are only minted during import, so lookup cannot fail.
    pub fn skin(&self, id: SkinId) -> &Skin {
        &self.skins[id.0 as usize]
    }
}

/// Reconstruct a scene graph from a parsed document root.
///
/// `policy` decides whether a malformed object aborts the import or is
/// skipped with a warning.
pub fn import_scene(document: &Element, policy: ImportPolicy) -> Result<Scene> {
    let mut importer = Importer::new(policy);
    importer.collect_objects(document)?;
    importer.wire_connections(document);
    importer.finish()
}

struct Importer {
    policy: ImportPolicy,
    hierarchy: Hierarchy,
    root: NodeId,
    geometries: Vec<GeometryBuffers>,
    skins: Vec<Skin>,
    // Object id maps; the file's id spaces for models, geometry and
    // deformers are disjoint.
    node_ids: HashMap<i64, NodeId>,
    geometry_ids: HashMap<i64, usize>,
    skin_ids: HashMap<i64, usize>,
    // Clusters stay loose until a connection claims them for a skin.
    clusters: HashMap<i64, Cluster>,
}

impl Importer {
    fn new(policy: ImportPolicy) -> Self {
        let mut hierarchy = Hierarchy::new();
        let root = hierarchy.add(SceneNode::new(0, "RootNode", NodeKind::Group));
        Self {
            policy,
            hierarchy,
            root,
            geometries: Vec::new(),
            skins: Vec::new(),
            node_ids: HashMap::new(),
            geometry_ids: HashMap::new(),
            skin_ids: HashMap::new(),
            clusters: HashMap::new(),
        }
    }

    fn collect_objects(&mut self, document: &Element) -> Result<()> {
        let Some(objects) = find_children(document, "Objects").first() else {
            return Ok(());
        };

        for child in &objects.children {
            let outcome = match child.tag.as_str() {
                "Model" => self.collect_model(child),
                "Geometry" => self.collect_geometry(child),
                "Deformer" => self.collect_deformer(child),
                _ => Ok(()),
            };
            match outcome {
                Ok(()) => {}
                Err(e) if !self.policy.is_strict() => {
                    warn!(tag = %child.tag, error = %e, "skipping malformed object");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn collect_model(&mut self, element: &Element) -> Result<()> {
        let id = element
            .property(0)
            .and_then(|p| p.as_i64().ok())
            .ok_or_else(|| Error::invalid("Model: missing object id"))?;
        let name = element
            .property(1)
            .and_then(|p| p.as_string().ok())
            .map(|s| clean_name(&s))
            .unwrap_or_default();
        let kind = match element
            .property(2)
            .and_then(|p| p.as_string().ok())
            .unwrap_or_default()
            .as_str()
        {
            "Camera" => NodeKind::PerspectiveCamera { focal_length: 50.0 },
            "CameraOrthographic" => NodeKind::OrthographicCamera,
            "LimbNode" | "Limb" => NodeKind::Bone,
            _ => NodeKind::Group,
        };

        let mut node = SceneNode::new(id, name, kind);
        node.set_local_matrix(transform_data(element)?.local_matrix());

        let node_id = self.hierarchy.add(node);
        self.node_ids.insert(id, node_id);
        Ok(())
    }

    fn collect_geometry(&mut self, element: &Element) -> Result<()> {
        let geometry = GeometryBuffers::from_element(element, self.policy)?;
        self.geometry_ids.insert(geometry.id, self.geometries.len());
        self.geometries.push(geometry);
        Ok(())
    }

    fn collect_deformer(&mut self, element: &Element) -> Result<()> {
        let id = element.property(0).and_then(|p| p.as_i64().ok()).unwrap_or(0);
        match element
            .property(2)
            .and_then(|p| p.as_string().ok())
            .unwrap_or_default()
            .as_str()
        {
            "Skin" => {
                self.skin_ids.insert(id, self.skins.len());
                self.skins.push(Skin::new(id));
            }
            "Cluster" => {
                self.clusters.insert(id, Cluster::from_element(element)?);
            }
            other => {
                debug!(deformer = other, id, "ignoring deformer sub-type");
            }
        }
        Ok(())
    }

    /// Wire object-object connections. Each phase only consumes pairs whose
    /// id spaces match it, so one linear scan per phase is enough and order
    /// inside the file does not matter.
    fn wire_connections(&mut self, document: &Element) {
        let connections: Vec<(i64, i64)> = find_children(document, "Connections")
            .first()
            .map(|block| {
                block
                    .children
                    .iter()
                    .filter(|c| c.tag == "C")
                    .filter(|c| {
                        c.property(0).and_then(|p| p.as_string().ok()).as_deref() == Some("OO")
                    })
                    .filter_map(|c| {
                        let child = c.property(1)?.as_i64().ok()?;
                        let parent = c.property(2)?.as_i64().ok()?;
                        Some((child, parent))
                    })
                    .collect()
            })
            .unwrap_or_default();

        // Model -> model parenting (parent id 0 is the document root).
        for &(child, parent) in &connections {
            if let Some(&child_node) = self.node_ids.get(&child) {
                let parent_node = if parent == 0 {
                    Some(self.root)
                } else {
                    self.node_ids.get(&parent).copied()
                };
                match parent_node {
                    Some(parent_node) => self.hierarchy.add_child(parent_node, child_node),
                    // A node-parent connection may legitimately target a
                    // deformer (bone -> cluster); only an id unknown to
                    // every object map is dangling.
                    None if !self.knows_object(parent) => {
                        warn!(child, parent, "connection names an unknown parent object");
                    }
                    None => {}
                }
            }
        }

        // Geometry -> model attachment.
        for &(child, parent) in &connections {
            if let (Some(&geometry), Some(&node)) =
                (self.geometry_ids.get(&child), self.node_ids.get(&parent))
            {
                self.hierarchy.node_mut(node).geometry = Some(geometry);
            }
        }

        // Bone model -> cluster, while clusters are still loose.
        for &(child, parent) in &connections {
            if let (Some(&bone), Some(cluster)) =
                (self.node_ids.get(&child), self.clusters.get_mut(&parent))
            {
                cluster.bone = Some(bone);
            }
        }

        // Cluster -> skin; moves the cluster into the skin's ordered list.
        for &(child, parent) in &connections {
            if let Some(&skin) = self.skin_ids.get(&parent) {
                if let Some(cluster) = self.clusters.remove(&child) {
                    self.skins[skin].push_cluster(cluster);
                }
            }
        }

        // World matrices must be current before bind matrices are captured.
        self.hierarchy.update_world(self.root, true);

        // Skin -> geometry; binds the skin to every node showing that
        // geometry, with the node's world matrix at bind time.
        for &(child, parent) in &connections {
            if let (Some(&skin), Some(&geometry)) =
                (self.skin_ids.get(&child), self.geometry_ids.get(&parent))
            {
                let ids: Vec<NodeId> = self.hierarchy.ids().collect();
                for id in ids {
                    let node = self.hierarchy.node(id);
                    if node.geometry == Some(geometry) {
                        let bind = node.matrix_world;
                        self.hierarchy.bind_skeleton(id, SkinId(skin as u32), bind);
                    }
                }
            }
        }
    }

    fn knows_object(&self, id: i64) -> bool {
        self.geometry_ids.contains_key(&id)
            || self.skin_ids.contains_key(&id)
            || self.clusters.contains_key(&id)
    }

    fn finish(mut self) -> Result<Scene> {
        if !self.clusters.is_empty() {
            let msg = format!("{} cluster(s) not connected to any skin", self.clusters.len());
            if self.policy.is_strict() {
                return Err(Error::invalid(msg));
            }
            warn!("{msg}");
        }
        self.hierarchy.update_world(self.root, true);

        // Models that never got a parent connection sit outside the root's
        // subtree; walk each as its own root so their world matrices are
        // still current (world = local for a parentless node).
        let detached: Vec<NodeId> = self
            .hierarchy
            .ids()
            .filter(|&id| id != self.root && self.hierarchy.node(id).parent.is_none())
            .collect();
        for id in detached {
            let node = self.hierarchy.node(id);
            warn!(id = node.id, name = %node.name, "model not connected to the scene root");
            self.hierarchy.update_world(id, true);
        }
        Ok(Scene {
            hierarchy: self.hierarchy,
            root: self.root,
            geometries: self.geometries,
            skins: self.skins,
        })
    }
}

/// Read a model's transform parameters from its property block.
pub fn transform_data(element: &Element) -> Result<TransformData> {
    Ok(TransformData {
        translation: named_vec3(element, "Lcl Translation"),
        rotation: named_vec3(element, "Lcl Rotation"),
        scale: named_vec3(element, "Lcl Scaling"),
        pre_rotation: named_vec3(element, "PreRotation"),
        post_rotation: named_vec3(element, "PostRotation"),
        rotation_offset: named_vec3(element, "RotationOffset"),
        rotation_order: resolve_named_property(element, "RotationOrder")
            .and_then(|e| e.property(4))
            .and_then(|p| p.as_number().ok())
            .and_then(|v| RotationOrder::from_index(v as i32)),
    })
}

/// A `Properties70` entry holds `[name, type, label, flags, x, y, z]`;
/// the vector components start at index 4.
fn named_vec3(element: &Element, name: &str) -> Option<DVec3> {
    let entry = resolve_named_property(element, name)?;
    let x = entry.property(4)?.as_number().ok()?;
    let y = entry.property(5)?.as_number().ok()?;
    let z = entry.property(6)?.as_number().ok()?;
    Some(DVec3::new(x, y, z))
}
