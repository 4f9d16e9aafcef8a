use foundation::arena::Arena;
use foundation::color::Rgb;
use foundation::ids::ObjectId;

use crate::components::{Material, Shape, Transform, WorldTransform};
use crate::entity::NodeId;
use crate::resources::{GeometryId, MaterialId, ResourceCounts, ResourceRegistry};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NodeRole {
    Body,
    Outline,
    Label,
    Floor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub role: NodeRole,
    pub transform: Transform,
    pub geometry: Option<GeometryId>,
    pub material: Option<MaterialId>,
    /// Whether ray picking may hit this node.
    pub raycast: bool,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub visible: bool,
    /// Placed object this renderable belongs to.
    pub owner: Option<ObjectId>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(role: NodeRole, transform: Transform) -> Self {
        Self {
            role,
            transform,
            geometry: None,
            material: None,
            raycast: true,
            cast_shadow: false,
            receive_shadow: false,
            visible: true,
            owner: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Scene graph plus the resources its nodes reference.
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Arena<Node>,
    roots: Vec<NodeId>,
    resources: ResourceRegistry,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level node.
    pub fn spawn(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.insert(Node {
            parent: None,
            children: Vec::new(),
            ..node
        }));
        self.roots.push(id);
        id
    }

    /// Adds `node` under `parent`. Returns `None` if the parent is gone.
    pub fn add_child(&mut self, parent: NodeId, node: Node) -> Option<NodeId> {
        if !self.nodes.contains(parent.0) {
            return None;
        }
        let id = NodeId(self.nodes.insert(Node {
            parent: Some(parent),
            children: Vec::new(),
            ..node
        }));
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.push(id);
        }
        Some(id)
    }

    /// Removes `id` and its subtree, releasing every geometry and material
    /// they referenced. Returns the number of nodes removed.
    pub fn despawn(&mut self, id: NodeId) -> usize {
        let Some(parent) = self.nodes.get(id.0).map(|n| n.parent) else {
            return 0;
        };
        match parent {
            Some(p) => {
                if let Some(p) = self.nodes.get_mut(p.0) {
                    p.children.retain(|c| *c != id);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }

        let mut removed = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(node) = self.nodes.remove(next.0) else {
                continue;
            };
            removed += 1;
            if let Some(g) = node.geometry {
                self.resources.release_geometry(g);
            }
            if let Some(m) = node.material {
                self.resources.release_material(m);
            }
            stack.extend(node.children);
        }
        removed
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(id.0)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children()).unwrap_or(&[])
    }

    /// Node followed by its descendants, depth first.
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(node) = self.node(next) else { continue };
            out.push(next);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Walks up the parent chain until reaching a root.
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        loop {
            let node = self.node(current)?;
            match node.parent {
                Some(p) => current = p,
                None => return Some(current),
            }
        }
    }

    pub fn world_transform(&self, id: NodeId) -> Option<WorldTransform> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            let node = self.node(c)?;
            chain.push(node.transform);
            current = node.parent;
        }
        Some(
            chain
                .iter()
                .rev()
                .fold(WorldTransform::IDENTITY, |acc, t| acc.then(t)),
        )
    }

    pub fn set_transform(&mut self, id: NodeId, transform: Transform) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.transform = transform;
                true
            }
            None => false,
        }
    }

    /// Points the node at a new geometry, releasing the superseded one.
    pub fn set_geometry(&mut self, id: NodeId, shape: Shape) -> bool {
        if !self.contains(id) {
            return false;
        }
        let new_id = self.resources.add_geometry(shape);
        let old = self
            .node_mut(id)
            .and_then(|n| n.geometry.replace(new_id));
        if let Some(old) = old {
            self.resources.release_geometry(old);
        }
        true
    }

    /// Points the node at a new material, releasing the superseded one.
    pub fn set_material(&mut self, id: NodeId, material: Material) -> bool {
        if !self.contains(id) {
            return false;
        }
        let new_id = self.resources.add_material(material);
        let old = self
            .node_mut(id)
            .and_then(|n| n.material.replace(new_id));
        if let Some(old) = old {
            self.resources.release_material(old);
        }
        true
    }

    /// Recolours the node's current material in place.
    pub fn set_material_color(&mut self, id: NodeId, color: Rgb) -> bool {
        let Some(material) = self.node(id).and_then(|n| n.material) else {
            return false;
        };
        match self.resources.material_mut(material) {
            Some(m) => {
                m.color = color;
                true
            }
            None => false,
        }
    }

    pub fn material_of(&self, id: NodeId) -> Option<&Material> {
        self.resources.material(self.node(id)?.material?)
    }

    pub fn shape_of(&self, id: NodeId) -> Option<&Shape> {
        self.resources.geometry(self.node(id)?.geometry?)
    }

    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    pub fn resources_mut(&mut self) -> &mut ResourceRegistry {
        &mut self.resources
    }

    pub fn resource_counts(&self) -> ResourceCounts {
        self.resources.counts()
    }

    /// Despawns every root, leaving an empty scene.
    pub fn clear(&mut self) {
        for root in self.roots.clone() {
            self.despawn(root);
        }
    }
}
