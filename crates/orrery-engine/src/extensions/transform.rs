// extensions/transform.rs
//
// Parent/child hierarchy keyed by NodeId, plus each node's local transform.
// Scene nodes only hold the resulting world matrix; `propagate` writes it.

use std::collections::HashMap;
use glam::{Mat4, Quat, Vec3};
use crate::api::types::NodeId;
use crate::core::scene::Scene;

/// Translation, rotation and scale relative to the parent node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Scale, then rotate, then translate.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Debug, Clone, Default)]
struct Link {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalTransform,
}

/// Node hierarchy with local transforms.
///
/// Children keep insertion order, which is also the order motions are
/// forwarded in. World matrices are only recomputed after something changed.
#[derive(Debug, Default)]
pub struct TransformGraph {
    links: HashMap<NodeId, Link>,
    roots: Vec<NodeId>,
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` as a root with the given local transform, or replace the
    /// local transform of an existing node without touching its links.
    pub fn register_with(&mut self, id: NodeId, local: LocalTransform) {
        match self.links.get_mut(&id) {
            Some(link) => link.local = local,
            None => {
                self.links.insert(id, Link { local, ..Link::default() });
                self.roots.push(id);
            }
        }
        self.dirty = true;
    }

    /// Re-parent `child` (`None` makes it a root). Both nodes must be registered.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> bool {
        if !self.links.contains_key(&child) || parent.is_some_and(|p| !self.links.contains_key(&p)) {
            return false;
        }

        let previous = self.links.get_mut(&child).and_then(|l| l.parent.take());
        match previous {
            Some(old) => {
                if let Some(link) = self.links.get_mut(&old) {
                    link.children.retain(|&c| c != child);
                }
            }
            None => self.roots.retain(|&r| r != child),
        }

        match parent {
            Some(p) => {
                if let Some(link) = self.links.get_mut(&p) {
                    link.children.push(child);
                }
                if let Some(link) = self.links.get_mut(&child) {
                    link.parent = Some(p);
                }
            }
            None => self.roots.push(child),
        }
        self.dirty = true;
        true
    }

    pub fn get_local(&self, id: NodeId) -> Option<&LocalTransform> {
        self.links.get(&id).map(|l| &l.local)
    }

    /// Mutable local transform. Any access counts as a change.
    pub fn get_local_mut(&mut self, id: NodeId) -> Option<&mut LocalTransform> {
        let link = self.links.get_mut(&id)?;
        self.dirty = true;
        Some(&mut link.local)
    }

    pub fn get_parent(&self, id: NodeId) -> Option<NodeId> {
        self.links.get(&id)?.parent
    }

    pub fn get_children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.links.get(&id).map(|l| l.children.as_slice())
    }

    /// Drop `id` and everything below it. Returns the removed ids, `id` first.
    pub fn remove_subtree(&mut self, id: NodeId) -> Vec<NodeId> {
        if !self.links.contains_key(&id) {
            return Vec::new();
        }
        self.set_parent(id, None);
        self.roots.retain(|&r| r != id);

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(link) = self.links.remove(&next) {
                removed.push(next);
                stack.extend(link.children.iter().rev());
            }
        }
        self.dirty = true;
        removed
    }

    /// Write `SceneNode::world` for every node reachable from a root.
    pub fn propagate(&mut self, scene: &mut Scene) {
        if !self.dirty {
            return;
        }

        let mut stack: Vec<(NodeId, Mat4)> = self.roots.iter().map(|&r| (r, Mat4::IDENTITY)).collect();
        while let Some((id, parent_world)) = stack.pop() {
            let Some(link) = self.links.get(&id) else { continue };
            let world = parent_world * link.local.matrix();
            if let Some(node) = scene.get_mut(id) {
                node.world = world;
            }
            stack.extend(link.children.iter().map(|&c| (c, world)));
        }
        self.dirty = false;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
