//! Scene Graph Contract
//!
//! The visual twin of each die lives in an external scene graph; the
//! tower only creates/removes nodes and overwrites their transforms
//! from post-step body state once per tick.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::quat::Quat;
use crate::core::vec3::Vec3;

/// Opaque handle to a scene node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// A scene graph hosting the visual representation of dice.
pub trait SceneGraph {
    /// Add a node to the scene.
    fn add_node(&mut self, id: NodeId);

    /// Remove a node from the scene.
    fn remove_node(&mut self, id: NodeId);

    /// Overwrite a node's transform from simulator state.
    fn set_transform(&mut self, id: NodeId, position: Vec3, orientation: Quat);
}

/// Scene graph stand-in that records the last transform per node.
///
/// Used by the demo binary and tests; a real embedding forwards these
/// calls to its renderer.
#[derive(Clone, Debug, Default)]
pub struct RecordingScene {
    nodes: BTreeMap<NodeId, Option<(Vec3, Quat)>>,
}

impl RecordingScene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a node is currently in the scene.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Last transform written for a node, if any.
    pub fn transform(&self, id: NodeId) -> Option<(Vec3, Quat)> {
        self.nodes.get(&id).copied().flatten()
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl SceneGraph for RecordingScene {
    fn add_node(&mut self, id: NodeId) {
        self.nodes.insert(id, None);
    }

    fn remove_node(&mut self, id: NodeId) {
        self.nodes.remove(&id);
    }

    fn set_transform(&mut self, id: NodeId, position: Vec3, orientation: Quat) {
        if let Some(slot) = self.nodes.get_mut(&id) {
            *slot = Some((position, orientation));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_scene_tracks_nodes() {
        let mut scene = RecordingScene::new();
        let node = NodeId(1);

        scene.add_node(node);
        assert!(scene.contains(node));
        assert_eq!(scene.transform(node), None);

        let pos = Vec3::new(1.0, 2.0, 3.0);
        scene.set_transform(node, pos, Quat::IDENTITY);
        assert_eq!(scene.transform(node), Some((pos, Quat::IDENTITY)));

        scene.remove_node(node);
        assert!(!scene.contains(node));
        assert_eq!(scene.node_count(), 0);
    }

    #[test]
    fn test_set_transform_on_missing_node_is_noop() {
        let mut scene = RecordingScene::new();
        scene.set_transform(NodeId(9), Vec3::ZERO, Quat::IDENTITY);
        assert_eq!(scene.node_count(), 0);
    }
}
