//! Back-references from layer ids to live manipulation-surface nodes.
//!
//! The registry only reaches into nodes to apply follow-up commands after a
//! commit. Layer data always comes from the committed [`LayerCollection`](crate::LayerCollection).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::LayerId;

/// A node on the manipulation surface.
pub trait SurfaceNode {
    /// Fold a committed scale into the node: set its size and reset both
    /// scale factors to 1 so the next gesture starts from an unscaled node.
    fn absorb_scale(&mut self, width: f64, height: f64);
}

/// Follow-up work for the surface after a commit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum SurfaceCommand {
    /// Reset the node's scale to 1 and give it the committed size.
    AbsorbScale {
        /// Node to update.
        id: LayerId,
        /// Committed width.
        width: f64,
        /// Committed height.
        height: f64,
    },
}

/// Id to node lookup for live surface nodes.
#[derive(Debug)]
pub struct NodeRegistry<N> {
    nodes: HashMap<LayerId, N>,
}

impl<N> Default for NodeRegistry<N> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }
}

impl<N: SurfaceNode> NodeRegistry<N> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the node rendered for `id`.
    pub fn register(&mut self, id: LayerId, node: N) {
        self.nodes.insert(id, node);
    }

    /// Forget the node for `id`.
    pub fn unregister(&mut self, id: LayerId) -> Option<N> {
        self.nodes.remove(&id)
    }

    /// The node for `id`.
    #[must_use]
    pub fn get(&self, id: LayerId) -> Option<&N> {
        self.nodes.get(&id)
    }

    /// Apply a command. Returns false when no node is registered for it.
    pub fn apply(&mut self, command: &SurfaceCommand) -> bool {
        match *command {
            SurfaceCommand::AbsorbScale { id, width, height } => {
                let Some(node) = self.nodes.get_mut(&id) else {
                    tracing::debug!(layer_id = %id, "No surface node for scale reset");
                    return false;
                };
                node.absorb_scale(width, height);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct FakeNode {
        width: f64,
        height: f64,
        scale_x: f64,
        scale_y: f64,
    }

    impl SurfaceNode for FakeNode {
        fn absorb_scale(&mut self, width: f64, height: f64) {
            self.width = width;
            self.height = height;
            self.scale_x = 1.0;
            self.scale_y = 1.0;
        }
    }

    #[test]
    fn test_apply_resets_registered_node() {
        let id = LayerId::new();
        let mut registry = NodeRegistry::new();
        registry.register(
            id,
            FakeNode {
                width: 100.0,
                height: 50.0,
                scale_x: 2.0,
                scale_y: 0.1,
            },
        );

        let applied = registry.apply(&SurfaceCommand::AbsorbScale {
            id,
            width: 200.0,
            height: 20.0,
        });
        assert!(applied);
        let node = registry.get(id).expect("registered");
        assert!((node.width - 200.0).abs() < f64::EPSILON);
        assert!((node.scale_x - 1.0).abs() < f64::EPSILON);
        assert!((node.scale_y - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_without_node_reports_false() {
        let mut registry: NodeRegistry<FakeNode> = NodeRegistry::new();
        let id = LayerId::new();
        assert!(!registry.apply(&SurfaceCommand::AbsorbScale {
            id,
            width: 1.0,
            height: 1.0
        }));
        registry.register(id, FakeNode::default());
        assert!(registry.unregister(id).is_some());
        assert!(registry.get(id).is_none());
    }
}
