//! Node arena — owns every generated node for a session.
//!
//! Nodes are created once by the generator and never destroyed; ids are
//! arena indices assigned in creation order, and that order is
//! load-bearing: the reachability pass iterates it so that line-pool slot
//! assignment stays stable from tick to tick. Parent links are plain
//! optional indices, so the tree carries no ownership cycles.

use log::warn;
use serde::{Deserialize, Serialize};
use subnetmaze_logic::address;
use subnetmaze_logic::geometry::{self, Vec3};

/// Stable node identity — an index into the arena, in creation order.
pub type NodeId = usize;

/// A single addressed node in the maze.
///
/// Address, position, depth, parent, and scale are fixed at creation.
/// Visual classification is not stored here; it lives in the per-tick
/// reachability output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Dotted-decimal display form.
    pub address: String,
    /// Packed big-endian form; always the encoding of `address`, with the
    /// zero fallback applied to malformed text.
    pub ip: u32,
    pub position: Vec3,
    /// Levels below the root; also the octet index this node's branch
    /// number occupies.
    pub depth: i32,
    /// Tree link only — the arena owns the node, not the parent.
    pub parent: Option<NodeId>,
    /// Render scale hint; shrinks toward the leaves.
    pub scale: f32,
}

/// Creation-ordered arena of nodes. The first inserted node is the root.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: Vec<Node>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Insert a node, deriving its packed address from the text form so
    /// the two can never drift apart. Returns the new node's id.
    pub fn insert(
        &mut self,
        address: String,
        position: Vec3,
        depth: i32,
        parent: Option<NodeId>,
    ) -> NodeId {
        let ip = match address::encode(&address) {
            Ok(ip) => ip,
            Err(err) => {
                warn!("{err}; substituting 0.0.0.0");
                0
            }
        };
        let id = self.nodes.len();
        self.nodes.push(Node {
            id,
            address,
            ip,
            position,
            depth,
            parent,
            scale: geometry::node_scale(depth),
        });
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// The root node, if anything has been generated.
    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
