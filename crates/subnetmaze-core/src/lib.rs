//! SubnetMaze Core - Network Puzzle Simulation Engine
//!
//! A tick-driven simulation of a subnet-mask maze: a generated tree of
//! IP-addressed nodes, a widenable CIDR prefix, and a reachability
//! relation recomputed every tick that drives node coloring and pooled
//! connectivity lines.
//!
//! # Architecture
//!
//! All session state lives in one explicit [`engine::Simulation`] object —
//! nothing is looked up ambiently:
//! - **Store**: creation-ordered arena of immutable nodes
//! - **Generator**: deterministic tree growth with hierarchical addresses
//! - **Reachability**: per-tick classification and line list
//! - **Navigator**: pick resolution, move authorization, transit
//! - **Lines**: pooled render sink kept in lockstep with the line list
//!
//! # Example
//!
//! ```rust
//! use subnetmaze_core::prelude::*;
//! use subnetmaze_logic::config::NetworkConfig;
//!
//! let mut sim = Simulation::new(&NetworkConfig::default());
//!
//! // Run the session loop.
//! for _ in 0..60 {
//!     sim.update(1.0 / 60.0);
//! }
//! ```

pub mod engine;
pub mod generator;
pub mod lines;
pub mod navigator;
pub mod reachability;
pub mod store;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::engine::Simulation;
    pub use crate::navigator::{MoveOutcome, Navigator};
    pub use crate::reachability::NodeClass;
    pub use crate::store::{Node, NodeId, NodeStore};
}
