//! Deterministic tree topology generation.
//!
//! Depth-first growth: the root sits at the origin with the seed address,
//! and every node above the depth limit fans `branching_factor` children
//! about its own incoming direction. A child claims the address octet at
//! its depth, so shared address prefixes mirror shared ancestry — which is
//! what makes the mask puzzle solvable.

use log::warn;
use subnetmaze_logic::address;
use subnetmaze_logic::config::NetworkConfig;
use subnetmaze_logic::geometry::{self, Vec3};

use crate::store::{NodeId, NodeStore};

/// Deepest level an address can encode — one octet per level below the
/// root.
const MAX_ADDRESS_DEPTH: i32 = 3;

/// Build the session topology described by `config`.
///
/// Same config, same topology: there is no randomness here, and tests rely
/// on reproducible node ids, addresses, and positions. Degenerate shape
/// parameters are recovered by producing a root-only topology.
pub fn generate(config: &NetworkConfig) -> NodeStore {
    let mut store = NodeStore::new();
    let root = store.insert(
        config.root_address.trim().to_string(),
        Vec3::ZERO,
        0,
        None,
    );

    if config.branching_factor <= 0 || config.max_depth < 0 {
        warn!(
            "degenerate topology parameters (branching_factor={}, max_depth={}); keeping root only",
            config.branching_factor, config.max_depth
        );
        return store;
    }

    let max_depth = if config.max_depth > MAX_ADDRESS_DEPTH {
        warn!(
            "max_depth {} exceeds the four-octet address space; clamping to {}",
            config.max_depth, MAX_ADDRESS_DEPTH
        );
        MAX_ADDRESS_DEPTH
    } else {
        config.max_depth
    };

    grow_branch(&mut store, root, 1, Vec3::FORWARD, max_depth, config);
    store
}

/// Spawn the children of `parent` and recurse; `depth` is the level the
/// children land on.
fn grow_branch(
    store: &mut NodeStore,
    parent: NodeId,
    depth: i32,
    direction: Vec3,
    max_depth: i32,
    config: &NetworkConfig,
) {
    if depth > max_depth {
        return;
    }
    let (parent_position, parent_address) = match store.get(parent) {
        Some(node) => (node.position, node.address.clone()),
        None => return,
    };

    for i in 0..config.branching_factor {
        let branch_dir = geometry::branch_direction(
            direction,
            i,
            config.branching_factor,
            config.spread_angle,
        );
        let position = parent_position + branch_dir * config.level_distance;
        let child_text = address::child_address(&parent_address, depth as usize, i as u32);

        let child = store.insert(child_text, position, depth, Some(parent));
        grow_branch(store, child, depth + 1, branch_dir, max_depth, config);
    }
}
