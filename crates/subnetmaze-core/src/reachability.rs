//! Per-tick reachability classification and connectivity lines.
//!
//! One pass in node-creation order decides every node's class and, in the
//! same sweep, the ordered line list the pool mirrors. Creation order is
//! the contract: line `i` always belongs to the `i`-th reachable
//! non-current node, so pool slots stay stable between ticks. Running the
//! pass twice with identical inputs yields identical output, and nothing
//! outside the returned report is touched.

use serde::{Deserialize, Serialize};
use subnetmaze_logic::geometry::Vec3;
use subnetmaze_logic::mask;

use crate::store::{NodeId, NodeStore};

/// Visual classification of a node relative to the current location.
///
/// Exactly one node is `Current` per pass; `Current` wins over the
/// trivial fact that a node reaches itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeClass {
    Current,
    Reachable,
    Unreachable,
}

/// RGBA color a renderer paints a node, by classification.
pub fn class_color(class: NodeClass) -> [f32; 4] {
    match class {
        NodeClass::Current => [0.0, 1.0, 0.0, 1.0],
        NodeClass::Reachable => [0.0, 1.0, 1.0, 1.0],
        NodeClass::Unreachable => [0.2, 0.2, 0.2, 0.3],
    }
}

/// One connectivity line from the avatar to a reachable node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionLine {
    pub start: Vec3,
    pub end: Vec3,
}

/// Output of one reachability pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReachabilityReport {
    /// One class per node, indexed by [`NodeId`] in creation order.
    pub classes: Vec<NodeClass>,
    /// Lines for every reachable non-current node, in creation order;
    /// index `i` is pool slot `i`.
    pub lines: Vec<ConnectionLine>,
}

impl ReachabilityReport {
    pub fn class_of(&self, id: NodeId) -> Option<NodeClass> {
        self.classes.get(id).copied()
    }

    /// Count of nodes classified `Reachable`.
    pub fn reachable_count(&self) -> usize {
        self.lines.len()
    }
}

/// Classify every node against the current location under the mask.
///
/// `origin` anchors the line starts — the simulation passes the avatar's
/// interpolated position so lines track it during transit; tests may pass
/// the current node's own position.
pub fn compute(
    store: &NodeStore,
    current: NodeId,
    origin: Vec3,
    prefix_len: u8,
) -> ReachabilityReport {
    let current_ip = store.get(current).map(|n| n.ip).unwrap_or(0);
    let mut report = ReachabilityReport {
        classes: Vec::with_capacity(store.len()),
        lines: Vec::new(),
    };

    for node in store.nodes() {
        let is_current = node.id == current;
        let is_reachable = mask::reachable(current_ip, node.ip, prefix_len);

        let class = if is_current {
            NodeClass::Current
        } else if is_reachable {
            NodeClass::Reachable
        } else {
            NodeClass::Unreachable
        };
        report.classes.push(class);

        if !is_current && is_reachable {
            report.lines.push(ConnectionLine {
                start: origin,
                end: node.position,
            });
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use subnetmaze_logic::config::NetworkConfig;

    use crate::generator;

    fn small_store() -> NodeStore {
        generator::generate(&NetworkConfig {
            max_depth: 2,
            branching_factor: 2,
            ..NetworkConfig::default()
        })
    }

    #[test]
    fn classification_is_a_partition() {
        let store = small_store();
        let report = compute(&store, 0, Vec3::ZERO, 8);
        assert_eq!(report.classes.len(), store.len());
        let current = report
            .classes
            .iter()
            .filter(|&&c| c == NodeClass::Current)
            .count();
        assert_eq!(current, 1);
        assert_eq!(report.class_of(0), Some(NodeClass::Current));
    }

    #[test]
    fn line_count_matches_reachable_count() {
        let store = small_store();
        for prefix in [0u8, 8, 16, 24, 32] {
            let report = compute(&store, 0, Vec3::ZERO, prefix);
            let reachable = report
                .classes
                .iter()
                .filter(|&&c| c == NodeClass::Reachable)
                .count();
            assert_eq!(report.lines.len(), reachable, "prefix {prefix}");
            assert!(report.lines.len() <= store.len() - 1);
        }
    }

    #[test]
    fn prefix_zero_reaches_all_but_current() {
        let store = small_store();
        let report = compute(&store, 0, Vec3::ZERO, 0);
        assert_eq!(report.lines.len(), store.len() - 1);
    }

    #[test]
    fn prefix_32_reaches_nothing_else() {
        // All generated addresses are distinct, so /32 isolates the
        // current node.
        let store = small_store();
        let report = compute(&store, 0, Vec3::ZERO, 32);
        assert!(report.lines.is_empty());
        for (id, class) in report.classes.iter().enumerate() {
            if id == 0 {
                assert_eq!(*class, NodeClass::Current);
            } else {
                assert_eq!(*class, NodeClass::Unreachable);
            }
        }
    }

    #[test]
    fn lines_follow_creation_order() {
        let store = small_store();
        let report = compute(&store, 0, Vec3::ZERO, 0);
        let expected: Vec<Vec3> = store
            .nodes()
            .iter()
            .filter(|n| n.id != 0)
            .map(|n| n.position)
            .collect();
        let got: Vec<Vec3> = report.lines.iter().map(|l| l.end).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn lines_start_at_the_given_origin() {
        let store = small_store();
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let report = compute(&store, 0, origin, 0);
        assert!(report.lines.iter().all(|l| l.start == origin));
    }

    #[test]
    fn identical_inputs_identical_output() {
        let store = small_store();
        let a = compute(&store, 3, Vec3::new(0.5, 1.5, 0.0), 16);
        let b = compute(&store, 3, Vec3::new(0.5, 1.5, 0.0), 16);
        assert_eq!(a, b);
    }

    #[test]
    fn current_wins_over_self_reachability() {
        let store = small_store();
        let report = compute(&store, 2, Vec3::ZERO, 0);
        assert_eq!(report.class_of(2), Some(NodeClass::Current));
    }

    #[test]
    fn colors_are_distinct_per_class() {
        let colors = [
            class_color(NodeClass::Current),
            class_color(NodeClass::Reachable),
            class_color(NodeClass::Unreachable),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }
}
