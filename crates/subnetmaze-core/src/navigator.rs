//! Move authorization and avatar transit.
//!
//! A pick is only honored when the mask in effect says the node is
//! reachable from the current location. Transit eases the avatar toward
//! the target each tick; the current-location switch happens once, on
//! arrival, so a reachability pass never observes a half-updated
//! location.

use log::debug;
use subnetmaze_logic::config::NetworkConfig;
use subnetmaze_logic::geometry::{self, Ray, Vec3};
use subnetmaze_logic::mask;

use crate::store::{NodeId, NodeStore};

/// Outcome of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Transit started toward the target.
    Accepted,
    /// Target is the current node; nothing to do.
    AlreadyCurrent,
    /// Target sits outside the masked subnet; state is unchanged.
    RejectedUnreachable,
    /// No node with that id.
    UnknownNode,
}

/// An in-flight transit toward a node.
#[derive(Debug, Clone, Copy)]
struct Transit {
    target: NodeId,
    target_position: Vec3,
}

/// Tracks the avatar: current node, interpolated position, active
/// transit.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: NodeId,
    position: Vec3,
    transit: Option<Transit>,
    move_speed: f32,
    arrive_epsilon: f32,
    hover_height: f32,
}

impl Navigator {
    /// Place the avatar hovering over the root node.
    pub fn new(store: &NodeStore, config: &NetworkConfig) -> Self {
        let (current, position) = match store.root() {
            Some(root) => (root.id, root.position + Vec3::UP * config.hover_height),
            None => (0, Vec3::ZERO),
        };
        Self {
            current,
            position,
            transit: None,
            move_speed: config.move_speed,
            arrive_epsilon: config.arrive_epsilon,
            hover_height: config.hover_height,
        }
    }

    pub fn current_node(&self) -> NodeId {
        self.current
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn in_transit(&self) -> bool {
        self.transit.is_some()
    }

    /// Resolve a pick ray to the nearest node hitbox it crosses.
    pub fn pick(store: &NodeStore, ray: &Ray) -> Option<NodeId> {
        let mut best: Option<(f32, NodeId)> = None;
        for node in store.nodes() {
            let radius = node.scale * 0.5;
            if let Some(hit) = geometry::ray_sphere_distance(ray, node.position, radius) {
                if best.map_or(true, |(closest, _)| hit < closest) {
                    best = Some((hit, node.id));
                }
            }
        }
        best.map(|(_, id)| id)
    }

    /// Ask to travel to `target`.
    ///
    /// Authorization uses the mask in effect now and the current
    /// (pre-transit) location. Rejections change nothing and surface only
    /// as the returned outcome.
    pub fn request_move(
        &mut self,
        store: &NodeStore,
        target: NodeId,
        prefix_len: u8,
    ) -> MoveOutcome {
        let Some(node) = store.get(target) else {
            return MoveOutcome::UnknownNode;
        };
        if target == self.current {
            return MoveOutcome::AlreadyCurrent;
        }
        let current_ip = store.get(self.current).map(|n| n.ip).unwrap_or(0);
        if !mask::reachable(current_ip, node.ip, prefix_len) {
            debug!(
                "move to {} rejected: outside /{} of the current node",
                node.address, prefix_len
            );
            return MoveOutcome::RejectedUnreachable;
        }
        self.transit = Some(Transit {
            target,
            target_position: node.position + Vec3::UP * self.hover_height,
        });
        MoveOutcome::Accepted
    }

    /// Advance any active transit by `dt` seconds.
    ///
    /// Eases the avatar toward the target; when it closes within the
    /// arrival epsilon the position snaps, the current node switches, and
    /// the arrived node's id is returned.
    pub fn advance(&mut self, dt: f32) -> Option<NodeId> {
        let transit = self.transit?;
        self.position = geometry::lerp(
            self.position,
            transit.target_position,
            (dt * self.move_speed).clamp(0.0, 1.0),
        );
        if self.position.distance(&transit.target_position) < self.arrive_epsilon {
            self.position = transit.target_position;
            self.current = transit.target;
            self.transit = None;
            return Some(self.current);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use subnetmaze_logic::config::NetworkConfig;

    use crate::generator;

    fn setup(prefix: u8) -> (NodeStore, Navigator, u8) {
        let config = NetworkConfig {
            max_depth: 2,
            branching_factor: 2,
            ..NetworkConfig::default()
        };
        let store = generator::generate(&config);
        let nav = Navigator::new(&store, &config);
        (store, nav, prefix)
    }

    #[test]
    fn starts_hovering_over_the_root() {
        let (store, nav, _) = setup(24);
        let root = store.root().unwrap();
        assert_eq!(nav.current_node(), root.id);
        assert_eq!(nav.position(), root.position + Vec3::UP * 1.5);
        assert!(!nav.in_transit());
    }

    #[test]
    fn unreachable_move_is_rejected_without_state_change() {
        // At /24, the root (10.0.0.1) and its children (10.x.0.1) differ
        // inside the masked bits.
        let (store, mut nav, prefix) = setup(24);
        let before_node = nav.current_node();
        let before_pos = nav.position();

        let outcome = nav.request_move(&store, 1, prefix);
        assert_eq!(outcome, MoveOutcome::RejectedUnreachable);
        assert_eq!(nav.current_node(), before_node);
        assert_eq!(nav.position(), before_pos);
        assert!(!nav.in_transit());
    }

    #[test]
    fn move_to_current_node_is_a_no_op() {
        let (store, mut nav, prefix) = setup(0);
        assert_eq!(
            nav.request_move(&store, nav.current_node(), prefix),
            MoveOutcome::AlreadyCurrent
        );
        assert!(!nav.in_transit());
    }

    #[test]
    fn unknown_node_is_reported() {
        let (store, mut nav, prefix) = setup(0);
        assert_eq!(
            nav.request_move(&store, 9999, prefix),
            MoveOutcome::UnknownNode
        );
    }

    #[test]
    fn accepted_move_switches_current_only_on_arrival() {
        let (store, mut nav, _) = setup(0);
        let root = nav.current_node();
        assert_eq!(nav.request_move(&store, 1, 0), MoveOutcome::Accepted);

        // Mid-transit the current node is still the origin.
        assert!(nav.in_transit());
        let arrived = nav.advance(0.01);
        assert_eq!(arrived, None);
        assert_eq!(nav.current_node(), root);

        // Run transit to completion.
        let mut arrived_at = None;
        for _ in 0..10_000 {
            if let Some(id) = nav.advance(1.0 / 60.0) {
                arrived_at = Some(id);
                break;
            }
        }
        assert_eq!(arrived_at, Some(1));
        assert_eq!(nav.current_node(), 1);
        assert!(!nav.in_transit());

        let target = store.get(1).unwrap();
        assert_eq!(nav.position(), target.position + Vec3::UP * 1.5);
    }

    #[test]
    fn large_step_snaps_to_the_target() {
        let (store, mut nav, _) = setup(0);
        nav.request_move(&store, 2, 0);
        // dt * speed >= 1 collapses the lerp to the target in one tick.
        let arrived = nav.advance(1.0);
        assert_eq!(arrived, Some(2));
    }

    #[test]
    fn pick_hits_the_nearest_node() {
        let (store, _, _) = setup(0);
        let target = store.get(1).unwrap();
        // Aim straight down at the node from above.
        let ray = Ray::new(
            target.position + Vec3::UP * 10.0,
            Vec3::new(0.0, -1.0, 0.0),
        );
        assert_eq!(Navigator::pick(&store, &ray), Some(1));
    }

    #[test]
    fn pick_misses_empty_space() {
        let (store, _, _) = setup(0);
        let ray = Ray::new(Vec3::new(500.0, 10.0, 500.0), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(Navigator::pick(&store, &ray), None);
    }
}
