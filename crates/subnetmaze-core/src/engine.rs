//! Simulation context — owns every piece of session state and drives the
//! per-tick recomputation.
//!
//! Ownership is one writer per field: the mask control mutates the prefix
//! length, the navigator mutates the current location and avatar
//! position, and the reachability pass produces the classification and
//! line list everything else reads. A tick with unchanged inputs produces
//! identical output.

use log::info;
use subnetmaze_logic::address;
use subnetmaze_logic::config::NetworkConfig;
use subnetmaze_logic::geometry::{Ray, Vec3};
use subnetmaze_logic::mask;

use crate::generator;
use crate::lines::{self, LinePool};
use crate::navigator::{MoveOutcome, Navigator};
use crate::reachability::{self, ReachabilityReport};
use crate::store::{NodeId, NodeStore};

/// Formatted status strings for a HUD overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudReadout {
    pub local_ip: String,
    pub mask_prefix: String,
    pub subnet_mask: String,
}

/// One maze session: topology, mask state, avatar, and derived outputs.
///
/// Components receive this object (or the parts they need) explicitly —
/// nothing is looked up ambiently.
pub struct Simulation {
    store: NodeStore,
    prefix_len: u8,
    navigator: Navigator,
    lines: LinePool,
    report: ReachabilityReport,
}

impl Simulation {
    /// Generate the topology, place the avatar on the root, and run the
    /// first sync.
    pub fn new(config: &NetworkConfig) -> Self {
        let store = generator::generate(config);
        let navigator = Navigator::new(&store, config);
        let mut sim = Self {
            store,
            prefix_len: mask::clamp_prefix(config.initial_prefix_len as i32),
            navigator,
            lines: LinePool::new(),
            report: ReachabilityReport::default(),
        };
        sim.resync();
        sim
    }

    /// One tick: advance transit, reclassify, mirror the line pool.
    pub fn update(&mut self, dt: f32) {
        if let Some(arrived) = self.navigator.advance(dt) {
            if let Some(node) = self.store.get(arrived) {
                info!("arrived at {}", node.address);
            }
        }
        self.resync();
    }

    fn resync(&mut self) {
        self.report = reachability::compute(
            &self.store,
            self.navigator.current_node(),
            self.navigator.position(),
            self.prefix_len,
        );
        lines::sync(&mut self.lines, &self.report.lines);
    }

    /// Narrow the subnet by one prefix bit (clamped at /32).
    pub fn increment_prefix(&mut self) {
        self.set_prefix(self.prefix_len as i32 + 1);
    }

    /// Widen the subnet by one prefix bit (clamped at /0).
    pub fn decrement_prefix(&mut self) {
        self.set_prefix(self.prefix_len as i32 - 1);
    }

    fn set_prefix(&mut self, value: i32) {
        let clamped = mask::clamp_prefix(value);
        if clamped != self.prefix_len {
            self.prefix_len = clamped;
            info!("mask prefix set to /{clamped}");
            self.resync();
        }
    }

    /// Resolve a pick ray and request a move to whatever it hits.
    pub fn pick_and_move(&mut self, ray: &Ray) -> Option<MoveOutcome> {
        Navigator::pick(&self.store, ray).map(|id| self.request_move(id))
    }

    /// Request a move; authorization happens against the mask in effect
    /// now. Rejections surface only as the returned outcome.
    pub fn request_move(&mut self, target: NodeId) -> MoveOutcome {
        self.navigator
            .request_move(&self.store, target, self.prefix_len)
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    /// Latest classification and line list; refreshed by [`Self::update`].
    pub fn report(&self) -> &ReachabilityReport {
        &self.report
    }

    pub fn line_pool(&self) -> &LinePool {
        &self.lines
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn current_node(&self) -> NodeId {
        self.navigator.current_node()
    }

    pub fn avatar_position(&self) -> Vec3 {
        self.navigator.position()
    }

    pub fn in_transit(&self) -> bool {
        self.navigator.in_transit()
    }

    /// Dotted-decimal text of the current node's address.
    pub fn current_address(&self) -> &str {
        self.store
            .get(self.navigator.current_node())
            .map(|n| n.address.as_str())
            .unwrap_or("0.0.0.0")
    }

    /// Dotted-decimal text of the active mask word.
    pub fn mask_text(&self) -> String {
        address::decode(mask::mask_for(self.prefix_len))
    }

    pub fn hud(&self) -> HudReadout {
        HudReadout {
            local_ip: format!("LOCAL_IP: {}", self.current_address()),
            mask_prefix: format!("MASK_PREFIX: /{}", self.prefix_len),
            subnet_mask: format!("SUBNET_MASK: {}", self.mask_text()),
        }
    }
}
