//! SubnetMaze Headless Simulation Harness
//!
//! Validates the maze logic and the shipped level data without any
//! rendering. Runs entirely in-process — no engine, no input framework.
//!
//! Usage:
//!   cargo run -p subnetmaze-simtest
//!   cargo run -p subnetmaze-simtest -- --verbose

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use subnetmaze_core::engine::Simulation;
use subnetmaze_core::generator;
use subnetmaze_core::lines::{self, LinePool};
use subnetmaze_core::navigator::MoveOutcome;
use subnetmaze_core::reachability::{self, NodeClass};
use subnetmaze_logic::address;
use subnetmaze_logic::config::{validate_config, NetworkConfig};
use subnetmaze_logic::mask;

// ── Level manifest (same JSON a front end would load) ───────────────────
const LEVELS_JSON: &str = include_str!("../../../data/levels.json");

#[derive(Debug, Deserialize)]
struct LevelSpec {
    name: String,
    config: NetworkConfig,
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== SubnetMaze Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Level manifest validation
    let levels = load_levels(&mut results);

    // 2. Mask arithmetic sweep
    results.extend(validate_mask_arithmetic());

    // 3. Address codec sweep
    results.extend(validate_address_codec());

    // 4. Topology generation per level
    results.extend(validate_topologies(&levels));

    // 5. Reachability invariants per level
    results.extend(validate_reachability(&levels));

    // 6. Full session walkthrough
    results.extend(validate_session());

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Level manifest ───────────────────────────────────────────────────

fn load_levels(results: &mut Vec<TestResult>) -> Vec<LevelSpec> {
    println!("--- Level Manifest ---");

    let levels: Vec<LevelSpec> = match serde_json::from_str(LEVELS_JSON) {
        Ok(l) => l,
        Err(e) => {
            results.push(TestResult {
                name: "levels_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return Vec::new();
        }
    };

    results.push(TestResult {
        name: "levels_not_empty".into(),
        passed: !levels.is_empty(),
        detail: format!("{} levels loaded", levels.len()),
    });

    let mut names: Vec<&str> = levels.iter().map(|l| l.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    results.push(TestResult {
        name: "levels_unique_names".into(),
        passed: names.len() == levels.len(),
        detail: format!("{} distinct names", names.len()),
    });

    let dirty: Vec<String> = levels
        .iter()
        .filter(|l| !validate_config(&l.config).is_empty())
        .map(|l| l.name.clone())
        .collect();
    results.push(TestResult {
        name: "levels_validate_clean".into(),
        passed: dirty.is_empty(),
        detail: if dirty.is_empty() {
            "all level configs validate".into()
        } else {
            format!("findings in: {}", dirty.join(", "))
        },
    });

    let bad_roots: Vec<String> = levels
        .iter()
        .filter(|l| address::encode(&l.config.root_address).is_err())
        .map(|l| l.name.clone())
        .collect();
    results.push(TestResult {
        name: "levels_root_addresses_parse".into(),
        passed: bad_roots.is_empty(),
        detail: if bad_roots.is_empty() {
            "all root addresses parse".into()
        } else {
            format!("malformed roots in: {}", bad_roots.join(", "))
        },
    });

    levels
}

// ── 2. Mask arithmetic ──────────────────────────────────────────────────

fn validate_mask_arithmetic() -> Vec<TestResult> {
    println!("--- Mask Arithmetic ---");
    let mut results = Vec::new();

    let bad_patterns: Vec<u8> = (0..=32u8)
        .filter(|&p| {
            let m = mask::mask_for(p);
            m.count_ones() != p as u32
                || m.trailing_zeros() != 32 - p as u32
                || m.leading_ones() != p as u32
        })
        .collect();
    results.push(TestResult {
        name: "mask_bit_patterns".into(),
        passed: bad_patterns.is_empty(),
        detail: if bad_patterns.is_empty() {
            "all 33 prefixes have contiguous top bits".into()
        } else {
            format!("broken prefixes: {:?}", bad_patterns)
        },
    });

    let mut rng = StdRng::seed_from_u64(7);
    let mut zero_ok = true;
    let mut full_ok = true;
    for _ in 0..1_000 {
        let a: u32 = rng.gen();
        let b: u32 = rng.gen();
        zero_ok &= mask::reachable(a, b, 0);
        full_ok &= mask::reachable(a, b, 32) == (a == b);
        full_ok &= mask::reachable(a, a, 32);
    }
    results.push(TestResult {
        name: "mask_prefix_zero_total".into(),
        passed: zero_ok,
        detail: "1000 random pairs reachable at /0".into(),
    });
    results.push(TestResult {
        name: "mask_prefix_32_identity".into(),
        passed: full_ok,
        detail: "/32 matches exactly the identical address".into(),
    });

    results
}

// ── 3. Address codec ────────────────────────────────────────────────────

fn validate_address_codec() -> Vec<TestResult> {
    println!("--- Address Codec ---");
    let mut results = Vec::new();

    let mut rng = StdRng::seed_from_u64(11);
    let mut round_trip_ok = true;
    for _ in 0..1_000 {
        let ip: u32 = rng.gen();
        let text = address::decode(ip);
        if address::encode(&text) != Ok(ip) {
            round_trip_ok = false;
            break;
        }
    }
    results.push(TestResult {
        name: "codec_round_trip".into(),
        passed: round_trip_ok,
        detail: "decode→encode stable for 1000 random words".into(),
    });

    let malformed = ["", "10.0.0", "10.0.0.1.2", "10.0.0.256", "a.b.c.d", "10..0.1"];
    let fallback_ok = malformed
        .iter()
        .all(|text| address::encode(text).is_err() && address::encode_or_zero(text) == 0);
    results.push(TestResult {
        name: "codec_zero_fallback".into(),
        passed: fallback_ok,
        detail: format!("{} malformed inputs fall back to 0.0.0.0", malformed.len()),
    });

    results
}

// ── 4. Topology generation ──────────────────────────────────────────────

fn expected_node_count(config: &NetworkConfig) -> usize {
    if config.branching_factor <= 0 || config.max_depth < 0 {
        return 1;
    }
    let depth = config.max_depth.min(3) as u32;
    (0..=depth)
        .map(|d| (config.branching_factor as usize).pow(d))
        .sum()
}

fn validate_topologies(levels: &[LevelSpec]) -> Vec<TestResult> {
    println!("--- Topology Generation ---");
    let mut results = Vec::new();

    for level in levels {
        let store = generator::generate(&level.config);

        results.push(TestResult {
            name: format!("topology_count[{}]", level.name),
            passed: store.len() == expected_node_count(&level.config),
            detail: format!("{} nodes", store.len()),
        });

        let again = generator::generate(&level.config);
        let deterministic = store.len() == again.len()
            && store
                .nodes()
                .iter()
                .zip(again.nodes())
                .all(|(a, b)| a.address == b.address && a.position == b.position);
        results.push(TestResult {
            name: format!("topology_deterministic[{}]", level.name),
            passed: deterministic,
            detail: "regeneration is identical".into(),
        });

        let invariant_ok = store.nodes().iter().all(|node| {
            let Some(parent_id) = node.parent else {
                return node.depth == 0;
            };
            let parent = match store.get(parent_id) {
                Some(p) => p,
                None => return false,
            };
            let child = address::octets(node.ip);
            let parent_octets = address::octets(parent.ip);
            (0..4).all(|i| i == node.depth as usize || child[i] == parent_octets[i])
        });
        results.push(TestResult {
            name: format!("topology_address_invariant[{}]", level.name),
            passed: invariant_ok,
            detail: "children differ from parents only at their depth octet".into(),
        });
    }

    results
}

// ── 5. Reachability invariants ──────────────────────────────────────────

fn validate_reachability(levels: &[LevelSpec]) -> Vec<TestResult> {
    println!("--- Reachability ---");
    let mut results = Vec::new();

    for level in levels {
        let store = generator::generate(&level.config);
        let origin = match store.root() {
            Some(root) => root.position,
            None => continue,
        };
        let report =
            reachability::compute(&store, 0, origin, level.config.initial_prefix_len);

        let current = report
            .classes
            .iter()
            .filter(|&&c| c == NodeClass::Current)
            .count();
        let reachable = report
            .classes
            .iter()
            .filter(|&&c| c == NodeClass::Reachable)
            .count();

        results.push(TestResult {
            name: format!("reachability_partition[{}]", level.name),
            passed: current == 1 && report.classes.len() == store.len(),
            detail: format!("{} current, {} reachable", current, reachable),
        });
        results.push(TestResult {
            name: format!("reachability_line_count[{}]", level.name),
            passed: report.lines.len() == reachable && report.lines.len() <= store.len() - 1,
            detail: format!("{} lines", report.lines.len()),
        });

        let mut pool = LinePool::new();
        lines::sync(&mut pool, &report.lines);
        lines::sync(&mut pool, &[]);
        results.push(TestResult {
            name: format!("line_pool_no_stale[{}]", level.name),
            passed: pool.active_count() == 0 && pool.capacity() == report.lines.len(),
            detail: "clearing deactivates every slot".into(),
        });
    }

    results
}

// ── 6. Session walkthrough ──────────────────────────────────────────────

fn validate_session() -> Vec<TestResult> {
    println!("--- Session Walkthrough ---");
    let mut results = Vec::new();

    let config = NetworkConfig {
        max_depth: 2,
        branching_factor: 2,
        ..NetworkConfig::default()
    };
    let mut sim = Simulation::new(&config);

    results.push(TestResult {
        name: "session_locked_at_start".into(),
        passed: sim.request_move(1) == MoveOutcome::RejectedUnreachable
            && sim.current_node() == 0,
        detail: "child rejected at /24".into(),
    });

    while sim.prefix_len() > 8 {
        sim.decrement_prefix();
    }
    let accepted = sim.request_move(1) == MoveOutcome::Accepted;
    let mut arrived = false;
    for _ in 0..10_000 {
        sim.update(1.0 / 60.0);
        if !sim.in_transit() {
            arrived = true;
            break;
        }
    }
    results.push(TestResult {
        name: "session_move_after_widening".into(),
        passed: accepted && arrived && sim.current_node() == 1,
        detail: format!("now at {}", sim.current_address()),
    });

    results.push(TestResult {
        name: "session_reclassified".into(),
        passed: sim.report().class_of(1) == Some(NodeClass::Current)
            && sim.report().class_of(0) != Some(NodeClass::Current),
        detail: "previous location gave up Current".into(),
    });

    while sim.prefix_len() < 32 {
        sim.increment_prefix();
    }
    results.push(TestResult {
        name: "session_narrowed_to_isolation".into(),
        passed: sim.report().reachable_count() == 0
            && sim.line_pool().active_count() == 0,
        detail: sim.hud().subnet_mask,
    });

    results
}
