//! Maze configuration — generation and runtime parameters.
//!
//! A level is described entirely by a [`NetworkConfig`]: tree shape,
//! spacing, the root's seed address, the starting mask, and avatar transit
//! tuning. Validation reports everything questionable at once; none of it
//! is fatal, because generation recovers from degenerate shapes by
//! producing a root-only topology.

use serde::{Deserialize, Serialize};

use crate::address;
use crate::mask::MAX_PREFIX_LEN;

/// Parameters for one maze session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Tree depth below the root. Levels past 3 have no address octet to
    /// claim and are clamped during generation.
    pub max_depth: i32,
    /// Children per interior node.
    pub branching_factor: i32,
    /// Distance between a parent and each of its children.
    pub level_distance: f32,
    /// Total fan-out angle across a node's children, in degrees.
    pub spread_angle: f32,
    /// Address seeded at the root.
    pub root_address: String,
    /// Mask prefix length at session start.
    pub initial_prefix_len: u8,
    /// Avatar transit speed factor.
    pub move_speed: f32,
    /// Transit completes within this distance of the target.
    pub arrive_epsilon: f32,
    /// Avatar hover height above its node.
    pub hover_height: f32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            branching_factor: 3,
            level_distance: 12.0,
            spread_angle: 120.0,
            root_address: "10.0.0.1".to_string(),
            initial_prefix_len: 24,
            move_speed: 5.0,
            arrive_epsilon: 0.05,
            hover_height: 1.5,
        }
    }
}

/// Configuration validation finding.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Depth or branching produce a root-only topology.
    DegenerateTopology {
        max_depth: i32,
        branching_factor: i32,
    },
    /// Depth exceeds the four-octet address space and will be clamped.
    DepthExceedsAddressSpace(i32),
    /// Non-positive spacing between levels collapses the layout.
    NonPositiveLevelDistance(f32),
    /// Root address text does not parse; generation will seed `0.0.0.0`.
    MalformedRootAddress(String),
    /// Starting prefix outside `[0, 32]`.
    PrefixOutOfRange(u8),
    /// Non-positive transit speed strands the avatar mid-move.
    NonPositiveMoveSpeed(f32),
    /// Non-positive arrival epsilon keeps transits from ever completing.
    NonPositiveArriveEpsilon(f32),
}

/// Validate a maze configuration, returning all findings.
pub fn validate_config(config: &NetworkConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.branching_factor <= 0 || config.max_depth < 0 {
        errors.push(ConfigError::DegenerateTopology {
            max_depth: config.max_depth,
            branching_factor: config.branching_factor,
        });
    }
    if config.max_depth > 3 {
        errors.push(ConfigError::DepthExceedsAddressSpace(config.max_depth));
    }
    if config.level_distance <= 0.0 {
        errors.push(ConfigError::NonPositiveLevelDistance(config.level_distance));
    }
    if address::encode(&config.root_address).is_err() {
        errors.push(ConfigError::MalformedRootAddress(
            config.root_address.clone(),
        ));
    }
    if config.initial_prefix_len > MAX_PREFIX_LEN {
        errors.push(ConfigError::PrefixOutOfRange(config.initial_prefix_len));
    }
    if config.move_speed <= 0.0 {
        errors.push(ConfigError::NonPositiveMoveSpeed(config.move_speed));
    }
    if config.arrive_epsilon <= 0.0 {
        errors.push(ConfigError::NonPositiveArriveEpsilon(config.arrive_epsilon));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_clean() {
        let errors = validate_config(&NetworkConfig::default());
        assert!(errors.is_empty(), "expected no findings, got: {:?}", errors);
    }

    #[test]
    fn degenerate_shape_is_reported() {
        let config = NetworkConfig {
            branching_factor: 0,
            ..NetworkConfig::default()
        };
        let errors = validate_config(&config);
        assert!(errors.contains(&ConfigError::DegenerateTopology {
            max_depth: 3,
            branching_factor: 0,
        }));

        let config = NetworkConfig {
            max_depth: -1,
            ..NetworkConfig::default()
        };
        assert!(!validate_config(&config).is_empty());
    }

    #[test]
    fn excessive_depth_is_reported() {
        let config = NetworkConfig {
            max_depth: 5,
            ..NetworkConfig::default()
        };
        let errors = validate_config(&config);
        assert!(errors.contains(&ConfigError::DepthExceedsAddressSpace(5)));
    }

    #[test]
    fn malformed_root_address_is_reported() {
        let config = NetworkConfig {
            root_address: "10.0.0".to_string(),
            ..NetworkConfig::default()
        };
        let errors = validate_config(&config);
        assert!(matches!(errors[0], ConfigError::MalformedRootAddress(_)));
    }

    #[test]
    fn bad_runtime_tuning_is_reported() {
        let config = NetworkConfig {
            move_speed: 0.0,
            arrive_epsilon: -0.1,
            level_distance: 0.0,
            ..NetworkConfig::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn default_matches_shipped_tuning() {
        let config = NetworkConfig::default();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.branching_factor, 3);
        assert_eq!(config.root_address, "10.0.0.1");
        assert_eq!(config.initial_prefix_len, 24);
    }
}
