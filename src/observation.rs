//! Observation encoding for the slope-foraging environment.
//!
//! Each agent senses a square window of side `2 * sensor_range + 1` centered
//! on itself, scanned row-major from the top-left tile (lowest x, highest y)
//! to the bottom-right. Two encodings exist:
//!
//! - **simple**: one occupancy flag per tile, then 4 one-hot area bits, then
//!   a resource-in-range bit, then a carrying bit.
//! - **complex**: four one-hot bits per tile (blank/agent/resource/wall),
//!   then the 4 area bits, then the carrying bit.
//!
//! Tile classification priority is wall, then other agent, then resource,
//! then blank. Out-of-bounds tiles read as walls. The observing agent's own
//! tile never reads as "another agent", and a resource the observer itself
//! carries never reads as "resource".

use crate::config::ObservationVersion;
use crate::environment::SlopeEnv;
use crate::types::GridPos;

/// What an agent senses on one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Blank,
    Agent,
    Resource,
    Wall,
}

/// Builds per-agent observation vectors from environment state.
///
/// Reads the occupancy grids, which the environment rebuilds before
/// observations are encoded.
pub struct ObservationBuilder;

impl ObservationBuilder {
    /// Builds observations for all agents.
    pub fn build_all(env: &SlopeEnv) -> Vec<Vec<f64>> {
        (0..env.num_agents()).map(|i| Self::build(env, i)).collect()
    }

    /// Builds the observation vector for one agent.
    pub fn build(env: &SlopeEnv, agent: usize) -> Vec<f64> {
        match env.config().observation_version {
            ObservationVersion::Simple => Self::build_simple(env, agent),
            ObservationVersion::Complex => Self::build_complex(env, agent),
        }
    }

    fn build_simple(env: &SlopeEnv, agent: usize) -> Vec<f64> {
        let mut observation = vec![0.0; env.observation_size()];
        let tiles = env.config().tiles_in_sensing_range();
        let mut resource_in_range = false;

        for (k, tile) in Self::scan_window(env, agent).enumerate() {
            match tile {
                Tile::Blank => {}
                Tile::Resource => {
                    observation[k] = 1.0;
                    resource_in_range = true;
                }
                Tile::Agent | Tile::Wall => observation[k] = 1.0,
            }
        }

        let area = Self::own_area(env, agent);
        observation[tiles + area] = 1.0;
        if resource_in_range {
            observation[tiles + 4] = 1.0;
        }
        if env.carried_resource(agent).is_some() {
            observation[tiles + 5] = 1.0;
        }

        observation
    }

    fn build_complex(env: &SlopeEnv, agent: usize) -> Vec<f64> {
        let mut observation = vec![0.0; env.observation_size()];
        let tiles = env.config().tiles_in_sensing_range();

        for (k, tile) in Self::scan_window(env, agent).enumerate() {
            let offset = match tile {
                Tile::Blank => 0,
                Tile::Agent => 1,
                Tile::Resource => 2,
                Tile::Wall => 3,
            };
            observation[4 * k + offset] = 1.0;
        }

        let area = Self::own_area(env, agent);
        observation[4 * tiles + area] = 1.0;
        if env.carried_resource(agent).is_some() {
            observation[4 * tiles + 4] = 1.0;
        }

        observation
    }

    /// Scans the sensing window row-major from the top-left tile (lowest x,
    /// highest y) down to the bottom-right, classifying each tile.
    fn scan_window(env: &SlopeEnv, agent: usize) -> impl Iterator<Item = Tile> + '_ {
        let position = env.agent_positions[agent];
        let range = env.config().sensor_range;
        let side = 2 * range + 1;
        let carried = env.carried_resource(agent);

        (0..side).flat_map(move |row| {
            let y = position.y + range - row;
            (0..side).map(move |col| {
                let x = position.x - range + col;
                Self::classify_tile(env, position, carried, GridPos::new(x, y))
            })
        })
    }

    fn classify_tile(
        env: &SlopeEnv,
        own_position: GridPos,
        carried: Option<usize>,
        tile: GridPos,
    ) -> Tile {
        if !env.arena().contains(tile) {
            return Tile::Wall;
        }
        // Another agent on the tile shadows any resource there; the
        // observer's own tile is never "another agent".
        if env.agent_map.get(tile.x, tile.y) != 0 && tile != own_position {
            return Tile::Agent;
        }
        let occupant = env.resource_map.get(tile.x, tile.y);
        if occupant != 0 && carried != Some(occupant as usize - 1) {
            return Tile::Resource;
        }
        Tile::Blank
    }

    fn own_area(env: &SlopeEnv, agent: usize) -> usize {
        // Agent positions are kept inside the arena, so classification
        // cannot fail here.
        env.arena()
            .classify(env.agent_positions[agent])
            .map(|a| a.index())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ObservationVersion, SlopeConfig};
    use crate::environment::SlopeEnv;
    use crate::types::GridPos;

    fn env_with(version: ObservationVersion) -> SlopeEnv {
        let config = SlopeConfig {
            arena_width: 4,
            arena_length: 10,
            cache_start: 2,
            slope_start: 4,
            source_start: 7,
            num_agents: 2,
            num_resources: 1,
            sensor_range: 1,
            observation_version: version,
            seed: 7,
            ..SlopeConfig::default()
        };
        SlopeEnv::new(config).unwrap()
    }

    #[test]
    fn all_observations_have_configured_length() {
        for version in [ObservationVersion::Simple, ObservationVersion::Complex] {
            let env = env_with(version);
            let observations = ObservationBuilder::build_all(&env);
            assert_eq!(observations.len(), env.num_agents());
            for obs in &observations {
                assert_eq!(obs.len(), env.observation_size());
            }
        }
    }

    #[test]
    fn corner_agent_sees_walls_simple() {
        let mut env = env_with(ObservationVersion::Simple);
        env.agent_positions[0] = GridPos::new(0, 0);
        env.agent_positions[1] = GridPos::new(3, 9);
        env.resource_positions[0] = GridPos::new(3, 8);
        env.rebuild_occupancy();

        let obs = ObservationBuilder::build(&env, 0);
        // Window rows (top to bottom) around (0, 0): left column and bottom
        // row are out of bounds.
        //   [wall, blank, blank]
        //   [wall, self,  blank]
        //   [wall, wall,  wall ]
        assert_eq!(&obs[0..9], &[1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        // Area one-hot: nest.
        assert_eq!(&obs[9..13], &[1.0, 0.0, 0.0, 0.0]);
        // No resource in range, not carrying.
        assert_eq!(&obs[13..15], &[0.0, 0.0]);
    }

    #[test]
    fn neighbour_agent_and_resource_complex() {
        let mut env = env_with(ObservationVersion::Complex);
        env.agent_positions[0] = GridPos::new(1, 5);
        env.agent_positions[1] = GridPos::new(2, 5);
        env.resource_positions[0] = GridPos::new(1, 6);
        env.rebuild_occupancy();

        let obs = ObservationBuilder::build(&env, 0);
        // Tile 1 (directly above, scanning from the top-left): resource.
        assert_eq!(obs[4 * 1 + 2], 1.0);
        // Tile 5 (directly right): another agent.
        assert_eq!(obs[4 * 5 + 1], 1.0);
        // Tile 4 (own tile): blank, never "another agent".
        assert_eq!(obs[4 * 4 + 0], 1.0);
        // Area one-hot: slope.
        let tiles = env.config().tiles_in_sensing_range();
        assert_eq!(obs[4 * tiles + 2], 1.0);
    }

    #[test]
    fn carried_resource_reads_as_blank() {
        let mut env = env_with(ObservationVersion::Simple);
        env.agent_positions[0] = GridPos::new(1, 8);
        env.agent_positions[1] = GridPos::new(3, 0);
        env.resource_positions[0] = GridPos::new(1, 8);
        env.has_resource[0] = Some(0);
        env.rebuild_occupancy();

        let obs = ObservationBuilder::build(&env, 0);
        let tiles = env.config().tiles_in_sensing_range();
        // Own tile (center of a 3x3 window) does not read as resource.
        assert_eq!(obs[4], 0.0);
        // No resource in range, but the carrying bit is set.
        assert_eq!(obs[tiles + 4], 0.0);
        assert_eq!(obs[tiles + 5], 1.0);

        // A second agent still senses that cell as occupied (the carrier
        // shadows the resource it holds).
        env.agent_positions[1] = GridPos::new(1, 7);
        env.rebuild_occupancy();
        let other = ObservationBuilder::build(&env, 1);
        assert_eq!(other[1], 1.0);
    }

    #[test]
    fn agent_shadows_resource_on_same_tile() {
        let mut env = env_with(ObservationVersion::Complex);
        env.agent_positions[0] = GridPos::new(1, 5);
        env.agent_positions[1] = GridPos::new(1, 6);
        // Resource stacked under agent 1 (possible after sliding).
        env.resource_positions[0] = GridPos::new(1, 6);
        env.rebuild_occupancy();

        let obs = ObservationBuilder::build(&env, 0);
        // Tile above reads as agent, not resource.
        assert_eq!(obs[4 * 1 + 1], 1.0);
        assert_eq!(obs[4 * 1 + 2], 0.0);
    }

    #[test]
    fn zero_sensor_range_sees_only_own_tile() {
        let config = SlopeConfig {
            sensor_range: 0,
            observation_version: ObservationVersion::Simple,
            ..SlopeConfig::default()
        };
        let env = SlopeEnv::new(config).unwrap();
        let obs = ObservationBuilder::build(&env, 0);
        // 1 tile + 4 area bits + in-range bit + carrying bit.
        assert_eq!(obs.len(), 7);
        assert_eq!(obs[0], 0.0);
    }
}
