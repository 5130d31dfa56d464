//! The slope-foraging environment.
//!
//! A discrete-time multi-agent grid world: agents ferry resources from the
//! source band at the top of a slope down to the nest, paying slope- and
//! carry-dependent movement costs and earning a shared reward per delivered
//! resource. Inspired by the cooperative transport task of Ferrante et al.
//! (2015).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::arena::Arena;
use crate::config::SlopeConfig;
use crate::error::SlopeError;
use crate::observation::ObservationBuilder;
use crate::types::{Action, Area, GridPos, ACTION_SPACE_SIZE, DUMPING_POSITION};

/// Result of a single environment step.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Per-agent observations after the step.
    pub observations: Vec<Vec<f64>>,
    /// Per-team reward deltas for this step (team = agent index mod 2).
    pub rewards: [f64; 2],
    /// Number of resources delivered to the nest this step.
    pub delivered: usize,
}

/// Derived occupancy projection over the arena.
///
/// One cell per grid tile; 0 means empty, otherwise `entity_index + 1`.
/// Entity position vectors are the ground truth. Grids are rebuilt at the
/// end of [`SlopeEnv::step`] and in [`SlopeEnv::reset`] and are never read
/// mid-step.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    width: i32,
    length: i32,
    cells: Vec<u32>,
}

impl OccupancyGrid {
    fn new(width: i32, length: i32) -> Self {
        Self {
            width,
            length,
            cells: vec![0; (width * length) as usize],
        }
    }

    /// Returns the occupant at `(x, y)`, or 0 for empty or out-of-bounds.
    pub fn get(&self, x: i32, y: i32) -> u32 {
        if x < 0 || x >= self.width || y < 0 || y >= self.length {
            return 0;
        }
        self.cells[(y * self.width + x) as usize]
    }

    fn set(&mut self, pos: GridPos, value: u32) {
        self.cells[(pos.y * self.width + pos.x) as usize] = value;
    }

    fn clear(&mut self) {
        self.cells.fill(0);
    }
}

/// The multi-agent slope-foraging environment.
///
/// # Lifecycle
///
/// 1. Call [`SlopeEnv::new`] with a configuration (seed included).
/// 2. Call [`SlopeEnv::reset`] to start an episode.
/// 3. Repeatedly call [`SlopeEnv::step`] with one action index per agent.
/// 4. After the episode, read [`SlopeEnv::specialisation`].
///
/// The environment has no internal step counter; episode length and
/// termination are entirely the caller's responsibility.
#[derive(Debug)]
pub struct SlopeEnv {
    config: SlopeConfig,
    arena: Arena,

    // Ground-truth entity state, indexed by entity id.
    pub(crate) agent_positions: Vec<GridPos>,
    pub(crate) has_resource: Vec<Option<usize>>,
    pub(crate) resource_positions: Vec<GridPos>,
    pub(crate) resource_carried_by: Vec<Vec<usize>>,
    current_num_resources: usize,

    // Derived projections, rebuilt at the end of step and in reset.
    pub(crate) agent_map: OccupancyGrid,
    pub(crate) resource_map: OccupancyGrid,

    rng: StdRng,
}

impl SlopeEnv {
    /// Creates a new environment from a configuration.
    ///
    /// Validates the configuration (arena dimensions, band ordering, agent
    /// count) and performs an initial [`reset`](Self::reset), so capacity
    /// violations also surface here.
    pub fn new(config: SlopeConfig) -> Result<Self, SlopeError> {
        config.validate()?;
        let arena = Arena::from_config(&config);
        let seed = config.seed;
        let mut env = Self {
            arena,
            agent_positions: Vec::new(),
            has_resource: Vec::new(),
            resource_positions: Vec::new(),
            resource_carried_by: Vec::new(),
            current_num_resources: 0,
            agent_map: OccupancyGrid::new(arena.width, arena.length),
            resource_map: OccupancyGrid::new(arena.width, arena.length),
            rng: StdRng::seed_from_u64(seed),
            config,
        };
        env.reset()?;
        Ok(env)
    }

    /// Resets the environment for a new episode and returns initial
    /// per-agent observations.
    ///
    /// Agents are placed uniformly at random in the nest and resources in
    /// the source, rejection-sampled so no two entities of the same kind
    /// share a cell. The RNG is seeded once at construction and not
    /// re-seeded here, so successive episodes differ but a whole run is
    /// reproducible from the configured seed.
    pub fn reset(&mut self) -> Result<Vec<Vec<f64>>, SlopeError> {
        if self.config.num_agents > self.arena.nest_capacity() {
            return Err(SlopeError::NestCapacityExceeded {
                num_agents: self.config.num_agents,
                capacity: self.arena.nest_capacity(),
            });
        }
        if self.config.num_resources > self.arena.source_capacity() {
            return Err(SlopeError::SourceCapacityExceeded {
                num_resources: self.config.num_resources,
                capacity: self.arena.source_capacity(),
            });
        }

        self.agent_positions.clear();
        self.resource_positions.clear();
        self.resource_carried_by.clear();
        self.has_resource = vec![None; self.config.num_agents];
        self.current_num_resources = self.config.num_resources;

        while self.agent_positions.len() < self.config.num_agents {
            let pos = self.random_nest_position();
            if !self.agent_positions.contains(&pos) {
                self.agent_positions.push(pos);
            }
        }

        while self.resource_positions.len() < self.config.num_resources {
            let pos = self.random_source_position();
            if !self.resource_positions.contains(&pos) {
                self.resource_positions.push(pos);
                self.resource_carried_by.push(Vec::new());
            }
        }

        self.rebuild_occupancy();
        Ok(ObservationBuilder::build_all(self))
    }

    /// Executes one environment step.
    ///
    /// Phases, in load-bearing order:
    ///
    /// 1. Validate the action vector.
    /// 2. Snapshot old agent positions.
    /// 3. Apply actions: propose clamped moves, accrue per-team costs.
    /// 4. Resolve agent-agent and agent-resource collisions (mutual
    ///    reverts allowed; no cascading within a step).
    /// 5. Bind resources: drag carried resources, handle DROP and PICKUP.
    /// 6. Slide uncarried resources on the slope toward the cache.
    /// 7. Deliver: empty-handed agents in the nest standing on a resource
    ///    retire it and both teams earn the resource reward.
    /// 8. Respawn resources at the source up to the default count.
    /// 9. Rebuild occupancy grids and encode observations.
    pub fn step(&mut self, actions: &[usize]) -> Result<StepResult, SlopeError> {
        if actions.len() != self.config.num_agents {
            return Err(SlopeError::WrongActionCount {
                expected: self.config.num_agents,
                actual: actions.len(),
            });
        }
        let actions = actions
            .iter()
            .enumerate()
            .map(|(agent, &action)| {
                Action::from_index(action).ok_or(SlopeError::InvalidAction { agent, action })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut rewards = [0.0f64; 2];
        let old_positions = self.agent_positions.clone();

        // Apply actions and charge costs. Movement cost depends on the area
        // of the (clamped) proposed position; a clamped-out move still pays.
        for (i, &action) in actions.iter().enumerate() {
            let team = i % 2;
            let carry_multiplier = if self.has_resource[i].is_some() {
                self.config.carry_factor
            } else {
                1.0
            };

            if action.is_movement() {
                let (dx, dy) = action.delta();
                let old = self.agent_positions[i];
                let proposed = self.arena.clamp(GridPos::new(old.x + dx, old.y + dy));
                self.agent_positions[i] = proposed;

                let cost = if self.arena.classify(proposed)? == Area::Slope {
                    match action {
                        Action::Forward => {
                            self.config.upward_cost_factor * self.config.base_cost * carry_multiplier
                        }
                        Action::Backward => {
                            self.config.downward_cost_factor
                                * self.config.base_cost
                                * carry_multiplier
                        }
                        _ => self.config.base_cost * carry_multiplier,
                    }
                } else {
                    self.config.base_cost * carry_multiplier
                };
                rewards[team] -= cost;
            } else {
                // Pickup and drop cost a flat base cost, carried or not.
                rewards[team] -= self.config.base_cost;
            }
        }

        // Collision resolution. Each agent is checked against every other
        // agent's proposed and old position; reverts go into a scratch
        // vector so no agent's revert influences another's check, which
        // means mutually swapping agents both revert. Index order only
        // matters for the final occupancy write, not here.
        let proposed = self.agent_positions.clone();
        let mut resolved = proposed.clone();
        for i in 0..proposed.len() {
            for j in 0..proposed.len() {
                if i != j && (proposed[i] == proposed[j] || proposed[i] == old_positions[j]) {
                    resolved[i] = old_positions[i];
                }
            }

            // An agent may only share a cell with a resource it is allowed
            // to interact with: not while carrying a different one, and not
            // if the resource is claimed by another agent.
            for (r, &rpos) in self.resource_positions.iter().enumerate() {
                if rpos.is_dumped() || proposed[i] != rpos {
                    continue;
                }
                let blocked = match self.has_resource[i] {
                    Some(held) => held != r,
                    None => self.has_resource.iter().any(|h| *h == Some(r)),
                };
                if blocked {
                    resolved[i] = old_positions[i];
                }
            }
        }
        self.agent_positions = resolved;

        // Resource binding and sliding.
        for r in 0..self.resource_positions.len() {
            for j in 0..old_positions.len() {
                // A resource co-located with its carrier last step either
                // moves with the carrier or is released on DROP.
                if self.resource_positions[r] == old_positions[j]
                    && self.has_resource[j] == Some(r)
                {
                    if actions[j] == Action::Drop {
                        self.drop_resource(j);
                    } else {
                        self.resource_positions[r] = self.agent_positions[j];
                    }
                }

                // An empty-handed agent standing on a resource now picks it
                // up if it issued PICKUP.
                if self.resource_positions[r] == self.agent_positions[j]
                    && self.has_resource[j].is_none()
                    && actions[j] == Action::Pickup
                {
                    self.pickup_resource(j, r);
                }
            }

            // Uncarried resources on the slope slide toward the nest. A
            // sliding resource may land on an occupied cell; there is no
            // anti-stacking pass.
            let pos = self.resource_positions[r];
            if !pos.is_dumped()
                && self.arena.classify(pos).ok() == Some(Area::Slope)
                && !self.has_resource.iter().any(|h| *h == Some(r))
            {
                self.slide_resource(r);
            }
        }

        // Delivery: an empty-handed agent in the nest standing on a
        // resource retires it. Both teams are rewarded.
        let mut delivered = 0;
        for i in 0..self.agent_positions.len() {
            if self.arena.classify(self.agent_positions[i])? != Area::Nest
                || self.has_resource[i].is_some()
            {
                continue;
            }
            if let Some(r) = self
                .resource_positions
                .iter()
                .position(|&p| p == self.agent_positions[i])
            {
                rewards[0] += self.config.resource_reward;
                rewards[1] += self.config.resource_reward;
                self.delete_resource(r);
                delivered += 1;
            }
        }

        // Respawn at the source up to the default count, capped by source
        // capacity.
        let mut at_source = 0;
        for &pos in &self.resource_positions {
            if !pos.is_dumped() && self.arena.classify(pos).ok() == Some(Area::Source) {
                at_source += 1;
                if at_source >= self.config.num_resources {
                    break;
                }
            }
        }
        for _ in at_source..self.config.num_resources {
            if self.spawn_resource().is_none() {
                break;
            }
        }

        self.rebuild_occupancy();
        let observations = ObservationBuilder::build_all(self);

        Ok(StepResult {
            observations,
            rewards,
            delivered,
        })
    }

    // --- Accessors -------------------------------------------------------

    /// The environment configuration.
    pub fn config(&self) -> &SlopeConfig {
        &self.config
    }

    /// The arena layout.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Length of each agent's observation vector.
    pub fn observation_size(&self) -> usize {
        self.config.observation_dim()
    }

    /// Number of actions in the action space (always 6).
    pub fn action_size(&self) -> usize {
        ACTION_SPACE_SIZE
    }

    /// Number of agents.
    pub fn num_agents(&self) -> usize {
        self.config.num_agents
    }

    /// Default number of resources maintained at the source.
    pub fn default_num_resources(&self) -> usize {
        self.config.num_resources
    }

    /// Number of live (not yet delivered) resources.
    pub fn current_num_resources(&self) -> usize {
        self.current_num_resources
    }

    /// Number of resources delivered to the nest so far this episode.
    pub fn resources_delivered(&self) -> usize {
        self.resource_positions
            .iter()
            .filter(|p| p.is_dumped())
            .count()
    }

    /// Current agent positions, indexed by agent id.
    pub fn agent_positions(&self) -> &[GridPos] {
        &self.agent_positions
    }

    /// Current resource positions (delivered resources sit at the dumping
    /// sentinel), indexed by resource id.
    pub fn resource_positions(&self) -> &[GridPos] {
        &self.resource_positions
    }

    /// The resource carried by an agent, if any.
    pub fn carried_resource(&self, agent: usize) -> Option<usize> {
        self.has_resource.get(agent).copied().flatten()
    }

    /// Fraction of delivered resources that were carried by more than one
    /// distinct agent (Ferrante et al.'s specialisation measure).
    ///
    /// Returns 0.0 when nothing has been delivered.
    pub fn specialisation(&self) -> f64 {
        let mut retrieved = 0usize;
        let mut retrieved_by_many = 0usize;
        for (r, pos) in self.resource_positions.iter().enumerate() {
            if pos.is_dumped() {
                retrieved += 1;
                if self.resource_carried_by[r].len() > 1 {
                    retrieved_by_many += 1;
                }
            }
        }
        if retrieved == 0 {
            0.0
        } else {
            retrieved_by_many as f64 / retrieved as f64
        }
    }

    /// True iff every cell of the source band holds a resource.
    pub fn is_source_full(&self) -> bool {
        for y in self.arena.source_start..self.arena.length {
            for x in 0..self.arena.width {
                if !self.resource_positions.contains(&GridPos::new(x, y)) {
                    return false;
                }
            }
        }
        true
    }

    // --- Internal helpers ------------------------------------------------

    fn random_nest_position(&mut self) -> GridPos {
        let x = self.rng.gen_range(0..self.arena.width);
        let y = self.rng.gen_range(self.arena.nest_start..self.arena.cache_start);
        GridPos::new(x, y)
    }

    fn random_source_position(&mut self) -> GridPos {
        let x = self.rng.gen_range(0..self.arena.width);
        let y = self.rng.gen_range(self.arena.source_start..self.arena.length);
        GridPos::new(x, y)
    }

    /// Binds a resource to an agent. The single place the carry history
    /// gains an entry.
    fn pickup_resource(&mut self, agent: usize, resource: usize) {
        self.resource_positions[resource] = self.agent_positions[agent];
        self.has_resource[agent] = Some(resource);
        if !self.resource_carried_by[resource].contains(&agent) {
            self.resource_carried_by[resource].push(agent);
        }
    }

    /// Releases an agent's resource where it lies.
    fn drop_resource(&mut self, agent: usize) {
        self.has_resource[agent] = None;
    }

    /// Moves an uncarried slope resource toward the nest, clamped so it
    /// never crosses below the cache.
    fn slide_resource(&mut self, resource: usize) {
        let pos = self.resource_positions[resource];
        let new_y = (pos.y - self.config.sliding_speed).max(self.arena.cache_start);
        self.resource_positions[resource] = GridPos::new(pos.x, new_y);
    }

    /// Retires a delivered resource to the dumping sentinel. Its index and
    /// carry history are kept for specialisation accounting.
    fn delete_resource(&mut self, resource: usize) {
        self.resource_positions[resource] = DUMPING_POSITION;
        self.current_num_resources -= 1;
    }

    /// Spawns one resource at a random unoccupied source cell.
    ///
    /// Returns `None` without spawning when the source is full. New
    /// resources get fresh, monotonically growing ids.
    fn spawn_resource(&mut self) -> Option<GridPos> {
        if self.is_source_full() {
            return None;
        }
        loop {
            let pos = self.random_source_position();
            if !self.resource_positions.contains(&pos) {
                self.resource_positions.push(pos);
                self.resource_carried_by.push(Vec::new());
                self.current_num_resources += 1;
                return Some(pos);
            }
        }
    }

    /// Recomputes both occupancy grids from the position vectors.
    pub(crate) fn rebuild_occupancy(&mut self) {
        self.agent_map.clear();
        self.resource_map.clear();
        for (i, &pos) in self.agent_positions.iter().enumerate() {
            self.agent_map.set(pos, i as u32 + 1);
        }
        for (r, &pos) in self.resource_positions.iter().enumerate() {
            if !pos.is_dumped() {
                self.resource_map.set(pos, r as u32 + 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Area;

    const FORWARD: usize = 0;
    const BACKWARD: usize = 1;
    const LEFT: usize = 2;
    const RIGHT: usize = 3;
    const PICKUP: usize = 4;
    const DROP: usize = 5;

    fn scenario_config() -> SlopeConfig {
        SlopeConfig {
            arena_width: 4,
            arena_length: 10,
            cache_start: 2,
            slope_start: 4,
            source_start: 7,
            num_agents: 1,
            num_resources: 1,
            sensor_range: 1,
            sliding_speed: 1,
            base_cost: 1.0,
            upward_cost_factor: 3.0,
            downward_cost_factor: 0.2,
            carry_factor: 2.0,
            resource_reward: 1000.0,
            seed: 11,
            ..SlopeConfig::default()
        }
    }

    fn two_agent_env() -> SlopeEnv {
        SlopeEnv::new(SlopeConfig {
            num_agents: 2,
            num_resources: 0,
            ..scenario_config()
        })
        .unwrap()
    }

    #[test]
    fn reset_places_agents_in_nest_and_resources_in_source() {
        let config = SlopeConfig {
            num_agents: 6,
            num_resources: 8,
            ..scenario_config()
        };
        let mut env = SlopeEnv::new(config).unwrap();
        let observations = env.reset().unwrap();
        assert_eq!(observations.len(), 6);

        for &pos in env.agent_positions() {
            assert_eq!(env.arena().classify(pos).unwrap(), Area::Nest);
        }
        for &pos in env.resource_positions() {
            assert_eq!(env.arena().classify(pos).unwrap(), Area::Source);
        }

        // No two agents and no two resources share a cell.
        for (i, a) in env.agent_positions().iter().enumerate() {
            for b in env.agent_positions().iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        for (i, a) in env.resource_positions().iter().enumerate() {
            for b in env.resource_positions().iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn placement_is_reproducible_for_a_seed() {
        let env_a = SlopeEnv::new(scenario_config()).unwrap();
        let env_b = SlopeEnv::new(scenario_config()).unwrap();
        assert_eq!(env_a.agent_positions(), env_b.agent_positions());
        assert_eq!(env_a.resource_positions(), env_b.resource_positions());
    }

    #[test]
    fn capacity_violations_are_configuration_errors() {
        let too_many_agents = SlopeConfig {
            num_agents: 9, // nest holds 4 * 2 = 8
            ..scenario_config()
        };
        assert!(matches!(
            SlopeEnv::new(too_many_agents),
            Err(SlopeError::NestCapacityExceeded { .. })
        ));

        let too_many_resources = SlopeConfig {
            num_resources: 13, // source holds 4 * 3 = 12
            ..scenario_config()
        };
        assert!(matches!(
            SlopeEnv::new(too_many_resources),
            Err(SlopeError::SourceCapacityExceeded { .. })
        ));
    }

    #[test]
    fn step_validates_the_action_vector() {
        let mut env = two_agent_env();
        assert_eq!(
            env.step(&[FORWARD]).unwrap_err(),
            SlopeError::WrongActionCount {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(
            env.step(&[FORWARD, 6]).unwrap_err(),
            SlopeError::InvalidAction {
                agent: 1,
                action: 6
            }
        );
    }

    #[test]
    fn movement_clamps_at_the_edge_and_still_charges() {
        let mut env = two_agent_env();
        env.agent_positions[0] = GridPos::new(0, 0);
        env.agent_positions[1] = GridPos::new(3, 1);

        let result = env.step(&[BACKWARD, RIGHT]).unwrap();
        assert_eq!(env.agent_positions()[0], GridPos::new(0, 0));
        assert_eq!(env.agent_positions()[1], GridPos::new(3, 1));
        // Both moves were clamped out but both teams still paid base cost.
        assert_eq!(result.rewards, [-1.0, -1.0]);
    }

    #[test]
    fn swapping_agents_both_revert() {
        let mut env = two_agent_env();
        env.agent_positions[0] = GridPos::new(1, 0);
        env.agent_positions[1] = GridPos::new(1, 1);

        env.step(&[FORWARD, BACKWARD]).unwrap();
        assert_eq!(env.agent_positions()[0], GridPos::new(1, 0));
        assert_eq!(env.agent_positions()[1], GridPos::new(1, 1));
    }

    #[test]
    fn agents_moving_to_the_same_cell_both_revert() {
        let mut env = two_agent_env();
        env.agent_positions[0] = GridPos::new(0, 1);
        env.agent_positions[1] = GridPos::new(2, 1);

        env.step(&[RIGHT, LEFT]).unwrap();
        assert_eq!(env.agent_positions()[0], GridPos::new(0, 1));
        assert_eq!(env.agent_positions()[1], GridPos::new(2, 1));
    }

    #[test]
    fn slope_movement_costs_scale_with_direction_and_carrying() {
        let mut env = two_agent_env();
        // Agent 0 climbs into the slope, agent 1 descends within it.
        env.agent_positions[0] = GridPos::new(0, 3);
        env.agent_positions[1] = GridPos::new(3, 5);

        let result = env.step(&[FORWARD, BACKWARD]).unwrap();
        // Forward into slope: 3.0 * 1.0; backward inside slope: 0.2 * 1.0.
        assert!((result.rewards[0] + 3.0).abs() < 1e-12);
        assert!((result.rewards[1] + 0.2).abs() < 1e-12);

        // Carrying doubles movement cost (carry_factor = 2).
        env.resource_positions.push(GridPos::new(0, 4));
        env.resource_carried_by.push(vec![0]);
        env.has_resource[0] = Some(0);
        let result = env.step(&[FORWARD, LEFT]).unwrap();
        assert!((result.rewards[0] + 6.0).abs() < 1e-12);
        // Lateral move inside the slope costs base * carry multiplier (1 here).
        assert!((result.rewards[1] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn pickup_and_drop_cost_flat_base_cost() {
        let mut env = two_agent_env();
        let result = env.step(&[PICKUP, DROP]).unwrap();
        assert_eq!(result.rewards, [-1.0, -1.0]);
    }

    #[test]
    fn uncarried_slope_resources_slide_toward_the_cache() {
        let mut env = SlopeEnv::new(SlopeConfig {
            sliding_speed: 2,
            num_resources: 0,
            ..scenario_config()
        })
        .unwrap();
        env.resource_positions.push(GridPos::new(2, 6));
        env.resource_carried_by.push(Vec::new());

        env.step(&[PICKUP]).unwrap();
        assert_eq!(env.resource_positions()[0], GridPos::new(2, 4));
        env.step(&[PICKUP]).unwrap();
        // Clamped at cache_start, never past it.
        assert_eq!(env.resource_positions()[0], GridPos::new(2, 2));
        env.step(&[PICKUP]).unwrap();
        assert_eq!(env.resource_positions()[0], GridPos::new(2, 2));
    }

    #[test]
    fn respawn_restores_the_default_source_count() {
        let mut env = SlopeEnv::new(SlopeConfig {
            num_resources: 3,
            ..scenario_config()
        })
        .unwrap();
        // Knock one resource down onto the slope; it slides out of the
        // source, so the deficit triggers a respawn.
        env.resource_positions[0] = GridPos::new(0, 5);
        env.step(&[PICKUP]).unwrap();

        let at_source = env
            .resource_positions()
            .iter()
            .filter(|p| env.arena().classify(**p).ok() == Some(Area::Source))
            .count();
        assert_eq!(at_source, 3);
        assert_eq!(env.resource_positions().len(), 4);
        assert_eq!(env.current_num_resources(), 4);
    }

    #[test]
    fn respawn_never_exceeds_source_capacity() {
        let mut env = SlopeEnv::new(SlopeConfig {
            arena_width: 2,
            num_resources: 6, // exactly the 2 * 3 source cells
            ..scenario_config()
        })
        .unwrap();
        assert!(env.is_source_full());
        // Source already full: nothing to spawn even though one resource
        // is about to leave (it cannot, all are at the source).
        env.step(&[PICKUP]).unwrap();
        let at_source = env
            .resource_positions()
            .iter()
            .filter(|p| env.arena().classify(**p).ok() == Some(Area::Source))
            .count();
        assert_eq!(at_source, 6);
        assert_eq!(env.resource_positions().len(), 6);
    }

    #[test]
    fn carrying_agent_cannot_walk_onto_another_resource() {
        let mut env = SlopeEnv::new(SlopeConfig {
            num_agents: 1,
            num_resources: 0,
            ..scenario_config()
        })
        .unwrap();
        env.agent_positions[0] = GridPos::new(1, 1);
        env.resource_positions.push(GridPos::new(1, 1));
        env.resource_carried_by.push(vec![0]);
        env.has_resource[0] = Some(0);
        env.resource_positions.push(GridPos::new(2, 1));
        env.resource_carried_by.push(Vec::new());

        env.step(&[RIGHT]).unwrap();
        assert_eq!(env.agent_positions()[0], GridPos::new(1, 1));
    }

    #[test]
    fn end_to_end_single_agent_delivery() {
        // Arena 4x10, bands nest [0,2) cache [2,4) slope [4,7) source [7,10).
        let mut env = SlopeEnv::new(scenario_config()).unwrap();
        env.agent_positions[0] = GridPos::new(0, 1);
        env.resource_positions[0] = GridPos::new(0, 8);
        env.rebuild_occupancy();

        // Five forward steps climb to (0, 6), clamping nothing yet.
        for _ in 0..5 {
            env.step(&[FORWARD]).unwrap();
        }
        assert_eq!(env.agent_positions()[0], GridPos::new(0, 6));

        // Two more reach the resource cell; stepping onto a free, unclaimed
        // resource is allowed.
        env.step(&[FORWARD]).unwrap();
        env.step(&[FORWARD]).unwrap();
        assert_eq!(env.agent_positions()[0], GridPos::new(0, 8));

        env.step(&[PICKUP]).unwrap();
        assert_eq!(env.carried_resource(0), Some(0));

        // The carried resource is dragged along on every move.
        for _ in 0..7 {
            env.step(&[BACKWARD]).unwrap();
            assert_eq!(env.resource_positions()[0], env.agent_positions()[0]);
        }
        assert_eq!(env.agent_positions()[0], GridPos::new(0, 1));
        // Still carrying in the nest: delivery must not fire yet.
        assert_eq!(env.resources_delivered(), 0);

        // Dropping in the nest releases the resource and delivery fires in
        // the same step: both teams earn the reward, the resource retires.
        let result = env.step(&[DROP]).unwrap();
        assert_eq!(result.delivered, 1);
        assert!((result.rewards[0] - (1000.0 - 1.0)).abs() < 1e-12);
        assert!((result.rewards[1] - 1000.0).abs() < 1e-12);
        assert!(env.resource_positions()[0].is_dumped());
        assert_eq!(env.carried_resource(0), None);
        assert_eq!(env.resources_delivered(), 1);
        // Carry history survives delivery.
        assert_eq!(env.resource_carried_by[0], vec![0]);
        // The respawn phase has already restocked the source.
        assert_eq!(env.current_num_resources(), 1);

        // One delivery by a single agent: no specialisation.
        assert_eq!(env.specialisation(), 0.0);
    }

    #[test]
    fn specialisation_counts_multi_agent_carries() {
        let mut env = two_agent_env();
        // Two delivered resources, one carried by both agents.
        env.resource_positions.push(DUMPING_POSITION);
        env.resource_carried_by.push(vec![0, 1]);
        env.resource_positions.push(DUMPING_POSITION);
        env.resource_carried_by.push(vec![1]);

        let s = env.specialisation();
        assert!((s - 0.5).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&s));
    }

    #[test]
    fn specialisation_is_zero_without_deliveries() {
        let env = SlopeEnv::new(scenario_config()).unwrap();
        assert_eq!(env.specialisation(), 0.0);
    }

    #[test]
    fn accessors_report_configuration() {
        let env = SlopeEnv::new(scenario_config()).unwrap();
        assert_eq!(env.action_size(), 6);
        assert_eq!(env.num_agents(), 1);
        assert_eq!(env.default_num_resources(), 1);
        assert_eq!(env.current_num_resources(), 1);
        assert_eq!(env.observation_size(), env.config().observation_dim());
    }
}
