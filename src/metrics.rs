//! Episode evaluation for the slope-foraging environment.
//!
//! Runs a policy for a fixed number of episodes and aggregates the
//! statistics the specialisation studies report: team rewards, deliveries,
//! and the Ferrante specialisation measure. Episode length is owned here,
//! never by the environment.

use std::fmt;

use crate::environment::SlopeEnv;
use crate::error::SlopeError;
use crate::policy::Policy;

/// Aggregated evaluation metrics over multiple episodes.
#[derive(Debug, Clone)]
pub struct EvaluationMetrics {
    /// Mean cumulative reward per team per episode.
    pub mean_team_rewards: [f64; 2],
    /// Mean summed (both-team) cumulative reward per episode.
    pub mean_total_reward: f64,
    /// Mean number of resources delivered per episode.
    pub mean_resources_delivered: f64,
    /// Mean specialisation (fraction of delivered resources carried by
    /// more than one agent) per episode.
    pub mean_specialisation: f64,
    /// Number of episodes evaluated.
    pub n_episodes: usize,
}

/// Tracks per-episode statistics during evaluation.
#[derive(Debug, Default)]
struct EpisodeStats {
    team_rewards: [f64; 2],
    resources_delivered: usize,
    specialisation: f64,
}

impl EvaluationMetrics {
    /// Evaluates a policy over multiple episodes and aggregates the results.
    ///
    /// Each episode runs for exactly `episode_length` steps; the policy is
    /// queried once per agent per step with that agent's observation.
    pub fn evaluate(
        env: &mut SlopeEnv,
        policy: &mut dyn Policy,
        n_episodes: usize,
        episode_length: u32,
    ) -> Result<Self, SlopeError> {
        let mut all_stats = Vec::with_capacity(n_episodes);

        for _ in 0..n_episodes {
            let mut observations = env.reset()?;
            let mut stats = EpisodeStats::default();

            for _ in 0..episode_length {
                let actions: Vec<usize> =
                    observations.iter().map(|obs| policy.act(obs)).collect();
                let result = env.step(&actions)?;
                stats.team_rewards[0] += result.rewards[0];
                stats.team_rewards[1] += result.rewards[1];
                stats.resources_delivered += result.delivered;
                observations = result.observations;
            }

            stats.specialisation = env.specialisation();
            all_stats.push(stats);
        }

        let n = all_stats.len().max(1) as f64;
        let mean_team_rewards = [
            all_stats.iter().map(|s| s.team_rewards[0]).sum::<f64>() / n,
            all_stats.iter().map(|s| s.team_rewards[1]).sum::<f64>() / n,
        ];
        let mean_total_reward = mean_team_rewards[0] + mean_team_rewards[1];
        let mean_resources_delivered = all_stats
            .iter()
            .map(|s| s.resources_delivered as f64)
            .sum::<f64>()
            / n;
        let mean_specialisation = all_stats.iter().map(|s| s.specialisation).sum::<f64>() / n;

        Ok(Self {
            mean_team_rewards,
            mean_total_reward,
            mean_resources_delivered,
            mean_specialisation,
            n_episodes,
        })
    }
}

impl fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Evaluation Metrics ({} episodes) ===",
            self.n_episodes
        )?;
        writeln!(
            f,
            "  Mean team rewards:        [{:.2}, {:.2}]",
            self.mean_team_rewards[0], self.mean_team_rewards[1]
        )?;
        writeln!(f, "  Mean total reward:        {:.2}", self.mean_total_reward)?;
        writeln!(
            f,
            "  Mean resources delivered: {:.2}",
            self.mean_resources_delivered
        )?;
        writeln!(
            f,
            "  Mean specialisation:      {:.3}",
            self.mean_specialisation
        )
    }
}
