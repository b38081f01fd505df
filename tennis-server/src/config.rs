use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::sync::Arc;

use tennis_core::{CompletionPolicy, CompletionPolicyFactory, RankingWeights, StatsAggregator};
use tennis_types::PolicyKind;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub completion_policy: PolicyKind,
    pub provisional_threshold: u32,
    pub ranking_default_limit: usize,
    pub ranking_max_limit: usize,
}

fn env_or<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    raw.parse::<T>()
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("Invalid {}: {:?}", key, raw))
}

impl Config {
    /// Read configuration from the environment, falling back to defaults for
    /// unset variables. Set but unparsable values are errors.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_or("PORT", "8080")?,
            completion_policy: env_or("COMPLETION_POLICY", "majority")?,
            provisional_threshold: env_or("PROVISIONAL_THRESHOLD", "5")?,
            ranking_default_limit: env_or("RANKING_DEFAULT_LIMIT", "50")?,
            ranking_max_limit: env_or("RANKING_MAX_LIMIT", "200")?,
        })
    }

    pub fn policy(&self) -> Arc<dyn CompletionPolicy> {
        CompletionPolicyFactory::create_policy(self.completion_policy)
    }

    pub fn stats_aggregator(&self) -> StatsAggregator {
        StatsAggregator::new(self.policy())
    }

    pub fn ranking_weights(&self) -> RankingWeights {
        RankingWeights {
            provisional_threshold: self.provisional_threshold,
            ..RankingWeights::default()
        }
    }

    /// Requested ranking page size, defaulted and clamped.
    pub fn ranking_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.ranking_default_limit)
            .min(self.ranking_max_limit)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            completion_policy: PolicyKind::Majority,
            provisional_threshold: 5,
            ranking_default_limit: 50,
            ranking_max_limit: 200,
        }
    }
}
