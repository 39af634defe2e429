use anyhow::{Context, Result};

use crate::grouping::GroupingConfig;
use crate::matching::ScoringWeights;

/// Engine configuration loaded from environment variables, every knob
/// falling back to its documented default. The scoring-weight ordering
/// contract (technology bonus > skill > body, title doubled) is the
/// caller's to preserve when overriding.
#[derive(Debug, Clone)]
pub struct Config {
    pub weights: ScoringWeights,
    pub grouping: GroupingConfig,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            grouping: GroupingConfig::default(),
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let mut config = Config::default();
        if let Some(v) = optional_env::<f64>("MATCHER_BODY_WEIGHT")? {
            config.weights.body_weight = v;
        }
        if let Some(v) = optional_env::<f64>("MATCHER_TITLE_WEIGHT")? {
            config.weights.title_weight = v;
        }
        if let Some(v) = optional_env::<f64>("MATCHER_SKILL_WEIGHT")? {
            config.weights.skill_weight = v;
        }
        if let Some(v) = optional_env::<f64>("MATCHER_TECHNOLOGY_BONUS")? {
            config.weights.technology_bonus = v;
        }
        if let Some(v) = optional_env::<u32>("MATCHER_FREQUENCY_CAP")? {
            config.weights.frequency_cap = v;
        }
        if let Some(v) = optional_env::<u32>("MATCHER_BUCKET_MONTHS")? {
            config.grouping.bucket_months = v;
        }
        if let Some(v) = optional_env::<usize>("MATCHER_MIN_BUCKET_SIZE")? {
            config.grouping.min_bucket_size = v;
        }
        config.rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        Ok(config)
    }
}

fn optional_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Environment variable '{key}' has an invalid value")),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.weights.frequency_cap, 5);
        assert_eq!(config.grouping.bucket_months, 3);
        assert_eq!(config.grouping.min_bucket_size, 2);
    }
}
