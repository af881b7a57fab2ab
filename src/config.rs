use crate::error::CoreError;
use crate::ranking::engine::{validate_percentile, validate_window_days};
use crate::ranking::RankingOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const MOA_API_URL: &str = "https://data.moa.gov.tw/api/v1/AgriProductsTransType/";

/// 运行配置，来自环境变量（启动时先加载 .env）
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub percentile: f64,
    pub window_days: u32,
    pub query_timeout: Duration,
    pub novelty_exclude: Vec<String>,
    pub moa_api_url: String,
    pub moa_max_tries: usize,
    pub moa_retry_base: Duration,
    pub recipe_dir: PathBuf,
    pub unique_recipes_days: i64,
    pub llm_model: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| {
            get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let percentile = validate_percentile(parse_or(&get, "RANK_PERCENTILE", 0.5)?)?;
        let novelty_exclude = get("NOVELTY_EXCLUDE")
            .map(|s| {
                s.split(|c| c == ',' || c == ';')
                    .map(|x| x.trim().to_string())
                    .filter(|x| !x.is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Ok(Self {
            database_url: text("DATABASE_URL", "sqlite://market.db?mode=rwc"),
            percentile,
            window_days: validate_window_days(parse_or(&get, "RANK_WINDOW_DAYS", 1u32)?)?,
            query_timeout: Duration::from_secs(parse_or(&get, "QUERY_TIMEOUT_SECS", 10u64)?.max(1)),
            novelty_exclude,
            moa_api_url: text("MOA_API_URL", MOA_API_URL),
            moa_max_tries: parse_or(&get, "MOA_MAX_TRIES", 3usize)?.max(1),
            moa_retry_base: Duration::from_millis(parse_or(&get, "MOA_RETRY_BASE_MS", 500u64)?),
            recipe_dir: PathBuf::from(text("RECIPE_DIR", "content/recipes")),
            unique_recipes_days: parse_or(&get, "UNIQUE_RECIPES_DAYS", 7i64)?,
            llm_model: text("LLM_MODEL", "deepseek/deepseek-chat"),
        })
    }

    pub fn ranking_options(&self, seasonal: bool, window_days: Option<u32>) -> RankingOptions {
        RankingOptions {
            seasonal,
            window_days: window_days.unwrap_or(self.window_days),
            percentile: self.percentile,
            timeout: self.query_timeout,
        }
    }
}

fn parse_or<T, F>(get: &F, key: &str, default: T) -> Result<T, CoreError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| CoreError::validation(format!("invalid {key}: {raw}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.percentile, 0.5);
        assert_eq!(cfg.window_days, 1);
        assert_eq!(cfg.query_timeout, Duration::from_secs(10));
        assert_eq!(cfg.moa_api_url, MOA_API_URL);
        assert!(cfg.novelty_exclude.is_empty());
        assert_eq!(cfg.unique_recipes_days, 7);
    }

    #[test]
    fn reads_overrides() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("RANK_PERCENTILE", "0.8"),
            ("RANK_WINDOW_DAYS", "3"),
            ("NOVELTY_EXCLUDE", "花卉, 其他;"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]))
        .unwrap();
        assert_eq!(cfg.percentile, 0.8);
        assert_eq!(cfg.novelty_exclude, vec!["花卉".to_string(), "其他".to_string()]);
        let opts = cfg.ranking_options(true, None);
        assert_eq!(opts.window_days, 3);
        assert!(opts.seasonal);
        assert_eq!(cfg.ranking_options(false, Some(0)).window_days, 0);
    }

    #[test]
    fn rejects_bad_numbers() {
        assert!(AppConfig::from_lookup(lookup(&[("RANK_PERCENTILE", "1.2")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("RANK_WINDOW_DAYS", "abc")])).is_err());
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[("RANK_WINDOW_DAYS", "40000")])),
            Err(CoreError::Validation(_))
        ));
        assert!(AppConfig::from_lookup(lookup(&[("RANK_WINDOW_DAYS", "366")])).is_ok());
    }
}
