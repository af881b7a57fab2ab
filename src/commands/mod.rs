pub mod app_command;

pub use app_command::{AppCommand, HELP};

use crate::ai::OpenRouterProvider;
use crate::config::AppConfig;
use crate::ingest::{ingest_day, MoaClient};
use crate::novelty::novelty_report;
use crate::ranking::{rank_top_crops, RankingResponse};
use crate::recipe::{recent_recipe_names, RecipeConfig, RecipeService};
use crate::registry::{import_seasonal, list_seasonal_today, SeasonalImport};
use anyhow::Context;
use chrono::{Datelike, NaiveDateTime};
use log::info;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::sync::Arc;

/// 执行一条命令，结果以 JSON 返回（由 main 打印到 stdout）
pub async fn run(
    cmd: AppCommand,
    cfg: &AppConfig,
    db: Arc<DatabaseConnection>,
    now: NaiveDateTime,
) -> anyhow::Result<Value> {
    let today = now.date();
    info!("run command: {:?}", cmd);

    match cmd {
        AppCommand::Fetch { date } => {
            let date = date.unwrap_or(today);
            let client = MoaClient::new(
                cfg.moa_api_url.clone(),
                cfg.moa_max_tries,
                cfg.moa_retry_base,
            )?;
            let stored = ingest_day(db.as_ref(), &client, date).await?;
            Ok(json!({ "date": date.to_string(), "stored": stored }))
        }
        AppCommand::Rank {
            seasonal,
            window_days,
        } => {
            let opts = cfg.ranking_options(seasonal, window_days);
            let res = rank_top_crops(db.as_ref(), &opts, today).await;
            Ok(serde_json::to_value(RankingResponse::from(res))?)
        }
        AppCommand::SeasonalToday { month } => {
            let month = month.unwrap_or(today.month() as i32);
            let items = list_seasonal_today(db.as_ref(), month).await?;
            Ok(serde_json::to_value(items)?)
        }
        AppCommand::SeasonalImport { path } => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("cannot read {}", path.display()))?;
            let payload: SeasonalImport = serde_json::from_str(&raw)
                .with_context(|| format!("invalid seasonal json in {}", path.display()))?;
            let imported = import_seasonal(db.as_ref(), payload).await?;
            Ok(json!({ "imported": imported }))
        }
        AppCommand::Novel { exclude } => {
            let mut exclude = exclude;
            exclude.extend(cfg.novelty_exclude.iter().cloned());
            let report = novelty_report(db.as_ref(), &exclude).await?;
            Ok(serde_json::to_value(report)?)
        }
        AppCommand::RecipeGenerate { n, model } => {
            let provider = OpenRouterProvider::from_env()?;
            let recipe_cfg = RecipeConfig {
                count: n,
                model: model.unwrap_or_else(|| cfg.llm_model.clone()),
                recipe_dir: cfg.recipe_dir.clone(),
                unique_days: cfg.unique_recipes_days,
                ranking: cfg.ranking_options(true, None),
            };
            let run = RecipeService::new(provider, db)
                .generate_once(&recipe_cfg, now)
                .await?;
            Ok(serde_json::to_value(run)?)
        }
        AppCommand::RecipeHistory => {
            let names = recent_recipe_names(&cfg.recipe_dir, now, cfg.unique_recipes_days)?;
            Ok(json!({ "recent": names }))
        }
        AppCommand::Help => Ok(json!({ "help": HELP })),
        AppCommand::Unknown(msg) => Err(anyhow::anyhow!(msg)),
    }
}
