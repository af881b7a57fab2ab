use super::history::recent_recipe_names;
use super::markdown::write_recipe;
use super::parser::parse_llm_response;
use super::prompt::{PromptBuilder, SYSTEM_PROMPT};
use super::RecipeError;
use crate::ai::{ChatRequest, LlmProvider};
use crate::ranking::{rank_top_crops, RankingOptions, RankingOutcome};
use crate::registry::list_seasonal_today;
use chrono::{Datelike, NaiveDateTime};
use log::{info, warn};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct RecipeConfig {
    pub count: usize,
    pub model: String,
    pub recipe_dir: PathBuf,
    pub unique_days: i64,
    pub ranking: RankingOptions,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct RecipeRun {
    pub crops: usize,
    pub files: Vec<String>,
}

pub struct RecipeService<P: LlmProvider> {
    provider: P,
    db: Arc<DatabaseConnection>,
}

impl<P: LlmProvider> RecipeService<P> {
    pub fn new(provider: P, db: Arc<DatabaseConnection>) -> Self {
        Self { provider, db }
    }

    /// 排名 -> 提示 -> 模型 -> 解析 -> 写出 markdown
    pub async fn generate_once(
        &self,
        cfg: &RecipeConfig,
        now: NaiveDateTime,
    ) -> Result<RecipeRun, RecipeError> {
        let today = now.date();
        let ranked = match rank_top_crops(self.db.as_ref(), &cfg.ranking, today).await? {
            RankingOutcome::Ranked(records) => records,
            RankingOutcome::EmptySeasonal => {
                warn!("no seasonal ingredients this month, falling back to all crops");
                let all = RankingOptions {
                    seasonal: false,
                    ..cfg.ranking.clone()
                };
                match rank_top_crops(self.db.as_ref(), &all, today).await? {
                    RankingOutcome::Ranked(records) => records,
                    RankingOutcome::EmptySeasonal => Vec::new(),
                }
            }
        };
        if ranked.is_empty() {
            return Err(RecipeError::NoIngredients);
        }

        let seasonal = list_seasonal_today(self.db.as_ref(), today.month() as i32).await?;
        let avoid = recent_recipe_names(&cfg.recipe_dir, now, cfg.unique_days)?;
        let prompt = PromptBuilder::new(&ranked, &seasonal, &avoid).build(cfg.count);

        let resp = self
            .provider
            .chat(ChatRequest::new(cfg.model.clone(), SYSTEM_PROMPT, prompt))
            .await?;
        let batch = parse_llm_response(&resp.text)?;

        let mut files = Vec::with_capacity(batch.recipes.len());
        for recipe in &batch.recipes {
            files.push(write_recipe(&cfg.recipe_dir, recipe, now)?);
        }
        info!(
            "generated {} recipes from {} ranked crops: {:?}",
            files.len(),
            ranked.len(),
            files
        );

        Ok(RecipeRun {
            crops: ranked.len(),
            files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::types::{ChatResponse, LlmError};
    use crate::storage::connection::memory_db;
    use crate::storage::repository::transaction_repo::sample;
    use crate::storage::repository::TransactionRepository;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    struct CannedProvider {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LlmProvider for CannedProvider {
        async fn chat(&self, req: ChatRequest) -> Result<ChatResponse, LlmError> {
            self.prompts.lock().unwrap().push(req.user);
            Ok(ChatResponse {
                text: self.reply.clone(),
            })
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 18)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn config(dir: PathBuf) -> RecipeConfig {
        RecipeConfig {
            count: 1,
            model: "test-model".into(),
            recipe_dir: dir,
            unique_days: 7,
            ranking: RankingOptions::default(),
        }
    }

    #[tokio::test]
    async fn writes_markdown_for_each_recipe() {
        let db = Arc::new(memory_db().await);
        TransactionRepository::insert_batch(
            db.as_ref(),
            vec![
                sample("114.10.18", "蘿蔔", "104", 900.0),
                sample("114.01.01", "蘿蔔", "104", 1.0),
                sample("114.01.01", "蘿蔔", "104", 2.0),
            ],
        )
        .await
        .unwrap();

        let provider = CannedProvider {
            reply: "```json\n{\"recipes\":[{\"name\":\"蘿蔔湯\",\"ingredients\":[{\"name\":\"蘿蔔\",\"amount\":1,\"unit\":\"條\"}],\"steps\":[\"煮\"],\"calories\":200,\"price\":\"50 元\"}]}\n```".into(),
            prompts: Mutex::new(Vec::new()),
        };
        let dir = tempfile::tempdir().unwrap();
        let service = RecipeService::new(provider, db);

        // 当季表为空，回退为全部作物
        let run = service
            .generate_once(&config(dir.path().to_path_buf()), now())
            .await
            .unwrap();
        assert_eq!(run.crops, 1);
        assert_eq!(run.files, vec!["2025-10-18-080000_蘿蔔湯.md".to_string()]);
        assert!(dir.path().join(&run.files[0]).exists());

        let prompts = service.provider.prompts.lock().unwrap();
        assert!(prompts[0].contains("- 蘿蔔 / 市场104 / 20.0 / 900"));
    }

    #[tokio::test]
    async fn empty_market_is_reported() {
        let db = Arc::new(memory_db().await);
        let provider = CannedProvider {
            reply: String::new(),
            prompts: Mutex::new(Vec::new()),
        };
        let dir = tempfile::tempdir().unwrap();
        let err = RecipeService::new(provider, db)
            .generate_once(&config(dir.path().to_path_buf()), now())
            .await
            .unwrap_err();
        assert!(matches!(err, RecipeError::NoIngredients));
    }
}
