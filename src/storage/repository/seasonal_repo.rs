use crate::error::CoreError;
use crate::season::validate_season_window;
use crate::storage::entity::seasonal_ingredient::{
    ActiveModel as SeasonalActiveModel, Column as SeasonalColumn, Entity as SeasonalIngredient,
    Model as SeasonalModel,
};
use sea_orm::{
    ConnectionTrait, EntityTrait, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::Deserialize;

pub struct SeasonalRepository;

/// 外部分类步骤提交的一条当季食材
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SeasonalInput {
    pub name: String,
    #[serde(rename = "type")]
    pub ingredient_type: String,
    pub month_start: i32,
    pub month_end: i32,
}

impl SeasonalInput {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.trim().is_empty() {
            return Err(CoreError::validation("seasonal ingredient name is empty"));
        }
        validate_season_window(self.month_start, self.month_end).map_err(|e| {
            CoreError::validation(format!("{}: {}", self.name.trim(), e))
        })
    }
}

impl SeasonalRepository {
    /// 全部校验通过后在同一事务内写入；任一行不合法则不写入任何行
    pub async fn insert_batch<C: TransactionTrait>(
        db: &C,
        entries: Vec<SeasonalInput>,
    ) -> Result<usize, CoreError> {
        for e in &entries {
            e.validate()?;
        }
        if entries.is_empty() {
            return Ok(0);
        }

        let total = entries.len();
        let models: Vec<SeasonalActiveModel> = entries
            .into_iter()
            .map(|e| SeasonalActiveModel {
                name: Set(e.name.trim().to_string()),
                ingredient_type: Set(e.ingredient_type.trim().to_string()),
                month_start: Set(e.month_start),
                month_end: Set(e.month_end),
                ..Default::default()
            })
            .collect();

        let txn = db.begin().await?;
        for chunk in models.chunks(200) {
            SeasonalIngredient::insert_many(chunk.to_vec())
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;
        Ok(total)
    }

    pub async fn list_all<C: ConnectionTrait>(db: &C) -> Result<Vec<SeasonalModel>, sea_orm::DbErr> {
        SeasonalIngredient::find()
            .order_by_asc(SeasonalColumn::Id)
            .all(db)
            .await
    }

    /// 已登记的食材名（去首尾空白，忽略空名）
    pub async fn names<C: ConnectionTrait>(db: &C) -> Result<Vec<String>, sea_orm::DbErr> {
        let names: Vec<String> = SeasonalIngredient::find()
            .select_only()
            .column(SeasonalColumn::Name)
            .order_by_asc(SeasonalColumn::Id)
            .into_tuple()
            .all(db)
            .await?;
        Ok(names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect())
    }
}

#[cfg(test)]
pub(crate) fn seasonal(name: &str, start: i32, end: i32) -> SeasonalInput {
    SeasonalInput {
        name: name.to_string(),
        ingredient_type: "蔬菜".to_string(),
        month_start: start,
        month_end: end,
    }
}
