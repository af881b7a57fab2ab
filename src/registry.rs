use crate::error::CoreError;
use crate::season::{is_in_season, validate_month};
use crate::storage::repository::{SeasonalInput, SeasonalRepository};
use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SeasonalToday {
    pub name: String,
    #[serde(rename = "type")]
    pub ingredient_type: String,
}

/// 分类步骤提交的批量数据
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonalImport {
    #[serde(default)]
    pub seasonal_ingredients: Vec<SeasonalInput>,
}

/// 指定月份的当季食材，保持登记顺序
pub async fn list_seasonal_today<C: ConnectionTrait>(
    db: &C,
    reference_month: i32,
) -> Result<Vec<SeasonalToday>, CoreError> {
    let month = validate_month(reference_month)?;
    let rows = SeasonalRepository::list_all(db).await?;
    Ok(rows
        .into_iter()
        .filter(|r| is_in_season(r.month_start as u32, r.month_end as u32, month))
        .map(|r| SeasonalToday {
            name: r.name,
            ingredient_type: r.ingredient_type,
        })
        .collect())
}

pub async fn import_seasonal<C: TransactionTrait>(
    db: &C,
    payload: SeasonalImport,
) -> Result<usize, CoreError> {
    let n = SeasonalRepository::insert_batch(db, payload.seasonal_ingredients).await?;
    log::info!("imported {} seasonal ingredients", n);
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::connection::memory_db;

    #[tokio::test]
    async fn lists_in_season_including_wraparound() {
        let db = memory_db().await;
        let payload: SeasonalImport = serde_json::from_str(
            r#"{"seasonal_ingredients": [
                {"name": "蘿蔔", "type": "根莖類", "month_start": 11, "month_end": 2},
                {"name": "筍", "type": "蔬菜", "month_start": 5, "month_end": 9},
                {"name": "柑橘", "type": "水果", "month_start": 1, "month_end": 1}
            ]}"#,
        )
        .unwrap();
        assert_eq!(import_seasonal(&db, payload).await.unwrap(), 3);

        let jan = list_seasonal_today(&db, 1).await.unwrap();
        assert_eq!(
            jan,
            vec![
                SeasonalToday {
                    name: "蘿蔔".into(),
                    ingredient_type: "根莖類".into()
                },
                SeasonalToday {
                    name: "柑橘".into(),
                    ingredient_type: "水果".into()
                },
            ]
        );

        let jul = list_seasonal_today(&db, 7).await.unwrap();
        assert_eq!(jul.len(), 1);
        assert_eq!(jul[0].name, "筍");
        assert_eq!(
            serde_json::to_value(&jul[0]).unwrap(),
            serde_json::json!({"name": "筍", "type": "蔬菜"})
        );
    }

    #[tokio::test]
    async fn rejects_invalid_reference_month() {
        let db = memory_db().await;
        assert!(matches!(
            list_seasonal_today(&db, 13).await,
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn missing_list_defaults_to_empty() {
        let payload: SeasonalImport = serde_json::from_str("{}").unwrap();
        assert!(payload.seasonal_ingredients.is_empty());
    }
}
