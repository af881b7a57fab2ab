use crate::error::CoreError;
use crate::normalize::normalize_name;
use crate::storage::repository::{SeasonalRepository, TransactionRepository};
use sea_orm::ConnectionTrait;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// 交易历史中出现、但当季食材表尚未登记的作物
///
/// 比对使用正规化名称；`exclude` 中任一子串出现在作物名内即排除（如某类别名称）。
pub fn find_novel_crops<'a, I, R>(observed: I, registered: R, exclude: &[String]) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
    R: IntoIterator<Item = &'a String>,
{
    let known: HashSet<String> = registered.into_iter().map(|n| normalize_name(n)).collect();
    let exclude: Vec<&str> = exclude
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    observed
        .into_iter()
        .map(|n| normalize_name(n))
        .filter(|n| !n.is_empty())
        .filter(|n| !known.contains(n))
        .filter(|n| !exclude.iter().any(|pat| n.contains(pat)))
        .collect()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NoveltyReport {
    pub new_crops: Vec<String>,
    pub existing_seasonals: Vec<String>,
}

pub async fn novelty_report<C: ConnectionTrait>(
    db: &C,
    exclude: &[String],
) -> Result<NoveltyReport, CoreError> {
    let existing = SeasonalRepository::names(db).await?;
    let crops = TransactionRepository::distinct_crop_names(db).await?;
    let new_crops = find_novel_crops(&crops, &existing, exclude);
    Ok(NoveltyReport {
        new_crops: new_crops.into_iter().collect(),
        existing_seasonals: existing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::connection::memory_db;
    use crate::storage::repository::seasonal_repo::seasonal;
    use crate::storage::repository::transaction_repo::sample;

    fn set(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reports_set_difference() {
        let out = find_novel_crops(&set(&["蘿蔔", "筍"]), &set(&["蘿蔔"]), &[]);
        assert_eq!(out.into_iter().collect::<Vec<_>>(), set(&["筍"]));
    }

    #[test]
    fn compares_normalized_names() {
        let out = find_novel_crops(
            &set(&["甘藍（高麗菜）", " 蘿蔔"]),
            &set(&["甘藍(高麗菜)", "蘿蔔 "]),
            &[],
        );
        assert!(out.is_empty());
    }

    #[test]
    fn exclusion_filter_matches_substrings() {
        let out = find_novel_crops(
            &set(&["筍-麻竹筍", "花卉-玫瑰", "青蔥"]),
            &set(&[]),
            &set(&["花卉", " "]),
        );
        assert_eq!(out.into_iter().collect::<Vec<_>>(), set(&["筍-麻竹筍", "青蔥"]));
    }

    #[tokio::test]
    async fn builds_report_from_both_tables() {
        let db = memory_db().await;
        SeasonalRepository::insert_batch(&db, vec![seasonal("蘿蔔", 11, 2)])
            .await
            .unwrap();
        TransactionRepository::insert_batch(
            &db,
            vec![
                sample("114.10.18", "蘿蔔", "104", 10.0),
                sample("114.10.18", "筍", "104", 10.0),
                sample("114.10.17", "筍", "109", 12.0),
            ],
        )
        .await
        .unwrap();

        let report = novelty_report(&db, &[]).await.unwrap();
        assert_eq!(
            report,
            NoveltyReport {
                new_crops: set(&["筍"]),
                existing_seasonals: set(&["蘿蔔"]),
            }
        );
    }
}
