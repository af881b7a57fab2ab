use crate::calendar::reference_dates;
use crate::error::CoreError;
use crate::normalize::normalize_name;
use crate::ranking::model::{RankingOptions, RankingOutcome};
use crate::season::is_in_season;
use crate::storage::entity::product_transaction::Model as TransactionRecord;
use crate::storage::repository::{SeasonalRepository, TransactionRepository};
use chrono::{Datelike, NaiveDate};
use log::info;
use sea_orm::{ConnectionTrait, TransactionTrait};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// 参考窗口上限（天）；每天对应一个 SQL 绑定参数
pub const MAX_WINDOW_DAYS: u32 = 366;

pub fn validate_window_days(days: u32) -> Result<u32, CoreError> {
    if days <= MAX_WINDOW_DAYS {
        Ok(days)
    } else {
        Err(CoreError::validation(format!(
            "window_days must be within 0..={MAX_WINDOW_DAYS}, got {days}"
        )))
    }
}

pub fn validate_percentile(p: f64) -> Result<f64, CoreError> {
    if p.is_finite() && (0.0..1.0).contains(&p) {
        Ok(p)
    } else {
        Err(CoreError::validation(format!(
            "percentile must be within [0, 1), got {p}"
        )))
    }
}

/// 同一作物内的取舍：成交量大者优先；并列时 market_code 字典序小者、日期晚者、id 小者优先
fn prefer(a: &TransactionRecord, b: &TransactionRecord) -> Ordering {
    b.trans_quantity
        .total_cmp(&a.trans_quantity)
        .then_with(|| a.market_code.cmp(&b.market_code))
        .then_with(|| b.trans_date.cmp(&a.trans_date))
        .then_with(|| a.id.cmp(&b.id))
}

/// 按正规化作物名分组，每组保留一条，结果按成交量降序（并列按作物名升序）
///
/// `allowed` 为 Some 时只保留正规化名称在集合内的作物。
pub fn select_top_per_crop(
    rows: Vec<TransactionRecord>,
    allowed: Option<&HashSet<String>>,
) -> Vec<TransactionRecord> {
    let mut best: HashMap<String, TransactionRecord> = HashMap::new();
    for row in rows {
        let key = normalize_name(&row.crop_name);
        if let Some(allowed) = allowed {
            if !allowed.contains(&key) {
                continue;
            }
        }
        match best.get(&key) {
            Some(current) if prefer(current, &row) != Ordering::Greater => {}
            _ => {
                best.insert(key, row);
            }
        }
    }

    let mut kept: Vec<(String, TransactionRecord)> = best.into_iter().collect();
    kept.sort_by(|(ka, a), (kb, b)| {
        b.trans_quantity
            .total_cmp(&a.trans_quantity)
            .then_with(|| ka.cmp(kb))
    });
    kept.into_iter().map(|(_, r)| r).collect()
}

/// 指定月份的当季食材名（已正规化）
pub async fn seasonal_names_for_month<C: ConnectionTrait>(
    db: &C,
    month: u32,
) -> Result<HashSet<String>, CoreError> {
    let rows = SeasonalRepository::list_all(db).await?;
    Ok(rows
        .into_iter()
        .filter(|r| is_in_season(r.month_start as u32, r.month_end as u32, month))
        .map(|r| normalize_name(&r.name))
        .filter(|n| !n.is_empty())
        .collect())
}

/// 当季成交量排名
///
/// 门槛计算与候选查询在同一事务内完成，整体受 `opts.timeout` 限制。
pub async fn rank_top_crops<C>(
    db: &C,
    opts: &RankingOptions,
    today: NaiveDate,
) -> Result<RankingOutcome, CoreError>
where
    C: TransactionTrait,
{
    let p = validate_percentile(opts.percentile)?;
    let dates = reference_dates(today, validate_window_days(opts.window_days)?);

    let work = rank_in_snapshot(db, opts.seasonal, p, &dates, today.month());
    match tokio::time::timeout(opts.timeout, work).await {
        Ok(res) => res,
        Err(_) => Err(CoreError::Timeout(opts.timeout.as_secs())),
    }
}

async fn rank_in_snapshot<C>(
    db: &C,
    seasonal: bool,
    p: f64,
    dates: &[String],
    month: u32,
) -> Result<RankingOutcome, CoreError>
where
    C: TransactionTrait,
{
    let txn = db.begin().await?;

    let allowed = if seasonal {
        let names = seasonal_names_for_month(&txn, month).await?;
        if names.is_empty() {
            txn.commit().await?;
            info!("rank_top_crops: no seasonal ingredients for month {}", month);
            return Ok(RankingOutcome::EmptySeasonal);
        }
        Some(names)
    } else {
        None
    };

    let Some(threshold) = TransactionRepository::percentile_threshold(&txn, p).await? else {
        txn.commit().await?;
        return Ok(RankingOutcome::Ranked(Vec::new()));
    };
    let rows = TransactionRepository::above_threshold_on_dates(&txn, threshold, dates).await?;
    txn.commit().await?;

    let candidates = rows.len();
    let ranked = select_top_per_crop(rows, allowed.as_ref());
    info!(
        "rank_top_crops: dates={:?} p={} threshold={} candidates={} ranked={}",
        dates,
        p,
        threshold,
        candidates,
        ranked.len()
    );
    Ok(RankingOutcome::Ranked(ranked))
}
