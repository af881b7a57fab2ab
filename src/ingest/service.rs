use super::client::MarketSource;
use super::IngestError;
use crate::calendar::roc_date_string;
use crate::storage::repository::{TransactionInput, TransactionRepository};
use chrono::NaiveDate;
use log::info;
use sea_orm::TransactionTrait;

/// 抓取指定日期的全部行情并在一个事务内追加写入，返回写入行数
pub async fn ingest_day<C, S>(db: &C, source: &S, date: NaiveDate) -> Result<usize, IngestError>
where
    C: TransactionTrait,
    S: MarketSource + ?Sized,
{
    let roc_date = roc_date_string(date);
    let records = source.fetch_day(&roc_date).await?;
    if records.is_empty() {
        info!("ingest_day({}): upstream returned no rows", roc_date);
        return Ok(0);
    }

    let inputs: Vec<TransactionInput> = records.into_iter().map(Into::into).collect();
    let txn = db.begin().await?;
    let n = TransactionRepository::insert_batch(&txn, inputs).await?;
    txn.commit().await?;
    info!("ingest_day({}): stored {} rows", roc_date, n);
    Ok(n)
}
