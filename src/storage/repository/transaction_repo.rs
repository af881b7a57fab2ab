use crate::storage::entity::product_transaction::{
    ActiveModel as TransactionActiveModel, Column as TransactionColumn,
    Entity as ProductTransaction, Model as TransactionModel,
};
use chrono::Utc;
use std::collections::BTreeSet;
use sea_orm::{
    ConnectionTrait, DbBackend, EntityTrait, QueryOrder, QuerySelect, Set, Statement, Value,
};

// 每行 11 个绑定参数，保持在 SQLite 旧版 999 参数上限之内
const INSERT_CHUNK: usize = 80;

pub struct TransactionRepository;

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub trans_date: String,
    pub crop_code: String,
    pub crop_name: String,
    pub tc_type: String,
    pub market_code: String,
    pub market_name: String,
    pub upper_price: f64,
    pub middle_price: f64,
    pub lower_price: f64,
    pub avg_price: f64,
    pub trans_quantity: f64,
}

impl TransactionRepository {
    /// 批量追加交易记录，返回写入行数
    pub async fn insert_batch<C: ConnectionTrait>(
        db: &C,
        entries: Vec<TransactionInput>,
    ) -> Result<usize, sea_orm::DbErr> {
        if entries.is_empty() {
            return Ok(0);
        }

        let now = Utc::now().timestamp();
        let total = entries.len();
        let models: Vec<TransactionActiveModel> = entries
            .into_iter()
            .map(|e| TransactionActiveModel {
                trans_date: Set(e.trans_date),
                crop_code: Set(e.crop_code),
                crop_name: Set(e.crop_name),
                tc_type: Set(e.tc_type),
                market_code: Set(e.market_code),
                market_name: Set(e.market_name),
                upper_price: Set(e.upper_price),
                middle_price: Set(e.middle_price),
                lower_price: Set(e.lower_price),
                avg_price: Set(e.avg_price),
                trans_quantity: Set(e.trans_quantity),
                created_at: Set(now),
                ..Default::default()
            })
            .collect();

        for chunk in models.chunks(INSERT_CHUNK) {
            ProductTransaction::insert_many(chunk.to_vec()).exec(db).await?;
        }
        Ok(total)
    }

    /// 交易历史中出现过的作物名（去首尾空白，忽略空名）
    pub async fn distinct_crop_names<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<String>, sea_orm::DbErr> {
        let names: Vec<String> = ProductTransaction::find()
            .select_only()
            .column(TransactionColumn::CropName)
            .distinct()
            .order_by_asc(TransactionColumn::CropName)
            .into_tuple()
            .all(db)
            .await?;
        let trimmed: BTreeSet<String> = names
            .into_iter()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        Ok(trimmed.into_iter().collect())
    }

    /// 全表 trans_quantity 升序排序后，取 0 起算第 floor(count * p) 个值
    ///
    /// 表为空（或该位置无值）时返回 None。
    pub async fn percentile_threshold<C: ConnectionTrait>(
        db: &C,
        p: f64,
    ) -> Result<Option<f64>, sea_orm::DbErr> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Sqlite,
            r#"SELECT trans_quantity
               FROM product_transactions
               ORDER BY trans_quantity
               LIMIT 1
               OFFSET (SELECT CAST(COUNT(*) * ? AS INTEGER) FROM product_transactions)"#,
            [Value::from(p)],
        );
        match db.query_one(stmt).await? {
            Some(row) => Ok(Some(row.try_get::<f64>("", "trans_quantity")?)),
            None => Ok(None),
        }
    }

    /// 成交量严格大于门槛、且日期在参考日期集合内的记录
    pub async fn above_threshold_on_dates<C: ConnectionTrait>(
        db: &C,
        threshold: f64,
        dates: &[String],
    ) -> Result<Vec<TransactionModel>, sea_orm::DbErr> {
        if dates.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; dates.len()].join(", ");
        let sql = format!(
            r#"SELECT id, trans_date, crop_code, crop_name, tc_type, market_code, market_name,
                      upper_price, middle_price, lower_price, avg_price, trans_quantity, created_at
               FROM product_transactions
               WHERE trans_quantity > ?
                 AND trans_date IN ({placeholders})"#
        );
        let mut values = Vec::with_capacity(dates.len() + 1);
        values.push(Value::from(threshold));
        values.extend(dates.iter().map(|d| Value::from(d.clone())));

        ProductTransaction::find()
            .from_raw_sql(Statement::from_sql_and_values(DbBackend::Sqlite, sql, values))
            .all(db)
            .await
    }

    #[cfg(test)]
    pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, sea_orm::DbErr> {
        use sea_orm::PaginatorTrait;
        ProductTransaction::find().count(db).await
    }
}

#[cfg(test)]
pub(crate) fn sample(date: &str, crop: &str, market: &str, qty: f64) -> TransactionInput {
    TransactionInput {
        trans_date: date.to_string(),
        crop_code: format!("C-{crop}"),
        crop_name: crop.to_string(),
        tc_type: "N04".to_string(),
        market_code: market.to_string(),
        market_name: format!("市场{market}"),
        upper_price: 30.0,
        middle_price: 20.0,
        lower_price: 10.0,
        avg_price: 20.0,
        trans_quantity: qty,
    }
}
