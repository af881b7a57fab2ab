use crate::error::CoreError;
use crate::storage::entity::product_transaction::Model as TransactionRecord;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RankingOptions {
    /// 是否只保留当季食材
    pub seasonal: bool,
    /// 参考日期为今天及之前 window_days 天
    pub window_days: u32,
    /// 成交量分位门槛 P，取值 [0, 1)
    pub percentile: f64,
    pub timeout: Duration,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            seasonal: true,
            window_days: 1,
            percentile: 0.5,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RankingOutcome {
    /// 按成交量降序，每个作物一条；可能为空
    Ranked(Vec<TransactionRecord>),
    /// 要求当季过滤但本月没有任何当季食材
    EmptySeasonal,
}

/// 提供给路由层的响应结构
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RankingResponse {
    Ok { records: Vec<TransactionRecord> },
    EmptySeasonal { message: String },
    Error { detail: String },
}

impl From<Result<RankingOutcome, CoreError>> for RankingResponse {
    fn from(res: Result<RankingOutcome, CoreError>) -> Self {
        match res {
            Ok(RankingOutcome::Ranked(records)) => RankingResponse::Ok { records },
            Ok(RankingOutcome::EmptySeasonal) => RankingResponse::EmptySeasonal {
                message: "今天沒有當季食材".to_string(),
            },
            Err(e) => {
                if e.is_storage() {
                    log::error!("ranking failed: {}", e);
                } else {
                    log::warn!("ranking rejected: {}", e);
                }
                RankingResponse::Error {
                    detail: e.to_string(),
                }
            }
        }
    }
}
