use sea_orm::DbErr;

/// 核心查询（排名、新作物、当季清单）的错误类型
///
/// 空结果不是错误：排名为空时返回 `RankingOutcome::Ranked(vec![])`。
#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("storage error: {0}")]
    Storage(#[from] DbErr),
    #[error("query timed out after {0}s")]
    Timeout(u64),
    #[error("validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }

    /// 连接/查询失败与超时都归为存储类错误
    pub fn is_storage(&self) -> bool {
        matches!(self, CoreError::Storage(_) | CoreError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_kinds_are_distinguished_from_validation() {
        assert!(CoreError::Storage(DbErr::Custom("boom".into())).is_storage());
        assert!(CoreError::Timeout(10).is_storage());
        assert!(!CoreError::validation("bad month").is_storage());
    }
}
