//! 民国纪年日期工具。上游 API 与 `trans_date` 字段都使用 `YYY.MM.DD` 格式。

use chrono::{Datelike, Duration, NaiveDate};

pub const ROC_YEAR_OFFSET: i32 = 1911;

pub fn roc_date_string(date: NaiveDate) -> String {
    format!(
        "{:03}.{:02}.{:02}",
        date.year() - ROC_YEAR_OFFSET,
        date.month(),
        date.day()
    )
}

/// 参考日期集合：今天以及之前 `window_days` 天，用于容忍上游报送延迟
pub fn reference_dates(today: NaiveDate, window_days: u32) -> Vec<String> {
    (0..=window_days as i64)
        .map(|offset| roc_date_string(today - Duration::days(offset)))
        .collect()
}
