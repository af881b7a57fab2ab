use crate::error::CoreError;

/// 判断月份是否落在（可能跨年的）季节窗口内，首尾月份均包含。
///
/// `start > end` 表示跨年，例如 11..2 即 11 月至次年 2 月。
/// 超出 1..=12 的输入由调用方在入库时校验。
pub fn is_in_season(start: u32, end: u32, month: u32) -> bool {
    if start <= end {
        start <= month && month <= end
    } else {
        month >= start || month <= end
    }
}

/// 季节窗口首尾月份都须在 1..=12；start > end 合法（跨年）
pub fn validate_season_window(start: i32, end: i32) -> Result<(), CoreError> {
    validate_month(start)?;
    validate_month(end)?;
    Ok(())
}

pub fn validate_month(month: i32) -> Result<u32, CoreError> {
    if (1..=12).contains(&month) {
        Ok(month as u32)
    } else {
        Err(CoreError::validation(format!(
            "month must be within 1..=12, got {month}"
        )))
    }
}
