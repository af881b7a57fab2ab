use super::markdown::FILE_TIMESTAMP_FORMAT;
use chrono::{Duration, NaiveDateTime};
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;

/// 最近 `days` 天内生成过的菜名（由文件名 `YYYY-MM-DD-HHMMSS_菜名.md` 解析）
///
/// 目录不存在时返回空；文件名不符或时间戳无效的文件忽略。
pub fn recent_recipe_names(
    dir: &Path,
    now: NaiveDateTime,
    days: i64,
) -> std::io::Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let re = Regex::new(r"^(\d{4}-\d{2}-\d{2}-\d{6})_(.+)\.md$")
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let cutoff = now - Duration::days(days);

    let mut names = BTreeSet::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_name = entry.file_name();
        let Some(file_name) = file_name.to_str() else {
            continue;
        };
        let Some(caps) = re.captures(file_name) else {
            continue;
        };
        let Ok(ts) = NaiveDateTime::parse_from_str(&caps[1], FILE_TIMESTAMP_FORMAT) else {
            continue;
        };
        if ts >= cutoff {
            names.insert(caps[2].to_string());
        }
    }
    Ok(names.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn keeps_unique_names_inside_window() {
        let dir = tempfile::tempdir().unwrap();
        for f in [
            "2025-10-17-120000_蘿蔔糕.md",
            "2025-10-15-080000_蘿蔔糕.md",
            "2025-10-12-090000_涼拌筍.md",
            "2025-10-01-090000_舊菜.md",
            "2025-13-01-090000_壞日期.md",
            "notes.md",
        ] {
            std::fs::write(dir.path().join(f), "x").unwrap();
        }
        let now = NaiveDate::from_ymd_opt(2025, 10, 18)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        let names = recent_recipe_names(dir.path(), now, 7).unwrap();
        assert_eq!(names, vec!["涼拌筍".to_string(), "蘿蔔糕".to_string()]);
    }

    #[test]
    fn missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let now = NaiveDate::from_ymd_opt(2025, 10, 18)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(recent_recipe_names(&dir.path().join("nope"), now, 7)
            .unwrap()
            .is_empty());
    }
}
