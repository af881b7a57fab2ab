use chrono::NaiveDate;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Fetch {
        date: Option<NaiveDate>,
    },
    Rank {
        seasonal: bool,
        window_days: Option<u32>,
    },
    SeasonalToday {
        month: Option<i32>,
    },
    SeasonalImport {
        path: PathBuf,
    },
    Novel {
        exclude: Vec<String>,
    },
    RecipeGenerate {
        n: usize,
        model: Option<String>,
    },
    RecipeHistory,
    Help,
    Unknown(String),
}

pub const HELP: &str = "\
用法:
  fetch [YYYY-MM-DD]          抓取指定日期（默认今天）的批發行情
  rank [all] [window_days]    當季成交量排名；all 表示不限當季
  seasonal today [month]      列出當月當季食材
  seasonal import <file.json> 匯入當季食材
  novel [exclude...]          列出尚未登記的作物
  recipe generate [n] [model] 生成食譜
  recipe history              列出近期食譜名
  help";

impl FromStr for AppCommand {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.is_empty() {
            return Ok(AppCommand::Help);
        }

        match parts[0] {
            "fetch" => match parts.get(1) {
                None => Ok(AppCommand::Fetch { date: None }),
                Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                    Ok(date) => Ok(AppCommand::Fetch { date: Some(date) }),
                    Err(_) => Ok(AppCommand::Unknown("用法: fetch [YYYY-MM-DD]".to_string())),
                },
            },
            "rank" => {
                let mut idx = 1usize;
                let seasonal = if parts.get(1) == Some(&"all") {
                    idx += 1;
                    false
                } else {
                    true
                };
                match parts.get(idx) {
                    None => Ok(AppCommand::Rank {
                        seasonal,
                        window_days: None,
                    }),
                    Some(raw) => match raw.parse::<u32>() {
                        Ok(n) => Ok(AppCommand::Rank {
                            seasonal,
                            window_days: Some(n),
                        }),
                        Err(_) => Ok(AppCommand::Unknown(
                            "用法: rank [all] [window_days]".to_string(),
                        )),
                    },
                }
            }
            "seasonal" => match parts.get(1).copied() {
                Some("today") => match parts.get(2) {
                    None => Ok(AppCommand::SeasonalToday { month: None }),
                    Some(raw) => match raw.parse::<i32>() {
                        Ok(m) => Ok(AppCommand::SeasonalToday { month: Some(m) }),
                        Err(_) => Ok(AppCommand::Unknown(
                            "用法: seasonal today [month]".to_string(),
                        )),
                    },
                },
                Some("import") => match parts.get(2) {
                    Some(path) => Ok(AppCommand::SeasonalImport {
                        path: PathBuf::from(path),
                    }),
                    None => Ok(AppCommand::Unknown(
                        "用法: seasonal import <file.json>".to_string(),
                    )),
                },
                _ => Ok(AppCommand::Unknown(
                    "用法: seasonal today [month] | seasonal import <file.json>".to_string(),
                )),
            },
            "novel" => Ok(AppCommand::Novel {
                exclude: parts[1..].iter().map(|s| s.to_string()).collect(),
            }),
            "recipe" => match parts.get(1).copied() {
                Some("generate") => {
                    let mut idx = 2usize;
                    let mut n = 1usize;
                    if let Some(v) = parts.get(idx).and_then(|s| s.parse::<usize>().ok()) {
                        n = v.max(1);
                        idx += 1;
                    }
                    let model = parts.get(idx).map(|s| s.to_string());
                    Ok(AppCommand::RecipeGenerate { n, model })
                }
                Some("history") => Ok(AppCommand::RecipeHistory),
                _ => Ok(AppCommand::Unknown(
                    "用法: recipe generate [n] [model] | recipe history".to_string(),
                )),
            },
            "help" | "h" | "--help" | "-h" => Ok(AppCommand::Help),
            _ => Ok(AppCommand::Unknown(format!("未知命令: {}", parts[0]))),
        }
    }
}
