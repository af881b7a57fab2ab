mod ai;
mod calendar;
mod commands;
mod config;
mod error;
mod ingest;
mod normalize;
mod novelty;
mod ranking;
mod recipe;
mod registry;
mod season;
mod storage;

use anyhow::Context;
use chrono::Local;
use std::sync::Arc;

use crate::commands::AppCommand;
use crate::config::AppConfig;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let ts = Local::now().format("%Y%m%d-%H%M%S").to_string();
    let log_dir = std::path::PathBuf::from("logs");
    std::fs::create_dir_all(&log_dir)?;
    let log_file = std::fs::File::create(log_dir.join(format!("app-{}.log", ts)))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file))) // 输出到文件，stdout 只留 JSON
        .filter_level(log::LevelFilter::Warn)
        .filter_module("seasonal_market", log::LevelFilter::Info)
        .filter_module("sqlx", log::LevelFilter::Error)
        .filter_module("sea_orm", log::LevelFilter::Error)
        .init();

    // 加载 .env，不存在时直接用系统环境变量
    if dotenv::dotenv().is_err() {
        log::warn!("no .env file found, using process environment");
    }

    let line = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let cmd: AppCommand = line.parse().unwrap_or(AppCommand::Help);
    if cmd == AppCommand::Help {
        println!("{}", commands::HELP);
        return Ok(());
    }

    let cfg = AppConfig::from_env()?;
    let db = storage::establish_connection(&cfg.database_url)
        .await
        .with_context(|| format!("数据库连接失败: {}", cfg.database_url))?;
    let db = Arc::new(db);

    match commands::run(cmd, &cfg, db, Local::now().naive_local()).await {
        Ok(out) => {
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(())
        }
        Err(e) => {
            log::error!("command failed: {:#}", e);
            println!(
                "{}",
                serde_json::json!({ "status": "error", "detail": format!("{:#}", e) })
            );
            std::process::exit(1);
        }
    }
}
