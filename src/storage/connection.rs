use crate::storage::entity::{product_transaction, seasonal_ingredient};
use log::info;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use std::time::Duration;

pub async fn establish_connection(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());
    if is_memory_url(db_url) {
        // 内存库每个连接各自独立，只能用单连接
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(10)
            .min_connections(2)
            .idle_timeout(Duration::from_secs(60))
            .max_lifetime(Duration::from_secs(600));
    }
    opt.connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Info);

    let db = Database::connect(opt).await?;

    if !is_memory_url(db_url) {
        // 启用 WAL 模式
        db.execute(sea_orm::Statement::from_string(
            sea_orm::DatabaseBackend::Sqlite,
            "PRAGMA journal_mode=WAL;".to_string(),
        ))
        .await?;
    }

    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let stmt = builder.build(
        schema
            .create_table_from_entity(product_transaction::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    let stmt = builder.build(
        schema
            .create_table_from_entity(seasonal_ingredient::Entity)
            .if_not_exists(),
    );
    db.execute(stmt).await?;

    // 排名查询按日期过滤
    db.execute(sea_orm::Statement::from_string(
        builder,
        "CREATE INDEX IF NOT EXISTS idx_product_transactions_trans_date ON product_transactions(trans_date);"
            .to_string(),
    ))
    .await?;

    info!("Database connection established and tables initialized: {}", db_url);

    Ok(db)
}

fn is_memory_url(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

#[cfg(test)]
pub(crate) async fn memory_db() -> DatabaseConnection {
    establish_connection("sqlite::memory:")
        .await
        .expect("in-memory sqlite")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_both_tables() {
        let db = memory_db().await;
        let backend = db.get_database_backend();
        let rows = db
            .query_all(sea_orm::Statement::from_string(
                backend,
                "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name;".to_string(),
            ))
            .await
            .unwrap();
        let names: Vec<String> = rows
            .iter()
            .filter_map(|r| r.try_get::<String>("", "name").ok())
            .collect();
        assert!(names.contains(&"product_transactions".to_string()));
        assert!(names.contains(&"seasonal_ingredients".to_string()));
    }
}
