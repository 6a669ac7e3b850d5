use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;

/// Схема БД: таблицы сущностей и представления для моделей чтения
const SCHEMA: &[(&str, &str)] = &[
    (
        "department",
        r#"
        CREATE TABLE IF NOT EXISTS department (
            department_id TEXT PRIMARY KEY NOT NULL,
            department_code TEXT NOT NULL UNIQUE,
            department_name TEXT NOT NULL,
            created_date TEXT,
            created_by TEXT,
            modified_date TEXT,
            modified_by TEXT
        );
        "#,
    ),
    (
        "view_department",
        r#"
        CREATE VIEW IF NOT EXISTS view_department AS
        SELECT
            department_id,
            department_code,
            department_name,
            created_date,
            created_by,
            modified_date,
            modified_by
        FROM department;
        "#,
    ),
    (
        "receiver",
        r#"
        CREATE TABLE IF NOT EXISTS receiver (
            receiver_id TEXT PRIMARY KEY NOT NULL,
            transfer_asset_id TEXT NOT NULL,
            receiver_code TEXT NOT NULL UNIQUE,
            receiver_full_name TEXT NOT NULL,
            receiver_delegate TEXT,
            receiver_position TEXT,
            receiver_order INTEGER NOT NULL DEFAULT 0,
            created_date TEXT,
            created_by TEXT,
            modified_date TEXT,
            modified_by TEXT
        );
        "#,
    ),
    (
        "idx_receiver_transfer_asset",
        "CREATE INDEX IF NOT EXISTS idx_receiver_transfer_asset ON receiver (transfer_asset_id);",
    ),
    (
        "view_receiver",
        r#"
        CREATE VIEW IF NOT EXISTS view_receiver AS
        SELECT
            receiver_id,
            transfer_asset_id,
            receiver_code,
            receiver_full_name,
            receiver_delegate,
            receiver_position,
            receiver_order,
            created_date,
            created_by,
            modified_date,
            modified_by
        FROM receiver;
        "#,
    ),
    (
        "transfer_asset_detail",
        r#"
        CREATE TABLE IF NOT EXISTS transfer_asset_detail (
            transfer_asset_detail_id TEXT PRIMARY KEY NOT NULL,
            transfer_asset_detail_code TEXT NOT NULL UNIQUE,
            transfer_asset_id TEXT NOT NULL,
            fixed_asset_id TEXT NOT NULL,
            old_department_id TEXT NOT NULL,
            new_department_id TEXT NOT NULL,
            reason TEXT,
            created_date TEXT,
            created_by TEXT,
            modified_date TEXT,
            modified_by TEXT
        );
        "#,
    ),
    (
        "view_transfer_asset_detail",
        r#"
        CREATE VIEW IF NOT EXISTS view_transfer_asset_detail AS
        SELECT
            t.transfer_asset_detail_id,
            t.transfer_asset_detail_code,
            t.transfer_asset_id,
            t.fixed_asset_id,
            t.old_department_id,
            od.department_name AS old_department_name,
            t.new_department_id,
            nd.department_name AS new_department_name,
            t.reason,
            t.created_date,
            t.created_by,
            t.modified_date,
            t.modified_by
        FROM transfer_asset_detail t
        LEFT JOIN department od ON od.department_id = t.old_department_id
        LEFT JOIN department nd ON nd.department_id = t.new_department_id;
        "#,
    ),
];

/// Подключение к файлу SQLite (создаётся при отсутствии) и применение схемы
pub async fn initialize_database(db_file: &Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);

    tracing::info!("Opening database {}", db_url);
    let mut options = ConnectOptions::new(db_url);
    options.sqlx_logging(false);
    let conn = Database::connect(options).await?;

    apply_schema(&conn).await?;
    Ok(conn)
}

/// Создаёт недостающие таблицы и представления
pub async fn apply_schema<C: ConnectionTrait>(conn: &C) -> anyhow::Result<()> {
    let backend = conn.get_database_backend();
    for (name, sql) in SCHEMA {
        tracing::debug!("Ensuring schema object {}", name);
        conn.execute(Statement::from_string(backend, sql.to_string()))
            .await
            .map_err(|e| anyhow::anyhow!("schema object {} failed: {}", name, e))?;
    }
    Ok(())
}

/// In-memory база для тестов. Одно соединение: каждое новое соединение
/// к `sqlite::memory:` получило бы пустую базу.
#[cfg(test)]
pub async fn test_connection() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let conn = Database::connect(options)
        .await
        .expect("in-memory sqlite must open");
    apply_schema(&conn).await.expect("schema must apply");
    conn
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::FromQueryResult;

    #[derive(Debug, FromQueryResult)]
    struct NameRow {
        name: String,
    }

    #[tokio::test]
    async fn test_schema_creates_tables_and_views() {
        let conn = test_connection().await;
        let rows = NameRow::find_by_statement(Statement::from_string(
            conn.get_database_backend(),
            "SELECT name FROM sqlite_master WHERE type IN ('table', 'view') ORDER BY name"
                .to_string(),
        ))
        .all(&conn)
        .await
        .unwrap();
        let names: Vec<String> = rows.into_iter().map(|r| r.name).collect();
        for expected in [
            "department",
            "receiver",
            "transfer_asset_detail",
            "view_department",
            "view_receiver",
            "view_transfer_asset_detail",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {}", expected);
        }
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let conn = test_connection().await;
        assert!(apply_schema(&conn).await.is_ok());
    }
}
