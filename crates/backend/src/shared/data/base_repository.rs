//! Обобщённый репозиторий: параметризованный SQL поверх `TableMapping`
//!
//! Все функции принимают любое соединение (`DatabaseConnection` или
//! транзакцию единицы работы), чтобы сервис мог объединять вызовы в одну
//! транзакцию.

use contracts::domain::common::{AggregateId, EntityMetadata};
use contracts::shared::paging::FilterRequest;
use sea_orm::{ConnectionTrait, FromQueryResult, Statement, Value};
use uuid::Uuid;

use super::table_mapping::TableMapping;

#[derive(Debug, FromQueryResult)]
struct CountRow {
    count: i64,
}

#[derive(Debug, FromQueryResult)]
struct CodeRow {
    code: String,
}

fn statement<C: ConnectionTrait>(db: &C, sql: &str, values: Vec<Value>) -> Statement {
    Statement::from_sql_and_values(db.get_database_backend(), sql, values)
}

/// Плейсхолдеры для IN (?, ?, ...)
fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

fn id_values(ids: &[Uuid]) -> Vec<Value> {
    ids.iter().map(|id| id.to_string().into()).collect()
}

/// Разбор ID из текстовой колонки
pub fn parse_id<I: AggregateId>(raw: &str) -> anyhow::Result<I> {
    I::from_string(raw).map_err(anyhow::Error::msg)
}

pub fn parse_uuid(raw: &str) -> anyhow::Result<Uuid> {
    parse_id::<Uuid>(raw)
}

/// Следующий код по последовательности: максимальный числовой суффикс
/// среди кодов с префиксом плюс один, дополненный нулями до `width`.
/// Коды с нецифровым суффиксом в расчёте не участвуют.
pub fn next_code<'a>(prefix: &str, width: usize, codes: impl IntoIterator<Item = &'a str>) -> String {
    let max = codes
        .into_iter()
        .filter_map(|code| code.strip_prefix(prefix))
        .filter(|suffix| !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{:0width$}", prefix, max + 1, width = width)
}

pub async fn get_new_code<T: TableMapping, C: ConnectionTrait>(db: &C) -> anyhow::Result<String> {
    let sql = format!(
        "SELECT {code} AS code FROM {table} WHERE {code} LIKE ?",
        code = T::CODE_COLUMN,
        table = T::table(),
    );
    let stmt = statement(db, &sql, vec![format!("{}%", T::CODE_PREFIX).into()]);
    let rows = CodeRow::find_by_statement(stmt).all(db).await?;
    Ok(next_code(
        T::CODE_PREFIX,
        T::CODE_WIDTH,
        rows.iter().map(|r| r.code.as_str()),
    ))
}

/// Запись по бизнес-коду (из представления)
pub async fn get_by_code<T: TableMapping, C: ConnectionTrait>(
    db: &C,
    code: &str,
) -> anyhow::Result<Option<T::Model>> {
    let sql = format!("SELECT * FROM {} WHERE {} = ?", T::VIEW, T::CODE_COLUMN);
    let stmt = statement(db, &sql, vec![code.into()]);
    T::ModelRow::find_by_statement(stmt)
        .one(db)
        .await?
        .map(T::model_from_row)
        .transpose()
}

pub async fn get_by_id<T: TableMapping, C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> anyhow::Result<Option<T::Entity>> {
    let sql = format!("SELECT * FROM {} WHERE {} = ?", T::table(), T::ID_COLUMN);
    let stmt = statement(db, &sql, vec![id.to_string().into()]);
    T::EntityRow::find_by_statement(stmt)
        .one(db)
        .await?
        .map(T::entity_from_row)
        .transpose()
}

/// Записи, у которых `LIST_BY_IDS_COLUMN` входит в список
pub async fn list_by_ids<T: TableMapping, C: ConnectionTrait>(
    db: &C,
    ids: &[Uuid],
) -> anyhow::Result<Vec<T::Entity>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let sql = format!(
        "SELECT * FROM {} WHERE {} IN ({}) ORDER BY {}",
        T::table(),
        T::LIST_BY_IDS_COLUMN,
        placeholders(ids.len()),
        T::CODE_COLUMN,
    );
    let stmt = statement(db, &sql, id_values(ids));
    T::EntityRow::find_by_statement(stmt)
        .all(db)
        .await?
        .into_iter()
        .map(T::entity_from_row)
        .collect()
}

/// Есть ли запись с таким кодом (кроме `except_id`)
pub async fn exists_code<T: TableMapping, C: ConnectionTrait>(
    db: &C,
    code: &str,
    except_id: Option<Uuid>,
) -> anyhow::Result<bool> {
    let mut sql = format!(
        "SELECT COUNT(*) AS count FROM {} WHERE {} = ?",
        T::table(),
        T::CODE_COLUMN
    );
    let mut values: Vec<Value> = vec![code.into()];
    if let Some(id) = except_id {
        sql.push_str(&format!(" AND {} <> ?", T::ID_COLUMN));
        values.push(id.to_string().into());
    }
    let row = CountRow::find_by_statement(statement(db, &sql, values))
        .one(db)
        .await?;
    Ok(row.map(|r| r.count > 0).unwrap_or(false))
}

pub async fn insert<T: TableMapping, C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    dto: &T::CreateDto,
    metadata: &EntityMetadata,
) -> anyhow::Result<()> {
    let mut columns: Vec<(&'static str, Value)> = vec![(T::ID_COLUMN, id.to_string().into())];
    columns.extend(T::create_values(dto));
    columns.push(("created_date", metadata.created_date.into()));
    columns.push(("created_by", metadata.created_by.clone().into()));
    columns.push(("modified_date", metadata.modified_date.into()));
    columns.push(("modified_by", metadata.modified_by.clone().into()));

    let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        T::table(),
        names.join(", "),
        placeholders(columns.len()),
    );
    let values = columns.into_iter().map(|(_, value)| value).collect();
    db.execute(statement(db, &sql, values)).await?;
    Ok(())
}

/// Полная замена изменяемых полей. Возвращает число изменённых строк.
pub async fn update<T: TableMapping, C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    dto: &T::UpdateDto,
    metadata: &EntityMetadata,
) -> anyhow::Result<u64> {
    let mut columns = T::update_values(dto);
    columns.push(("modified_date", metadata.modified_date.into()));
    columns.push(("modified_by", metadata.modified_by.clone().into()));

    let assignments: Vec<String> = columns
        .iter()
        .map(|(name, _)| format!("{} = ?", name))
        .collect();
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        T::table(),
        assignments.join(", "),
        T::ID_COLUMN,
    );
    let mut values: Vec<Value> = columns.into_iter().map(|(_, value)| value).collect();
    values.push(id.to_string().into());
    let result = db.execute(statement(db, &sql, values)).await?;
    Ok(result.rows_affected())
}

pub async fn delete<T: TableMapping, C: ConnectionTrait>(db: &C, id: Uuid) -> anyhow::Result<u64> {
    let sql = format!("DELETE FROM {} WHERE {} = ?", T::table(), T::ID_COLUMN);
    let result = db
        .execute(statement(db, &sql, vec![id.to_string().into()]))
        .await?;
    Ok(result.rows_affected())
}

/// Удаление по списку ID одним `IN`. Атомарность обеспечивает вызывающий
/// через транзакцию.
pub async fn delete_many<T: TableMapping, C: ConnectionTrait>(
    db: &C,
    ids: &[Uuid],
) -> anyhow::Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let sql = format!(
        "DELETE FROM {} WHERE {} IN ({})",
        T::table(),
        T::ID_COLUMN,
        placeholders(ids.len()),
    );
    let result = db.execute(statement(db, &sql, id_values(ids))).await?;
    Ok(result.rows_affected())
}

pub async fn count<T: TableMapping, C: ConnectionTrait>(db: &C) -> anyhow::Result<i64> {
    let sql = format!("SELECT COUNT(*) AS count FROM {}", T::table());
    let row = CountRow::find_by_statement(statement(db, &sql, Vec::new()))
        .one(db)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Failed to get count"))?;
    Ok(row.count)
}

/// Страница модели чтения с поиском по коду и наименованию
pub async fn filter<T: TableMapping, C: ConnectionTrait>(
    db: &C,
    request: &FilterRequest,
) -> anyhow::Result<(Vec<T::Model>, i64)> {
    let (where_sql, params): (String, Vec<Value>) = match request.search_term() {
        Some(term) => {
            let pattern = format!("%{}%", term);
            (
                format!("{} LIKE ? OR {} LIKE ?", T::CODE_COLUMN, T::NAME_COLUMN),
                vec![pattern.clone().into(), pattern.into()],
            )
        }
        None => (String::from("1=1"), Vec::new()),
    };

    let count_sql = format!(
        "SELECT COUNT(*) AS count FROM {} WHERE {}",
        T::VIEW,
        where_sql
    );
    let total = CountRow::find_by_statement(statement(db, &count_sql, params.clone()))
        .one(db)
        .await?
        .map(|r| r.count)
        .unwrap_or(0);

    let sql = format!(
        "SELECT * FROM {} WHERE {} ORDER BY {} LIMIT ? OFFSET ?",
        T::VIEW,
        where_sql,
        T::CODE_COLUMN,
    );
    let mut values = params;
    values.push(i64::try_from(request.limit()).unwrap_or(i64::MAX).into());
    values.push(i64::try_from(request.offset()).unwrap_or(i64::MAX).into());

    let items = T::ModelRow::find_by_statement(statement(db, &sql, values))
        .all(db)
        .await?
        .into_iter()
        .map(T::model_from_row)
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok((items, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_code_on_empty_table() {
        assert_eq!(next_code("D", 2, Vec::<&str>::new()), "D01");
        assert_eq!(next_code("NN", 5, Vec::<&str>::new()), "NN00001");
    }

    #[test]
    fn test_next_code_uses_numeric_maximum() {
        // "D9" < "D10" numerically, but not lexicographically
        let codes = vec!["D9", "D10", "D02"];
        assert_eq!(next_code("D", 2, codes), "D11");
    }

    #[test]
    fn test_next_code_ignores_foreign_codes() {
        let codes = vec!["DX01", "D", "D07A", "PB99", "D03"];
        assert_eq!(next_code("D", 2, codes), "D04");
    }

    #[test]
    fn test_next_code_grows_past_width() {
        assert_eq!(next_code("D", 2, vec!["D99"]), "D100");
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders(1), "?");
        assert_eq!(placeholders(3), "?, ?, ?");
    }
}
