//! Обобщённый сервис CRUD: валидация, уникальность кода, проверки
//! существования и единица работы поверх `base_repository`

use std::collections::HashSet;

use contracts::domain::common::{
    AggregateId, AggregateRoot, EntityForm, EntityMetadata, UpdateForm,
};
use contracts::shared::paging::{FilterRequest, PagingResult};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::shared::data::base_repository as repository;
use crate::shared::data::table_mapping::TableMapping;
use crate::shared::data::unit_of_work::UnitOfWork;
use crate::shared::error::ServiceError;

/// Новый код для формы создания
pub async fn get_new_code<T: TableMapping>(db: &DatabaseConnection) -> Result<String, ServiceError> {
    Ok(repository::get_new_code::<T, _>(db).await?)
}

/// Запись по бизнес-коду
pub async fn get<T: TableMapping>(
    db: &DatabaseConnection,
    code: &str,
) -> Result<T::Model, ServiceError> {
    repository::get_by_code::<T, _>(db, code)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("{} with code {}", T::table(), code)))
}

pub async fn list_by_ids<T: TableMapping>(
    db: &DatabaseConnection,
    ids: &[Uuid],
) -> Result<Vec<T::Entity>, ServiceError> {
    Ok(repository::list_by_ids::<T, _>(db, ids).await?)
}

pub async fn filter<T: TableMapping>(
    db: &DatabaseConnection,
    request: &FilterRequest,
) -> Result<PagingResult<T::Model>, ServiceError> {
    let (data, total_record) = repository::filter::<T, _>(db, request).await?;
    Ok(PagingResult { data, total_record })
}

/// Создание записи. ID генерируется здесь.
pub async fn insert<T: TableMapping>(
    db: &DatabaseConnection,
    dto: T::CreateDto,
) -> Result<Uuid, ServiceError> {
    dto.validate().map_err(ServiceError::Invalid)?;

    let uow = UnitOfWork::begin(db).await?;
    if repository::exists_code::<T, _>(uow.conn(), dto.code(), None).await? {
        uow.rollback().await?;
        return Err(ServiceError::DuplicateCode(dto.code().to_string()));
    }

    let id = Uuid::new_v4();
    repository::insert::<T, _>(uow.conn(), id, &dto, &EntityMetadata::new_created(None)).await?;
    uow.commit().await?;

    tracing::info!("{}: inserted {} ({})", T::table(), dto.code(), id);
    Ok(id)
}

/// Полная замена изменяемых полей существующей записи
pub async fn update<T: TableMapping>(
    db: &DatabaseConnection,
    id: Uuid,
    dto: T::UpdateDto,
) -> Result<(), ServiceError> {
    if let Some(body) = dto.target_id() {
        if body != id {
            return Err(ServiceError::IdMismatch { path: id, body });
        }
    }
    dto.validate().map_err(ServiceError::Invalid)?;

    let uow = UnitOfWork::begin(db).await?;
    let Some(mut existing) = repository::get_by_id::<T, _>(uow.conn(), id).await? else {
        uow.rollback().await?;
        return Err(ServiceError::NotFound(format!("{} with id {}", T::table(), id)));
    };
    if repository::exists_code::<T, _>(uow.conn(), dto.code(), Some(id)).await? {
        uow.rollback().await?;
        return Err(ServiceError::DuplicateCode(dto.code().to_string()));
    }

    existing.metadata_mut().touch(None);
    let affected = repository::update::<T, _>(uow.conn(), id, &dto, existing.metadata()).await?;
    if affected != 1 {
        uow.rollback().await?;
        return Err(ServiceError::NotFound(format!("{} with id {}", T::table(), id)));
    }
    uow.commit().await?;

    tracing::info!(
        "{} {} updated (was {})",
        <T::Entity as AggregateRoot>::element_name(),
        existing.id().as_string(),
        existing.code()
    );
    Ok(())
}

pub async fn delete<T: TableMapping>(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let affected = repository::delete::<T, _>(db, id).await?;
    if affected == 0 {
        return Err(ServiceError::NotFound(format!("{} with id {}", T::table(), id)));
    }
    tracing::info!("{}: deleted {}", T::table(), id);
    Ok(())
}

/// Удаление списка записей по принципу «всё или ничего»: если хотя бы
/// одного ID нет, транзакция откатывается и ни одна строка не удаляется.
pub async fn delete_many<T: TableMapping>(
    db: &DatabaseConnection,
    ids: &[Uuid],
) -> Result<(), ServiceError> {
    let mut seen = HashSet::new();
    let unique: Vec<Uuid> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();
    if unique.is_empty() {
        return Err(ServiceError::Invalid(vec!["id list is empty".to_string()]));
    }

    let uow = UnitOfWork::begin(db).await?;
    let affected = repository::delete_many::<T, _>(uow.conn(), &unique).await?;
    if affected != unique.len() as u64 {
        uow.rollback().await?;
        return Err(ServiceError::NotFound(format!(
            "{}: {} of {} ids exist, nothing deleted",
            T::table(),
            affected,
            unique.len()
        )));
    }
    uow.commit().await?;

    tracing::info!("{}: deleted {} records", T::table(), affected);
    Ok(())
}

pub async fn count<T: TableMapping>(db: &DatabaseConnection) -> Result<i64, ServiceError> {
    Ok(repository::count::<T, _>(db).await?)
}
