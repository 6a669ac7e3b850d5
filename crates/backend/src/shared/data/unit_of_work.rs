use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};

/// Единица работы: одна транзакция на запрос изменения данных.
///
/// Если `commit` не вызван, транзакция откатывается при удалении.
pub struct UnitOfWork {
    txn: DatabaseTransaction,
}

impl UnitOfWork {
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, DbErr> {
        let txn = db.begin().await?;
        Ok(Self { txn })
    }

    /// Соединение для репозиториев внутри транзакции
    pub fn conn(&self) -> &DatabaseTransaction {
        &self.txn
    }

    pub async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }

    pub async fn rollback(self) -> Result<(), DbErr> {
        self.txn.rollback().await
    }
}
