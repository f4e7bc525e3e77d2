//! DDL for the `Memo` table.
//!
//! The service never creates or alters tables; production databases are
//! prepared by the operator. Tests use this to bootstrap throwaway stores.

use sea_orm::{ConnectionTrait, DatabaseBackend, DbErr, Statement};

pub const MYSQL_CREATE_MEMO: &str = "CREATE TABLE IF NOT EXISTS `Memo` (\
    `ID` BIGINT NOT NULL AUTO_INCREMENT, \
    `Name` VARCHAR(200) NOT NULL, \
    `Description` TEXT NOT NULL, \
    `Reminder` DATETIME NOT NULL, \
    PRIMARY KEY (`ID`))";

pub const SQLITE_CREATE_MEMO: &str = "CREATE TABLE IF NOT EXISTS \"Memo\" (\
    \"ID\" INTEGER PRIMARY KEY AUTOINCREMENT, \
    \"Name\" TEXT NOT NULL, \
    \"Description\" TEXT NOT NULL, \
    \"Reminder\" TEXT NOT NULL)";

pub fn create_memo_table_sql(backend: DatabaseBackend) -> Result<&'static str, DbErr> {
    match backend {
        DatabaseBackend::MySql => Ok(MYSQL_CREATE_MEMO),
        DatabaseBackend::Sqlite => Ok(SQLITE_CREATE_MEMO),
        other => Err(DbErr::Custom(format!("no Memo DDL for {other:?}"))),
    }
}

pub async fn create_memo_table<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let sql = create_memo_table_sql(backend)?;
    db.execute(Statement::from_string(backend, sql)).await?;
    Ok(())
}
