use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row of the `Memo` table. The table is owned by the database operator;
/// column names follow its DDL.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "Memo")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "ID")]
    pub id: i64,
    #[sea_orm(column_name = "Name")]
    pub name: String,
    #[sea_orm(column_name = "Description", column_type = "Text")]
    pub description: String,
    #[sea_orm(column_name = "Reminder")]
    pub reminder: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
