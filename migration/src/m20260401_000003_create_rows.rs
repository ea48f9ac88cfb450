use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rows::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rows::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rows::TableId).string().not_null())
                    .col(ColumnDef::new(Rows::Order).integer().not_null())
                    .col(ColumnDef::new(Rows::DeletedAt).timestamp().null())
                    .col(
                        ColumnDef::new(Rows::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Rows::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Rows::Table, Rows::TableId)
                            .to(Tables::Table, Tables::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rows_table_id")
                    .table(Rows::Table)
                    .col(Rows::TableId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rows::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Tables {
    Table,
    Id,
}

#[derive(Iden)]
enum Rows {
    Table,
    Id,
    TableId,
    Order,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
