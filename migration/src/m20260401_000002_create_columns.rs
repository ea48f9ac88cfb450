use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Columns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Columns::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Columns::TableId).string().not_null())
                    .col(ColumnDef::new(Columns::Name).string().not_null())
                    .col(
                        ColumnDef::new(Columns::Type)
                            .string()
                            .not_null()
                            .default("text"),
                    )
                    .col(ColumnDef::new(Columns::Order).integer().not_null())
                    .col(ColumnDef::new(Columns::Options).text().null())
                    .col(ColumnDef::new(Columns::DeletedAt).timestamp().null())
                    .col(
                        ColumnDef::new(Columns::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Columns::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // No cascade: soft-deleting a table leaves its columns in place.
                    .foreign_key(
                        ForeignKey::create()
                            .from(Columns::Table, Columns::TableId)
                            .to(Tables::Table, Tables::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_columns_table_id")
                    .table(Columns::Table)
                    .col(Columns::TableId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Columns::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Tables {
    Table,
    Id,
}

#[derive(Iden)]
enum Columns {
    Table,
    Id,
    TableId,
    Name,
    Type,
    Order,
    Options,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
