use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cells::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cells::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cells::RowId).string().not_null())
                    .col(ColumnDef::new(Cells::ColumnId).string().not_null())
                    .col(ColumnDef::new(Cells::Value).text().null())
                    .col(
                        ColumnDef::new(Cells::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Cells::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Cells::Table, Cells::RowId)
                            .to(Rows::Table, Rows::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Cells::Table, Cells::ColumnId)
                            .to(Columns::Table, Columns::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One cell per (row, column).
        manager
            .create_index(
                Index::create()
                    .unique()
                    .name("uq_cells_row_column")
                    .table(Cells::Table)
                    .col(Cells::RowId)
                    .col(Cells::ColumnId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cells_column_id")
                    .table(Cells::Table)
                    .col(Cells::ColumnId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cells::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Rows {
    Table,
    Id,
}

#[derive(Iden)]
enum Columns {
    Table,
    Id,
}

#[derive(Iden)]
enum Cells {
    Table,
    Id,
    RowId,
    ColumnId,
    Value,
    CreatedAt,
    UpdatedAt,
}
