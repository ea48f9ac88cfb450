pub use sea_orm_migration::prelude::*;

mod m20260401_000001_create_tables;
mod m20260401_000002_create_columns;
mod m20260401_000003_create_rows;
mod m20260401_000004_create_cells;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260401_000001_create_tables::Migration),
            Box::new(m20260401_000002_create_columns::Migration),
            Box::new(m20260401_000003_create_rows::Migration),
            Box::new(m20260401_000004_create_cells::Migration),
        ]
    }
}
