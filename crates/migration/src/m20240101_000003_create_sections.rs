//! Create `sections` table.
//!
//! `warehouse_id` and `product_type_id` deliberately carry no foreign keys:
//! references are validated by the service at write time only.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Section::Table)
                    .if_not_exists()
                    .col(pk_auto(Section::Id))
                    .col(integer(Section::SectionNumber).not_null())
                    .col(integer(Section::CurrentTemperature).not_null())
                    .col(integer(Section::MinimumTemperature).not_null())
                    .col(integer(Section::CurrentCapacity).not_null())
                    .col(integer(Section::MinimumCapacity).not_null())
                    .col(integer(Section::MaximumCapacity).not_null())
                    .col(integer(Section::WarehouseId).not_null())
                    .col(integer(Section::ProductTypeId).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Section::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Section {
    #[sea_orm(iden = "sections")]
    Table,
    Id,
    SectionNumber,
    CurrentTemperature,
    MinimumTemperature,
    CurrentCapacity,
    MinimumCapacity,
    MaximumCapacity,
    WarehouseId,
    ProductTypeId,
}
