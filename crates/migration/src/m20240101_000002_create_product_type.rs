//! Create `product_types` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductType::Table)
                    .if_not_exists()
                    .col(pk_auto(ProductType::Id))
                    .col(string_len(ProductType::Description, 256).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ProductType::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ProductType {
    #[sea_orm(iden = "product_types")]
    Table,
    Id,
    Description,
}
