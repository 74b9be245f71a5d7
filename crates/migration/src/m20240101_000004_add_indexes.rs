use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Sections: unique section_number. The service-level probe is only a
        // fast-fail; this index is the actual enforcement under concurrency.
        manager
            .create_index(
                Index::create()
                    .name("uniq_section_number")
                    .table(Section::Table)
                    .col(Section::SectionNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Sections: index on warehouse_id for per-warehouse listings
        manager
            .create_index(
                Index::create()
                    .name("idx_section_warehouse")
                    .table(Section::Table)
                    .col(Section::WarehouseId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_section_number").table(Section::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_section_warehouse").table(Section::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Section {
    #[sea_orm(iden = "sections")]
    Table,
    SectionNumber,
    WarehouseId,
}
