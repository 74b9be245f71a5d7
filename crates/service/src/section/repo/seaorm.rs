use sea_orm::sea_query::{Expr, Query, UpdateStatement};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, QueryFilter, QueryOrder, Set, SqlErr,
};

use models::section::{self, Column, Entity};

use crate::section::domain::{NewSection, SectionNumberProbe, SectionPatch};
use crate::section::errors::SectionError;
use crate::section::repository::SectionRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmSectionRepository {
    pub db: DatabaseConnection,
}

/// Build the sparse UPDATE for a patch, or `None` when the patch is empty.
///
/// Assignments follow the fixed declaration order of the `sections` columns,
/// never the arrival order of the patch, so generated statements are
/// reproducible. The statement returns the updated row in the same round
/// trip; there is no separate confirmation read.
pub(crate) fn patch_statement(id: i32, patch: &SectionPatch) -> Option<UpdateStatement> {
    if patch.is_empty() {
        return None;
    }
    let mut stmt = Query::update();
    stmt.table(Entity);
    if let Some(v) = patch.section_number {
        stmt.value(Column::SectionNumber, v);
    }
    if let Some(v) = patch.current_temperature {
        stmt.value(Column::CurrentTemperature, v);
    }
    if let Some(v) = patch.minimum_temperature {
        stmt.value(Column::MinimumTemperature, v);
    }
    if let Some(v) = patch.current_capacity {
        stmt.value(Column::CurrentCapacity, v);
    }
    if let Some(v) = patch.minimum_capacity {
        stmt.value(Column::MinimumCapacity, v);
    }
    if let Some(v) = patch.maximum_capacity {
        stmt.value(Column::MaximumCapacity, v);
    }
    if let Some(v) = patch.warehouse_id {
        stmt.value(Column::WarehouseId, v);
    }
    if let Some(v) = patch.product_type_id {
        stmt.value(Column::ProductTypeId, v);
    }
    stmt.and_where(Expr::col(Column::Id).eq(id));
    stmt.returning_all();
    Some(stmt)
}

#[async_trait::async_trait]
impl SectionRepository for SeaOrmSectionRepository {
    async fn create(&self, new: NewSection) -> Result<section::Model, SectionError> {
        let am = section::ActiveModel {
            section_number: Set(new.section_number),
            current_temperature: Set(new.current_temperature),
            minimum_temperature: Set(new.minimum_temperature),
            current_capacity: Set(new.current_capacity),
            minimum_capacity: Set(new.minimum_capacity),
            maximum_capacity: Set(new.maximum_capacity),
            warehouse_id: Set(new.warehouse_id),
            product_type_id: Set(new.product_type_id),
            ..Default::default()
        };
        am.insert(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                // The unique index closes the check/write race the service
                // probe leaves open.
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    SectionError::Conflict("section number already exists".into())
                }
                _ => SectionError::Storage(e.to_string()),
            })
    }

    async fn get(&self, id: i32) -> Result<section::Model, SectionError> {
        Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SectionError::Storage(e.to_string()))?
            .ok_or(SectionError::NotFound)
    }

    async fn get_all(&self) -> Result<Vec<section::Model>, SectionError> {
        Entity::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SectionError::Storage(e.to_string()))
    }

    async fn update(&self, id: i32, patch: &SectionPatch) -> Result<section::Model, SectionError> {
        let Some(stmt) = patch_statement(id, patch) else {
            // No-op write: skip the statement and return the current row.
            return self.get(id).await;
        };
        let backend = self.db.get_database_backend();
        section::Model::find_by_statement(backend.build(&stmt))
            .one(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    SectionError::Conflict("section number already exists".into())
                }
                _ => SectionError::Storage(e.to_string()),
            })?
            .ok_or(SectionError::NotFound)
    }

    async fn delete(&self, id: i32) -> Result<(), SectionError> {
        let res = Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SectionError::Storage(e.to_string()))?;
        if res.rows_affected == 0 {
            return Err(SectionError::NotFound);
        }
        Ok(())
    }

    async fn exists_by_section_number(
        &self,
        number: i32,
    ) -> Result<SectionNumberProbe, SectionError> {
        let found = Entity::find()
            .filter(Column::SectionNumber.eq(number))
            .one(&self.db)
            .await
            .map_err(|e| SectionError::Storage(e.to_string()))?;
        Ok(found.map_or(SectionNumberProbe::Free, |r| SectionNumberProbe::TakenBy(r.id)))
    }
}
