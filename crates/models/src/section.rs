use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{product_type, warehouse};

/// A warehouse subdivision with capacity and temperature limits, tied to one
/// warehouse and one product type. All columns are integer-typed; `id` is
/// assigned by storage on insert.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub section_number: i32,
    pub current_temperature: i32,
    pub minimum_temperature: i32,
    pub current_capacity: i32,
    pub minimum_capacity: i32,
    pub maximum_capacity: i32,
    pub warehouse_id: i32,
    pub product_type_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Warehouse,
    ProductType,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Warehouse => Entity::belongs_to(warehouse::Entity)
                .from(Column::WarehouseId)
                .to(warehouse::Column::Id)
                .into(),
            Relation::ProductType => Entity::belongs_to(product_type::Entity)
                .from(Column::ProductTypeId)
                .to(product_type::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_section_number(number: i32) -> Result<(), errors::ModelError> {
    if number <= 0 {
        return Err(errors::ModelError::Validation("section_number must be positive".into()));
    }
    Ok(())
}
