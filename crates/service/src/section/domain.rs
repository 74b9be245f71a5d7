use serde::Deserialize;

use models::section;

/// Input for creating a section. The id is assigned by storage.
#[derive(Clone, Debug, Deserialize)]
pub struct NewSection {
    pub section_number: i32,
    pub current_temperature: i32,
    pub minimum_temperature: i32,
    pub current_capacity: i32,
    pub minimum_capacity: i32,
    pub maximum_capacity: i32,
    pub warehouse_id: i32,
    pub product_type_id: i32,
}

/// Sparse update for a section: one presence indicator per recognized field.
///
/// Fields are declared in the canonical column order of the `sections`
/// table; generated statements follow this order regardless of how the
/// patch arrived. Unknown keys in an incoming document are dropped during
/// deserialization, and a value of the wrong type fails there instead of
/// inside the statement builder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SectionPatch {
    #[serde(default)]
    pub section_number: Option<i32>,
    #[serde(default)]
    pub current_temperature: Option<i32>,
    #[serde(default)]
    pub minimum_temperature: Option<i32>,
    #[serde(default)]
    pub current_capacity: Option<i32>,
    #[serde(default)]
    pub minimum_capacity: Option<i32>,
    #[serde(default)]
    pub maximum_capacity: Option<i32>,
    #[serde(default)]
    pub warehouse_id: Option<i32>,
    #[serde(default)]
    pub product_type_id: Option<i32>,
}

impl SectionPatch {
    /// True when no field is supplied; callers must treat this as a no-op
    /// write rather than issuing a degenerate statement.
    pub fn is_empty(&self) -> bool {
        self.section_number.is_none()
            && self.current_temperature.is_none()
            && self.minimum_temperature.is_none()
            && self.current_capacity.is_none()
            && self.minimum_capacity.is_none()
            && self.maximum_capacity.is_none()
            && self.warehouse_id.is_none()
            && self.product_type_id.is_none()
    }

    /// Overwrite exactly the supplied fields on `row`.
    pub fn apply(&self, row: &mut section::Model) {
        if let Some(v) = self.section_number {
            row.section_number = v;
        }
        if let Some(v) = self.current_temperature {
            row.current_temperature = v;
        }
        if let Some(v) = self.minimum_temperature {
            row.minimum_temperature = v;
        }
        if let Some(v) = self.current_capacity {
            row.current_capacity = v;
        }
        if let Some(v) = self.minimum_capacity {
            row.minimum_capacity = v;
        }
        if let Some(v) = self.maximum_capacity {
            row.maximum_capacity = v;
        }
        if let Some(v) = self.warehouse_id {
            row.warehouse_id = v;
        }
        if let Some(v) = self.product_type_id {
            row.product_type_id = v;
        }
    }
}

/// Tri-state result of the section-number uniqueness probe.
///
/// "Taken" is a normal outcome, not an error; it carries the id of the
/// owning section so a self-update can be told apart from a real conflict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SectionNumberProbe {
    Free,
    TakenBy(i32),
}
