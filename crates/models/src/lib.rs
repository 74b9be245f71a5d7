pub mod errors;
pub mod db;
pub mod warehouse;
pub mod product_type;
pub mod section;
