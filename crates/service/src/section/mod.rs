//! Section module: three-layer architecture (domain, repository, service).
//!
//! Centralizes the update/validation pipeline for warehouse sections: the
//! service sequences uniqueness and reference checks against the injected
//! repository and lookups before any mutation reaches storage.

pub mod domain;
pub mod errors;
pub mod outcome;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::SectionService;
