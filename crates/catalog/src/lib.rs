//! Medicine catalog: static, read-only reference data.
//!
//! The catalog is loaded once at session start and never mutated afterwards.
//! It has no lifecycle beyond the session; everything else in the system
//! refers to medicines by `MedicineId` and resolves them here.

pub mod catalog;
pub mod demo;
pub mod medicine;

pub use catalog::Catalog;
pub use demo::demo_catalog;
pub use medicine::{Medicine, MedicineCategory};
