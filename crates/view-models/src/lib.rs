//! # Restoration View Models
//!
//! Adapters that reshape raw database rows into the payloads the browser
//! application renders.
//!
//! The adapters are lenient: they never fail. Absent records and missing
//! fields become declared defaults (`""`, `null`, `0`, empty lists).

pub mod codes;
pub mod project;
pub mod search;
pub mod treatment;

pub use codes::{AllCodeSets, Code, InvestmentActionCategoryCode};
pub use project::{ProjectData, PublicProjectData};
pub use search::SearchResult;
pub use treatment::{group_treatment_units, Treatment, TreatmentUnit};
