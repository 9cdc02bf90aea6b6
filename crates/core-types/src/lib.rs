//! # Restoration Core Types
//!
//! Shared vocabulary for the whole workspace: the raw row shapes returned by
//! the database, the closed set of system constants, and the error taxonomy
//! used at the API boundary.
//!
//! Row structs are deliberately "raw": every column that can be absent is an
//! `Option`, so that the view-model layer decides how absence is rendered.

pub mod enums;
pub mod error;
pub mod rows;

// Re-export the core types to provide a clean public API.
pub use enums::{SystemConstant, UnknownConstant};
pub use error::{ApiError, ApiErrorType};
pub use rows::{
    CodeRow, CodeSetRows, ConstantRow, InvestmentActionCategoryRow, ProjectRow, SearchRow,
    TreatmentRow,
};
