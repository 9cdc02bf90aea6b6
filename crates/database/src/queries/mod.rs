//! Statement builders. Each returns a [`SqlStatement`](crate::SqlStatement);
//! builders that take request input return `Err(BUILD_SQL)` when that input
//! cannot form a valid statement.
//!
//! Unqualified table names resolve against the API schema's compatibility
//! views through the connection's `search_path`.

pub mod codes;
pub mod constants;
pub mod project;
pub mod search;
pub mod treatment;

use core_types::ApiError;

/// Project ids are identity columns and therefore always positive.
fn require_project_id(project_id: i32) -> Result<(), ApiError> {
    if project_id < 1 {
        return Err(ApiError::build_sql("Failed to build SQL get statement")
            .with_error(format!("invalid project id: {project_id}")));
    }
    Ok(())
}
