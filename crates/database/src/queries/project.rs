use super::require_project_id;
use crate::sql::{SqlBuilder, SqlStatement};
use core_types::ApiError;

/// Fetches the public fields of a published project or plan.
pub fn get_public_project_sql(project_id: i32) -> Result<SqlStatement, ApiError> {
    require_project_id(project_id)?;

    let mut builder = SqlBuilder::new(
        r#"
        SELECT
            p.name,
            p.is_project,
            p.start_date,
            p.end_date
        FROM
            project AS p
        WHERE
            p.publish_timestamp IS NOT NULL
        AND
            p.project_id = "#,
    );
    builder.push_bind(project_id).push(";");
    Ok(builder.build())
}

/// Fetches a project for administrative use, published or not.
pub fn get_project_sql(project_id: i32) -> Result<SqlStatement, ApiError> {
    require_project_id(project_id)?;

    let mut builder = SqlBuilder::new(
        r#"
        SELECT
            p.name,
            p.is_project,
            p.start_date,
            p.end_date,
            p.objectives,
            p.publish_date,
            p.revision_count
        FROM
            project AS p
        WHERE
            p.project_id = "#,
    );
    builder.push_bind(project_id).push(";");
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::SqlParam;
    use core_types::ApiErrorType;

    #[test]
    fn test_public_project_filters_unpublished() {
        let statement = get_public_project_sql(12).unwrap();
        assert!(statement.sql().contains("p.publish_timestamp IS NOT NULL"));
        assert!(statement.sql().contains("p.project_id = $1"));
        assert_eq!(statement.params(), [SqlParam::Int(12)]);
    }

    #[test]
    fn test_admin_project_selects_administrative_fields() {
        let statement = get_project_sql(3).unwrap();
        assert!(statement.sql().contains("p.revision_count"));
        assert!(!statement.sql().contains("publish_timestamp"));
    }

    #[test]
    fn test_non_positive_ids_fail_to_build() {
        for id in [0, -1, i32::MIN] {
            let err = get_public_project_sql(id).unwrap_err();
            assert_eq!(err.kind(), ApiErrorType::BuildSql);
            assert_eq!(get_project_sql(id).unwrap_err().name(), "BUILD_SQL");
        }
    }
}
