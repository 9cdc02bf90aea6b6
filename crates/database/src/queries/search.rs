use crate::sql::{SqlBuilder, SqlStatement};
use core_types::ApiError;
use serde::Deserialize;

pub const MAX_KEYWORD_LENGTH: usize = 200;

/// Optional filters for the public project search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchCriteria {
    /// Case-insensitive substring of the project name.
    pub keyword: Option<String>,
    /// `true` for projects only, `false` for plans only.
    pub is_project: Option<bool>,
}

/// Builds the public search over published projects and plans.
///
/// Each result row carries the `json_agg` of its location features. The
/// aggregate is a correlated subquery: `project` resolves to a view, which has
/// no primary key for a `GROUP BY` to lean on.
pub fn get_public_search_sql(criteria: &SearchCriteria) -> Result<SqlStatement, ApiError> {
    let mut builder = SqlBuilder::new(
        r#"
        SELECT
            p.project_id AS id,
            p.name,
            p.state_code,
            p.number_sites,
            p.size_ha,
            p.is_project,
            (
                SELECT json_agg(pl.geojson ORDER BY pl.project_location_id)
                FROM project_location AS pl
                WHERE pl.project_id = p.project_id
            ) AS geometry
        FROM
            project AS p
        WHERE
            p.publish_timestamp IS NOT NULL"#,
    );

    let keyword = criteria.keyword.as_deref().map(str::trim).unwrap_or_default();
    if keyword.chars().count() > MAX_KEYWORD_LENGTH {
        return Err(ApiError::build_sql("Failed to build SQL search statement")
            .with_error(format!("keyword exceeds {MAX_KEYWORD_LENGTH} characters")));
    }
    if !keyword.is_empty() {
        builder
            .push(" AND p.name ILIKE ")
            .push_bind(format!("%{}%", escape_like(keyword)));
    }

    if let Some(is_project) = criteria.is_project {
        builder.push(" AND p.is_project = ").push_bind(is_project);
    }

    builder.push(" ORDER BY p.name, p.project_id;");
    Ok(builder.build())
}

/// Escapes `LIKE` wildcards so the keyword matches literally.
fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::SqlParam;

    #[test]
    fn test_no_criteria_has_no_params() {
        let statement = get_public_search_sql(&SearchCriteria::default()).unwrap();
        assert!(statement.params().is_empty());
        assert!(!statement.sql().contains("ILIKE"));
        assert!(statement.sql().ends_with(" ORDER BY p.name, p.project_id;"));
    }

    #[test]
    fn test_locations_are_aggregated_per_project_without_group_by() {
        let statement = get_public_search_sql(&SearchCriteria {
            keyword: Some("fen".to_string()),
            is_project: Some(true),
        })
        .unwrap();
        let sql = statement.sql();

        assert!(!sql.contains("GROUP BY"), "{sql}");
        assert!(!sql.contains("JOIN"), "{sql}");
        assert!(sql.contains("WHERE pl.project_id = p.project_id"));
        // The only aggregate sits inside the correlated subquery.
        assert_eq!(sql.matches("json_agg(").count(), 1);
        assert!(sql.contains("SELECT json_agg(pl.geojson ORDER BY pl.project_location_id)"));
    }

    #[test]
    fn test_keyword_is_trimmed_escaped_and_bound() {
        let criteria = SearchCriteria {
            keyword: Some("  50%_fen  ".to_string()),
            is_project: Some(false),
        };
        let statement = get_public_search_sql(&criteria).unwrap();

        assert!(statement.sql().contains("AND p.name ILIKE $1 AND p.is_project = $2"));
        assert_eq!(
            statement.params(),
            [SqlParam::Text("%50\\%\\_fen%".to_string()), SqlParam::Bool(false)]
        );
        assert!(!statement.sql().contains("fen"));
    }

    #[test]
    fn test_blank_keyword_is_ignored() {
        let criteria = SearchCriteria {
            keyword: Some("   ".to_string()),
            is_project: None,
        };
        assert!(get_public_search_sql(&criteria).unwrap().params().is_empty());
    }

    #[test]
    fn test_overlong_keyword_fails_to_build() {
        let criteria = SearchCriteria {
            keyword: Some("x".repeat(MAX_KEYWORD_LENGTH + 1)),
            is_project: None,
        };
        let err = get_public_search_sql(&criteria).unwrap_err();
        assert_eq!(err.name(), "BUILD_SQL");
    }
}
