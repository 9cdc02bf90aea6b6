use super::require_project_id;
use crate::sql::{SqlBuilder, SqlStatement};
use core_types::ApiError;
use std::ops::RangeInclusive;

const TREATMENT_YEARS: RangeInclusive<i32> = 1900..=2100;

/// Fetches one row per treatment unit × treatment for a published project.
///
/// An empty `years` slice means every year. Rows come back grouped by unit so
/// that the first row of each unit is also its earliest treatment.
pub fn get_treatments_sql(project_id: i32, years: &[i32]) -> Result<SqlStatement, ApiError> {
    require_project_id(project_id)?;

    if let Some(year) = years.iter().find(|&&year| !TREATMENT_YEARS.contains(&year)) {
        return Err(ApiError::build_sql("Failed to build SQL get statement")
            .with_error(format!("treatment year out of range: {year}")));
    }

    let mut builder = SqlBuilder::new(
        r#"
        SELECT
            tu.name AS id,
            tu.feature_type AS type,
            tu.width,
            tu.length,
            tu.area,
            tu.comments,
            tu.geojson,
            tt.name AS treatment_name,
            t.year AS treatment_year
        FROM
            treatment_unit AS tu
        JOIN
            project AS p ON p.project_id = tu.project_id
        JOIN
            treatment AS t ON t.treatment_unit_id = tu.treatment_unit_id
        JOIN
            treatment_type AS tt ON tt.treatment_type_id = t.treatment_type_id
        WHERE
            p.publish_timestamp IS NOT NULL
        AND
            tu.project_id = "#,
    );
    builder.push_bind(project_id);

    if !years.is_empty() {
        builder.push(" AND t.year = ANY(").push_bind(years.to_vec()).push(")");
    }

    builder.push(" ORDER BY tu.treatment_unit_id, t.year, tt.name;");
    Ok(builder.build())
}

/// The distinct years in which a published project has treatments, ascending.
pub fn get_treatment_years_sql(project_id: i32) -> Result<SqlStatement, ApiError> {
    require_project_id(project_id)?;

    let mut builder = SqlBuilder::new(
        r#"
        SELECT DISTINCT
            t.year
        FROM
            treatment AS t
        JOIN
            treatment_unit AS tu ON tu.treatment_unit_id = t.treatment_unit_id
        JOIN
            project AS p ON p.project_id = tu.project_id
        WHERE
            p.publish_timestamp IS NOT NULL
        AND
            tu.project_id = "#,
    );
    builder.push_bind(project_id).push(" ORDER BY t.year;");
    Ok(builder.build())
}
