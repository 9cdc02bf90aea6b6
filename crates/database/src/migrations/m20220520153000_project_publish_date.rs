use crate::schema::SchemaContext;

/// Alters the project view to expose the publish date alongside the timestamp.
/// `CREATE OR REPLACE` keeps the view's existing columns and appends the new one.
pub(super) fn up(ctx: &SchemaContext) -> String {
    format!(
        r#"
{search_path}

CREATE OR REPLACE VIEW {api}.project AS
    SELECT
        *,
        publish_timestamp::date AS publish_date
    FROM
        {schema}.project;
"#,
        search_path = ctx.migration_search_path(),
        api = ctx.api_schema(),
        schema = ctx.schema(),
    )
}
